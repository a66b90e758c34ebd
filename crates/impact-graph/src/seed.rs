//! The built-in SDLC taxonomy.
//!
//! Six levels under a single root: phases (1), practices (2), activities
//! (3), tasks (4) and leaf steps (5). Every node starts at 0%.

use crate::error::GraphResult;
use crate::node::ProcessNode;
use crate::store::ProcessGraph;

/// Identifier of the taxonomy root.
pub const SEED_ROOT: &str = "SDLC Process";

/// Seed nodes as `(id, level)`.
pub const SEED_NODES: &[(&str, u32)] = &[
    (SEED_ROOT, 0),
    ("Planning", 1),
    ("Requirements Gathering", 2),
    ("Stakeholder Analysis", 3),
    ("Identify Key Stakeholders", 4),
    ("Internal Stakeholders", 5),
    ("External Stakeholders", 5),
    ("Requirements Documentation", 4),
    ("Functional Requirements", 5),
    ("Non-Functional Requirements", 5),
    ("Feasibility Study", 3),
    ("Technical Feasibility", 4),
    ("Technology Assessment", 5),
    ("Resource Evaluation", 5),
    ("Design", 1),
    ("System Architecture", 2),
    ("High-Level Design", 3),
    ("Component Design", 4),
    ("Module Specification", 5),
    ("Interface Design", 5),
    ("Implementation", 1),
    ("Coding", 2),
    ("Development", 3),
    ("Code Implementation", 4),
    ("Unit Testing", 5),
    ("Code Review", 5),
    ("Testing", 1),
    ("Quality Assurance", 2),
    ("Testing Phases", 3),
    ("Test Planning", 4),
    ("Test Cases", 5),
    ("Test Environment", 5),
    ("Deployment", 1),
    ("Release Management", 2),
    ("Deployment Planning", 3),
    ("Release Strategy", 4),
    ("Rollout Plan", 5),
    ("Rollback Plan", 5),
    ("Maintenance", 1),
    ("Operations", 2),
    ("Support", 3),
    ("Monitoring", 4),
    ("Performance Tracking", 5),
    ("Issue Resolution", 5),
];

/// Seed edges as `(parent, child)`.
pub const SEED_EDGES: &[(&str, &str)] = &[
    (SEED_ROOT, "Planning"),
    ("Planning", "Requirements Gathering"),
    ("Requirements Gathering", "Stakeholder Analysis"),
    ("Stakeholder Analysis", "Identify Key Stakeholders"),
    ("Identify Key Stakeholders", "Internal Stakeholders"),
    ("Identify Key Stakeholders", "External Stakeholders"),
    ("Stakeholder Analysis", "Requirements Documentation"),
    ("Requirements Documentation", "Functional Requirements"),
    ("Requirements Documentation", "Non-Functional Requirements"),
    ("Requirements Gathering", "Feasibility Study"),
    ("Feasibility Study", "Technical Feasibility"),
    ("Technical Feasibility", "Technology Assessment"),
    ("Technical Feasibility", "Resource Evaluation"),
    (SEED_ROOT, "Design"),
    ("Design", "System Architecture"),
    ("System Architecture", "High-Level Design"),
    ("High-Level Design", "Component Design"),
    ("Component Design", "Module Specification"),
    ("Component Design", "Interface Design"),
    (SEED_ROOT, "Implementation"),
    ("Implementation", "Coding"),
    ("Coding", "Development"),
    ("Development", "Code Implementation"),
    ("Code Implementation", "Unit Testing"),
    ("Code Implementation", "Code Review"),
    (SEED_ROOT, "Testing"),
    ("Testing", "Quality Assurance"),
    ("Quality Assurance", "Testing Phases"),
    ("Testing Phases", "Test Planning"),
    ("Test Planning", "Test Cases"),
    ("Test Planning", "Test Environment"),
    (SEED_ROOT, "Deployment"),
    ("Deployment", "Release Management"),
    ("Release Management", "Deployment Planning"),
    ("Deployment Planning", "Release Strategy"),
    ("Release Strategy", "Rollout Plan"),
    ("Release Strategy", "Rollback Plan"),
    (SEED_ROOT, "Maintenance"),
    ("Maintenance", "Operations"),
    ("Operations", "Support"),
    ("Support", "Monitoring"),
    ("Monitoring", "Performance Tracking"),
    ("Monitoring", "Issue Resolution"),
];

impl ProcessGraph {
    /// Builds the SDLC taxonomy with every value at 0%.
    pub fn sdlc_seed() -> GraphResult<Self> {
        let mut graph = Self::new();
        for (id, level) in SEED_NODES {
            graph.insert(ProcessNode::new(*id, *level))?;
        }
        for (source, target) in SEED_EDGES {
            graph.add_edge(source, target)?;
        }
        Ok(graph)
    }
}
