// Skill gap analysis: catalog data, keyword extraction, weighted scoring,
// recommendations and roadmaps. Everything here is synchronous and pure;
// handlers push the CPU-bound work onto spawn_blocking.

pub mod analyzer;
pub mod catalog;
pub mod extractor;
pub mod feedback;
pub mod handlers;
pub mod roadmap;
