use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::skills::catalog::SkillCatalog;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Compiled once at startup, read-only afterwards.
    pub catalog: Arc<SkillCatalog>,
    /// Pluggable document-to-text extractor. Default: DocumentExtractor.
    pub extractor: Arc<dyn TextExtractor>,
}
