use anyhow::{bail, Context, Result};

use crate::skills::analyzer::{AnalysisOptions, ExtractionScope, ScoringMode};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values abort startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub scoring_mode: ScoringMode,
    pub extraction_scope: ExtractionScope,
    /// When false, the skill extraction endpoint treats unknown roles as "no filter".
    pub strict_roles: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_upload_bytes: match get("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            scoring_mode: parse_scoring_mode(get("SCORING_MODE").as_deref())?,
            extraction_scope: parse_extraction_scope(get("EXTRACTION_SCOPE").as_deref())?,
            strict_roles: parse_bool("STRICT_ROLES", get("STRICT_ROLES").as_deref(), true)?,
        })
    }

    /// Analyzer options for a single request.
    pub fn analysis_options(&self, include_resources: bool) -> AnalysisOptions {
        AnalysisOptions {
            include_resources,
            scope: self.extraction_scope,
            scoring: self.scoring_mode,
        }
    }
}

fn parse_scoring_mode(value: Option<&str>) -> Result<ScoringMode> {
    match value.map(|v| v.trim().to_lowercase()).as_deref() {
        None | Some("weighted") => Ok(ScoringMode::Weighted),
        Some("unweighted") => Ok(ScoringMode::Unweighted),
        Some(other) => bail!("SCORING_MODE must be 'weighted' or 'unweighted', got '{other}'"),
    }
}

fn parse_extraction_scope(value: Option<&str>) -> Result<ExtractionScope> {
    match value.map(|v| v.trim().to_lowercase()).as_deref() {
        None | Some("role") => Ok(ExtractionScope::RoleScoped),
        Some("all") => Ok(ExtractionScope::Unscoped),
        Some(other) => bail!("EXTRACTION_SCOPE must be 'role' or 'all', got '{other}'"),
    }
}

fn parse_bool(key: &str, value: Option<&str>, default: bool) -> Result<bool> {
    match value.map(|v| v.trim().to_lowercase()).as_deref() {
        None => Ok(default),
        Some("true" | "1" | "yes") => Ok(true),
        Some("false" | "0" | "no") => Ok(false),
        Some(other) => bail!("{key} must be a boolean, got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.scoring_mode, ScoringMode::Weighted);
        assert_eq!(config.extraction_scope, ExtractionScope::RoleScoped);
        assert!(config.strict_roles);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "5000"),
            ("SCORING_MODE", "Unweighted"),
            ("EXTRACTION_SCOPE", "all"),
            ("STRICT_ROLES", "false"),
            ("MAX_UPLOAD_BYTES", "1024"),
        ])
        .unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.scoring_mode, ScoringMode::Unweighted);
        assert_eq!(config.extraction_scope, ExtractionScope::Unscoped);
        assert!(!config.strict_roles);
        assert_eq!(config.max_upload_bytes, 1024);
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err = config_from(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_invalid_scoring_mode_rejected() {
        assert!(config_from(&[("SCORING_MODE", "fuzzy")]).is_err());
    }

    #[test]
    fn test_analysis_options_follow_config() {
        let config = config_from(&[("EXTRACTION_SCOPE", "all")]).unwrap();
        let options = config.analysis_options(true);
        assert!(options.include_resources);
        assert_eq!(options.scope, ExtractionScope::Unscoped);
        assert_eq!(options.scoring, ScoringMode::Weighted);
    }
}
