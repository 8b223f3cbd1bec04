//! Gap Analyzer: compares a candidate's detected skills with a role's
//! required skills and produces a scored, prioritized report.
//!
//! Two behaviours are configurable because they were never settled:
//! - [`ExtractionScope`]: `RoleScoped` (default) filters detected skills to the
//!   role before comparison, so `extra_skills` is always empty. `Unscoped`
//!   detects everything and reports off-role skills as `extra_skills`.
//! - [`ScoringMode`]: `Weighted` (default) weights each required skill by its
//!   priority. `Unweighted` is the plain `matched / required` ratio.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::skills::catalog::{Priority, Role, SkillCatalog};
use crate::skills::extractor::detect;
use crate::skills::feedback::{build_career_feedback, build_recommendations};

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("{0}")]
    MissingInput(String),

    #[error("Invalid role '{role}'. Available roles: {}", .available.join(", "))]
    InvalidRole { role: String, available: Vec<String> },
}

// ────────────────────────────────────────────────────────────────────────────
// Options
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionScope {
    #[default]
    RoleScoped,
    Unscoped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    #[default]
    Weighted,
    Unweighted,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisOptions {
    pub include_resources: bool,
    pub scope: ExtractionScope,
    pub scoring: ScoringMode,
}

// ────────────────────────────────────────────────────────────────────────────
// Result types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Strong,
    Good,
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl Rating {
    pub fn from_percentage(percentage: f64) -> Self {
        match percentage {
            p if p >= 90.0 => Rating::Excellent,
            p if p >= 75.0 => Rating::Strong,
            p if p >= 60.0 => Rating::Good,
            p if p >= 40.0 => Rating::Fair,
            _ => Rating::NeedsImprovement,
        }
    }
}

/// Missing skills bucketed by priority, each list sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    pub critical: Vec<String>,
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
}

impl PriorityBreakdown {
    fn bucket(catalog: &SkillCatalog, missing: &BTreeSet<&'static str>) -> Self {
        let mut breakdown = Self::default();
        for &skill in missing {
            let bucket = match catalog.priority(skill) {
                Priority::Critical => &mut breakdown.critical,
                Priority::High => &mut breakdown.high,
                Priority::Medium => &mut breakdown.medium,
                Priority::Low => &mut breakdown.low,
            };
            bucket.push(skill.to_string());
        }
        breakdown
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub role: String,
    /// 0.0 to 100.0, two decimals
    pub match_percentage: f64,
    pub rating: Rating,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub extra_skills: Vec<String>,
    pub total_required: usize,
    pub total_matched: usize,
    pub total_missing: usize,
    pub priority_breakdown: PriorityBreakdown,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_resources: Option<BTreeMap<String, String>>,
    pub career_feedback: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Analysis
// ────────────────────────────────────────────────────────────────────────────

/// Looks up a role after lowercasing and trimming. Unknown roles fail with
/// `InvalidRole`, listing every valid identifier.
pub fn resolve_role<'c>(catalog: &'c SkillCatalog, role: &str) -> Result<&'c Role, AnalysisError> {
    let normalized = role.trim().to_lowercase();
    catalog
        .role(&normalized)
        .ok_or_else(|| AnalysisError::InvalidRole {
            role: normalized,
            available: catalog.role_ids(),
        })
}

/// Analyzes `text` against `role`. `options` selects extraction scope,
/// scoring mode and whether learning resources are attached.
pub fn analyze_skill_gap(
    catalog: &SkillCatalog,
    text: &str,
    role: &str,
    options: &AnalysisOptions,
) -> Result<AnalysisResult, AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::MissingInput(
            "Resume text must be a non-empty string".to_string(),
        ));
    }
    let role = resolve_role(catalog, role)?;

    let candidate = match options.scope {
        ExtractionScope::RoleScoped => detect(catalog, text, Some(role.id)),
        ExtractionScope::Unscoped => detect(catalog, text, None),
    };
    let required = &role.skills;

    let matched: BTreeSet<&'static str> = candidate.intersection(required).copied().collect();
    let missing: BTreeSet<&'static str> = required.difference(&candidate).copied().collect();
    let extra: BTreeSet<&'static str> = candidate.difference(required).copied().collect();

    let match_percentage = match_percentage(catalog, required, &candidate, options.scoring);
    let priority_breakdown = PriorityBreakdown::bucket(catalog, &missing);
    let recommendations =
        build_recommendations(role.id, &priority_breakdown.critical, &priority_breakdown.high);
    let career_feedback = build_career_feedback(role.id, match_percentage, &priority_breakdown);

    let learning_resources = options.include_resources.then(|| {
        missing
            .iter()
            .filter_map(|&skill| {
                catalog
                    .resource(skill)
                    .map(|url| (skill.to_string(), url.to_string()))
            })
            .collect()
    });

    Ok(AnalysisResult {
        role: role.id.to_string(),
        match_percentage,
        rating: Rating::from_percentage(match_percentage),
        matched_skills: to_sorted_vec(&matched),
        missing_skills: to_sorted_vec(&missing),
        extra_skills: to_sorted_vec(&extra),
        total_required: required.len(),
        total_matched: matched.len(),
        total_missing: missing.len(),
        priority_breakdown,
        recommendations,
        learning_resources,
        career_feedback,
    })
}

/// Match percentage rounded to two decimals. 0.0 when the denominator is zero.
pub fn match_percentage(
    catalog: &SkillCatalog,
    required: &BTreeSet<&'static str>,
    candidate: &BTreeSet<&'static str>,
    mode: ScoringMode,
) -> f64 {
    let (earned, total) = match mode {
        ScoringMode::Weighted => required.iter().fold((0u32, 0u32), |(earned, total), skill| {
            let weight = catalog.priority(skill).weight();
            let gained = if candidate.contains(skill) { weight } else { 0 };
            (earned + gained, total + weight)
        }),
        ScoringMode::Unweighted => (
            required.intersection(candidate).count() as u32,
            required.len() as u32,
        ),
    };

    if total == 0 {
        return 0.0;
    }
    round2(earned as f64 / total as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn to_sorted_vec(set: &BTreeSet<&'static str>) -> Vec<String> {
    set.iter().map(|s| s.to_string()).collect()
}
