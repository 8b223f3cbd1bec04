//! Cross-role ranking and per-role learning roadmaps.

use serde::{Deserialize, Serialize};

use crate::skills::analyzer::{analyze_skill_gap, resolve_role, AnalysisError, AnalysisOptions};
use crate::skills::catalog::{Priority, SkillCatalog};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleMatch {
    pub role: String,
    pub match_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleComparison {
    pub best_match: Option<RoleMatch>,
    /// Sorted by match percentage, highest first. Ties keep catalog order.
    pub all_matches: Vec<RoleMatch>,
}

/// Roadmap tiers: critical skills are fundamentals, high are intermediate,
/// everything else advanced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadmapTiers {
    pub fundamentals: Vec<String>,
    pub intermediate: Vec<String>,
    pub advanced: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRoadmap {
    pub role: String,
    pub roadmap: RoadmapTiers,
}

/// Scores `text` against every role and ranks the results.
/// Learning resources are never attached here.
pub fn compare_multiple_roles(
    catalog: &SkillCatalog,
    text: &str,
    options: &AnalysisOptions,
) -> Result<RoleComparison, AnalysisError> {
    let options = AnalysisOptions {
        include_resources: false,
        ..*options
    };

    let mut all_matches = catalog
        .roles()
        .iter()
        .map(|role| {
            analyze_skill_gap(catalog, text, role.id, &options).map(|analysis| RoleMatch {
                role: analysis.role,
                match_percentage: analysis.match_percentage,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // sort_by is stable, so equal scores keep catalog declaration order
    all_matches.sort_by(|a, b| b.match_percentage.total_cmp(&a.match_percentage));

    Ok(RoleComparison {
        best_match: all_matches.first().cloned(),
        all_matches,
    })
}

pub fn get_skill_roadmap(catalog: &SkillCatalog, role: &str) -> Result<SkillRoadmap, AnalysisError> {
    let role = resolve_role(catalog, role)?;

    let mut roadmap = RoadmapTiers::default();
    for &skill in &role.skills {
        let tier = match catalog.priority(skill) {
            Priority::Critical => &mut roadmap.fundamentals,
            Priority::High => &mut roadmap.intermediate,
            Priority::Medium | Priority::Low => &mut roadmap.advanced,
        };
        tier.push(skill.to_string());
    }

    Ok(SkillRoadmap {
        role: role.id.to_string(),
        roadmap,
    })
}

pub fn get_available_roles(catalog: &SkillCatalog) -> Vec<String> {
    catalog.role_ids()
}
