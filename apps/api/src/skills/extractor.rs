//! Skill Extractor: scans normalized resume text against the catalog patterns.

use std::collections::BTreeSet;

use crate::skills::catalog::SkillCatalog;

/// Returns every catalog skill whose pattern matches `text`, deduplicated and
/// sorted ascending.
///
/// When `role` names a known role the result is intersected with that role's
/// required skills. An unknown role applies no filter; callers that need
/// fail-fast role validation resolve the role first.
pub fn extract_skills(catalog: &SkillCatalog, text: &str, role: Option<&str>) -> Vec<String> {
    detect(catalog, text, role)
        .into_iter()
        .map(String::from)
        .collect()
}

/// Same as [`extract_skills`] but borrows identifiers from the catalog.
pub(crate) fn detect(
    catalog: &SkillCatalog,
    text: &str,
    role: Option<&str>,
) -> BTreeSet<&'static str> {
    if text.is_empty() {
        return BTreeSet::new();
    }

    let text = text.to_lowercase();
    let found: BTreeSet<&'static str> = catalog
        .skills()
        .iter()
        .filter(|skill| skill.pattern.is_match(&text))
        .map(|skill| skill.id)
        .collect();

    match role.and_then(|r| catalog.role(r)) {
        Some(role) => found.intersection(&role.skills).copied().collect(),
        None => found,
    }
}
