//! Skill Catalog: the static registry of skill patterns, role requirements,
//! priority levels and learning resources.
//!
//! Built once at startup via [`SkillCatalog::builtin`] and shared read-only
//! (`Arc<SkillCatalog>` in `AppState`). Patterns are compiled exactly once.

use std::collections::BTreeSet;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Priority levels
// ────────────────────────────────────────────────────────────────────────────

/// How important a skill is. Drives both gap bucketing and score weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    #[default]
    Low,
}

impl Priority {
    /// Score weight: critical=3, high=2, medium=1, low=0.
    pub fn weight(self) -> u32 {
        match self {
            Priority::Critical => 3,
            Priority::High => 2,
            Priority::Medium => 1,
            Priority::Low => 0,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Raw catalog data
// ────────────────────────────────────────────────────────────────────────────

/// (skill, pattern, rejected suffix). The suffix stands in for a negative
/// lookahead: a match is discarded when the text right after it matches.
const SKILL_PATTERNS: &[(&str, &str, Option<&str>)] = &[
    // Programming languages
    ("python", r"\bpython\b", None),
    ("java", r"\bjava\b", Some(r"\s*script")),
    ("javascript", r"\b(javascript|js)\b", None),
    ("typescript", r"\b(typescript|ts)\b", None),
    ("sql", r"\bsql\b", None),
    ("golang", r"\b(go|golang)\b", None),
    ("rust", r"\brust\b", None),
    ("cpp", r"\b(c\+\+|cpp)\b", None),
    ("csharp", r"\b(c#|csharp|c\s*sharp)\b", None),
    ("kotlin", r"\bkotlin\b", None),
    ("swift", r"\bswift\b", None),
    ("ruby", r"\bruby\b", None),
    ("php", r"\bphp\b", None),
    ("scala", r"\bscala\b", None),
    ("r_lang", r"\b(r\s*(programming|language)|r-lang)\b", None),
    // Frontend
    ("html", r"\bhtml\d*\b", None),
    ("css", r"\bcss\d*\b", None),
    ("react", r"\breact(\.js|js)?\b", None),
    ("angular", r"\bangular(\.js|js)?\b", None),
    ("vue", r"\bvue(\.js|js)?\b", None),
    ("nextjs", r"\bnext(\.js|js)?\b", None),
    ("tailwind", r"\btailwind(\s*css)?\b", None),
    ("bootstrap", r"\bbootstrap\b", None),
    ("redux", r"\bredux\b", None),
    // Backend
    ("node", r"\bnode(\.js|js)?\b", None),
    ("express", r"\bexpress(\.js|js)?\b", None),
    ("django", r"\bdjango\b", None),
    ("flask", r"\bflask\b", None),
    ("fastapi", r"\bfastapi\b", None),
    ("spring", r"\bspring(\s*boot)?\b", None),
    // Databases
    ("mongodb", r"\b(mongodb|mongo)\b", None),
    ("postgresql", r"\b(postgresql|postgres)\b", None),
    ("mysql", r"\bmysql\b", None),
    ("redis", r"\bredis\b", None),
    // Cloud & DevOps
    ("aws", r"\b(aws|amazon\s*web\s*services)\b", None),
    ("azure", r"\b(azure|microsoft\s*azure)\b", None),
    ("gcp", r"\b(gcp|google\s*cloud(\s*platform)?)\b", None),
    ("docker", r"\bdocker\b", None),
    ("kubernetes", r"\b(kubernetes|k8s)\b", None),
    ("jenkins", r"\bjenkins\b", None),
    ("ci_cd", r"\b(ci\s*/?\s*cd|cicd|continuous\s*(integration|deployment))\b", None),
    // AI / ML
    ("machine_learning", r"\b(machine\s*learning|ml)\b", None),
    ("deep_learning", r"\bdeep\s*learning\b", None),
    ("nlp", r"\b(nlp|natural\s*language\s*processing)\b", None),
    ("tensorflow", r"\btensorflow\b", None),
    ("pytorch", r"\bpytorch\b", None),
    ("scikit_learn", r"\b(scikit[\-\s]?learn|sklearn)\b", None),
    // Version control
    ("git", r"\bgit\b", Some(r"hub|lab")),
    ("github", r"\bgithub\b", None),
    ("gitlab", r"\bgitlab\b", None),
];

/// Declaration order is the tie-break order for role comparison.
const ROLE_SKILLS: &[(&str, &[&str])] = &[
    (
        "frontend",
        &[
            "html", "css", "javascript", "typescript", "react", "vue", "angular", "nextjs",
            "tailwind", "bootstrap", "redux",
        ],
    ),
    (
        "backend",
        &[
            "python", "java", "node", "express", "django", "flask", "fastapi", "spring", "sql",
            "postgresql", "mongodb", "redis",
        ],
    ),
    (
        "fullstack",
        &[
            "html", "css", "javascript", "react", "node", "express", "python", "django", "sql",
            "postgresql", "mongodb", "tailwind",
        ],
    ),
    (
        "data_science",
        &[
            "python", "sql", "machine_learning", "deep_learning", "nlp", "tensorflow", "pytorch",
            "scikit_learn",
        ],
    ),
    (
        "devops",
        &["docker", "kubernetes", "aws", "azure", "gcp", "jenkins", "ci_cd", "git"],
    ),
];

/// Skills absent from this table are `Priority::Low`.
const SKILL_PRIORITY: &[(&str, Priority)] = &[
    // Core languages
    ("python", Priority::Critical),
    ("java", Priority::Critical),
    ("javascript", Priority::Critical),
    ("sql", Priority::Critical),
    // Frontend
    ("html", Priority::Critical),
    ("css", Priority::Critical),
    ("react", Priority::Critical),
    ("typescript", Priority::High),
    ("nextjs", Priority::High),
    ("tailwind", Priority::Medium),
    ("redux", Priority::Medium),
    // Backend
    ("node", Priority::Critical),
    ("express", Priority::High),
    ("django", Priority::High),
    ("fastapi", Priority::Medium),
    ("postgresql", Priority::High),
    ("mongodb", Priority::High),
    ("redis", Priority::Medium),
    // DevOps
    ("docker", Priority::Critical),
    ("aws", Priority::Critical),
    ("git", Priority::Critical),
    ("kubernetes", Priority::High),
    ("ci_cd", Priority::High),
    // Data / AI
    ("machine_learning", Priority::Critical),
    ("deep_learning", Priority::High),
    ("nlp", Priority::High),
];

const LEARNING_RESOURCES: &[(&str, &str)] = &[
    ("python", "https://www.python.org/about/gettingstarted/"),
    ("javascript", "https://javascript.info/"),
    ("react", "https://react.dev/learn"),
    ("node", "https://nodejs.org/en/learn"),
    ("docker", "https://docs.docker.com/get-started/"),
    ("aws", "https://aws.amazon.com/training/"),
    ("sql", "https://www.w3schools.com/sql/"),
    ("django", "https://docs.djangoproject.com/en/stable/intro/"),
    ("fastapi", "https://fastapi.tiangolo.com/tutorial/"),
    ("postgresql", "https://www.postgresql.org/docs/current/tutorial.html"),
    ("flask", "https://flask.palletsprojects.com/en/2.3.x/tutorial/"),
    ("nextjs", "https://nextjs.org/learn"),
    ("kubernetes", "https://kubernetes.io/docs/tutorials/"),
    ("machine_learning", "https://www.coursera.org/learn/machine-learning"),
    ("deep_learning", "https://www.deeplearning.ai/deep-learning-specialization/"),
    ("nlp", "https://www.coursera.org/learn/natural-language-processing"),
    ("git", "https://git-scm.com/docs/gittutorial"),
    ("typescript", "https://www.typescriptlang.org/docs/"),
    ("ci_cd", "https://www.redhat.com/en/topics/devops/what-is-ci-cd"),
    ("tailwind", "https://tailwindcss.com/docs/installation"),
];

// ────────────────────────────────────────────────────────────────────────────
// Compiled catalog
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid pattern for skill '{skill}': {source}")]
    Pattern {
        skill: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("Role '{role}' requires unknown skill '{skill}'")]
    UnknownSkill {
        role: &'static str,
        skill: &'static str,
    },

    #[error("Catalog defines no roles")]
    NoRoles,
}

/// A compiled skill matcher.
#[derive(Debug)]
pub struct SkillPattern {
    regex: Regex,
    rejected_suffix: Option<Regex>,
}

impl SkillPattern {
    fn compile(skill: &'static str, pattern: &str, suffix: Option<&str>) -> Result<Self, CatalogError> {
        let regex = Regex::new(pattern).map_err(|source| CatalogError::Pattern { skill, source })?;
        let rejected_suffix = suffix
            .map(|s| Regex::new(&format!("^(?:{s})")))
            .transpose()
            .map_err(|source| CatalogError::Pattern { skill, source })?;
        Ok(Self {
            regex,
            rejected_suffix,
        })
    }

    /// True if the pattern matches anywhere in `text` at a position whose
    /// trailing text is not a rejected suffix.
    pub fn is_match(&self, text: &str) -> bool {
        match &self.rejected_suffix {
            None => self.regex.is_match(text),
            Some(reject) => self
                .regex
                .find_iter(text)
                .any(|m| !reject.is_match(&text[m.end()..])),
        }
    }
}

#[derive(Debug)]
pub struct Skill {
    pub id: &'static str,
    pub pattern: SkillPattern,
    pub priority: Priority,
    pub resource: Option<&'static str>,
}

#[derive(Debug)]
pub struct Role {
    pub id: &'static str,
    pub skills: BTreeSet<&'static str>,
}

/// Immutable skill/role registry. Safe for concurrent unsynchronized reads.
#[derive(Debug)]
pub struct SkillCatalog {
    skills: Vec<Skill>,
    roles: Vec<Role>,
}

impl SkillCatalog {
    /// Compiles the built-in catalog and checks that every role only
    /// references known skills.
    pub fn builtin() -> Result<Self, CatalogError> {
        let skills = SKILL_PATTERNS
            .iter()
            .map(|&(id, pattern, suffix)| -> Result<Skill, CatalogError> {
                Ok(Skill {
                    id,
                    pattern: SkillPattern::compile(id, pattern, suffix)?,
                    priority: lookup(SKILL_PRIORITY, id).unwrap_or_default(),
                    resource: lookup(LEARNING_RESOURCES, id),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let roles: Vec<Role> = ROLE_SKILLS
            .iter()
            .map(|&(id, members)| Role {
                id,
                skills: members.iter().copied().collect(),
            })
            .collect();

        if roles.is_empty() {
            return Err(CatalogError::NoRoles);
        }
        for role in &roles {
            if let Some(skill) = role
                .skills
                .iter()
                .find(|s| !skills.iter().any(|k| k.id == **s))
            {
                return Err(CatalogError::UnknownSkill {
                    role: role.id,
                    skill: *skill,
                });
            }
        }

        Ok(Self { skills, roles })
    }

    /// All skills, in declaration order.
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// All roles, in declaration order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn role(&self, id: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == id)
    }

    /// Priority of a skill; `Low` for anything not in the priority table.
    pub fn priority(&self, skill: &str) -> Priority {
        self.skills
            .iter()
            .find(|s| s.id == skill)
            .map(|s| s.priority)
            .unwrap_or_default()
    }

    pub fn resource(&self, skill: &str) -> Option<&'static str> {
        self.skills
            .iter()
            .find(|s| s.id == skill)
            .and_then(|s| s.resource)
    }

    /// Role identifiers sorted ascending.
    pub fn role_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.roles.iter().map(|r| r.id.to_string()).collect();
        ids.sort();
        ids
    }
}

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SkillCatalog {
        SkillCatalog::builtin().expect("built-in catalog must compile")
    }

    #[test]
    fn test_builtin_catalog_compiles() {
        let c = catalog();
        assert_eq!(c.skills().len(), 50);
        assert_eq!(c.roles().len(), 5);
    }

    #[test]
    fn test_every_role_skill_exists_in_catalog() {
        let c = catalog();
        for role in c.roles() {
            for skill in &role.skills {
                assert!(
                    c.skills().iter().any(|s| s.id == *skill),
                    "{} references unknown skill {skill}",
                    role.id
                );
            }
        }
    }

    #[test]
    fn test_priority_defaults_to_low() {
        let c = catalog();
        assert_eq!(c.priority("python"), Priority::Critical);
        assert_eq!(c.priority("kubernetes"), Priority::High);
        assert_eq!(c.priority("redis"), Priority::Medium);
        assert_eq!(c.priority("jenkins"), Priority::Low);
        assert_eq!(c.priority("cobol"), Priority::Low);
    }

    #[test]
    fn test_priority_weights() {
        assert_eq!(Priority::Critical.weight(), 3);
        assert_eq!(Priority::High.weight(), 2);
        assert_eq!(Priority::Medium.weight(), 1);
        assert_eq!(Priority::Low.weight(), 0);
    }

    #[test]
    fn test_resource_lookup() {
        let c = catalog();
        assert_eq!(c.resource("react"), Some("https://react.dev/learn"));
        assert_eq!(c.resource("azure"), None);
    }

    #[test]
    fn test_role_ids_sorted() {
        assert_eq!(
            catalog().role_ids(),
            vec!["backend", "data_science", "devops", "frontend", "fullstack"]
        );
    }

    #[test]
    fn test_rejected_suffix_only_filters_that_occurrence() {
        let c = catalog();
        let java = &c.skills().iter().find(|s| s.id == "java").unwrap().pattern;
        assert!(!java.is_match("java script"));
        assert!(java.is_match("java script and plain java"));
        assert!(java.is_match("java, spring"));
    }

    #[test]
    fn test_priority_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Priority::Critical).unwrap(),
            r#""critical""#
        );
    }
}
