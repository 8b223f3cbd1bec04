//! Recommendation and career-feedback text for a gap analysis.

use crate::skills::analyzer::PriorityBreakdown;

/// High-priority gaps named in the recommendation line.
const RECOMMENDED_HIGH_LIMIT: usize = 3;
/// High-priority gaps named in the feedback paragraph.
const FEEDBACK_HIGH_LIMIT: usize = 2;

/// Ordered critical-first: at most one critical entry and one high entry, or a
/// single success entry when neither kind of gap exists.
pub fn build_recommendations(role: &str, critical: &[String], high: &[String]) -> Vec<String> {
    let mut recs = Vec::new();

    if !critical.is_empty() {
        recs.push(format!(
            "Focus immediately on core {role} skills: {}",
            critical.join(", ")
        ));
    }

    if !high.is_empty() {
        let named: Vec<&str> = high
            .iter()
            .take(RECOMMENDED_HIGH_LIMIT)
            .map(String::as_str)
            .collect();
        recs.push(format!(
            "Strengthen your profile by adding: {}",
            named.join(", ")
        ));
    }

    if recs.is_empty() {
        recs.push(format!(
            "Your resume strongly matches the {role} role requirements."
        ));
    }

    recs
}

pub fn build_career_feedback(role: &str, match_percentage: f64, gaps: &PriorityBreakdown) -> String {
    // Tiers differ from the rating thresholds.
    let mut feedback = if match_percentage >= 85.0 {
        format!(
            "You are strongly prepared for the {role} role. \
             Your core skills align well with industry expectations."
        )
    } else if match_percentage >= 65.0 {
        format!(
            "You are moderately prepared for the {role} role, \
             but strengthening a few areas will significantly improve your chances."
        )
    } else {
        format!(
            "You are currently underprepared for the {role} role. \
             Focused upskilling is recommended before applying."
        )
    };

    if !gaps.critical.is_empty() {
        feedback.push_str(&format!(
            " Critical gaps detected in {}. These should be your top priority.",
            gaps.critical.join(", ")
        ));
    }

    if !gaps.high.is_empty() {
        let named: Vec<&str> = gaps
            .high
            .iter()
            .take(FEEDBACK_HIGH_LIMIT)
            .map(String::as_str)
            .collect();
        feedback.push_str(&format!(
            " Adding {} will greatly strengthen your profile.",
            named.join(", ")
        ));
    }

    if gaps.critical.is_empty() && gaps.high.is_empty() {
        feedback.push_str(" You meet all major expectations for this role.");
    }

    feedback
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn breakdown(critical: &[&str], high: &[&str]) -> PriorityBreakdown {
        PriorityBreakdown {
            critical: strings(critical),
            high: strings(high),
            ..PriorityBreakdown::default()
        }
    }

    #[test]
    fn test_recommendations_critical_first() {
        let recs = build_recommendations("devops", &strings(&["aws", "docker"]), &strings(&["kubernetes"]));
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0], "Focus immediately on core devops skills: aws, docker");
        assert_eq!(recs[1], "Strengthen your profile by adding: kubernetes");
    }

    #[test]
    fn test_recommendations_cap_high_list() {
        let recs = build_recommendations(
            "backend",
            &[],
            &strings(&["django", "express", "mongodb", "postgresql"]),
        );
        assert_eq!(
            recs,
            strings(&["Strengthen your profile by adding: django, express, mongodb"])
        );
    }

    #[test]
    fn test_recommendations_success_when_no_gaps() {
        let recs = build_recommendations("frontend", &[], &[]);
        assert_eq!(
            recs,
            strings(&["Your resume strongly matches the frontend role requirements."])
        );
    }

    #[test]
    fn test_feedback_tiers() {
        let none = breakdown(&[], &[]);
        assert!(build_career_feedback("devops", 85.0, &none).starts_with("You are strongly prepared"));
        assert!(build_career_feedback("devops", 84.99, &none).starts_with("You are moderately prepared"));
        assert!(build_career_feedback("devops", 65.0, &none).starts_with("You are moderately prepared"));
        assert!(build_career_feedback("devops", 64.99, &none).starts_with("You are currently underprepared"));
    }

    #[test]
    fn test_feedback_names_critical_and_two_high_gaps() {
        let gaps = breakdown(&["python"], &["deep_learning", "nlp", "typescript"]);
        let text = build_career_feedback("data_science", 40.0, &gaps);
        assert!(text.contains("Critical gaps detected in python."));
        assert!(text.contains("Adding deep_learning, nlp will greatly strengthen your profile."));
        assert!(!text.contains("typescript"));
        assert!(!text.contains("meet all major expectations"));
    }

    #[test]
    fn test_feedback_closing_clause_only_without_gaps() {
        let text = build_career_feedback("backend", 92.0, &breakdown(&[], &[]));
        assert!(text.ends_with(" You meet all major expectations for this role."));

        let text = build_career_feedback("backend", 92.0, &breakdown(&[], &["django"]));
        assert!(!text.contains("meet all major expectations"));
    }
}
