const EXACT: f64 = 1.0;
const CONTAINS: f64 = 0.8;
const TOKEN_OVERLAP: f64 = 0.6;
const FLOOR: f64 = 0.3;

const SYNONYM_SEPARATORS: [char; 3] = [',', '/', ';'];

fn base_similarity(user: &str, candidate: &str) -> f64 {
    if user == candidate {
        EXACT
    } else if candidate.contains(user) || user.contains(candidate) {
        CONTAINS
    } else if user
        .split_whitespace()
        .any(|token| candidate.contains(token))
    {
        TOKEN_OVERLAP
    } else {
        FLOOR
    }
}

/// Graded similarity in [0, 1] between an answer and a methodology attribute.
///
/// The attribute may list synonyms separated by commas, slashes or semicolons;
/// the best-matching synonym wins. The unsplit attribute is one more candidate,
/// so any value compared with itself scores 1.0. A missing or blank side scores 0.
pub fn fuzzy_match(user_value: &str, method_value: Option<&str>) -> f64 {
    let Some(attribute) = method_value.map(str::trim).filter(|value| !value.is_empty()) else {
        return 0.0;
    };

    let user = user_value.trim().to_lowercase();
    if user.is_empty() {
        return 0.0;
    }

    std::iter::once(attribute)
        .chain(attribute.split(SYNONYM_SEPARATORS))
        .map(|candidate| candidate.trim().to_lowercase())
        .filter(|candidate| !candidate.is_empty())
        .map(|candidate| base_similarity(&user, &candidate))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonym_list_matches_exactly_regardless_of_case() {
        assert_eq!(fuzzy_match("small", Some("Small, Medium")), 1.0);
        assert_eq!(fuzzy_match(" MEDIUM ", Some("Small, Medium")), 1.0);
    }

    #[test]
    fn identical_strings_score_one() {
        for value in ["Up-front", "Time & Materials", "x", "Iterative / Program Increment", ";"] {
            assert_eq!(fuzzy_match(value, Some(value)), 1.0);
            assert_eq!(fuzzy_match(&value.to_uppercase(), Some(value)), 1.0);
        }
    }

    #[test]
    fn substring_scores_contains_tier() {
        assert_eq!(fuzzy_match("Continuous", Some("Continuous Flow")), 0.8);
        assert_eq!(
            fuzzy_match("Continuous Feedback Loops", Some("Feedback")),
            0.8
        );
    }

    #[test]
    fn shared_token_scores_overlap_tier() {
        assert_eq!(
            fuzzy_match("Structured Silo Teams", Some("Component Teams / Agile Release Trains")),
            0.6
        );
    }

    #[test]
    fn unrelated_values_hit_the_floor() {
        assert_eq!(fuzzy_match("Fixed Price", Some("Time & Materials")), 0.3);
    }

    #[test]
    fn missing_or_blank_sides_score_zero() {
        assert_eq!(fuzzy_match("Small", None), 0.0);
        assert_eq!(fuzzy_match("Small", Some("   ")), 0.0);
        assert_eq!(fuzzy_match("  ", Some("Small")), 0.0);
    }

    #[test]
    fn scores_stay_within_unit_interval() {
        let samples = [
            ("a", "b"),
            ("large teams", "Large"),
            ("x y z", "y"),
            ("Iterative", "Iterative; Up-front"),
            ("", ""),
        ];
        for (user, method) in samples {
            let score = fuzzy_match(user, Some(method));
            assert!((0.0..=1.0).contains(&score), "{user} vs {method} = {score}");
        }
    }
}
