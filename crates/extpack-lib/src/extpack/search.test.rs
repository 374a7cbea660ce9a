use super::*;

#[test]
fn test_containment_scores_one() {
    assert_eq!(fuzzy_score("PRETTIER", "esbenp.prettier-vscode"), 1.0);
    assert_eq!(fuzzy_score("", "anything"), 1.0);
}

#[test]
fn test_subsequence_scores_by_ratio() {
    assert_eq!(fuzzy_score("pvs", "prettier-vscode"), 1.0);
    assert_eq!(fuzzy_score("xyz", "prettier-vscode"), 0.0);
    assert_eq!(fuzzy_score("vp", "prettier-vscode"), 0.0);
}

#[test]
fn test_blank_query_matches_everything() {
    assert!(matches_any("", &[], DEFAULT_THRESHOLD));
    assert!(matches_any("   ", &["x"], DEFAULT_THRESHOLD));
}

#[test]
fn test_matches_any_field() {
    let fields = ["ESLint", "dbaeumer.vscode-eslint"];
    assert!(matches_any("  Dbaeumer ", &fields, DEFAULT_THRESHOLD));
    assert!(matches_any("esl", &fields, DEFAULT_THRESHOLD));
    assert!(matches_any("dve", &fields, DEFAULT_THRESHOLD));
    assert!(!matches_any("python", &fields, DEFAULT_THRESHOLD));
}
