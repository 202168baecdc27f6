//! Neutralization conformance tests. The substitution table is ordered
//! and its output is part of the contract.

use railguard_rails::AdviceNeutralizer;

#[test]
fn canonical_substitution() {
    let n = AdviceNeutralizer::new();
    let out = n.neutralize("you should file immediately");
    assert_eq!(out.text, "parties typically file immediately");
    assert_eq!(out.transformations.len(), 1);
    assert!(out.borderline.is_empty());
}

#[test]
fn multiple_phrases_all_replaced() {
    let n = AdviceNeutralizer::new();
    let out = n.neutralize("You should appeal. We recommend mediation. You must respond.");
    assert!(out.text.contains("parties typically appeal"));
    assert!(out.text.contains("common practice includes mediation"));
    assert!(out.text.contains("parties are generally required to respond"));
    assert_eq!(out.transformations.len(), 3);
}

#[test]
fn borderline_phrases_recorded_not_transformed() {
    let n = AdviceNeutralizer::new();
    let text = "You might consider arbitration in your situation.";
    let out = n.neutralize(text);
    assert_eq!(out.text, text);
    assert!(out.transformations.is_empty());
    assert_eq!(out.borderline.len(), 2);
}

#[test]
fn risk_score_formula() {
    let n = AdviceNeutralizer::new();
    // 2 transformations + 1 borderline = score 5, no review required.
    let report = n.scan_and_neutralize(
        "you should settle and you must reply; you may want to wait",
        false,
    );
    assert_eq!(report.transformations.len(), 2);
    assert_eq!(report.borderline.len(), 1);
    assert_eq!(report.risk_score, 5);
    assert!(!report.requires_human_review);
}

#[test]
fn review_required_above_score_threshold() {
    let n = AdviceNeutralizer::new();
    // 3 transformations = score 6 > 5.
    let report =
        n.scan_and_neutralize("you should a. you must b. we recommend c.", false);
    assert_eq!(report.risk_score, 6);
    assert!(report.requires_human_review);
}

#[test]
fn review_required_when_more_than_three_transformations() {
    let n = AdviceNeutralizer::new();
    let report = n.scan_and_neutralize(
        "you should a. you must b. we recommend c. we advise d.",
        false,
    );
    assert!(report.transformations.len() > 3);
    assert!(report.requires_human_review);
}

#[test]
fn legal_advice_mention_always_flags_review() {
    let n = AdviceNeutralizer::new();
    let report = n.scan_and_neutralize("This is Legal Advice about parking.", false);
    assert_eq!(report.risk_score, 0);
    assert!(report.requires_human_review);
}

#[test]
fn caller_can_force_review() {
    let n = AdviceNeutralizer::new();
    let report = n.scan_and_neutralize("nothing advisory here", true);
    assert!(report.requires_human_review);
}

#[test]
fn clean_text_untouched() {
    let n = AdviceNeutralizer::new();
    let text = "Statutes of limitations vary by jurisdiction.";
    let report = n.scan_and_neutralize(text, false);
    assert_eq!(report.neutralized_text, text);
    assert_eq!(report.risk_score, 0);
    assert!(!report.requires_human_review);
}
