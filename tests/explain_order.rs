// tests/explain_order.rs
//
// The warning list order and the tier-selected recommendations are part of
// the observable contract; assert order, not just membership.

use authenticity_analyzer::analyze::{analyze_attributes, RiskLevel, ScoringPolicy};
use authenticity_analyzer::attributes::ExtractedAttributes;
use authenticity_analyzer::presence::PresenceResult;

#[test]
fn all_warning_conditions_fire_in_documented_order() {
    // Poor image and packaging, two suspicious elements, no official site,
    // no results, no batch number: every warning condition holds at once.
    let attrs = ExtractedAttributes {
        brand_name: "Acme".to_string(),
        packaging_quality: "poor".to_string(),
        image_quality: "poor".to_string(),
        suspicious_elements: vec!["misspelled label".to_string(), "blurry print".to_string()],
        ..Default::default()
    };
    let analysis = analyze_attributes(
        &attrs,
        &PresenceResult::unavailable(),
        &ScoringPolicy::default(),
    );

    assert_eq!(
        analysis.warnings,
        vec![
            "Image quality is poor - results may be inaccurate".to_string(),
            "Packaging quality appears below standard".to_string(),
            "⚠️ misspelled label".to_string(),
            "⚠️ blurry print".to_string(),
            "No official website found for this brand".to_string(),
            "Limited online presence for this product".to_string(),
            "No batch/lot number visible on packaging".to_string(),
        ]
    );
    assert_eq!(analysis.risk.level, RiskLevel::High);
}

#[test]
fn analysis_notes_follow_brand_web_packaging_order() {
    let attrs = ExtractedAttributes {
        brand_name: "Acme".to_string(),
        packaging_quality: "good".to_string(),
        legitimacy_indicators: vec!["hologram".to_string(), "seal".to_string()],
        ..Default::default()
    };
    let presence = PresenceResult {
        success: true,
        has_official_website: true,
        total_results: 12,
        results: Vec::new(),
    };
    let analysis = analyze_attributes(&attrs, &presence, &ScoringPolicy::default());

    assert_eq!(
        analysis.scores.analysis,
        vec![
            "Brand identified: Acme".to_string(),
            "No suspicious elements detected".to_string(),
            "2 legitimacy indicator(s) present".to_string(),
            "Official brand website found".to_string(),
            "Strong online presence (12 results)".to_string(),
            "High quality packaging detected".to_string(),
        ]
    );
}

#[test]
fn recommendations_are_selected_wholesale_per_tier() {
    let high = analyze_attributes(
        &ExtractedAttributes {
            suspicious_elements: vec!["fake seal".to_string(), "odd font".to_string()],
            ..Default::default()
        },
        &PresenceResult::unavailable(),
        &ScoringPolicy::default(),
    );
    assert_eq!(high.risk.level, RiskLevel::High);
    assert_eq!(high.recommendations.len(), 4);
    assert!(high.recommendations[0].starts_with("❌"));

    let medium = analyze_attributes(
        &ExtractedAttributes {
            brand_name: "Acme".to_string(),
            packaging_quality: "good".to_string(),
            image_quality: "good".to_string(),
            text_clarity: "good".to_string(),
            ..Default::default()
        },
        &PresenceResult::unavailable(),
        &ScoringPolicy::default(),
    );
    assert_eq!(medium.risk.level, RiskLevel::Medium);
    assert_eq!(
        medium.recommendations[0],
        "Verify the batch number on the manufacturer's website"
    );
}

#[test]
fn low_tier_recommendations_quote_the_batch_number() {
    let attrs = ExtractedAttributes {
        brand_name: "Acme".to_string(),
        packaging_quality: "excellent".to_string(),
        image_quality: "excellent".to_string(),
        text_clarity: "excellent".to_string(),
        batch_number: "B-2024-17".to_string(),
        legitimacy_indicators: vec!["hologram".to_string()],
        ..Default::default()
    };
    let presence = PresenceResult {
        success: true,
        has_official_website: true,
        total_results: 9,
        results: Vec::new(),
    };
    let analysis = analyze_attributes(&attrs, &presence, &ScoringPolicy::default());

    assert_eq!(analysis.risk.level, RiskLevel::Low);
    assert_eq!(analysis.recommendations[0], "✅ Product appears authentic");
    assert!(analysis.recommendations[1].contains("B-2024-17"));
    assert_eq!(
        analysis.recommendations.last().unwrap(),
        "Keep your receipt as proof of purchase"
    );
}
