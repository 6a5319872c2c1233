//! Explainer: ordered warnings, tier-selected recommendations, and the
//! human-readable summary message.

use crate::analyze::risk::RiskLevel;
use crate::analyze::scoring::SignalScores;
use crate::attributes::ExtractedAttributes;
use crate::presence::PresenceResult;

/// Build the warning list. Append order is fixed and each entry appears only
/// when its condition holds:
/// image quality, packaging quality, one line per suspicious element,
/// missing official site, thin search results, missing batch number.
pub fn warnings(
    attrs: &ExtractedAttributes,
    presence: &PresenceResult,
    scores: &SignalScores,
) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    if scores.image_quality < 50 {
        out.push("Image quality is poor - results may be inaccurate".to_string());
    }
    if scores.packaging_quality < 60 {
        out.push("Packaging quality appears below standard".to_string());
    }
    for element in &attrs.suspicious_elements {
        out.push(format!("⚠️ {element}"));
    }
    if !presence.has_official_website {
        out.push("No official website found for this brand".to_string());
    }
    if presence.total_results < 3 {
        out.push("Limited online presence for this product".to_string());
    }
    if !attrs.has_batch_number() {
        out.push("No batch/lot number visible on packaging".to_string());
    }

    out
}

/// Recommendations are selected wholesale by risk tier, not assembled
/// incrementally. Only the Low tier looks at the attributes (to quote a real
/// batch number back to the user).
pub fn recommendations(level: RiskLevel, attrs: &ExtractedAttributes) -> Vec<String> {
    match level {
        RiskLevel::High => vec![
            "❌ Do not use this product until authenticity is confirmed".to_string(),
            "Contact the manufacturer directly to verify this product".to_string(),
            "Purchase only from authorized retailers".to_string(),
            "Report suspected counterfeits to your local consumer authority".to_string(),
        ],
        RiskLevel::Medium => vec![
            "Verify the batch number on the manufacturer's website".to_string(),
            "Scan the QR code on the packaging if one is available".to_string(),
            "Compare this product with a known authentic one".to_string(),
            "Buy from verified retailers only".to_string(),
        ],
        RiskLevel::Low => {
            let mut out = vec!["✅ Product appears authentic".to_string()];
            if attrs.has_batch_number() {
                out.push(format!(
                    "Verify batch number {} on the manufacturer's website for added assurance",
                    attrs.batch_number.trim()
                ));
            }
            out.push("Prefer QR code verification for guaranteed authenticity".to_string());
            out.push("Keep your receipt as proof of purchase".to_string());
            out
        }
    }
}

/// Plain-language summary line, graded by tier.
pub fn message(level: RiskLevel, overall: u8) -> String {
    match level {
        RiskLevel::Low => {
            format!("✅ Product verification passed with {overall}% confidence")
        }
        RiskLevel::Medium => format!(
            "⚠️ Product authenticity uncertain ({overall}% confidence) - additional verification recommended"
        ),
        RiskLevel::High => format!(
            "❌ High risk of counterfeit ({overall}% confidence) - do not use until verified"
        ),
    }
}
