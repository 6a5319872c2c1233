//! Signal Scorer: five independent 0–100 dimension scores plus the ordered
//! analysis notes that explain them.
//!
//! Scoring and note generation happen together per dimension for locality;
//! the note order (brand, web presence, packaging) is part of the observable
//! contract and tests assert on it.

use crate::analyze::quality::score_quality;
use crate::attributes::ExtractedAttributes;
use crate::presence::PresenceResult;

/// The five sub-scores plus their analysis notes. `overall` is added later by
/// the aggregator so the breakdown stays reproducible from these alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalScores {
    pub image_quality: u8,
    pub packaging_quality: u8,
    pub text_clarity: u8,
    pub brand_legitimacy: u8,
    pub web_presence: u8,
    pub analysis: Vec<String>,
}

/// Compute all five dimension scores from the extractor and prober outputs.
pub fn score_signals(attrs: &ExtractedAttributes, presence: &PresenceResult) -> SignalScores {
    let image_quality = score_quality(&attrs.image_quality);
    let packaging_quality = score_quality(&attrs.packaging_quality);
    let text_clarity = score_quality(&attrs.text_clarity);

    let mut analysis: Vec<String> = Vec::new();

    // Brand legitimacy: unidentifiable brand scores zero outright; otherwise
    // start at 70, lift to 85 when nothing suspicious was flagged, then add
    // 5 per legitimacy indicator, capped at 100.
    let brand_legitimacy = if !attrs.brand_is_known() {
        analysis.push("Brand name not clearly identifiable".to_string());
        0
    } else {
        analysis.push(format!("Brand identified: {}", attrs.brand_name.trim()));
        let mut score: u32 = 70;
        if attrs.suspicious_elements.is_empty() {
            score = 85;
            analysis.push("No suspicious elements detected".to_string());
        } else {
            analysis.push(format!(
                "{} suspicious element(s) found",
                attrs.suspicious_elements.len()
            ));
        }
        let indicators = attrs.legitimacy_indicators.len();
        score = (score + 5 * indicators as u32).min(100);
        if indicators > 0 {
            analysis.push(format!("{indicators} legitimacy indicator(s) present"));
        }
        score as u8
    };

    // Web presence: a failed probe is worth nothing but never fails the
    // request; an official site dominates, a large result count adds a bonus.
    let web_presence = if !presence.success {
        analysis.push("Limited online verification available".to_string());
        0
    } else {
        let mut score: u32 = 50;
        if presence.has_official_website {
            score = 85;
            analysis.push("Official brand website found".to_string());
        }
        if presence.total_results > 5 {
            score = (score + 15).min(100);
            analysis.push(format!(
                "Strong online presence ({} results)",
                presence.total_results
            ));
        }
        score as u8
    };

    // Unconditional packaging note, after the brand and web notes.
    match attrs.packaging_quality.trim().to_ascii_lowercase().as_str() {
        "excellent" | "good" => analysis.push("High quality packaging detected".to_string()),
        "poor" => analysis.push("Low packaging quality - potential concern".to_string()),
        _ => {}
    }

    SignalScores {
        image_quality,
        packaging_quality,
        text_clarity,
        brand_legitimacy,
        web_presence,
        analysis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::SearchHit;

    fn attrs() -> ExtractedAttributes {
        ExtractedAttributes {
            brand_name: "Acme".to_string(),
            packaging_quality: "excellent".to_string(),
            image_quality: "good".to_string(),
            text_clarity: "good".to_string(),
            legitimacy_indicators: vec!["hologram".to_string()],
            ..Default::default()
        }
    }

    fn presence_ok(official: bool, total: u64) -> PresenceResult {
        PresenceResult {
            success: true,
            has_official_website: official,
            total_results: total,
            results: vec![SearchHit {
                title: "Acme official store".to_string(),
                link: "https://acme.example".to_string(),
                snippet: "Buy genuine Acme".to_string(),
            }],
        }
    }

    #[test]
    fn unknown_brand_scores_zero_with_note() {
        let mut a = attrs();
        a.brand_name = "Unknown".to_string();
        let s = score_signals(&a, &PresenceResult::unavailable());
        assert_eq!(s.brand_legitimacy, 0);
        assert_eq!(s.analysis[0], "Brand name not clearly identifiable");
    }

    #[test]
    fn clean_brand_with_indicator_reaches_ninety() {
        let s = score_signals(&attrs(), &presence_ok(true, 10));
        // 70 -> 85 (no suspicious) + 5 (one indicator)
        assert_eq!(s.brand_legitimacy, 90);
        // 50 -> 85 (official site) + 15 (10 results)
        assert_eq!(s.web_presence, 100);
        assert_eq!(s.image_quality, 75);
        assert_eq!(s.packaging_quality, 95);
        assert_eq!(s.text_clarity, 75);
    }

    #[test]
    fn legitimacy_boost_caps_at_one_hundred() {
        let mut a = attrs();
        a.legitimacy_indicators = (0..10).map(|i| format!("seal {i}")).collect();
        let s = score_signals(&a, &PresenceResult::unavailable());
        assert_eq!(s.brand_legitimacy, 100);
    }

    #[test]
    fn suspicious_elements_hold_brand_at_base() {
        let mut a = attrs();
        a.legitimacy_indicators.clear();
        a.suspicious_elements = vec!["misspelled label".to_string()];
        let s = score_signals(&a, &PresenceResult::unavailable());
        assert_eq!(s.brand_legitimacy, 70);
        assert!(s.analysis.contains(&"1 suspicious element(s) found".to_string()));
    }

    #[test]
    fn failed_probe_scores_zero_web_presence() {
        let s = score_signals(&attrs(), &PresenceResult::unavailable());
        assert_eq!(s.web_presence, 0);
        assert!(s
            .analysis
            .contains(&"Limited online verification available".to_string()));
    }

    #[test]
    fn probe_without_official_site_stays_at_base() {
        let s = score_signals(&attrs(), &presence_ok(false, 4));
        assert_eq!(s.web_presence, 50);
    }

    #[test]
    fn note_order_is_brand_then_web_then_packaging() {
        let s = score_signals(&attrs(), &presence_ok(true, 10));
        let expected = vec![
            "Brand identified: Acme".to_string(),
            "No suspicious elements detected".to_string(),
            "1 legitimacy indicator(s) present".to_string(),
            "Official brand website found".to_string(),
            "Strong online presence (10 results)".to_string(),
            "High quality packaging detected".to_string(),
        ];
        assert_eq!(s.analysis, expected);
    }

    #[test]
    fn poor_packaging_appends_concern_note() {
        let mut a = attrs();
        a.packaging_quality = "poor".to_string();
        let s = score_signals(&a, &PresenceResult::unavailable());
        assert_eq!(
            s.analysis.last().unwrap(),
            "Low packaging quality - potential concern"
        );
    }
}
