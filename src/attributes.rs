//! attributes.rs — the structured record the vision extractor hands us.
//!
//! Every optional field carries an explicit default ("Unknown", "Not visible",
//! "average", empty list), so a partially-filled payload deserializes into a
//! fully-populated record and scoring never has to branch on missing data.

use serde::{Deserialize, Serialize};

/// Sentinel used by the extractor for unreadable text fields.
pub const UNKNOWN: &str = "Unknown";
/// Sentinel for packaging fields that the photo does not show.
pub const NOT_VISIBLE: &str = "Not visible";

/// Packaging attributes extracted from a single product photo.
///
/// The quality fields stay plain strings on purpose: the extractor's
/// vocabulary is not strictly enforced, and the quality mapper treats any
/// unrecognized rating as "average" instead of rejecting the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedAttributes {
    pub brand_name: String,
    pub product_name: String,
    pub category: String,
    /// One of poor/average/good/excellent (case-insensitive, lenient).
    pub packaging_quality: String,
    pub image_quality: String,
    pub text_clarity: String,
    pub batch_number: String,
    pub manufacturing_date: String,
    pub expiry_date: String,
    /// Specific flaws the extractor flagged (misspellings, bad print, ...).
    pub suspicious_elements: Vec<String>,
    /// Positive signals (holograms, seals, embossing, ...).
    pub legitimacy_indicators: Vec<String>,
}

impl Default for ExtractedAttributes {
    fn default() -> Self {
        Self {
            brand_name: UNKNOWN.to_string(),
            product_name: UNKNOWN.to_string(),
            category: UNKNOWN.to_string(),
            packaging_quality: "average".to_string(),
            image_quality: "average".to_string(),
            text_clarity: "average".to_string(),
            batch_number: NOT_VISIBLE.to_string(),
            manufacturing_date: NOT_VISIBLE.to_string(),
            expiry_date: NOT_VISIBLE.to_string(),
            suspicious_elements: Vec::new(),
            legitimacy_indicators: Vec::new(),
        }
    }
}

impl ExtractedAttributes {
    /// True when the extractor identified a usable brand name.
    pub fn brand_is_known(&self) -> bool {
        let b = self.brand_name.trim();
        !b.is_empty() && !b.eq_ignore_ascii_case("unknown")
    }

    /// True when a real batch/lot number is visible on the packaging.
    pub fn has_batch_number(&self) -> bool {
        let b = self.batch_number.trim();
        !b.is_empty() && !b.eq_ignore_ascii_case("not visible")
    }
}
