//! verdict.rs — output records for one verification request: score breakdown,
//! risk assessment, explainability, and the top-level result envelope.
//!
//! A result is constructed once per request and never mutated. Persistence is
//! the caller's responsibility; this crate only produces the record.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::analyze::{Analysis, RiskLevel};
use crate::attributes::ExtractedAttributes;
use crate::presence::{PresenceResult, SearchHit};

/// How many search hits are surfaced back to the caller.
const TOP_RESULTS: usize = 3;

/// The five sub-scores plus the aggregated overall. `overall` is always
/// reproducible from the sub-scores and the policy weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub image_quality: u8,
    pub packaging_quality: u8,
    pub text_clarity: u8,
    pub brand_legitimacy: u8,
    pub web_presence: u8,
    pub overall: u8,
}

/// Echoed subset of the extracted attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedInfo {
    pub brand_name: String,
    pub product_name: String,
    pub category: String,
    pub batch_number: String,
    pub manufacturing_date: String,
    pub expiry_date: String,
}

impl From<&ExtractedAttributes> for ExtractedInfo {
    fn from(a: &ExtractedAttributes) -> Self {
        Self {
            brand_name: a.brand_name.clone(),
            product_name: a.product_name.clone(),
            category: a.category.clone(),
            batch_number: a.batch_number.clone(),
            manufacturing_date: a.manufacturing_date.clone(),
            expiry_date: a.expiry_date.clone(),
        }
    }
}

/// Condensed web-presence evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSearchSummary {
    pub total_results: u64,
    pub has_official_website: bool,
    pub top_results: Vec<SearchHit>,
}

impl From<&PresenceResult> for WebSearchSummary {
    fn from(p: &PresenceResult) -> Self {
        Self {
            total_results: p.total_results,
            has_official_website: p.has_official_website,
            top_results: p.results.iter().take(TOP_RESULTS).cloned().collect(),
        }
    }
}

/// The full success payload of a verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub verified: bool,
    /// Equals the overall score (0–100).
    pub confidence: u8,
    pub risk_level: RiskLevel,
    pub risk_description: String,
    pub extracted_info: ExtractedInfo,
    pub scoring: ScoreBreakdown,
    pub analysis: Vec<String>,
    pub web_search: WebSearchSummary,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    pub reward_eligible: bool,
    pub message: String,
    /// RFC 3339, UTC.
    pub checked_at: String,
}

impl VerificationReport {
    /// Assemble the report from the pipeline output and the collaborator
    /// records it was derived from.
    pub fn assemble(
        attrs: &ExtractedAttributes,
        presence: &PresenceResult,
        analysis: Analysis,
    ) -> Self {
        let scoring = ScoreBreakdown {
            image_quality: analysis.scores.image_quality,
            packaging_quality: analysis.scores.packaging_quality,
            text_clarity: analysis.scores.text_clarity,
            brand_legitimacy: analysis.scores.brand_legitimacy,
            web_presence: analysis.scores.web_presence,
            overall: analysis.overall,
        };
        Self {
            verified: analysis.verified,
            confidence: analysis.overall,
            risk_level: analysis.risk.level,
            risk_description: analysis.risk.description,
            extracted_info: ExtractedInfo::from(attrs),
            scoring,
            analysis: analysis.scores.analysis,
            web_search: WebSearchSummary::from(presence),
            warnings: analysis.warnings,
            recommendations: analysis.recommendations,
            reward_eligible: analysis.reward_eligible,
            message: analysis.message,
            checked_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Top-level result envelope. On failure only `success`/`error`/`details`
/// serialize — no scoring fields are present at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub report: Option<VerificationReport>,
}

impl VerificationResult {
    pub fn from_report(report: VerificationReport) -> Self {
        Self {
            success: true,
            error: None,
            details: None,
            report: Some(report),
        }
    }

    pub fn failure(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            details,
            report: None,
        }
    }
}
