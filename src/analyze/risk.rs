//! Risk Classifier: (overall score, suspicious-element count) → risk tier.

use serde::{Deserialize, Serialize};

use crate::analyze::policy::RiskThresholds;

/// Discrete risk tier for a verification verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Lowercase wire/label form, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Fixed user-facing description per tier.
    pub fn description(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Product appears authentic with high confidence",
            RiskLevel::Medium => "Product authenticity uncertain, proceed with caution",
            RiskLevel::High => "High risk of counterfeit, verification strongly recommended",
        }
    }
}

/// Tier plus its description, as surfaced in the verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub description: String,
}

/// Classify a verdict. First match wins:
/// 1. score ≥ low threshold AND suspicious count within the low gate → Low
/// 2. score ≥ medium threshold AND count within the medium gate → Medium
/// 3. everything else → High
///
/// The suspicious-element gate is hard: an 85 with two flagged elements still
/// classifies High. Total over all (score, count) pairs.
pub fn classify(overall: u8, suspicious_count: usize, t: &RiskThresholds) -> RiskAssessment {
    let level = if overall >= t.low_min_score && suspicious_count <= t.low_max_suspicious {
        RiskLevel::Low
    } else if overall >= t.medium_min_score && suspicious_count <= t.medium_max_suspicious {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    };
    RiskAssessment {
        level,
        description: level.description().to_string(),
    }
}
