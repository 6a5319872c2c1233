// src/analyze/mod.rs
//! Analysis pipeline entry: scores the extracted signals and builds the full
//! verdict bundle (overall score, risk tier, warnings, recommendations).
//!
//! Everything in this module tree is pure and synchronous; the engine feeds
//! it collaborator outputs and serializes the result.

pub mod explain;
pub mod policy;
pub mod quality;
pub mod risk;
pub mod scoring;

// Re-export convenient types.
pub use crate::analyze::policy::{
    load_policy_file, HotReloadPolicy, RiskThresholds, ScoringPolicy, SignalWeights,
};
pub use crate::analyze::quality::score_quality;
pub use crate::analyze::risk::{classify, RiskAssessment, RiskLevel};
pub use crate::analyze::scoring::{score_signals, SignalScores};

use crate::attributes::ExtractedAttributes;
use crate::presence::PresenceResult;

/// Everything the scoring pipeline derives from one attribute record and one
/// presence probe. Assembled in a single pass; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub scores: SignalScores,
    pub overall: u8,
    pub risk: RiskAssessment,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    pub message: String,
    pub verified: bool,
    pub reward_eligible: bool,
}

/// Run the pure pipeline: signal scorer → aggregator → risk classifier →
/// explainer. `verified` means the Low tier; `reward_eligible` additionally
/// requires the policy's reward gate (kept separate from the tier threshold
/// on purpose, see config/policy.json).
pub fn analyze_attributes(
    attrs: &ExtractedAttributes,
    presence: &PresenceResult,
    policy: &ScoringPolicy,
) -> Analysis {
    let scores = score_signals(attrs, presence);
    let overall = policy.weights.aggregate(&scores);
    let risk = classify(overall, attrs.suspicious_elements.len(), &policy.risk);

    let warnings = explain::warnings(attrs, presence, &scores);
    let recommendations = explain::recommendations(risk.level, attrs);
    let message = explain::message(risk.level, overall);

    let verified = risk.level == RiskLevel::Low;
    let reward_eligible = verified && overall >= policy.reward_min_score;

    Analysis {
        scores,
        overall,
        risk,
        warnings,
        recommendations,
        message,
        verified,
        reward_eligible,
    }
}
