//! # Verification Engine
//! Orchestrates one verification request: vision extraction → presence probe
//! → scoring pipeline → assembled verdict.
//!
//! Failure policy: extraction failure is fatal (there is no scoring without
//! attributes); a probe failure or timeout degrades to an unavailable
//! presence record and scoring proceeds. Each call is a pure function of its
//! inputs plus the two collaborator responses — no shared mutable state.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tracing::{debug, info, warn};

use crate::analyze::{analyze_attributes, HotReloadPolicy, ScoringPolicy};
use crate::presence::{PresenceProber, PresenceResult};
use crate::verdict::{VerificationReport, VerificationResult};
use crate::vision::{ExtractionOutcome, VisionExtractor};

/// Bounded wait for the supplementary presence probe.
pub const DEFAULT_PROBE_BUDGET: Duration = Duration::from_secs(5);

/// Error string surfaced when the vision step fails outright.
pub const EXTRACTION_FAILED: &str = "Failed to extract product information from image";

pub struct VerificationEngine {
    extractor: Arc<dyn VisionExtractor>,
    prober: Arc<dyn PresenceProber>,
    policy: Arc<HotReloadPolicy>,
    probe_budget: Duration,
}

impl VerificationEngine {
    pub fn new(
        extractor: Arc<dyn VisionExtractor>,
        prober: Arc<dyn PresenceProber>,
        policy: Arc<HotReloadPolicy>,
    ) -> Self {
        Self {
            extractor,
            prober,
            policy,
            probe_budget: DEFAULT_PROBE_BUDGET,
        }
    }

    /// Override the probe budget (tests use a tight one).
    pub fn with_probe_budget(mut self, budget: Duration) -> Self {
        self.probe_budget = budget;
        self
    }

    /// Current scoring policy (hot-reloaded).
    pub fn policy(&self) -> ScoringPolicy {
        self.policy.current()
    }

    /// Verify one product photo (base64-encoded). Always returns a result:
    /// a full report, or a structured failure when extraction is impossible.
    pub async fn verify(&self, image_base64: &str) -> VerificationResult {
        let id = anon_hash(image_base64);

        let outcome = self.extractor.extract(image_base64).await;
        let attrs = match &outcome {
            ExtractionOutcome::Parsed(attrs) => attrs,
            ExtractionOutcome::Degraded { attrs, .. } => {
                debug!(target: "verify", %id, "degraded extraction, scoring on scraped fields");
                attrs
            }
            ExtractionOutcome::Failed { reason } => {
                warn!(target: "verify", %id, %reason, "extraction failed");
                counter!("authenticity_verifications_failed_total").increment(1);
                return VerificationResult::failure(EXTRACTION_FAILED, Some(reason.clone()));
            }
        };

        // Supplementary evidence: bounded wait, degrade on timeout.
        let presence = match tokio::time::timeout(
            self.probe_budget,
            self.prober.probe(&attrs.brand_name, &attrs.product_name),
        )
        .await
        {
            Ok(p) => p,
            Err(_) => {
                warn!(target: "verify", %id, budget_ms = self.probe_budget.as_millis() as u64,
                      "presence probe timed out");
                PresenceResult::unavailable()
            }
        };

        let policy = self.policy.current();
        let analysis = analyze_attributes(attrs, &presence, &policy);

        counter!(
            "authenticity_verifications_total",
            "risk" => analysis.risk.level.as_str()
        )
        .increment(1);
        // Never log raw payloads; only the hashed id and the verdict shape.
        info!(
            target: "verify",
            %id,
            risk = analysis.risk.level.as_str(),
            confidence = analysis.overall,
            warnings = analysis.warnings.len(),
            "verification complete"
        );

        VerificationResult::from_report(VerificationReport::assemble(attrs, &presence, analysis))
    }
}

/// Short anonymized digest for log correlation (first 6 bytes of SHA-256).
pub(crate) fn anon_hash(payload: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
