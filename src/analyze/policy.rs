//! Scoring policy: signal weights, risk thresholds, and the reward gate,
//! hot-reloaded from config/policy.json.
//!
//! JSON shape:
//! {
//!   "weights": { "imageQuality": 0.15, "packagingQuality": 0.25,
//!                "textClarity": 0.15, "brandLegitimacy": 0.25,
//!                "webPresence": 0.20 },
//!   "risk": { "lowMinScore": 80, "lowMaxSuspicious": 0,
//!             "mediumMinScore": 60, "mediumMaxSuspicious": 1 },
//!   "rewardMinScore": 70
//! }
//!
//! On each `current()` call we check the file's modified time and reload if
//! changed. A missing or unparseable file keeps the built-in defaults.

use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::RwLock,
    time::SystemTime,
};

use crate::analyze::scoring::SignalScores;

/// Per-dimension weights for the overall confidence score. The defaults are a
/// fixed product policy: changing them changes classification behavior.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignalWeights {
    pub image_quality: f64,
    pub packaging_quality: f64,
    pub text_clarity: f64,
    pub brand_legitimacy: f64,
    pub web_presence: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            image_quality: 0.15,
            packaging_quality: 0.25,
            text_clarity: 0.15,
            brand_legitimacy: 0.25,
            web_presence: 0.20,
        }
    }
}

impl SignalWeights {
    pub fn sum(&self) -> f64 {
        self.image_quality
            + self.packaging_quality
            + self.text_clarity
            + self.brand_legitimacy
            + self.web_presence
    }

    /// Weighted sum of the five sub-scores, rounded half-up to an integer
    /// 0–100. Pure and deterministic: the overall score is reproducible from
    /// the breakdown alone.
    pub fn aggregate(&self, s: &SignalScores) -> u8 {
        let raw = f64::from(s.image_quality) * self.image_quality
            + f64::from(s.packaging_quality) * self.packaging_quality
            + f64::from(s.text_clarity) * self.text_clarity
            + f64::from(s.brand_legitimacy) * self.brand_legitimacy
            + f64::from(s.web_presence) * self.web_presence;
        round_half_up(raw)
    }
}

/// Risk-tier thresholds. `low_max_suspicious` is a hard gate: a high score
/// with too many suspicious elements still falls through to High.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskThresholds {
    pub low_min_score: u8,
    pub low_max_suspicious: usize,
    pub medium_min_score: u8,
    pub medium_max_suspicious: usize,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low_min_score: 80,
            low_max_suspicious: 0,
            medium_min_score: 60,
            medium_max_suspicious: 1,
        }
    }
}

/// The complete scoring policy passed into aggregation and classification.
///
/// `reward_min_score` is kept as its own gate even though the default Low
/// threshold (80) already implies it; lowering `low_min_score` later must not
/// silently change reward eligibility.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringPolicy {
    pub weights: SignalWeights,
    pub risk: RiskThresholds,
    pub reward_min_score: u8,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            weights: SignalWeights::default(),
            risk: RiskThresholds::default(),
            reward_min_score: 70,
        }
    }
}

fn round_half_up(x: f64) -> u8 {
    (x + 0.5).floor().clamp(0.0, 100.0) as u8
}

/// Hot-reload wrapper: reloads when the config file mtime changes.
#[derive(Debug)]
pub struct HotReloadPolicy {
    path: PathBuf,
    inner: RwLock<State>,
}

#[derive(Debug)]
struct State {
    policy: ScoringPolicy,
    last_modified: Option<SystemTime>,
}

impl HotReloadPolicy {
    /// Create with a path (defaults to "config/policy.json" if `None`).
    pub fn new(path: Option<&Path>) -> Self {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("config/policy.json"));
        Self {
            path,
            inner: RwLock::new(State {
                policy: ScoringPolicy::default(),
                last_modified: None,
            }),
        }
    }

    /// Get the latest policy, reloading if the config file changed.
    pub fn current(&self) -> ScoringPolicy {
        let needs_reload = match fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(mtime) => {
                let guard = self.inner.read().unwrap();
                guard.last_modified != Some(mtime)
            }
            // File absent: keep defaults, no reload.
            Err(_) => false,
        };

        if !needs_reload {
            return self.inner.read().unwrap().policy;
        }

        let mut guard = self.inner.write().unwrap();
        // Double-check in case of races.
        if let Ok(meta) = fs::metadata(&self.path) {
            if let Ok(mtime) = meta.modified() {
                if guard.last_modified != Some(mtime) {
                    if let Ok(p) = load_policy_file(&self.path) {
                        guard.policy = p;
                        guard.last_modified = Some(mtime);
                    }
                }
            }
        }
        guard.policy
    }
}

/// Load a policy directly (no caching). Public for tests/tools.
pub fn load_policy_file(path: &Path) -> io::Result<ScoringPolicy> {
    let bytes = fs::read(path)?;
    let p: ScoringPolicy = serde_json::from_slice(&bytes)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(p)
}
