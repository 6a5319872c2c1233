//! history.rs — bounded in-memory log of recent verdicts for diagnostics.
//! Not persistence: the ring lives and dies with the process.

use serde::Serialize;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::analyze::RiskLevel;
use crate::verdict::VerificationReport;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub ts_unix: u64,
    pub risk_level: RiskLevel,
    pub confidence: u8,
    pub brand_name: String,
    pub warning_count: usize,
}

#[derive(Debug)]
pub struct History {
    inner: Mutex<Vec<HistoryEntry>>,
    cap: usize,
}

impl History {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: Mutex::new(Vec::with_capacity(cap.min(10_000))),
            cap: cap.min(10_000),
        }
    }

    pub fn push(&self, report: &VerificationReport) {
        let entry = HistoryEntry {
            ts_unix: now_unix(),
            risk_level: report.risk_level,
            confidence: report.confidence,
            brand_name: report.extracted_info.brand_name.clone(),
            warning_count: report.warnings.len(),
        };

        let mut v = self.inner.lock().expect("history mutex poisoned");
        v.push(entry);
        if v.len() > self.cap {
            let excess = v.len() - self.cap;
            v.drain(0..excess);
        }
    }

    pub fn snapshot_last_n(&self, n: usize) -> Vec<HistoryEntry> {
        let v = self.inner.lock().expect("history mutex poisoned");
        let len = v.len();
        let start = len.saturating_sub(n);
        v[start..].to_vec()
    }
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{analyze_attributes, ScoringPolicy};
    use crate::attributes::ExtractedAttributes;
    use crate::presence::PresenceResult;

    fn report(brand: &str) -> VerificationReport {
        let attrs = ExtractedAttributes {
            brand_name: brand.to_string(),
            ..Default::default()
        };
        let presence = PresenceResult::unavailable();
        let analysis = analyze_attributes(&attrs, &presence, &ScoringPolicy::default());
        VerificationReport::assemble(&attrs, &presence, analysis)
    }

    #[test]
    fn ring_truncates_at_capacity() {
        let h = History::with_capacity(3);
        for i in 0..5 {
            h.push(&report(&format!("Brand{i}")));
        }
        let snap = h.snapshot_last_n(10);
        assert_eq!(snap.len(), 3);
        assert_eq!(snap[0].brand_name, "Brand2");
        assert_eq!(snap[2].brand_name, "Brand4");
    }

    #[test]
    fn snapshot_last_n_takes_the_tail() {
        let h = History::with_capacity(100);
        for i in 0..4 {
            h.push(&report(&format!("Brand{i}")));
        }
        let snap = h.snapshot_last_n(2);
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[1].brand_name, "Brand3");
    }
}
