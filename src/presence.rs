//! presence.rs — web-presence probing: does the named brand have a real,
//! discoverable online footprint?
//!
//! The prober is supplementary evidence. It must never raise past its own
//! boundary: every internal failure (missing key, HTTP error, bad payload)
//! becomes `PresenceResult::unavailable()` and scoring proceeds without it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One search hit surfaced back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// Outcome of a presence probe.
///
/// Invariant: when `success` is false, `has_official_website` is false and
/// `total_results` is 0 — use `unavailable()` to construct that state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceResult {
    pub success: bool,
    pub has_official_website: bool,
    pub total_results: u64,
    /// Up to 5 hits; downstream only surfaces the first 3.
    pub results: Vec<SearchHit>,
}

impl PresenceResult {
    /// The degraded result used for probe failures and timeouts.
    pub fn unavailable() -> Self {
        Self {
            success: false,
            has_official_website: false,
            total_results: 0,
            results: Vec::new(),
        }
    }
}

/// Seam for the external web-search step.
#[async_trait]
pub trait PresenceProber: Send + Sync {
    /// Probe for the brand's online footprint. Infallible by contract.
    async fn probe(&self, brand: &str, product: &str) -> PresenceResult;
    /// Provider name for diagnostics/headers.
    fn provider_name(&self) -> &'static str;
}

/// Real prober backed by a SerpAPI-style search endpoint.
pub struct SearchApiProber {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

const DEFAULT_SEARCH_ENDPOINT: &str = "https://serpapi.com/search";

impl SearchApiProber {
    pub fn new(api_key: String, endpoint: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("authenticity-analyzer/0.1")
            .connect_timeout(Duration::from_secs(2))
            .timeout(Duration::from_secs(5))
            .build()
            .expect("reqwest client");
        Self {
            http,
            api_key,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_SEARCH_ENDPOINT.to_string()),
        }
    }

    async fn probe_impl(&self, brand: &str, product: &str) -> Option<PresenceResult> {
        if self.api_key.is_empty() {
            return None;
        }

        #[derive(Deserialize)]
        struct Resp {
            #[serde(default)]
            organic_results: Vec<RawHit>,
            #[serde(default)]
            search_information: Option<SearchInfo>,
        }
        #[derive(Deserialize)]
        struct RawHit {
            #[serde(default)]
            title: String,
            #[serde(default)]
            link: String,
            #[serde(default)]
            snippet: String,
        }
        #[derive(Deserialize)]
        struct SearchInfo {
            #[serde(default)]
            total_results: Option<u64>,
        }

        let query = format!("\"{brand}\" \"{product}\" product");
        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", query.as_str()),
                ("num", "5"),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .ok()?;

        if !resp.status().is_success() {
            return None;
        }
        let body: Resp = resp.json().await.ok()?;

        let results: Vec<SearchHit> = body
            .organic_results
            .into_iter()
            .take(5)
            .map(|r| SearchHit {
                title: r.title,
                link: r.link,
                snippet: r.snippet,
            })
            .collect();

        let total_results = body
            .search_information
            .and_then(|i| i.total_results)
            .unwrap_or(results.len() as u64);

        let has_official_website = results.iter().any(|hit| looks_official(brand, hit));

        Some(PresenceResult {
            success: true,
            has_official_website,
            total_results,
            results,
        })
    }
}

#[async_trait]
impl PresenceProber for SearchApiProber {
    async fn probe(&self, brand: &str, product: &str) -> PresenceResult {
        self.probe_impl(brand, product)
            .await
            .unwrap_or_else(PresenceResult::unavailable)
    }
    fn provider_name(&self) -> &'static str {
        "serpapi"
    }
}

/// Always-unavailable prober for deployments without a search key.
pub struct DisabledProber;

#[async_trait]
impl PresenceProber for DisabledProber {
    async fn probe(&self, _brand: &str, _product: &str) -> PresenceResult {
        PresenceResult::unavailable()
    }
    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

/// Fixed-output prober for tests and local runs.
#[derive(Clone)]
pub struct MockProber {
    pub fixed: PresenceResult,
}

#[async_trait]
impl PresenceProber for MockProber {
    async fn probe(&self, _brand: &str, _product: &str) -> PresenceResult {
        self.fixed.clone()
    }
    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Factory: build a prober according to config. A disabled section or an
/// empty key yields the always-unavailable prober.
pub fn build_prober(config: &crate::config::SearchConfig) -> std::sync::Arc<dyn PresenceProber> {
    use std::sync::Arc;

    if !config.enabled || config.api_key.trim().is_empty() {
        return Arc::new(DisabledProber);
    }
    Arc::new(SearchApiProber::new(
        config.api_key.clone(),
        config.endpoint.clone(),
    ))
}

/// Official-site heuristic: the hit's domain label fuzzy-matches the brand,
/// or its title names the brand alongside "official".
fn looks_official(brand: &str, hit: &SearchHit) -> bool {
    let brand_l = brand.trim().to_ascii_lowercase();
    if brand_l.is_empty() {
        return false;
    }
    let slug: String = brand_l
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();

    if let Some(label) = host_label(&hit.link) {
        if !slug.is_empty() && strsim::jaro_winkler(label, &slug) >= 0.85 {
            return true;
        }
    }

    let title_l = hit.title.to_ascii_lowercase();
    title_l.contains(&brand_l) && title_l.contains("official")
}

/// First label of the host, scheme and "www." stripped.
fn host_label(link: &str) -> Option<&str> {
    let rest = link
        .strip_prefix("https://")
        .or_else(|| link.strip_prefix("http://"))
        .unwrap_or(link);
    let host = rest.split('/').next()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    host.split('.').next().filter(|l| !l.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str, link: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            link: link.to_string(),
            snippet: String::new(),
        }
    }

    #[test]
    fn unavailable_upholds_the_failure_invariant() {
        let p = PresenceResult::unavailable();
        assert!(!p.success);
        assert!(!p.has_official_website);
        assert_eq!(p.total_results, 0);
        assert!(p.results.is_empty());
    }

    #[test]
    fn brand_domain_counts_as_official() {
        assert!(looks_official(
            "Acme",
            &hit("Acme - Home", "https://www.acme.com/products")
        ));
        assert!(looks_official(
            "NutriGold",
            &hit("Shop", "https://nutrigold.co.uk")
        ));
    }

    #[test]
    fn official_keyword_in_title_counts() {
        assert!(looks_official(
            "Acme",
            &hit("Acme Official Store", "https://shop.example.com/acme")
        ));
    }

    #[test]
    fn unrelated_hits_are_not_official() {
        assert!(!looks_official(
            "Acme",
            &hit("Cheap deals", "https://marketplace.example.com/listing/123")
        ));
        assert!(!looks_official("", &hit("Official", "https://acme.com")));
    }

    #[tokio::test]
    async fn mock_prober_returns_its_fixture() {
        let fixed = PresenceResult {
            success: true,
            has_official_website: true,
            total_results: 7,
            results: Vec::new(),
        };
        let prober = MockProber {
            fixed: fixed.clone(),
        };
        assert_eq!(prober.probe("Acme", "Widget").await, fixed);
    }

    #[tokio::test]
    async fn disabled_prober_degrades_cleanly() {
        let p = DisabledProber.probe("Acme", "Widget").await;
        assert_eq!(p, PresenceResult::unavailable());
    }
}
