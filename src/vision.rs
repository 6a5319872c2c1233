//! vision.rs — the image-understanding seam: a photo goes in, a structured
//! attribute record comes out.
//!
//! The provider's raw reply is parsed JSON-first; when the model wraps the
//! payload in prose or fences we fall back to scraping the expected keys and
//! default the rest. Only total provider failure (no key, HTTP error, empty
//! body) is fatal — there is no scoring without attributes.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::time::Duration;

use crate::attributes::ExtractedAttributes;

/// Tagged outcome of one extraction attempt. Scoring proceeds on `Parsed`
/// and `Degraded`, never on `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// The reply deserialized cleanly into the expected schema.
    Parsed(ExtractedAttributes),
    /// Best-effort field scrape; unrecovered fields hold their defaults.
    Degraded {
        attrs: ExtractedAttributes,
        raw: String,
    },
    /// The extraction step itself failed; the request cannot be scored.
    Failed { reason: String },
}

impl ExtractionOutcome {
    /// The attribute record, when scoring can proceed.
    pub fn attrs(&self) -> Option<&ExtractedAttributes> {
        match self {
            ExtractionOutcome::Parsed(a) => Some(a),
            ExtractionOutcome::Degraded { attrs, .. } => Some(attrs),
            ExtractionOutcome::Failed { .. } => None,
        }
    }
}

/// Seam for the external vision-understanding step.
#[async_trait]
pub trait VisionExtractor: Send + Sync {
    /// Extract packaging attributes from a base64-encoded product photo.
    async fn extract(&self, image_base64: &str) -> ExtractionOutcome;
    /// Provider name for diagnostics/headers.
    fn provider_name(&self) -> &'static str;
}

const EXTRACTION_PROMPT: &str = "You are a product packaging analyst. Examine the photo and reply \
with ONLY a JSON object with these keys: brandName, productName, category, packagingQuality, \
imageQuality, textClarity (each of the three: poor|average|good|excellent), batchNumber, \
manufacturingDate, expiryDate (use \"Not visible\" when unreadable), suspiciousElements (array \
of strings), legitimacyIndicators (array of strings). Use \"Unknown\" for fields you cannot \
determine. No prose, no markdown fences.";

/// OpenAI vision provider (Chat Completions with an image part).
/// Requires `OPENAI_API_KEY` unless a key is injected via config.
pub struct OpenAiVisionProvider {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiVisionProvider {
    /// `model_override`: pass Some("gpt-4o") to override; defaults to gpt-4o-mini.
    pub fn new(api_key: String, model_override: Option<&str>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("authenticity-analyzer/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("reqwest client");
        let model = model_override.unwrap_or("gpt-4o-mini").to_string();
        Self {
            http,
            api_key,
            model,
        }
    }

    async fn extract_impl(&self, image_base64: &str) -> Result<String, String> {
        if self.api_key.is_empty() {
            return Err("vision api key not configured".to_string());
        }

        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMsg,
        }
        #[derive(Deserialize)]
        struct ChoiceMsg {
            content: String,
        }

        let body = serde_json::json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": EXTRACTION_PROMPT },
                    { "type": "image_url",
                      "image_url": { "url": format!("data:image/jpeg;base64,{image_base64}") } }
                ]
            }],
            "temperature": 0.1,
            "max_tokens": 500
        });

        let resp = self
            .http
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("vision request failed: {e}"))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(format!("vision provider returned {status}"));
        }
        let parsed: Resp = resp
            .json()
            .await
            .map_err(|e| format!("vision response unreadable: {e}"))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();
        if content.trim().is_empty() {
            return Err("vision provider returned an empty reply".to_string());
        }
        Ok(content)
    }
}

#[async_trait]
impl VisionExtractor for OpenAiVisionProvider {
    async fn extract(&self, image_base64: &str) -> ExtractionOutcome {
        match self.extract_impl(image_base64).await {
            Ok(raw) => parse_attributes(&raw),
            Err(reason) => ExtractionOutcome::Failed { reason },
        }
    }
    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

/// Extractor used when vision is disabled in config: every request fails with
/// a stable reason, since there is no scoring without attributes.
pub struct DisabledExtractor;

#[async_trait]
impl VisionExtractor for DisabledExtractor {
    async fn extract(&self, _image_base64: &str) -> ExtractionOutcome {
        ExtractionOutcome::Failed {
            reason: "vision extraction disabled".to_string(),
        }
    }
    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

/// Fixed-output extractor for tests and local runs.
#[derive(Clone)]
pub struct MockExtractor {
    pub outcome: ExtractionOutcome,
}

#[async_trait]
impl VisionExtractor for MockExtractor {
    async fn extract(&self, _image_base64: &str) -> ExtractionOutcome {
        self.outcome.clone()
    }
    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Factory: build an extractor according to config and environment.
///
/// * If `VISION_TEST_MODE=mock`, returns a deterministic mock extractor.
/// * Else if the section is disabled, every extraction fails cleanly.
/// * Else builds the real provider.
pub fn build_extractor(config: &crate::config::VisionConfig) -> std::sync::Arc<dyn VisionExtractor> {
    use std::sync::Arc;

    if std::env::var("VISION_TEST_MODE")
        .map(|v| v == "mock")
        .unwrap_or(false)
    {
        return Arc::new(MockExtractor {
            outcome: ExtractionOutcome::Parsed(ExtractedAttributes::default()),
        });
    }

    if !config.enabled {
        return Arc::new(DisabledExtractor);
    }

    match config.provider.as_str() {
        "openai" => Arc::new(OpenAiVisionProvider::new(
            config.api_key.clone(),
            config.model.as_deref(),
        )),
        _ => Arc::new(DisabledExtractor),
    }
}

// ------------------------------------------------------------
// Reply parsing
// ------------------------------------------------------------

static STRING_FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(?P<key>[A-Za-z]+)"\s*:\s*"(?P<value>[^"]*)""#).expect("string field regex")
});
static LIST_FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(?P<key>[A-Za-z]+)"\s*:\s*\[(?P<body>[^\]]*)\]"#).expect("list field regex")
});
static QUOTED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)""#).expect("quoted regex"));

/// Parse the provider's raw reply into an attribute record.
///
/// JSON first (whole reply, then the first embedded object — models love
/// markdown fences), then a key-by-key scrape. A scrape always yields a
/// usable record: unrecovered fields keep their defaults.
pub fn parse_attributes(raw: &str) -> ExtractionOutcome {
    if let Ok(attrs) = serde_json::from_str::<ExtractedAttributes>(raw) {
        return ExtractionOutcome::Parsed(attrs);
    }
    if let Some(embedded) = embedded_object(raw) {
        if let Ok(attrs) = serde_json::from_str::<ExtractedAttributes>(embedded) {
            return ExtractionOutcome::Parsed(attrs);
        }
    }

    let mut attrs = ExtractedAttributes::default();

    for caps in STRING_FIELD_RE.captures_iter(raw) {
        let value = caps["value"].trim().to_string();
        if value.is_empty() {
            continue;
        }
        match &caps["key"] {
            "brandName" => attrs.brand_name = value,
            "productName" => attrs.product_name = value,
            "category" => attrs.category = value,
            "packagingQuality" => attrs.packaging_quality = value,
            "imageQuality" => attrs.image_quality = value,
            "textClarity" => attrs.text_clarity = value,
            "batchNumber" => attrs.batch_number = value,
            "manufacturingDate" => attrs.manufacturing_date = value,
            "expiryDate" => attrs.expiry_date = value,
            _ => {}
        }
    }

    for caps in LIST_FIELD_RE.captures_iter(raw) {
        let items: Vec<String> = QUOTED_RE
            .captures_iter(&caps["body"])
            .map(|c| c[1].trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        match &caps["key"] {
            "suspiciousElements" => attrs.suspicious_elements = items,
            "legitimacyIndicators" => attrs.legitimacy_indicators = items,
            _ => {}
        }
    }

    ExtractionOutcome::Degraded {
        attrs,
        raw: raw.to_string(),
    }
}

/// Slice from the first `{` to the last `}`, if any.
fn embedded_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}
