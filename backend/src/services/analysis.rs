//! Food image analysis
//!
//! Sends one image to the vision model and always resolves to an
//! [`AnalysisOutcome`]. Any failure, from a missing key to unparsable JSON,
//! is logged and replaced by the fixed fallback record.

use crate::services::gemini::{
    Content, ContentGenerator, GeminiError, GenerateContentRequest, GenerationConfig, Part,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use nutriscan_shared::{AnalysisOutcome, FoodAnalysis, InlineImage, Macros};
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

const ANALYSIS_PROMPT: &str = r#"
You are a nutrition expert. Analyze the food in this image.
1. Identify the main food item (in Thai language).
2. Estimate the total calories.
3. Estimate the macronutrients (Carbs, Protein, Fat) in grams.
4. List 3-5 main ingredients (in Thai language).
5. Provide a short, 1-sentence healthy suggestion or fun fact about this meal (in Thai language).
6. Identify 1-2 short tags describing the meal (e.g., 'โปรตีนสูง', 'แป้งน้อย', 'ผักเยอะ', 'น้ำตาลสูง', 'คลีน').

Return the result in JSON format.
"#;

/// Structured-output schema for [`FoodAnalysis`]
pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "foodName": { "type": "STRING" },
            "calories": { "type": "NUMBER" },
            "macros": {
                "type": "OBJECT",
                "properties": {
                    "carbs": { "type": "NUMBER" },
                    "protein": { "type": "NUMBER" },
                    "fat": { "type": "NUMBER" }
                },
                "required": ["carbs", "protein", "fat"]
            },
            "ingredients": { "type": "ARRAY", "items": { "type": "STRING" } },
            "suggestion": { "type": "STRING" },
            "tags": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["foodName", "calories", "macros", "ingredients", "suggestion", "tags"]
    })
}

/// Record shown when an image could not be analysed
pub fn fallback_analysis() -> FoodAnalysis {
    FoodAnalysis {
        food_name: "ไม่สามารถระบุได้".to_string(),
        calories: 0.0,
        macros: Macros::default(),
        ingredients: vec!["เกิดข้อผิดพลาดในการวิเคราะห์".to_string()],
        suggestion: "กรุณาลองใหม่อีกครั้งด้วยภาพที่ชัดเจนขึ้น".to_string(),
        tags: vec!["ลองใหม่".to_string()],
    }
}

/// Image handed to [`AnalysisClient::analyze`]
#[derive(Debug, Clone)]
pub enum ImageInput {
    /// Base64 text, optionally with a `data:image/...;base64,` prefix
    Encoded(String),
    /// Already split into media type and payload
    Inline(InlineImage),
    /// Raw image bytes
    Bytes { data: Vec<u8>, mime_type: String },
}

impl ImageInput {
    pub fn into_inline(self) -> InlineImage {
        match self {
            ImageInput::Encoded(text) => InlineImage::from_encoded(&text),
            ImageInput::Inline(image) => image,
            ImageInput::Bytes { data, mime_type } => InlineImage {
                mime_type,
                data: STANDARD.encode(data),
            },
        }
    }
}

#[derive(Error, Debug)]
enum AnalysisError {
    #[error("image payload is empty")]
    EmptyImage,

    #[error(transparent)]
    Gemini(#[from] GeminiError),

    #[error("no response from the model")]
    EmptyResponse,

    #[error("malformed analysis JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("implausible analysis: {0}")]
    Implausible(&'static str),
}

/// Vision-model client for meal photos
#[derive(Clone)]
pub struct AnalysisClient {
    generator: Arc<dyn ContentGenerator>,
}

impl AnalysisClient {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self { generator }
    }

    /// Analyse one image; never fails
    #[instrument(skip(self, image))]
    pub async fn analyze(&self, image: ImageInput) -> AnalysisOutcome {
        match self.try_analyze(image.into_inline()).await {
            Ok(analysis) => {
                info!(food = %analysis.food_name, calories = analysis.calories, "Food analysed");
                AnalysisOutcome::success(analysis)
            }
            Err(e) => {
                warn!(error = %e, "Food analysis failed, returning fallback");
                AnalysisOutcome::fallback(fallback_analysis(), e.to_string())
            }
        }
    }

    async fn try_analyze(&self, image: InlineImage) -> Result<FoodAnalysis, AnalysisError> {
        if image.is_empty() {
            return Err(AnalysisError::EmptyImage);
        }

        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::inline(image.mime_type, image.data),
                Part::text(ANALYSIS_PROMPT),
            ])],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(analysis_response_schema()),
            }),
        };

        let text = self
            .generator
            .generate(&request)
            .await?
            .ok_or(AnalysisError::EmptyResponse)?;

        let analysis: FoodAnalysis = serde_json::from_str(strip_code_fence(&text))?;
        check_plausible(&analysis)?;
        Ok(analysis)
    }
}

/// Remove a surrounding markdown code fence, if any
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => trimmed,
    }
}

fn check_plausible(analysis: &FoodAnalysis) -> Result<(), AnalysisError> {
    let non_negative = |v: f64| v.is_finite() && v >= 0.0;
    if !non_negative(analysis.calories) {
        return Err(AnalysisError::Implausible("calories"));
    }
    let Macros { carbs, protein, fat } = analysis.macros;
    if ![carbs, protein, fat].into_iter().all(non_negative) {
        return Err(AnalysisError::Implausible("macros"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nutriscan_shared::AnalysisStatus;
    use std::sync::Mutex;

    /// Returns a canned result and remembers the last request
    struct CannedGenerator {
        reply: fn() -> Result<Option<String>, GeminiError>,
        last: Mutex<Option<GenerateContentRequest>>,
    }

    impl CannedGenerator {
        fn new(reply: fn() -> Result<Option<String>, GeminiError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                last: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl ContentGenerator for CannedGenerator {
        async fn generate(
            &self,
            request: &GenerateContentRequest,
        ) -> Result<Option<String>, GeminiError> {
            *self.last.lock().unwrap() = Some(request.clone());
            (self.reply)()
        }
    }

    fn salad_json() -> Result<Option<String>, GeminiError> {
        Ok(Some(
            json!({
                "foodName": "สลัดอกไก่",
                "calories": 350,
                "macros": {"carbs": 12, "protein": 40, "fat": 9},
                "ingredients": ["อกไก่", "ผักสลัด", "มะเขือเทศ"],
                "suggestion": "เพิ่มอะโวคาโดเพื่อไขมันดี",
                "tags": ["โปรตีนสูง"]
            })
            .to_string(),
        ))
    }

    #[tokio::test]
    async fn test_successful_analysis() {
        let generator = CannedGenerator::new(salad_json);
        let client = AnalysisClient::new(generator.clone());

        let outcome = client
            .analyze(ImageInput::Encoded("data:image/png;base64,iVBORw0KGgo=".to_string()))
            .await;

        assert_eq!(outcome.status, AnalysisStatus::Success);
        assert_eq!(outcome.analysis.food_name, "สลัดอกไก่");
        assert_eq!(outcome.analysis.calories, 350.0);
        assert_eq!(outcome.analysis.macros.protein, 40.0);

        let request = generator.last.lock().unwrap().clone().unwrap();
        let body = serde_json::to_value(&request).unwrap();
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "iVBORw0KGgo=");
        assert!(parts[1]["text"].as_str().unwrap().contains("nutrition expert"));
        assert_eq!(body["generationConfig"]["responseSchema"]["required"][0], "foodName");
    }

    #[tokio::test]
    async fn test_transport_failure_returns_fallback() {
        let client = AnalysisClient::new(CannedGenerator::new(|| Err(GeminiError::MissingApiKey)));
        let outcome = client
            .analyze(ImageInput::Encoded("abc".to_string()))
            .await;

        assert!(outcome.is_fallback());
        assert_eq!(outcome.analysis, fallback_analysis());
        assert!(outcome.fallback_reason.is_some());
    }

    #[tokio::test]
    async fn test_empty_text_returns_fallback() {
        let client = AnalysisClient::new(CannedGenerator::new(|| Ok(None)));
        let outcome = client.analyze(ImageInput::Encoded("abc".to_string())).await;
        assert!(outcome.is_fallback());
        assert_eq!(outcome.analysis.food_name, "ไม่สามารถระบุได้");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_fallback() {
        let client =
            AnalysisClient::new(CannedGenerator::new(|| Ok(Some("not json".to_string()))));
        let outcome = client.analyze(ImageInput::Encoded("abc".to_string())).await;
        assert!(outcome.is_fallback());
        assert_eq!(outcome.analysis.calories, 0.0);
        assert_eq!(outcome.analysis.tags, vec!["ลองใหม่".to_string()]);
    }

    #[tokio::test]
    async fn test_negative_calories_rejected() {
        let client = AnalysisClient::new(CannedGenerator::new(|| {
            Ok(Some(
                json!({
                    "foodName": "x", "calories": -5,
                    "macros": {"carbs": 0, "protein": 0, "fat": 0},
                    "ingredients": [], "suggestion": "", "tags": []
                })
                .to_string(),
            ))
        }));
        let outcome = client.analyze(ImageInput::Encoded("abc".to_string())).await;
        assert!(outcome.is_fallback());
    }

    #[tokio::test]
    async fn test_empty_image_skips_model() {
        let generator = CannedGenerator::new(salad_json);
        let client = AnalysisClient::new(generator.clone());
        let outcome = client.analyze(ImageInput::Encoded(String::new())).await;

        assert!(outcome.is_fallback());
        assert!(generator.last.lock().unwrap().is_none());
    }

    #[test]
    fn test_bytes_are_base64_encoded() {
        let inline = ImageInput::Bytes {
            data: b"hello".to_vec(),
            mime_type: "image/webp".to_string(),
        }
        .into_inline();
        assert_eq!(inline.data, "aGVsbG8=");
        assert_eq!(inline.mime_type, "image/webp");
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
    }
}
