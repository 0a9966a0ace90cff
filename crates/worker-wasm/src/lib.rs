//! WASM-compatible wrapper for the slide fitting pipeline.
//!
//! This crate exposes the pipeline to JavaScript for use in Cloudflare
//! Workers and in the browser.

use serde::{Deserialize, Serialize};
use slidefit_core::{
    analyze, parse_series, sanitize, slides_from_json, ChartSeries, ContentSplitter,
    ContentStructure, Pipeline, PipelineConfig, Recommender, Slide, TemplateId, UNPROCESSABLE,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Result of recommending a template for one slide.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResult {
    pub template: TemplateId,
    pub confidence: f64,
    pub reason: String,
    /// Structural signals the decision was made from.
    pub structure: ContentStructure,
}

/// Run slide candidates through the full pipeline.
///
/// # Arguments
/// * `slides` - An array of slide candidates, an object with a `slides`
///   array, a business record, or the same as a JSON string
/// * `config` - Optional pipeline configuration object
///
/// # Returns
/// The processed slides, or throws on invalid input.
#[wasm_bindgen]
pub fn process_slides(slides: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
    let input = input_value(slides)?;
    let config = config_value(config)?;
    let result = process_slides_impl(input, config).map_err(js_error)?;
    to_js(&result)
}

fn process_slides_impl(
    input: serde_json::Value,
    config: Option<PipelineConfig>,
) -> Result<Vec<Slide>, String> {
    let pipeline = Pipeline::with_config(config.unwrap_or_default()).map_err(|e| e.to_string())?;
    let candidates = slides_from_json(&input).map_err(|e| e.to_string())?;
    Ok(pipeline.process(candidates))
}

/// Recommend a template for a title and content without deck context.
#[wasm_bindgen]
pub fn recommend_template(title: &str, content: &str) -> Result<JsValue, JsValue> {
    to_js(&recommend_template_impl(title, content))
}

fn recommend_template_impl(title: &str, content: &str) -> RecommendResult {
    let content = sanitize(content);
    let structure = if content == UNPROCESSABLE {
        ContentStructure::empty()
    } else {
        analyze(&content)
    };
    let recommendation = Recommender::new().recommend(&structure, title, &content);

    RecommendResult {
        template: recommendation.template,
        confidence: recommendation.confidence,
        reason: recommendation.reason,
        structure,
    }
}

/// Parse `label: N%` lines into a chart series.
///
/// # Returns
/// An array of `{ name, value }` points, or `null` when fewer than two
/// valid points are found.
#[wasm_bindgen]
pub fn parse_chart_series(text: &str) -> Result<JsValue, JsValue> {
    match parse_chart_series_impl(text) {
        Some(series) => to_js(&series),
        None => Ok(JsValue::NULL),
    }
}

fn parse_chart_series_impl(text: &str) -> Option<ChartSeries> {
    parse_series(text)
}

/// Split one slide against the configured budget.
///
/// Returns the fragments without assigning templates.
#[wasm_bindgen]
pub fn split_slide(slide: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
    let input = input_value(slide)?;
    let config = config_value(config)?;
    let result = split_slide_impl(input, config).map_err(js_error)?;
    to_js(&result)
}

fn split_slide_impl(
    input: serde_json::Value,
    config: Option<PipelineConfig>,
) -> Result<Vec<Slide>, String> {
    let config = config.unwrap_or_default();
    config.validate().map_err(|e| e.to_string())?;

    let slide = slides_from_json(&input)
        .map_err(|e| e.to_string())?
        .into_iter()
        .next()
        .ok_or_else(|| "No slide in input".to_string())?;

    Ok(ContentSplitter::new().with_budget(config.budget).split(&slide))
}

/// Accept either a JSON string or a plain JavaScript value.
fn input_value(value: JsValue) -> Result<serde_json::Value, JsValue> {
    if let Some(text) = value.as_string() {
        return serde_json::from_str(&text)
            .map_err(|e| js_error(format!("Invalid JSON input: {}", e)));
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| js_error(format!("Invalid input: {}", e)))
}

fn config_value(value: JsValue) -> Result<Option<PipelineConfig>, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(|e| js_error(format!("Invalid config: {}", e)))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| js_error(format!("Serialization error: {}", e)))
}

fn js_error(message: impl AsRef<str>) -> JsValue {
    js_sys::Error::new(message.as_ref()).into()
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_parse_chart_series_returns_null_for_single_point() {
        let value = parse_chart_series("Only: 100%").unwrap();
        assert!(value.is_null());
    }
}
