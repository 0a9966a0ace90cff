//! Domain types for slide candidates and the values computed over them.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::template::{TemplateData, TemplateId};

/// Title suffix appended to every fragment after the first when a slide is split.
pub const CONTINUED_SUFFIX: &str = " (continued)";

/// Matches the "(continued)" / "(cont.)" / "(part N)" markers in a title.
static CONTINUATION_MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\((?:continued|cont\.?|part\s+\d+(?:\s+of\s+\d+)?)\)").unwrap()
});

/// A slide candidate as produced by the drafting stage and refined by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Stable identifier; split fragments derive theirs from it.
    pub id: String,

    pub title: String,

    /// Markdown/HTML-ish free text. Never overwritten by extraction.
    pub content: String,

    /// Free-form slide kind supplied upstream ("content", "title", ...).
    #[serde(rename = "type", default = "default_slide_type")]
    pub slide_type: String,

    /// Sort key. Fractional values are used for split fragments.
    #[serde(default)]
    pub order: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_data: Option<TemplateData>,

    /// The decision that assigned `template`, kept for human review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<TemplateRecommendation>,
}

fn default_slide_type() -> String {
    "content".to_string()
}

impl Slide {
    /// Create a new content slide with order 0.
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            slide_type: default_slide_type(),
            order: 0.0,
            template: None,
            template_data: None,
            recommendation: None,
        }
    }

    /// Set the sort key.
    pub fn with_order(mut self, order: f64) -> Self {
        self.order = order;
        self
    }

    /// Set the upstream slide kind.
    pub fn with_type(mut self, slide_type: impl Into<String>) -> Self {
        self.slide_type = slide_type.into();
        self
    }

    /// Whether the title carries a continuation marker.
    pub fn is_continuation(&self) -> bool {
        is_continuation_title(&self.title)
    }

    /// Title with any continuation marker removed.
    pub fn base_title(&self) -> String {
        strip_continuation_marker(&self.title)
    }
}

/// Whether a title carries a "(continued)" or "(part N)" marker.
pub fn is_continuation_title(title: &str) -> bool {
    CONTINUATION_MARKER_REGEX.is_match(title)
}

/// Remove continuation markers from a title and trim the result.
pub fn strip_continuation_marker(title: &str) -> String {
    CONTINUATION_MARKER_REGEX
        .replace_all(title, "")
        .trim()
        .to_string()
}

/// Coarse classification of how the data in a slide is organised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataShape {
    Tabular,
    Hierarchical,
    MultiDimensional,
    TimeSeries,
    #[default]
    Simple,
}

/// Structural signals computed from a slide's sanitized content.
///
/// Recomputed per slide and never persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStructure {
    pub word_count: usize,
    pub bullet_points: usize,
    pub numbered_items: usize,
    pub sections: usize,
    pub paragraphs: usize,
    pub images: usize,
    pub percentages: usize,
    pub people: usize,
    pub has_charts: bool,
    pub has_tables: bool,
    pub has_quotes: bool,
    pub has_comparison: bool,
    pub has_timeline: bool,
    pub data_shape: DataShape,
    /// 0.0 (casual) to 1.0 (formal).
    pub formality: f64,
    /// 0.0 (sparse) to 1.0 (dense).
    pub density: f64,
}

impl ContentStructure {
    /// Structure of a slide with no usable content.
    pub fn empty() -> Self {
        Self {
            formality: 0.5,
            ..Self::default()
        }
    }
}

/// A template choice with its heuristic strength and a human-readable justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecommendation {
    pub template: TemplateId,
    /// Priority signal in (0, 1]; not a calibrated probability.
    pub confidence: f64,
    pub reason: String,
}

impl TemplateRecommendation {
    /// Create a recommendation, clamping confidence into (0, 1].
    pub fn new(template: TemplateId, confidence: f64, reason: impl Into<String>) -> Self {
        let confidence = if confidence.is_finite() && confidence > 0.0 {
            confidence.min(1.0)
        } else {
            0.01
        };
        Self {
            template,
            confidence,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continuation_markers() {
        assert!(is_continuation_title("Roadmap (continued)"));
        assert!(is_continuation_title("Roadmap (Cont.)"));
        assert!(is_continuation_title("Roadmap (part 2)"));
        assert!(is_continuation_title("Roadmap (Part 2 of 3)"));
        assert!(!is_continuation_title("Roadmap"));
        assert!(!is_continuation_title("Continued growth"));
    }

    #[test]
    fn test_strip_continuation_marker() {
        assert_eq!(strip_continuation_marker("Roadmap (continued)"), "Roadmap");
        assert_eq!(strip_continuation_marker("Roadmap (part 3)"), "Roadmap");
        assert_eq!(strip_continuation_marker("Roadmap"), "Roadmap");
    }

    #[test]
    fn test_recommendation_confidence_is_clamped() {
        assert_eq!(TemplateRecommendation::new(TemplateId::Content, 1.7, "x").confidence, 1.0);
        assert!(TemplateRecommendation::new(TemplateId::Content, 0.0, "x").confidence > 0.0);
        assert!(TemplateRecommendation::new(TemplateId::Content, f64::NAN, "x").confidence > 0.0);
    }

    #[test]
    fn test_slide_deserializes_with_defaults() {
        let slide: Slide =
            serde_json::from_str(r#"{"id":"s1","title":"Intro","content":"Hello"}"#).unwrap();
        assert_eq!(slide.slide_type, "content");
        assert_eq!(slide.order, 0.0);
        assert!(slide.template.is_none());
    }

    #[test]
    fn test_slide_serializes_type_field() {
        let slide = Slide::new("s1", "Intro", "Hello").with_type("title");
        let json = serde_json::to_value(&slide).unwrap();
        assert_eq!(json["type"], "title");
        assert!(json.get("template").is_none());
    }
}
