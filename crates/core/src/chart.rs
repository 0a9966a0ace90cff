//! Chart series extraction from "Label: N%" lines.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Lines longer than this are prose, not data points.
const MAX_LINE_CHARS: usize = 500;

/// Labels must be shorter than this.
const MAX_LABEL_CHARS: usize = 100;

/// "**Label:** 40%"
static BOLD_COLON_INSIDE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*•+]\s+)?\*\*([^*\n]+?):\*\*\s*(\d{1,3}(?:\.\d+)?)\s*%").unwrap()
});

/// "**Label**: 40%"
static BOLD_COLON_OUTSIDE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*•+]\s+)?\*\*([^*\n]+?)\*\*\s*:\s*(\d{1,3}(?:\.\d+)?)\s*%").unwrap()
});

/// "- Label: 40%"
static BULLET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[-*•+]\s+([^:\n]+?)\s*:\s*(\d{1,3}(?:\.\d+)?)\s*%").unwrap()
});

/// "Label: 40%"
static PLAIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([^:\n]+?)\s*:\s*(\d{1,3}(?:\.\d+)?)\s*%").unwrap());

static LONG_DIGIT_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{10,}").unwrap());

static LETTER_DIGIT_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:[A-Za-z]\d){4,}|(?:\d[A-Za-z]){4,}").unwrap());

/// Line shapes tried in order; the first match wins.
static LINE_PATTERNS: LazyLock<[&'static Regex; 4]> = LazyLock::new(|| {
    [
        &*BOLD_COLON_INSIDE_REGEX,
        &*BOLD_COLON_OUTSIDE_REGEX,
        &*BULLET_REGEX,
        &*PLAIN_REGEX,
    ]
});

/// Chart flavour requested by a chart template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Pie,
    Line,
    Area,
    Radar,
}

/// One labelled value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    #[serde(alias = "label")]
    pub name: String,
    pub value: u32,
}

impl ChartPoint {
    pub fn new(name: impl Into<String>, value: u32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Ordered data points; order follows the source lines.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartSeries {
    points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn new(points: Vec<ChartPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<u32> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn total(&self) -> u32 {
        self.points.iter().map(|p| p.value).sum()
    }

    /// Whether the values read as parts of one whole (total within 95..=105).
    pub fn is_part_of_whole(&self) -> bool {
        (95..=105).contains(&self.total())
    }
}

/// Parse a chart series from text.
///
/// Returns `None` unless at least two valid points are found, since a single
/// category cannot be charted meaningfully.
pub fn parse_series(text: &str) -> Option<ChartSeries> {
    let points: Vec<ChartPoint> = text.lines().filter_map(parse_line).collect();

    if points.len() < 2 {
        return None;
    }

    Some(ChartSeries::new(points))
}

/// Parse one line into a point, if it is a plausible "label: N%" line.
fn parse_line(line: &str) -> Option<ChartPoint> {
    if line.chars().count() > MAX_LINE_CHARS {
        return None;
    }
    if line.chars().any(|c| c.is_control() && c != '\t') {
        return None;
    }
    if LONG_DIGIT_RUN_REGEX.is_match(line) || LETTER_DIGIT_RUN_REGEX.is_match(line) {
        return None;
    }

    let caps = LINE_PATTERNS.iter().find_map(|re| re.captures(line))?;

    let name = clean_label(caps.get(1)?.as_str());
    if !is_valid_label(&name) {
        return None;
    }

    let value: f64 = caps.get(2)?.as_str().parse().ok()?;
    if !(0.0..=100.0).contains(&value) {
        return None;
    }

    Some(ChartPoint::new(name, value.round() as u32))
}

fn clean_label(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| c == '*' || c == '_')
        .trim()
        .to_string()
}

fn is_valid_label(name: &str) -> bool {
    !name.is_empty()
        && name.chars().count() < MAX_LABEL_CHARS
        && name.chars().all(|c| c.is_ascii() && !c.is_ascii_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines() {
        let series = parse_series("Product: 40%\nPrice: 25%\nPlace: 20%\nPromotion: 15%").unwrap();
        assert_eq!(series.names(), vec!["Product", "Price", "Place", "Promotion"]);
        assert_eq!(series.values(), vec![40, 25, 20, 15]);
        assert!(series.is_part_of_whole());
    }

    #[test]
    fn test_bold_colon_inside() {
        let series = parse_series("**North:** 30%\n**South:** 70%").unwrap();
        assert_eq!(series.names(), vec!["North", "South"]);
    }

    #[test]
    fn test_bold_colon_outside() {
        let series = parse_series("- **North**: 30%\n- **South**: 70%").unwrap();
        assert_eq!(series.names(), vec!["North", "South"]);
        assert_eq!(series.values(), vec![30, 70]);
    }

    #[test]
    fn test_bullet_prefixed() {
        let series = parse_series("• Mobile: 55%\n* Desktop: 45 %").unwrap();
        assert_eq!(series.names(), vec!["Mobile", "Desktop"]);
    }

    #[test]
    fn test_decimal_values_round() {
        let series = parse_series("A: 37.6%\nB: 62.4%").unwrap();
        assert_eq!(series.values(), vec![38, 62]);
    }

    #[test]
    fn test_single_point_is_rejected() {
        assert!(parse_series("Product: 40%").is_none());
        assert!(parse_series("Product: 40%\nJust some prose").is_none());
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        assert!(parse_series("A: 140%\nB: 250%").is_none());
        let series = parse_series("A: 140%\nB: 50%\nC: 50%").unwrap();
        assert_eq!(series.names(), vec!["B", "C"]);
    }

    #[test]
    fn test_suspicious_lines_are_rejected() {
        let long = format!("{}: 10%", "x".repeat(600));
        assert!(parse_line(&long).is_none());
        assert!(parse_line("Serial 12345678901: 10%").is_none());
        assert!(parse_line("a1b2c3d4e5: 10%").is_none());
        assert!(parse_line("Bell\u{0007}: 10%").is_none());
    }

    #[test]
    fn test_label_validation() {
        assert!(parse_line("Café: 10%").is_none());
        let long_label = format!("{}: 10%", "L".repeat(120));
        assert!(parse_line(&long_label).is_none());
        assert!(parse_line(": 10%").is_none());
    }

    #[test]
    fn test_order_follows_source() {
        let series = parse_series("Z: 1%\nA: 2%\nM: 3%").unwrap();
        assert_eq!(series.names(), vec!["Z", "A", "M"]);
    }

    #[test]
    fn test_series_serializes_as_array() {
        let series = parse_series("A: 60%\nB: 40%").unwrap();
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json[0]["name"], "A");
        assert_eq!(json[1]["value"], 40);
    }
}
