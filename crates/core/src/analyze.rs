//! Structural analysis of slide content.
//!
//! Each signal is a named pure function over sanitized text returning a
//! count, flag or enum. [`analyze`] assembles them into a
//! [`ContentStructure`]; nothing downstream of it reads raw text for
//! structure.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::chart::parse_series;
use crate::sanitize::is_unusable;
use crate::types::{ContentStructure, DataShape};

static BULLET_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-•*]\s+\S").unwrap());

static NUMBERED_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[.)]\s+\S").unwrap());

/// A line that opens with a bold span, optionally behind a markdown heading marker.
static SECTION_HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:#{1,6}\s+)?\*\*([^*\n]+)\*\*").unwrap());

static MARKDOWN_IMAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"!\[([^\]]*)\]\(\s*([^)\s]+)(?:\s+"[^"]*")?\s*\)"#).unwrap());

static BARE_IMAGE_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)https?://[^\s)\]]+\.(?:png|jpe?g|gif|webp|svg|bmp)(?:\?[^\s)\]]*)?").unwrap()
});

static PERCENTAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,3}(?:\.\d+)?\s?%").unwrap());

static NUMERIC_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[$€£]?\d[\d,]*(?:\.\d+)?[%KMBkmbx]?").unwrap());

/// Two capitalised words in a row, e.g. "Jane Doe".
static NAME_PAIR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z][a-z]+) ([A-Z][a-z]+)\b").unwrap());

static PIPE_ROW_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\|.*\|\s*$").unwrap());

static TABLE_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\btables?\b").unwrap());

static QUOTED_SPAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"\n]{10,}""#).unwrap());

static BLOCKQUOTE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*>\s*\S").unwrap());

static COMPARISON_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:vs\.?|versus|compared?\s+(?:to|with)|comparison|pros|cons|advantages?|disadvantages?|before\s+and\s+after|trade-?offs?)(?:\W|$)").unwrap()
});

static TIMELINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:timeline|roadmap|milestones?|phase\s+\d+|history|chronolog\w*|schedule)\b").unwrap()
});

static YEAR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

static CHART_WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:chart|graph|distribution|breakdown|allocation|share|percentage)s?\b").unwrap()
});

static HIERARCHY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:tree|hierarch\w*|parent|child(?:ren)?|sub-?categor\w*|nested|org(?:anization(?:al)?)?\s+chart|reports\s+to)\b").unwrap()
});

static DIMENSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:dimensions?|attributes?|factors?|criteria|multi-?dimensional|axes)\b").unwrap()
});

static TREND_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:trends?|over\s+time|year[- ]over[- ]year|yoy|monthly|quarterly|annually|growth\s+rate|forecast)\b").unwrap()
});

static PERIOD_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|june?|july?|aug(?:ust)?|sep(?:tember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?|q[1-4])\b").unwrap()
});

static FORMAL_CONNECTIVE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:furthermore|moreover|therefore|consequently|thus|hence|accordingly|nevertheless|whereas|notwithstanding)\b").unwrap()
});

static ANALYTICAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:analysis|analy[sz]e|strateg\w*|framework|implementation|methodology|objectives?|assessment|evaluat\w*|metrics?|stakeholders?)\b").unwrap()
});

static CASUAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:awesome|cool|gonna|wanna|stuff|super|hey|wow|lol|kinda|totally|guys)\b").unwrap()
});

static SECOND_PERSON_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:you|your|yours|you're|yourself)\b").unwrap());

/// Capitalised words that start name pairs but are not names.
const NON_NAME_WORDS: &[&str] = &[
    "The", "Our", "Their", "This", "That", "These", "Key", "New", "Next", "Total", "Market",
    "Product", "Customer", "Customers", "Sales", "Revenue", "Growth", "Team", "Project",
    "Annual", "Quarterly", "Monthly", "North", "South", "East", "West", "United", "States",
    "Executive", "Summary", "Phase", "Step", "Strategic", "Business", "Company",
];

/// Analyze sanitized content.
///
/// The sanitizer sentinel and blank text yield [`ContentStructure::empty`].
pub fn analyze(content: &str) -> ContentStructure {
    if is_unusable(content) {
        return ContentStructure::empty();
    }

    let word_count = count_words(content);
    let bullet_points = count_bullets(content);
    let sections = count_sections(content);
    let percentages = count_percentages(content);

    ContentStructure {
        word_count,
        bullet_points,
        numbered_items: count_numbered_items(content),
        sections,
        paragraphs: count_paragraphs(content),
        images: count_images(content),
        percentages,
        people: count_people(content),
        has_charts: has_charts(content, percentages),
        has_tables: has_tables(content),
        has_quotes: has_quotes(content),
        has_comparison: has_comparison(content),
        has_timeline: has_timeline(content),
        data_shape: classify_data_shape(content),
        formality: formality(content),
        density: density(word_count, bullet_points, sections, count_numeric_tokens(content)),
    }
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Whether a line is a `-`, `•` or `*` bullet.
pub fn is_bullet_line(line: &str) -> bool {
    BULLET_LINE_REGEX.is_match(line)
}

pub fn is_numbered_line(line: &str) -> bool {
    NUMBERED_LINE_REGEX.is_match(line)
}

/// The header text if the line opens a `**bold**` section.
pub fn section_header(line: &str) -> Option<&str> {
    SECTION_HEADER_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

pub fn count_bullets(text: &str) -> usize {
    text.lines().filter(|l| is_bullet_line(l)).count()
}

pub fn count_numbered_items(text: &str) -> usize {
    text.lines().filter(|l| is_numbered_line(l)).count()
}

pub fn count_sections(text: &str) -> usize {
    text.lines().filter(|l| section_header(l).is_some()).count()
}

/// Blank-line separated blocks with any non-whitespace content.
pub fn count_paragraphs(text: &str) -> usize {
    paragraphs(text).len()
}

/// Split text into blank-line separated paragraphs, trimmed and non-empty.
pub fn paragraphs(text: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            if let Some(s) = start.take() {
                result.push(text[s..end].trim());
            }
        } else {
            if start.is_none() {
                start = Some(offset);
            }
            end = offset + line.len();
        }
        offset += line.len();
    }
    if let Some(s) = start {
        result.push(text[s..end].trim());
    }

    result
}

/// Images in order of appearance as `(alt, url)` pairs. Markdown images
/// claim their URLs first, then bare image URLs outside markdown syntax are
/// added with an empty alt.
pub fn images(text: &str) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for caps in MARKDOWN_IMAGE_REGEX.captures_iter(text) {
        let url = caps[2].to_string();
        if seen.insert(url.clone()) {
            found.push((caps[1].trim().to_string(), url));
        }
    }

    let remainder = MARKDOWN_IMAGE_REGEX.replace_all(text, " ");
    for m in BARE_IMAGE_URL_REGEX.find_iter(&remainder) {
        let url = m.as_str().to_string();
        if seen.insert(url.clone()) {
            found.push((String::new(), url));
        }
    }

    found
}

pub fn image_urls(text: &str) -> Vec<String> {
    images(text).into_iter().map(|(_, url)| url).collect()
}

/// Text with markdown image syntax removed.
pub fn strip_images(text: &str) -> String {
    MARKDOWN_IMAGE_REGEX.replace_all(text, "").to_string()
}

pub fn count_images(text: &str) -> usize {
    image_urls(text).len()
}

pub fn count_percentages(text: &str) -> usize {
    PERCENTAGE_REGEX.find_iter(text).count()
}

pub fn count_numeric_tokens(text: &str) -> usize {
    NUMERIC_TOKEN_REGEX.find_iter(text).count()
}

/// Proper-name pairs ("Jane Doe"), skipping common capitalised non-names.
pub fn count_people(text: &str) -> usize {
    let mut names = HashSet::new();
    for caps in NAME_PAIR_REGEX.captures_iter(text) {
        let first = &caps[1];
        let last = &caps[2];
        if NON_NAME_WORDS.contains(&first) || NON_NAME_WORDS.contains(&last) {
            continue;
        }
        names.insert(format!("{} {}", first, last));
    }
    names.len()
}

/// A parseable series, or chart vocabulary next to at least one percentage.
pub fn has_charts(text: &str, percentages: usize) -> bool {
    parse_series(text).is_some() || (percentages > 0 && CHART_WORD_REGEX.is_match(text))
}

pub fn has_tables(text: &str) -> bool {
    text.lines().filter(|l| PIPE_ROW_REGEX.is_match(l)).count() >= 2
        || TABLE_WORD_REGEX.is_match(text)
}

pub fn has_quotes(text: &str) -> bool {
    QUOTED_SPAN_REGEX.is_match(text) || BLOCKQUOTE_REGEX.is_match(text)
}

pub fn has_comparison(text: &str) -> bool {
    COMPARISON_REGEX.is_match(text)
}

/// Timeline vocabulary, or at least two distinct years.
pub fn has_timeline(text: &str) -> bool {
    if TIMELINE_REGEX.is_match(text) {
        return true;
    }
    let years: HashSet<&str> = YEAR_REGEX.find_iter(text).map(|m| m.as_str()).collect();
    years.len() >= 2
}

/// First match wins: tabular, hierarchical, multi-dimensional, time-series, simple.
pub fn classify_data_shape(text: &str) -> DataShape {
    if text.contains('|') || TABLE_WORD_REGEX.is_match(text) {
        DataShape::Tabular
    } else if HIERARCHY_REGEX.is_match(text) {
        DataShape::Hierarchical
    } else if DIMENSION_REGEX.is_match(text) {
        DataShape::MultiDimensional
    } else if TREND_REGEX.is_match(text) || PERIOD_TOKEN_REGEX.is_match(text) {
        DataShape::TimeSeries
    } else {
        DataShape::Simple
    }
}

/// Register score: 0.5 nudged by formal and casual indicators, clamped to [0, 1].
pub fn formality(text: &str) -> f64 {
    let mut score: f64 = 0.5;

    let exclamations = text.matches('!').count();
    let second_person = SECOND_PERSON_REGEX.is_match(text);

    if FORMAL_CONNECTIVE_REGEX.is_match(text) {
        score += 0.1;
    }
    if ANALYTICAL_REGEX.is_match(text) {
        score += 0.05;
    }
    if exclamations == 0 && !second_person {
        score += 0.05;
    }

    if CASUAL_REGEX.is_match(text) {
        score -= 0.1;
    }
    if exclamations >= 2 {
        score -= 0.1;
    }
    if second_person {
        score -= 0.05;
    }

    score.clamp(0.0, 1.0)
}

/// Information density squashed into [0, 1).
pub fn density(words: usize, bullets: usize, sections: usize, numbers: usize) -> f64 {
    let raw = words as f64 / 100.0
        + bullets as f64 * 0.1
        + sections as f64 * 0.15
        + numbers as f64 * 0.05;
    raw / (raw + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWOT: &str =
        "**Strengths**\n- Strong IP\n- Loyal customers\n\n**Weaknesses**\n- Slow onboarding";

    #[test]
    fn test_swot_example_counts() {
        let s = analyze(SWOT);
        assert_eq!(s.sections, 2);
        assert_eq!(s.bullet_points, 3);
        assert_eq!(s.paragraphs, 2);
        assert_eq!(s.people, 0);
        assert!(!s.has_charts);
    }

    #[test]
    fn test_bullets_do_not_count_bold_lines() {
        assert_eq!(count_bullets("**Bold**\n* star bullet\n• dot\n- dash\n-nospace"), 3);
    }

    #[test]
    fn test_numbered_items() {
        assert_eq!(count_numbered_items("1. One\n2) Two\n3.Three\nNot 4. this"), 2);
    }

    #[test]
    fn test_section_headers() {
        assert_eq!(section_header("**Goals**"), Some("Goals"));
        assert_eq!(section_header("## **Goals** for 2025"), Some("Goals"));
        assert_eq!(section_header("Some **inline** bold"), None);
        assert_eq!(section_header("- **Label:** 40%"), None);
    }

    #[test]
    fn test_paragraphs() {
        let text = "one\nstill one\n\n  \ntwo\n\nthree";
        assert_eq!(paragraphs(text), vec!["one\nstill one", "two", "three"]);
        assert!(paragraphs("   \n\n").is_empty());
    }

    #[test]
    fn test_images_are_deduplicated() {
        let text = "![Logo](https://x.io/logo.png)\nSee https://x.io/logo.png and https://x.io/team.jpg";
        assert_eq!(
            image_urls(text),
            vec!["https://x.io/logo.png", "https://x.io/team.jpg"]
        );
        assert_eq!(count_images(text), 2);
    }

    #[test]
    fn test_people() {
        assert_eq!(count_people("Jane Doe leads. John Smith builds. Jane Doe again."), 2);
        assert_eq!(count_people("The Market grew. Product Launch."), 0);
    }

    #[test]
    fn test_percentages_and_charts() {
        let text = "Product: 40%\nPrice: 25%";
        assert_eq!(count_percentages(text), 2);
        assert!(has_charts(text, 2));
        assert!(has_charts("Market share is 30%", 1));
        assert!(!has_charts("Grew 30% last year", 1));
    }

    #[test]
    fn test_tables_quotes_comparison_timeline() {
        assert!(has_tables("| a | b |\n| 1 | 2 |"));
        assert!(has_quotes("\"Design is how it works, not how it looks\""));
        assert!(has_quotes("> Stay hungry"));
        assert!(has_comparison("Cloud vs. on-prem"));
        assert!(has_comparison("Pros and cons"));
        assert!(!has_comparison("A plain sentence"));
        assert!(has_timeline("Our roadmap"));
        assert!(has_timeline("Founded 2015, IPO 2021"));
        assert!(!has_timeline("Founded 2015"));
    }

    #[test]
    fn test_data_shape_priority() {
        assert_eq!(classify_data_shape("| a | b |"), DataShape::Tabular);
        assert_eq!(classify_data_shape("parent and child nodes over time"), DataShape::Hierarchical);
        assert_eq!(classify_data_shape("three factors trend"), DataShape::MultiDimensional);
        assert_eq!(classify_data_shape("Revenue in Q3"), DataShape::TimeSeries);
        assert_eq!(classify_data_shape("Hello world"), DataShape::Simple);
    }

    #[test]
    fn test_formality() {
        let formal = "Furthermore, the assessment indicates a robust strategy.";
        let casual = "Hey you guys, this is awesome!! Wow!";
        assert!(formality(formal) > 0.6);
        assert!(formality(casual) < 0.3);
        assert!((0.0..=1.0).contains(&formality(casual)));
    }

    #[test]
    fn test_density_is_bounded_and_monotonic() {
        let low = density(10, 0, 0, 0);
        let high = density(300, 8, 4, 20);
        assert!(low < high);
        assert!(high < 1.0);
        assert_eq!(density(0, 0, 0, 0), 0.0);
    }

    #[test]
    fn test_sentinel_is_empty_structure() {
        let s = analyze(crate::sanitize::UNPROCESSABLE);
        assert_eq!(s, ContentStructure::empty());
    }
}
