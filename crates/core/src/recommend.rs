//! Template recommendation.
//!
//! A recommendation is produced by an ordered list of [`Detector`]s evaluated
//! first-match: the first detector with an opinion wins, so the order of the
//! list is part of the behaviour. When no detector has an opinion the
//! default branch picks the content (or accent) layout, so a
//! recommendation is always produced.
//!
//! Detectors never read raw text. Text-derived cues are computed once into
//! [`Cues`] by the named functions at the bottom of this module, and the
//! detectors decide over `Cues` plus the [`ContentStructure`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::analyze::section_header;
use crate::chart::{parse_series, ChartSeries};
use crate::sanitize::is_unusable;
use crate::template::{TemplateFamily, TemplateId};
use crate::types::{is_continuation_title, ContentStructure, DataShape, TemplateRecommendation};

static STRENGTH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bstrengths?\b").unwrap());
static WEAKNESS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bweakness(?:es)?\b").unwrap());
static OPPORTUNITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bopportunit(?:y|ies)\b").unwrap());
static THREAT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bthreats?\b").unwrap());
static SWOT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bswot\b").unwrap());

/// "Strengths:" at the start of a line.
static LABEL_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:#{1,6}\s+)?([A-Za-z ]{3,30}):").unwrap());

static DISTRIBUTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:distribution|allocation|breakdown|composition|market\s+share|share\s+of|split|mix|proportion)s?\b").unwrap()
});

static CUMULATIVE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:cumulative|running\s+total|accumulated|stacked|build-?up)\b").unwrap()
});

static TREND_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:trends?|over\s+time|growth|decline|trajectory|year[- ]over[- ]year|yoy|monthly|quarterly|forecast)\b").unwrap()
});

static COMPARE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:vs\.?|versus|compar\w*|benchmark\w*|ranking|relative\s+to)(?:\W|$)").unwrap()
});

static DIMENSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:dimensions?|attributes?|factors?|capabilit(?:y|ies)|skills?|competenc(?:y|ies)|scores?)\b").unwrap()
});

static TEAM_TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:team|leadership|founders?|our\s+people|meet\s+the|staff|board|advisors?)\b").unwrap()
});

static TEAM_CONTENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:meet\s+the\s+team|our\s+team|leadership\s+team|founding\s+team|team\s+members|management\s+team)\b").unwrap()
});

static PERSONA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:persona|user\s+profile|customer\s+profile|buyer\s+profile|demographics|pain\s+points|goals\s+and\s+motivations|frustrations)\b").unwrap()
});

static METRIC_LABEL_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*•]\s+)?(?:\*\*)?[A-Za-z][^:\n]{0,40}?(?:\*\*)?\s*:\s*(?:\*\*)?[+-]?[$€£]?\d[\d,]*(?:\.\d+)?\s?(?:%|[KMBkmb]|x|bn|mn)?").unwrap()
});

static METRIC_VALUE_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*•]\s+)?(?:\*\*)?[+-]?[$€£]?\d[\d,]*(?:\.\d+)?\s?(?:%|[KMBkmb]|x|bn|mn)?(?:\*\*)?\s+[A-Za-z]").unwrap()
});

static METRICS_VOCAB_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:kpis?|metrics?|dashboard|revenue|arr|mrr|users|conversion|retention|churn|nps|margin|performance)\b").unwrap()
});

static DATED_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:[-*•]\s+|\d+[.)]\s+)?(?:\*\*)?(?:(?:19|20)\d{2}|q[1-4]\b|(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\b|phase\s+\d+|step\s+\d+|week\s+\d+|month\s+\d+)").unwrap()
});

/// Where the slide sits in the deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecommendContext {
    /// The slide opens the deck.
    pub is_first: bool,
    /// Final template of the preceding slide, if already decided.
    pub predecessor: Option<TemplateId>,
}

impl RecommendContext {
    pub fn first() -> Self {
        Self {
            is_first: true,
            predecessor: None,
        }
    }

    pub fn after(predecessor: TemplateId) -> Self {
        Self {
            is_first: false,
            predecessor: Some(predecessor),
        }
    }
}

/// Which SWOT components a slide names prominently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwotMentions {
    pub strengths: bool,
    pub weaknesses: bool,
    pub opportunities: bool,
    pub threats: bool,
    /// The title names the SWOT framework itself.
    pub framework: bool,
}

impl SwotMentions {
    pub fn count(&self) -> usize {
        [self.strengths, self.weaknesses, self.opportunities, self.threats]
            .iter()
            .filter(|&&b| b)
            .count()
    }

    /// All four quadrants present, or the framework named outright.
    pub fn is_complete(&self) -> bool {
        self.framework || self.count() == 4
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.strengths {
            names.push("strengths");
        }
        if self.weaknesses {
            names.push("weaknesses");
        }
        if self.opportunities {
            names.push("opportunities");
        }
        if self.threats {
            names.push("threats");
        }
        names
    }
}

/// Text-derived cues, computed once per slide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cues {
    pub unusable: bool,
    pub continuation: bool,
    pub swot: SwotMentions,
    pub series: Option<ChartSeries>,
    pub distribution: bool,
    pub cumulative: bool,
    pub trend: bool,
    pub compare: bool,
    pub dimensions: bool,
    pub team: bool,
    pub persona: bool,
    pub comparison_title: bool,
    pub metric_lines: usize,
    pub metrics_vocab: bool,
    pub dated_lines: usize,
}

impl Cues {
    /// Derive cues from a title and sanitized content.
    pub fn from_text(title: &str, content: &str) -> Self {
        let unusable = is_unusable(content);
        let content = if unusable { "" } else { content };
        let both = format!("{}\n{}", title, content);

        Self {
            unusable,
            continuation: is_continuation_title(title),
            swot: swot_mentions(title, content),
            series: parse_series(content),
            distribution: DISTRIBUTION_REGEX.is_match(&both),
            cumulative: CUMULATIVE_REGEX.is_match(&both),
            trend: TREND_REGEX.is_match(&both),
            compare: COMPARE_REGEX.is_match(&both),
            dimensions: DIMENSION_REGEX.is_match(&both),
            team: TEAM_TITLE_REGEX.is_match(title) || TEAM_CONTENT_REGEX.is_match(content),
            persona: PERSONA_REGEX.is_match(&both),
            comparison_title: COMPARE_REGEX.is_match(title),
            metric_lines: count_metric_lines(content),
            metrics_vocab: METRICS_VOCAB_REGEX.is_match(&both),
            dated_lines: count_dated_lines(content),
        }
    }
}

/// One link of the recommendation chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Detector {
    TitleSlide,
    Continuation,
    Swot,
    Chart,
    People,
    ComparisonTable,
    Timeline,
    Metrics,
    List,
    Image,
    Quote,
    Columns,
}

impl Detector {
    /// The canonical evaluation order.
    pub const CANONICAL: [Detector; 12] = [
        // Deck position outranks content.
        Detector::TitleSlide,
        Detector::Continuation,
        // SWOT headers look like columns and must be claimed first.
        Detector::Swot,
        // A parsed series wins over the list and metric readings of its lines.
        Detector::Chart,
        Detector::People,
        Detector::ComparisonTable,
        // Dated bullets are a timeline before they are a list.
        Detector::Timeline,
        Detector::Metrics,
        Detector::List,
        Detector::Image,
        Detector::Quote,
        // Bold sections are the weakest structural signal.
        Detector::Columns,
    ];

    /// Detectors that depend on deck position rather than slide content.
    fn is_positional(&self) -> bool {
        matches!(self, Detector::TitleSlide | Detector::Continuation)
    }
}

/// Everything a detector may look at.
struct Signals<'a> {
    structure: &'a ContentStructure,
    cues: &'a Cues,
    context: RecommendContext,
}

/// First-match template recommender.
#[derive(Debug, Clone)]
pub struct Recommender {
    detectors: Vec<Detector>,
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new()
    }
}

impl Recommender {
    /// Create a recommender with the canonical detector order.
    pub fn new() -> Self {
        Self {
            detectors: Detector::CANONICAL.to_vec(),
        }
    }

    /// Create a recommender evaluating the given detectors in order.
    pub fn with_detectors(detectors: Vec<Detector>) -> Self {
        Self { detectors }
    }

    pub fn detectors(&self) -> &[Detector] {
        &self.detectors
    }

    /// Recommend a template for a slide with no deck context.
    pub fn recommend(
        &self,
        structure: &ContentStructure,
        title: &str,
        content: &str,
    ) -> TemplateRecommendation {
        self.recommend_in_context(structure, title, content, RecommendContext::default())
    }

    /// Recommend a template for a slide at a known position in the deck.
    pub fn recommend_in_context(
        &self,
        structure: &ContentStructure,
        title: &str,
        content: &str,
        context: RecommendContext,
    ) -> TemplateRecommendation {
        let cues = Cues::from_text(title, content);
        let signals = Signals {
            structure,
            cues: &cues,
            context,
        };

        let recommendation = self.evaluate(&signals, true);
        log::debug!(
            "Recommended {} ({:.2}) for '{}': {}",
            recommendation.template,
            recommendation.confidence,
            title,
            recommendation.reason
        );
        recommendation
    }

    fn evaluate(&self, s: &Signals, positional: bool) -> TemplateRecommendation {
        self.detectors
            .iter()
            .filter(|d| positional || !d.is_positional())
            .find_map(|d| self.run(*d, s))
            .unwrap_or_else(|| default_template(s))
    }

    fn run(&self, detector: Detector, s: &Signals) -> Option<TemplateRecommendation> {
        match detector {
            Detector::TitleSlide => detect_title_slide(s),
            Detector::Continuation => self.detect_continuation(s),
            Detector::Swot => detect_swot(s),
            Detector::Chart => detect_chart(s),
            Detector::People => detect_people(s),
            Detector::ComparisonTable => detect_comparison_table(s),
            Detector::Timeline => detect_timeline(s),
            Detector::Metrics => detect_metrics(s),
            Detector::List => detect_list(s),
            Detector::Image => detect_image(s),
            Detector::Quote => detect_quote(s),
            Detector::Columns => detect_columns(s),
        }
    }

    /// A continuation stays in its predecessor's family. The content is
    /// re-derived from scratch and kept only when it lands in that family.
    fn detect_continuation(&self, s: &Signals) -> Option<TemplateRecommendation> {
        if !s.cues.continuation {
            return None;
        }
        let previous = s.context.predecessor?;
        let family = previous.family();

        let fresh = self.evaluate(s, false);
        if fresh.template.family() == family {
            return Some(TemplateRecommendation::new(
                fresh.template,
                fresh.confidence.max(0.85),
                format!(
                    "Continuation slide re-derived as {} within the {} family of the previous slide",
                    fresh.template,
                    family.as_str()
                ),
            ));
        }

        let inherited = if family == TemplateFamily::Title {
            TemplateId::Content
        } else {
            previous
        };
        Some(TemplateRecommendation::new(
            inherited,
            0.9,
            format!(
                "Continuation of the previous slide; keeps its {} layout",
                inherited
            ),
        ))
    }
}

/// Recommend a template with the canonical detector order and no deck context.
pub fn recommend(structure: &ContentStructure, title: &str, content: &str) -> TemplateRecommendation {
    Recommender::new().recommend(structure, title, content)
}

fn detect_title_slide(s: &Signals) -> Option<TemplateRecommendation> {
    if !s.context.is_first || s.cues.continuation {
        return None;
    }
    Some(TemplateRecommendation::new(
        TemplateId::Title,
        0.95,
        "First slide of the deck opens as the title slide",
    ))
}

fn detect_swot(s: &Signals) -> Option<TemplateRecommendation> {
    let swot = s.cues.swot;
    if swot.count() == 0 && !swot.framework {
        return None;
    }

    if swot.is_complete() {
        return Some(TemplateRecommendation::new(
            TemplateId::SwotMatrix,
            0.9,
            "Covers strengths, weaknesses, opportunities and threats as a SWOT matrix",
        ));
    }

    let st = s.structure;
    let template = if st.sections >= 2 {
        TemplateId::for_columns(st.sections)
    } else if st.bullet_points > 3 {
        TemplateId::BulletList
    } else {
        TemplateId::Content
    };

    Some(TemplateRecommendation::new(
        template,
        0.75,
        format!(
            "Mentions SWOT components ({}) without the full matrix; laid out as {}",
            swot.names().join(", "),
            template
        ),
    ))
}

fn detect_chart(s: &Signals) -> Option<TemplateRecommendation> {
    let series = s.cues.series.as_ref()?;
    let st = s.structure;
    let c = s.cues;
    let n = series.len();

    let (template, confidence, reason) = if c.distribution || series.is_part_of_whole() {
        (
            TemplateId::PieChart,
            0.9,
            format!("{} percentages describe parts of a whole", n),
        )
    } else if c.cumulative {
        (
            TemplateId::AreaChart,
            0.85,
            format!("{} cumulative values read as an area chart", n),
        )
    } else if c.trend || st.data_shape == DataShape::TimeSeries {
        (
            TemplateId::LineChart,
            0.85,
            format!("{} values describe a trend over time", n),
        )
    } else if c.compare || st.has_comparison {
        (
            TemplateId::BarChart,
            0.85,
            format!("{} values are compared side by side", n),
        )
    } else if c.dimensions || st.data_shape == DataShape::MultiDimensional {
        (
            TemplateId::RadarChart,
            0.8,
            format!("{} values score several dimensions", n),
        )
    } else {
        (
            TemplateId::BarChart,
            0.75,
            format!("{} labelled percentages compare categories", n),
        )
    };

    Some(TemplateRecommendation::new(template, confidence, reason))
}

fn detect_people(s: &Signals) -> Option<TemplateRecommendation> {
    if s.cues.team || s.structure.people > 2 {
        return Some(TemplateRecommendation::new(
            TemplateId::TeamPhoto,
            0.85,
            format!(
                "Introduces people ({} named) as a team roster",
                s.structure.people
            ),
        ));
    }
    if s.cues.persona {
        return Some(TemplateRecommendation::new(
            TemplateId::PersonaCard,
            0.8,
            "Describes a user persona with goals and pain points",
        ));
    }
    None
}

fn detect_comparison_table(s: &Signals) -> Option<TemplateRecommendation> {
    let st = s.structure;
    if st.has_tables {
        return Some(TemplateRecommendation::new(
            TemplateId::ComparisonTable,
            0.85,
            "Tabular content renders as a comparison table",
        ));
    }
    if s.cues.comparison_title && (st.sections >= 2 || st.bullet_points >= 2 || st.has_comparison) {
        return Some(TemplateRecommendation::new(
            TemplateId::ComparisonTable,
            0.8,
            "Title announces a comparison between options",
        ));
    }
    None
}

fn detect_timeline(s: &Signals) -> Option<TemplateRecommendation> {
    let st = s.structure;
    if !st.has_timeline {
        return None;
    }
    if st.numbered_items >= 2 || st.bullet_points >= 2 || s.cues.dated_lines >= 2 {
        return Some(TemplateRecommendation::new(
            TemplateId::Timeline,
            0.8,
            format!(
                "Sequenced milestones ({} dated entries) form a timeline",
                s.cues.dated_lines
            ),
        ));
    }
    None
}

fn detect_metrics(s: &Signals) -> Option<TemplateRecommendation> {
    let lines = s.cues.metric_lines;
    if lines >= 3 || (lines >= 2 && s.cues.metrics_vocab) {
        return Some(TemplateRecommendation::new(
            TemplateId::MetricsDashboard,
            0.8,
            format!("{} headline figures suit a metrics dashboard", lines),
        ));
    }
    None
}

fn detect_list(s: &Signals) -> Option<TemplateRecommendation> {
    let st = s.structure;
    if st.bullet_points > 3 {
        if st.images > 0 {
            return Some(TemplateRecommendation::new(
                TemplateId::Content,
                0.7,
                format!("{} bullet points alongside images", st.bullet_points),
            ));
        }
        return Some(TemplateRecommendation::new(
            TemplateId::BulletList,
            0.8,
            format!("{} bullet points read best as a list", st.bullet_points),
        ));
    }
    if st.numbered_items > 2 {
        return Some(TemplateRecommendation::new(
            TemplateId::Content,
            0.7,
            format!("{} numbered steps keep their order in the content layout", st.numbered_items),
        ));
    }
    None
}

fn detect_image(s: &Signals) -> Option<TemplateRecommendation> {
    let st = s.structure;
    let (template, reason) = match st.images {
        0 => return None,
        1 if st.word_count <= 12 => (TemplateId::FullImage, "A single image with little text"),
        1 => (TemplateId::ImageContent, "A single image supports the text"),
        2 => (TemplateId::TwoImageColumns, "Two images sit side by side"),
        3 => (TemplateId::ThreeImageColumns, "Three images sit side by side"),
        _ => (TemplateId::ImageGallery, "More than three images form a gallery"),
    };
    let confidence = if st.images > 3 { 0.85 } else { 0.8 };
    Some(TemplateRecommendation::new(template, confidence, reason))
}

fn detect_quote(s: &Signals) -> Option<TemplateRecommendation> {
    let st = s.structure;
    if st.has_quotes && st.word_count <= 60 {
        return Some(TemplateRecommendation::new(
            TemplateId::Quote,
            0.8,
            "Short content built around a quotation",
        ));
    }
    None
}

fn detect_columns(s: &Signals) -> Option<TemplateRecommendation> {
    let sections = s.structure.sections;
    if sections < 2 {
        return None;
    }
    let template = TemplateId::for_columns(sections);
    Some(TemplateRecommendation::new(
        template,
        0.75,
        format!("{} bold sections map onto {}", sections, template),
    ))
}

fn default_template(s: &Signals) -> TemplateRecommendation {
    if s.cues.unusable {
        return TemplateRecommendation::new(
            TemplateId::Content,
            0.3,
            "No usable content; using the default layout",
        );
    }
    let st = s.structure;
    if st.density >= 0.6 && st.formality >= 0.6 {
        return TemplateRecommendation::new(
            TemplateId::AccentLeft,
            0.6,
            "Dense, formal prose suits an accent layout",
        );
    }
    TemplateRecommendation::new(TemplateId::Content, 0.5, "General content")
}

/// SWOT components named in the title, a section header or a "Label:" line.
pub fn swot_mentions(title: &str, content: &str) -> SwotMentions {
    let prominent: Vec<&str> = std::iter::once(title)
        .chain(content.lines().filter_map(|line| {
            section_header(line).or_else(|| {
                LABEL_LINE_REGEX
                    .captures(line)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str())
            })
        }))
        .collect();

    let named = |re: &Regex| prominent.iter().any(|text| re.is_match(text));

    SwotMentions {
        strengths: named(&STRENGTH_REGEX),
        weaknesses: named(&WEAKNESS_REGEX),
        opportunities: named(&OPPORTUNITY_REGEX),
        threats: named(&THREAT_REGEX),
        framework: SWOT_REGEX.is_match(title),
    }
}

/// Lines that pair a label with a headline figure.
pub fn count_metric_lines(content: &str) -> usize {
    content
        .lines()
        .filter(|l| METRIC_LABEL_LINE_REGEX.is_match(l) || METRIC_VALUE_LINE_REGEX.is_match(l))
        .count()
}

/// Lines led by a year, quarter, month, phase or step marker.
pub fn count_dated_lines(content: &str) -> usize {
    content.lines().filter(|l| DATED_LINE_REGEX.is_match(l)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze;

    fn rec(title: &str, content: &str) -> TemplateRecommendation {
        recommend(&analyze(content), title, content)
    }

    fn rec_in(title: &str, content: &str, ctx: RecommendContext) -> TemplateRecommendation {
        Recommender::new().recommend_in_context(&analyze(content), title, content, ctx)
    }

    #[test]
    fn test_first_slide_is_title() {
        let r = rec_in("Quarterly Review", "Acme Corp, 2025", RecommendContext::first());
        assert_eq!(r.template, TemplateId::Title);
        assert!(!r.reason.is_empty());
    }

    #[test]
    fn test_partial_swot_stays_in_content_family() {
        let content =
            "**Strengths**\n- Strong IP\n- Loyal customers\n\n**Weaknesses**\n- Slow onboarding";
        let r = rec("Where we stand", content);
        assert_eq!(r.template, TemplateId::TwoColumn);
        assert!(r.reason.contains("strengths"));
        assert!(r.reason.contains("weaknesses"));
    }

    #[test]
    fn test_full_swot_is_matrix() {
        let content = "**Strengths**\n- A\n**Weaknesses**\n- B\n**Opportunities**\n- C\n**Threats**\n- D";
        assert_eq!(rec("Position", content).template, TemplateId::SwotMatrix);
        assert_eq!(rec("SWOT Analysis", "- A\n- B").template, TemplateId::SwotMatrix);
    }

    #[test]
    fn test_pie_chart_for_parts_of_whole() {
        let content = "Product: 40%\nPrice: 25%\nPlace: 20%\nPromotion: 15%";
        let r = rec("Marketing Mix", content);
        assert_eq!(r.template, TemplateId::PieChart);
        assert!(r.confidence >= 0.8);
    }

    #[test]
    fn test_chart_flavours() {
        assert_eq!(
            rec("Adoption trend", "Jan: 10%\nFeb: 20%\nMar: 35%").template,
            TemplateId::LineChart
        );
        assert_eq!(
            rec("Us vs them", "Us: 70%\nThem: 45%").template,
            TemplateId::BarChart
        );
        assert_eq!(
            rec("Skill scores", "Design: 80%\nCode: 60%\nOps: 40%").template,
            TemplateId::RadarChart
        );
        assert_eq!(
            rec("Cumulative signups", "Week 1: 10%\nWeek 2: 30%\nWeek 3: 45%").template,
            TemplateId::AreaChart
        );
    }

    #[test]
    fn test_team_and_persona() {
        assert_eq!(
            rec("Meet the Team", "Jane Doe, CEO\nJohn Smith, CTO").template,
            TemplateId::TeamPhoto
        );
        assert_eq!(
            rec("Who buys", "Maria is our persona. Her pain points are cost and speed.").template,
            TemplateId::PersonaCard
        );
    }

    #[test]
    fn test_comparison_table() {
        let content = "| Plan | Price |\n|---|---|\n| Basic | $10 |\n| Pro | $20 |";
        assert_eq!(rec("Plans", content).template, TemplateId::ComparisonTable);
    }

    #[test]
    fn test_timeline() {
        let content = "- 2019: Founded\n- 2021: Series A\n- 2024: Expansion";
        assert_eq!(rec("Our Journey", content).template, TemplateId::Timeline);
    }

    #[test]
    fn test_metrics() {
        let content = "Revenue: $2.4M\nActive users: 12,000\nChurn: 1.8";
        assert_eq!(rec("Q3 KPIs", content).template, TemplateId::MetricsDashboard);
    }

    #[test]
    fn test_lists() {
        let bullets = "- one\n- two\n- three\n- four";
        assert_eq!(rec("Notes", bullets).template, TemplateId::BulletList);

        let with_image = format!("{}\n![pic](https://x.io/a.png)", bullets);
        assert_eq!(rec("Notes", &with_image).template, TemplateId::Content);

        let numbered = "1. one\n2. two\n3. three";
        assert_eq!(rec("Steps", numbered).template, TemplateId::Content);
    }

    #[test]
    fn test_images() {
        assert_eq!(rec("Hero", "![a](https://x.io/a.png)").template, TemplateId::FullImage);
        assert_eq!(
            rec("Gallery", "![a](https://x.io/a.png) ![b](https://x.io/b.png) ![c](https://x.io/c.png) ![d](https://x.io/d.png)").template,
            TemplateId::ImageGallery
        );
        assert_eq!(
            rec("Pair", "![a](https://x.io/a.png) ![b](https://x.io/b.png)").template,
            TemplateId::TwoImageColumns
        );
    }

    #[test]
    fn test_quote() {
        let r = rec("Inspiration", "\"The best way to predict the future is to invent it.\" - Alan Kay");
        assert_eq!(r.template, TemplateId::Quote);
    }

    #[test]
    fn test_columns() {
        let content = "**Plan**\nDo it\n\n**Build**\nMake it\n\n**Ship**\nSend it";
        assert_eq!(rec("Approach", content).template, TemplateId::ThreeColumn);
    }

    #[test]
    fn test_default_and_accent() {
        assert_eq!(rec("Hello", "Just a short note.").template, TemplateId::Content);

        let dense = "Furthermore, the assessment of our strategy indicates consistent execution. "
            .repeat(20);
        assert_eq!(rec("Analysis", &dense).template, TemplateId::AccentLeft);
    }

    #[test]
    fn test_sentinel_defaults_to_content() {
        let r = rec("Broken", crate::sanitize::UNPROCESSABLE);
        assert_eq!(r.template, TemplateId::Content);
        assert!(r.confidence > 0.0);
    }

    #[test]
    fn test_continuation_inherits_predecessor_family() {
        let content = "- five\n- six";
        let r = rec_in(
            "Notes (continued)",
            content,
            RecommendContext::after(TemplateId::BulletList),
        );
        assert_eq!(r.template.family(), TemplateFamily::Text);

        let columns = "**A**\n- x\n\n**B**\n- y";
        let r = rec_in(
            "Plan (continued)",
            columns,
            RecommendContext::after(TemplateId::FourColumn),
        );
        assert_eq!(r.template, TemplateId::TwoColumn);
    }

    #[test]
    fn test_continuation_keeps_layout_when_family_differs() {
        let r = rec_in(
            "Timeline (continued)",
            "Some closing words.",
            RecommendContext::after(TemplateId::Timeline),
        );
        assert_eq!(r.template, TemplateId::Timeline);
    }

    #[test]
    fn test_continuation_of_title_becomes_content() {
        let r = rec_in(
            "Welcome (continued)",
            "More intro text.",
            RecommendContext::after(TemplateId::Title),
        );
        assert_eq!(r.template, TemplateId::Content);
    }

    #[test]
    fn test_continuation_without_predecessor_is_classified_fresh() {
        let r = rec("Notes (continued)", "- a\n- b\n- c\n- d");
        assert_eq!(r.template, TemplateId::BulletList);
    }

    #[test]
    fn test_order_is_reorderable() {
        // With list ahead of timeline, dated bullets become a bullet list.
        let content = "- 2019: Founded\n- 2020: Seed\n- 2021: Series A\n- 2024: Expansion";
        let reordered = Recommender::with_detectors(vec![Detector::List, Detector::Timeline]);
        let r = reordered.recommend(&analyze(content), "History", content);
        assert_eq!(r.template, TemplateId::BulletList);
        assert_eq!(rec("History", content).template, TemplateId::Timeline);
    }

    #[test]
    fn test_canonical_order() {
        let r = Recommender::new();
        assert_eq!(r.detectors().first(), Some(&Detector::TitleSlide));
        assert_eq!(r.detectors()[1], Detector::Continuation);
        assert_eq!(r.detectors().last(), Some(&Detector::Columns));
    }

    #[test]
    fn test_swot_mentions() {
        let m = swot_mentions("Review", "Strengths: speed\nThe threat is real");
        assert!(m.strengths);
        assert!(!m.threats);
        assert_eq!(m.names(), vec!["strengths"]);
    }
}
