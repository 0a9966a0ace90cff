//! Template data extraction.
//!
//! Pulls the structured payload for a template out of a slide's sanitized
//! content. [`TemplateExtractor::extract`] always returns a non-empty
//! payload of the template's schema, using placeholders when the content
//! holds nothing usable. [`TemplateExtractor::assign`] instead falls back to
//! the content template, so a rendered slide never carries placeholder data
//! for a layout its content does not support.

use regex::Regex;
use std::sync::LazyLock;

use crate::analyze::{
    images, is_bullet_line, is_numbered_line, paragraphs, section_header, strip_images,
};
use crate::chart::{parse_series, ChartPoint, ChartSeries};
use crate::sanitize::{is_unusable, TextSanitizer};
use crate::template::{
    AccentData, BulletListData, ChartData, Column, ColumnSet, ComparisonTable, ContentData,
    ImageGallery, ImageRef, Metric, MetricsData, PersonaData, QuoteData, SchemaKind, SwotData,
    TeamMember, TeamRoster, TemplateData, TemplateId, TimelineData, TimelineEvent, TitleData,
};
use crate::types::{strip_continuation_marker, Slide};

const PLACEHOLDER_TEXT: &str = "Content to be added";
const PLACEHOLDER_IMAGE_URL: &str = "placeholder.png";

/// Longest first line still read as a subtitle.
const MAX_SUBTITLE_WORDS: usize = 25;

static LIST_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-•*]|\d+[.)])\s+").unwrap());

/// "Label: value", "**Label:** value" or "**Label**: value".
static LABEL_VALUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-•*]\s+)?(?:\*\*)?([A-Za-z][A-Za-z0-9 /&'()-]{0,40}?)(?:\*\*)?\s*:\s*(?:\*\*)?\s*(.+?)\s*$").unwrap()
});

/// "$2.4M ARR", "12,000 active users".
static VALUE_FIRST_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-•*]\s+)?(?:\*\*)?([+-]?[$€£]?\d[\d,]*(?:\.\d+)?\s?(?:%|[KMBkmb]|x|bn|mn)?)(?:\*\*)?\s+([A-Za-z].*?)\s*$").unwrap()
});

static CHANGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(?\s*([+-]\d[\d,]*(?:\.\d+)?\s?%?(?:\s+\w+)*)\s*\)?\s*$").unwrap()
});

static DATED_EVENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:[-•*]\s+|\d+[.)]\s+)?(?:\*\*)?((?:(?:q[1-4]|h[12])\s+)?(?:19|20)\d{2}|q[1-4]|(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)(?:\s+(?:19|20)\d{2})?|(?:phase|step|week|month|stage)\s+\d+)\b(?:\*\*)?\s*(?:[:|-]\s*)?(.*)$").unwrap()
});

static QUOTED_SPAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"\n]{10,})""#).unwrap());

static BLOCKQUOTE_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*>\s*(.+)$").unwrap());

static ATTRIBUTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-~]+\s*(.+?)\s*$").unwrap());

/// A name of two or three capitalised words at the start of a line.
static LEADING_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][a-z]+(?: [A-Z][a-z'-]+){1,2})(?:\s*(?:[,:|(-]|\s-\s)\s*(.*?))?\)?\s*$").unwrap()
});

static PIPE_ROW_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\|.*\|\s*$").unwrap());

static PIPE_SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\|?(?:\s*:?-{2,}:?\s*\|)+\s*:?-*:?\s*$").unwrap());

static GOALS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:goals?|motivations?|needs|wants|objectives?)\b").unwrap());

static PAINS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:pain\s*points?|frustrations?|challenges?|pains?|problems?)\b").unwrap()
});

static ROLE_LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:role|occupation|job|title|position)$").unwrap());

static NAME_LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:name|persona)$").unwrap());

static STRENGTH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bstrengths?\b").unwrap());
static WEAKNESS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bweakness(?:es)?\b").unwrap());
static OPPORTUNITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bopportunit(?:y|ies)\b").unwrap());
static THREAT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bthreats?\b").unwrap());

/// A bold-headed block of content.
#[derive(Debug, Clone, PartialEq, Default)]
struct Section {
    header: String,
    items: Vec<String>,
    body: Vec<String>,
}

/// Extracts template data from slides.
#[derive(Debug, Clone, Default)]
pub struct TemplateExtractor {
    sanitizer: TextSanitizer,
}

impl TemplateExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data for `template`, never empty.
    ///
    /// Falls back to schema-valid placeholders when the slide supplies nothing.
    pub fn extract(&self, template: TemplateId, slide: &Slide) -> TemplateData {
        self.try_extract(template, slide).unwrap_or_else(|| {
            log::warn!(
                "No {} data in slide '{}', using placeholders",
                template,
                slide.id
            );
            placeholder(template, &slide.title)
        })
    }

    /// Data for `template` if the slide actually supplies it.
    ///
    /// Upstream `template_data` that fits the template wins over re-extraction.
    pub fn try_extract(&self, template: TemplateId, slide: &Slide) -> Option<TemplateData> {
        if let Some(data) = &slide.template_data {
            if data.fits(template) {
                return Some(with_chart_kind(data.clone(), template));
            }
        }

        let content = self.sanitizer.sanitize(&slide.content);
        let content = if is_unusable(&content) { "" } else { content.as_str() };
        let title = strip_continuation_marker(&slide.title);

        extract_from(template, &title, content).filter(|data| data.fits(template))
    }

    /// The template to render and its data.
    ///
    /// A column layout is resized to the number of sections found; any
    /// template whose data cannot be extracted falls back to content.
    pub fn assign(&self, template: TemplateId, slide: &Slide) -> (TemplateId, TemplateData) {
        let template = self.resize_columns(template, slide);

        if let Some(data) = self.try_extract(template, slide) {
            return (template, data);
        }

        if template != TemplateId::Content {
            log::warn!(
                "Slide '{}' has no {} data, falling back to content",
                slide.id,
                template
            );
        }
        (TemplateId::Content, self.extract(TemplateId::Content, slide))
    }

    fn resize_columns(&self, template: TemplateId, slide: &Slide) -> TemplateId {
        let Some(columns) = template.column_count() else {
            return template;
        };
        if slide
            .template_data
            .as_ref()
            .is_some_and(|data| data.fits(template))
        {
            return template;
        }

        let found = sections(&self.sanitizer.sanitize(&slide.content)).len();
        if (2..=4).contains(&found) && found != columns {
            let resized = TemplateId::for_columns(found);
            log::debug!(
                "Slide '{}' has {} sections, using {} instead of {}",
                slide.id,
                found,
                resized,
                template
            );
            return resized;
        }
        if found == 1 {
            // One section is not a column layout; let extraction fall back.
            return TemplateId::Content;
        }
        template
    }
}

/// Extract data for `template` from a title and sanitized content.
///
/// Returns `None` when the content holds nothing for the template's schema.
pub fn extract_from(template: TemplateId, title: &str, content: &str) -> Option<TemplateData> {
    let data = match template.schema() {
        SchemaKind::Title => TemplateData::Title(extract_title(title, content)?),
        SchemaKind::Content => TemplateData::Content(extract_content(content)?),
        SchemaKind::BulletList => TemplateData::BulletList(extract_bullets(content)?),
        SchemaKind::Columns => {
            TemplateData::Columns(extract_columns(content, template.column_count().unwrap_or(2))?)
        }
        SchemaKind::Images => TemplateData::Images(extract_images(content)?),
        SchemaKind::Quote => TemplateData::Quote(extract_quote(content)?),
        SchemaKind::Timeline => TemplateData::Timeline(extract_timeline(content)?),
        SchemaKind::Comparison => TemplateData::Comparison(extract_comparison(content)?),
        SchemaKind::Metrics => TemplateData::Metrics(extract_metrics(content)?),
        SchemaKind::Team => TemplateData::Team(extract_team(content)?),
        SchemaKind::Persona => TemplateData::Persona(extract_persona(title, content)?),
        SchemaKind::Swot => TemplateData::Swot(extract_swot(content)?),
        SchemaKind::Chart => TemplateData::Chart(ChartData {
            chart_type: template.chart_kind().unwrap_or_default(),
            series: parse_series(content)?,
        }),
        SchemaKind::Accent => TemplateData::Accent(extract_accent(content)?),
    };
    Some(data)
}

fn with_chart_kind(data: TemplateData, template: TemplateId) -> TemplateData {
    match (data, template.chart_kind()) {
        (TemplateData::Chart(mut chart), Some(kind)) => {
            chart.chart_type = kind;
            TemplateData::Chart(chart)
        }
        (data, _) => data,
    }
}

fn extract_title(title: &str, content: &str) -> Option<TitleData> {
    let first_line = content
        .lines()
        .map(clean_inline)
        .find(|line| !line.is_empty());

    let (title, subtitle) = if title.trim().is_empty() {
        (first_line?, None)
    } else {
        let subtitle = first_line
            .filter(|line| line.split_whitespace().count() <= MAX_SUBTITLE_WORDS)
            .filter(|line| line != title.trim());
        (title.trim().to_string(), subtitle)
    };

    Some(TitleData { title, subtitle })
}

fn extract_content(content: &str) -> Option<ContentData> {
    let data = ContentData {
        heading: None,
        body: body_paragraphs(content),
        bullets: list_items(content),
        images: image_refs(content),
    };
    let has_any = !(data.body.is_empty() && data.bullets.is_empty() && data.images.is_empty());
    has_any.then_some(data)
}

fn extract_bullets(content: &str) -> Option<BulletListData> {
    let mut bullets = list_items(content);
    if bullets.is_empty() {
        // Agenda-style slides list one item per plain line.
        let lines: Vec<String> = content
            .lines()
            .map(clean_inline)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() >= 2 {
            bullets = lines;
        }
    }
    (!bullets.is_empty()).then_some(BulletListData { bullets })
}

/// Exactly `count` columns: extra sections are merged into the last column
/// and missing ones are padded with placeholders.
fn extract_columns(content: &str, count: usize) -> Option<ColumnSet> {
    let found = sections(content);
    if found.is_empty() {
        return None;
    }

    let mut columns: Vec<Column> = found.into_iter().map(section_to_column).collect();

    if columns.len() > count {
        let extra = columns.split_off(count);
        if let Some(last) = columns.last_mut() {
            for column in extra {
                last.items.push(column.title);
                last.items.extend(column.items);
                if let Some(body) = column.body {
                    last.body = Some(match last.body.take() {
                        Some(existing) => format!("{} {}", existing, body),
                        None => body,
                    });
                }
            }
        }
    }
    while columns.len() < count {
        columns.push(placeholder_column(columns.len()));
    }

    Some(ColumnSet { columns })
}

fn section_to_column(section: Section) -> Column {
    Column {
        title: section.header,
        items: section.items,
        body: (!section.body.is_empty()).then(|| section.body.join(" ")),
    }
}

fn extract_images(content: &str) -> Option<ImageGallery> {
    let images = image_refs(content);
    if images.is_empty() {
        return None;
    }
    let caption = body_paragraphs(content).into_iter().next();
    Some(ImageGallery { images, caption })
}

fn extract_quote(content: &str) -> Option<QuoteData> {
    if let Some(caps) = QUOTED_SPAN_REGEX.captures(content) {
        let whole = caps.get(0)?;
        let quote = caps[1].trim().to_string();

        let after = &content[whole.end()..];
        let same_line = after.lines().next().unwrap_or("");
        let author = attribution(same_line).or_else(|| {
            after
                .lines()
                .skip(1)
                .find(|line| !line.trim().is_empty())
                .and_then(attribution)
        });
        return Some(QuoteData { quote, author });
    }

    let mut quoted = Vec::new();
    let mut author = None;
    for line in content.lines() {
        match BLOCKQUOTE_LINE_REGEX.captures(line) {
            Some(caps) => quoted.push(caps[1].trim().to_string()),
            None if quoted.is_empty() => continue,
            None => {
                author = attribution(line);
                break;
            }
        }
    }
    if quoted.is_empty() {
        return None;
    }

    // An attribution inside the blockquote, as in "> - Author".
    if author.is_none() {
        if let Some(last) = quoted.last() {
            if let Some(name) = attribution(last) {
                author = Some(name);
                quoted.pop();
            }
        }
    }

    Some(QuoteData {
        quote: quoted.join(" "),
        author,
    })
}

fn attribution(line: &str) -> Option<String> {
    ATTRIBUTION_REGEX
        .captures(line)
        .map(|caps| clean_inline(&caps[1]))
        .filter(|name| !name.is_empty())
}

fn extract_timeline(content: &str) -> Option<TimelineData> {
    let mut events: Vec<TimelineEvent> = content
        .lines()
        .filter_map(|line| DATED_EVENT_REGEX.captures(line))
        .map(|caps| {
            let date = clean_inline(&caps[1]);
            let rest = clean_inline(&caps[2]);
            let (title, description) = split_title_description(&rest);
            TimelineEvent {
                title: if title.is_empty() { date.clone() } else { title },
                date,
                description,
            }
        })
        .collect();

    if events.is_empty() {
        let items = list_items(content);
        if items.len() >= 2 {
            events = items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    let (title, description) = split_title_description(&item);
                    TimelineEvent {
                        date: format!("Step {}", i + 1),
                        title,
                        description,
                    }
                })
                .collect();
        }
    }

    (!events.is_empty()).then_some(TimelineData { events })
}

fn split_title_description(text: &str) -> (String, Option<String>) {
    let split = text.split_once(" - ").or_else(|| text.split_once(": "));
    match split {
        Some((title, description)) if !title.trim().is_empty() => (
            title.trim().to_string(),
            Some(description.trim().to_string()).filter(|d| !d.is_empty()),
        ),
        _ => (text.trim().to_string(), None),
    }
}

fn extract_comparison(content: &str) -> Option<ComparisonTable> {
    let rows: Vec<Vec<String>> = content
        .lines()
        .filter(|line| PIPE_ROW_REGEX.is_match(line) && !PIPE_SEPARATOR_REGEX.is_match(line))
        .map(|line| {
            line.trim()
                .trim_matches('|')
                .split('|')
                .map(clean_inline)
                .collect()
        })
        .collect();

    if rows.len() >= 2 {
        let mut rows = rows.into_iter();
        let headers = rows.next()?;
        return Some(ComparisonTable {
            headers,
            rows: rows.collect(),
        });
    }

    // Side-by-side sections become one column each.
    let found = sections(content);
    if found.len() < 2 {
        return None;
    }
    let headers: Vec<String> = found.iter().map(|s| s.header.clone()).collect();
    let depth = found.iter().map(|s| s.items.len()).max().unwrap_or(0);
    let rows: Vec<Vec<String>> = if depth == 0 {
        vec![found.iter().map(|s| s.body.join(" ")).collect()]
    } else {
        (0..depth)
            .map(|i| {
                found
                    .iter()
                    .map(|s| s.items.get(i).cloned().unwrap_or_default())
                    .collect()
            })
            .collect()
    };
    Some(ComparisonTable { headers, rows })
}

fn extract_metrics(content: &str) -> Option<MetricsData> {
    let metrics: Vec<Metric> = content
        .lines()
        .filter_map(|line| {
            if let Some(caps) = LABEL_VALUE_REGEX.captures(line) {
                let value = clean_inline(&caps[2]);
                if value.chars().any(|c| c.is_ascii_digit()) {
                    return Some(metric(clean_inline(&caps[1]), value));
                }
            }
            VALUE_FIRST_REGEX
                .captures(line)
                .map(|caps| metric(clean_inline(&caps[2]), clean_inline(&caps[1])))
        })
        .collect();

    (!metrics.is_empty()).then_some(MetricsData { metrics })
}

/// A metric, with a trailing signed change such as "(+12%)" split off the value.
fn metric(label: String, value: String) -> Metric {
    if let Some(caps) = CHANGE_REGEX.captures(&value) {
        if let Some(whole) = caps.get(0) {
            let head = value[..whole.start()].trim();
            if !head.is_empty() {
                return Metric {
                    label,
                    value: head.to_string(),
                    change: Some(caps[1].trim().to_string()),
                };
            }
        }
    }
    Metric {
        label,
        value,
        change: None,
    }
}

fn extract_team(content: &str) -> Option<TeamRoster> {
    let members: Vec<TeamMember> = content
        .lines()
        .map(|line| clean_inline(&LIST_MARKER_REGEX.replace(line, "")))
        .filter_map(|line| {
            let caps = LEADING_NAME_REGEX.captures(&line)?;
            let role = caps
                .get(2)
                .map(|m| m.as_str().trim().trim_end_matches(')').trim().to_string())
                .filter(|r| !r.is_empty());
            Some(TeamMember {
                name: caps[1].to_string(),
                role,
            })
        })
        .collect();

    (!members.is_empty()).then_some(TeamRoster { members })
}

fn extract_persona(title: &str, content: &str) -> Option<PersonaData> {
    let mut persona = PersonaData::default();
    let mut summary = Vec::new();

    // Which list the current lines feed: goals, pain points or neither.
    let mut bucket: Option<bool> = None;

    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let header = section_header(line).map(str::to_string).or_else(|| {
            let trimmed = line.trim().trim_end_matches(':');
            (line.trim().ends_with(':') && !trimmed.is_empty()).then(|| trimmed.to_string())
        });
        if let Some(header) = header {
            bucket = if PAINS_REGEX.is_match(&header) {
                Some(false)
            } else if GOALS_REGEX.is_match(&header) {
                Some(true)
            } else {
                None
            };
            if bucket.is_some() {
                continue;
            }
        }

        if let Some(caps) = LABEL_VALUE_REGEX.captures(line) {
            let label = caps[1].trim();
            let value = clean_inline(&caps[2]);
            if NAME_LABEL_REGEX.is_match(label) {
                persona.name = value;
                continue;
            }
            if ROLE_LABEL_REGEX.is_match(label) {
                persona.role = value;
                continue;
            }
            if PAINS_REGEX.is_match(label) {
                persona.pain_points.extend(split_list(&value));
                continue;
            }
            if GOALS_REGEX.is_match(label) {
                persona.goals.extend(split_list(&value));
                continue;
            }
        }

        let is_item = is_bullet_line(line) || is_numbered_line(line);
        match bucket {
            Some(true) if is_item => persona.goals.push(strip_marker(line)),
            Some(false) if is_item => persona.pain_points.push(strip_marker(line)),
            _ if !is_item => summary.push(clean_inline(line)),
            _ => {}
        }
    }

    if persona.name.is_empty() {
        if let Some(caps) = LEADING_NAME_REGEX.captures(summary.first().map_or("", String::as_str)) {
            persona.name = caps[1].to_string();
        }
    }

    let found_any = !persona.name.is_empty()
        || !persona.goals.is_empty()
        || !persona.pain_points.is_empty();
    if !found_any {
        return None;
    }

    if persona.name.is_empty() {
        persona.name = if title.trim().is_empty() {
            "Persona".to_string()
        } else {
            title.trim().to_string()
        };
    }
    persona.summary = (!summary.is_empty()).then(|| summary.join(" "));
    Some(persona)
}

fn extract_swot(content: &str) -> Option<SwotData> {
    let mut swot = SwotData::default();

    for section in sections(content) {
        let items = if section.items.is_empty() {
            section.body
        } else {
            section.items
        };
        if let Some(bucket) = swot_bucket(&mut swot, &section.header) {
            bucket.extend(items);
        }
    }

    // "Strengths: a, b" lines outside bold sections.
    for line in content.lines().filter(|l| section_header(l).is_none()) {
        if let Some(caps) = LABEL_VALUE_REGEX.captures(line) {
            let label = caps[1].to_string();
            let values = split_list(&clean_inline(&caps[2]));
            if let Some(bucket) = swot_bucket(&mut swot, &label) {
                bucket.extend(values);
            }
        }
    }

    let buckets = [
        &mut swot.strengths,
        &mut swot.weaknesses,
        &mut swot.opportunities,
        &mut swot.threats,
    ];
    if buckets.iter().all(|b| b.is_empty()) {
        return None;
    }
    for bucket in buckets {
        if bucket.is_empty() {
            bucket.push("None identified".to_string());
        }
    }
    Some(swot)
}

fn swot_bucket<'a>(swot: &'a mut SwotData, label: &str) -> Option<&'a mut Vec<String>> {
    if STRENGTH_REGEX.is_match(label) {
        Some(&mut swot.strengths)
    } else if WEAKNESS_REGEX.is_match(label) {
        Some(&mut swot.weaknesses)
    } else if OPPORTUNITY_REGEX.is_match(label) {
        Some(&mut swot.opportunities)
    } else if THREAT_REGEX.is_match(label) {
        Some(&mut swot.threats)
    } else {
        None
    }
}

fn extract_accent(content: &str) -> Option<AccentData> {
    let heading = content.lines().find_map(section_header).map(str::to_string);
    let body: Vec<String> = body_paragraphs(content)
        .into_iter()
        .filter(|p| Some(p) != heading.as_ref())
        .collect();
    let bullets = list_items(content);
    if body.is_empty() && bullets.is_empty() {
        return None;
    }
    Some(AccentData {
        heading,
        body,
        bullets,
        image: image_refs(content).into_iter().next(),
    })
}

/// Schema-valid placeholder data for a template.
pub fn placeholder(template: TemplateId, title: &str) -> TemplateData {
    let title = strip_continuation_marker(title);
    let heading = if title.is_empty() {
        PLACEHOLDER_TEXT.to_string()
    } else {
        title
    };

    match template.schema() {
        SchemaKind::Title => TemplateData::Title(TitleData {
            title: heading,
            subtitle: None,
        }),
        SchemaKind::Content => TemplateData::Content(ContentData {
            heading: Some(heading),
            body: vec![PLACEHOLDER_TEXT.to_string()],
            ..ContentData::default()
        }),
        SchemaKind::BulletList => TemplateData::BulletList(BulletListData {
            bullets: (1..=3).map(|i| format!("Key point {}", i)).collect(),
        }),
        SchemaKind::Columns => TemplateData::Columns(ColumnSet {
            columns: (0..template.column_count().unwrap_or(2))
                .map(placeholder_column)
                .collect(),
        }),
        SchemaKind::Images => TemplateData::Images(ImageGallery {
            images: vec![ImageRef {
                url: PLACEHOLDER_IMAGE_URL.to_string(),
                alt: heading,
            }],
            caption: None,
        }),
        SchemaKind::Quote => TemplateData::Quote(QuoteData {
            quote: heading,
            author: None,
        }),
        SchemaKind::Timeline => TemplateData::Timeline(TimelineData {
            events: (1..=3)
                .map(|i| TimelineEvent {
                    date: format!("Step {}", i),
                    title: format!("Milestone {}", i),
                    description: None,
                })
                .collect(),
        }),
        SchemaKind::Comparison => TemplateData::Comparison(ComparisonTable {
            headers: vec![
                "Criterion".to_string(),
                "Option A".to_string(),
                "Option B".to_string(),
            ],
            rows: vec![vec!["Criterion 1".to_string(), "-".to_string(), "-".to_string()]],
        }),
        SchemaKind::Metrics => TemplateData::Metrics(MetricsData {
            metrics: (1..=3)
                .map(|i| Metric {
                    label: format!("Metric {}", i),
                    value: "-".to_string(),
                    change: None,
                })
                .collect(),
        }),
        SchemaKind::Team => TemplateData::Team(TeamRoster {
            members: vec![TeamMember {
                name: "Team member".to_string(),
                role: Some("Role".to_string()),
            }],
        }),
        SchemaKind::Persona => TemplateData::Persona(PersonaData {
            name: "Persona".to_string(),
            role: "Role".to_string(),
            summary: None,
            goals: vec!["Primary goal".to_string()],
            pain_points: vec!["Key frustration".to_string()],
        }),
        SchemaKind::Swot => TemplateData::Swot(SwotData {
            strengths: vec!["Strength".to_string()],
            weaknesses: vec!["Weakness".to_string()],
            opportunities: vec!["Opportunity".to_string()],
            threats: vec!["Threat".to_string()],
        }),
        SchemaKind::Chart => TemplateData::Chart(ChartData {
            chart_type: template.chart_kind().unwrap_or_default(),
            series: ChartSeries::new(vec![
                ChartPoint::new("Category A", 50),
                ChartPoint::new("Category B", 50),
            ]),
        }),
        SchemaKind::Accent => TemplateData::Accent(AccentData {
            heading: Some(heading),
            body: vec![PLACEHOLDER_TEXT.to_string()],
            ..AccentData::default()
        }),
    }
}

fn placeholder_column(index: usize) -> Column {
    Column {
        title: format!("Column {}", index + 1),
        items: vec![PLACEHOLDER_TEXT.to_string()],
        body: None,
    }
}

/// Bold-headed sections in order. Text before the first header is skipped.
fn sections(content: &str) -> Vec<Section> {
    let mut found: Vec<Section> = Vec::new();

    for line in content.lines() {
        if let Some(header) = section_header(line) {
            let mut section = Section {
                header: header.trim_end_matches(':').trim().to_string(),
                ..Section::default()
            };
            // Text after the bold span on the same line, as in "**Goal:** grow".
            let trailing = clean_inline(line.splitn(3, "**").nth(2).unwrap_or(""));
            let trailing = trailing.trim_start_matches(':').trim();
            if !trailing.is_empty() {
                section.body.push(trailing.to_string());
            }
            found.push(section);
            continue;
        }

        let Some(section) = found.last_mut() else {
            continue;
        };
        if is_bullet_line(line) || is_numbered_line(line) {
            section.items.push(strip_marker(line));
        } else {
            let text = clean_inline(line);
            if !text.is_empty() {
                section.body.push(text);
            }
        }
    }

    found
}

/// Bullet and numbered items with their markers removed.
fn list_items(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| is_bullet_line(line) || is_numbered_line(line))
        .map(strip_marker)
        .filter(|item| !item.is_empty())
        .collect()
}

/// Paragraph text outside lists, with image syntax removed.
fn body_paragraphs(content: &str) -> Vec<String> {
    paragraphs(content)
        .into_iter()
        .filter_map(|para| {
            let text = para
                .lines()
                .filter(|line| !is_bullet_line(line) && !is_numbered_line(line))
                .map(|line| clean_inline(&strip_images(line)))
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            (!text.is_empty()).then_some(text)
        })
        .collect()
}

fn image_refs(content: &str) -> Vec<ImageRef> {
    images(content)
        .into_iter()
        .map(|(alt, url)| ImageRef { url, alt })
        .collect()
}

fn strip_marker(line: &str) -> String {
    clean_inline(&LIST_MARKER_REGEX.replace(line, ""))
}

/// Drop inline emphasis and heading markers.
fn clean_inline(text: &str) -> String {
    text.trim()
        .trim_start_matches('#')
        .replace("**", "")
        .replace("__", "")
        .trim()
        .to_string()
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split([',', ';'])
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
