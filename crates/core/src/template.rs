//! The closed template vocabulary and the data schema each template renders.
//!
//! Every [`TemplateId`] maps to exactly one [`SchemaKind`], and every
//! [`TemplateData`] variant carries the struct for one schema, so a template
//! paired with the wrong payload is caught by [`TemplateData::fits`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::chart::{ChartKind, ChartSeries};
use crate::error::{Error, Result};

/// Layout identifier consumed by the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateId {
    Title,
    SectionHeader,
    Agenda,
    Content,
    BulletList,
    TwoColumn,
    ThreeColumn,
    FourColumn,
    ImageContent,
    FullImage,
    TwoImageColumns,
    ThreeImageColumns,
    ImageGallery,
    Quote,
    Timeline,
    ComparisonTable,
    MetricsDashboard,
    TeamPhoto,
    PersonaCard,
    SwotMatrix,
    PieChart,
    BarChart,
    LineChart,
    AreaChart,
    RadarChart,
    AccentLeft,
    AccentRight,
    AccentTop,
    ThankYou,
}

/// Groups of templates that render the same kind of material.
///
/// Continuation slides may move between templates of one family but never
/// leave it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateFamily {
    Title,
    Text,
    Columns,
    Images,
    Chart,
    Data,
    People,
    Quote,
    Swot,
}

impl TemplateFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateFamily::Title => "title",
            TemplateFamily::Text => "text",
            TemplateFamily::Columns => "columns",
            TemplateFamily::Images => "images",
            TemplateFamily::Chart => "chart",
            TemplateFamily::Data => "data",
            TemplateFamily::People => "people",
            TemplateFamily::Quote => "quote",
            TemplateFamily::Swot => "swot",
        }
    }
}

/// The structured payload shape a template expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaKind {
    Title,
    Content,
    BulletList,
    Columns,
    Images,
    Quote,
    Timeline,
    Comparison,
    Metrics,
    Team,
    Persona,
    Swot,
    Chart,
    Accent,
}

impl TemplateId {
    /// Every template, in declaration order.
    pub const ALL: [TemplateId; 29] = [
        TemplateId::Title,
        TemplateId::SectionHeader,
        TemplateId::Agenda,
        TemplateId::Content,
        TemplateId::BulletList,
        TemplateId::TwoColumn,
        TemplateId::ThreeColumn,
        TemplateId::FourColumn,
        TemplateId::ImageContent,
        TemplateId::FullImage,
        TemplateId::TwoImageColumns,
        TemplateId::ThreeImageColumns,
        TemplateId::ImageGallery,
        TemplateId::Quote,
        TemplateId::Timeline,
        TemplateId::ComparisonTable,
        TemplateId::MetricsDashboard,
        TemplateId::TeamPhoto,
        TemplateId::PersonaCard,
        TemplateId::SwotMatrix,
        TemplateId::PieChart,
        TemplateId::BarChart,
        TemplateId::LineChart,
        TemplateId::AreaChart,
        TemplateId::RadarChart,
        TemplateId::AccentLeft,
        TemplateId::AccentRight,
        TemplateId::AccentTop,
        TemplateId::ThankYou,
    ];

    /// Canonical kebab-case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Title => "title",
            TemplateId::SectionHeader => "section-header",
            TemplateId::Agenda => "agenda",
            TemplateId::Content => "content",
            TemplateId::BulletList => "bullet-list",
            TemplateId::TwoColumn => "two-column",
            TemplateId::ThreeColumn => "three-column",
            TemplateId::FourColumn => "four-column",
            TemplateId::ImageContent => "image-content",
            TemplateId::FullImage => "full-image",
            TemplateId::TwoImageColumns => "two-image-columns",
            TemplateId::ThreeImageColumns => "three-image-columns",
            TemplateId::ImageGallery => "image-gallery",
            TemplateId::Quote => "quote",
            TemplateId::Timeline => "timeline",
            TemplateId::ComparisonTable => "comparison-table",
            TemplateId::MetricsDashboard => "metrics-dashboard",
            TemplateId::TeamPhoto => "team-photo",
            TemplateId::PersonaCard => "persona-card",
            TemplateId::SwotMatrix => "swot-matrix",
            TemplateId::PieChart => "pie-chart",
            TemplateId::BarChart => "bar-chart",
            TemplateId::LineChart => "line-chart",
            TemplateId::AreaChart => "area-chart",
            TemplateId::RadarChart => "radar-chart",
            TemplateId::AccentLeft => "accent-left",
            TemplateId::AccentRight => "accent-right",
            TemplateId::AccentTop => "accent-top",
            TemplateId::ThankYou => "thank-you",
        }
    }

    /// The schema this template renders.
    pub fn schema(&self) -> SchemaKind {
        match self {
            TemplateId::Title | TemplateId::SectionHeader | TemplateId::ThankYou => {
                SchemaKind::Title
            }
            TemplateId::Content => SchemaKind::Content,
            TemplateId::Agenda | TemplateId::BulletList => SchemaKind::BulletList,
            TemplateId::TwoColumn | TemplateId::ThreeColumn | TemplateId::FourColumn => {
                SchemaKind::Columns
            }
            TemplateId::ImageContent
            | TemplateId::FullImage
            | TemplateId::TwoImageColumns
            | TemplateId::ThreeImageColumns
            | TemplateId::ImageGallery => SchemaKind::Images,
            TemplateId::Quote => SchemaKind::Quote,
            TemplateId::Timeline => SchemaKind::Timeline,
            TemplateId::ComparisonTable => SchemaKind::Comparison,
            TemplateId::MetricsDashboard => SchemaKind::Metrics,
            TemplateId::TeamPhoto => SchemaKind::Team,
            TemplateId::PersonaCard => SchemaKind::Persona,
            TemplateId::SwotMatrix => SchemaKind::Swot,
            TemplateId::PieChart
            | TemplateId::BarChart
            | TemplateId::LineChart
            | TemplateId::AreaChart
            | TemplateId::RadarChart => SchemaKind::Chart,
            TemplateId::AccentLeft | TemplateId::AccentRight | TemplateId::AccentTop => {
                SchemaKind::Accent
            }
        }
    }

    /// The family used for continuation inheritance.
    pub fn family(&self) -> TemplateFamily {
        match self.schema() {
            SchemaKind::Title => TemplateFamily::Title,
            SchemaKind::Content | SchemaKind::BulletList | SchemaKind::Accent => {
                TemplateFamily::Text
            }
            SchemaKind::Columns => TemplateFamily::Columns,
            SchemaKind::Images => TemplateFamily::Images,
            SchemaKind::Chart => TemplateFamily::Chart,
            SchemaKind::Timeline | SchemaKind::Comparison | SchemaKind::Metrics => {
                TemplateFamily::Data
            }
            SchemaKind::Team | SchemaKind::Persona => TemplateFamily::People,
            SchemaKind::Quote => TemplateFamily::Quote,
            SchemaKind::Swot => TemplateFamily::Swot,
        }
    }

    /// Chart flavour for chart templates.
    pub fn chart_kind(&self) -> Option<ChartKind> {
        match self {
            TemplateId::PieChart => Some(ChartKind::Pie),
            TemplateId::BarChart => Some(ChartKind::Bar),
            TemplateId::LineChart => Some(ChartKind::Line),
            TemplateId::AreaChart => Some(ChartKind::Area),
            TemplateId::RadarChart => Some(ChartKind::Radar),
            _ => None,
        }
    }

    /// Number of columns a column layout renders.
    pub fn column_count(&self) -> Option<usize> {
        match self {
            TemplateId::TwoColumn => Some(2),
            TemplateId::ThreeColumn => Some(3),
            TemplateId::FourColumn => Some(4),
            _ => None,
        }
    }

    /// Column layout for a section count, clamped to the 2..=4 range.
    pub fn for_columns(count: usize) -> TemplateId {
        match count {
            0..=2 => TemplateId::TwoColumn,
            3 => TemplateId::ThreeColumn,
            _ => TemplateId::FourColumn,
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = Error;

    /// Parse a template name, tolerating case, separators and common aliases.
    fn from_str(s: &str) -> Result<Self> {
        let key = to_kebab(s);

        if let Some(id) = TemplateId::ALL.iter().find(|t| t.as_str() == key) {
            return Ok(*id);
        }

        let id = match key.as_str() {
            "bullets" | "bullet" | "list" | "bullet-points" => TemplateId::BulletList,
            "text" | "default" | "body" => TemplateId::Content,
            "two-columns" | "2-column" | "columns" => TemplateId::TwoColumn,
            "three-columns" | "3-column" => TemplateId::ThreeColumn,
            "four-columns" | "4-column" => TemplateId::FourColumn,
            "image" | "image-left" | "image-right" => TemplateId::ImageContent,
            "gallery" | "images" => TemplateId::ImageGallery,
            "pie" => TemplateId::PieChart,
            "bar" | "chart" => TemplateId::BarChart,
            "line" => TemplateId::LineChart,
            "area" => TemplateId::AreaChart,
            "radar" => TemplateId::RadarChart,
            "comparison" | "table" => TemplateId::ComparisonTable,
            "metrics" | "dashboard" | "kpi" => TemplateId::MetricsDashboard,
            "team" => TemplateId::TeamPhoto,
            "persona" => TemplateId::PersonaCard,
            "swot" => TemplateId::SwotMatrix,
            "section" => TemplateId::SectionHeader,
            "accent" => TemplateId::AccentLeft,
            "closing" | "thanks" => TemplateId::ThankYou,
            _ => return Err(Error::InvalidInput(format!("Unknown template: {}", s))),
        };
        Ok(id)
    }
}

/// Lowercase kebab-case form of an identifier written in any common casing.
fn to_kebab(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;
    for c in s.trim().chars() {
        if c == '_' || c == ' ' || c == '-' {
            if !out.ends_with('-') && !out.is_empty() {
                out.push('-');
            }
            prev_lower = false;
        } else if c.is_uppercase() {
            if prev_lower && !out.ends_with('-') {
                out.push('-');
            }
            out.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    out.trim_end_matches('-').to_string()
}

/// Structured payload attached to a slide once its template is chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "schema", rename_all = "kebab-case")]
pub enum TemplateData {
    Title(TitleData),
    Content(ContentData),
    BulletList(BulletListData),
    Columns(ColumnSet),
    Images(ImageGallery),
    Quote(QuoteData),
    Timeline(TimelineData),
    Comparison(ComparisonTable),
    Metrics(MetricsData),
    Team(TeamRoster),
    Persona(PersonaData),
    Swot(SwotData),
    Chart(ChartData),
    Accent(AccentData),
}

impl TemplateData {
    /// The schema this payload satisfies.
    pub fn schema(&self) -> SchemaKind {
        match self {
            TemplateData::Title(_) => SchemaKind::Title,
            TemplateData::Content(_) => SchemaKind::Content,
            TemplateData::BulletList(_) => SchemaKind::BulletList,
            TemplateData::Columns(_) => SchemaKind::Columns,
            TemplateData::Images(_) => SchemaKind::Images,
            TemplateData::Quote(_) => SchemaKind::Quote,
            TemplateData::Timeline(_) => SchemaKind::Timeline,
            TemplateData::Comparison(_) => SchemaKind::Comparison,
            TemplateData::Metrics(_) => SchemaKind::Metrics,
            TemplateData::Team(_) => SchemaKind::Team,
            TemplateData::Persona(_) => SchemaKind::Persona,
            TemplateData::Swot(_) => SchemaKind::Swot,
            TemplateData::Chart(_) => SchemaKind::Chart,
            TemplateData::Accent(_) => SchemaKind::Accent,
        }
    }

    /// Whether the payload carries nothing renderable.
    pub fn is_empty(&self) -> bool {
        match self {
            TemplateData::Title(d) => d.title.trim().is_empty(),
            TemplateData::Content(d) => {
                d.body.is_empty() && d.bullets.is_empty() && d.images.is_empty()
            }
            TemplateData::BulletList(d) => d.bullets.is_empty(),
            TemplateData::Columns(d) => d.columns.is_empty(),
            TemplateData::Images(d) => d.images.is_empty(),
            TemplateData::Quote(d) => d.quote.trim().is_empty(),
            TemplateData::Timeline(d) => d.events.is_empty(),
            TemplateData::Comparison(d) => d.rows.is_empty(),
            TemplateData::Metrics(d) => d.metrics.is_empty(),
            TemplateData::Team(d) => d.members.is_empty(),
            TemplateData::Persona(d) => d.name.trim().is_empty(),
            TemplateData::Swot(d) => {
                d.strengths.is_empty()
                    && d.weaknesses.is_empty()
                    && d.opportunities.is_empty()
                    && d.threats.is_empty()
            }
            TemplateData::Chart(d) => d.series.len() < 2,
            TemplateData::Accent(d) => d.body.is_empty() && d.bullets.is_empty(),
        }
    }

    /// Whether this payload is a non-empty instance of the template's schema.
    pub fn fits(&self, template: TemplateId) -> bool {
        self.schema() == template.schema() && !self.is_empty()
    }

    /// Decode an upstream payload for a schema, accepting aliased field names.
    ///
    /// A bare JSON array is accepted for the list-shaped schemas. Returns
    /// `None` when the value does not decode or decodes to an empty payload.
    pub fn from_value(schema: SchemaKind, value: &serde_json::Value) -> Option<TemplateData> {
        let value = match value {
            serde_json::Value::Array(items) => wrap_array(schema, items)?,
            other => other.clone(),
        };

        let data = match schema {
            SchemaKind::Title => serde_json::from_value(value).map(TemplateData::Title),
            SchemaKind::Content => serde_json::from_value(value).map(TemplateData::Content),
            SchemaKind::BulletList => serde_json::from_value(value).map(TemplateData::BulletList),
            SchemaKind::Columns => serde_json::from_value(value).map(TemplateData::Columns),
            SchemaKind::Images => serde_json::from_value(value).map(TemplateData::Images),
            SchemaKind::Quote => serde_json::from_value(value).map(TemplateData::Quote),
            SchemaKind::Timeline => serde_json::from_value(value).map(TemplateData::Timeline),
            SchemaKind::Comparison => serde_json::from_value(value).map(TemplateData::Comparison),
            SchemaKind::Metrics => serde_json::from_value(value).map(TemplateData::Metrics),
            SchemaKind::Team => serde_json::from_value(value).map(TemplateData::Team),
            SchemaKind::Persona => serde_json::from_value(value).map(TemplateData::Persona),
            SchemaKind::Swot => serde_json::from_value(value).map(TemplateData::Swot),
            SchemaKind::Chart => serde_json::from_value(value).map(TemplateData::Chart),
            SchemaKind::Accent => serde_json::from_value(value).map(TemplateData::Accent),
        };

        match data {
            Ok(data) if !data.is_empty() => Some(data),
            Ok(_) => None,
            Err(e) => {
                log::debug!("Upstream {:?} data ignored: {}", schema, e);
                None
            }
        }
    }
}

fn wrap_array(schema: SchemaKind, items: &[serde_json::Value]) -> Option<serde_json::Value> {
    let key = match schema {
        SchemaKind::BulletList | SchemaKind::Content => "bullets",
        SchemaKind::Columns => "columns",
        SchemaKind::Images => "images",
        SchemaKind::Timeline => "events",
        SchemaKind::Comparison => "rows",
        SchemaKind::Metrics => "metrics",
        SchemaKind::Team => "members",
        SchemaKind::Chart => "series",
        _ => return None,
    };
    let mut map = serde_json::Map::new();
    map.insert(key.to_string(), serde_json::Value::Array(items.to_vec()));
    Some(serde_json::Value::Object(map))
}

/// Title, section header and closing slides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleData {
    #[serde(alias = "heading")]
    pub title: String,
    #[serde(alias = "tagline", skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

/// The default schema: free paragraphs plus any bullets and images.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(alias = "paragraphs", alias = "text")]
    pub body: Vec<String>,
    #[serde(alias = "items", alias = "points")]
    pub bullets: Vec<String>,
    pub images: Vec<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletListData {
    #[serde(alias = "items", alias = "points", alias = "list", alias = "bulletPoints")]
    pub bullets: Vec<String>,
}

/// One column of a multi-column layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Column {
    #[serde(alias = "heading", alias = "header")]
    pub title: String,
    #[serde(alias = "bullets", alias = "points")]
    pub items: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSet {
    #[serde(alias = "sections")]
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageRef {
    #[serde(alias = "src", alias = "href")]
    pub url: String,
    #[serde(alias = "caption", alias = "description")]
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageGallery {
    #[serde(alias = "photos", alias = "gallery")]
    pub images: Vec<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteData {
    #[serde(alias = "text")]
    pub quote: String,
    #[serde(alias = "source", alias = "attribution", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineEvent {
    #[serde(alias = "when", alias = "period")]
    pub date: String,
    #[serde(alias = "label", alias = "name")]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineData {
    #[serde(alias = "milestones", alias = "entries", alias = "items")]
    pub events: Vec<TimelineEvent>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonTable {
    #[serde(alias = "columns")]
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Metric {
    #[serde(alias = "name")]
    pub label: String,
    pub value: String,
    #[serde(alias = "delta", alias = "trend", skip_serializing_if = "Option::is_none")]
    pub change: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsData {
    #[serde(alias = "kpis", alias = "stats", alias = "items")]
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    pub name: String,
    #[serde(alias = "title", alias = "position", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamRoster {
    #[serde(alias = "people", alias = "team", alias = "items")]
    pub members: Vec<TeamMember>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonaData {
    pub name: String,
    #[serde(alias = "occupation", alias = "title")]
    pub role: String,
    #[serde(alias = "bio", alias = "description", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(alias = "motivations")]
    pub goals: Vec<String>,
    #[serde(alias = "frustrations", alias = "pain_points")]
    pub pain_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SwotData {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartData {
    #[serde(alias = "type", alias = "chart_type")]
    pub chart_type: ChartKind,
    #[serde(alias = "data", alias = "points")]
    pub series: ChartSeries,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccentData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(alias = "paragraphs", alias = "text")]
    pub body: Vec<String>,
    #[serde(alias = "items", alias = "points")]
    pub bullets: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_template_round_trips_its_name() {
        for id in TemplateId::ALL {
            assert_eq!(id.as_str().parse::<TemplateId>().unwrap(), id);
        }
    }

    #[test]
    fn test_parse_tolerates_casing_and_aliases() {
        assert_eq!("BulletList".parse::<TemplateId>().unwrap(), TemplateId::BulletList);
        assert_eq!("bullet_list".parse::<TemplateId>().unwrap(), TemplateId::BulletList);
        assert_eq!("Two Column".parse::<TemplateId>().unwrap(), TemplateId::TwoColumn);
        assert_eq!("pie".parse::<TemplateId>().unwrap(), TemplateId::PieChart);
        assert_eq!("swot".parse::<TemplateId>().unwrap(), TemplateId::SwotMatrix);
        assert!("hologram".parse::<TemplateId>().is_err());
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&TemplateId::ThreeImageColumns).unwrap();
        assert_eq!(json, "\"three-image-columns\"");
    }

    #[test]
    fn test_families() {
        assert_eq!(TemplateId::BulletList.family(), TemplateFamily::Text);
        assert_eq!(TemplateId::AccentTop.family(), TemplateFamily::Text);
        assert_eq!(TemplateId::FourColumn.family(), TemplateFamily::Columns);
        assert_eq!(TemplateId::PieChart.family(), TemplateFamily::Chart);
        assert_eq!(TemplateId::ThankYou.family(), TemplateFamily::Title);
    }

    #[test]
    fn test_for_columns() {
        assert_eq!(TemplateId::for_columns(2), TemplateId::TwoColumn);
        assert_eq!(TemplateId::for_columns(3), TemplateId::ThreeColumn);
        assert_eq!(TemplateId::for_columns(7), TemplateId::FourColumn);
    }

    #[test]
    fn test_fits_checks_schema_and_emptiness() {
        let data = TemplateData::BulletList(BulletListData {
            bullets: vec!["One".to_string()],
        });
        assert!(data.fits(TemplateId::BulletList));
        assert!(data.fits(TemplateId::Agenda));
        assert!(!data.fits(TemplateId::Content));

        let empty = TemplateData::BulletList(BulletListData::default());
        assert!(!empty.fits(TemplateId::BulletList));
    }

    #[test]
    fn test_from_value_accepts_aliases() {
        let data =
            TemplateData::from_value(SchemaKind::BulletList, &json!({"items": ["A", "B"]})).unwrap();
        assert_eq!(
            data,
            TemplateData::BulletList(BulletListData {
                bullets: vec!["A".to_string(), "B".to_string()]
            })
        );

        let data = TemplateData::from_value(
            SchemaKind::Columns,
            &json!({"sections": [{"heading": "Left", "bullets": ["x"]}]}),
        )
        .unwrap();
        match data {
            TemplateData::Columns(set) => {
                assert_eq!(set.columns[0].title, "Left");
                assert_eq!(set.columns[0].items, vec!["x"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_from_value_accepts_bare_arrays() {
        let data = TemplateData::from_value(SchemaKind::BulletList, &json!(["A"])).unwrap();
        assert!(data.fits(TemplateId::BulletList));
        assert!(TemplateData::from_value(SchemaKind::Quote, &json!(["A"])).is_none());
    }

    #[test]
    fn test_from_value_rejects_empty_payloads() {
        assert!(TemplateData::from_value(SchemaKind::BulletList, &json!({"items": []})).is_none());
        assert!(TemplateData::from_value(SchemaKind::Metrics, &json!("nope")).is_none());
    }

    #[test]
    fn test_template_data_is_tagged_by_schema() {
        let data = TemplateData::Quote(QuoteData {
            quote: "Less is more".to_string(),
            author: Some("Mies".to_string()),
        });
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["schema"], "quote");
        assert_eq!(value["quote"], "Less is more");
    }
}
