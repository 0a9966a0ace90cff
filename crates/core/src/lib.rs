//! Content classification, size fitting and template data extraction
//! for presentation slides.

pub mod analyze;
pub mod chart;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod pipeline;
pub mod recommend;
pub mod sanitize;
pub mod split;
pub mod store;
pub mod template;
pub mod types;

pub use analyze::analyze;
pub use chart::{parse_series, ChartKind, ChartPoint, ChartSeries};
pub use error::{Error, Result};
pub use extract::{extract_from, placeholder, TemplateExtractor};
pub use ingest::{slides_from_json, slides_from_json_str, slides_from_text};
pub use pipeline::{Pipeline, PipelineConfig};
pub use recommend::{recommend, Detector, RecommendContext, Recommender};
pub use sanitize::{sanitize, TextSanitizer, UNPROCESSABLE};
pub use split::{ContentSplitter, SplitBudget, SplitStrategy};
pub use store::ContentStore;
pub use template::{SchemaKind, TemplateData, TemplateFamily, TemplateId};
pub use types::{ContentStructure, DataShape, Slide, TemplateRecommendation};
