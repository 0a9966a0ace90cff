//! The slide pipeline: sanitize, analyze, recommend, split, extract.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::analyze::analyze;
use crate::error::Result;
use crate::extract::TemplateExtractor;
use crate::recommend::{RecommendContext, Recommender};
use crate::sanitize::{is_unusable, TextSanitizer};
use crate::split::{ContentSplitter, SplitBudget};
use crate::store::ContentStore;
use crate::template::TemplateId;
use crate::types::{ContentStructure, Slide, TemplateRecommendation};

/// Options controlling the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    /// Size limits for a single slide.
    pub budget: SplitBudget,
    /// Split slides that exceed the budget.
    pub split_oversized: bool,
    /// Give the first slide of the deck the title layout.
    pub title_first_slide: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            budget: SplitBudget::default(),
            split_oversized: true,
            title_first_slide: true,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budget(mut self, budget: SplitBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_split_oversized(mut self, split: bool) -> Self {
        self.split_oversized = split;
        self
    }

    pub fn with_title_first_slide(mut self, title: bool) -> Self {
        self.title_first_slide = title;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.budget.validate()
    }
}

/// Runs slide candidates through every stage and returns renderable slides.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    sanitizer: TextSanitizer,
    recommender: Recommender,
    splitter: ContentSplitter,
    extractor: TemplateExtractor,
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline with a validated configuration.
    pub fn with_config(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            splitter: ContentSplitter::new().with_budget(config.budget),
            config,
            ..Self::default()
        })
    }

    /// Use a custom recommender, e.g. one with reordered detectors.
    pub fn with_recommender(mut self, recommender: Recommender) -> Self {
        self.recommender = recommender;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn splitter(&self) -> &ContentSplitter {
        &self.splitter
    }

    /// Process a deck.
    ///
    /// Candidates are sorted by `order`. Every returned slide carries a
    /// template, data fitting that template and the recommendation behind it.
    /// `content` is passed through untouched. Split fragments are ordered
    /// strictly between their slide and the next candidate.
    pub fn process(&self, mut slides: Vec<Slide>) -> Vec<Slide> {
        slides.sort_by(|a, b| a.order.partial_cmp(&b.order).unwrap_or(Ordering::Equal));
        let next_orders: Vec<Option<f64>> = (0..slides.len())
            .map(|i| slides.get(i + 1).map(|next| next.order))
            .collect();

        let mut output = Vec::with_capacity(slides.len());
        let mut predecessor: Option<TemplateId> = None;

        for (index, slide) in slides.into_iter().enumerate() {
            let context = RecommendContext {
                is_first: index == 0 && self.config.title_first_slide,
                predecessor,
            };
            let recommendation = self.recommend(&slide, context);

            let fragments = if self.config.split_oversized {
                let gap = next_orders[index].map_or(1.0, |next| next - slide.order);
                self.splitter.split_within(&slide, gap)
            } else {
                vec![slide]
            };

            if fragments.len() == 1 {
                for fragment in fragments {
                    let finished = self.finish(fragment, recommendation.clone());
                    predecessor = finished.template;
                    output.push(finished);
                }
                continue;
            }

            for (part, fragment) in fragments.into_iter().enumerate() {
                let context = if part == 0 {
                    context
                } else {
                    RecommendContext {
                        is_first: false,
                        predecessor,
                    }
                };
                let recommendation = self.recommend(&fragment, context);
                let finished = self.finish(fragment, recommendation);
                predecessor = finished.template;
                output.push(finished);
            }
        }

        output
    }

    /// Recommend a template for one slide, honouring an upstream choice.
    pub fn recommend(&self, slide: &Slide, context: RecommendContext) -> TemplateRecommendation {
        if let Some(template) = slide.template {
            log::debug!("Slide '{}' keeps upstream template {}", slide.id, template);
            return TemplateRecommendation::new(template, 1.0, "Template chosen upstream");
        }

        let content = self.sanitizer.sanitize(&slide.content);
        let structure = if is_unusable(&content) {
            ContentStructure::empty()
        } else {
            analyze(&content)
        };

        self.recommender
            .recommend_in_context(&structure, &slide.title, &content, context)
    }

    /// Attach the final template and its data.
    fn finish(&self, mut slide: Slide, recommendation: TemplateRecommendation) -> Slide {
        let (template, data) = self.extractor.assign(recommendation.template, &slide);
        if template != recommendation.template {
            log::debug!(
                "Slide '{}' rendered as {} instead of {}",
                slide.id,
                template,
                recommendation.template
            );
        }
        slide.template = Some(template);
        slide.template_data = Some(data);
        slide.recommendation = Some(recommendation);
        slide
    }

    /// Switch a processed slide to another template.
    ///
    /// The content the slide had before its first switch is kept in `store`,
    /// and every switch re-extracts from that original rather than from the
    /// data of the previous template.
    pub fn switch_template(&self, slide: &mut Slide, template: TemplateId, store: &mut ContentStore) {
        store.preserve(&slide.id, &slide.content);
        if let Some(original) = store.restore(&slide.id) {
            slide.content = original.to_string();
        }

        slide.template_data = None;
        let data = self.extractor.extract(template, slide);
        log::debug!("Slide '{}' switched to {}", slide.id, template);

        slide.template = Some(template);
        slide.template_data = Some(data);
        slide.recommendation = Some(TemplateRecommendation::new(
            template,
            1.0,
            "Template chosen by the author",
        ));
    }

    /// Replace a slide's content and re-extract data for its template.
    ///
    /// The edit becomes the new original, so the preserved entry is cleared.
    pub fn edit_content(&self, slide: &mut Slide, content: impl Into<String>, store: &mut ContentStore) {
        slide.content = content.into();
        store.clear(&slide.id);

        slide.template_data = None;
        if let Some(template) = slide.template {
            slide.template_data = Some(self.extractor.extract(template, slide));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateData;

    fn deck() -> Vec<Slide> {
        vec![
            Slide::new("s2", "Marketing Mix", "Product: 40%\nPrice: 25%\nPlace: 20%\nPromotion: 15%")
                .with_order(2.0),
            Slide::new("s1", "Quarterly Review", "Results for the third quarter").with_order(1.0),
        ]
    }

    #[test]
    fn test_process_sorts_and_titles_first_slide() {
        let slides = Pipeline::new().process(deck());

        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].id, "s1");
        assert_eq!(slides[0].template, Some(TemplateId::Title));
        assert_eq!(slides[1].template, Some(TemplateId::PieChart));
        assert!(slides.iter().all(|s| s.recommendation.is_some()));
    }

    #[test]
    fn test_process_keeps_content() {
        let input = deck();
        let slides = Pipeline::new().process(input.clone());
        assert_eq!(slides[1].content, input[0].content);
    }

    #[test]
    fn test_title_first_slide_disabled() {
        let config = PipelineConfig::new().with_title_first_slide(false);
        let slides = Pipeline::with_config(config).unwrap().process(deck());
        assert_ne!(slides[0].template, Some(TemplateId::Title));
    }

    #[test]
    fn test_split_fragments_follow_predecessor() {
        let bullets: Vec<String> = (1..=14).map(|i| format!("- Point number {}", i)).collect();
        let slide = Slide::new("s1", "Findings", bullets.join("\n")).with_order(3.0);
        let config = PipelineConfig::new().with_title_first_slide(false);

        let slides = Pipeline::with_config(config).unwrap().process(vec![slide]);

        assert!(slides.len() > 1);
        assert_eq!(slides[1].id, "s1-part2");
        assert!(slides[1].title.ends_with("(continued)"));
        assert_eq!(slides[0].template, slides[1].template);
        for pair in slides.windows(2) {
            assert!(pair[0].order < pair[1].order);
        }
    }

    #[test]
    fn test_fragments_fit_between_close_orders() {
        let bullets: Vec<String> = (1..=40).map(|i| format!("- Point number {}", i)).collect();
        let config = PipelineConfig::new()
            .with_title_first_slide(false)
            .with_budget(SplitBudget::new().with_max_bullets(1));
        let slides = Pipeline::with_config(config).unwrap().process(vec![
            Slide::new("a", "Findings", bullets.join("\n")).with_order(1.0),
            Slide::new("b", "Next", "Wrap up").with_order(1.01),
        ]);

        assert_eq!(slides.len(), 41);
        assert_eq!(slides.last().unwrap().id, "b");
        for pair in slides.windows(2) {
            assert!(pair[0].order < pair[1].order);
        }
    }

    #[test]
    fn test_no_split_config() {
        let bullets: Vec<String> = (1..=14).map(|i| format!("- Point number {}", i)).collect();
        let slide = Slide::new("s1", "Findings", bullets.join("\n"));
        let config = PipelineConfig::new().with_split_oversized(false);

        let slides = Pipeline::with_config(config).unwrap().process(vec![slide]);
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn test_upstream_template_is_kept() {
        let mut slide = Slide::new("s1", "Notes", "- One\n- Two");
        slide.template = Some(TemplateId::BulletList);

        let slides = Pipeline::new().process(vec![slide]);
        assert_eq!(slides[0].template, Some(TemplateId::BulletList));
        assert_eq!(slides[0].recommendation.as_ref().unwrap().confidence, 1.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PipelineConfig {
            budget: SplitBudget {
                max_words: 0,
                ..SplitBudget::default()
            },
            ..PipelineConfig::default()
        };
        assert!(Pipeline::with_config(config).is_err());
    }

    #[test]
    fn test_config_from_json() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"budget": {"maxWords": 80}, "splitOversized": false}"#).unwrap();
        assert_eq!(config.budget.max_words, 80);
        assert_eq!(config.budget.max_bullets, 6);
        assert!(!config.split_oversized);
        assert!(config.title_first_slide);
    }

    #[test]
    fn test_switch_template_reextracts_from_original() {
        let pipeline = Pipeline::new();
        let mut store = ContentStore::new();
        let mut slide = Slide::new("s1", "Plan", "- Research\n- Build\n- Launch");

        pipeline.switch_template(&mut slide, TemplateId::BulletList, &mut store);
        assert!(store.contains("s1"));
        match &slide.template_data {
            Some(TemplateData::BulletList(data)) => assert_eq!(data.bullets.len(), 3),
            other => panic!("unexpected data: {:?}", other),
        }

        pipeline.switch_template(&mut slide, TemplateId::Content, &mut store);
        pipeline.switch_template(&mut slide, TemplateId::BulletList, &mut store);
        match &slide.template_data {
            Some(TemplateData::BulletList(data)) => {
                assert_eq!(data.bullets, vec!["Research", "Build", "Launch"])
            }
            other => panic!("unexpected data: {:?}", other),
        }
        assert_eq!(slide.template, Some(TemplateId::BulletList));
    }

    #[test]
    fn test_edit_content_clears_store() {
        let pipeline = Pipeline::new();
        let mut store = ContentStore::new();
        let mut slide = Slide::new("s1", "Plan", "- Research\n- Build");

        pipeline.switch_template(&mut slide, TemplateId::BulletList, &mut store);
        pipeline.edit_content(&mut slide, "- Ship\n- Measure\n- Learn", &mut store);

        assert!(!store.contains("s1"));
        match &slide.template_data {
            Some(TemplateData::BulletList(data)) => {
                assert_eq!(data.bullets, vec!["Ship", "Measure", "Learn"])
            }
            other => panic!("unexpected data: {:?}", other),
        }
    }
}
