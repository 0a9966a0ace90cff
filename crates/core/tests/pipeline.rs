//! End-to-end tests running slide candidates through the whole pipeline.

use slidefit_core::{
    analyze, parse_series, slides_from_json_str, ChartKind, ContentSplitter, Pipeline,
    PipelineConfig, Recommender, Slide, TemplateData, TemplateExtractor, TemplateFamily,
    TemplateId,
};

const SWOT: &str =
    "**Strengths**\n- Strong IP\n- Loyal customers\n\n**Weaknesses**\n- Slow onboarding";

const MARKETING_MIX: &str = "Product: 40%\nPrice: 25%\nPlace: 20%\nPromotion: 15%";

fn pipeline() -> Pipeline {
    Pipeline::with_config(PipelineConfig::new().with_title_first_slide(false)).unwrap()
}

#[test]
fn test_partial_swot_end_to_end() {
    let slide = Slide::new("swot", "Where we stand", SWOT);

    assert!(!ContentSplitter::new().needs_split(&slide));

    let structure = analyze(SWOT);
    assert_eq!(structure.sections, 2);
    assert_eq!(structure.bullet_points, 3);

    let recommendation = Recommender::new().recommend(&structure, &slide.title, SWOT);
    assert_eq!(recommendation.template.family(), TemplateFamily::Columns);
    assert!(recommendation.reason.contains("strengths"));
    assert!(recommendation.reason.contains("weaknesses"));

    let slides = pipeline().process(vec![slide]);
    assert_eq!(slides.len(), 1);
    assert_eq!(slides[0].template, Some(TemplateId::TwoColumn));

    let Some(TemplateData::Columns(set)) = &slides[0].template_data else {
        panic!("expected columns, got {:?}", slides[0].template_data);
    };
    assert_eq!(set.columns[0].title, "Strengths");
    assert_eq!(set.columns[0].items, vec!["Strong IP", "Loyal customers"]);
    assert_eq!(set.columns[1].title, "Weaknesses");
    assert_eq!(set.columns[1].items, vec!["Slow onboarding"]);
}

#[test]
fn test_pie_chart_end_to_end() {
    let series = parse_series(MARKETING_MIX).unwrap();
    assert_eq!(series.len(), 4);

    let slides = pipeline().process(vec![Slide::new("mix", "Marketing Mix", MARKETING_MIX)]);
    let slide = &slides[0];

    assert_eq!(slide.template, Some(TemplateId::PieChart));
    assert!(slide.recommendation.as_ref().unwrap().confidence >= 0.8);

    let Some(TemplateData::Chart(chart)) = &slide.template_data else {
        panic!("expected chart data, got {:?}", slide.template_data);
    };
    assert_eq!(chart.chart_type, ChartKind::Pie);
    assert_eq!(chart.series.values(), vec![40, 25, 20, 15]);
    assert_eq!(chart.series.names(), vec!["Product", "Price", "Place", "Promotion"]);

    // Content stays intact for consumers that re-parse it.
    assert_eq!(slide.content, MARKETING_MIX);
}

#[test]
fn test_chart_slide_is_never_split() {
    let padding = "This sentence pads the slide well past every budget. ".repeat(40);
    let content = format!("{}\n\n{}", MARKETING_MIX, padding);
    let slides = pipeline().process(vec![Slide::new("mix", "Marketing Mix", content)]);

    assert_eq!(slides.len(), 1);
    assert_eq!(slides[0].template, Some(TemplateId::PieChart));
}

#[test]
fn test_continuation_keeps_predecessor_layout() {
    let bullets = "- Churn fell\n- Margins grew\n- Costs held\n- Hiring slowed";
    let slides = pipeline().process(vec![
        Slide::new("a", "Findings", bullets).with_order(1.0),
        Slide::new("b", "Findings (continued)", bullets).with_order(2.0),
    ]);

    assert_eq!(slides[0].template, Some(TemplateId::BulletList));
    assert_eq!(slides[1].template, Some(TemplateId::BulletList));
    let second = slides[1].recommendation.as_ref().unwrap();
    assert!(second.confidence >= slides[0].recommendation.as_ref().unwrap().confidence);
}

#[test]
fn test_continuation_without_chart_data_falls_back_to_content() {
    let slides = pipeline().process(vec![
        Slide::new("a", "Marketing Mix", MARKETING_MIX).with_order(1.0),
        Slide::new("b", "Marketing Mix (continued)", "Promotion spend moves online next year.")
            .with_order(2.0),
    ]);

    let recommendation = slides[1].recommendation.as_ref().unwrap();
    assert_eq!(recommendation.template, TemplateId::PieChart);
    assert_eq!(slides[1].template, Some(TemplateId::Content));
    assert!(matches!(slides[1].template_data, Some(TemplateData::Content(_))));
}

#[test]
fn test_corrupted_content_degrades_to_default() {
    let slides = pipeline().process(vec![Slide::new("bad", "Notes", "abc\u{0001}\u{0002}def")]);

    assert_eq!(slides[0].template, Some(TemplateId::Content));
    let recommendation = slides[0].recommendation.as_ref().unwrap();
    assert!(recommendation.confidence > 0.0);
    assert!(slides[0]
        .template_data
        .as_ref()
        .is_some_and(|data| !data.is_empty()));
}

#[test]
fn test_oversized_sections_split_into_ordered_fragments() {
    let section = |name: &str| {
        format!(
            "**{}**\n{}",
            name,
            (1..=5).map(|i| format!("- {} point {}", name, i)).collect::<Vec<_>>().join("\n")
        )
    };
    let content = ["Plan", "Build", "Launch", "Measure"]
        .iter()
        .map(|name| section(name))
        .collect::<Vec<_>>()
        .join("\n\n");

    let slides = pipeline().process(vec![
        Slide::new("big", "Roadmap", content).with_order(5.0),
        Slide::new("next", "Next Steps", "Ship it").with_order(6.0),
    ]);

    let fragments: Vec<&Slide> = slides.iter().filter(|s| s.id.starts_with("big")).collect();
    assert!(fragments.len() > 1);
    assert_eq!(fragments[0].title, "Roadmap");
    for fragment in &fragments[1..] {
        assert!(fragment.title.ends_with("(continued)"));
    }
    for pair in slides.windows(2) {
        assert!(pair[0].order < pair[1].order);
    }
    assert!(fragments.iter().all(|s| s.order < 6.0));
    assert_eq!(slides.last().unwrap().id, "next");
}

#[test]
fn test_every_slide_is_renderable() {
    let json = r#"{
        "slides": [
            {"id": "1", "title": "Acme 2025", "content": "Annual plan"},
            {"id": "2", "title": "Our Team", "content": "- Jane Doe, CEO\n- John Smith, CTO\n- Ada Lovelace, Research"},
            {"id": "3", "title": "Milestones", "content": "- 2023: Founded\n- 2024: Seed round\n- 2025: Launch"},
            {"id": "4", "title": "Gallery", "content": "![a](https://x.io/a.png) ![b](https://x.io/b.png) ![c](https://x.io/c.png) ![d](https://x.io/d.png)"},
            {"id": "5", "title": "Voice of the customer", "content": "\"It changed how we work\" - Dana, Ops lead"}
        ]
    }"#;
    let candidates = slides_from_json_str(json).unwrap();
    let slides = Pipeline::new().process(candidates);

    assert_eq!(slides.len(), 5);
    for slide in &slides {
        let template = slide.template.unwrap();
        let data = slide.template_data.as_ref().unwrap();
        assert!(data.fits(template), "{} does not fit {:?}", template, data);
        assert!(!data.is_empty());
    }
    assert_eq!(slides[0].template, Some(TemplateId::Title));
}

#[test]
fn test_extractor_never_returns_empty_data() {
    let extractor = TemplateExtractor::new();
    let slide = Slide::new("x", "Empty", "");
    for template in TemplateId::ALL {
        let data = extractor.extract(template, &slide);
        assert!(data.fits(template));
        assert!(!data.is_empty());
    }
}
