//! Ingestion of slide candidates from upstream JSON and free text.
//!
//! Upstream producers are loose about field names, so every slide field is
//! looked up under a list of aliases. The first alias present wins.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::template::{TemplateData, TemplateId};
use crate::types::Slide;

const ID_KEYS: &[&str] = &["id", "slideId", "slide_id", "uuid"];
const TITLE_KEYS: &[&str] = &["title", "heading", "header", "name"];
const CONTENT_KEYS: &[&str] = &["content", "body", "text", "markdown", "description"];
const BULLET_KEYS: &[&str] = &["bullets", "items", "points"];
const ORDER_KEYS: &[&str] = &["order", "position", "index"];
const TYPE_KEYS: &[&str] = &["type", "kind", "slideType", "slide_type"];
const TEMPLATE_KEYS: &[&str] = &["template", "layout"];
const DATA_KEYS: &[&str] = &["templateData", "template_data", "data"];

/// Keys only a slide candidate carries. "name" and the content keys are
/// common in business records too, so they do not count.
const SLIDE_SHAPE_KEYS: &[&str] = &[
    "id", "slideId", "slide_id", "uuid", "title", "heading", "order", "position", "template",
    "layout", "templateData", "template_data",
];

/// Parse slide candidates from JSON text.
pub fn slides_from_json_str(text: &str) -> Result<Vec<Slide>> {
    let value: Value = serde_json::from_str(text)?;
    slides_from_json(&value)
}

/// Read slide candidates from a JSON value.
///
/// Accepts an array of slides, an object with a `slides` array, a single
/// slide object, or an arbitrary business record. A record becomes one slide
/// per top-level key.
pub fn slides_from_json(value: &Value) -> Result<Vec<Slide>> {
    let slides = match value {
        Value::Array(items) => slides_from_array(items)?,
        Value::Object(map) => match map.get("slides") {
            Some(Value::Array(items)) => slides_from_array(items)?,
            _ if is_slide_object(map) => vec![slide_from_object(map, 0)?],
            _ => slides_from_record(map),
        },
        _ => {
            return Err(Error::InvalidInput(
                "expected an array of slides or an object".to_string(),
            ))
        }
    };

    if slides.is_empty() {
        return Err(Error::InvalidInput("no slide candidates found".to_string()));
    }
    log::debug!("Ingested {} slide candidates from JSON", slides.len());
    Ok(slides)
}

/// Whether a bare object is one slide candidate rather than a record.
///
/// It needs content, a slide-only key, and no nested values under keys a
/// slide does not know, since those would be lost.
fn is_slide_object(map: &Map<String, Value>) -> bool {
    if first_present(map, CONTENT_KEYS).is_none() {
        return false;
    }
    if !SLIDE_SHAPE_KEYS.iter().any(|key| map.contains_key(*key)) {
        return false;
    }

    let known = [
        ID_KEYS, TITLE_KEYS, CONTENT_KEYS, BULLET_KEYS, ORDER_KEYS, TYPE_KEYS, TEMPLATE_KEYS,
        DATA_KEYS,
    ];
    map.iter().all(|(key, value)| {
        !(value.is_object() || value.is_array())
            || known.iter().any(|keys| keys.contains(&key.as_str()))
    })
}

fn slides_from_array(items: &[Value]) -> Result<Vec<Slide>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => slide_from_object(map, index),
            Value::String(text) if !text.trim().is_empty() => {
                Ok(Slide::new(default_id(index), "", text.as_str()).with_order(index as f64))
            }
            _ => Err(Error::InvalidInput(format!(
                "slide {} is neither an object nor text",
                index + 1
            ))),
        })
        .collect()
}

/// Build a slide from an object, resolving field aliases.
fn slide_from_object(map: &Map<String, Value>, index: usize) -> Result<Slide> {
    let id = first_present(map, ID_KEYS)
        .and_then(scalar_string)
        .unwrap_or_else(|| default_id(index));

    let title = first_present(map, TITLE_KEYS)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string();

    let mut content = first_present(map, CONTENT_KEYS)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string();

    if let Some(Value::Array(items)) = first_present(map, BULLET_KEYS) {
        let bullets: Vec<String> = items
            .iter()
            .filter_map(scalar_string)
            .map(|item| format!("- {}", item))
            .collect();
        if !bullets.is_empty() {
            if !content.is_empty() {
                content.push_str("\n\n");
            }
            content.push_str(&bullets.join("\n"));
        }
    }

    if content.is_empty() {
        return Err(Error::InvalidInput(format!("slide '{}' has no content", id)));
    }

    let order = first_present(map, ORDER_KEYS)
        .and_then(|v| v.as_f64().or_else(|| v.as_str()?.trim().parse().ok()))
        .unwrap_or(index as f64);

    let mut slide = Slide::new(id, title, content).with_order(order);

    if let Some(kind) = first_present(map, TYPE_KEYS).and_then(Value::as_str) {
        slide.slide_type = kind.to_string();
    }

    slide.template = first_present(map, TEMPLATE_KEYS)
        .and_then(Value::as_str)
        .and_then(|name| match name.parse::<TemplateId>() {
            Ok(template) => Some(template),
            Err(e) => {
                log::warn!("Slide '{}': {}, template will be recommended", slide.id, e);
                None
            }
        });

    slide.template_data = first_present(map, DATA_KEYS).and_then(|value| match slide.template {
        Some(template) => TemplateData::from_value(template.schema(), value),
        None => match serde_json::from_value::<TemplateData>(value.clone()) {
            Ok(data) => Some(data),
            Err(e) => {
                log::warn!(
                    "Slide '{}': template data has no usable schema tag and no template ({}), ignoring it",
                    slide.id,
                    e
                );
                None
            }
        },
    });

    Ok(slide)
}

/// One slide per top-level key of a business record.
fn slides_from_record(map: &Map<String, Value>) -> Vec<Slide> {
    map.iter()
        .filter_map(|(key, value)| {
            let content = render_value(value);
            if content.trim().is_empty() {
                return None;
            }
            Some((humanize(key), content))
        })
        .enumerate()
        .map(|(index, (title, content))| {
            Slide::new(default_id(index), title, content).with_order(index as f64)
        })
        .collect()
}

/// Render a JSON value as slide markdown: nested objects become bold
/// sections, arrays become bullets, scalars become `Key: value` lines.
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(fields) => format!("- {}", inline_object(fields)),
                other => format!("- {}", scalar_string(other).unwrap_or_default()),
            })
            .filter(|line| line.len() > 2)
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(fields) => {
            let mut lines = Vec::new();
            let mut blocks = Vec::new();
            for (key, field) in fields {
                match field {
                    Value::Object(_) | Value::Array(_) => {
                        let body = render_value(field);
                        if !body.is_empty() {
                            blocks.push(format!("**{}**\n{}", humanize(key), body));
                        }
                    }
                    other => {
                        if let Some(text) = scalar_string(other) {
                            lines.push(format!("{}: {}", humanize(key), text));
                        }
                    }
                }
            }
            let head = lines.join("\n");
            std::iter::once(head)
                .chain(blocks)
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join("\n\n")
        }
        other => scalar_string(other).unwrap_or_default(),
    }
}

fn inline_object(fields: &Map<String, Value>) -> String {
    fields
        .iter()
        .filter_map(|(key, value)| Some(format!("{}: {}", humanize(key), scalar_string(value)?)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Split free text into slide candidates.
///
/// Slides are separated by `---` lines; within a block every top-level
/// `# ` heading starts a new slide and becomes its title.
pub fn slides_from_text(text: &str) -> Result<Vec<Slide>> {
    let text = text.replace("\r\n", "\n");
    let blocks = split_on_rules(&text);
    let mut chunks: Vec<(String, Vec<&str>)> = Vec::new();

    for block in &blocks {
        let mut current: Option<(String, Vec<&str>)> = None;
        for line in block.lines() {
            if let Some(heading) = line.strip_prefix("# ") {
                chunks.extend(current.take());
                current = Some((heading.trim().to_string(), Vec::new()));
            } else {
                current
                    .get_or_insert_with(|| (String::new(), Vec::new()))
                    .1
                    .push(line);
            }
        }
        chunks.extend(current);
    }

    let slides: Vec<Slide> = chunks
        .into_iter()
        .filter_map(|(title, lines)| {
            let content = lines.join("\n").trim().to_string();
            match (title.is_empty(), content.is_empty()) {
                (true, true) => None,
                // A heading on its own is a title slide; it still needs content.
                (false, true) => Some((title.clone(), title)),
                _ => Some((title, content)),
            }
        })
        .enumerate()
        .map(|(index, (title, content))| {
            Slide::new(default_id(index), title, content).with_order(index as f64)
        })
        .collect();

    if slides.is_empty() {
        return Err(Error::InvalidInput("text contains no slide content".to_string()));
    }
    log::debug!("Ingested {} slide candidates from text", slides.len());
    Ok(slides)
}

fn split_on_rules(text: &str) -> Vec<String> {
    let mut blocks = vec![String::new()];
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-') {
            blocks.push(String::new());
            continue;
        }
        if let Some(block) = blocks.last_mut() {
            block.push_str(line);
            block.push('\n');
        }
    }
    blocks
}

fn first_present<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|value| !value.is_null())
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn default_id(index: usize) -> String {
    format!("slide-{}", index + 1)
}

/// "market_share" and "marketShare" both become "Market Share".
fn humanize(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in key.chars() {
        if c == '_' || c == '-' || c == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
