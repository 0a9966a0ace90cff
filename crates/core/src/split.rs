//! Size-fitting: splitting oversized slides into continuation fragments.
//!
//! Splitting works on the raw slide content. Every strategy is a pure
//! function from text to a list of chunks; chunks that still exceed the
//! budget are handed to the next, finer strategy.

use serde::{Deserialize, Serialize};

use crate::analyze::{
    count_bullets, count_paragraphs, count_sections, count_words, is_bullet_line, paragraphs,
    section_header,
};
use crate::chart::parse_series;
use crate::error::{Error, Result};
use crate::sanitize::{is_unusable, TextSanitizer};
use crate::types::{Slide, CONTINUED_SUFFIX};

/// Fractional order offset between consecutive fragments of one slide.
pub const ORDER_STEP: f64 = 0.001;

/// Fragments this short or shorter are merged into a neighbour.
const TRIVIAL_FRAGMENT_CHARS: usize = 10;

/// Per-slide size limits. A slide exceeding any one of them is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SplitBudget {
    pub max_words: usize,
    pub max_chars: usize,
    pub max_bullets: usize,
    pub max_sections: usize,
}

impl Default for SplitBudget {
    fn default() -> Self {
        Self {
            max_words: 150,
            max_chars: 900,
            max_bullets: 6,
            max_sections: 3,
        }
    }
}

impl SplitBudget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_words(mut self, words: usize) -> Self {
        self.max_words = words.max(1);
        self
    }

    pub fn with_max_chars(mut self, chars: usize) -> Self {
        self.max_chars = chars.max(1);
        self
    }

    pub fn with_max_bullets(mut self, bullets: usize) -> Self {
        self.max_bullets = bullets.max(1);
        self
    }

    pub fn with_max_sections(mut self, sections: usize) -> Self {
        self.max_sections = sections.max(1);
        self
    }

    /// Reject budgets that no content could satisfy.
    pub fn validate(&self) -> Result<()> {
        let limits = [
            ("maxWords", self.max_words),
            ("maxChars", self.max_chars),
            ("maxBullets", self.max_bullets),
            ("maxSections", self.max_sections),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{} must be at least 1", name)));
            }
        }
        Ok(())
    }

    /// Whether text is within all four limits.
    pub fn fits(&self, text: &str) -> bool {
        self.fits_size(text)
            && count_bullets(text) <= self.max_bullets
            && count_sections(text) <= self.max_sections
    }

    /// Whether text is within the word and character limits.
    fn fits_size(&self, text: &str) -> bool {
        count_words(text) <= self.max_words && text.chars().count() <= self.max_chars
    }
}

/// How an oversized slide is cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStrategy {
    BySection,
    ByBullet,
    ByParagraph,
    ByCharacter,
}

/// Splits slides that exceed a [`SplitBudget`].
#[derive(Debug, Clone, Default)]
pub struct ContentSplitter {
    budget: SplitBudget,
    sanitizer: TextSanitizer,
}

impl ContentSplitter {
    /// Create a splitter with the default budget.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budget(mut self, budget: SplitBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn budget(&self) -> &SplitBudget {
        &self.budget
    }

    /// Whether the slide exceeds the budget.
    ///
    /// The budget is measured on sanitized content, the same text the
    /// recommender analyzes, while cutting works on the raw content so no
    /// author text is rewritten. Slides carrying a chart series and slides
    /// with no usable content are never split.
    pub fn needs_split(&self, slide: &Slide) -> bool {
        if parse_series(&slide.content).is_some() {
            return false;
        }
        let content = self.sanitizer.sanitize(&slide.content);
        !is_unusable(&content) && !self.budget.fits(&content)
    }

    /// Pick the strategy for a piece of content. Evaluated once per slide.
    pub fn choose_strategy(&self, content: &str) -> SplitStrategy {
        if count_sections(content) > 1 {
            SplitStrategy::BySection
        } else if count_bullets(content) > self.budget.max_bullets {
            SplitStrategy::ByBullet
        } else if count_paragraphs(content) > 1 {
            SplitStrategy::ByParagraph
        } else {
            SplitStrategy::ByCharacter
        }
    }

    /// Split a slide into fragments.
    ///
    /// Never returns an empty list. A slide that fits, or that cannot be cut
    /// into at least two non-trivial fragments, is returned unchanged.
    pub fn split(&self, slide: &Slide) -> Vec<Slide> {
        self.split_within(slide, 1.0)
    }

    /// Split a slide whose successor in the deck sits `gap` after it.
    ///
    /// Fragment orders step by [`ORDER_STEP`], shrunk when needed so every
    /// fragment stays strictly before `slide.order + gap`.
    pub fn split_within(&self, slide: &Slide, gap: f64) -> Vec<Slide> {
        if !self.needs_split(slide) {
            return vec![slide.clone()];
        }

        let strategy = self.choose_strategy(&slide.content);
        let chunks: Vec<String> = self
            .split_with(&slide.content, strategy)
            .into_iter()
            .filter(|chunk| !chunk.trim().is_empty())
            .collect();

        if chunks.len() < 2 {
            log::warn!(
                "Slide '{}' exceeds the budget but could not be split {:?}; keeping it whole",
                slide.id,
                strategy
            );
            return vec![slide.clone()];
        }

        log::debug!(
            "Split slide '{}' {:?} into {} fragments",
            slide.id,
            strategy,
            chunks.len()
        );

        let step = order_step(chunks.len(), gap);
        chunks
            .into_iter()
            .enumerate()
            .map(|(index, content)| fragment(slide, index, content, step))
            .collect()
    }

    fn split_with(&self, text: &str, strategy: SplitStrategy) -> Vec<String> {
        match strategy {
            SplitStrategy::BySection => self.split_by_section(text),
            SplitStrategy::ByBullet => self.split_by_bullet(text),
            SplitStrategy::ByParagraph => self.split_by_paragraph(text),
            SplitStrategy::ByCharacter => self.split_by_character(text),
        }
    }

    /// Keep text that fits, otherwise split it with a freshly chosen strategy.
    fn fit(&self, text: &str) -> Vec<String> {
        if self.budget.fits(text) {
            return vec![text.trim().to_string()];
        }
        self.split_with(text, self.choose_strategy(text))
    }

    /// Greedily group whole sections. Text before the first header travels
    /// with the first section.
    fn split_by_section(&self, text: &str) -> Vec<String> {
        let starts = section_starts(text);
        if starts.len() <= 1 {
            return self.split_by_bullet(text);
        }

        let mut chunks = Vec::new();
        let mut current = String::new();

        for (i, &start) in starts.iter().enumerate() {
            let start = if i == 0 { 0 } else { start };
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            let block = text[start..end].trim();
            if block.is_empty() {
                continue;
            }

            if current.is_empty() {
                current = block.to_string();
                continue;
            }

            let candidate = format!("{}\n\n{}", current, block);
            if self.budget.fits(&candidate) {
                current = candidate;
            } else {
                chunks.extend(self.fit(&current));
                current = block.to_string();
            }
        }

        if !current.is_empty() {
            chunks.extend(self.fit(&current));
        }
        chunks
    }

    /// Chunk lines by bullet count, repeating each section header on every
    /// chunk cut from its section.
    fn split_by_bullet(&self, text: &str) -> Vec<String> {
        let starts = section_starts(text);
        let mut bounds = Vec::with_capacity(starts.len() + 1);
        if starts.first() != Some(&0) {
            bounds.push(0);
        }
        bounds.extend(starts);

        let mut chunks = Vec::new();
        for (i, &start) in bounds.iter().enumerate() {
            let end = bounds.get(i + 1).copied().unwrap_or(text.len());
            let block = text[start..end].trim();
            if block.is_empty() {
                continue;
            }

            let (header, body) = match block.split_once('\n') {
                Some((first, rest)) if section_header(first).is_some() => (Some(first.trim()), rest),
                None if section_header(block).is_some() => (Some(block), ""),
                _ => (None, block),
            };
            chunks.extend(self.chunk_lines(header, body));
        }
        chunks
    }

    fn chunk_lines(&self, header: Option<&str>, body: &str) -> Vec<String> {
        let lines: Vec<&str> = body
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .collect();

        if lines.is_empty() {
            return header.map(|h| vec![h.to_string()]).unwrap_or_default();
        }

        let mut chunks = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for line in lines {
            current.push(line);
            if current.len() == 1 {
                continue;
            }
            let bullets = current.iter().filter(|l| is_bullet_line(l)).count();
            if bullets > self.budget.max_bullets || !self.budget.fits(&with_header(header, &current)) {
                current.pop();
                chunks.extend(self.finish_lines(header, &current));
                current = vec![line];
            }
        }
        chunks.extend(self.finish_lines(header, &current));
        chunks
    }

    fn finish_lines(&self, header: Option<&str>, lines: &[&str]) -> Vec<String> {
        let text = with_header(header, lines);
        if lines.len() != 1 || self.budget.fits(&text) {
            return vec![text];
        }
        // A single line too large for a slide of its own.
        self.split_by_character(lines[0])
            .into_iter()
            .map(|piece| with_header(header, &[piece.as_str()]))
            .collect()
    }

    /// Accumulate whole paragraphs under the budget.
    fn split_by_paragraph(&self, text: &str) -> Vec<String> {
        let paras = paragraphs(text);
        if paras.len() <= 1 {
            return self.split_by_sentence(text.trim());
        }
        self.pack(&paras, "\n\n", |p| self.split_by_sentence(p))
    }

    fn split_by_sentence(&self, text: &str) -> Vec<String> {
        let sentences = sentence_slices(text);
        if sentences.len() <= 1 {
            return self.split_by_words(text);
        }
        self.pack(&sentences, "", |s| self.split_by_words(s))
    }

    fn split_by_words(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_inclusive(char::is_whitespace).collect();
        self.pack(&words, "", |w| self.hard_cut(w))
    }

    fn hard_cut(&self, text: &str) -> Vec<String> {
        // Last resort for a single token longer than a slide: cut on chars.
        let chars: Vec<char> = text.trim().chars().collect();
        chars
            .chunks(self.budget.max_chars)
            .map(|chunk| chunk.iter().collect())
            .collect()
    }

    /// Greedily join pieces while the result fits. A piece that does not fit
    /// even on its own goes to `oversized`.
    fn pack<'a>(
        &self,
        pieces: &[&'a str],
        sep: &str,
        oversized: impl Fn(&'a str) -> Vec<String>,
    ) -> Vec<String> {
        let mut groups: Vec<Vec<&'a str>> = Vec::new();
        let mut current: Vec<&'a str> = Vec::new();

        for &piece in pieces {
            current.push(piece);
            // A group always keeps its first piece, so every group is non-empty.
            if current.len() > 1 && !self.budget.fits(&current.join(sep)) {
                current.pop();
                groups.push(std::mem::take(&mut current));
                current.push(piece);
            }
        }
        if !current.is_empty() {
            groups.push(current);
        }

        groups
            .into_iter()
            .flat_map(|group| {
                let text = group.join(sep);
                if group.len() == 1 && !self.budget.fits(&text) {
                    oversized(group[0])
                } else {
                    vec![text.trim().to_string()]
                }
            })
            .filter(|chunk| !chunk.is_empty())
            .collect()
    }

    /// Cut raw text at snapped boundaries until every piece fits the word
    /// and character limits.
    fn split_by_character(&self, text: &str) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut rest = text.trim();

        // Bullet and section counts are ignored here; only size matters.
        while !self.budget.fits_size(rest) {
            // snap never returns 0 for non-blank text, so `rest` shrinks.
            let cut = self.snap(rest, self.ideal_cut(rest));
            let (head, tail) = rest.split_at(cut);
            pieces.push(head.trim().to_string());
            rest = tail.trim_start();
        }
        if !rest.is_empty() {
            pieces.push(rest.to_string());
        }

        merge_trivial(pieces)
    }

    /// Byte offset where the word or character limit is reached, whichever comes first.
    fn ideal_cut(&self, text: &str) -> usize {
        let by_chars = text
            .char_indices()
            .nth(self.budget.max_chars)
            .map_or(text.len(), |(i, _)| i);
        by_chars.min(word_boundary(text, self.budget.max_words))
    }

    /// Move a cut backward to the best nearby boundary: paragraph break,
    /// sentence end, line break, then space. Falls back to the cut itself.
    fn snap(&self, text: &str, target: usize) -> usize {
        // Search at most a quarter slide back from the ideal cut.
        let window = (self.budget.max_chars / 4).max(1);
        let mut lower = target.saturating_sub(window);
        while !text.is_char_boundary(lower) {
            lower += 1;
        }
        let region = &text[lower..target];

        [
            region.rfind("\n\n").map(|p| p + 2),
            last_sentence_end(region),
            region.rfind('\n').map(|p| p + 1),
            region.rfind(' ').map(|p| p + 1),
        ]
        .into_iter()
        .flatten()
        .map(|p| lower + p)
        // A cut must leave text in the head.
        .find(|&cut| !text[..cut].trim().is_empty())
        .unwrap_or(target)
    }
}

/// Order offset between fragments so that `count` of them fit inside `gap`.
fn order_step(count: usize, gap: f64) -> f64 {
    let gap = if gap.is_finite() && gap > 0.0 { gap } else { 1.0 };
    ORDER_STEP.min(gap / (count as f64 + 1.0))
}

/// Build the `index`th fragment of a split slide.
fn fragment(slide: &Slide, index: usize, content: String, step: f64) -> Slide {
    let mut part = slide.clone();
    part.content = content;
    part.order = slide.order + index as f64 * step;
    part.template_data = None;
    part.recommendation = None;
    if index > 0 {
        part.id = format!("{}-part{}", slide.id, index + 1);
        part.title = format!("{}{}", slide.base_title(), CONTINUED_SUFFIX);
    }
    part
}

/// Byte offsets of lines that open a bold section.
fn section_starts(text: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if section_header(line).is_some() {
            starts.push(offset);
        }
        offset += line.len();
    }
    starts
}

fn with_header(header: Option<&str>, lines: &[&str]) -> String {
    header
        .into_iter()
        .chain(lines.iter().copied())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Slices ending after a sentence terminator or newline, trailing whitespace included.
fn sentence_slices(text: &str) -> Vec<&str> {
    let mut slices = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let terminator = matches!(c, '.' | '!' | '?')
            && chars.peek().is_some_and(|&(_, next)| next.is_whitespace());
        if c != '\n' && !terminator {
            continue;
        }
        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if !next.is_whitespace() {
                break;
            }
            end = j + next.len_utf8();
            chars.next();
        }
        slices.push(&text[start..end]);
        start = end;
    }
    if start < text.len() {
        slices.push(&text[start..]);
    }
    slices
}

/// Byte offset just after the `n`th word, or the text length.
fn word_boundary(text: &str, n: usize) -> usize {
    let mut words = 0;
    let mut in_word = false;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if in_word && words == n {
                return i;
            }
            in_word = false;
        } else if !in_word {
            in_word = true;
            words += 1;
        }
    }
    text.len()
}

/// Offset just past the last `.`, `!` or `?` followed by whitespace.
fn last_sentence_end(region: &str) -> Option<usize> {
    region
        .char_indices()
        .zip(region.chars().skip(1))
        .filter(|((_, c), next)| matches!(c, '.' | '!' | '?') && next.is_whitespace())
        .map(|((i, _), _)| i + 1)
        .last()
}

fn merge_trivial(pieces: Vec<String>) -> Vec<String> {
    let is_trivial = |s: &str| s.chars().count() <= TRIVIAL_FRAGMENT_CHARS;

    let mut merged: Vec<String> = Vec::new();
    for piece in pieces {
        if piece.trim().is_empty() {
            continue;
        }
        if is_trivial(&piece) {
            if let Some(last) = merged.last_mut() {
                last.push(' ');
                last.push_str(&piece);
                continue;
            }
        }
        merged.push(piece);
    }

    if merged.len() > 1 && is_trivial(&merged[0]) {
        let first = merged.remove(0);
        merged[0] = format!("{} {}", first, merged[0]);
    }
    merged
}
