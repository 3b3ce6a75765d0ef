//! Lightweight formatting for reply text.
//!
//! Supported subset, nothing else:
//! - `**bold**` spans (an unmatched `**` stays literal)
//! - bullet lines starting with `- ` or `* `
//! - line breaks; an empty line becomes [`Block::Blank`]
//!
//! The output is structured data, not a markup string. Text is carried as
//! plain runs, so whatever the backend sends can never turn into tags.

/// A run of text with uniform styling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), bold: false }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self { text: text.into(), bold: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Line(Vec<Span>),
    Bullet(Vec<Span>),
    Blank,
}

pub fn parse_markup(text: &str) -> Vec<Block> {
    text.lines().map(parse_line).collect()
}

fn parse_line(line: &str) -> Block {
    if line.trim().is_empty() {
        return Block::Blank;
    }
    let trimmed = line.trim_start();
    match trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        Some(item) => Block::Bullet(parse_spans(item)),
        None => Block::Line(parse_spans(line)),
    }
}

fn parse_spans(line: &str) -> Vec<Span> {
    let mut parts: Vec<String> = line.split("**").map(str::to_string).collect();

    // An even part count means an odd number of markers: the last one is unmatched.
    if parts.len() % 2 == 0 {
        if let Some(tail) = parts.pop() {
            if let Some(last) = parts.last_mut() {
                last.push_str("**");
                last.push_str(&tail);
            }
        }
    }

    parts
        .into_iter()
        .enumerate()
        .filter(|(_, text)| !text.is_empty())
        .map(|(i, text)| Span { text, bold: i % 2 == 1 })
        .collect()
}
