use std::sync::OnceLock;

use regex::Regex;

/// What a single line turned out to be. Text is raw (not yet inline-rendered)
/// and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    Blank,
    Heading { level: u8, text: &'a str },
    ListItem { text: &'a str },
    Paragraph { text: &'a str },
}

fn heading_regex() -> &'static Regex {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    HEADING.get_or_init(|| Regex::new(r"^(#{1,6})\s+(.*)$").expect("Invalid heading regex"))
}

fn list_item_regex() -> &'static Regex {
    static LIST_ITEM: OnceLock<Regex> = OnceLock::new();
    LIST_ITEM.get_or_init(|| Regex::new(r"^[-*]\s+(.*)$").expect("Invalid list item regex"))
}

/// Classifies one line, line terminator already removed.
///
/// Checked in order, first match wins: blank, heading, list item, paragraph.
/// Leading whitespace is ignored for marker matching, so simple indentation
/// before `#`, `-` or `*` is tolerated.
pub fn classify_line(line: &str) -> LineClass<'_> {
    let view = line.trim_start();
    if view.trim_end().is_empty() {
        return LineClass::Blank;
    }

    if let Some(caps) = heading_regex().captures(view)
        && let (Some(hashes), Some(text)) = (caps.get(1), caps.get(2))
    {
        return LineClass::Heading {
            // at most six ASCII `#`
            level: hashes.len() as u8,
            text: text.as_str().trim(),
        };
    }

    if let Some(text) = list_item_regex().captures(view).and_then(|caps| caps.get(1)) {
        return LineClass::ListItem {
            text: text.as_str().trim(),
        };
    }

    LineClass::Paragraph { text: view.trim() }
}
