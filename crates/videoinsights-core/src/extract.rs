//! Turns a model's free-text answer into a [`VideoInsight`].
//!
//! Every field is resolved on its own by walking an ordered list of tiers and
//! keeping the first one that produces something. The first tier is always a
//! labeled-section scan ("Title:", "3. Detailed Description", "**Tags:**", ...);
//! later tiers fall back to positional guesses or whole-text pattern scans for
//! answers that ignore the requested layout. Extraction never fails: the worst
//! case is empty strings, no tags and the default chapter list.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::types::{Chapter, VideoInsight};

pub const MAX_TAGS: usize = 8;

/// A named extraction strategy; `None` hands over to the next tier
type Tier<T> = (&'static str, fn(&str) -> Option<T>);

const TITLE_TIERS: &[Tier<String>] = &[("label", labeled_title), ("first-line", first_line_title)];
const SUMMARY_TIERS: &[Tier<String>] = &[("label", labeled_summary), ("lines-2-5", positional_summary)];
const DESCRIPTION_TIERS: &[Tier<String>] = &[
    ("label", labeled_description),
    ("lines-6-10", positional_description),
];
const TAG_TIERS: &[Tier<Vec<String>>] = &[("label", labeled_tags), ("hashtag-scan", scanned_hashtags)];
const CHAPTER_TIERS: &[Tier<Vec<Chapter>>] = &[
    ("label", labeled_chapters),
    ("timestamp-scan", scanned_chapters),
];

/// Extract a structured record from raw model output
pub fn extract(raw: &str) -> VideoInsight {
    let text = raw.replace("\r\n", "\n");

    VideoInsight {
        title: resolve("title", &text, TITLE_TIERS).unwrap_or_default(),
        summary: resolve("summary", &text, SUMMARY_TIERS).unwrap_or_default(),
        description: resolve("description", &text, DESCRIPTION_TIERS).unwrap_or_default(),
        tags: resolve("tags", &text, TAG_TIERS).unwrap_or_default(),
        chapters: resolve("chapters", &text, CHAPTER_TIERS).unwrap_or_else(default_chapters),
    }
}

/// Chapters used when the answer contains no usable timestamps
pub fn default_chapters() -> Vec<Chapter> {
    vec![
        Chapter::new("00:00", "Introduction"),
        Chapter::new("05:00", "Main Content"),
        Chapter::new("10:00", "Additional Information"),
        Chapter::new("15:00", "Key Points"),
        Chapter::new("20:00", "Conclusion"),
    ]
}

fn resolve<T>(field: &'static str, text: &str, tiers: &[Tier<T>]) -> Option<T> {
    for (name, tier) in tiers {
        if let Some(value) = tier(text) {
            debug!(field, tier = *name, "field resolved");
            return Some(value);
        }
    }
    debug!(field, "no tier matched");
    None
}

// ---------------------------------------------------------------------------
// Labeled sections
// ---------------------------------------------------------------------------

/// Where a labeled section stops: a numbered line, a `Word:` line, a markdown
/// heading or a blank line. `2. 05:00 - ...` is a numbered chapter, not a new
/// section.
static SECTION_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\n\s*\d+\.[ \t]*(?:[^\d\s]|\n|$)|\n\s*#{1,6}\s|\n\s*[*_]*[A-Za-z]+(?:[ \t][A-Za-z]+){0,2}[*_]*:|\n[ \t]*\n",
    )
    .expect("section boundary pattern")
});

/// Rest of a header line after the label word, e.g. " and Tags:" in
/// "Relevant Hashtags and Tags:"
static HEADER_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L} \t'&/()_*-]{0,60}?:").expect("header tail pattern")
});

struct Label {
    /// Label at the start of a line, after optional `1.`, `*`, `#` markers
    line_start: Regex,
    anywhere: Regex,
}

impl Label {
    fn new(names: &str) -> Self {
        let line_start = format!(r"(?im)^[ \t]*(?:(?:\d+\.|[*#>•-]+)[ \t]*)*[*_]*(?:{names})\b");
        let anywhere = format!(r"(?i)\b(?:{names})\b");
        Self {
            line_start: Regex::new(&line_start).expect("label pattern"),
            anywhere: Regex::new(&anywhere).expect("label pattern"),
        }
    }

    /// Text following the label up to the next section boundary
    fn section<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.line_start
            .find_iter(text)
            .chain(self.anywhere.find_iter(text))
            .find_map(|m| section_after(text, m.end()))
    }
}

fn section_after(text: &str, label_end: usize) -> Option<&str> {
    let rest = &text[label_end..];
    let rest = HEADER_TAIL.find(rest).map_or(rest, |m| &rest[m.end()..]);
    let body = rest.trim_start_matches(|c: char| c == ':' || c == '*' || c.is_whitespace());
    let end = SECTION_BOUNDARY
        .find(body)
        .map(|m| m.start())
        .unwrap_or(body.len());
    let section = body[..end].trim();
    (!section.is_empty()).then_some(section)
}

static TITLE_LABEL: LazyLock<Label> = LazyLock::new(|| Label::new(r"suggested\s+title|title"));
static SUMMARY_LABEL: LazyLock<Label> = LazyLock::new(|| Label::new(r"text\s+response|summary"));
static DESCRIPTION_LABEL: LazyLock<Label> =
    LazyLock::new(|| Label::new(r"detailed\s+description|description"));
static TAGS_LABEL: LazyLock<Label> = LazyLock::new(|| Label::new(r"hashtags|tags"));
static CHAPTERS_LABEL: LazyLock<Label> = LazyLock::new(|| Label::new(r"chapters|timestamps"));

fn labeled_title(text: &str) -> Option<String> {
    TITLE_LABEL.section(text).map(str::to_string)
}

fn labeled_summary(text: &str) -> Option<String> {
    SUMMARY_LABEL.section(text).map(str::to_string)
}

fn labeled_description(text: &str) -> Option<String> {
    DESCRIPTION_LABEL.section(text).map(str::to_string)
}

// ---------------------------------------------------------------------------
// Positional fallbacks
// ---------------------------------------------------------------------------

static LEADING_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\s*(?:\d+\.|[*#>•-]+|(?i:title)\s*:))+").expect("leading marker pattern")
});

fn non_blank_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

fn first_line_title(text: &str) -> Option<String> {
    let first = *non_blank_lines(text).first()?;
    let title = LEADING_MARKER
        .replace(first, "")
        .trim()
        .trim_end_matches('*')
        .trim()
        .to_string();
    (!title.is_empty()).then_some(title)
}

/// Non-blank lines `from..to` (zero based) joined with newlines
fn line_window(text: &str, from: usize, to: usize) -> Option<String> {
    let lines = non_blank_lines(text);
    if lines.len() <= from {
        return None;
    }
    Some(lines[from..to.min(lines.len())].join("\n"))
}

fn positional_summary(text: &str) -> Option<String> {
    line_window(text, 1, 5)
}

fn positional_description(text: &str) -> Option<String> {
    line_window(text, 5, 10)
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[\p{L}\p{N}]+").expect("hashtag pattern"));

fn labeled_tags(text: &str) -> Option<Vec<String>> {
    let section = TAGS_LABEL.section(text)?;
    let tags: Vec<String> = section
        .split([',', '\n'])
        .flat_map(split_hashtag_run)
        .filter_map(normalize_tag)
        .take(MAX_TAGS)
        .collect();
    (!tags.is_empty()).then_some(tags)
}

/// "#a #b #c" on one line is three tags, "machine learning" is one
fn split_hashtag_run(token: &str) -> Vec<&str> {
    let token = token.trim().trim_start_matches(['-', '*', '•']).trim();
    let words: Vec<&str> = token.split_whitespace().collect();
    if words.len() > 1 && words.iter().all(|w| w.starts_with('#')) {
        words
    } else {
        vec![token]
    }
}

fn normalize_tag(token: &str) -> Option<String> {
    let token = token.trim();
    if token.is_empty() || token == "#" {
        return None;
    }
    if token.starts_with('#') {
        return Some(token.to_string());
    }
    let collapsed: String = token.split_whitespace().collect();
    Some(format!("#{}", collapsed))
}

fn scanned_hashtags(text: &str) -> Option<Vec<String>> {
    let tags: Vec<String> = HASHTAG
        .find_iter(text)
        .take(MAX_TAGS)
        .map(|m| m.as_str().to_string())
        .collect();
    (!tags.is_empty()).then_some(tags)
}

// ---------------------------------------------------------------------------
// Chapters
// ---------------------------------------------------------------------------

/// `05:30 - Title`, `[05:30] Title`, `**05:30**: Title`; never spans lines.
/// The time may not sit inside a longer number such as `123:45`.
static CHAPTER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^|[^\d:])(\d{1,2}:\d{2})[\])*]*[ \t:\-–—]+([^\n]+)")
        .expect("chapter pattern")
});

/// `h:mm:ss` times are skipped rather than split into a wrong `mm:ss`
fn has_more_time_fields(text: &str, time_end: usize) -> bool {
    let mut after = text[time_end..].chars();
    after.next() == Some(':') && after.next().is_some_and(|c| c.is_ascii_digit())
}

fn chapters_in(text: &str) -> Vec<Chapter> {
    CHAPTER_LINE
        .captures_iter(text)
        .filter_map(|caps| {
            let time = caps.get(1)?;
            if has_more_time_fields(text, time.end()) {
                return None;
            }
            let title = caps[2]
                .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '-' | '–' | '—'))
                .trim()
                .trim_matches('*')
                .trim();
            (!title.is_empty()).then(|| Chapter::new(time.as_str(), title))
        })
        .collect()
}

fn labeled_chapters(text: &str) -> Option<Vec<Chapter>> {
    let block = CHAPTERS_LABEL.section(text)?;
    let chapters = chapters_in(block);
    (!chapters.is_empty()).then_some(chapters)
}

fn scanned_chapters(text: &str) -> Option<Vec<Chapter>> {
    let chapters = chapters_in(text);
    (!chapters.is_empty()).then_some(chapters)
}
