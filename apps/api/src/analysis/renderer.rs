//! Splits the model's markdown into `## ` sections and renders each body
//! to sanitized HTML.
//!
//! The model is asked for four sections but nothing guarantees it complies. Unknown headings
//! fall into `SectionCategory::Other`, and sections keep the order they appear in the text.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use serde::{Deserialize, Serialize};

const SECTION_MARKER: &str = "## ";

/// URL schemes that can execute script when clicked or loaded.
const UNSAFE_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// Presentation category of a section, chosen by exact heading text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionCategory {
    Qualification,
    StrongPoints,
    WeakPoints,
    Recommendations,
    Other,
}

impl SectionCategory {
    pub fn from_heading(heading: &str) -> Self {
        match heading.trim() {
            "Overall Qualification" => SectionCategory::Qualification,
            "Strong Points" => SectionCategory::StrongPoints,
            "Weak Points" => SectionCategory::WeakPoints,
            "Recommendations" => SectionCategory::Recommendations,
            _ => SectionCategory::Other,
        }
    }

    /// Tailwind classes for the section card.
    pub fn css_class(self) -> &'static str {
        match self {
            SectionCategory::Qualification => "bg-blue-50 border-blue-200",
            SectionCategory::StrongPoints => "bg-green-50 border-green-200",
            SectionCategory::WeakPoints => "bg-red-50 border-red-200",
            SectionCategory::Recommendations => "bg-yellow-50 border-yellow-200",
            SectionCategory::Other => "bg-gray-50 border-gray-200",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSection {
    pub heading: String,
    pub body_markdown: String,
    pub category: SectionCategory,
}

impl AnalysisSection {
    pub fn body_html(&self) -> String {
        markdown_to_safe_html(&self.body_markdown)
    }
}

/// A section ready for display: the parsed section plus its HTML and card classes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSection {
    #[serde(flatten)]
    pub section: AnalysisSection,
    pub html: String,
    pub class_name: &'static str,
}

/// Splits on every `"## "`. Text before the first marker is dropped; within a chunk the first
/// line is the heading and the rest is the body.
pub fn split_sections(analysis: &str) -> Vec<AnalysisSection> {
    analysis
        .split(SECTION_MARKER)
        .skip(1)
        .map(|chunk| {
            let (heading, body) = chunk.split_once('\n').unwrap_or((chunk, ""));
            AnalysisSection {
                heading: heading.trim().to_string(),
                body_markdown: body.to_string(),
                category: SectionCategory::from_heading(heading),
            }
        })
        .collect()
}

pub fn render_sections(analysis: &str) -> Vec<RenderedSection> {
    split_sections(analysis)
        .into_iter()
        .map(|section| RenderedSection {
            html: section.body_html(),
            class_name: section.category.css_class(),
            section,
        })
        .collect()
}

/// Markdown → HTML with raw HTML escaped and script-capable link targets replaced by `#`.
pub fn markdown_to_safe_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let events = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: neutralize_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: neutralize_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

fn neutralize_url(url: CowStr<'_>) -> CowStr<'_> {
    // Browsers ignore embedded whitespace and control characters in the scheme.
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    if UNSAFE_SCHEMES.iter().any(|scheme| normalized.starts_with(scheme)) {
        CowStr::Borrowed("#")
    } else {
        url
    }
}
