use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::metrics::FontWeight;

/// A run of text drawn with its baseline at `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub weight: FontWeight,
    pub font_size: f32,
    pub color: Rgb,
}

/// A single drawing instruction with absolute coordinates in millimetres from the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DrawOperation {
    Text(TextRun),
    #[serde(rename_all = "camelCase")]
    FilledRectangle {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    #[serde(rename_all = "camelCase")]
    Line {
        start: [f32; 2],
        end: [f32; 2],
        width: f32,
        color: Rgb,
    },
}

impl DrawOperation {
    /// The topmost Y coordinate the operation occupies, used to order operations on a page.
    pub fn y(&self) -> f32 {
        match self {
            DrawOperation::Text(text_run) => text_run.y,
            DrawOperation::FilledRectangle { y, .. } => *y,
            DrawOperation::Line { start, end, .. } => start[1].min(end[1]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub operations: Vec<DrawOperation>,
}

impl Page {
    pub fn new(width: f32, height: f32) -> Self {
        Page {
            width,
            height,
            operations: Vec::new(),
        }
    }

    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.operations.iter().filter_map(|operation| match operation {
            DrawOperation::Text(text_run) => Some(text_run),
            _ => None,
        })
    }
}

/// The laid out résumé: pages of draw operations plus the name it should be saved under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub title: String,
    pub file_name: String,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All text in render order, across pages.
    pub fn texts(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(Page::text_runs)
            .map(|text_run| text_run.text.as_str())
            .collect()
    }

    pub fn contains_text(&self, text: &str) -> bool {
        self.texts().iter().any(|candidate| *candidate == text)
    }

    /// Finds the first text run with exactly the given content, together with its page index.
    pub fn find_text(&self, text: &str) -> Option<(usize, &TextRun)> {
        self.pages.iter().enumerate().find_map(|(page_index, page)| {
            page.text_runs()
                .find(|text_run| text_run.text == text)
                .map(|text_run| (page_index, text_run))
        })
    }
}
