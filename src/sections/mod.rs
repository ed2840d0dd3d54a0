//! One renderer per résumé section.
//!
//! Every renderer takes the slice of the résumé it draws, the configuration and the cursor left by
//! the previous section, and returns the draw operations it placed together with the cursor for the
//! next one. Each also has a `*_height` companion that computes how far the cursor moves when no
//! page break happens, without producing any operation.

use crate::color::Rgb;
use crate::configuration::LayoutConfiguration;
use crate::cursor::LayoutCursor;
use crate::document::{DrawOperation, TextRun};
use crate::metrics::FontWeight;

pub mod education;
pub mod experience;
pub mod header;
pub mod skills;
pub mod summary;

pub use education::{education_height, render_education};
pub use experience::{experience_height, render_experience};
pub use header::{header_height, render_header};
pub use skills::{render_skills, skills_height};
pub use summary::{render_summary, summary_height};

/// A draw operation bound to the page it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOperation {
    pub page_index: usize,
    pub operation: DrawOperation,
}

/// What a renderer produced: its operations in emission order and the cursor after it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSection {
    pub operations: Vec<PlacedOperation>,
    pub cursor: LayoutCursor,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct TextStyle {
    pub weight: FontWeight,
    pub font_size: f32,
    pub color: Rgb,
}

impl TextStyle {
    pub fn regular(font_size: f32, color: Rgb) -> Self {
        TextStyle {
            weight: FontWeight::Regular,
            font_size,
            color,
        }
    }

    pub fn bold(font_size: f32, color: Rgb) -> Self {
        TextStyle {
            weight: FontWeight::Bold,
            font_size,
            color,
        }
    }
}

/// Accumulates the operations of one section while moving its own copy of the cursor.
pub(crate) struct SectionWriter<'a> {
    configuration: &'a LayoutConfiguration,
    cursor: LayoutCursor,
    operations: Vec<PlacedOperation>,
}

impl<'a> SectionWriter<'a> {
    pub fn new(configuration: &'a LayoutConfiguration, cursor: LayoutCursor) -> Self {
        SectionWriter {
            configuration,
            cursor,
            operations: Vec::new(),
        }
    }

    pub fn y(&self) -> f32 {
        self.cursor.y
    }

    pub fn reserve(&mut self, height: f32) -> f32 {
        self.cursor.reserve(height)
    }

    pub fn advance(&mut self, height: f32) {
        self.cursor.advance(height);
    }

    fn push(&mut self, operation: DrawOperation) {
        self.operations.push(PlacedOperation {
            page_index: self.cursor.page_index,
            operation,
        });
    }

    /// Draws a text run on the current page. Blank text draws nothing.
    pub fn text(&mut self, x: f32, y: f32, text: &str, style: TextStyle) {
        if text.trim().is_empty() {
            return;
        }
        self.push(DrawOperation::Text(TextRun {
            x,
            y,
            text: text.to_string(),
            weight: style.weight,
            font_size: style.font_size,
            color: style.color,
        }));
    }

    pub fn filled_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.push(DrawOperation::FilledRectangle {
            x,
            y,
            width,
            height,
            color,
        });
    }

    /// Reserves room for a section title, draws it and moves to where the section body starts.
    ///
    /// The reservation also covers the first block of the body, `first_block_height`, so the
    /// title always lands on the same page as the content it introduces.
    pub fn heading(&mut self, title: &str, first_block_height: f32) {
        let configuration = self.configuration;
        let y = self.reserve(
            configuration
                .heading_block_height
                .max(configuration.section_gap + first_block_height),
        );
        self.text(
            configuration.page_margin,
            y,
            title,
            TextStyle::bold(configuration.heading_font_size, configuration.body_text_color),
        );
        self.advance(configuration.section_gap);
    }

    /// Draws already wrapped lines one below the other, checking for a page break before each one
    /// so that a long paragraph continues on the next page instead of running off this one.
    pub fn lines(
        &mut self,
        lines: &[String],
        x: f32,
        style: TextStyle,
        reserved_height: f32,
        line_height: f32,
    ) {
        for line in lines {
            let y = self.reserve(reserved_height);
            self.text(x, y, line, style);
            self.advance(line_height);
        }
    }

    /// A horizontal rule across the content area, skipped when it would land too close to the
    /// bottom of the page. The gap after it is kept either way.
    pub fn divider(&mut self) {
        let configuration = self.configuration;
        let y = self.cursor.y;
        if y < configuration.page_height - configuration.divider_clearance {
            self.push(DrawOperation::Line {
                start: [configuration.page_margin, y],
                end: [configuration.page_width - configuration.page_margin, y],
                width: configuration.divider_width,
                color: configuration.muted_color,
            });
        } else {
            log::debug!("Skipped a divider at y = {:.1}, too close to the page bottom", y);
        }
        self.advance(configuration.section_gap);
    }

    pub fn finish(self) -> RenderedSection {
        RenderedSection {
            operations: self.operations,
            cursor: self.cursor,
        }
    }
}
