use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::ContextError;

/// Every styling constant used by the layout engine. Lengths are millimetres, font sizes are points.
///
/// The defaults lay out an A4 page exactly like the professional template of the web wizard.
/// A JSON configuration file only needs to name the fields it overrides.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfiguration {
    pub page_width: f32,
    pub page_height: f32,
    /// Left and right margin of the content area.
    pub page_margin: f32,
    /// Where the cursor restarts after a page break.
    pub top_margin: f32,
    /// Distance between the safe bottom of the content area and the page edge.
    pub bottom_margin: f32,

    pub line_height: f32,
    pub point_line_height: f32,

    pub name_font_size: f32,
    pub title_font_size: f32,
    pub heading_font_size: f32,
    pub subheading_font_size: f32,
    pub body_font_size: f32,
    pub point_font_size: f32,
    pub meta_font_size: f32,

    pub header_base_height: f32,
    pub header_title_increment: f32,
    pub contact_row_height: f32,
    pub name_baseline: f32,
    pub title_baseline: f32,
    pub contact_baseline: f32,
    pub contact_baseline_with_title: f32,
    pub contact_column_offset: f32,
    pub contact_columns_per_row: usize,
    pub header_gap: f32,

    pub section_gap: f32,
    /// Distance between the stacked lines of an experience or education entry.
    pub entry_line_spacing: f32,
    /// Space added after the last entry of a list, before its divider.
    pub list_trailing_gap: f32,
    pub skill_columns: usize,
    pub skill_row_height: f32,

    // Space that must remain above the safe bottom before a block is started.
    pub heading_block_height: f32,
    pub entry_block_height: f32,
    pub project_block_height: f32,
    pub point_block_height: f32,

    pub project_indent: f32,
    /// How far bullet points start to the right of the project text.
    pub point_indent: f32,
    /// How much narrower than the project text bullet points are wrapped, on the right.
    pub point_right_inset: f32,

    pub divider_width: f32,
    /// A divider is only drawn while the cursor is at least this far from the page bottom.
    pub divider_clearance: f32,

    pub default_header_color: Rgb,
    pub secondary_color: Rgb,
    pub body_text_color: Rgb,
    pub muted_color: Rgb,
    pub header_text_color: Rgb,

    pub file_name: String,
}

impl Default for LayoutConfiguration {
    fn default() -> Self {
        LayoutConfiguration {
            page_width: 210.0,
            page_height: 297.0,
            page_margin: 20.0,
            top_margin: 20.0,
            bottom_margin: 10.0,
            line_height: 5.0,
            point_line_height: 4.5,
            name_font_size: 24.0,
            title_font_size: 12.0,
            heading_font_size: 14.0,
            subheading_font_size: 12.0,
            body_font_size: 10.0,
            point_font_size: 9.0,
            meta_font_size: 8.0,
            header_base_height: 35.0,
            header_title_increment: 8.0,
            contact_row_height: 6.0,
            name_baseline: 15.0,
            title_baseline: 22.0,
            contact_baseline: 25.0,
            contact_baseline_with_title: 30.0,
            contact_column_offset: 10.0,
            contact_columns_per_row: 2,
            header_gap: 10.0,
            section_gap: 10.0,
            entry_line_spacing: 8.0,
            list_trailing_gap: 5.0,
            skill_columns: 3,
            skill_row_height: 6.0,
            heading_block_height: 20.0,
            entry_block_height: 30.0,
            project_block_height: 20.0,
            point_block_height: 5.0,
            project_indent: 5.0,
            point_indent: 5.0,
            point_right_inset: 10.0,
            divider_width: 0.5,
            divider_clearance: 20.0,
            default_header_color: Rgb([88, 28, 135]),
            secondary_color: Rgb([59, 130, 246]),
            body_text_color: Rgb([31, 41, 55]),
            muted_color: Rgb([156, 163, 175]),
            header_text_color: Rgb::WHITE,
            file_name: "Professional_ATS_Resume.pdf".into(),
        }
    }
}

impl LayoutConfiguration {
    /// Reads a (possibly partial) configuration from a JSON file and validates it.
    pub fn from_path(configuration_file_path: &Path) -> Result<Self, ContextError> {
        let configuration_file_contents = std::fs::read_to_string(configuration_file_path)
            .map_err(|error| {
                ContextError::with_error(
                    format!(
                        "Failed to read the configuration file {:?}",
                        configuration_file_path
                    ),
                    &error,
                )
            })?;
        let configuration: LayoutConfiguration =
            serde_json::from_str(&configuration_file_contents).map_err(|error| {
                ContextError::with_error(
                    format!(
                        "Failed to parse the configuration file {:?}",
                        configuration_file_path
                    ),
                    &error,
                )
            })?;
        configuration.validate()?;

        Ok(configuration)
    }

    /// Rejects configurations the layout engine cannot work with.
    pub fn validate(&self) -> Result<(), ContextError> {
        if self.skill_columns == 0 || self.contact_columns_per_row == 0 {
            return Err(ContextError::with_context(
                "The skill columns and the contact columns per row must be at least 1",
            ));
        }

        let lengths = [
            ("pageWidth", self.page_width),
            ("pageHeight", self.page_height),
            ("lineHeight", self.line_height),
            ("pointLineHeight", self.point_line_height),
            ("skillRowHeight", self.skill_row_height),
            ("entryLineSpacing", self.entry_line_spacing),
            ("contactRowHeight", self.contact_row_height),
            ("nameFontSize", self.name_font_size),
            ("titleFontSize", self.title_font_size),
            ("headingFontSize", self.heading_font_size),
            ("subheadingFontSize", self.subheading_font_size),
            ("bodyFontSize", self.body_font_size),
            ("pointFontSize", self.point_font_size),
            ("metaFontSize", self.meta_font_size),
        ];
        if let Some((name, value)) = lengths
            .iter()
            .find(|(_, value)| !value.is_finite() || *value <= 0.0)
        {
            return Err(ContextError::with_context(format!(
                "The configuration value {} must be positive, found {}",
                name, value
            )));
        }

        if self.point_wrap_width() <= 0.0 {
            return Err(ContextError::with_context(format!(
                "The page margins and indents leave no room for text on a page {} mm wide",
                self.page_width
            )));
        }
        // An education entry with a field draws its date line three spacings below its top
        if self.entry_block_height < 3.0 * self.entry_line_spacing {
            return Err(ContextError::with_context(format!(
                "The entry block height {} mm does not cover three entry line spacings of {} mm",
                self.entry_block_height, self.entry_line_spacing
            )));
        }
        if self.top_margin + self.entry_block_height >= self.safe_bottom() {
            return Err(ContextError::with_context(format!(
                "The vertical margins leave no room for content on a page {} mm high",
                self.page_height
            )));
        }

        Ok(())
    }

    /// Width available to body text between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.page_margin
    }

    /// Lowest Y at which a block may end before a page break is required.
    pub fn safe_bottom(&self) -> f32 {
        self.page_height - self.bottom_margin
    }

    pub fn project_x(&self) -> f32 {
        self.page_margin + self.project_indent
    }

    pub fn point_x(&self) -> f32 {
        self.project_x() + self.point_indent
    }

    /// Width bullet points are wrapped to, narrower than the body text by the project indent
    /// and the right inset.
    pub fn point_wrap_width(&self) -> f32 {
        self.content_width() - self.project_indent - self.point_right_inset
    }
}
