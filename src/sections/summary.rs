use crate::configuration::LayoutConfiguration;
use crate::cursor::LayoutCursor;
use crate::metrics::{wrap_text, FontWeight};

use super::{RenderedSection, SectionWriter, TextStyle};

pub const SUMMARY_HEADING: &str = "PROFESSIONAL SUMMARY";

fn summary_lines(summary: &str, configuration: &LayoutConfiguration) -> Vec<String> {
    wrap_text(
        summary,
        FontWeight::Regular,
        configuration.body_font_size,
        configuration.content_width(),
    )
}

pub fn summary_height(summary: Option<&str>, configuration: &LayoutConfiguration) -> f32 {
    match summary {
        None => 0.0,
        Some(summary) => {
            let line_count = summary_lines(summary, configuration).len();
            // heading, gap before the divider, divider
            3.0 * configuration.section_gap + line_count as f32 * configuration.line_height
        }
    }
}

/// Draws the summary paragraph, or nothing at all when there is no summary.
pub fn render_summary(
    summary: Option<&str>,
    configuration: &LayoutConfiguration,
    cursor: LayoutCursor,
) -> RenderedSection {
    let mut writer = SectionWriter::new(configuration, cursor);
    let Some(summary) = summary else {
        return writer.finish();
    };

    writer.heading(SUMMARY_HEADING, configuration.line_height);
    writer.lines(
        &summary_lines(summary, configuration),
        configuration.page_margin,
        TextStyle::regular(configuration.body_font_size, configuration.body_text_color),
        configuration.line_height,
        configuration.line_height,
    );
    writer.advance(configuration.section_gap);
    writer.divider();

    writer.finish()
}
