use crate::configuration::LayoutConfiguration;
use crate::cursor::LayoutCursor;
use crate::resume::{present, EducationEntry};

use super::{RenderedSection, SectionWriter, TextStyle};

pub const EDUCATION_HEADING: &str = "EDUCATION";

/// Extra space between two education entries.
const ENTRY_GAP: f32 = 5.0;

/// An entry is one line taller when it names a field of study.
fn entry_height(entry: &EducationEntry, configuration: &LayoutConfiguration) -> f32 {
    let line_count = if present(&entry.field).is_some() { 4.0 } else { 3.0 };
    line_count * configuration.entry_line_spacing + ENTRY_GAP
}

pub fn education_height(education: &[EducationEntry], configuration: &LayoutConfiguration) -> f32 {
    if education.is_empty() {
        return 0.0;
    }
    let entries: f32 = education
        .iter()
        .map(|entry| entry_height(entry, configuration))
        .sum();

    configuration.section_gap + entries + configuration.list_trailing_gap + configuration.section_gap
}

pub fn render_education(
    education: &[EducationEntry],
    configuration: &LayoutConfiguration,
    cursor: LayoutCursor,
) -> RenderedSection {
    let mut writer = SectionWriter::new(configuration, cursor);
    if education.is_empty() {
        return writer.finish();
    }

    writer.heading(EDUCATION_HEADING, configuration.entry_block_height);

    let x = configuration.page_margin;
    let spacing = configuration.entry_line_spacing;
    for entry in education {
        let y = writer.reserve(configuration.entry_block_height);
        writer.text(
            x,
            y,
            &entry.degree,
            TextStyle::bold(configuration.subheading_font_size, configuration.body_text_color),
        );
        writer.text(
            x,
            y + spacing,
            &entry.institution,
            TextStyle::regular(configuration.body_font_size, configuration.secondary_color),
        );

        let field = present(&entry.field);
        if let Some(field) = field {
            writer.text(
                x,
                y + 2.0 * spacing,
                field,
                TextStyle::regular(configuration.body_font_size, configuration.body_text_color),
            );
        }

        let date_line_offset = (if field.is_some() { 3.0 } else { 2.0 }) * spacing;
        writer.text(
            x,
            y + date_line_offset,
            &entry.date_line(),
            TextStyle::regular(configuration.body_font_size, configuration.muted_color),
        );

        writer.advance(entry_height(entry, configuration));
    }

    writer.advance(configuration.list_trailing_gap);
    writer.divider();

    writer.finish()
}
