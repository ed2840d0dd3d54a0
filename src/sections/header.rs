use crate::color::resolve_header_color;
use crate::configuration::LayoutConfiguration;
use crate::cursor::LayoutCursor;
use crate::resume::{present, PersonalInformation};

use super::{RenderedSection, SectionWriter, TextStyle};

/// Height of the colored band. It has to be known before anything is drawn because the band is
/// painted first and every header line sits on top of it.
pub fn header_height(personal: &PersonalInformation, configuration: &LayoutConfiguration) -> f32 {
    let title_height = if present(&personal.title).is_some() {
        configuration.header_title_increment
    } else {
        0.0
    };
    let contact_rows = personal
        .contact_items()
        .len()
        .div_ceil(contact_column_count(configuration));

    configuration.header_base_height
        + title_height
        + contact_rows as f32 * configuration.contact_row_height
}

/// A configuration that skipped validation may ask for zero columns, which lays out as one.
fn contact_column_count(configuration: &LayoutConfiguration) -> usize {
    configuration.contact_columns_per_row.max(1)
}

/// X of a contact column. The first column is aligned with the name, the others start a little
/// past their share of the page width.
fn contact_column_x(column: usize, configuration: &LayoutConfiguration) -> f32 {
    if column == 0 {
        configuration.page_margin
    } else {
        column as f32 * configuration.page_width / contact_column_count(configuration) as f32
            + configuration.contact_column_offset
    }
}

/// Paints the header band at the top of the cursor's page and returns the cursor just below it.
pub fn render_header(
    personal: &PersonalInformation,
    configuration: &LayoutConfiguration,
    cursor: LayoutCursor,
) -> RenderedSection {
    let height = header_height(personal, configuration);
    let header_color = resolve_header_color(
        personal.header_color.as_deref(),
        configuration.default_header_color,
    );
    let text_color = configuration.header_text_color;
    let x = configuration.page_margin;

    let mut writer = SectionWriter::new(configuration, cursor.at(0.0));
    writer.filled_rectangle(0.0, 0.0, configuration.page_width, height, header_color);
    writer.text(
        x,
        configuration.name_baseline,
        &personal.full_name(),
        TextStyle::bold(configuration.name_font_size, text_color),
    );

    let title = present(&personal.title);
    if let Some(title) = title {
        writer.text(
            x,
            configuration.title_baseline,
            title,
            TextStyle::regular(configuration.title_font_size, text_color),
        );
    }

    let contact_start = if title.is_some() {
        configuration.contact_baseline_with_title
    } else {
        configuration.contact_baseline
    };
    let columns = contact_column_count(configuration);
    for (index, item) in personal.contact_items().iter().enumerate() {
        let row = index / columns;
        writer.text(
            contact_column_x(index % columns, configuration),
            contact_start + row as f32 * configuration.contact_row_height,
            item,
            TextStyle::regular(configuration.meta_font_size, text_color),
        );
    }

    writer.advance(height + configuration.header_gap);
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::document::DrawOperation;

    fn full_personal() -> PersonalInformation {
        PersonalInformation {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            title: Some("Staff Engineer".into()),
            email: Some("jane@x.com".into()),
            phone: Some("555-0100".into()),
            address: Some("1 Main St".into()),
            linkedin: Some("linkedin.com/in/jane".into()),
            website: Some("jane.dev".into()),
            header_color: Some("#112233".into()),
        }
    }

    #[test]
    fn height_grows_with_title_and_contact_rows() {
        let configuration = LayoutConfiguration::default();
        assert_eq!(header_height(&full_personal(), &configuration), 35.0 + 8.0 + 3.0 * 6.0);

        let bare = PersonalInformation {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            ..Default::default()
        };
        assert_eq!(header_height(&bare, &configuration), 35.0);
    }

    #[test]
    fn band_covers_the_page_width_in_the_chosen_color() {
        let configuration = LayoutConfiguration::default();
        let section = render_header(
            &full_personal(),
            &configuration,
            LayoutCursor::new(&configuration),
        );
        assert_eq!(
            section.operations[0].operation,
            DrawOperation::FilledRectangle {
                x: 0.0,
                y: 0.0,
                width: 210.0,
                height: 61.0,
                color: Rgb([0x11, 0x22, 0x33]),
            }
        );
        assert_eq!(section.cursor.y, 71.0);
        assert_eq!(section.cursor.page_index, 0);
    }

    #[test]
    fn contacts_are_laid_out_two_per_row() {
        let configuration = LayoutConfiguration::default();
        let section = render_header(
            &full_personal(),
            &configuration,
            LayoutCursor::new(&configuration),
        );
        let positions: Vec<(String, f32, f32)> = section
            .operations
            .iter()
            .filter_map(|placed| match &placed.operation {
                DrawOperation::Text(text_run) => {
                    Some((text_run.text.clone(), text_run.x, text_run.y))
                }
                _ => None,
            })
            .collect();

        assert_eq!(positions[0], ("Jane Doe".to_string(), 20.0, 15.0));
        assert_eq!(positions[1], ("Staff Engineer".to_string(), 20.0, 22.0));
        assert_eq!(positions[2], ("Email: jane@x.com".to_string(), 20.0, 30.0));
        assert_eq!(positions[3], ("Phone: 555-0100".to_string(), 115.0, 30.0));
        assert_eq!(positions[4], ("Address: 1 Main St".to_string(), 20.0, 36.0));
        assert_eq!(positions[6], ("Website: jane.dev".to_string(), 20.0, 42.0));
    }

    #[test]
    fn malformed_color_falls_back_to_the_default() {
        let configuration = LayoutConfiguration::default();
        let personal = PersonalInformation {
            header_color: Some("purple".into()),
            ..full_personal()
        };
        let section = render_header(&personal, &configuration, LayoutCursor::new(&configuration));
        match &section.operations[0].operation {
            DrawOperation::FilledRectangle { color, .. } => {
                assert_eq!(*color, configuration.default_header_color)
            }
            operation => panic!("Expected the header band, found {:?}", operation),
        }
    }
}
