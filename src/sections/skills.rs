use crate::configuration::LayoutConfiguration;
use crate::cursor::LayoutCursor;
use crate::resume::Skill;

use super::{RenderedSection, SectionWriter, TextStyle};

pub const SKILLS_HEADING: &str = "SKILLS";

pub fn skill_label(skill: &Skill) -> String {
    format!("• {} ({})", skill.name.trim(), skill.level)
}

fn column_count(configuration: &LayoutConfiguration) -> usize {
    configuration.skill_columns.max(1)
}

fn row_count(skills: &[Skill], configuration: &LayoutConfiguration) -> usize {
    skills.len().div_ceil(column_count(configuration))
}

pub fn skills_height(skills: &[Skill], configuration: &LayoutConfiguration) -> f32 {
    if skills.is_empty() {
        return 0.0;
    }
    3.0 * configuration.section_gap
        + row_count(skills, configuration) as f32 * configuration.skill_row_height
}

/// Packs the skills into a grid, `index mod columns` picking the column and `index div columns`
/// the row. Every row is checked against the page bottom before it is drawn, so a long list
/// carries on at the top of the next page.
pub fn render_skills(
    skills: &[Skill],
    configuration: &LayoutConfiguration,
    cursor: LayoutCursor,
) -> RenderedSection {
    let mut writer = SectionWriter::new(configuration, cursor);
    if skills.is_empty() {
        return writer.finish();
    }

    writer.heading(SKILLS_HEADING, configuration.skill_row_height);

    let columns = column_count(configuration);
    let column_width = configuration.content_width() / columns as f32;
    let style = TextStyle::regular(configuration.body_font_size, configuration.body_text_color);
    for row in skills.chunks(columns) {
        let y = writer.reserve(configuration.skill_row_height);
        for (column, skill) in row.iter().enumerate() {
            let x = configuration.page_margin + column as f32 * column_width;
            writer.text(x, y, &skill_label(skill), style);
        }
        writer.advance(configuration.skill_row_height);
    }

    writer.advance(configuration.section_gap);
    writer.divider();

    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DrawOperation;
    use crate::resume::SkillLevel;

    fn skills(count: usize) -> Vec<Skill> {
        (0..count)
            .map(|index| Skill {
                name: format!("Skill {}", index),
                level: SkillLevel::Advanced,
            })
            .collect()
    }

    fn text_positions(section: &RenderedSection) -> Vec<(usize, f32, f32)> {
        section
            .operations
            .iter()
            .filter_map(|placed| match &placed.operation {
                DrawOperation::Text(text_run) => {
                    Some((placed.page_index, text_run.x, text_run.y))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn four_skills_fill_one_row_and_start_a_second() {
        let configuration = LayoutConfiguration::default();
        let cursor = LayoutCursor::new(&configuration).at(51.0);
        let section = render_skills(&skills(4), &configuration, cursor);
        let column_width = 170.0 / 3.0;

        let positions = text_positions(&section);
        // heading first
        assert_eq!(positions[0], (0, 20.0, 51.0));
        assert_eq!(positions[1], (0, 20.0, 61.0));
        assert_eq!(positions[2], (0, 20.0 + column_width, 61.0));
        assert_eq!(positions[3], (0, 20.0 + 2.0 * column_width, 61.0));
        assert_eq!(positions[4], (0, 20.0, 67.0));
        assert_eq!(skills_height(&skills(4), &configuration), 30.0 + 12.0);
        assert!((section.cursor.y - (51.0 + 42.0)).abs() < 1e-3);
    }

    #[test]
    fn label_carries_the_level() {
        let skill = Skill {
            name: "Rust".into(),
            level: SkillLevel::Expert,
        };
        assert_eq!(skill_label(&skill), "• Rust (Expert)");
    }

    #[test]
    fn long_lists_continue_on_the_next_page() {
        let configuration = LayoutConfiguration::default();
        let cursor = LayoutCursor::new(&configuration).at(200.0);
        let section = render_skills(&skills(90), &configuration, cursor);

        let positions = text_positions(&section);
        assert_eq!(positions.len(), 91);
        assert!(section.cursor.page_index >= 1);
        for (_, _, y) in positions {
            assert!(y <= configuration.safe_bottom());
        }
    }

    #[test]
    fn no_skills_no_section() {
        let configuration = LayoutConfiguration::default();
        let section = render_skills(&[], &configuration, LayoutCursor::new(&configuration));
        assert!(section.operations.is_empty());
        assert_eq!(skills_height(&[], &configuration), 0.0);
    }
}
