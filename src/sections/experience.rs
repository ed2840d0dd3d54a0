use crate::configuration::LayoutConfiguration;
use crate::cursor::LayoutCursor;
use crate::metrics::{wrap_text, FontWeight};
use crate::resume::{present, ExperienceEntry, ProjectEntry};

use super::{RenderedSection, SectionWriter, TextStyle};

pub const EXPERIENCE_HEADING: &str = "WORK EXPERIENCE";

const PROJECT_NAME_ADVANCE: f32 = 6.0;
const PROJECT_URL_ADVANCE: f32 = 5.0;
const PROJECT_DATES_ADVANCE: f32 = 6.0;
const PROJECT_TRAILING_GAP: f32 = 4.0;

fn description_lines(description: &str, configuration: &LayoutConfiguration) -> Vec<String> {
    wrap_text(
        description,
        FontWeight::Regular,
        configuration.body_font_size,
        configuration.content_width(),
    )
}

/// The wrapped lines of every non-blank point, one group per point.
fn point_lines(project: &ProjectEntry, configuration: &LayoutConfiguration) -> Vec<Vec<String>> {
    project
        .points
        .iter()
        .map(|point| point.trim())
        .filter(|point| !point.is_empty())
        .map(|point| {
            wrap_text(
                &format!("• {}", point),
                FontWeight::Regular,
                configuration.point_font_size,
                configuration.point_wrap_width(),
            )
        })
        .collect()
}

fn project_height(project: &ProjectEntry, configuration: &LayoutConfiguration) -> f32 {
    let url_height = if present(&project.url).is_some() {
        PROJECT_URL_ADVANCE
    } else {
        0.0
    };
    let point_line_count: usize = point_lines(project, configuration).iter().map(Vec::len).sum();

    PROJECT_NAME_ADVANCE
        + url_height
        + PROJECT_DATES_ADVANCE
        + point_line_count as f32 * configuration.point_line_height
        + PROJECT_TRAILING_GAP
}

fn entry_height(entry: &ExperienceEntry, configuration: &LayoutConfiguration) -> f32 {
    let spacing = configuration.entry_line_spacing;
    let mut height = 2.0 * spacing;
    if let Some(description) = present(&entry.description) {
        height += spacing
            + description_lines(description, configuration).len() as f32
                * configuration.line_height;
    }
    if !entry.projects.is_empty() {
        height += spacing
            + entry
                .projects
                .iter()
                .map(|project| project_height(project, configuration))
                .sum::<f32>();
    }

    height + configuration.section_gap
}

pub fn experience_height(experience: &[ExperienceEntry], configuration: &LayoutConfiguration) -> f32 {
    if experience.is_empty() {
        return 0.0;
    }
    let entries: f32 = experience
        .iter()
        .map(|entry| entry_height(entry, configuration))
        .sum();

    // heading, entries, trailing gap, divider
    configuration.section_gap + entries + configuration.list_trailing_gap + configuration.section_gap
}

fn render_project(
    writer: &mut SectionWriter<'_>,
    project: &ProjectEntry,
    configuration: &LayoutConfiguration,
) {
    let x = configuration.project_x();

    let y = writer.reserve(configuration.project_block_height);
    writer.text(
        x,
        y,
        &format!("Project: {}", project.name.trim()),
        TextStyle::bold(configuration.body_font_size, configuration.body_text_color),
    );
    writer.advance(PROJECT_NAME_ADVANCE);

    if let Some(url) = present(&project.url) {
        let y = writer.y();
        writer.text(
            x,
            y,
            url,
            TextStyle::regular(configuration.meta_font_size, configuration.secondary_color),
        );
        writer.advance(PROJECT_URL_ADVANCE);
    }

    let y = writer.y();
    writer.text(
        x,
        y,
        &project.date_range(),
        TextStyle::regular(configuration.meta_font_size, configuration.muted_color),
    );
    writer.advance(PROJECT_DATES_ADVANCE);

    // Points can run over a page boundary, so every line gets its own check
    let point_style =
        TextStyle::regular(configuration.point_font_size, configuration.body_text_color);
    for lines in point_lines(project, configuration) {
        writer.lines(
            &lines,
            configuration.point_x(),
            point_style,
            configuration.point_block_height,
            configuration.point_line_height,
        );
    }

    writer.advance(PROJECT_TRAILING_GAP);
}

fn render_entry(
    writer: &mut SectionWriter<'_>,
    entry: &ExperienceEntry,
    configuration: &LayoutConfiguration,
) {
    let x = configuration.page_margin;
    let spacing = configuration.entry_line_spacing;

    let y = writer.reserve(configuration.entry_block_height);
    writer.text(
        x,
        y,
        &entry.position,
        TextStyle::bold(configuration.subheading_font_size, configuration.body_text_color),
    );
    writer.text(
        x,
        y + spacing,
        &entry.company,
        TextStyle::regular(configuration.body_font_size, configuration.secondary_color),
    );
    writer.text(
        x,
        y + 2.0 * spacing,
        &entry.date_range(),
        TextStyle::regular(configuration.body_font_size, configuration.muted_color),
    );
    writer.advance(2.0 * spacing);

    if let Some(description) = present(&entry.description) {
        writer.advance(spacing);
        writer.lines(
            &description_lines(description, configuration),
            x,
            TextStyle::regular(configuration.body_font_size, configuration.body_text_color),
            configuration.line_height,
            configuration.line_height,
        );
    }

    if !entry.projects.is_empty() {
        writer.advance(spacing);
        for project in &entry.projects {
            render_project(writer, project, configuration);
        }
    }

    writer.advance(configuration.section_gap);
}

/// Draws every position in order with its nested projects, then a single divider.
pub fn render_experience(
    experience: &[ExperienceEntry],
    configuration: &LayoutConfiguration,
    cursor: LayoutCursor,
) -> RenderedSection {
    let mut writer = SectionWriter::new(configuration, cursor);
    if experience.is_empty() {
        return writer.finish();
    }

    writer.heading(EXPERIENCE_HEADING, configuration.entry_block_height);
    for entry in experience {
        render_entry(&mut writer, entry, configuration);
    }
    writer.advance(configuration.list_trailing_gap);
    writer.divider();

    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DrawOperation;

    fn entry_with_points(point_count: usize) -> ExperienceEntry {
        ExperienceEntry {
            company: "Acme".into(),
            position: "Engineer".into(),
            start_date: "2019".into(),
            end_date: "2021".into(),
            current: false,
            description: Some("Built distributed systems.".into()),
            projects: vec![ProjectEntry {
                name: "Search".into(),
                url: Some("https://acme.dev/search".into()),
                start_date: "2019".into(),
                end_date: "2020".into(),
                points: (0..point_count)
                    .map(|index| format!("Delivered milestone number {}", index))
                    .collect(),
            }],
        }
    }

    fn texts(section: &RenderedSection) -> Vec<(usize, String, f32)> {
        section
            .operations
            .iter()
            .filter_map(|placed| match &placed.operation {
                DrawOperation::Text(text_run) => {
                    Some((placed.page_index, text_run.text.clone(), text_run.y))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn entry_lines_are_stacked_below_the_position() {
        let configuration = LayoutConfiguration::default();
        let cursor = LayoutCursor::new(&configuration).at(50.0);
        let section = render_experience(&[entry_with_points(1)], &configuration, cursor);

        let texts = texts(&section);
        assert_eq!(texts[0], (0, "WORK EXPERIENCE".into(), 50.0));
        assert_eq!(texts[1], (0, "Engineer".into(), 60.0));
        assert_eq!(texts[2], (0, "Acme".into(), 68.0));
        assert_eq!(texts[3], (0, "2019 - 2021".into(), 76.0));
        assert_eq!(texts[4], (0, "Built distributed systems.".into(), 84.0));
        assert_eq!(texts[5], (0, "Project: Search".into(), 97.0));
        assert_eq!(texts[6], (0, "https://acme.dev/search".into(), 103.0));
        assert_eq!(texts[7], (0, "2019 - 2020".into(), 108.0));
        assert_eq!(texts[8], (0, "• Delivered milestone number 0".into(), 114.0));

        let x_of = |wanted: &str| {
            section
                .operations
                .iter()
                .find_map(|placed| match &placed.operation {
                    DrawOperation::Text(text_run) if text_run.text == wanted => Some(text_run.x),
                    _ => None,
                })
        };
        assert_eq!(x_of("Engineer"), Some(20.0));
        assert_eq!(x_of("Built distributed systems."), Some(20.0));
        assert_eq!(x_of("Project: Search"), Some(25.0));
        assert_eq!(x_of("2019 - 2020"), Some(25.0));
        assert_eq!(x_of("• Delivered milestone number 0"), Some(30.0));
    }

    #[test]
    fn heading_moves_with_the_first_entry() {
        let configuration = LayoutConfiguration::default();
        for start in [230.0, 247.0, 250.0, 260.0, 267.0] {
            let cursor = LayoutCursor::new(&configuration).at(start);
            let section = render_experience(&[entry_with_points(1)], &configuration, cursor);
            let texts = texts(&section);
            assert_eq!(texts[0].1, "WORK EXPERIENCE");
            assert_eq!(texts[1].1, "Engineer");
            assert_eq!(texts[0].0, texts[1].0, "heading split from its entry at y = {}", start);
        }
    }

    #[test]
    fn cursor_moves_by_the_measured_height() {
        let configuration = LayoutConfiguration::default();
        let experience = vec![entry_with_points(3), entry_with_points(0)];
        let cursor = LayoutCursor::new(&configuration).at(50.0);
        let section = render_experience(&experience, &configuration, cursor);

        let height = experience_height(&experience, &configuration);
        assert!((section.cursor.y - (50.0 + height)).abs() < 1e-3);
        assert_eq!(section.cursor.page_index, 0);
    }

    #[test]
    fn current_position_reads_present() {
        let configuration = LayoutConfiguration::default();
        let entry = ExperienceEntry {
            current: true,
            end_date: "2021".into(),
            ..entry_with_points(0)
        };
        let section = render_experience(&[entry], &configuration, LayoutCursor::new(&configuration));
        assert!(texts(&section)
            .iter()
            .any(|(_, text, _)| text == "2019 - Present"));
    }

    #[test]
    fn long_point_lists_break_across_pages_without_losing_points() {
        let configuration = LayoutConfiguration::default();
        let cursor = LayoutCursor::new(&configuration).at(100.0);
        let section = render_experience(&[entry_with_points(80)], &configuration, cursor);

        let points: Vec<(usize, String, f32)> = texts(&section)
            .into_iter()
            .filter(|(_, text, _)| text.starts_with('•'))
            .collect();
        assert_eq!(points.len(), 80);
        for (index, (_, text, y)) in points.iter().enumerate() {
            assert_eq!(*text, format!("• Delivered milestone number {}", index));
            assert!(*y <= configuration.safe_bottom());
        }
        assert!(points.last().map(|(page, _, _)| *page).unwrap_or(0) >= 1);
    }

    #[test]
    fn blank_optional_parts_are_skipped() {
        let configuration = LayoutConfiguration::default();
        let entry = ExperienceEntry {
            description: Some("  ".into()),
            projects: vec![ProjectEntry {
                name: "Search".into(),
                url: Some(String::new()),
                points: vec![String::new()],
                ..Default::default()
            }],
            ..entry_with_points(0)
        };
        let section = render_experience(&[entry], &configuration, LayoutCursor::new(&configuration));
        let texts: Vec<String> = texts(&section).into_iter().map(|(_, text, _)| text).collect();
        assert_eq!(
            texts,
            vec!["WORK EXPERIENCE", "Engineer", "Acme", "2019 - 2021", "Project: Search", " - "]
        );
    }
}
