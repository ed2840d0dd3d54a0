use crate::configuration::LayoutConfiguration;
use crate::cursor::LayoutCursor;
use crate::document::{Document, Page};
use crate::resume::{present, ResumeDocument};
use crate::sections::{self, RenderedSection};

/// Lays out the résumé in the fixed order header, summary, skills, experience, education.
///
/// Each section starts from the cursor the previous one returned. Layout never fails: absent
/// data skips its section and a malformed header color falls back to the default.
///
/// The configuration is expected to have passed `LayoutConfiguration::validate`. One that did not
/// still lays out without panicking (zero columns count as one) but may draw outside the page.
pub fn generate_resume(resume: &ResumeDocument, configuration: &LayoutConfiguration) -> Document {
    let mut pages = vec![Page::new(configuration.page_width, configuration.page_height)];
    let cursor = LayoutCursor::new(configuration);

    let header = sections::render_header(&resume.personal, configuration, cursor);
    let cursor = place(&mut pages, header, configuration, "header");

    let summary = sections::render_summary(present(&resume.summary), configuration, cursor);
    let cursor = place(&mut pages, summary, configuration, "summary");

    let skills = sections::render_skills(&resume.skills, configuration, cursor);
    let cursor = place(&mut pages, skills, configuration, "skills");

    let experience = sections::render_experience(&resume.experience, configuration, cursor);
    let cursor = place(&mut pages, experience, configuration, "experience");

    let education = sections::render_education(&resume.education, configuration, cursor);
    place(&mut pages, education, configuration, "education");

    let full_name = resume.personal.full_name();
    let title = if full_name.is_empty() {
        "Resume".to_string()
    } else {
        format!("{} - Resume", full_name)
    };
    log::info!("Laid out {:?} on {} page(s)", title, pages.len());

    Document {
        title,
        file_name: configuration.file_name.clone(),
        pages,
    }
}

/// Every template the generator offers, currently the single professional one.
pub fn generate_resumes(
    resume: &ResumeDocument,
    configuration: &LayoutConfiguration,
) -> Vec<Document> {
    vec![generate_resume(resume, configuration)]
}

/// Moves the operations of a section onto their pages, opening pages as the section asks for them,
/// and returns the cursor for the next section.
fn place(
    pages: &mut Vec<Page>,
    section: RenderedSection,
    configuration: &LayoutConfiguration,
    section_name: &str,
) -> LayoutCursor {
    log::debug!(
        "Placed the {} section: {} operation(s), cursor now on page {} at y = {:.1}",
        section_name,
        section.operations.len(),
        section.cursor.page_index + 1,
        section.cursor.y
    );

    // A break that nothing was drawn after does not open a page
    let last_page_index = section
        .operations
        .iter()
        .map(|placed| placed.page_index)
        .max()
        .unwrap_or(0);
    while pages.len() <= last_page_index {
        pages.push(Page::new(configuration.page_width, configuration.page_height));
    }

    for placed in section.operations {
        pages[placed.page_index].operations.push(placed.operation);
    }

    section.cursor
}
