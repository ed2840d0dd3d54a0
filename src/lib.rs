//! cvpdf lays out a résumé, as collected by a résumé wizard, onto fixed-size pages and writes it
//! as a PDF document.
//!
//! Layout and serialization are kept apart: the `assembler` turns a `ResumeDocument` into a
//! `Document`, which is nothing more than pages of positioned draw operations, and the `pdf` module
//! converts such a `Document` into an actual PDF file. The intermediate representation can be
//! inspected (or dumped as JSON) which is what the tests of this crate rely on.

/// The input model: personal information, summary, skills, experience with nested projects
/// and education.
///
/// # Introduction
///
/// A `ResumeDocument` is read from the JSON state of the wizard through `from_path` or `from_json_str`.
/// The personal fields are stored flat at the top level of the JSON object, the collections may be
/// omitted entirely. Empty or whitespace-only optional strings are treated as absent.
///
/// The layout never rejects a résumé, but `validate` reproduces the checks the wizard performs
/// before generation (required names, email, company and position and so on), so that the
/// command line interface can refuse incomplete input.
pub mod resume;

/// The parameters of the layout: page size, margins, font sizes, spacings, colors and the
/// suggested output file name. Every field has a default, so a configuration file only needs
/// to mention what it changes.
pub mod configuration;

/// This module contains the `ContextError` type which is the error type used throughout this library.
///
/// The reason why this type has been implemented is to uniform the error reporting without delving too deep
/// into specific error codes which for such library would be too many and definitely out of scope.
///
/// Layout itself cannot fail, so errors only come from reading files, parsing JSON, validating the
/// input or the configuration and encoding the PDF document.
pub mod error;

/// RGB colors and the parsing of the user supplied header color.
pub mod color;

/// Advance widths of the standard Helvetica fonts and the greedy word wrapping built on top of them.
pub mod metrics;

/// The vertical cursor threaded through the section renderers, which decides where page breaks happen.
pub mod cursor;

/// The laid out `Document`: pages of draw operations with absolute coordinates in millimeters,
/// measured from the top-left corner of the page.
pub mod document;

/// The renderers of the header, summary, skills, experience and education sections.
pub mod sections;

/// Runs the section renderers in order and collects their operations into a `Document`.
pub mod assembler;

/// The module where the `PdfDocument` interface for working with PDF documents is presented.
///
/// # Disclaimer
///
/// The documents use the standard Type1 fonts Helvetica and Helvetica-Bold, which every PDF reader
/// provides, so no font program is embedded and the text is limited to what the Windows code page
/// can encode. The PDF identifiers are derived from the content of the document instead of being
/// random, which keeps the output reproducible for a given creation date.
///
/// The documents produced by this module can be parsed by any PDF application, but they can be further
/// reduced in size by running them through `gs`, see `optimize_pdf_file_with_gs`. This function relies
/// on the pre-installed version of `gs` onto the operating system of the end user.
pub mod pdf;
