use lopdf::content::Operation;
use lopdf::{Object, StringFormat};
use sha2::{Digest as _, Sha256};
use std::{io::BufWriter, mem, path::Path};
use time::OffsetDateTime;
use unicode_normalization::UnicodeNormalization as _;

use crate::document::{Document, DrawOperation};
use crate::error::ContextError;
use crate::metrics::FontWeight;

/// One of the standard Type1 fonts every PDF reader ships with, so that no font data has to be
/// embedded into the document.
#[derive(Debug, Clone, Copy)]
struct StandardFont {
    /// The name the font is referred to by in the page resources.
    resource_name: &'static str,
    /// The PostScript name of the font.
    base_font: &'static str,
}

const HELVETICA: StandardFont = StandardFont {
    resource_name: "F1",
    base_font: "Helvetica",
};

const HELVETICA_BOLD: StandardFont = StandardFont {
    resource_name: "F2",
    base_font: "Helvetica-Bold",
};

fn standard_font(weight: FontWeight) -> StandardFont {
    match weight {
        FontWeight::Regular => HELVETICA,
        FontWeight::Bold => HELVETICA_BOLD,
    }
}

impl StandardFont {
    /// The PDF dictionary describing the font, using the Windows code page for the text strings.
    fn dictionary(&self) -> lopdf::Dictionary {
        use lopdf::Object::*;

        lopdf::Dictionary::from_iter(vec![
            ("Type", Name("Font".into())),
            ("Subtype", Name("Type1".into())),
            ("BaseFont", Name(self.base_font.into())),
            ("Encoding", Name("WinAnsiEncoding".into())),
        ])
    }
}

/// The representation of a PDF page: its size and the content stream operations drawn onto it.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// Page width in points.
    pub width: f32,
    /// Page height in points.
    pub height: f32,
    /// Page height in millimeters, needed to flip the top-down layout coordinates.
    height_in_millimeters: f32,
    /// The content stream operations, in drawing order.
    operations: Vec<Operation>,
}

impl PdfPage {
    /// Converts a point given in millimeters from the top-left corner into PDF user space,
    /// which is expressed in points from the bottom-left corner.
    fn to_user_space(&self, [x, y]: [f32; 2]) -> [f32; 2] {
        [
            millimeters_to_points(x),
            millimeters_to_points(self.height_in_millimeters - y),
        ]
    }
}

/// Converts millimeters to points. This function is used in order to present the data
/// in the format required by the PDF specification, while the layout works in
/// millimeters which are easier to reason about.
fn millimeters_to_points(millimeters: f32) -> f32 {
    millimeters * 2.834646
}

/// Metadata written into the document information dictionary.
#[derive(Debug, Clone)]
pub struct DocumentInformation {
    pub title: String,
    pub author: String,
    pub creation_date: OffsetDateTime,
}

/// This struct represents the actual PDF document on a high-level. It is an interface to the actual underlying
/// `lopdf::Document` with the addition of the PDF pages and the document ID.
///
/// Pages are addressed by the index returned from `add_page`, every drawing function takes
/// coordinates in millimeters measured from the top-left corner of the page.
pub struct PdfDocument {
    /// The underlying PDF document: this is a low-level interface and shouldn't be directly interacted with
    /// unless strictly necessary, anyway this is why it is exposed to the user.
    pub inner_document: lopdf::Document,
    /// The identifier of the document, it is used to in order to set the PDF `ID` tag.
    pub identifier: String,
    /// The pages of the PDF document.
    pub(crate) pages: Vec<PdfPage>,
}

impl PdfDocument {
    /// Create a new `PdfDocument` by defaulting the underlying PDF document to version 1.5
    /// of the PDF specification and customly specifying the PDF identifier.
    pub fn new(pdf_document_identifier: String) -> Self {
        PdfDocument {
            inner_document: lopdf::Document::with_version("1.5"),
            identifier: pdf_document_identifier,
            pages: Vec::new(),
        }
    }

    /// Adds an empty page of given width and height in millimeters and returns its index.
    pub fn add_page(&mut self, page_width: f32, page_height: f32) -> usize {
        self.pages.push(PdfPage {
            width: millimeters_to_points(page_width),
            height: millimeters_to_points(page_height),
            height_in_millimeters: page_height,
            operations: Vec::new(),
        });

        self.pages.len() - 1
    }

    /// Writes the text in the given weight, size and color with its baseline starting at the caret position.
    ///
    /// # Arguments
    ///
    /// * `page_index` - The index of the page to write the text to (should be previously obtained).
    /// * `color` - The RGB color employed for filling of the text.
    /// * `text` - The text to be written, it is normalized and encoded with the Windows code page.
    /// * `weight` - Whether the regular or the bold Helvetica is used.
    /// * `font_size` - The size of the font in points.
    /// * `caret_position` - The position in millimeters where the text should begin to be drawn.
    pub fn write_text_to_page(
        &mut self,
        page_index: usize,
        color: [f32; 3],
        text: &str,
        weight: FontWeight,
        font_size: f32,
        caret_position: [f32; 2],
    ) -> Result<(), ContextError> {
        let font = standard_font(weight);
        let page = self.get_mut_page(page_index)?;
        let [x, y] = page.to_user_space(caret_position);
        let [r, g, b] = color;

        page.operations.extend(vec![
            Operation::new("BT", vec![]), // Begin text section
            Operation::new(
                "Tf",
                vec![Object::Name(font.resource_name.into()), font_size.into()],
            ),
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(
                    encode_win_ansi(text),
                    StringFormat::Hexadecimal,
                )],
            ),
            Operation::new("ET", vec![]),
        ]);

        Ok(())
    }

    /// Fills the rectangle whose top-left corner is at `origin` (in millimeters) with the given color.
    pub fn fill_rectangle_in_page(
        &mut self,
        page_index: usize,
        color: [f32; 3],
        origin: [f32; 2],
        size: [f32; 2],
    ) -> Result<(), ContextError> {
        let page = self.get_mut_page(page_index)?;
        let [width, height] = size;
        // PDF rectangles are anchored at their bottom-left corner
        let [x, y] = page.to_user_space([origin[0], origin[1] + height]);
        let [r, g, b] = color;

        page.operations.extend(vec![
            Operation::new("q", vec![]),
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            Operation::new(
                "re",
                vec![
                    x.into(),
                    y.into(),
                    millimeters_to_points(width).into(),
                    millimeters_to_points(height).into(),
                ],
            ),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ]);

        Ok(())
    }

    /// Strokes a straight line between two points given in millimeters.
    pub fn stroke_line_in_page(
        &mut self,
        page_index: usize,
        color: [f32; 3],
        line_width: f32,
        start: [f32; 2],
        end: [f32; 2],
    ) -> Result<(), ContextError> {
        let page = self.get_mut_page(page_index)?;
        let [start_x, start_y] = page.to_user_space(start);
        let [end_x, end_y] = page.to_user_space(end);
        let [r, g, b] = color;

        page.operations.extend(vec![
            Operation::new("q", vec![]),
            Operation::new("RG", vec![r.into(), g.into(), b.into()]),
            Operation::new("w", vec![millimeters_to_points(line_width).into()]),
            Operation::new("m", vec![start_x.into(), start_y.into()]),
            Operation::new("l", vec![end_x.into(), end_y.into()]),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ]);

        Ok(())
    }

    /// Write the pages and the document structure to the underlying document and finalize it.
    ///
    /// The instance ID is the second half of the trailer `ID`, it must be 32 characters long.
    pub fn write_all(
        &mut self,
        instance_id: String,
        information: &DocumentInformation,
    ) -> Result<(), ContextError> {
        use lopdf::Object::*;
        use lopdf::StringFormat::*;

        let creation_date = to_pdf_timestamp_format(&information.creation_date).into_bytes();
        let document_info = lopdf::Dictionary::from_iter(vec![
            ("Trapped", "False".into()),
            ("CreationDate", String(creation_date.clone(), Literal)),
            ("ModDate", String(creation_date, Literal)),
            ("Title", String(encode_win_ansi(&information.title), Literal)),
            ("Author", String(encode_win_ansi(&information.author), Literal)),
            ("Creator", String(b"cvpdf".to_vec(), Literal)),
            (
                "Producer",
                String(
                    format!("cvpdf {}", env!("CARGO_PKG_VERSION")).into_bytes(),
                    Literal,
                ),
            ),
            (
                "Identifier",
                String(self.identifier.clone().into_bytes(), Literal),
            ),
        ]);
        let document_info_id = self.inner_document.add_object(Dictionary(document_info));

        // Construct the catalog, required by the PDF specification
        let pages_id = self.inner_document.new_object_id();
        let catalog = lopdf::Dictionary::from_iter(vec![
            ("Type", "Catalog".into()),
            ("PageLayout", "OneColumn".into()),
            ("PageMode", "UseNone".into()),
            ("Pages", Reference(pages_id)),
        ]);
        let catalog_id = self.inner_document.add_object(catalog);

        self.inner_document
            .trailer
            .set("Root", Reference(catalog_id));
        self.inner_document
            .trailer
            .set("Info", Reference(document_info_id));
        self.inner_document.trailer.set(
            "ID",
            Array(vec![
                String(self.identifier.clone().into_bytes(), Literal),
                String(instance_id.into_bytes(), Literal),
            ]),
        );

        // Both fonts are shared by every page through a single resource dictionary
        let mut fonts_dictionary = lopdf::Dictionary::new();
        for font in [HELVETICA, HELVETICA_BOLD] {
            let font_id = self.inner_document.add_object(font.dictionary());
            fonts_dictionary.set(font.resource_name, Reference(font_id));
        }
        let resources_id = self
            .inner_document
            .add_object(lopdf::Dictionary::from_iter(vec![(
                "Font",
                Dictionary(fonts_dictionary),
            )]));

        let mut page_ids = Vec::<lopdf::Object>::new();
        for page in mem::take(&mut self.pages) {
            let media_box = Array(vec![
                Integer(0),
                Integer(0),
                page.width.into(),
                page.height.into(),
            ]);

            let content = lopdf::content::Content {
                operations: page.operations,
            }
            .encode()
            .map_err(|error| {
                ContextError::with_error("Failed to encode the page content", &error)
            })?;
            let content_id = self
                .inner_document
                .add_object(lopdf::Stream::new(lopdf::Dictionary::new(), content));

            let page_dictionary = lopdf::Dictionary::from_iter(vec![
                ("Type", "Page".into()),
                ("Rotate", Integer(0)),
                ("MediaBox", media_box.clone()),
                ("TrimBox", media_box.clone()),
                ("CropBox", media_box),
                ("Parent", Reference(pages_id)),
                ("Resources", Reference(resources_id)),
                ("Contents", Reference(content_id)),
            ]);
            let page_id = self.inner_document.add_object(page_dictionary);
            page_ids.push(Reference(page_id));
        }

        let pages = lopdf::Dictionary::from_iter(vec![
            ("Type", "Pages".into()),
            ("Count", Integer(page_ids.len() as i64)),
            ("Kids", Array(page_ids)),
        ]);
        self.inner_document
            .objects
            .insert(pages_id, Dictionary(pages));

        Ok(())
    }

    /// Optimize the PDF document (only superficially).
    pub fn optimize(&mut self) {
        self.inner_document.prune_objects();
        self.inner_document.delete_zero_length_streams();
        self.inner_document.renumber_objects();
        self.inner_document.compress();
    }

    /// Save the `PdfDocument` to bytes in order for it to be written to a file or further processed.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, ContextError> {
        let mut pdf_document_bytes = Vec::new();
        let mut writer = BufWriter::new(&mut pdf_document_bytes);
        self.inner_document.save_to(&mut writer).map_err(|error| {
            ContextError::with_error("Error while saving the PDF document to bytes", &error)
        })?;
        mem::drop(writer);

        Ok(pdf_document_bytes)
    }

    // Retrieve the page at the given index.
    fn get_mut_page(&mut self, page_index: usize) -> Result<&mut PdfPage, ContextError> {
        self.pages
            .get_mut(page_index)
            .ok_or(ContextError::with_context(format!(
                "Failed to find the page with index {}",
                page_index
            )))
    }
}

/// Converts a laid out document into a finished PDF document, ready to be saved.
///
/// The identifiers are derived from the document content, so the same résumé and creation date
/// always give byte-identical files.
pub fn document_to_pdf(
    document: &Document,
    author: &str,
    creation_date: OffsetDateTime,
) -> Result<PdfDocument, ContextError> {
    let (document_id, instance_id) = document_identifiers(document)?;
    let mut pdf_document = PdfDocument::new(document_id);

    for page in &document.pages {
        let page_index = pdf_document.add_page(page.width, page.height);
        for operation in &page.operations {
            match operation {
                DrawOperation::Text(text_run) => pdf_document.write_text_to_page(
                    page_index,
                    text_run.color.to_pdf_components(),
                    &text_run.text,
                    text_run.weight,
                    text_run.font_size,
                    [text_run.x, text_run.y],
                )?,
                DrawOperation::FilledRectangle {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => pdf_document.fill_rectangle_in_page(
                    page_index,
                    color.to_pdf_components(),
                    [*x, *y],
                    [*width, *height],
                )?,
                DrawOperation::Line {
                    start,
                    end,
                    width,
                    color,
                } => pdf_document.stroke_line_in_page(
                    page_index,
                    color.to_pdf_components(),
                    *width,
                    *start,
                    *end,
                )?,
            }
        }
    }

    pdf_document.write_all(
        instance_id,
        &DocumentInformation {
            title: document.title.clone(),
            author: author.to_string(),
            creation_date,
        },
    )?;
    log::debug!(
        "Converted {:?} into a PDF document with {} page(s)",
        document.title,
        document.page_count()
    );

    Ok(pdf_document)
}

/// Two 32 characters long hexadecimal identifiers, the leading half of the SHA-256 digest of the
/// serialized document prefixed by a distinct salt.
fn document_identifiers(document: &Document) -> Result<(String, String), ContextError> {
    let serialized_document = serde_json::to_vec(document).map_err(|error| {
        ContextError::with_error("Failed to serialize the document for its identifier", &error)
    })?;

    let digest = |salt: &[u8]| {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(&serialized_document);
        hasher.finalize()[..16]
            .iter()
            .map(|byte| format!("{:02x}", byte))
            .collect::<String>()
    };

    Ok((digest(b"document"), digest(b"instance")))
}

/// Encodes the text with the Windows code page 1252 expected by `WinAnsiEncoding`, after
/// normalizing it in the NFC form. Characters outside of the code page become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.nfc()
        .filter_map(|character| match character {
            ' '..='~' | '\u{a0}'..='\u{ff}' => Some(character as u8),
            '\t' => Some(b' '),
            character if character.is_control() => None,
            character => Some(match windows_1252_extension(character) {
                Some(byte) => byte,
                None => {
                    log::warn!(
                        "Unable to encode the character {:?} with the standard fonts, replacing it",
                        character
                    );
                    b'?'
                }
            }),
        })
        .collect()
}

/// The printable characters code page 1252 places in the `0x80..=0x9f` range.
fn windows_1252_extension(character: char) -> Option<u8> {
    let byte = match character {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        _ => return None,
    };
    Some(byte)
}

/// Formats the given time so that it matches what the PDF specification expects.
/// An example of it is the following: D:20170505150224+02'00'.
fn to_pdf_timestamp_format(date: &OffsetDateTime) -> String {
    let offset = date.offset();
    let offset_sign = if offset.is_negative() { '-' } else { '+' };
    format!(
        "D:{:04}{:02}{:02}{:02}{:02}{:02}{offset_sign}{:02}'{:02}'",
        date.year(),
        u8::from(date.month()),
        date.day(),
        date.hour(),
        date.minute(),
        date.second(),
        offset.whole_hours().abs(),
        offset.minutes_past_hour().abs(),
    )
}

/// This function is used to optimize the PDF file by running ghostscript on it. The command which is run
/// is the following:
///
/// ```bash
/// $ gs -sDEVICE=pdfwrite -dCompatibilityLevel=1.5 -dPDFSETTINGS=/ebook -dNOPAUSE -dQUIET -dBATCH -sOutputFile=output.pdf input.pdf
/// ```
///
/// What we do though is to create an intermediate `.swp` file and then rename it to the expected one.
pub fn optimize_pdf_file_with_gs(pdf_path: &Path) -> Result<(), ContextError> {
    let mut swap_path = pdf_path.as_os_str().to_owned();
    swap_path.push(".swp");

    let mut output_argument = std::ffi::OsString::from("-sOutputFile=");
    output_argument.push(&swap_path);

    let status = std::process::Command::new("gs")
        .arg("-sDEVICE=pdfwrite")
        .arg("-dCompatibilityLevel=1.5")
        .arg("-dPDFSETTINGS=/ebook")
        .arg("-dNOPAUSE")
        .arg("-dQUIET")
        .arg("-dBATCH")
        .arg(output_argument)
        .arg(pdf_path)
        .status()
        .map_err(|error| ContextError::with_error("Unable to run the gs command", &error))?;
    if !status.success() {
        return Err(ContextError::with_context(format!(
            "gs failed with status {:?}",
            status
        )));
    }

    std::fs::rename(&swap_path, pdf_path).map_err(|error| {
        ContextError::with_error("Unable to rename the optimized PDF file", &error)
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::document::{Page, TextRun};

    fn one_line_document() -> Document {
        let mut page = Page::new(210.0, 297.0);
        page.operations.push(DrawOperation::FilledRectangle {
            x: 0.0,
            y: 0.0,
            width: 210.0,
            height: 35.0,
            color: Rgb([88, 28, 135]),
        });
        page.operations.push(DrawOperation::Text(TextRun {
            x: 20.0,
            y: 15.0,
            text: "Jane Doe".into(),
            weight: FontWeight::Bold,
            font_size: 24.0,
            color: Rgb::WHITE,
        }));
        Document {
            title: "Jane Doe - Resume".into(),
            file_name: "Professional_ATS_Resume.pdf".into(),
            pages: vec![page],
        }
    }

    #[test]
    fn win_ansi_encoding_maps_the_typographic_characters() {
        assert_eq!(encode_win_ansi("• GPA"), vec![0x95, b' ', b'G', b'P', b'A']);
        assert_eq!(encode_win_ansi("café – ok"), b"caf\xe9 \x96 ok".to_vec());
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
        assert_eq!(encode_win_ansi("a\tb\n"), b"a b".to_vec());
    }

    #[test]
    fn decomposed_accents_are_composed_before_encoding() {
        assert_eq!(encode_win_ansi("e\u{301}"), vec![0xe9]);
    }

    #[test]
    fn timestamp_follows_the_pdf_date_format() {
        assert_eq!(
            to_pdf_timestamp_format(&OffsetDateTime::UNIX_EPOCH),
            "D:19700101000000+00'00'"
        );
    }

    #[test]
    fn layout_coordinates_are_flipped_into_user_space() {
        let mut pdf_document = PdfDocument::new("identifier".into());
        let page_index = pdf_document.add_page(210.0, 297.0);
        let page = &pdf_document.pages[page_index];
        let [x, y] = page.to_user_space([20.0, 15.0]);
        assert!((x - 56.69292).abs() < 1e-3);
        assert!((y - 282.0 * 2.834646).abs() < 1e-3);
    }

    #[test]
    fn drawing_on_a_missing_page_fails() {
        let mut pdf_document = PdfDocument::new("identifier".into());
        let result = pdf_document.write_text_to_page(
            3,
            [0.0, 0.0, 0.0],
            "text",
            FontWeight::Regular,
            10.0,
            [0.0, 0.0],
        );
        assert!(result.is_err());
    }

    #[test]
    fn saved_document_can_be_loaded_back() {
        let mut pdf_document =
            document_to_pdf(&one_line_document(), "Jane Doe", OffsetDateTime::UNIX_EPOCH).unwrap();
        let bytes = pdf_document.save_to_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let loaded = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(loaded.get_pages().len(), 1);
    }

    #[test]
    fn identifiers_follow_the_sha256_digest() {
        let document = one_line_document();
        let serialized_document = serde_json::to_vec(&document).unwrap();
        let mut hasher = Sha256::new();
        hasher.update(b"document");
        hasher.update(&serialized_document);
        let expected: String = hasher.finalize()[..16]
            .iter()
            .map(|byte| format!("{:02x}", byte))
            .collect();

        let (document_id, _) = document_identifiers(&document).unwrap();
        assert_eq!(document_id, expected);
        assert!(document_id.chars().all(|character| character.is_ascii_hexdigit()));
    }

    #[test]
    fn identifiers_are_deterministic() {
        let (document_id, instance_id) = document_identifiers(&one_line_document()).unwrap();
        assert_eq!(document_id.len(), 32);
        assert_ne!(document_id, instance_id);
        assert_eq!(
            document_identifiers(&one_line_document()).unwrap(),
            (document_id, instance_id)
        );
    }
}
