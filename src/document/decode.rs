// src/document/decode.rs
use std::io::{Cursor, Read};

use crate::utils::error::DecodeError;

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const DOCX_BODY_PART: &str = "word/document.xml";

pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "pdf", "docx"];

pub fn is_supported(extension: &str) -> bool {
    let ext = normalize_extension(extension);
    SUPPORTED_EXTENSIONS.contains(&ext.as_str())
}

fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Decodes raw file bytes into linear text according to the file extension.
pub fn decode(bytes: &[u8], extension: &str) -> Result<String, DecodeError> {
    match normalize_extension(extension).as_str() {
        "txt" => Ok(decode_text(bytes)),
        "pdf" => decode_pdf(bytes),
        "docx" => decode_docx(bytes),
        _ => Err(DecodeError::UnsupportedFormat(extension.to_string())),
    }
}

/// UTF-8 with invalid sequences dropped rather than replaced.
fn decode_text(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

fn decode_pdf(bytes: &[u8]) -> Result<String, DecodeError> {
    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| DecodeError::Pdf(e.to_string()))?;
    tracing::debug!("Extracted {} bytes of text from PDF", text.len());
    Ok(text)
}

/// Body-level paragraphs of `word/document.xml`, joined with newlines.
fn decode_docx(bytes: &[u8]) -> Result<String, DecodeError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY_PART)
        .map_err(|e| DecodeError::Docx(format!("Cannot find {}: {}", DOCX_BODY_PART, e)))?
        .read_to_string(&mut xml)?;

    let doc = roxmltree::Document::parse(&xml)?;
    let body = doc
        .descendants()
        .find(|node| node.has_tag_name((WORDML_NS, "body")))
        .ok_or_else(|| DecodeError::Docx("document.xml has no body element".to_string()))?;

    let paragraphs: Vec<String> = body
        .children()
        .filter(|node| node.has_tag_name((WORDML_NS, "p")))
        .map(paragraph_text)
        .collect();
    tracing::debug!("Extracted {} paragraphs from DOCX", paragraphs.len());

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: roxmltree::Node) -> String {
    let mut text = String::new();
    for node in paragraph.descendants() {
        // tab stops in paragraph properties share the w:tab name; only runs carry content
        let in_run = node
            .parent()
            .is_some_and(|parent| parent.has_tag_name((WORDML_NS, "r")));
        if !in_run || !node.is_element() {
            continue;
        }
        match node.tag_name().name() {
            "t" => text.push_str(node.text().unwrap_or_default()),
            "tab" => text.push('\t'),
            "br" | "cr" => text.push('\n'),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn make_docx(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        writer.start_file(DOCX_BODY_PART, options).unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    fn wrap_body(paragraphs: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            WORDML_NS, paragraphs
        )
    }

    #[test]
    fn text_drops_invalid_bytes() {
        let bytes = b"Grading\xff Policy\n\xc3\xa9t\xc3\xa9";
        assert_eq!(decode(bytes, "txt").unwrap(), "Grading Policy\nété");
    }

    #[test]
    fn extension_matching_is_lenient() {
        assert!(is_supported(".TXT"));
        assert!(is_supported("docx"));
        assert!(!is_supported("doc"));
        assert_eq!(decode(b"abc", ".Txt").unwrap(), "abc");
    }

    #[test]
    fn unsupported_extension_fails() {
        let err = decode(b"abc", "rtf").unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedFormat(ext) if ext == "rtf"));
    }

    #[test]
    fn docx_paragraphs_in_order() {
        let xml = wrap_body(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>CS 101: Intro</w:t></w:r></w:p>
<w:p/>
<w:p><w:r><w:t xml:space="preserve">Course </w:t></w:r><w:r><w:t>Description</w:t></w:r></w:p>
<w:p><w:r><w:t>Week</w:t><w:tab/><w:t>Topic</w:t><w:br/><w:t>next</w:t></w:r></w:p>"#,
        );
        let text = decode(&make_docx(&xml), "docx").unwrap();
        assert_eq!(text, "CS 101: Intro\n\nCourse Description\nWeek\tTopic\nnext");
    }

    #[test]
    fn docx_without_document_part_fails() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();
        assert!(matches!(decode(&bytes, "docx"), Err(DecodeError::Docx(_))));
    }

    /// One Helvetica text line per page, pages in the given order.
    fn make_pdf(pages: &[&str]) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let pages_id = doc.new_object_id();

        let kids: Vec<Object> = pages
            .iter()
            .map(|text| {
                let content = format!("BT /F1 12 Tf 100 700 Td ({}) Tj ET", text);
                let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
                doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                    "Contents" => content_id,
                    "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
                })
                .into()
            })
            .collect();

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn pdf_pages_are_concatenated_in_order() {
        let bytes = make_pdf(&["Syllabus Alpha", "Schedule Omega"]);
        let text = decode(&bytes, "pdf").expect("valid two-page PDF decodes");

        let first = text.find("Alpha").unwrap_or_else(|| panic!("page 1 text missing: {:?}", text));
        let second = text.find("Omega").unwrap_or_else(|| panic!("page 2 text missing: {:?}", text));
        assert!(first < second, "page 1 must precede page 2, got: {:?}", text);
    }

    #[test]
    fn corrupt_containers_fail() {
        assert!(matches!(decode(b"not a zip", "docx"), Err(DecodeError::Zip(_))));
        assert!(matches!(decode(b"not a pdf", "pdf"), Err(DecodeError::Pdf(_))));
    }
}
