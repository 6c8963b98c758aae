// src/extractors/section.rs

// --- Imports ---
use crate::catalog::{
    self, SectionCatalog, METADATA_KEYWORDS, METADATA_LABEL_MAX_CHARS, SYLLABUS_CATALOG,
};

// --- Constants ---
const BULLET_GLYPHS: &[char] = &['•', '-', '*'];

// --- Main Extractor Structure ---
/// Locates named sections in decoded syllabus text.
///
/// All positions are byte offsets into the original text. The document is
/// lower-cased with ASCII rules only, so offsets found in the lowered copy are
/// valid in the original and always fall on character boundaries.
#[derive(Debug, Clone, Copy)]
pub struct SectionExtractor<'c> {
    catalog: &'c SectionCatalog,
}

impl Default for SectionExtractor<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionExtractor<'static> {
    pub fn new() -> Self {
        Self { catalog: &SYLLABUS_CATALOG }
    }
}

impl<'c> SectionExtractor<'c> {
    pub fn with_catalog(catalog: &'c SectionCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'c SectionCatalog {
        self.catalog
    }

    /// Extracts the cleaned body of `section_name`, or `None` when it cannot be located.
    pub fn extract(&self, text: &str, section_name: &str) -> Option<String> {
        let name = self.catalog.canonical_name(section_name);
        let lowered = text.to_ascii_lowercase();

        // 1. First alias (in declared order) that occurs anywhere
        let heading_start = self.find_heading(&lowered, name)?;

        // 2. The heading line itself is discarded
        let heading_end = line_end(text, heading_start);

        // 3. Skip blank space and short metadata lines
        let content_start = skip_to_content(text, heading_end + 1)?;

        // 4. Earliest marker of any other section after the content start
        let content_end = self.find_boundary(&lowered, content_start, name);
        tracing::trace!(
            "Section '{}' body spans bytes {}..{}",
            name,
            content_start,
            content_end
        );

        // 5. Trim, drop blank lines
        let body = tidy_lines(&text[content_start..content_end]);
        if body.is_empty() {
            tracing::debug!("Section '{}' located but its body is empty", name);
            return None;
        }

        // 6. Section-specific formatting
        if catalog::is_outcomes_section(name) {
            return Some(number_outcomes(&body));
        }
        Some(body)
    }

    fn find_heading(&self, lowered: &str, name: &str) -> Option<usize> {
        for alias in self.catalog.aliases_for(name) {
            if alias.is_empty() {
                continue;
            }
            if let Some(idx) = lowered.find(&alias) {
                tracing::debug!("Found heading for '{}' via alias '{}' at byte {}", name, alias, idx);
                return Some(idx);
            }
        }
        tracing::debug!("No heading found for section '{}'", name);
        None
    }

    /// Markers equal to the section's own name are skipped so a section never ends itself.
    fn find_boundary(&self, lowered: &str, from: usize, name: &str) -> usize {
        let rest = &lowered[from..];
        self.catalog
            .boundary_markers()
            .filter(|marker| !marker.eq_ignore_ascii_case(name))
            .filter_map(|marker| {
                rest.find(&marker.to_ascii_lowercase()).map(|idx| (from + idx, marker))
            })
            .min_by_key(|(idx, _)| *idx)
            .map(|(idx, marker)| {
                tracing::trace!("Section '{}' ends at marker '{}'", name, marker);
                idx
            })
            .unwrap_or(lowered.len())
    }
}

// --- Free Functions ---

/// Extracts a section using the built-in syllabus catalog.
pub fn extract_section(text: &str, section_name: &str) -> Option<String> {
    SectionExtractor::new().extract(text, section_name)
}

/// Byte offset of the newline ending the line that contains `pos`, or the text length.
fn line_end(text: &str, pos: usize) -> usize {
    text[pos..].find('\n').map_or(text.len(), |idx| pos + idx)
}

/// Returns the start of the first real content line at or after `pos`.
fn skip_to_content(text: &str, mut pos: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    loop {
        while pos < bytes.len() && matches!(bytes[pos], b'\n' | b'\r' | b'\t' | b' ') {
            pos += 1;
        }
        if pos >= bytes.len() {
            return None;
        }

        let end = line_end(text, pos);
        let line = &text[pos..end];
        if !is_metadata_line(line) {
            return Some(pos);
        }
        tracing::trace!("Skipping metadata line: '{}'", line.trim());
        pos = end + 1;
    }
}

/// A short `Label: value` line whose label names course metadata.
pub(crate) fn is_metadata_line(line: &str) -> bool {
    let Some((label, _)) = line.trim().split_once(':') else {
        return false;
    };
    let label = label.trim();
    if label.chars().count() >= METADATA_LABEL_MAX_CHARS {
        return false;
    }
    let label = label.to_lowercase();
    METADATA_KEYWORDS.iter().any(|keyword| label.contains(keyword))
}

fn tidy_lines(raw: &str) -> String {
    raw.trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefixes `N. ` (1-based line position) to every line not already numbered or bulleted.
pub fn number_outcomes(body: &str) -> String {
    body.lines()
        .enumerate()
        .map(|(idx, line)| match line.chars().next() {
            Some(first) if first.is_ascii_digit() || BULLET_GLYPHS.contains(&first) => line.to_string(),
            Some(_) => format!("{}. {}", idx + 1, line),
            None => String::new(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    const SYLLABUS: &str = "\
CS 101: Intro to Programming
Fall 2024

Course Description
Semester: Fall 2024
Modality: Online
This course introduces programming.
It covers loops and functions.

Learning Outcomes

Write simple programs
2. Debug code
- Explain recursion

Grading Policy
Homework 40%
Exams 60%
";

    #[test]
    fn extracts_body_between_headings() {
        let body = extract_section(SYLLABUS, "Course Description").expect("description present");
        assert_eq!(body, "This course introduces programming.\nIt covers loops and functions.");
    }

    #[test]
    fn last_section_runs_to_end_of_document() {
        let body = extract_section(SYLLABUS, "grading policy").expect("grading present");
        assert_eq!(body, "Homework 40%\nExams 60%");
    }

    #[test]
    fn metadata_line_under_heading_is_skipped() {
        let text = "Prerequisites\nPrerequisites: None\nThis course covers...";
        assert_eq!(extract_section(text, "Prerequisites").as_deref(), Some("This course covers..."));
    }

    #[test]
    fn long_label_is_not_metadata() {
        assert!(is_metadata_line("Credit Hours: 3"));
        assert!(is_metadata_line("  Meeting Time: MWF 9am  "));
        assert!(!is_metadata_line("Students taking this semester's course: welcome"));
        assert!(!is_metadata_line("Note: bring a laptop"));
        assert!(!is_metadata_line("No colon here"));
    }

    #[test]
    fn own_name_in_body_does_not_truncate() {
        let text = "Grading Policy\nThe grading policy is strict.\nLate grading policy appeals go to the chair.\nCourse Schedule\nWeek 1";
        let body = extract_section(text, "Grading Policy").expect("grading present");
        assert_eq!(
            body,
            "The grading policy is strict.\nLate grading policy appeals go to the chair."
        );
    }

    #[test]
    fn outcomes_are_numbered_by_position() {
        let body = extract_section(SYLLABUS, "Learning Outcomes").expect("outcomes present");
        assert_eq!(body, "1. Write simple programs\n2. Debug code\n- Explain recursion");
    }

    #[test]
    fn numbering_keeps_marked_lines() {
        let formatted = number_outcomes("Understand X\n2. Apply Y\n- Evaluate Z\n* Create W\n• Reflect");
        assert_eq!(formatted, "1. Understand X\n2. Apply Y\n- Evaluate Z\n* Create W\n• Reflect");
    }

    #[test]
    fn alias_locates_section() {
        let text = "Course Objectives\nAnalyze data\nRequired Texts\nSome book";
        let body = extract_section(text, "Learning Outcomes").expect("found via alias");
        assert_eq!(body, "1. Analyze data");
    }

    #[test]
    fn missing_heading_is_absent() {
        assert!(extract_section(SYLLABUS, "Course Schedule").is_none());
        assert!(extract_section("", "Grading Policy").is_none());
        assert!(extract_section("no headings here at all", "Office Hours").is_none());
    }

    #[test]
    fn heading_at_end_of_document_is_absent() {
        assert!(extract_section("Intro text\nGrading Policy", "Grading Policy").is_none());
        assert!(extract_section("Grading Policy\n\n   \n", "Grading Policy").is_none());
        assert!(extract_section("Course Description\nSemester: Fall", "Course Description").is_none());
    }

    #[test]
    fn body_cut_immediately_by_marker_is_absent() {
        let text = "Course Description\nGrading Policy\nA/B/C";
        assert!(extract_section(text, "Course Description").is_none());
    }

    #[test]
    fn crlf_and_non_ascii_text_is_handled() {
        let text = "Café Syllabus — Été\r\nCourse Description\r\nÉtudes françaises avancées.\r\n\r\nGrading Scale\r\nA: 90+\r\n";
        assert_eq!(
            extract_section(text, "Course Description").as_deref(),
            Some("Études françaises avancées.")
        );
        assert_eq!(extract_section(text, "Grading Scale").as_deref(), Some("A: 90+"));
    }

    #[test]
    fn unknown_section_name_is_searched_literally() {
        let text = "Office Hours\nTuesdays 2-4pm\nGrading Policy\nPass/fail";
        assert_eq!(extract_section(text, "Office Hours").as_deref(), Some("Tuesdays 2-4pm"));
    }

    #[test]
    fn custom_catalog_drives_headings_and_boundaries() {
        use crate::catalog::SectionSpec;

        static SPECS: &[SectionSpec] = &[
            SectionSpec { name: "Office Hours", aliases: &["office hours", "student hours"] },
            SectionSpec { name: "Lab Safety", aliases: &["lab safety"] },
        ];
        static CATALOG: SectionCatalog = SectionCatalog::new(SPECS, &["Appendix"]);
        let extractor = SectionExtractor::with_catalog(&CATALOG);

        let text = "Student Hours\nMon 1-3pm\nLab Safety\nGoggles on\nAppendix\nForms";
        assert_eq!(extractor.extract(text, "office hours").as_deref(), Some("Mon 1-3pm"));
        assert_eq!(extractor.extract(text, "Lab Safety").as_deref(), Some("Goggles on"));
        // built-in markers do not include "Appendix"
        assert_eq!(extract_section(text, "Lab Safety").as_deref(), Some("Goggles on\nAppendix\nForms"));
    }

    #[test]
    fn extraction_is_repeatable() {
        let extractor = SectionExtractor::new();
        let first = extractor.extract(SYLLABUS, "Course Description");
        let second = extractor.extract(SYLLABUS, "Course Description");
        assert_eq!(first, second);
    }

    #[test]
    fn results_never_contain_blank_lines() {
        for name in SYLLABUS_CATALOG.names() {
            if let Some(body) = extract_section(SYLLABUS, name) {
                assert!(!body.is_empty(), "{} returned an empty body", name);
                assert_eq!(body, body.trim(), "{} body is not trimmed", name);
                assert!(body.lines().all(|l| !l.trim().is_empty()), "{} has blank lines", name);
            }
        }
    }
}
