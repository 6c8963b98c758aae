// src/compare.rs
use serde::{Deserialize, Serialize};

use crate::catalog::UNKNOWN;
use crate::extractors::{parse_course_identifier, CourseIdentifier, SectionExtractor};

const REPORT_WIDTH: usize = 80;
const ABSENT: &str = "[NOT FOUND]";

// --- Data Structures ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionComparison {
    pub section: String,
    pub original: Option<String>,
    pub new: Option<String>,
    /// Bodies differ, including one side being absent. Absent on both sides is unchanged.
    pub changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub original_course: Option<CourseIdentifier>,
    pub new_course: Option<CourseIdentifier>,
    pub sections: Vec<SectionComparison>,
}

impl ComparisonRecord {
    pub fn section(&self, name: &str) -> Option<&SectionComparison> {
        self.sections.iter().find(|s| s.section.eq_ignore_ascii_case(name))
    }

    pub fn differences_found(&self) -> bool {
        self.sections.iter().any(|s| s.changed)
    }
}

// --- Comparison ---

/// Extracts each requested section from both texts and flags the ones that differ.
pub fn compare_sections<S: AsRef<str>>(original: &str, new: &str, sections: &[S]) -> ComparisonRecord {
    compare_with(&SectionExtractor::new(), original, new, sections)
}

pub fn compare_with<S: AsRef<str>>(
    extractor: &SectionExtractor<'_>,
    original: &str,
    new: &str,
    sections: &[S],
) -> ComparisonRecord {
    let sections = sections
        .iter()
        .map(|name| {
            let section = extractor.catalog().canonical_name(name.as_ref());
            let before = extractor.extract(original, section);
            let after = extractor.extract(new, section);
            let changed = before != after;
            tracing::debug!("Section '{}' changed: {}", section, changed);
            SectionComparison {
                section: section.to_string(),
                original: before,
                new: after,
                changed,
            }
        })
        .collect();

    ComparisonRecord {
        original_course: parse_course_identifier(original),
        new_course: parse_course_identifier(new),
        sections,
    }
}

fn course_label(course: Option<&CourseIdentifier>) -> String {
    match course {
        Some(c) => format!("{} - {}", c.code, c.title),
        None => format!("{} - {}", UNKNOWN, UNKNOWN),
    }
}

// --- Rendering ---

/// Plain-text report listing unchanged sections briefly and changed ones in full.
pub fn render_report(record: &ComparisonRecord) -> String {
    let heavy = "=".repeat(REPORT_WIDTH);
    let light = "─".repeat(REPORT_WIDTH);
    let short = "-".repeat(REPORT_WIDTH / 2);

    let mut report = String::new();
    report.push_str("SYLLABUS COMPARISON REPORT\n");
    report.push_str(&format!("{}\n\n", heavy));
    report.push_str(&format!("Original: {}\n", course_label(record.original_course.as_ref())));
    report.push_str(&format!("New:      {}\n", course_label(record.new_course.as_ref())));
    report.push_str(&format!("{}\n\n", heavy));

    for section in &record.sections {
        report.push_str(&format!("\n{}\nSECTION: {}\n{}\n", light, section.section, light));

        if !section.changed {
            if section.original.is_none() {
                report.push_str("[NOT FOUND IN EITHER SYLLABUS]\n");
            } else {
                report.push_str("[NO CHANGES]\n");
            }
            continue;
        }

        report.push_str(&format!("\n[ORIGINAL]\n{}\n", short));
        report.push_str(section.original.as_deref().unwrap_or(ABSENT));
        report.push('\n');
        report.push_str(&format!("\n[NEW]\n{}\n", short));
        report.push_str(section.new.as_deref().unwrap_or(ABSENT));
        report.push('\n');
    }

    report
}

/// One section of the side-by-side table: a header and paired lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonBlock {
    pub header: String,
    pub changed: bool,
    pub lines: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub title: String,
    pub original_label: String,
    pub new_label: String,
    pub blocks: Vec<ComparisonBlock>,
}

impl ComparisonTable {
    pub fn from_record(record: &ComparisonRecord, generated_at: chrono::NaiveDateTime) -> Self {
        let blocks = record
            .sections
            .iter()
            .map(|s| {
                let status = if s.changed { "[CHANGED]" } else { "[NO CHANGES]" };
                let original: Vec<&str> = s.original.as_deref().unwrap_or(ABSENT).lines().collect();
                let new: Vec<&str> = s.new.as_deref().unwrap_or(ABSENT).lines().collect();
                let lines = (0..original.len().max(new.len()))
                    .map(|i| {
                        (
                            original.get(i).copied().unwrap_or_default().to_string(),
                            new.get(i).copied().unwrap_or_default().to_string(),
                        )
                    })
                    .collect();
                ComparisonBlock {
                    header: format!("SECTION: {} {}", s.section, status),
                    changed: s.changed,
                    lines,
                }
            })
            .collect();

        Self {
            title: format!("Syllabus Comparison - {}", generated_at.format("%Y-%m-%d %H:%M")),
            original_label: course_label(record.original_course.as_ref()),
            new_label: course_label(record.new_course.as_ref()),
            blocks,
        }
    }
}
