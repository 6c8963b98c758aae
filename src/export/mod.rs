// src/export/mod.rs

//! Row-per-document exports.
//!
//! [`build_rows`] runs the extractors over every loaded document and
//! [`ExportTable`] flattens the result into the title/header/data layout used
//! for tabular output. Absent values stay `None` until the table is built,
//! where they become the `Unknown` / `[Not Found]` sentinels.

pub mod sort;

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::catalog::{NOT_FOUND, PREREQUISITES, UNKNOWN};
use crate::document::Document;
use crate::extractors::{parse_course_identifier, scan_prerequisites, CourseIdentifier, SectionExtractor};
pub use sort::{sort_by_course_number, CourseCoded};

pub const SOURCE_FILE_COLUMN: &str = "Source File";
pub const COURSE_CODE_COLUMN: &str = "Course Code";
pub const COURSE_TITLE_COLUMN: &str = "Course Title";
pub const SELECTED_TEXT_COLUMN: &str = "Selected Text";

const BULLET_COLUMN_HINTS: &[&str] = &["learning", "outcome", "objective", "goal"];

// --- Data Structures ---
/// Free-form text the user picked out of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub document_id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionField {
    pub section: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    pub source: String,
    pub course: Option<CourseIdentifier>,
    pub sections: Vec<SectionField>,
    pub selected_text: Option<String>,
}

impl ExportRow {
    pub fn section(&self, name: &str) -> Option<&SectionField> {
        self.sections.iter().find(|f| f.section.eq_ignore_ascii_case(name))
    }

    /// Rendered value for a column, or `None` if the row has no such column.
    fn cell(&self, column: &str) -> Option<String> {
        match column {
            SOURCE_FILE_COLUMN => Some(self.source.clone()),
            COURSE_CODE_COLUMN => Some(self.course.as_ref().map_or(UNKNOWN, |c| c.code.as_str()).to_string()),
            COURSE_TITLE_COLUMN => Some(self.course.as_ref().map_or(UNKNOWN, |c| c.title.as_str()).to_string()),
            SELECTED_TEXT_COLUMN if self.selected_text.is_some() => self.selected_text.clone(),
            _ => self
                .sections
                .iter()
                .find(|f| f.section == column)
                .map(|f| f.body.clone().unwrap_or_else(|| NOT_FOUND.to_string())),
        }
    }

    fn columns(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .map(|f| f.section.as_str())
            .chain(self.selected_text.as_ref().map(|_| SELECTED_TEXT_COLUMN))
    }
}

impl CourseCoded for ExportRow {
    fn course_code(&self) -> Option<&str> {
        self.course.as_ref().map(|c| c.code.as_str())
    }
}

// --- Row Construction ---

/// Builds one row per document, sorted by course number.
///
/// A requested `Prerequisites` section that has no heading falls back to the
/// whole-document prerequisite sweep.
pub fn build_rows<'a, S: AsRef<str>>(
    documents: impl IntoIterator<Item = &'a Document>,
    sections: &[S],
    selection: Option<&Selection>,
) -> Vec<ExportRow> {
    let extractor = SectionExtractor::new();
    let catalog = extractor.catalog();

    let rows = documents
        .into_iter()
        .map(|doc| {
            let fields = sections
                .iter()
                .map(|name| {
                    let section = catalog.canonical_name(name.as_ref());
                    let mut body = extractor.extract(&doc.text, section);
                    if body.is_none() && section == PREREQUISITES {
                        tracing::debug!("No Prerequisites heading in {}, sweeping whole text", doc.name);
                        body = scan_prerequisites(&doc.text);
                    }
                    SectionField { section: section.to_string(), body }
                })
                .collect();

            ExportRow {
                source: doc.name.clone(),
                course: parse_course_identifier(&doc.text),
                sections: fields,
                selected_text: selection
                    .filter(|s| s.document_id == doc.id && !s.text.is_empty())
                    .map(|s| s.text.clone()),
            }
        })
        .collect();

    sort_by_course_number(rows)
}

// --- Tabular Shape ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportTable {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    pub fn from_rows(rows: &[ExportRow], generated_at: NaiveDateTime) -> Self {
        let extra: BTreeSet<&str> = rows.iter().flat_map(|r| r.columns()).collect();
        let columns: Vec<String> = [SOURCE_FILE_COLUMN, COURSE_CODE_COLUMN, COURSE_TITLE_COLUMN]
            .into_iter()
            .chain(extra)
            .map(str::to_string)
            .collect();

        let data = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| {
                        let value = row.cell(column).unwrap_or_default();
                        if is_bullet_column(column) {
                            format_as_bullets(&value)
                        } else {
                            value
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            title: format!("Course Syllabus Data Export - {}", generated_at.format("%Y-%m-%d %H:%M")),
            columns,
            rows: data,
        }
    }
}

fn is_bullet_column(column: &str) -> bool {
    let lower = column.to_lowercase();
    BULLET_COLUMN_HINTS.iter().any(|hint| lower.contains(hint))
}

/// Re-bullets each non-blank line with `• `, replacing any existing `•`/`-` marker.
pub fn format_as_bullets(text: &str) -> String {
    if text.is_empty() || text == NOT_FOUND {
        return text.to_string();
    }
    let lines: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("• {}", line.trim_start_matches(['•', '-']).trim()))
        .collect();
    if lines.is_empty() {
        return text.to_string();
    }
    lines.join("\n")
}
