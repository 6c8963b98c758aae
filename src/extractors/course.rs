// src/extractors/course.rs
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Only the top of the document is searched for the course line.
const HEADER_WINDOW_LINES: usize = 20;

// e.g. "SM 2200: COURSE TITLE", "CS 101 - Intro", "MATH 1010 Calculus"
static COURSE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z]{1,4})\s+([0-9]{3,4})[:\-\s]+(.+?)$")
        .expect("Failed to compile COURSE_LINE_RE")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseIdentifier {
    pub code: String,
    pub title: String,
}

/// Finds the first `<DEPT> <NUMBER><sep><Title>` line among the first 20 lines.
pub fn parse_course_identifier(text: &str) -> Option<CourseIdentifier> {
    for line in text.split('\n').take(HEADER_WINDOW_LINES) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(caps) = COURSE_LINE_RE.captures(line) {
            let ident = CourseIdentifier {
                code: format!("{} {}", &caps[1], &caps[2]),
                title: caps[3].trim().to_string(),
            };
            tracing::debug!("Parsed course identifier {} ({})", ident.code, ident.title);
            return Some(ident);
        }
    }
    None
}
