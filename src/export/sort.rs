// src/export/sort.rs
use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::UNKNOWN;

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("Failed to compile DIGITS_RE"));

/// Anything that can be ordered by the number in its course code.
pub trait CourseCoded {
    fn course_code(&self) -> Option<&str>;
}

impl CourseCoded for String {
    fn course_code(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl CourseCoded for &str {
    fn course_code(&self) -> Option<&str> {
        Some(*self)
    }
}

/// Numeric value of the first digit run, compared without overflow:
/// fewer significant digits first, then lexicographically.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum CourseNumber<'a> {
    Known { width: usize, digits: &'a str },
    Unknown,
}

fn course_number(code: Option<&str>) -> CourseNumber<'_> {
    let Some(code) = code.filter(|c| *c != UNKNOWN) else {
        return CourseNumber::Unknown;
    };
    match DIGITS_RE.find(code) {
        Some(m) => {
            let significant = m.as_str().trim_start_matches('0');
            let digits = if significant.is_empty() { "0" } else { significant };
            CourseNumber::Known { width: digits.len(), digits }
        }
        None => CourseNumber::Unknown,
    }
}

fn compare_codes(a: Option<&str>, b: Option<&str>) -> Ordering {
    course_number(a)
        .cmp(&course_number(b))
        .then_with(|| a.unwrap_or_default().cmp(b.unwrap_or_default()))
}

/// Orders rows by course number; codes without digits (and `Unknown`) go last.
pub fn sort_by_course_number<T: CourseCoded>(mut rows: Vec<T>) -> Vec<T> {
    rows.sort_by(|a, b| compare_codes(a.course_code(), b.course_code()));
    rows
}
