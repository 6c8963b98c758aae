// src/lib.rs

//! Section extraction for academic syllabi.
//!
//! The core ([`catalog`], [`extractors`], [`compare`], [`export::sort`]) is
//! pure: every operation is a function of its text inputs and the static
//! section catalog, and a missing section is `None` rather than an error.
//! Decoding, session state and storage sit around it for the CLI.

pub mod catalog;
pub mod compare;
pub mod document;
pub mod export;
pub mod extractors;
pub mod session;
pub mod storage;
pub mod utils;

pub use compare::{compare_sections, ComparisonRecord, SectionComparison};
pub use export::{sort_by_course_number, ExportRow};
pub use extractors::{extract_section, parse_course_identifier, scan_prerequisites, CourseIdentifier};
