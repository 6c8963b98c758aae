// src/extractors/mod.rs
pub mod course;
pub mod prerequisites;
pub mod section;

// Re-export key extraction types for convenience
pub use course::{parse_course_identifier, CourseIdentifier};
pub use prerequisites::scan_prerequisites;
pub use section::{extract_section, SectionExtractor};
