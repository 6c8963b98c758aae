// src/catalog.rs

//! Static catalog of syllabus sections.
//!
//! Every canonical section name carries the heading phrases used to locate it.
//! The canonical names double as boundary markers when some *other* section is
//! being extracted, together with a handful of extra headings that are common
//! in syllabi but not offered as exportable sections.

// --- Sentinels ---
/// Rendered in place of a section that could not be located.
pub const NOT_FOUND: &str = "[Not Found]";
/// Rendered in place of a missing course code or title.
pub const UNKNOWN: &str = "Unknown";

pub const LEARNING_OUTCOMES: &str = "Learning Outcomes";
pub const PREREQUISITES: &str = "Prerequisites";

/// Labels that mark a short `Label: value` line as metadata rather than prose.
pub const METADATA_KEYWORDS: &[&str] = &[
    "prerequisites",
    "credit hours",
    "semester",
    "meeting time",
    "modality",
    "location",
];

/// Labels longer than this are treated as prose even when they contain a keyword.
pub const METADATA_LABEL_MAX_CHARS: usize = 25;

/// Section names (lower-cased) that get numbered outcome formatting.
const OUTCOME_NAME_HINTS: &[&str] = &["learning objectives", "course objectives"];

// --- Data Structures ---
#[derive(Debug, Clone, Copy)]
pub struct SectionSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

#[derive(Debug)]
pub struct SectionCatalog {
    sections: &'static [SectionSpec],
    extra_markers: &'static [&'static str],
}

pub static SYLLABUS_CATALOG: SectionCatalog = SectionCatalog {
    sections: &[
        SectionSpec { name: "Course Information", aliases: &["course information"] },
        SectionSpec { name: "Instructor Information", aliases: &["instructor information", "instructor"] },
        SectionSpec { name: "Course Description", aliases: &["course description"] },
        SectionSpec { name: PREREQUISITES, aliases: &["prerequisites", "pre-requisites", "pre requisites"] },
        SectionSpec { name: "Credit Hours", aliases: &["credit hours"] },
        SectionSpec { name: LEARNING_OUTCOMES, aliases: &["learning outcomes", "learning objectives", "course objectives"] },
        SectionSpec { name: "Course Materials", aliases: &["course materials"] },
        SectionSpec { name: "Required Text", aliases: &["required text", "required texts", "textbook", "textbooks"] },
        SectionSpec { name: "Course Requirements", aliases: &["course requirements"] },
        SectionSpec { name: "Grading Policy", aliases: &["grading policy"] },
        SectionSpec { name: "Grading Scale", aliases: &["grading scale"] },
        SectionSpec { name: "Attendance Policy", aliases: &["attendance policy", "absences"] },
        SectionSpec { name: "Late Work Policy", aliases: &["late work policy", "late submission"] },
        SectionSpec { name: "Academic Integrity", aliases: &["academic integrity", "plagiarism", "honor code"] },
        SectionSpec { name: "Disability Services", aliases: &["disability services", "accommodations", "ada"] },
        SectionSpec { name: "Course Schedule", aliases: &["course schedule", "course calendar"] },
    ],
    extra_markers: &[
        "Evaluation and Grading",
        "Course Policies",
        "Institutional Policies",
        "Federal, BOR",
        "Discussion Boards",
        "Module Quizzes",
        "Section I",
        "Section II",
        "Section III",
        "Section IV",
        "Section V",
    ],
};

impl SectionCatalog {
    /// A catalog of `sections` whose names, plus `extra_markers`, end each other's bodies.
    pub const fn new(sections: &'static [SectionSpec], extra_markers: &'static [&'static str]) -> Self {
        Self { sections, extra_markers }
    }

    /// Canonical section names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sections.iter().map(|s| s.name)
    }

    pub fn sections(&self) -> &'static [SectionSpec] {
        self.sections
    }

    /// Case-insensitive lookup by canonical name.
    pub fn lookup(&self, name: &str) -> Option<&'static SectionSpec> {
        self.sections.iter().find(|s| s.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Resolves user input to the canonical spelling, or keeps the input for unknown names.
    pub fn canonical_name<'a>(&self, name: &'a str) -> &'a str {
        self.lookup(name).map(|spec| spec.name).unwrap_or_else(|| name.trim())
    }

    /// Search phrases for a section, lower-cased. Unknown names search for themselves.
    pub fn aliases_for(&self, name: &str) -> Vec<String> {
        match self.lookup(name) {
            Some(spec) => spec.aliases.iter().map(|a| a.to_ascii_lowercase()).collect(),
            None => vec![name.trim().to_ascii_lowercase()],
        }
    }

    /// Every heading phrase that can end a section body: all canonical names, then the extras.
    pub fn boundary_markers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names().chain(self.extra_markers.iter().copied())
    }
}

/// True for the outcomes section and the objective-style names that share its formatting.
pub fn is_outcomes_section(name: &str) -> bool {
    let lower = name.trim().to_lowercase();
    lower == LEARNING_OUTCOMES.to_lowercase() || OUTCOME_NAME_HINTS.iter().any(|hint| lower.contains(hint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let spec = SYLLABUS_CATALOG.lookup("learning OUTCOMES").expect("known section");
        assert_eq!(spec.name, LEARNING_OUTCOMES);
        assert!(SYLLABUS_CATALOG.lookup("Office Hours").is_none());
    }

    #[test]
    fn unknown_section_searches_for_its_own_name() {
        assert_eq!(SYLLABUS_CATALOG.aliases_for("Office Hours"), vec!["office hours".to_string()]);
        assert_eq!(SYLLABUS_CATALOG.canonical_name(" office hours "), "office hours");
        assert_eq!(SYLLABUS_CATALOG.canonical_name("grading scale"), "Grading Scale");
    }

    #[test]
    fn markers_cover_names_and_extras() {
        let markers: Vec<_> = SYLLABUS_CATALOG.boundary_markers().collect();
        assert!(markers.contains(&"Course Schedule"));
        assert!(markers.contains(&"Institutional Policies"));
        // aliases are search phrases only
        assert!(!markers.contains(&"ada"));
    }

    #[test]
    fn custom_catalog_from_const_parts() {
        static SPECS: &[SectionSpec] = &[SectionSpec { name: "Office Hours", aliases: &["office hours", "student hours"] }];
        let catalog = SectionCatalog::new(SPECS, &["Appendix"]);
        assert_eq!(catalog.aliases_for("OFFICE HOURS"), vec!["office hours", "student hours"]);
        assert_eq!(catalog.boundary_markers().collect::<Vec<_>>(), vec!["Office Hours", "Appendix"]);
    }

    #[test]
    fn outcome_formatting_names() {
        assert!(is_outcomes_section("Learning Outcomes"));
        assert!(is_outcomes_section("Course Objectives"));
        assert!(!is_outcomes_section("Grading Policy"));
    }
}
