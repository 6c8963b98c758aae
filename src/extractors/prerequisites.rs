// src/extractors/prerequisites.rs
use once_cell::sync::Lazy;
use regex::Regex;

// Whole-document sweep, independent of headings. Captures the rest of the line.
static PREREQ_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(?:prerequisite\(s\)|prerequisites?|pre-requisites?|pre requisites?)[:\s]+([^\n]+)",
        r"(?i)(?:student must have)[:\s]+([^\n]+)",
    ]
    .iter()
    .map(|pat| Regex::new(pat).expect("Failed to compile prerequisite pattern"))
    .collect()
});

/// Collects every prerequisite statement in the text, de-duplicated in first-seen order.
pub fn scan_prerequisites(text: &str) -> Option<String> {
    let mut found: Vec<&str> = Vec::new();
    for re in PREREQ_PATTERNS.iter() {
        for caps in re.captures_iter(text) {
            let Some(m) = caps.get(1) else { continue };
            let statement = m.as_str().trim();
            if !statement.is_empty() && !found.contains(&statement) {
                found.push(statement);
            }
        }
    }

    if found.is_empty() {
        return None;
    }
    tracing::debug!("Prerequisite sweep found {} statement(s)", found.len());
    Some(found.join("\n"))
}
