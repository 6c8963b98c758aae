// src/utils/text_debug.rs
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::catalog::SectionCatalog;
use crate::utils::error::AppError;

/// Saves decoded text to a file with `[[label]]...[[/label]]` around each highlight.
/// Overlapping, inverted or out-of-range highlights are dropped.
pub fn save_debug_text(
    text: &str,
    filename: &Path,
    highlights: &[(usize, usize, String)],
) -> Result<(), AppError> {
    let mut file = File::create(filename)?;
    file.write_all(annotate(text, highlights).as_bytes())?;

    tracing::info!("Saved debug text to {}", filename.display());
    Ok(())
}

fn annotate(text: &str, highlights: &[(usize, usize, String)]) -> String {
    let mut sorted: Vec<_> = highlights.iter().collect();
    sorted.sort_by_key(|h| (h.0, std::cmp::Reverse(h.1)));

    let mut out = String::with_capacity(text.len() + highlights.len() * 16);
    let mut last_pos = 0;
    for (start, end, label) in sorted {
        let (start, end) = (*start, *end);
        if start < last_pos || start > end || end > text.len() || !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            continue;
        }
        out.push_str(&text[last_pos..start]);
        out.push_str(&format!("[[{}]]{}[[/{}]]", label, &text[start..end], label));
        last_pos = end;
    }
    out.push_str(&text[last_pos..]);
    out
}

/// Every alias and boundary-marker occurrence, labelled with what it would match.
pub fn heading_highlights(text: &str, catalog: &SectionCatalog) -> Vec<(usize, usize, String)> {
    let lowered = text.to_ascii_lowercase();
    let mut highlights = Vec::new();

    let mut push_all = |phrase: &str, label: String| {
        let phrase = phrase.to_ascii_lowercase();
        if phrase.is_empty() {
            return;
        }
        for (idx, _) in lowered.match_indices(&phrase) {
            highlights.push((idx, idx + phrase.len(), label.clone()));
        }
    };

    for spec in catalog.sections() {
        for &alias in spec.aliases {
            push_all(alias, format!("heading:{}", spec.name));
        }
    }
    for marker in catalog.boundary_markers() {
        push_all(marker, "boundary".to_string());
    }

    highlights
}

/// Writes `<stem>.raw.txt` and `<stem>.annotated.txt` for one document into `dir`.
pub fn create_debug_dump(
    text: &str,
    dir: &Path,
    stem: &str,
    catalog: &SectionCatalog,
) -> Result<(), AppError> {
    std::fs::create_dir_all(dir)?;
    std::fs::write(dir.join(format!("{}.raw.txt", stem)), text)?;
    let highlights = heading_highlights(text, catalog);
    tracing::debug!("Highlighting {} heading candidates in {}", highlights.len(), stem);
    save_debug_text(text, &dir.join(format!("{}.annotated.txt", stem)), &highlights)
}
