//! Line-oriented unified diff between reference and current observations.
//!
//! Uses the `diffy` crate to compute hunks, rendered with the fixed source
//! labels `reference` and `current` that the rest of the tool (and its
//! users' muscle memory) depend on.

/// Split text into lines with their endings preserved.
///
/// Mirrors `readlines` semantics: concatenating the result reproduces the
/// input byte-for-byte, including a final line without a newline.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

/// Compute a unified diff between reference and current lines.
///
/// Returns the diff as a sequence of newline-terminated lines: the
/// `--- reference` / `+++ current` header followed by the hunks. Identical
/// inputs (including both empty) produce an empty vector.
pub fn unified_diff(reference_lines: &[String], current_lines: &[String]) -> Vec<String> {
    let reference = reference_lines.concat();
    let current = current_lines.concat();
    let patch = diffy::create_patch(&reference, &current);

    if patch.hunks().is_empty() {
        return Vec::new();
    }

    let mut out = vec!["--- reference\n".to_string(), "+++ current\n".to_string()];
    for hunk in patch.hunks() {
        out.push(format!(
            "@@ -{} +{} @@\n",
            format_range(hunk.old_range()),
            format_range(hunk.new_range())
        ));
        for line in hunk.lines() {
            let (prefix, text) = match line {
                diffy::Line::Context(text) => (' ', *text),
                diffy::Line::Delete(text) => ('-', *text),
                diffy::Line::Insert(text) => ('+', *text),
            };
            if text.ends_with('\n') {
                out.push(format!("{prefix}{text}"));
            } else {
                out.push(format!("{prefix}{text}\n"));
                out.push("\\ No newline at end of file\n".to_string());
            }
        }
    }
    out
}

/// Hunk range in unified-diff notation: `start` alone for single-line
/// ranges, `start,len` otherwise.
fn format_range(range: diffy::HunkRange) -> String {
    if range.len() == 1 {
        range.start().to_string()
    } else {
        format!("{},{}", range.start(), range.len())
    }
}

/// Render a diff for display, or a fixed notice when there is nothing to show.
pub fn render_diff(diff: &[String]) -> String {
    if diff.is_empty() {
        "No differences in observations.".to_string()
    } else {
        diff.concat()
    }
}
