//! Line-oriented helpers shared by both layouts.

/// Split page text into trimmed, non-empty lines.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Index of the first line equal to `needle`.
pub fn position_of(lines: &[&str], needle: &str) -> Option<usize> {
    lines.iter().position(|l| *l == needle)
}

/// Index of the first line starting with `prefix`.
pub fn position_starting_with(lines: &[&str], prefix: &str) -> Option<usize> {
    lines.iter().position(|l| l.starts_with(prefix))
}

/// First line starting with `prefix`.
pub fn line_starting_with<'a>(lines: &[&'a str], prefix: &str) -> Option<&'a str> {
    lines.iter().copied().find(|l| l.starts_with(prefix))
}

/// Trimmed text after `label` on the first line carrying it.
///
/// Returns `None` when the label is absent or has nothing after it.
pub fn line_value(lines: &[&str], label: &str) -> Option<String> {
    let line = line_starting_with(lines, label)?;
    let value = line.strip_prefix(label).unwrap_or(line).trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
