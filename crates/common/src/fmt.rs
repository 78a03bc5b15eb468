//! Terminal output helpers.

use std::fmt::Display;

/// Formats `rows` as `label value` lines.
///
/// Labels are padded to one past the longest label, so the longest is followed by two spaces.
///
/// ```
/// use minty_common::fmt::align_rows;
///
/// let rows = [("Token ID:", "1".to_string()), ("Owner Address:", "0xabc".to_string())];
/// assert_eq!(align_rows(&rows), "Token ID:       1\nOwner Address:  0xabc");
/// ```
pub fn align_rows<L: AsRef<str>, V: Display>(rows: &[(L, V)]) -> String {
    let width = rows.iter().map(|(label, _)| label.as_ref().chars().count()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| format!("{:<width$} {value}", label.as_ref(), width = width + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
