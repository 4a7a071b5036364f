/// Collects the comment lines directly above `decl_row` (0-based).
///
/// Scans upward: lines starting with `prefix` (after trimming) are kept,
/// blank lines are skipped, anything else ends the scan. Returned lines are
/// trimmed and in source order.
pub fn leading_comments(lines: &[&str], decl_row: usize, prefix: &str) -> Vec<String> {
    let mut out = Vec::new();
    for line in lines[..decl_row.min(lines.len())].iter().rev() {
        let t = line.trim();
        if t.is_empty() {
            continue;
        }
        if !t.starts_with(prefix) {
            break;
        }
        out.push(t.to_string());
    }
    out.reverse();
    out
}
