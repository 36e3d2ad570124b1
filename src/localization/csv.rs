//! Minimal CSV reader for localization tables.
//!
//! Only what the tables need: comma-separated fields, double quotes toggle
//! quoting so commas inside quotes are literal, quote characters themselves
//! are dropped. Rows end on `\n` or `\r\n`; blank rows are skipped.

/// Split a document into non-empty rows.
pub fn rows(source: &str) -> impl Iterator<Item = &str> {
    source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
}

/// Split one row into fields.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(core::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

// =============================================================================
// Unit Tests
// =============================================================================
