//! Single-column roster parsing

use super::error::RosterError;

const UTF8_BOM: char = '\u{feff}';

/// Parse a CSV export whose first column holds student names.
///
/// Blank cells are skipped. A document with no non-blank cell is an empty
/// roster; a document with content but no name in the first column is
/// malformed.
pub fn parse_roster_csv(body: &[u8], has_header: bool) -> Result<Vec<String>, RosterError> {
    let text = std::str::from_utf8(body)
        .map_err(|e| RosterError::MalformedRoster(format!("roster is not UTF-8 text: {}", e)))?;
    let text = text.trim_start_matches(UTF8_BOM);

    if looks_like_html(text) {
        return Err(RosterError::MalformedRoster(
            "received an HTML page instead of a sheet export (is the sheet shared?)".to_string(),
        ));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut names = Vec::new();
    let mut content_outside_name_column = false;

    for record in reader.records() {
        let record = record
            .map_err(|e| RosterError::MalformedRoster(format!("unreadable CSV row: {}", e)))?;

        match record.get(0).map(str::trim) {
            Some(name) if !name.is_empty() => names.push(name.to_string()),
            _ => {
                if record.iter().any(|cell| !cell.trim().is_empty()) {
                    content_outside_name_column = true;
                }
            }
        }
    }

    if names.is_empty() && content_outside_name_column {
        return Err(RosterError::MalformedRoster(
            "no student names found in the first column".to_string(),
        ));
    }

    Ok(names)
}

fn looks_like_html(text: &str) -> bool {
    let head = text.trim_start();
    let prefix: String = head.chars().take(15).collect::<String>().to_ascii_lowercase();
    prefix.starts_with("<!doctype html") || prefix.starts_with("<html")
}
