//! Output-name sanitization for document titles.

/// Longest stem we emit; leaves room for the `.pdf` extension within NAME_MAX.
const STEM_MAX: usize = 255 - ".pdf".len();

/// Turns a book title into a file stem that is safe on common filesystems.
///
/// - Replaces NUL, `/`, `\`, control characters, and `: * ? " < > |` with `_`
/// - Drops apostrophes
/// - Collapses consecutive underscores
/// - Trims leading/trailing spaces, dots, and underscores
/// - Caps the length at 251 bytes on a char boundary
///
/// Inner spaces are kept; titles read better that way.
pub fn sanitize_output_name(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut prev_underscore = false;

    for c in title.chars() {
        if c == '\'' {
            continue;
        }
        let hostile = c == '\0'
            || c.is_control()
            || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|');
        if hostile || c == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c: char| c == ' ' || c == '.' || c == '_');
    if trimmed.len() <= STEM_MAX {
        return trimmed.to_string();
    }
    let mut take = STEM_MAX;
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].trim_end().to_string()
}
