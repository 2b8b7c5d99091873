//! String literal escaping
//!
//! Supported escape sequences:
//! - `\"` → `"`
//! - `\\` → `\`
//! - `\n`, `\r`, `\f`, `\t` → newline, carriage return, form feed, tab
//!
//! Any other backslash sequence is kept verbatim when reading. Writing
//! escapes exactly the six characters above and passes everything else
//! through untouched, so `unescape(escape(s)) == s` for every string.

/// Escape a string value for output between double quotes
pub fn escape(input: &str) -> String {
    let mut result = String::with_capacity(input.len() + 2);

    for ch in input.chars() {
        match ch {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\x0C' => result.push_str("\\f"),
            '\t' => result.push_str("\\t"),
            _ => result.push(ch),
        }
    }

    result
}

/// Resolve escape sequences in the body of a quoted string literal
pub fn unescape(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.next() {
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('f') => result.push('\x0C'),
            Some('t') => result.push('\t'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}
