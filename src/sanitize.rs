// src/sanitize.rs

/// Cleans free-text user input before it is placed into a prompt.
///
/// Whitespace control characters (newline, tab, carriage return) become a
/// single space, every other control character is dropped, characters with
/// meaning in HTML or script contexts are entity-escaped, and the result is
/// trimmed. Never fails.
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());

    for c in raw.chars() {
        match c {
            '\n' | '\r' | '\t' => out.push(' '),
            c if c.is_control() => {}
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            c => out.push(c),
        }
    }

    out.trim().to_string()
}

/// Same as [`sanitize`] for optional input; absent input yields an empty string.
pub fn sanitize_opt(raw: Option<&str>) -> String {
    raw.map(sanitize).unwrap_or_default()
}
