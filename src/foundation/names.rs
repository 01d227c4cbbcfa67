//! Name transformations shared by the table loader and the renderer.

/// Replace table-style `_` separators with the `-` separators used in file and registry names.
pub fn hyphenate(name: &str) -> String {
    name.replace('_', "-")
}

/// Turn a hyphenated file stem back into a C identifier (`svg-multiply` -> `svg_multiply`).
pub fn c_identifier(stem: &str) -> String {
    stem.replace('-', "_")
}

/// Upper-case the first character and lower-case the rest (`color-dodge` -> `Color-dodge`).
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Escape text for embedding inside a C string literal.
pub fn c_string_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/names.rs"]
mod tests;
