//! LaTeX escaping for user-authored text.

/// Escapes every LaTeX reserved character in one left-to-right pass.
///
/// Each input char maps to exactly one output sequence, so the backslashes
/// this function emits are never themselves re-escaped. Call it once per
/// field; calling it again on its own output escapes twice.
///
/// Line breaks become spaces: a blank line inside `\textbf{}` is a paragraph
/// break, which LaTeX rejects.
pub fn escape_latex(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '\\' => result.push_str(r"\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                result.push('\\');
                result.push(c);
            }
            '~' => result.push_str(r"\textasciitilde{}"),
            '^' => result.push_str(r"\textasciicircum{}"),
            // Render as other glyphs in OT1 text mode
            '<' => result.push_str(r"\textless{}"),
            '>' => result.push_str(r"\textgreater{}"),
            '|' => result.push_str(r"\textbar{}"),
            '\n' | '\r' => result.push(' '),
            _ => result.push(c),
        }
    }
    result
}

/// Escapes a URL for the first argument of `\href`.
///
/// `%` and `#` keep their meaning in the URL; characters that would break the
/// argument are percent-encoded instead.
pub fn escape_url(url: &str) -> String {
    let mut result = String::with_capacity(url.len());
    for c in url.trim().chars() {
        match c {
            '%' => result.push_str(r"\%"),
            '#' => result.push_str(r"\#"),
            '\\' => result.push_str(r"\%5C"),
            '{' => result.push_str(r"\%7B"),
            '}' => result.push_str(r"\%7D"),
            '~' => result.push_str(r"\%7E"),
            _ => result.push(c),
        }
    }
    result
}
