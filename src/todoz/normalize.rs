//! Text canonicalization for todo titles and descriptions.
//!
//! Both pipelines are order-sensitive: every step assumes the previous ones
//! already ran.

/// Canonical form of a todo title.
///
/// ```
/// use todoz::normalize::normalize_title;
/// assert_eq!(normalize_title("  hello   world\n\n"), "Hello world");
/// ```
pub fn normalize_title(input: &str) -> String {
    let collapsed = collapse_inline_whitespace(input);
    let single_newlines = collapse_newlines(&collapsed);
    let stripped = trim_lines(&single_newlines);
    capitalize_first(stripped.trim())
}

/// Canonical form of a (markdown) todo description.
///
/// Lone newlines become markdown hard breaks (two trailing spaces); blank
/// lines between paragraphs are kept.
pub fn normalize_description(input: &str) -> String {
    let collapsed = collapse_inline_whitespace(input);
    let stripped = trim_lines(&collapsed);
    hard_breaks(&stripped).trim().to_string()
}

/// Collapses runs of non-newline whitespace to a single space. Carriage
/// returns are dropped so CRLF input behaves like LF input.
fn collapse_inline_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_run = false;
    for c in input.chars().filter(|c| *c != '\r') {
        if c != '\n' && c.is_whitespace() {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

fn collapse_newlines(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if c == '\n' && out.ends_with('\n') {
            continue;
        }
        out.push(c);
    }
    out
}

fn trim_lines(input: &str) -> String {
    input.split('\n').map(str::trim).collect::<Vec<_>>().join("\n")
}

fn hard_breaks(input: &str) -> String {
    let lines: Vec<&str> = input.split('\n').collect();
    let mut out = String::with_capacity(input.len() + lines.len() * 2);
    for (i, line) in lines.iter().enumerate() {
        out.push_str(line);
        if let Some(next) = lines.get(i + 1) {
            if !line.is_empty() && !next.is_empty() {
                out.push_str("  ");
            }
            out.push('\n');
        }
    }
    out
}

fn capitalize_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
