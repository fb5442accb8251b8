// src/classifier/sanitize.rs
// Best-effort cleanup of raw model replies before structured parsing.
// Sanitization never guarantees valid JSON; it only removes the failure
// modes the model is known to produce.

/// Strips code-fence wrappers and control characters, then repairs unescaped
/// quotes in the two known free-text fields. Idempotent.
pub fn sanitize_response(raw: &str) -> String {
    let text = strip_code_fences(raw);
    let text = strip_control_chars(&text);
    normalize_quoted_fields(&text)
}

/// Removes a wrapping fenced code block, with or without a language tag.
fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    // The opening fence and its language tag occupy the first line.
    let body = match trimmed.split_once('\n') {
        Some((_fence, rest)) => rest,
        None => return String::new(),
    };

    let body = body.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);
    body.trim().to_string()
}

/// Drops characters below U+0020 except newline, carriage return, and tab.
fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| *c >= ' ' || matches!(c, '\n' | '\r' | '\t'))
        .collect()
}

/// Line-oriented repair of internally-quoted string values in `message` and
/// `reasoning` assignments. Interior double quotes become single quotes and
/// whitespace runs collapse to single spaces; the original terminator
/// (closing quote, or quote plus comma) is preserved. Values without a
/// recognizable terminator are left untouched.
///
/// Known limitation: assumes one field assignment per line. Multi-line string
/// values pass through untouched.
fn normalize_quoted_fields(text: &str) -> String {
    text.lines().map(normalize_line).collect::<Vec<_>>().join("\n")
}

fn normalize_line(line: &str) -> String {
    if !line.contains("\"message\":") && !line.contains("\"reasoning\":") {
        return line.to_string();
    }

    let Some((key_part, value_part)) = line.split_once(':') else {
        return line.to_string();
    };

    let value = value_part.trim();
    if !value.starts_with('"') || value.len() < 2 {
        return line.to_string();
    }

    let (body, suffix) = if let Some(stripped) = value.strip_suffix("\",") {
        (stripped, ",")
    } else if let Some(stripped) = value.strip_suffix('"') {
        (stripped, "")
    } else {
        // No recognizable terminator; the heuristic stays hands-off.
        return line.to_string();
    };

    let inner = body.strip_prefix('"').unwrap_or(body);
    let cleaned = inner.replace('"', "'");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    format!("{}: \"{}\"{}", key_part, cleaned, suffix)
}
