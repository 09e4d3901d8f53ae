//! Message templates
//!
//! Rule messages are rendered with the offending value:
//!
//! | placeholder        | renders                                      |
//! |--------------------|----------------------------------------------|
//! | `{}` / `{0}`       | the value itself                             |
//! | `{name}` `{a.b}`   | a property of an object value (dotted path)  |
//! | `{0.name}`         | same as `{name}`                             |
//! | `{{` / `}}`        | a literal brace                              |
//!
//! Missing properties render as the empty string. An unterminated `{` is kept
//! literally.

use serde_json::Value;

/// Renders `template` with `value`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use verity_validator::template::format_message;
///
/// assert_eq!(format_message("{} is taken", &json!("alice")), "alice is taken");
/// assert_eq!(format_message("{city} unknown", &json!({"city": "Oslo"})), "Oslo unknown");
/// ```
#[must_use]
pub fn format_message(template: &str, value: &Value) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
        } else if tail.starts_with('}') {
            out.push('}');
            rest = &tail[1..];
        } else if let Some(end) = tail.find('}') {
            let field = &tail[1..end];
            match placeholder(field, value) {
                Some(rendered) => out.push_str(&rendered),
                None => out.push_str(&tail[..=end]),
            }
            rest = &tail[end + 1..];
        } else {
            out.push_str(tail);
            rest = "";
        }
    }

    out.push_str(rest);
    out
}

/// Resolves one placeholder body. `None` means "not a placeholder".
fn placeholder(field: &str, value: &Value) -> Option<String> {
    if field.contains('{') {
        return None;
    }

    let field = field.trim();
    let path = match field {
        "" | "0" => return Some(render(value)),
        _ => field.strip_prefix("0.").unwrap_or(field),
    };

    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => match map.get(segment) {
                Some(next) => next,
                None => return Some(String::new()),
            },
            Value::Array(items) => match segment.parse::<usize>().ok().and_then(|i| items.get(i)) {
                Some(next) => next,
                None => return Some(String::new()),
            },
            _ => return Some(String::new()),
        };
    }
    Some(render(current))
}

/// Renders a value the way a user would expect to read it in a message.
#[must_use]
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(render).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
