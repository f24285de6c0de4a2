//! Naming helpers for deriving state field names from operation names.

/// Convert `snake_case` to `lowerCamelCase` by upper-casing the character
/// after every underscore.
///
/// Only the `_x` pairs change; the rest of the input is kept as is, so callers
/// that want `GET_ALL` to become `getAll` lower-case first.
///
/// ```
/// # use phaser::naming::snake_to_lower_camel;
/// assert_eq!(snake_to_lower_camel("get_all"), "getAll");
/// assert_eq!(snake_to_lower_camel("Test-test_Test"), "Test-testTest");
/// ```
pub fn snake_to_lower_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '_'
            && let Some(&next) = chars.peek()
            && is_word_char(next)
        {
            out.push(next.to_ascii_uppercase());
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Conventional field names for one operation's state slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    /// `is<Name>Pending`
    pub pending: String,
    /// `<name>Data`
    pub data: String,
    /// `<name>Error`
    pub error: String,
}

impl FieldNames {
    pub fn new(lower_camel_name: &str) -> Self {
        Self {
            pending: format!("is{}Pending", capitalize(lower_camel_name)),
            data: format!("{}Data", lower_camel_name),
            error: format!("{}Error", lower_camel_name),
        }
    }
}
