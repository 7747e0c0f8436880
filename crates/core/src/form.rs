use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const MESSAGE_REQUIRED: &str = "Message is required";

/// Fields of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// Returns the form-encoded name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values currently entered in the contact form.
///
/// Missing keys deserialize as empty strings so a partially posted form still
/// reaches validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactFormData {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Returns `true` when every field is the empty string.
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_empty())
    }
}

/// Per-field validation messages. A field is present only while invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, &'static str>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Drops the message recorded for `field`, returning whether one existed.
    pub fn clear(&mut self, field: Field) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn insert(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }
}

/// Checks every field independently and returns the full error set.
pub fn validate(data: &ContactFormData) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if is_blank(&data.name) {
        errors.insert(Field::Name, NAME_REQUIRED);
    }

    if is_blank(&data.email) {
        errors.insert(Field::Email, EMAIL_REQUIRED);
    } else if !is_valid_email(&data.email) {
        errors.insert(Field::Email, EMAIL_INVALID);
    }

    if is_blank(&data.message) {
        errors.insert(Field::Message, MESSAGE_REQUIRED);
    }

    errors
}

/// Accepts `local@domain.tld` shapes: exactly one `@`, no whitespace, and a
/// `.` inside the domain with at least one character on each side.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(is_js_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}

fn is_blank(value: &str) -> bool {
    value.trim_matches(is_js_whitespace).is_empty()
}

/// Whitespace as matched by `\s` in browser regular expressions and stripped
/// by `String.prototype.trim`. Unlike `char::is_whitespace` this includes
/// U+FEFF and excludes U+0085.
fn is_js_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_form_reports_all_three_fields() {
        let errors = validate(&ContactFormData::new("", "   ", ""));
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Field::Name), Some(NAME_REQUIRED));
        assert_eq!(errors.get(Field::Email), Some(EMAIL_REQUIRED));
        assert_eq!(errors.get(Field::Message), Some(MESSAGE_REQUIRED));
    }

    #[test]
    fn complete_form_is_valid() {
        let errors = validate(&ContactFormData::new("Alice", "alice@example.com", "Hi"));
        assert!(errors.is_empty());
    }

    #[test]
    fn validation_is_idempotent() {
        let data = ContactFormData::new(" ", "bad@", "hello");
        assert_eq!(validate(&data), validate(&data));
    }

    #[test]
    fn malformed_email_gets_format_message() {
        let errors = validate(&ContactFormData::new("Bob", "ab.com", "Hi"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Email), Some(EMAIL_INVALID));
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(is_valid_email("a@b.c.d"));

        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("ab.com"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a@b.com "));
        assert!(!is_valid_email("a@b\t.com"));
    }

    #[test]
    fn surrounding_whitespace_fails_format_check() {
        let errors = validate(&ContactFormData::new("Al", " a@b.com", "x"));
        assert_eq!(errors.get(Field::Email), Some(EMAIL_INVALID));
    }

    #[test]
    fn clearing_one_field_leaves_others() {
        let mut errors = validate(&ContactFormData::default());
        assert!(errors.clear(Field::Email));
        assert!(!errors.clear(Field::Email));
        assert!(errors.contains(Field::Name));
        assert!(errors.contains(Field::Message));
    }

    #[test]
    fn byte_order_mark_counts_as_blank() {
        let errors = validate(&ContactFormData::new("\u{feff}", "\u{feff}", "\u{feff} \u{3000}"));
        assert_eq!(errors.get(Field::Name), Some(NAME_REQUIRED));
        assert_eq!(errors.get(Field::Email), Some(EMAIL_REQUIRED));
        assert_eq!(errors.get(Field::Message), Some(MESSAGE_REQUIRED));
    }

    #[test]
    fn next_line_is_not_whitespace_in_email() {
        assert!(is_valid_email("a\u{85}b@c.com"));
        assert!(!is_valid_email("a\u{feff}b@c.com"));
        assert!(!is_valid_email("a\u{a0}b@c.com"));
    }

    #[test]
    fn next_line_alone_is_not_blank() {
        let errors = validate(&ContactFormData::new("\u{85}", "a@b.com", "hi"));
        assert!(!errors.contains(Field::Name));
    }

    #[test]
    fn missing_keys_deserialize_as_empty() {
        let data: ContactFormData =
            serde_json::from_str(r#"{"name":"Ann"}"#).expect("partial form should parse");
        assert_eq!(data, ContactFormData::new("Ann", "", ""));
    }
}
