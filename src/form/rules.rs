use compact_str::CompactString;
use rust_decimal::Decimal;

use super::validation::{FieldLens, ValidationError};

pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for bool {
    fn is_present(&self) -> bool {
        *self
    }
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Presence for CompactString {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Presence for Decimal {
    fn is_present(&self) -> bool {
        true
    }
}

impl<V> Presence for Option<V>
where
    V: Presence,
{
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(Presence::is_present)
    }
}

pub trait TextValue {
    fn text(&self) -> Option<&str>;
}

impl TextValue for String {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl TextValue for CompactString {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl<V> TextValue for Option<V>
where
    V: TextValue,
{
    fn text(&self) -> Option<&str> {
        self.as_ref().and_then(TextValue::text)
    }
}

pub fn required<T, V, E>(
    error: E,
) -> impl for<'a> Fn(&'a T, &'a V) -> Result<(), E> + Send + Sync
where
    V: Presence,
    E: ValidationError,
{
    move |_model, value| {
        if value.is_present() {
            Ok(())
        } else {
            Err(error.clone())
        }
    }
}

pub fn email_format<T, V, E>(
    error: E,
) -> impl for<'a> Fn(&'a T, &'a V) -> Result<(), E> + Send + Sync
where
    V: TextValue,
    E: ValidationError,
{
    move |_model, value| match value.text() {
        Some(text) if !text.is_empty() && !is_email_shaped(text) => Err(error.clone()),
        _ => Ok(()),
    }
}

pub fn min_length<T, V, E>(
    min: usize,
    error: E,
) -> impl for<'a> Fn(&'a T, &'a V) -> Result<(), E> + Send + Sync
where
    V: TextValue,
    E: ValidationError,
{
    move |_model, value| match value.text() {
        Some(text) if text.chars().count() < min => Err(error.clone()),
        _ => Ok(()),
    }
}

pub fn matches_field<T, O, E>(
    other: O,
    error: E,
) -> impl for<'a> Fn(&'a T, &'a O::Value) -> Result<(), E> + Send + Sync
where
    O: FieldLens<T>,
    E: ValidationError,
{
    move |model, value| {
        if value == other.get(model) {
            Ok(())
        } else {
            Err(error.clone())
        }
    }
}

pub fn strong_password<T, V, E>(
    error: E,
) -> impl for<'a> Fn(&'a T, &'a V) -> Result<(), E> + Send + Sync
where
    V: TextValue,
    E: ValidationError,
{
    move |_model, value| match value.text() {
        Some(text) if !is_strong_password(text) => Err(error.clone()),
        _ => Ok(()),
    }
}

pub fn username_format<T, V, E>(
    error: E,
) -> impl for<'a> Fn(&'a T, &'a V) -> Result<(), E> + Send + Sync
where
    V: TextValue,
    E: ValidationError,
{
    move |_model, value| match value.text() {
        Some(text) if !is_valid_username(text) => Err(error.clone()),
        _ => Ok(()),
    }
}

pub fn phone_format<T, V, E>(
    error: E,
) -> impl for<'a> Fn(&'a T, &'a V) -> Result<(), E> + Send + Sync
where
    V: TextValue,
    E: ValidationError,
{
    move |_model, value| match value.text() {
        Some(text) if !is_valid_phone(text) => Err(error.clone()),
        _ => Ok(()),
    }
}

fn is_email_shaped(value: &str) -> bool {
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if local.chars().any(char::is_whitespace) || domain.chars().any(char::is_whitespace) {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}

fn is_strong_password(value: &str) -> bool {
    value.chars().count() >= 8
        && value.chars().any(|ch| ch.is_ascii_lowercase())
        && value.chars().any(|ch| ch.is_ascii_uppercase())
        && value.chars().any(|ch| ch.is_ascii_digit())
}

fn is_valid_username(value: &str) -> bool {
    let length = value.chars().count();
    (3..=20).contains(&length)
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

fn is_valid_phone(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    let length = digits.chars().count();
    (10..=15).contains(&length) && digits.chars().all(|ch| ch.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape_accepts_local_at_dotted_domain() {
        assert!(is_email_shaped("user@example.com"));
        assert!(is_email_shaped("first.last@sub.example.co"));
        assert!(!is_email_shaped("plainaddress"));
        assert!(!is_email_shaped("a@b"));
        assert!(!is_email_shaped("a@.com"));
        assert!(!is_email_shaped("a@com."));
        assert!(!is_email_shaped("a b@example.com"));
        assert!(!is_email_shaped("a@@example.com"));
        assert!(!is_email_shaped("@example.com"));
    }

    #[test]
    fn strong_password_needs_length_and_character_classes() {
        assert!(is_strong_password("Abcdef12"));
        assert!(!is_strong_password("abcdef12"));
        assert!(!is_strong_password("ABCDEF12"));
        assert!(!is_strong_password("Abcdefgh"));
        assert!(!is_strong_password("Ab1"));
    }

    #[test]
    fn username_allows_word_characters_within_bounds() {
        assert!(is_valid_username("user_01"));
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("name with space"));
        assert!(!is_valid_username("a".repeat(21).as_str()));
    }

    #[test]
    fn phone_accepts_optional_plus_and_digit_run() {
        assert!(is_valid_phone("+4915123456789"));
        assert!(is_valid_phone("0151234567"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("+49-151-2345"));
    }

    #[test]
    fn presence_covers_blank_strings_and_false_booleans() {
        assert!(!String::new().is_present());
        assert!(!String::from("   ").is_present());
        assert!(String::from("x").is_present());
        assert!(!false.is_present());
        assert!(true.is_present());
        assert!(!None::<String>.is_present());
        assert!(Some(String::from("x")).is_present());
    }
}
