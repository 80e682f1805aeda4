//! Form checks the request layer runs before calling the stores.
//!
//! The stores themselves accept any non-null input; these helpers decide what
//! a visitor is allowed to submit.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

/// Expiry choices offered on the snippet form, in days.
pub const PERMITTED_EXPIRY_DAYS: [u32; 3] = [1, 7, 365];

pub const MAX_TITLE_CHARS: usize = 100;
pub const MIN_PASSWORD_CHARS: usize = 8;

pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Counts characters, not bytes.
pub fn max_chars(value: &str, n: usize) -> bool {
    value.chars().count() <= n
}

pub fn min_chars(value: &str, n: usize) -> bool {
    value.chars().count() >= n
}

pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.contains(value)
}

pub fn matches_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Per-field error messages; the first message recorded for a field wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, &'static str>);

impl FieldErrors {
    pub fn check(&mut self, ok: bool, field: &'static str, message: &'static str) {
        if !ok {
            self.0.entry(field).or_insert(message);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }
}

/// Validate the snippet creation form.
pub fn validate_snippet(title: &str, content: &str, expires: u32) -> FieldErrors {
    let mut errs = FieldErrors::default();
    errs.check(not_blank(title), "title", "This field cannot be blank");
    errs.check(
        max_chars(title, MAX_TITLE_CHARS),
        "title",
        "This field cannot be more than 100 characters long",
    );
    errs.check(not_blank(content), "content", "This field cannot be blank");
    errs.check(
        permitted_value(&expires, &PERMITTED_EXPIRY_DAYS),
        "expires",
        "This field must equal 1, 7 or 365",
    );
    errs
}

/// Validate the signup form.
pub fn validate_signup(name: &str, email: &str, password: &str) -> FieldErrors {
    let mut errs = FieldErrors::default();
    errs.check(not_blank(name), "name", "This field cannot be blank");
    errs.check(not_blank(email), "email", "This field cannot be blank");
    errs.check(matches_email(email.trim()), "email", "This field must be a valid email address");
    errs.check(not_blank(password), "password", "This field cannot be blank");
    errs.check(
        min_chars(password, MIN_PASSWORD_CHARS),
        "password",
        "This field must be at least 8 characters long",
    );
    errs
}
