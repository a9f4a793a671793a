//! Form validation for the login and registration screens. Runs before any
//! call leaves the process; failed forms are never sent to a hosted service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-field inline error messages, keyed by form field name.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub avatar: String,
    pub telephone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub const MIN_PASSWORD_LEN: usize = 6;

/// Symbols the password rule accepts.
const PASSWORD_SYMBOLS: [char; 3] = ['!', '.', '-'];

/// One violated password rule. All violations are reported together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordIssue {
    TooShort,
    MissingUppercase,
    MissingDigit,
    MissingSymbol,
}

impl PasswordIssue {
    pub fn message(self) -> &'static str {
        match self {
            Self::TooShort => "at least 6 characters",
            Self::MissingUppercase => "an uppercase letter",
            Self::MissingDigit => "a digit",
            Self::MissingSymbol => "a symbol (! . -)",
        }
    }
}

pub fn password_issues(password: &str) -> Vec<PasswordIssue> {
    let mut issues = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        issues.push(PasswordIssue::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        issues.push(PasswordIssue::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        issues.push(PasswordIssue::MissingDigit);
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(&c)) {
        issues.push(PasswordIssue::MissingSymbol);
    }
    issues
}

/// Strength score 0..=5 for the registration meter: length >= 6, length >= 8,
/// uppercase, digit, symbol.
pub fn password_strength(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }
    let mut score = 0;
    let len = password.chars().count();
    if len >= 6 {
        score += 1;
    }
    if len >= 8 {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| PASSWORD_SYMBOLS.contains(&c)) {
        score += 1;
    }
    score
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLabel {
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
}

pub fn strength_label(score: u8) -> StrengthLabel {
    match score {
        0 | 1 => StrengthLabel::VeryWeak,
        2 => StrengthLabel::Weak,
        3 => StrengthLabel::Fair,
        4 => StrengthLabel::Good,
        _ => StrengthLabel::Strong,
    }
}

pub fn validate_registration(form: &RegistrationForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if form.name.trim().is_empty() {
        errors.insert("name".into(), "First name is required".into());
    }
    if form.lastname.trim().is_empty() {
        errors.insert("lastname".into(), "Last name is required".into());
    }
    if !form.email.contains('@') || !form.email.contains('.') {
        errors.insert("email".into(), "Invalid email address".into());
    }

    let issues = password_issues(&form.password);
    if !issues.is_empty() {
        let wanted: Vec<&str> = issues.iter().map(|i| i.message()).collect();
        errors.insert(
            "password".into(),
            format!("Password must contain: {}", wanted.join(", ")),
        );
    }

    if form.password != form.confirm_password {
        errors.insert("confirm_password".into(), "Passwords do not match".into());
    }
    if let Some(message) = telephone_error(&form.telephone) {
        errors.insert("telephone".into(), message);
    }
    if let Some(message) = avatar_error(&form.avatar) {
        errors.insert("avatar".into(), message);
    }

    errors
}

pub fn validate_login(form: &LoginForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if form.email.trim().is_empty() {
        errors.insert("email".into(), "Email is required".into());
    } else if !looks_like_email(&form.email) {
        errors.insert("email".into(), "Invalid email address".into());
    }

    if form.password.is_empty() {
        errors.insert("password".into(), "Password is required".into());
    } else if form.password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(
            "password".into(),
            "Password must be at least 6 characters".into(),
        );
    }

    errors
}

pub fn telephone_error(telephone: &str) -> Option<String> {
    let valid = telephone.len() >= 10 && telephone.chars().all(|c| c.is_ascii_digit());
    (!valid).then(|| "Telephone must contain at least 10 digits".to_string())
}

/// The avatar field is optional; a non-blank value must be a web URL.
pub fn avatar_error(avatar: &str) -> Option<String> {
    let avatar = avatar.trim();
    if avatar.is_empty() {
        return None;
    }
    let valid = avatar.starts_with("http://") || avatar.starts_with("https://");
    (!valid).then(|| "Avatar link is not a valid URL".to_string())
}

/// Login-screen email shape check: something@something.something, no spaces.
fn looks_like_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !domain.is_empty()
                && !email.contains(char::is_whitespace)
                && domain.split('.').count() >= 2
                && domain.split('.').all(|segment| !segment.is_empty())
        }
        _ => false,
    }
}
