use std::sync::LazyLock;

use regex::Regex;

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// `local@domain.tld` with no whitespace anywhere and no second `@`.
pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// At least eight characters with an uppercase letter, a digit and one of
/// `!@#$%^&*`.
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LEN
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}
