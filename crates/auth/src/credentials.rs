//! Local email/password checks run before the identity provider is
//! called.
//!
//! Mirrors the field-keyed error-code pattern of the spell form: every
//! violation is collected, codes double as localization keys
//! (`login.errors.*`), and nothing reaches the provider while the set is
//! non-empty.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

/// The login form fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CredentialField {
    Email,
    Password,
}

/// Field-keyed error codes for the login form.
pub type CredentialErrors = BTreeMap<CredentialField, &'static str>;

/// Syntactic email shape: something before an `@`, something after it,
/// and a dot-separated suffix, with no whitespace anywhere.
fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// Minimum password length accepted by the login form.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validate login credentials, collecting every violation.
pub fn validate_credentials(email: &str, password: &str) -> CredentialErrors {
    let mut errors = CredentialErrors::new();

    if email.is_empty() {
        errors.insert(CredentialField::Email, "login.errors.missingEmail");
    } else if !email_pattern().is_match(email) {
        errors.insert(CredentialField::Email, "login.errors.invalidEmail");
    }

    if password.is_empty() {
        errors.insert(CredentialField::Password, "login.errors.missingPassword");
    } else if password.len() < MIN_PASSWORD_LEN {
        errors.insert(CredentialField::Password, "login.errors.shortPassword");
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_credentials_pass() {
        assert!(validate_credentials("user@example.com", "secret-1").is_empty());
    }

    #[test]
    fn missing_email_is_reported_before_shape() {
        let errors = validate_credentials("", "secret-1");
        assert_eq!(
            errors.get(&CredentialField::Email),
            Some(&"login.errors.missingEmail")
        );
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in [
            "no-at-sign",
            "user@no-dot",
            "user @example.com",
            "user@exa mple.com",
            "@example.com",
            "user@.x ",
        ] {
            let errors = validate_credentials(email, "secret-1");
            assert_eq!(
                errors.get(&CredentialField::Email),
                Some(&"login.errors.invalidEmail"),
                "email {email:?}"
            );
        }
    }

    #[test]
    fn missing_password_is_reported() {
        let errors = validate_credentials("user@example.com", "");
        assert_eq!(
            errors.get(&CredentialField::Password),
            Some(&"login.errors.missingPassword")
        );
    }

    #[test]
    fn short_password_is_reported() {
        let errors = validate_credentials("user@example.com", "five5");
        assert_eq!(
            errors.get(&CredentialField::Password),
            Some(&"login.errors.shortPassword")
        );
    }

    #[test]
    fn six_character_password_is_accepted() {
        assert!(validate_credentials("user@example.com", "sixsix").is_empty());
    }

    #[test]
    fn both_violations_are_collected() {
        let errors = validate_credentials("nope", "x");
        assert_eq!(errors.len(), 2);
    }
}
