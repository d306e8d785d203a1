//! Credential validation: ordered rule checks for login and register input.
//!
//! Each check appends its violation message in schema order (username,
//! email, password; password rules from length to special character), so a
//! 400 body lists every broken rule, not just the first.

use validator::ValidateEmail;

const MSG_USERNAME_MIN: &str = "Username must be at least 3 characters";
const MSG_USERNAME_CHARSET: &str =
    "Username must start with a letter and can contain letters, numbers, underscores, or periods only";
const MSG_EMAIL: &str = "Invalid email format";
const MSG_PASSWORD_MIN: &str = "Password must be at least 8 characters";
const MSG_PASSWORD_UPPER: &str = "Password must include at least one uppercase letter";
const MSG_PASSWORD_LOWER: &str = "Password must include at least one lowercase letter";
const MSG_PASSWORD_DIGIT: &str = "Password must include at least one number";
const MSG_PASSWORD_SPECIAL: &str = "Password must include at least one special character";

const MIN_USERNAME_CHARS: usize = 3;
const MIN_PASSWORD_CHARS: usize = 8;

/// Login schema: email validity, then the password rules in order.
/// An empty result means the input passed.
pub fn validate_login(email: &str, password: &str) -> Vec<String> {
    let mut violations = Vec::new();
    check_email(email, &mut violations);
    check_password(password, &mut violations);
    violations
}

/// Register schema: username rules, then email, then the password rules.
pub fn validate_register(username: &str, email: &str, password: &str) -> Vec<String> {
    let mut violations = Vec::new();
    check_username(username, &mut violations);
    check_email(email, &mut violations);
    check_password(password, &mut violations);
    violations
}

fn check_username(username: &str, violations: &mut Vec<String>) {
    if username.chars().count() < MIN_USERNAME_CHARS {
        violations.push(MSG_USERNAME_MIN.to_string());
    }
    let mut chars = username.chars();
    let head_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let tail_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
    if !head_ok || !tail_ok {
        violations.push(MSG_USERNAME_CHARSET.to_string());
    }
}

fn check_email(email: &str, violations: &mut Vec<String>) {
    if !email.validate_email() {
        violations.push(MSG_EMAIL.to_string());
    }
}

fn check_password(password: &str, violations: &mut Vec<String>) {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        violations.push(MSG_PASSWORD_MIN.to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(MSG_PASSWORD_UPPER.to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push(MSG_PASSWORD_LOWER.to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push(MSG_PASSWORD_DIGIT.to_string());
    }
    // "Special" is anything outside ASCII alphanumerics; underscore counts.
    if !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        violations.push(MSG_PASSWORD_SPECIAL.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_password_passes() {
        assert!(validate_login("a@x.com", "Abc123!x").is_empty());
    }

    #[test]
    fn password_missing_upper_and_special() {
        let violations = validate_login("a@x.com", "abc12345");
        assert_eq!(
            violations,
            vec![MSG_PASSWORD_UPPER.to_string(), MSG_PASSWORD_SPECIAL.to_string()]
        );
    }

    #[test]
    fn weak_password_lists_rules_in_order() {
        let violations = validate_login("a@x.com", "abc");
        assert_eq!(
            violations,
            vec![
                MSG_PASSWORD_MIN.to_string(),
                MSG_PASSWORD_UPPER.to_string(),
                MSG_PASSWORD_DIGIT.to_string(),
                MSG_PASSWORD_SPECIAL.to_string(),
            ]
        );
    }

    #[test]
    fn underscore_counts_as_special() {
        assert!(validate_login("a@x.com", "Abcd123_").is_empty());
    }

    #[test]
    fn non_ascii_counts_as_special() {
        assert!(validate_login("a@x.com", "Abc1234é").is_empty());
    }

    #[test]
    fn invalid_email_rejected() {
        let violations = validate_login("not-an-email", "Abc123!x");
        assert_eq!(violations, vec![MSG_EMAIL.to_string()]);
    }

    #[test]
    fn username_rules() {
        assert!(validate_register("alice1", "a@x.com", "Str0ng!pw").is_empty());
        assert!(validate_register("a.lice_01", "a@x.com", "Str0ng!pw").is_empty());

        assert_eq!(
            validate_register("al", "a@x.com", "Str0ng!pw"),
            vec![MSG_USERNAME_MIN.to_string()]
        );
        assert_eq!(
            validate_register("1alice", "a@x.com", "Str0ng!pw"),
            vec![MSG_USERNAME_CHARSET.to_string()]
        );
        assert_eq!(
            validate_register("alice!", "a@x.com", "Str0ng!pw"),
            vec![MSG_USERNAME_CHARSET.to_string()]
        );
    }

    #[test]
    fn empty_username_violates_both_rules() {
        assert_eq!(
            validate_register("", "a@x.com", "Str0ng!pw"),
            vec![MSG_USERNAME_MIN.to_string(), MSG_USERNAME_CHARSET.to_string()]
        );
    }

    #[test]
    fn register_violations_follow_field_order() {
        // "x" is a single letter: charset is fine, only the length rule trips.
        let violations = validate_register("x", "bad", "weak");
        assert_eq!(
            violations,
            vec![
                MSG_USERNAME_MIN.to_string(),
                MSG_EMAIL.to_string(),
                MSG_PASSWORD_MIN.to_string(),
                MSG_PASSWORD_UPPER.to_string(),
                MSG_PASSWORD_DIGIT.to_string(),
                MSG_PASSWORD_SPECIAL.to_string(),
            ]
        );
    }
}
