//! Field rules of the registration and verification forms.
//!
//! Each validator returns `Err` with the message shown under the field.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::SignupRequest;

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^9\d{9}$").unwrap());
static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6}$").unwrap());

const SPECIALS: &str = "!@#$%^&*()";

pub type FieldResult = Result<(), &'static str>;

pub fn name(value: &str) -> FieldResult {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Full name is required");
    }
    if !NAME_RE.is_match(value) {
        return Err("Only letters and spaces are allowed");
    }
    match trimmed.chars().count() {
        n if n < 2 => Err("Name must be at least 2 characters"),
        n if n > 50 => Err("Name must not exceed 50 characters"),
        _ => Ok(()),
    }
}

pub fn email(value: &str) -> FieldResult {
    if value.trim().is_empty() {
        return Err("Email is required");
    }
    if !EMAIL_RE.is_match(value) {
        return Err("Please enter a valid email format");
    }
    Ok(())
}

pub fn password(value: &str) -> FieldResult {
    if value.is_empty() {
        return Err("Password is required");
    }
    if value.chars().count() < 8 {
        return Err("Password must be at least 8 characters");
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password must contain at least one uppercase letter");
    }
    if !value.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Password must contain at least one lowercase letter");
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one number");
    }
    if !value.chars().any(|c| SPECIALS.contains(c)) {
        return Err("Password must contain at least one special character (!@#$%^&*())");
    }
    Ok(())
}

pub fn confirm_password(value: &str, password: &str) -> FieldResult {
    if value.is_empty() {
        return Err("Please confirm your password");
    }
    if value != password {
        return Err("Passwords do not match");
    }
    Ok(())
}

pub fn address(value: &str) -> FieldResult {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Address is required");
    }
    match trimmed.chars().count() {
        n if n < 5 => Err("Address must be at least 5 characters"),
        n if n > 100 => Err("Address must not exceed 100 characters"),
        _ => Ok(()),
    }
}

pub fn phone_number(value: &str) -> FieldResult {
    if value.trim().is_empty() {
        return Err("Phone number is required");
    }
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if !PHONE_RE.is_match(&compact) {
        return Err("Please enter a valid Nepal phone number (9XXXXXXXXX)");
    }
    Ok(())
}

pub const WARD_COUNT: u8 = 20;

pub fn ward_number(value: &str) -> FieldResult {
    match value.trim().parse::<u8>() {
        Ok(n) if (1..=WARD_COUNT).contains(&n) => Ok(()),
        _ => Err("Please select your ward"),
    }
}

/// Returns the six digits ready to send.
pub fn verification_code(value: &str) -> Result<String, &'static str> {
    let code: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if CODE_RE.is_match(&code) {
        Ok(code)
    } else {
        Err("Please enter a valid 6-digit code")
    }
}

/* ---------------- password strength meter ---------------- */

pub fn password_strength(value: &str) -> u8 {
    let checks = [
        value.chars().count() >= 8,
        value.chars().any(|c| c.is_ascii_uppercase()),
        value.chars().any(|c| c.is_ascii_lowercase()),
        value.chars().any(|c| c.is_ascii_digit()),
        value.chars().any(|c| SPECIALS.contains(c)),
    ];
    let score = checks.iter().filter(|ok| **ok).count() as u8 * 25;
    score.min(100)
}

pub fn strength_label(strength: u8) -> &'static str {
    match strength {
        0..=24 => "Weak",
        25..=49 => "Fair",
        50..=74 => "Good",
        _ => "Strong",
    }
}

/* ---------------- whole registration form ---------------- */

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
    pub confirm_password: Option<&'static str>,
    pub address: Option<&'static str>,
    pub phone_number: Option<&'static str>,
    pub ward_number: Option<&'static str>,
}

impl RegisterErrors {
    pub fn is_empty(&self) -> bool {
        *self == RegisterErrors::default()
    }
}

pub fn register_form(fields: &SignupRequest, confirm: &str) -> RegisterErrors {
    RegisterErrors {
        name: name(&fields.name).err(),
        email: email(&fields.email).err(),
        password: password(&fields.password).err(),
        confirm_password: confirm_password(confirm, &fields.password).err(),
        address: address(&fields.address).err(),
        phone_number: phone_number(&fields.phone_number).err(),
        ward_number: ward_number(&fields.ward_number).err(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SignupRequest {
        SignupRequest {
            name: "Ram Chandra".into(),
            email: "ram@example.com".into(),
            password: "Kathmandu1!".into(),
            address: "Bijayapur Sadak".into(),
            phone_number: "98 4247 6397".into(),
            ward_number: "5".into(),
        }
    }

    #[test]
    fn valid_registration_has_no_errors() {
        let errors = register_form(&valid_form(), "Kathmandu1!");
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn every_broken_field_is_reported() {
        let fields = SignupRequest {
            name: "R2D2".into(),
            email: "not-an-email".into(),
            password: "short".into(),
            address: "abc".into(),
            phone_number: "0123".into(),
            ward_number: String::new(),
        };
        let errors = register_form(&fields, "other");
        assert_eq!(errors.name, Some("Only letters and spaces are allowed"));
        assert_eq!(errors.email, Some("Please enter a valid email format"));
        assert_eq!(errors.password, Some("Password must be at least 8 characters"));
        assert_eq!(errors.confirm_password, Some("Passwords do not match"));
        assert_eq!(errors.address, Some("Address must be at least 5 characters"));
        assert!(errors.phone_number.unwrap().contains("Nepal"));
        assert_eq!(errors.ward_number, Some("Please select your ward"));
    }

    #[test]
    fn ward_must_be_one_of_the_municipal_wards() {
        assert_eq!(ward_number("1"), Ok(()));
        assert_eq!(ward_number("20"), Ok(()));
        assert!(ward_number("0").is_err());
        assert!(ward_number("21").is_err());
        assert!(ward_number("").is_err());
    }

    #[test]
    fn name_length_is_bounded() {
        assert_eq!(name("  "), Err("Full name is required"));
        assert_eq!(name("A"), Err("Name must be at least 2 characters"));
        assert_eq!(name(&"a".repeat(51)), Err("Name must not exceed 50 characters"));
    }

    #[test]
    fn password_rules_apply_in_order() {
        assert_eq!(password(""), Err("Password is required"));
        assert!(password("alllowercase1!").unwrap_err().contains("uppercase"));
        assert!(password("ALLUPPERCASE1!").unwrap_err().contains("lowercase"));
        assert!(password("NoDigitsHere!").unwrap_err().contains("number"));
        assert!(password("NoSpecial123").unwrap_err().contains("special"));
        assert_eq!(password("Good#Pass9"), Ok(()));
    }

    #[test]
    fn address_is_trimmed_before_measuring() {
        assert_eq!(address("   ab   "), Err("Address must be at least 5 characters"));
        assert_eq!(address(&"x".repeat(101)), Err("Address must not exceed 100 characters"));
    }

    #[test]
    fn verification_code_needs_six_digits() {
        assert_eq!(verification_code("123456"), Ok("123456".to_string()));
        assert_eq!(verification_code(" 123 456 "), Ok("123456".to_string()));
        assert!(verification_code("12345").is_err());
        assert!(verification_code("12a456").is_err());
        assert!(verification_code("1234567").is_err());
    }

    #[test]
    fn strength_scores_and_labels() {
        assert_eq!(password_strength(""), 0);
        assert_eq!(strength_label(password_strength("")), "Weak");
        assert_eq!(password_strength("abc"), 25);
        assert_eq!(strength_label(25), "Fair");
        assert_eq!(password_strength("abcD1"), 75);
        assert_eq!(strength_label(75), "Strong");
        assert_eq!(password_strength("Kathmandu1!"), 100);
    }
}
