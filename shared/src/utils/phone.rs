//! Phone number and one-time code format utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Indian mobile number: 10 ASCII digits, leading 6-9
static INDIAN_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[6-9][0-9]{9}$").unwrap()
});

static OTP_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{6}$").unwrap()
});

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

/// Check if a phone number is a valid 10-digit Indian mobile number
///
/// No normalisation is applied: `+91`, spaces and dashes are rejected so the
/// stored key is always the bare national number.
pub fn is_valid_mobile_number(phone: &str) -> bool {
    INDIAN_MOBILE_REGEX.is_match(phone)
}

/// Check if a submitted one-time code is exactly six ASCII digits
pub fn is_valid_otp_code(code: &str) -> bool {
    OTP_CODE_REGEX.is_match(code)
}

/// Loose email shape check (something@something.tld)
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Build the international destination for a national number
pub fn to_international(country_prefix: &str, phone: &str) -> String {
    format!("{}{}", country_prefix, phone)
}

/// Mask a phone number for display (e.g., 987****3210)
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() >= 7 {
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}****{}", head, tail)
    } else {
        "****".to_string()
    }
}
