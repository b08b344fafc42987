//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Korean mobile phone number regex (010-prefixed, without country code)
static KR_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^01[016789]\d{7,8}$").unwrap());

// International phone number regex (E.164 format)
static INTERNATIONAL_PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").unwrap());

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is a valid Korean mobile number
pub fn is_valid_korean_mobile(phone: &str) -> bool {
    let normalized = normalize_phone_number(phone);
    KR_MOBILE_REGEX.is_match(&normalized)
}

/// Check if a phone number is valid in international E.164 format
pub fn is_valid_international_phone(phone: &str) -> bool {
    let normalized = normalize_phone_number(phone);
    INTERNATIONAL_PHONE_REGEX.is_match(&normalized)
}

/// Check if a phone number is acceptable (Korean mobile or E.164)
pub fn is_valid_phone(phone: &str) -> bool {
    let normalized = normalize_phone_number(phone);
    is_valid_korean_mobile(&normalized) || is_valid_international_phone(&normalized)
}

/// Mask a phone number for logging (e.g., 010****5678)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
