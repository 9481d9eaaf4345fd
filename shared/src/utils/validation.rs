use chrono::{NaiveDate, Utc};
use regex::Regex;

// Validate format email
pub fn is_valid_email(email: &str) -> bool {
    let email_regex = Regex::new(
        r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"
    ).unwrap();

    email_regex.is_match(email)
}

// Validate nomor telepon client (10-15 digit, angka saja)
pub fn is_valid_phone(phone: &str) -> bool {
    (10..=15).contains(&phone.len()) && phone.chars().all(|c| c.is_ascii_digit())
}

// Validate nomor GST (15 karakter alphanumeric uppercase)
pub fn is_valid_gst_number(gst: &str) -> bool {
    let gst_regex = Regex::new(r"^[0-9A-Z]{15}$").unwrap();
    gst_regex.is_match(gst)
}

// Validate PIN code alamat (6-10 karakter)
pub fn is_valid_pin_code(pin_code: &str) -> bool {
    (6..=10).contains(&pin_code.len())
        && pin_code.chars().all(|c| c.is_ascii_alphanumeric())
}

// Validate text field dengan panjang minimum (nama, kota, dll)
pub fn has_min_length(value: &str, min: usize) -> bool {
    value.trim().len() >= min
}

// Validate tanggal harus hari ini atau setelahnya (untuk next payment date)
pub fn is_today_or_future(date: NaiveDate) -> bool {
    date >= Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("john@abclogistics.com"));
        assert!(is_valid_email("user.name+tag@example.co.in"));
        assert!(!is_valid_email("invalid.email"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("9876543210"));
        assert!(is_valid_phone("919876543210"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("98765abc10"));
        assert!(!is_valid_phone("9876543210987654"));
    }

    #[test]
    fn test_gst_number_validation() {
        assert!(is_valid_gst_number("27AAPFU0939F1ZV"));
        assert!(!is_valid_gst_number("27AAPFU0939F1Z"));
        assert!(!is_valid_gst_number("27aapfu0939f1zv"));
        assert!(!is_valid_gst_number("27AAPFU0939F1ZV9"));
    }

    #[test]
    fn test_pin_code_validation() {
        assert!(is_valid_pin_code("400001"));
        assert!(is_valid_pin_code("SW1A1AA"));
        assert!(!is_valid_pin_code("1234"));
        assert!(!is_valid_pin_code("12345678901"));
        assert!(!is_valid_pin_code("400 001"));
    }

    #[test]
    fn test_min_length() {
        assert!(has_min_length("Mumbai", 2));
        assert!(!has_min_length("M", 2));
        assert!(!has_min_length("   ", 2));
    }

    #[test]
    fn test_today_or_future() {
        let today = Utc::now().date_naive();
        assert!(is_today_or_future(today));
        assert!(is_today_or_future(today + Duration::days(30)));
        assert!(!is_today_or_future(today - Duration::days(1)));
    }
}
