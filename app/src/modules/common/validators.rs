use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// digits with an optional leading + and common separators,
    /// 8 to 20 characters, enough for indian and international numbers
    pub static ref REGEX_PHONE_NUMBER: Regex = Regex::new(r"^\+?[0-9][0-9 \-]{7,19}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_phone_formats() {
        for phone in ["+919876543210", "98765 43210", "011-2345-6789"] {
            assert!(REGEX_PHONE_NUMBER.is_match(phone), "rejected {phone}");
        }
    }

    #[test]
    fn rejects_garbage() {
        for phone in ["", "12345", "not a phone", "+"] {
            assert!(!REGEX_PHONE_NUMBER.is_match(phone), "accepted {phone}");
        }
    }
}
