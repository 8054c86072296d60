//! Input format checks shared by donor and request validation

/// Minimal email shape check: non-empty local part and a dotted domain.
pub fn valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Phone numbers are 10-15 digits with an optional leading '+'.
pub fn valid_phone(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    (10..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(valid_email("donor@example.com"));
        assert!(valid_email("a.b@mail.example.org"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("@example.com"));
        assert!(!valid_email("donor@nodot"));
        assert!(!valid_email("donor@.com"));
    }

    #[test]
    fn test_valid_phones() {
        assert!(valid_phone("0123456789"));
        assert!(valid_phone("+358401234567"));
    }

    #[test]
    fn test_invalid_phones() {
        assert!(!valid_phone("12345"));
        assert!(!valid_phone("12345678901234567890"));
        assert!(!valid_phone("+12-3456-7890"));
    }
}
