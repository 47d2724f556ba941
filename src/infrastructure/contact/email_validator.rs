use validator::ValidateEmail;

/// Structural email check (local-part@domain)
#[derive(Debug, Default, Clone, Copy)]
pub struct EmailValidator;

impl EmailValidator {
    pub fn new() -> Self {
        Self
    }

    /// The trimmed candidate when it is a well-formed address
    pub fn normalize(&self, candidate: &str) -> Option<String> {
        let candidate = candidate.trim();
        if candidate.validate_email() {
            Some(candidate.to_string())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_addresses() {
        let validator = EmailValidator::new();
        assert_eq!(
            validator.normalize("user@example.com"),
            Some("user@example.com".to_string())
        );
        assert_eq!(validator.normalize(" ana@x.com "), Some("ana@x.com".to_string()));
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        let validator = EmailValidator::new();
        assert_eq!(validator.normalize("not-an-email"), None);
        assert_eq!(validator.normalize("user@"), None);
        assert_eq!(validator.normalize("@example.com"), None);
        assert_eq!(validator.normalize(""), None);
    }
}
