use phonenumber::country;
use phonenumber::Mode;

use crate::domain::error::{AppError, Result};

/// Validates phone numbers for a single default region
#[derive(Debug, Clone, Copy)]
pub struct PhoneValidator {
    region: country::Id,
}

impl PhoneValidator {
    pub fn new(region: country::Id) -> Self {
        Self { region }
    }

    /// Build a validator from an ISO 3166 code such as `BR`
    pub fn for_region(code: &str) -> Result<Self> {
        let region = code
            .trim()
            .to_ascii_uppercase()
            .parse::<country::Id>()
            .map_err(|_| AppError::ValidationError(format!("Unknown phone region: {}", code)))?;

        Ok(Self::new(region))
    }

    pub fn region(&self) -> country::Id {
        self.region
    }

    /// Canonical international form without the leading `+`, or `None`
    /// when the candidate is not a valid number for the region
    pub fn normalize(&self, candidate: &str) -> Option<String> {
        let digits: String = candidate.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return None;
        }

        let number = phonenumber::parse(Some(self.region), &digits).ok()?;
        if !phonenumber::is_valid(&number) {
            return None;
        }

        let formatted = number.format().mode(Mode::E164).to_string();
        Some(formatted.trim_start_matches('+').to_string())
    }
}
