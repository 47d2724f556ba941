// ============================================================
// ADDRESS FORMATTER
// ============================================================
// Collect phone/email columns into a validated `addresses` list

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::domain::error::Result;
use crate::domain::roster::{Address, AddressKind, FieldValue, Row, VALUE_SEPARATOR};
use crate::infrastructure::contact::{EmailValidator, PhoneValidator};

static PHONE_SEPARATOR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[/,]").unwrap());

static EMAIL_SEPARATOR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s/,-]").unwrap());

/// Split a raw column value into trimmed, non-empty candidates
pub fn split_candidates(raw: &str, kind: AddressKind) -> Vec<&str> {
    let pattern = match kind {
        AddressKind::Phone => &*PHONE_SEPARATOR_PATTERN,
        AddressKind::Email => &*EMAIL_SEPARATOR_PATTERN,
    };

    pattern
        .split(raw)
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .collect()
}

pub struct AddressFormatter {
    phones: PhoneValidator,
    emails: EmailValidator,
}

impl AddressFormatter {
    pub fn new(phones: PhoneValidator, emails: EmailValidator) -> Self {
        Self { phones, emails }
    }

    pub fn for_region(region: &str) -> Result<Self> {
        Ok(Self::new(PhoneValidator::for_region(region)?, EmailValidator::new()))
    }

    /// Remove every phone/email column from `row` and return the valid addresses
    pub fn format_row(&self, row: &mut Row) -> Vec<Address> {
        row.take_matching(AddressKind::is_address_field)
            .into_iter()
            .flat_map(|(name, value)| self.format_field(&name, &value))
            .collect()
    }

    /// Validated addresses of a single column; invalid candidates are dropped
    pub fn format_field(&self, field_name: &str, value: &FieldValue) -> Vec<Address> {
        let Some(kind) = AddressKind::from_field_name(field_name) else {
            return Vec::new();
        };

        let raw = value.joined(VALUE_SEPARATOR);
        let candidates = split_candidates(&raw, kind);
        let total = candidates.len();

        let addresses: Vec<Address> = candidates
            .into_iter()
            .filter_map(|candidate| self.validate(kind, candidate))
            .map(|address| Address::from_field_name(field_name, address))
            .collect();

        if addresses.len() < total {
            debug!(
                field = field_name,
                rejected = total - addresses.len(),
                "Dropped invalid address candidates"
            );
        }

        addresses
    }

    fn validate(&self, kind: AddressKind, candidate: &str) -> Option<String> {
        match kind {
            AddressKind::Phone => self.phones.normalize(candidate),
            AddressKind::Email => self.emails.normalize(candidate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter() -> AddressFormatter {
        AddressFormatter::for_region("BR").unwrap()
    }

    #[test]
    fn test_phone_split_keeps_spaces_and_hyphens() {
        assert_eq!(
            split_candidates("(11) 98765-4321 / 11912345678,", AddressKind::Phone),
            vec!["(11) 98765-4321", "11912345678"]
        );
    }

    #[test]
    fn test_email_split_on_whitespace_and_hyphen() {
        assert_eq!(
            split_candidates("email a@x.com/b@x.com, c@x.com-d@x.com", AddressKind::Email),
            vec!["email", "a@x.com", "b@x.com", "c@x.com", "d@x.com"]
        );
    }

    #[test]
    fn test_phone_field() {
        let addresses = formatter().format_field("phone", &FieldValue::from("phone 11987654321"));
        assert_eq!(
            addresses,
            vec![Address::from_field_name("phone", "5511987654321".to_string())]
        );
    }

    #[test]
    fn test_invalid_phone_is_dropped() {
        let addresses = formatter().format_field("phone", &FieldValue::from("123"));
        assert!(addresses.is_empty());
    }

    #[test]
    fn test_email_field_with_tags() {
        let addresses = formatter().format_field(
            "email Responsible Parent",
            &FieldValue::from("user@example.com not-an-email"),
        );

        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0].kind, "email");
        assert_eq!(addresses[0].tags, vec!["Responsible", "Parent"]);
        assert_eq!(addresses[0].address, "user@example.com");
    }

    #[test]
    fn test_merged_phones_split_into_candidates() {
        let addresses =
            formatter().format_field("phone", &FieldValue::from("11987654321/11912345678"));
        let numbers: Vec<&str> = addresses.iter().map(|a| a.address.as_str()).collect();
        assert_eq!(numbers, vec!["5511987654321", "5511912345678"]);
    }

    #[test]
    fn test_list_values_are_all_checked() {
        let value = FieldValue::List(vec!["a@x.com".to_string(), "b@x.com".to_string()]);
        assert_eq!(formatter().format_field("email", &value).len(), 2);
    }

    #[test]
    fn test_format_row_removes_source_fields() {
        let mut row = Row::with_fields(
            2,
            [
                ("fullname", "Ana"),
                ("phone Student", "11987654321"),
                ("email Student", "ana@x.com"),
                ("email Parent", ""),
            ],
        );

        let addresses = formatter().format_row(&mut row);

        assert_eq!(addresses.len(), 2);
        assert_eq!(addresses[0].kind, "phone");
        assert_eq!(addresses[0].tags, vec!["Student"]);
        assert_eq!(addresses[1].address, "ana@x.com");
        assert_eq!(row.len(), 1);
        assert!(row.contains("fullname"));
    }
}
