// ============================================================
// GROUP NORMALIZER
// ============================================================
// Turn free-form group strings into sorted, unique tag lists

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::roster::{fields, FieldValue, Row, VALUE_SEPARATOR};

static GROUP_SEPARATOR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[/,]").unwrap());

/// Split, trim, deduplicate and sort the groups held in `value`
pub fn normalize_groups(value: &FieldValue) -> Vec<String> {
    let joined = value.joined(VALUE_SEPARATOR);

    GROUP_SEPARATOR_PATTERN
        .split(&joined)
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Replace the row's `group` field with a normalized `groups` list
pub fn normalize_row(row: &mut Row) -> Vec<String> {
    let source = row
        .remove(fields::GROUP)
        .or_else(|| row.remove(fields::GROUPS));

    let groups = source.as_ref().map(normalize_groups).unwrap_or_default();
    row.set(fields::GROUPS, FieldValue::List(groups.clone()));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_trim_dedup_sort() {
        let groups = normalize_groups(&FieldValue::from("A, B/ a ,B"));
        assert_eq!(groups, vec!["A", "B", "a"]);
    }

    #[test]
    fn test_list_values_are_joined_first() {
        let value = FieldValue::List(vec!["Sala 2, Sala 1".to_string(), "Sala 1/Noturno".to_string()]);
        assert_eq!(normalize_groups(&value), vec!["Noturno", "Sala 1", "Sala 2"]);
    }

    #[test]
    fn test_empty_tokens_are_dropped() {
        assert!(normalize_groups(&FieldValue::from(" , / ,")).is_empty());
        assert!(normalize_groups(&FieldValue::from("")).is_empty());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = normalize_groups(&FieldValue::from("Turma B/Turma A, Turma B"));
        let twice = normalize_groups(&FieldValue::List(once.clone()));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_row_replaces_group_field() {
        let mut row = Row::with_fields(2, [("eid", "1"), ("group", "Sales/Marketing")]);
        let groups = normalize_row(&mut row);

        assert_eq!(groups, vec!["Marketing", "Sales"]);
        assert!(!row.contains("group"));
        assert_eq!(row.get("groups"), Some(&FieldValue::List(groups.clone())));

        // A second pass reads the already normalized list
        assert_eq!(normalize_row(&mut row), groups);
    }

    #[test]
    fn test_missing_group_field() {
        let mut row = Row::with_fields(2, [("eid", "1")]);
        assert!(normalize_row(&mut row).is_empty());
    }
}
