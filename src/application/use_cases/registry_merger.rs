// ============================================================
// REGISTRY MERGER USE CASE
// ============================================================
// Deduplicate roster rows by key and fold duplicates into one registry

use std::collections::HashMap;

use tracing::debug;

use crate::domain::roster::{
    fields, AddressKind, FieldValue, MergePolicy, Row, VALUE_SEPARATOR,
};

/// Groups rows by a key field and merges each group into a single row
pub struct RegistryMerger {
    key_field: String,
    policy: MergePolicy,
}

impl RegistryMerger {
    pub fn new(key_field: impl Into<String>, policy: MergePolicy) -> Self {
        Self {
            key_field: key_field.into(),
            policy,
        }
    }

    /// One row per distinct key, in first-seen key order
    pub fn deduplicate(&self, rows: Vec<Row>) -> Vec<Row> {
        let mut groups: Vec<Vec<Row>> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for row in rows {
            let key = row.text(&self.key_field);
            match index.get(&key) {
                Some(&position) => groups[position].push(row),
                None => {
                    index.insert(key, groups.len());
                    groups.push(vec![row]);
                }
            }
        }

        groups
            .into_iter()
            .filter_map(|group| self.merge_group(group))
            .collect()
    }

    fn merge_group(&self, mut group: Vec<Row>) -> Option<Row> {
        if group.len() == 1 {
            let mut row = group.pop()?;
            if let Some(value) = row.get(fields::GROUP) {
                if value.is_list() {
                    let joined = value.joined(VALUE_SEPARATOR);
                    row.set(fields::GROUP, joined);
                }
            }
            return Some(row);
        }

        // Identity fields come from the earliest source line
        group.sort_by_key(|row| row.line);
        debug!(
            key = %group[0].text(&self.key_field),
            rows = group.len(),
            "Merging duplicated registry"
        );
        Some(self.merge(&group))
    }

    /// Fold a group of rows sharing a key into one row
    pub fn merge(&self, group: &[Row]) -> Row {
        let Some(first) = group.first() else {
            return Row::default();
        };

        let mut merged = Row::new(first.line);
        self.copy_field(first, &mut merged, fields::FULLNAME);
        self.copy_field(first, &mut merged, &self.key_field);

        for row in group {
            for (name, value) in row.fields_matching(AddressKind::is_address_field) {
                self.fold_address(&mut merged, name, value.joined(VALUE_SEPARATOR));
            }
        }

        let groups: Vec<&str> = group
            .iter()
            .filter_map(|row| row.get(fields::GROUP))
            .flat_map(FieldValue::parts)
            .collect();
        merged.set(fields::GROUP, groups.join(VALUE_SEPARATOR));

        self.copy_field(first, &mut merged, fields::INVISIBLE);
        self.copy_field(first, &mut merged, fields::SEE_ALL);

        merged
    }

    fn copy_field(&self, source: &Row, target: &mut Row, name: &str) {
        if let Some(value) = source.get(name) {
            target.set(name, value.clone());
        }
    }

    fn fold_address(&self, merged: &mut Row, name: &str, incoming: String) {
        match self.policy {
            MergePolicy::Overwrite => merged.set(name, incoming),
            MergePolicy::Concatenate => {
                let current = merged.text(name);
                if current.is_empty() {
                    merged.set(name, incoming);
                } else if !incoming.is_empty() && incoming != current {
                    merged.set(name, format!("{}{}{}", current, VALUE_SEPARATOR, incoming));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: [&str; 7] = ["fullname", "eid", "group", "phone", "email", "invisible", "see_all"];

    fn row(line: usize, values: [&str; 7]) -> Row {
        Row::with_fields(line, HEADER.into_iter().zip(values))
    }

    fn merger() -> RegistryMerger {
        RegistryMerger::new("eid", MergePolicy::Concatenate)
    }

    #[test]
    fn test_keys_are_unique_and_ordered() {
        let rows = vec![
            row(2, ["Ana", "1", "A", "", "", "", ""]),
            row(3, ["Bruno", "2", "B", "", "", "", ""]),
            row(4, ["Ana S", "1", "C", "", "", "", ""]),
            row(5, ["Caio", "3", "", "", "", "", ""]),
        ];

        let merged = merger().deduplicate(rows);
        let keys: Vec<String> = merged.iter().map(|row| row.text("eid")).collect();
        assert_eq!(keys, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_identity_fields_from_first_row() {
        let rows = vec![
            row(2, ["Ana", "1", "", "", "", "yes", "no"]),
            row(3, ["Ana Silva", "1", "", "", "", "no", "yes"]),
        ];

        let merged = merger().deduplicate(rows);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text("fullname"), "Ana");
        assert_eq!(merged[0].text("invisible"), "yes");
        assert_eq!(merged[0].text("see_all"), "no");
        assert_eq!(merged[0].line, 2);
    }

    #[test]
    fn test_distinct_phones_are_concatenated() {
        let rows = vec![
            row(2, ["Ana", "1", "", "5511987654321", "", "", ""]),
            row(3, ["Ana", "1", "", "5511912345678", "", "", ""]),
        ];

        let merged = merger().deduplicate(rows);
        assert_eq!(merged[0].text("phone"), "5511987654321/5511912345678");
    }

    #[test]
    fn test_empty_and_repeated_values_are_not_appended() {
        let rows = vec![
            row(2, ["Ana", "1", "", "", "a@x.com", "", ""]),
            row(3, ["Ana", "1", "", "11987654321", "a@x.com", "", ""]),
            row(4, ["Ana", "1", "", "", "", "", ""]),
        ];

        let merged = merger().deduplicate(rows);
        assert_eq!(merged[0].text("phone"), "11987654321");
        assert_eq!(merged[0].text("email"), "a@x.com");
    }

    #[test]
    fn test_overwrite_policy_keeps_last_value() {
        let rows = vec![
            row(2, ["Ana", "1", "", "11987654321", "a@x.com", "", ""]),
            row(3, ["Ana", "1", "", "11912345678", "b@x.com", "", ""]),
        ];

        let merged = RegistryMerger::new("eid", MergePolicy::Overwrite).deduplicate(rows);
        assert_eq!(merged[0].text("phone"), "11912345678");
        assert_eq!(merged[0].text("email"), "b@x.com");
    }

    #[test]
    fn test_groups_are_concatenated_across_rows() {
        let mut first = row(2, ["Ana", "1", "Sales", "", "", "", ""]);
        first.append("group", "Ops");
        let second = row(3, ["Ana", "1", "Marketing, Sales", "", "", "", ""]);

        let merged = merger().deduplicate(vec![first, second]);
        assert_eq!(
            merged[0].get("group"),
            Some(&FieldValue::Text("Sales/Ops/Marketing, Sales".to_string()))
        );
    }

    #[test]
    fn test_single_row_group_list_is_joined() {
        let mut single = row(2, ["Ana", "1", "Sales", "", "", "", ""]);
        single.append("group", "Ops");

        let merged = merger().deduplicate(vec![single]);
        assert_eq!(merged[0].get("group"), Some(&FieldValue::Text("Sales/Ops".to_string())));
        assert_eq!(merged[0].len(), 7);
    }

    #[test]
    fn test_tagged_address_columns_are_merged_by_name() {
        let first = Row::with_fields(2, [("eid", "1"), ("email Parent", "p@x.com")]);
        let second = Row::with_fields(
            3,
            [("eid", "1"), ("email Parent", "q@x.com"), ("phone Student", "11987654321")],
        );

        let merged = merger().deduplicate(vec![first, second]);
        assert_eq!(merged[0].text("email Parent"), "p@x.com/q@x.com");
        assert_eq!(merged[0].text("phone Student"), "11987654321");
        assert_eq!(merged[0].text("group"), "");
    }
}
