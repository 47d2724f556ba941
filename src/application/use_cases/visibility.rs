use crate::domain::roster::Row;

/// Values read as `true`, compared case-insensitively
const TRUTHY_VALUES: [&str; 3] = ["true", "1", "yes"];

pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    TRUTHY_VALUES
        .iter()
        .any(|truthy| value.eq_ignore_ascii_case(truthy))
}

/// Boolean value of a textual flag; absent fields are `false`
pub fn flag(row: &Row, name: &str) -> bool {
    is_truthy(&row.text(name))
}
