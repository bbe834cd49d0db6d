use serde_json::Value;

/// Converts the `values` grid of a `ValueRange` into plain cell strings.
pub trait IntoStringRows {
    fn into_string_rows(self) -> Vec<Vec<String>>;
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl IntoStringRows for Vec<Vec<Value>> {
    fn into_string_rows(self) -> Vec<Vec<String>> {
        self.into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect()
    }
}
