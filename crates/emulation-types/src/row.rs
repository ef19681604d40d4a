use crate::RowValue;
use std::fmt;

/// One database row: column names and values in the order the server returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, RowValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, replacing the value if the name is already present.
    pub fn insert(&mut self, name: impl Into<String>, value: RowValue) {
        let name = name.into();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.columns.push((name, value)),
        }
    }

    /// Builder-style [`Row::insert`].
    pub fn with(mut self, name: impl Into<String>, value: RowValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&RowValue> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowValue)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(String, RowValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, RowValue)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (name, value) in iter {
            row.insert(name, value);
        }
        row
    }
}

/// `{"col": value, ...}` on a single line.
impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name:?}: {value}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order_and_replaces() {
        let mut row = Row::new()
            .with("index", RowValue::Int(7))
            .with("title", RowValue::Text("x".into()));
        row.insert("index", RowValue::Int(8));

        assert_eq!(row.column_names(), vec!["index", "title"]);
        assert_eq!(row.get("index"), Some(&RowValue::Int(8)));
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_display() {
        let row = Row::new()
            .with("ind", RowValue::Int(1))
            .with("country", RowValue::Text("Chad".into()));
        assert_eq!(row.to_string(), r#"{"ind": 1, "country": "Chad"}"#);
    }
}
