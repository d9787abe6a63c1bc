/// One logical row of a source file, keyed by that file's own headers.
///
/// Field order follows the header row of the source. Inserting a header that
/// is already present keeps the original position and replaces the value, so
/// the last duplicate column in a file wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value stored under `header`.
    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        let header = header.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == header) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((header, value)),
        }
    }

    /// Returns the value stored under exactly `header`.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == header)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the first value whose header equals `header` once both sides
    /// are trimmed and compared case-insensitively.
    pub fn get_ignore_case(&self, header: &str) -> Option<&str> {
        let wanted = header.trim();
        self.fields
            .iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(wanted))
            .map(|(_, value)| value.as_str())
    }

    /// Headers in encounter order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Trims surrounding whitespace from every value in place.
    pub fn trim_values(&mut self) {
        for (_, value) in &mut self.fields {
            let trimmed = value.trim();
            if trimmed.len() != value.len() {
                *value = trimmed.to_string();
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (header, value) in iter {
            record.insert(header, value);
        }
        record
    }
}

/// Typed value held by a single worksheet cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    /// Nothing was ever written at this position.
    #[default]
    Empty,
    /// Text value. An empty string is an explicitly written blank.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value, only produced by template sheets.
    Boolean(bool),
}

impl Cell {
    /// Creates a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Whether the cell counts towards a sheet's used range.
    pub fn has_content(&self) -> bool {
        match self {
            Cell::Empty => false,
            Cell::Text(value) => !value.trim().is_empty(),
            Cell::Number(_) | Cell::Boolean(_) => true,
        }
    }

    /// Renders the cell as display text, used when reading header rows.
    pub fn display_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(value) => value.clone(),
            Cell::Number(value) => value.to_string(),
            Cell::Boolean(value) => value.to_string(),
        }
    }
}
