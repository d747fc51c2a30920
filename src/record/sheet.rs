use serde::{Deserialize, Serialize};

use crate::common::canonical;

/// One logical sheet from a tabular source: a header row plus data rows of
/// strings. Column position is the contract for the voter-profile family;
/// `column_by_name` serves the loosely structured indicator sheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSheet {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawSheet {
    pub fn new(name: impl Into<String>, header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { name: name.into(), header, rows }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Case/whitespace-insensitive header lookup.
    pub fn column_by_name(&self, name: &str) -> Option<usize> {
        let want = canonical(name);
        self.header.iter().position(|h| canonical(h) == want)
    }

    /// Cell addressed by row index and header name, if both resolve.
    pub fn value_by_name(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.column_by_name(name)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::RawSheet;

    fn sheet() -> RawSheet {
        RawSheet::new(
            "indicators",
            vec!["Município".into(), "  Taxa de   Alfabetização ".into()],
            vec![vec!["Natal".into(), "92,1".into()]],
        )
    }

    #[test]
    fn column_lookup_ignores_case_and_whitespace() {
        let s = sheet();
        assert_eq!(s.column_by_name("município"), Some(0));
        assert_eq!(s.column_by_name("taxa de alfabetização"), Some(1));
        assert_eq!(s.column_by_name("TAXA  DE ALFABETIZAÇÃO"), Some(1));
        assert_eq!(s.column_by_name("inexistente"), None);
    }

    #[test]
    fn value_by_name_resolves_cells() {
        let s = sheet();
        assert_eq!(s.value_by_name(0, "Município"), Some("Natal"));
        assert_eq!(s.value_by_name(1, "Município"), None);
    }
}
