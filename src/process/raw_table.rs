use indexmap::IndexMap;

/// One scraped cell, typed only as loosely as the page allows.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    /// Numeric-looking cell; `text` is the cell exactly as scraped.
    Number { value: f64, text: String },
    Text(String),
}

impl Cell {
    /// Classify already-cleaned cell text. Zero-padded values such as `001`
    /// stay text so the padding survives.
    pub fn infer(text: &str) -> Cell {
        if text.is_empty() {
            return Cell::Empty;
        }
        let zero_padded = text.len() > 1 && text.starts_with('0') && !text.starts_with("0.");
        match text.parse::<f64>() {
            Ok(value) if !zero_padded && value.is_finite() => Cell::Number {
                value,
                text: text.to_string(),
            },
            _ => Cell::Text(text.to_string()),
        }
    }

    /// The cell as scraped; numbers are never reformatted.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) | Cell::Number { text: s, .. } => s.clone(),
        }
    }

    /// Numeric value, parsing text cells such as `"1,204"`; `None` if not a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Empty => None,
            Cell::Number { value, .. } => Some(*value),
            Cell::Text(s) => s.replace(',', "").trim().parse::<f64>().ok(),
        }
    }
}

/// Column label → cell, in page column order.
pub type RawRow = IndexMap<String, Cell>;

#[derive(Debug, Default)]
pub struct RawTable {
    /// Column labels as the page presents them, blank headers already
    /// replaced by `Unnamed: <index>`.
    pub labels: Vec<String>,
    /// Each data row, keyed by `labels`.
    pub rows: Vec<RawRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_keeps_zero_padding_as_text() {
        assert_eq!(Cell::infer(""), Cell::Empty);
        assert_eq!(Cell::infer("001"), Cell::Text("001".into()));
        assert_eq!(Cell::infer("0").as_number(), Some(0.0));
        assert_eq!(Cell::infer("0.5").as_number(), Some(0.5));
        assert_eq!(Cell::infer("42").as_number(), Some(42.0));
        assert_eq!(Cell::infer("Eagle Union"), Cell::Text("Eagle Union".into()));
    }

    #[test]
    fn numeric_cells_keep_their_scraped_text() {
        for id in ["1.10", "1e3", "+5", "100.0", "12345678901234567890"] {
            let cell = Cell::infer(id);
            assert!(matches!(cell, Cell::Number { .. }), "{id}");
            assert_eq!(cell.as_text(), id);
        }
        assert_eq!(Cell::infer("1e3").as_number(), Some(1000.0));
    }

    #[test]
    fn text_cells_parse_as_numbers_when_possible() {
        assert_eq!(Cell::Text("1,204".into()).as_number(), Some(1204.0));
        assert_eq!(Cell::Text("N/A".into()).as_number(), None);
        assert_eq!(Cell::Empty.as_number(), None);
    }
}
