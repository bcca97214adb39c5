/// Parsed tabular input. Row 0 is the header, all following rows are data.
///
/// Rows are expected to have the same number of cells as the header, but
/// nothing here relies on it: a missing cell reads as an empty string.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header(&self) -> &[String] {
        self.rows.first().map(|r| r.as_slice()).unwrap_or(&[])
    }

    pub fn column_count(&self) -> usize {
        self.header().len()
    }

    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(|c| c.as_str())
            .unwrap_or("")
    }

    pub fn column_name(&self, column: usize) -> &str {
        self.cell(0, column)
    }

    /// 1-based indices of every data row.
    pub fn all_data_indices(&self) -> Vec<usize> {
        (1..self.rows.len()).collect()
    }

    /// Header followed by the requested data rows.
    /// The header index and out of range indices are skipped.
    pub fn row_slices(&self, indices: &[usize]) -> Vec<&[String]> {
        let Some(header) = self.rows.first() else {
            return Vec::new();
        };
        let mut rows = Vec::with_capacity(indices.len() + 1);
        rows.push(header.as_slice());
        rows.extend(
            indices
                .iter()
                .filter(|&&idx| idx > 0)
                .filter_map(|&idx| self.rows.get(idx))
                .map(|r| r.as_slice()),
        );
        rows
    }
}

impl From<Vec<Vec<&str>>> for Table {
    fn from(rows: Vec<Vec<&str>>) -> Self {
        Table::new(
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        )
    }
}
