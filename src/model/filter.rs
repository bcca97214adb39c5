use rayon::prelude::*;
use tracing::trace;

/// An active row filter on a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub column: usize,
    pub query: String,
    /// 1-based row indices into the table, header excluded.
    pub matches: Vec<usize>,
    pub scroll_offset: usize,
}

impl FilterState {
    /// Filter on `column` with an empty query, which matches every row.
    pub fn new<R: AsRef<[String]> + Sync>(rows: &[R], column: usize) -> Self {
        Self {
            column,
            query: String::new(),
            matches: apply_fuzzy_filter(rows, column, ""),
            scroll_offset: 0,
        }
    }

    pub fn push<R: AsRef<[String]> + Sync>(&mut self, rows: &[R], c: char) {
        self.query.push(c);
        self.refresh(rows);
    }

    /// Returns false if the query was already empty.
    pub fn pop<R: AsRef<[String]> + Sync>(&mut self, rows: &[R]) -> bool {
        if self.query.pop().is_none() {
            return false;
        }
        self.refresh(rows);
        true
    }

    fn refresh<R: AsRef<[String]> + Sync>(&mut self, rows: &[R]) {
        self.matches = apply_fuzzy_filter(rows, self.column, &self.query);
        self.scroll_offset = 0;
    }
}

/// Case insensitive ordered subsequence match: every character of `query`
/// has to show up in `value`, in the same order, with anything in between.
pub fn fuzzy_match(query: &str, value: &str) -> bool {
    let mut haystack = value.chars().flat_map(char::to_lowercase);
    query
        .chars()
        .flat_map(char::to_lowercase)
        .all(|q| haystack.any(|c| c == q))
}

/// Indices (1-based, header excluded) of the rows whose cell in `column`
/// fuzzy matches `query`, in table order. An empty query matches every row,
/// an unknown column matches none.
pub fn apply_fuzzy_filter<R: AsRef<[String]> + Sync>(
    rows: &[R],
    column: usize,
    query: &str,
) -> Vec<usize> {
    let Some(header) = rows.first() else {
        return Vec::new();
    };
    if column >= header.as_ref().len() {
        return Vec::new();
    }
    if query.is_empty() {
        return (1..rows.len()).collect();
    }

    let matches: Vec<usize> = rows[1..]
        .par_iter()
        .enumerate()
        .filter(|(_, row)| fuzzy_match(query, cell(*row, column)))
        .map(|(idx, _)| idx + 1)
        .collect();

    trace!("Filter {query:?} on column {column}: {} matches", matches.len());
    matches
}

fn cell<R: AsRef<[String]>>(row: &R, column: usize) -> &str {
    row.as_ref().get(column).map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn services() -> Vec<Vec<String>> {
        [
            ["NAME", "STATUS", "PORT"],
            ["web-1", "running", "8080"],
            ["web-2", "stopped", "8081"],
            ["db-prod", "running", "5432"],
        ]
        .iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect()
    }

    fn pods() -> Vec<Vec<String>> {
        [
            ["NAME", "STATUS"],
            ["pod-1", "running"],
            ["pod-2", "running"],
            ["pod-3", "pending"],
            ["pod-4", "running"],
            ["pod-5", "completed"],
        ]
        .iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect()
    }

    #[test]
    fn subsequence_matching() {
        assert!(fuzzy_match("run", "running"));
        assert!(fuzzy_match("run", "runner"));
        assert!(fuzzy_match("run", "runtime"));
        assert!(fuzzy_match("runt", "runtime"));
        assert!(!fuzzy_match("runt", "running"));
        assert!(!fuzzy_match("runt", "runner"));
        assert!(fuzzy_match("RuN", "rUnNiNg"));
        assert!(fuzzy_match("", "anything"));
        assert!(!fuzzy_match("a", ""));
    }

    #[test]
    fn filter_status_column() {
        assert_eq!(apply_fuzzy_filter(&services(), 1, "run"), vec![1, 3]);
        assert_eq!(apply_fuzzy_filter(&services(), 1, "stop"), vec![2]);
        assert_eq!(apply_fuzzy_filter(&services(), 0, "web"), vec![1, 2]);
    }

    #[test]
    fn empty_query_matches_all_rows() {
        assert_eq!(apply_fuzzy_filter(&services(), 1, ""), vec![1, 2, 3]);
    }

    #[test]
    fn unknown_column_matches_nothing() {
        assert!(apply_fuzzy_filter(&services(), 3, "").is_empty());
        assert!(apply_fuzzy_filter(&services(), 7, "run").is_empty());
        let empty: Vec<Vec<String>> = Vec::new();
        assert!(apply_fuzzy_filter(&empty, 0, "").is_empty());
    }

    #[test]
    fn refinement_narrows_matches() {
        let rows = pods();
        assert_eq!(apply_fuzzy_filter(&rows, 1, "r").len(), 3);
        assert_eq!(apply_fuzzy_filter(&rows, 1, "run").len(), 3);
        assert_eq!(apply_fuzzy_filter(&rows, 1, "p"), vec![3, 5]);
        assert_eq!(apply_fuzzy_filter(&rows, 1, "pe"), vec![3, 5]);
        assert_eq!(apply_fuzzy_filter(&rows, 1, "pen"), vec![3]);
    }

    #[test]
    fn ragged_rows_match_as_empty() {
        let rows: Vec<Vec<String>> = vec![
            vec!["A".into(), "B".into()],
            vec!["x".into()],
            vec!["y".into(), "bee".into()],
        ];
        assert_eq!(apply_fuzzy_filter(&rows, 1, "b"), vec![2]);
    }

    #[test]
    fn filter_state_edits() {
        let rows = services();
        let mut state = FilterState::new(&rows, 1);
        assert_eq!(state.matches, vec![1, 2, 3]);

        state.scroll_offset = 2;
        state.push(&rows, 'r');
        state.push(&rows, 'u');
        assert_eq!(state.query, "ru");
        assert_eq!(state.matches, vec![1, 3]);
        assert_eq!(state.scroll_offset, 0);

        assert!(state.pop(&rows));
        assert!(state.pop(&rows));
        assert!(!state.pop(&rows));
        assert_eq!(state.matches, vec![1, 2, 3]);
    }

    proptest! {
        #[test]
        fn appending_never_adds_matches(
            values in prop::collection::vec("[a-dA-D]{0,8}", 0..20),
            query in "[a-d]{0,4}",
            extra in "[a-dA-D]",
        ) {
            let mut rows = vec![vec!["COL".to_string()]];
            rows.extend(values.into_iter().map(|v| vec![v]));

            let before = apply_fuzzy_filter(&rows, 0, &query);
            let after = apply_fuzzy_filter(&rows, 0, &format!("{query}{extra}"));
            prop_assert!(after.iter().all(|idx| before.contains(idx)));
            prop_assert!(after.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
