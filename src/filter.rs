/// Column holding the person's name in the attendance table.
pub const DEFAULT_SEARCH_COLUMN: usize = 4;

/// One table row: cell values in column order.
pub type Row = Vec<String>;

/// Case-fold used on both sides of the comparison.
fn fold(s: &str) -> String {
    s.to_uppercase()
}

/// Shared decision: `folded_term` must already be case-folded.
/// A missing cell reads as the empty string.
fn cell_matches(folded_term: &str, cell: Option<&str>) -> bool {
    fold(cell.unwrap_or("")).contains(folded_term)
}

/// Decide whether a single row is visible under `search_term`.
pub fn row_matches<S: AsRef<str>>(search_term: &str, row: &[S], column_index: usize) -> bool {
    cell_matches(&fold(search_term), row.get(column_index).map(AsRef::as_ref))
}

/// Visibility for each row, in input order.
pub fn filter_rows<S: AsRef<str>>(
    search_term: &str,
    rows: &[Vec<S>],
    column_index: usize,
) -> Vec<bool> {
    rows.iter()
        .map(|row| row_matches(search_term, row, column_index))
        .collect()
}

/// A rendered row the filter can show or hide.
pub trait RowView {
    fn cell_text(&self, index: usize) -> Option<&str>;
    fn set_visible(&mut self, visible: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    pub total: usize,
    pub visible: usize,
}

/// Compute visibility with the pure decision and push it into each view.
pub fn apply_filter<V: RowView>(
    search_term: &str,
    rows: &mut [V],
    column_index: usize,
) -> FilterSummary {
    let term = fold(search_term);
    let mut visible = 0;
    for row in rows.iter_mut() {
        let show = cell_matches(&term, row.cell_text(column_index));
        if show {
            visible += 1;
        }
        row.set_visible(show);
    }
    log::debug!("filter {search_term:?}: {visible} of {} rows visible", rows.len());
    FilterSummary {
        total: rows.len(),
        visible,
    }
}

/// Split delimited text into rows. Blank lines are skipped.
pub fn parse_rows(text: &str, delimiter: char) -> Vec<Row> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split(delimiter).map(str::to_string).collect())
        .collect()
}
