use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sort::SortKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction { Asc, Desc }

/// A header cell. `sort` names the column's sort key; `dir` is the persisted
/// direction flag toggled on successive clicks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HeaderCell {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<Direction>,
    #[serde(skip)]
    interactive: bool,
}

impl HeaderCell {
    pub fn new(label: &str) -> HeaderCell {
        HeaderCell { label: label.to_string(), sort: None, dir: None, interactive: false }
    }

    pub fn sortable(label: &str, key: &str) -> HeaderCell {
        HeaderCell { label: label.to_string(), sort: Some(key.to_string()), dir: None, interactive: false }
    }

    pub fn direction(&self) -> Option<Direction> { self.dir }
}

/// A body row: displayed cell texts plus optional precomputed values keyed by
/// sort-key name, preferred over the cell text when sorting.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub aux: HashMap<String, String>,
}

impl Row {
    pub fn new(cells: &[&str]) -> Row {
        Row { cells: cells.iter().map(|c| c.to_string()).collect(), aux: HashMap::new() }
    }

    pub fn with_aux(mut self, key: &str, value: &str) -> Row {
        self.aux.insert(key.to_string(), value.to_string());
        self
    }

    fn sort_value(&self, key_name: &str, col: usize) -> &str {
        match self.aux.get(key_name) {
            Some(v) => v.as_str(),
            None => self.cells.get(col).map(|c| c.trim()).unwrap_or(""),
        }
    }
}

/// A report table: one header row and an ordered body. Sorting reorders the
/// body rows in place; rows are never created, removed, or rewritten.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReportTable {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Row>,
}

impl ReportTable {
    pub fn new(headers: Vec<HeaderCell>) -> ReportTable {
        ReportTable { headers, rows: vec![] }
    }

    pub fn push_row(&mut self, row: Row) { self.rows.push(row); }

    /// One-time setup: marks every header that declares a sort key as
    /// interactive. Headers without a key never respond to clicks.
    pub fn init_sortable(&mut self) {
        for h in &mut self.headers {
            h.interactive = h.sort.is_some();
        }
    }

    /// A click on header `col`. Runs to completion as one independent
    /// operation: picks the comparator for the header's key, stable-sorts the
    /// body (ascending on a fresh header), and flips the stored direction.
    /// Out-of-range or non-interactive headers are a silent no-op, and no
    /// other header's state is touched.
    pub fn click(&mut self, col: usize) {
        let Some(h) = self.headers.get(col) else { return };
        if !h.interactive { return }
        let Some(name) = h.sort.clone() else { return };
        let key = SortKey::from_name(&name);
        let asc = h.dir != Some(Direction::Desc);
        // Vec::sort_by is stable, and reversing the comparator keeps ties
        // Equal, so tied rows keep their prior relative order either way.
        self.rows.sort_by(|a, b| {
            let ord = key.compare(a.sort_value(&name, col), b.sort_value(&name, col));
            if asc { ord } else { ord.reverse() }
        });
        self.headers[col].dir = Some(if asc { Direction::Desc } else { Direction::Asc });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_table(key: &str, cells: &[&str]) -> ReportTable {
        let mut t = ReportTable::new(vec![HeaderCell::sortable("Col", key)]);
        for c in cells { t.push_row(Row::new(&[c])); }
        t.init_sortable();
        t
    }

    fn column(t: &ReportTable, col: usize) -> Vec<String> {
        t.rows.iter().map(|r| r.cells[col].clone()).collect()
    }

    #[test]
    fn numeric_key_sorts_by_digits() {
        let mut t = column_table("num", &["#12", "#3", "#100"]);
        t.click(0);
        assert_eq!(column(&t, 0), ["#3", "#12", "#100"]);
    }

    #[test]
    fn second_click_is_exact_reverse() {
        let mut t = column_table("num", &["#12", "#3", "#100"]);
        t.click(0);
        let asc = column(&t, 0);
        t.click(0);
        let desc = column(&t, 0);
        let mut rev = asc.clone();
        rev.reverse();
        assert_eq!(desc, rev);
    }

    #[test]
    fn direction_flag_toggles_per_click() {
        let mut t = column_table("num", &["#2", "#1"]);
        assert_eq!(t.headers[0].direction(), None);
        t.click(0);
        assert_eq!(t.headers[0].direction(), Some(Direction::Desc));
        t.click(0);
        assert_eq!(t.headers[0].direction(), Some(Direction::Asc));
    }

    #[test]
    fn odd_clicks_descend_even_clicks_ascend() {
        let mut t = column_table("num", &["#12", "#3", "#100"]);
        for _ in 0..3 { t.click(0); }
        assert_eq!(column(&t, 0), ["#100", "#12", "#3"]);
        t.click(0);
        assert_eq!(column(&t, 0), ["#3", "#12", "#100"]);
    }

    #[test]
    fn bad_date_sorts_as_epoch() {
        let mut t = column_table("created", &["2023-01-05", "2022-12-01", "bad-date"]);
        t.click(0);
        assert_eq!(column(&t, 0), ["bad-date", "2022-12-01", "2023-01-05"]);
    }

    #[test]
    fn age_key_reads_leading_int() {
        let mut t = column_table("age", &["42 d", "7 d", "N/A"]);
        t.click(0);
        assert_eq!(column(&t, 0), ["N/A", "7 d", "42 d"]);
    }

    #[test]
    fn default_key_order_is_deterministic() {
        let mut a = column_table("package", &["Bravo", "alpha", "Charlie"]);
        a.click(0);
        let first = column(&a, 0);
        let mut b = column_table("package", &["Bravo", "alpha", "Charlie"]);
        b.click(0);
        assert_eq!(first, column(&b, 0));
    }

    #[test]
    fn aux_value_wins_over_cell_text() {
        let mut t = ReportTable::new(vec![HeaderCell::sortable("PR", "num")]);
        t.push_row(Row::new(&["#7"]));
        t.push_row(Row::new(&["N/A"]).with_aux("num", "42"));
        t.push_row(Row::new(&["#90"]));
        t.init_sortable();
        t.click(0);
        assert_eq!(column(&t, 0), ["#7", "N/A", "#90"]);
    }

    #[test]
    fn tied_keys_keep_prior_order() {
        let mut t = ReportTable::new(vec![
            HeaderCell::sortable("Age", "age"),
            HeaderCell::new("Id"),
        ]);
        t.push_row(Row::new(&["10", "a"]));
        t.push_row(Row::new(&["10", "b"]));
        t.push_row(Row::new(&["5", "c"]));
        t.init_sortable();
        t.click(0);
        assert_eq!(column(&t, 1), ["c", "a", "b"]);
        // Descending pass keeps the tie order too.
        t.click(0);
        assert_eq!(column(&t, 1), ["a", "b", "c"]);
    }

    #[test]
    fn cell_text_is_trimmed_but_aux_is_raw() {
        let mut t = column_table("age", &["  9  ", "3"]);
        t.click(0);
        assert_eq!(column(&t, 0), ["3", "  9  "]);
    }

    #[test]
    fn keyless_or_missing_header_click_is_noop() {
        let mut t = ReportTable::new(vec![HeaderCell::new("Labels")]);
        t.push_row(Row::new(&["b"]));
        t.push_row(Row::new(&["a"]));
        t.init_sortable();
        t.click(0);
        t.click(5);
        assert_eq!(column(&t, 0), ["b", "a"]);
        assert_eq!(t.headers[0].direction(), None);
    }

    #[test]
    fn click_before_init_is_noop() {
        let mut t = ReportTable::new(vec![HeaderCell::sortable("PR", "num")]);
        t.push_row(Row::new(&["#2"]));
        t.push_row(Row::new(&["#1"]));
        t.click(0);
        assert_eq!(column(&t, 0), ["#2", "#1"]);
    }

    #[test]
    fn click_leaves_other_headers_alone() {
        let mut t = ReportTable::new(vec![
            HeaderCell::sortable("PR", "num"),
            HeaderCell::sortable("Created", "created"),
        ]);
        t.push_row(Row::new(&["#2", "2023-01-05"]));
        t.push_row(Row::new(&["#1", "2022-12-01"]));
        t.init_sortable();
        t.click(0);
        assert_eq!(t.headers[1].direction(), None);
    }

    #[test]
    fn table_roundtrips_through_json() {
        let mut t = ReportTable::new(vec![HeaderCell::sortable("PR", "num")]);
        t.push_row(Row::new(&["#5"]).with_aux("num", "5"));
        let json = serde_json::to_string(&t).unwrap();
        let mut back: ReportTable = serde_json::from_str(&json).unwrap();
        back.init_sortable();
        back.push_row(Row::new(&["#1"]));
        back.click(0);
        assert_eq!(column(&back, 0), ["#1", "#5"]);
    }
}
