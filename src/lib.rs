//! Interactive sorting for report tables plus summary chart specs.
//!
//! [`ReportTable`] models a report table with typed sort keys per column;
//! [`ReportTable::click`] is the whole interaction surface, reordering body
//! rows in place with a stable, type-aware comparator and toggling the
//! clicked header's direction. [`charts`] turns an embedded report-data
//! object into bar/doughnut chart specs for an external [`ChartBackend`],
//! degrading silently when any piece is missing.

pub mod charts;
pub mod sort;
pub mod table;

pub use charts::{ChartBackend, ChartSpec, Mounts, ReportData, ThemeVars};
pub use sort::SortKey;
pub use table::{Direction, HeaderCell, ReportTable, Row};

/// One-time page setup: marks every table's keyed headers interactive and
/// builds the charts once. The returned chart instances are owned by the
/// caller, which manages their lifetime.
pub fn init_page<B: ChartBackend>(
    tables: &mut [ReportTable],
    backend: Option<&B>,
    data: Option<&ReportData>,
    mounts: &Mounts,
    theme: &ThemeVars,
) -> Vec<B::Chart> {
    for t in tables.iter_mut() {
        t.init_sortable();
    }
    charts::render_charts(backend, data, mounts, theme)
}
