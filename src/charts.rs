use serde::{Deserialize, Serialize};

/// Fixed category order for the update-count chart.
pub const UPDATE_CATEGORIES: [&str; 4] = ["major", "minor", "patch", "other"];

// One fixed color per update category (err / warn / ok / muted).
const CATEGORY_COLORS: [&str; 4] = ["#ef4444", "#f59e0b", "#22c55e", "#9aa0a6"];

// Doughnut palette; cycles when a breakdown has more categories than colors.
const PALETTE: [&str; 8] = [
    "#3b82f6", "#22c55e", "#f59e0b", "#ef4444", "#8b5cf6", "#14b8a6", "#f97316", "#64748b",
];

const DEFAULT_TEXT: &str = "#6b7280";
const DEFAULT_GRID: &str = "#e5e7eb";

/// The pre-populated report-data object. Both fields are optional; a chart is
/// only built for the fields that are present. Consumed read-only.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ReportData {
    /// Counts per update category, in [`UPDATE_CATEGORIES`] order.
    pub update_counts: Option<[u64; 4]>,
    pub ecosystems: Option<EcosystemBreakdown>,
}

impl ReportData {
    /// Reads the embedded report-data object. Malformed JSON is logged and
    /// treated as absent, never surfaced as an error.
    pub fn from_json(raw: &str) -> Option<ReportData> {
        match serde_json::from_str(raw) {
            Ok(d) => Some(d),
            Err(e) => {
                log::warn!("Failed to parse report data: {}", e);
                None
            }
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EcosystemBreakdown {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind { Bar, Doughnut }

/// A complete chart description, ready for a backend to draw.
#[derive(Clone, Debug, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<String>,
    pub legend: bool,
    pub text_color: String,
    pub grid_color: String,
}

/// Text and grid colors resolved from the active theme; unset variables fall
/// back to fixed defaults.
#[derive(Clone, Debug, Default)]
pub struct ThemeVars {
    pub text: Option<String>,
    pub grid: Option<String>,
}

impl ThemeVars {
    fn text_color(&self) -> String {
        self.text.clone().unwrap_or_else(|| DEFAULT_TEXT.to_string())
    }

    fn grid_color(&self) -> String {
        self.grid.clone().unwrap_or_else(|| DEFAULT_GRID.to_string())
    }
}

/// Target mount ids for the two charts. A missing mount skips that chart.
#[derive(Clone, Debug, Default)]
pub struct Mounts {
    pub updates: Option<String>,
    pub ecosystems: Option<String>,
}

/// The external charting library. Creation only; there is no update or
/// destroy path, a chart is built once and owned by the caller.
pub trait ChartBackend {
    type Chart;
    fn create(&self, mount: &str, spec: &ChartSpec) -> anyhow::Result<Self::Chart>;
}

/// Bar chart of counts per update category, legend hidden.
pub fn update_chart_spec(counts: &[u64; 4], theme: &ThemeVars) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        labels: UPDATE_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        values: counts.iter().map(|&c| c as f64).collect(),
        colors: CATEGORY_COLORS.iter().map(|s| s.to_string()).collect(),
        legend: false,
        text_color: theme.text_color(),
        grid_color: theme.grid_color(),
    }
}

/// Doughnut chart of the ecosystem breakdown, legend visible. Mismatched
/// label/value lengths truncate to the shorter side.
pub fn ecosystem_chart_spec(eco: &EcosystemBreakdown, theme: &ThemeVars) -> ChartSpec {
    let n = eco.labels.len().min(eco.values.len());
    ChartSpec {
        kind: ChartKind::Doughnut,
        labels: eco.labels[..n].to_vec(),
        values: eco.values[..n].to_vec(),
        colors: (0..n).map(|i| PALETTE[i % PALETTE.len()].to_string()).collect(),
        legend: true,
        text_color: theme.text_color(),
        grid_color: theme.grid_color(),
    }
}

/// Builds both charts if their inputs are present. Missing backend, data, or
/// mount skips silently; a backend failure is logged and never propagated.
pub fn render_charts<B: ChartBackend>(
    backend: Option<&B>,
    data: Option<&ReportData>,
    mounts: &Mounts,
    theme: &ThemeVars,
) -> Vec<B::Chart> {
    let mut out = Vec::new();
    let Some(backend) = backend else {
        log::debug!("Chart backend unavailable; skipping charts");
        return out;
    };
    let Some(data) = data else {
        log::debug!("Report data absent; skipping charts");
        return out;
    };
    if let Some(counts) = data.update_counts.as_ref() {
        match mounts.updates.as_deref() {
            Some(mount) => match backend.create(mount, &update_chart_spec(counts, theme)) {
                Ok(c) => out.push(c),
                Err(e) => log::warn!("Update chart failed on {}: {}", mount, e),
            },
            None => log::debug!("Update chart mount missing; skipping"),
        }
    }
    if let Some(eco) = data.ecosystems.as_ref() {
        match mounts.ecosystems.as_deref() {
            Some(mount) => match backend.create(mount, &ecosystem_chart_spec(eco, theme)) {
                Ok(c) => out.push(c),
                Err(e) => log::warn!("Ecosystem chart failed on {}: {}", mount, e),
            },
            None => log::debug!("Ecosystem chart mount missing; skipping"),
        }
    }
    out
}
