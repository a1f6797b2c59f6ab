use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_bool(profile: &str, key: &str, default: bool) -> bool {
    match profiled_env_opt(profile, key).as_deref() {
        Some("1") | Some("true") | Some("yes") => true,
        Some("0") | Some("false") | Some("no") => false,
        _ => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub data: DataConfig,
    pub report: ReportConfig,
    pub presentation: PresentationConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `SHOPLENS_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("SHOPLENS_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            data: DataConfig::from_env_profiled(p),
            report: ReportConfig::from_env_profiled(p),
            presentation: PresentationConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  data:         path={}, format={}, batch_size={}",
            self.data.orders_path.display(),
            self.data.format,
            self.data.batch_size
        );
        tracing::info!(
            "  report:       top_k={}, parallel={}",
            self.report.top_k,
            self.report.parallel
        );
        tracing::info!("  presentation: bar_width={}", self.presentation.bar_width);
    }
}

// ── Data source ───────────────────────────────────────────────

/// On-disk layout of the order table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderFormat {
    /// Decide from the file extension (`.parquet`/`.pq` → Parquet, else CSV).
    Auto,
    Csv,
    Parquet,
}

impl std::str::FromStr for OrderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(OrderFormat::Auto),
            "csv" => Ok(OrderFormat::Csv),
            "parquet" | "pq" => Ok(OrderFormat::Parquet),
            other => Err(format!("unknown order format: {}", other)),
        }
    }
}

impl std::fmt::Display for OrderFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderFormat::Auto => write!(f, "auto"),
            OrderFormat::Csv => write!(f, "csv"),
            OrderFormat::Parquet => write!(f, "parquet"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub orders_path: PathBuf,
    pub format: OrderFormat,
    /// Rows per Arrow record batch when reading.
    pub batch_size: usize,
}

impl DataConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            orders_path: PathBuf::from(profiled_env_or(p, "ORDERS_PATH", "all_data_new.csv")),
            format: profiled_env_or(p, "ORDERS_FORMAT", "auto")
                .parse()
                .unwrap_or(OrderFormat::Auto),
            batch_size: profiled_env_usize(p, "ORDERS_BATCH_SIZE", 8192).max(1),
        }
    }
}

// ── Report ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Rows kept by the top-city and top-category summaries.
    pub top_k: usize,
    /// Run the four independent report sections on the rayon pool.
    pub parallel: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            parallel: false,
        }
    }
}

impl ReportConfig {
    fn from_env_profiled(p: &str) -> Self {
        let defaults = Self::default();
        Self {
            top_k: profiled_env_usize(p, "REPORT_TOP_K", defaults.top_k),
            parallel: profiled_env_bool(p, "REPORT_PARALLEL", defaults.parallel),
        }
    }
}

// ── Presentation ──────────────────────────────────────────────

/// Chart styling handed to the renderer. The aggregation core never reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Width in characters of the longest bar.
    pub bar_width: usize,
    pub city_title: String,
    pub category_title: String,
    pub weekday_title: String,
    pub rfm_title: String,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            bar_width: 40,
            city_title: "Customers by City".to_string(),
            category_title: "Top Product Categories by Purchases".to_string(),
            weekday_title: "Orders by Day of Week".to_string(),
            rfm_title: "RFM Score Distribution".to_string(),
        }
    }
}

impl PresentationConfig {
    fn from_env_profiled(p: &str) -> Self {
        let defaults = Self::default();
        Self {
            bar_width: profiled_env_usize(p, "CHART_BAR_WIDTH", defaults.bar_width).max(1),
            city_title: profiled_env_or(p, "CHART_CITY_TITLE", &defaults.city_title),
            category_title: profiled_env_or(p, "CHART_CATEGORY_TITLE", &defaults.category_title),
            weekday_title: profiled_env_or(p, "CHART_WEEKDAY_TITLE", &defaults.weekday_title),
            rfm_title: profiled_env_or(p, "CHART_RFM_TITLE", &defaults.rfm_title),
        }
    }
}
