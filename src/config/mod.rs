use anyhow::Result;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// IANA zone that decides what "yesterday" means.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Result pages, scraped in this order.
    #[serde(default = "default_competitions")]
    pub competitions: Vec<String>,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub selectors: SelectorConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Rendering session configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_navigation_timeout_secs")]
    pub navigation_timeout_secs: u64,

    #[serde(default = "default_consent_timeout_ms")]
    pub consent_timeout_ms: u64,

    #[serde(default = "default_container_timeout_ms")]
    pub container_timeout_ms: u64,
}

/// CSS selectors for the results page markup. These track the site's
/// class names and are the first thing to touch when the layout drifts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectorConfig {
    #[serde(default = "default_consent_button")]
    pub consent_button: String,

    #[serde(default = "default_container")]
    pub container: String,

    /// Matches both the one-line and the two-line row layouts.
    #[serde(default = "default_row")]
    pub row: String,

    #[serde(default = "default_status_attribute")]
    pub status_attribute: String,

    #[serde(default = "default_finished_marker")]
    pub finished_marker: String,

    #[serde(default = "default_row_date")]
    pub row_date: String,

    #[serde(default = "default_day_header")]
    pub day_header: String,

    #[serde(default = "default_home_participant")]
    pub home_participant: String,

    #[serde(default = "default_away_participant")]
    pub away_participant: String,

    #[serde(default = "default_home_score")]
    pub home_score: String,

    #[serde(default = "default_away_score")]
    pub away_score: String,

    #[serde(default = "default_heading")]
    pub heading: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown timezone {0:?}")]
    Timezone(String),

    #[error("invalid competition url {url:?}: {source}")]
    CompetitionUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("no competitions configured")]
    NoCompetitions,

    #[error("`{0}` must not be empty")]
    Empty(&'static str),

    #[error("invalid selector `{name}` = {selector:?}: {message}")]
    Selector {
        name: &'static str,
        selector: String,
        message: String,
    },
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_timezone() -> String {
    "Europe/Amsterdam".to_string()
}
fn default_competitions() -> Vec<String> {
    [
        "https://www.flashscore.com/baseball/cuba/serie-nacional/results/",
        "https://www.flashscore.com/baseball/dominican-republic/lidom/results/",
        "https://www.flashscore.com/baseball/venezuela/lvbp/results/",
        "https://www.flashscore.com/baseball/mexico/lmp/results/",
        "https://www.flashscore.com/baseball/puerto-rico/lbprc/results/",
        "https://www.flashscore.com/baseball/colombia/lpb/results/",
        "https://www.flashscore.ph/en/baseball/australia/abl/results/",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
fn default_user_agent() -> String {
    "daily-recap/0.1 (once-a-day results digest)".to_string()
}
fn default_navigation_timeout_secs() -> u64 {
    30
}
fn default_consent_timeout_ms() -> u64 {
    2_000
}
fn default_container_timeout_ms() -> u64 {
    15_000
}
fn default_consent_button() -> String {
    "#onetrust-accept-btn-handler".to_string()
}
fn default_container() -> String {
    ".sportName.baseball, .sportName".to_string()
}
fn default_row() -> String {
    ".event__match.event__match--twoLine, .event__match".to_string()
}
fn default_status_attribute() -> String {
    "class".to_string()
}
fn default_finished_marker() -> String {
    "event__match--finished".to_string()
}
fn default_row_date() -> String {
    ".event__time".to_string()
}
fn default_day_header() -> String {
    r#"div[class*="event__day"]"#.to_string()
}
fn default_home_participant() -> String {
    ".event__participant--home".to_string()
}
fn default_away_participant() -> String {
    ".event__participant--away".to_string()
}
fn default_home_score() -> String {
    ".event__score--home".to_string()
}
fn default_away_score() -> String {
    ".event__score--away".to_string()
}
fn default_heading() -> String {
    "h1".to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}
fn default_file_prefix() -> String {
    "recap-".to_string()
}

// ── Loader ───────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from file + environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(
                config::File::with_name("config/default")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::File::with_name("config/local")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::Environment::with_prefix("RECAP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("competitions")
                    .try_parsing(true),
            )
            .build()?;

        let app_cfg: AppConfig = cfg.try_deserialize()?;
        app_cfg.validate()?;
        Ok(app_cfg)
    }

    /// Reject anything that would otherwise only blow up halfway through a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timezone()?;

        if self.competitions.is_empty() {
            return Err(ConfigError::NoCompetitions);
        }
        for raw in &self.competitions {
            url::Url::parse(raw).map_err(|source| ConfigError::CompetitionUrl {
                url: raw.clone(),
                source,
            })?;
        }

        if self.selectors.finished_marker.trim().is_empty() {
            return Err(ConfigError::Empty("finished_marker"));
        }
        if self.selectors.status_attribute.trim().is_empty() {
            return Err(ConfigError::Empty("status_attribute"));
        }

        for (name, selector) in self.selectors.named() {
            ::scraper::Selector::parse(selector).map_err(|e| ConfigError::Selector {
                name,
                selector: selector.to_string(),
                message: e.to_string(),
            })?;
        }

        Ok(())
    }

    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::Timezone(self.timezone.clone()))
    }
}

impl SessionConfig {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    pub fn consent_timeout(&self) -> Duration {
        Duration::from_millis(self.consent_timeout_ms)
    }

    pub fn container_timeout(&self) -> Duration {
        Duration::from_millis(self.container_timeout_ms)
    }
}

impl SelectorConfig {
    /// Every CSS selector paired with its field name. The status attribute
    /// and the finished marker are plain strings and are not listed.
    pub fn named(&self) -> [(&'static str, &str); 10] {
        [
            ("consent_button", self.consent_button.as_str()),
            ("container", self.container.as_str()),
            ("row", self.row.as_str()),
            ("row_date", self.row_date.as_str()),
            ("day_header", self.day_header.as_str()),
            ("home_participant", self.home_participant.as_str()),
            ("away_participant", self.away_participant.as_str()),
            ("home_score", self.home_score.as_str()),
            ("away_score", self.away_score.as_str()),
            ("heading", self.heading.as_str()),
        ]
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            competitions: default_competitions(),
            session: SessionConfig::default(),
            selectors: SelectorConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            navigation_timeout_secs: default_navigation_timeout_secs(),
            consent_timeout_ms: default_consent_timeout_ms(),
            container_timeout_ms: default_container_timeout_ms(),
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            consent_button: default_consent_button(),
            container: default_container(),
            row: default_row(),
            status_attribute: default_status_attribute(),
            finished_marker: default_finished_marker(),
            row_date: default_row_date(),
            day_header: default_day_header(),
            home_participant: default_home_participant(),
            away_participant: default_away_participant(),
            home_score: default_home_score(),
            away_score: default_away_score(),
            heading: default_heading(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            file_prefix: default_file_prefix(),
        }
    }
}
