use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub dhis2: Dhis2Settings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub charts: ChartSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Dhis2Settings {
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Personal access token, preferred over basic auth when set
    pub token: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheSettings {
    #[serde(default = "default_stale_time_secs")]
    pub stale_time_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            stale_time_secs: default_stale_time_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    /// Plotly mode bar buttons hidden on every chart
    #[serde(default = "default_mode_bar_exclusions")]
    pub mode_bar_exclusions: Vec<String>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            mode_bar_exclusions: default_mode_bar_exclusions(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_stale_time_secs() -> u64 {
    300
}

fn default_mode_bar_exclusions() -> Vec<String> {
    [
        "zoom2d",
        "pan2d",
        "select2d",
        "lasso2d",
        "zoomIn2d",
        "zoomOut2d",
        "autoScale2d",
        "resetScale2d",
        "hoverClosestCartesian",
        "hoverCompareCartesian",
        "toggleSpikelines",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// `APP__SECTION__KEY` variables; `APP__CHARTS__MODE_BAR_EXCLUSIONS` is comma separated
fn environment() -> config::Environment {
    config::Environment::with_prefix("APP")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("charts.mode_bar_exclusions")
}

/// Load `config/app.*`, overridden by environment variables
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/app").required(false))
        .add_source(environment())
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(toml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(
            r#"
            [dhis2]
            base_url = "https://play.dhis2.org/dev"
            "#,
        );

        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.cache.stale_time_secs, 300);
        assert!(config.charts.mode_bar_exclusions.contains(&"lasso2d".to_string()));
        assert!(config.dhis2.token.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = parse(
            r#"
            [dhis2]
            base_url = "https://play.dhis2.org/dev"
            token = "d2pat_abc"

            [cache]
            stale_time_secs = 5

            [charts]
            mode_bar_exclusions = ["toImage"]
            "#,
        );

        assert_eq!(config.dhis2.token.as_deref(), Some("d2pat_abc"));
        assert_eq!(config.cache.stale_time_secs, 5);
        assert_eq!(config.charts.mode_bar_exclusions, vec!["toImage"]);
    }

    #[test]
    fn test_environment_overrides() {
        let vars = [
            ("APP__DHIS2__BASE_URL", "https://play.dhis2.org/dev"),
            ("APP__DHIS2__USERNAME", "admin"),
            ("APP__CACHE__STALE_TIME_SECS", "5"),
            ("APP__CHARTS__MODE_BAR_EXCLUSIONS", "toImage,lasso2d"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config: AppConfig = config::Config::builder()
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.dhis2.base_url, "https://play.dhis2.org/dev");
        assert_eq!(config.dhis2.username.as_deref(), Some("admin"));
        assert_eq!(config.cache.stale_time_secs, 5);
        assert_eq!(config.charts.mode_bar_exclusions, vec!["toImage", "lasso2d"]);
    }
}
