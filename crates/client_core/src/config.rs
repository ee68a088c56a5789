use tracing::warn;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
        }
    }
}

/// Reads settings from the environment. `API_BASE_URL` and the
/// `APP__`-prefixed variant (which wins) override the default endpoint.
pub fn load_settings() -> Settings {
    settings_from(|key| std::env::var(key).ok())
}

fn settings_from(env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    for key in ["API_BASE_URL", "APP__API_BASE_URL"] {
        if let Some(value) = env(key) {
            match normalize_base_url(&value) {
                Some(base_url) => settings.api_base_url = base_url,
                None => {
                    warn!("ignoring {key}='{value}': not a valid http(s) URL");
                }
            }
        }
    }

    settings
}

/// Accepts only http(s) URLs and strips a trailing slash so request paths
/// can be appended directly.
fn normalize_base_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let url = Url::parse(raw).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    Some(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_endpoint() {
        let settings = settings_from(|_| None);
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn env_override_replaces_default() {
        let settings = settings_from(|key| {
            (key == "API_BASE_URL").then(|| "https://crawler.internal:8443/".to_string())
        });
        assert_eq!(settings.api_base_url, "https://crawler.internal:8443");
    }

    #[test]
    fn prefixed_key_wins_over_plain_key() {
        let settings = settings_from(|key| match key {
            "API_BASE_URL" => Some("http://plain:8000".to_string()),
            "APP__API_BASE_URL" => Some("http://prefixed:8000".to_string()),
            _ => None,
        });
        assert_eq!(settings.api_base_url, "http://prefixed:8000");
    }

    #[test]
    fn invalid_override_keeps_default() {
        let settings = settings_from(|key| {
            (key == "API_BASE_URL").then(|| "not a url".to_string())
        });
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        assert_eq!(normalize_base_url("ftp://host"), None);
        assert_eq!(
            normalize_base_url("http://localhost:8000"),
            Some("http://localhost:8000".to_string())
        );
    }
}
