use std::fs;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:3333".into(),
            request_timeout_secs: 10,
        }
    }
}

/// Load order: built-in defaults, then `dashboard.toml` in the working
/// directory, then environment variables.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("dashboard.toml") {
        apply_file_config(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("DASHBOARD_API_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = std::env::var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = std::env::var("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    settings
}

fn apply_file_config(settings: &mut Settings, raw: &str) {
    let Ok(value) = raw.parse::<toml::Value>() else {
        return;
    };

    if let Some(v) = value.get("api_base_url").and_then(|v| v.as_str()) {
        settings.api_base_url = v.to_string();
    }
    if let Some(v) = value.get("request_timeout_secs").and_then(|v| v.as_integer()) {
        if let Ok(parsed) = u64::try_from(v) {
            settings.request_timeout_secs = parsed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_config_overrides_defaults() {
        let mut settings = Settings::default();
        apply_file_config(
            &mut settings,
            "api_base_url = \"http://foods.internal:8080\"\nrequest_timeout_secs = 30\n",
        );
        assert_eq!(settings.api_base_url, "http://foods.internal:8080");
        assert_eq!(settings.request_timeout_secs, 30);
    }

    #[test]
    fn malformed_file_config_is_ignored() {
        let mut settings = Settings::default();
        apply_file_config(&mut settings, "api_base_url = [not toml");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn negative_timeout_is_ignored() {
        let mut settings = Settings::default();
        apply_file_config(&mut settings, "request_timeout_secs = -5");
        assert_eq!(settings.request_timeout_secs, Settings::default().request_timeout_secs);
    }
}
