use std::{collections::HashMap, fs};

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
    pub admin_email: String,
    pub admin_password: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            admin_email: "admin@example.com".into(),
            admin_password: "change-me".into(),
        }
    }
}

/// Defaults, overlaid by `console.toml`, overlaid by environment variables.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("console.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("server_url") {
                settings.server_url = v.clone();
            }
            if let Some(v) = file_cfg.get("admin_email") {
                settings.admin_email = v.clone();
            }
            if let Some(v) = file_cfg.get("admin_password") {
                settings.admin_password = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("CONSOLE_SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Ok(v) = std::env::var("CONSOLE_ADMIN_EMAIL") {
        settings.admin_email = v;
    }
    if let Ok(v) = std::env::var("APP__ADMIN_EMAIL") {
        settings.admin_email = v;
    }

    if let Ok(v) = std::env::var("CONSOLE_ADMIN_PASSWORD") {
        settings.admin_password = v;
    }
    if let Ok(v) = std::env::var("APP__ADMIN_PASSWORD") {
        settings.admin_password = v;
    }

    settings.server_url = normalize_server_url(&settings.server_url);
    settings
}

fn normalize_server_url(raw: &str) -> String {
    let raw = raw.trim();

    if raw.is_empty() {
        return Settings::default().server_url;
    }

    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    };

    with_scheme.trim_end_matches('/').to_string()
}
