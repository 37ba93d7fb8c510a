use std::path::PathBuf;

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: String,
    /// JSON layout replacing the built-in full-day layout.
    pub layout_path: Option<PathBuf>,
    pub accept_invalid_certs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            layout_path: None,
            accept_invalid_certs: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            addr: lookup("MENU_API_ADDR")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.addr),
            layout_path: lookup("MENU_LAYOUT_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            accept_invalid_certs: lookup("MENU_ACCEPT_INVALID_CERTS")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.accept_invalid_certs),
        }
    }
}
