use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, time::Duration};

pub const DEFAULT_FILE_TYPES: [&str; 4] = ["txt", "jpg", "png", "pdf"];
const DEFAULT_FOLDER: &str = "./files";
const DEFAULT_BIND: &str = "127.0.0.1:8000";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListingConfig {
    /// Folder that every listing request reads.
    pub folder: Option<String>,
    /// Extensions (without the dot) accepted by the type filter.
    #[serde(default)]
    pub file_types: Option<Vec<String>>,
    /// Simulated latency before each scan, in milliseconds.
    #[serde(default)]
    pub latency_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub listing: Option<ListingConfig>,
    pub server: Option<ServerConfig>,
}

/// Resolved listing settings. Built once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSettings {
    pub folder: PathBuf,
    pub file_types: Vec<String>,
    pub latency: Duration,
}

impl Config {
    pub fn load() -> anyhow::Result<(Self, PathBuf)> {
        let cfg_path = env::var("FOLIO_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config/folio.toml"));
        let text = fs::read_to_string(&cfg_path)
            .with_context(|| format!("reading {}", cfg_path.display()))?;
        let mut cfg = Self::from_toml(&text)
            .with_context(|| format!("parsing {}", cfg_path.display()))?;

        // Env overrides (minimal): FOLIO_FOLDER, FOLIO_BIND
        if let Ok(folder) = env::var("FOLIO_FOLDER") {
            cfg.listing.get_or_insert_with(ListingConfig::default).folder = Some(folder);
        }
        if let Ok(bind) = env::var("FOLIO_BIND") {
            cfg.server.get_or_insert_with(ServerConfig::default).bind = Some(bind);
        }

        Ok((cfg, cfg_path))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Shorthand used by tests and tools that only care about the folder.
    pub fn for_folder(folder: impl Into<String>) -> Self {
        Config {
            listing: Some(ListingConfig { folder: Some(folder.into()), file_types: None, latency_ms: None }),
            server: None,
        }
    }

    pub fn bind_addr(&self) -> String {
        self.server
            .as_ref()
            .and_then(|s| s.bind.clone())
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
    }

    pub fn listing_settings(&self) -> ListingSettings {
        let listing = self.listing.clone().unwrap_or_default();
        let folder = listing
            .folder
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FOLDER));
        let file_types = listing
            .file_types
            .map(|types| types.iter().map(|t| t.trim_start_matches('.').to_lowercase()).collect())
            .unwrap_or_else(|| DEFAULT_FILE_TYPES.iter().map(|t| t.to_string()).collect());
        ListingSettings {
            folder,
            file_types,
            latency: Duration::from_millis(listing.latency_ms.unwrap_or(0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_sections_missing() {
        let s = Config::default().listing_settings();
        assert_eq!(s.folder, PathBuf::from("./files"));
        assert_eq!(s.file_types, vec!["txt", "jpg", "png", "pdf"]);
        assert_eq!(s.latency, Duration::ZERO);
        assert_eq!(Config::default().bind_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn toml_sections_are_resolved() {
        let cfg = Config::from_toml(
            r#"
            [listing]
            folder = "/srv/share"
            file_types = ["TXT", ".Pdf"]
            latency_ms = 250

            [server]
            bind = "0.0.0.0:9000"
            "#,
        )
        .unwrap();
        let s = cfg.listing_settings();
        assert_eq!(s.folder, PathBuf::from("/srv/share"));
        assert_eq!(s.file_types, vec!["txt", "pdf"]);
        assert_eq!(s.latency, Duration::from_millis(250));
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Config::from_toml("[listing\nfolder = 1").is_err());
    }

    #[test]
    fn load_error_names_the_config_path() {
        let missing = std::env::temp_dir().join(format!("folio_cfg_{}.toml", std::process::id()));
        env::set_var("FOLIO_CONFIG", &missing);
        let err = Config::load().unwrap_err();
        env::remove_var("FOLIO_CONFIG");
        assert!(format!("{err:#}").contains(&missing.display().to_string()), "{err:#}");
    }
}
