use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Harness settings persisted between runs.
///
/// The API base URL is deliberately not part of this file: it is supplied
/// fresh each run (flag, env var, or the shell's `url` command).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Seconds a transient notice stays visible before auto-dismissal
    #[serde(default = "default_notice_ttl")]
    pub notice_ttl_secs: u64,

    /// Where downloaded files are written (default: current directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
}

fn default_notice_ttl() -> u64 {
    5
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            notice_ttl_secs: default_notice_ttl(),
            download_dir: None,
        }
    }
}

impl ProbeConfig {
    /// Default config file path for this platform
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "storage-probe", "probe") {
            dirs.config_dir().join("config.json")
        } else {
            PathBuf::from("probe-config.json")
        }
    }

    /// Load config from a file path
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        let config: Self =
            serde_json::from_str(&data).with_context(|| "failed to parse config JSON")?;
        Ok(config)
    }

    /// Save config to a file path
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config dir {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: ProbeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.notice_ttl_secs, 5);
        assert!(config.download_dir.is_none());
    }

    #[test]
    fn test_roundtrip_through_json() {
        let config = ProbeConfig {
            notice_ttl_secs: 2,
            download_dir: Some(PathBuf::from("/tmp/downloads")),
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ProbeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.notice_ttl_secs, 2);
        assert_eq!(back.download_dir, Some(PathBuf::from("/tmp/downloads")));
    }
}
