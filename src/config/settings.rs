use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crypto::{KdfAlgorithm, KdfParams, KdfPreset};
use crate::errors::{ArgonboxError, Result};

/// Project-level configuration, loaded from `.argonbox.toml`.
///
/// Every field has a sensible default so argonbox works out-of-the-box
/// without any config file at all.  The values here only shape new
/// containers; decryption always uses the parameters embedded in the
/// container itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Hash variant for new containers.
    #[serde(default = "default_variant")]
    pub variant: KdfAlgorithm,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_variant() -> KdfAlgorithm {
    KdfAlgorithm::Argon2id
}

fn default_memory_kib() -> u32 {
    65_536
}

fn default_iterations() -> u32 {
    3
}

fn default_parallelism() -> u32 {
    4
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: default_variant(),
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".argonbox.toml";

    /// Load settings from `<dir>/.argonbox.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            ArgonboxError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Convert the configured values into crypto-layer params.
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            algorithm: self.variant,
            memory_kib: self.memory_kib,
            iterations: self.iterations,
            parallelism: self.parallelism,
            ..KdfPreset::Default.params()
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.variant, KdfAlgorithm::Argon2id);
        assert_eq!(s.memory_kib, 65_536);
        assert_eq!(s.iterations, 3);
        assert_eq!(s.parallelism, 4);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.memory_kib, 65_536);
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
variant = "argon2i"
memory_kib = 131072
iterations = 5
parallelism = 8
"#;
        fs::write(tmp.path().join(".argonbox.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.variant, KdfAlgorithm::Argon2i);
        assert_eq!(settings.memory_kib, 131_072);
        assert_eq!(settings.iterations, 5);
        assert_eq!(settings.parallelism, 8);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".argonbox.toml"), "iterations = 7\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.iterations, 7);
        // Rest should be defaults
        assert_eq!(settings.variant, KdfAlgorithm::Argon2id);
        assert_eq!(settings.memory_kib, 65_536);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".argonbox.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(result.is_err());
    }

    #[test]
    fn kdf_params_carry_current_version() {
        let params = Settings::default().kdf_params();
        assert_eq!(params.version, 0x13);
    }
}
