use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Page behaviour settings. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub carousel: CarouselConfig,
    pub scroll: ScrollConfig,
    pub alerts: AlertConfig,
    pub reveal: RevealConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub interval_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self { interval_ms: 5000 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub debounce_ms: u64,
    /// Navbar switches to its compact style once scrolled past this many px.
    pub navbar_threshold: f64,
    /// Height of the fixed header; anchor jumps land this far above the target.
    pub header_offset: f64,
    pub parallax_factor: f64,
    pub contact_anchor: String,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 10,
            navbar_threshold: 50.0,
            header_offset: 80.0,
            parallax_factor: 0.5,
            contact_anchor: "#contact".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub dismiss_ms: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self { dismiss_ms: 3000 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of an element that must be on screen before it animates in.
    pub threshold: f64,
    /// Bottom of the viewport is pulled up by this many px when testing visibility.
    pub bottom_margin: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub min_name_len: usize,
    pub min_message_len: usize,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            min_name_len: 2,
            min_message_len: 10,
        }
    }
}

impl SiteConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SiteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ROTATE_MS})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SiteError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn rotate_interval(&self) -> Duration {
        Duration::from_millis(self.carousel.interval_ms)
    }

    pub fn scroll_debounce(&self) -> Duration {
        Duration::from_millis(self.scroll.debounce_ms)
    }

    pub fn alert_dismiss_after(&self) -> Duration {
        Duration::from_millis(self.alerts.dismiss_ms)
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_positive_number("carousel.interval_ms", self.carousel.interval_ms, 1)?;
        validation::validate_positive_number("alerts.dismiss_ms", self.alerts.dismiss_ms, 1)?;

        validation::validate_range("scroll.navbar_threshold", self.scroll.navbar_threshold, 0.0, f64::MAX)?;
        validation::validate_range("scroll.header_offset", self.scroll.header_offset, 0.0, f64::MAX)?;
        validation::validate_range("scroll.parallax_factor", self.scroll.parallax_factor, -1.0, 1.0)?;
        validation::validate_non_empty_string("scroll.contact_anchor", &self.scroll.contact_anchor)?;

        validation::validate_range("reveal.threshold", self.reveal.threshold, 0.0, 1.0)?;
        validation::validate_range("reveal.bottom_margin", self.reveal.bottom_margin, 0.0, f64::MAX)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SiteConfig::from_toml_str("").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.rotate_interval(), Duration::from_millis(5000));
        assert_eq!(config.scroll_debounce(), Duration::from_millis(10));
        assert_eq!(config.alert_dismiss_after(), Duration::from_millis(3000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections() {
        let toml_content = r#"
[carousel]
interval_ms = 8000

[scroll]
header_offset = 64.0

[contact]
min_message_len = 20
"#;

        let config = SiteConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.carousel.interval_ms, 8000);
        assert_eq!(config.scroll.header_offset, 64.0);
        assert_eq!(config.scroll.navbar_threshold, 50.0);
        assert_eq!(config.contact.min_message_len, 20);
        assert_eq!(config.contact.min_name_len, 2);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SITE_FX_TEST_ROTATE_MS", "1234");

        let toml_content = r#"
[carousel]
interval_ms = ${SITE_FX_TEST_ROTATE_MS}
"#;

        let config = SiteConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.carousel.interval_ms, 1234);

        std::env::remove_var("SITE_FX_TEST_ROTATE_MS");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let zero_interval = SiteConfig::from_toml_str("[carousel]\ninterval_ms = 0\n").unwrap();
        assert!(matches!(
            zero_interval.validate(),
            Err(SiteError::InvalidConfigValueError { ref field, .. }) if field == "carousel.interval_ms"
        ));

        let threshold = SiteConfig::from_toml_str("[reveal]\nthreshold = 1.5\n").unwrap();
        assert!(threshold.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = SiteConfig::from_toml_str("[carousel\ninterval_ms = 1").unwrap_err();
        assert!(matches!(err, SiteError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[alerts]\ndismiss_ms = 1500\n")
            .unwrap();

        let config = SiteConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.alerts.dismiss_ms, 1500);
    }
}
