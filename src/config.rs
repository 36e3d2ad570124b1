//! Flow configuration.
//!
//! Defaults are compile-time constants so the flow works with no config file
//! at all. [`FlowConfig`] groups them into TOML sections that a host can
//! override partially; every field falls back to its constant.
//!
//! ```toml
//! [timing]
//! fade_secs = 0.5
//! logo_display_secs = 3.0
//!
//! [loading]
//! simulated_load_secs = 8.0
//! hold_secs = 0.5
//! total_size_mb = 267.0
//!
//! [tips]
//! keys = ["tip_club_bag", "tip_forecast"]
//! cycle_secs = 8.0
//! fade_secs = 0.3
//! illustrations = 0
//!
//! [locale]
//! default_language = "en"
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// =============================================================================
// Transition Timing
// =============================================================================

/// Duration of each half of a screen crossfade (fade-out, then fade-in).
pub const FADE_DURATION: Duration = Duration::from_millis(500);

/// How long the logo stays up before the bootstrap moves to Loading.
pub const LOGO_DISPLAY_TIME: Duration = Duration::from_secs(3);

// =============================================================================
// Loading Simulation
// =============================================================================

/// Length of the simulated download ramp.
pub const SIMULATED_LOAD_TIME: Duration = Duration::from_secs(8);

/// Pause at 100% before the loading screen reports completion.
pub const LOAD_COMPLETE_HOLD: Duration = Duration::from_millis(500);

/// Size shown in the download label ("x.xx / 267 MB").
pub const TOTAL_DOWNLOAD_MB: f32 = 267.0;

/// Largest accepted download size. Keeps the download label within its buffer.
pub const MAX_DOWNLOAD_MB: f32 = 1_000_000.0;

/// Loading bar fill speed toward its target, in full bars per second.
pub const BAR_SMOOTH_SPEED: f32 = 3.0;

// =============================================================================
// Tip Carousel
// =============================================================================

/// Interval between automatic tip changes.
pub const TIP_CYCLE_INTERVAL: Duration = Duration::from_secs(8);

/// Duration of each half of the tip text crossfade.
pub const TIP_FADE_DURATION: Duration = Duration::from_millis(300);

/// Tip keys shown by the loading screen, in order.
pub const DEFAULT_TIP_KEYS: [&str; 8] = [
    "tip_club_bag",
    "tip_forecast",
    "tip_rarities",
    "tip_swing",
    "tip_accuracy",
    "tip_leaderboard",
    "tip_timing",
    "tip_view_switch",
];

// =============================================================================
// Press Feedback
// =============================================================================

/// Scale applied to a fully pressed button.
pub const PRESSED_SCALE: f32 = 0.95;

/// Channel multiplier applied to a fully pressed button.
pub const PRESSED_TINT: f32 = 0.85;

/// Press visual transition speed, in full transitions per second.
pub const PRESS_TRANSITION_SPEED: f32 = 15.0;

// =============================================================================
// Localization
// =============================================================================

/// Language used when the current language lacks a translation.
pub const DEFAULT_LANGUAGE: &str = "en";

// =============================================================================
// FlowConfig
// =============================================================================

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub timing: TimingConfig,
    pub loading: LoadingConfig,
    pub tips: TipConfig,
    pub locale: LocaleConfig,
}

/// Screen transition timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Crossfade half duration in seconds.
    pub fade_secs: f32,
    /// Logo display time in seconds.
    pub logo_display_secs: f32,
}

/// Simulated loading settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    /// Ramp duration in seconds.
    pub simulated_load_secs: f32,
    /// Hold at 100% in seconds.
    pub hold_secs: f32,
    /// Total size shown in the download label.
    pub total_size_mb: f32,
}

/// Tip carousel settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TipConfig {
    /// Localization keys, shown in order.
    pub keys: Vec<String>,
    /// Auto-advance interval in seconds.
    pub cycle_secs: f32,
    /// Text crossfade half duration in seconds.
    pub fade_secs: f32,
    /// Number of per-tip illustrations (illustration `i` belongs to tip `i`).
    pub illustrations: usize,
}

/// Localization settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Fallback language code.
    pub default_language: String,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fade_secs: FADE_DURATION.as_secs_f32(),
            logo_display_secs: LOGO_DISPLAY_TIME.as_secs_f32(),
        }
    }
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            simulated_load_secs: SIMULATED_LOAD_TIME.as_secs_f32(),
            hold_secs: LOAD_COMPLETE_HOLD.as_secs_f32(),
            total_size_mb: TOTAL_DOWNLOAD_MB,
        }
    }
}

impl Default for TipConfig {
    fn default() -> Self {
        Self {
            keys: DEFAULT_TIP_KEYS.iter().map(|k| (*k).to_string()).collect(),
            cycle_secs: TIP_CYCLE_INTERVAL.as_secs_f32(),
            fade_secs: TIP_FADE_DURATION.as_secs_f32(),
            illustrations: 0,
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl FlowConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "inline TOML")
    }

    /// Load configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `FlowConfig::default()`.
    /// - Otherwise parses it as TOML and validates.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content, &path.display().to_string())
    }

    fn parse(
        content: &str,
        origin: &str,
    ) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            origin: origin.to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// Checks:
    /// - Every duration is finite and non-negative
    /// - At least one tip key is configured
    /// - The download size is positive and at most [`MAX_DOWNLOAD_MB`]
    /// - The default language is not blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("timing.fade_secs", self.timing.fade_secs),
            ("timing.logo_display_secs", self.timing.logo_display_secs),
            ("loading.simulated_load_secs", self.loading.simulated_load_secs),
            ("loading.hold_secs", self.loading.hold_secs),
            ("tips.cycle_secs", self.tips.cycle_secs),
            ("tips.fade_secs", self.tips.fade_secs),
        ];

        for (name, secs) in durations {
            if Duration::try_from_secs_f32(secs).is_err() {
                return Err(ConfigError::Validation {
                    message: format!("{name} must be a finite, non-negative number of seconds (got {secs})"),
                });
            }
        }

        if self.tips.keys.is_empty() {
            return Err(ConfigError::Validation {
                message: "tips.keys must contain at least one key".to_string(),
            });
        }

        let size = self.loading.total_size_mb;
        if !(size > 0.0 && size <= MAX_DOWNLOAD_MB) {
            return Err(ConfigError::Validation {
                message: format!("loading.total_size_mb must be in (0, {MAX_DOWNLOAD_MB}] (got {size})"),
            });
        }

        if self.locale.default_language.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: "locale.default_language must not be blank".to_string(),
            });
        }

        Ok(())
    }

    #[inline]
    pub fn fade_duration(&self) -> Duration { secs(self.timing.fade_secs) }

    #[inline]
    pub fn logo_display_time(&self) -> Duration { secs(self.timing.logo_display_secs) }

    #[inline]
    pub fn simulated_load_time(&self) -> Duration { secs(self.loading.simulated_load_secs) }

    #[inline]
    pub fn load_complete_hold(&self) -> Duration { secs(self.loading.hold_secs) }

    #[inline]
    pub fn tip_cycle_interval(&self) -> Duration { secs(self.tips.cycle_secs) }

    #[inline]
    pub fn tip_fade_duration(&self) -> Duration { secs(self.tips.fade_secs) }
}

/// Seconds to `Duration`, rounded to the microsecond so `0.3` reads back as
/// exactly 300 ms. Invalid values (rejected by `validate`) become zero.
fn secs(value: f32) -> Duration {
    if !value.is_finite() || value < 0.0 {
        return Duration::ZERO;
    }
    Duration::from_micros((f64::from(value) * 1e6).round() as u64)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = FlowConfig::default();
        assert_eq!(config.fade_duration(), FADE_DURATION);
        assert_eq!(config.logo_display_time(), LOGO_DISPLAY_TIME);
        assert_eq!(config.simulated_load_time(), SIMULATED_LOAD_TIME);
        assert_eq!(config.load_complete_hold(), LOAD_COMPLETE_HOLD);
        assert_eq!(config.tip_cycle_interval(), TIP_CYCLE_INTERVAL);
        assert_eq!(config.tip_fade_duration(), TIP_FADE_DURATION);
        assert_eq!(config.tips.keys.len(), DEFAULT_TIP_KEYS.len());
        assert_eq!(config.locale.default_language, "en");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = FlowConfig::from_toml_str(
            r#"
            [loading]
            simulated_load_secs = 2.0

            [tips]
            keys = ["a", "b", "c"]
            "#,
        )
        .unwrap();

        assert_eq!(config.simulated_load_time(), Duration::from_secs(2));
        assert_eq!(config.load_complete_hold(), LOAD_COMPLETE_HOLD);
        assert_eq!(config.tips.keys, vec!["a", "b", "c"]);
        assert_eq!(config.tip_cycle_interval(), TIP_CYCLE_INTERVAL);
        assert_eq!(config.fade_duration(), FADE_DURATION);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(FlowConfig::from_toml_str("").unwrap(), FlowConfig::default());
    }

    #[test]
    fn test_negative_duration_rejected() {
        let err = FlowConfig::from_toml_str("[timing]\nfade_secs = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
        assert!(err.to_string().contains("timing.fade_secs"));
    }

    #[test]
    fn test_empty_tip_keys_rejected() {
        let err = FlowConfig::from_toml_str("[tips]\nkeys = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn test_download_size_bounds() {
        let err = FlowConfig::from_toml_str("[loading]\ntotal_size_mb = 1e20\n").unwrap_err();
        assert!(err.to_string().contains("loading.total_size_mb"));
        assert!(FlowConfig::from_toml_str("[loading]\ntotal_size_mb = 0.0\n").is_err());
        assert!(FlowConfig::from_toml_str("[loading]\ntotal_size_mb = 1000000.0\n").is_ok());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = FlowConfig::from_toml_str("[timing\nfade_secs = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = FlowConfig::load(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, FlowConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timing]\nlogo_display_secs = 1.5").unwrap();

        let config = FlowConfig::load(file.path()).unwrap();
        assert_eq!(config.logo_display_time(), Duration::from_millis(1500));
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let text = toml::to_string(&FlowConfig::default()).unwrap();
        assert_eq!(FlowConfig::from_toml_str(&text).unwrap(), FlowConfig::default());
    }
}
