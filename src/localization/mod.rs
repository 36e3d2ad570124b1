//! Localized text lookup.
//!
//! The flow reads text through the [`TextLookup`] trait and never fails: a key
//! missing from the current language falls back to the default language, and a
//! key missing everywhere resolves to `"[key]"` so gaps show up on screen during
//! QA instead of crashing the flow.
//!
//! # Change Notification
//!
//! Every language change bumps [`TextLookup::revision`]. Text holders that are
//! enabled compare the revision they last resolved against and re-resolve when
//! it moved (see [`crate::widgets::LocalizedText`]). Disabled holders stop
//! comparing, which is the "unsubscribe".
//!
//! # Table Format
//!
//! ```text
//! key,en,ja,es
//! tip_header,PRO TIP,プロのヒント,CONSEJO PRO
//! tip_swing,"Time your {gold}swing{/gold}, then release",...
//! ```

pub mod csv;
pub mod highlight;

use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::LocaleError;

/// Read-only text lookup used by screens and widgets.
pub trait TextLookup {
    /// Resolve `key` in the current language. Never fails.
    fn text(
        &self,
        key: &str,
    ) -> String;

    /// Counter bumped on every language change.
    fn revision(&self) -> u64 { 0 }
}

/// Placeholder returned for keys with no translation at all.
pub fn missing_placeholder(key: &str) -> String { format!("[{key}]") }

/// Localization table with a current and a default language.
#[derive(Debug, Clone)]
pub struct Localizer {
    /// key -> (language -> value)
    entries: HashMap<String, HashMap<String, String>>,
    /// Language codes from the header row, key column excluded.
    languages: Vec<String>,
    default_language: String,
    current_language: String,
    revision: u64,
}

impl Localizer {
    /// Create an empty table. Every lookup returns the placeholder.
    pub fn new(default_language: &str) -> Self {
        Self {
            entries: HashMap::new(),
            languages: Vec::new(),
            default_language: default_language.to_string(),
            current_language: default_language.to_string(),
            revision: 0,
        }
    }

    /// Parse a CSV table. The first row is the header (`key,<lang>,<lang>...`).
    ///
    /// Rows with fewer than two fields are skipped. Keys and values are trimmed.
    pub fn from_csv(
        source: &str,
        default_language: &str,
    ) -> Result<Self, LocaleError> {
        let mut rows = csv::rows(source);
        let header = rows.next().ok_or(LocaleError::Empty)?;

        let mut localizer = Self::new(default_language);
        localizer.languages = csv::parse_line(header)
            .into_iter()
            .skip(1)
            .map(|lang| lang.trim().to_string())
            .collect();

        for row in rows {
            let fields = csv::parse_line(row);
            if fields.len() < 2 {
                continue;
            }

            let key = fields[0].trim().to_string();
            let translations = fields[1..]
                .iter()
                .zip(&localizer.languages)
                .map(|(value, lang)| (lang.clone(), value.trim().to_string()))
                .collect();

            localizer.entries.insert(key, translations);
        }

        info!(
            keys = localizer.entries.len(),
            languages = localizer.languages.len(),
            "Loaded localization table"
        );
        Ok(localizer)
    }

    /// Read and parse a CSV table from disk.
    pub fn load(
        path: &Path,
        default_language: &str,
    ) -> Result<Self, LocaleError> {
        let source = fs::read_to_string(path).map_err(|e| LocaleError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_csv(&source, default_language)
    }

    /// Resolve `key`, then substitute `{0}`, `{1}`, ... with `args`.
    pub fn format(
        &self,
        key: &str,
        args: &[&dyn Display],
    ) -> String {
        let mut out = self.text(key);
        for (i, arg) in args.iter().enumerate() {
            out = out.replace(&format!("{{{i}}}"), &arg.to_string());
        }
        out
    }

    /// Switch the active language and notify enabled text holders.
    ///
    /// Unknown codes are accepted; lookups then fall back to the default language.
    pub fn set_language(
        &mut self,
        code: &str,
    ) {
        if !self.languages.iter().any(|l| l == code) {
            warn!(language = code, "Switching to a language with no column in the table");
        }
        self.current_language = code.to_string();
        self.revision += 1;
        info!(language = code, revision = self.revision, "Language changed");
    }

    /// Switch to the next language in table order, wrapping around.
    ///
    /// Returns the new language, or `None` when the table has no languages.
    pub fn cycle_language(&mut self) -> Option<&str> {
        if self.languages.is_empty() {
            return None;
        }
        let next = self
            .languages
            .iter()
            .position(|l| *l == self.current_language)
            .map_or(0, |i| (i + 1) % self.languages.len());
        let code = self.languages[next].clone();
        self.set_language(&code);
        Some(&self.current_language)
    }

    #[inline]
    pub fn current_language(&self) -> &str { &self.current_language }

    #[inline]
    pub fn default_language(&self) -> &str { &self.default_language }

    /// Language codes available in the table.
    #[inline]
    pub fn available_languages(&self) -> &[String] { &self.languages }

    /// Number of keys in the table.
    #[inline]
    pub fn len(&self) -> usize { self.entries.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl TextLookup for Localizer {
    fn text(
        &self,
        key: &str,
    ) -> String {
        if let Some(translations) = self.entries.get(key) {
            if let Some(text) = translations.get(&self.current_language) {
                return text.clone();
            }
            if let Some(text) = translations.get(&self.default_language) {
                return text.clone();
            }
        }
        missing_placeholder(key)
    }

    fn revision(&self) -> u64 { self.revision }
}

// =============================================================================
// Unit Tests
// =============================================================================
