//! Localized text holders.
//!
//! A [`LocalizedText`] resolves its key through a [`TextLookup`] and keeps the
//! result. While enabled it watches the lookup's revision and re-resolves when
//! the language changes. Disabling it stops the watching, so a hidden screen
//! never does lookup work.
//!
//! Screens keep their labels in a [`LabelSet`]; the screen base enables the
//! set when the screen becomes visible and disables it when it is hidden.

use crate::localization::TextLookup;

// =============================================================================
// Localized Text
// =============================================================================

/// One piece of text bound to a localization key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalizedText {
    key: String,
    text: String,
    enabled: bool,
    /// Revision the current `text` was resolved against.
    resolved_at: Option<u64>,
}

impl LocalizedText {
    /// Create a disabled holder. The text stays empty until first resolved.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: String::new(),
            enabled: false,
            resolved_at: None,
        }
    }

    /// Start watching for language changes and resolve now.
    pub fn enable(
        &mut self,
        lookup: &dyn TextLookup,
    ) {
        self.enabled = true;
        self.resolve(lookup);
    }

    /// Stop watching for language changes. The last text is kept.
    pub fn disable(&mut self) { self.enabled = false; }

    /// Re-resolve if enabled and the language changed since the last resolve.
    ///
    /// Returns `true` if the text was re-resolved.
    pub fn refresh(
        &mut self,
        lookup: &dyn TextLookup,
    ) -> bool {
        if !self.enabled || self.resolved_at == Some(lookup.revision()) {
            return false;
        }
        self.resolve(lookup);
        true
    }

    /// Point the holder at another key and resolve immediately.
    pub fn set_key(
        &mut self,
        key: impl Into<String>,
        lookup: &dyn TextLookup,
    ) {
        self.key = key.into();
        self.resolve(lookup);
    }

    fn resolve(
        &mut self,
        lookup: &dyn TextLookup,
    ) {
        self.text = lookup.text(&self.key);
        self.resolved_at = Some(lookup.revision());
    }

    #[inline]
    pub fn key(&self) -> &str { &self.key }

    #[inline]
    pub fn text(&self) -> &str { &self.text }

    #[inline]
    pub const fn is_enabled(&self) -> bool { self.enabled }
}

// =============================================================================
// Label Set
// =============================================================================

/// The localized labels belonging to one screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<LocalizedText>,
}

impl LabelSet {
    /// Build a set with one label per key, in order.
    pub fn from_keys(keys: &[&str]) -> Self {
        Self {
            labels: keys.iter().map(|key| LocalizedText::new(*key)).collect(),
        }
    }

    pub fn push(
        &mut self,
        label: LocalizedText,
    ) {
        self.labels.push(label);
    }

    pub fn enable_all(
        &mut self,
        lookup: &dyn TextLookup,
    ) {
        for label in &mut self.labels {
            label.enable(lookup);
        }
    }

    pub fn disable_all(&mut self) {
        for label in &mut self.labels {
            label.disable();
        }
    }

    /// Refresh every enabled label. Returns how many were re-resolved.
    pub fn refresh(
        &mut self,
        lookup: &dyn TextLookup,
    ) -> usize {
        self.labels.iter_mut().map(|label| label.refresh(lookup)).filter(|refreshed| *refreshed).count()
    }

    /// Resolved text of the first label with `key`.
    pub fn text(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.get(key).map(LocalizedText::text)
    }

    pub fn get(
        &self,
        key: &str,
    ) -> Option<&LocalizedText> {
        self.labels.iter().find(|label| label.key() == key)
    }

    /// Label at `index`, in insertion order.
    #[inline]
    pub fn at(
        &self,
        index: usize,
    ) -> Option<&LocalizedText> {
        self.labels.get(index)
    }

    /// Point the label at `index` to `key` and resolve it now.
    ///
    /// Returns `false` if there is no label at `index`.
    pub fn set_key(
        &mut self,
        index: usize,
        key: impl Into<String>,
        lookup: &dyn TextLookup,
    ) -> bool {
        let Some(label) = self.labels.get_mut(index) else {
            return false;
        };
        label.set_key(key, lookup);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocalizedText> { self.labels.iter() }

    #[inline]
    pub fn len(&self) -> usize { self.labels.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.labels.is_empty() }
}

// =============================================================================
// Unit Tests
// =============================================================================
