//! # Rich Content
//!
//! User-editable text and button fields. A value is either a plain string or
//! an object keyed by language code, with optional `text` fallback, `href`
//! (buttons) and `style` overrides.
//!
//! ## Resolution order
//!
//! ```text
//! current language → first non-empty language (ru, en, uz) → text → caller fallback
//! ```
//!
//! ## Null values
//!
//! A stored `null` (e.g. `{"en": null}`) reads the same as a missing key and
//! is written back without that key. Both resolve identically, so only the
//! literal JSON differs after a round trip.

use crate::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Open mapping of presentation overrides (font, color, variant, size, ...)
pub type StyleMap = BTreeMap<String, serde_json::Value>;

/// Per-language content map with optional fallback, link and style.
///
/// Unknown keys are rejected so that generic prop objects are never mistaken
/// for rich content when deserializing a [`crate::PropValue`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalizedText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ru: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uz: Option<String>,

    /// Language-neutral fallback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Link target (buttons only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleMap>,
}

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a language map, leaving `text`, `href` and `style` unset
    pub fn from_languages(languages: &BTreeMap<Language, String>) -> Self {
        let mut content = Self::default();
        content.set_languages(languages);
        content
    }

    fn slot(&self, lang: Language) -> &Option<String> {
        match lang {
            Language::Ru => &self.ru,
            Language::En => &self.en,
            Language::Uz => &self.uz,
        }
    }

    fn slot_mut(&mut self, lang: Language) -> &mut Option<String> {
        match lang {
            Language::Ru => &mut self.ru,
            Language::En => &mut self.en,
            Language::Uz => &mut self.uz,
        }
    }

    /// Populated (non-empty) value for a language
    pub fn get(&self, lang: Language) -> Option<&str> {
        self.slot(lang).as_deref().filter(|s| !s.is_empty())
    }

    pub fn set(&mut self, lang: Language, value: impl Into<String>) {
        *self.slot_mut(lang) = Some(value.into());
    }

    pub fn with(mut self, lang: Language, value: impl Into<String>) -> Self {
        self.set(lang, value);
        self
    }

    /// Replace the whole language map. Languages absent from `languages` are cleared.
    pub fn set_languages(&mut self, languages: &BTreeMap<Language, String>) {
        for lang in Language::ALL {
            *self.slot_mut(lang) = languages.get(&lang).cloned();
        }
    }

    /// Every language key that is present, in fallback order
    pub fn languages(&self) -> BTreeMap<Language, String> {
        Language::ALL
            .iter()
            .filter_map(|lang| self.slot(*lang).clone().map(|value| (*lang, value)))
            .collect()
    }

    pub fn has_languages(&self) -> bool {
        Language::ALL.iter().any(|lang| self.get(*lang).is_some())
    }

    /// No populated language key and no `text`
    pub fn is_empty(&self) -> bool {
        !self.has_languages() && self.text.as_deref().map_or(true, str::is_empty)
    }

    pub fn resolve(&self, lang: Language, fallback: &str) -> String {
        self.get(lang)
            .or_else(|| Language::ALL.iter().find_map(|l| self.get(*l)))
            .or_else(|| self.text.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(fallback)
            .to_string()
    }
}

/// A plain string or a localized object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RichContent {
    Plain(String),
    Localized(LocalizedText),
}

impl RichContent {
    pub fn resolve(&self, lang: Language, fallback: &str) -> String {
        match self {
            RichContent::Plain(s) if !s.is_empty() => s.clone(),
            RichContent::Plain(_) => fallback.to_string(),
            RichContent::Localized(content) => content.resolve(lang, fallback),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RichContent::Plain(s) => s.is_empty(),
            RichContent::Localized(content) => content.is_empty(),
        }
    }

    pub fn href(&self) -> Option<&str> {
        match self {
            RichContent::Plain(_) => None,
            RichContent::Localized(content) => content.href.as_deref(),
        }
    }

    pub fn style(&self) -> Option<&StyleMap> {
        match self {
            RichContent::Plain(_) => None,
            RichContent::Localized(content) => content.style.as_ref(),
        }
    }

    /// Object form. A plain string becomes the `text` fallback.
    pub fn into_localized(self) -> LocalizedText {
        match self {
            RichContent::Plain(s) => LocalizedText {
                text: Some(s),
                ..LocalizedText::default()
            },
            RichContent::Localized(content) => content,
        }
    }
}

impl Default for RichContent {
    fn default() -> Self {
        RichContent::Plain(String::new())
    }
}

impl From<&str> for RichContent {
    fn from(s: &str) -> Self {
        RichContent::Plain(s.to_string())
    }
}

impl From<String> for RichContent {
    fn from(s: String) -> Self {
        RichContent::Plain(s)
    }
}

impl From<LocalizedText> for RichContent {
    fn from(content: LocalizedText) -> Self {
        RichContent::Localized(content)
    }
}
