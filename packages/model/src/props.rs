//! # Props
//!
//! Open, string-keyed property bags carried by blocks and components.
//! Every field is optional from a reader's point of view: the `PropsExt`
//! accessors return `None` for missing or mistyped fields so renderers can
//! substitute their own fallback instead of failing.

use crate::rich::{LocalizedText, RichContent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type Props = BTreeMap<String, PropValue>;

/// A single prop value.
///
/// Variant order matters for deserialization: objects that only use rich
/// content keys become [`PropValue::Rich`], any other object is a [`PropValue::Map`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<PropValue>),
    Rich(LocalizedText),
    Map(BTreeMap<String, PropValue>),
}

impl PropValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PropValue]> {
        match self {
            PropValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, PropValue>> {
        match self {
            PropValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// View a text-like value as rich content
    pub fn as_rich(&self) -> Option<RichContent> {
        match self {
            PropValue::Text(s) => Some(RichContent::Plain(s.clone())),
            PropValue::Rich(content) => Some(RichContent::Localized(content.clone())),
            _ => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Text(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Text(s)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<i64> for PropValue {
    fn from(n: i64) -> Self {
        PropValue::Number(n.into())
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n)
            .map(PropValue::Number)
            .unwrap_or(PropValue::Null)
    }
}

impl From<Vec<PropValue>> for PropValue {
    fn from(items: Vec<PropValue>) -> Self {
        PropValue::List(items)
    }
}

impl From<BTreeMap<String, PropValue>> for PropValue {
    fn from(map: BTreeMap<String, PropValue>) -> Self {
        PropValue::Map(map)
    }
}

impl From<LocalizedText> for PropValue {
    fn from(content: LocalizedText) -> Self {
        PropValue::Rich(content)
    }
}

impl From<RichContent> for PropValue {
    fn from(content: RichContent) -> Self {
        match content {
            RichContent::Plain(s) => PropValue::Text(s),
            RichContent::Localized(content) => PropValue::Rich(content),
        }
    }
}

/// Lenient typed accessors over a [`Props`] bag
pub trait PropsExt {
    fn get_str(&self, key: &str) -> Option<&str>;
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn get_f64(&self, key: &str) -> Option<f64>;
    fn get_list(&self, key: &str) -> Option<&[PropValue]>;
    fn get_rich(&self, key: &str) -> Option<RichContent>;
}

impl PropsExt for Props {
    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropValue::as_str)
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(PropValue::as_bool)
    }

    fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(PropValue::as_f64)
    }

    fn get_list(&self, key: &str) -> Option<&[PropValue]> {
        self.get(key).and_then(PropValue::as_list)
    }

    fn get_rich(&self, key: &str) -> Option<RichContent> {
        self.get(key).and_then(PropValue::as_rich)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Language;

    #[test]
    fn test_untagged_deserialization() {
        let props: Props = serde_json::from_str(
            r#"{
                "title": {"ru": "Привет", "en": "Hello"},
                "subtitle": "Plain",
                "autoplay": true,
                "interval": 5000,
                "slides": [{"image": "/a.png", "caption": {"en": "A"}}],
                "empty": null
            }"#,
        )
        .unwrap();

        assert!(matches!(props["title"], PropValue::Rich(_)));
        assert_eq!(props.get_str("subtitle"), Some("Plain"));
        assert_eq!(props.get_bool("autoplay"), Some(true));
        assert_eq!(props.get_f64("interval"), Some(5000.0));
        assert_eq!(props["empty"], PropValue::Null);

        let slides = props.get_list("slides").unwrap();
        let slide = slides[0].as_map().unwrap();
        assert_eq!(slide["image"].as_str(), Some("/a.png"));
        assert!(matches!(slide["caption"], PropValue::Rich(_)));
    }

    #[test]
    fn test_mistyped_fields_read_as_missing() {
        let mut props = Props::new();
        props.insert("title".to_string(), PropValue::from(42_i64));

        assert_eq!(props.get_str("title"), None);
        assert_eq!(props.get_rich("title"), None);
        assert_eq!(props.get_bool("missing"), None);
    }

    #[test]
    fn test_rich_accessor_accepts_plain_strings() {
        let mut props = Props::new();
        props.insert("label".to_string(), "Shop".into());
        let rich = props.get_rich("label").unwrap();
        assert_eq!(rich.resolve(Language::En, ""), "Shop");
    }

    #[test]
    fn test_serialization_is_untagged() {
        let mut props = Props::new();
        props.insert("count".to_string(), 3_i64.into());
        props.insert("label".to_string(), LocalizedText::new().with(Language::Uz, "Do'kon").into());
        assert_eq!(
            serde_json::to_string(&props).unwrap(),
            r#"{"count":3,"label":{"uz":"Do'kon"}}"#
        );
    }
}
