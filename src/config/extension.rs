//! Extension declarations from `extra.civicrm.extensions`
//!
//! A declaration is either a bare URL string or an object with optional
//! `url`, `patches`, `link` and `type` fields. Both shapes are normalized into
//! [`ExtensionSpec`] once, while deserializing.

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Where `link` lookups for an extension are resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtensionKind {
    /// Generic local extensions directory (`extensions_dir`)
    #[default]
    Contrib,
    /// The core package's own `ext/` tree
    Core,
}

impl ExtensionKind {
    fn from_type(value: Option<&str>) -> Self {
        match value {
            Some("core") => ExtensionKind::Core,
            _ => ExtensionKind::Contrib,
        }
    }
}

/// One configured extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSpec {
    /// Extension key; also the destination directory name
    pub name: String,
    /// Archive URL (or local path)
    pub url: Option<String>,
    /// Patch files or URLs, applied in order
    pub patches: Vec<String>,
    /// Local directory name to link instead of downloading
    pub link: Option<String>,
    pub kind: ExtensionKind,
}

impl ExtensionSpec {
    /// Create a spec that only has a download URL
    #[cfg(test)]
    pub fn from_url(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::from_source(name.into(), ExtensionSource::from_url(url.into()))
    }

    fn from_source(name: String, source: ExtensionSource) -> Self {
        Self {
            name,
            url: source.url,
            patches: source.patches,
            link: source.link,
            kind: source.kind,
        }
    }

    #[cfg(test)]
    pub fn with_patches(mut self, patches: &[&str]) -> Self {
        self.patches = patches.iter().map(ToString::to_string).collect();
        self
    }

    #[cfg(test)]
    pub fn with_link(mut self, link: &str, kind: ExtensionKind) -> Self {
        self.link = Some(link.to_string());
        self.kind = kind;
        self
    }
}

/// Everything in a declaration except its name
#[derive(Debug, Default)]
struct ExtensionSource {
    url: Option<String>,
    patches: Vec<String>,
    link: Option<String>,
    kind: ExtensionKind,
}

impl ExtensionSource {
    fn from_url(url: String) -> Self {
        Self {
            url: non_empty(Some(url)),
            ..Self::default()
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accept a JSON scalar for a string field; anything else counts as unset.
fn value_as_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => non_empty(Some(s)),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `patches` is a list or a description-to-location map, both kept in
/// declaration order; any other shape means no patches.
fn value_as_patches(value: serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Array(items) => items.into_iter().filter_map(value_as_string).collect(),
        serde_json::Value::Object(map) => map.into_values().filter_map(value_as_string).collect(),
        _ => Vec::new(),
    }
}

impl<'de> Deserialize<'de> for ExtensionSource {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ExtensionSourceVisitor;

        impl<'de> Visitor<'de> for ExtensionSourceVisitor {
            type Value = ExtensionSource;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an archive URL or an extension object")
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<ExtensionSource, E>
            where
                E: serde::de::Error,
            {
                Ok(ExtensionSource::from_url(value.to_string()))
            }

            fn visit_unit<E>(self) -> std::result::Result<ExtensionSource, E>
            where
                E: serde::de::Error,
            {
                Ok(ExtensionSource::default())
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<ExtensionSource, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut source = ExtensionSource::default();
                let mut kind = None;

                while let Some(key) = map.next_key::<String>()? {
                    let value: serde_json::Value = map.next_value()?;
                    match key.as_str() {
                        "url" => source.url = value_as_string(value),
                        "patches" => source.patches = value_as_patches(value),
                        "link" => source.link = value_as_string(value),
                        "type" => kind = value_as_string(value),
                        _ => {}
                    }
                }

                source.kind = ExtensionKind::from_type(kind.as_deref());
                Ok(source)
            }
        }

        deserializer.deserialize_any(ExtensionSourceVisitor)
    }
}

/// Ordered extension declarations, in the order written in `composer.json`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionList(Vec<ExtensionSpec>);

impl ExtensionList {
    #[cfg(test)]
    pub fn new(specs: Vec<ExtensionSpec>) -> Self {
        Self(specs)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExtensionSpec> {
        self.0.iter()
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&ExtensionSpec> {
        self.0.iter().find(|spec| spec.name == name)
    }
}

impl<'a> IntoIterator for &'a ExtensionList {
    type Item = &'a ExtensionSpec;
    type IntoIter = std::slice::Iter<'a, ExtensionSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'de> Deserialize<'de> for ExtensionList {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ExtensionListVisitor;

        impl<'de> Visitor<'de> for ExtensionListVisitor {
            type Value = ExtensionList;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of extension name to extension declaration")
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<ExtensionList, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut specs: Vec<ExtensionSpec> = Vec::new();
                while let Some((name, source)) = map.next_entry::<String, ExtensionSource>()? {
                    // A repeated key replaces the earlier declaration in place.
                    let spec = ExtensionSpec::from_source(name, source);
                    match specs.iter_mut().find(|s| s.name == spec.name) {
                        Some(existing) => *existing = spec,
                        None => specs.push(spec),
                    }
                }
                Ok(ExtensionList(specs))
            }

            // An empty PHP array is encoded as `[]`
            fn visit_seq<S>(self, mut seq: S) -> std::result::Result<ExtensionList, S::Error>
            where
                S: SeqAccess<'de>,
            {
                while seq.next_element::<serde::de::IgnoredAny>()?.is_some() {}
                Ok(ExtensionList::default())
            }

            fn visit_unit<E>(self) -> std::result::Result<ExtensionList, E>
            where
                E: serde::de::Error,
            {
                Ok(ExtensionList::default())
            }
        }

        deserializer.deserialize_any(ExtensionListVisitor)
    }
}
