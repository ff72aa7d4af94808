//! Resolved tokens and the flat token map

use super::named_map::NamedMap;
use super::value::{TokenType, TokenValue};
use crate::utils::{dot_path, hyphen_path};
use serde::Serialize;
use std::collections::HashMap;

/// A concrete value plus the alias it came through, if any
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedValue {
    pub value: TokenValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<String>,
}

impl ResolvedValue {
    pub fn literal(value: TokenValue) -> Self {
        Self {
            value,
            alias_of: None,
        }
    }

    pub fn aliased(value: TokenValue, target: impl Into<String>) -> Self {
        Self {
            value,
            alias_of: Some(target.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedToken {
    /// Dot-path, e.g. `COLORS.PRIMARY`
    pub key: String,
    /// Hyphen-joined path as authored, e.g. `COLORS-PRIMARY`
    pub path: String,
    pub raw_path: Vec<String>,
    pub value: TokenValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<String>,
    pub token_type: TokenType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub theme_values: NamedMap<ResolvedValue>,
    pub breakpoint_values: NamedMap<ResolvedValue>,
}

impl ResolvedToken {
    /// A token with a literal default and no overrides
    pub fn new(raw_path: Vec<String>, value: TokenValue, token_type: TokenType) -> Self {
        Self {
            key: dot_path(&raw_path),
            path: hyphen_path(&raw_path),
            raw_path,
            value,
            alias_of: None,
            token_type,
            category: None,
            description: None,
            theme_values: NamedMap::new(),
            breakpoint_values: NamedMap::new(),
        }
    }

    pub fn has_overrides(&self) -> bool {
        !self.theme_values.is_empty() || !self.breakpoint_values.is_empty()
    }
}

/// Dot-path keyed map of resolved tokens in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatTokenMap {
    tokens: Vec<ResolvedToken>,
    index: HashMap<String, usize>,
}

impl FlatTokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token; a token with an existing key replaces it in place
    pub fn insert(&mut self, token: ResolvedToken) -> Option<ResolvedToken> {
        match self.index.get(&token.key) {
            Some(&position) => Some(std::mem::replace(&mut self.tokens[position], token)),
            None => {
                self.index.insert(token.key.clone(), self.tokens.len());
                self.tokens.push(token);
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ResolvedToken> {
        self.index.get(key).map(|&position| &self.tokens[position])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedToken> {
        self.tokens.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|token| token.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn alias_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.alias_of.is_some()).count()
    }

    pub fn theme_override_count(&self) -> usize {
        self.tokens.iter().map(|t| t.theme_values.len()).sum()
    }

    pub fn breakpoint_override_count(&self) -> usize {
        self.tokens.iter().map(|t| t.breakpoint_values.len()).sum()
    }
}

impl FromIterator<ResolvedToken> for FlatTokenMap {
    fn from_iter<I: IntoIterator<Item = ResolvedToken>>(iter: I) -> Self {
        let mut map = FlatTokenMap::new();
        for token in iter {
            map.insert(token);
        }
        map
    }
}

impl IntoIterator for FlatTokenMap {
    type Item = ResolvedToken;
    type IntoIter = std::vec::IntoIter<ResolvedToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a FlatTokenMap {
    type Item = &'a ResolvedToken;
    type IntoIter = std::slice::Iter<'a, ResolvedToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
