//! Raw token documents
//!
//! A document is a tree of groups and leaves. Whether a JSON object is a leaf
//! is decided in exactly one place, [`is_token_leaf`], and every stage that
//! walks raw documents goes through [`TokenGroup`] instead of re-deciding.

use super::named_map::NamedMap;
use super::value::{is_valid_token_name, TokenType, TokenValue};
use crate::logging::codes;
use serde_json::{Map, Value};

/// Malformed document structure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Malformed token document at \"{path}\": {message}")]
pub struct DocumentError {
    pub path: String,
    pub message: String,
}

impl DocumentError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        codes::document::MALFORMED_DOCUMENT
    }
}

/// An object is a token leaf iff it has a `value` member holding a string,
/// number, object or array.
pub fn is_token_leaf(object: &Map<String, Value>) -> bool {
    matches!(
        object.get("value"),
        Some(Value::String(_) | Value::Number(_) | Value::Object(_) | Value::Array(_))
    )
}

/// A leaf token as authored
#[derive(Debug, Clone, PartialEq)]
pub struct RawToken {
    pub value: TokenValue,
    pub token_type: Option<TokenType>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub themes: NamedMap<TokenValue>,
    pub breakpoints: NamedMap<TokenValue>,
}

impl RawToken {
    pub fn new(value: impl Into<TokenValue>) -> Self {
        Self {
            value: value.into(),
            token_type: None,
            category: None,
            description: None,
            themes: NamedMap::new(),
            breakpoints: NamedMap::new(),
        }
    }

    pub fn with_type(mut self, token_type: TokenType) -> Self {
        self.token_type = Some(token_type);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>, value: impl Into<TokenValue>) -> Self {
        self.themes.insert(theme, value.into());
        self
    }

    pub fn with_breakpoint(
        mut self,
        breakpoint: impl Into<String>,
        value: impl Into<TokenValue>,
    ) -> Self {
        self.breakpoints.insert(breakpoint, value.into());
        self
    }

    /// Effective type for emission; untyped tokens are strings
    pub fn effective_type(&self) -> TokenType {
        self.token_type.unwrap_or_default()
    }

    fn from_object(object: &Map<String, Value>, path: &str) -> Result<Self, DocumentError> {
        if let Some(child) = object.keys().find(|key| is_valid_token_name(key)) {
            return Err(DocumentError::new(
                path,
                format!("token leaf cannot contain child '{}'", child),
            ));
        }

        let value = object
            .get("value")
            .and_then(TokenValue::from_json)
            .ok_or_else(|| {
                DocumentError::new(path, "token 'value' must be a string, number, object or array")
            })?;

        let token_type = match object.get("type") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(TokenType::from_str(name).ok_or_else(|| {
                DocumentError::new(path, format!("unknown token type '{}'", name))
            })?),
            Some(other) => {
                return Err(DocumentError::new(
                    path,
                    format!("token type must be a string, found {}", other),
                ))
            }
        };

        Ok(Self {
            value,
            token_type,
            category: optional_string(object, "category", path)?,
            description: optional_string(object, "description", path)?,
            themes: override_map(object, "themes", path)?,
            breakpoints: override_map(object, "breakpoints", path)?,
        })
    }
}

fn optional_string(
    object: &Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<Option<String>, DocumentError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(DocumentError::new(
            path,
            format!("'{}' must be a string", field),
        )),
    }
}

fn override_map(
    object: &Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<NamedMap<TokenValue>, DocumentError> {
    let members = match object.get(field) {
        None | Some(Value::Null) => return Ok(NamedMap::new()),
        Some(Value::Object(members)) => members,
        Some(_) => {
            return Err(DocumentError::new(
                path,
                format!("'{}' must be an object of name to value", field),
            ))
        }
    };

    let mut overrides = NamedMap::new();
    for (name, raw) in members {
        let value = TokenValue::from_json(raw).ok_or_else(|| {
            DocumentError::new(
                format!("{}[{}]", path, name),
                format!("override value must be a string, number, object or array, found {}", raw),
            )
        })?;
        overrides.insert(name.clone(), value);
    }
    Ok(overrides)
}

/// A node of the document tree
#[derive(Debug, Clone, PartialEq)]
pub enum TokenNode {
    Token(RawToken),
    Group(TokenGroup),
}

/// Ordered mapping from key to token or nested group
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenGroup {
    entries: Vec<(String, TokenNode)>,
}

impl TokenGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a group from a parsed document object, keeping member order
    pub fn from_json(value: &Value) -> Result<Self, DocumentError> {
        match value {
            Value::Object(object) => Self::from_object(object, ""),
            other => Err(DocumentError::new(
                "",
                format!("document root must be an object, found {}", json_kind(other)),
            )),
        }
    }

    fn from_object(object: &Map<String, Value>, prefix: &str) -> Result<Self, DocumentError> {
        let mut group = TokenGroup::new();
        for (key, member) in object {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            let node = match member {
                Value::Object(child) if is_token_leaf(child) => {
                    TokenNode::Token(RawToken::from_object(child, &path)?)
                }
                Value::Object(child) if child.contains_key("value") => {
                    return Err(DocumentError::new(
                        path,
                        "token 'value' must be a string, number, object or array",
                    ))
                }
                Value::Object(child) => TokenNode::Group(Self::from_object(child, &path)?),
                other => {
                    return Err(DocumentError::new(
                        path,
                        format!(
                            "expected a token or group object, found {}",
                            json_kind(other)
                        ),
                    ))
                }
            };
            group.entries.push((key.clone(), node));
        }
        Ok(group)
    }

    /// Builder-style token insert
    pub fn with_token(mut self, key: impl Into<String>, token: RawToken) -> Self {
        self.insert(key, TokenNode::Token(token));
        self
    }

    /// Builder-style group insert
    pub fn with_group(mut self, key: impl Into<String>, group: TokenGroup) -> Self {
        self.insert(key, TokenNode::Group(group));
        self
    }

    /// Insert or replace, keeping the position of a replaced entry
    pub fn insert(&mut self, key: impl Into<String>, node: TokenNode) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = node,
            None => self.entries.push((key, node)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&TokenNode> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, node)| node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of leaf tokens at any depth
    pub fn leaf_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, node)| match node {
                TokenNode::Token(_) => 1,
                TokenNode::Group(group) => group.leaf_count(),
            })
            .sum()
    }

    /// Deepest nesting level; a flat group of tokens has depth 1
    pub fn depth(&self) -> usize {
        1 + self
            .entries
            .iter()
            .filter_map(|(_, node)| match node {
                TokenNode::Group(group) => Some(group.depth()),
                TokenNode::Token(_) => None,
            })
            .max()
            .unwrap_or(0)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
