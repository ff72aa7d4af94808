//! Token values and token types

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// Declared type of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TokenType {
    Color,
    Dimension,
    FontFamily,
    FontWeight,
    Duration,
    CubicBezier,
    Number,
    #[default]
    String,
    Shadow,
    Gradient,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Color => "color",
            TokenType::Dimension => "dimension",
            TokenType::FontFamily => "fontFamily",
            TokenType::FontWeight => "fontWeight",
            TokenType::Duration => "duration",
            TokenType::CubicBezier => "cubicBezier",
            TokenType::Number => "number",
            TokenType::String => "string",
            TokenType::Shadow => "shadow",
            TokenType::Gradient => "gradient",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "color" => Some(TokenType::Color),
            "dimension" => Some(TokenType::Dimension),
            "fontFamily" => Some(TokenType::FontFamily),
            "fontWeight" => Some(TokenType::FontWeight),
            "duration" => Some(TokenType::Duration),
            "cubicBezier" => Some(TokenType::CubicBezier),
            "number" => Some(TokenType::Number),
            "string" => Some(TokenType::String),
            "shadow" => Some(TokenType::Shadow),
            "gradient" => Some(TokenType::Gradient),
            _ => None,
        }
    }

    pub fn all() -> &'static [TokenType] {
        &[
            TokenType::Color,
            TokenType::Dimension,
            TokenType::FontFamily,
            TokenType::FontWeight,
            TokenType::Duration,
            TokenType::CubicBezier,
            TokenType::Number,
            TokenType::String,
            TokenType::Shadow,
            TokenType::Gradient,
        ]
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw or resolved token value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Number(Number),
    Text(String),
    /// Object or array value, e.g. `{ "value": 16, "unit": "px" }` or a bezier curve
    Structured(Value),
}

impl TokenValue {
    pub fn text(value: impl Into<String>) -> Self {
        TokenValue::Text(value.into())
    }

    pub fn integer(value: i64) -> Self {
        TokenValue::Number(Number::from(value))
    }

    /// Convert a document value; booleans and null are not token values
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(TokenValue::Text(s.clone())),
            Value::Number(n) => Some(TokenValue::Number(n.clone())),
            Value::Object(_) | Value::Array(_) => Some(TokenValue::Structured(value.clone())),
            Value::Bool(_) | Value::Null => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            TokenValue::Number(n) => Value::Number(n.clone()),
            TokenValue::Text(s) => Value::String(s.clone()),
            TokenValue::Structured(v) => v.clone(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Dot-path this value refers to when written as `{GROUP.TOKEN}`
    pub fn alias_target(&self) -> Option<&str> {
        self.as_text().and_then(parse_alias)
    }

    pub fn is_alias(&self) -> bool {
        self.alias_target().is_some()
    }

    /// Render the value as a CSS property value
    pub fn to_css(&self, token_type: TokenType) -> String {
        match self {
            TokenValue::Text(s) => s.clone(),
            TokenValue::Number(n) => n.to_string(),
            TokenValue::Structured(value) => structured_to_css(value, token_type),
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Text(s) => f.write_str(s),
            TokenValue::Number(n) => write!(f, "{}", n),
            TokenValue::Structured(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::Text(value.to_string())
    }
}

impl From<i64> for TokenValue {
    fn from(value: i64) -> Self {
        TokenValue::integer(value)
    }
}

/// True iff `key` is a non-empty run of `A-Z`, `0-9` and `_`
pub fn is_valid_token_name(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
}

/// Parse the alias syntax `{SEGMENT.SEGMENT}` and return the inner dot-path
pub fn parse_alias(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('{')?.strip_suffix('}')?;
    if inner.split('.').all(is_valid_token_name) {
        Some(inner)
    } else {
        None
    }
}

fn structured_to_css(value: &Value, token_type: TokenType) -> String {
    match value {
        Value::Array(items) => match token_type {
            TokenType::CubicBezier => format!(
                "cubic-bezier({})",
                items
                    .iter()
                    .map(scalar_to_css)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            TokenType::FontFamily => items
                .iter()
                .map(|item| match item {
                    Value::String(name) if name.contains(' ') && !name.starts_with('"') => {
                        format!("\"{}\"", name)
                    }
                    other => scalar_to_css(other),
                })
                .collect::<Vec<_>>()
                .join(", "),
            _ => items
                .iter()
                .map(|item| structured_to_css(item, token_type))
                .collect::<Vec<_>>()
                .join(", "),
        },
        Value::Object(fields) => {
            if let (Some(amount), Some(Value::String(unit))) = (fields.get("value"), fields.get("unit"))
            {
                return format!("{}{}", scalar_to_css(amount), unit);
            }
            if token_type == TokenType::Shadow && fields.contains_key("color") {
                return ["offsetX", "offsetY", "blur", "spread", "color"]
                    .iter()
                    .filter_map(|key| fields.get(*key))
                    .map(|part| structured_to_css(part, TokenType::Dimension))
                    .collect::<Vec<_>>()
                    .join(" ");
            }
            for key in ["hex", "color"] {
                if let Some(Value::String(color)) = fields.get(key) {
                    return color.clone();
                }
            }
            value.to_string()
        }
        other => scalar_to_css(other),
    }
}

fn scalar_to_css(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Object(_) | Value::Array(_) => structured_to_css(value, TokenType::String),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
    }
}
