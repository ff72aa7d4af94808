//! Token document parsing
//!
//! Both formats are normalized into a `serde_json::Value` with member order
//! preserved, then handed to [`TokenGroup::from_json`].

use super::processor::{DocumentFormat, FileProcessorError};
use crate::logging::codes;
use crate::model::TokenGroup;
use crate::{log_error, log_success};
use serde_json::Value;

/// Parse document text into a token group
pub fn parse_document(source: &str, format: DocumentFormat) -> Result<TokenGroup, FileProcessorError> {
    let result = parse_value(source, format).and_then(|value| into_group(&value));

    match &result {
        Ok(group) => log_success!(codes::success::DOCUMENT_PARSED, "Token document parsed",
            "format" => format,
            "tokens" => group.leaf_count(),
            "depth" => group.depth()
        ),
        Err(err) => log_error!(err.error_code(), &err.to_string(),
            "stage" => "document",
            "format" => format
        ),
    }

    result
}

fn parse_value(source: &str, format: DocumentFormat) -> Result<Value, FileProcessorError> {
    let parse_error = |message: String| FileProcessorError::Parse { format, message };

    match format {
        DocumentFormat::Json => serde_json::from_str(source).map_err(|e| parse_error(e.to_string())),
        DocumentFormat::Toml => {
            let table: toml::Table = toml::from_str(source).map_err(|e| parse_error(e.to_string()))?;
            serde_json::to_value(table).map_err(|e| parse_error(e.to_string()))
        }
    }
}

fn into_group(value: &Value) -> Result<TokenGroup, FileProcessorError> {
    if !value.is_object() {
        return Err(FileProcessorError::NotAGroup {
            found: json_kind(value).to_string(),
        });
    }

    TokenGroup::from_json(value).map_err(|err| FileProcessorError::Malformed {
        path: err.path,
        message: err.message,
    })
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TokenNode, TokenType, TokenValue};
    use assert_matches::assert_matches;

    #[test]
    fn json_member_order_is_preserved() {
        let group = parse_document(
            r#"{"ZETA": {"value": 1}, "ALPHA": {"value": 2}, "MID": {"X": {"value": 3}}}"#,
            DocumentFormat::Json,
        )
        .unwrap();
        let keys: Vec<_> = group.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["ZETA", "ALPHA", "MID"]);
    }

    #[test]
    fn toml_documents_become_groups() {
        let group = parse_document(
            r##"
[COLORS.PRIMARY]
value = "#0000ff"
type = "color"
themes = { dark = "#000080" }

[SPACING.SPACING_2]
value = 16
type = "dimension"
"##,
            DocumentFormat::Toml,
        )
        .unwrap();

        let keys: Vec<_> = group.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["COLORS", "SPACING"]);

        let Some(TokenNode::Group(colors)) = group.get("COLORS") else {
            panic!("COLORS should be a group");
        };
        let Some(TokenNode::Token(primary)) = colors.get("PRIMARY") else {
            panic!("PRIMARY should be a token");
        };
        assert_eq!(primary.token_type, Some(TokenType::Color));
        assert_eq!(primary.themes.get("dark"), Some(&TokenValue::text("#000080")));
    }

    #[test]
    fn syntax_errors_carry_format() {
        assert_matches!(
            parse_document("{\"A\": ", DocumentFormat::Json),
            Err(FileProcessorError::Parse { format: DocumentFormat::Json, .. })
        );
        assert_matches!(
            parse_document("[A\nvalue = ", DocumentFormat::Toml),
            Err(FileProcessorError::Parse { format: DocumentFormat::Toml, .. })
        );
    }

    #[test]
    fn root_must_be_an_object() {
        assert_eq!(
            parse_document("[1, 2]", DocumentFormat::Json).unwrap_err(),
            FileProcessorError::NotAGroup {
                found: "an array".to_string()
            }
        );
    }

    #[test]
    fn malformed_tokens_keep_their_path() {
        let err = parse_document(r#"{"A": {"B": {"value": "x", "type": "colour"}}}"#, DocumentFormat::Json)
            .unwrap_err();
        assert_matches!(err, FileProcessorError::Malformed { ref path, .. } if path == "A.B");
    }
}
