//! Dimension normalization
//!
//! Rewrites every `dimension` token (and each of its overrides) to a CSS
//! length string. Numbers and bare numeric strings gain a `px` suffix, lengths
//! with a supported unit pass through unchanged, `{ "value", "unit" }` objects
//! are concatenated and then checked like any other string. The transform is
//! idempotent.

pub mod error;

pub use error::{DimensionTransformError, UnitsResult};

use crate::logging::codes;
use crate::model::{FlatTokenMap, NamedMap, ResolvedToken, ResolvedValue, TokenType, TokenValue};
use crate::utils::path::override_path;
use crate::{log_error, log_success};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Units accepted verbatim
pub const CSS_LENGTH_UNITS: &[&str] = &["px", "rem", "em", "%", "vh", "vw", "vmin", "vmax", "ch", "ex"];

/// Unit appended to unitless values
pub const DEFAULT_UNIT: &str = "px";

static LENGTH_PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

fn length_pattern() -> Result<&'static Regex, String> {
    LENGTH_PATTERN
        .get_or_init(|| {
            Regex::new(&format!(
                r"^-?[0-9]+(?:\.[0-9]+)?({})?$",
                CSS_LENGTH_UNITS.join("|")
            ))
        })
        .as_ref()
        .map_err(|err| format!("Dimension pattern failed to compile: {}", err))
}

/// Normalize every dimension token; fails on the first invalid value
pub fn transform_dimensions(map: &FlatTokenMap) -> UnitsResult<FlatTokenMap> {
    let mut normalized = 0usize;

    let result = map
        .iter()
        .map(|token| {
            if token.token_type != TokenType::Dimension {
                return Ok(token.clone());
            }
            normalized += 1;
            transform_token(token)
        })
        .collect::<UnitsResult<FlatTokenMap>>();

    match result {
        Ok(transformed) => {
            log_success!(codes::success::DIMENSIONS_NORMALIZED, "Dimension tokens normalized",
                "tokens" => transformed.len(),
                "dimensions" => normalized
            );
            Ok(transformed)
        }
        Err(err) => {
            log_error!(err.error_code(), &err.to_string(),
                path = &err.path,
                "stage" => "units"
            );
            Err(err)
        }
    }
}

fn transform_token(token: &ResolvedToken) -> UnitsResult<ResolvedToken> {
    let mut transformed = token.clone();
    transformed.value = normalize_at(&token.key, &token.value)?;
    transformed.theme_values = transform_overrides(&token.key, &token.theme_values)?;
    transformed.breakpoint_values = transform_overrides(&token.key, &token.breakpoint_values)?;
    Ok(transformed)
}

fn transform_overrides(
    key: &str,
    overrides: &NamedMap<ResolvedValue>,
) -> UnitsResult<NamedMap<ResolvedValue>> {
    overrides
        .iter()
        .map(|(name, resolved)| {
            let value = normalize_at(&override_path(key, name), &resolved.value)?;
            Ok((
                name.to_string(),
                ResolvedValue {
                    value,
                    alias_of: resolved.alias_of.clone(),
                },
            ))
        })
        .collect()
}

fn normalize_at(path: &str, value: &TokenValue) -> UnitsResult<TokenValue> {
    match normalize_dimension(value) {
        Ok(Some(length)) => Ok(TokenValue::Text(length)),
        Ok(None) => Err(DimensionTransformError::invalid_value(path, value)),
        Err(cause) => Err(DimensionTransformError {
            path: path.to_string(),
            cause,
        }),
    }
}

/// CSS length for a dimension value, `None` when the value is not a length
pub fn normalize_dimension(value: &TokenValue) -> Result<Option<String>, String> {
    match value {
        TokenValue::Number(n) => normalize_text(&n.to_string()),
        TokenValue::Text(text) => normalize_text(text),
        TokenValue::Structured(Value::Object(fields)) => {
            let amount = match fields.get("value") {
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::String(s)) => s.clone(),
                _ => return Ok(None),
            };
            match fields.get("unit") {
                Some(Value::String(unit)) => normalize_text(&format!("{}{}", amount, unit)),
                None => normalize_text(&amount),
                Some(_) => Ok(None),
            }
        }
        TokenValue::Structured(_) => Ok(None),
    }
}

fn normalize_text(text: &str) -> Result<Option<String>, String> {
    let Some(captures) = length_pattern()?.captures(text) else {
        return Ok(None);
    };

    Ok(Some(if captures.get(1).is_some() {
        text.to_string()
    } else {
        format!("{}{}", text, DEFAULT_UNIT)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TokenGroup;
    use crate::resolution::resolve;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn dimension(value: serde_json::Value) -> FlatTokenMap {
        let group = TokenGroup::from_json(&json!({
            "SPACING": {"BASE": {"value": value, "type": "dimension"}}
        }))
        .unwrap();
        resolve(&group).unwrap()
    }

    fn base_value(map: &FlatTokenMap) -> TokenValue {
        map.get("SPACING.BASE").unwrap().value.clone()
    }

    #[test]
    fn normalizes_numbers_and_bare_strings() {
        let cases = [
            (json!(16), "16px"),
            (json!("16"), "16px"),
            (json!("16px"), "16px"),
            (json!("1.5rem"), "1.5rem"),
            (json!(-4), "-4px"),
            (json!("50%"), "50%"),
            (json!("100vmin"), "100vmin"),
            (json!({"value": 2, "unit": "em"}), "2em"),
            (json!({"value": 8}), "8px"),
        ];

        for (input, expected) in cases {
            let map = transform_dimensions(&dimension(input.clone())).unwrap();
            assert_eq!(base_value(&map), TokenValue::text(expected), "input {}", input);
        }
    }

    #[test]
    fn rejects_unknown_units() {
        let err = transform_dimensions(&dimension(json!("16pt"))).unwrap_err();
        assert_eq!(err.path, "SPACING.BASE");
        assert_eq!(err.cause, "Invalid dimension value: 16pt");
        assert_eq!(err.error_code(), codes::units::INVALID_DIMENSION);

        for bad in [json!("auto"), json!("16 px"), json!([1, 2]), json!({"value": 1, "unit": "pt"})] {
            assert_matches!(transform_dimensions(&dimension(bad)), Err(DimensionTransformError { .. }));
        }
    }

    #[test]
    fn only_plain_ascii_decimals_are_lengths() {
        for bad in [json!("١٦"), json!("١٦px"), json!(" 16 "), json!("16\n"), json!("\t1rem")] {
            assert_matches!(transform_dimensions(&dimension(bad)), Err(DimensionTransformError { .. }));
        }
    }

    #[test]
    fn exponent_numbers_are_rejected() {
        let err = transform_dimensions(&dimension(json!(1e21))).unwrap_err();
        assert_eq!(err.path, "SPACING.BASE");
        assert_eq!(err.error_code(), codes::units::INVALID_DIMENSION);

        assert_matches!(transform_dimensions(&dimension(json!({"value": 1e21}))), Err(DimensionTransformError { .. }));
        assert_matches!(transform_dimensions(&dimension(json!("1e3px"))), Err(DimensionTransformError { .. }));

        let fractional = transform_dimensions(&dimension(json!(0.5))).unwrap();
        assert_eq!(base_value(&fractional), TokenValue::text("0.5px"));
    }

    #[test]
    fn transform_is_idempotent() {
        let once = transform_dimensions(&dimension(json!(16))).unwrap();
        let twice = transform_dimensions(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn non_dimension_tokens_pass_through() {
        let group = TokenGroup::from_json(&json!({
            "COLORS": {"PRIMARY": {"value": "#0000ff", "type": "color"}},
            "WEIGHT": {"value": 700, "type": "fontWeight"},
            "LABEL": {"value": "16"}
        }))
        .unwrap();
        let map = resolve(&group).unwrap();
        assert_eq!(transform_dimensions(&map).unwrap(), map);
    }

    #[test]
    fn normalizes_overrides_and_annotates_errors() {
        let group = TokenGroup::from_json(&json!({
            "GAP": {
                "value": 8,
                "type": "dimension",
                "themes": {"compact": 4},
                "breakpoints": {"lg": "1.5rem"}
            }
        }))
        .unwrap();
        let map = transform_dimensions(&resolve(&group).unwrap()).unwrap();
        let gap = map.get("GAP").unwrap();
        assert_eq!(gap.theme_values.get("compact").unwrap().value, TokenValue::text("4px"));
        assert_eq!(gap.breakpoint_values.get("lg").unwrap().value, TokenValue::text("1.5rem"));

        let broken = TokenGroup::from_json(&json!({
            "GAP": {"value": 8, "type": "dimension", "breakpoints": {"lg": "wide"}}
        }))
        .unwrap();
        let err = transform_dimensions(&resolve(&broken).unwrap()).unwrap_err();
        assert_eq!(err.path, "GAP[lg]");
    }

    #[test]
    fn aliased_dimensions_keep_alias_target() {
        let group = TokenGroup::from_json(&json!({
            "BASE": {"value": 4, "type": "dimension"},
            "GAP": {"value": "{BASE}"}
        }))
        .unwrap();
        let map = transform_dimensions(&resolve(&group).unwrap()).unwrap();
        let gap = map.get("GAP").unwrap();
        assert_eq!(gap.value, TokenValue::text("4px"));
        assert_eq!(gap.alias_of.as_deref(), Some("BASE"));
    }
}
