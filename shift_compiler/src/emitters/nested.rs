//! Nested object construction from flat token paths

use super::error::{FormatError, FormatResult};
use super::OutputFormat;
use serde_json::{Map, Value};

/// Insert `leaf` at `raw_path`, creating intermediate objects as needed.
/// Existing objects are reused, never overwritten.
pub(crate) fn insert_leaf(
    root: &mut Map<String, Value>,
    raw_path: &[String],
    leaf: Value,
    format: OutputFormat,
) -> FormatResult<()> {
    let Some((last, parents)) = raw_path.split_last() else {
        return Err(FormatError::serialization(format, "token with an empty path"));
    };

    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));

        current = match slot {
            Value::Object(child) => child,
            _ => {
                return Err(FormatError::path_collision(
                    format,
                    format!(
                        "\"{}\" crosses the token at \"{}\"",
                        raw_path.join("."),
                        raw_path[..=depth].join(".")
                    ),
                ))
            }
        };
    }

    if current.contains_key(last) {
        return Err(FormatError::path_collision(
            format,
            format!("\"{}\" collides with an existing group", raw_path.join(".")),
        ));
    }
    current.insert(last.clone(), leaf);
    Ok(())
}

/// Fold `(raw_path, leaf)` pairs into one nested object
pub(crate) fn build_nested<'a, I>(entries: I, format: OutputFormat) -> FormatResult<Map<String, Value>>
where
    I: IntoIterator<Item = (&'a [String], Value)>,
{
    entries
        .into_iter()
        .try_fold(Map::new(), |mut root, (raw_path, leaf)| {
            insert_leaf(&mut root, raw_path, leaf, format)?;
            Ok(root)
        })
}

/// `export const <name> = <json> as const`
pub(crate) fn export_const(name: &str, object: &Map<String, Value>, format: OutputFormat) -> FormatResult<String> {
    let json = serde_json::to_string_pretty(object)
        .map_err(|err| FormatError::serialization(format, err.to_string()))?;
    Ok(format!("export const {} = {} as const", name, json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitters::FormatErrorKind;
    use serde_json::json;

    fn path(dot: &str) -> Vec<String> {
        crate::utils::path::split_dot_path(dot)
    }

    #[test]
    fn builds_intermediate_objects_once() {
        let a = path("COLORS.GRAY.100");
        let b = path("COLORS.GRAY.900");
        let c = path("SPACING");
        let object = build_nested(
            vec![
                (a.as_slice(), json!("#f5f5f5")),
                (b.as_slice(), json!("#111111")),
                (c.as_slice(), json!("4px")),
            ],
            OutputFormat::TypeScript,
        )
        .unwrap();

        assert_eq!(
            Value::Object(object),
            json!({"COLORS": {"GRAY": {"100": "#f5f5f5", "900": "#111111"}}, "SPACING": "4px"})
        );
    }

    #[test]
    fn leaf_over_group_is_a_collision() {
        let mut root = Map::new();
        insert_leaf(&mut root, &path("A.B"), json!(1), OutputFormat::TypeScript).unwrap();

        let err = insert_leaf(&mut root, &path("A"), json!(2), OutputFormat::TypeScript).unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::PathCollision);

        let err = insert_leaf(&mut root, &path("A.B.C"), json!(3), OutputFormat::TypeScript).unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::PathCollision);
        assert!(err.cause.contains("\"A.B\""));
    }

    #[test]
    fn export_const_uses_two_space_indentation() {
        let mut object = Map::new();
        object.insert("A".to_string(), json!(1));
        assert_eq!(
            export_const("tokens", &object, OutputFormat::TypeScript).unwrap(),
            "export const tokens = {\n  \"A\": 1\n} as const"
        );
    }
}
