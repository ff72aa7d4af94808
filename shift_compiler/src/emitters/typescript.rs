//! TypeScript constants with concrete values

use super::error::FormatResult;
use super::nested::{build_nested, export_const};
use super::{Emitter, EmitterContext, OutputFormat};
use crate::model::{FlatTokenMap, ThemeConfig};
use serde_json::{Map, Value};

const FORMAT: OutputFormat = OutputFormat::TypeScript;

#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScriptEmitter;

impl Emitter for TypeScriptEmitter {
    fn format(&self) -> OutputFormat {
        FORMAT
    }

    fn emit(&self, map: &FlatTokenMap, ctx: &EmitterContext) -> FormatResult<String> {
        format_typescript(map, ctx.themes.as_ref())
    }
}

/// `export const tokens`, plus `export const themes` when any configured theme
/// is overridden
pub fn format_typescript(map: &FlatTokenMap, themes: Option<&ThemeConfig>) -> FormatResult<String> {
    let tokens = build_nested(
        map.iter()
            .map(|token| (token.raw_path.as_slice(), token.value.to_json())),
        FORMAT,
    )?;

    let mut statements = vec![export_const("tokens", &tokens, FORMAT)?];

    if let Some(themes) = themes {
        let overrides = theme_objects(map, themes)?;
        if !overrides.is_empty() {
            statements.push(export_const("themes", &overrides, FORMAT)?);
        }
    }

    Ok(format!("{}\n", statements.join("\n\n")))
}

/// Theme name to nested override object, themes without overrides left out
fn theme_objects(map: &FlatTokenMap, themes: &ThemeConfig) -> FormatResult<Map<String, Value>> {
    themes
        .names()
        .try_fold(Map::new(), |mut objects, name| {
            let overridden = build_nested(
                map.iter().filter_map(|token| {
                    token
                        .theme_values
                        .get(name)
                        .map(|resolved| (token.raw_path.as_slice(), resolved.value.to_json()))
                }),
                FORMAT,
            )?;
            if !overridden.is_empty() {
                objects.insert(name.to_string(), Value::Object(overridden));
            }
            Ok(objects)
        })
}
