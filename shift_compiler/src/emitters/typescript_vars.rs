//! TypeScript constants whose leaves are CSS variable references

use super::error::FormatResult;
use super::nested::{build_nested, export_const};
use super::{Emitter, EmitterContext, OutputFormat};
use crate::model::FlatTokenMap;
use crate::utils::css_var_reference;
use serde_json::Value;

const FORMAT: OutputFormat = OutputFormat::TypeScriptVars;

#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScriptVarsEmitter;

impl Emitter for TypeScriptVarsEmitter {
    fn format(&self) -> OutputFormat {
        FORMAT
    }

    fn emit(&self, map: &FlatTokenMap, _ctx: &EmitterContext) -> FormatResult<String> {
        format_typescript_vars(map)
    }
}

/// Overrides are ignored; the variables switch values through CSS
pub fn format_typescript_vars(map: &FlatTokenMap) -> FormatResult<String> {
    let tokens = build_nested(
        map.iter().map(|token| {
            (
                token.raw_path.as_slice(),
                Value::String(css_var_reference(&token.key)),
            )
        }),
        FORMAT,
    )?;

    Ok(format!("{}\n", export_const("tokens", &tokens, FORMAT)?))
}
