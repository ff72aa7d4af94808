//! CSS custom-property stylesheet

use super::error::{FormatError, FormatResult};
use super::{Emitter, EmitterContext, OutputFormat};
use crate::model::{
    BreakpointConfig, FlatTokenMap, NamedMap, ResolvedToken, ResolvedValue, ThemeConfig, TokenValue,
};
use crate::utils::{css_var_reference, css_variable_name};

const INDENT: &str = "  ";

#[derive(Debug, Default, Clone, Copy)]
pub struct CssEmitter;

impl Emitter for CssEmitter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Css
    }

    fn emit(&self, map: &FlatTokenMap, ctx: &EmitterContext) -> FormatResult<String> {
        format_css_with_breakpoints(map, ctx.themes.as_ref(), ctx.breakpoints.as_ref())
    }
}

/// `:root` block followed by one block per theme with overrides
pub fn format_css(map: &FlatTokenMap, themes: Option<&ThemeConfig>) -> FormatResult<String> {
    format_css_with_breakpoints(map, themes, None)
}

/// As [`format_css`], plus `@media` blocks for breakpoint overrides
pub fn format_css_with_breakpoints(
    map: &FlatTokenMap,
    themes: Option<&ThemeConfig>,
    breakpoints: Option<&BreakpointConfig>,
) -> FormatResult<String> {
    let mut blocks = Vec::new();

    let root: Vec<String> = map
        .iter()
        .map(|token| declaration(&token.key, &css_value(token, token.alias_of.as_deref(), &token.value)))
        .collect();
    blocks.push(block(":root", &root, ""));

    for (name, selector) in themes.into_iter().flat_map(|configured| configured.iter()) {
        if selector.trim().is_empty() {
            return Err(FormatError::serialization(
                OutputFormat::Css,
                format!("theme '{}' has an empty selector", name),
            ));
        }
        let declarations = override_declarations(map, name, |token| &token.theme_values);
        if !declarations.is_empty() {
            blocks.push(block(selector, &declarations, ""));
        }
    }

    for (name, condition) in breakpoints.into_iter().flat_map(|configured| configured.iter()) {
        if condition.trim().is_empty() {
            return Err(FormatError::serialization(
                OutputFormat::Css,
                format!("breakpoint '{}' has an empty media condition", name),
            ));
        }
        let declarations = override_declarations(map, name, |token| &token.breakpoint_values);
        if !declarations.is_empty() {
            let inner = block(":root", &declarations, INDENT);
            blocks.push(format!("@media {} {{\n{}\n}}", condition, inner));
        }
    }

    Ok(format!("{}\n", blocks.join("\n\n")))
}

fn override_declarations<F>(map: &FlatTokenMap, name: &str, overrides: F) -> Vec<String>
where
    F: Fn(&ResolvedToken) -> &NamedMap<ResolvedValue>,
{
    map.iter()
        .filter_map(|token| {
            overrides(token).get(name).map(|resolved| {
                declaration(&token.key, &css_value(token, resolved.alias_of.as_deref(), &resolved.value))
            })
        })
        .collect()
}

fn css_value(token: &ResolvedToken, alias_of: Option<&str>, value: &TokenValue) -> String {
    match alias_of {
        Some(target) => css_var_reference(target),
        None => value.to_css(token.token_type),
    }
}

fn declaration(key: &str, value: &str) -> String {
    format!("{}: {};", css_variable_name(key), value)
}

fn block(selector: &str, declarations: &[String], indent: &str) -> String {
    let mut out = format!("{}{} {{\n", indent, selector);
    for line in declarations {
        out.push_str(indent);
        out.push_str(INDENT);
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(indent);
    out.push('}');
    out
}
