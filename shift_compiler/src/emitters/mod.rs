//! Output emitters
//!
//! Each emitter is a pure function over the final [`FlatTokenMap`]. The
//! [`EmitterRegistry`] maps an [`OutputFormat`] to its emitter so callers can
//! render whatever formats the project asks for.

pub mod css;
pub mod error;
mod nested;
pub mod typescript;
pub mod typescript_vars;

pub use css::{format_css, format_css_with_breakpoints, CssEmitter};
pub use error::{FormatError, FormatErrorKind, FormatResult};
pub use typescript::{format_typescript, TypeScriptEmitter};
pub use typescript_vars::{format_typescript_vars, TypeScriptVarsEmitter};

use crate::logging::codes;
use crate::model::{BreakpointConfig, FlatTokenMap, ThemeConfig};
use crate::{log_error, log_success};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    #[serde(rename = "css")]
    Css,
    #[serde(rename = "ts")]
    TypeScript,
    #[serde(rename = "ts-vars")]
    TypeScriptVars,
}

impl OutputFormat {
    pub fn all() -> &'static [OutputFormat] {
        &[
            OutputFormat::Css,
            OutputFormat::TypeScript,
            OutputFormat::TypeScriptVars,
        ]
    }

    /// Name used in `shift.toml` and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Css => "css",
            OutputFormat::TypeScript => "ts",
            OutputFormat::TypeScriptVars => "ts-vars",
        }
    }

    /// Suffix appended to the output basename
    pub fn file_suffix(&self) -> &'static str {
        match self {
            OutputFormat::Css => "css",
            OutputFormat::TypeScript => "ts",
            OutputFormat::TypeScriptVars => "vars.ts",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|format| format.name() == name)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            let known: Vec<_> = Self::all().iter().map(OutputFormat::name).collect();
            format!("unknown output format '{}' (expected one of: {})", s, known.join(", "))
        })
    }
}

/// Build inputs shared by every emitter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitterContext {
    pub themes: Option<ThemeConfig>,
    pub breakpoints: Option<BreakpointConfig>,
}

impl EmitterContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty maps are treated as not configured
    pub fn with_themes(mut self, themes: ThemeConfig) -> Self {
        self.themes = (!themes.is_empty()).then_some(themes);
        self
    }

    pub fn with_breakpoints(mut self, breakpoints: BreakpointConfig) -> Self {
        self.breakpoints = (!breakpoints.is_empty()).then_some(breakpoints);
        self
    }
}

pub trait Emitter: Send + Sync {
    fn format(&self) -> OutputFormat;

    fn emit(&self, map: &FlatTokenMap, ctx: &EmitterContext) -> FormatResult<String>;
}

pub struct EmitterRegistry {
    emitters: Vec<Box<dyn Emitter>>,
}

impl EmitterRegistry {
    /// A registry with no emitters
    pub fn empty() -> Self {
        Self {
            emitters: Vec::new(),
        }
    }

    /// The built-in CSS, TypeScript and TypeScript-vars emitters
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(CssEmitter));
        registry.register(Box::new(TypeScriptEmitter));
        registry.register(Box::new(TypeScriptVarsEmitter));
        registry
    }

    /// Register an emitter, replacing any existing one for the same format
    pub fn register(&mut self, emitter: Box<dyn Emitter>) {
        let format = emitter.format();
        match self.emitters.iter().position(|e| e.format() == format) {
            Some(index) => self.emitters[index] = emitter,
            None => self.emitters.push(emitter),
        }
    }

    pub fn get(&self, format: OutputFormat) -> Option<&dyn Emitter> {
        self.emitters
            .iter()
            .find(|e| e.format() == format)
            .map(|e| e.as_ref())
    }

    pub fn formats(&self) -> Vec<OutputFormat> {
        self.emitters.iter().map(|e| e.format()).collect()
    }

    pub fn emit(
        &self,
        format: OutputFormat,
        map: &FlatTokenMap,
        ctx: &EmitterContext,
    ) -> FormatResult<String> {
        let result = self
            .get(format)
            .ok_or_else(|| FormatError::unsupported(format))
            .and_then(|emitter| emitter.emit(map, ctx));

        match &result {
            Ok(text) => log_success!(codes::success::EMIT_COMPLETE, "Output rendered",
                "format" => format,
                "bytes" => text.len()
            ),
            Err(err) => log_error!(err.error_code(), &err.to_string(),
                "stage" => "emit",
                "format" => format
            ),
        }

        result
    }
}

impl Default for EmitterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawToken, TokenGroup, TokenType};
    use crate::resolution::resolve;
    use assert_matches::assert_matches;

    struct UpperCss;

    impl Emitter for UpperCss {
        fn format(&self) -> OutputFormat {
            OutputFormat::Css
        }

        fn emit(&self, map: &FlatTokenMap, ctx: &EmitterContext) -> FormatResult<String> {
            Ok(CssEmitter.emit(map, ctx)?.to_uppercase())
        }
    }

    fn sample() -> FlatTokenMap {
        let group = TokenGroup::new().with_group(
            "COLORS",
            TokenGroup::new().with_token(
                "BG",
                RawToken::new("#fff")
                    .with_type(TokenType::Color)
                    .with_theme("dark", "#000"),
            ),
        );
        resolve(&group).unwrap()
    }

    #[test]
    fn format_names_and_suffixes() {
        assert_eq!("ts-vars".parse::<OutputFormat>(), Ok(OutputFormat::TypeScriptVars));
        assert!("scss".parse::<OutputFormat>().unwrap_err().contains("css, ts, ts-vars"));
        assert_eq!(OutputFormat::TypeScriptVars.file_suffix(), "vars.ts");
        assert_eq!(
            serde_json::to_string(&OutputFormat::TypeScript).unwrap(),
            "\"ts\""
        );
    }

    #[test]
    fn registry_ships_builtins() {
        let registry = EmitterRegistry::new();
        assert_eq!(registry.formats(), OutputFormat::all().to_vec());

        let ctx = EmitterContext::new().with_themes(ThemeConfig::new().with("dark", ".dark".to_string()));
        let css = registry.emit(OutputFormat::Css, &sample(), &ctx).unwrap();
        assert!(css.contains(".dark {\n  --colors-bg: #000;\n}"));
    }

    #[test]
    fn register_replaces_by_format() {
        let mut registry = EmitterRegistry::new();
        registry.register(Box::new(UpperCss));
        assert_eq!(registry.formats().len(), 3);

        let css = registry
            .emit(OutputFormat::Css, &sample(), &EmitterContext::new())
            .unwrap();
        assert!(css.starts_with(":ROOT {"));
    }

    #[test]
    fn missing_emitter_is_unsupported() {
        let registry = EmitterRegistry::empty();
        let err = registry
            .emit(OutputFormat::TypeScript, &sample(), &EmitterContext::new())
            .unwrap_err();
        assert_matches!(err.kind, FormatErrorKind::Unsupported);
        assert_eq!(err.error_code(), codes::emit::UNSUPPORTED_FORMAT);
    }

    #[test]
    fn empty_maps_are_not_configured() {
        let ctx = EmitterContext::new()
            .with_themes(ThemeConfig::new())
            .with_breakpoints(BreakpointConfig::new());
        assert_eq!(ctx, EmitterContext::default());
    }
}
