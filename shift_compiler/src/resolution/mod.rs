//! Alias resolution and flattening
//!
//! Walks the validated document depth-first in document order, producing one
//! [`ResolvedToken`] per leaf. Aliases of the form `{GROUP.TOKEN}` are followed
//! transitively to a concrete value while `alias_of` keeps the immediate
//! target. Theme and breakpoint overrides are resolved independently of the
//! default value.

mod aliases;
pub mod error;

pub use error::{ResolutionError, ResolutionResult};

use crate::config::compile_time::tokens::{MAX_ALIAS_DEPTH, MAX_TOKENS};
use crate::logging::codes;
use crate::model::{FlatTokenMap, NamedMap, ResolvedToken, ResolvedValue, TokenGroup, TokenNode, TokenValue};
use crate::{log_debug, log_error, log_success};
use aliases::{AliasResolver, FlatEntry};

/// Input-size bounds for a single resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionLimits {
    pub max_tokens: usize,
    pub max_alias_depth: usize,
}

impl Default for ResolutionLimits {
    fn default() -> Self {
        Self {
            max_tokens: MAX_TOKENS,
            max_alias_depth: MAX_ALIAS_DEPTH,
        }
    }
}

/// Resolve and flatten `group` under the build's limits
pub fn resolve(group: &TokenGroup) -> ResolutionResult<FlatTokenMap> {
    resolve_with_limits(group, ResolutionLimits::default())
}

pub fn resolve_with_limits(
    group: &TokenGroup,
    limits: ResolutionLimits,
) -> ResolutionResult<FlatTokenMap> {
    resolve_inner(group, limits).map_err(|err| {
        match err.path() {
            Some(path) => log_error!(err.error_code(), &err.to_string(),
                path = path,
                "stage" => "resolution"
            ),
            None => log_error!(err.error_code(), &err.to_string(),
                "stage" => "resolution"
            ),
        }
        err
    })
}

fn resolve_inner(group: &TokenGroup, limits: ResolutionLimits) -> ResolutionResult<FlatTokenMap> {
    let count = group.leaf_count();
    if count > limits.max_tokens {
        return Err(ResolutionError::TooManyTokens {
            count,
            max: limits.max_tokens,
        });
    }

    let mut entries = Vec::with_capacity(count);
    flatten(group, &mut Vec::new(), &mut entries);

    let mut resolver = AliasResolver::new(&entries, limits.max_alias_depth);
    let mut map = FlatTokenMap::new();

    for (position, entry) in entries.iter().enumerate() {
        let concrete = resolver.default_of(position)?;

        let mut token = ResolvedToken::new(
            entry.raw_path.clone(),
            concrete.value,
            concrete.token_type.unwrap_or_default(),
        );
        token.alias_of = entry.token.value.alias_target().map(str::to_string);
        token.category = entry.token.category.clone();
        token.description = entry.token.description.clone();
        token.theme_values = resolve_overrides(&mut resolver, position, &entry.token.themes)?;
        token.breakpoint_values =
            resolve_overrides(&mut resolver, position, &entry.token.breakpoints)?;

        map.insert(token);
    }

    log_success!(codes::success::RESOLUTION_COMPLETE, "Tokens resolved",
        "tokens" => map.len(),
        "aliases" => map.alias_count(),
        "theme_overrides" => map.theme_override_count(),
        "breakpoint_overrides" => map.breakpoint_override_count()
    );

    Ok(map)
}

fn resolve_overrides(
    resolver: &mut AliasResolver<'_>,
    position: usize,
    overrides: &NamedMap<TokenValue>,
) -> ResolutionResult<NamedMap<ResolvedValue>> {
    let mut resolved = NamedMap::new();
    for (name, value) in overrides.iter() {
        resolved.insert(name, resolver.resolve_override(position, name, value)?);
    }
    Ok(resolved)
}

fn flatten<'a>(group: &'a TokenGroup, prefix: &mut Vec<String>, out: &mut Vec<FlatEntry<'a>>) {
    for (key, node) in group.iter() {
        prefix.push(key.to_string());
        match node {
            TokenNode::Token(token) => {
                log_debug!("Flattened token", "path" => prefix.join("."));
                out.push(FlatEntry {
                    key: prefix.join("."),
                    raw_path: prefix.clone(),
                    token,
                });
            }
            TokenNode::Group(child) => flatten(child, prefix, out),
        }
        prefix.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawToken, TokenType};
    use assert_matches::assert_matches;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> TokenGroup {
        TokenGroup::from_json(&value).unwrap()
    }

    #[test]
    fn flattens_every_leaf_in_document_order() {
        let group = doc(json!({
            "SPACING": {"SPACING_2": {"value": 16, "type": "dimension"}},
            "COLORS": {
                "PRIMARY": {"value": "#0000ff", "type": "color"},
                "GRAY": {"100": {"value": "#f5f5f5"}, "900": {"value": "#111111"}}
            }
        }));

        let map = resolve(&group).unwrap();
        assert_eq!(map.len(), group.leaf_count());
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(
            keys,
            vec!["SPACING.SPACING_2", "COLORS.PRIMARY", "COLORS.GRAY.100", "COLORS.GRAY.900"]
        );

        let gray = map.get("COLORS.GRAY.900").unwrap();
        assert_eq!(gray.path, "COLORS-GRAY-900");
        assert_eq!(gray.raw_path, vec!["COLORS", "GRAY", "900"]);
        assert_eq!(gray.token_type, TokenType::String);
        assert_eq!(gray.alias_of, None);
    }

    #[test]
    fn follows_alias_chains_and_records_immediate_target() {
        let group = doc(json!({
            "COLORS": {
                "BLUE": {"value": "#0000ff", "type": "color"},
                "PRIMARY": {"value": "{COLORS.BLUE}"},
                "LINK": {"value": "{COLORS.PRIMARY}", "description": "Links"}
            }
        }));

        let map = resolve(&group).unwrap();
        let link = map.get("COLORS.LINK").unwrap();
        assert_eq!(link.value, TokenValue::text("#0000ff"));
        assert_eq!(link.alias_of.as_deref(), Some("COLORS.PRIMARY"));
        assert_eq!(link.token_type, TokenType::Color);
        assert_eq!(link.description.as_deref(), Some("Links"));
        assert_eq!(map.alias_count(), 2);
    }

    #[test]
    fn forward_references_resolve() {
        let group = doc(json!({
            "A": {"value": "{B}"},
            "B": {"value": 4}
        }));
        let map = resolve(&group).unwrap();
        assert_eq!(map.get("A").unwrap().value, TokenValue::integer(4));
    }

    #[test]
    fn missing_alias_target() {
        let group = doc(json!({"COLORS": {"LINK": {"value": "{COLORS.NOPE}"}}}));
        assert_eq!(
            resolve(&group).unwrap_err(),
            ResolutionError::AliasResolution {
                path: "COLORS.LINK".to_string(),
                target: "COLORS.NOPE".to_string(),
            }
        );
    }

    #[test]
    fn alias_to_group_is_missing_target() {
        let group = doc(json!({
            "COLORS": {"BLUE": {"value": "#00f"}},
            "LINK": {"value": "{COLORS}"}
        }));
        assert_matches!(resolve(&group), Err(ResolutionError::AliasResolution { .. }));
    }

    #[test]
    fn detects_cycles() {
        let group = doc(json!({
            "A": {"value": "{B}"},
            "B": {"value": "{C}"},
            "C": {"value": "{A}"}
        }));
        let err = resolve(&group).unwrap_err();
        assert_eq!(
            err,
            ResolutionError::AliasCycle {
                path: "A".to_string(),
                chain: vec!["A".into(), "B".into(), "C".into(), "A".into()],
            }
        );
        assert_eq!(err.to_string(), "Alias cycle at \"A\": A -> B -> C -> A");
    }

    #[test]
    fn detects_self_reference() {
        let group = doc(json!({"A": {"value": "{A}"}}));
        assert_matches!(resolve(&group), Err(ResolutionError::AliasCycle { chain, .. }) if chain.len() == 2);
    }

    #[test]
    fn bounds_alias_depth() {
        let group = doc(json!({
            "A": {"value": "{B}"},
            "B": {"value": "{C}"},
            "C": {"value": 1}
        }));
        let limits = ResolutionLimits {
            max_tokens: 10,
            max_alias_depth: 1,
        };
        assert_eq!(
            resolve_with_limits(&group, limits).unwrap_err(),
            ResolutionError::AliasDepthExceeded {
                path: "A".to_string(),
                max: 1
            }
        );

        let relaxed = ResolutionLimits {
            max_alias_depth: 2,
            ..limits
        };
        assert!(resolve_with_limits(&group, relaxed).is_ok());
    }

    #[test]
    fn alias_depth_is_independent_of_document_order() {
        let reversed = doc(json!({
            "C": {"value": 1},
            "B": {"value": "{C}"},
            "A": {"value": "{B}"}
        }));
        let limits = ResolutionLimits {
            max_tokens: 10,
            max_alias_depth: 1,
        };
        assert_eq!(
            resolve_with_limits(&reversed, limits).unwrap_err(),
            ResolutionError::AliasDepthExceeded {
                path: "A".to_string(),
                max: 1
            }
        );

        let relaxed = ResolutionLimits {
            max_alias_depth: 2,
            ..limits
        };
        let map = resolve_with_limits(&reversed, relaxed).unwrap();
        assert_eq!(map.get("A").unwrap().value, TokenValue::integer(1));
    }

    #[test]
    fn bounds_token_count() {
        let group = doc(json!({"A": {"value": 1}, "B": {"value": 2}}));
        let limits = ResolutionLimits {
            max_tokens: 1,
            max_alias_depth: 4,
        };
        assert_eq!(
            resolve_with_limits(&group, limits).unwrap_err(),
            ResolutionError::TooManyTokens { count: 2, max: 1 }
        );
    }

    #[test]
    fn resolves_overrides_against_target_defaults() {
        let group = TokenGroup::new()
            .with_group(
                "COLORS",
                TokenGroup::new()
                    .with_token("BLACK", RawToken::new("#000000").with_theme("dark", "#111111"))
                    .with_token(
                        "BG",
                        RawToken::new("#ffffff")
                            .with_type(TokenType::Color)
                            .with_theme("dark", "{COLORS.BLACK}")
                            .with_theme("sepia", "#f4ecd8")
                            .with_breakpoint("md", "#fafafa"),
                    ),
            );

        let map = resolve(&group).unwrap();
        let bg = map.get("COLORS.BG").unwrap();

        let dark = bg.theme_values.get("dark").unwrap();
        assert_eq!(dark.value, TokenValue::text("#000000"));
        assert_eq!(dark.alias_of.as_deref(), Some("COLORS.BLACK"));

        let sepia = bg.theme_values.get("sepia").unwrap();
        assert_eq!(sepia, &ResolvedValue::literal(TokenValue::text("#f4ecd8")));

        let names: Vec<_> = bg.theme_values.names().collect();
        assert_eq!(names, vec!["dark", "sepia"]);
        assert_eq!(bg.breakpoint_values.len(), 1);
        assert_eq!(map.theme_override_count(), 3);
    }

    #[test]
    fn missing_override_target_is_annotated() {
        let group = TokenGroup::new().with_token(
            "BG",
            RawToken::new("#fff").with_theme("dark", "{MISSING}"),
        );
        assert_eq!(
            resolve(&group).unwrap_err(),
            ResolutionError::AliasResolution {
                path: "BG[dark]".to_string(),
                target: "MISSING".to_string(),
            }
        );
    }

    #[test]
    fn braces_that_are_not_aliases_stay_literal() {
        let group = doc(json!({"A": {"value": "{lower.case}"}, "B": {"value": "a {B} b"}}));
        let map = resolve(&group).unwrap();
        assert_eq!(map.get("A").unwrap().value, TokenValue::text("{lower.case}"));
        assert_eq!(map.get("B").unwrap().alias_of, None);
    }
}
