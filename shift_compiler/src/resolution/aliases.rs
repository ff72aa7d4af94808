//! Transitive alias resolution over a flattened document

use super::error::{ResolutionError, ResolutionResult};
use crate::model::{RawToken, ResolvedValue, TokenType, TokenValue};
use crate::utils::path::override_path;
use std::collections::HashMap;

/// A leaf of the document with its position in the tree
pub(crate) struct FlatEntry<'a> {
    pub raw_path: Vec<String>,
    pub key: String,
    pub token: &'a RawToken,
}

/// Concrete default value plus the type it was declared with along the chain
#[derive(Debug, Clone)]
pub(crate) struct Concrete {
    pub value: TokenValue,
    pub token_type: Option<TokenType>,
    /// Alias hops from this entry to its literal value
    pub depth: usize,
}

/// Memoizing resolver; each default value is resolved at most once
pub(crate) struct AliasResolver<'a> {
    entries: &'a [FlatEntry<'a>],
    index: HashMap<&'a str, usize>,
    resolved: Vec<Option<Concrete>>,
    max_depth: usize,
}

impl<'a> AliasResolver<'a> {
    pub fn new(entries: &'a [FlatEntry<'a>], max_depth: usize) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.key.as_str(), position))
            .collect();

        Self {
            entries,
            index,
            resolved: vec![None; entries.len()],
            max_depth,
        }
    }

    /// Concrete default value of the entry at `position`
    pub fn default_of(&mut self, position: usize) -> ResolutionResult<Concrete> {
        let mut in_progress = Vec::new();
        self.resolve_position(position, &mut in_progress)
    }

    /// Resolve one theme or breakpoint override of the entry at `position`.
    /// An aliased override takes the target's default value.
    pub fn resolve_override(
        &mut self,
        position: usize,
        name: &str,
        value: &TokenValue,
    ) -> ResolutionResult<ResolvedValue> {
        let Some(target) = value.alias_target() else {
            return Ok(ResolvedValue::literal(value.clone()));
        };

        let entries = self.entries;
        let target_position = self.index.get(target).copied().ok_or_else(|| {
            ResolutionError::alias_resolution(
                &override_path(&entries[position].key, name),
                target,
            )
        })?;

        let concrete = self.default_of(target_position)?;
        Ok(ResolvedValue::aliased(concrete.value, target))
    }

    fn resolve_position(
        &mut self,
        position: usize,
        in_progress: &mut Vec<usize>,
    ) -> ResolutionResult<Concrete> {
        let entries = self.entries;
        let entry = &entries[position];

        // a cached chain still counts against the depth of the current walk
        if let Some(done) = &self.resolved[position] {
            if in_progress.len() + done.depth > self.max_depth {
                return Err(self.depth_exceeded(in_progress, position));
            }
            return Ok(done.clone());
        }

        if let Some(start) = in_progress.iter().position(|&p| p == position) {
            let mut chain: Vec<String> = in_progress[start..]
                .iter()
                .map(|&p| entries[p].key.clone())
                .collect();
            chain.push(entry.key.clone());
            return Err(ResolutionError::AliasCycle {
                path: entry.key.clone(),
                chain,
            });
        }

        if in_progress.len() > self.max_depth {
            return Err(self.depth_exceeded(in_progress, position));
        }

        let concrete = match entry.token.value.alias_target() {
            None => Concrete {
                value: entry.token.value.clone(),
                token_type: entry.token.token_type,
                depth: 0,
            },
            Some(target) => {
                let target_position = self
                    .index
                    .get(target)
                    .copied()
                    .ok_or_else(|| ResolutionError::alias_resolution(&entry.key, target))?;

                in_progress.push(position);
                let resolved = self.resolve_position(target_position, in_progress);
                in_progress.pop();
                let resolved = resolved?;

                Concrete {
                    value: resolved.value,
                    token_type: entry.token.token_type.or(resolved.token_type),
                    depth: resolved.depth + 1,
                }
            }
        };

        self.resolved[position] = Some(concrete.clone());
        Ok(concrete)
    }

    /// Reported against the token the walk started from
    fn depth_exceeded(&self, in_progress: &[usize], position: usize) -> ResolutionError {
        let origin = in_progress.first().copied().unwrap_or(position);
        ResolutionError::AliasDepthExceeded {
            path: self.entries[origin].key.clone(),
            max: self.max_depth,
        }
    }
}
