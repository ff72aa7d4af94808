//! Token model: raw documents, resolved tokens and build configuration maps

pub mod named_map;
pub mod raw;
pub mod resolved;
pub mod value;

pub use named_map::NamedMap;
pub use raw::{is_token_leaf, DocumentError, RawToken, TokenGroup, TokenNode};
pub use resolved::{FlatTokenMap, ResolvedToken, ResolvedValue};
pub use value::{is_valid_token_name, parse_alias, TokenType, TokenValue};

/// Theme name to CSS selector, in configuration order
pub type ThemeConfig = NamedMap<String>;

/// Breakpoint name to media condition, in configuration order
pub type BreakpointConfig = NamedMap<String>;
