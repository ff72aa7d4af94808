//! Shared helpers

pub mod path;

pub use path::{css_var_reference, css_variable_name, dot_path, hyphen_path};
