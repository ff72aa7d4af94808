//! Token path helpers shared by the resolver and emitters

/// `["COLORS", "PRIMARY"]` → `COLORS.PRIMARY`
pub fn dot_path<S: AsRef<str>>(segments: &[S]) -> String {
    join(segments, ".")
}

/// `["COLORS", "PRIMARY"]` → `COLORS-PRIMARY`
pub fn hyphen_path<S: AsRef<str>>(segments: &[S]) -> String {
    join(segments, "-")
}

/// Split a dot-path back into its segments
pub fn split_dot_path(path: &str) -> Vec<String> {
    path.split('.').map(str::to_string).collect()
}

/// Dot-path child of `prefix`; an empty prefix yields `key` alone
pub fn child_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Path annotated with an override name: `COLORS.BG[dark]`
pub fn override_path(path: &str, name: &str) -> String {
    format!("{}[{}]", path, name)
}

/// CSS custom property name for a dot-path: `COLORS.PRIMARY` → `--colors-primary`
pub fn css_variable_name(dot_path: &str) -> String {
    format!("--{}", dot_path.replace('.', "-").to_lowercase())
}

/// `var(--colors-primary)` for `COLORS.PRIMARY`
pub fn css_var_reference(dot_path: &str) -> String {
    format!("var({})", css_variable_name(dot_path))
}

fn join<S: AsRef<str>>(segments: &[S], separator: &str) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_joins() {
        let segments = ["COLORS", "BG", "SURFACE"];
        assert_eq!(dot_path(&segments), "COLORS.BG.SURFACE");
        assert_eq!(hyphen_path(&segments), "COLORS-BG-SURFACE");
        assert_eq!(split_dot_path("COLORS.BG.SURFACE"), segments.to_vec());
        assert_eq!(child_path("", "COLORS"), "COLORS");
        assert_eq!(child_path("COLORS", "BG"), "COLORS.BG");
        assert_eq!(override_path("COLORS.BG", "dark"), "COLORS.BG[dark]");
    }

    #[test]
    fn test_css_names_keep_underscores() {
        assert_eq!(css_variable_name("COLORS.PRIMARY"), "--colors-primary");
        assert_eq!(css_variable_name("SPACING.SPACING_2"), "--spacing-spacing_2");
        assert_eq!(css_var_reference("COLORS.PRIMARY"), "var(--colors-primary)");
    }
}
