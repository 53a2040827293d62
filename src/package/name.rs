//! Distribution name handling.

/// Normalize a distribution name for comparison.
///
/// Lowercases the name and collapses every run of `-`, `_` and `.` into a
/// single `-`, so `Foo_Bar`, `foo.bar` and `foo--bar` all compare equal.
pub fn normalize(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                normalized.push('-');
                in_separator = true;
            }
        } else {
            normalized.extend(c.to_lowercase());
            in_separator = false;
        }
    }
    normalized
}

/// Escape a name or version for use in wheel file and `.dist-info` names,
/// where `-` separates components.
pub fn escape(component: &str) -> String {
    component.replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_case_and_separators() {
        assert_eq!(normalize("Foo_Bar"), "foo-bar");
        assert_eq!(normalize("foo.bar"), "foo-bar");
        assert_eq!(normalize("foo--_.bar"), "foo-bar");
        assert_eq!(normalize("requests"), "requests");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("my-package"), "my_package");
        assert_eq!(escape("foo"), "foo");
        assert_eq!(escape("already_ok"), "already_ok");
    }
}
