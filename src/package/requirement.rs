//! Requirement strings declared by transient packages.

use std::fmt;

/// Characters that mark a version string as an explicit specifier.
const SPECIFIER_CHARS: [char; 6] = ['!', ',', '<', '=', '>', '~'];

/// Returns true if the version string already carries specifier operators.
pub fn has_specifier(version: &str) -> bool {
    version.contains(SPECIFIER_CHARS)
}

/// Turn a user supplied version into a specifier.
///
/// A bare version such as `1.2.3` becomes `==1.2.3`; anything containing an
/// operator (`>=1.0,<2.0`, `~=1.4`, `!=2.0`) is used verbatim.
pub fn normalize_specifier(version: &str) -> String {
    let version = version.trim();
    if has_specifier(version) {
        version.to_string()
    } else {
        format!("=={}", version)
    }
}

/// A dependency declaration: target name with an optional specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub specifier: Option<String>,
}

impl Requirement {
    pub fn new(name: impl Into<String>, version: Option<&str>) -> Self {
        Self {
            name: name.into(),
            specifier: version.map(normalize_specifier),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.specifier {
            Some(specifier) => write!(f, "{}{}", self.name, specifier),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_version_becomes_exact_match() {
        assert_eq!(normalize_specifier("1.2.3"), "==1.2.3");
        assert_eq!(normalize_specifier(" 2.0 "), "==2.0");
    }

    #[test]
    fn test_specifiers_are_kept() {
        for spec in [">=1.0,<2.0", "~=1.4", "!=2.0", "<3", "==1.0", ">1"] {
            assert!(has_specifier(spec), "{} should be a specifier", spec);
            assert_eq!(normalize_specifier(spec), spec);
        }
    }

    #[test]
    fn test_requirement_display() {
        assert_eq!(Requirement::new("bar", None).to_string(), "bar");
        assert_eq!(
            Requirement::new("bar", Some("2.0.0")).to_string(),
            "bar==2.0.0"
        );
        assert_eq!(
            Requirement::new("bar", Some(">=1.0,<2.0")).to_string(),
            "bar>=1.0,<2.0"
        );
    }
}
