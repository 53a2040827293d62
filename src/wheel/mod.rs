//! Transient wheel synthesis.
//!
//! A transient wheel holds nothing but a `.dist-info` directory: `METADATA`
//! declaring the requirements, `WHEEL` carrying the generator marker, an empty
//! `top_level.txt` and the `RECORD`. Installing it pulls in whatever the
//! requirements name and nothing else.

mod metadata;
mod writer;

use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};

use crate::package::name::escape;
use crate::runtime::Runtime;

pub use metadata::{
    GENERATOR_NAME, GENERATOR_VERSION, TRANSIENT_GENERATOR, is_transient, render_metadata,
    render_wheel,
};

/// Tag for pure Python wheels that run on any Python 3.
pub const DEFAULT_TAG: &str = "py3-none-any";

/// Everything that ends up in a transient wheel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelSpec {
    pub name: String,
    pub version: String,
    /// Requirement strings, written in this order
    pub requirements: Vec<String>,
    pub tag: String,
}

impl WheelSpec {
    pub fn new(name: impl Into<String>, version: impl Into<String>, requirements: Vec<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            requirements,
            tag: DEFAULT_TAG.to_string(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// `{name}-{version}-{tag}.whl`
    pub fn file_name(&self) -> String {
        format!(
            "{}-{}-{}.whl",
            escape(&self.name),
            escape(&self.version),
            self.tag
        )
    }

    /// `{name}-{version}.dist-info`
    pub fn dist_info_dir(&self) -> String {
        format!("{}-{}.dist-info", escape(&self.name), escape(&self.version))
    }
}

/// Build a transient wheel for `spec` inside `output_dir` and return its path.
///
/// The metadata files are staged in a scratch directory which is removed
/// before returning. An existing wheel with the same name is overwritten.
#[tracing::instrument(skip(runtime, spec))]
pub fn synthesize<R: Runtime>(runtime: &R, spec: &WheelSpec, output_dir: &Path) -> Result<PathBuf> {
    let wheel_path = output_dir.join(spec.file_name());
    let dist_info_name = spec.dist_info_dir();

    let scratch = tempfile::Builder::new()
        .prefix("transient-package-")
        .tempdir()
        .context("Failed to create scratch directory")?;
    debug!("Staging {} in {:?}", dist_info_name, scratch.path());

    let dist_info = scratch.path().join(&dist_info_name);
    runtime.create_dir_all(&dist_info)?;
    runtime
        .write(&dist_info.join("METADATA"), render_metadata(spec).as_bytes())
        .context("Failed to write METADATA")?;
    runtime
        .write(
            &dist_info.join("top_level.txt"),
            metadata::render_top_level().as_bytes(),
        )
        .context("Failed to write top_level.txt")?;
    runtime
        .write(&dist_info.join("WHEEL"), render_wheel(spec).as_bytes())
        .context("Failed to write WHEEL")?;

    writer::pack_directory(runtime, scratch.path(), &dist_info_name, &wheel_path)?;

    scratch
        .close()
        .context("Failed to remove scratch directory")?;

    debug!("Wrote {:?}", wheel_path);
    Ok(wheel_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::RealRuntime;
    use std::fs;
    use std::io::Read;
    use tempfile::tempdir;
    use zip::ZipArchive;

    fn read_member(wheel: &Path, name: &str) -> String {
        let mut archive = ZipArchive::new(fs::File::open(wheel).unwrap()).unwrap();
        let mut text = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        text
    }

    #[test]
    fn test_file_names() {
        let spec = WheelSpec::new("foo", "0.0.0", vec![]);
        assert_eq!(spec.file_name(), "foo-0.0.0-py3-none-any.whl");
        assert_eq!(spec.dist_info_dir(), "foo-0.0.0.dist-info");

        let spec = WheelSpec::new("my-pkg", "1.0", vec![]).with_tag("py2.py3-none-any");
        assert_eq!(spec.file_name(), "my_pkg-1.0-py2.py3-none-any.whl");
        assert_eq!(spec.dist_info_dir(), "my_pkg-1.0.dist-info");
    }

    #[test]
    fn test_synthesize_writes_single_wheel() {
        let out = tempdir().unwrap();
        let spec = WheelSpec::new(
            "foo",
            "0.0.0",
            vec!["bar==2.0.0".to_string(), "baz".to_string()],
        );

        let wheel = synthesize(&RealRuntime, &spec, out.path()).unwrap();

        assert_eq!(wheel, out.path().join("foo-0.0.0-py3-none-any.whl"));
        let entries: Vec<_> = fs::read_dir(out.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);

        let metadata = read_member(&wheel, "foo-0.0.0.dist-info/METADATA");
        let requires: Vec<&str> = metadata
            .lines()
            .filter(|l| l.starts_with("Requires-Dist: "))
            .collect();
        assert_eq!(requires, vec!["Requires-Dist: bar==2.0.0", "Requires-Dist: baz"]);

        let top_level = read_member(&wheel, "foo-0.0.0.dist-info/top_level.txt");
        assert_eq!(top_level, "\n");
    }

    #[test]
    fn test_synthesize_without_requirements_has_marker() {
        let out = tempdir().unwrap();
        let spec = WheelSpec::new("foo", "1.2.3", vec![]);

        let wheel = synthesize(&RealRuntime, &spec, out.path()).unwrap();

        let wheel_text = read_member(&wheel, "foo-1.2.3.dist-info/WHEEL");
        assert!(wheel_text.contains(TRANSIENT_GENERATOR));
        assert!(wheel_text.contains("Tag: py3-none-any"));
    }

    #[test]
    fn test_synthesize_contains_only_metadata() {
        let out = tempdir().unwrap();
        let spec = WheelSpec::new("foo", "1.0", vec!["bar".to_string()]);

        let wheel = synthesize(&RealRuntime, &spec, out.path()).unwrap();

        let archive = ZipArchive::new(fs::File::open(&wheel).unwrap()).unwrap();
        for name in archive.file_names() {
            assert!(
                name.starts_with("foo-1.0.dist-info/"),
                "unexpected member {}",
                name
            );
        }
        assert_eq!(archive.len(), 4);
    }

    #[test]
    fn test_synthesize_twice_overwrites() {
        let out = tempdir().unwrap();
        let spec = WheelSpec::new("foo", "0.0.0", vec!["bar".to_string()]);

        let first = synthesize(&RealRuntime, &spec, out.path()).unwrap();
        let first_metadata = read_member(&first, "foo-0.0.0.dist-info/METADATA");
        let second = synthesize(&RealRuntime, &spec, out.path()).unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 1);
        assert_eq!(
            read_member(&second, "foo-0.0.0.dist-info/METADATA"),
            first_metadata
        );
    }

    #[test]
    fn test_synthesize_missing_output_dir_fails() {
        let out = tempdir().unwrap();
        let spec = WheelSpec::new("foo", "0.0.0", vec![]);

        let result = synthesize(&RealRuntime, &spec, &out.path().join("missing"));
        assert!(result.is_err());
    }
}
