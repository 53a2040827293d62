use anyhow::Result;
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::runtime::Runtime;
use crate::wheel::synthesize;

use super::TransientRequest;

/// Write a transient wheel for `request` into `output_dir`.
#[tracing::instrument(skip(runtime))]
pub fn create<R: Runtime>(
    runtime: &R,
    request: &TransientRequest,
    output_dir: &Path,
) -> Result<PathBuf> {
    if !runtime.is_dir(output_dir) {
        return Err(Error::NotADirectory(output_dir.to_path_buf()).into());
    }

    let spec = request.wheel_spec();
    debug!("Requirements for {}: {:?}", spec.name, spec.requirements);
    let wheel = synthesize(runtime, &spec, output_dir)?;

    info!("created transient package '{}'", request.source);
    Ok(wheel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::RealRuntime;
    use std::fs;
    use std::io::Read;
    use tempfile::tempdir;
    use zip::ZipArchive;

    fn request(target_version: Option<&str>) -> TransientRequest {
        TransientRequest {
            source: "foo".into(),
            source_version: None,
            target: "bar".into(),
            target_version: target_version.map(String::from),
            tag: crate::wheel::DEFAULT_TAG.into(),
        }
    }

    fn metadata_of(wheel: &Path, dist_info: &str) -> String {
        let mut archive = ZipArchive::new(fs::File::open(wheel).unwrap()).unwrap();
        let mut text = String::new();
        archive
            .by_name(&format!("{}/METADATA", dist_info))
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        text
    }

    #[test_log::test]
    fn test_create_with_exact_target_version() {
        let out = tempdir().unwrap();

        let wheel = create(&RealRuntime, &request(Some("2.0.0")), out.path()).unwrap();

        assert_eq!(wheel, out.path().join("foo-0.0.0-py3-none-any.whl"));
        let metadata = metadata_of(&wheel, "foo-0.0.0.dist-info");
        assert!(metadata.contains("Requires-Dist: bar==2.0.0\n"));
        assert!(metadata.contains("Version: 0.0.0\n"));
    }

    #[test]
    fn test_create_with_range_target_version() {
        let out = tempdir().unwrap();

        let wheel = create(&RealRuntime, &request(Some(">=1.0,<2.0")), out.path()).unwrap();

        let metadata = metadata_of(&wheel, "foo-0.0.0.dist-info");
        assert!(metadata.contains("Requires-Dist: bar>=1.0,<2.0\n"));
    }

    #[test]
    fn test_create_without_target_version() {
        let out = tempdir().unwrap();
        let mut req = request(None);
        req.source_version = Some("3.1".into());

        let wheel = create(&RealRuntime, &req, out.path()).unwrap();

        assert_eq!(wheel, out.path().join("foo-3.1-py3-none-any.whl"));
        let metadata = metadata_of(&wheel, "foo-3.1.dist-info");
        assert!(metadata.contains("Requires-Dist: bar\n"));
    }

    #[test]
    fn test_create_twice_leaves_one_wheel() {
        let out = tempdir().unwrap();
        let req = request(Some("2.0.0"));

        create(&RealRuntime, &req, out.path()).unwrap();
        create(&RealRuntime, &req, out.path()).unwrap();

        let names: Vec<_> = fs::read_dir(out.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec!["foo-0.0.0-py3-none-any.whl"]);
    }

    #[test]
    fn test_create_requires_existing_directory() {
        let out = tempdir().unwrap();
        let missing = out.path().join("missing");

        let err = create(&RealRuntime, &request(None), &missing).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::NotADirectory(_))
        ));
        assert!(!missing.exists());
    }
}
