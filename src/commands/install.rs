use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::installer::PackageManager;
use crate::package::default_target_specifier;
use crate::provider::MetadataProvider;
use crate::runtime::Runtime;

use super::config::{Config, ConfigOverrides};
use super::create::create;
use super::services::{build_package_manager, build_provider};
use super::TransientRequest;

/// Replace an installed package with a transient package.
#[tracing::instrument(skip(runtime, overrides))]
pub fn install<R: Runtime>(
    runtime: R,
    request: TransientRequest,
    overrides: ConfigOverrides,
) -> Result<()> {
    let config = Config::load(&runtime, overrides);
    let provider = build_provider(&runtime, &config);
    let manager = build_package_manager(&runtime, &config);
    run_install(&runtime, &provider, &manager, request)
}

/// Install steps against explicit collaborators.
///
/// 1. Look up the installed source and fill in missing versions from it.
/// 2. Uninstall the source if it is installed.
/// 3. Build the transient wheel in a temporary directory and install it.
///
/// A failed uninstall stops before anything is built. Nothing is rolled back
/// if the final install fails.
#[tracing::instrument(skip(runtime, provider, manager))]
pub fn run_install<R: Runtime, M: MetadataProvider, P: PackageManager>(
    runtime: &R,
    provider: &M,
    manager: &P,
    mut request: TransientRequest,
) -> Result<()> {
    let installed = detect_source(provider, &mut request)?;

    if installed {
        manager
            .uninstall(&request.source)
            .with_context(|| format!("failed to uninstall source package '{}'", request.source))?;
        info!("uninstalled source package '{}'", request.source);
    }

    let workdir = tempfile::Builder::new()
        .prefix("transient-package-")
        .tempdir()
        .context("Failed to create temporary directory")?;
    debug!("Building transient package in {:?}", workdir.path());

    create(runtime, &request, workdir.path())?;
    let wheel = locate_wheel(runtime, workdir.path())?;

    manager
        .install(&wheel)
        .with_context(|| format!("failed to install transient package '{}'", request.source))?;
    info!("installed transient package '{}'", request.source);

    Ok(())
}

/// Query the source package and complete the request from what is installed.
///
/// Returns true if the source is installed. An explicit source version is
/// kept as given; without one the installed version is used, and the target
/// defaults to the installed version's minor line.
fn detect_source<M: MetadataProvider>(provider: &M, request: &mut TransientRequest) -> Result<bool> {
    let Some(dist) = provider.distribution(&request.source)? else {
        debug!("source package '{}' is not installed", request.source);
        return Ok(false);
    };

    if request.source_version.is_none() {
        info!("detected '{}' with version '{}'", request.source, dist.version);
        if request.target_version.is_none() {
            let specifier = default_target_specifier(&dist.version);
            debug!("defaulting target '{}' to '{}'", request.target, specifier);
            request.target_version = Some(specifier);
        }
        request.source_version = Some(dist.version);
    }

    Ok(true)
}

/// Find the single wheel in `dir`.
pub fn locate_wheel<R: Runtime>(runtime: &R, dir: &Path) -> Result<PathBuf> {
    let pattern = glob::Pattern::new("*.whl")?;
    let mut wheels: Vec<PathBuf> = runtime
        .read_dir(dir)?
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name))
        })
        .collect();

    if wheels.len() != 1 {
        return Err(Error::MissingArchive {
            dir: dir.to_path_buf(),
            count: wheels.len(),
        }
        .into());
    }
    Ok(wheels.remove(0))
}
