use anyhow::{Context, Result};
use log::{debug, info};

use crate::error::Error;
use crate::installer::PackageManager;
use crate::provider::MetadataProvider;
use crate::runtime::Runtime;

use super::config::{Config, ConfigOverrides};
use super::services::{build_package_manager, build_provider};

/// Remove a transient package. Regular packages are left alone.
#[tracing::instrument(skip(runtime, overrides))]
pub fn uninstall<R: Runtime>(runtime: R, package: &str, overrides: ConfigOverrides) -> Result<()> {
    let config = Config::load(&runtime, overrides);
    let provider = build_provider(&runtime, &config);
    let manager = build_package_manager(&runtime, &config);
    run_uninstall(&provider, &manager, package)
}

#[tracing::instrument(skip(provider, manager))]
pub fn run_uninstall<M: MetadataProvider, P: PackageManager>(
    provider: &M,
    manager: &P,
    package: &str,
) -> Result<()> {
    let dist = provider
        .distribution(package)?
        .ok_or_else(|| Error::PackageNotFound(package.to_string()))?;
    debug!("Found {} {}", dist.name, dist.version);

    if !dist.is_transient() {
        return Err(Error::NotTransient(package.to_string()).into());
    }

    manager
        .uninstall(package)
        .with_context(|| format!("failed to uninstall transient package '{}'", package))?;
    info!("uninstalled transient package '{}'", package);

    Ok(())
}
