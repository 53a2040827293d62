//! Service factory for building command dependencies.
//!
//! The metadata provider and package manager are built from the resolved
//! configuration but are not part of it.

use crate::{
    installer::Pip,
    provider::{EnvironmentProvider, select_provider},
    runtime::Runtime,
};

use super::config::Config;

/// Build the metadata provider for the configured environment
pub fn build_provider<'a, R: Runtime>(runtime: &'a R, config: &Config) -> EnvironmentProvider<'a, R> {
    select_provider(runtime, config.interpreter.clone(), &config.site_packages)
}

/// Build the pip front end for the configured interpreter
pub fn build_package_manager<'a, R: Runtime>(runtime: &'a R, config: &Config) -> Pip<'a, R> {
    Pip::new(runtime, config.interpreter.clone())
}
