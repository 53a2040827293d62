//! Package manager operations.

mod pip;

use anyhow::Result;
use std::path::Path;

pub use pip::Pip;

/// Installs and removes packages in the target environment.
#[cfg_attr(test, mockall::automock)]
pub trait PackageManager {
    /// Install a wheel file.
    fn install(&self, archive: &Path) -> Result<()>;

    /// Remove an installed package without prompting.
    fn uninstall(&self, name: &str) -> Result<()>;
}
