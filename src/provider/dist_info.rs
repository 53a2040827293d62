use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::package::name::normalize;
use crate::runtime::Runtime;

use super::{Distribution, MetadataProvider};

const DIST_INFO_SUFFIX: &str = ".dist-info";

/// Reads installed distributions from `*.dist-info` directories.
pub struct DistInfoProvider<'a, R: Runtime> {
    runtime: &'a R,
    site_packages: Vec<PathBuf>,
}

impl<'a, R: Runtime> DistInfoProvider<'a, R> {
    pub fn new(runtime: &'a R, site_packages: Vec<PathBuf>) -> Self {
        Self {
            runtime,
            site_packages,
        }
    }

    /// Find the `.dist-info` directory of `name`, searching directories in order.
    fn find_dist_info(&self, name: &str) -> Result<Option<PathBuf>> {
        let wanted = normalize(name);
        for dir in &self.site_packages {
            if !self.runtime.is_dir(dir) {
                warn!("Skipping {:?}: not a directory", dir);
                continue;
            }
            for entry in self.runtime.read_dir(dir)? {
                let Some(dist_name) = dist_info_name(&entry) else {
                    continue;
                };
                if normalize(&dist_name) == wanted && self.runtime.is_dir(&entry) {
                    debug!("Found {:?} for {}", entry, name);
                    return Ok(Some(entry));
                }
            }
        }
        Ok(None)
    }

    fn load(&self, dist_info: &Path) -> Result<Distribution> {
        let metadata_path = dist_info.join("METADATA");
        let metadata = self
            .runtime
            .read_to_string(&metadata_path)
            .with_context(|| format!("Failed to read {:?}", metadata_path))?;
        let headers = MetadataHeaders::parse(&metadata);

        let (dir_name, dir_version) = split_dist_info(dist_info).unwrap_or_default();

        let wheel_path = dist_info.join("WHEEL");
        let wheel = if self.runtime.exists(&wheel_path) {
            Some(
                self.runtime
                    .read_to_string(&wheel_path)
                    .with_context(|| format!("Failed to read {:?}", wheel_path))?,
            )
        } else {
            None
        };

        Ok(Distribution {
            name: headers.name.unwrap_or(dir_name),
            version: headers.version.unwrap_or(dir_version),
            wheel,
        })
    }
}

impl<R: Runtime> MetadataProvider for DistInfoProvider<'_, R> {
    #[tracing::instrument(skip(self))]
    fn distribution(&self, name: &str) -> Result<Option<Distribution>> {
        match self.find_dist_info(name)? {
            Some(dist_info) => self.load(&dist_info).map(Some),
            None => Ok(None),
        }
    }
}

/// `Name` and `Version` headers of a `METADATA` file.
#[derive(Debug, Default, PartialEq)]
struct MetadataHeaders {
    name: Option<String>,
    version: Option<String>,
}

impl MetadataHeaders {
    fn parse(text: &str) -> Self {
        let mut headers = Self::default();
        for line in text.lines() {
            // Headers end at the first blank line; the body follows
            if line.trim().is_empty() {
                break;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim().to_string();
            match key.trim() {
                "Name" => headers.name = Some(value),
                "Version" => headers.version = Some(value),
                _ => {}
            }
        }
        headers
    }
}

fn dist_info_name(path: &Path) -> Option<String> {
    split_dist_info(path).map(|(name, _)| name)
}

/// Split `{name}-{version}.dist-info` into its name and version.
fn split_dist_info(path: &Path) -> Option<(String, String)> {
    let file_name = path.file_name()?.to_str()?;
    let stem = file_name.strip_suffix(DIST_INFO_SUFFIX)?;
    match stem.split_once('-') {
        Some((name, version)) => Some((name.to_string(), version.to_string())),
        None => Some((stem.to_string(), String::new())),
    }
}
