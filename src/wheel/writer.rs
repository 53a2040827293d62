use anyhow::{Context, Result, anyhow};
use log::debug;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::FileOptions;

use crate::runtime::Runtime;

use super::metadata::render_record;

/// Pack the contents of a staging directory into a wheel at `wheel_path`.
///
/// Members are stored under their path relative to `root`, in sorted order,
/// followed by a `RECORD` written into `dist_info`.
pub(crate) fn pack_directory<R: Runtime>(
    runtime: &R,
    root: &Path,
    dist_info: &str,
    wheel_path: &Path,
) -> Result<()> {
    let mut members = Vec::new();
    for path in collect_files(runtime, root)? {
        let name = member_name(root, &path)?;
        let contents = runtime
            .read_to_string(&path)
            .with_context(|| format!("Failed to read staged file {:?}", path))?;
        members.push((name, contents.into_bytes()));
    }

    let record_path = format!("{}/RECORD", dist_info);
    let record = render_record(&members, &record_path);
    members.push((record_path, record.into_bytes()));

    // zip needs Write + Seek, so the archive is assembled in memory
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options: FileOptions<()> = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for (name, contents) in &members {
        debug!("Adding {} to wheel", name);
        zip.start_file(name.as_str(), options)
            .with_context(|| format!("Failed to add {} to wheel", name))?;
        zip.write_all(contents)?;
    }

    let bytes = zip
        .finish()
        .context("Failed to finish wheel archive")?
        .into_inner();

    runtime
        .write(wheel_path, &bytes)
        .with_context(|| format!("Failed to write wheel to {:?}", wheel_path))
}

fn collect_files<R: Runtime>(runtime: &R, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in runtime.read_dir(dir)? {
        if runtime.is_dir(&entry) {
            files.extend(collect_files(runtime, &entry)?);
        } else {
            files.push(entry);
        }
    }
    Ok(files)
}

/// Archive member name: relative path joined with `/` on every platform.
fn member_name(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| anyhow!("{:?} is outside of {:?}", path, root))?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}
