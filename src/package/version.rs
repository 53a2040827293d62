//! Version handling for the install auto-detect path.
//!
//! Only the leading release segment of a version (`1.4.2` in `1.4.2rc1`) is
//! interpreted; everything else is carried through as text.

use log::warn;

/// Default source version for packages that were not detected.
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Leading numeric release segment of a version string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Release {
    /// Explicit epoch (`1` in `1!2.3`); absent means the implicit epoch 0
    pub epoch: Option<u64>,
    pub major: u64,
    pub minor: u64,
}

impl Release {
    /// Parse the leading `[EPOCH!]MAJOR[.MINOR[...]]` of a version.
    ///
    /// A missing minor segment counts as `0`. Returns None when no major
    /// number can be read or the epoch is not a number.
    pub fn parse(version: &str) -> Option<Self> {
        let version = version.trim();
        let version = version.strip_prefix(['v', 'V']).unwrap_or(version);
        let (epoch, version) = match version.split_once('!') {
            Some((epoch, rest)) => (Some(epoch.parse::<u64>().ok()?), rest),
            None => (None, version),
        };

        let mut segments = version.split('.');
        let major = leading_number(segments.next()?)?;
        let minor = segments.next().and_then(leading_number).unwrap_or(0);
        Some(Self {
            epoch,
            major,
            minor,
        })
    }

    /// First release of the next minor line, e.g. `1.5.0` for `1.4.x` and
    /// `1!2.4.0` for `1!2.3.x`. None when the minor number cannot be bumped.
    pub fn next_minor(&self) -> Option<String> {
        let minor = self.minor.checked_add(1)?;
        Some(match self.epoch {
            Some(epoch) => format!("{}!{}.{}.0", epoch, self.major, minor),
            None => format!("{}.{}.0", self.major, minor),
        })
    }
}

fn leading_number(segment: &str) -> Option<u64> {
    let end = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());
    segment[..end].parse().ok()
}

/// Range covering `detected` and every later release in its minor line:
/// `>=detected,<MAJOR.(MINOR+1).0`, keeping the epoch of `detected`.
pub fn minor_line_range(detected: &str) -> Option<String> {
    let upper = Release::parse(detected)?.next_minor()?;
    Some(format!(">={},<{}", detected.trim(), upper))
}

/// Target specifier used when install detected the source version but no
/// target version was given.
///
/// Falls back to an exact match when no range can be derived from the
/// detected version.
pub fn default_target_specifier(detected: &str) -> String {
    match minor_line_range(detected) {
        Some(range) => range,
        None => {
            warn!(
                "cannot derive a version range from '{}', pinning the exact version",
                detected
            );
            format!("=={}", detected.trim())
        }
    }
}
