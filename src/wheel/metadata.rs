//! Text of the `.dist-info` members written into a transient wheel.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};

use super::WheelSpec;

/// Name recorded as the wheel generator.
pub const GENERATOR_NAME: &str = "transient_package";

/// Marker searched for in the `WHEEL` member of installed packages.
pub const TRANSIENT_GENERATOR: &str = "Generator: transient_package";

/// Version of this tool, recorded next to the generator name.
pub const GENERATOR_VERSION: &str = env!("TRANSIENT_PACKAGE_VERSION");

/// Returns true if the text of a `WHEEL` member carries the generator marker.
pub fn is_transient(wheel: &str) -> bool {
    wheel.contains(TRANSIENT_GENERATOR)
}

/// `METADATA`: core metadata with one `Requires-Dist` per requirement.
pub fn render_metadata(spec: &WheelSpec) -> String {
    let mut text = String::new();
    text.push_str("Metadata-Version: 2.1\n");
    text.push_str(&format!("Name: {}\n", spec.name));
    text.push_str(&format!("Version: {}\n", spec.version));
    for requirement in &spec.requirements {
        text.push_str(&format!("Requires-Dist: {}\n", requirement));
    }
    text.push('\n');
    text
}

/// `WHEEL`: archive level metadata including the generator marker.
pub fn render_wheel(spec: &WheelSpec) -> String {
    format!(
        "Wheel-Version: 1.0\n\
         Generator: {} ({})\n\
         Root-Is-Purelib: true\n\
         Tag: {}\n\
         \n",
        GENERATOR_NAME, GENERATOR_VERSION, spec.tag
    )
}

/// `top_level.txt`: intentionally lists no packages.
pub fn render_top_level() -> &'static str {
    "\n"
}

/// `RECORD`: hash and size of every member, followed by the record itself.
pub fn render_record(members: &[(String, Vec<u8>)], record_path: &str) -> String {
    let mut text = String::new();
    for (path, contents) in members {
        let digest = URL_SAFE_NO_PAD.encode(Sha256::digest(contents));
        text.push_str(&format!("{},sha256={},{}\n", path, digest, contents.len()));
    }
    text.push_str(&format!("{},,\n", record_path));
    text
}
