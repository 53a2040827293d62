use anyhow::Result;
use log::debug;
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::Error;
use crate::runtime::{Runtime, display_command};

use super::{Distribution, MetadataProvider};

/// Python snippet printing one JSON document describing `sys.argv[1]`,
/// or `null` when it is not installed.
pub const QUERY_SCRIPT: &str = r#"import importlib.metadata, json, sys
try:
    dist = importlib.metadata.distribution(sys.argv[1])
except importlib.metadata.PackageNotFoundError:
    print("null")
else:
    print(json.dumps({
        "name": dist.metadata["Name"] or sys.argv[1],
        "version": dist.version,
        "wheel": dist.read_text("WHEEL"),
    }))
"#;

/// One installed distribution as printed by [`QUERY_SCRIPT`].
#[derive(Deserialize, Debug)]
struct QueryResult {
    name: Option<String>,
    version: String,
    wheel: Option<String>,
}

impl QueryResult {
    /// Broken metadata may lack a `Name`; the queried name stands in for it.
    fn into_distribution(self, queried: &str) -> Distribution {
        Distribution {
            name: self.name.unwrap_or_else(|| queried.to_string()),
            version: self.version,
            wheel: self.wheel,
        }
    }
}

/// Queries installed distributions by running a Python interpreter.
pub struct InterpreterProvider<'a, R: Runtime> {
    runtime: &'a R,
    interpreter: PathBuf,
}

impl<'a, R: Runtime> InterpreterProvider<'a, R> {
    pub fn new(runtime: &'a R, interpreter: PathBuf) -> Self {
        Self {
            runtime,
            interpreter,
        }
    }

    fn query_args(name: &str) -> Vec<String> {
        vec!["-c".to_string(), QUERY_SCRIPT.to_string(), name.to_string()]
    }
}

impl<R: Runtime> MetadataProvider for InterpreterProvider<'_, R> {
    #[tracing::instrument(skip(self))]
    fn distribution(&self, name: &str) -> Result<Option<Distribution>> {
        let args = Self::query_args(name);
        debug!("Querying {} through {:?}", name, self.interpreter);
        let output = self.runtime.output(&self.interpreter, &args)?;

        if !output.status.success {
            // The script itself is noise in messages
            let shown = ["-c".to_string(), "<query>".to_string(), name.to_string()];
            return Err(Error::CommandFailed {
                command: display_command(&self.interpreter, &shown),
                status: format!("{}: {}", output.status, output.stderr.trim()),
            }
            .into());
        }

        let stdout = output.stdout.trim();
        let result: Option<QueryResult> = serde_json::from_str(stdout)
            .map_err(|e| Error::InvalidQueryOutput(format!("{} ({:?})", e, stdout)))?;
        Ok(result.map(|result| result.into_distribution(name)))
    }
}
