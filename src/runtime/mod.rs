//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over system operations,
//! enabling dependency injection and testability.
//!
//! # Structure
//!
//! - `env` - Environment variables
//! - `fs` - File system operations (read, write, directory)
//! - `process` - Running external programs (pip, the Python interpreter)

mod env;
mod fs;
mod process;

use anyhow::Result;
use std::env as std_env;
use std::path::{Path, PathBuf};

pub use process::{ProcessOutput, ProcessStatus, display_command};

#[cfg_attr(test, mockall::automock)]
pub trait Runtime {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;

    // File System
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    // Processes
    /// Run a program to completion and capture its stdout and stderr.
    fn output(&self, program: &Path, args: &[String]) -> Result<ProcessOutput>;

    /// Run a program to completion with stdio inherited from this process.
    fn status(&self, program: &Path, args: &[String]) -> Result<ProcessStatus>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.is_dir_impl(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.read_dir_impl(path)
    }

    fn output(&self, program: &Path, args: &[String]) -> Result<ProcessOutput> {
        self.output_impl(program, args)
    }

    fn status(&self, program: &Path, args: &[String]) -> Result<ProcessStatus> {
        self.status_impl(program, args)
    }
}
