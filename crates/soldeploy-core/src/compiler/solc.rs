//! Process-backed compiler: runs a `solc` binary in standard-JSON mode

use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use super::standard_json::{StandardJsonInput, StandardJsonOutput};
use super::SolidityCompiler;
use crate::{Error, Result};

/// A `solc` executable on disk or on `PATH`
#[derive(Debug, Clone)]
pub struct Solc {
    binary: PathBuf,
}

impl Solc {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Solc {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &std::path::Path {
        &self.binary
    }
}

impl Default for Solc {
    fn default() -> Self {
        Solc::new("solc")
    }
}

impl SolidityCompiler for Solc {
    fn compile(&self, input: &StandardJsonInput) -> Result<StandardJsonOutput> {
        let request = serde_json::to_vec(input)
            .map_err(|e| Error::InvalidCompilerOutput(format!("cannot encode request: {}", e)))?;

        let mut child = Command::new(&self.binary)
            .arg("--standard-json")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                Error::CompilerUnavailable(format!(
                    "failed to start '{}': {}",
                    self.binary.display(),
                    e
                ))
            })?;

        // solc reads all of stdin before writing, so writing first cannot stall.
        // A closed pipe means the process already exited; its status says why.
        let mut write_error = None;
        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&request) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    tracing::debug!("solc closed stdin before reading the request");
                }
                Err(e) => write_error = Some(e),
            }
        }

        let output = child.wait_with_output()?;
        if let Some(e) = write_error {
            return Err(Error::Io(e));
        }
        if !output.status.success() && output.stdout.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(status = %output.status, "solc exited without output");
            return Err(Error::CompilerUnavailable(format!(
                "'{}' exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| Error::InvalidCompilerOutput(e.to_string()))
    }
}
