//! Compile pipeline: source text in, ABI and bytecode out
//!
//! ```text
//! source → StandardJsonInput → SolidityCompiler → StandardJsonOutput
//!                                                      ↓
//!                                   diagnostics check, first contract
//!                                                      ↓
//!                                              CompiledContract
//! ```
//!
//! The compiler itself is external. Its error text is passed through
//! verbatim; warnings never fail a compile.

pub mod solc;
pub mod standard_json;

use serde::{Deserialize, Serialize};

pub use solc::Solc;
pub use standard_json::{StandardJsonInput, StandardJsonOutput, SOURCE_NAME};

use crate::{Error, Result};
use standard_json::ContractOutput;

/// Anything that can answer a standard-JSON compile request
pub trait SolidityCompiler: Send + Sync {
    fn compile(&self, input: &StandardJsonInput) -> Result<StandardJsonOutput>;
}

/// A successfully compiled contract, ready for deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledContract {
    pub name: String,
    pub abi: serde_json::Value,
    /// Hex without `0x` prefix
    pub bytecode: String,
}

/// Compile a single Solidity source and pick its first contract
pub fn compile_source(compiler: &dyn SolidityCompiler, code: &str) -> Result<CompiledContract> {
    let input = StandardJsonInput::for_source(code);
    let output = compiler.compile(&input)?;
    let contract = first_contract(output)?;
    tracing::debug!(contract = %contract.name, bytes = contract.bytecode.len() / 2, "compiled");
    Ok(contract)
}

/// Reduce compiler output to the first contract of the submitted source
///
/// # Errors
/// - `Compilation` with every diagnostic's text joined by newlines, when any
///   diagnostic is an error
/// - `NoContracts` when the source declares none
/// - `InvalidCompilerOutput` when the contract entry lacks bytecode
pub fn first_contract(output: StandardJsonOutput) -> Result<CompiledContract> {
    if output.errors.iter().any(|d| d.is_error()) {
        let message = output
            .errors
            .iter()
            .map(|d| d.display_text())
            .collect::<Vec<_>>()
            .join("\n");
        return Err(Error::Compilation(message));
    }

    let Some(contracts) = output.contracts.get(SOURCE_NAME) else {
        return Err(Error::NoContracts);
    };
    let Some((name, entry)) = contracts.iter().next() else {
        return Err(Error::NoContracts);
    };

    let entry: ContractOutput = serde_json::from_value(entry.clone())
        .map_err(|e| Error::InvalidCompilerOutput(format!("contract '{}': {}", name, e)))?;
    let bytecode = entry
        .evm
        .and_then(|evm| evm.bytecode)
        .map(|b| b.object)
        .ok_or_else(|| {
            Error::InvalidCompilerOutput(format!("contract '{}' has no bytecode", name))
        })?;

    Ok(CompiledContract {
        name: name.clone(),
        abi: entry.abi.unwrap_or_else(|| serde_json::Value::Array(Vec::new())),
        bytecode,
    })
}

// ── Wire types ─────────────────────────────────────────────

/// Body of a compile request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileRequest {
    pub code: String,
}

/// Body of a compile response: either `abi` + `bytecode` or `error`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytecode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CompileResponse {
    /// Source problems are reported as-is; toolchain failures get a
    /// `Compilation error: ` prefix.
    pub fn from_result(result: Result<CompiledContract>) -> Self {
        match result {
            Ok(contract) => CompileResponse {
                success: true,
                abi: Some(contract.abi),
                bytecode: Some(contract.bytecode),
                error: None,
            },
            Err(e) => {
                let error = if e.is_source_error() {
                    e.to_string()
                } else {
                    format!("Compilation error: {}", e)
                };
                CompileResponse {
                    success: false,
                    abi: None,
                    bytecode: None,
                    error: Some(error),
                }
            }
        }
    }
}
