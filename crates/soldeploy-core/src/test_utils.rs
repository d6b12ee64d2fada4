//! Test doubles shared by this crate's tests and downstream crates
//! (enable the `test-utils` feature).

use std::sync::Mutex;

use crate::compiler::{SolidityCompiler, StandardJsonInput, StandardJsonOutput};
use crate::{Error, Result};

enum Canned {
    Output(StandardJsonOutput),
    Unavailable(String),
}

/// A compiler that answers every request with a canned response and
/// remembers the last request it saw.
pub struct FakeCompiler {
    canned: Canned,
    last_input: Mutex<Option<StandardJsonInput>>,
}

impl FakeCompiler {
    /// Answer with the given raw standard-JSON output
    pub fn returning(output: serde_json::Value) -> Self {
        let output = serde_json::from_value(output).expect("canned output must deserialize");
        Self::with(Canned::Output(output))
    }

    /// Answer with one contract carrying an empty-constructor ABI
    pub fn returning_contract(name: &str, bytecode: &str) -> Self {
        let mut contracts = serde_json::Map::new();
        contracts.insert(
            name.to_string(),
            serde_json::json!({
                "abi": [{"type": "constructor", "inputs": []}],
                "evm": {"bytecode": {"object": bytecode}}
            }),
        );
        Self::returning(serde_json::json!({ "contracts": { "contract.sol": contracts } }))
    }

    /// Answer with a single error diagnostic
    pub fn failing_with(formatted_message: &str) -> Self {
        Self::returning(serde_json::json!({
            "errors": [{
                "severity": "error",
                "message": formatted_message,
                "formattedMessage": formatted_message
            }]
        }))
    }

    /// Behave as if the compiler binary is missing
    pub fn unavailable(reason: &str) -> Self {
        Self::with(Canned::Unavailable(reason.to_string()))
    }

    pub fn last_input(&self) -> Option<StandardJsonInput> {
        self.last_input.lock().ok().and_then(|guard| guard.clone())
    }

    fn with(canned: Canned) -> Self {
        FakeCompiler {
            canned,
            last_input: Mutex::new(None),
        }
    }
}

impl SolidityCompiler for FakeCompiler {
    fn compile(&self, input: &StandardJsonInput) -> Result<StandardJsonOutput> {
        if let Ok(mut guard) = self.last_input.lock() {
            *guard = Some(input.clone());
        }
        match &self.canned {
            Canned::Output(output) => Ok(output.clone()),
            Canned::Unavailable(reason) => Err(Error::CompilerUnavailable(reason.clone())),
        }
    }
}
