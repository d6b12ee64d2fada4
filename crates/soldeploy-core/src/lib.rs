//! soldeploy core, the logic behind the compile-and-deploy editor
//!
//! The server, CLI and browser binding all call into this crate.
//!
//! # Architecture
//!
//! ```text
//! Solidity source → compiler → CompiledContract (abi + bytecode)
//!                                     ↓
//! argument text → args::parse_constructor_args → ConstructorArgs
//!                                     ↓
//!                       deploy::DeploymentPlan → wallet
//! ```
//!
//! # Guarantees
//!
//! - **Total**: argument parsing never fails
//! - **Deterministic**: same argument text always yields the same list
//! - **Pass-through**: compiler and wallet errors surface verbatim

pub mod args;
pub mod compiler;
pub mod deploy;
pub mod error;
pub mod samples;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use args::{parse_constructor_args, ConstructorArg, ConstructorArgs};
pub use compiler::{compile_source, CompileRequest, CompileResponse, CompiledContract, Solc, SolidityCompiler};
pub use deploy::{ChainParams, DeployPayload, DeploymentPlan, GasLimit};
pub use error::{Error, Result};
