//! The `solc --standard-json` request and response shapes
//!
//! Only the fields the pipeline reads are modelled; everything else in
//! the compiler's output is ignored on deserialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name the submitted source is registered under
pub const SOURCE_NAME: &str = "contract.sol";

///
/// The `solc --standard-json` input.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardJsonInput {
    pub language: String,
    pub sources: BTreeMap<String, Source>,
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// file pattern → contract pattern → requested outputs
    pub output_selection: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl StandardJsonInput {
    /// Wrap a single Solidity source, requesting every output for every contract
    pub fn for_source(code: &str) -> Self {
        let mut sources = BTreeMap::new();
        sources.insert(
            SOURCE_NAME.to_string(),
            Source {
                content: code.to_string(),
            },
        );

        let mut per_contract = BTreeMap::new();
        per_contract.insert("*".to_string(), vec!["*".to_string()]);
        let mut output_selection = BTreeMap::new();
        output_selection.insert("*".to_string(), per_contract);

        StandardJsonInput {
            language: "Solidity".to_string(),
            sources,
            settings: Settings { output_selection },
        }
    }
}

///
/// The `solc --standard-json` output.
///
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StandardJsonOutput {
    /// Errors and warnings, in compiler order
    #[serde(default)]
    pub errors: Vec<Diagnostic>,
    /// source name → contract name → contract output.
    /// The inner map keeps compiler order, so "first" means first emitted.
    #[serde(default)]
    pub contracts: BTreeMap<String, serde_json::Map<String, serde_json::Value>>,
}

///
/// A compiler error or warning.
///
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub formatted_message: Option<String>,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == "error"
    }

    /// The human-readable rendering, falling back to the bare message
    pub fn display_text(&self) -> &str {
        self.formatted_message.as_deref().unwrap_or(&self.message)
    }
}

///
/// The per-contract output entry.
///
#[derive(Debug, Clone, Deserialize)]
pub struct ContractOutput {
    #[serde(default)]
    pub abi: Option<serde_json::Value>,
    #[serde(default)]
    pub evm: Option<Evm>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Evm {
    #[serde(default)]
    pub bytecode: Option<Bytecode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Bytecode {
    /// Hex without `0x` prefix
    pub object: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_shape() {
        let input = StandardJsonInput::for_source("contract A {}");
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "language": "Solidity",
                "sources": {"contract.sol": {"content": "contract A {}"}},
                "settings": {"outputSelection": {"*": {"*": ["*"]}}}
            })
        );
    }

    #[test]
    fn test_output_tolerates_missing_sections() {
        let output: StandardJsonOutput = serde_json::from_str("{}").unwrap();
        assert!(output.errors.is_empty());
        assert!(output.contracts.is_empty());
    }

    #[test]
    fn test_output_keeps_contract_order() {
        let output: StandardJsonOutput = serde_json::from_str(
            r#"{"contracts": {"contract.sol": {"Zeta": {}, "Alpha": {}}}}"#,
        )
        .unwrap();
        let names: Vec<&String> = output.contracts[SOURCE_NAME].keys().collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_diagnostic_display_falls_back_to_message() {
        let d: Diagnostic =
            serde_json::from_str(r#"{"severity": "error", "message": "boom"}"#).unwrap();
        assert!(d.is_error());
        assert_eq!(d.display_text(), "boom");
    }
}
