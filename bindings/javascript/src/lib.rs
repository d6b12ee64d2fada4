//! Browser bindings for soldeploy
//!
//! Thin wrapper around `soldeploy-core` compiled to WebAssembly.
//! ZERO logic here. The editor calls these instead of re-implementing
//! argument parsing and gas handling in JavaScript.

use soldeploy_core::deploy::{self, ChainParams, DeployPayload, GasLimit};
use soldeploy_core::{parse_constructor_args, CompiledContract};
use wasm_bindgen::prelude::*;

/// Parse the constructor argument field into a JSON array.
///
/// Never fails on input: blank text yields `[]`.
///
/// @param text - comma-separated arguments, e.g. `'My Token', 'MTK', 1000`
/// @returns JSON string, e.g. `["My Token","MTK",1000]`
#[wasm_bindgen(js_name = "parseConstructorArgs")]
pub fn parse_constructor_args_json(text: &str) -> Result<String, JsError> {
    serde_json::to_string(&parse_constructor_args(text))
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Build the `deploy` call body for compiled bytecode.
///
/// @param bytecode - hex from the compile response, with or without `0x`
/// @param argsText - raw constructor argument field
/// @returns JSON string `{ data, arguments? }`
#[wasm_bindgen(js_name = "deployPayload")]
pub fn deploy_payload(bytecode: &str, args_text: &str) -> Result<String, JsError> {
    let contract = CompiledContract {
        name: String::new(),
        abi: serde_json::Value::Null,
        bytecode: bytecode.to_string(),
    };
    let payload = DeployPayload::new(&contract, parse_constructor_args(args_text));
    serde_json::to_string(&payload)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// The user's gas limit, if the field holds a whole number.
///
/// @returns the limit, or `undefined` when the wallet should estimate
#[wasm_bindgen(js_name = "manualGasLimit")]
pub fn manual_gas_limit(user_input: &str) -> Option<f64> {
    GasLimit::manual(user_input).map(|gas| gas.value() as f64)
}

/// Pad a wallet gas estimate by 20%, rounding up.
#[wasm_bindgen(js_name = "bufferGasEstimate")]
pub fn buffer_gas_estimate(estimate: f64) -> f64 {
    deploy::buffered(estimate.max(0.0).ceil() as u64) as f64
}

/// Parameters for the wallet's add-chain request.
///
/// @returns JSON string `{ chainId, chainName, nativeCurrency, rpcUrls, blockExplorerUrls }`
#[wasm_bindgen(js_name = "chainParams")]
pub fn chain_params() -> Result<String, JsError> {
    serde_json::to_string(&ChainParams::bsc_mainnet())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Hex chain id for `wallet_switchEthereumChain`, e.g. `0x38`.
#[wasm_bindgen(js_name = "chainIdHex")]
pub fn chain_id_hex() -> String {
    ChainParams::bsc_mainnet().chain_id_hex()
}

/// Whether a wallet reporting `currentChainId` must switch networks first.
#[wasm_bindgen(js_name = "needsChainSwitch")]
pub fn needs_chain_switch(current_chain_id: f64) -> bool {
    if current_chain_id < 0.0 || current_chain_id.fract() != 0.0 {
        return true;
    }
    ChainParams::bsc_mainnet().needs_switch(current_chain_id as u64)
}

/// Throws the "install a wallet" message when no provider is injected.
#[wasm_bindgen(js_name = "requireWallet")]
pub fn require_wallet(available: bool) -> Result<(), JsError> {
    deploy::require_wallet(available, &ChainParams::bsc_mainnet())
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Block explorer page for a deployed contract address.
#[wasm_bindgen(js_name = "explorerAddressUrl")]
pub fn explorer_address_url(address: &str) -> Option<String> {
    ChainParams::bsc_mainnet().address_url(address)
}

/// Block explorer page for a transaction hash.
#[wasm_bindgen(js_name = "explorerTxUrl")]
pub fn explorer_tx_url(tx_hash: &str) -> Option<String> {
    ChainParams::bsc_mainnet().tx_url(tx_hash)
}
