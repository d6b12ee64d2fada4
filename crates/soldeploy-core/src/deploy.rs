//! Deployment planning: everything about a deploy that does not need a wallet
//!
//! The wallet extension signs and sends; this module decides what it is
//! asked to send: the payload, the constructor arguments, the gas limit,
//! and which chain it goes to.

use serde::{Serialize, Serializer};

use crate::args::{parse_constructor_args, ConstructorArgs};
use crate::compiler::CompiledContract;
use crate::{Error, Result};

/// Estimated gas is padded by this ratio (numerator / denominator)
const GAS_BUFFER: (u64, u64) = (6, 5);

// ── Prerequisites ─────────────────────────────────────────

/// A deploy needs a successful compile first
pub fn require_artifact(artifact: Option<&CompiledContract>) -> Result<&CompiledContract> {
    artifact.ok_or_else(|| Error::MissingPrerequisite("Please compile the contract first".into()))
}

/// A deploy needs a wallet provider to sign with
pub fn require_wallet(available: bool, chain: &ChainParams) -> Result<()> {
    if available {
        Ok(())
    } else {
        Err(Error::MissingPrerequisite(format!(
            "Please install a wallet extension and connect to {}",
            chain.chain_name
        )))
    }
}

// ── Payload ───────────────────────────────────────────────

/// The `deploy` call body: creation code plus positional constructor arguments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeployPayload {
    /// `0x`-prefixed creation bytecode
    pub data: String,
    /// Omitted entirely when the constructor takes nothing
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arguments: ConstructorArgs,
}

impl DeployPayload {
    pub fn new(contract: &CompiledContract, arguments: ConstructorArgs) -> Self {
        DeployPayload {
            data: format!("0x{}", contract.bytecode.trim_start_matches("0x")),
            arguments,
        }
    }
}

// ── Gas ───────────────────────────────────────────────────

/// Where the gas limit came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum GasLimit {
    /// Typed in by the user, used verbatim
    Manual(u64),
    /// Wallet estimate with the safety buffer applied
    Estimated(u64),
}

impl GasLimit {
    /// A non-blank, numeric user value, if there is one
    pub fn manual(user_input: &str) -> Option<GasLimit> {
        user_input.trim().parse::<u64>().ok().map(GasLimit::Manual)
    }

    /// Use the manual value when given, otherwise ask for an estimate.
    /// `estimate` is only called when no manual value applies.
    pub fn resolve<F>(user_input: &str, estimate: F) -> Result<GasLimit>
    where
        F: FnOnce() -> std::result::Result<u64, String>,
    {
        if let Some(manual) = GasLimit::manual(user_input) {
            return Ok(manual);
        }
        let raw = estimate().map_err(Error::GasEstimation)?;
        Ok(GasLimit::Estimated(buffered(raw)))
    }

    pub fn value(self) -> u64 {
        match self {
            GasLimit::Manual(v) | GasLimit::Estimated(v) => v,
        }
    }
}

/// `ceil(estimate * 1.2)` in integer arithmetic, clamped to `u64::MAX`
pub fn buffered(estimate: u64) -> u64 {
    let (num, den) = GAS_BUFFER;
    let padded = (u128::from(estimate) * u128::from(num)).div_ceil(u128::from(den));
    u64::try_from(padded).unwrap_or(u64::MAX)
}

// ── Chain ─────────────────────────────────────────────────

/// Target network, in the shape a wallet's add-chain request takes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainParams {
    #[serde(serialize_with = "serialize_hex")]
    pub chain_id: u64,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

fn serialize_hex<S: Serializer>(value: &u64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:#x}", value))
}

impl ChainParams {
    pub fn bsc_mainnet() -> Self {
        ChainParams {
            chain_id: 56,
            chain_name: "Binance Smart Chain Mainnet".into(),
            native_currency: NativeCurrency {
                name: "BNB".into(),
                symbol: "bnb".into(),
                decimals: 18,
            },
            rpc_urls: vec!["https://bsc-dataseed.binance.org/".into()],
            block_explorer_urls: vec!["https://bscscan.com/".into()],
        }
    }

    pub fn chain_id_hex(&self) -> String {
        format!("{:#x}", self.chain_id)
    }

    /// Whether a wallet currently on `current` must switch before deploying
    pub fn needs_switch(&self, current: u64) -> bool {
        current != self.chain_id
    }

    pub fn address_url(&self, address: &str) -> Option<String> {
        self.explorer_link("address", address)
    }

    pub fn tx_url(&self, tx_hash: &str) -> Option<String> {
        self.explorer_link("tx", tx_hash)
    }

    fn explorer_link(&self, kind: &str, id: &str) -> Option<String> {
        self.block_explorer_urls
            .first()
            .map(|base| format!("{}/{}/{}", base.trim_end_matches('/'), kind, id))
    }
}

impl Default for ChainParams {
    fn default() -> Self {
        ChainParams::bsc_mainnet()
    }
}

// ── Plan ──────────────────────────────────────────────────

/// Everything the browser hands to the wallet for one deploy attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentPlan {
    pub contract: String,
    pub chain: ChainParams,
    pub payload: DeployPayload,
    pub gas: GasLimit,
}

impl DeploymentPlan {
    /// Parse the argument text, assemble the payload, and settle the gas limit
    pub fn build<F>(
        artifact: Option<&CompiledContract>,
        chain: ChainParams,
        args_text: &str,
        gas_input: &str,
        estimate: F,
    ) -> Result<DeploymentPlan>
    where
        F: FnOnce(&DeployPayload) -> std::result::Result<u64, String>,
    {
        let contract = require_artifact(artifact)?;
        let payload = DeployPayload::new(contract, parse_constructor_args(args_text));
        let gas = GasLimit::resolve(gas_input, || estimate(&payload))?;
        tracing::debug!(
            contract = %contract.name,
            args = payload.arguments.len(),
            gas = gas.value(),
            "deployment planned"
        );

        Ok(DeploymentPlan {
            contract: contract.name.clone(),
            chain,
            payload,
            gas,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ConstructorArg;

    fn contract() -> CompiledContract {
        CompiledContract {
            name: "Token".into(),
            abi: serde_json::json!([]),
            bytecode: "6080604052".into(),
        }
    }

    #[test]
    fn test_require_artifact() {
        let err = require_artifact(None).unwrap_err();
        assert_eq!(err.to_string(), "Please compile the contract first");
        let c = contract();
        assert_eq!(require_artifact(Some(&c)).unwrap().name, "Token");
    }

    #[test]
    fn test_require_wallet() {
        let chain = ChainParams::bsc_mainnet();
        assert!(require_wallet(true, &chain).is_ok());
        let err = require_wallet(false, &chain).unwrap_err();
        assert!(matches!(err, Error::MissingPrerequisite(_)));
        assert!(err.to_string().contains("Binance Smart Chain Mainnet"));
    }

    #[test]
    fn test_payload_prefixes_bytecode_and_omits_empty_args() {
        let payload = DeployPayload::new(&contract(), Vec::new());
        assert_eq!(payload.data, "0x6080604052");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({"data": "0x6080604052"}));
    }

    #[test]
    fn test_payload_keeps_argument_order() {
        let payload = DeployPayload::new(
            &contract(),
            vec![ConstructorArg::from("A"), ConstructorArg::Integer(1)],
        );
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["arguments"], serde_json::json!(["A", 1]));
    }

    #[test]
    fn test_buffered_rounds_up() {
        assert_eq!(buffered(100), 120);
        assert_eq!(buffered(21_000), 25_200);
        assert_eq!(buffered(1), 2);
        assert_eq!(buffered(0), 0);
        assert_eq!(buffered(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_buffered_never_below_estimate() {
        for estimate in [u64::MAX / 6, u64::MAX / 6 + 1, u64::MAX / 2, u64::MAX - 1] {
            let padded = buffered(estimate);
            assert!(padded >= estimate, "estimate {}", estimate);
            let exact = (u128::from(estimate) * 6).div_ceil(5);
            assert_eq!(u128::from(padded), exact.min(u128::from(u64::MAX)));
        }
    }

    #[test]
    fn test_manual_gas_skips_estimate() {
        let gas = GasLimit::resolve(" 3000000 ", || panic!("estimate must not run")).unwrap();
        assert_eq!(gas, GasLimit::Manual(3_000_000));
    }

    #[test]
    fn test_non_numeric_gas_falls_back_to_estimate() {
        for input in ["", "   ", "lots", "-5"] {
            let gas = GasLimit::resolve(input, || Ok(50_000)).unwrap();
            assert_eq!(gas, GasLimit::Estimated(60_000), "input {:?}", input);
        }
    }

    #[test]
    fn test_estimate_failure_message() {
        let err = GasLimit::resolve("", || Err("execution reverted".into())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Gas estimation failed: execution reverted. Try setting a manual gas limit."
        );
    }

    #[test]
    fn test_gas_serialization() {
        let json = serde_json::to_value(GasLimit::Estimated(120)).unwrap();
        assert_eq!(json, serde_json::json!({"source": "estimated", "value": 120}));
    }

    #[test]
    fn test_bsc_chain_params() {
        let chain = ChainParams::bsc_mainnet();
        assert_eq!(chain.chain_id_hex(), "0x38");
        assert!(!chain.needs_switch(56));
        assert!(chain.needs_switch(1));
        let json = serde_json::to_value(&chain).unwrap();
        assert_eq!(json["chainId"], "0x38");
        assert_eq!(json["nativeCurrency"]["decimals"], 18);
        assert_eq!(json["rpcUrls"][0], "https://bsc-dataseed.binance.org/");
    }

    #[test]
    fn test_explorer_links() {
        let chain = ChainParams::bsc_mainnet();
        assert_eq!(
            chain.address_url("0xabc").as_deref(),
            Some("https://bscscan.com/address/0xabc")
        );
        assert_eq!(chain.tx_url("0xdef").as_deref(), Some("https://bscscan.com/tx/0xdef"));
    }

    #[test]
    fn test_plan_build() {
        let c = contract();
        let plan = DeploymentPlan::build(
            Some(&c),
            ChainParams::bsc_mainnet(),
            "'My Token', 'MTK', 1000",
            "",
            |payload| {
                assert_eq!(payload.arguments.len(), 3);
                Ok(1000)
            },
        )
        .unwrap();
        assert_eq!(plan.contract, "Token");
        assert_eq!(plan.gas, GasLimit::Estimated(1200));
        assert_eq!(plan.payload.arguments[2], ConstructorArg::Integer(1000));
    }

    #[test]
    fn test_plan_requires_compile() {
        let err = DeploymentPlan::build(None, ChainParams::default(), "", "", |_| Ok(1)).unwrap_err();
        assert!(matches!(err, Error::MissingPrerequisite(_)));
    }
}
