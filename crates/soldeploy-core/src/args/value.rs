//! Coerced constructor argument values
//!
//! These are what the deploy call binds positionally to the constructor's
//! parameters. Serialization is untagged so a list renders as a plain JSON
//! array (`["hello", 42, true]`), the shape a web3 client expects.

/// A single typed constructor argument
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ConstructorArg {
    /// `true` / `false`, matched case-insensitively
    Boolean(bool),
    /// Numeric token without a decimal point
    Integer(i128),
    /// Numeric token with a decimal point, or an integer too wide for `i128`
    Float(f64),
    /// Quoted token with its quotes stripped, or any token nothing else claimed
    String(String),
}

/// Ordered constructor arguments; position `i` binds to parameter `i`
pub type ConstructorArgs = Vec<ConstructorArg>;

impl ConstructorArg {
    /// Get the type name for display
    pub fn type_name(&self) -> &'static str {
        match self {
            ConstructorArg::Boolean(_) => "Boolean",
            ConstructorArg::Integer(_) => "Integer",
            ConstructorArg::Float(_) => "Float",
            ConstructorArg::String(_) => "String",
        }
    }
}

impl std::fmt::Display for ConstructorArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstructorArg::Boolean(b) => write!(f, "{}", b),
            ConstructorArg::Integer(i) => write!(f, "{}", i),
            ConstructorArg::Float(v) => write!(f, "{}", v),
            ConstructorArg::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<&str> for ConstructorArg {
    fn from(value: &str) -> Self {
        ConstructorArg::String(value.to_string())
    }
}

impl From<bool> for ConstructorArg {
    fn from(value: bool) -> Self {
        ConstructorArg::Boolean(value)
    }
}

impl From<i128> for ConstructorArg {
    fn from(value: i128) -> Self {
        ConstructorArg::Integer(value)
    }
}

impl From<f64> for ConstructorArg {
    fn from(value: f64) -> Self {
        ConstructorArg::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_plain_json_array() {
        let args: ConstructorArgs = vec![
            "hello".into(),
            ConstructorArg::Integer(42),
            true.into(),
            ConstructorArg::Float(3.5),
        ];
        let json = serde_json::to_string(&args).unwrap();
        assert_eq!(json, r#"["hello",42,true,3.5]"#);
    }

    #[test]
    fn test_serializes_wide_integer_without_precision_loss() {
        let args: ConstructorArgs = vec![ConstructorArg::Integer(1_000_000_000_000_000_000_000_000)];
        let json = serde_json::to_string(&args).unwrap();
        assert_eq!(json, "[1000000000000000000000000]");
    }

    #[test]
    fn test_display() {
        assert_eq!(ConstructorArg::from("abc").to_string(), "\"abc\"");
        assert_eq!(ConstructorArg::Integer(-7).to_string(), "-7");
        assert_eq!(ConstructorArg::Boolean(false).to_string(), "false");
        assert_eq!(ConstructorArg::Integer(1).type_name(), "Integer");
    }
}
