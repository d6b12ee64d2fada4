//! Constructor arguments: tokenizer, coercion, and value types
//!
//! Turns the free-text "constructor arguments" field into the ordered,
//! typed list handed to the deploy call.

pub mod tokenizer;
pub mod value;

pub use tokenizer::{coerce, ArgTokenizer};
pub use value::{ConstructorArg, ConstructorArgs};

/// Parse a comma-separated argument string into typed constructor arguments
///
/// # Guarantees
/// - Total: never fails; blank input yields an empty list
/// - Deterministic: same input always produces the same list
/// - Length equals the number of top-level segments, minus a trailing blank one
///
/// # Example
/// ```
/// use soldeploy_core::args::{parse_constructor_args, ConstructorArg};
///
/// let args = parse_constructor_args("'hello', 42, true");
/// assert_eq!(args, vec![
///     ConstructorArg::String("hello".into()),
///     ConstructorArg::Integer(42),
///     ConstructorArg::Boolean(true),
/// ]);
/// ```
pub fn parse_constructor_args(text: &str) -> ConstructorArgs {
    if text.trim().is_empty() {
        return Vec::new();
    }

    ArgTokenizer::new(text)
        .split()
        .iter()
        .map(|token| coerce(token))
        .collect()
}
