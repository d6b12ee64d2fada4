//! Constructor argument tokenizer: splits free text into typed arguments
//!
//! Splitting is a single left-to-right pass with one character of
//! lookback. Commas separate tokens unless they sit inside a quoted
//! region. A quote opens a region unless the character before it is a
//! backslash, and only the same quote character closes it. Quote
//! characters stay in the token; coercion strips them afterwards.
//!
//! Guarantees:
//! - Total: every input yields a list, malformed input included
//! - Deterministic: same input always produces the same list
//! - Order preserving: argument `i` comes from segment `i`

use super::value::ConstructorArg;

/// Splitter for a raw constructor argument string
pub struct ArgTokenizer {
    input: Vec<char>,
    position: usize,
    quote: Option<char>,
    current: String,
}

impl ArgTokenizer {
    /// Create a new tokenizer for the given argument text
    pub fn new(text: &str) -> Self {
        ArgTokenizer {
            input: text.chars().collect(),
            position: 0,
            quote: None,
            current: String::new(),
        }
    }

    /// Split the input into trimmed tokens, quotes still attached
    pub fn split(mut self) -> Vec<String> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.advance() {
            match ch {
                '\'' | '"' if !self.is_escaped() => {
                    self.toggle_quote(ch);
                    self.current.push(ch);
                }
                ',' if self.quote.is_none() => tokens.push(self.take_token()),
                _ => self.current.push(ch),
            }
        }

        // An unterminated quote just ends here with whatever was read.
        let last = self.take_token();
        if !last.is_empty() {
            tokens.push(last);
        }

        tokens
    }

    // ── Character helpers ──────────────────────────────────

    fn advance(&mut self) -> Option<char> {
        let ch = self.input.get(self.position).copied();
        if ch.is_some() {
            self.position += 1;
        }
        ch
    }

    /// Whether the character just consumed follows a backslash.
    /// Only one character is inspected, so `\\'` still counts as escaped.
    fn is_escaped(&self) -> bool {
        self.position >= 2 && self.input[self.position - 2] == '\\'
    }

    fn toggle_quote(&mut self, ch: char) {
        match self.quote {
            None => self.quote = Some(ch),
            Some(open) if open == ch => self.quote = None,
            Some(_) => {}
        }
    }

    fn take_token(&mut self) -> String {
        let token = self.current.trim().to_string();
        self.current.clear();
        token
    }
}

// ── Coercion ───────────────────────────────────────────

/// Coerce one trimmed token into a typed argument
///
/// Priority: quoted string, boolean, number, bare string.
pub fn coerce(token: &str) -> ConstructorArg {
    if let Some(inner) = strip_matching_quotes(token) {
        return ConstructorArg::String(inner.to_string());
    }

    match token.to_lowercase().as_str() {
        "true" => return ConstructorArg::Boolean(true),
        "false" => return ConstructorArg::Boolean(false),
        _ => {}
    }

    if let Some(value) = parse_decimal(token) {
        return if token.contains('.') {
            ConstructorArg::Float(value)
        } else {
            parse_leading_integer(token, value)
        };
    }

    ConstructorArg::String(token.to_string())
}

fn strip_matching_quotes(token: &str) -> Option<&str> {
    if token.len() < 2 {
        return None;
    }
    ['\'', '"']
        .into_iter()
        .find(|&q| token.starts_with(q) && token.ends_with(q))
        .map(|_| &token[1..token.len() - 1])
}

/// Full-token numeric test over decimal forms. The `inf`/`infinity`/`nan`
/// spellings and hex literals stay strings; a decimal too large for `f64`
/// still counts as a number.
fn parse_decimal(token: &str) -> Option<f64> {
    let is_decimal_form = token
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !is_decimal_form {
        return None;
    }
    token.parse::<f64>().ok()
}

/// Read the sign and leading digit run; anything after is ignored, so an
/// exponent form like `1e3` yields `1`. A run wider than `i128` keeps the
/// float value of the whole token.
fn parse_leading_integer(token: &str, fallback: f64) -> ConstructorArg {
    let unsigned = token.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(token);
    let sign_len = token.len() - unsigned.len();
    let digit_len = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    match token[..sign_len + digit_len].parse::<i128>() {
        Ok(v) => ConstructorArg::Integer(v),
        Err(_) => ConstructorArg::Float(fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(input: &str) -> Vec<String> {
        ArgTokenizer::new(input).split()
    }

    // ── Splitting ──────────────────────────────────────

    #[test]
    fn test_split_simple() {
        assert_eq!(split("a, b ,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_keeps_quotes_on_tokens() {
        assert_eq!(split("'a,b', \"c\""), vec!["'a,b'", "\"c\""]);
    }

    #[test]
    fn test_split_other_quote_inside_region() {
        assert_eq!(split(r#""it's", 5"#), vec![r#""it's""#, "5"]);
        assert_eq!(split(r#"'say "hi", ok', 1"#), vec![r#"'say "hi", ok'"#, "1"]);
    }

    #[test]
    fn test_split_escaped_quote_does_not_close() {
        assert_eq!(split(r"'it\'s, fine', 2"), vec![r"'it\'s, fine'", "2"]);
    }

    #[test]
    fn test_split_escaped_quote_does_not_open() {
        assert_eq!(split(r"a\'b, c"), vec![r"a\'b", "c"]);
    }

    #[test]
    fn test_split_double_backslash_still_escapes() {
        // The quote after `\\` is treated as escaped, so the region never closes.
        assert_eq!(split(r"'a\\', b"), vec![r"'a\\', b"]);
    }

    #[test]
    fn test_split_unterminated_quote() {
        assert_eq!(split("x, 'abc, d"), vec!["x", "'abc, d"]);
    }

    #[test]
    fn test_split_trailing_comma_dropped() {
        assert_eq!(split("a, b,"), vec!["a", "b"]);
        assert_eq!(split("a, b,   "), vec!["a", "b"]);
    }

    #[test]
    fn test_split_interior_and_leading_empty_segments_kept() {
        assert_eq!(split("a,,b"), vec!["a", "", "b"]);
        assert_eq!(split(",a"), vec!["", "a"]);
    }

    #[test]
    fn test_split_blank() {
        assert!(split("").is_empty());
        assert!(split("   \t\n ").is_empty());
    }

    #[test]
    fn test_split_non_ascii() {
        assert_eq!(split("'héllo, wörld', ü"), vec!["'héllo, wörld'", "ü"]);
    }

    // ── Coercion ───────────────────────────────────────

    #[test]
    fn test_coerce_quoted_strings() {
        assert_eq!(coerce("'hello'"), ConstructorArg::String("hello".into()));
        assert_eq!(coerce("\"hello\""), ConstructorArg::String("hello".into()));
        assert_eq!(coerce("''"), ConstructorArg::String(String::new()));
        assert_eq!(coerce("'42'"), ConstructorArg::String("42".into()));
        assert_eq!(coerce("'true'"), ConstructorArg::String("true".into()));
    }

    #[test]
    fn test_coerce_mismatched_quotes_are_bare_strings() {
        assert_eq!(coerce("'abc\""), ConstructorArg::String("'abc\"".into()));
        assert_eq!(coerce("'"), ConstructorArg::String("'".into()));
    }

    #[test]
    fn test_coerce_does_not_unescape() {
        assert_eq!(coerce(r"'it\'s'"), ConstructorArg::String(r"it\'s".into()));
    }

    #[test]
    fn test_coerce_booleans_case_insensitive() {
        assert_eq!(coerce("true"), ConstructorArg::Boolean(true));
        assert_eq!(coerce("TRUE"), ConstructorArg::Boolean(true));
        assert_eq!(coerce("False"), ConstructorArg::Boolean(false));
        assert_eq!(coerce("truey"), ConstructorArg::String("truey".into()));
    }

    #[test]
    fn test_coerce_integers() {
        assert_eq!(coerce("42"), ConstructorArg::Integer(42));
        assert_eq!(coerce("-7"), ConstructorArg::Integer(-7));
        assert_eq!(coerce("+5"), ConstructorArg::Integer(5));
        assert_eq!(coerce("007"), ConstructorArg::Integer(7));
        assert_eq!(
            coerce("1000000000000000000000000"),
            ConstructorArg::Integer(1_000_000_000_000_000_000_000_000)
        );
    }

    #[test]
    fn test_coerce_exponent_without_dot_reads_leading_digits() {
        assert_eq!(coerce("1e3"), ConstructorArg::Integer(1));
        assert_eq!(coerce("25E2"), ConstructorArg::Integer(25));
    }

    #[test]
    fn test_coerce_overflowing_decimal_is_still_numeric() {
        assert_eq!(coerce("1e400"), ConstructorArg::Integer(1));
        assert_eq!(coerce("-7e999"), ConstructorArg::Integer(-7));
        assert_eq!(coerce("1.5e400"), ConstructorArg::Float(f64::INFINITY));
    }

    #[test]
    fn test_coerce_floats() {
        assert_eq!(coerce("3.14"), ConstructorArg::Float(3.14));
        assert_eq!(coerce(".5"), ConstructorArg::Float(0.5));
        assert_eq!(coerce("5."), ConstructorArg::Float(5.0));
        assert_eq!(coerce("1.5e3"), ConstructorArg::Float(1500.0));
        assert_eq!(coerce("-0.25"), ConstructorArg::Float(-0.25));
    }

    #[test]
    fn test_coerce_integer_wider_than_i128_falls_back_to_float() {
        let wide = "1".repeat(50);
        match coerce(&wide) {
            ConstructorArg::Float(v) => assert!(v > 1e48),
            other => panic!("expected float, got {:?}", other),
        }
    }

    #[test]
    fn test_coerce_non_decimal_forms_stay_strings() {
        for token in ["NaN", "inf", "Infinity", "0x1A", "1_000", "12abc", "", "-", "."] {
            assert_eq!(
                coerce(token),
                ConstructorArg::String(token.to_string()),
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn test_coerce_address_is_string() {
        let addr = "0x5B38Da6a701c568545dCfcB03FcB875f56beddC4";
        assert_eq!(coerce(addr), ConstructorArg::String(addr.into()));
    }
}
