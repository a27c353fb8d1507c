//! Operator symbol table — native operator tokens → method name fragments.

use std::collections::HashMap;
use std::sync::LazyLock;

use anyhow::Result;

static OPERATOR_ID_NAMES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("==", "equal"),
        ("!=", "not_equal"),
        ("<", "less"),
        ("<=", "less_equal"),
        (">", "greater"),
        (">=", "greater_equal"),
        ("+", "add"),
        ("-", "subtract"),
        ("*", "multiply"),
        ("/", "divide"),
        ("unary-", "negate"),
        ("unary+", "positive"),
        // Matches the engine's VARIANT_OP_MODULE constant.
        ("%", "module"),
        ("<<", "shift_left"),
        (">>", "shift_right"),
        ("&", "bit_and"),
        ("|", "bit_or"),
        ("^", "bit_xor"),
        ("~", "bit_negate"),
        ("and", "and"),
        ("or", "or"),
        ("xor", "xor"),
        ("not", "not"),
        ("in", "in"),
    ])
});

/// Identifier fragment for an operator token, or `""` if the token is not
/// in the table.
pub fn operator_name(token: &str) -> &'static str {
    OPERATOR_ID_NAMES.get(token).copied().unwrap_or("")
}

/// Like [`operator_name`], but an unknown token is an error.
pub fn operator_id_name(token: &str) -> Result<&'static str> {
    match operator_name(token) {
        "" => anyhow::bail!("unsupported operator `{token}` in API description"),
        name => Ok(name),
    }
}

/// All known operator tokens.
pub fn operator_tokens() -> impl Iterator<Item = &'static str> {
    OPERATOR_ID_NAMES.keys().copied()
}
