//! Identifier normalization — raw API names → Go identifiers.
//!
//! Covers the three casing conventions the generator emits (lower camel for
//! arguments and locals, Pascal for fields/methods/types, screaming snake for
//! enum constants) and the reserved-word table that keeps raw names from
//! colliding with Go keywords.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Deserialize;

/// Raw names that collide with Go keywords or predeclared identifiers, and
/// their replacements.
static RESERVED_WORDS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("string", "strValue"),
        ("internal", "internalMode"),
        ("type", "typeName"),
        ("range", "valueRange"),
        ("default", "defaultName"),
        ("interface", "interfaceName"),
        ("map", "resourceMap"),
        ("var", "varName"),
        ("func", "callbackFunc"),
    ])
});

static DEFAULT_POLICY: LazyLock<NamingPolicy> = LazyLock::new(NamingPolicy::default);

/// Prefix marking a method that is private/virtual in the native API.
pub const INTERNAL_METHOD_PREFIX: &str = "Internal_";

/// Where an identifier ends up in the generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentContext {
    /// Function/method parameters.
    Argument,
    /// Struct fields.
    Field,
    /// Generator-introduced local variables.
    Local,
}

/// Which identifier contexts the reserved-word table applies to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NamingPolicy {
    pub reserved_word_contexts: Vec<IdentContext>,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            reserved_word_contexts: vec![IdentContext::Argument, IdentContext::Local],
        }
    }
}

impl NamingPolicy {
    /// A policy that never substitutes reserved words.
    pub fn verbatim() -> Self {
        Self {
            reserved_word_contexts: Vec::new(),
        }
    }

    pub fn substitutes(&self, context: IdentContext) -> bool {
        self.reserved_word_contexts.contains(&context)
    }

    fn substitute<'a>(&self, raw: &'a str, context: IdentContext) -> &'a str {
        if self.substitutes(context) {
            reserved_word(raw).unwrap_or(raw)
        } else {
            raw
        }
    }

    /// Lower-camel parameter name.
    pub fn argument_name(&self, raw: &str) -> String {
        to_lower_camel(self.substitute(raw, IdentContext::Argument))
    }

    /// Lower-camel local variable name.
    pub fn local_name(&self, raw: &str) -> String {
        to_lower_camel(self.substitute(raw, IdentContext::Local))
    }

    /// Exported struct field name. Always starts with an upper-case letter.
    pub fn field_name(&self, raw: &str) -> String {
        upper_first_char(&to_camel(self.substitute(raw, IdentContext::Field)))
    }

    /// Format `raw` for the given context.
    pub fn format(&self, raw: &str, context: IdentContext) -> String {
        match context {
            IdentContext::Argument => self.argument_name(raw),
            IdentContext::Field => self.field_name(raw),
            IdentContext::Local => self.local_name(raw),
        }
    }
}

/// The policy used by the free functions in this module.
pub fn default_policy() -> &'static NamingPolicy {
    &DEFAULT_POLICY
}

/// Replacement for a raw name that collides with a reserved word.
pub fn reserved_word(raw: &str) -> Option<&'static str> {
    RESERVED_WORDS.get(raw).copied()
}

pub fn argument_name(raw: &str) -> String {
    DEFAULT_POLICY.argument_name(raw)
}

pub fn local_name(raw: &str) -> String {
    DEFAULT_POLICY.local_name(raw)
}

pub fn field_name(raw: &str) -> String {
    DEFAULT_POLICY.field_name(raw)
}

/// Pascal-case method name. A leading `_` marks an internal/virtual native
/// method and becomes an [`INTERNAL_METHOD_PREFIX`] prefix.
pub fn method_name(raw: &str) -> String {
    if raw.starts_with('_') {
        format!("{INTERNAL_METHOD_PREFIX}{}", to_camel(raw))
    } else {
        to_camel(raw)
    }
}

/// Screaming-snake constant name for an enum value scoped to a class and
/// enum, e.g. `NODE_PROCESS_MODE_PROCESS_MODE_PAUSABLE`.
pub fn class_enum_name(class: &str, enum_name: &str, constant: &str) -> String {
    format!(
        "{}_{}_{}",
        screaming_snake(class),
        screaming_snake(enum_name),
        screaming_snake(constant)
    )
}

pub fn upper_first_char(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lower_first_char(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Camel case
// ---------------------------------------------------------------------------

/// Upper camel (Pascal) case: `process_mode` → `ProcessMode`.
pub fn to_camel(raw: &str) -> String {
    camel(raw, true)
}

/// Lower camel case: `p_name` → `pName`.
pub fn to_lower_camel(raw: &str) -> String {
    camel(raw, false)
}

fn is_word_separator(c: char) -> bool {
    matches!(c, '_' | ' ' | '-' | '.')
}

/// Separators are dropped and capitalize the following letter. A digit also
/// capitalizes the letter after it. Other letters keep their case, so
/// acronyms survive (`ObjectID` stays `ObjectID`).
fn camel(raw: &str, upper_first: bool) -> String {
    let s = raw.trim();
    let mut out = String::with_capacity(s.len());
    let mut cap_next = upper_first;

    for (i, mut c) in s.chars().enumerate() {
        if cap_next {
            c = c.to_ascii_uppercase();
        } else if i == 0 {
            c = c.to_ascii_lowercase();
        }

        if c.is_ascii_alphabetic() {
            out.push(c);
            cap_next = false;
        } else if c.is_ascii_digit() {
            out.push(c);
            cap_next = true;
        } else {
            cap_next = is_word_separator(c);
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Screaming snake case
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    Char(char),
    /// A word separator. `inserted` is false when the raw input carried it.
    Sep { inserted: bool },
}

/// Screaming snake case with digit-boundary normalization.
///
/// Separators the word splitter inserts before a digit are dropped
/// (`Node2D` → `NODE2D`), as are separators it inserts between a digit and a
/// single-letter unit suffix (`Vector3i` → `VECTOR3I`). Separators present in
/// the raw name are kept (`foo_2d` → `FOO_2D`).
pub fn screaming_snake(raw: &str) -> String {
    let pieces = split_words(raw.trim());
    let mut out = String::with_capacity(pieces.len());

    for (i, piece) in pieces.iter().enumerate() {
        match *piece {
            Piece::Char(c) => out.push(c),
            Piece::Sep { inserted: false } => out.push('_'),
            Piece::Sep { inserted: true } => {
                let prev = i.checked_sub(1).and_then(|p| pieces.get(p));
                let next = pieces.get(i + 1);
                let after_next = pieces.get(i + 2);

                let before_digit = matches!(next, Some(Piece::Char(c)) if c.is_ascii_digit());
                let unit_suffix = matches!(prev, Some(Piece::Char(c)) if c.is_ascii_digit())
                    && matches!(next, Some(Piece::Char('I' | 'D')))
                    && !matches!(after_next, Some(Piece::Char(c)) if c.is_ascii_alphabetic());

                if !before_digit && !unit_suffix {
                    out.push('_');
                }
            }
        }
    }

    out
}

/// Split at case and letter/digit transitions, upper-casing as it goes.
fn split_words(s: &str) -> Vec<Piece> {
    let chars: Vec<char> = s.chars().collect();
    let mut pieces = Vec::with_capacity(chars.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        let is_cap = c.is_ascii_uppercase();
        let is_low = c.is_ascii_lowercase();
        let is_num = c.is_ascii_digit();
        let upper = c.to_ascii_uppercase();

        if let Some(&next) = chars.get(i + 1) {
            let next_cap = next.is_ascii_uppercase();
            let next_low = next.is_ascii_lowercase();
            let next_num = next.is_ascii_digit();

            if (is_cap && (next_low || next_num))
                || (is_low && (next_cap || next_num))
                || (is_num && (next_cap || next_low))
            {
                // End of an acronym: `JSONData` splits before the `D`.
                if is_cap && next_low && i > 0 && chars[i - 1].is_ascii_uppercase() {
                    pieces.push(Piece::Sep { inserted: true });
                }
                pieces.push(Piece::Char(upper));
                if is_low || is_num || next_num {
                    pieces.push(Piece::Sep { inserted: true });
                }
                continue;
            }
        }

        if is_word_separator(c) {
            pieces.push(Piece::Sep { inserted: false });
        } else {
            pieces.push(Piece::Char(upper));
        }
    }

    pieces
}
