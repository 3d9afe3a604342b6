//! Name validation and auto-name sequencing.
//!
//! Keys are entity names: non-empty, first character ASCII alphabetic, the
//! rest alphanumeric or underscore. The set-expression delimiters (`&`, `|`,
//! `!`) and whitespace are therefore never part of a key. Comparisons are
//! case-insensitive everywhere; the stored spelling is canonical.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, CoreResult};

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("static pattern"));

/// Sentinels that can never be used as entity or set names.
const RESERVED: &[&str] = &["select", "all", "none"];

/// True if `name` satisfies the identifier character set.
pub fn name_ok(name: &str) -> bool {
    NAME_RE.is_match(name)
}

/// True if `name` collides with a reserved sentinel (case-insensitive).
pub fn is_reserved(name: &str) -> bool {
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

/// Validate a candidate entity or set name.
pub fn validate(name: &str) -> CoreResult<()> {
    if !name_ok(name) {
        return Err(CoreError::InvalidName {
            name: name.to_string(),
        });
    }
    if is_reserved(name) {
        return Err(CoreError::ReservedName {
            name: name.to_string(),
        });
    }
    Ok(())
}

pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Auto-name sequence style for a container.
///
/// `Numeric` yields `prefix0, prefix1, ...` (zero-padded to `pad` digits).
/// `Alpha` yields `A, B, ... Z, AA, ...` style suffixes of fixed `width`,
/// used for channel names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeqFormat {
    Numeric { pad: usize },
    Alpha { width: usize },
}

impl Default for SeqFormat {
    fn default() -> Self {
        SeqFormat::Numeric { pad: 1 }
    }
}

impl SeqFormat {
    fn suffix(&self, seq: usize) -> String {
        match *self {
            SeqFormat::Numeric { pad } => format!("{seq:0pad$}"),
            SeqFormat::Alpha { width } => {
                let mut chars = Vec::with_capacity(width);
                let mut n = seq;
                for _ in 0..width.max(1) {
                    chars.push((b'A' + (n % 26) as u8) as char);
                    n /= 26;
                }
                chars.iter().rev().collect()
            }
        }
    }

    /// Upper bound on distinct suffixes, if the format is bounded.
    fn capacity(&self) -> Option<usize> {
        match *self {
            SeqFormat::Numeric { .. } => None,
            SeqFormat::Alpha { width } => Some(26usize.pow(width.max(1) as u32)),
        }
    }
}

/// Next free auto-generated name: prefix + smallest unused sequence value,
/// scanning ascending from 0 (slot-reuse policy: deleted slots below the
/// high-water mark are handed out again).
///
/// `in_use` reports whether a candidate collides with an existing key
/// (case-insensitive). `occupied` is the current entry count; among the
/// first `occupied + 1` numeric candidates at least one must be free.
pub fn next_name(
    prefix: &str,
    format: SeqFormat,
    occupied: usize,
    in_use: impl Fn(&str) -> bool,
) -> CoreResult<String> {
    let limit = match format.capacity() {
        Some(cap) => cap,
        None => occupied + 1,
    };
    for seq in 0..limit {
        let candidate = format!("{prefix}{}", format.suffix(seq));
        if !in_use(&candidate) {
            return Ok(candidate);
        }
    }
    Err(CoreError::NameSequenceExhausted {
        prefix: prefix.to_string(),
    })
}
