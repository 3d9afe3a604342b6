//! Named sets of entries within one container, with `&`/`|`/`!` set algebra.
//!
//! A set is either a literal member list or an expression over other sets
//! and entry keys, parsed and validated at definition time. Expressions are
//! evaluated left to right with no operator precedence; `!` subtracts the
//! following operand from the running accumulator. Evaluation resolves
//! against the container's current key space: stale literal members and
//! unresolved expression operands contribute nothing rather than failing.
//!
//! The reserved name `all` always evaluates to the full key space. It is
//! maintained by recomputation, never stored, and cannot be created, renamed
//! or deleted.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CoreError, CoreResult};
use crate::name::{self, eq_ignore_case};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetOp {
    And,
    Or,
    Not,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetToken {
    Op(SetOp),
    Operand(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
enum SetValue {
    Literal(Vec<String>),
    Expression(Vec<SetToken>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct NmSet {
    name: String,
    value: SetValue,
}

/// The sets owned by one container. All lookups are case-insensitive; the
/// spelling given at creation is canonical.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetTable {
    sets: Vec<NmSet>,
}

pub const ALL_SET: &str = "all";

impl SetTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, name: &str) -> Option<&NmSet> {
        self.sets.iter().find(|s| eq_ignore_case(&s.name, name))
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut NmSet> {
        self.sets.iter_mut().find(|s| eq_ignore_case(&s.name, name))
    }

    /// User-defined set names in creation order (`all` is implicit and not
    /// listed).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// True for `all` and for any user-defined set.
    pub fn contains_set(&self, name: &str) -> bool {
        eq_ignore_case(name, ALL_SET) || self.find(name).is_some()
    }

    pub fn is_expression(&self, name: &str) -> CoreResult<bool> {
        if eq_ignore_case(name, ALL_SET) {
            return Ok(false);
        }
        match self.find(name) {
            Some(set) => Ok(matches!(set.value, SetValue::Expression(_))),
            None => Err(CoreError::SetNotFound {
                name: name.to_string(),
            }),
        }
    }

    fn check_new_name(&self, name: &str) -> CoreResult<()> {
        name::validate(name)?;
        if self.find(name).is_some() {
            return Err(CoreError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Create an empty literal set.
    pub fn create(&mut self, name: &str) -> CoreResult<()> {
        self.check_new_name(name)?;
        debug!("create set: {name}");
        self.sets.push(NmSet {
            name: name.to_string(),
            value: SetValue::Literal(Vec::new()),
        });
        Ok(())
    }

    /// Create an expression set from text such as `"s1 & s2 | rec0 ! s3"`.
    /// The expression is parsed and validated now; malformed input fails
    /// immediately rather than at evaluation.
    pub fn create_expression(&mut self, name: &str, expr: &str) -> CoreResult<()> {
        let tokens = parse_expression(expr)?;
        self.check_new_name(name)?;
        debug!("create expression set: {name} = {expr}");
        self.sets.push(NmSet {
            name: name.to_string(),
            value: SetValue::Expression(tokens),
        });
        Ok(())
    }

    pub fn delete(&mut self, name: &str) -> CoreResult<()> {
        if eq_ignore_case(name, ALL_SET) {
            return Err(CoreError::ReservedName {
                name: name.to_string(),
            });
        }
        let idx = self
            .sets
            .iter()
            .position(|s| eq_ignore_case(&s.name, name))
            .ok_or_else(|| CoreError::SetNotFound {
                name: name.to_string(),
            })?;
        debug!("delete set: {}", self.sets[idx].name);
        self.sets.remove(idx);
        Ok(())
    }

    /// Rename a set. Expression operands in other sets that referenced the
    /// old name are rewritten in the same step.
    pub fn rename(&mut self, name: &str, new_name: &str) -> CoreResult<()> {
        if eq_ignore_case(name, ALL_SET) {
            return Err(CoreError::ReservedName {
                name: name.to_string(),
            });
        }
        if self.find(name).is_none() {
            return Err(CoreError::SetNotFound {
                name: name.to_string(),
            });
        }
        if !eq_ignore_case(name, new_name) {
            self.check_new_name(new_name)?;
        } else {
            name::validate(new_name)?;
        }
        debug!("rename set: {name} -> {new_name}");
        for set in &mut self.sets {
            if let SetValue::Expression(tokens) = &mut set.value {
                for token in tokens {
                    if let SetToken::Operand(op) = token {
                        if eq_ignore_case(op, name) {
                            *op = new_name.to_string();
                        }
                    }
                }
            }
        }
        if let Some(set) = self.find_mut(name) {
            set.name = new_name.to_string();
        }
        Ok(())
    }

    /// Add a key to a literal set. The key must exist in the container right
    /// now; its canonical spelling is stored.
    pub fn add(&mut self, set_name: &str, key: &str, universe: &[&str]) -> CoreResult<()> {
        let canonical = universe
            .iter()
            .find(|k| eq_ignore_case(k, key))
            .map(|k| k.to_string())
            .ok_or_else(|| CoreError::KeyNotFound {
                key: key.to_string(),
            })?;
        if eq_ignore_case(set_name, ALL_SET) {
            return Err(CoreError::ReservedName {
                name: set_name.to_string(),
            });
        }
        let set = self
            .find_mut(set_name)
            .ok_or_else(|| CoreError::SetNotFound {
                name: set_name.to_string(),
            })?;
        match &mut set.value {
            SetValue::Literal(members) => {
                if !members.iter().any(|m| eq_ignore_case(m, &canonical)) {
                    members.push(canonical);
                }
                Ok(())
            }
            SetValue::Expression(_) => Err(CoreError::ExpressionSet {
                name: set.name.clone(),
            }),
        }
    }

    /// Remove a key from a literal set. Returns whether it was a member.
    pub fn remove(&mut self, set_name: &str, key: &str) -> CoreResult<bool> {
        if eq_ignore_case(set_name, ALL_SET) {
            return Err(CoreError::ReservedName {
                name: set_name.to_string(),
            });
        }
        let set = self
            .find_mut(set_name)
            .ok_or_else(|| CoreError::SetNotFound {
                name: set_name.to_string(),
            })?;
        match &mut set.value {
            SetValue::Literal(members) => {
                let before = members.len();
                members.retain(|m| !eq_ignore_case(m, key));
                Ok(members.len() != before)
            }
            SetValue::Expression(_) => Err(CoreError::ExpressionSet {
                name: set.name.clone(),
            }),
        }
    }

    pub fn contains(&self, set_name: &str, key: &str, universe: &[&str]) -> CoreResult<bool> {
        let members = self.evaluate(set_name, universe)?;
        Ok(members.iter().any(|m| eq_ignore_case(m, key)))
    }

    /// Evaluate a set against the container's current ordered key space.
    /// Results come back in creation order. Expression cycles are detected
    /// via a visited-name stack and fail instead of looping.
    pub fn evaluate(&self, name: &str, universe: &[&str]) -> CoreResult<Vec<String>> {
        let mut visited: Vec<String> = Vec::new();
        self.eval_named(name, universe, &mut visited)
    }

    fn eval_named(
        &self,
        name: &str,
        universe: &[&str],
        visited: &mut Vec<String>,
    ) -> CoreResult<Vec<String>> {
        if eq_ignore_case(name, ALL_SET) {
            return Ok(universe.iter().map(|k| k.to_string()).collect());
        }
        let set = self.find(name).ok_or_else(|| CoreError::SetNotFound {
            name: name.to_string(),
        })?;
        if visited.iter().any(|v| eq_ignore_case(v, &set.name)) {
            return Err(CoreError::CyclicSetReference {
                name: set.name.clone(),
            });
        }
        visited.push(set.name.clone());
        let result = match &set.value {
            SetValue::Literal(members) => Ok(universe
                .iter()
                .filter(|k| members.iter().any(|m| eq_ignore_case(m, k)))
                .map(|k| k.to_string())
                .collect()),
            SetValue::Expression(tokens) => self.eval_tokens(tokens, universe, visited),
        };
        visited.pop();
        result
    }

    /// An operand resolves first as a set name, then as an entry key;
    /// anything else contributes the empty set.
    fn eval_operand(
        &self,
        operand: &str,
        universe: &[&str],
        visited: &mut Vec<String>,
    ) -> CoreResult<Vec<String>> {
        if self.contains_set(operand) {
            return self.eval_named(operand, universe, visited);
        }
        Ok(universe
            .iter()
            .filter(|k| eq_ignore_case(k, operand))
            .map(|k| k.to_string())
            .collect())
    }

    fn eval_tokens(
        &self,
        tokens: &[SetToken],
        universe: &[&str],
        visited: &mut Vec<String>,
    ) -> CoreResult<Vec<String>> {
        // The accumulator starts empty; a leading operand folds in as a
        // union. Membership vectors stay in universe (creation) order.
        let mut acc: Vec<String> = Vec::new();
        let mut pending = SetOp::Or;
        for token in tokens {
            match token {
                SetToken::Op(op) => pending = *op,
                SetToken::Operand(operand) => {
                    let rhs = self.eval_operand(operand, universe, visited)?;
                    acc = apply_op(&acc, pending, &rhs, universe);
                }
            }
        }
        Ok(acc)
    }

    /// Drop a deleted entry's key from every literal set. Expressions need
    /// no repair: their operands resolve against the key space at
    /// evaluation time.
    pub fn remove_key_everywhere(&mut self, key: &str) {
        for set in &mut self.sets {
            if let SetValue::Literal(members) = &mut set.value {
                members.retain(|m| !eq_ignore_case(m, key));
            }
        }
    }

    /// Rewrite a renamed entry's key in every literal member list, and in
    /// expression operands that refer to the entry (operands shadowed by a
    /// set of the same name are left alone; they resolve to the set).
    pub fn rename_key(&mut self, old_key: &str, new_key: &str) {
        let shadowed = self.contains_set(old_key);
        for set in &mut self.sets {
            match &mut set.value {
                SetValue::Literal(members) => {
                    for m in members {
                        if eq_ignore_case(m, old_key) {
                            *m = new_key.to_string();
                        }
                    }
                }
                SetValue::Expression(tokens) => {
                    if shadowed {
                        continue;
                    }
                    for token in tokens {
                        if let SetToken::Operand(op) = token {
                            if eq_ignore_case(op, old_key) {
                                *op = new_key.to_string();
                            }
                        }
                    }
                }
            }
        }
    }
}

fn apply_op(acc: &[String], op: SetOp, rhs: &[String], universe: &[&str]) -> Vec<String> {
    let in_rhs = |k: &str| rhs.iter().any(|r| eq_ignore_case(r, k));
    match op {
        SetOp::And => acc.iter().filter(|k| in_rhs(k)).cloned().collect(),
        SetOp::Not => acc.iter().filter(|k| !in_rhs(k)).cloned().collect(),
        // Union re-walks the universe so the result stays in creation order.
        SetOp::Or => universe
            .iter()
            .filter(|k| acc.iter().any(|a| eq_ignore_case(a, k)) || in_rhs(k))
            .map(|k| k.to_string())
            .collect(),
    }
}

/// Parse expression text into a validated token sequence. The grammar is
/// `[op] operand (op operand)*`: no two adjacent operands, no trailing
/// operator, at least one operand. Operand spellings must satisfy the key
/// character set (or be the reserved `all`).
pub fn parse_expression(expr: &str) -> CoreResult<Vec<SetToken>> {
    let invalid = || CoreError::InvalidName {
        name: expr.to_string(),
    };
    let mut tokens: Vec<SetToken> = Vec::new();
    let mut word = String::new();
    let mut flush = |word: &mut String, tokens: &mut Vec<SetToken>| -> CoreResult<()> {
        if word.is_empty() {
            return Ok(());
        }
        if !name::name_ok(word) && !eq_ignore_case(word, ALL_SET) {
            return Err(invalid());
        }
        if matches!(tokens.last(), Some(SetToken::Operand(_))) {
            return Err(invalid());
        }
        tokens.push(SetToken::Operand(std::mem::take(word)));
        Ok(())
    };
    for c in expr.chars() {
        let op = match c {
            '&' => Some(SetOp::And),
            '|' => Some(SetOp::Or),
            '!' => Some(SetOp::Not),
            _ => None,
        };
        if let Some(op) = op {
            flush(&mut word, &mut tokens)?;
            if matches!(tokens.last(), Some(SetToken::Op(_))) {
                return Err(invalid());
            }
            tokens.push(SetToken::Op(op));
        } else if c.is_whitespace() {
            flush(&mut word, &mut tokens)?;
        } else {
            word.push(c);
        }
    }
    flush(&mut word, &mut tokens)?;
    match tokens.last() {
        Some(SetToken::Operand(_)) => Ok(tokens),
        _ => Err(invalid()),
    }
}
