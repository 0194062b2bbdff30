//! Wolfram rule numbers decoded into lookup tables.

use std::fmt;
use std::str::FromStr;

use crate::error::{LatticeError, Result};

pub const RULE_30: u8 = 30;    // Chaotic
pub const RULE_90: u8 = 90;    // Sierpinski triangle
pub const RULE_110: u8 = 110;  // Turing complete
pub const RULE_184: u8 = 184;  // Traffic flow

/// Next state for each of the 8 three-cell neighborhoods.
///
/// Entry `i` is bit `i` of the rule number, least significant first, so entry 0
/// answers the all-dead neighborhood and entry 7 the all-alive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleTable {
    number: u8,
    table: [bool; 8],
}

impl RuleTable {
    pub fn new(number: u8) -> Self {
        let mut table = [false; 8];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = (number >> i) & 1 == 1;
        }
        Self { number, table }
    }

    /// Decodes a rule number, rejecting anything outside `0..=255`.
    pub fn decode(rule_number: i64) -> Result<Self> {
        u8::try_from(rule_number)
            .map(Self::new)
            .map_err(|_| LatticeError::InvalidRuleNumber(rule_number.to_string()))
    }

    /// Decodes user text such as `" 110 "`.
    pub fn parse(input: &str) -> Result<Self> {
        input.parse()
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn entries(&self) -> &[bool; 8] {
        &self.table
    }

    /// Looks up a neighborhood index. Only the low three bits are used.
    #[inline]
    pub fn lookup(&self, index: usize) -> bool {
        self.table[index & 7]
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new(RULE_90)
    }
}

impl FromStr for RuleTable {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let number: i64 = trimmed
            .parse()
            .map_err(|_| LatticeError::InvalidRuleNumber(trimmed.to_string()))?;
        Self::decode(number)
    }
}

impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule {}", self.number)
    }
}
