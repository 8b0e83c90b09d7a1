//! Symbol codes, symbol rules and reel strips

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::scene::Pos;

/// Raw symbol code as stored in a scene
pub type Symbol = i32;

/// Empty cell: a removed symbol, or any read outside the scene
pub const EMPTY: Symbol = -1;

/// Game-specific symbol policy consulted by every evaluator.
///
/// Only [`is_wild`](SymbolRules::is_wild) is required. The defaults treat
/// negative codes as invalid, let a wild stand in for any start symbol and
/// give every cell a multiplier of 1, folded by the configured
/// [`MultiplierMode`].
pub trait SymbolRules {
    /// Whether a symbol may take part in a win at all.
    fn is_valid(&self, symbol: Symbol) -> bool {
        symbol >= 0
    }

    fn is_wild(&self, symbol: Symbol) -> bool;

    /// Whether `candidate` continues a run started by `start`.
    fn is_same(&self, candidate: Symbol, start: Symbol) -> bool {
        candidate == start || self.is_wild(candidate)
    }

    /// Maps a raw grid code to the code used for matching and payout.
    fn symbol(&self, raw: Symbol) -> Symbol {
        raw
    }

    /// Per-cell multiplier.
    fn multiplier(&self, _x: usize, _y: usize) -> i64 {
        1
    }

    /// Folds the cell multipliers of one win into its `other_mul`.
    ///
    /// Override for games whose combiner is neither a product nor a sum.
    fn combine_multipliers(&self, mode: MultiplierMode, multipliers: &[i64]) -> i64 {
        mode.combine(multipliers.iter().copied())
    }
}

impl<T: SymbolRules + ?Sized> SymbolRules for &T {
    fn is_valid(&self, symbol: Symbol) -> bool {
        (**self).is_valid(symbol)
    }

    fn is_wild(&self, symbol: Symbol) -> bool {
        (**self).is_wild(symbol)
    }

    fn is_same(&self, candidate: Symbol, start: Symbol) -> bool {
        (**self).is_same(candidate, start)
    }

    fn symbol(&self, raw: Symbol) -> Symbol {
        (**self).symbol(raw)
    }

    fn multiplier(&self, x: usize, y: usize) -> i64 {
        (**self).multiplier(x, y)
    }

    fn combine_multipliers(&self, mode: MultiplierMode, multipliers: &[i64]) -> i64 {
        (**self).combine_multipliers(mode, multipliers)
    }
}

/// `other_mul` for a win covering `positions`; 1 while multipliers are off.
pub(crate) fn fold_multipliers<R>(rules: &R, mode: Option<MultiplierMode>, positions: &[Pos]) -> i64
where
    R: SymbolRules + ?Sized,
{
    let Some(mode) = mode else {
        return 1;
    };
    let cells: Vec<i64> = positions.iter().map(|&(x, y)| rules.multiplier(x, y)).collect();
    rules.combine_multipliers(mode, &cells)
}

/// How per-cell multipliers along a win are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiplierMode {
    /// Product of every cell multiplier
    #[default]
    Product,
    /// Sum of the cell multipliers greater than 1 (1 when there are none)
    Additive,
}

impl MultiplierMode {
    /// Fold cell multipliers into a single "other multiplier".
    pub fn combine(self, multipliers: impl IntoIterator<Item = i64>) -> i64 {
        match self {
            Self::Product => multipliers.into_iter().product(),
            Self::Additive => {
                let sum: i64 = multipliers.into_iter().filter(|&m| m > 1).sum();
                sum.max(1)
            }
        }
    }
}

/// A multiplier attached to one scene cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellMultiplier {
    pub x: usize,
    pub y: usize,
    pub value: i64,
}

/// Table-driven [`SymbolRules`] for games that need no custom code
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BasicRules {
    /// Wild symbol codes
    #[serde(default)]
    pub wilds: Vec<Symbol>,
    /// Codes that never take part in a win (blanks, bonus triggers)
    #[serde(default)]
    pub invalid: Vec<Symbol>,
    /// Raw code → matching code
    #[serde(default)]
    pub remap: HashMap<Symbol, Symbol>,
    /// Multiplier cells; unlisted cells are 1
    #[serde(default)]
    pub multipliers: Vec<CellMultiplier>,
}

impl BasicRules {
    /// Rules with a single wild symbol
    pub fn with_wild(wild: Symbol) -> Self {
        Self {
            wilds: vec![wild],
            ..Default::default()
        }
    }

    /// Rules without any wild symbol
    pub fn no_wild() -> Self {
        Self::default()
    }

    /// Mark additional codes as invalid
    pub fn with_invalid(mut self, symbols: &[Symbol]) -> Self {
        self.invalid.extend_from_slice(symbols);
        self
    }

    /// Attach a multiplier to a cell
    pub fn with_multiplier(mut self, x: usize, y: usize, value: i64) -> Self {
        self.multipliers.retain(|m| m.x != x || m.y != y);
        self.multipliers.push(CellMultiplier { x, y, value });
        self
    }

    /// Remap a raw grid code
    pub fn with_remap(mut self, raw: Symbol, symbol: Symbol) -> Self {
        self.remap.insert(raw, symbol);
        self
    }
}

impl SymbolRules for BasicRules {
    fn is_valid(&self, symbol: Symbol) -> bool {
        symbol >= 0 && !self.invalid.contains(&symbol)
    }

    fn is_wild(&self, symbol: Symbol) -> bool {
        self.wilds.contains(&symbol)
    }

    fn symbol(&self, raw: Symbol) -> Symbol {
        self.remap.get(&raw).copied().unwrap_or(raw)
    }

    fn multiplier(&self, x: usize, y: usize) -> i64 {
        self.multipliers
            .iter()
            .find(|m| m.x == x && m.y == y)
            .map(|m| m.value)
            .unwrap_or(1)
    }
}

/// A reel strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelStrip {
    /// Symbol codes in strip order
    pub symbols: Vec<Symbol>,
}

impl ReelStrip {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    /// Get symbol at position (wraps around)
    pub fn symbol_at(&self, position: usize) -> Symbol {
        if self.symbols.is_empty() {
            return EMPTY;
        }
        self.symbols[position % self.symbols.len()]
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl From<Vec<Symbol>> for ReelStrip {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self::new(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = BasicRules::with_wild(0);
        assert!(rules.is_valid(3));
        assert!(!rules.is_valid(EMPTY));
        assert!(rules.is_same(0, 3));
        assert!(rules.is_same(3, 3));
        assert!(!rules.is_same(4, 3));
        assert_eq!(rules.multiplier(2, 2), 1);
    }

    #[test]
    fn test_invalid_and_remap() {
        let rules = BasicRules::no_wild().with_invalid(&[13]).with_remap(21, 1);
        assert!(!rules.is_valid(13));
        assert_eq!(rules.symbol(21), 1);
        assert_eq!(rules.symbol(5), 5);
    }

    #[test]
    fn test_cell_multiplier_replaces() {
        let rules = BasicRules::no_wild()
            .with_multiplier(1, 2, 3)
            .with_multiplier(1, 2, 5);
        assert_eq!(rules.multiplier(1, 2), 5);
        assert_eq!(rules.multipliers.len(), 1);
    }

    #[test]
    fn test_multiplier_modes() {
        assert_eq!(MultiplierMode::Product.combine([2, 1, 3]), 6);
        assert_eq!(MultiplierMode::Additive.combine([2, 1, 3]), 5);
        assert_eq!(MultiplierMode::Additive.combine([1, 1]), 1);
        assert_eq!(MultiplierMode::Product.combine(std::iter::empty()), 1);
    }

    /// Takes the largest cell multiplier instead of folding them all
    struct MaxMultiplier(BasicRules);

    impl SymbolRules for MaxMultiplier {
        fn is_wild(&self, symbol: Symbol) -> bool {
            self.0.is_wild(symbol)
        }

        fn multiplier(&self, x: usize, y: usize) -> i64 {
            self.0.multiplier(x, y)
        }

        fn combine_multipliers(&self, _mode: MultiplierMode, multipliers: &[i64]) -> i64 {
            multipliers.iter().copied().max().unwrap_or(1)
        }
    }

    #[test]
    fn test_custom_combiner() {
        let cells = [(0, 0), (1, 0), (2, 0)];
        let basic = BasicRules::no_wild().with_multiplier(0, 0, 2).with_multiplier(2, 0, 3);
        assert_eq!(fold_multipliers(&basic, Some(MultiplierMode::Product), &cells), 6);
        assert_eq!(fold_multipliers(&basic, None, &cells), 1);

        let max = MaxMultiplier(basic);
        assert_eq!(fold_multipliers(&max, Some(MultiplierMode::Product), &cells), 3);
        assert_eq!(fold_multipliers(&&max, Some(MultiplierMode::Additive), &cells), 3);
    }

    #[test]
    fn test_reel_strip_wrap() {
        let strip = ReelStrip::new(vec![1, 2, 3, 4, 5]);
        assert_eq!(strip.symbol_at(0), 1);
        assert_eq!(strip.symbol_at(5), 1);
        assert_eq!(strip.symbol_at(7), 3);
        assert_eq!(ReelStrip::new(Vec::new()).symbol_at(3), EMPTY);
    }
}
