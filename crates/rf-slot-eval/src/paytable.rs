//! Paytable and payline definitions

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{SlotEvalError, SlotEvalResult};
use crate::scene::Pos;
use crate::symbols::Symbol;

/// Payout multipliers per symbol.
///
/// `pays[symbol][n - 1]` is the multiplier for `n` matching symbols. Arrays
/// may differ in length; counts beyond an array's length use its last entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PayTablesDef", into = "PayTablesDef")]
pub struct PayTables {
    pays: HashMap<Symbol, Vec<i64>>,
    names: HashMap<String, Symbol>,
}

/// Serialized paytable entry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SymbolPays {
    symbol: Symbol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    pays: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PayTablesDef {
    symbols: Vec<SymbolPays>,
}

impl TryFrom<PayTablesDef> for PayTables {
    type Error = SlotEvalError;

    fn try_from(def: PayTablesDef) -> SlotEvalResult<Self> {
        let mut table = PayTables::new();
        for entry in def.symbols {
            table.insert(entry.symbol, entry.pays)?;
            if let Some(name) = entry.name {
                table.set_name(name, entry.symbol)?;
            }
        }
        Ok(table)
    }
}

impl From<PayTables> for PayTablesDef {
    fn from(table: PayTables) -> Self {
        let mut names: HashMap<Symbol, String> = table
            .names
            .into_iter()
            .map(|(name, symbol)| (symbol, name))
            .collect();
        let mut symbols: Vec<SymbolPays> = table
            .pays
            .into_iter()
            .map(|(symbol, pays)| SymbolPays {
                symbol,
                name: names.remove(&symbol),
                pays,
            })
            .collect();
        symbols.sort_by_key(|entry| entry.symbol);
        PayTablesDef { symbols }
    }
}

impl PayTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert) plus a display name
    pub fn with_symbol(
        mut self,
        symbol: Symbol,
        name: impl Into<String>,
        pays: &[i64],
    ) -> SlotEvalResult<Self> {
        self.insert(symbol, pays.to_vec())?;
        self.set_name(name, symbol)?;
        Ok(self)
    }

    /// Set the payout array for a symbol, replacing any previous one.
    pub fn insert(&mut self, symbol: Symbol, pays: Vec<i64>) -> SlotEvalResult<()> {
        if let Some(idx) = pays.iter().position(|&p| p < 0) {
            return Err(SlotEvalError::NegativePayout {
                symbol,
                count: idx + 1,
            });
        }
        self.pays.insert(symbol, pays);
        Ok(())
    }

    /// Register a display name for a symbol code.
    pub fn set_name(&mut self, name: impl Into<String>, symbol: Symbol) -> SlotEvalResult<()> {
        let name = name.into();
        match self.names.get(&name) {
            Some(&existing) if existing != symbol => Err(SlotEvalError::DuplicateSymbolName(name)),
            _ => {
                self.names.retain(|_, s| *s != symbol);
                self.names.insert(name, symbol);
                Ok(())
            }
        }
    }

    /// Payout multiplier for `count` matching symbols.
    ///
    /// 0 when the symbol has no entry or `count` is 0; otherwise the entry at
    /// `min(count, len) - 1`.
    pub fn payout(&self, symbol: Symbol, count: usize) -> i64 {
        if count == 0 {
            return 0;
        }
        match self.pays.get(&symbol) {
            Some(pays) if !pays.is_empty() => pays[count.min(pays.len()) - 1],
            _ => 0,
        }
    }

    /// `count` capped at the symbol's payout array length (0 if absent)
    pub fn clamp_count(&self, symbol: Symbol, count: usize) -> usize {
        self.pays.get(&symbol).map_or(0, |pays| count.min(pays.len()))
    }

    pub fn pays(&self, symbol: Symbol) -> Option<&[i64]> {
        self.pays.get(&symbol).map(Vec::as_slice)
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.pays.contains_key(&symbol)
    }

    /// Symbol codes with a payout entry, ascending
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = self.pays.keys().copied().collect();
        symbols.sort_unstable();
        symbols
    }

    pub fn symbol_by_name(&self, name: &str) -> Option<Symbol> {
        self.names.get(name).copied()
    }

    /// Like [`symbol_by_name`](Self::symbol_by_name), as an error
    pub fn resolve(&self, name: &str) -> SlotEvalResult<Symbol> {
        self.symbol_by_name(name)
            .ok_or_else(|| SlotEvalError::UnknownSymbolName(name.to_string()))
    }

    pub fn name_of(&self, symbol: Symbol) -> Option<&str> {
        self.names
            .iter()
            .find(|&(_, &s)| s == symbol)
            .map(|(name, _)| name.as_str())
    }
}

/// A payline: one cell per reel, in pay order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payline {
    /// Payline index (0-based)
    pub index: usize,
    /// Cells in left-to-right order
    pub cells: Vec<Pos>,
}

impl Payline {
    /// Line through `rows[x]` on reel `x`
    pub fn from_rows(index: usize, rows: &[usize]) -> Self {
        Self {
            index,
            cells: rows.iter().copied().enumerate().collect(),
        }
    }

    /// Create a straight line (same row across all reels)
    pub fn straight(index: usize, row: usize, reels: usize) -> Self {
        Self::from_rows(index, &vec![row; reels])
    }

    /// Create a V-shaped line
    pub fn v_shape(index: usize, reels: usize, rows: usize) -> Self {
        let mid = reels / 2;
        let shape: Vec<usize> = (0..reels)
            .map(|i| {
                let v = if i <= mid { i } else { reels - 1 - i };
                v.min(rows.saturating_sub(1))
            })
            .collect();
        Self::from_rows(index, &shape)
    }

    /// Create an inverted V
    pub fn inverted_v(index: usize, reels: usize, rows: usize) -> Self {
        let mid = reels / 2;
        let shape: Vec<usize> = (0..reels)
            .map(|i| {
                let v = if i <= mid { i } else { reels - 1 - i };
                rows.saturating_sub(1).saturating_sub(v)
            })
            .collect();
        Self::from_rows(index, &shape)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Standard payline patterns for a 5×3 grid
pub fn standard_20_paylines() -> Vec<Payline> {
    const ROWS: [[usize; 5]; 20] = [
        // Straight lines
        [1, 1, 1, 1, 1],
        [0, 0, 0, 0, 0],
        [2, 2, 2, 2, 2],
        // V shapes
        [0, 1, 2, 1, 0],
        [2, 1, 0, 1, 2],
        // Zigzag
        [0, 0, 1, 2, 2],
        [2, 2, 1, 0, 0],
        [1, 0, 0, 0, 1],
        [1, 2, 2, 2, 1],
        // W shapes
        [0, 1, 0, 1, 0],
        [2, 1, 2, 1, 2],
        // Diagonal
        [0, 1, 1, 1, 0],
        [2, 1, 1, 1, 2],
        // Steps
        [1, 1, 0, 1, 1],
        [1, 1, 2, 1, 1],
        // Complex
        [0, 2, 0, 2, 0],
        [2, 0, 2, 0, 2],
        [1, 0, 1, 0, 1],
        [1, 2, 1, 2, 1],
        [0, 0, 2, 0, 0],
    ];

    ROWS.iter()
        .enumerate()
        .map(|(index, rows)| Payline::from_rows(index, rows))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PayTables {
        PayTables::new()
            .with_symbol(1, "HP1", &[0, 0, 20, 100, 500])
            .unwrap()
            .with_symbol(11, "SCATTER", &[2, 5, 10, 100])
            .unwrap()
    }

    #[test]
    fn test_payout_clamps_count() {
        let table = table();
        assert_eq!(table.payout(1, 0), 0);
        assert_eq!(table.payout(1, 2), 0);
        assert_eq!(table.payout(1, 3), 20);
        assert_eq!(table.payout(1, 5), 500);
        assert_eq!(table.payout(1, 9), 500);
        assert_eq!(table.payout(11, 6), 100);
        assert_eq!(table.clamp_count(11, 6), 4);
    }

    #[test]
    fn test_missing_symbol_pays_zero() {
        let table = table();
        assert_eq!(table.payout(7, 5), 0);
        assert_eq!(table.clamp_count(7, 5), 0);
    }

    #[test]
    fn test_negative_payout_rejected() {
        let mut table = PayTables::new();
        assert!(matches!(
            table.insert(3, vec![0, -1]),
            Err(SlotEvalError::NegativePayout { symbol: 3, count: 2 })
        ));
    }

    #[test]
    fn test_names_are_bidirectional() {
        let mut table = table();
        assert_eq!(table.symbol_by_name("HP1"), Some(1));
        assert_eq!(table.name_of(11), Some("SCATTER"));
        assert!(table.resolve("LP9").is_err());
        assert!(matches!(
            table.set_name("HP1", 11),
            Err(SlotEvalError::DuplicateSymbolName(_))
        ));
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let table = table();
        let json = serde_json::to_string(&table).unwrap();
        let parsed: PayTables = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, table);

        let bad = r#"{"symbols":[{"symbol":1,"pays":[1,-5]}]}"#;
        assert!(serde_json::from_str::<PayTables>(bad).is_err());
    }

    #[test]
    fn test_payline_shapes() {
        assert_eq!(Payline::straight(0, 1, 3).cells, vec![(0, 1), (1, 1), (2, 1)]);

        let v = Payline::v_shape(1, 5, 3);
        assert_eq!(v.cells, vec![(0, 0), (1, 1), (2, 2), (3, 1), (4, 0)]);

        let inv = Payline::inverted_v(2, 5, 3);
        assert_eq!(inv.cells, vec![(0, 2), (1, 1), (2, 0), (3, 1), (4, 2)]);
    }

    #[test]
    fn test_standard_paylines() {
        let lines = standard_20_paylines();
        assert_eq!(lines.len(), 20);
        assert!(lines.iter().enumerate().all(|(i, l)| l.index == i && l.len() == 5));
    }
}
