//! Win records

use serde::{Deserialize, Serialize};

use crate::scene::Pos;
use crate::symbols::Symbol;

/// Which evaluator produced a win
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinKind {
    Line,
    Scatter,
    Ways,
    FullLine,
    Cluster,
    Adjacency,
}

/// One discovered win.
///
/// Built once by an evaluator and read-only afterwards: fields are private
/// and the `with_*` methods consume the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinResult {
    symbol: Symbol,
    kind: WinKind,
    line_index: Option<usize>,
    positions: Vec<Pos>,
    symbol_nums: usize,
    mul: i64,
    other_mul: i64,
    coin_win: i64,
    cash_win: i64,
    wild_nums: usize,
}

impl WinResult {
    /// A win paying `mul` coins per bet unit. Cash is zero until
    /// [`settle`](Self::settle) is applied.
    pub fn new(
        kind: WinKind,
        symbol: Symbol,
        positions: Vec<Pos>,
        symbol_nums: usize,
        mul: i64,
    ) -> Self {
        Self {
            symbol,
            kind,
            line_index: None,
            positions,
            symbol_nums,
            mul,
            other_mul: 1,
            coin_win: mul,
            cash_win: 0,
            wild_nums: 0,
        }
    }

    pub fn with_line_index(mut self, index: usize) -> Self {
        self.line_index = Some(index);
        self
    }

    pub fn with_wild_nums(mut self, wilds: usize) -> Self {
        self.wild_nums = wilds;
        self
    }

    pub fn with_other_mul(mut self, other_mul: i64) -> Self {
        self.other_mul = other_mul;
        self
    }

    /// Compute the coin and cash amounts.
    ///
    /// `coin_win = mul × other_mul × coins`, `cash_win = coin_win × bet`.
    pub fn settle(mut self, coins: i64, bet: i64) -> Self {
        self.coin_win = self.mul * self.other_mul * coins;
        self.cash_win = self.coin_win * bet;
        self
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn kind(&self) -> WinKind {
        self.kind
    }

    /// Payline index, `None` for wins not bound to a line
    pub fn line_index(&self) -> Option<usize> {
        self.line_index
    }

    pub fn positions(&self) -> &[Pos] {
        &self.positions
    }

    /// Matched symbol count used for the payout lookup
    pub fn symbol_nums(&self) -> usize {
        self.symbol_nums
    }

    /// Paytable multiplier
    pub fn mul(&self) -> i64 {
        self.mul
    }

    /// Combined per-cell (or ways) multiplier
    pub fn other_mul(&self) -> i64 {
        self.other_mul
    }

    pub fn coin_win(&self) -> i64 {
        self.coin_win
    }

    pub fn cash_win(&self) -> i64 {
        self.cash_win
    }

    /// Wild symbols inside the win
    pub fn wild_nums(&self) -> usize {
        self.wild_nums
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.positions.contains(&pos)
    }
}
