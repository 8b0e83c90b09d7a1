//! Payline evaluation and the wild/symbol tie-break
//!
//! A run starting on a wild is read two ways at once: as a pure wild run
//! (paid from the wild's own table) and as a run of the first concrete
//! symbol behind the wilds. The better payout is reported and the wild run
//! wins ties. The same run walker drives the adjacency evaluator.

use serde::{Deserialize, Serialize};

use crate::paytable::{PayTables, Payline};
use crate::result::{WinKind, WinResult};
use crate::scene::{GameScene, Pos};
use crate::symbols::{MultiplierMode, Symbol, SymbolRules, fold_multipliers};

/// Which end of a payline pays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// Best interpretation of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Run {
    pub symbol: Symbol,
    pub positions: Vec<Pos>,
    pub wilds: usize,
    pub mul: i64,
}

/// Read a cell through the rules' symbol mapping
fn read<R: SymbolRules + ?Sized>(scene: &GameScene, rules: &R, (x, y): Pos) -> Symbol {
    rules.symbol(scene.get(x, y))
}

/// Walk `cells` in order and return the paying interpretation, if any.
///
/// The walk stops at the first invalid or non-matching cell; cells outside
/// the scene read as empty and therefore stop it as well.
pub(crate) fn best_run<R>(
    scene: &GameScene,
    paytable: &PayTables,
    rules: &R,
    cells: impl IntoIterator<Item = Pos>,
) -> Option<Run>
where
    R: SymbolRules + ?Sized,
{
    let mut cells = cells.into_iter();
    let first = cells.next()?;
    let s0 = read(scene, rules, first);
    if !rules.is_valid(s0) {
        return None;
    }

    if !rules.is_wild(s0) {
        let mut positions = vec![first];
        let mut wilds = 0;
        for pos in cells {
            let s = read(scene, rules, pos);
            if !rules.is_valid(s) || !rules.is_same(s, s0) {
                break;
            }
            if rules.is_wild(s) {
                wilds += 1;
            }
            positions.push(pos);
        }

        let mul = paytable.payout(s0, positions.len());
        return (mul > 0).then_some(Run {
            symbol: s0,
            positions,
            wilds,
            mul,
        });
    }

    let mut wild_positions = vec![first];
    let mut concrete: Option<Symbol> = None;
    let mut positions = vec![first];
    let mut wilds = 1;

    for pos in cells {
        let s = read(scene, rules, pos);
        if !rules.is_valid(s) {
            break;
        }
        match concrete {
            None if rules.is_wild(s) => {
                wild_positions.push(pos);
                wilds += 1;
            }
            None => concrete = Some(s),
            Some(_) if rules.is_wild(s) => wilds += 1,
            Some(ws) if rules.is_same(s, ws) => {}
            Some(_) => break,
        }
        positions.push(pos);
    }

    let wild_count = wild_positions.len();
    let wild_mul = paytable.payout(s0, wild_count);
    let wild_run = Run {
        symbol: s0,
        positions: wild_positions,
        wilds: wild_count,
        mul: wild_mul,
    };

    let Some(ws) = concrete else {
        return (wild_mul > 0).then_some(wild_run);
    };

    let symbol_mul = paytable.payout(ws, positions.len());
    if wild_mul == 0 && symbol_mul == 0 {
        None
    } else if wild_mul >= symbol_mul {
        Some(wild_run)
    } else {
        Some(Run {
            symbol: ws,
            positions,
            wilds,
            mul: symbol_mul,
        })
    }
}

/// Consecutive occurrences of one symbol from the start of a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCount {
    pub count: usize,
    pub positions: Vec<Pos>,
    pub wilds: usize,
    pub other_mul: i64,
}

/// Payline evaluator
///
/// ```rust,ignore
/// let eval = LineEvaluator::new(&paytable, &rules).multipliers(MultiplierMode::Product);
/// let wins = eval.calc_lines(&scene, &standard_20_paylines(), bet);
/// ```
pub struct LineEvaluator<'a, R: SymbolRules + ?Sized> {
    paytable: &'a PayTables,
    rules: &'a R,
    direction: LineDirection,
    multipliers: Option<MultiplierMode>,
}

impl<'a, R: SymbolRules + ?Sized> LineEvaluator<'a, R> {
    /// Left-to-right evaluator ignoring cell multipliers
    pub fn new(paytable: &'a PayTables, rules: &'a R) -> Self {
        Self {
            paytable,
            rules,
            direction: LineDirection::LeftToRight,
            multipliers: None,
        }
    }

    pub fn direction(mut self, direction: LineDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Fold cell multipliers along each win into its `other_mul`
    pub fn multipliers(mut self, mode: MultiplierMode) -> Self {
        self.multipliers = Some(mode);
        self
    }

    fn ordered<'l>(&self, cells: &'l [Pos]) -> Box<dyn Iterator<Item = Pos> + 'l> {
        match self.direction {
            LineDirection::LeftToRight => Box::new(cells.iter().copied()),
            LineDirection::RightToLeft => Box::new(cells.iter().rev().copied()),
        }
    }

    fn other_mul(&self, positions: &[Pos]) -> i64 {
        fold_multipliers(self.rules, self.multipliers, positions)
    }

    /// Evaluate an arbitrary ordered cell path; at most one win.
    pub fn calc_cells(&self, scene: &GameScene, cells: &[Pos], bet: i64) -> Option<WinResult> {
        let run = best_run(scene, self.paytable, self.rules, self.ordered(cells))?;
        let other_mul = self.other_mul(&run.positions);
        let count = run.positions.len();

        Some(
            WinResult::new(WinKind::Line, run.symbol, run.positions, count, run.mul)
                .with_wild_nums(run.wilds)
                .with_other_mul(other_mul)
                .settle(1, bet),
        )
    }

    /// Evaluate one payline
    pub fn calc_line(&self, scene: &GameScene, line: &Payline, bet: i64) -> Option<WinResult> {
        let win = self.calc_cells(scene, &line.cells, bet)?.with_line_index(line.index);
        log::trace!(
            "Line {} pays {} x{} ({} coins)",
            line.index,
            win.symbol(),
            win.symbol_nums(),
            win.coin_win()
        );
        Some(win)
    }

    /// Evaluate every payline, in line order
    pub fn calc_lines(&self, scene: &GameScene, lines: &[Payline], bet: i64) -> Vec<WinResult> {
        lines
            .iter()
            .filter_map(|line| self.calc_line(scene, line, bet))
            .collect()
    }

    /// Count `symbol` (wilds substituting) from the paying end of a line.
    pub fn count_symbol_on_line(
        &self,
        scene: &GameScene,
        line: &Payline,
        symbol: Symbol,
    ) -> LineCount {
        let mut positions = Vec::new();
        let mut wilds = 0;

        for pos in self.ordered(&line.cells) {
            let s = read(scene, self.rules, pos);
            if !self.rules.is_valid(s) || !self.rules.is_same(s, symbol) {
                break;
            }
            if self.rules.is_wild(s) {
                wilds += 1;
            }
            positions.push(pos);
        }

        LineCount {
            count: positions.len(),
            other_mul: self.other_mul(&positions),
            positions,
            wilds,
        }
    }
}
