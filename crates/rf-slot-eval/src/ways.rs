//! Ways-to-win and full-line evaluation

use crate::line::best_run;
use crate::paytable::PayTables;
use crate::result::{WinKind, WinResult};
use crate::scene::{GameScene, Pos};
use crate::symbols::{MultiplierMode, Symbol, SymbolRules, fold_multipliers};

/// Ways evaluator
///
/// Reels are scanned left to right. Every matching or wild cell of a reel
/// contributes; the first reel without a match ends the scan. The payout is
/// looked up by the number of matched reels and scaled by the ways count.
pub struct WaysEvaluator<'a, R: SymbolRules + ?Sized> {
    paytable: &'a PayTables,
    rules: &'a R,
    cell_multipliers: bool,
}

impl<'a, R: SymbolRules + ?Sized> WaysEvaluator<'a, R> {
    pub fn new(paytable: &'a PayTables, rules: &'a R) -> Self {
        Self {
            paytable,
            rules,
            cell_multipliers: false,
        }
    }

    /// Weigh each matching cell by its multiplier instead of counting it once
    pub fn cell_multipliers(mut self) -> Self {
        self.cell_multipliers = true;
        self
    }

    fn read(&self, scene: &GameScene, (x, y): Pos) -> Symbol {
        self.rules.symbol(scene.get(x, y))
    }

    fn matches(&self, scene: &GameScene, pos: Pos, symbol: Symbol) -> bool {
        let s = self.read(scene, pos);
        self.rules.is_valid(s) && self.rules.is_same(s, symbol)
    }

    /// Ways win for one candidate symbol
    pub fn calc(&self, scene: &GameScene, symbol: Symbol, bet: i64) -> Option<WinResult> {
        let mut positions = Vec::new();
        let mut ways: i64 = 1;
        let mut reels = 0;
        let mut wilds = 0;

        for x in 0..scene.width() {
            let mut factor = 0;
            let mut hit = false;
            for y in 0..scene.reel_height(x) {
                if !self.matches(scene, (x, y), symbol) {
                    continue;
                }
                hit = true;
                positions.push((x, y));
                factor += if self.cell_multipliers {
                    self.rules.multiplier(x, y)
                } else {
                    1
                };
                if self.rules.is_wild(self.read(scene, (x, y))) {
                    wilds += 1;
                }
            }
            if !hit {
                break;
            }
            ways *= factor;
            reels += 1;
        }

        let mul = self.paytable.payout(symbol, reels);
        if mul <= 0 {
            return None;
        }

        log::trace!("Ways {} x{} reels, {} ways", symbol, reels, ways);
        Some(
            WinResult::new(WinKind::Ways, symbol, positions, reels, mul)
                .with_wild_nums(wilds)
                .with_other_mul(ways)
                .settle(1, bet),
        )
    }

    /// Candidate symbols: the distinct non-wild symbols of the first reel.
    ///
    /// A wild on a reel lets the next reel's symbols start a win as well.
    pub fn candidates(&self, scene: &GameScene) -> Vec<Symbol> {
        let mut candidates = Vec::new();

        for x in 0..scene.width() {
            let mut has_wild = false;
            for y in 0..scene.reel_height(x) {
                let s = self.read(scene, (x, y));
                if !self.rules.is_valid(s) {
                    continue;
                }
                if self.rules.is_wild(s) {
                    has_wild = true;
                } else if !candidates.contains(&s) {
                    candidates.push(s);
                }
            }
            if !has_wild {
                break;
            }
        }

        candidates
    }

    /// Ways wins for every candidate symbol
    pub fn calc_all(&self, scene: &GameScene, bet: i64) -> Vec<WinResult> {
        self.candidates(scene)
            .into_iter()
            .filter_map(|symbol| self.calc(scene, symbol, bet))
            .collect()
    }

    /// Brute-force variant: every path through matching cells, one cell per
    /// reel, is evaluated as an independent line.
    pub fn calc_full_line(&self, scene: &GameScene, symbol: Symbol, bet: i64) -> Vec<WinResult> {
        let mut paths = Vec::new();
        self.collect_paths(scene, symbol, 0, &mut Vec::new(), &mut paths);

        paths
            .into_iter()
            .filter_map(|path| {
                let run = best_run(scene, self.paytable, self.rules, path)?;
                let mode = self.cell_multipliers.then_some(MultiplierMode::Product);
                let other_mul = fold_multipliers(self.rules, mode, &run.positions);
                let count = run.positions.len();
                Some(
                    WinResult::new(WinKind::FullLine, run.symbol, run.positions, count, run.mul)
                        .with_wild_nums(run.wilds)
                        .with_other_mul(other_mul)
                        .settle(1, bet),
                )
            })
            .collect()
    }

    fn collect_paths(
        &self,
        scene: &GameScene,
        symbol: Symbol,
        x: usize,
        current: &mut Vec<Pos>,
        paths: &mut Vec<Vec<Pos>>,
    ) {
        let cells: Vec<Pos> = (0..scene.reel_height(x))
            .map(|y| (x, y))
            .filter(|&pos| self.matches(scene, pos, symbol))
            .collect();

        if cells.is_empty() {
            if !current.is_empty() {
                paths.push(current.clone());
            }
            return;
        }

        for pos in cells {
            current.push(pos);
            self.collect_paths(scene, symbol, x + 1, current, paths);
            current.pop();
        }
    }
}
