//! Adjacency evaluation: straight runs along both scene axes
//!
//! The pass down each reel runs first, then the pass across reels. Each pass
//! starts from a fresh copy of the scene whenever the one before removed
//! cells.
//!
//! Every cell seeds a forward run. A run is reported when at least one of its
//! cells has not been claimed by an earlier run on the same axis, so runs may
//! overlap on shared wilds (`A W W W B` pays both `A W W W` and `W W W B`).
//! Non-wild cells of a reported run are removed from the working copy and
//! cannot seed again.

use serde::{Deserialize, Serialize};

use crate::line::best_run;
use crate::paytable::PayTables;
use crate::result::{WinKind, WinResult};
use crate::scene::{GameScene, Pos};
use crate::symbols::{EMPTY, MultiplierMode, SymbolRules, fold_multipliers};

/// Scan direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanAxis {
    /// `x` increases, `y` fixed (across reels)
    AlongX,
    /// `y` increases, `x` fixed (down a reel)
    AlongY,
}

impl ScanAxis {
    /// Cells from `start` to the scene edge along this axis
    fn ray(self, scene: &GameScene, (x, y): Pos) -> Vec<Pos> {
        match self {
            Self::AlongX => (x..scene.width()).map(|cx| (cx, y)).collect(),
            Self::AlongY => (y..scene.height()).map(|cy| (x, cy)).collect(),
        }
    }

    /// Start cells, one scan line after another
    fn starts(self, scene: &GameScene) -> Vec<Pos> {
        let (w, h) = (scene.width(), scene.height());
        match self {
            Self::AlongX => (0..h).flat_map(|y| (0..w).map(move |x| (x, y))).collect(),
            Self::AlongY => (0..w).flat_map(|x| (0..h).map(move |y| (x, y))).collect(),
        }
    }
}

/// Adjacency evaluator
pub struct AdjacencyEvaluator<'a, R: SymbolRules + ?Sized> {
    paytable: &'a PayTables,
    rules: &'a R,
    multipliers: Option<MultiplierMode>,
}

impl<'a, R: SymbolRules + ?Sized> AdjacencyEvaluator<'a, R> {
    pub fn new(paytable: &'a PayTables, rules: &'a R) -> Self {
        Self {
            paytable,
            rules,
            multipliers: None,
        }
    }

    pub fn multipliers(mut self, mode: MultiplierMode) -> Self {
        self.multipliers = Some(mode);
        self
    }

    /// Every distinct winning run; runs down the reels are reported before
    /// runs across them.
    pub fn calc(&self, scene: &GameScene, bet: i64) -> Vec<WinResult> {
        let mut wins = Vec::new();

        let mut work = scene.clone();
        let nulled = self.scan(&mut work, ScanAxis::AlongY, bet, &mut wins);
        if nulled {
            work = scene.clone();
        }
        self.scan(&mut work, ScanAxis::AlongX, bet, &mut wins);

        wins
    }

    /// Runs along a single axis on `work`; returns whether any cell was nulled.
    fn scan(
        &self,
        work: &mut GameScene,
        axis: ScanAxis,
        bet: i64,
        wins: &mut Vec<WinResult>,
    ) -> bool {
        let mut marked = vec![vec![false; work.height()]; work.width()];
        let mut nulled = false;

        for (x, y) in axis.starts(work) {
            if !self.rules.is_valid(self.rules.symbol(work.get(x, y))) {
                continue;
            }

            let ray = axis.ray(work, (x, y));
            let Some(run) = best_run(work, self.paytable, self.rules, ray) else {
                continue;
            };
            if run.positions.iter().all(|&(px, py)| marked[px][py]) {
                continue;
            }

            for &(px, py) in &run.positions {
                marked[px][py] = true;
                if !self.rules.is_wild(self.rules.symbol(work.get(px, py))) {
                    work.set(px, py, EMPTY);
                    nulled = true;
                }
            }

            let other_mul = fold_multipliers(self.rules, self.multipliers, &run.positions);
            let count = run.positions.len();
            log::trace!("Adjacency {:?} from ({}, {}): {} x{}", axis, x, y, run.symbol, count);

            wins.push(
                WinResult::new(WinKind::Adjacency, run.symbol, run.positions, count, run.mul)
                    .with_wild_nums(run.wilds)
                    .with_other_mul(other_mul)
                    .settle(1, bet),
            );
        }

        nulled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{BasicRules, Symbol};

    const W: Symbol = 0;
    const A: Symbol = 1;
    const B: Symbol = 2;

    fn row(symbols: &[Symbol]) -> GameScene {
        GameScene::from_columns(symbols.iter().map(|&s| vec![s]).collect()).unwrap()
    }

    fn paytable() -> PayTables {
        let mut table = PayTables::new();
        table.insert(W, vec![0, 0, 5]).unwrap();
        table.insert(A, vec![0, 0, 10, 20]).unwrap();
        table.insert(B, vec![0, 0, 10, 30]).unwrap();
        table
    }

    #[test]
    fn test_overlapping_runs_share_wilds() {
        let table = paytable();
        let rules = BasicRules::with_wild(W);
        let wins = AdjacencyEvaluator::new(&table, &rules).calc(&row(&[A, W, W, W, B]), 1);

        assert_eq!(wins.len(), 2);
        assert_eq!(wins[0].symbol(), A);
        assert_eq!(wins[0].symbol_nums(), 4);
        assert_eq!(wins[1].symbol(), B);
        assert_eq!(wins[1].symbol_nums(), 4);
        assert_eq!(wins[1].wild_nums(), 3);

        let shared: Vec<Pos> = wins[0]
            .positions()
            .iter()
            .copied()
            .filter(|&p| wins[1].contains(p))
            .collect();
        assert_eq!(shared, vec![(1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn test_run_not_repeated_from_inner_cell() {
        let table = paytable();
        let rules = BasicRules::with_wild(W);
        let wins = AdjacencyEvaluator::new(&table, &rules).calc(&row(&[A, A, A, A, B]), 1);

        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].positions(), &[(0, 0), (1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn test_both_axes() {
        let table = paytable();
        let rules = BasicRules::with_wild(W);
        // rows: A A A / A W B / W B B
        let scene = GameScene::from_columns(vec![
            vec![A, A, W],
            vec![A, W, B],
            vec![A, B, B],
        ])
        .unwrap();

        let wins = AdjacencyEvaluator::new(&table, &rules).calc(&scene, 2);
        let summary: Vec<(Symbol, usize)> = wins
            .iter()
            .map(|w| (w.symbol(), w.symbol_nums()))
            .collect();
        assert_eq!(summary, vec![(A, 3), (A, 3), (B, 3)]);
        assert_eq!(wins[0].positions(), &[(0, 0), (0, 1), (0, 2)]);
        assert_eq!(wins[1].positions(), &[(0, 0), (1, 0), (2, 0)]);
        assert_eq!(wins[2].wild_nums(), 1);
        assert!(wins.iter().all(|w| w.kind() == WinKind::Adjacency));
        assert_eq!(wins[0].cash_win(), 20);
    }

    #[test]
    fn test_down_reel_pass_reported_first() {
        let mut table = PayTables::new();
        for symbol in 1..=8 {
            table.insert(symbol, vec![0, 0, 10]).unwrap();
        }
        let rules = BasicRules::no_wild();
        let scene = GameScene::from_columns(vec![
            vec![1, 1, 1],
            vec![2, 3, 4],
            vec![2, 5, 6],
            vec![2, 7, 8],
        ])
        .unwrap();

        let wins = AdjacencyEvaluator::new(&table, &rules).calc(&scene, 1);
        assert_eq!(wins.len(), 2);
        assert_eq!(wins[0].symbol(), 1);
        assert_eq!(wins[0].positions(), &[(0, 0), (0, 1), (0, 2)]);
        assert_eq!(wins[1].symbol(), 2);
        assert_eq!(wins[1].positions(), &[(1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn test_invalid_start_skipped() {
        let table = paytable();
        let rules = BasicRules::with_wild(W).with_invalid(&[A]);
        let wins = AdjacencyEvaluator::new(&table, &rules).calc(&row(&[A, A, A, A, A]), 1);
        assert!(wins.is_empty());
    }

    #[test]
    fn test_caller_scene_untouched() {
        let table = paytable();
        let rules = BasicRules::with_wild(W);
        let scene = row(&[A, W, W, W, B]);
        let before = scene.clone();
        AdjacencyEvaluator::new(&table, &rules).calc(&scene, 1);
        assert_eq!(scene, before);
    }
}
