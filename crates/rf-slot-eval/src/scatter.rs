//! Scatter evaluation: occurrences anywhere in the scene

use serde::{Deserialize, Serialize};

use crate::paytable::PayTables;
use crate::result::{WinKind, WinResult};
use crate::scene::{GameScene, Pos};
use crate::symbols::{Symbol, SymbolRules};

/// How scatter occurrences are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScatterPolicy {
    /// Every occurrence counts
    #[default]
    Anywhere,
    /// Every occurrence counts, capped at the number of reels
    CappedAtReels,
    /// At most one per reel
    OnePerReel,
    /// Only the first `height` rows of each reel (the last ones if `reversed`)
    Window {
        height: usize,
        #[serde(default)]
        reversed: bool,
    },
}

/// Scatter evaluator
pub struct ScatterEvaluator<'a, R: SymbolRules + ?Sized> {
    paytable: &'a PayTables,
    rules: &'a R,
}

impl<'a, R: SymbolRules + ?Sized> ScatterEvaluator<'a, R> {
    pub fn new(paytable: &'a PayTables, rules: &'a R) -> Self {
        Self { paytable, rules }
    }

    fn is_scatter(&self, scene: &GameScene, (x, y): Pos, symbol: Symbol) -> bool {
        self.rules.symbol(scene.get(x, y)) == symbol
    }

    /// Count `symbol` under `policy` and pay the clamped count.
    ///
    /// Scatters pay on the total stake: `coin_win = mul × coins`.
    pub fn calc(
        &self,
        scene: &GameScene,
        symbol: Symbol,
        policy: ScatterPolicy,
        bet: i64,
        coins: i64,
    ) -> Option<WinResult> {
        let mut positions = Vec::new();
        let mut reels_hit = 0;

        for x in 0..scene.width() {
            let h = scene.reel_height(x);
            let rows: Box<dyn Iterator<Item = usize>> = match policy {
                ScatterPolicy::Window { height, reversed: false } => Box::new(0..height.min(h)),
                ScatterPolicy::Window { height, reversed: true } => {
                    Box::new((h.saturating_sub(height)..h).rev())
                }
                _ => Box::new(0..h),
            };

            let before = positions.len();
            positions.extend(
                rows.map(|y| (x, y))
                    .filter(|&pos| self.is_scatter(scene, pos, symbol)),
            );
            if positions.len() > before {
                reels_hit += 1;
            }
        }

        let count = match policy {
            ScatterPolicy::CappedAtReels => positions.len().min(scene.width()),
            ScatterPolicy::OnePerReel => reels_hit,
            ScatterPolicy::Anywhere | ScatterPolicy::Window { .. } => positions.len(),
        };
        self.pay(symbol, positions, count, bet, coins)
    }

    /// Count `symbol` only where `in_area(x, y)` holds.
    pub fn calc_in_area(
        &self,
        scene: &GameScene,
        symbol: Symbol,
        bet: i64,
        coins: i64,
        in_area: impl Fn(usize, usize) -> bool,
    ) -> Option<WinResult> {
        let mut positions = Vec::new();
        scene.for_each(|x, y, _| {
            if in_area(x, y) && self.is_scatter(scene, (x, y), symbol) {
                positions.push((x, y));
            }
        });

        let count = positions.len();
        self.pay(symbol, positions, count, bet, coins)
    }

    fn pay(
        &self,
        symbol: Symbol,
        positions: Vec<Pos>,
        count: usize,
        bet: i64,
        coins: i64,
    ) -> Option<WinResult> {
        let mul = self.paytable.payout(symbol, count);
        if mul <= 0 {
            return None;
        }

        let symbol_nums = self.paytable.clamp_count(symbol, count);
        log::trace!("Scatter {} x{} ({} on scene)", symbol, symbol_nums, positions.len());
        Some(
            WinResult::new(WinKind::Scatter, symbol, positions, symbol_nums, mul)
                .settle(coins, bet),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::BasicRules;

    const SC: Symbol = 11;

    fn paytable() -> PayTables {
        let mut table = PayTables::new();
        table.insert(SC, vec![2, 5, 10, 100]).unwrap();
        table
    }

    /// 5 reels × 3 rows, scatters at (0,0) (0,2) (1,1) (2,0) (3,2) (4,1)
    fn scene() -> GameScene {
        GameScene::from_columns(vec![
            vec![SC, 1, SC],
            vec![2, SC, 3],
            vec![SC, 4, 5],
            vec![6, 7, SC],
            vec![8, SC, 9],
        ])
        .unwrap()
    }

    #[test]
    fn test_capped_at_reels() {
        let table = paytable();
        let rules = BasicRules::no_wild();
        let win = ScatterEvaluator::new(&table, &rules)
            .calc(&scene(), SC, ScatterPolicy::CappedAtReels, 2, 10)
            .unwrap();

        assert_eq!(win.kind(), WinKind::Scatter);
        assert_eq!(win.positions().len(), 6);
        assert_eq!(win.symbol_nums(), 4);
        assert_eq!(win.mul(), 100);
        assert_eq!(win.coin_win(), 1000);
        assert_eq!(win.cash_win(), 2000);
    }

    #[test]
    fn test_one_per_reel() {
        let mut table = PayTables::new();
        table.insert(SC, vec![0, 0, 3, 4, 5, 6]).unwrap();
        let rules = BasicRules::no_wild();
        let win = ScatterEvaluator::new(&table, &rules)
            .calc(&scene(), SC, ScatterPolicy::OnePerReel, 1, 1)
            .unwrap();
        assert_eq!(win.symbol_nums(), 5);
        assert_eq!(win.mul(), 5);
    }

    #[test]
    fn test_window() {
        let mut table = PayTables::new();
        table.insert(SC, vec![0, 7, 9, 11]).unwrap();
        let rules = BasicRules::no_wild();
        let eval = ScatterEvaluator::new(&table, &rules);

        let top = eval
            .calc(&scene(), SC, ScatterPolicy::Window { height: 1, reversed: false }, 1, 1)
            .unwrap();
        assert_eq!(top.positions(), &[(0, 0), (2, 0)]);
        assert_eq!(top.mul(), 7);

        let bottom = eval
            .calc(&scene(), SC, ScatterPolicy::Window { height: 2, reversed: true }, 1, 1)
            .unwrap();
        assert_eq!(bottom.positions(), &[(0, 2), (1, 1), (3, 2), (4, 1)]);
        assert_eq!(bottom.mul(), 11);
    }

    #[test]
    fn test_in_area() {
        let table = paytable();
        let rules = BasicRules::no_wild();
        let win = ScatterEvaluator::new(&table, &rules)
            .calc_in_area(&scene(), SC, 1, 1, |x, _| x >= 3)
            .unwrap();
        assert_eq!(win.positions(), &[(3, 2), (4, 1)]);
        assert_eq!(win.mul(), 5);
    }

    #[test]
    fn test_no_scatter_no_win() {
        let mut table = PayTables::new();
        table.insert(SC, vec![0, 0, 10]).unwrap();
        let rules = BasicRules::no_wild();
        let eval = ScatterEvaluator::new(&table, &rules);
        assert!(eval.calc(&scene(), 12, ScatterPolicy::Anywhere, 1, 1).is_none());
        assert!(eval
            .calc(&scene(), SC, ScatterPolicy::Window { height: 1, reversed: false }, 1, 1)
            .is_none());
    }
}
