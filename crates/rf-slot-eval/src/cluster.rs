//! Cluster pays: 4-connected groups of matching symbols

use crate::paytable::PayTables;
use crate::result::{WinKind, WinResult};
use crate::scene::{GameScene, Pos};
use crate::symbols::{EMPTY, MultiplierMode, Symbol, SymbolRules, fold_multipliers};

/// Cluster evaluator
///
/// Wilds join any cluster they touch and may be shared by several clusters.
/// Non-wild members of a paying cluster are removed from the working copy.
pub struct ClusterEvaluator<'a, R: SymbolRules + ?Sized> {
    paytable: &'a PayTables,
    rules: &'a R,
    multipliers: Option<MultiplierMode>,
}

impl<'a, R: SymbolRules + ?Sized> ClusterEvaluator<'a, R> {
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

    fn read(&self, scene: &GameScene, (x, y): Pos) -> Symbol {
        self.rules.symbol(scene.get(x, y))
    }

    /// Every paying cluster, in seed order (reel by reel, top to bottom).
    pub fn calc(&self, scene: &GameScene, bet: i64) -> Vec<WinResult> {
        let mut work = scene.clone();
        let height = work.height();
        let mut claimed = vec![false; work.width() * height];
        let mut wins = Vec::new();

        for x in 0..work.width() {
            for y in 0..work.reel_height(x) {
                let symbol = self.read(&work, (x, y));
                if !self.rules.is_valid(symbol) || claimed[x * height + y] {
                    continue;
                }

                let wild_seed = self.rules.is_wild(symbol);
                let members = self.flood(&work, (x, y), symbol);
                for &(mx, my) in &members {
                    if wild_seed || !self.rules.is_wild(self.read(&work, (mx, my))) {
                        claimed[mx * height + my] = true;
                    }
                }

                let count = members.len();
                let mul = self.paytable.payout(symbol, count);
                if mul <= 0 {
                    continue;
                }

                let mut wilds = 0;
                for &(mx, my) in &members {
                    if self.rules.is_wild(self.read(&work, (mx, my))) {
                        wilds += 1;
                    } else {
                        work.set(mx, my, EMPTY);
                    }
                }

                let other_mul = fold_multipliers(self.rules, self.multipliers, &members);
                log::trace!("Cluster of {} x{} seeded at ({}, {})", symbol, count, x, y);

                wins.push(
                    WinResult::new(WinKind::Cluster, symbol, members, count, mul)
                        .with_wild_nums(wilds)
                        .with_other_mul(other_mul)
                        .settle(1, bet),
                );
            }
        }

        wins
    }

    /// Collect the 4-connected group around `seed`.
    ///
    /// Depth-first, visiting neighbours left, right, up, down; a cell is
    /// checked against the visited set right before it is entered, so the
    /// member order matches a recursive fill. A seed outside the scene
    /// yields no members.
    pub fn flood(&self, scene: &GameScene, seed: Pos, symbol: Symbol) -> Vec<Pos> {
        if !scene.in_bounds(seed.0, seed.1) {
            return Vec::new();
        }

        let height = scene.height();
        let mut visited = vec![false; scene.width() * height];
        let mut members = Vec::new();
        let mut stack = vec![seed];

        while let Some((x, y)) = stack.pop() {
            if visited[x * height + y] {
                continue;
            }
            visited[x * height + y] = true;
            members.push((x, y));

            let neighbours = [
                x.checked_sub(1).map(|nx| (nx, y)),
                Some((x + 1, y)),
                y.checked_sub(1).map(|ny| (x, ny)),
                Some((x, y + 1)),
            ];
            for (nx, ny) in neighbours.into_iter().rev().flatten() {
                if !scene.in_bounds(nx, ny) || visited[nx * height + ny] {
                    continue;
                }
                let s = self.read(scene, (nx, ny));
                if self.rules.is_valid(s) && self.rules.is_same(s, symbol) {
                    stack.push((nx, ny));
                }
            }
        }

        members
    }
}
