//! Whole-scene evaluation across every configured mechanism

use serde::{Deserialize, Serialize};

use crate::adjacency::AdjacencyEvaluator;
use crate::cascade::winning_positions;
use crate::cluster::ClusterEvaluator;
use crate::line::LineEvaluator;
use crate::mechanism::WinMechanism;
use crate::paytable::PayTables;
use crate::result::{WinKind, WinResult};
use crate::scatter::ScatterEvaluator;
use crate::scene::{GameScene, Pos};
use crate::symbols::{MultiplierMode, SymbolRules};
use crate::ways::WaysEvaluator;

/// Result of evaluating a scene
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Every win, in mechanism order
    pub wins: Vec<WinResult>,
    /// Sum of `coin_win`
    pub total_coin: i64,
    /// Sum of `cash_win`
    pub total_cash: i64,
}

impl Evaluation {
    pub fn from_wins(wins: Vec<WinResult>) -> Self {
        let total_coin = wins.iter().map(WinResult::coin_win).sum();
        let total_cash = wins.iter().map(WinResult::cash_win).sum();
        Self {
            wins,
            total_coin,
            total_cash,
        }
    }

    /// Check if this is a winning spin
    pub fn is_win(&self) -> bool {
        self.total_cash > 0
    }

    pub fn win_count(&self) -> usize {
        self.wins.len()
    }

    /// Union of all winning cells, in first-seen order
    pub fn winning_positions(&self) -> Vec<Pos> {
        winning_positions(&self.wins)
    }

    pub fn by_kind(&self, kind: WinKind) -> impl Iterator<Item = &WinResult> {
        self.wins.iter().filter(move |w| w.kind() == kind)
    }
}

/// Runs a list of [`WinMechanism`]s against one paytable and rule set.
pub struct SceneEvaluator<'a, R: SymbolRules + ?Sized> {
    paytable: &'a PayTables,
    rules: &'a R,
    multipliers: Option<MultiplierMode>,
    coins: i64,
}

impl<'a, R: SymbolRules + ?Sized> SceneEvaluator<'a, R> {
    pub fn new(paytable: &'a PayTables, rules: &'a R) -> Self {
        Self {
            paytable,
            rules,
            multipliers: None,
            coins: 1,
        }
    }

    /// Multiplier mode for line, cluster and adjacency wins
    pub fn multipliers(mut self, mode: MultiplierMode) -> Self {
        self.multipliers = Some(mode);
        self
    }

    /// Coins staked per spin; only scatter wins use it
    pub fn coins(mut self, coins: i64) -> Self {
        self.coins = coins;
        self
    }

    /// Evaluate every mechanism in order and total the wins.
    pub fn evaluate(&self, scene: &GameScene, mechanisms: &[WinMechanism], bet: i64) -> Evaluation {
        let wins: Vec<WinResult> = mechanisms
            .iter()
            .flat_map(|mechanism| self.evaluate_mechanism(scene, mechanism, bet))
            .collect();

        let evaluation = Evaluation::from_wins(wins);
        log::debug!(
            "Evaluated {} mechanisms: {} wins, {} coins, {} cash",
            mechanisms.len(),
            evaluation.win_count(),
            evaluation.total_coin,
            evaluation.total_cash
        );
        evaluation
    }

    pub fn evaluate_mechanism(
        &self,
        scene: &GameScene,
        mechanism: &WinMechanism,
        bet: i64,
    ) -> Vec<WinResult> {
        match mechanism {
            WinMechanism::Paylines { direction, .. } => {
                let lines = mechanism.paylines().unwrap_or_default();
                let mut eval = LineEvaluator::new(self.paytable, self.rules).direction(*direction);
                if let Some(mode) = self.multipliers {
                    eval = eval.multipliers(mode);
                }
                eval.calc_lines(scene, &lines, bet)
            }
            WinMechanism::Ways { cell_multipliers } => {
                self.ways(*cell_multipliers).calc_all(scene, bet)
            }
            WinMechanism::FullLine => {
                let eval = self.ways(false);
                eval.candidates(scene)
                    .into_iter()
                    .flat_map(|symbol| eval.calc_full_line(scene, symbol, bet))
                    .collect()
            }
            WinMechanism::ClusterPays => {
                let mut eval = ClusterEvaluator::new(self.paytable, self.rules);
                if let Some(mode) = self.multipliers {
                    eval = eval.multipliers(mode);
                }
                eval.calc(scene, bet)
            }
            WinMechanism::Adjacency => {
                let mut eval = AdjacencyEvaluator::new(self.paytable, self.rules);
                if let Some(mode) = self.multipliers {
                    eval = eval.multipliers(mode);
                }
                eval.calc(scene, bet)
            }
            WinMechanism::Scatter { symbol, policy } => {
                ScatterEvaluator::new(self.paytable, self.rules)
                    .calc(scene, *symbol, *policy, bet, self.coins)
                    .into_iter()
                    .collect()
            }
        }
    }

    fn ways(&self, cell_multipliers: bool) -> WaysEvaluator<'a, R> {
        let eval = WaysEvaluator::new(self.paytable, self.rules);
        if cell_multipliers { eval.cell_multipliers() } else { eval }
    }
}

/// Evaluate `mechanisms` with default settings (no cell multipliers, one coin).
pub fn evaluate_scene<R: SymbolRules + ?Sized>(
    scene: &GameScene,
    paytable: &PayTables,
    rules: &R,
    mechanisms: &[WinMechanism],
    bet: i64,
) -> Evaluation {
    SceneEvaluator::new(paytable, rules).evaluate(scene, mechanisms, bet)
}
