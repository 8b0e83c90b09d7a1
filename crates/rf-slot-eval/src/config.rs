//! Game evaluation configuration

use serde::{Deserialize, Serialize};

use crate::evaluation::{Evaluation, SceneEvaluator};
use crate::mechanism::WinMechanism;
use crate::paytable::PayTables;
use crate::scene::GameScene;
use crate::symbols::{BasicRules, MultiplierMode, Symbol};

/// Everything needed to evaluate a game's scenes.
///
/// ```json
/// {
///   "name": "Fruit Five",
///   "paytable": { "symbols": [{ "symbol": 1, "name": "cherry", "pays": [0, 0, 5, 10, 20] }] },
///   "rules": { "wilds": [0] },
///   "mechanisms": [{ "type": "paylines" }, { "type": "scatter", "symbol": 9 }]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    #[serde(default)]
    pub name: String,
    pub paytable: PayTables,
    #[serde(default)]
    pub rules: BasicRules,
    /// How cell multipliers combine; `None` ignores them
    #[serde(default)]
    pub multiplier_mode: Option<MultiplierMode>,
    #[serde(default = "default_mechanisms")]
    pub mechanisms: Vec<WinMechanism>,
    /// Coins per spin, applied to scatter wins
    #[serde(default = "default_coins")]
    pub coins: i64,
}

fn default_mechanisms() -> Vec<WinMechanism> {
    vec![WinMechanism::default()]
}

fn default_coins() -> i64 {
    1
}

impl EvalConfig {
    /// Config with the standard 20 paylines and no rules
    pub fn new(name: impl Into<String>, paytable: PayTables) -> Self {
        Self {
            name: name.into(),
            paytable,
            rules: BasicRules::default(),
            multiplier_mode: None,
            mechanisms: default_mechanisms(),
            coins: default_coins(),
        }
    }

    pub fn with_rules(mut self, rules: BasicRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_mechanisms(mut self, mechanisms: Vec<WinMechanism>) -> Self {
        self.mechanisms = mechanisms;
        self
    }

    pub fn with_multiplier_mode(mut self, mode: MultiplierMode) -> Self {
        self.multiplier_mode = Some(mode);
        self
    }

    pub fn with_coins(mut self, coins: i64) -> Self {
        self.coins = coins;
        self
    }

    /// Symbols named by the rules or mechanisms that the paytable does not pay
    pub fn unpaid_symbols(&self) -> Vec<Symbol> {
        let scatters = self.mechanisms.iter().filter_map(|m| match m {
            WinMechanism::Scatter { symbol, .. } => Some(*symbol),
            _ => None,
        });

        let mut missing: Vec<Symbol> = self
            .rules
            .wilds
            .iter()
            .copied()
            .chain(scatters)
            .filter(|s| !self.paytable.contains(*s))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }

    pub fn evaluator(&self) -> SceneEvaluator<'_, BasicRules> {
        let eval = SceneEvaluator::new(&self.paytable, &self.rules).coins(self.coins);
        match self.multiplier_mode {
            Some(mode) => eval.multipliers(mode),
            None => eval,
        }
    }

    /// Evaluate a scene with every configured mechanism
    pub fn evaluate(&self, scene: &GameScene, bet: i64) -> Evaluation {
        self.evaluator().evaluate(scene, &self.mechanisms, bet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_json() {
        let json = r#"{
            "paytable": { "symbols": [{ "symbol": 1, "pays": [0, 0, 5] }] }
        }"#;
        let config: EvalConfig = serde_json::from_str(json).unwrap();

        assert!(config.name.is_empty());
        assert_eq!(config.coins, 1);
        assert_eq!(config.mechanisms, vec![WinMechanism::standard_20_paylines()]);
        assert!(config.rules.wilds.is_empty());
        assert!(config.multiplier_mode.is_none());
    }

    #[test]
    fn test_unpaid_symbols() {
        let mut paytable = PayTables::new();
        paytable.insert(1, vec![0, 0, 5]).unwrap();
        let config = EvalConfig::new("test", paytable)
            .with_rules(BasicRules::with_wild(0))
            .with_mechanisms(vec![WinMechanism::scatter(9), WinMechanism::scatter(1)]);

        assert_eq!(config.unpaid_symbols(), vec![0, 9]);
    }

    #[test]
    fn test_evaluate_uses_coins() {
        let mut paytable = PayTables::new();
        paytable.insert(9, vec![0, 0, 3]).unwrap();
        let config = EvalConfig::new("scatter only", paytable)
            .with_mechanisms(vec![WinMechanism::scatter(9)])
            .with_coins(20);

        let scene = GameScene::from_columns(vec![vec![9, 1], vec![2, 9], vec![9, 3]]).unwrap();
        let evaluation = config.evaluate(&scene, 5);
        assert_eq!(evaluation.total_coin, 60);
        assert_eq!(evaluation.total_cash, 300);
    }
}
