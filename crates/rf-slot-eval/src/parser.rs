//! Config parser for evaluation configs in JSON and YAML
//!
//! ## Usage
//!
//! ```rust,ignore
//! let parser = ConfigParser::new();
//! let config = parser.parse_json(json_string)?;
//! let evaluation = config.evaluate(&scene, bet);
//! ```

use crate::config::EvalConfig;
use crate::error::{SlotEvalError, SlotEvalResult};
use crate::mechanism::WinMechanism;

/// Config parser
pub struct ConfigParser {
    /// Validation limits
    pub limits: ConfigLimits,
}

/// Parsing limits
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    pub max_name_length: usize,
    pub max_symbols: usize,
    pub max_paylines: usize,
    pub max_mechanisms: usize,
    pub max_reels: usize,
    pub max_rows: usize,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_name_length: 256,
            max_symbols: 50,
            max_paylines: 100,
            max_mechanisms: 16,
            max_reels: 10,
            max_rows: 10,
        }
    }
}

impl ConfigParser {
    pub fn new() -> Self {
        Self {
            limits: ConfigLimits::default(),
        }
    }

    /// Create parser with custom limits
    pub fn with_limits(limits: ConfigLimits) -> Self {
        Self { limits }
    }

    pub fn parse_json(&self, json: &str) -> SlotEvalResult<EvalConfig> {
        let config: EvalConfig = serde_json::from_str(json)?;
        self.validate(&config)?;
        Ok(config)
    }

    pub fn parse_yaml(&self, yaml: &str) -> SlotEvalResult<EvalConfig> {
        let config: EvalConfig = serde_yml::from_str(yaml)?;
        self.validate(&config)?;
        Ok(config)
    }

    /// Check a config against the parser limits.
    ///
    /// Wild or scatter symbols without a paytable entry are allowed (they
    /// simply never pay on their own) but logged.
    pub fn validate(&self, config: &EvalConfig) -> SlotEvalResult<()> {
        let limits = &self.limits;

        if config.name.len() > limits.max_name_length {
            return Err(invalid(format!(
                "Config name too long: {} > {}",
                config.name.len(),
                limits.max_name_length
            )));
        }

        let symbols = config.paytable.symbols().len();
        if symbols > limits.max_symbols {
            return Err(invalid(format!("Too many symbols: {} > {}", symbols, limits.max_symbols)));
        }

        if config.mechanisms.is_empty() {
            return Err(invalid("No win mechanisms configured".to_string()));
        }
        if config.mechanisms.len() > limits.max_mechanisms {
            return Err(invalid(format!(
                "Too many mechanisms: {} > {}",
                config.mechanisms.len(),
                limits.max_mechanisms
            )));
        }

        for mechanism in &config.mechanisms {
            if let WinMechanism::Paylines { lines, .. } = mechanism {
                self.validate_lines(lines)?;
            }
        }

        if config.coins <= 0 {
            return Err(invalid(format!("Coins must be positive, got {}", config.coins)));
        }

        for m in &config.rules.multipliers {
            if m.x >= limits.max_reels || m.y >= limits.max_rows {
                return Err(invalid(format!(
                    "Multiplier cell ({}, {}) outside grid limits",
                    m.x, m.y
                )));
            }
            if m.value < 1 {
                return Err(invalid(format!(
                    "Multiplier at ({}, {}) must be >= 1, got {}",
                    m.x, m.y, m.value
                )));
            }
        }

        let unpaid = config.unpaid_symbols();
        if !unpaid.is_empty() {
            log::warn!("Config '{}': symbols {:?} have no paytable entry", config.name, unpaid);
        }

        Ok(())
    }

    fn validate_lines(&self, lines: &[Vec<usize>]) -> SlotEvalResult<()> {
        let limits = &self.limits;

        if lines.len() > limits.max_paylines {
            return Err(invalid(format!(
                "Too many paylines: {} > {}",
                lines.len(),
                limits.max_paylines
            )));
        }

        for (index, rows) in lines.iter().enumerate() {
            if rows.is_empty() || rows.len() > limits.max_reels {
                return Err(invalid(format!("Payline {} spans {} reels", index, rows.len())));
            }
            if let Some(row) = rows.iter().find(|&&row| row >= limits.max_rows) {
                return Err(invalid(format!(
                    "Payline {} uses row {} >= {}",
                    index, row, limits.max_rows
                )));
            }
        }

        Ok(())
    }
}

impl Default for ConfigParser {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(message: String) -> SlotEvalError {
    SlotEvalError::Validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scatter::ScatterPolicy;
    use crate::symbols::MultiplierMode;

    const FULL_JSON: &str = r#"{
        "name": "Fruit Five",
        "paytable": {
            "symbols": [
                { "symbol": 0, "name": "wild", "pays": [0, 0, 50] },
                { "symbol": 1, "name": "cherry", "pays": [0, 0, 5, 10, 20] },
                { "symbol": 9, "name": "scatter", "pays": [0, 0, 2, 10, 50] }
            ]
        },
        "rules": { "wilds": [0], "multipliers": [{ "x": 2, "y": 1, "value": 3 }] },
        "multiplier_mode": "additive",
        "mechanisms": [
            { "type": "paylines" },
            { "type": "scatter", "symbol": 9, "policy": "one_per_reel" }
        ],
        "coins": 20
    }"#;

    #[test]
    fn test_parse_full_json() {
        let config = ConfigParser::new().parse_json(FULL_JSON).unwrap();

        assert_eq!(config.name, "Fruit Five");
        assert_eq!(config.paytable.symbol_by_name("cherry"), Some(1));
        assert_eq!(config.rules.wilds, vec![0]);
        assert_eq!(config.multiplier_mode, Some(MultiplierMode::Additive));
        assert_eq!(config.coins, 20);
        assert_eq!(
            config.mechanisms[1],
            WinMechanism::Scatter {
                symbol: 9,
                policy: ScatterPolicy::OnePerReel,
            }
        );
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
name: Cluster Test
paytable:
  symbols:
    - symbol: 1
      pays: [0, 0, 0, 0, 5, 10]
rules:
  wilds: [0]
mechanisms:
  - type: cluster_pays
  - type: scatter
    symbol: 9
    policy:
      window:
        height: 2
"#;
        let config = ConfigParser::new().parse_yaml(yaml).unwrap();
        assert_eq!(config.mechanisms[0], WinMechanism::ClusterPays);
        assert_eq!(
            config.mechanisms[1],
            WinMechanism::Scatter {
                symbol: 9,
                policy: ScatterPolicy::Window { height: 2, reversed: false },
            }
        );
    }

    #[test]
    fn test_validation_limits() {
        let parser = ConfigParser::with_limits(ConfigLimits {
            max_symbols: 2,
            ..Default::default()
        });
        assert!(matches!(parser.parse_json(FULL_JSON), Err(SlotEvalError::Validation(_))));

        let bad_row = r#"{
            "paytable": { "symbols": [] },
            "mechanisms": [{ "type": "paylines", "lines": [[0, 1, 12]] }]
        }"#;
        assert!(matches!(
            ConfigParser::new().parse_json(bad_row),
            Err(SlotEvalError::Validation(_))
        ));

        let no_mechanisms = r#"{ "paytable": { "symbols": [] }, "mechanisms": [] }"#;
        assert!(ConfigParser::new().parse_json(no_mechanisms).is_err());
    }

    #[test]
    fn test_negative_pay_rejected() {
        let json = r#"{ "paytable": { "symbols": [{ "symbol": 1, "pays": [0, -5] }] } }"#;
        assert!(ConfigParser::new().parse_json(json).is_err());
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(ConfigParser::new().parse_json("{"), Err(SlotEvalError::Json(_))));
        assert!(matches!(
            ConfigParser::new().parse_yaml("paytable: [unclosed"),
            Err(SlotEvalError::Yaml(_))
        ));
    }
}
