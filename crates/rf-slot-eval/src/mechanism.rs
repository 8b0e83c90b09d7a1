//! Win mechanisms: which evaluators a game runs

use serde::{Deserialize, Serialize};

use crate::line::LineDirection;
use crate::paytable::{Payline, standard_20_paylines};
use crate::scatter::ScatterPolicy;
use crate::symbols::Symbol;

/// Win evaluation mechanism
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WinMechanism {
    /// Fixed paylines
    Paylines {
        /// Row per reel for each line; empty uses the standard 20 lines
        #[serde(default)]
        lines: Vec<Vec<usize>>,
        #[serde(default)]
        direction: LineDirection,
    },

    /// Ways to win (243 ways, 1024 ways, ...)
    Ways {
        /// Weigh matching cells by their multipliers
        #[serde(default)]
        cell_multipliers: bool,
    },

    /// Every path through matching cells paid as its own line
    FullLine,

    /// Cluster pays (4-connected matching symbols)
    ClusterPays,

    /// Straight runs along both axes
    Adjacency,

    /// Scatter pays for one symbol
    Scatter {
        symbol: Symbol,
        #[serde(default)]
        policy: ScatterPolicy,
    },
}

impl WinMechanism {
    /// Standard 20 paylines for 5x3 grid
    pub fn standard_20_paylines() -> Self {
        Self::Paylines {
            lines: Vec::new(),
            direction: LineDirection::LeftToRight,
        }
    }

    /// Plain ways
    pub fn ways() -> Self {
        Self::Ways {
            cell_multipliers: false,
        }
    }

    /// Scatter counted anywhere
    pub fn scatter(symbol: Symbol) -> Self {
        Self::Scatter {
            symbol,
            policy: ScatterPolicy::Anywhere,
        }
    }

    /// Payline definitions of a `Paylines` mechanism
    pub fn paylines(&self) -> Option<Vec<Payline>> {
        match self {
            Self::Paylines { lines, .. } if lines.is_empty() => Some(standard_20_paylines()),
            Self::Paylines { lines, .. } => Some(
                lines
                    .iter()
                    .enumerate()
                    .map(|(index, rows)| Payline::from_rows(index, rows))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Check if this is a payline-based mechanism
    pub fn is_paylines(&self) -> bool {
        matches!(self, Self::Paylines { .. })
    }

    /// Check if this is a ways-based mechanism
    pub fn is_ways(&self) -> bool {
        matches!(self, Self::Ways { .. } | Self::FullLine)
    }

    /// Check if this is cluster-based
    pub fn is_cluster(&self) -> bool {
        matches!(self, Self::ClusterPays)
    }
}

impl Default for WinMechanism {
    fn default() -> Self {
        Self::standard_20_paylines()
    }
}
