//! # rf-slot-eval: Slot Win Evaluation for ReelForge
//!
//! Evaluates a visible reel window against a paytable and reports every
//! win: paylines, adjacency runs, clusters, scatters, ways and full lines.
//!
//! ## Features
//!
//! - **Wild/symbol tie-break**: runs starting on wilds pay the better of the
//!   wild-only and the extended-symbol reading
//! - **Symbol rules**: wilds, invalid codes, remapping and cell multipliers
//!   are supplied per game through [`SymbolRules`]
//! - **Integer money**: `coin_win = mul × other_mul × coins`, `cash_win = coin_win × bet`
//! - **Config driven**: games described in JSON or YAML via [`ConfigParser`]
//!
//! ## Architecture
//!
//! ```text
//! EvalConfig ── PayTables + BasicRules + Vec<WinMechanism>
//!     │
//!     v
//! SceneEvaluator ── GameScene (cells[x][y], optional reel heights)
//!     │
//!     ├── LineEvaluator      (paylines, tie-break)
//!     ├── AdjacencyEvaluator (runs down reels, then across)
//!     ├── ClusterEvaluator   (4-connected flood fill)
//!     ├── ScatterEvaluator   (count policies)
//!     └── WaysEvaluator      (ways, full lines)
//!           │
//!           v
//!     Evaluation → Vec<WinResult>
//! ```
//!
//! The caller's scene is never modified. Cascading games feed the wins to
//! [`apply_removal`] and refill the holes themselves.

pub mod adjacency;
pub mod cascade;
pub mod cluster;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod line;
pub mod mechanism;
pub mod parser;
pub mod paytable;
pub mod result;
pub mod scatter;
pub mod scene;
pub mod symbols;
pub mod ways;

pub use adjacency::*;
pub use cascade::*;
pub use cluster::*;
pub use config::*;
pub use error::*;
pub use evaluation::*;
pub use line::{LineCount, LineDirection, LineEvaluator};
pub use mechanism::*;
pub use parser::*;
pub use paytable::*;
pub use result::*;
pub use scatter::*;
pub use scene::*;
pub use symbols::*;
pub use ways::*;
