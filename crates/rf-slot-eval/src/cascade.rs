//! Post-win removal for cascading (tumbling) reels
//!
//! The evaluators only report wins. Deciding whether to cascade is up to the
//! caller; these helpers apply one removal step to a scene.

use serde::{Deserialize, Serialize};

use crate::result::WinResult;
use crate::scene::{GameScene, Pos};

/// How winning symbols are removed in cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoveMode {
    /// Only winning symbols removed
    #[default]
    WinningOnly,
    /// Entire winning reels cleared
    WholeReel,
    /// Winning symbols + adjacent
    WithAdjacent,
}

/// Distinct winning positions of `wins`, in first-seen order
pub fn winning_positions(wins: &[WinResult]) -> Vec<Pos> {
    let mut positions: Vec<Pos> = Vec::new();
    for pos in wins.iter().flat_map(|w| w.positions().iter().copied()) {
        if !positions.contains(&pos) {
            positions.push(pos);
        }
    }
    positions
}

/// Cells to clear for `wins` under `mode`
pub fn removal_positions(scene: &GameScene, wins: &[WinResult], mode: RemoveMode) -> Vec<Pos> {
    let winning = winning_positions(wins);

    match mode {
        RemoveMode::WinningOnly => winning,
        RemoveMode::WholeReel => {
            let mut reels: Vec<usize> = winning.iter().map(|&(x, _)| x).collect();
            reels.sort_unstable();
            reels.dedup();
            reels
                .into_iter()
                .flat_map(|x| (0..scene.reel_height(x)).map(move |y| (x, y)))
                .collect()
        }
        RemoveMode::WithAdjacent => {
            let mut positions = winning.clone();
            for &(x, y) in &winning {
                scene.for_each_around(x, y, |nx, ny, _| {
                    if !positions.contains(&(nx, ny)) {
                        positions.push((nx, ny));
                    }
                });
            }
            positions
        }
    }
}

/// Clear the cells of `wins` and let the survivors fall.
///
/// Returns the number of symbols removed; 0 means the scene is unchanged.
pub fn apply_removal(scene: &mut GameScene, wins: &[WinResult], mode: RemoveMode) -> usize {
    let positions = removal_positions(scene, wins, mode);
    let removed = scene.remove_positions(&positions);
    if removed > 0 {
        scene.drop_down();
        log::debug!("Cascade removed {} symbols ({:?}), holes {:?}", removed, mode, scene.holes());
    }
    removed
}
