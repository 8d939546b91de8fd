//! Exit placement: a far, reachable cell drawn from the most distant quartile.

use rand_chacha::rand_core::Rng;

use crate::state::Grid;
use crate::types::Pos;

use super::grid::Reachability;
use super::seed::roll_below;

/// Picks the portal cell. Candidates at or beyond `min_distance` are ranked farthest
/// first (row-major among equals) and the pick is uniform over the top quarter. With
/// no candidate, the first farthest reachable cell is used. `None` only when nothing
/// is reachable.
pub(super) fn choose_portal<R: Rng>(
    grid: &Grid,
    reachable: &Reachability,
    min_distance: u32,
    rng: &mut R,
) -> Option<Pos> {
    let mut candidates: Vec<(Pos, u32)> = reachable
        .cells_row_major(grid)
        .into_iter()
        .filter_map(|pos| reachable.distance(pos).map(|distance| (pos, distance)))
        .collect();
    let farthest = farthest_cell(&candidates);

    candidates.retain(|&(_, distance)| distance >= min_distance);
    if candidates.is_empty() {
        return farthest;
    }
    candidates.sort_by(|a, b| b.1.cmp(&a.1));
    let top = farthest_quartile_len(candidates.len());
    Some(candidates[roll_below(rng, top)].0)
}

pub(super) fn farthest_quartile_len(candidates: usize) -> usize {
    (candidates / 4).max(1)
}

fn farthest_cell(cells: &[(Pos, u32)]) -> Option<Pos> {
    let mut best: Option<(Pos, u32)> = None;
    for &(pos, distance) in cells {
        if best.is_none_or(|(_, best_distance)| distance > best_distance) {
            best = Some((pos, distance));
        }
    }
    best.map(|(pos, _)| pos)
}
