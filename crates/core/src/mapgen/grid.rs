//! Reachability and corridor primitives shared by terrain synthesis and routing.

use std::collections::VecDeque;

use crate::state::Grid;
use crate::types::{Direction, Pos, TileKind};

/// BFS result from one start cell: step distance per cell, plus the visit order.
#[derive(Clone, Debug)]
pub struct Reachability {
    cols: usize,
    distances: Vec<Option<u32>>,
    order: Vec<Pos>,
}

impl Reachability {
    pub fn contains(&self, pos: Pos) -> bool {
        self.distance(pos).is_some()
    }

    pub fn distance(&self, pos: Pos) -> Option<u32> {
        if pos.y < 0 || pos.x < 0 || pos.x as usize >= self.cols {
            return None;
        }
        self.distances.get((pos.y as usize) * self.cols + (pos.x as usize)).copied().flatten()
    }

    /// Reached cells in BFS order, start first.
    pub fn cells(&self) -> &[Pos] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Reached cells in row-major order.
    pub(super) fn cells_row_major(&self, grid: &Grid) -> Vec<Pos> {
        grid.positions().filter(|&pos| self.contains(pos)).collect()
    }
}

/// 4-neighbour BFS over walkable cells. A non-walkable start reaches nothing.
pub(crate) fn reachability_from(grid: &Grid, start: Pos) -> Reachability {
    let mut distances = vec![None; grid.rows() * grid.cols()];
    let mut order = Vec::new();
    if !grid.is_walkable(start) {
        return Reachability { cols: grid.cols(), distances, order };
    }

    distances[grid.index(start)] = Some(0);
    let mut open = VecDeque::from([start]);
    while let Some(pos) = open.pop_front() {
        order.push(pos);
        let Some(distance) = distances[grid.index(pos)] else {
            continue;
        };
        for direction in Direction::ALL {
            let next = pos.offset(direction.delta());
            if !grid.is_walkable(next) {
                continue;
            }
            let slot = &mut distances[grid.index(next)];
            if slot.is_none() {
                *slot = Some(distance + 1);
                open.push_back(next);
            }
        }
    }

    Reachability { cols: grid.cols(), distances, order }
}

pub(super) fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Grid corner farthest from `from`; earlier corners win ties.
pub(super) fn farthest_corner(grid: &Grid, from: Pos) -> Pos {
    let last_row = grid.rows() as i32 - 1;
    let last_col = grid.cols() as i32 - 1;
    let corners = [
        Pos { y: 0, x: 0 },
        Pos { y: 0, x: last_col },
        Pos { y: last_row, x: 0 },
        Pos { y: last_row, x: last_col },
    ];
    let mut best = corners[0];
    for corner in corners.into_iter().skip(1) {
        if manhattan(from, corner) > manhattan(from, best) {
            best = corner;
        }
    }
    best
}

/// Opens an L-shaped floor corridor: along the rows first, then along the columns.
pub(super) fn carve_l_corridor(grid: &mut Grid, from: Pos, to: Pos) {
    let step_y = if to.y > from.y { 1 } else { -1 };
    let mut y = from.y;
    loop {
        grid.set_tile(Pos { y, x: from.x }, TileKind::Floor);
        if y == to.y {
            break;
        }
        y += step_y;
    }

    let step_x = if to.x > from.x { 1 } else { -1 };
    let mut x = from.x;
    loop {
        grid.set_tile(Pos { y: to.y, x }, TileKind::Floor);
        if x == to.x {
            break;
        }
        x += step_x;
    }
}

/// Walls in every walkable cell outside `reachable`; returns how many were sealed.
pub(super) fn seal_unreachable(grid: &mut Grid, reachable: &Reachability) -> usize {
    let pockets: Vec<Pos> =
        grid.positions().filter(|&pos| grid.is_walkable(pos) && !reachable.contains(pos)).collect();
    for &pos in &pockets {
        grid.set_tile(pos, TileKind::Wall);
    }
    pockets.len()
}
