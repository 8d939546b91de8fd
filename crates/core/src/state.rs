use slotmap::SlotMap;

use crate::entities::{Chest, Enemy, Player};
use crate::mapgen::reachability_from;
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    tiles: Vec<TileKind>,
}

impl Grid {
    pub fn filled(rows: usize, cols: usize, tile: TileKind) -> Self {
        Self { rows, cols, tiles: vec![tile; rows * cols] }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.y >= 0 && pos.x >= 0 && (pos.y as usize) < self.rows && (pos.x as usize) < self.cols
    }

    /// Out-of-bounds positions read as walls.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.tile_at(pos).is_walkable()
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    /// Every cell position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.rows)
            .flat_map(move |y| (0..self.cols).map(move |x| Pos { y: y as i32, x: x as i32 }))
    }

    pub fn count(&self, tile: TileKind) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    pub fn center(&self) -> Pos {
        Pos { y: (self.rows / 2) as i32, x: (self.cols / 2) as i32 }
    }

    pub(crate) fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.cols + (pos.x as usize)
    }

    /// Builds a grid from text rows: `#` wall, `O` portal, anything else floor.
    #[cfg(test)]
    pub(crate) fn from_ascii(rows: &[&str]) -> Self {
        let cols = rows.first().map_or(0, |row| row.len());
        let mut grid = Self::filled(rows.len(), cols, TileKind::Floor);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let tile = match c {
                    '#' => TileKind::Wall,
                    'O' => TileKind::Portal,
                    _ => TileKind::Floor,
                };
                grid.set_tile(Pos { y: y as i32, x: x as i32 }, tile);
            }
        }
        grid
    }
}

/// Fog-of-war mask. Cells only ever flip from hidden to revealed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Visibility {
    rows: usize,
    cols: usize,
    revealed: Vec<bool>,
}

impl Visibility {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, revealed: vec![false; rows * cols] }
    }

    pub fn is_revealed(&self, pos: Pos) -> bool {
        if pos.y < 0 || pos.x < 0 || pos.y as usize >= self.rows || pos.x as usize >= self.cols {
            return false;
        }
        self.revealed[(pos.y as usize) * self.cols + (pos.x as usize)]
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|&&r| r).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.revealed
    }

    /// Reveals the Euclidean disk `dy² + dx² <= radius²` clipped to the grid.
    /// Radii wider than the grid reveal everything.
    pub fn reveal_disk(&mut self, center: Pos, radius: u32) {
        let radius = i64::from(radius).min((self.rows + self.cols) as i64);
        let r2 = radius * radius;
        let (cy, cx) = (i64::from(center.y), i64::from(center.x));
        let min_y = (cy - radius).max(0);
        let max_y = (cy + radius + 1).min(self.rows as i64);
        let min_x = (cx - radius).max(0);
        let max_x = (cx + radius + 1).min(self.cols as i64);
        for y in min_y..max_y {
            for x in min_x..max_x {
                let dy = cy - y;
                let dx = cx - x;
                if dy * dy + dx * dx <= r2 {
                    self.revealed[(y as usize) * self.cols + (x as usize)] = true;
                }
            }
        }
    }
}

/// One generated level: terrain, fog, and every entity on it.
#[derive(Clone, Debug)]
pub struct Map {
    pub grid: Grid,
    pub visibility: Visibility,
    pub player: Player,
    pub enemies: SlotMap<EnemyId, Enemy>,
    pub chests: SlotMap<ChestId, Chest>,
    pub portal: Pos,
    pub spawn: Pos,
    pub level_estimate: u32,
}

impl Map {
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn reveal_area(&mut self, center: Pos, radius: u32) {
        self.visibility.reveal_disk(center, radius);
    }

    pub fn move_player(&mut self, delta: Delta) -> bool {
        self.player.try_move(delta, &self.grid)
    }

    pub fn enemy_at(&self, pos: Pos) -> Option<EnemyId> {
        self.enemies.iter().find(|(_, enemy)| enemy.pos == pos).map(|(id, _)| id)
    }

    pub fn unopened_chest_at(&self, pos: Pos) -> Option<ChestId> {
        self.chests.iter().find(|(_, chest)| !chest.opened && chest.pos == pos).map(|(id, _)| id)
    }

    /// Shortest walkable route from the player to `target`, as move directions.
    pub fn route_to(&self, target: Pos) -> Option<Vec<Direction>> {
        let from_target = reachability_from(&self.grid, target);
        let mut remaining = from_target.distance(self.player.pos)?;
        let mut pos = self.player.pos;
        let mut route = Vec::with_capacity(remaining as usize);
        while remaining > 0 {
            let direction = Direction::ALL.into_iter().find(|direction| {
                from_target.distance(pos.offset(direction.delta())) == Some(remaining - 1)
            })?;
            pos = pos.offset(direction.delta());
            route.push(direction);
            remaining -= 1;
        }
        Some(route)
    }

    /// Stable byte encoding of the level layout and entities, for fingerprints.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.rows() as u32).to_le_bytes());
        bytes.extend((self.cols() as u32).to_le_bytes());
        for tile in self.grid.tiles() {
            bytes.push(match tile {
                TileKind::Wall => 0,
                TileKind::Floor => 1,
                TileKind::Portal => 2,
            });
        }
        bytes.extend(self.spawn.y.to_le_bytes());
        bytes.extend(self.spawn.x.to_le_bytes());
        bytes.extend(self.portal.y.to_le_bytes());
        bytes.extend(self.portal.x.to_le_bytes());
        bytes.extend(self.level_estimate.to_le_bytes());

        bytes.extend((self.enemies.len() as u32).to_le_bytes());
        for enemy in self.enemies.values() {
            bytes.extend(enemy.pos.y.to_le_bytes());
            bytes.extend(enemy.pos.x.to_le_bytes());
            bytes.extend(enemy.vision.to_le_bytes());
        }

        bytes.extend((self.chests.len() as u32).to_le_bytes());
        for chest in self.chests.values() {
            bytes.extend(chest.pos.y.to_le_bytes());
            bytes.extend(chest.pos.x.to_le_bytes());
            bytes.push(match chest.contents {
                ChestContents::Armor => 0,
                ChestContents::Sword => 1,
                ChestContents::Money => 2,
            });
            bytes.extend(chest.money_value.to_le_bytes());
            bytes.push(u8::from(chest.opened));
        }
        bytes
    }

    /// Hand-drawn level for tests: the grid comes from [`Grid::from_ascii`] and the
    /// player starts at `player` with default stats and no other entities.
    #[cfg(test)]
    pub(crate) fn from_ascii(rows: &[&str], player: Pos) -> Self {
        let grid = Grid::from_ascii(rows);
        let visibility = Visibility::new(grid.rows(), grid.cols());
        let portal = grid
            .positions()
            .find(|&pos| grid.tile_at(pos) == TileKind::Portal)
            .unwrap_or(Pos { y: -1, x: -1 });
        Self {
            grid,
            visibility,
            player: Player::new(player, 2),
            enemies: SlotMap::with_key(),
            chests: SlotMap::with_key(),
            portal,
            spawn: player,
            level_estimate: 1,
        }
    }

    /// Text rendering for tools and test diagnostics. Hidden cells print as blanks
    /// unless `reveal_all` is set.
    pub fn render_ascii(&self, reveal_all: bool) -> String {
        let mut text = String::with_capacity((self.cols() + 1) * self.rows());
        for y in 0..self.rows() {
            for x in 0..self.cols() {
                let pos = Pos { y: y as i32, x: x as i32 };
                if !reveal_all && !self.visibility.is_revealed(pos) {
                    text.push(' ');
                    continue;
                }
                let c = if pos == self.player.pos {
                    '@'
                } else if self.enemy_at(pos).is_some() {
                    'E'
                } else if self.unopened_chest_at(pos).is_some() {
                    'C'
                } else {
                    match self.grid.tile_at(pos) {
                        TileKind::Wall => '#',
                        TileKind::Floor => '.',
                        TileKind::Portal => 'O',
                    }
                };
                text.push(c);
            }
            text.push('\n');
        }
        text
    }
}
