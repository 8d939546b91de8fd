//! Player, enemy, and chest records plus their self-contained movement rules.
//! Rules that involve several entities at once live in `rules`.

use crate::state::Grid;
use crate::types::{ChestContents, ChestReward, Delta, Pos};

pub const ENEMY_HEALTH: u32 = 50;
/// Player moves that must elapse between two enemy steps.
pub const ENEMY_MOVE_INTERVAL: u32 = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub pos: Pos,
    pub moves: u32,
    pub hearts_total: u32,
    pub hearts_full: u32,
    pub armors: u32,
    pub swords: u32,
    pub score: u32,
}

impl Player {
    pub fn new(pos: Pos, starting_hearts: u32) -> Self {
        Self {
            pos,
            moves: 0,
            hearts_total: starting_hearts,
            hearts_full: starting_hearts,
            armors: 0,
            swords: 0,
            score: 0,
        }
    }

    /// Steps one orthogonal cell. Returns `false` and leaves the player untouched when
    /// the delta is not a unit step or the target is out of bounds or a wall.
    pub fn try_move(&mut self, delta: Delta, grid: &Grid) -> bool {
        if !delta.is_unit() {
            return false;
        }
        let target = self.pos.offset(delta);
        if !grid.is_walkable(target) {
            return false;
        }
        self.pos = target;
        self.moves += 1;
        true
    }

    pub fn lose_heart(&mut self) {
        self.hearts_full = self.hearts_full.saturating_sub(1);
    }

    pub fn is_defeated(&self) -> bool {
        self.hearts_full == 0
    }

    /// Adds an empty heart container.
    pub fn add_heart_slot(&mut self) {
        self.hearts_total += 1;
    }

    /// Buys empty hearts back with score while both allow it; returns hearts restored.
    pub fn refill_hearts(&mut self, cost_per_heart: u32) -> u32 {
        let mut restored = 0;
        while self.hearts_full < self.hearts_total && self.score >= cost_per_heart {
            self.score -= cost_per_heart;
            self.hearts_full += 1;
            restored += 1;
        }
        restored
    }

    pub fn apply_reward(&mut self, reward: ChestReward) {
        match reward {
            ChestReward::Armor => self.armors = self.armors.saturating_add(1),
            ChestReward::Sword => self.swords = self.swords.saturating_add(1),
            ChestReward::Money(value) => self.score = self.score.saturating_add(value),
        }
    }

    /// Copies the persistent stats of the previous level's player; position and move
    /// counter stay at their fresh-level values.
    pub fn carry_stats_from(&mut self, previous: &Player) {
        self.hearts_total = previous.hearts_total;
        self.hearts_full = previous.hearts_full;
        self.armors = previous.armors;
        self.swords = previous.swords;
        self.score = previous.score;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub pos: Pos,
    pub health: u32,
    pub vision: i32,
    pub last_move_turn: u32,
    pub last_step: Delta,
}

impl Enemy {
    pub fn new(pos: Pos, vision: i32) -> Self {
        Self { pos, health: ENEMY_HEALTH, vision, last_move_turn: 0, last_step: Delta::ZERO }
    }

    pub fn can_act(&self, current_move: u32) -> bool {
        current_move.saturating_sub(self.last_move_turn) >= ENEMY_MOVE_INTERVAL
    }

    pub fn sees(&self, target: Pos) -> bool {
        (target.y - self.pos.y).abs() <= self.vision && (target.x - self.pos.x).abs() <= self.vision
    }

    /// Chase step: one cell toward the player along the axis with the larger gap,
    /// columns on ties. Only taken on the enemy's turn, with the player inside the
    /// vision box, onto a walkable cell.
    pub fn step_toward_player(&mut self, player: &Player, grid: &Grid, current_move: u32) -> bool {
        if !self.can_act(current_move) || !self.sees(player.pos) {
            return false;
        }
        let dist_y = player.pos.y - self.pos.y;
        let dist_x = player.pos.x - self.pos.x;
        let step = if dist_y.abs() > dist_x.abs() {
            Delta { dy: if dist_y > 0 { 1 } else { -1 }, dx: 0 }
        } else {
            Delta { dy: 0, dx: if dist_x > 0 { 1 } else { -1 } }
        };
        let target = self.pos.offset(step);
        if !grid.is_walkable(target) {
            return false;
        }
        self.pos = target;
        self.last_move_turn = current_move;
        self.last_step = step;
        true
    }

    /// Pushes the enemy up to `cells` cells against its last step (or away from the
    /// player if it never moved), stopping before the first blocked cell.
    /// Returns whether it was displaced at all.
    pub fn knock_back(&mut self, player_pos: Pos, grid: &Grid, cells: i32) -> bool {
        let heading = if self.last_step.is_zero() {
            Delta { dy: (self.pos.y - player_pos.y).signum(), dx: (self.pos.x - player_pos.x).signum() }
        } else {
            self.last_step
        };
        let push = heading.reversed();
        if push.is_zero() {
            return false;
        }

        let origin = self.pos;
        let mut landing = origin;
        for step in 1..=cells {
            let candidate = origin.offset(push.scaled(step));
            if !grid.is_walkable(candidate) {
                break;
            }
            landing = candidate;
        }
        if landing == origin {
            return false;
        }
        self.pos = landing;
        true
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chest {
    pub pos: Pos,
    pub contents: ChestContents,
    /// Only meaningful for `ChestContents::Money`.
    pub money_value: u32,
    pub opened: bool,
}

impl Chest {
    pub fn new(pos: Pos, contents: ChestContents, money_value: u32) -> Self {
        let money_value = if contents == ChestContents::Money { money_value } else { 0 };
        Self { pos, contents, money_value, opened: false }
    }

    /// Opens the chest once; later calls yield nothing.
    pub fn open(&mut self) -> Option<ChestReward> {
        if self.opened {
            return None;
        }
        self.opened = true;
        Some(match self.contents {
            ChestContents::Armor => ChestReward::Armor,
            ChestContents::Sword => ChestReward::Sword,
            ChestContents::Money => ChestReward::Money(self.money_value),
        })
    }
}
