//! Level generation orchestration: random terrain attempts, then a carved fallback.

use rand_chacha::rand_core::Rng;

use crate::config::GameConfig;
use crate::entities::Player;
use crate::state::{Grid, Map, Visibility};
use crate::types::{GameError, Pos, TileKind};

use super::grid::{
    Reachability, carve_l_corridor, farthest_corner, reachability_from, seal_unreachable,
};
use super::portal::choose_portal;
use super::progression;
use super::seed::roll_unit;
use super::spawns::{SpawnContext, Spawns, place_entities};

pub struct MapGenerator {
    rows: usize,
    cols: usize,
    config: GameConfig,
}

/// Terrain with a confirmed spawn-to-portal connection, before entities.
struct Layout {
    grid: Grid,
    spawn: Pos,
    portal: Pos,
    reachable: Reachability,
}

impl MapGenerator {
    pub fn new(rows: usize, cols: usize, config: &GameConfig) -> Result<Self, GameError> {
        if !progression::map_dimensions_valid(rows, cols) {
            return Err(GameError::InvalidDimensions { rows, cols });
        }
        config.validate()?;
        Ok(Self { rows, cols, config: config.clone() })
    }

    pub fn level_estimate(&self) -> u32 {
        progression::level_estimate(self.rows, self.cols)
    }

    /// Always returns a connected level: bounded random attempts first, then the
    /// carved-corridor layout that cannot fail.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Map {
        let level = self.level_estimate();
        for _ in 0..self.config.generation_attempts {
            if let Some(layout) = self.random_layout(level, rng) {
                return self.populate(layout, level, rng);
            }
        }
        let layout = self.carved_layout(level, rng);
        self.populate(layout, level, rng)
    }

    fn random_layout<R: Rng>(&self, level: u32, rng: &mut R) -> Option<Layout> {
        let (mut grid, spawn) = self.terrain(level, rng);

        let reachable = reachability_from(&grid, spawn);
        // An isolated spawn fails too: the only portal candidate would be the spawn itself.
        if reachable.len() <= 1 {
            return None;
        }

        let min_distance = progression::portal_min_distance(level, self.rows, self.cols);
        let portal = choose_portal(&grid, &reachable, min_distance, rng)?;
        grid.set_tile(portal, TileKind::Portal);

        let reachable = reachability_from(&grid, spawn);
        if !reachable.contains(portal) {
            return None;
        }
        Some(Layout { grid, spawn, portal, reachable })
    }

    fn carved_layout<R: Rng>(&self, level: u32, rng: &mut R) -> Layout {
        let (mut grid, spawn) = self.terrain(level, rng);
        let portal = farthest_corner(&grid, spawn);
        carve_l_corridor(&mut grid, spawn, portal);
        grid.set_tile(portal, TileKind::Portal);
        let reachable = reachability_from(&grid, spawn);
        Layout { grid, spawn, portal, reachable }
    }

    /// I.i.d. floor/wall cells with the centre forced open.
    fn terrain<R: Rng>(&self, level: u32, rng: &mut R) -> (Grid, Pos) {
        let floor_probability = progression::floor_probability(level);
        let mut grid = Grid::filled(self.rows, self.cols, TileKind::Wall);
        let positions: Vec<Pos> = grid.positions().collect();
        for pos in positions {
            if roll_unit(rng) < floor_probability {
                grid.set_tile(pos, TileKind::Floor);
            }
        }
        let spawn = grid.center();
        grid.set_tile(spawn, TileKind::Floor);
        (grid, spawn)
    }

    fn populate<R: Rng>(&self, layout: Layout, level: u32, rng: &mut R) -> Map {
        let Layout { mut grid, spawn, portal, reachable } = layout;
        seal_unreachable(&mut grid, &reachable);

        let Spawns { enemies, chests } = place_entities(
            &SpawnContext {
                grid: &grid,
                reachable: &reachable,
                spawn,
                portal,
                level,
                config: &self.config,
            },
            rng,
        );

        let mut visibility = Visibility::new(self.rows, self.cols);
        visibility.reveal_disk(spawn, self.config.reveal_radius);

        Map {
            grid,
            visibility,
            player: Player::new(spawn, self.config.starting_hearts),
            enemies,
            chests,
            portal,
            spawn,
            level_estimate: level,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;
    use xxhash_rust::xxh3::xxh3_64;

    use super::*;

    fn generate(rows: usize, cols: usize, seed: u64) -> Map {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        MapGenerator::new(rows, cols, &GameConfig::default())
            .expect("valid dimensions")
            .generate(&mut rng)
    }

    fn all_walkable_cells_reachable(map: &Map) -> bool {
        let reach = reachability_from(&map.grid, map.spawn);
        map.grid.positions().filter(|&pos| map.grid.is_walkable(pos)).all(|pos| reach.contains(pos))
    }

    #[test]
    fn same_seed_produces_byte_identical_levels() {
        let a = generate(17, 17, 123_456);
        let b = generate(17, 17, 123_456);
        assert_eq!(a.canonical_bytes(), b.canonical_bytes());
    }

    #[test]
    fn different_seeds_produce_different_levels() {
        let fingerprints: BTreeSet<u64> =
            (0..8).map(|seed| xxh3_64(&generate(15, 15, seed).canonical_bytes())).collect();
        assert!(fingerprints.len() > 1, "seeds should not collapse to one layout");
    }

    #[test]
    fn player_spawns_on_centre_floor_with_starting_stats() {
        let map = generate(15, 21, 9);
        assert_eq!(map.spawn, Pos { y: 7, x: 10 });
        assert_eq!(map.player.pos, map.spawn);
        assert_eq!(map.grid.tile_at(map.spawn), TileKind::Floor);
        assert_eq!((map.player.hearts_full, map.player.hearts_total), (2, 2));
        assert_eq!(map.player.moves, 0);
    }

    #[test]
    fn spawn_area_starts_revealed() {
        let map = generate(15, 15, 4);
        assert!(map.visibility.is_revealed(map.spawn));
        assert!(map.visibility.is_revealed(Pos { y: 7, x: 10 }));
        assert!(!map.visibility.is_revealed(Pos { y: 0, x: 0 }));
    }

    #[test]
    fn level_has_exactly_one_reachable_portal() {
        for seed in 0..20 {
            let map = generate(16, 16, seed);
            assert_eq!(map.grid.count(TileKind::Portal), 1, "seed={seed}");
            assert_eq!(map.grid.tile_at(map.portal), TileKind::Portal);
            assert_ne!(map.portal, map.spawn);
            assert!(reachability_from(&map.grid, map.spawn).contains(map.portal));
        }
    }

    #[test]
    fn portal_on_fifteen_square_is_drawn_from_the_farthest_quartile() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let generator =
                MapGenerator::new(15, 15, &GameConfig::default()).expect("valid dimensions");
            let Some(layout) = generator.random_layout(1, &mut rng) else {
                continue;
            };
            let mut distances: Vec<u32> = layout
                .reachable
                .cells()
                .iter()
                .filter_map(|&pos| layout.reachable.distance(pos))
                .filter(|&distance| distance >= 9)
                .collect();
            let portal_distance =
                layout.reachable.distance(layout.portal).expect("portal reachable");
            if distances.is_empty() {
                // No cell meets the threshold: the farthest cell is used instead.
                let farthest = layout
                    .reachable
                    .cells()
                    .iter()
                    .filter_map(|&pos| layout.reachable.distance(pos))
                    .max()
                    .expect("non-empty reachable set");
                assert_eq!(portal_distance, farthest);
                continue;
            }
            distances.sort_unstable_by(|a, b| b.cmp(a));
            let quartile = (distances.len() / 4).max(1);
            assert!(
                portal_distance >= distances[quartile - 1],
                "seed={seed}: portal at distance {portal_distance} is outside the top quartile"
            );
        }
    }

    #[test]
    fn entities_sit_on_reachable_floor_away_from_spawn_and_portal() {
        for seed in 0..10 {
            let map = generate(18, 18, seed);
            let reach = reachability_from(&map.grid, map.spawn);
            for pos in map
                .enemies
                .values()
                .map(|enemy| enemy.pos)
                .chain(map.chests.values().map(|chest| chest.pos))
            {
                assert!(reach.contains(pos), "seed={seed}: entity at unreachable {pos:?}");
                assert_ne!(pos, map.spawn);
                assert_ne!(pos, map.portal);
            }
        }
    }

    #[test]
    fn difficulty_scales_with_map_size() {
        let small = generate(15, 15, 77);
        let large = generate(27, 27, 77);
        assert_eq!(small.level_estimate, 1);
        assert_eq!(large.level_estimate, 12);
        assert!(large.enemies.values().all(|enemy| enemy.vision == 9));
        assert!(small.enemies.values().all(|enemy| enemy.vision == 5));
    }

    #[test]
    fn carved_fallback_connects_spawn_to_farthest_corner() {
        let generator =
            MapGenerator::new(11, 13, &GameConfig::default()).expect("valid dimensions");
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let layout = generator.carved_layout(1, &mut rng);
        assert_eq!(layout.spawn, Pos { y: 5, x: 6 });
        assert_eq!(layout.portal, Pos { y: 0, x: 0 });
        assert_eq!(layout.reachable.distance(layout.portal), Some(11));

        let map = generator.populate(layout, 1, &mut rng);
        assert!(all_walkable_cells_reachable(&map));
        assert_eq!(map.grid.count(TileKind::Portal), 1);
    }

    #[test]
    fn zero_floor_budget_still_yields_a_connected_level() {
        // A 3x3 grid fails the random path often; the result must stay playable.
        for seed in 0..64 {
            let map = generate(3, 3, seed);
            assert!(all_walkable_cells_reachable(&map), "seed={seed}\n{}", map.render_ascii(true));
            assert_ne!(map.portal, map.spawn);
            assert_eq!(map.grid.count(TileKind::Portal), 1);
        }
    }

    #[test]
    fn single_attempt_config_falls_back_when_the_attempt_fails() {
        let config = GameConfig { generation_attempts: 1, ..GameConfig::default() };
        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let map = MapGenerator::new(4, 4, &config).expect("valid").generate(&mut rng);
            assert!(all_walkable_cells_reachable(&map), "seed={seed}");
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn generated_levels_keep_every_walkable_cell_connected(
            seed in any::<u64>(),
            rows in 3_usize..40,
            cols in 3_usize..40,
        ) {
            let map = generate(rows, cols, seed);
            prop_assert!(
                all_walkable_cells_reachable(&map),
                "seed={seed}, size={rows}x{cols} left an unreachable walkable cell"
            );
            prop_assert_eq!(map.grid.count(TileKind::Portal), 1);
            prop_assert!(map.grid.is_walkable(map.spawn));
        }
    }
}
