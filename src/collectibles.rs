//! Collectibles ("fruit") the body eats to grow.

use crate::geometry::{circle_rect_overlap, positions_equal, Rect, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What happens after a collectible is eaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RespawnPolicy {
    /// Eaten items stay gone until the level resets.
    FixedSet,
    /// Every eaten item is immediately replaced at a fresh random position.
    Replenishing,
}

impl RespawnPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FixedSet => "Fixed",
            Self::Replenishing => "Refill",
        }
    }
}

/// Inclusive integer ranges random spawns are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnArea {
    pub x: [i32; 2],
    pub y: [i32; 2],
}

impl SpawnArea {
    pub fn random_position<R: Rng>(&self, rng: &mut R) -> Vec2 {
        let x = rng.gen_range(self.x[0]..=self.x[1]);
        let y = rng.gen_range(self.y[0]..=self.y[1]);
        Vec2::new(x as f32, y as f32)
    }

    /// True when either range has min > max; nothing can be drawn from it.
    pub fn is_empty(&self) -> bool {
        self.x[0] > self.x[1] || self.y[0] > self.y[1]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collectible {
    /// Grid cell (grid mode) or pixel center (continuous mode).
    pub pos: Vec2,
    pub radius: f32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectibleSet {
    items: Vec<Collectible>,
    capacity: usize,
    radius: f32,
    policy: RespawnPolicy,
    area: SpawnArea,
}

impl CollectibleSet {
    pub fn new(capacity: usize, radius: f32, policy: RespawnPolicy, area: SpawnArea) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            radius,
            policy,
            area,
        }
    }

    pub fn items(&self) -> &[Collectible] {
        &self.items
    }

    pub fn active(&self) -> impl Iterator<Item = &Collectible> {
        self.items.iter().filter(|c| c.active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn policy(&self) -> RespawnPolicy {
        self.policy
    }

    /// Place an active collectible at `pos`. Returns false once full.
    pub fn spawn_one(&mut self, pos: Vec2) -> bool {
        if self.items.len() >= self.capacity {
            return false;
        }
        self.items.push(Collectible {
            pos,
            radius: self.radius,
            active: true,
        });
        true
    }

    /// Replace the whole set with `count` collectibles at random positions.
    /// Positions ignore platforms and the body.
    pub fn spawn_all<R: Rng>(&mut self, count: usize, rng: &mut R) {
        self.items.clear();
        for _ in 0..count {
            let pos = self.area.random_position(rng);
            if !self.spawn_one(pos) {
                break;
            }
        }
    }

    /// Eat every active collectible in the head's grid cell.
    pub fn try_consume_cell<R: Rng>(&mut self, head: Vec2, rng: &mut R) -> usize {
        self.consume_where(|c| positions_equal(c.pos, head), rng)
    }

    /// Eat every active collectible whose circle overlaps the head rectangle.
    pub fn try_consume_rect<R: Rng>(&mut self, head: &Rect, rng: &mut R) -> usize {
        self.consume_where(|c| circle_rect_overlap(c.pos, c.radius, head), rng)
    }

    /// Deactivate each active hit exactly once and return how many were hit.
    fn consume_where<F, R>(&mut self, hit: F, rng: &mut R) -> usize
    where
        F: Fn(&Collectible) -> bool,
        R: Rng,
    {
        let mut consumed = 0;
        for item in self.items.iter_mut().filter(|c| c.active) {
            if hit(item) {
                item.active = false;
                consumed += 1;
            }
        }

        if consumed > 0 && self.policy == RespawnPolicy::Replenishing {
            self.items.retain(|c| c.active);
            for _ in 0..consumed {
                let pos = self.area.random_position(rng);
                self.spawn_one(pos);
            }
        }

        consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const AREA: SpawnArea = SpawnArea {
        x: [1, 18],
        y: [1, 10],
    };

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn in_area(pos: Vec2) -> bool {
        (AREA.x[0] as f32..=AREA.x[1] as f32).contains(&pos.x)
            && (AREA.y[0] as f32..=AREA.y[1] as f32).contains(&pos.y)
    }

    #[test]
    fn test_spawn_all_within_area() {
        let mut rng = create_test_rng();
        let mut set = CollectibleSet::new(5, 13.0, RespawnPolicy::FixedSet, AREA);
        set.spawn_all(5, &mut rng);
        assert_eq!(set.items().len(), 5);
        for item in set.items() {
            assert!(item.active);
            assert!(in_area(item.pos));
            assert_eq!(item.pos.x.fract(), 0.0);
        }
    }

    #[test]
    fn test_spawn_is_soft_capped() {
        let mut rng = create_test_rng();
        let mut set = CollectibleSet::new(3, 13.0, RespawnPolicy::FixedSet, AREA);
        set.spawn_all(10, &mut rng);
        assert_eq!(set.items().len(), 3);
        assert!(!set.spawn_one(Vec2::new(2.0, 2.0)));
    }

    #[test]
    fn test_try_consume_cell_is_idempotent() {
        let mut rng = create_test_rng();
        let mut set = CollectibleSet::new(5, 13.0, RespawnPolicy::FixedSet, AREA);
        set.spawn_one(Vec2::new(3.0, 4.0));
        set.spawn_one(Vec2::new(8.0, 2.0));

        assert_eq!(set.try_consume_cell(Vec2::new(3.0, 4.0), &mut rng), 1);
        assert!(!set.items()[0].active);
        assert!(set.items()[1].active);

        assert_eq!(set.try_consume_cell(Vec2::new(3.0, 4.0), &mut rng), 0);
        assert_eq!(set.active_count(), 1);
    }

    #[test]
    fn test_try_consume_cell_eats_stacked_items() {
        let mut rng = create_test_rng();
        let mut set = CollectibleSet::new(5, 13.0, RespawnPolicy::FixedSet, AREA);
        set.spawn_one(Vec2::new(3.0, 4.0));
        set.spawn_one(Vec2::new(3.0, 4.0));
        assert_eq!(set.try_consume_cell(Vec2::new(3.0, 4.0), &mut rng), 2);
    }

    #[test]
    fn test_try_consume_miss() {
        let mut rng = create_test_rng();
        let mut set = CollectibleSet::new(5, 13.0, RespawnPolicy::FixedSet, AREA);
        set.spawn_one(Vec2::new(3.0, 4.0));
        assert_eq!(set.try_consume_cell(Vec2::new(4.0, 4.0), &mut rng), 0);
        assert_eq!(set.active_count(), 1);
    }

    #[test]
    fn test_try_consume_rect_circle_overlap() {
        let mut rng = create_test_rng();
        let area = SpawnArea {
            x: [20, 780],
            y: [40, 400],
        };
        let mut set = CollectibleSet::new(3, 10.0, RespawnPolicy::FixedSet, area);
        set.spawn_one(Vec2::new(130.0, 110.0));
        let far = Rect::new(300.0, 300.0, 24.0, 24.0);
        assert_eq!(set.try_consume_rect(&far, &mut rng), 0);
        let head = Rect::new(100.0, 100.0, 24.0, 24.0);
        assert_eq!(set.try_consume_rect(&head, &mut rng), 1);
        assert_eq!(set.active_count(), 0);
    }

    #[test]
    fn test_replenishing_respawns() {
        let mut rng = create_test_rng();
        let mut set = CollectibleSet::new(3, 13.0, RespawnPolicy::Replenishing, AREA);
        set.spawn_one(Vec2::new(3.0, 4.0));
        set.spawn_one(Vec2::new(8.0, 2.0));

        assert_eq!(set.try_consume_cell(Vec2::new(3.0, 4.0), &mut rng), 1);
        assert_eq!(set.items().len(), 2);
        assert_eq!(set.active_count(), 2);
        assert!(set.items().iter().all(|c| c.active));
        assert!(in_area(set.items()[1].pos));
    }

    #[test]
    fn test_fixed_set_stays_exhausted() {
        let mut rng = create_test_rng();
        let mut set = CollectibleSet::new(3, 13.0, RespawnPolicy::FixedSet, AREA);
        set.spawn_one(Vec2::new(3.0, 4.0));
        set.try_consume_cell(Vec2::new(3.0, 4.0), &mut rng);
        assert_eq!(set.items().len(), 1);
        assert_eq!(set.active_count(), 0);
    }

    #[test]
    fn test_spawn_area_empty_ranges() {
        assert!(!AREA.is_empty());
        assert!(!SpawnArea { x: [4, 4], y: [0, 0] }.is_empty());
        assert!(SpawnArea { x: [18, 1], y: [1, 10] }.is_empty());
        assert!(SpawnArea { x: [1, 18], y: [10, 1] }.is_empty());
    }

    #[test]
    fn test_policy_is_reported() {
        let set = CollectibleSet::new(3, 10.0, RespawnPolicy::Replenishing, AREA);
        assert_eq!(set.policy(), RespawnPolicy::Replenishing);
        assert_eq!(set.policy().name(), "Refill");
        assert_eq!(RespawnPolicy::FixedSet.name(), "Fixed");
    }
}
