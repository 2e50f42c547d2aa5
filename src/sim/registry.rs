//! Live bullets and enemies, and their spawn/despawn lifecycle
//!
//! The registry owns both live lists and both pools. Removal uses
//! `swap_remove`, which only disturbs the element at the end of the list, so
//! traversals that remove while iterating must walk indices in reverse.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pool::{EntityKind, Pool, PoolStats, Poolable};
use super::state::ArenaBounds;

/// A projectile travelling in a straight line
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub position: Vec3,
    /// Unit length, fixed at spawn
    pub direction: Vec3,
    pub alive: bool,
}

impl Poolable for Bullet {
    const KIND: EntityKind = EntityKind::Bullet;

    fn create() -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::X,
            alive: false,
        }
    }

    fn reset(&mut self) {}

    fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }
}

/// Health-based tint of an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorTier {
    /// Above 66% health
    #[default]
    Blue,
    /// Above 33% health
    Purple,
    /// 33% or less, including dead
    Red,
}

impl ColorTier {
    pub fn from_health(health: i32, max_health: i32) -> Self {
        if max_health <= 0 || health <= 0 {
            return ColorTier::Red;
        }
        let ratio = health as f32 / max_health as f32;
        if ratio > 0.66 {
            ColorTier::Blue
        } else if ratio > 0.33 {
            ColorTier::Purple
        } else {
            ColorTier::Red
        }
    }

    /// RGB hex used by the renderer
    pub fn rgb(&self) -> u32 {
        match self {
            ColorTier::Blue => 0x0000ff,
            ColorTier::Purple => 0x800080,
            ColorTier::Red => 0xff0000,
        }
    }
}

/// A pursuing enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub position: Vec3,
    pub health: i32,
    pub max_health: i32,
    pub tier: ColorTier,
    pub alive: bool,
}

impl Enemy {
    /// Apply damage and refresh the tint. Returns true once health is gone.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health -= amount;
        self.tier = ColorTier::from_health(self.health, self.max_health);
        self.is_dead()
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

impl Poolable for Enemy {
    const KIND: EntityKind = EntityKind::Enemy;

    fn create() -> Self {
        Self {
            position: Vec3::ZERO,
            health: 0,
            max_health: 0,
            tier: ColorTier::Blue,
            alive: false,
        }
    }

    fn reset(&mut self) {
        self.tier = ColorTier::Blue;
    }

    fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }
}

/// Arena edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSide {
    /// -Z edge
    North,
    /// +Z edge
    South,
    /// +X edge
    East,
    /// -X edge
    West,
}

impl SpawnSide {
    pub const ALL: [SpawnSide; 4] = [
        SpawnSide::North,
        SpawnSide::South,
        SpawnSide::East,
        SpawnSide::West,
    ];

    /// Pick an edge uniformly
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Point on this edge. `along` in [-1, 1] slides across the edge's length.
    pub fn point(&self, bounds: &ArenaBounds, along: f32, height: f32) -> Vec3 {
        let along = along.clamp(-1.0, 1.0);
        match self {
            SpawnSide::North => Vec3::new(along * bounds.half_x, height, -bounds.half_z),
            SpawnSide::South => Vec3::new(along * bounds.half_x, height, bounds.half_z),
            SpawnSide::East => Vec3::new(bounds.half_x, height, along * bounds.half_z),
            SpawnSide::West => Vec3::new(-bounds.half_x, height, along * bounds.half_z),
        }
    }
}

/// What a traversal wants done with the visited entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Keep,
    Remove,
}

#[derive(Debug)]
pub struct Registry {
    pub(crate) bullets: Vec<Bullet>,
    pub(crate) enemies: Vec<Enemy>,
    pub(crate) bullet_pool: Pool<Bullet>,
    pub(crate) enemy_pool: Pool<Enemy>,
}

impl Registry {
    /// Create an empty registry whose pools each retain up to `pool_capacity` instances
    pub fn new(pool_capacity: usize) -> Self {
        Self {
            bullets: Vec::with_capacity(pool_capacity),
            enemies: Vec::with_capacity(pool_capacity),
            bullet_pool: Pool::new(pool_capacity),
            enemy_pool: Pool::new(pool_capacity),
        }
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn bullet_pool(&self) -> &Pool<Bullet> {
        &self.bullet_pool
    }

    pub fn enemy_pool(&self) -> &Pool<Enemy> {
        &self.enemy_pool
    }

    pub fn pool_stats(&self) -> (PoolStats, PoolStats) {
        (self.bullet_pool.stats(), self.enemy_pool.stats())
    }

    /// Spawn a bullet at `origin` travelling along `direction` (expected unit length)
    pub fn spawn_bullet(&mut self, origin: Vec3, direction: Vec3) -> usize {
        let mut bullet = self.bullet_pool.acquire();
        bullet.position = origin;
        bullet.direction = direction;
        self.bullets.push(bullet);
        self.bullets.len() - 1
    }

    /// Spawn an enemy at a random point along `side`
    pub fn spawn_enemy<R: Rng + ?Sized>(
        &mut self,
        side: SpawnSide,
        rng: &mut R,
        bounds: &ArenaBounds,
        height: f32,
        max_health: i32,
    ) -> usize {
        let along = rng.random_range(-1.0..=1.0);
        self.spawn_enemy_at(side.point(bounds, along, height), max_health)
    }

    /// Spawn a full-health enemy at an exact position
    pub fn spawn_enemy_at(&mut self, position: Vec3, max_health: i32) -> usize {
        let mut enemy = self.enemy_pool.acquire();
        enemy.position = position;
        enemy.max_health = max_health;
        enemy.health = max_health;
        enemy.tier = ColorTier::from_health(max_health, max_health);
        log::debug!("Enemy spawned at ({:.2}, {:.2})", position.x, position.z);
        self.enemies.push(enemy);
        self.enemies.len() - 1
    }

    /// Despawn the bullet at `index` and hand it back to its pool
    pub fn remove_bullet(&mut self, index: usize) {
        let bullet = self.bullets.swap_remove(index);
        self.bullet_pool.release(bullet);
    }

    /// Despawn the enemy at `index` and hand it back to its pool
    pub fn remove_enemy(&mut self, index: usize) {
        let enemy = self.enemies.swap_remove(index);
        self.enemy_pool.release(enemy);
    }

    /// Visit bullets from last to first, removing those the callback rejects
    pub fn for_each_bullet_reverse<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Bullet) -> Visit,
    {
        for i in (0..self.bullets.len()).rev() {
            if f(&mut self.bullets[i]) == Visit::Remove {
                self.remove_bullet(i);
            }
        }
    }

    /// Visit enemies from last to first, removing those the callback rejects
    pub fn for_each_enemy_reverse<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Enemy) -> Visit,
    {
        for i in (0..self.enemies.len()).rev() {
            if f(&mut self.enemies[i]) == Visit::Remove {
                self.remove_enemy(i);
            }
        }
    }
}
