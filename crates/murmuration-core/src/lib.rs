//! Core flocking simulation shared across the Murmuration workspace.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, trace};

/// Plain 2D vector used for positions, velocities, and forces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Construct a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean length.
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z component of the 3D cross).
    #[must_use]
    pub fn cross(self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Unit vector in the same direction. A zero-length input yields the
    /// zero vector, so callers never observe NaN components.
    #[must_use]
    pub fn normalize(self) -> Self {
        let length = self.length();
        if length > 0.0 { self / length } else { Self::ZERO }
    }

    /// Rotate counter-clockwise by `angle` radians.
    #[must_use]
    pub fn rotate(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Signed angle from `self` to `other` in `(-PI, PI]`, computed as
    /// `atan2(cross, dot)`. Either operand being zero-length gives `0.0`.
    #[must_use]
    pub fn signed_angle_to(self, other: Self) -> f32 {
        self.cross(other).atan2(self.dot(other))
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl std::ops::Div<f32> for Vec2 {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self::new(self.x / scalar, self.y / scalar)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

/// High level simulation clock (steps processed since boot).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tick(pub u64);

impl Tick {
    /// Returns the next sequential tick.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Resets the tick counter back to zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }
}

/// One flock member occupying a slot in the arena.
///
/// Inactive records are skipped by every operation; their slot is eligible
/// for reuse by the next spawn. `mass` must stay positive and the radii are
/// never touched by the simulation after spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boid {
    pub active: bool,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Last observed steering target, refreshed on every step.
    pub target: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub separation_radius: f32,
    pub group_radius: f32,
    pub separation_score: f32,
    pub target_score: f32,
    pub cohesion_score: f32,
    pub alignment_score: f32,
    /// Cosmetic tint consumed by the render layer.
    pub color: [f32; 3],
}

impl Default for Boid {
    fn default() -> Self {
        Self::from_config(Vec2::ZERO, &FlockConfig::default())
    }
}

impl Boid {
    /// Build a dormant record at `position` carrying the config defaults.
    /// The arena flips `active` when the slot is claimed.
    #[must_use]
    pub fn from_config(position: Vec2, config: &FlockConfig) -> Self {
        let separation_radius = config.radius * config.separation_radius_factor;
        Self {
            active: false,
            position,
            velocity: Vec2::ZERO,
            target: Vec2::ZERO,
            radius: config.radius,
            mass: config.mass,
            min_speed: config.min_speed,
            max_speed: config.max_speed,
            separation_radius,
            group_radius: separation_radius * config.group_radius_factor,
            separation_score: config.separation_score,
            target_score: config.target_score,
            cohesion_score: config.cohesion_score,
            alignment_score: config.alignment_score,
            color: config.color,
        }
    }

    /// Current speed.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Read-only render row: everything the draw layer needs for one circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoidSprite {
    pub position: Vec2,
    pub radius: f32,
    pub color: [f32; 3],
}

/// Per-boid steering breakdown for one step.
///
/// The cohesion pull is tracked for observability but deliberately left out
/// of [`SteeringForces::net`]; grouping emerges through the rate-limited
/// alignment rotation instead of a direct center-of-mass force.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringForces {
    pub damping: Vec2,
    pub separation: Vec2,
    pub target: Vec2,
    pub cohesion: Vec2,
}

impl SteeringForces {
    /// Net force fed into the integrator.
    #[must_use]
    pub fn net(&self) -> Vec2 {
        self.damping + self.separation + self.target
    }
}

/// Errors surfaced by the flock core.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlockError {
    /// Spawn requested while every slot is active. Recoverable; the store
    /// is left untouched.
    #[error("flock is at capacity ({capacity} boids)")]
    NoCapacity { capacity: usize },
    /// Indicates an invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

/// Static configuration for a flock world.
///
/// The per-boid fields are spawn defaults; individual records stay tunable
/// after the fact through [`FlockWorld::boid_mut`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlockConfig {
    /// Maximum number of simultaneously active boids.
    pub capacity: usize,
    /// Render/collision extent assigned at spawn.
    pub radius: f32,
    /// Force-to-acceleration divisor and group-centroid weight (must be > 0).
    pub mass: f32,
    /// Lower speed clamp applied at the end of every step.
    pub min_speed: f32,
    /// Upper speed clamp applied at the end of every step.
    pub max_speed: f32,
    /// Separation radius as a multiple of the boid radius.
    pub separation_radius_factor: f32,
    /// Group radius as a multiple of the separation radius. The defaults
    /// make both radii coincide; the fields stay independently tunable.
    pub group_radius_factor: f32,
    /// Weight of the separation contribution.
    pub separation_score: f32,
    /// Weight of the target-seeking contribution.
    pub target_score: f32,
    /// Weight of the (diagnostic-only) cohesion contribution.
    pub cohesion_score: f32,
    /// Maximum alignment turn rate in radians per second.
    pub alignment_score: f32,
    /// Tint assigned at spawn.
    pub color: [f32; 3],
    /// Half-width of the square that `spawn_scattered` populates.
    pub spawn_extent: f32,
    /// Optional RNG seed for reproducible scattering.
    pub rng_seed: Option<u64>,
    /// Maximum number of recent step summaries retained in-memory.
    pub history_capacity: usize,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            capacity: 600,
            radius: 1.0,
            mass: 1.0,
            min_speed: 50.0,
            max_speed: 100.0,
            separation_radius_factor: 10.0,
            group_radius_factor: 1.0,
            separation_score: 15.0,
            target_score: 0.5,
            cohesion_score: 0.8,
            alignment_score: 0.2,
            color: [245.0 / 255.0; 3],
            spawn_extent: 1.0,
            rng_seed: None,
            history_capacity: 256,
        }
    }
}

impl FlockConfig {
    /// Validates every field a spawned boid or the step pipeline relies on.
    fn validate(&self) -> Result<(), FlockError> {
        if self.capacity == 0 {
            return Err(FlockError::InvalidConfig("capacity must be non-zero"));
        }
        if self.radius <= 0.0 {
            return Err(FlockError::InvalidConfig("radius must be positive"));
        }
        if self.mass <= 0.0 {
            return Err(FlockError::InvalidConfig("mass must be positive"));
        }
        if self.min_speed <= 0.0 || self.max_speed <= 0.0 || self.min_speed > self.max_speed {
            return Err(FlockError::InvalidConfig(
                "speeds must satisfy 0 < min_speed <= max_speed",
            ));
        }
        if self.separation_radius_factor <= 0.0 || self.group_radius_factor <= 0.0 {
            return Err(FlockError::InvalidConfig(
                "radius factors must be positive",
            ));
        }
        if self.separation_score < 0.0
            || self.target_score < 0.0
            || self.cohesion_score < 0.0
            || self.alignment_score < 0.0
        {
            return Err(FlockError::InvalidConfig(
                "steering scores must be non-negative",
            ));
        }
        if self.spawn_extent <= 0.0 {
            return Err(FlockError::InvalidConfig("spawn_extent must be positive"));
        }
        if self.history_capacity == 0 {
            return Err(FlockError::InvalidConfig(
                "history_capacity must be non-zero",
            ));
        }
        Ok(())
    }

    /// Returns the configured RNG, seeding from entropy if no seed is set.
    fn seeded_rng(&self) -> SmallRng {
        match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::seed_from_u64(rand::random()),
        }
    }
}

/// Fixed-capacity slot store for boid records.
///
/// Slot indices are stable for a boid's lifetime and carry no meaning
/// beyond identity. Spawning always claims the lowest-indexed free slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoidArena {
    slots: Vec<Boid>,
}

impl BoidArena {
    /// Create an arena of `capacity` dormant slots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Boid::from_config(Vec2::ZERO, &FlockConfig::default()); capacity],
        }
    }

    /// Total number of slots, active or not.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live boids.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.active).count()
    }

    /// Returns true when no slot is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| !slot.active)
    }

    /// Whether `index` refers to a live boid.
    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|slot| slot.active)
    }

    /// Borrow a live boid.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Boid> {
        self.slots.get(index).filter(|slot| slot.active)
    }

    /// Mutably borrow a live boid.
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Boid> {
        self.slots.get_mut(index).filter(|slot| slot.active)
    }

    /// Claim the lowest-indexed free slot for `boid`, returning its index.
    /// `None` when every slot is active; the store is left untouched.
    pub fn claim(&mut self, boid: Boid) -> Option<usize> {
        let index = self.slots.iter().position(|slot| !slot.active)?;
        self.slots[index] = Boid {
            active: true,
            ..boid
        };
        Some(index)
    }

    /// Deactivate a slot, returning its final record. `None` when the slot
    /// is already free or out of range.
    pub fn release(&mut self, index: usize) -> Option<Boid> {
        let slot = self.slots.get_mut(index)?;
        if !slot.active {
            return None;
        }
        let released = *slot;
        slot.active = false;
        Some(released)
    }

    /// Iterate over live boids in slot-index order.
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Boid)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.active)
    }

    /// Iterate mutably over live boids in slot-index order.
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut Boid)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, slot)| slot.active)
    }

    /// Raw slot storage, dormant records included.
    #[must_use]
    pub fn slots(&self) -> &[Boid] {
        &self.slots
    }
}

/// Neighborhood totals for one boid, seeded with the boid itself so every
/// boid belongs to its own group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborAggregate {
    /// Summed separation push, `1/(1 + d^2)`-weighted away from neighbors.
    pub separation: Vec2,
    /// Mass-weighted centroid of self plus neighbors within `group_radius`.
    pub group_center: Vec2,
    /// Summed velocity of self plus neighbors within `group_radius`.
    pub group_velocity: Vec2,
    /// Total mass behind `group_center`.
    pub group_mass: f32,
}

/// Single O(n) pass over all other live slots, accumulating the separation
/// push and the mass-weighted group aggregates.
fn aggregate_neighbors(view: &[Boid], index: usize) -> NeighborAggregate {
    let boid = &view[index];
    let mut separation = Vec2::ZERO;
    let mut group_mass = boid.mass;
    let mut center_sum = boid.position * boid.mass;
    let mut group_velocity = boid.velocity;

    for (other_index, other) in view.iter().enumerate() {
        if !other.active || other_index == index {
            continue;
        }

        let distance = boid.position.distance(other.position);
        let direction = (boid.position - other.position).normalize();
        let influence = 1.0 / (1.0 + distance * distance);

        if distance <= boid.separation_radius {
            separation += direction * influence;
        }

        if distance <= boid.group_radius {
            group_mass += other.mass;
            center_sum += other.position * other.mass;
            group_velocity += other.velocity;
        }
    }

    NeighborAggregate {
        separation,
        group_center: center_sum / group_mass,
        group_velocity,
        group_mass,
    }
}

/// Rotation applied to the velocity this step: at most `rate_step` radians
/// toward the group heading, snapping when the remaining angle is smaller.
fn alignment_rotation(velocity: Vec2, group_velocity: Vec2, rate_step: f32) -> f32 {
    let group_direction = group_velocity.normalize();
    let angle = velocity.signed_angle_to(group_direction);
    if rate_step < angle.abs() {
        rate_step.copysign(angle)
    } else {
        angle
    }
}

/// Refresh the cached target, rotate toward the group heading, and produce
/// the steering breakdown for `view[index]`. Pure with respect to `view`.
fn steer_boid(view: &[Boid], index: usize, dt: f32, target: Vec2) -> (Boid, SteeringForces) {
    let mut boid = view[index];
    boid.target = target;

    let aggregate = aggregate_neighbors(view, index);
    let rotation = alignment_rotation(
        boid.velocity,
        aggregate.group_velocity,
        boid.alignment_score * dt,
    );
    boid.velocity = boid.velocity.rotate(rotation);

    let forces = SteeringForces {
        damping: -boid.velocity,
        separation: aggregate.separation * boid.separation_score,
        target: (target - boid.position) * boid.target_score,
        cohesion: (aggregate.group_center - boid.position) * boid.cohesion_score,
    };
    (boid, forces)
}

/// Full per-boid update: steering, integration, speed clamp, translation.
/// Reads neighbors from `view` and returns the advanced record.
fn advance_boid(view: &[Boid], index: usize, dt: f32, target: Vec2) -> Boid {
    let (mut boid, forces) = steer_boid(view, index, dt, target);

    let acceleration = forces.net() / boid.mass;
    boid.velocity += acceleration * dt;

    let speed = boid.speed().clamp(boid.min_speed, boid.max_speed);
    boid.velocity = boid.velocity.normalize() * speed;
    boid.position += boid.velocity * dt;
    boid
}

/// Summary emitted after every step and retained in the history ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepSummary {
    pub tick: Tick,
    pub dt: f32,
    pub target: Vec2,
    pub agent_count: usize,
    pub average_speed: f32,
    pub peak_speed: f32,
}

/// Aggregate simulation state: configuration, clock, RNG, and the arena.
///
/// The surrounding shell owns the window, input polling, and frame pacing;
/// it feeds `(dt, target)` into [`FlockWorld::step`] once per frame and
/// reads [`FlockWorld::sprites`] back for drawing.
pub struct FlockWorld {
    config: FlockConfig,
    tick: Tick,
    rng: SmallRng,
    boids: BoidArena,
    scratch: Vec<Boid>,
    history: VecDeque<StepSummary>,
}

impl fmt::Debug for FlockWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlockWorld")
            .field("config", &self.config)
            .field("tick", &self.tick)
            .field("active_count", &self.boids.active_count())
            .finish()
    }
}

impl FlockWorld {
    /// Instantiate a new world using the supplied configuration.
    pub fn new(config: FlockConfig) -> Result<Self, FlockError> {
        config.validate()?;
        let rng = config.seeded_rng();
        let capacity = config.capacity;
        let history_capacity = config.history_capacity;
        Ok(Self {
            boids: BoidArena::new(capacity),
            scratch: Vec::with_capacity(capacity),
            history: VecDeque::with_capacity(history_capacity),
            tick: Tick::zero(),
            rng,
            config,
        })
    }

    /// Spawn a boid at `position` with config defaults, zero velocity, and
    /// a zeroed target cache. Claims the lowest-indexed free slot.
    pub fn spawn(&mut self, position: Vec2) -> Result<usize, FlockError> {
        let record = Boid::from_config(position, &self.config);
        match self.boids.claim(record) {
            Some(index) => {
                trace!(index, "spawned boid");
                Ok(index)
            }
            None => {
                debug!(capacity = self.config.capacity, "spawn rejected, flock full");
                Err(FlockError::NoCapacity {
                    capacity: self.config.capacity,
                })
            }
        }
    }

    /// Spawn up to `count` boids at seeded-random positions inside the
    /// `[-spawn_extent, spawn_extent]` square, returning how many fit.
    pub fn spawn_scattered(&mut self, count: usize) -> usize {
        let extent = self.config.spawn_extent;
        let mut spawned = 0;
        for _ in 0..count {
            let position = Vec2::new(
                self.rng.random_range(-extent..=extent),
                self.rng.random_range(-extent..=extent),
            );
            if self.spawn(position).is_err() {
                break;
            }
            spawned += 1;
        }
        info!(spawned, "scattered boids");
        spawned
    }

    /// Release a slot back to the free pool, returning its final record.
    pub fn despawn(&mut self, index: usize) -> Option<Boid> {
        self.boids.release(index)
    }

    /// Advance every live boid by `dt` seconds toward `target`.
    ///
    /// Boids are updated in place in slot-index order: a boid's neighbor
    /// scan reads the current array, so earlier-indexed boids have already
    /// moved this frame. [`FlockWorld::step_parallel`] is the
    /// order-independent alternative.
    pub fn step(&mut self, dt: f32, target: Vec2) -> StepSummary {
        for index in 0..self.boids.slots.len() {
            if !self.boids.slots[index].active {
                continue;
            }
            let advanced = advance_boid(&self.boids.slots, index, dt, target);
            self.boids.slots[index] = advanced;
        }
        self.finish_step(dt, target)
    }

    /// Advance every live boid from a pre-step snapshot, fanning the work
    /// out across threads.
    ///
    /// Every neighbor read sees the state the frame started with, so the
    /// result is independent of slot order (and therefore not bit-equal to
    /// [`FlockWorld::step`] once boids interact). Deterministic run-to-run.
    pub fn step_parallel(&mut self, dt: f32, target: Vec2) -> StepSummary {
        self.scratch.clear();
        self.scratch.extend_from_slice(&self.boids.slots);

        let snapshot = &self.scratch;
        self.boids
            .slots
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, slot)| {
                if slot.active {
                    *slot = advance_boid(snapshot, index, dt, target);
                }
            });
        self.finish_step(dt, target)
    }

    fn finish_step(&mut self, dt: f32, target: Vec2) -> StepSummary {
        self.tick = self.tick.next();

        let mut agent_count = 0usize;
        let mut speed_sum = 0.0f32;
        let mut peak_speed = 0.0f32;
        for (_, boid) in self.boids.iter_active() {
            let speed = boid.speed();
            agent_count += 1;
            speed_sum += speed;
            peak_speed = peak_speed.max(speed);
        }

        let summary = StepSummary {
            tick: self.tick,
            dt,
            target,
            agent_count,
            average_speed: if agent_count > 0 {
                speed_sum / agent_count as f32
            } else {
                0.0
            },
            peak_speed,
        };

        if self.history.len() >= self.config.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(summary);
        trace!(
            tick = self.tick.0,
            agents = agent_count,
            average_speed = f64::from(summary.average_speed),
            "step complete"
        );
        summary
    }

    /// Steering breakdown the next step would apply to the boid in `index`,
    /// without mutating anything. `None` for free slots.
    #[must_use]
    pub fn steering(&self, index: usize, dt: f32, target: Vec2) -> Option<SteeringForces> {
        self.boids.get(index)?;
        let (_, forces) = steer_boid(&self.boids.slots, index, dt, target);
        Some(forces)
    }

    /// Neighborhood aggregates the next step would read for the boid in
    /// `index`. `None` for free slots.
    #[must_use]
    pub fn group(&self, index: usize) -> Option<NeighborAggregate> {
        self.boids.get(index)?;
        Some(aggregate_neighbors(&self.boids.slots, index))
    }

    /// Draw list for the render layer, one row per live boid.
    pub fn sprites(&self) -> impl Iterator<Item = BoidSprite> + '_ {
        self.boids.iter_active().map(|(_, boid)| BoidSprite {
            position: boid.position,
            radius: boid.radius,
            color: boid.color,
        })
    }

    /// Returns an immutable reference to configuration.
    #[must_use]
    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    /// Mutable access to the configuration (affects future spawns only).
    #[must_use]
    pub fn config_mut(&mut self) -> &mut FlockConfig {
        &mut self.config
    }

    /// Current simulation tick.
    #[must_use]
    pub const fn tick(&self) -> Tick {
        self.tick
    }

    /// Resets the tick counter (useful for restarts).
    pub fn reset_time(&mut self) {
        self.tick = Tick::zero();
    }

    /// Read-only access to the boid arena.
    #[must_use]
    pub fn boids(&self) -> &BoidArena {
        &self.boids
    }

    /// Mutable access to the boid arena.
    #[must_use]
    pub fn boids_mut(&mut self) -> &mut BoidArena {
        &mut self.boids
    }

    /// Borrow a live boid.
    #[must_use]
    pub fn boid(&self, index: usize) -> Option<&Boid> {
        self.boids.get(index)
    }

    /// Mutably borrow a live boid (for per-boid tuning).
    #[must_use]
    pub fn boid_mut(&mut self, index: usize) -> Option<&mut Boid> {
        self.boids.get_mut(index)
    }

    /// Number of live boids.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.boids.active_count()
    }

    /// Total slot capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.boids.capacity()
    }

    /// Iterate over retained step summaries, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &StepSummary> {
        self.history.iter()
    }

    /// Borrow the world RNG mutably for deterministic sampling.
    #[must_use]
    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}
