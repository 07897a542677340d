//! Self-managing comet pool: spawn, ballistic travel, collision against the
//! hazard sphere, explosion playback, removal, and replacement.
//!
//! The pool converges on an externally set target count. A requested comet
//! exists first as a pending slot (its visual loading asynchronously); it
//! joins the member set only when the load completes, and stays there until
//! it either exceeds the travel bound (recycled in place to its spawn
//! position) or reaches its precomputed ray/sphere intersection (explodes,
//! is removed, and a fresh replacement is requested).
//!
//! All structural changes during traversal use collect-then-apply: the
//! member list is never spliced while it is being iterated.

mod intersect;

use std::path::PathBuf;

use glam::Vec3;
use orrery_assets::{Completion, LoadTicket, ModelLoader};
use orrery_scene::{Entity, MixerEvent, NodeId, Scene, Transform};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, info, warn};

pub use intersect::ray_sphere_intersection;

/// Pool tuning. Defaults reproduce the original scene: spawn cube of
/// half-width 250, recycle bound 300, collision radius 5, travel factor 20.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Half-width of the spawn cube centered on the origin.
    pub spawn_half_width: f32,
    /// Recycle bound: exceeding this on any axis resets to spawn position.
    pub travel_bound: f32,
    /// Distance to the intersection point that triggers the explosion.
    pub collision_radius: f32,
    /// World units traveled per driver unit (applied to x and y).
    pub travel_speed: f32,
    /// Explosion playback speed per driver-step unit.
    pub explosion_speed_factor: f32,
    /// Center of the hazard sphere comets are aimed toward.
    pub hazard_center: Vec3,
    /// Radius of the hazard sphere.
    pub hazard_radius: f32,
    /// Model descriptor for the comet visual.
    pub model_path: PathBuf,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            spawn_half_width: 250.0,
            travel_bound: 300.0,
            collision_radius: 5.0,
            travel_speed: 20.0,
            explosion_speed_factor: 100.0,
            hazard_center: Vec3::new(55.0, 0.0, -100.0),
            hazard_radius: 50.0,
            model_path: PathBuf::from("assets/comet.ron"),
        }
    }
}

/// Fixed travel direction for every comet.
fn travel_direction() -> Vec3 {
    Vec3::new(1.0, 1.0, 0.0).normalize()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Traveling,
    Exploding,
}

#[derive(Debug)]
struct CometRecord {
    node: NodeId,
    spawn_position: Vec3,
    /// Where the travel ray meets the hazard sphere. `None` means the ray
    /// misses and this comet only ever recycles on the travel bound.
    intersection: Option<Vec3>,
    phase: Phase,
}

#[derive(Debug)]
struct PendingSpawn {
    ticket: LoadTicket,
    spawn_position: Vec3,
    intersection: Option<Vec3>,
}

/// Read-only view of one live member, for tests and overlays.
#[derive(Debug, Clone, Copy)]
pub struct MemberView {
    pub node: NodeId,
    pub spawn_position: Vec3,
    pub exploding: bool,
}

/// The comet pool.
pub struct CometPool {
    config: PoolConfig,
    members: Vec<CometRecord>,
    pending: Vec<PendingSpawn>,
    /// Slots whose load failed. Permanently stalled, never retried.
    stalled: usize,
    target_count: usize,
    rng: ChaCha8Rng,
}

impl CometPool {
    pub fn new(config: PoolConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::from_os_rng())
    }

    /// Deterministic pool for tests and replays.
    pub fn with_seed(config: PoolConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(config: PoolConfig, rng: ChaCha8Rng) -> Self {
        Self {
            config,
            members: Vec::new(),
            pending: Vec::new(),
            stalled: 0,
            target_count: 0,
            rng,
        }
    }

    /// Live members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Spawn requests still waiting on their visual load.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Slots lost to load failures.
    pub fn stalled(&self) -> usize {
        self.stalled
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn members(&self) -> impl Iterator<Item = MemberView> + '_ {
        self.members.iter().map(|rec| MemberView {
            node: rec.node,
            spawn_position: rec.spawn_position,
            exploding: rec.phase == Phase::Exploding,
        })
    }

    /// `true` if the ticket belongs to one of this pool's pending slots.
    pub fn owns_ticket(&self, ticket: LoadTicket) -> bool {
        self.pending.iter().any(|p| p.ticket == ticket)
    }

    /// Sets the target count and converges toward it in one batch: either
    /// requests the missing spawns or removes the most-recently-added
    /// surplus immediately (no animation), detaching their visuals.
    ///
    /// Removal clamps at zero members; a target below the current pending
    /// count simply forgets the newest requests (their completions are
    /// dropped on arrival).
    pub fn set_target(&mut self, target: usize, scene: &mut Scene, loader: &mut ModelLoader) {
        self.target_count = target;
        let live = self.members.len() + self.pending.len();
        if live < target {
            let missing = target - live;
            info!(target, missing, "pool convergence: requesting spawns");
            for _ in 0..missing {
                self.request_spawn(loader);
            }
        } else if live > target {
            let mut surplus = live - target;
            info!(target, surplus, "pool convergence: removing surplus");
            while surplus > 0 && !self.pending.is_empty() {
                // Newest requests go first; the load completion arrives to
                // find no slot and is discarded.
                self.pending.pop();
                surplus -= 1;
            }
            let remove = surplus.min(self.members.len());
            let keep = self.members.len() - remove;
            for record in self.members.drain(keep..) {
                scene.remove(record.node);
            }
        }
    }

    fn request_spawn(&mut self, loader: &mut ModelLoader) {
        let hw = self.config.spawn_half_width;
        let spawn_position = Vec3::new(
            self.rng.random_range(-hw..=hw),
            self.rng.random_range(-hw..=hw),
            self.rng.random_range(-hw..=hw),
        );
        let intersection = ray_sphere_intersection(
            spawn_position,
            travel_direction(),
            self.config.hazard_center,
            self.config.hazard_radius,
        );
        let ticket = loader.load(&self.config.model_path);
        debug!(?ticket, ?spawn_position, hit = intersection.is_some(), "comet spawn requested");
        self.pending.push(PendingSpawn {
            ticket,
            spawn_position,
            intersection,
        });
    }

    /// Feeds loader completions to their pending slots. Completions that
    /// belong to no slot (forgotten by a convergence shrink, or owned by
    /// another subsystem) are returned unconsumed.
    pub fn drain_loads(
        &mut self,
        scene: &mut Scene,
        completions: Vec<Completion>,
    ) -> Vec<Completion> {
        let mut unclaimed = Vec::new();
        for completion in completions {
            let Some(slot_index) = self
                .pending
                .iter()
                .position(|p| p.ticket == completion.ticket)
            else {
                unclaimed.push(completion);
                continue;
            };
            let slot = self.pending.remove(slot_index);
            match completion.result {
                Ok(model) => {
                    let entity = Entity::model("comet", model.name, model.clips).with_transform(
                        Transform::at(slot.spawn_position).with_uniform_scale(model.scale),
                    );
                    let node = scene.add(entity);
                    self.members.push(CometRecord {
                        node,
                        spawn_position: slot.spawn_position,
                        intersection: slot.intersection,
                        phase: Phase::Traveling,
                    });
                }
                Err(err) => {
                    // No retry: the slot never completes.
                    error!(error = %err, "comet visual failed to load; slot stalled");
                    self.stalled += 1;
                }
            }
        }
        unclaimed
    }

    /// One travel tick for every traveling member.
    ///
    /// Order per member: recycle check (bound exceeded resets exactly to the
    /// spawn position, no overshoot persists), then collision check (within
    /// `collision_radius` of the intersection transitions to exploding and
    /// starts one-shot playback at `step × explosion_speed_factor`), then
    /// the two-axis advance (`x` and `y` by `step × travel_speed`; `z` is
    /// deliberately left alone, preserving the original drift).
    ///
    /// A zero step freezes the travel state machine entirely: nothing moves,
    /// so nothing recycles and nothing collides. In particular a collision
    /// must never fire at step zero, since the resulting zero-speed playback
    /// could never complete and the member would be stuck exploding.
    pub fn update(&mut self, scene: &mut Scene, step: f64) {
        let bound = self.config.travel_bound;
        let advance = (step * f64::from(self.config.travel_speed)) as f32;
        let mut severed: Vec<usize> = Vec::new();

        for (index, record) in self.members.iter_mut().enumerate() {
            if record.phase != Phase::Traveling {
                continue;
            }
            let Some(entity) = scene.get_mut(record.node) else {
                severed.push(index);
                continue;
            };
            if step == 0.0 {
                continue;
            }
            let position = &mut entity.transform.position;
            if position.x.abs() > bound || position.y.abs() > bound || position.z.abs() > bound {
                *position = record.spawn_position;
                continue;
            }
            if let Some(hit) = record.intersection
                && position.distance(hit) <= self.config.collision_radius
            {
                record.phase = Phase::Exploding;
                let speed = (step * f64::from(self.config.explosion_speed_factor)) as f32;
                entity.start_one_shot(speed);
                debug!(node = ?record.node, "comet collided; explosion started");
                continue;
            }
            position.x += advance;
            position.y += advance;
        }

        // Members whose visual was severed from under us are forgotten
        // after the pass, never mid-iteration.
        for index in severed.into_iter().rev() {
            let record = self.members.remove(index);
            warn!(node = ?record.node, "comet visual left the scene; member dropped");
        }
    }

    /// Advances explosion playback. Called only while the clock is unpaused.
    ///
    /// A member whose last clip finished is removed from the scene and a
    /// brand-new replacement is requested, keeping the total stable without
    /// the member ever being double-counted across the async gap.
    pub fn update_mixers(&mut self, scene: &mut Scene, loader: &mut ModelLoader) {
        let mut finished: Vec<usize> = Vec::new();
        for (index, record) in self.members.iter().enumerate() {
            if record.phase != Phase::Exploding {
                continue;
            }
            match scene.get_mut(record.node) {
                Some(entity) => {
                    if entity.update_mixer() == MixerEvent::Completed {
                        finished.push(index);
                    }
                }
                None => finished.push(index),
            }
        }
        for index in finished.into_iter().rev() {
            let record = self.members.remove(index);
            scene.remove(record.node);
            debug!(node = ?record.node, "explosion finished; respawning");
            self.request_spawn(loader);
        }
    }
}
