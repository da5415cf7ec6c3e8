use crate::domain::state::{Body, EntityId, Facing, ProjectileSnapshot};
use crate::domain::tuning::projectile::ProjectileTuning;
use crate::domain::tuning::session::WorldBounds;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Shot requested by a player controller. The pool's gate decides whether it fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireRequest {
    pub owner_id: EntityId,
    /// Shooter's anchor (feet) position.
    pub x: f32,
    pub y: f32,
    pub facing: Facing,
    pub muzzle_offset_x: f32,
    pub muzzle_offset_y: f32,
    pub cooldown: Duration,
}

pub struct Projectile {
    pub id: EntityId,
    pub owner_id: EntityId,
    pub facing: Facing,
    pub body: Body,
    active: bool,
}

impl Projectile {
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl From<&Projectile> for ProjectileSnapshot {
    fn from(p: &Projectile) -> Self {
        Self {
            id: p.id,
            owner_id: p.owner_id,
            x: p.body.x,
            y: p.body.y,
            vx: p.body.vx,
        }
    }
}

/// Fixed set of reusable projectiles plus a per-owner fire-rate gate.
///
/// The pool is the only writer of the active flag; physics may move bodies but
/// never activates or retires a projectile.
pub struct ProjectilePool {
    tuning: ProjectileTuning,
    slots: Vec<Projectile>,
    next_fire_allowed_at: HashMap<EntityId, Duration>,
}

impl ProjectilePool {
    /// Creates `tuning.pool_capacity` inactive projectiles with ids from `first_id`.
    pub fn new(tuning: ProjectileTuning, first_id: EntityId) -> Self {
        let slots = (0..tuning.pool_capacity as u64)
            .map(|i| Projectile {
                id: first_id + i,
                owner_id: 0,
                facing: Facing::Right,
                body: parked_body(&tuning),
                active: false,
            })
            .collect();

        Self {
            tuning,
            slots,
            next_fire_allowed_at: HashMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn tuning(&self) -> &ProjectileTuning {
        &self.tuning
    }

    /// Fires one projectile if the owner's gate is open and a slot is free.
    ///
    /// Returns false without touching any state otherwise.
    pub fn try_fire(&mut self, request: &FireRequest, now: Duration) -> bool {
        if let Some(ready_at) = self.next_fire_allowed_at.get(&request.owner_id) {
            if now < *ready_at {
                return false;
            }
        }

        let Some(slot) = self.slots.iter_mut().find(|p| !p.active) else {
            debug!(owner_id = request.owner_id, "projectile pool exhausted");
            return false;
        };

        let sign = request.facing.sign();
        let mut body = parked_body(&self.tuning);
        body.x = request.x + sign * request.muzzle_offset_x;
        body.y = request.y - request.muzzle_offset_y;
        body.vx = sign * self.tuning.muzzle_speed;
        body.enabled = true;

        slot.owner_id = request.owner_id;
        slot.facing = request.facing;
        slot.body = body;
        slot.active = true;

        self.next_fire_allowed_at
            .insert(request.owner_id, now + request.cooldown);
        true
    }

    /// Returns the projectile to the pool. False if it was not in flight.
    pub fn deactivate(&mut self, id: EntityId) -> bool {
        match self.slots.iter_mut().find(|p| p.id == id) {
            Some(p) if p.active => {
                p.active = false;
                p.body = parked_body(&self.tuning);
                true
            }
            _ => false,
        }
    }

    /// Sets the earliest time `owner_id` may fire again.
    pub fn arm_gate(&mut self, owner_id: EntityId, ready_at: Duration) {
        self.next_fire_allowed_at.insert(owner_id, ready_at);
    }

    pub fn next_fire_allowed_at(&self, owner_id: EntityId) -> Option<Duration> {
        self.next_fire_allowed_at.get(&owner_id).copied()
    }

    /// Retires every active projectile whose box no longer touches the world.
    pub fn cull_out_of_bounds(&mut self, bounds: &WorldBounds) -> Vec<EntityId> {
        let outside: Vec<EntityId> = self
            .slots
            .iter()
            .filter(|p| p.active && !within(&p.body, bounds))
            .map(|p| p.id)
            .collect();
        for id in &outside {
            self.deactivate(*id);
        }
        outside
    }

    pub fn get(&self, id: EntityId) -> Option<&Projectile> {
        self.slots.iter().find(|p| p.id == id)
    }

    pub fn is_active(&self, id: EntityId) -> bool {
        self.get(id).is_some_and(Projectile::is_active)
    }

    pub fn active(&self) -> impl Iterator<Item = &Projectile> {
        self.slots.iter().filter(|p| p.active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Bodies of in-flight projectiles, for the physics collaborator.
    pub fn active_bodies_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut Body)> {
        self.slots
            .iter_mut()
            .filter(|p| p.active)
            .map(|p| (p.id, &mut p.body))
    }
}

fn parked_body(tuning: &ProjectileTuning) -> Body {
    let mut body = Body::new(0.0, 0.0, tuning.width, tuning.height);
    body.enabled = false;
    body
}

fn within(body: &Body, bounds: &WorldBounds) -> bool {
    body.right() > bounds.min_x
        && body.left() < bounds.max_x
        && body.bottom() > bounds.min_y
        && body.top() < bounds.max_y
}
