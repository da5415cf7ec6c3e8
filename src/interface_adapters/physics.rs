// Arcade-style physics collaborator: gravity, axis-separated AABB motion
// against obstacles, world clamping for players, overlap reports.

use crate::domain::Arena;
use crate::domain::arena::Collider;
use crate::domain::ports::PhysicsWorld;
use crate::domain::state::{Body, Group, Overlap};
use crate::domain::tuning::session::WorldBounds;

#[derive(Debug, Default)]
pub struct ArcadePhysics;

impl ArcadePhysics {
    pub fn new() -> Self {
        Self
    }
}

impl PhysicsWorld for ArcadePhysics {
    fn step(&mut self, arena: &mut Arena, dt: f32) -> Vec<Overlap> {
        let solids: Vec<Body> = arena
            .obstacles
            .iter()
            .filter(|o| o.body.enabled)
            .map(|o| o.body)
            .collect();
        let bounds = arena.bounds;

        for player in arena.players.iter_mut().filter(|p| p.body.enabled) {
            move_and_collide(&mut player.body, &solids, &bounds, dt);
        }

        // Projectiles fly freely; leaving the world is handled by the pool.
        for (_, body) in arena.projectiles.active_bodies_mut() {
            body.vy += body.gravity * dt;
            body.x += body.vx * dt;
            body.y += body.vy * dt;
        }

        overlaps(&arena.colliders())
    }
}

fn move_and_collide(body: &mut Body, solids: &[Body], bounds: &WorldBounds, dt: f32) {
    body.vy += body.gravity * dt;
    body.touching_ground = false;

    body.x += body.vx * dt;
    for solid in solids {
        if !body.intersects(solid) {
            continue;
        }
        if body.vx > 0.0 {
            body.x = solid.left() - body.width / 2.0;
        } else if body.vx < 0.0 {
            body.x = solid.right() + body.width / 2.0;
        }
    }

    body.y += body.vy * dt;
    for solid in solids {
        if !body.intersects(solid) {
            continue;
        }
        if body.vy > 0.0 {
            body.y = solid.top();
            body.vy = 0.0;
            body.touching_ground = true;
        } else if body.vy < 0.0 {
            body.y = solid.bottom() + body.height;
            body.vy = 0.0;
        }
    }

    if body.left() < bounds.min_x {
        body.x = bounds.min_x + body.width / 2.0;
    } else if body.right() > bounds.max_x {
        body.x = bounds.max_x - body.width / 2.0;
    }
    if body.bottom() >= bounds.max_y {
        body.y = bounds.max_y;
        body.vy = body.vy.min(0.0);
        body.touching_ground = true;
    } else if body.top() < bounds.min_y {
        body.y = bounds.min_y + body.height;
        body.vy = body.vy.max(0.0);
    }
}

// Only pairings with a combat rule are reported; player/obstacle contact is
// resolved above as blocking motion instead.
fn reported(a: Group, b: Group) -> bool {
    let pairing = |x: Group, y: Group| {
        matches!(
            (x, y),
            (Group::Player, Group::Hazard)
                | (Group::Player, Group::Monster)
                | (Group::Player, Group::Projectile)
                | (Group::Player, Group::Collectible)
                | (Group::Projectile, Group::Obstacle)
                | (Group::Monster, Group::Projectile)
        )
    };
    pairing(a, b) || pairing(b, a)
}

fn overlaps(colliders: &[Collider]) -> Vec<Overlap> {
    let mut found = Vec::new();
    for (i, a) in colliders.iter().enumerate() {
        for b in &colliders[i + 1..] {
            if reported(a.entity.group, b.entity.group) && a.body.intersects(&b.body) {
                found.push(Overlap {
                    a: a.entity,
                    b: b.entity,
                });
            }
        }
    }
    found
}
