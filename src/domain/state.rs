// Domain-level simulation entities and input/snapshot types.

use crate::domain::tuning::monster::MonsterTuning;
use crate::domain::tuning::player::PlayerTuning;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub type EntityId = u64;

/// Collision group an entity belongs to. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Player,
    Hazard,
    Monster,
    Projectile,
    Obstacle,
    Collectible,
}

/// Id plus group, as reported by the physics collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub id: EntityId,
    pub group: Group,
}

impl EntityRef {
    pub fn new(id: EntityId, group: Group) -> Self {
        Self { id, group }
    }
}

/// A pair of entities whose boxes intersected during the last physics step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub a: EntityRef,
    pub b: EntityRef,
}

/// Resolved per-player key state, sampled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct InputSignals {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub up: bool,
    #[serde(default)]
    pub down: bool,
    #[serde(default)]
    pub fire: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Axis-aligned body shared with the physics collaborator.
///
/// `x`/`y` is the bottom-centre anchor; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
    pub touching_ground: bool,
    // Disabled bodies are neither integrated nor reported in overlaps.
    pub enabled: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            width,
            height,
            gravity: 0.0,
            touching_ground: false,
            enabled: true,
        }
    }

    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y - self.height
    }

    pub fn bottom(&self) -> f32 {
        self.y
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x, self.y - self.height / 2.0)
    }

    pub fn intersects(&self, other: &Body) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnimState {
    Stand,
    Squat,
    Walk,
    Jump,
    Shoot,
    JumpShoot,
    Death,
}

impl AnimState {
    pub fn name(self) -> &'static str {
        match self {
            AnimState::Stand => "stand",
            AnimState::Squat => "squat",
            AnimState::Walk => "walk",
            AnimState::Jump => "jump",
            AnimState::Shoot => "shoot",
            AnimState::JumpShoot => "jump-shoot",
            AnimState::Death => "death",
        }
    }
}

/// Player life cycle: `Dying` plays the death animation with the body still in
/// play, `Down` waits for a respawn with the body removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Life {
    Alive,
    Dying,
    Down,
}

pub struct PlayerEntity {
    pub id: EntityId,
    pub tuning: PlayerTuning,
    pub body: Body,

    // Animation state and when the current animation started.
    pub anim: AnimState,
    pub anim_started_at: Duration,

    pub life: Life,
    pub is_squatting: bool,
    pub facing: Facing,
    pub last_input: InputSignals,
}

impl PlayerEntity {
    pub fn new(id: EntityId, tuning: PlayerTuning) -> Self {
        let mut body = Body::new(
            tuning.respawn_x,
            tuning.respawn_y,
            tuning.body_width,
            tuning.body_height,
        );
        body.gravity = tuning.gravity;
        Self {
            id,
            tuning,
            body,
            anim: AnimState::Stand,
            anim_started_at: Duration::ZERO,
            life: Life::Alive,
            is_squatting: false,
            facing: Facing::Right,
            last_input: InputSignals::default(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.life != Life::Alive
    }

    /// Whether the body is still part of the world (alive or playing its death).
    pub fn in_play(&self) -> bool {
        self.life != Life::Down
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonsterLife {
    Active,
    Dying { since: Duration },
    Spent,
}

/// Result of a projectile landing on a monster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonsterHit {
    Ignored,
    Damaged { remaining: u32 },
    Killed,
}

pub struct MonsterEntity {
    pub id: EntityId,
    pub tuning: MonsterTuning,
    pub body: Body,
    pub health: u32,
    pub life: MonsterLife,
}

impl MonsterEntity {
    pub fn new(id: EntityId, body: Body, tuning: MonsterTuning) -> Self {
        Self {
            id,
            health: tuning.health,
            tuning,
            body,
            life: MonsterLife::Active,
        }
    }

    /// Health 0 means the monster is out of play, even while its death plays.
    pub fn is_targetable(&self) -> bool {
        self.health > 0 && self.life == MonsterLife::Active
    }

    pub fn apply_hit(&mut self, now: Duration) -> MonsterHit {
        if !self.is_targetable() {
            return MonsterHit::Ignored;
        }
        self.health -= 1;
        if self.health == 0 {
            self.life = MonsterLife::Dying { since: now };
            MonsterHit::Killed
        } else {
            MonsterHit::Damaged {
                remaining: self.health,
            }
        }
    }

    pub fn animation(&self) -> Option<&str> {
        match self.life {
            MonsterLife::Active => Some(self.tuning.idle_animation.as_str()),
            MonsterLife::Dying { .. } => Some(AnimState::Death.name()),
            MonsterLife::Spent => None,
        }
    }
}

/// Static hazard, obstacle or collectible.
pub struct Fixture {
    pub id: EntityId,
    pub group: Group,
    pub body: Body,
    pub animation: Option<String>,
}

impl Fixture {
    /// Removes a collectible from play. Returns false if it was already taken.
    pub fn collect(&mut self) -> bool {
        if !self.body.enabled {
            return false;
        }
        self.body.enabled = false;
        true
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub facing: Facing,
    pub anim: AnimState,
    pub dead: bool,
    pub in_play: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonsterSnapshot {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub health: u32,
    pub spent: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileSnapshot {
    pub id: EntityId,
    pub owner_id: EntityId,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
}

impl From<&PlayerEntity> for PlayerSnapshot {
    fn from(p: &PlayerEntity) -> Self {
        Self {
            id: p.id,
            x: p.body.x,
            y: p.body.y,
            vx: p.body.vx,
            vy: p.body.vy,
            facing: p.facing,
            anim: p.anim,
            dead: p.is_dead(),
            in_play: p.in_play(),
        }
    }
}

impl From<&MonsterEntity> for MonsterSnapshot {
    fn from(m: &MonsterEntity) -> Self {
        Self {
            id: m.id,
            x: m.body.x,
            y: m.body.y,
            health: m.health,
            spent: m.life == MonsterLife::Spent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dragon(health: u32) -> MonsterEntity {
        let tuning = MonsterTuning {
            health,
            ..MonsterTuning::default()
        };
        MonsterEntity::new(7, Body::new(400.0, 300.0, 120.0, 120.0), tuning)
    }

    #[test]
    fn when_monster_is_hit_then_health_drops_by_one() {
        let mut monster = dragon(3);

        let hit = monster.apply_hit(Duration::ZERO);

        assert_eq!(hit, MonsterHit::Damaged { remaining: 2 });
        assert_eq!(monster.life, MonsterLife::Active);
    }

    #[test]
    fn when_last_health_is_removed_then_monster_starts_dying_and_ignores_more_hits() {
        let mut monster = dragon(1);
        let now = Duration::from_millis(500);

        assert_eq!(monster.apply_hit(now), MonsterHit::Killed);
        assert_eq!(monster.life, MonsterLife::Dying { since: now });
        assert_eq!(monster.animation(), Some("death"));

        assert_eq!(monster.apply_hit(now), MonsterHit::Ignored);
        assert_eq!(monster.health, 0);
    }

    #[test]
    fn when_collectible_is_taken_twice_then_only_first_counts() {
        let mut coin = Fixture {
            id: 3,
            group: Group::Collectible,
            body: Body::new(10.0, 10.0, 8.0, 8.0),
            animation: None,
        };

        assert!(coin.collect());
        assert!(!coin.collect());
        assert!(!coin.body.enabled);
    }

    #[test]
    fn boxes_touching_only_at_an_edge_do_not_intersect() {
        let a = Body::new(0.0, 10.0, 10.0, 10.0);
        let b = Body::new(10.0, 10.0, 10.0, 10.0);
        let c = Body::new(9.0, 15.0, 10.0, 10.0);

        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
    }
}
