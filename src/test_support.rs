use crate::domain::Arena;
use crate::domain::ports::PhysicsWorld;
use crate::domain::state::{EntityId, EntityRef, Group, InputSignals, Overlap, PlayerEntity};
use crate::domain::systems::projectiles::FireRequest;
use crate::domain::tuning::monster::MonsterTuning;
use crate::domain::tuning::player::PlayerTuning;
use crate::domain::tuning::session::{FixtureSpec, MonsterSpec, SessionConfig};
use std::collections::{HashSet, VecDeque};
use std::time::Duration;

/// Builds signals from a key string: `l`, `r`, `u`, `d`, `f`.
pub(crate) fn input(keys: &str) -> InputSignals {
    InputSignals {
        left: keys.contains('l'),
        right: keys.contains('r'),
        up: keys.contains('u'),
        down: keys.contains('d'),
        fire: keys.contains('f'),
    }
}

pub(crate) fn grounded_player(id: EntityId) -> PlayerEntity {
    let mut player = PlayerEntity::new(id, PlayerTuning::default());
    player.body.touching_ground = true;
    player
}

/// Small stage: one flame hazard, one platform, one coin and one monster.
pub(crate) fn small_config(players: usize) -> SessionConfig {
    let fixture = |x: f32, y: f32, width: f32, height: f32, animation: Option<&str>| FixtureSpec {
        x,
        y,
        width,
        height,
        animation: animation.map(str::to_string),
    };

    let mut config = SessionConfig::default();
    config.players = (0..players)
        .map(|i| PlayerTuning {
            respawn_x: 100.0 + 150.0 * i as f32,
            ..PlayerTuning::default()
        })
        .collect();
    config.projectile.pool_capacity = 8;
    config.hazards = vec![fixture(600.0, 560.0, 40.0, 40.0, Some("flame"))];
    config.obstacles = vec![fixture(100.0, 450.0, 180.0, 24.0, None)];
    config.collectibles = vec![fixture(300.0, 500.0, 10.0, 10.0, None)];
    config.monsters = vec![MonsterSpec {
        x: 400.0,
        y: 300.0,
        width: 120.0,
        height: 120.0,
        tuning: MonsterTuning::default(),
    }];
    config
}

pub(crate) fn arena_with(players: usize, monster_health: u32) -> Arena {
    let mut arena = Arena::from_config(&small_config(players)).expect("valid test config");
    for player in arena.players.iter_mut() {
        player.body.touching_ground = true;
    }
    let monster = &mut arena.monsters[0];
    monster.tuning.health = monster_health;
    monster.health = monster_health;
    arena
}

/// Fires one shot from `players[index]` regardless of its gate. Returns the shot id.
pub(crate) fn fire_from(arena: &mut Arena, index: usize) -> EntityId {
    let player = &arena.players[index];
    let request = FireRequest {
        owner_id: player.id,
        x: player.body.x,
        y: player.body.y,
        facing: player.facing,
        muzzle_offset_x: player.tuning.muzzle_offset_x,
        muzzle_offset_y: player.tuning.muzzle_offset_y,
        cooldown: player.tuning.fire_cooldown(),
    };

    let before: HashSet<EntityId> = arena.projectiles.active().map(|p| p.id).collect();
    arena.projectiles.arm_gate(request.owner_id, Duration::ZERO);
    assert!(arena.projectiles.try_fire(&request, Duration::ZERO));
    arena
        .projectiles
        .active()
        .map(|p| p.id)
        .find(|id| !before.contains(id))
        .expect("a newly active projectile")
}

pub(crate) fn overlap(a: EntityId, group_a: Group, b: EntityId, group_b: Group) -> Overlap {
    Overlap {
        a: EntityRef::new(a, group_a),
        b: EntityRef::new(b, group_b),
    }
}

/// Physics stand-in: keeps every player grounded, moves nothing and replays
/// scripted overlaps one step at a time.
#[derive(Default)]
pub(crate) struct ScriptedPhysics {
    script: VecDeque<Vec<Overlap>>,
}

impl ScriptedPhysics {
    pub(crate) fn grounded() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, overlaps: Vec<Overlap>) {
        self.script.push_back(overlaps);
    }
}

impl PhysicsWorld for ScriptedPhysics {
    fn step(&mut self, arena: &mut Arena, _dt: f32) -> Vec<Overlap> {
        for player in arena.players.iter_mut().filter(|p| p.body.enabled) {
            player.body.touching_ground = true;
        }
        self.script.pop_front().unwrap_or_default()
    }
}
