// One simulation session: the arena plus the fixed per-tick pipeline.

use super::types::{AnimationSelection, WorldUpdate};
use crate::domain::errors::SessionError;
use crate::domain::ports::PhysicsWorld;
use crate::domain::systems::effects::EffectsSpawner;
use crate::domain::systems::{combat, lifecycle, player_controller};
use crate::domain::tuning::session::SessionConfig;
use crate::domain::{
    Arena, EntityId, InputSignals, MonsterSnapshot, PlayerSnapshot, ProjectileSnapshot,
};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

pub struct Session {
    arena: Arena,
    effects: EffectsSpawner,
    // Latest signals per player; they stay latched until replaced.
    inputs: HashMap<EntityId, InputSignals>,
    tick: u64,
    now: Duration,
    dt: Duration,
}

impl Session {
    /// Builds the arena and arms every player's fire gate one cooldown from the start.
    pub fn new(config: &SessionConfig, dt: Duration) -> Result<Self, SessionError> {
        if dt.is_zero() {
            return Err(SessionError::ZeroTickInterval);
        }
        let mut arena = Arena::from_config(config)?;
        for player in &arena.players {
            arena
                .projectiles
                .arm_gate(player.id, player.tuning.fire_cooldown());
        }

        info!(
            players = arena.players.len(),
            monsters = arena.monsters.len(),
            hazards = arena.hazards.len(),
            pool = arena.projectiles.capacity(),
            dt_ms = dt.as_millis() as u64,
            "session created"
        );

        Ok(Self {
            arena,
            effects: EffectsSpawner::new(),
            inputs: HashMap::new(),
            tick: 0,
            now: Duration::ZERO,
            dt,
        })
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn player_ids(&self) -> Vec<EntityId> {
        self.arena.players.iter().map(|p| p.id).collect()
    }

    /// Latches input for a player. Returns false for an unknown id.
    pub fn set_input(&mut self, player_id: EntityId, input: InputSignals) -> bool {
        if self.arena.player(player_id).is_none() {
            return false;
        }
        self.inputs.insert(player_id, input);
        true
    }

    /// Runs one fixed step: controllers, physics, culling, combat, lifecycle, effects.
    pub fn tick<P: PhysicsWorld + ?Sized>(&mut self, physics: &mut P) -> WorldUpdate {
        let now = self.now;
        let end = now + self.dt;

        // Controllers run before physics so new shots are seen by this tick's collisions.
        for player in self.arena.players.iter_mut() {
            let input = self.inputs.get(&player.id).copied().unwrap_or_default();
            let out = player_controller::update(player, input, now);
            if out.respawned {
                self.arena
                    .projectiles
                    .arm_gate(player.id, now + player.tuning.fire_cooldown());
            }
            if let Some(request) = out.fire {
                if self.arena.projectiles.try_fire(&request, now) {
                    debug!(player_id = player.id, facing = ?request.facing, "shot fired");
                }
            }
        }

        let overlaps = physics.step(&mut self.arena, self.dt.as_secs_f32());

        let culled = self
            .arena
            .projectiles
            .cull_out_of_bounds(&self.arena.bounds);
        if !culled.is_empty() {
            debug!(count = culled.len(), "projectiles left the world");
        }

        let report = combat::resolve(&mut self.arena, &overlaps, now, &mut self.effects);
        if report != combat::CombatReport::default() {
            debug!(tick = self.tick, ?report, "combat resolved");
        }

        lifecycle::advance(&mut self.arena, end, &mut self.effects);

        let update = WorldUpdate {
            tick: self.tick + 1,
            time: end,
            players: self.arena.players.iter().map(PlayerSnapshot::from).collect(),
            monsters: self.arena.monsters.iter().map(MonsterSnapshot::from).collect(),
            projectiles: self
                .arena
                .projectiles
                .active()
                .map(ProjectileSnapshot::from)
                .collect(),
            animations: self.animation_selections(),
            effects: self.effects.drain(),
        };

        self.tick += 1;
        self.now = end;
        update
    }

    // One selection per entity still in play.
    fn animation_selections(&self) -> Vec<AnimationSelection> {
        let select = |entity_id: EntityId, state: &str| AnimationSelection {
            entity_id,
            state: state.to_string(),
        };

        let mut selections: Vec<AnimationSelection> = self
            .arena
            .players
            .iter()
            .filter(|p| p.in_play())
            .map(|p| select(p.id, p.anim.name()))
            .collect();
        selections.extend(
            self.arena
                .monsters
                .iter()
                .filter_map(|m| m.animation().map(|name| select(m.id, name))),
        );
        selections.extend(
            self.arena
                .hazards
                .iter()
                .chain(&self.arena.obstacles)
                .chain(&self.arena.collectibles)
                .filter(|f| f.body.enabled)
                .filter_map(|f| f.animation.as_deref().map(|name| select(f.id, name))),
        );
        selections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::state::{Group, Life, MonsterLife};
    use crate::domain::systems::effects::Effect;
    use crate::test_support::{ScriptedPhysics, input, overlap, small_config};

    const DT: Duration = Duration::from_millis(100);

    fn session() -> Session {
        Session::new(&small_config(1), DT).expect("valid config")
    }

    #[test]
    fn when_fire_is_held_from_the_start_then_first_shot_waits_one_cooldown() {
        let mut session = session();
        let player = session.player_ids()[0];
        let mut physics = ScriptedPhysics::grounded();
        session.set_input(player, input("f"));

        // Ticks at 0, 100 and 200 ms are still inside the opening cooldown.
        for _ in 0..3 {
            let update = session.tick(&mut physics);
            assert!(update.projectiles.is_empty());
        }
        let update = session.tick(&mut physics);

        assert_eq!(update.projectiles.len(), 1);
        let shot = &update.projectiles[0];
        let tuning = session.arena().players[0].tuning;
        assert_eq!(shot.x, tuning.respawn_x + tuning.muzzle_offset_x);
        assert_eq!(shot.vx, 750.0);
        assert_eq!(
            session.arena().projectiles.next_fire_allowed_at(player),
            Some(Duration::from_millis(600))
        );
    }

    #[test]
    fn when_fire_is_held_then_shots_follow_the_cooldown() {
        let mut session = session();
        let player = session.player_ids()[0];
        let mut physics = ScriptedPhysics::grounded();
        session.set_input(player, input("f"));

        let mut fired = Vec::new();
        for _ in 0..10 {
            let before = session.arena().projectiles.active_count();
            session.tick(&mut physics);
            if session.arena().projectiles.active_count() > before {
                fired.push(session.tick_count());
            }
        }

        // Shots at 300, 600 and 900 ms.
        assert_eq!(fired, vec![4, 7, 10]);
    }

    #[test]
    fn when_player_dies_then_death_down_and_respawn_follow_in_order() {
        let mut session = session();
        let player = session.player_ids()[0];
        let hazard = session.arena().hazards[0].id;
        let mut physics = ScriptedPhysics::grounded();
        physics.push(vec![overlap(player, Group::Player, hazard, Group::Hazard)]);

        // Tick 1 (0 ms): the hazard kills the player.
        session.tick(&mut physics);
        assert_eq!(session.arena().players[0].life, Life::Dying);

        // Tick 2 (100 ms): death pose starts; movement input is ignored.
        session.set_input(player, input("r"));
        let update = session.tick(&mut physics);
        assert_eq!(session.arena().players[0].body.vx, 0.0);
        assert!(
            update
                .animations
                .iter()
                .any(|a| a.entity_id == player && a.state == "death")
        );

        // Tick 3 (200 ms): pose has played 200 ms by the end of the tick.
        let update = session.tick(&mut physics);
        assert_eq!(session.arena().players[0].life, Life::Down);
        let gibs = update
            .effects
            .iter()
            .filter(|e| matches!(e, Effect::Gibs { source, .. } if *source == player))
            .count();
        assert_eq!(gibs, 1);
        assert!(!update.animations.iter().any(|a| a.entity_id == player));

        // Tick 4 (300 ms): fire respawns and re-arms the gate.
        session.set_input(player, input("f"));
        let update = session.tick(&mut physics);
        let p = &session.arena().players[0];
        assert_eq!(p.life, Life::Alive);
        assert_eq!((p.body.x, p.body.y), (p.tuning.respawn_x, p.tuning.respawn_y));
        assert!(update.projectiles.is_empty());
        assert_eq!(
            session.arena().projectiles.next_fire_allowed_at(player),
            Some(Duration::from_millis(600))
        );
    }

    #[test]
    fn when_shot_is_fired_then_same_tick_collisions_can_hit_it() {
        let mut session = session();
        let player = session.player_ids()[0];
        let monster = session.arena().monsters[0].id;
        let first_projectile = session.arena().monsters[0].id + 1;
        let mut physics = ScriptedPhysics::grounded();
        session.arena_mut().projectiles.arm_gate(player, Duration::ZERO);
        session.set_input(player, input("f"));
        physics.push(vec![overlap(
            monster,
            Group::Monster,
            first_projectile,
            Group::Projectile,
        )]);

        let update = session.tick(&mut physics);

        assert_eq!(session.arena().monsters[0].health, 0);
        assert!(update.projectiles.is_empty());
        assert!(matches!(update.effects.as_slice(), [Effect::Impact { .. }]));
    }

    #[test]
    fn when_monster_is_destroyed_then_it_is_spent_for_good() {
        let mut session = session();
        let player = session.player_ids()[0];
        let monster = session.arena().monsters[0].id;
        let first_projectile = monster + 1;
        let mut physics = ScriptedPhysics::grounded();
        session.arena_mut().projectiles.arm_gate(player, Duration::ZERO);
        session.set_input(player, input("f"));
        physics.push(vec![overlap(
            monster,
            Group::Monster,
            first_projectile,
            Group::Projectile,
        )]);

        let mut gib_bursts = 0;
        for _ in 0..10 {
            let update = session.tick(&mut physics);
            gib_bursts += update
                .effects
                .iter()
                .filter(|e| matches!(e, Effect::Gibs { source, .. } if *source == monster))
                .count();
            physics.push(vec![overlap(
                monster,
                Group::Monster,
                first_projectile,
                Group::Projectile,
            )]);
        }

        let m = &session.arena().monsters[0];
        assert_eq!(gib_bursts, 1);
        assert_eq!(m.life, MonsterLife::Spent);
        assert_eq!(m.health, 0);
        assert!(!m.body.enabled);
    }

    #[test]
    fn when_step_is_zero_then_session_is_not_created() {
        let result = Session::new(&small_config(1), Duration::ZERO);

        assert!(matches!(result, Err(SessionError::ZeroTickInterval)));
    }

    #[test]
    fn when_input_targets_unknown_player_then_it_is_rejected() {
        let mut session = session();

        assert!(!session.set_input(999, input("f")));
    }

    #[test]
    fn when_hazard_has_an_animation_then_it_is_selected_every_tick() {
        let mut session = session();
        let hazard = session.arena().hazards[0].id;
        let mut physics = ScriptedPhysics::grounded();

        let update = session.tick(&mut physics);

        assert!(
            update
                .animations
                .iter()
                .any(|a| a.entity_id == hazard && a.state == "flame")
        );
        assert_eq!(update.tick, 1);
        assert_eq!(update.time, DT);
    }
}
