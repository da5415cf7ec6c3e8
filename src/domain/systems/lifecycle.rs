use crate::domain::arena::Arena;
use crate::domain::state::{AnimState, Life, MonsterLife};
use crate::domain::systems::effects::EffectsSpawner;
use std::time::Duration;
use tracing::info;

/// Finishes death animations that have run their full length.
///
/// Dying players go `Down` and dying monsters become `Spent`; either way the
/// body leaves play and one gib burst is thrown where it stood.
pub fn advance(arena: &mut Arena, now: Duration, effects: &mut EffectsSpawner) {
    for player in arena.players.iter_mut() {
        // The death clock starts when the controller first selects the pose.
        if player.life != Life::Dying || player.anim != AnimState::Death {
            continue;
        }
        if now.saturating_sub(player.anim_started_at) < player.tuning.death_animation() {
            continue;
        }
        player.life = Life::Down;
        player.body.enabled = false;
        player.body.vx = 0.0;
        player.body.vy = 0.0;
        effects.spawn_gib_effect(
            player.id,
            player.body.x,
            player.body.y,
            player.tuning.gib_count,
        );
        info!(player_id = player.id, "player down, waiting for respawn");
    }

    for monster in arena.monsters.iter_mut() {
        let MonsterLife::Dying { since } = monster.life else {
            continue;
        };
        if now.saturating_sub(since) < monster.tuning.death_animation() {
            continue;
        }
        monster.life = MonsterLife::Spent;
        monster.body.enabled = false;
        effects.spawn_gib_effect(
            monster.id,
            monster.body.x,
            monster.body.y,
            monster.tuning.gib_count,
        );
        info!(monster_id = monster.id, "monster removed");
    }
}
