use crate::domain::arena::Arena;
use crate::domain::state::{EntityId, EntityRef, Group, MonsterHit, MonsterLife, Overlap};
use crate::domain::systems::effects::EffectsSpawner;
use crate::domain::systems::player_controller::die_painfully;
use std::time::Duration;
use tracing::{debug, info};

/// Counts of what a resolve pass changed, mostly for logs and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatReport {
    pub player_deaths: usize,
    pub projectile_hits: usize,
    pub monster_hits: usize,
    pub monster_kills: usize,
    pub collected: usize,
}

// Overlap normalised to a known pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pair {
    PlayerHazard {
        player: EntityId,
    },
    PlayerMonster {
        player: EntityId,
        monster: EntityId,
    },
    PlayerProjectile {
        player: EntityId,
        projectile: EntityId,
    },
    ProjectileObstacle {
        projectile: EntityId,
    },
    MonsterProjectile {
        monster: EntityId,
        projectile: EntityId,
    },
    PlayerCollectible {
        player: EntityId,
        collectible: EntityId,
    },
}

fn classify(overlap: &Overlap) -> Option<Pair> {
    let pair = |a: &EntityRef, b: &EntityRef| match (a.group, b.group) {
        (Group::Player, Group::Hazard) => Some(Pair::PlayerHazard { player: a.id }),
        (Group::Player, Group::Monster) => Some(Pair::PlayerMonster {
            player: a.id,
            monster: b.id,
        }),
        (Group::Player, Group::Projectile) => Some(Pair::PlayerProjectile {
            player: a.id,
            projectile: b.id,
        }),
        (Group::Projectile, Group::Obstacle) => Some(Pair::ProjectileObstacle { projectile: a.id }),
        (Group::Monster, Group::Projectile) => Some(Pair::MonsterProjectile {
            monster: a.id,
            projectile: b.id,
        }),
        (Group::Player, Group::Collectible) => Some(Pair::PlayerCollectible {
            player: a.id,
            collectible: b.id,
        }),
        _ => None,
    };
    pair(&overlap.a, &overlap.b).or_else(|| pair(&overlap.b, &overlap.a))
}

/// Applies this tick's overlaps to the arena.
///
/// Every rule is idempotent per entity: dead players, retired projectiles and
/// monsters out of health are skipped, so repeated or stale pairs are no-ops.
pub fn resolve(
    arena: &mut Arena,
    overlaps: &[Overlap],
    now: Duration,
    effects: &mut EffectsSpawner,
) -> CombatReport {
    let mut report = CombatReport::default();

    for overlap in overlaps {
        let Some(pair) = classify(overlap) else {
            continue;
        };

        match pair {
            Pair::PlayerHazard { player } => {
                if kill_player(arena, player, "hazard") {
                    report.player_deaths += 1;
                }
            }
            Pair::PlayerMonster { player, monster } => {
                let monster_in_play = arena
                    .monster(monster)
                    .is_some_and(|m| m.life != MonsterLife::Spent);
                if monster_in_play && kill_player(arena, player, "monster") {
                    report.player_deaths += 1;
                }
            }
            Pair::PlayerProjectile { player, projectile } => {
                let player_in_play = arena.player(player).is_some_and(|p| p.in_play());
                if !player_in_play || !retire_projectile(arena, projectile, effects) {
                    continue;
                }
                report.projectile_hits += 1;
                if kill_player(arena, player, "projectile") {
                    report.player_deaths += 1;
                }
            }
            Pair::ProjectileObstacle { projectile } => {
                if retire_projectile(arena, projectile, effects) {
                    report.projectile_hits += 1;
                }
            }
            Pair::MonsterProjectile {
                monster,
                projectile,
            } => {
                let targetable = arena.monster(monster).is_some_and(|m| m.is_targetable());
                if !targetable || !retire_projectile(arena, projectile, effects) {
                    continue;
                }
                report.projectile_hits += 1;
                let Some(m) = arena.monster_mut(monster) else {
                    continue;
                };
                match m.apply_hit(now) {
                    MonsterHit::Killed => {
                        report.monster_hits += 1;
                        report.monster_kills += 1;
                        info!(monster_id = monster, projectile_id = projectile, "monster slain");
                    }
                    MonsterHit::Damaged { remaining } => {
                        report.monster_hits += 1;
                        debug!(monster_id = monster, remaining, "monster hit");
                    }
                    MonsterHit::Ignored => {}
                }
            }
            Pair::PlayerCollectible {
                player,
                collectible,
            } => {
                let player_alive = arena.player(player).is_some_and(|p| !p.is_dead());
                if !player_alive {
                    continue;
                }
                if arena
                    .collectible_mut(collectible)
                    .is_some_and(|c| c.collect())
                {
                    effects.collected(player, collectible);
                    report.collected += 1;
                }
            }
        }
    }

    report
}

fn kill_player(arena: &mut Arena, player_id: EntityId, cause: &'static str) -> bool {
    let Some(player) = arena.player_mut(player_id) else {
        return false;
    };
    let died = die_painfully(player);
    if died {
        info!(player_id, cause, "player died");
    }
    died
}

// Impact is reported at the projectile's centre, before it is parked.
fn retire_projectile(
    arena: &mut Arena,
    projectile_id: EntityId,
    effects: &mut EffectsSpawner,
) -> bool {
    let Some(impact) = arena
        .projectiles
        .get(projectile_id)
        .filter(|p| p.is_active())
        .map(|p| p.body.center())
    else {
        return false;
    };
    arena.projectiles.deactivate(projectile_id);
    effects.spawn_impact_effect(impact.0, impact.1);
    true
}
