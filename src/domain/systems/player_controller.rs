use crate::domain::state::{AnimState, Facing, InputSignals, Life, PlayerEntity};
use crate::domain::systems::projectiles::FireRequest;
use std::time::Duration;
use tracing::info;

/// Decisions taken by one controller update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlOutput {
    /// Animation selected this tick; `None` while the body is out of play.
    pub anim: Option<AnimState>,
    pub fire: Option<FireRequest>,
    /// The player came back this tick; its fire gate must be re-armed.
    pub respawned: bool,
}

impl ControlOutput {
    fn idle() -> Self {
        Self {
            anim: None,
            fire: None,
            respawned: false,
        }
    }
}

/// Advances one player's state machine by a tick.
///
/// Writes velocity, hitbox height and facing to the player; returns the
/// animation choice and an optional shot for the projectile pool.
pub fn update(player: &mut PlayerEntity, input: InputSignals, now: Duration) -> ControlOutput {
    player.last_input = input;

    match player.life {
        Life::Down => {
            if input.fire {
                respawn(player, now);
                return ControlOutput {
                    anim: Some(player.anim),
                    fire: None,
                    respawned: true,
                };
            }
            return ControlOutput::idle();
        }
        Life::Dying => {
            // Input is ignored; only the pose is kept in sync.
            let anim = select_animation(true, false, player.body.touching_ground, 0.0, false);
            apply_pose(player, anim, now);
            return ControlOutput {
                anim: Some(anim),
                fire: None,
                respawned: false,
            };
        }
        Life::Alive => {}
    }

    let tuning = player.tuning;
    let grounded = player.body.touching_ground;

    let mut vx = if input.left {
        -tuning.velocity_x
    } else if input.right {
        tuning.velocity_x
    } else {
        0.0
    };

    if input.up && grounded {
        player.body.vy = -tuning.velocity_jump;
    }

    if input.down && grounded {
        player.is_squatting = true;
        vx = 0.0;
    } else {
        player.is_squatting = false;
    }
    player.body.vx = vx;

    // Shots leave in the direction faced before this tick's turn.
    let fire = input.fire.then(|| FireRequest {
        owner_id: player.id,
        x: player.body.x,
        y: player.body.y,
        facing: player.facing,
        muzzle_offset_x: tuning.muzzle_offset_x,
        muzzle_offset_y: tuning.muzzle_offset_y,
        cooldown: tuning.fire_cooldown(),
    });

    let anim = select_animation(false, input.fire, grounded, vx, player.is_squatting);
    apply_pose(player, anim, now);

    if vx < 0.0 {
        player.facing = Facing::Left;
    } else if vx > 0.0 {
        player.facing = Facing::Right;
    }

    ControlOutput {
        anim: Some(anim),
        fire,
        respawned: false,
    }
}

/// Starts the death sequence. Returns false if the player was already dead.
pub fn die_painfully(player: &mut PlayerEntity) -> bool {
    if player.life != Life::Alive {
        return false;
    }
    player.life = Life::Dying;
    player.is_squatting = false;
    player.body.vy = -player.tuning.death_hop_velocity;
    true
}

/// First matching rule wins.
pub fn select_animation(
    is_dead: bool,
    firing: bool,
    grounded: bool,
    vx: f32,
    squatting: bool,
) -> AnimState {
    if is_dead {
        AnimState::Death
    } else if firing {
        if grounded {
            AnimState::Shoot
        } else {
            AnimState::JumpShoot
        }
    } else if !grounded {
        AnimState::Jump
    } else if vx != 0.0 {
        AnimState::Walk
    } else if squatting {
        AnimState::Squat
    } else {
        AnimState::Stand
    }
}

// Hitbox height follows the selected pose, not the squat flag.
fn apply_pose(player: &mut PlayerEntity, anim: AnimState, now: Duration) {
    if player.anim != anim {
        player.anim = anim;
        player.anim_started_at = now;
    }
    player.body.height = if anim == AnimState::Squat {
        player.tuning.body_height_squat
    } else {
        player.tuning.body_height
    };
}

fn respawn(player: &mut PlayerEntity, now: Duration) {
    let tuning = player.tuning;
    let body = &mut player.body;
    body.x = tuning.respawn_x;
    body.y = tuning.respawn_y;
    body.vx = 0.0;
    body.vy = 0.0;
    body.height = tuning.body_height;
    body.touching_ground = false;
    body.enabled = true;

    player.life = Life::Alive;
    player.is_squatting = false;
    player.anim = AnimState::Stand;
    player.anim_started_at = now;

    info!(
        player_id = player.id,
        x = tuning.respawn_x,
        y = tuning.respawn_y,
        "player respawned"
    );
}
