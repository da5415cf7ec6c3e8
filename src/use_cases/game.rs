use super::session::Session;
use super::types::{GameEvent, SessionState, WorldUpdate};
use crate::domain::ports::PhysicsWorld;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{Notify, broadcast, mpsc, watch};
use tracing::{info, warn};

/// Loop timing for one session.
#[derive(Debug, Clone)]
pub struct WorldSettings {
    /// Fixed simulation step; also the wall-clock pacing of the loop. Must be
    /// non-zero; `Session::new` rejects a zero step.
    pub tick_interval: Duration,
    /// Countdown announced before the first tick (0 skips it).
    pub start_countdown: Duration,
    /// Simulated time after which the session ends (0 disables it).
    pub time_limit: Duration,
}

impl WorldSettings {
    /// State published before the loop starts.
    pub fn initial_state(&self) -> SessionState {
        if self.start_countdown.is_zero() {
            SessionState::Running
        } else {
            SessionState::Starting {
                in_seconds: self.start_countdown.as_secs().max(1) as u32,
            }
        }
    }
}

/// Drives a session at a fixed rate until shutdown, `EndSession`, the time
/// limit, or every input sender going away.
pub async fn world_task<P>(
    mut input_rx: mpsc::Receiver<GameEvent>,
    world_tx: broadcast::Sender<WorldUpdate>,
    state_tx: watch::Sender<SessionState>,
    mut session: Session,
    mut physics: P,
    settings: WorldSettings,
    shutdown: Arc<Notify>,
) where
    P: PhysicsWorld,
{
    let initial = settings.initial_state();
    if initial != SessionState::Running {
        let _ = state_tx.send(initial);
        tokio::time::sleep(settings.start_countdown).await;
    }
    let _ = state_tx.send(SessionState::Running);
    info!(tick_ms = settings.tick_interval.as_millis() as u64, "session running");

    // Drive the fixed-step loop at the configured tick rate.
    let mut interval = tokio::time::interval(settings.tick_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    'running: loop {
        tokio::select! {
            _ = shutdown.notified() => {
                info!("shutdown requested");
                break 'running;
            }
            _ = interval.tick() => {}
        }

        // Drain everything that arrived since the last tick.
        loop {
            match input_rx.try_recv() {
                Ok(GameEvent::Input { player_id, input }) => {
                    if !session.set_input(player_id, input) {
                        warn!(player_id, "input for unknown player ignored");
                    }
                }
                Ok(GameEvent::EndSession) => {
                    info!("end of session requested");
                    break 'running;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!("input channel closed");
                    break 'running;
                }
            }
        }

        let update = session.tick(&mut physics);
        // No subscribers is fine; updates are fire-and-forget.
        let _ = world_tx.send(update);

        if !settings.time_limit.is_zero() && session.now() >= settings.time_limit {
            info!(ticks = session.tick_count(), "time limit reached");
            break;
        }
    }

    let _ = state_tx.send(SessionState::Ended);
    info!(ticks = session.tick_count(), "session ended");
}
