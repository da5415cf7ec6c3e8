use crate::interface_adapters::protocol::{
    ClientMessage, ServerMessage, SessionStateDto, WorldUpdateDto,
};
use crate::use_cases::{GameEvent, SessionState, WorldUpdate};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub enum AdapterError {
    // Categorizes host stream failures so the runtime can decide policy.
    Io(std::io::Error),
    Serialization(serde_json::Error),
    InputClosed,
}

impl std::fmt::Display for AdapterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdapterError::Io(e) => write!(f, "host stream failed: {e}"),
            AdapterError::Serialization(e) => write!(f, "failed to serialize message: {e}"),
            AdapterError::InputClosed => write!(f, "session no longer accepts input"),
        }
    }
}

impl std::error::Error for AdapterError {}

impl From<std::io::Error> for AdapterError {
    fn from(e: std::io::Error) -> Self {
        AdapterError::Io(e)
    }
}

impl From<serde_json::Error> for AdapterError {
    fn from(e: serde_json::Error) -> Self {
        AdapterError::Serialization(e)
    }
}

/// Forwards host input lines to the world task.
///
/// Malformed lines are logged and skipped. End of input requests the end of
/// the session.
pub async fn input_reader<R>(
    reader: R,
    input_tx: mpsc::Sender<GameEvent>,
) -> Result<(), AdapterError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut line_no: u64 = 0;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let msg = match serde_json::from_str::<ClientMessage>(line) {
            Ok(msg) => msg,
            Err(e) => {
                warn!(line = line_no, error = %e, "skipping malformed input line");
                continue;
            }
        };

        input_tx
            .send(GameEvent::from(msg))
            .await
            .map_err(|_| AdapterError::InputClosed)?;
    }

    info!(lines = line_no, "input stream finished");
    // The world task may already be gone; nothing left to stop then.
    let _ = input_tx.send(GameEvent::EndSession).await;
    Ok(())
}

/// Writes every world update and session state change as one JSON line.
///
/// Returns once the world task drops its update sender.
pub async fn output_writer<W>(
    mut world_rx: broadcast::Receiver<WorldUpdate>,
    mut state_rx: watch::Receiver<SessionState>,
    mut writer: W,
) -> Result<(), AdapterError>
where
    W: AsyncWrite + Unpin,
{
    let mut last_state = state_rx.borrow_and_update().clone();
    write_state(&mut writer, &last_state).await?;
    let mut state_open = true;

    loop {
        tokio::select! {
            result = world_rx.recv() => match result {
                Ok(update) => {
                    let msg = ServerMessage::WorldUpdate(WorldUpdateDto::from(update));
                    write_line(&mut writer, &msg).await?;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(missed = n, "output writer lagged; skipping to latest update");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    debug!("world updates channel closed; writer exiting");
                    break;
                }
            },
            changed = state_rx.changed(), if state_open => {
                if changed.is_err() {
                    state_open = false;
                    continue;
                }
                let state = state_rx.borrow_and_update().clone();
                if state != last_state {
                    write_state(&mut writer, &state).await?;
                    last_state = state;
                }
            }
        }
    }

    // The final transition can race the close of the update channel.
    let state = state_rx.borrow().clone();
    if state != last_state {
        write_state(&mut writer, &state).await?;
    }
    writer.flush().await?;
    Ok(())
}

async fn write_state<W>(writer: &mut W, state: &SessionState) -> Result<(), AdapterError>
where
    W: AsyncWrite + Unpin,
{
    let msg = ServerMessage::SessionState(SessionStateDto::from(state.clone()));
    write_line(writer, &msg).await
}

async fn write_line<W>(writer: &mut W, msg: &ServerMessage) -> Result<(), AdapterError>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(msg)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}
