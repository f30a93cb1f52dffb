//! Newline-delimited JSON transport.
//!
//! Each input line is one `Command`; each handled command produces one
//! `RenderResult` on the output channel. Commands run concurrently, so results
//! arrive in completion order and carry their request id.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};

use super::commands::CommandHandler;
use super::render::RenderResult;

/// Reads commands from `input` until EOF and sends every result to `output`.
///
/// Finished command tasks are reaped while reading, so a long-lived input
/// does not accumulate task handles. Returns once every spawned command has
/// completed.
pub async fn serve_lines<R>(
    handler: CommandHandler,
    input: R,
    output: mpsc::Sender<RenderResult>,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut tasks = JoinSet::new();
    let mut lines = input.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                let handler = handler.clone();
                let output = output.clone();
                tasks.spawn(async move {
                    let result = handler.handle_json(&line).await;
                    if output.send(result).await.is_err() {
                        tracing::error!("Output writer stopped, dropping result");
                    }
                });
            }
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => log_task_exit(joined),
        }
    }

    while let Some(joined) = tasks.join_next().await {
        log_task_exit(joined);
    }
    Ok(())
}

fn log_task_exit(joined: Result<(), JoinError>) {
    if let Err(e) = joined {
        tracing::error!(error = %e, "Command task failed");
    }
}
