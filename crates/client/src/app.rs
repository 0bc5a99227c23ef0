//! Interactive loop: stdin lines in, rendered events out.

use anyhow::{Context, Result};
use tokio::sync::{broadcast::error::RecvError, mpsc, oneshot};
use tokio::task::JoinHandle;

use runtime::{CompletionReport, Runtime, RuntimeError, RuntimeHandle, Topic};

use crate::config::{ClientConfig, OutputFormat};
use crate::input::{self, HELP, Input};
use crate::presentation::render;

/// Plays one session until it completes, stdin closes or the player quits.
pub async fn run(
    runtime: Runtime,
    config: ClientConfig,
    mut completed: oneshot::Receiver<CompletionReport>,
) -> Result<()> {
    let handle = runtime.handle();
    // Subscribe before starting so the first events are not missed.
    let printer = spawn_printer(&handle, config.format);

    handle.start().await.context("failed to start the session")?;

    let mut lines = spawn_stdin_reader();
    loop {
        tokio::select! {
            report = &mut completed => {
                if let Ok(report) = report {
                    tracing::info!(
                        victory = report.victory,
                        final_score = report.final_score,
                        elapsed_seconds = report.elapsed_seconds,
                        "session finished"
                    );
                }
                break;
            }
            line = lines.recv() => {
                let Some(line) = line else {
                    break;
                };
                if !dispatch(&handle, &line).await? {
                    break;
                }
            }
        }
    }

    drop(handle);
    runtime.shutdown().await.context("failed to stop the runtime")?;
    if printer.await.is_err() {
        tracing::warn!("event printer task panicked");
    }
    Ok(())
}

/// Handles one input line. Returns `false` when the player wants to quit.
async fn dispatch(handle: &RuntimeHandle, line: &str) -> Result<bool> {
    match input::parse(line) {
        None => {}
        Some(Ok(Input::Quit)) => return Ok(false),
        Some(Ok(Input::Help)) => println!("{HELP}"),
        Some(Ok(Input::Play(command))) => match handle.send(command).await {
            // Rejections are printed from the command topic.
            Ok(()) | Err(RuntimeError::Rejected(_)) => {}
            Err(error) => return Err(error).context("runtime stopped unexpectedly"),
        },
        Some(Err(error)) => println!("{error}"),
    }
    Ok(true)
}

/// Reads stdin on a plain thread; a blocked read must not hold up runtime
/// shutdown. The channel closes on EOF or a read error.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    tracing::warn!("stdin read failed: {error}");
                    break;
                }
            }
        }
    });
    rx
}

/// Forwards every topic into one stream and prints it. Ends once the runtime
/// and all handles are gone.
fn spawn_printer(handle: &RuntimeHandle, format: OutputFormat) -> JoinHandle<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    for (topic, mut receiver) in handle.subscribe_multiple(&Topic::ALL) {
        let tx = tx.clone();
        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(?topic, skipped, "output fell behind, events dropped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }
    drop(tx);

    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if let Some(text) = render(&event, format) {
                println!("{text}");
            }
        }
    })
}
