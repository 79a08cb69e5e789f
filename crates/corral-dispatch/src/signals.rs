//! Termination signal wiring.
//!
//! One listener task owns the signal streams and rebroadcasts the raw
//! signal number. The dispatcher holds one subscription and lends it to
//! each phase in turn, so a signal landing between phases stays buffered;
//! the number feeds the `128 + signo` exit convention.

use tokio::sync::broadcast;
use tracing::info;

use crate::error::DispatchResult;

/// Terminal hangup.
pub const SIGHUP: i32 = 1;
/// Interrupt from the terminal.
pub const SIGINT: i32 = 2;
/// Quit from the terminal.
pub const SIGQUIT: i32 = 3;
/// Abnormal termination.
pub const SIGABRT: i32 = 6;
/// Termination request.
pub const SIGTERM: i32 = 15;

/// Sends the number of a received termination signal.
pub type ShutdownTx = broadcast::Sender<i32>;

/// Receives the number of a received termination signal.
pub type ShutdownRx = broadcast::Receiver<i32>;

/// Install the termination-signal listener.
///
/// Traps SIGINT, SIGTERM, SIGQUIT, SIGABRT, and SIGHUP. Returns the first
/// receiver; further receivers come from [`ShutdownRx::resubscribe`]. The
/// listener task runs until the last receiver is dropped.
#[cfg(unix)]
pub fn install() -> DispatchResult<ShutdownRx> {
    use tokio::signal::unix::{signal, SignalKind};

    let (tx, rx) = broadcast::channel(4);

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;
    let mut sigabrt = signal(SignalKind::from_raw(SIGABRT))?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::spawn(async move {
        loop {
            let signo = tokio::select! {
                _ = sigint.recv() => SIGINT,
                _ = sigterm.recv() => SIGTERM,
                _ = sigquit.recv() => SIGQUIT,
                _ = sigabrt.recv() => SIGABRT,
                _ = sighup.recv() => SIGHUP,
            };
            info!(signal = signo, "received termination signal");
            if tx.send(signo).is_err() {
                break;
            }
        }
    });

    Ok(rx)
}

/// Install the termination-signal listener (ctrl-c only off unix).
#[cfg(not(unix))]
pub fn install() -> DispatchResult<ShutdownRx> {
    let (tx, rx) = broadcast::channel(4);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!(signal = SIGINT, "received termination signal");
            let _ = tx.send(SIGINT);
        }
    });

    Ok(rx)
}

/// Wait for the next termination signal on `shutdown`.
///
/// Skips over lag gaps and never resolves once the channel closes, so a
/// select arm built on this settles only on a real delivery.
pub async fn next_signal(shutdown: &mut ShutdownRx) -> i32 {
    loop {
        match shutdown.recv().await {
            Ok(signo) => return signo,
            Err(broadcast::error::RecvError::Lagged(_)) => {}
            Err(broadcast::error::RecvError::Closed) => {
                std::future::pending::<()>().await;
            }
        }
    }
}
