use derive_more::Display;
use std::future::pending;

#[derive(Debug, Display, Clone, Copy)]
pub(crate) enum Signal {
    #[display("SIGINT")]
    Interrupt,
    #[display("SIGTERM")]
    Terminate,
}
impl Signal {
    /// Conventional `128 + signal number`.
    pub(crate) fn exit_code(self) -> i32 {
        match self {
            Self::Interrupt => 130,
            Self::Terminate => 143,
        }
    }
}

/// Resolves on the first SIGINT or SIGTERM.
///
/// A handler that can't be installed is logged and never fires; the run
/// carries on without it.
pub(crate) async fn signal() -> Signal {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install SIGINT handler");
            pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = pending::<()>();

    tokio::select! {
        _ = interrupt => Signal::Interrupt,
        _ = terminate => Signal::Terminate,
    }
}
