use tokio::select;
use tokio_util::sync::CancellationToken;

/// Cancels the shared token when the process receives ctrl-c. Also
/// completes when something else cancels the token (quitting from a
/// screen), so the surrounding `join!` can finish.
pub async fn watch_shutdown(cancellation: CancellationToken) {
    select! {
        _ = tokio::signal::ctrl_c() => {
            cancellation.cancel();
        },
        _ = cancellation.cancelled() => {}
    };
}
