//! Driving a `StateCtx` to completion in a one-shot process.

use directory_states::StateCtx;
use tracing::{debug, instrument};

/// Spawn everything queued, wait for every task, then apply what they
/// reported and refresh derived views.
#[instrument(skip_all, name = "flush")]
pub async fn flush_and_await(ctx: &mut StateCtx) {
    ctx.sync_computes();
    ctx.flush_commands();

    let mut finished = 0_usize;
    while ctx.task_count() > 0 {
        if ctx.task_set_mut().join_next().await.is_some() {
            finished += 1;
            ctx.sync_computes();
        }
    }
    debug!("{finished} command task(s) finished");

    ctx.sync_computes();
    ctx.run_computed();
}
