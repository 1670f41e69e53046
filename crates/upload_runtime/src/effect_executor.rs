//! Explicit effect-queue executor for reducer-emitted side effects.

use std::time::Duration;

use leptos::*;

use crate::{
    model::StatusToken,
    operations,
    reducer::{UploadAction, UploadEffect},
    runtime_context::UploadRuntimeContext,
};

/// Installs the effect executor that drains reducer-emitted effects in order.
pub fn install(runtime: UploadRuntimeContext) {
    // Clear the current queue before processing so nested dispatches enqueue a fresh batch instead
    // of being overwritten by the in-flight drain.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            run_effect(runtime, effect);
        }
    });
}

fn run_effect(runtime: UploadRuntimeContext, effect: UploadEffect) {
    match effect {
        UploadEffect::FetchFileList { ticket } => spawn_local(async move {
            let services = runtime.services.get_value();
            operations::fetch_file_list(&services, ticket, &move |action: UploadAction| {
                runtime.dispatch_action(action)
            })
            .await;
        }),
        UploadEffect::RunUploadBatch(batch) => spawn_local(async move {
            let services = runtime.services.get_value();
            operations::run_upload_batch(&services, batch, &move |action: UploadAction| {
                runtime.dispatch_action(action)
            })
            .await;
        }),
        UploadEffect::DownloadAndOpen { record } => spawn_local(async move {
            let services = runtime.services.get_value();
            operations::download_and_open(&services, record, &move |action: UploadAction| {
                runtime.dispatch_action(action)
            })
            .await;
        }),
        UploadEffect::ScheduleStatusClear { token, delay } => {
            schedule_status_clear(runtime, token, delay)
        }
    }
}

// At most one timer is pending; a newer notification replaces it. Cancellation only runs
// against a browser timer, so native tests cover the token guard in the reducer instead.
fn schedule_status_clear(runtime: UploadRuntimeContext, token: StatusToken, delay: Duration) {
    cancel_status_timer(runtime);
    match set_timeout_with_handle(
        move || {
            runtime.status_timer.set_value(None);
            runtime.dispatch_action(UploadAction::ClearStatus { token });
        },
        delay,
    ) {
        Ok(handle) => runtime.status_timer.set_value(Some(handle)),
        Err(err) => {
            logging::warn!("status timer unavailable, clearing now: {err:?}");
            runtime.dispatch_action(UploadAction::ClearStatus { token });
        }
    }
}

/// Cancels the pending notification timer, if any.
pub(crate) fn cancel_status_timer(runtime: UploadRuntimeContext) {
    if let Some(Some(handle)) = runtime.status_timer.try_get_value() {
        handle.clear();
    }
}
