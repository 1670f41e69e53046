//! Runtime provider and context wiring for the upload page.
//!
//! This module owns the reducer container, the effect queue, and the single notification timer.
//! UI composition stays in [`crate::components`].
#![allow(clippy::clone_on_copy)]

use file_service::FileServices;
use leptos::{leptos_dom::helpers::TimeoutHandle, *};

use crate::{
    effect_executor,
    model::{RuntimeConfig, UploadState},
    reducer::{reduce_uploads, UploadAction, UploadEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading upload state and dispatching [`UploadAction`] values.
pub struct UploadRuntimeContext {
    /// Injected storage and viewer services.
    pub services: StoredValue<FileServices>,
    /// Reactive upload state signal.
    pub state: RwSignal<UploadState>,
    /// Queue of effects emitted by the reducer and drained by the executor.
    pub effects: RwSignal<Vec<UploadEffect>>,
    /// Handle of the pending notification auto-clear, if any.
    pub status_timer: StoredValue<Option<TimeoutHandle>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<UploadAction>,
}

impl UploadRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: UploadAction) {
        self.dispatch.call(action);
    }
}

#[component]
/// Provides [`UploadRuntimeContext`] to descendant components and loads the initial file list.
pub fn UploadProvider(
    /// Storage and viewer bundle assembled by the entry layer.
    services: FileServices,
    /// Runtime tuning; defaults to a three-second notification and byte-weighted progress.
    #[prop(optional)]
    config: Option<RuntimeConfig>,
    children: Children,
) -> impl IntoView {
    let services = store_value(services);
    let state = create_rw_signal(UploadState::with_config(config.unwrap_or_default()));
    let effects = create_rw_signal(Vec::<UploadEffect>::new());
    let status_timer = store_value(None::<TimeoutHandle>);

    let dispatch = Callback::new(move |action: UploadAction| {
        let mut next = state.get_untracked();
        let previous = next.clone();

        match reduce_uploads(&mut next, action) {
            Ok(new_effects) => {
                if next != previous {
                    state.set(next);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("upload reducer error: {err}"),
        }
    });

    let runtime = UploadRuntimeContext {
        services,
        state,
        effects,
        status_timer,
        dispatch,
    };

    provide_context(runtime.clone());

    effect_executor::install(runtime);
    on_cleanup(move || effect_executor::cancel_status_timer(runtime));
    runtime.dispatch_action(UploadAction::RequestFileList);

    children().into_view()
}

/// Returns the current [`UploadRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`UploadProvider`].
pub fn use_upload_runtime() -> UploadRuntimeContext {
    use_context::<UploadRuntimeContext>().expect("UploadRuntimeContext not provided")
}
