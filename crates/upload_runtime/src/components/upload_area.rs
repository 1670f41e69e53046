use file_service::{UploadBody, UploadFile};
use leptos::*;
use web_sys::{DragEvent, HtmlInputElement};

use crate::{model::UploadBatch, reducer::UploadAction, runtime_context::use_upload_runtime};

const ACCEPTED_EXTENSIONS: &str = ".gif,.jpg,.png,.doc,.txt";

fn upload_file_from_browser(file: web_sys::File) -> UploadFile {
    let name = file.name();
    let size_bytes = file.size().max(0.0) as u64;
    let mime_type = file.type_();
    UploadFile {
        name,
        size_bytes,
        mime_type,
        body: UploadBody::Browser(file.into()),
    }
}

/// Collects a browser `FileList` into an upload batch, preserving its order.
pub fn batch_from_file_list(files: &web_sys::FileList) -> UploadBatch {
    (0..files.length())
        .filter_map(|index| files.item(index))
        .map(upload_file_from_browser)
        .collect::<Vec<_>>()
        .into()
}

fn suppress(ev: &DragEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

#[component]
pub(super) fn UploadArea() -> impl IntoView {
    let runtime = use_upload_runtime();
    let input_ref = create_node_ref::<html::Input>();

    let drag_active = Signal::derive(move || runtime.state.get().is_drag_active());
    let progress = Signal::derive(move || runtime.state.get().progress);

    let on_drag_enter = move |ev: DragEvent| {
        suppress(&ev);
        runtime.dispatch_action(UploadAction::DragEnter);
    };
    let on_drag_leave = move |ev: DragEvent| {
        suppress(&ev);
        runtime.dispatch_action(UploadAction::DragLeave);
    };
    let on_drag_over = move |ev: DragEvent| suppress(&ev);
    let on_drop = move |ev: DragEvent| {
        suppress(&ev);
        let batch = ev
            .data_transfer()
            .and_then(|transfer| transfer.files())
            .map(|files| batch_from_file_list(&files))
            .unwrap_or_default();
        runtime.dispatch_action(UploadAction::Drop(batch));
    };

    let open_picker = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };
    let on_picked = move |ev: ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let batch = input
            .files()
            .map(|files| batch_from_file_list(&files))
            .unwrap_or_default();
        // Reset so picking the same file again still fires `change`.
        input.set_value("");
        runtime.dispatch_action(UploadAction::UploadFiles(batch));
    };

    view! {
        <section
            class="upload-area"
            class:drag-active=move || drag_active.get()
            on:dragenter=on_drag_enter
            on:dragleave=on_drag_leave
            on:dragover=on_drag_over
            on:drop=on_drop
        >
            <button type="button" class="upload-button" on:click=open_picker>
                "Choose Files"
            </button>
            <input
                type="file"
                class="upload-input"
                hidden=true
                multiple=true
                accept=ACCEPTED_EXTENSIONS
                node_ref=input_ref
                on:change=on_picked
            />
            <p class="upload-text">
                {move || {
                    if drag_active.get() {
                        "Drop your files here"
                    } else {
                        "Drag & drop your files here or click the button below"
                    }
                }}
            </p>

            <Show when=move || progress.get().is_uploading fallback=|| ()>
                <div class="upload-progress">
                    <div
                        class="upload-progress-bar"
                        role="progressbar"
                        aria-valuemin="0"
                        aria-valuemax="100"
                        aria-valuenow=move || progress.get().percent.to_string()
                    >
                        <div
                            class="upload-progress-fill"
                            style:width=move || format!("{}%", progress.get().percent)
                        ></div>
                    </div>
                    <p class="upload-progress-text">
                        {move || format!("Uploading... {}%", progress.get().percent)}
                    </p>
                </div>
            </Show>
        </section>
    }
}
