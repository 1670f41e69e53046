use leptos::*;

use crate::{
    file_kind::material_icon_url,
    model::FileRecord,
    reducer::UploadAction,
    runtime_context::use_upload_runtime,
};

fn file_count_label(count: usize) -> String {
    format!("{count} files")
}

#[component]
pub(super) fn FileList() -> impl IntoView {
    let runtime = use_upload_runtime();
    let files = Signal::derive(move || runtime.state.get().files);

    view! {
        <section class="files-panel">
            <div class="files-header">
                <h2>"Your Files"</h2>
                <span class="files-count">{move || file_count_label(files.get().len())}</span>
            </div>

            <Show
                when=move || !files.get().is_empty()
                fallback=|| {
                    view! {
                        <div class="files-empty">
                            <img src=material_icon_url("folder_open") alt="" />
                            <p>"No files uploaded yet"</p>
                        </div>
                    }
                }
            >
                <ul class="files-list" aria-label="Uploaded files">
                    <For each=move || files.get() key=|record| record.id.clone() let:record>
                        <FileRow record=record />
                    </For>
                </ul>
            </Show>
        </section>
    }
}

#[component]
fn FileRow(record: FileRecord) -> impl IntoView {
    let runtime = use_upload_runtime();
    let record_id = record.id.clone();
    let open = move |_| {
        runtime.dispatch_action(UploadAction::OpenFile {
            record_id: record_id.clone(),
        })
    };

    view! {
        <li class="file-row" data-category=record.category.as_str()>
            <span class="file-icon">
                <img src=record.category.icon_url() alt="" />
            </span>
            <div class="file-info">
                <span class="file-name">{record.name.clone()}</span>
                <span class="file-details">{format!("Uploaded on {}", record.upload_date)}</span>
            </div>
            <div class="file-actions">
                <button type="button" class="file-action" title="View" on:click=open>
                    "View"
                </button>
            </div>
        </li>
    }
}
