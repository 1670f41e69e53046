//! Upload page UI composition.

mod file_list;
mod upload_area;

use leptos::*;

use self::{file_list::FileList, upload_area::UploadArea};

pub use self::upload_area::batch_from_file_list;

use crate::{
    file_kind::material_icon_url,
    model::StatusKind,
    runtime_context::use_upload_runtime,
};

fn status_icon_url(kind: StatusKind) -> String {
    match kind {
        StatusKind::Success => material_icon_url("check_circle"),
        StatusKind::Error => material_icon_url("error"),
    }
}

fn status_class(kind: StatusKind) -> &'static str {
    match kind {
        StatusKind::Success => "status-banner status-success",
        StatusKind::Error => "status-banner status-error",
    }
}

#[component]
/// Full upload page. Must be rendered inside [`crate::UploadProvider`].
pub fn UploadPage() -> impl IntoView {
    view! {
        <div class="upload-page">
            <header class="upload-header">
                <h1>"DropBox"</h1>
                <p class="upload-subtitle">"Upload and manage files"</p>
            </header>

            <StatusBanner />
            <UploadArea />
            <FileList />
        </div>
    }
}

#[component]
fn StatusBanner() -> impl IntoView {
    let runtime = use_upload_runtime();
    let status = Signal::derive(move || runtime.state.get().status);

    view! {
        <Show when=move || status.get().visible fallback=|| ()>
            <div class=move || status_class(status.get().kind) role="status" aria-live="polite">
                <span class="status-icon">
                    <img src=move || status_icon_url(status.get().kind) alt="" />
                </span>
                {move || status.get().text}
            </div>
        </Show>
    }
}
