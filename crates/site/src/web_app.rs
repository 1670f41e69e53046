use file_service::FileServiceConfig;
use file_service_web::{build_file_services, service_strategy_name};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use upload_runtime::{UploadPage, UploadProvider};

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="DropBox" />
        <Meta name="description" content="Upload, list, and open files stored on the file service." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=UploadEntry />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn UploadEntry() -> impl IntoView {
    logging::log!("file service strategy: {}", service_strategy_name());
    let services = build_file_services(FileServiceConfig::default());

    view! {
        <UploadProvider services=services>
            <UploadPage />
        </UploadProvider>
    }
}
