use super::*;

use file_service::{UploadBody, UPLOAD_FORM_FIELD};
use futures::{channel::mpsc, StreamExt};
use gloo_net::http::Request;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

fn js_error(context: &str, err: JsValue) -> String {
    format!("{context}: {err:?}")
}

pub async fn list_files(url: &str) -> Result<Vec<RemoteFileEntry>, ServiceError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|err| ServiceError::network(url, err))?;
    if !response.ok() {
        return Err(ServiceError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    response
        .json::<Vec<RemoteFileEntry>>()
        .await
        .map_err(|err| ServiceError::decode(url, err))
}

pub async fn download_file(url: &str) -> Result<Vec<u8>, ServiceError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|err| ServiceError::network(url, err))?;
    if !response.ok() {
        return Err(ServiceError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    response
        .binary()
        .await
        .map_err(|err| ServiceError::decode(url, err))
}

enum XhrEvent {
    Progress(TransferProgress),
    Finished(Result<(), ServiceError>),
}

fn bytes_to_blob(bytes: &[u8], mime_type: &str) -> Result<web_sys::Blob, String> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_type);
    web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|err| js_error("failed to build blob", err))
}

fn build_form(file: &UploadFile) -> Result<web_sys::FormData, String> {
    let form = web_sys::FormData::new().map_err(|err| js_error("failed to build form", err))?;
    match &file.body {
        UploadBody::Browser(handle) => {
            let blob: &web_sys::Blob = handle.unchecked_ref();
            form.append_with_blob_and_filename(UPLOAD_FORM_FIELD, blob, &file.name)
        }
        UploadBody::Bytes(bytes) => {
            let blob = bytes_to_blob(bytes, &file.mime_type)?;
            form.append_with_blob_and_filename(UPLOAD_FORM_FIELD, &blob, &file.name)
        }
    }
    .map_err(|err| js_error("failed to attach file", err))?;
    Ok(form)
}

// `fetch` cannot report upload progress, so uploads go through XHR. JS callbacks feed one
// channel that this future drains; `on_progress` is only ever called from Rust.
pub async fn upload_file(
    url: &str,
    file: &UploadFile,
    on_progress: &dyn Fn(TransferProgress),
) -> Result<(), ServiceError> {
    let network = |message: String| ServiceError::Network {
        url: url.to_string(),
        message,
    };

    let form = build_form(file).map_err(network)?;
    let xhr = web_sys::XmlHttpRequest::new()
        .map_err(|err| network(js_error("failed to create request", err)))?;
    xhr.open_with_async("POST", url, true)
        .map_err(|err| network(js_error("failed to open request", err)))?;
    let upload = xhr
        .upload()
        .map_err(|err| network(js_error("upload channel unavailable", err)))?;

    let (tx, mut rx) = mpsc::unbounded::<XhrEvent>();

    let progress_tx = tx.clone();
    let on_upload_progress = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(
        move |event: web_sys::ProgressEvent| {
            if !event.length_computable() {
                return;
            }
            let sample = TransferProgress::new(event.loaded() as u64, event.total() as u64);
            let _ = progress_tx.unbounded_send(XhrEvent::Progress(sample));
        },
    ));
    upload.set_onprogress(Some(on_upload_progress.as_ref().unchecked_ref()));

    let load_tx = tx.clone();
    let load_xhr = xhr.clone();
    let load_url = url.to_string();
    let on_load = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(move |_| {
        let status = load_xhr.status().unwrap_or(0);
        let result = if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(ServiceError::Status {
                url: load_url.clone(),
                status,
            })
        };
        let _ = load_tx.unbounded_send(XhrEvent::Finished(result));
    }));
    xhr.set_onload(Some(on_load.as_ref().unchecked_ref()));

    let error_tx = tx;
    let error_url = url.to_string();
    let on_error = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(move |_| {
        let _ = error_tx.unbounded_send(XhrEvent::Finished(Err(ServiceError::Network {
            url: error_url.clone(),
            message: "upload request failed".to_string(),
        })));
    }));
    xhr.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    xhr.set_onabort(Some(on_error.as_ref().unchecked_ref()));

    let sent = xhr
        .send_with_opt_form_data(Some(&form))
        .map_err(|err| network(js_error("failed to send request", err)));

    let result = match sent {
        Ok(()) => {
            let mut outcome = Err(network("upload was interrupted".to_string()));
            while let Some(event) = rx.next().await {
                match event {
                    XhrEvent::Progress(sample) => on_progress(sample),
                    XhrEvent::Finished(result) => {
                        outcome = result;
                        break;
                    }
                }
            }
            outcome
        }
        Err(err) => Err(err),
    };

    upload.set_onprogress(None);
    xhr.set_onload(None);
    xhr.set_onerror(None);
    xhr.set_onabort(None);
    drop((on_upload_progress, on_load, on_error));
    result
}

pub fn create_object_url(bytes: &[u8], mime_type: &str) -> Result<String, ServiceError> {
    let blob = bytes_to_blob(bytes, mime_type).map_err(ServiceError::Viewer)?;
    web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|err| ServiceError::Viewer(js_error("failed to create object URL", err)))
}

pub fn revoke_object_url(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}

pub fn open_in_new_tab(url: &str) -> Result<(), ServiceError> {
    let window =
        web_sys::window().ok_or_else(|| ServiceError::Viewer("window unavailable".to_string()))?;
    match window.open_with_url_and_target(url, "_blank") {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ServiceError::Viewer(
            "new tab was blocked by the browser".to_string(),
        )),
        Err(err) => Err(ServiceError::Viewer(js_error("failed to open tab", err))),
    }
}

pub fn release_after(release: Box<dyn FnOnce()>, delay: Duration) {
    let Some(window) = web_sys::window() else {
        release();
        return;
    };
    let callback = Closure::once(release);
    let timeout_ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    match window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.as_ref().unchecked_ref(), timeout_ms)
    {
        // The JS timer now owns the callback; it runs exactly once.
        Ok(_) => callback.forget(),
        // Dropping the uncalled closure drops everything `release` owns right away.
        Err(_) => drop(callback),
    }
}
