use super::*;

fn unsupported() -> ServiceError {
    ServiceError::Unavailable("file storage API")
}

pub async fn list_files(_url: &str) -> Result<Vec<RemoteFileEntry>, ServiceError> {
    Err(unsupported())
}

pub async fn upload_file(
    _url: &str,
    _file: &UploadFile,
    _on_progress: &dyn Fn(TransferProgress),
) -> Result<(), ServiceError> {
    Err(unsupported())
}

pub async fn download_file(_url: &str) -> Result<Vec<u8>, ServiceError> {
    Err(unsupported())
}

pub fn create_object_url(_bytes: &[u8], _mime_type: &str) -> Result<String, ServiceError> {
    Err(ServiceError::Unavailable("object URLs"))
}

pub fn revoke_object_url(_url: &str) {}

pub fn open_in_new_tab(_url: &str) -> Result<(), ServiceError> {
    Err(ServiceError::Unavailable("browser windows"))
}

pub fn release_after(release: Box<dyn FnOnce()>, _delay: Duration) {
    release();
}
