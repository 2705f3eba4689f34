use std::sync::Arc;

use poem::http::{HeaderValue, StatusCode};
use poem::web::{Data, Json, Multipart, Path};
use poem::{IntoResponse, Response, handler};
use tracing::{error, info};

use crate::storage::Storage;

// Sends a JSON response with all the stored filenames.
//
// Arguments: takes the shared storage handle injected by poem.
// Returns: a JSON array of filename strings, or 500 if the storage
// directory could not be read.
#[handler]
pub async fn get_files(db: Data<&Arc<Storage>>) -> poem::Result<Json<Vec<String>>, StatusCode> {
    let storage = db.as_ref();
    let files = storage.list().await.map_err(|err| {
        error!("listing stored files failed: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(files))
}

// Handles the file upload endpoint.
//
// Arguments: takes multipart form data and the shared storage handle.
// Returns: a text acknowledgment naming the stored file.
//
// We loop over the multipart fields looking for the one named "file".
// The filename is taken from the field, defaulting to file.bin when the
// client sent none, and the bytes are written to the storage directory.
// A request without a "file" field is a bad request.
#[handler]
pub async fn upload_file(
    mut multipart: Multipart,
    db: Data<&Arc<Storage>>,
) -> poem::Result<String, StatusCode> {
    let storage = db.as_ref();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .map(ToString::to_string)
                .unwrap_or_else(|| "file.bin".to_string());

            let data = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;

            let stored = storage.save(&filename, &data).await.map_err(|err| {
                error!("storing upload {filename} failed: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            })?;

            info!("stored upload {stored} ({} bytes)", data.len());
            return Ok(format!("Uploaded {stored}"));
        }
    }

    Err(StatusCode::BAD_REQUEST)
}

// Handles the download of a stored file.
//
// Arguments: takes the filename path segment and the shared storage handle.
// Returns: the raw bytes as application/octet-stream, with a
// Content-Disposition header so a browser saves the file under its own name.
// Unknown names are 404.
#[handler]
pub async fn download_file(
    Path(filename): Path<String>,
    db: Data<&Arc<Storage>>,
) -> poem::Result<Response, StatusCode> {
    match db.read(&filename).await {
        Ok(Some(data)) => {
            let content_disposition = format!("attachment; filename=\"{filename}\"");

            let mut response = data.into_response();
            response.headers_mut().insert(
                "Content-Disposition",
                HeaderValue::from_str(&content_disposition).map_err(|_| StatusCode::BAD_REQUEST)?,
            );
            response.headers_mut().insert(
                "Content-Type",
                HeaderValue::from_static("application/octet-stream"),
            );

            Ok(response)
        }
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(err) => {
            error!("reading stored file {filename} failed: {err}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
