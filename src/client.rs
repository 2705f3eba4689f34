use std::path::{Path, PathBuf};

use reqwest::StatusCode;
use reqwest::multipart;
use tracing::{debug, error};

use crate::error::{Error, Result};

// One entry of the rendered file list: the server-reported filename (used
// as both label and save-name) and the download URL it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLink {
    pub filename: String,
    pub href: String,
}

// Outcome of a completed upload. Any completed HTTP response counts as a
// finished upload; the status is recorded so callers can still tell an
// accepted upload from a rejected one.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub status: StatusCode,
    pub body: String,
}

// Client for the file-storage service. Holds the base URL and a reqwest
// client; every operation is a single request with no retries.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, http: reqwest::Client::new() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // The filename is trusted as-is; it is an opaque identifier the server
    // itself handed out.
    pub fn download_url(&self, filename: &str) -> String {
        format!("{}/download/{filename}", self.base_url)
    }

    // Fetches the stored filenames as the server reports them.
    pub async fn list_files(&self) -> Result<Vec<String>> {
        let files = self
            .http
            .get(format!("{}/files", self.base_url))
            .send()
            .await?
            .json::<Vec<String>>()
            .await?;
        Ok(files)
    }

    // Fetches the file list and renders one download link per filename, in
    // server order. A failed request or a body that is not a JSON string
    // array yields an empty list; the error is logged, never propagated.
    pub async fn fetch_file_links(&self) -> Vec<FileLink> {
        match self.list_files().await {
            Ok(names) => names
                .into_iter()
                .map(|filename| FileLink {
                    href: self.download_url(&filename),
                    filename,
                })
                .collect(),
            Err(err) => {
                error!("fetching file list failed: {err}");
                Vec::new()
            }
        }
    }

    // Uploads one file as multipart form field "file", keeping its original
    // filename. Aborts before any network I/O when `path` does not name an
    // existing file. Transport failures surface as Err; everything the
    // server answered, success status or not, comes back as an outcome.
    pub async fn upload_file(&self, path: &Path) -> Result<UploadOutcome> {
        if !path.is_file() {
            return Err(Error::NoFileSelected);
        }

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file.bin".to_string());
        let data = tokio::fs::read(path).await?;

        let part = multipart::Part::bytes(data).file_name(filename);
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/upload_file", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("upload acknowledged with {status}: {body}");

        Ok(UploadOutcome { status, body })
    }

    // Fetches one stored file and writes it into `dest_dir`, named after
    // the link. The CLI counterpart of following a download link.
    pub async fn download_file(&self, filename: &str, dest_dir: &Path) -> Result<PathBuf> {
        let response = self.http.get(self.download_url(filename)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(filename.to_string()));
        }

        let data = response.error_for_status()?.bytes().await?;

        let save_name = Path::new(filename)
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("file.bin"));
        let dest = dest_dir.join(save_name);
        tokio::fs::write(&dest, &data).await?;
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let client = ApiClient::new("http://localhost:8080//");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn download_url_joins_base_and_name() {
        let client = ApiClient::new("http://localhost:8080");
        assert_eq!(
            client.download_url("a.txt"),
            "http://localhost:8080/download/a.txt"
        );
    }
}
