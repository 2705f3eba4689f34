use std::sync::Arc;

use poem::listener::TcpListener;
use poem::{Endpoint, EndpointExt, Route, Server, get, post};
use tracing::info;

use crate::api_handlers::{download_file, get_files, upload_file};
use crate::storage::Storage;

// Builds the route table with the storage handle attached as shared state.
pub fn routes(storage: Arc<Storage>) -> impl Endpoint {
    Route::new()
        .at("/files", get(get_files))
        .at("/upload_file", post(upload_file))
        .at("/download/:filename", get(download_file))
        .data(storage)
}

// Runs the file-storage server until it is shut down.
pub async fn serve(addr: &str, storage: Storage) -> Result<(), std::io::Error> {
    let storage = Arc::new(storage);
    info!("serving files from {} on {addr}", storage.root().display());

    Server::new(TcpListener::bind(addr.to_string()))
        .run(routes(storage))
        .await
}
