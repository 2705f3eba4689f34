pub mod file_handlers;

pub use file_handlers::{download_file, get_files, upload_file};
