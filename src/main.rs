use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use filedrop::{ApiClient, Error, Storage, server};

// Must match the address the server actually listens on; override per
// deployment with --base-url.
const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Parser)]
#[command(name = "filedrop", about = "Share files through a small upload/download server.")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the file-storage server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        addr: String,
        /// Directory uploaded files are stored in
        #[arg(long, default_value = "uploads")]
        dir: PathBuf,
    },
    /// List the stored files with their download links
    List {
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },
    /// Upload one file
    Upload {
        /// File to send
        file: PathBuf,
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },
    /// Download a stored file
    Download {
        /// Filename as shown by `list`
        filename: String,
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
        /// Directory the file is saved into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    run(Cli::parse()).await
}

async fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Serve { addr, dir } => {
            if let Err(err) = server::serve(&addr, Storage::new(dir)).await {
                error!("server error: {err}");
                return ExitCode::FAILURE;
            }
        }
        Command::List { base_url } => {
            let client = ApiClient::new(base_url);
            for link in client.fetch_file_links().await {
                println!("{}\t{}", link.filename, link.href);
            }
        }
        Command::Upload { file, base_url } => {
            let client = ApiClient::new(base_url);
            match client.upload_file(&file).await {
                Ok(outcome) => {
                    info!("server replied {}: {}", outcome.status, outcome.body);
                    println!("Upload complete!");
                }
                Err(Error::NoFileSelected) => {
                    eprintln!("Select a file first!");
                    return ExitCode::FAILURE;
                }
                Err(err) => {
                    error!("upload request failed: {err}");
                    eprintln!("Upload failed!");
                    return ExitCode::FAILURE;
                }
            }
        }
        Command::Download { filename, base_url, out_dir } => {
            let client = ApiClient::new(base_url);
            match client.download_file(&filename, &out_dir).await {
                Ok(dest) => println!("Saved {}", dest.display()),
                Err(err) => {
                    error!("download request failed: {err}");
                    eprintln!("Download failed!");
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    ExitCode::SUCCESS
}
