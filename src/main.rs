mod api;
mod config;
mod consts;
mod environment;
mod events;
mod logging;
mod pretty;
mod session;
mod ui;
mod workers;

use crate::api::error::ApiError;
use crate::api::types::{DatasetCreated, DatasetEntry};
use crate::api::{ProfileApi, ProfileApiClient};
use crate::config::{Config, get_config_path};
use crate::environment::Environment;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Base URL of the profiling API, overriding DATASCOPE_ENVIRONMENT.
    #[arg(long, global = true, value_name = "URL")]
    url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the profiling dashboard
    Start {
        /// Dataset to profile. Defaults to the saved selection, then to the
        /// most recent dataset on the server.
        #[arg(long, value_name = "DATASET_ID")]
        dataset_id: Option<u64>,

        /// Upload this file first and profile the resulting dataset.
        #[arg(long, value_name = "FILE")]
        upload: Option<PathBuf>,

        /// Dataset name used with --upload. Defaults to the file name.
        #[arg(long, value_name = "NAME")]
        name: Option<String>,

        /// Print a one-shot profile report instead of opening the dashboard.
        #[arg(long)]
        headless: bool,
    },
    /// List the datasets known to the API, most recent first
    List,
    /// Upload a file, creating a new dataset and making it the active one
    Upload {
        /// File to upload.
        file: PathBuf,

        /// Dataset name. Defaults to the file name.
        #[arg(long, value_name = "NAME")]
        name: Option<String>,
    },
    /// Clear the saved dataset selection
    Forget,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let environment = match &args.url {
        Some(url) => Environment::from_url(url),
        None => {
            let environment_str = std::env::var("DATASCOPE_ENVIRONMENT").unwrap_or_default();
            environment_str
                .parse::<Environment>()
                .unwrap_or(Environment::default())
        }
    };

    let config_path = get_config_path()?;
    match args.command {
        Command::Start {
            dataset_id,
            upload,
            name,
            headless,
        } => start(environment, &config_path, dataset_id, upload, name, headless).await,
        Command::List => list(environment).await,
        Command::Upload { file, name } => {
            let client = ProfileApiClient::new(environment);
            let created = upload_dataset(&client, &file, name).await?;
            pretty::print_cmd_info!(
                "Dataset created",
                "id {} ({}) is now the active dataset",
                created.id,
                created.name
            );
            Config::new(created.id.to_string())
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            Ok(())
        }
        Command::Forget => {
            println!("Clearing the saved dataset selection...");
            Config::clear(&config_path).map_err(Into::into)
        }
    }
}

/// Starts the dashboard session.
///
/// # Arguments
/// * `environment` - The API deployment to connect to.
/// * `config_path` - Location of the saved dataset selection.
/// * `dataset_id` - Explicit dataset to profile, if any.
/// * `upload` - File to upload and adopt before profiling.
/// * `name` - Dataset name for the upload.
/// * `headless` - Print a one-shot report instead of opening the TUI.
async fn start(
    environment: Environment,
    config_path: &Path,
    dataset_id: Option<u64>,
    upload: Option<PathBuf>,
    name: Option<String>,
    headless: bool,
) -> Result<(), Box<dyn Error>> {
    let client = ProfileApiClient::new(environment.clone());

    let dataset = if let Some(file) = upload {
        // Upload first, then adopt the new dataset as the active one.
        let created = upload_dataset(&client, &file, name).await?;
        if let Err(e) = Config::new(created.id.to_string()).save(config_path) {
            eprintln!("Warning: failed to save dataset selection: {}", e);
        }
        DatasetEntry {
            id: created.id,
            name: created.name,
            uploaded_at: None,
        }
    } else {
        // If no dataset ID is provided, try to load it from the config file.
        let mut dataset_id = dataset_id;
        if dataset_id.is_none() && config_path.exists() {
            if let Ok(config) = Config::load_from_file(config_path) {
                dataset_id = config.dataset_id();
            }
        }
        match resolve_dataset(&client, dataset_id).await? {
            Some(dataset) => dataset,
            None => {
                pretty::print_no_datasets_help();
                return Ok(());
            }
        }
    };

    if headless {
        run_headless_mode(Box::new(client), &dataset).await
    } else {
        let session = setup_session(Box::new(client), dataset);
        run_tui_mode(session, environment).await
    }
}

/// Resolve the dataset to profile: an explicit id wins, otherwise the most
/// recent dataset on the server (the listing is most-recent-first).
async fn resolve_dataset(
    api: &dyn ProfileApi,
    dataset_id: Option<u64>,
) -> Result<Option<DatasetEntry>, Box<dyn Error>> {
    let datasets = api.list_datasets().await?;
    Ok(match dataset_id {
        Some(id) => match datasets.into_iter().find(|d| d.id == id) {
            Some(entry) => Some(entry),
            // Not in the listing; profile it anyway under its bare id.
            None => Some(DatasetEntry {
                id,
                name: String::new(),
                uploaded_at: None,
            }),
        },
        None => datasets.into_iter().next(),
    })
}

/// Prints the dataset listing.
async fn list(environment: Environment) -> Result<(), Box<dyn Error>> {
    let client = ProfileApiClient::new(environment);
    let datasets = client.list_datasets().await?;
    if datasets.is_empty() {
        pretty::print_no_datasets_help();
        return Ok(());
    }
    println!("{:<8} {:<28} {}", "ID", "NAME", "UPLOADED");
    for dataset in datasets {
        println!(
            "{:<8} {:<28} {}",
            dataset.id,
            dataset.name,
            dataset.uploaded_at.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

/// Uploads a file as a new dataset.
///
/// On failure the server's response body is surfaced verbatim and the
/// active dataset selection stays untouched.
async fn upload_dataset(
    api: &dyn ProfileApi,
    file: &Path,
    name: Option<String>,
) -> Result<DatasetCreated, Box<dyn Error>> {
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.csv")
        .to_string();
    let name = name.unwrap_or_else(|| file_name.clone());
    let contents = tokio::fs::read(file)
        .await
        .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;

    match api.create_dataset(&name, &file_name, contents).await {
        Ok(created) => Ok(created),
        Err(e) => {
            pretty::print_cmd_error!("Upload failed");
            eprintln!("{}", upload_error_message(&e));
            Err(e.into())
        }
    }
}

/// The message shown for a failed upload: for HTTP failures this is the
/// raw response body, e.g. the server's validation text.
fn upload_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Http { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockProfileApi;

    fn entry(id: u64, name: &str) -> DatasetEntry {
        DatasetEntry {
            id,
            name: name.to_string(),
            uploaded_at: Some("2026-08-01T10:00:00".to_string()),
        }
    }

    #[tokio::test]
    /// With no explicit id, the first (most recent) listed dataset becomes
    /// the active one.
    async fn resolve_picks_most_recent_dataset() {
        let mut api = MockProfileApi::new();
        api.expect_list_datasets()
            .times(1)
            .returning(|| Ok(vec![entry(5, "iris"), entry(3, "wine")]));

        let dataset = resolve_dataset(&api, None).await.unwrap().unwrap();
        assert_eq!(dataset.id, 5);
        assert_eq!(dataset.name, "iris");
    }

    #[tokio::test]
    async fn resolve_returns_none_when_server_is_empty() {
        let mut api = MockProfileApi::new();
        api.expect_list_datasets().returning(|| Ok(vec![]));
        assert!(resolve_dataset(&api, None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn resolve_keeps_an_explicit_id_even_when_unlisted() {
        let mut api = MockProfileApi::new();
        api.expect_list_datasets()
            .returning(|| Ok(vec![entry(5, "iris")]));

        let dataset = resolve_dataset(&api, Some(9)).await.unwrap().unwrap();
        assert_eq!(dataset.id, 9);
        assert!(dataset.name.is_empty());
    }

    #[tokio::test]
    /// A rejected upload surfaces the server's response body and leaves the
    /// saved dataset selection unchanged.
    async fn failed_upload_keeps_active_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        Config::new("5".to_string()).save(&config_path).unwrap();

        let file = dir.path().join("data.csv");
        std::fs::write(&file, "a,b\n1,2\n").unwrap();

        let mut api = MockProfileApi::new();
        api.expect_create_dataset().times(1).returning(|_, _, _| {
            Err(ApiError::Http {
                status: 400,
                message: "bad file".to_string(),
            })
        });

        let result = upload_dataset(&api, &file, None).await;
        let error = result.err().expect("upload should fail");
        assert!(error.to_string().contains("bad file"));

        let config = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config.dataset_id(), Some(5));
    }

    #[test]
    fn upload_error_shows_raw_response_body() {
        let error = ApiError::Http {
            status: 400,
            message: "bad file".to_string(),
        };
        assert_eq!(upload_error_message(&error), "bad file");
    }

    #[tokio::test]
    /// The upload name falls back to the file name, as the server would.
    async fn upload_name_defaults_to_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("measurements.csv");
        std::fs::write(&file, "a\n1\n").unwrap();

        let mut api = MockProfileApi::new();
        api.expect_create_dataset()
            .withf(|name, file_name, _| name == "measurements.csv" && file_name == "measurements.csv")
            .times(1)
            .returning(|_, _, _| {
                Ok(DatasetCreated {
                    id: 11,
                    name: "measurements.csv".to_string(),
                })
            });

        let created = upload_dataset(&api, &file, None).await.unwrap();
        assert_eq!(created.id, 11);
    }
}
