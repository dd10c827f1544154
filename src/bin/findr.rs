use std::{
    env, fs, io,
    io::Write,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Duration,
};

use bytes::Bytes;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::info;
use tracing_subscriber::EnvFilter;

use findr::{
    ApiClient, ClientSettings, ConfigError, DetailsPhoto, Flickr, Photo, PhotoDetailResult,
    PhotoSearchResult, PhotoSize, SearchPhoto, callback_context, flickr::API_KEY_VAR,
};

const ENV_TEMPLATE: &str = "# Flickr API key, see https://www.flickr.com/services/apps/create/\nFLICKR_API_KEY=\n";

#[derive(Debug, Error)]
enum Error {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Api(#[from] findr::ApiError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("could not read {}: {}", .0.display(), .1)]
    ReadingConfig(PathBuf, #[source] serde_json::Error),

    #[error("could not load environment file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    #[error("could not set up the HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not write JSON output: {0}")]
    Output(#[source] serde_json::Error),

    #[error("no configuration directory found, pass --config-dir")]
    NoConfigDir,

    #[error("Set FLICKR_API_KEY in {} before proceeding", .0.display())]
    RequiresConfigure(PathBuf),
}

type Result<T> = core::result::Result<T, Error>;

/// Search Flickr for photos.
#[derive(Debug, Parser)]
#[command(name = "findr", version)]
struct Cli {
    /// Directory holding `.env` and `config.json`
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search photos by keyword
    Search {
        #[arg(required = true)]
        term: Vec<String>,

        /// Save every result into the download folder
        #[arg(long)]
        download: bool,

        /// Image size to link and download [thumbnail, small, medium, large]
        #[arg(long)]
        size: Option<PhotoSize>,
    },

    /// Show a single photo
    Details {
        id: String,

        secret: String,

        /// Save the photo into the download folder
        #[arg(long)]
        download: bool,

        /// Image size to link and download [thumbnail, small, medium, large]
        #[arg(long)]
        size: Option<PhotoSize>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct Config {
    folder: PathBuf,
    size: PhotoSize,
    timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        let folder = dirs::picture_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(env::temp_dir)
            .join("findr");

        Self {
            folder,
            size: PhotoSize::default(),
            timeout_secs: None,
        }
    }
}

impl Config {
    fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            timeout: self.timeout_secs.map(Duration::from_secs),
            user_agent: Some(concat!("findr/", env!("CARGO_PKG_VERSION")).to_owned()),
        }
    }
}

/// Everything `run` needs from the config folder.
#[derive(Debug)]
struct Setup {
    config: Config,
    api_key: String,
}

/// Loads the config folder, creating whatever is missing.
///
/// A key already set in the process environment takes precedence over the one
/// in `.env`. A blank key counts as unset.
fn configure<P: AsRef<Path>>(config_folder: P, env_key: Option<String>) -> Result<Setup> {
    let config_folder = config_folder.as_ref();

    if !config_folder.exists() {
        fs::create_dir_all(config_folder)?;
    }

    let env_path = config_folder.join(".env");
    let file_key = if env_path.exists() {
        read_api_key(&env_path)?
    } else {
        None
    };

    let api_key = [env_key, file_key]
        .into_iter()
        .flatten()
        .map(|key| key.trim().to_owned())
        .find(|key| !key.is_empty());
    let Some(api_key) = api_key else {
        if !env_path.exists() {
            fs::write(&env_path, ENV_TEMPLATE)?;
        }

        return Err(Error::RequiresConfigure(env_path));
    };

    let config_path = config_folder.join("config.json");
    let config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;

        serde_json::from_str(&content).map_err(|err| Error::ReadingConfig(config_path, err))?
    } else {
        let config = Config::default();
        let content = serde_json::to_string_pretty(&config).map_err(io::Error::from)?;
        fs::write(&config_path, content)?;

        eprintln!(
            "You can change the default options for downloading photos in {}",
            config_path.display()
        );

        config
    };

    Ok(Setup { config, api_key })
}

fn read_api_key(env_path: &Path) -> Result<Option<String>> {
    for entry in dotenvy::from_path_iter(env_path)? {
        let (key, value) = entry?;
        if key == API_KEY_VAR {
            return Ok(Some(value));
        }
    }

    Ok(None)
}

async fn download_photos<P>(client: &ApiClient, folder: &Path, photos: Vec<P>, size: PhotoSize) -> Result<()>
where
    P: Photo + Send + 'static,
{
    let mut tasks = JoinSet::<findr::Result<(P, Bytes)>>::new();
    for photo in photos {
        let client = client.clone();

        tasks.spawn(async move {
            let data = client.fetch_image(&photo, size).await?;

            Ok((photo, data))
        });
    }

    fs::create_dir_all(folder)?;

    let photos = tasks.join_all().await;
    for photo in photos {
        let (photo, data) = photo?;

        let path = folder.join(format!("{}_{}.jpg", photo.id(), size.code()));
        info!(path = %path.display(), bytes = data.len(), "saved photo");

        fs::write(&path, &data)?;
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut output = stdout.lock();
    serde_json::to_writer_pretty(&mut output, value).map_err(Error::Output)?;
    writeln!(output)?;

    Ok(())
}

fn print_search(result: &PhotoSearchResult, size: PhotoSize) {
    if result.photos.is_empty() {
        println!("No photos found");
    }

    for (index, photo) in result.photos.iter().enumerate() {
        let title = if photo.title().is_empty() {
            "(untitled)"
        } else {
            photo.title()
        };
        println!("{:>2}. {title}", index + 1);
        println!("    id {} secret {}", photo.id(), photo.secret());
        println!("    {}", photo.url_string(size));
    }
}

fn print_details(photo: &DetailsPhoto, size: PhotoSize) {
    println!("{}", photo.title());
    if let Some(owner) = photo.owner() {
        if owner.realname.is_empty() {
            println!("by {}", owner.username);
        } else {
            println!("by {} ({})", owner.realname, owner.username);
        }
    }
    if let Some(description) = photo.description() {
        println!();
        println!("{description}");
    }
    println!();
    println!("{}", photo.url_string(size));
}

async fn run(cli: Cli) -> Result<()> {
    let path = match cli.config_dir {
        Some(path) => path,
        None => dirs::config_dir().ok_or(Error::NoConfigDir)?.join("findr"),
    };

    let Setup { config, api_key } = configure(&path, env::var(API_KEY_VAR).ok())?;
    let flickr = Flickr::new(&api_key)?;

    let (callbacks, _queue) = callback_context();
    let client = ApiClient::with_settings(&config.client_settings(), callbacks)?;

    match cli.command {
        Command::Search {
            term,
            download,
            size,
        } => {
            let size = size.unwrap_or(config.size);
            let result: PhotoSearchResult = client.fetch(&flickr.search_photos(&term.join(" "))).await?;

            if cli.json {
                print_json(&result)?;
            } else {
                print_search(&result, size);
            }

            if download {
                download_photos::<SearchPhoto>(&client, &config.folder, result.photos, size).await?;
            }
        }

        Command::Details {
            id,
            secret,
            download,
            size,
        } => {
            let size = size.unwrap_or(config.size);
            let result: PhotoDetailResult = client.fetch(&flickr.get_photo_details(&id, &secret)).await?;

            if cli.json {
                print_json(&result)?;
            } else {
                print_details(&result.photo, size);
            }

            if download {
                download_photos(&client, &config.folder, vec![result.photo], size).await?;
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
