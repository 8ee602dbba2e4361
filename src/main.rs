use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use traktor_bridge::jellyfin::{self, JellyfinClient};
use traktor_bridge::stats::ExtensionStats;
use traktor_bridge::{m3u, traktor, ConvertOptions, ConvertPipeline};

#[derive(Parser, Debug)]
#[command(name = "traktor-bridge")]
#[command(about = "Convert Traktor collection playlists to and from M3U", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write every collection playlist as an M3U file
    Export {
        /// Path to collection.nml (newest Traktor install if omitted)
        #[arg(short, long)]
        collection: Option<PathBuf>,

        /// Directory to write playlist files
        #[arg(short, long, default_value = "~/Music")]
        output_dir: String,

        /// Path to be stripped from each entry
        #[arg(short, long)]
        root_path: Option<String>,

        /// Path added at the beginning of each entry, to be used with -r
        #[arg(short, long, default_value = "")]
        path_prefix: String,

        /// Separator to use in decoded paths instead of the OS default
        #[arg(long)]
        separator: Option<String>,

        /// Name files "{folder} {playlist}" to keep same-named playlists apart
        #[arg(long)]
        full_names: bool,

        /// Re-root paths at the user-home segment, dropping volume prefixes
        #[arg(long)]
        normalize_paths: bool,

        /// Print file-extension statistics after writing
        #[arg(short, long)]
        stats: bool,
    },

    /// Insert an M3U playlist into the collection
    Import {
        /// The M3U file to import
        playlist: PathBuf,

        /// Path to collection.nml (newest Traktor install if omitted)
        #[arg(short, long)]
        collection: Option<PathBuf>,

        /// Name for the new playlist (file stem if omitted)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Write a Jellyfin user's favorite tracks as an M3U file
    Favorites {
        /// Jellyfin server URL
        #[arg(long, env = "JELLYFIN_URL")]
        server: String,

        /// Jellyfin API key
        #[arg(long, env = "JELLYFIN_API_KEY")]
        api_key: String,

        /// Jellyfin user id
        #[arg(long, env = "JELLYFIN_USER_ID")]
        user_id: String,

        /// Output playlist file
        #[arg(short, long, default_value = "~/Music/playlists/Favorites.m3u")]
        output: String,

        /// Server-side prefix to strip from each path
        #[arg(short, long)]
        root_path: Option<String>,

        /// Local prefix added after stripping
        #[arg(short, long, default_value = "")]
        path_prefix: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match args.command {
        Command::Export {
            collection,
            output_dir,
            root_path,
            path_prefix,
            separator,
            full_names,
            normalize_paths,
            stats,
        } => {
            let collection = resolve_collection(collection)?;
            let output_dir = PathBuf::from(shellexpand::tilde(&output_dir).as_ref());

            let mut options = ConvertOptions::new()
                .with_path_prefix(path_prefix)
                .with_full_folder_names(full_names)
                .with_platform_normalization(normalize_paths)
                .with_run_flags(args.debug, stats);
            if let Some(root) = root_path {
                options = options.with_root_path_strip(root);
            }
            if let Some(sep) = separator {
                options = options.with_separator(sep);
            }

            let pipeline = ConvertPipeline::new(options);
            let report = pipeline.collection_to_m3u(&collection, &output_dir)?;

            log::info!(
                "Wrote {} playlist files to {:?} ({} system playlists skipped)",
                report.files_written.len(),
                output_dir,
                report.skipped_system
            );

            if stats {
                let mut extension_stats = ExtensionStats::new();
                for playlist in &report.playlists {
                    extension_stats.record(playlist);
                }
                print!("{}", extension_stats.render());
            }
        }

        Command::Import {
            playlist,
            collection,
            name,
        } => {
            let collection = resolve_collection(collection)?;
            let name = match name {
                Some(name) => name,
                None => playlist
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .context("Playlist file has no usable name")?,
            };

            let pipeline = ConvertPipeline::new(ConvertOptions::new());
            let inserted = pipeline.m3u_to_collection(&playlist, &collection, &name)?;
            if inserted == 0 {
                log::warn!("Nothing to import from {:?}", playlist);
            } else {
                log::info!("Playlist '{}' added with {} tracks", name, inserted);
            }
        }

        Command::Favorites {
            server,
            api_key,
            user_id,
            output,
            root_path,
            path_prefix,
        } => {
            let client = JellyfinClient::new(&server, &api_key, &user_id)?;
            let items = client.favorite_tracks()?;
            if items.is_empty() {
                bail!("No favorite music items found");
            }

            let paths = jellyfin::playlist_paths(&items, root_path.as_deref(), &path_prefix);
            if paths.is_empty() {
                bail!("No favorite items carried a library path");
            }

            let output = PathBuf::from(shellexpand::tilde(&output).as_ref());
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {:?}", parent))?;
            }
            m3u::write_file(&output, &paths)?;
            log::info!("Playlist created: {:?} ({} tracks)", output, paths.len());
        }
    }

    Ok(())
}

/// Use the given collection path, or fall back to the newest install.
fn resolve_collection(explicit: Option<PathBuf>) -> Result<PathBuf> {
    let path = match explicit {
        Some(path) => path,
        None => traktor::default_collection_path()
            .context("Traktor folder not found; pass --collection explicitly")?,
    };

    if !path.exists() {
        bail!("collection.nml not found at {:?}", path);
    }
    Ok(path)
}
