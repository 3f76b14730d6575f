use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rekordbox_tidy::model::{format_seconds, ParsedCatalog, Track};
use rekordbox_tidy::rekordbox::location;
use rekordbox_tidy::{AnalyzerConfig, Outcome, PresetPrompt, Session};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rekordbox-tidy")]
#[command(
    about = "Find lost, duplicate and orphaned tracks in a Rekordbox collection",
    long_about = None
)]
struct Args {
    /// Path to the Rekordbox collection export (rekordbox.xml)
    #[arg(short = 'c', long, global = true)]
    collection: Option<String>,

    /// Audio file extensions for the orphan scan (can be specified multiple times)
    #[arg(long = "extension", global = true)]
    extensions: Vec<String>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Overview of the collection (default)
    Summary,

    /// List all playlists with their folder path
    Playlists,

    /// Tracks that are not in any playlist
    Lost {
        /// Write an m3u8 playlist instead of listing
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Tracks with the same artist and title
    Duplicates {
        /// Write an m3u8 playlist instead of listing
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Tracks that appear more than once in the same playlist
    PlaylistDuplicates,

    /// Write one playlist as m3u8
    ExportPlaylist {
        /// Full playlist name, e.g. "Gigs > 2024 > Warmup"
        name: String,

        /// Output file or directory
        #[arg(short = 'o', long)]
        output: PathBuf,
    },

    /// Audio files in a folder that are not in the collection (folder only, no subfolders)
    Orphans { directory: PathBuf },

    /// Move a file into a KEEP folder next to it
    Keep { file: PathBuf },

    /// Move a file into a DELETE folder next to it
    Delete { file: PathBuf },
}

#[derive(Serialize)]
struct TrackRow {
    id: String,
    artist: String,
    title: String,
    duration: Option<String>,
    date_added: Option<NaiveDate>,
    location: String,
}

impl From<&Track> for TrackRow {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id.clone(),
            artist: track.artist.clone(),
            title: track.title.clone(),
            duration: track.total_time_seconds().map(format_seconds),
            date_added: track.date_added(),
            location: location::for_display(&track.location),
        }
    }
}

#[derive(Serialize)]
struct Summary<'a> {
    path: &'a std::path::Path,
    version: &'a str,
    format_version: &'a str,
    tracks: usize,
    playlists: usize,
    lost_tracks: usize,
    duplicate_pairs: usize,
    playlists_with_repeats: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = AnalyzerConfig::new();
    if !args.extensions.is_empty() {
        config = config.with_extensions(args.extensions.clone());
    }

    let command = args.command.unwrap_or(Command::Summary);

    let mut prompt = PresetPrompt::new();
    if let Some(collection) = &args.collection {
        prompt = prompt.with_collection(PathBuf::from(shellexpand::tilde(collection).as_ref()));
    }
    match &command {
        Command::Lost { output: Some(path) }
        | Command::Duplicates { output: Some(path) }
        | Command::ExportPlaylist { output: path, .. } => {
            prompt = prompt.with_save_path(path.clone());
        }
        Command::Orphans { directory } => {
            prompt = prompt.with_directory(directory.clone());
        }
        _ => {}
    }

    let session = Session::new(config, prompt);

    // Quarantine actions work on plain files
    match &command {
        Command::Keep { file } => {
            let moved = session.keep_track_file(file)?;
            println!("{}", moved.display());
            return Ok(());
        }
        Command::Delete { file } => {
            let moved = session.delete_track_file(file)?;
            println!("{}", moved.display());
            return Ok(());
        }
        _ => {}
    }

    if session.open_collection()?.is_canceled() {
        anyhow::bail!("No collection given, use --collection <rekordbox.xml>");
    }
    let catalog = session.catalog()?;
    log::info!(
        "Collection loaded: {} tracks, {} playlists",
        catalog.track_count(),
        catalog.playlist_count()
    );

    match command {
        Command::Summary => print_summary(&catalog, args.json)?,
        Command::Playlists => {
            let names: Vec<&str> = catalog.playlists.iter().map(|p| p.name.as_str()).collect();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&names)?);
            } else {
                for playlist in &catalog.playlists {
                    println!("{} ({} tracks)", playlist.name, playlist.len());
                }
            }
        }
        Command::Lost { output } => {
            if output.is_some() {
                report_saved(session.download_lost_tracks_playlist()?);
            } else {
                print_tracks(catalog.unreferenced_tracks.iter(), args.json)?;
            }
        }
        Command::Duplicates { output } => {
            if output.is_some() {
                report_saved(session.download_duplicate_tracks_playlist()?);
            } else if args.json {
                let pairs: Vec<[TrackRow; 2]> = catalog
                    .duplicate_pairs
                    .iter()
                    .map(|p| [TrackRow::from(&p.current), TrackRow::from(&p.first_seen)])
                    .collect();
                println!("{}", serde_json::to_string_pretty(&pairs)?);
            } else {
                for pair in &catalog.duplicate_pairs {
                    println!("{}", pair.current.display_name());
                    println!("  {}", location::for_display(&pair.current.location));
                    println!("  {}", location::for_display(&pair.first_seen.location));
                }
            }
        }
        Command::PlaylistDuplicates => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&catalog.playlist_duplicates)?);
            } else {
                for entry in catalog.playlist_duplicates.iter() {
                    println!("{}", entry.playlist);
                    for duplicate in &entry.duplicates {
                        println!("  {}", duplicate);
                    }
                }
            }
        }
        Command::ExportPlaylist { name, .. } => {
            report_saved(session.download_playlist(&name)?);
        }
        Command::Orphans { directory } => {
            let orphans = match session.find_orphan_files()? {
                Outcome::Done(orphans) => orphans,
                Outcome::Canceled => return Ok(()),
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&orphans)?);
            } else {
                println!("{} orphan files in {}", orphans.len(), directory.display());
                for orphan in &orphans {
                    println!("{} ({} bytes)", orphan.path.display(), orphan.size);
                }
            }
        }
        Command::Keep { .. } | Command::Delete { .. } => {}
    }

    Ok(())
}

fn print_summary(catalog: &ParsedCatalog, json: bool) -> Result<()> {
    let summary = Summary {
        path: &catalog.path,
        version: &catalog.version,
        format_version: &catalog.format_version,
        tracks: catalog.track_count(),
        playlists: catalog.playlist_count(),
        lost_tracks: catalog.unreferenced_tracks.len(),
        duplicate_pairs: catalog.duplicate_pairs.len(),
        playlists_with_repeats: catalog.playlist_duplicates.len(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary).context("Failed to encode summary")?);
        return Ok(());
    }

    println!("Collection:             {}", summary.path.display());
    println!("Exported by:            {} {}", catalog.product.name, summary.version);
    println!("Tracks:                 {}", summary.tracks);
    println!("Playlists:              {}", summary.playlists);
    println!("Not in any playlist:    {}", summary.lost_tracks);
    println!("Probable duplicates:    {}", summary.duplicate_pairs);
    println!("Playlists with repeats: {}", summary.playlists_with_repeats);
    Ok(())
}

fn print_tracks<'a>(tracks: impl Iterator<Item = &'a Track>, json: bool) -> Result<()> {
    let rows: Vec<TrackRow> = tracks.map(TrackRow::from).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in &rows {
        let duration = row.duration.as_deref().unwrap_or("-");
        let added = row
            .date_added
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{} - {}  [{}]  added {}", row.artist, row.title, duration, added);
        println!("  {}", row.location);
    }
    Ok(())
}

fn report_saved(outcome: Outcome<PathBuf>) {
    match outcome {
        Outcome::Done(path) => println!("Playlist saved to {}", path.display()),
        Outcome::Canceled => log::warn!("Dialogue canceled"),
    }
}
