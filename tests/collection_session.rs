use rekordbox_tidy::model::Track;
use rekordbox_tidy::rekordbox::location;
use rekordbox_tidy::{AnalyzerConfig, Outcome, PresetPrompt, Session, TidyError};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Build a collection export with the given TRACK lines and playlist NODE lines
fn collection_xml(tracks: &[String], nodes: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<DJ_PLAYLISTS Version="1.0.0">
  <PRODUCT Name="rekordbox" Version="6.8.0" Company="AlphaTheta"/>
  <COLLECTION Entries="{}">
    {}
  </COLLECTION>
  <PLAYLISTS>
    <NODE Type="0" Name="ROOT" Count="1">
      {}
    </NODE>
  </PLAYLISTS>
</DJ_PLAYLISTS>"#,
        tracks.len(),
        tracks.join("\n    "),
        nodes
    )
}

fn track_xml(id: &str, artist: &str, title: &str, path: &Path) -> String {
    format!(
        r#"<TRACK TrackID="{}" Name="{}" Artist="{}" TotalTime="240" Location="{}"/>"#,
        id,
        title,
        artist,
        location::encode(path)
    )
}

fn session_with(prompt: PresetPrompt) -> Session<PresetPrompt> {
    Session::new(AnalyzerConfig::new(), prompt)
}

fn ids(tracks: &[Track]) -> Vec<&str> {
    tracks.iter().map(|t| t.id.as_str()).collect()
}

#[test]
fn test_unreferenced_tracks_view() {
    let xml = collection_xml(
        &[
            track_xml("A", "Artist", "Alone", Path::new("/music/a.mp3")),
            track_xml("B", "Artist", "Busy", Path::new("/music/b.mp3")),
        ],
        r#"<NODE Name="Set 1" Type="1" KeyType="0" Entries="1"><TRACK Key="B"/></NODE>"#,
    );

    let session = session_with(PresetPrompt::new());
    let catalog = session.load_collection(&xml, Path::new("rekordbox.xml")).unwrap();

    assert_eq!(ids(&catalog.unreferenced_tracks), vec!["A"]);

    // Referenced and unreferenced partition the collection
    let referenced: HashSet<&str> = catalog
        .referenced_tracks()
        .map(|t| t.id.as_str())
        .collect();
    let unreferenced: HashSet<&str> = ids(&catalog.unreferenced_tracks).into_iter().collect();
    assert!(referenced.is_disjoint(&unreferenced));
    assert_eq!(referenced.len() + unreferenced.len(), catalog.track_count());
}

#[test]
fn test_duplicate_pairs_view() {
    let xml = collection_xml(
        &[
            track_xml("1", "DJ X", "Song", Path::new("/music/song.mp3")),
            track_xml("2", "DJ X", "Song", Path::new("/music/song copy.mp3")),
        ],
        "",
    );

    let session = session_with(PresetPrompt::new());
    let catalog = session.load_collection(&xml, Path::new("rekordbox.xml")).unwrap();

    assert_eq!(catalog.duplicate_pairs.len(), 1);
    let pair = &catalog.duplicate_pairs[0];
    let pair_ids: HashSet<&str> = [pair.current.id.as_str(), pair.first_seen.id.as_str()]
        .into_iter()
        .collect();
    assert_eq!(pair_ids, ["1", "2"].into_iter().collect());
}

#[test]
fn test_playlist_duplicate_view() {
    let xml = collection_xml(
        &[
            track_xml("T1", "DJ X", "Song", Path::new("/music/1.mp3")),
            track_xml("T2", "Other", "Tune", Path::new("/music/2.mp3")),
        ],
        r#"<NODE Name="Set 1" Type="1" KeyType="0" Entries="3">
             <TRACK Key="T1"/><TRACK Key="T2"/><TRACK Key="T1"/>
           </NODE>"#,
    );

    let session = session_with(PresetPrompt::new());
    let catalog = session.load_collection(&xml, Path::new("rekordbox.xml")).unwrap();

    let dupes = catalog.playlist_duplicates.get("Set 1").unwrap();
    assert_eq!(dupes.len(), 1);
    assert!(dupes[0].starts_with("3. "));
}

#[test]
fn test_failed_parse_keeps_previous_collection() {
    let xml = collection_xml(&[track_xml("1", "A", "B", Path::new("/m/1.mp3"))], "");
    let session = session_with(PresetPrompt::new());
    session.load_collection(&xml, Path::new("first.xml")).unwrap();

    let err = session.load_collection("<DJ_PLAYLISTS><broken", Path::new("second.xml"));
    assert!(matches!(err, Err(TidyError::Parse(_))));

    let current = session.catalog().unwrap();
    assert_eq!(current.path, PathBuf::from("first.xml"));
    assert_eq!(current.track_count(), 1);
}

#[test]
fn test_open_collection_from_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("rekordbox.xml");
    let xml = collection_xml(&[track_xml("1", "A", "B", Path::new("/m/1.mp3"))], "");
    fs::write(&file, xml).unwrap();

    let session = session_with(PresetPrompt::new().with_collection(file.clone()));
    let catalog = session.open_collection().unwrap().done().unwrap();
    assert_eq!(catalog.path, file);
    assert_eq!(catalog.version, "6.8.0");
}

#[test]
fn test_open_empty_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("empty.xml");
    fs::write(&file, "").unwrap();

    let session = session_with(PresetPrompt::new().with_collection(file));
    assert!(matches!(session.open_collection(), Err(TidyError::Parse(_))));
    assert!(matches!(session.catalog(), Err(TidyError::NoCollectionLoaded)));
}

#[test]
fn test_download_playlist_writes_m3u8() {
    let dir = TempDir::new().unwrap();
    let xml = collection_xml(
        &[
            track_xml("1", "DJ X", "Song", Path::new("/music/Rock & Roll.mp3")),
            track_xml("2", "Other", "Tune", Path::new("/music/tune.mp3")),
        ],
        r#"<NODE Name="Gigs" Type="0" Count="1">
             <NODE Name="Warmup" Type="1" KeyType="0" Entries="3">
               <TRACK Key="2"/><TRACK Key="missing"/><TRACK Key="1"/>
             </NODE>
           </NODE>"#,
    );

    let session = session_with(PresetPrompt::new().with_save_path(dir.path().to_path_buf()));
    session.load_collection(&xml, Path::new("rekordbox.xml")).unwrap();

    let saved = session.download_playlist("Gigs > Warmup").unwrap().done().unwrap();
    assert_eq!(saved, dir.path().join("Gigs _ Warmup.m3u8"));

    let contents = fs::read_to_string(&saved).unwrap();
    assert_eq!(
        contents,
        "#EXTM3U\n\
         #EXTINF:240,Other - Tune\n\
         file://localhost/music/tune.mp3\n\
         #EXTINF:240,DJ X - Song\n\
         file://localhost/music/Rock & Roll.mp3\n"
    );
}

#[test]
fn test_download_unknown_playlist() {
    let xml = collection_xml(&[], r#"<NODE Name="Set 1" Type="1" KeyType="0" Entries="0"/>"#);
    let session = session_with(PresetPrompt::new());
    session.load_collection(&xml, Path::new("rekordbox.xml")).unwrap();

    // Leaf names alone do not match
    assert!(matches!(
        session.download_playlist("Set 2"),
        Err(TidyError::InvalidPlaylistName(_))
    ));
    // Without a save path the prompt cancels
    assert!(session.download_playlist("Set 1").unwrap().is_canceled());
}

#[test]
fn test_download_lost_and_duplicate_playlists() {
    let dir = TempDir::new().unwrap();
    let xml = collection_xml(
        &[
            track_xml("1", "DJ X", "Song", Path::new("/music/1.mp3")),
            track_xml("2", "DJ X", "Song", Path::new("/music/2.mp3")),
            track_xml("3", "Kept", "Track", Path::new("/music/3.mp3")),
        ],
        r#"<NODE Name="Set" Type="1" KeyType="0" Entries="1"><TRACK Key="3"/></NODE>"#,
    );

    let lost_path = dir.path().join("lost.m3u8");
    let session = session_with(PresetPrompt::new().with_save_path(lost_path.clone()));
    session.load_collection(&xml, Path::new("rekordbox.xml")).unwrap();

    assert_eq!(
        session.download_lost_tracks_playlist().unwrap(),
        Outcome::Done(lost_path.clone())
    );
    let lost = fs::read_to_string(&lost_path).unwrap();
    assert!(lost.contains("file://localhost/music/1.mp3"));
    assert!(lost.contains("file://localhost/music/2.mp3"));
    assert!(!lost.contains("3.mp3"));

    session.download_duplicate_tracks_playlist().unwrap();
    let dupes = fs::read_to_string(&lost_path).unwrap();
    let locations: Vec<&str> = dupes.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(
        locations,
        vec!["file://localhost/music/2.mp3", "file://localhost/music/1.mp3"]
    );
}

#[test]
fn test_orphan_scan() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("track.mp3"), b"orphan audio").unwrap();
    fs::write(dir.path().join("known.mp3"), b"known").unwrap();
    fs::write(dir.path().join("notes.txt"), b"text").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("deep.mp3"), b"deep").unwrap();

    let xml = collection_xml(&[track_xml("1", "A", "B", &dir.path().join("known.mp3"))], "");
    let session = session_with(PresetPrompt::new().with_directory(dir.path().to_path_buf()));
    session.load_collection(&xml, Path::new("rekordbox.xml")).unwrap();

    let orphans = session.find_orphan_files().unwrap().done().unwrap();
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].path, dir.path().join("track.mp3"));
    assert_eq!(orphans[0].size, 12);
}

#[test]
fn test_orphan_scan_canceled() {
    let xml = collection_xml(&[], "");
    let session = session_with(PresetPrompt::new());
    session.load_collection(&xml, Path::new("rekordbox.xml")).unwrap();
    assert!(session.find_orphan_files().unwrap().is_canceled());
}

#[test]
fn test_keep_and_delete_actions() {
    let dir = TempDir::new().unwrap();
    let music = dir.path().join("music");
    fs::create_dir(&music).unwrap();
    fs::write(music.join("a.mp3"), b"a").unwrap();
    fs::write(music.join("b.mp3"), b"b").unwrap();

    // No collection needed for quarantine
    let session = session_with(PresetPrompt::new());

    let kept = session.keep_track_file(&music.join("a.mp3")).unwrap();
    assert_eq!(kept, music.join("KEEP").join("a.mp3"));
    assert!(kept.exists());
    assert!(!music.join("a.mp3").exists());

    let deleted = session.delete_track_file(&music.join("b.mp3")).unwrap();
    assert_eq!(deleted, music.join("DELETE").join("b.mp3"));
    assert!(deleted.exists());
    assert!(!music.join("b.mp3").exists());
}
