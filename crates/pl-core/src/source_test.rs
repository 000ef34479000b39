use super::*;
use std::fs;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_input() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path();
    write(
        &base.join("song_data/A/B/C/TRABCEI128F424C983.json"),
        r#"{"num_songs": 1, "artist_id": "AR1", "artist_name": "Elena", "song_id": "SO1", "title": "Setanta matins", "duration": 269.58, "year": 0}"#,
    );
    write(
        &base.join("song_data/A/A/B/TRAABJL12903CDCF1A.json"),
        r#"{"artist_id": "AR2", "artist_name": "Dwight Yoakam", "song_id": "SO2", "title": "You're The One", "duration": 239.3}"#,
    );
    write(
        &base.join("log_data/2018/11/2018-11-01-events.json"),
        concat!(
            r#"{"artist":null,"page":"Home","ts":1541105830796,"userId":"39"}"#,
            "\n",
            r#"{"artist":"Elena","song":"Setanta matins","page":"NextSong","ts":1541106106796,"userId":"8","sessionId":139}"#,
            "\n"
        ),
    );
    dir
}

#[test]
fn test_discover_files_sorted() {
    let dir = sample_input();
    let files = discover_files(dir.path(), "song_data/*/*/*/*.json").unwrap();
    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("song_data/A/A/B/TRAABJL12903CDCF1A.json"));
    assert!(files[1].ends_with("song_data/A/B/C/TRABCEI128F424C983.json"));
}

#[test]
fn test_read_catalog_and_events() {
    let dir = sample_input();
    let layout = InputLayout::default();

    let catalog = read_catalog(dir.path(), &layout).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog[0].song_id.as_deref(), Some("SO2"));
    assert_eq!(catalog[1].artist_name.as_deref(), Some("Elena"));

    let events = read_events(dir.path(), &layout).unwrap();
    assert_eq!(events.len(), 2);
    assert!(!events[0].is_play());
    assert!(events[1].is_play());
    assert_eq!(events[1].session_id, Some(139));
}

#[test]
fn test_concatenated_objects_in_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("multi.json");
    fs::write(&path, r#"{"song_id": "S1"} {"song_id": "S2"}{"song_id": "S3"}"#).unwrap();

    let records: Vec<CatalogRecord> = read_file(&path).unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.song_id.as_deref().unwrap()).collect();
    assert_eq!(ids, vec!["S1", "S2", "S3"]);
}

#[test]
fn test_top_level_array_is_flattened() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("array.json");
    fs::write(
        &path,
        "[{\"song_id\": \"S1\"}, {\"song_id\": \"S2\"}]\n{\"song_id\": \"S3\"}\n[]",
    )
    .unwrap();

    let records: Vec<CatalogRecord> = read_file(&path).unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.song_id.as_deref().unwrap()).collect();
    assert_eq!(ids, vec!["S1", "S2", "S3"]);
}

#[test]
fn test_mistyped_field_inside_array_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    fs::write(&path, r#"[{"page": "NextSong", "ts": 1}, {"ts": "soon"}]"#).unwrap();

    let err = read_file::<EventRecord>(&path).unwrap_err();
    match err {
        CoreError::SourceRead { path, .. } => assert!(path.ends_with("events.json")),
        other => panic!("expected SourceRead, got {other:?}"),
    }
}

#[test]
fn test_no_matching_files_is_empty_not_error() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = read_catalog(dir.path(), &InputLayout::default()).unwrap();
    assert!(catalog.is_empty());
    let events = read_events(dir.path(), &InputLayout::default()).unwrap();
    assert!(events.is_empty());
}

#[test]
fn test_malformed_json_is_fatal_with_path() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("log_data/2018/11/broken.json"),
        "{\"page\": \"NextSong\"\n{not json",
    );
    let err = read_events(dir.path(), &InputLayout::default()).unwrap_err();
    match err {
        CoreError::SourceRead { path, .. } => assert!(path.ends_with("broken.json")),
        other => panic!("expected SourceRead, got {other:?}"),
    }
}

#[test]
fn test_mistyped_field_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("log_data/2018/11/typed.json"),
        r#"{"page": "NextSong", "ts": "yesterday"}"#,
    );
    let err = read_events(dir.path(), &InputLayout::default()).unwrap_err();
    assert!(matches!(err, CoreError::SourceRead { .. }));
}

#[test]
fn test_base_with_glob_metacharacters() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("in[put]");
    write(&base.join("song_data/a/b/c/x.json"), r#"{"song_id": "S1"}"#);
    let files = discover_files(&base, "song_data/*/*/*/*.json").unwrap();
    assert_eq!(files.len(), 1);
}
