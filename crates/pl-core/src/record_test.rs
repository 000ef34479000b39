use super::*;

#[test]
fn test_parse_catalog_record() {
    let json = r#"{
        "num_songs": 1,
        "artist_id": "ARJIE2Y1187B994AB7",
        "artist_latitude": null,
        "artist_longitude": null,
        "artist_location": "",
        "artist_name": "Line Renaud",
        "song_id": "SOUPIRU12A6D4FA1E1",
        "title": "Der Kleine Dompfaff",
        "duration": 152.92036,
        "year": 0
    }"#;
    let record: CatalogRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.song_id.as_deref(), Some("SOUPIRU12A6D4FA1E1"));
    assert_eq!(record.artist_name.as_deref(), Some("Line Renaud"));
    assert_eq!(record.artist_location.as_deref(), Some(""));
    assert_eq!(record.artist_latitude, None);
    assert_eq!(record.year, Some(0));
    assert_eq!(record.duration, Some(152.92036));
}

#[test]
fn test_catalog_missing_fields_are_none() {
    let record: CatalogRecord = serde_json::from_str(r#"{"title": "Only Title"}"#).unwrap();
    assert_eq!(record.title.as_deref(), Some("Only Title"));
    assert!(record.song_id.is_none());
    assert!(record.duration.is_none());
}

#[test]
fn test_catalog_integer_coordinates_accepted() {
    let record: CatalogRecord =
        serde_json::from_str(r#"{"artist_latitude": 35, "artist_longitude": -90}"#).unwrap();
    assert_eq!(record.artist_latitude, Some(35.0));
    assert_eq!(record.artist_longitude, Some(-90.0));
}

#[test]
fn test_catalog_mistyped_field_is_error() {
    let result: Result<CatalogRecord, _> = serde_json::from_str(r#"{"year": "nineteen"}"#);
    assert!(result.is_err());
}

#[test]
fn test_parse_event_record_camel_case() {
    let json = r#"{"artist":"Des'ree","auth":"Logged In","firstName":"Kaylee","gender":"F",
        "itemInSession":1,"lastName":"Summers","length":246.30812,"level":"free",
        "location":"Phoenix-Mesa-Scottsdale, AZ","method":"PUT","page":"NextSong",
        "registration":1540344794796.0,"sessionId":139,"song":"You Gotta Be","status":200,
        "ts":1541106106796,"userAgent":"Mozilla/5.0","userId":"8"}"#;
    let event: EventRecord = serde_json::from_str(json).unwrap();
    assert_eq!(event.user_id, Some(RawUserId::Text("8".to_string())));
    assert_eq!(event.first_name.as_deref(), Some("Kaylee"));
    assert_eq!(event.session_id, Some(139));
    assert_eq!(event.user_agent.as_deref(), Some("Mozilla/5.0"));
    assert_eq!(event.ts, Some(1541106106796));
    assert!(event.is_play());
    assert_eq!(event.user_id(), UserId::Valid(8));
}

#[test]
fn test_parse_event_record_snake_case_alias() {
    let json = r#"{"user_id": 42, "first_name": "Ada", "session_id": 7, "page": "Home"}"#;
    let event: EventRecord = serde_json::from_str(json).unwrap();
    assert_eq!(event.user_id, Some(RawUserId::Int(42)));
    assert_eq!(event.first_name.as_deref(), Some("Ada"));
    assert_eq!(event.session_id, Some(7));
    assert!(!event.is_play());
}

#[test]
fn test_event_null_song_and_artist() {
    let json = r#"{"page": "NextSong", "song": null, "artist": null, "ts": 1}"#;
    let event: EventRecord = serde_json::from_str(json).unwrap();
    assert!(event.song.is_none());
    assert!(event.artist.is_none());
}

#[test]
fn test_user_id_coercion() {
    assert_eq!(UserId::coerce(None), UserId::Absent);
    assert_eq!(
        UserId::coerce(Some(&RawUserId::Text(String::new()))),
        UserId::Absent
    );
    assert_eq!(
        UserId::coerce(Some(&RawUserId::Text(" 26 ".to_string()))),
        UserId::Valid(26)
    );
    assert_eq!(UserId::coerce(Some(&RawUserId::Int(97))), UserId::Valid(97));
    assert_eq!(
        UserId::coerce(Some(&RawUserId::Text("guest".to_string()))),
        UserId::Invalid
    );
    assert_eq!(UserId::Invalid.valid(), None);
    assert_eq!(UserId::Valid(3).valid(), Some(3));
}

#[test]
fn test_start_time_keeps_milliseconds() {
    let event = EventRecord {
        ts: Some(1541106106796),
        ..Default::default()
    };
    let start = event.start_time().unwrap();
    assert_eq!(start.timestamp(), 1541106106);
    assert_eq!(start.timestamp_subsec_millis(), 796);
}

#[test]
fn test_start_time_absent_or_out_of_range() {
    assert!(EventRecord::default().start_time().is_none());
    let event = EventRecord {
        ts: Some(i64::MAX),
        ..Default::default()
    };
    assert!(event.start_time().is_none());
}

#[test]
fn test_normalize_key() {
    assert_eq!(normalize_key(Some("A1")), Some("A1"));
    assert_eq!(normalize_key(Some("")), None);
    assert_eq!(normalize_key(None), None);
}
