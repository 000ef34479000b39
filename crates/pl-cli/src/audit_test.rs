use super::*;
use pl_core::table::{SONGS, TIME};
use pl_core::{Cell, TableData};
use pl_db::DuckDbBackend;

fn song(id: &str) -> Vec<Cell> {
    vec![
        Cell::Varchar(id.to_string()),
        Cell::Null,
        Cell::Null,
        Cell::Null,
        Cell::Null,
    ]
}

async fn write_songs(db: &DuckDbBackend, out: &Path, rows: Vec<Vec<Cell>>) {
    db.load_table(&TableData { spec: &SONGS, rows })
        .await
        .unwrap();
    db.copy_to_parquet(SONGS.name, out, SONGS.partition_by)
        .await
        .unwrap();
}

#[test]
fn test_generate_unique_check() {
    let sql = generate_unique_check("t", "song_id");
    assert!(sql.contains("GROUP BY \"song_id\""));
    assert!(sql.contains("HAVING COUNT(*) > 1"));
}

#[test]
fn test_generate_not_null_check() {
    assert_eq!(
        generate_not_null_check("t", "user_id"),
        "SELECT * FROM t WHERE \"user_id\" IS NULL"
    );
}

#[test]
fn test_text_keys_get_not_empty_check() {
    let dir = tempfile::tempdir().unwrap();
    let kinds: Vec<CheckKind> = checks_for(&SONGS, dir.path())
        .into_iter()
        .map(|c| c.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![CheckKind::Unique, CheckKind::NotNull, CheckKind::NotEmpty]
    );

    let kinds: Vec<CheckKind> = checks_for(&TIME, dir.path())
        .into_iter()
        .map(|c| c.kind)
        .collect();
    assert_eq!(kinds, vec![CheckKind::Unique, CheckKind::NotNull]);
}

#[test]
fn test_check_name() {
    let dir = tempfile::tempdir().unwrap();
    let checks = checks_for(&SONGS, dir.path());
    assert_eq!(checks[0].name(), "unique_songs_table_song_id");
}

#[tokio::test]
async fn test_clean_artifact_passes() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join(SONGS.name);
    let db = DuckDbBackend::in_memory().unwrap();
    write_songs(&db, &out, vec![song("SO1"), song("SO2")]).await;

    let results = run_checks(&db, checks_for(&SONGS, &out)).await;
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(AuditResult::passed));
}

#[tokio::test]
async fn test_duplicate_and_empty_keys_fail() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join(SONGS.name);
    let db = DuckDbBackend::in_memory().unwrap();
    write_songs(&db, &out, vec![song("SO1"), song("SO1"), song("")]).await;

    let results = run_checks(&db, checks_for(&SONGS, &out)).await;
    let failed: Vec<CheckKind> = results
        .iter()
        .filter(|r| !r.passed())
        .map(|r| r.check.kind)
        .collect();
    assert_eq!(failed, vec![CheckKind::Unique, CheckKind::NotEmpty]);
    assert_eq!(results[0].failure_count, 1);
}

#[tokio::test]
async fn test_missing_artifact_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let db = DuckDbBackend::in_memory().unwrap();

    let results = run_checks(&db, checks_for(&SONGS, &dir.path().join("absent"))).await;
    assert!(results.iter().all(|r| r.error.is_some() && !r.passed()));
}
