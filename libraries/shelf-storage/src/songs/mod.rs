use shelf_core::{error::Result, types::*};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn from_row(row: &SqliteRow) -> Track {
    Track::new(
        row.get::<TrackId, _>("id"),
        row.get::<String, _>("title"),
        row.get::<String, _>("file_path"),
    )
}

/// Get all songs in insertion order
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Track>> {
    let rows = sqlx::query("SELECT id, title, file_path FROM songs ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(from_row).collect())
}

/// Get song by ID
pub async fn get_by_id(pool: &SqlitePool, id: TrackId) -> Result<Option<Track>> {
    let row = sqlx::query("SELECT id, title, file_path FROM songs WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(from_row))
}

/// Insert a song and return it with the id `SQLite` assigned
pub async fn create(pool: &SqlitePool, track: NewTrack) -> Result<Track> {
    let result = sqlx::query("INSERT INTO songs (title, file_path) VALUES (?, ?)")
        .bind(&track.title)
        .bind(&track.file_path)
        .execute(pool)
        .await?;

    Ok(Track::new(
        TrackId::new(result.last_insert_rowid()),
        track.title,
        track.file_path,
    ))
}

/// Delete one song; returns rows affected (0 when the id is unknown)
pub async fn delete_by_id(pool: &SqlitePool, id: TrackId) -> Result<u64> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Delete every song; returns rows affected
pub async fn delete_all(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM songs").execute(pool).await?;

    Ok(result.rows_affected())
}

/// Number of songs
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
