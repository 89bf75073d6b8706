use anyhow::Context;
use rusqlite::{Row, params};
use setlist_pagination::encode_path;

use crate::database::DatabaseConnection;

use super::Paged;

/// A song and the number of distinct shows it was played at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongSummary {
    pub id: i64,
    pub title: String,
    pub number_of_shows: i64,
}

impl SongSummary {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            number_of_shows: row.get(2)?,
        })
    }

    /// Path of the page listing every show the song was played at.
    pub fn href(&self) -> String {
        encode_path(["song", self.title.as_str()])
    }

    /// Songs ordered by title. Songs that were never played are listed with
    /// zero shows, so the rows cover the same songs as the total.
    pub async fn list(conn: &DatabaseConnection, limit: i64, offset: i64) -> anyhow::Result<Paged<Self>> {
        let conn = conn.conn();

        let page = conn
            .call(move |c| {
                let total_count: i64 = c.query_row("SELECT COUNT(*) FROM songs", [], |r| r.get(0))?;

                let mut stmt = c.prepare(
                    r#"
                    SELECT
                      songs.id,
                      songs.title,
                      COUNT(DISTINCT shows.id) AS number_of_shows
                    FROM songs
                    LEFT JOIN song_performances ON song_performances.song_id = songs.id
                    LEFT JOIN sets ON sets.id = song_performances.set_id
                    LEFT JOIN shows ON shows.id = sets.show_id
                    GROUP BY songs.id
                    ORDER BY songs.title ASC
                    LIMIT ?1 OFFSET ?2
                    "#,
                )?;

                let rows = stmt
                    .query_map(params![limit, offset], Self::from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;

                Ok(Paged::new(rows, total_count))
            })
            .await
            .context("list songs")?;

        Ok(page)
    }

    /// Songs whose title contains `query`, ignoring case.
    pub async fn search(conn: &DatabaseConnection, query: &str) -> anyhow::Result<Vec<Self>> {
        let conn = conn.conn();
        let pattern = format!("%{}%", query.to_lowercase());

        let songs = conn
            .call(move |c| {
                let mut stmt = c.prepare(
                    r#"
                    SELECT
                      songs.id,
                      songs.title,
                      COUNT(DISTINCT shows.id) AS number_of_shows
                    FROM songs
                    LEFT JOIN song_performances ON song_performances.song_id = songs.id
                    LEFT JOIN sets ON sets.id = song_performances.set_id
                    LEFT JOIN shows ON shows.id = sets.show_id
                    WHERE LOWER(songs.title) LIKE ?1
                    GROUP BY songs.id
                    ORDER BY songs.title ASC
                    "#,
                )?;

                let rows = stmt
                    .query_map(params![pattern], Self::from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;

                Ok(rows)
            })
            .await
            .context("search songs")?;

        Ok(songs)
    }
}

#[cfg(test)]
#[path = "song_tests.rs"]
mod song_tests;
