use anyhow::Context;

use crate::database::DatabaseConnection;

/// Aggregate counts over the whole archive, loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveHistory {
    pub number_of_shows: i64,
    pub number_of_sets: i64,
    pub number_of_distinct_songs: i64,
    pub number_of_song_performances: i64,
    pub number_of_venues: i64,
    pub number_of_cities: i64,
    pub number_of_countries: i64,
}

impl ArchiveHistory {
    pub async fn load(conn: &DatabaseConnection) -> anyhow::Result<Self> {
        let conn = conn.conn();

        let history = conn
            .call(|c| {
                let count = |sql: &str| -> rusqlite::Result<i64> { c.query_row(sql, [], |r| r.get(0)) };

                Ok(Self {
                    number_of_shows: count("SELECT COUNT(*) FROM shows")?,
                    number_of_sets: count("SELECT COUNT(*) FROM sets")?,
                    number_of_distinct_songs: count("SELECT COUNT(*) FROM songs")?,
                    number_of_song_performances: count("SELECT COUNT(*) FROM song_performances")?,
                    number_of_venues: count("SELECT COUNT(*) FROM (SELECT 1 FROM shows GROUP BY city, state, venue)")?,
                    number_of_cities: count("SELECT COUNT(DISTINCT city) FROM shows")?,
                    number_of_countries: count("SELECT COUNT(DISTINCT country) FROM shows")?,
                })
            })
            .await
            .context("load archive history")?;

        Ok(history)
    }
}
