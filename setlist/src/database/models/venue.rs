use anyhow::Context;
use rusqlite::params;
use setlist_pagination::encode_path;

use crate::database::DatabaseConnection;

use super::Paged;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueSummary {
    pub venue: String,
    pub city: String,
    pub state: String,
    pub number_of_shows: i64,
}

impl VenueSummary {
    pub fn href(&self) -> String {
        encode_path(["venue", self.city.as_str(), self.venue.as_str()])
    }

    pub fn state_href(&self) -> String {
        encode_path(["state", self.state.as_str()])
    }

    /// Venues grouped by city, state and name, ordered by name.
    pub async fn list(conn: &DatabaseConnection, limit: i64, offset: i64) -> anyhow::Result<Paged<Self>> {
        let conn = conn.conn();

        let page = conn
            .call(move |c| {
                let total_count: i64 = c.query_row(
                    "SELECT COUNT(*) FROM (SELECT 1 FROM shows GROUP BY city, state, venue)",
                    [],
                    |r| r.get(0),
                )?;

                let mut stmt = c.prepare(
                    r#"
                    SELECT
                      IFNULL(venue, ''),
                      IFNULL(city, ''),
                      IFNULL(state, ''),
                      COUNT(*) AS number_of_shows
                    FROM shows
                    GROUP BY city, state, venue
                    ORDER BY venue ASC, city ASC
                    LIMIT ?1 OFFSET ?2
                    "#,
                )?;

                let rows = stmt
                    .query_map(params![limit, offset], |row| {
                        Ok(Self {
                            venue: row.get(0)?,
                            city: row.get(1)?,
                            state: row.get(2)?,
                            number_of_shows: row.get(3)?,
                        })
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?;

                Ok(Paged::new(rows, total_count))
            })
            .await
            .context("list venues")?;

        Ok(page)
    }
}
