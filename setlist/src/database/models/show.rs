use anyhow::Context;
use chrono::NaiveDate;
use rusqlite::{OptionalExtension, Row, params_from_iter, types::Value};
use setlist_pagination::encode_path;

use crate::database::DatabaseConnection;

use super::Paged;

const SHOW_COLUMNS: &str = r#"
    shows.id,
    date(shows.date),
    IFNULL(shows.venue, ''),
    IFNULL(shows.city, ''),
    IFNULL(shows.state, ''),
    IFNULL(shows.country, '')
"#;

const SHOWS_WITH_SONG: &str = r#"
    shows
    JOIN sets ON sets.show_id = shows.id
    JOIN song_performances ON song_performances.set_id = sets.id
    JOIN songs ON songs.id = song_performances.song_id
    WHERE LOWER(songs.title) = LOWER(?1)
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Show {
    pub id: i64,
    pub date: NaiveDate,
    pub venue: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

impl Show {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            date: row.get(1)?,
            venue: row.get(2)?,
            city: row.get(3)?,
            state: row.get(4)?,
            country: row.get(5)?,
        })
    }

    /// "May 8, 1977"
    pub fn display_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }

    /// Path of the show's own page, e.g. `/show/1977/05/08`.
    pub fn href(&self) -> String {
        format!("/show/{}", self.date.format("%Y/%m/%d"))
    }

    pub fn venue_href(&self) -> String {
        encode_path(["venue", self.city.as_str(), self.venue.as_str()])
    }

    pub fn city_href(&self) -> String {
        encode_path(["city", self.state.as_str(), self.city.as_str()])
    }

    /// Link for [`Show::region`]: the state page, or the country page for
    /// shows outside a state.
    pub fn region_href(&self) -> String {
        if self.state.is_empty() {
            encode_path(["country", self.country.as_str()])
        } else {
            encode_path(["state", self.state.as_str()])
        }
    }

    /// Region shown next to the city: the state, or the country for shows
    /// outside a state.
    pub fn region(&self) -> &str {
        if self.state.is_empty() { &self.country } else { &self.state }
    }

    pub async fn at_venue(
        conn: &DatabaseConnection,
        venue: &str,
        city: &str,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Paged<Self>> {
        paged(
            conn,
            "shows WHERE shows.venue = ?1 AND shows.city = ?2",
            vec![venue.into(), city.into()],
            limit,
            offset,
        )
        .await
        .context("list shows at venue")
    }

    pub async fn in_city(
        conn: &DatabaseConnection,
        city: &str,
        state: &str,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Paged<Self>> {
        paged(
            conn,
            "shows WHERE shows.city = ?1 AND shows.state = ?2",
            vec![city.into(), state.into()],
            limit,
            offset,
        )
        .await
        .context("list shows in city")
    }

    pub async fn in_state(conn: &DatabaseConnection, state: &str, limit: i64, offset: i64) -> anyhow::Result<Paged<Self>> {
        paged(conn, "shows WHERE shows.state = ?1", vec![state.into()], limit, offset)
            .await
            .context("list shows in state")
    }

    pub async fn in_country(
        conn: &DatabaseConnection,
        country: &str,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Paged<Self>> {
        paged(conn, "shows WHERE shows.country = ?1", vec![country.into()], limit, offset)
            .await
            .context("list shows in country")
    }

    pub async fn in_year(conn: &DatabaseConnection, year: &str, limit: i64, offset: i64) -> anyhow::Result<Paged<Self>> {
        paged(
            conn,
            "shows WHERE strftime('%Y', shows.date) = ?1",
            vec![year.into()],
            limit,
            offset,
        )
        .await
        .context("list shows in year")
    }

    /// Shows where a song with this title (any casing) was played. The total
    /// counts each show once, however often the song came up.
    pub async fn with_song(conn: &DatabaseConnection, title: &str, limit: i64, offset: i64) -> anyhow::Result<Paged<Self>> {
        paged(conn, SHOWS_WITH_SONG, vec![title.into()], limit, offset)
            .await
            .context("list shows with song")
    }
}

/// Runs the count and the page query for `source`, a `FROM` clause (joins
/// and `WHERE` included) whose numbered placeholders are bound to `args`.
async fn paged(
    conn: &DatabaseConnection,
    source: &'static str,
    args: Vec<String>,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Paged<Show>> {
    let conn = conn.conn();

    let page = conn
        .call(move |c| {
            let mut values: Vec<Value> = args.into_iter().map(Value::Text).collect();

            let total_count: i64 = c.query_row(
                &format!("SELECT COUNT(DISTINCT shows.id) FROM {source}"),
                params_from_iter(values.iter()),
                |r| r.get(0),
            )?;

            let limit_idx = values.len() + 1;
            let offset_idx = values.len() + 2;
            values.push(Value::Integer(limit));
            values.push(Value::Integer(offset));

            let mut stmt = c.prepare(&format!(
                "SELECT DISTINCT {SHOW_COLUMNS} FROM {source} ORDER BY 2 ASC, 1 ASC LIMIT ?{limit_idx} OFFSET ?{offset_idx}"
            ))?;
            let rows = stmt
                .query_map(params_from_iter(values.iter()), Show::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(Paged::new(rows, total_count))
        })
        .await?;

    Ok(page)
}

/// A show together with everything played at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowDetail {
    pub show: Show,
    pub sets: Vec<SetList>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetList {
    pub number: i64,
    pub songs: Vec<Performance>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Performance {
    pub position: i64,
    pub song_id: i64,
    pub title: String,
}

impl Performance {
    pub fn href(&self) -> String {
        encode_path(["song", self.title.as_str()])
    }
}

impl ShowDetail {
    /// The show played on `date`, with its sets in order and each set's songs
    /// in the order they were played.
    pub async fn on_date(conn: &DatabaseConnection, date: NaiveDate) -> anyhow::Result<Option<Self>> {
        let conn = conn.conn();
        let day = date.format("%Y-%m-%d").to_string();

        let detail = conn
            .call(move |c| {
                let show = c
                    .query_row(
                        &format!("SELECT {SHOW_COLUMNS} FROM shows WHERE date(shows.date) = ?1 ORDER BY shows.id LIMIT 1"),
                        [day],
                        Show::from_row,
                    )
                    .optional()?;

                let Some(show) = show else {
                    return Ok(None);
                };

                let mut stmt = c.prepare(
                    r#"
                    SELECT
                      sets.set_number,
                      song_performances.order_in_set,
                      songs.id,
                      songs.title
                    FROM sets
                    JOIN song_performances ON song_performances.set_id = sets.id
                    JOIN songs ON songs.id = song_performances.song_id
                    WHERE sets.show_id = ?1
                    ORDER BY sets.set_number ASC, song_performances.order_in_set ASC
                    "#,
                )?;

                let played = stmt
                    .query_map([show.id], |row| {
                        Ok((
                            row.get::<_, i64>(0)?,
                            Performance {
                                position: row.get(1)?,
                                song_id: row.get(2)?,
                                title: row.get(3)?,
                            },
                        ))
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?;

                let mut sets: Vec<SetList> = Vec::new();
                for (number, performance) in played {
                    match sets.last_mut() {
                        Some(set) if set.number == number => set.songs.push(performance),
                        _ => sets.push(SetList {
                            number,
                            songs: vec![performance],
                        }),
                    }
                }

                Ok(Some(ShowDetail { show, sets }))
            })
            .await
            .context("load show by date")?;

        Ok(detail)
    }
}

#[cfg(test)]
#[path = "show_tests.rs"]
mod show_tests;
