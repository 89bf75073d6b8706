use include_dir::{Dir, include_dir};
use rusqlite::OpenFlags;
use rusqlite_migration::{Migrations, MigrationsBuilder};
use tokio_rusqlite::Connection;

pub mod models;

static MIGRATIONS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/migrations");

/// Handle to the archive database, passed explicitly to every query.
pub struct DatabaseConnection(Connection);

impl DatabaseConnection {
    pub fn conn(&self) -> &Connection {
        &self.0
    }
}

pub async fn connect(db_path: &str) -> anyhow::Result<DatabaseConnection> {
    let connection = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_CREATE,
    )
    .await?;

    connection
        .call(|c| {
            c.execute_batch(
                r#"
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
        "#,
            )?;
            Ok(())
        })
        .await?;

    Ok(DatabaseConnection(connection))
}

pub async fn run_migrations(connection: &DatabaseConnection) -> anyhow::Result<()> {
    let migrations: Migrations<'static> = MigrationsBuilder::from_directory(&MIGRATIONS_DIR)?.finalize();
    connection
        .conn()
        .call(move |c| {
            migrations
                .to_latest(c)
                .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))
        })
        .await?;
    Ok(())
}
