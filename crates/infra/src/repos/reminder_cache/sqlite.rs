use super::{
    CacheChange, IReminderCache, ReminderSubscription, SnapshotLoader, CHANGE_CHANNEL_CAPACITY,
};
use anyhow::Result;
use dospot_domain::{Reminder, ID};
use futures::FutureExt;
use sqlx::{
    pool::PoolConnection,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    FromRow, Sqlite, SqliteConnection, SqlitePool,
};
use std::{str::FromStr, sync::Arc, time::Duration};
use tokio::sync::broadcast;
use tracing::{info, warn};

/// How long a writer waits for the write lock before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SELECT_COLUMNS: &str =
    "id, user_id, title, description, latitude, longitude, location_name, timestamp";

pub struct SqliteReminderCache {
    pool: SqlitePool,
    changes: broadcast::Sender<CacheChange>,
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    id: String,
    user_id: String,
    title: String,
    description: String,
    latitude: f64,
    longitude: f64,
    location_name: String,
    timestamp: i64,
}

impl From<ReminderRaw> for Reminder {
    fn from(raw: ReminderRaw) -> Self {
        Reminder {
            id: raw.id.into(),
            user_id: raw.user_id.into(),
            title: raw.title,
            description: raw.description,
            latitude: raw.latitude,
            longitude: raw.longitude,
            location_name: raw.location_name,
            timestamp: raw.timestamp,
        }
    }
}

impl SqliteReminderCache {
    /// Opens (and creates when missing) the cache database at `url`
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT);
        // Connections are kept open so that shared in-memory databases
        // survive between queries
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::setup_schema(&pool).await?;
        info!("Opened local reminder cache at {}", url);

        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Ok(Self { pool, changes })
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS reminders (
                id TEXT PRIMARY KEY NOT NULL,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL,
                location_name TEXT NOT NULL,
                timestamp INTEGER NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_reminders_user_timestamp
            ON reminders(user_id, timestamp DESC);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    async fn query_by_user(pool: &SqlitePool, user_id: &ID) -> Result<Vec<Reminder>> {
        let rows: Vec<ReminderRaw> = sqlx::query_as(&format!(
            "SELECT {} FROM reminders WHERE user_id = ? ORDER BY timestamp DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(Reminder::from).collect())
    }

    fn notify(&self, change: CacheChange) {
        // No receivers just means nobody is observing
        let _ = self.changes.send(change);
    }

    /// Opens a transaction that holds the write lock from the start, so
    /// concurrent writers wait on `busy_timeout` instead of failing
    async fn begin_write(&self) -> Result<PoolConnection<Sqlite>> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;
        Ok(conn)
    }

    async fn finish_write<T>(conn: &mut SqliteConnection, res: Result<T>) -> Result<T> {
        match res {
            Ok(value) => {
                sqlx::query("COMMIT").execute(&mut *conn).await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback) = sqlx::query("ROLLBACK").execute(&mut *conn).await {
                    warn!("Unable to roll back cache write: {:?}", rollback);
                }
                Err(e)
            }
        }
    }

    async fn owner_of(
        conn: &mut SqliteConnection,
        reminder_id: &ID,
    ) -> Result<Option<String>> {
        let owner: Option<String> = sqlx::query_scalar("SELECT user_id FROM reminders WHERE id = ?")
            .bind(reminder_id.as_str())
            .fetch_optional(&mut *conn)
            .await?;
        Ok(owner)
    }

    /// Returns the owner the row had before, if there was one
    async fn replace_row(
        conn: &mut SqliteConnection,
        reminder: &Reminder,
    ) -> Result<Option<String>> {
        let previous_owner = Self::owner_of(conn, &reminder.id).await?;
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO reminders
            (id, user_id, title, description, latitude, longitude, location_name, timestamp)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(reminder.id.as_str())
        .bind(reminder.user_id.as_str())
        .bind(&reminder.title)
        .bind(&reminder.description)
        .bind(reminder.latitude)
        .bind(reminder.longitude)
        .bind(&reminder.location_name)
        .bind(reminder.timestamp)
        .execute(&mut *conn)
        .await?;

        Ok(previous_owner)
    }

    /// `None` when there was no row to update
    async fn update_row(
        conn: &mut SqliteConnection,
        reminder: &Reminder,
    ) -> Result<Option<String>> {
        let previous_owner = match Self::owner_of(conn, &reminder.id).await? {
            Some(owner) => owner,
            None => return Ok(None),
        };
        sqlx::query(
            r#"
            UPDATE reminders
            SET user_id = ?,
            title = ?,
            description = ?,
            latitude = ?,
            longitude = ?,
            location_name = ?,
            timestamp = ?
            WHERE id = ?
            "#,
        )
        .bind(reminder.user_id.as_str())
        .bind(&reminder.title)
        .bind(&reminder.description)
        .bind(reminder.latitude)
        .bind(reminder.longitude)
        .bind(&reminder.location_name)
        .bind(reminder.timestamp)
        .bind(reminder.id.as_str())
        .execute(&mut *conn)
        .await?;

        Ok(Some(previous_owner))
    }

    /// `None` when there was no row to delete
    async fn delete_row(
        conn: &mut SqliteConnection,
        reminder_id: &ID,
    ) -> Result<Option<String>> {
        let owner = match Self::owner_of(conn, reminder_id).await? {
            Some(owner) => owner,
            None => return Ok(None),
        };
        sqlx::query("DELETE FROM reminders WHERE id = ?")
            .bind(reminder_id.as_str())
            .execute(&mut *conn)
            .await?;

        Ok(Some(owner))
    }
}

#[async_trait::async_trait]
impl IReminderCache for SqliteReminderCache {
    async fn observe_all(&self, user_id: &ID) -> Result<ReminderSubscription> {
        let changes = self.changes.subscribe();
        let initial = Self::query_by_user(&self.pool, user_id).await?;

        let pool = self.pool.clone();
        let load: SnapshotLoader = Arc::new(move |user_id: ID| {
            let pool = pool.clone();
            async move { Self::query_by_user(&pool, &user_id).await }.boxed()
        });

        Ok(ReminderSubscription::new(
            user_id.clone(),
            initial,
            changes,
            load,
        ))
    }

    async fn find_by_user(&self, user_id: &ID) -> Result<Vec<Reminder>> {
        Self::query_by_user(&self.pool, user_id).await
    }

    async fn get_by_id(&self, reminder_id: &ID) -> Result<Option<Reminder>> {
        let row: Option<ReminderRaw> = sqlx::query_as(&format!(
            "SELECT {} FROM reminders WHERE id = ?",
            SELECT_COLUMNS
        ))
        .bind(reminder_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Reminder::from))
    }

    async fn insert_or_replace(&self, reminder: &Reminder) -> Result<()> {
        let mut conn = self.begin_write().await?;
        let res = Self::replace_row(&mut conn, reminder).await;
        let previous_owner = Self::finish_write(&mut conn, res).await?;

        self.notify(CacheChange::owners(
            previous_owner.map(ID::from),
            reminder.user_id.clone(),
        ));
        Ok(())
    }

    async fn update(&self, reminder: &Reminder) -> Result<()> {
        let mut conn = self.begin_write().await?;
        let res = Self::update_row(&mut conn, reminder).await;
        if let Some(previous_owner) = Self::finish_write(&mut conn, res).await? {
            self.notify(CacheChange::owners(
                Some(ID::from(previous_owner)),
                reminder.user_id.clone(),
            ));
        }
        Ok(())
    }

    async fn delete(&self, reminder: &Reminder) -> Result<()> {
        let mut conn = self.begin_write().await?;
        let res = Self::delete_row(&mut conn, &reminder.id).await;
        if let Some(owner) = Self::finish_write(&mut conn, res).await? {
            self.notify(CacheChange::single(ID::from(owner)));
        }
        Ok(())
    }

    async fn delete_all(&self, user_id: &ID) -> Result<()> {
        let deleted = sqlx::query("DELETE FROM reminders WHERE user_id = ?")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted > 0 {
            self.notify(CacheChange::single(user_id.clone()));
        }
        Ok(())
    }
}
