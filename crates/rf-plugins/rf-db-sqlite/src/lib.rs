//! # rf-db-sqlite Implementation
//!
//! This module implements the data mapping between the SQLite relational model
//! and the `rf-core` domain models. All three tables are append-only; storage
//! order is SQLite's implicit `rowid`.

use std::str::FromStr;

use async_trait::async_trait;
use rf_core::error::{AppError, Result};
use rf_core::models::{Account, RatingRecord, RewardClaim};
use rf_core::traits::{AccountStore, ClaimStore, RatingStore};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id            BLOB PRIMARY KEY,
    full_name     TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS rating_records (
    id                 BLOB PRIMARY KEY,
    user_id            BLOB NOT NULL REFERENCES accounts(id),
    restaurant_id      INTEGER NOT NULL,
    restaurant_name    TEXT NOT NULL,
    food_rating        INTEGER NOT NULL CHECK (food_rating BETWEEN 1 AND 5),
    service_rating     INTEGER NOT NULL CHECK (service_rating BETWEEN 1 AND 5),
    cleanliness_rating INTEGER NOT NULL CHECK (cleanliness_rating BETWEEN 1 AND 5),
    ambiance_rating    INTEGER NOT NULL CHECK (ambiance_rating BETWEEN 1 AND 5),
    overall_rating     INTEGER NOT NULL CHECK (overall_rating BETWEEN 1 AND 5),
    comment            TEXT NOT NULL,
    submitted_at       TEXT NOT NULL,
    points_awarded     INTEGER NOT NULL CHECK (points_awarded >= 0)
);
CREATE INDEX IF NOT EXISTS idx_rating_records_user ON rating_records(user_id);

CREATE TABLE IF NOT EXISTS reward_claims (
    id            BLOB PRIMARY KEY,
    user_id       BLOB NOT NULL REFERENCES accounts(id),
    rewards_count INTEGER NOT NULL CHECK (rewards_count > 0),
    points_value  INTEGER NOT NULL CHECK (points_value > 0),
    claimed_at    TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_reward_claims_user ON reward_claims(user_id);
"#;

pub struct SqliteStore {
    pool: SqlitePool,
}

// Helper for UUID conversion
fn uuid_to_blob(id: Uuid) -> Vec<u8> {
    id.as_bytes().to_vec()
}

fn blob_to_uuid(blob: &[u8]) -> Result<Uuid> {
    Uuid::from_slice(blob).map_err(AppError::internal)
}

fn db_err(err: sqlx::Error) -> AppError {
    AppError::internal(err)
}

fn to_i64(value: u64) -> Result<i64> {
    i64::try_from(value).map_err(AppError::internal)
}

fn column<T: TryFrom<i64>>(row: &SqliteRow, name: &str) -> Result<T>
where
    T::Error: std::fmt::Display,
{
    let raw: i64 = row.try_get(name).map_err(db_err)?;
    T::try_from(raw).map_err(|e| AppError::Internal(format!("column {name}: {e}")))
}

fn row_to_account(row: &SqliteRow) -> Result<Account> {
    Ok(Account {
        id: blob_to_uuid(row.try_get::<Vec<u8>, _>("id").map_err(db_err)?.as_slice())?,
        full_name: row.try_get("full_name").map_err(db_err)?,
        email: row.try_get("email").map_err(db_err)?,
        password_hash: row.try_get("password_hash").map_err(db_err)?,
        created_at: row.try_get("created_at").map_err(db_err)?,
    })
}

fn row_to_rating(row: &SqliteRow) -> Result<RatingRecord> {
    Ok(RatingRecord {
        id: blob_to_uuid(row.try_get::<Vec<u8>, _>("id").map_err(db_err)?.as_slice())?,
        user_id: blob_to_uuid(row.try_get::<Vec<u8>, _>("user_id").map_err(db_err)?.as_slice())?,
        restaurant_id: column(row, "restaurant_id")?,
        restaurant_name: row.try_get("restaurant_name").map_err(db_err)?,
        food_rating: column(row, "food_rating")?,
        service_rating: column(row, "service_rating")?,
        cleanliness_rating: column(row, "cleanliness_rating")?,
        ambiance_rating: column(row, "ambiance_rating")?,
        overall_rating: column(row, "overall_rating")?,
        comment: row.try_get("comment").map_err(db_err)?,
        submitted_at: row.try_get("submitted_at").map_err(db_err)?,
        points_awarded: column(row, "points_awarded")?,
    })
}

fn row_to_claim(row: &SqliteRow) -> Result<RewardClaim> {
    Ok(RewardClaim {
        id: blob_to_uuid(row.try_get::<Vec<u8>, _>("id").map_err(db_err)?.as_slice())?,
        user_id: blob_to_uuid(row.try_get::<Vec<u8>, _>("user_id").map_err(db_err)?.as_slice())?,
        rewards_count: column(row, "rewards_count")?,
        points_value: column(row, "points_value")?,
        claimed_at: row.try_get("claimed_at").map_err(db_err)?,
    })
}

impl SqliteStore {
    /// Opens (creating if missing) the database at `url` and applies the schema.
    ///
    /// # Developer Note
    /// `sqlite::memory:` gives every connection its own database, so in-memory
    /// URLs are pinned to a single, never-recycled connection.
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(db_err)?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = url.contains(":memory:");
        let mut pool_options = SqlitePoolOptions::new();
        if in_memory {
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = pool_options.connect_with(options).await.map_err(db_err)?;

        sqlx::raw_sql(SCHEMA).execute(&pool).await.map_err(db_err)?;
        log::info!("sqlite store ready (in_memory={in_memory})");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl AccountStore for SqliteStore {
    /// The UNIQUE constraint on `email` is what makes signup race-free.
    async fn insert(&self, account: Account) -> Result<()> {
        let result = sqlx::query(
            "INSERT INTO accounts (id, full_name, email, password_hash, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(account.id))
        .bind(&account.full_name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::DuplicateEmail(account.email))
            }
            Err(e) => Err(db_err(e)),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, full_name, email, password_hash, created_at FROM accounts WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(row_to_account).transpose()
    }

    async fn get(&self, id: Uuid) -> Result<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, full_name, email, password_hash, created_at FROM accounts WHERE id = ?",
        )
        .bind(uuid_to_blob(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(row_to_account).transpose()
    }
}

#[async_trait]
impl RatingStore for SqliteStore {
    async fn append(&self, record: RatingRecord) -> Result<Uuid> {
        sqlx::query(
            "INSERT INTO rating_records (id, user_id, restaurant_id, restaurant_name, food_rating, service_rating, \
             cleanliness_rating, ambiance_rating, overall_rating, comment, submitted_at, points_awarded) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(record.id))
        .bind(uuid_to_blob(record.user_id))
        .bind(i64::from(record.restaurant_id))
        .bind(&record.restaurant_name)
        .bind(i64::from(record.food_rating))
        .bind(i64::from(record.service_rating))
        .bind(i64::from(record.cleanliness_rating))
        .bind(i64::from(record.ambiance_rating))
        .bind(i64::from(record.overall_rating))
        .bind(&record.comment)
        .bind(record.submitted_at)
        .bind(to_i64(record.points_awarded)?)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(record.id)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<RatingRecord>> {
        sqlx::query("SELECT * FROM rating_records WHERE user_id = ? ORDER BY rowid ASC")
            .bind(uuid_to_blob(user_id))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?
            .iter()
            .map(row_to_rating)
            .collect()
    }
}

#[async_trait]
impl ClaimStore for SqliteStore {
    async fn append(&self, claim: RewardClaim) -> Result<Uuid> {
        sqlx::query(
            "INSERT INTO reward_claims (id, user_id, rewards_count, points_value, claimed_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(claim.id))
        .bind(uuid_to_blob(claim.user_id))
        .bind(to_i64(claim.rewards_count)?)
        .bind(to_i64(claim.points_value)?)
        .bind(claim.claimed_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(claim.id)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<RewardClaim>> {
        sqlx::query("SELECT * FROM reward_claims WHERE user_id = ? ORDER BY rowid ASC")
            .bind(uuid_to_blob(user_id))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?
            .iter()
            .map(row_to_claim)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account(email: &str) -> Account {
        Account {
            id: Uuid::now_v7(),
            full_name: "Njeri Wambui".into(),
            email: email.into(),
            password_hash: "$argon2id$v=19$stub".into(),
            created_at: Utc::now(),
        }
    }

    fn rating(user_id: Uuid, overall: u8) -> RatingRecord {
        RatingRecord {
            id: Uuid::now_v7(),
            user_id,
            restaurant_id: 2,
            restaurant_name: "KFC Westgate".into(),
            food_rating: overall,
            service_rating: overall,
            cleanliness_rating: overall,
            ambiance_rating: overall,
            overall_rating: overall,
            comment: "Crispy and quick, as usual".into(),
            submitted_at: Utc::now(),
            points_awarded: u64::from(overall) * 10,
        }
    }

    #[tokio::test]
    async fn test_account_round_trip_and_duplicate_email() {
        let store = SqliteStore::new("sqlite::memory:").await.unwrap();
        let njeri = account("njeri@example.com");
        store.insert(njeri.clone()).await.expect("Failed to insert account");

        let found = store.find_by_email("njeri@example.com").await.unwrap();
        assert_eq!(found.as_ref().map(|a| a.id), Some(njeri.id));
        assert_eq!(store.get(njeri.id).await.unwrap().map(|a| a.email), Some(njeri.email.clone()));
        assert!(store.find_by_email("NJERI@example.com").await.unwrap().is_none());

        let err = store.insert(account("njeri@example.com")).await.unwrap_err();
        assert_eq!(err, AppError::DuplicateEmail("njeri@example.com".into()));

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_ratings_listed_in_insertion_order() {
        let store = SqliteStore::new("sqlite::memory:").await.unwrap();
        let owner = account("owner@example.com");
        let other = account("other@example.com");
        store.insert(owner.clone()).await.unwrap();
        store.insert(other.clone()).await.unwrap();

        let first = rating(owner.id, 3);
        let second = rating(owner.id, 5);
        RatingStore::append(&store, first.clone()).await.unwrap();
        RatingStore::append(&store, rating(other.id, 1)).await.unwrap();
        RatingStore::append(&store, second.clone()).await.unwrap();

        let mine = RatingStore::list_by_user(&store, owner.id).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, first.id);
        assert_eq!(mine[1].id, second.id);
        assert_eq!(mine[1].points_awarded, 50);
        assert_eq!(mine[0].comment, first.comment);
    }

    #[tokio::test]
    async fn test_claims_round_trip() {
        let store = SqliteStore::new("sqlite::memory:").await.unwrap();
        let owner = account("owner@example.com");
        store.insert(owner.clone()).await.unwrap();

        let claim = RewardClaim {
            id: Uuid::now_v7(),
            user_id: owner.id,
            rewards_count: 2,
            points_value: 200,
            claimed_at: Utc::now(),
        };
        ClaimStore::append(&store, claim.clone()).await.unwrap();

        let claims = ClaimStore::list_by_user(&store, owner.id).await.unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].points_value, 200);
        assert_eq!(claims[0].rewards_count, 2);
        assert!(ClaimStore::list_by_user(&store, Uuid::now_v7()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rating_for_unknown_account_is_rejected() {
        let store = SqliteStore::new("sqlite::memory:").await.unwrap();
        let err = RatingStore::append(&store, rating(Uuid::now_v7(), 4)).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
