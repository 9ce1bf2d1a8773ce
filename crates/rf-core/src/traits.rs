//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.
//! The stores are append-only: there is no update or delete anywhere.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Account, RatingRecord, RewardClaim};

/// Persistence contract for submitted ratings.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait RatingStore: Send + Sync {
    /// Inserts a record and returns its id. Insertion order is preserved.
    async fn append(&self, record: RatingRecord) -> Result<Uuid>;
    /// All records of one user, in storage order.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<RatingRecord>>;
}

/// Persistence contract for reward claims.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ClaimStore: Send + Sync {
    async fn append(&self, claim: RewardClaim) -> Result<Uuid>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<RewardClaim>>;
}

/// The account directory's backing store.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Fails with `DuplicateEmail` if the email is taken; the store is untouched then.
    async fn insert(&self, account: Account) -> Result<()>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;
    async fn get(&self, id: Uuid) -> Result<Option<Account>>;
}

/// Password hashing contract.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Produces a salted, self-describing hash string.
    fn hash_password(&self, password: &str) -> Result<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> bool;
}
