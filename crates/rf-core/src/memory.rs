//! In-memory store backends.
//!
//! Suitable for tests and single-process demos. Everything is lost on
//! restart; use the SQLite plugin for anything that has to survive one.

use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Account, RatingRecord, RewardClaim};
use crate::traits::{AccountStore, ClaimStore, RatingStore};

fn poisoned<T>(_: T) -> AppError {
    AppError::Internal("in-memory store lock poisoned".into())
}

/// Append-only rating log.
#[derive(Debug, Default)]
pub struct MemoryRatingStore {
    records: RwLock<Vec<RatingRecord>>,
}

impl MemoryRatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RatingStore for MemoryRatingStore {
    async fn append(&self, record: RatingRecord) -> Result<Uuid> {
        let id = record.id;
        self.records.write().map_err(poisoned)?.push(record);
        Ok(id)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<RatingRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.iter().filter(|r| r.user_id == user_id).cloned().collect())
    }
}

/// Append-only claim log.
#[derive(Debug, Default)]
pub struct MemoryClaimStore {
    claims: RwLock<Vec<RewardClaim>>,
}

impl MemoryClaimStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClaimStore for MemoryClaimStore {
    async fn append(&self, claim: RewardClaim) -> Result<Uuid> {
        let id = claim.id;
        self.claims.write().map_err(poisoned)?.push(claim);
        Ok(id)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<RewardClaim>> {
        let claims = self.claims.read().map_err(poisoned)?;
        Ok(claims.iter().filter(|c| c.user_id == user_id).cloned().collect())
    }
}

/// Account directory keyed by email.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<Vec<Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.read().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn insert(&self, account: Account) -> Result<()> {
        // check and push under one write guard so two signups cannot race
        let mut accounts = self.accounts.write().map_err(poisoned)?;
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(AppError::DuplicateEmail(account.email));
        }
        accounts.push(account);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let accounts = self.accounts.read().map_err(poisoned)?;
        Ok(accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Account>> {
        let accounts = self.accounts.read().map_err(poisoned)?;
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }
}
