//! # Feedback Service
//!
//! Orchestrates the aggregator, ledger and claim engine over the injected
//! store ports. Cheap to clone; shared across web workers.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::activity::{activity_feed, DEFAULT_FEED_WINDOW};
use crate::aggregator::{aggregate, validate_submission};
use crate::catalog::Catalog;
use crate::claims::{self, DEFAULT_REWARD_UNIT};
use crate::error::{AppError, Result};
use crate::ledger;
use crate::models::{
    Account, AccountProfile, ActivityEntry, PointsSummary, RatingRecord, RatingSubmission,
    Restaurant, RewardClaim, UserStats,
};
use crate::traits::{AccountStore, ClaimStore, CredentialHasher, RatingStore};

pub const MIN_PASSWORD_CHARS: usize = 6;

/// Tunables of the points ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerPolicy {
    /// Point cost of one reward
    pub reward_unit: u64,
    /// How many entries the activity feed keeps
    pub feed_window: usize,
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        Self {
            reward_unit: DEFAULT_REWARD_UNIT,
            feed_window: DEFAULT_FEED_WINDOW,
        }
    }
}

#[derive(Clone)]
pub struct FeedbackService {
    ratings: Arc<dyn RatingStore>,
    claims: Arc<dyn ClaimStore>,
    accounts: Arc<dyn AccountStore>,
    hasher: Arc<dyn CredentialHasher>,
    catalog: Arc<Catalog>,
    policy: LedgerPolicy,
    /// One exclusive lock per user around appends and claims; an entry lives
    /// only while some task holds or waits on it
    user_locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
}

impl FeedbackService {
    pub fn new(
        ratings: Arc<dyn RatingStore>,
        claims: Arc<dyn ClaimStore>,
        accounts: Arc<dyn AccountStore>,
        hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self {
            ratings,
            claims,
            accounts,
            hasher,
            catalog: Arc::new(Catalog::default()),
            policy: LedgerPolicy::default(),
            user_locks: Arc::new(DashMap::new()),
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    pub fn with_policy(mut self, policy: LedgerPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn user_lock(&self, user_id: Uuid) -> Arc<Mutex<()>> {
        self.user_locks.entry(user_id).or_default().clone()
    }

    /// Drops the map entry once no other task holds or waits on the lock.
    /// `remove_if` holds the shard write lock, so nobody can clone the entry
    /// between the count check and the removal.
    fn release_user_lock(&self, user_id: Uuid, lock: Arc<Mutex<()>>) {
        drop(lock);
        self.user_locks
            .remove_if(&user_id, |_, lock| Arc::strong_count(lock) == 1);
    }

    async fn require_account(&self, user_id: Uuid) -> Result<Account> {
        self.accounts
            .get(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Account", user_id))
    }

    // ── Account directory ───────────────────────────────────────────────────

    /// Creates an account. Points are never stored on it.
    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<AccountProfile> {
        let full_name = full_name.trim();
        let email = email.trim();
        if full_name.is_empty() {
            return Err(AppError::validation("full name is required"));
        }
        if !email.contains('@') {
            return Err(AppError::validation("email address is invalid"));
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AppError::validation(format!(
                "password must be at least {MIN_PASSWORD_CHARS} characters"
            )));
        }
        // skip the hashing cost for the common duplicate case; the store still enforces it
        if self.accounts.find_by_email(email).await?.is_some() {
            return Err(AppError::DuplicateEmail(email.to_string()));
        }

        let account = Account {
            id: Uuid::now_v7(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            password_hash: self.hasher.hash_password(password)?,
            created_at: Utc::now(),
        };
        let profile = account.profile();
        self.accounts.insert(account).await?;
        log::info!("account {} registered", profile.id);
        Ok(profile)
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<AccountProfile> {
        let account = match self.accounts.find_by_email(email.trim()).await? {
            Some(account) => account,
            None => {
                log::warn!("login failed: unknown email");
                return Err(AppError::InvalidCredentials);
            }
        };
        if !self.hasher.verify_password(password, &account.password_hash) {
            log::warn!("login failed for account {}", account.id);
            return Err(AppError::InvalidCredentials);
        }
        Ok(account.profile())
    }

    // ── Ratings ─────────────────────────────────────────────────────────────

    /// Validates, aggregates and appends one review.
    /// Nothing reaches the store unless every check passes.
    pub async fn submit_rating(
        &self,
        user_id: Uuid,
        submission: RatingSubmission,
    ) -> Result<RatingRecord> {
        validate_submission(&submission)?;
        let restaurant = self
            .catalog
            .get(submission.restaurant_id)
            .ok_or_else(|| AppError::not_found("Restaurant", submission.restaurant_id))?
            .clone();
        self.require_account(user_id).await?;

        let (overall_rating, points_awarded) = aggregate(&submission.categories())?;
        let record = RatingRecord {
            id: Uuid::now_v7(),
            user_id,
            restaurant_id: restaurant.id,
            restaurant_name: restaurant.name,
            food_rating: submission.food_rating,
            service_rating: submission.service_rating,
            cleanliness_rating: submission.cleanliness_rating,
            ambiance_rating: submission.ambiance_rating,
            overall_rating,
            comment: submission.comment.trim().to_string(),
            submitted_at: Utc::now(),
            points_awarded,
        };

        let lock = self.user_lock(user_id);
        let appended = async {
            let _guard = lock.lock().await;
            self.ratings.append(record.clone()).await
        }
        .await;
        self.release_user_lock(user_id, lock);
        appended?;
        log::info!(
            "rating {} by {} for restaurant {}: {} stars, {} points",
            record.id,
            user_id,
            record.restaurant_id,
            overall_rating,
            points_awarded
        );
        Ok(record)
    }

    /// A user's reviews, most recent first.
    pub async fn ratings_for(&self, user_id: Uuid) -> Result<Vec<RatingRecord>> {
        self.require_account(user_id).await?;
        let mut records = self.ratings.list_by_user(user_id).await?;
        records.reverse();
        Ok(records)
    }

    // ── Points and rewards ──────────────────────────────────────────────────

    pub async fn available_points(&self, user_id: Uuid) -> Result<u64> {
        self.require_account(user_id).await?;
        self.balance(user_id).await
    }

    async fn balance(&self, user_id: Uuid) -> Result<u64> {
        let ratings = self.ratings.list_by_user(user_id).await?;
        let claims = self.claims.list_by_user(user_id).await?;
        Ok(ledger::available_points(user_id, &ratings, &claims))
    }

    pub async fn points_summary(&self, user_id: Uuid) -> Result<PointsSummary> {
        self.require_account(user_id).await?;
        let available = self.balance(user_id).await?;
        Ok(ledger::points_summary(available, self.policy.reward_unit))
    }

    /// Converts every whole reward unit of the balance into one claim record.
    pub async fn claim_rewards(&self, user_id: Uuid) -> Result<RewardClaim> {
        self.require_account(user_id).await?;

        let lock = self.user_lock(user_id);
        let claimed = async {
            let _guard = lock.lock().await;
            let ratings = self.ratings.list_by_user(user_id).await?;
            let history = self.claims.list_by_user(user_id).await?;
            let claim = claims::claim_rewards(user_id, &ratings, &history, self.policy.reward_unit)?;
            self.claims.append(claim.clone()).await?;
            Ok::<_, AppError>(claim)
        }
        .await;
        self.release_user_lock(user_id, lock);

        let claim = claimed.map_err(|err| {
            log::info!("claim rejected for {user_id}: {err}");
            err
        })?;
        log::info!(
            "claim {} for {}: {} rewards, {} points",
            claim.id,
            user_id,
            claim.rewards_count,
            claim.points_value
        );
        Ok(claim)
    }

    // ── Read models ─────────────────────────────────────────────────────────

    pub async fn activity(&self, user_id: Uuid) -> Result<Vec<ActivityEntry>> {
        self.require_account(user_id).await?;
        let ratings = self.ratings.list_by_user(user_id).await?;
        let claims = self.claims.list_by_user(user_id).await?;
        Ok(activity_feed(&ratings, &claims, self.policy.feed_window))
    }

    pub async fn stats(&self, user_id: Uuid) -> Result<UserStats> {
        self.require_account(user_id).await?;
        let ratings = self.ratings.list_by_user(user_id).await?;
        Ok(ledger::user_stats(user_id, &ratings))
    }

    pub fn restaurants(&self, term: Option<&str>) -> Vec<Restaurant> {
        match term {
            Some(term) => self.catalog.search(term),
            None => self.catalog.all().to_vec(),
        }
    }
}
