//! Service layer for award persistence.
//!
//! [`AwardService`] is the collaborator the GraphQL resolvers are written
//! against: save, lookup, list, delete. The production implementation
//! delegates straight to the repository; resolvers trust its return values
//! verbatim and own all request-level validation themselves.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use super::award::Award;
use super::repo::{self, AwardRepoError};

/// Persistence collaborator for [`Award`] entities.
#[async_trait]
pub trait AwardService: Send + Sync {
    /// Persist a new award.
    async fn save(&self, award: &Award) -> Result<(), AwardRepoError>;

    /// Look up an award by id. Absence is `Ok(None)`, not an error.
    async fn find_by_id(&self, id: i64) -> Result<Option<Award>, AwardRepoError>;

    /// Every award in the catalogue.
    async fn find_all(&self) -> Result<Vec<Award>, AwardRepoError>;

    /// Delete a previously located award.
    async fn delete_award(&self, award: &Award) -> Result<(), AwardRepoError>;
}

/// `PostgreSQL` implementation of [`AwardService`].
pub struct PgAwardService {
    pool: PgPool,
}

impl PgAwardService {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convenience for schema wiring.
    #[must_use]
    pub fn shared(pool: PgPool) -> Arc<dyn AwardService> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl AwardService for PgAwardService {
    async fn save(&self, award: &Award) -> Result<(), AwardRepoError> {
        let id = repo::insert_award(&self.pool, award).await?;
        tracing::debug!(award_id = id, award_name = %award.award_name, "award saved");
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Award>, AwardRepoError> {
        repo::get_award_by_id(&self.pool, id).await
    }

    async fn find_all(&self) -> Result<Vec<Award>, AwardRepoError> {
        repo::list_awards(&self.pool).await
    }

    async fn delete_award(&self, award: &Award) -> Result<(), AwardRepoError> {
        // An award that was never persisted has nothing to delete.
        match award.id {
            Some(id) => repo::delete_award(&self.pool, id).await,
            None => Ok(()),
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(clippy::expect_used)]
pub mod mock {
    //! Recording mock for resolver unit tests.
    //!
    //! Captures every call so tests can assert not just outcomes but call
    //! counts and payloads: what was saved, which ids were looked up, what
    //! was deleted.

    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use super::{async_trait, Award, AwardRepoError, AwardService};

    /// In-memory [`AwardService`] that records every interaction.
    #[derive(Default)]
    pub struct MockAwardService {
        store: Mutex<BTreeMap<i64, Award>>,
        saved: Mutex<Vec<Award>>,
        find_calls: Mutex<Vec<i64>>,
        deleted: Mutex<Vec<Award>>,
    }

    impl MockAwardService {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Seed a stored award that `find_by_id` will return.
        ///
        /// # Panics
        ///
        /// Panics if the internal mutex is poisoned.
        pub fn insert(&self, id: i64, award: Award) {
            self.store.lock().expect("lock poisoned").insert(id, award);
        }

        /// Awards passed to `save`, in call order.
        ///
        /// # Panics
        ///
        /// Panics if the internal mutex is poisoned.
        #[must_use]
        pub fn saved_awards(&self) -> Vec<Award> {
            self.saved.lock().expect("lock poisoned").clone()
        }

        /// Ids passed to `find_by_id`, in call order.
        ///
        /// # Panics
        ///
        /// Panics if the internal mutex is poisoned.
        #[must_use]
        pub fn find_calls(&self) -> Vec<i64> {
            self.find_calls.lock().expect("lock poisoned").clone()
        }

        /// Awards passed to `delete_award`, in call order.
        ///
        /// # Panics
        ///
        /// Panics if the internal mutex is poisoned.
        #[must_use]
        pub fn deleted_awards(&self) -> Vec<Award> {
            self.deleted.lock().expect("lock poisoned").clone()
        }
    }

    #[async_trait]
    impl AwardService for MockAwardService {
        async fn save(&self, award: &Award) -> Result<(), AwardRepoError> {
            self.saved.lock().expect("lock poisoned").push(award.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Award>, AwardRepoError> {
            self.find_calls.lock().expect("lock poisoned").push(id);
            Ok(self.store.lock().expect("lock poisoned").get(&id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Award>, AwardRepoError> {
            Ok(self
                .store
                .lock()
                .expect("lock poisoned")
                .values()
                .cloned()
                .collect())
        }

        async fn delete_award(&self, award: &Award) -> Result<(), AwardRepoError> {
            if let Some(id) = award.id {
                self.store.lock().expect("lock poisoned").remove(&id);
            }
            self.deleted
                .lock()
                .expect("lock poisoned")
                .push(award.clone());
            Ok(())
        }
    }
}
