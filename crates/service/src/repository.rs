use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::DomainEntity;

/// Outcome classes a persistence backend reports to the services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    #[error("no rows")]
    NotFound,
    #[error("unique constraint violated")]
    AlreadyExists,
    /// A referenced parent row (named by entity) does not exist.
    #[error("{0} referenced by the row does not exist")]
    MissingParent(&'static str),
    #[error("{0}")]
    Backend(String),
}

/// Row-level persistence for one entity type.
#[async_trait]
pub trait Repository<T: DomainEntity>: Send + Sync {
    async fn create(&self, entity: &T) -> Result<(), RepoError>;
    async fn get(&self, id: Uuid) -> Result<T, RepoError>;
    async fn update(&self, entity: &T) -> Result<(), RepoError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Lookup by the owning row's id (employee by user, resume by employee).
#[async_trait]
pub trait ForeignKeyLookup<T: DomainEntity>: Repository<T> {
    async fn get_by_foreign_key(&self, fk: Uuid) -> Result<T, RepoError>;
}

/// Ownership-scoped and full listings, newest first.
#[async_trait]
pub trait OwnedListing<T: DomainEntity>: Repository<T> {
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<T>, RepoError>;
    async fn list_all(&self) -> Result<Vec<T>, RepoError>;
}

/// Simple in-memory repository for tests, doc tests and local runs
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Mutex, MutexGuard};
    use std::time::Duration;

    struct Slot<T> {
        seq: u64,
        entity: T,
    }

    struct Table<T> {
        rows: HashMap<Uuid, Slot<T>>,
        next_seq: u64,
    }

    /// Keeps rows in a map and honours [`DomainEntity::unique_key`].
    ///
    /// Counts write calls so tests can assert that a failed operation never
    /// reached the backend. `set_latency` and `fail_with` simulate a slow or
    /// broken database.
    pub struct InMemoryRepository<T> {
        table: Mutex<Table<T>>,
        writes: AtomicUsize,
        latency: Mutex<Option<Duration>>,
        failure: Mutex<Option<String>>,
    }

    impl<T> Default for InMemoryRepository<T> {
        fn default() -> Self {
            Self {
                table: Mutex::new(Table { rows: HashMap::new(), next_seq: 0 }),
                writes: AtomicUsize::new(0),
                latency: Mutex::new(None),
                failure: Mutex::new(None),
            }
        }
    }

    impl<T: DomainEntity> InMemoryRepository<T> {
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of create/update/delete calls that reached the store.
        pub fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        pub fn len(&self) -> usize {
            self.table.lock().map(|t| t.rows.len()).unwrap_or(0)
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        pub fn set_latency(&self, latency: Option<Duration>) {
            if let Ok(mut slot) = self.latency.lock() {
                *slot = latency;
            }
        }

        /// Make every following call fail with a backend error until cleared.
        pub fn fail_with(&self, message: Option<&str>) {
            if let Ok(mut slot) = self.failure.lock() {
                *slot = message.map(str::to_string);
            }
        }

        async fn enter(&self) -> Result<MutexGuard<'_, Table<T>>, RepoError> {
            let latency = self.latency.lock().ok().and_then(|l| *l);
            if let Some(delay) = latency {
                tokio::time::sleep(delay).await;
            }
            let failure = self.failure.lock().ok().and_then(|f| f.clone());
            if let Some(message) = failure {
                return Err(RepoError::Backend(message));
            }
            self.table.lock().map_err(|_| RepoError::Backend("in-memory store poisoned".into()))
        }

        // newest first; insertion order breaks ties
        fn sorted(mut rows: Vec<&Slot<T>>) -> Vec<T> {
            rows.sort_by(|a, b| b.entity.created_at().cmp(&a.entity.created_at()).then(b.seq.cmp(&a.seq)));
            rows.into_iter().map(|s| s.entity.clone()).collect()
        }
    }

    fn conflicts<T: DomainEntity>(table: &Table<T>, entity: &T) -> bool {
        match entity.unique_key() {
            Some(key) => table
                .rows
                .values()
                .any(|s| s.entity.id() != entity.id() && s.entity.unique_key().as_deref() == Some(key.as_str())),
            None => false,
        }
    }

    #[async_trait]
    impl<T: DomainEntity> Repository<T> for InMemoryRepository<T> {
        async fn create(&self, entity: &T) -> Result<(), RepoError> {
            let mut table = self.enter().await?;
            self.writes.fetch_add(1, Ordering::SeqCst);
            if table.rows.contains_key(&entity.id()) || conflicts(&table, entity) {
                return Err(RepoError::AlreadyExists);
            }
            let seq = table.next_seq;
            table.next_seq += 1;
            table.rows.insert(entity.id(), Slot { seq, entity: entity.clone() });
            Ok(())
        }

        async fn get(&self, id: Uuid) -> Result<T, RepoError> {
            let table = self.enter().await?;
            table.rows.get(&id).map(|s| s.entity.clone()).ok_or(RepoError::NotFound)
        }

        async fn update(&self, entity: &T) -> Result<(), RepoError> {
            let mut table = self.enter().await?;
            self.writes.fetch_add(1, Ordering::SeqCst);
            if conflicts(&table, entity) {
                return Err(RepoError::AlreadyExists);
            }
            match table.rows.get_mut(&entity.id()) {
                Some(slot) => {
                    slot.entity = entity.clone();
                    Ok(())
                }
                None => Err(RepoError::NotFound),
            }
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            let mut table = self.enter().await?;
            self.writes.fetch_add(1, Ordering::SeqCst);
            table.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
        }
    }

    #[async_trait]
    impl<T: DomainEntity> ForeignKeyLookup<T> for InMemoryRepository<T> {
        async fn get_by_foreign_key(&self, fk: Uuid) -> Result<T, RepoError> {
            let table = self.enter().await?;
            let owned = table.rows.values().filter(|s| s.entity.owner_id() == Some(fk)).collect();
            Self::sorted(owned).into_iter().next().ok_or(RepoError::NotFound)
        }
    }

    #[async_trait]
    impl<T: DomainEntity> OwnedListing<T> for InMemoryRepository<T> {
        async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<T>, RepoError> {
            let table = self.enter().await?;
            let owned = table.rows.values().filter(|s| s.entity.owner_id() == Some(owner)).collect();
            Ok(Self::sorted(owned))
        }

        async fn list_all(&self) -> Result<Vec<T>, RepoError> {
            let table = self.enter().await?;
            Ok(Self::sorted(table.rows.values().collect()))
        }
    }
}
