//! Per-user serialization of read-modify-write cycles

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

/// One async mutex per user id. Different users never contend.
#[derive(Default)]
pub(crate) struct UserLocks {
    inner: DashMap<Uuid, Arc<AsyncMutex<()>>>,
}

/// Exclusive access to one user's record, released on drop
pub(crate) struct UserLockGuard<'a> {
    locks: &'a DashMap<Uuid, Arc<AsyncMutex<()>>>,
    user_id: Uuid,
    guard: Option<OwnedMutexGuard<()>>,
}

impl UserLocks {
    /// Wait for exclusive access to `user_id`'s record
    pub(crate) async fn lock(&self, user_id: Uuid) -> UserLockGuard<'_> {
        let lock = self.inner.entry(user_id).or_default().clone();
        let guard = lock.lock_owned().await;

        UserLockGuard {
            locks: &self.inner,
            user_id,
            guard: Some(guard),
        }
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.inner.len()
    }
}

impl Drop for UserLockGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Only the map's own handle left: nobody holds or waits on it
        self.locks
            .remove_if(&self.user_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_user_waits() {
        let locks = Arc::new(UserLocks::default());
        let user = Uuid::new_v4();

        let guard = locks.lock(user).await;
        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.lock(user).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn test_different_users_do_not_contend() {
        let locks = UserLocks::default();
        let _first = locks.lock(Uuid::new_v4()).await;
        let second =
            tokio::time::timeout(Duration::from_millis(50), locks.lock(Uuid::new_v4())).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_released_entries_are_pruned() {
        let locks = UserLocks::default();
        for _ in 0..10 {
            let _guard = locks.lock(Uuid::new_v4()).await;
        }
        assert_eq!(locks.tracked(), 0);

        let held = locks.lock(Uuid::new_v4()).await;
        assert_eq!(locks.tracked(), 1);
        drop(held);
        assert_eq!(locks.tracked(), 0);
    }

    #[tokio::test]
    async fn test_entry_survives_while_someone_waits() {
        let locks = Arc::new(UserLocks::default());
        let user = Uuid::new_v4();

        let guard = locks.lock(user).await;
        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.lock(user).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        drop(guard);
        assert_eq!(locks.tracked(), 1);

        waiter.await.unwrap();
        assert_eq!(locks.tracked(), 0);
    }
}
