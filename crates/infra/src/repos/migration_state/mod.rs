mod inmemory;
mod postgres;

pub use inmemory::InMemoryMigrationStateRepo;
use kennel_reminders_domain::{MigrationState, ID};
pub use postgres::PostgresMigrationStateRepo;

#[async_trait::async_trait]
pub trait IMigrationStateRepo: Send + Sync {
    /// Users without a stored row are not migrated and have no failures
    async fn find(&self, user_id: &ID) -> anyhow::Result<MigrationState>;
    /// Sets the migrated flag if it is unset. Returns true only for the
    /// call that performed the transition.
    async fn mark_migrated(&self, user_id: &ID) -> anyhow::Result<bool>;
    /// Increments the failure counter and returns the new count
    async fn record_failure(&self, user_id: &ID) -> anyhow::Result<i64>;
}

#[cfg(test)]
mod tests {
    use crate::create_test_contexts;
    use kennel_reminders_domain::{MigrationState, ID};

    #[tokio::test]
    async fn mark_migrated_is_compare_and_set() {
        for ctx in create_test_contexts().await {
            let user_id = ID::default();
            let repo = &ctx.repos.migration_states;
            assert_eq!(repo.find(&user_id).await.unwrap(), MigrationState::default());

            assert!(repo.mark_migrated(&user_id).await.expect("To set flag"));
            assert!(!repo.mark_migrated(&user_id).await.expect("Already set is no error"));
            assert!(repo.find(&user_id).await.unwrap().migrated);
            assert!(!repo.find(&ID::default()).await.unwrap().migrated);
        }
    }

    #[tokio::test]
    async fn record_failure_counts_up() {
        for ctx in create_test_contexts().await {
            let user_id = ID::default();
            let repo = &ctx.repos.migration_states;
            assert_eq!(repo.record_failure(&user_id).await.unwrap(), 1);
            assert_eq!(repo.record_failure(&user_id).await.unwrap(), 2);

            assert!(repo.mark_migrated(&user_id).await.unwrap());
            assert_eq!(
                repo.find(&user_id).await.unwrap(),
                MigrationState {
                    migrated: true,
                    failed_attempts: 2
                }
            );
        }
    }
}
