//! Unit tests for the auth crate

#[cfg(test)]
mod value_object_tests {
    use crate::domain::value_object::{ApiKey, mask_key};

    #[test]
    fn test_mask_key_hides_all_but_last_four() {
        assert_eq!(mask_key("testkey123"), "******y123");
        assert_eq!(mask_key("abcd"), "abcd");
        assert_eq!(mask_key("abc"), "abc");
        assert_eq!(mask_key(""), "-");
    }

    #[test]
    fn test_minted_keys_are_unique_and_header_safe() {
        let a = ApiKey::mint();
        let b = ApiKey::mint();
        assert_ne!(a.expose(), b.expose());
        assert_eq!(a.expose().len(), 32);
        assert!(
            a.expose()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_display_and_debug_are_masked() {
        let key = ApiKey::from_string("supersecretkey99".to_string());
        let shown = format!("{key}");
        assert!(shown.ends_with("ey99"));
        assert!(!shown.contains("supersecret"));
        let debugged = format!("{key:?}");
        assert!(!debugged.contains("supersecret"));
    }
}

#[cfg(test)]
mod repository_tests {
    use chrono::Utc;
    use sqlx::SqlitePool;
    use sqlx::sqlite::SqlitePoolOptions;

    use crate::domain::entity::ApiKeyRecord;
    use crate::domain::repository::ApiKeyRepository;
    use crate::infra::sqlite::SqliteApiKeyRepository;

    // Single connection: every handle must see the same in-memory database.
    async fn test_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite")
    }

    fn record(key: &str, limit: u32) -> ApiKeyRecord {
        ApiKeyRecord {
            api_key: key.to_string(),
            client_name: "acme".to_string(),
            created_at: Utc::now(),
            rate_limit: limit,
            active: true,
            last_used_at: None,
        }
    }

    #[tokio::test]
    async fn test_schema_is_idempotent_and_seeds_once() {
        let repo = SqliteApiKeyRepository::new(test_pool().await);
        repo.ensure_schema(true).await.unwrap();
        repo.ensure_schema(true).await.unwrap();

        let keys = repo.list().await.unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].api_key, "testkey123");
        assert_eq!(keys[0].client_name, "local-dev");
        assert_eq!(keys[0].rate_limit, 60);
        assert!(keys[0].active);
    }

    #[tokio::test]
    async fn test_no_seed_leaves_table_empty() {
        let repo = SqliteApiKeyRepository::new(test_pool().await);
        repo.ensure_schema(false).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_and_find_round_trip() {
        let repo = SqliteApiKeyRepository::new(test_pool().await);
        repo.ensure_schema(false).await.unwrap();

        repo.insert(&record("k-1", 120)).await.unwrap();

        let found = repo.find("k-1").await.unwrap().expect("record exists");
        assert_eq!(found.api_key, "k-1");
        assert_eq!(found.client_name, "acme");
        assert_eq!(found.rate_limit, 120);
        assert!(found.active);
        assert!(found.last_used_at.is_none());

        assert!(repo.find("unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_touch_last_used() {
        let repo = SqliteApiKeyRepository::new(test_pool().await);
        repo.ensure_schema(false).await.unwrap();
        repo.insert(&record("k-1", 60)).await.unwrap();

        repo.touch_last_used("k-1").await.unwrap();
        let found = repo.find("k-1").await.unwrap().unwrap();
        assert!(found.last_used_at.is_some());
    }

    #[tokio::test]
    async fn test_set_active_and_delete() {
        let repo = SqliteApiKeyRepository::new(test_pool().await);
        repo.ensure_schema(false).await.unwrap();
        repo.insert(&record("k-1", 60)).await.unwrap();

        assert!(repo.set_active("k-1", false).await.unwrap());
        assert!(!repo.find("k-1").await.unwrap().unwrap().active);
        assert!(!repo.set_active("missing", false).await.unwrap());

        assert!(repo.delete("k-1").await.unwrap());
        assert!(repo.find("k-1").await.unwrap().is_none());
        assert!(!repo.delete("k-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_replace_key_keeps_metadata() {
        let repo = SqliteApiKeyRepository::new(test_pool().await);
        repo.ensure_schema(false).await.unwrap();
        repo.insert(&record("old-key", 90)).await.unwrap();

        assert!(repo.replace_key("old-key", "new-key").await.unwrap());
        assert!(repo.find("old-key").await.unwrap().is_none());

        let rotated = repo.find("new-key").await.unwrap().expect("rotated record");
        assert_eq!(rotated.client_name, "acme");
        assert_eq!(rotated.rate_limit, 90);

        assert!(!repo.replace_key("old-key", "other").await.unwrap());
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use sqlx::sqlite::SqlitePoolOptions;

    use crate::application::{ManageKeysUseCase, VerifyApiKeyUseCase};
    use crate::error::AuthError;
    use crate::infra::sqlite::SqliteApiKeyRepository;

    async fn seeded_repo() -> Arc<SqliteApiKeyRepository> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        let repo = SqliteApiKeyRepository::new(pool);
        repo.ensure_schema(true).await.unwrap();
        Arc::new(repo)
    }

    #[tokio::test]
    async fn test_verify_valid_key_and_tracks_usage() {
        let repo = seeded_repo().await;
        let use_case = VerifyApiKeyUseCase::new(repo.clone());

        let record = use_case.verify("testkey123").await.unwrap();
        assert_eq!(record.client_name, "local-dev");
        assert_eq!(record.rate_limit, 60);

        // Best-effort usage tracking landed.
        use crate::domain::repository::ApiKeyRepository;
        let stored = repo.find("testkey123").await.unwrap().unwrap();
        assert!(stored.last_used_at.is_some());
    }

    #[tokio::test]
    async fn test_verify_unknown_key() {
        let repo = seeded_repo().await;
        let use_case = VerifyApiKeyUseCase::new(repo);
        assert!(matches!(
            use_case.verify("nope").await,
            Err(AuthError::InvalidApiKey)
        ));
    }

    #[tokio::test]
    async fn test_verify_inactive_key() {
        let repo = seeded_repo().await;
        let manage = ManageKeysUseCase::new(repo.clone());
        manage.set_active("testkey123", false).await.unwrap();

        let use_case = VerifyApiKeyUseCase::new(repo);
        assert!(matches!(
            use_case.verify("testkey123").await,
            Err(AuthError::KeyInactive)
        ));
    }

    #[tokio::test]
    async fn test_create_revoke_rotate() {
        let repo = seeded_repo().await;
        let manage = ManageKeysUseCase::new(repo.clone());

        let created = manage.create("widgets-inc".to_string(), 200).await.unwrap();
        assert_eq!(created.rate_limit, 200);
        assert_eq!(created.api_key.len(), 32);

        let rotated = manage.rotate(&created.api_key).await.unwrap();
        assert_ne!(rotated, created.api_key);

        let verify = VerifyApiKeyUseCase::new(repo.clone());
        assert!(verify.verify(&created.api_key).await.is_err());
        let record = verify.verify(&rotated).await.unwrap();
        assert_eq!(record.client_name, "widgets-inc");

        manage.revoke(&rotated).await.unwrap();
        assert!(matches!(
            manage.revoke(&rotated).await,
            Err(AuthError::KeyNotFound)
        ));
    }
}
