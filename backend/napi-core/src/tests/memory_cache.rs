use crate::cache::{CacheProvider, CacheProviders, CacheRole, MemoryCache};

use std::time::Duration;

#[tokio::test]
async fn given_saved_entry_when_fetched_then_returns_value() {
    let cache = MemoryCache::new(8);

    cache.save("k", b"value", Duration::from_secs(60)).await.unwrap();

    assert_eq!(cache.fetch("k").await.unwrap(), Some(b"value".to_vec()));
    assert_eq!(cache.fetch("missing").await.unwrap(), None);
}

#[tokio::test]
async fn given_expired_entry_when_fetched_then_returns_none_and_evicts() {
    let cache = MemoryCache::new(8);
    cache.save("k", b"stale", Duration::ZERO).await.unwrap();

    let value = cache.fetch("k").await.unwrap();

    assert_eq!(value, None);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn given_deleted_entry_when_fetched_then_returns_none() {
    let cache = MemoryCache::new(8);
    cache.save("k", b"v", Duration::from_secs(60)).await.unwrap();

    cache.delete("k").await.unwrap();

    assert_eq!(cache.fetch("k").await.unwrap(), None);
}

/// **VALUE**: Verifies the three cache roles do not share state.
///
/// **WHY THIS MATTERS**: Transport responses written under one role must never be
/// read back through another role that expects a different payload shape.
///
/// **BUG THIS CATCHES**: Would catch one provider being cloned into all three roles.
#[tokio::test]
async fn given_in_memory_providers_when_one_role_writes_then_others_do_not_see_it() {
    // GIVEN: Providers for all three roles
    let providers = CacheProviders::in_memory(16);

    // WHEN: Writing through the transport role
    providers
        .get(CacheRole::Transport)
        .save("shared-key", b"body", Duration::from_secs(60))
        .await
        .unwrap();

    // THEN: Only the transport role can read it
    for role in CacheRole::ALL {
        let value = providers.get(role).fetch("shared-key").await.unwrap();
        assert_eq!(value.is_some(), role == CacheRole::Transport, "role {role}");
    }
}

#[test]
fn given_roles_when_namespaced_then_prefixes_are_distinct() {
    let namespaces: Vec<&str> = CacheRole::ALL.iter().map(|role| role.namespace()).collect();

    assert_eq!(namespaces.len(), 3);
    assert_ne!(namespaces[0], namespaces[1]);
    assert_ne!(namespaces[1], namespaces[2]);
    assert_ne!(namespaces[0], namespaces[2]);
}
