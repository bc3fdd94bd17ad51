//! Cache providers handed to the NAPI client.
//!
//! The client keeps one provider per [`CacheRole`]. When a cache backend is
//! configured each role gets its own connection and key namespace, so
//! nothing written under one role is visible to another.

pub mod memory;
pub mod redis_cache;

pub use memory::MemoryCache;
pub use redis_cache::RedisCache;

use crate::config::CacheEndpoint;
use crate::error::CacheError;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

/// Byte-oriented cache capability.
#[async_trait]
pub trait CacheProvider: Send + Sync {
    async fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    async fn save(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheRole {
    Reflection,
    Transport,
    DependencyInjection,
}

impl CacheRole {
    pub const ALL: [CacheRole; 3] = [
        CacheRole::Reflection,
        CacheRole::Transport,
        CacheRole::DependencyInjection,
    ];

    /// Key prefix isolating this role inside a shared backend.
    pub fn namespace(&self) -> &'static str {
        match self {
            CacheRole::Reflection => "napi:reflection:",
            CacheRole::Transport => "napi:transport:",
            CacheRole::DependencyInjection => "napi:di:",
        }
    }
}

impl fmt::Display for CacheRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CacheRole::Reflection => "reflection",
            CacheRole::Transport => "transport",
            CacheRole::DependencyInjection => "dependency-injection",
        };
        write!(f, "{name}")
    }
}

/// One provider per role.
#[derive(Clone)]
pub struct CacheProviders {
    reflection: Arc<dyn CacheProvider>,
    transport: Arc<dyn CacheProvider>,
    dependency_injection: Arc<dyn CacheProvider>,
}

impl CacheProviders {
    pub fn new(
        reflection: Arc<dyn CacheProvider>,
        transport: Arc<dyn CacheProvider>,
        dependency_injection: Arc<dyn CacheProvider>,
    ) -> Self {
        Self {
            reflection,
            transport,
            dependency_injection,
        }
    }

    /// Open three independent connections to `endpoint`.
    ///
    /// Without a timeout each connection waits as long as the backend takes.
    pub async fn connect(
        endpoint: &CacheEndpoint,
        timeout: Option<Duration>,
    ) -> Result<Self, CacheError> {
        let reflection = RedisCache::connect(endpoint, CacheRole::Reflection, timeout).await?;
        let transport = RedisCache::connect(endpoint, CacheRole::Transport, timeout).await?;
        let dependency_injection =
            RedisCache::connect(endpoint, CacheRole::DependencyInjection, timeout).await?;

        Ok(Self::new(
            Arc::new(reflection),
            Arc::new(transport),
            Arc::new(dependency_injection),
        ))
    }

    /// Three separate in-process caches.
    pub fn in_memory(capacity: usize) -> Self {
        Self::new(
            Arc::new(MemoryCache::new(capacity)),
            Arc::new(MemoryCache::new(capacity)),
            Arc::new(MemoryCache::new(capacity)),
        )
    }

    pub fn get(&self, role: CacheRole) -> &Arc<dyn CacheProvider> {
        match role {
            CacheRole::Reflection => &self.reflection,
            CacheRole::Transport => &self.transport,
            CacheRole::DependencyInjection => &self.dependency_injection,
        }
    }
}

impl fmt::Debug for CacheProviders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheProviders").finish_non_exhaustive()
    }
}
