//! Tag → pool map, built once from declarative entries.

use bevy::platform::collections::{HashMap, HashSet};
use bevy::prelude::*;
use thiserror::Error;

use crate::common::config::PoolEntry;

use super::pool::ObjectPool;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("object pool \"{tag}\" is already registered")]
    DuplicateTag { tag: String },
    #[error("object pool \"{tag}\" must have a positive capacity")]
    ZeroCapacity { tag: String },
    #[error("no object pool registered with tag \"{tag}\"")]
    NotFound { tag: String },
}

impl PoolError {
    /// Configuration errors abort startup; `NotFound` is a programming error.
    #[inline]
    pub fn is_config_error(&self) -> bool {
        !matches!(self, Self::NotFound { .. })
    }
}

#[derive(Resource, Debug)]
pub struct PoolRegistry<H = Entity> {
    pools: HashMap<String, ObjectPool<H>>,
}

impl<H> Default for PoolRegistry<H> {
    fn default() -> Self {
        Self {
            pools: HashMap::default(),
        }
    }
}

impl<H: Copy + PartialEq> PoolRegistry<H> {
    /// Build one pool per entry.
    ///
    /// Every entry is validated before the factory runs, so a rejected
    /// configuration never instantiates anything.
    pub fn register<'a>(
        &mut self,
        entries: impl IntoIterator<Item = &'a PoolEntry>,
        mut factory: impl FnMut(&PoolEntry, usize) -> H,
    ) -> Result<(), PoolError> {
        let entries: Vec<&PoolEntry> = entries.into_iter().collect();

        let mut seen: HashSet<&str> = HashSet::default();
        for entry in &entries {
            if self.pools.contains_key(&entry.tag) || !seen.insert(entry.tag.as_str()) {
                return Err(PoolError::DuplicateTag {
                    tag: entry.tag.clone(),
                });
            }
            if entry.capacity == 0 {
                return Err(PoolError::ZeroCapacity {
                    tag: entry.tag.clone(),
                });
            }
        }

        for entry in entries {
            let pool =
                ObjectPool::construct(entry.tag.clone(), entry.capacity, |i| factory(entry, i))?;
            self.pools.insert(entry.tag.clone(), pool);
        }
        Ok(())
    }

    /// Add a pool built elsewhere.
    pub fn insert(&mut self, pool: ObjectPool<H>) -> Result<(), PoolError> {
        if self.pools.contains_key(pool.tag()) {
            return Err(PoolError::DuplicateTag {
                tag: pool.tag().to_owned(),
            });
        }
        self.pools.insert(pool.tag().to_owned(), pool);
        Ok(())
    }

    pub fn spawn(&mut self, tag: &str) -> Result<H, PoolError> {
        self.pools
            .get_mut(tag)
            .map(ObjectPool::spawn)
            .ok_or_else(|| not_found(tag))
    }

    pub fn has_inactive(&self, tag: &str, is_active: impl Fn(H) -> bool) -> Result<bool, PoolError> {
        self.pool(tag).map(|p| p.has_inactive(is_active))
    }

    pub fn active_count(&self, tag: &str, is_active: impl Fn(H) -> bool) -> Result<usize, PoolError> {
        self.pool(tag).map(|p| p.active_count(is_active))
    }

    pub fn capacity(&self, tag: &str) -> Result<usize, PoolError> {
        self.pool(tag).map(ObjectPool::capacity)
    }

    pub fn pool(&self, tag: &str) -> Result<&ObjectPool<H>, PoolError> {
        self.pools.get(tag).ok_or_else(|| not_found(tag))
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.pools.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

#[inline]
fn not_found(tag: &str) -> PoolError {
    PoolError::NotFound {
        tag: tag.to_owned(),
    }
}
