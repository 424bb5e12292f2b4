//! Fixed-capacity round-robin pool.
//!
//! The pool never grows, never shrinks and never blocks. `spawn()` hands out
//! the slot under the cursor and advances it, whether or not that entity is
//! still in play. Callers that want to avoid cutting an in-play entity short
//! ask `has_inactive()` first; the pool itself does not gate anything.

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use super::components::Pooled;
use super::registry::PoolError;

/// Everything a spawn hook may need, supplied by the allocator.
pub struct SpawnContext<'a> {
    pub rng: &'a mut ChaCha8Rng,
    /// Entity that requested the spawn (bullets remember who fired them).
    pub shooter: Option<Entity>,
    pub tint: Option<Color>,
}

/// Capability every poolable actor implements.
///
/// `on_spawn` must fully reset the actor, including cancelling timers left
/// over from a previous activation: a preempted entity gets no `on_despawn`.
pub trait PooledEntity {
    fn on_spawn(&mut self, ctx: &mut SpawnContext);

    /// Cancel outstanding timers. Called whenever the actor leaves play.
    fn on_despawn(&mut self) {}
}

/// Entity-initiated despawn: cancel the actor's timers and park it.
#[inline]
pub fn despawn<T: PooledEntity + ?Sized>(actor: &mut T, pooled: &mut Pooled) {
    actor.on_despawn();
    pooled.active = false;
}

#[derive(Debug, Clone)]
pub struct ObjectPool<H> {
    tag: String,
    cursor: usize,
    slots: Vec<H>,
}

impl<H: Copy + PartialEq> ObjectPool<H> {
    /// Build `capacity` handles up front. The factory receives the slot index
    /// and must return an entity that reports itself inactive.
    pub fn construct(
        tag: impl Into<String>,
        capacity: u32,
        factory: impl FnMut(usize) -> H,
    ) -> Result<Self, PoolError> {
        let tag = tag.into();
        if capacity == 0 {
            return Err(PoolError::ZeroCapacity { tag });
        }

        let slots = (0..capacity as usize).map(factory).collect();
        Ok(Self {
            tag,
            cursor: 0,
            slots,
        })
    }

    /// Next handle in round-robin order. Never fails, never checks activity.
    #[inline]
    pub fn spawn(&mut self) -> H {
        let handle = self.slots[self.cursor];
        self.cursor = (self.cursor + 1) % self.slots.len();
        handle
    }

    pub fn has_inactive(&self, is_active: impl Fn(H) -> bool) -> bool {
        self.slots.iter().any(|&h| !is_active(h))
    }

    pub fn active_count(&self, is_active: impl Fn(H) -> bool) -> usize {
        self.slots.iter().filter(|&&h| is_active(h)).count()
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn slots(&self) -> &[H] {
        &self.slots
    }
}
