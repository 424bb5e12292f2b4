use bevy::prelude::*;

/// Pool membership and the single source of truth for "in play".
///
/// Members of a chaser group carry their group's tag: they are recycled
/// together with the group entity that owns the pool slot.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Pooled {
    pub tag: String,
    pub active: bool,
}

impl Pooled {
    /// A parked entity, the state every pooled entity starts in.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            active: false,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }
}
