//! Collision → gameplay contact bridge.
//!
//! Two kinds of contact reach gameplay:
//! - `Enter`: the first step two colliders overlap (from `CollisionStart`).
//!   Bullets and pickups react to these.
//! - `Stay`: every step an active enemy overlaps something (from
//!   `CollidingEntities`). Contact damage and chaser pushing react to these.
//!   A `Stay` contact always has the enemy as `entity`.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::plugins::enemies::components::Enemy;
use crate::plugins::pooling::Pooled;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactPhase {
    Enter,
    Stay,
}

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub entity: Entity,
    pub other: Entity,
    /// Unit vector pointing from `other` toward `entity`.
    pub normal: Vec2,
    pub phase: ContactPhase,
}

impl Contact {
    pub fn new(entity: Entity, other: Entity, normal: Vec2, phase: ContactPhase) -> Self {
        Self {
            entity,
            other,
            normal,
            phase,
        }
    }

    /// Orient the pair so that `pick` selects the first participant.
    ///
    /// Returns `(first, second, normal pointing from second toward first)`.
    pub fn split(&self, pick: impl Fn(Entity) -> bool) -> Option<(Entity, Entity, Vec2)> {
        if pick(self.entity) {
            Some((self.entity, self.other, self.normal))
        } else if pick(self.other) {
            Some((self.other, self.entity, -self.normal))
        } else {
            None
        }
    }
}

#[inline]
fn separation(a: Vec2, b: Vec2) -> Vec2 {
    (a - b).normalize_or_zero()
}

pub fn bridge_contacts(
    mut started: MessageReader<CollisionStart>,
    q_tf: Query<&Transform>,
    q_enemies: Query<(Entity, &Pooled, &CollidingEntities, &Transform), With<Enemy>>,
    mut out: MessageWriter<Contact>,
) {
    for ev in started.read() {
        let a = ev.body1.unwrap_or(ev.collider1);
        let b = ev.body2.unwrap_or(ev.collider2);
        let (Ok(tf_a), Ok(tf_b)) = (q_tf.get(a), q_tf.get(b)) else {
            continue;
        };
        let normal = separation(tf_a.translation.truncate(), tf_b.translation.truncate());
        out.write(Contact::new(a, b, normal, ContactPhase::Enter));
    }

    for (enemy, pooled, colliding, tf) in &q_enemies {
        if !pooled.active {
            continue;
        }
        for &other in colliding.iter() {
            let Ok(tf_other) = q_tf.get(other) else {
                continue;
            };
            let normal = separation(tf.translation.truncate(), tf_other.translation.truncate());
            out.write(Contact::new(enemy, other, normal, ContactPhase::Stay));
        }
    }
}
