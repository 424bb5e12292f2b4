//! Enemy state: a shared core plus one behavior variant per kind.
//!
//! All per-step logic lives in plain methods so it can be exercised without
//! a world. Systems only gather inputs and route outputs (shots, beams,
//! despawns) to messages.

use std::f32::consts::PI;

use bevy::prelude::*;
use rand::Rng;

use crate::common::math::{Countdown, look_angle, move_towards, move_towards_angle, z_angle};
use crate::plugins::pooling::{Pooled, PooledEntity, SpawnContext};

use super::fire::{BeamSequence, FireSequence};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Turret,
    Spinner,
    TripleSpinner,
    Star,
    ChaserSmall,
    ChaserLarge,
    Sniper,
}

/// Muzzle in the enemy's local frame. Bullets leave rotated by `angle` on
/// top of the enemy's own rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Muzzle {
    pub offset: Vec2,
    pub angle: f32,
}

impl Muzzle {
    pub const fn new(offset: Vec2, angle: f32) -> Self {
        Self { offset, angle }
    }

    /// World position and Z rotation for an enemy at `position` facing `rotation`.
    pub fn world(&self, position: Vec2, rotation: f32) -> (Vec2, f32) {
        let offset = Vec2::from_angle(rotation).rotate(self.offset);
        (position + offset, rotation + self.angle)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Volley {
    /// Every muzzle fires on every shot.
    All,
    /// Shot `n` fires muzzle `n % len`.
    Cycle,
}

#[derive(Clone, Debug)]
pub struct EnemyCore {
    pub kind: EnemyKind,
    pub max_health: i32,
    pub health: i32,
    /// Damage dealt to the player on contact.
    pub contact_damage: i32,
    pub experience: u32,
    pub cull_distance: f32,
    pub force: Vec2,
    /// Linear decay of `force`, units/s².
    pub force_decay: f32,
    pub knockback_scale: f32,
    pub tint: Color,
    pub lifetime: Option<f32>,
    life_left: Option<Countdown>,
}

impl EnemyCore {
    pub fn new(kind: EnemyKind, max_health: i32, contact_damage: i32, experience: u32, tint: Color) -> Self {
        Self {
            kind,
            max_health,
            health: max_health,
            contact_damage,
            experience,
            cull_distance: 20.0,
            force: Vec2::ZERO,
            force_decay: 1.0,
            knockback_scale: 1.0,
            tint,
            lifetime: None,
            life_left: None,
        }
    }

    pub fn with_lifetime(mut self, secs: f32) -> Self {
        self.lifetime = Some(secs);
        self
    }

    pub fn with_cull_distance(mut self, distance: f32) -> Self {
        self.cull_distance = distance;
        self
    }

    #[inline]
    pub fn life_left(&self) -> Option<f32> {
        self.life_left.map(Countdown::remaining)
    }
}

#[derive(Clone, Debug)]
pub struct Gunner {
    pub fire: FireSequence,
    pub muzzles: Vec<Muzzle>,
    pub volley: Volley,
    pub bullet: &'static str,
}

impl Gunner {
    fn shots(&self, index: u32, position: Vec2, rotation: f32, out: &mut Vec<EnemyFire>) {
        let mut push = |m: &Muzzle| {
            let (position, angle) = m.world(position, rotation);
            out.push(EnemyFire::Bullet {
                tag: self.bullet,
                position,
                angle,
            });
        };
        match self.volley {
            Volley::All => self.muzzles.iter().for_each(&mut push),
            Volley::Cycle => {
                if !self.muzzles.is_empty() {
                    push(&self.muzzles[index as usize % self.muzzles.len()]);
                }
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Spinner {
    pub gun: Gunner,
    /// Degrees per second.
    pub spin_speed: f32,
    /// +1 counter-clockwise, -1 clockwise. Drawn on spawn.
    pub spin_dir: f32,
    /// Constant drift drawn on spawn.
    pub drift: Vec2,
    /// Moves toward the player at this speed when non-zero.
    pub stalk_speed: f32,
}

#[derive(Clone, Debug)]
pub struct Chaser {
    /// Large chasers shoot; small ones only ram.
    pub gun: Option<Gunner>,
    pub speed: f32,
    pub chasing_dir: Vec2,
    /// Formation this chaser belongs to, if any.
    pub group: Option<Entity>,
}

#[derive(Clone, Debug)]
pub struct Sniper {
    pub beam: BeamSequence,
    pub beam_damage: i32,
    /// Degrees per second at distance 1; the turn rate falls off with distance.
    pub turn_rate: f32,
}

#[derive(Clone, Debug)]
pub enum EnemyBehavior {
    Turret(Gunner),
    Spinner(Spinner),
    Chaser(Chaser),
    Sniper(Sniper),
}

/// Fire produced by one enemy step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnemyFire {
    Bullet {
        tag: &'static str,
        position: Vec2,
        angle: f32,
    },
    Beam {
        origin: Vec2,
        direction: Vec2,
        damage: i32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Alive,
    /// Wandered beyond `cull_distance` from the player.
    Culled,
    /// Lifetime ran out.
    Expired,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DamageOutcome {
    /// Already out of play.
    Ignored,
    Hurt,
    Defeated { experience: u32, tint: Color },
}

#[derive(Component, Clone, Debug)]
pub struct Enemy {
    pub core: EnemyCore,
    pub behavior: EnemyBehavior,
}

impl Enemy {
    pub fn new(core: EnemyCore, behavior: EnemyBehavior) -> Self {
        Self { core, behavior }
    }

    #[inline]
    pub fn kind(&self) -> EnemyKind {
        self.core.kind
    }

    #[inline]
    pub fn is_chaser(&self) -> bool {
        matches!(self.behavior, EnemyBehavior::Chaser(_))
    }

    pub fn group(&self) -> Option<Entity> {
        match &self.behavior {
            EnemyBehavior::Chaser(c) => c.group,
            _ => None,
        }
    }

    /// Culled wave enemies are replaced by the director; chasers are not.
    #[inline]
    pub fn tops_up_wave_when_culled(&self) -> bool {
        !self.is_chaser()
    }

    #[inline]
    pub fn apply_force(&mut self, force: Vec2) {
        self.core.force += force;
    }

    /// Apply damage. A defeat parks the entity immediately, so a second call
    /// in the same step is ignored and experience is awarded once.
    pub fn take_damage(&mut self, pooled: &mut Pooled, amount: i32, impulse: Vec2) -> DamageOutcome {
        if !pooled.active {
            return DamageOutcome::Ignored;
        }
        self.core.force += impulse * self.core.knockback_scale;
        self.core.health -= amount;
        if self.core.health > 0 {
            return DamageOutcome::Hurt;
        }

        self.core.health = 0;
        crate::plugins::pooling::pool::despawn(self, pooled);
        DamageOutcome::Defeated {
            experience: self.core.experience,
            tint: self.core.tint,
        }
    }

    /// Defeat without damage (lifetime, rams, abilities). False when already out of play.
    pub fn defeat(&mut self, pooled: &mut Pooled) -> bool {
        if !pooled.active {
            return false;
        }
        crate::plugins::pooling::pool::despawn(self, pooled);
        true
    }

    /// Charge of the sniper beam, for presentation.
    pub fn beam_charge(&self) -> f32 {
        match &self.behavior {
            EnemyBehavior::Sniper(s) => s.beam.charge(),
            _ => 0.0,
        }
    }

    /// One fixed step. Moves `tf`, pushes any fire into `out`.
    pub fn tick(
        &mut self,
        tf: &mut Transform,
        player: Vec2,
        dt: f32,
        rng: &mut impl Rng,
        out: &mut Vec<EnemyFire>,
    ) -> TickOutcome {
        let mut position = tf.translation.truncate();
        if position.distance(player) > self.core.cull_distance {
            return TickOutcome::Culled;
        }

        position += self.core.force * dt;
        self.core.force = move_towards(self.core.force, Vec2::ZERO, self.core.force_decay * dt);

        let mut rotation = z_angle(tf.rotation);
        match &mut self.behavior {
            EnemyBehavior::Turret(gun) => {
                rotation = look_angle(position, player);
                if let Some(i) = gun.fire.step(dt, rng) {
                    gun.shots(i, position, rotation, out);
                }
            }
            EnemyBehavior::Spinner(s) => {
                position += s.drift * dt;
                rotation += (s.spin_speed * s.spin_dir * dt).to_radians();
                if s.stalk_speed > 0.0 {
                    position = move_towards(position, player, s.stalk_speed * dt);
                }
                if let Some(i) = s.gun.fire.step(dt, rng) {
                    s.gun.shots(i, position, rotation, out);
                }
            }
            EnemyBehavior::Chaser(c) => {
                let dir = (player - position).normalize_or_zero();
                c.chasing_dir = move_towards(c.chasing_dir, dir, dt);
                position += c.speed * dt * c.chasing_dir;
                if dir != Vec2::ZERO {
                    rotation = dir.to_angle();
                }
                if let Some(gun) = &mut c.gun
                    && let Some(i) = gun.fire.step(dt, rng)
                {
                    gun.shots(i, position, rotation, out);
                }
            }
            EnemyBehavior::Sniper(s) => {
                let distance = position.distance(player).max(f32::EPSILON);
                let turn = (s.turn_rate / distance).to_radians() * dt;
                rotation = move_towards_angle(rotation, look_angle(position, player), turn);
                if s.beam.step(dt) {
                    out.push(EnemyFire::Beam {
                        origin: position,
                        direction: Vec2::from_angle(rotation),
                        damage: s.beam_damage,
                    });
                }
            }
        }

        tf.translation = position.extend(tf.translation.z);
        tf.rotation = Quat::from_rotation_z(wrap_angle(rotation));

        if let Some(life) = &mut self.core.life_left
            && life.tick_down(dt)
        {
            return TickOutcome::Expired;
        }
        TickOutcome::Alive
    }
}

#[inline]
fn wrap_angle(a: f32) -> f32 {
    (a + PI).rem_euclid(2.0 * PI) - PI
}

impl PooledEntity for Enemy {
    fn on_spawn(&mut self, ctx: &mut SpawnContext) {
        let core = &mut self.core;
        core.health = core.max_health;
        core.force = Vec2::ZERO;
        core.life_left = core.lifetime.map(Countdown::new);

        match &mut self.behavior {
            EnemyBehavior::Turret(gun) => gun.fire.restart(ctx.rng),
            EnemyBehavior::Spinner(s) => {
                let dir = Vec2::new(ctx.rng.gen_range(-1.0..=1.0), ctx.rng.gen_range(-1.0..=1.0));
                s.drift = dir * ctx.rng.gen_range(0.1..=0.5);
                s.spin_dir = if ctx.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                s.gun.fire.restart(ctx.rng);
            }
            EnemyBehavior::Chaser(c) => {
                c.chasing_dir = Vec2::ZERO;
                if let Some(gun) = &mut c.gun {
                    gun.fire.restart(ctx.rng);
                }
            }
            EnemyBehavior::Sniper(s) => s.beam.restart(),
        }
    }

    fn on_despawn(&mut self) {
        self.core.life_left = None;
        match &mut self.behavior {
            EnemyBehavior::Turret(gun) => gun.fire.cancel(),
            EnemyBehavior::Spinner(s) => s.gun.fire.cancel(),
            EnemyBehavior::Chaser(c) => {
                if let Some(gun) = &mut c.gun {
                    gun.fire.cancel();
                }
            }
            EnemyBehavior::Sniper(s) => s.beam.cancel(),
        }
    }
}

/// Bookkeeping entity that owns a formation of chasers.
#[derive(Component, Clone, Debug, Default)]
pub struct ChaserGroup {
    /// Member entity and its offset from the group's spawn point.
    pub members: Vec<(Entity, Vec2)>,
}
