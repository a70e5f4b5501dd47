use crate::character::{Character, Launch};
use crate::config::{GRENADE_BLAST_RADIUS, ROCKET_BLAST_RADIUS};
use crate::error::SimError;
use crate::projectile::{Grenade, Projectile, Rocket};
use crate::terrain::Terrain;
use crate::types::{Facing, Point};
use crate::utils::firing_direction;

// The weapons a team can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttackKind {
    #[default]
    RocketLauncher,
    ThrowGrenade,
}

// Aim to use instead of the launcher's own when scoring a hypothetical shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackOverride {
    pub facing: Facing,
    pub angle: f64, // Degrees, 0 is horizontal
    pub power: f64,
}

impl AttackKind {
    pub const ALL: [AttackKind; 2] = [AttackKind::RocketLauncher, AttackKind::ThrowGrenade];

    pub fn name(self) -> &'static str {
        match self {
            AttackKind::RocketLauncher => "Rocket launcher",
            AttackKind::ThrowGrenade => "Grenade",
        }
    }

    pub fn blast_radius(self) -> f64 {
        match self {
            AttackKind::RocketLauncher => ROCKET_BLAST_RADIUS,
            AttackKind::ThrowGrenade => GRENADE_BLAST_RADIUS,
        }
    }

    /// Turns a released attack into the projectile this weapon fires.
    pub fn release(self, launch: Launch) -> Projectile {
        match self {
            AttackKind::RocketLauncher => {
                Projectile::Rocket(Rocket::new(launch.origin, launch.velocity, launch.launcher))
            }
            AttackKind::ThrowGrenade => {
                Projectile::Grenade(Grenade::new(launch.origin, launch.velocity, launch.launcher))
            }
        }
    }

    /// Scores a hypothetical shot from `launcher` with the overridden aim, returning the net
    /// damage and the blast's distance from `target`.
    pub fn release_phantom(
        self,
        launcher: &Character,
        attack_override: AttackOverride,
        terrain: &Terrain,
        characters: &[Character],
        target: Point,
    ) -> Result<(i32, f64), SimError> {
        let direction = firing_direction(attack_override.angle, attack_override.facing);
        let velocity = direction * attack_override.power;
        let launch = Launch {
            launcher: launcher.id,
            origin: launcher.kinematics.pos,
            velocity,
        };
        self.release(launch).phantom(terrain, characters, target)
    }
}
