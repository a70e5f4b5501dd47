//! Rockets and grenades in flight, and their phantom (scoring-only) simulation.

use crate::attack::AttackKind;
use crate::character::Character;
use crate::config::{GRENADE_FUSE_TICKS, MAX_PHANTOM_STEPS};
use crate::error::SimError;
use crate::explosion::estimate_explosion_damage;
use crate::kinematics::{BounceParameters, Kinematics, Motion};
use crate::terrain::Terrain;
use crate::types::{CharacterId, Point};
use crate::world_object::{UpdateOutcome, WorldContext, WorldObject};

/// Explodes on the first solid pixel it reaches. The destination is tested directly, without
/// the bisection characters and grenades use.
#[derive(Debug, Clone, PartialEq)]
pub struct Rocket {
    pub kinematics: Kinematics,
    pub sent_by: CharacterId,
}

/// Bounces around until its fuse runs out, then explodes wherever it is.
#[derive(Debug, Clone, PartialEq)]
pub struct Grenade {
    pub kinematics: Kinematics,
    pub sent_by: CharacterId,
    pub frames_left: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Projectile {
    Rocket(Rocket),
    Grenade(Grenade),
}

impl Rocket {
    pub fn new(origin: Point, velocity: Point, sent_by: CharacterId) -> Self {
        Rocket {
            kinematics: Kinematics::new(origin, velocity),
            sent_by,
        }
    }

    fn step(&mut self, terrain: &Terrain) -> UpdateOutcome {
        if terrain.has_left_map(self.kinematics.pos) {
            return UpdateOutcome::Exited;
        }

        self.kinematics.apply_gravity();
        self.kinematics.pos += self.kinematics.vel;

        if terrain.is_solid_at(self.kinematics.pos) {
            UpdateOutcome::Detonated {
                at: self.kinematics.pos,
                radius: AttackKind::RocketLauncher.blast_radius(),
            }
        } else {
            UpdateOutcome::Continue
        }
    }
}

impl Grenade {
    pub fn new(origin: Point, velocity: Point, sent_by: CharacterId) -> Self {
        Grenade {
            kinematics: Kinematics::new(origin, velocity),
            sent_by,
            frames_left: GRENADE_FUSE_TICKS,
        }
    }

    fn step(
        &mut self,
        terrain: &Terrain,
        bounce: BounceParameters,
    ) -> Result<UpdateOutcome, SimError> {
        if terrain.has_left_map(self.kinematics.pos) {
            return Ok(UpdateOutcome::Exited);
        }

        // Detonates airborne or grounded alike
        if self.frames_left <= 0 {
            return Ok(UpdateOutcome::Detonated {
                at: self.kinematics.pos,
                radius: AttackKind::ThrowGrenade.blast_radius(),
            });
        }

        self.kinematics.apply_gravity();
        if self.kinematics.advance(terrain)? == Motion::Collided {
            let shape = terrain.surface_shape(self.kinematics.pos.pixel());
            self.kinematics.vel = bounce.bounce(self.kinematics.vel, shape);
        }

        self.frames_left -= 1;
        Ok(UpdateOutcome::Continue)
    }
}

impl Projectile {
    pub fn sent_by(&self) -> CharacterId {
        match self {
            Projectile::Rocket(r) => r.sent_by,
            Projectile::Grenade(g) => g.sent_by,
        }
    }

    /// Advances one tick against the terrain. Shared by live play and phantom runs.
    pub fn step(&mut self, terrain: &Terrain) -> Result<UpdateOutcome, SimError> {
        let bounce = self.bounce_parameters();
        match self {
            Projectile::Rocket(r) => Ok(r.step(terrain)),
            Projectile::Grenade(g) => g.step(terrain, bounce),
        }
    }

    /// Flies a copy of this projectile to completion without touching the world and returns
    /// the net damage its blast would deal plus the blast's distance to `target`. A projectile
    /// that leaves the map scores zero damage.
    pub fn phantom(
        &self,
        terrain: &Terrain,
        characters: &[Character],
        target: Point,
    ) -> Result<(i32, f64), SimError> {
        let mut ghost = self.clone();
        for _ in 0..MAX_PHANTOM_STEPS {
            match ghost.step(terrain)? {
                UpdateOutcome::Continue => {}
                UpdateOutcome::Exited => return Ok((0, ghost.position().distance(&target))),
                UpdateOutcome::Detonated { at, radius } => {
                    let damage = estimate_explosion_damage(at, radius, ghost.sent_by(), characters);
                    return Ok((damage, at.distance(&target)));
                }
            }
        }
        Ok((0, ghost.position().distance(&target)))
    }
}

impl WorldObject for Projectile {
    fn kinematics(&self) -> &Kinematics {
        match self {
            Projectile::Rocket(r) => &r.kinematics,
            Projectile::Grenade(g) => &g.kinematics,
        }
    }

    fn update(&mut self, ctx: &mut WorldContext<'_>) -> Result<UpdateOutcome, SimError> {
        let outcome = self.step(ctx.terrain)?;
        if let UpdateOutcome::Detonated { at, radius } = outcome {
            crate::debug_physics!(
                tick: ctx.tick,
                "Detonation at ({:.1}, {:.1}) radius {}",
                at.x,
                at.y,
                radius
            );
        }
        Ok(outcome)
    }

    // Rockets are always in flight and grenades always have a fuse burning
    fn is_in_steady_state(&self) -> bool {
        false
    }

    fn bounce_parameters(&self) -> BounceParameters {
        match self {
            Projectile::Rocket(_) => BounceParameters::GENERIC,
            Projectile::Grenade(_) => BounceParameters::GRENADE,
        }
    }

    fn visible(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GRENADE_BLAST_RADIUS, ROCKET_BLAST_RADIUS};
    use crate::types::{Facing, TeamId};
    use assert_approx_eq::assert_approx_eq;

    fn ground() -> Terrain {
        Terrain::from_fn(400, 200, |_, y| y >= 100)
    }

    fn duel() -> Vec<Character> {
        vec![
            Character::new(
                CharacterId(0),
                "Joey",
                TeamId(0),
                Point::new(50.0, 99.0),
                Facing::Right,
            ),
            Character::new(
                CharacterId(1),
                "Ronald",
                TeamId(1),
                Point::new(250.0, 99.0),
                Facing::Left,
            ),
        ]
    }

    #[test]
    fn test_rocket_detonates_on_contact() {
        let terrain = ground();
        let mut rocket = Projectile::Rocket(Rocket::new(
            Point::new(100.0, 95.0),
            Point::new(0.0, 2.0),
            CharacterId(0),
        ));
        assert_eq!(rocket.step(&terrain), Ok(UpdateOutcome::Continue));
        assert_eq!(rocket.step(&terrain), Ok(UpdateOutcome::Continue));
        match rocket.step(&terrain).unwrap() {
            UpdateOutcome::Detonated { at, radius } => {
                assert!(at.y >= 100.0);
                assert_approx_eq!(radius, ROCKET_BLAST_RADIUS);
            }
            other => panic!("expected detonation, got {:?}", other),
        }
    }

    #[test]
    fn test_rocket_exits_map() {
        let terrain = ground();
        let mut rocket = Projectile::Rocket(Rocket::new(
            Point::new(395.0, 10.0),
            Point::new(8.0, 0.0),
            CharacterId(0),
        ));
        assert_eq!(rocket.step(&terrain), Ok(UpdateOutcome::Continue));
        assert_eq!(rocket.step(&terrain), Ok(UpdateOutcome::Exited));
    }

    #[test]
    fn test_grenade_bounces_then_detonates_on_fuse() {
        let terrain = ground();
        let mut grenade = Projectile::Grenade(Grenade::new(
            Point::new(100.0, 97.0),
            Point::new(0.0, 3.0),
            CharacterId(0),
        ));
        assert!(grenade.step(&terrain).unwrap() == UpdateOutcome::Continue);
        // Hit the ground fast enough to rebound
        assert!(grenade.kinematics().vel.y < 0.0);
        assert!(!grenade.is_in_steady_state());

        let mut ticks = 1;
        let outcome = loop {
            let outcome = grenade.step(&terrain).unwrap();
            ticks += 1;
            if outcome != UpdateOutcome::Continue {
                break outcome;
            }
        };
        assert_eq!(ticks, GRENADE_FUSE_TICKS + 1);
        assert!(matches!(
            outcome,
            UpdateOutcome::Detonated { radius, .. } if radius == GRENADE_BLAST_RADIUS
        ));
    }

    #[test]
    fn test_grenade_rebounds_with_its_own_parameters() {
        let terrain = ground();
        let mut grenade = Projectile::Grenade(Grenade::new(
            Point::new(100.0, 97.0),
            Point::new(0.0, 3.0),
            CharacterId(0),
        ));
        let params = grenade.bounce_parameters();
        assert_eq!(params, BounceParameters::GRENADE);
        grenade.step(&terrain).unwrap();
        assert_approx_eq!(grenade.kinematics().vel.x, 0.0);
        assert_approx_eq!(grenade.kinematics().vel.y, 3.05 * params.flat.1);

        let rocket = Projectile::Rocket(Rocket::new(
            Point::new(100.0, 50.0),
            Point::ZERO,
            CharacterId(0),
        ));
        assert_eq!(rocket.bounce_parameters(), BounceParameters::GENERIC);
    }

    #[test]
    fn test_grenade_detonates_in_mid_air() {
        let terrain = ground();
        let mut grenade = Grenade::new(
            Point::new(100.0, 20.0),
            Point::new(0.0, 0.0),
            CharacterId(0),
        );
        grenade.frames_left = 0;
        let outcome = Projectile::Grenade(grenade).step(&terrain).unwrap();
        assert_eq!(
            outcome,
            UpdateOutcome::Detonated {
                at: Point::new(100.0, 20.0),
                radius: GRENADE_BLAST_RADIUS
            }
        );
    }

    #[test]
    fn test_phantom_does_not_mutate() {
        let terrain = ground();
        let characters = duel();
        let rocket = Projectile::Rocket(Rocket::new(
            Point::new(250.0, 90.0),
            Point::new(0.0, 1.0),
            CharacterId(0),
        ));
        let target = characters[1].kinematics.pos;
        let (damage, distance) = rocket.phantom(&terrain, &characters, target).unwrap();
        assert!(damage > 0);
        assert!(distance < 5.0);
        assert_eq!(rocket.kinematics().pos, Point::new(250.0, 90.0));
        assert!(terrain.is_solid(250, 100));
        assert_eq!(characters[1].health.hp, 100);
    }

    #[test]
    fn test_phantom_scores_zero_when_leaving_map() {
        let terrain = ground();
        let characters = duel();
        let rocket = Projectile::Rocket(Rocket::new(
            Point::new(350.0, 50.0),
            Point::new(10.0, -1.0),
            CharacterId(0),
        ));
        let target = characters[1].kinematics.pos;
        let (damage, _) = rocket.phantom(&terrain, &characters, target).unwrap();
        assert_eq!(damage, 0);
    }

    #[test]
    fn test_phantom_penalises_own_team() {
        let terrain = ground();
        let characters = duel();
        let grenade = Projectile::Grenade(Grenade::new(
            Point::new(50.0, 99.0),
            Point::ZERO,
            CharacterId(0),
        ));
        let target = characters[1].kinematics.pos;
        let (damage, distance) = grenade.phantom(&terrain, &characters, target).unwrap();
        assert!(damage < 0);
        assert_approx_eq!(distance, 200.0, 2.0);
    }
}
