//! Read-only snapshot of one frame, handed to whatever draws the game.

use crate::attack::AttackKind;
use crate::character::Character;
use crate::config::MAX_HEALTH;
use crate::projectile::Projectile;
use crate::selector::AttackSelector;
use crate::terrain::Terrain;
use crate::types::{Facing, Point};
use crate::world_object::WorldObject;

pub const AIM_LINE_LENGTH: f64 = 50.0;
pub const CHARGE_LINE_SCALE: f64 = 12.0; // Charge line length per unit of firing strength

// Line drawn from a controlled character along its aim
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AimPreview {
    Sight { end: Point }, // Aiming, not yet charging
    Charge { end: Point },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterView {
    pub name: String,
    pub pos: Point,
    pub facing: Facing,
    pub health: i32, // Clamped to [0, MAX_HEALTH]
    pub health_colour: [u8; 3],
    pub team_colour: [u8; 3],
    pub controlled: bool,
    pub aim: Option<AimPreview>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileView {
    pub pos: Point,
    pub kind: AttackKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub camera: (i32, i32),
    pub characters: Vec<CharacterView>, // Living characters only
    pub projectiles: Vec<ProjectileView>,
    pub messages: Vec<String>,
    pub countdown: Option<i64>,
    pub selector: Option<AttackSelector>,
    pub mouse: Option<(f32, f32)>,
    pub terrain_revision: u64,
}

/// Anything that can draw a frame. The terrain is passed alongside so a renderer can refresh its
/// texture when `terrain_revision` changes.
pub trait Renderer {
    fn draw(&mut self, frame: &FrameView, terrain: &Terrain);
}

/// Green at full health fading through yellow to red.
pub fn health_colour(hp: i32) -> [u8; 3] {
    let hp = hp.clamp(0, MAX_HEALTH);
    if hp < MAX_HEALTH / 2 {
        [255, (255 * hp * 2 / MAX_HEALTH) as u8, 0]
    } else {
        [(255 * (MAX_HEALTH - hp) * 2 / MAX_HEALTH) as u8, 255, 0]
    }
}

impl CharacterView {
    pub fn new(character: &Character, team_colour: [u8; 3], can_attack: bool) -> Self {
        let pos = character.kinematics.pos;
        let aim = if !character.is_controlled() {
            None
        } else if character.control.preparing_attack {
            let length = CHARGE_LINE_SCALE * character.control.firing_strength;
            Some(AimPreview::Charge {
                end: pos + character.direction() * length,
            })
        } else if can_attack {
            Some(AimPreview::Sight {
                end: pos + character.direction() * AIM_LINE_LENGTH,
            })
        } else {
            None
        };

        CharacterView {
            name: character.name.clone(),
            pos,
            facing: character.facing,
            health: character.health.hp.clamp(0, MAX_HEALTH),
            health_colour: health_colour(character.health.hp),
            team_colour,
            controlled: character.is_controlled(),
            aim,
        }
    }
}

impl ProjectileView {
    pub fn new(projectile: &Projectile) -> Self {
        let kind = match projectile {
            Projectile::Rocket(_) => AttackKind::RocketLauncher,
            Projectile::Grenade(_) => AttackKind::ThrowGrenade,
        };
        ProjectileView {
            pos: projectile.position(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CharacterId, TeamId};
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_health_colour_gradient() {
        assert_eq!(health_colour(100), [0, 255, 0]);
        assert_eq!(health_colour(50), [255, 255, 0]);
        assert_eq!(health_colour(25), [255, 127, 0]);
        assert_eq!(health_colour(0), [255, 0, 0]);
        assert_eq!(health_colour(-30), [255, 0, 0]);
    }

    #[test]
    fn test_aim_preview() {
        let mut character = Character::new(
            CharacterId(0),
            "Joey",
            TeamId(0),
            Point::new(100.0, 100.0),
            Facing::Right,
        );
        assert_eq!(CharacterView::new(&character, [0, 0, 0], true).aim, None);

        character.take_control();
        character.control.firing_angle = 0.0;
        match CharacterView::new(&character, [0, 0, 0], true).aim {
            Some(AimPreview::Sight { end }) => assert_approx_eq!(end.x, 150.0),
            other => panic!("expected a sight line, got {:?}", other),
        }
        assert_eq!(CharacterView::new(&character, [0, 0, 0], false).aim, None);

        character.control.preparing_attack = true;
        character.control.firing_strength = 2.0;
        match CharacterView::new(&character, [0, 0, 0], true).aim {
            Some(AimPreview::Charge { end }) => assert_approx_eq!(end.x, 124.0),
            other => panic!("expected a charge line, got {:?}", other),
        }
    }
}
