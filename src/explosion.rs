// Blast resolution: terrain carving, damage, knockback and the AI's damage estimate

use crate::character::Character;
use crate::config::{KNOCKBACK_FACTOR, KNOCKBACK_UPWARD_BIAS};
use crate::event_log::EventLog;
use crate::terrain::Terrain;
use crate::types::{CharacterId, Point, TeamId};

/// Detonates at `center`: carves the terrain, then damages and flings every living character
/// inside the blast radius.
pub fn explosion(
    center: Point,
    caused_by: CharacterId,
    radius: f64,
    terrain: &mut Terrain,
    characters: &mut [Character],
    log: &mut EventLog,
    tick: u64,
) {
    terrain.carve(center, radius);

    let attacker = characters
        .iter()
        .find(|c| c.id == caused_by)
        .map(|c| (c.name.clone(), c.team));

    for character in characters.iter_mut().filter(|c| c.is_alive()) {
        let vector = character.kinematics.pos - center;
        let distance = vector.length();
        if distance >= radius {
            continue;
        }

        let damage = radius as i32 - distance as i32;
        character.health.hp -= damage;
        crate::debug_combat!(
            tick: tick,
            "{} caught {:.1}px from a blast, {} damage, {} hp left",
            character.name,
            distance,
            damage,
            character.health.hp
        );

        if character.health.hp <= 0 {
            character.health.alive = false;
            character.kinematics.null_velocity();
            log.push(tick, death_message(attacker.as_ref(), caused_by, character));
        } else {
            let blast_direction = (vector + Point::new(0.0, -KNOCKBACK_UPWARD_BIAS)).normalize();
            character.kinematics.vel += blast_direction * ((radius - distance) * KNOCKBACK_FACTOR);
        }
    }
}

fn death_message(
    attacker: Option<&(String, TeamId)>,
    caused_by: CharacterId,
    victim: &Character,
) -> String {
    match attacker {
        Some((name, _)) if caused_by == victim.id => format!("{} has committed seppuku!", name),
        Some((name, team)) if *team == victim.team => {
            format!("{} accidentally killed {}!", name, victim.name)
        }
        Some((name, _)) => format!("{} killed {}!", name, victim.name),
        None => format!("{} was blown up!", victim.name),
    }
}

/// Net damage a blast would deal from the firer's point of view: damage to enemies counts
/// for, damage to the firer's own team counts against. Each target contributes at most its
/// remaining health.
pub fn estimate_explosion_damage(
    center: Point,
    radius: f64,
    sent_by: CharacterId,
    characters: &[Character],
) -> i32 {
    let sender_team = characters.iter().find(|c| c.id == sent_by).map(|c| c.team);

    characters
        .iter()
        .filter(|c| c.is_alive())
        .filter_map(|c| {
            let distance = c.kinematics.pos.distance(&center);
            if distance >= radius {
                return None;
            }
            let damage = ((radius - distance) as i32).min(c.health.hp);
            Some(if Some(c.team) == sender_team { -damage } else { damage })
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Facing;
    use assert_approx_eq::assert_approx_eq;

    fn roster() -> Vec<Character> {
        vec![
            Character::new(
                CharacterId(0),
                "Joey",
                TeamId(0),
                Point::new(100.0, 49.0),
                Facing::Right,
            ),
            Character::new(
                CharacterId(1),
                "Ronald",
                TeamId(1),
                Point::new(300.0, 49.0),
                Facing::Left,
            ),
            Character::new(
                CharacterId(2),
                "John",
                TeamId(0),
                Point::new(500.0, 49.0),
                Facing::Left,
            ),
        ]
    }

    fn ground() -> Terrain {
        Terrain::from_fn(800, 100, |_, y| y >= 50)
    }

    // Rocket-sized blast at ground level, set off by Joey
    fn blast(x: f64, terrain: &mut Terrain, characters: &mut [Character], log: &mut EventLog) {
        explosion(Point::new(x, 49.0), CharacterId(0), 60.0, terrain, characters, log, 0);
    }

    fn estimate(x: f64, characters: &[Character]) -> i32 {
        estimate_explosion_damage(Point::new(x, 49.0), 60.0, CharacterId(0), characters)
    }

    #[test]
    fn test_damage_falls_off_with_distance() {
        let mut terrain = ground();
        let mut characters = roster();
        let mut log = EventLog::new();
        blast(310.0, &mut terrain, &mut characters, &mut log);
        assert_eq!(characters[1].health.hp, 50);
        assert_eq!(characters[0].health.hp, 100);
        assert_eq!(characters[2].health.hp, 100);
        assert!(!terrain.is_solid(310, 50));
        assert!(log.is_empty());
    }

    #[test]
    fn test_knockback_pushes_up_and_away() {
        let mut terrain = ground();
        let mut characters = roster();
        let mut log = EventLog::new();
        blast(290.0, &mut terrain, &mut characters, &mut log);
        let vel = characters[1].kinematics.vel;
        assert!(vel.x > 0.0);
        assert!(vel.y < 0.0);
        // |(10, -25)| normalised, scaled by 50 * 0.1
        assert_approx_eq!(vel.length(), 5.0);
    }

    #[test]
    fn test_outside_radius_is_untouched() {
        let mut terrain = ground();
        let mut characters = roster();
        let mut log = EventLog::new();
        blast(360.0, &mut terrain, &mut characters, &mut log);
        assert_eq!(characters[1].health.hp, 100);
        assert!(characters[1].kinematics.is_at_rest());
    }

    #[test]
    fn test_death_messages() {
        let mut terrain = ground();
        let mut log = EventLog::new();

        let mut characters = roster();
        characters[0].health.hp = 10;
        blast(100.0, &mut terrain, &mut characters, &mut log);
        assert_eq!(log.last(), Some("Joey has committed seppuku!"));
        assert!(!characters[0].is_alive());
        assert!(characters[0].kinematics.is_at_rest());

        let mut characters = roster();
        characters[2].health.hp = 10;
        blast(500.0, &mut terrain, &mut characters, &mut log);
        assert_eq!(log.last(), Some("Joey accidentally killed John!"));

        let mut characters = roster();
        characters[1].health.hp = 10;
        blast(300.0, &mut terrain, &mut characters, &mut log);
        assert_eq!(log.last(), Some("Joey killed Ronald!"));
    }

    #[test]
    fn test_dead_characters_are_skipped() {
        let mut terrain = ground();
        let mut characters = roster();
        let mut log = EventLog::new();
        characters[1].health.alive = false;
        blast(300.0, &mut terrain, &mut characters, &mut log);
        assert_eq!(characters[1].health.hp, 100);
        assert!(log.is_empty());
    }

    #[test]
    fn test_estimate_is_signed_and_clamped() {
        let mut characters = roster();
        assert_eq!(estimate(300.0, &characters), 60);
        assert_eq!(estimate(500.0, &characters), -60);

        characters[1].health.hp = 25;
        assert_eq!(estimate(300.0, &characters), 25);

        assert_eq!(estimate(200.0, &characters), 0);
        assert_eq!(estimate(360.0, &characters), 0);
    }
}
