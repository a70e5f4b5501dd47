use crate::config::{
    AIM_STEP, CHARACTER_FLAT_BOUNCE, CHARACTER_SLOPE_BOUNCE, DEFAULT_FIRING_ANGLE,
    FALL_DAMAGE_FACTOR, FALL_DAMAGE_SPEED, FIRING_STRENGTH_STEP, JUMP_SPEED, JUMP_WALK_SPEED,
    MAXIMUM_FIRING_ANGLE, MAXIMUM_FIRING_POWER, MAX_HEALTH, MINIMUM_FIRING_ANGLE,
};
use crate::error::SimError;
use crate::game_state::Phase;
use crate::kinematics::{BounceParameters, Kinematics, Motion};
use crate::terrain::{patterns, Terrain};
use crate::types::{CharacterId, Facing, Point, TeamId, Walking};
use crate::utils::firing_direction;
use crate::world_object::{UpdateOutcome, WorldContext, WorldObject};

pub const CHARACTER_BOUNCE: BounceParameters = BounceParameters {
    halting_speed: FALL_DAMAGE_SPEED,
    flat: CHARACTER_FLAT_BOUNCE,
    slope: CHARACTER_SLOPE_BOUNCE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub hp: i32, // May drop below zero on the killing blow
    pub alive: bool,
}

impl Default for Health {
    fn default() -> Self {
        Health {
            hp: MAX_HEALTH,
            alive: true,
        }
    }
}

// Per-character control state driven by a human or a computer player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Control {
    pub controlled: bool,
    pub walking: Walking,
    pub preparing_attack: bool,
    pub firing_angle: f64,    // Degrees in [MINIMUM_FIRING_ANGLE, MAXIMUM_FIRING_ANGLE]
    pub firing_strength: f64, // Charge in [0, MAXIMUM_FIRING_POWER]
}

impl Default for Control {
    fn default() -> Self {
        Control {
            controlled: false,
            walking: Walking::NA,
            preparing_attack: false,
            firing_angle: DEFAULT_FIRING_ANGLE,
            firing_strength: 0.0,
        }
    }
}

/// A released attack, waiting to be turned into a projectile by the team's active weapon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub launcher: CharacterId,
    pub origin: Point,
    pub velocity: Point,
}

#[derive(Debug, Clone)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub team: TeamId,
    pub kinematics: Kinematics,
    pub health: Health,
    pub facing: Facing,
    pub control: Control,
}

impl Character {
    pub fn new(
        id: CharacterId,
        name: impl Into<String>,
        team: TeamId,
        pos: Point,
        facing: Facing,
    ) -> Self {
        Character {
            id,
            name: name.into(),
            team,
            kinematics: Kinematics::at_rest(pos),
            health: Health::default(),
            facing,
            control: Control::default(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health.alive
    }

    pub fn is_controlled(&self) -> bool {
        self.control.controlled
    }

    /// Health as a fraction of the maximum, clamped to [0, 1].
    pub fn health_fraction(&self) -> f64 {
        (self.health.hp as f64 / MAX_HEALTH as f64).clamp(0.0, 1.0)
    }

    /// Standing means not moving vertically, with ground directly below and none at the
    /// character's own pixel.
    pub fn is_standing(&self, terrain: &Terrain) -> bool {
        let pos = self.kinematics.pos;
        self.kinematics.vel.y == 0.0
            && terrain.is_solid_at(Point::new(pos.x, pos.y + 1.0))
            && !terrain.is_solid_at(pos)
    }

    /// Unit vector along the current aim.
    pub fn direction(&self) -> Point {
        firing_direction(self.control.firing_angle, self.facing)
    }

    pub fn take_control(&mut self) {
        self.control.controlled = true;
    }

    pub fn relinquish_control(&mut self) {
        self.control.walking = Walking::NA;
        self.control.controlled = false;
        self.control.preparing_attack = false;
    }

    fn may_walk(&self, terrain: &Terrain, phase: Phase) -> bool {
        (self.is_standing(terrain) && phase == Phase::ControlledCanAttack)
            || phase == Phase::ControlledCanJustWalk
    }

    pub fn walk_left(&mut self, terrain: &Terrain, phase: Phase) {
        let pos = self.kinematics.pos;
        let head = Point::new(pos.x - 1.0, pos.y - 2.0);
        if self.may_walk(terrain, phase) && !terrain.is_solid_at(head) {
            self.control.walking = Walking::Left;
        }
    }

    pub fn walk_right(&mut self, terrain: &Terrain, phase: Phase) {
        let pos = self.kinematics.pos;
        let head = Point::new(pos.x + 1.0, pos.y - 2.0);
        if self.may_walk(terrain, phase) && !terrain.is_solid_at(head) {
            self.control.walking = Walking::Right;
        }
    }

    pub fn stop_walking(&mut self, terrain: &Terrain) {
        self.control.walking = Walking::NA;
        if self.is_standing(terrain) {
            self.kinematics.vel.x = 0.0;
        }
    }

    pub fn jump(&mut self, terrain: &Terrain) {
        if !self.is_standing(terrain) {
            return;
        }
        self.kinematics.vel.y -= JUMP_SPEED;
        match self.control.walking {
            Walking::Left => self.kinematics.vel.x = -JUMP_WALK_SPEED,
            Walking::Right => self.kinematics.vel.x = JUMP_WALK_SPEED,
            Walking::NA => {}
        }
    }

    pub fn start_attack(&mut self, terrain: &Terrain) {
        if self.is_standing(terrain) {
            self.stop_walking(terrain);
            self.control.preparing_attack = true;
        }
    }

    /// Charges the attack by one tick. A target strength caps the charge without releasing;
    /// otherwise reaching full power releases the attack.
    pub fn prepare_attack(&mut self, phase: Phase, target_strength: Option<f64>) -> Option<Launch> {
        if !self.control.preparing_attack || phase != Phase::ControlledCanAttack {
            return None;
        }
        self.control.firing_strength += FIRING_STRENGTH_STEP;

        match target_strength {
            Some(target) if self.control.firing_strength > target => {
                self.control.firing_strength = target;
                None
            }
            _ if self.control.firing_strength > MAXIMUM_FIRING_POWER => {
                self.control.firing_strength = MAXIMUM_FIRING_POWER;
                self.release_attack(phase)
            }
            _ => None,
        }
    }

    pub fn release_attack(&mut self, phase: Phase) -> Option<Launch> {
        if !self.control.preparing_attack || phase != Phase::ControlledCanAttack {
            return None;
        }
        self.control.preparing_attack = false;
        let velocity = self.direction() * self.control.firing_strength;
        self.control.firing_strength = 0.0;
        Some(Launch {
            launcher: self.id,
            origin: self.kinematics.pos,
            velocity,
        })
    }

    pub fn aim_upwards(&mut self, cap: f64) {
        self.control.firing_angle = cap.min(self.control.firing_angle + AIM_STEP);
    }

    pub fn aim_downwards(&mut self, cap: f64) {
        self.control.firing_angle = cap.max(self.control.firing_angle - AIM_STEP);
    }

    pub fn aim_up(&mut self) {
        self.aim_upwards(MAXIMUM_FIRING_ANGLE);
    }

    pub fn aim_down(&mut self) {
        self.aim_downwards(MINIMUM_FIRING_ANGLE);
    }

    fn update_walk(&mut self, terrain: &Terrain) {
        let pixel = self.kinematics.pos.pixel();
        let (steps, dx) = match self.control.walking {
            Walking::Left => (
                [
                    (&patterns::WALK_LEFT_FLAT, 0.0),
                    (&patterns::WALK_LEFT_UP, -1.0),
                    (&patterns::WALK_LEFT_DOWN, 1.0),
                ],
                -1.0,
            ),
            Walking::Right => (
                [
                    (&patterns::WALK_RIGHT_FLAT, 0.0),
                    (&patterns::WALK_RIGHT_UP, -1.0),
                    (&patterns::WALK_RIGHT_DOWN, 1.0),
                ],
                1.0,
            ),
            Walking::NA => return,
        };

        // Blocked by a wall when no template matches
        if let Some((_, dy)) = steps.iter().find(|(p, _)| terrain.match_pattern(pixel, p)) {
            self.kinematics.pos += Point::new(dx, *dy);
        }
    }

    fn update_facing(&mut self) {
        if self.kinematics.vel.x < 0.0 || self.control.walking == Walking::Left {
            self.facing = Facing::Left;
        } else if self.kinematics.vel.x > 0.0 || self.control.walking == Walking::Right {
            self.facing = Facing::Right;
        }
    }

    fn bounce(&mut self, ctx: &mut WorldContext<'_>) {
        let params = self.bounce_parameters();
        let speed = self.kinematics.speed();
        if speed < params.halting_speed {
            self.kinematics.null_velocity();
            return;
        }

        let damage = (FALL_DAMAGE_FACTOR * speed).floor() as i32;
        self.health.hp -= damage;
        crate::debug_physics!(
            tick: ctx.tick,
            "{} hit the ground at {:.2} for {} damage",
            self.name,
            speed,
            damage
        );

        if self.health.hp <= 0 {
            self.health.alive = false;
            self.kinematics.null_velocity();
            ctx.log.push(ctx.tick, format!("{} fought the ground and the ground won!", self.name));
            return;
        }

        let shape = ctx.terrain.surface_shape(self.kinematics.pos.pixel());
        self.kinematics.vel = params.deflect(self.kinematics.vel, shape);
    }

    fn check_outside_boundaries(&mut self, ctx: &mut WorldContext<'_>) {
        if !self.health.alive || !ctx.terrain.has_left_map(self.kinematics.pos) {
            return;
        }
        ctx.log.push(ctx.tick, format!("{} has fallen off the face of the earth!", self.name));
        self.health.alive = false;
        self.kinematics.null_velocity();
    }
}

impl WorldObject for Character {
    fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    fn update(&mut self, ctx: &mut WorldContext<'_>) -> Result<UpdateOutcome, SimError> {
        if !self.health.alive {
            return Ok(UpdateOutcome::Continue);
        }

        if self.is_standing(ctx.terrain) {
            if self.control.walking != Walking::NA {
                self.update_walk(ctx.terrain);
            }
            self.update_facing();
            return Ok(UpdateOutcome::Continue);
        }

        self.kinematics.apply_gravity();
        if self.kinematics.advance(ctx.terrain)? == Motion::Collided {
            self.bounce(ctx);
        }

        self.update_facing();
        self.check_outside_boundaries(ctx);
        Ok(UpdateOutcome::Continue)
    }

    fn bounce_parameters(&self) -> BounceParameters {
        CHARACTER_BOUNCE
    }

    fn visible(&self) -> bool {
        self.health.alive
    }
}
