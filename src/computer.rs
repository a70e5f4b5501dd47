//! Computer player: picks the nearest enemy, searches the trajectory grid for the best shot in
//! time-boxed slices, then drives the character with the same per-tick controls a human has.

use std::time::{Duration, Instant};

use crate::attack::{AttackKind, AttackOverride};
use crate::character::Character;
use crate::config::{
    AI_GRID_STEPS, AI_TICK_BUDGET_MICROS, AI_UNREACHABLE_DISTANCE, MAXIMUM_FIRING_ANGLE,
    MAXIMUM_FIRING_POWER, MINIMUM_FIRING_ANGLE,
};
use crate::error::SimError;
use crate::game_state::Phase;
use crate::terrain::Terrain;
use crate::types::{CharacterId, Facing};
use crate::utils::linspace;

const FACINGS: [Facing; 2] = [Facing::Left, Facing::Right];

/// One fully specified attack and its predicted outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BattlePlan {
    pub facing: Facing,
    pub firing_angle: f64,
    pub firing_strength: f64,
    pub expected_damage: i32,
    pub expected_distance: f64,
    pub weapon: AttackKind,
}

impl BattlePlan {
    /// More damage wins; equal damage prefers landing closer to the target.
    pub fn beats(&self, other: &BattlePlan) -> bool {
        self.expected_damage > other.expected_damage
            || (self.expected_damage == other.expected_damage
                && self.expected_distance < other.expected_distance)
    }

    /// The plan to beat before any candidate has been scored.
    fn baseline(controlled: &Character) -> Self {
        BattlePlan {
            facing: controlled.facing,
            firing_angle: (MAXIMUM_FIRING_ANGLE + MINIMUM_FIRING_ANGLE) / 2.0,
            firing_strength: (MAXIMUM_FIRING_POWER / 2.0).floor(),
            expected_damage: 0,
            expected_distance: AI_UNREACHABLE_DISTANCE,
            weapon: AttackKind::default(),
        }
    }
}

/// Progress through weapons × facings × angles × powers, remembering the best plan so far.
#[derive(Debug, Clone)]
pub struct SearchState {
    angles: Vec<f64>,
    powers: Vec<f64>,
    next_index: usize,
    best: Option<BattlePlan>,
}

impl SearchState {
    pub fn new(best: Option<BattlePlan>) -> Self {
        SearchState {
            angles: linspace(MINIMUM_FIRING_ANGLE, MAXIMUM_FIRING_ANGLE, AI_GRID_STEPS),
            powers: linspace(0.0, MAXIMUM_FIRING_POWER, AI_GRID_STEPS),
            next_index: 0,
            best,
        }
    }

    pub fn total_candidates(&self) -> usize {
        AttackKind::ALL.len() * FACINGS.len() * self.angles.len() * self.powers.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.next_index >= self.total_candidates()
    }

    pub fn best(&self) -> Option<&BattlePlan> {
        self.best.as_ref()
    }

    fn candidate(&self, index: usize) -> (AttackKind, AttackOverride) {
        let powers = self.powers.len();
        let angles = self.angles.len();
        let power = self.powers[index % powers];
        let angle = self.angles[(index / powers) % angles];
        let facing = FACINGS[(index / (powers * angles)) % FACINGS.len()];
        let weapon = AttackKind::ALL[index / (powers * angles * FACINGS.len())];
        (weapon, AttackOverride { facing, angle, power })
    }

    /// Scores candidates until `deadline` passes (always at least one), resuming where the
    /// previous call stopped. `None` means no deadline.
    pub fn advance(
        &mut self,
        deadline: Option<Instant>,
        controlled: &Character,
        terrain: &Terrain,
        characters: &[Character],
        target: &Character,
    ) -> Result<usize, SimError> {
        let mut scored = 0;
        while !self.is_exhausted() {
            let (weapon, attack_override) = self.candidate(self.next_index);
            let (damage, distance) = weapon.release_phantom(
                controlled,
                attack_override,
                terrain,
                characters,
                target.kinematics.pos,
            )?;
            let plan = BattlePlan {
                facing: attack_override.facing,
                firing_angle: attack_override.angle,
                firing_strength: attack_override.power,
                expected_damage: damage,
                expected_distance: distance,
                weapon,
            };
            if self.best.as_ref().is_none_or(|best| plan.beats(best)) {
                self.best = Some(plan);
            }
            self.next_index += 1;
            scored += 1;

            if deadline.is_some_and(|d| Instant::now() >= d) {
                break;
            }
        }
        Ok(scored)
    }

    /// The final plan once the search is exhausted.
    pub fn finish(&self) -> Result<BattlePlan, SimError> {
        self.best.ok_or(SimError::NoBattlePlan)
    }
}

/// A single control input for this tick, mirroring what a human could press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AiStep {
    AimUp(f64),   // Cap at the planned angle
    AimDown(f64), // Floor at the planned angle
    StartAttack,
    Charge(f64), // Charge without overshooting the planned strength
    Release,
}

/// What the computer wants done to its character this tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AiOrders {
    pub facing: Option<Facing>,
    pub weapon: Option<AttackKind>,
    pub step: Option<AiStep>,
}

#[derive(Debug, Clone)]
pub struct Computer {
    target: Option<CharacterId>,
    search: Option<SearchState>,
    plan: Option<BattlePlan>,
    budget: Option<Duration>,
}

impl Default for Computer {
    fn default() -> Self {
        Computer::new()
    }
}

impl Computer {
    pub fn new() -> Self {
        Computer {
            target: None,
            search: None,
            plan: None,
            budget: Some(Duration::from_micros(AI_TICK_BUDGET_MICROS)),
        }
    }

    /// A computer that finishes its whole search in one tick.
    pub fn unbounded() -> Self {
        Computer {
            budget: None,
            ..Computer::new()
        }
    }

    pub fn target(&self) -> Option<CharacterId> {
        self.target
    }

    pub fn plan(&self) -> Option<&BattlePlan> {
        self.plan.as_ref()
    }

    /// Forgets the target and any plan, searched or in progress.
    pub fn reset(&mut self) {
        self.target = None;
        self.search = None;
        self.plan = None;
    }

    /// Nearest living character of another team, by straight-line distance.
    pub fn find_nearest_enemy(
        controlled: &Character,
        characters: &[Character],
    ) -> Option<CharacterId> {
        characters
            .iter()
            .filter(|c| c.is_alive() && c.team != controlled.team)
            .map(|c| (c.id, c.kinematics.pos.distance(&controlled.kinematics.pos)))
            .fold(None, |nearest: Option<(CharacterId, f64)>, (id, distance)| match nearest {
                Some((_, best)) if best <= distance => nearest,
                _ => Some((id, distance)),
            })
            .map(|(id, _)| id)
    }

    /// Runs one tick of the computer player for `controlled`. Returns no orders when the phase
    /// forbids attacking or there is nobody left to target.
    pub fn run_ai(
        &mut self,
        controlled: &Character,
        characters: &[Character],
        terrain: &Terrain,
        phase: Phase,
        tick: u64,
    ) -> Result<Option<AiOrders>, SimError> {
        if phase != Phase::ControlledCanAttack {
            return Ok(None);
        }

        let mut orders = AiOrders::default();

        let target_id = match self.target {
            Some(id) => id,
            None => {
                let Some(id) = Computer::find_nearest_enemy(controlled, characters) else {
                    return Ok(None);
                };
                self.target = Some(id);
                if let Some(enemy) = characters.get(id.0) {
                    let enemy_on_left = enemy.kinematics.pos.x <= controlled.kinematics.pos.x;
                    orders.facing = Some(Facing::from_left(enemy_on_left));
                    crate::debug_ai!(tick: tick, "{} targets {}", controlled.name, enemy.name);
                }
                id
            }
        };

        let Some(plan) = self.plan else {
            let Some(target) = characters.get(target_id.0) else {
                self.reset();
                return Ok(None);
            };
            let search = self
                .search
                .get_or_insert_with(|| SearchState::new(Some(BattlePlan::baseline(controlled))));
            let deadline = self.budget.and_then(|b| Instant::now().checked_add(b));
            let scored = search.advance(deadline, controlled, terrain, characters, target)?;
            crate::debug_ai!(tick: tick, "{} scored {} candidates", controlled.name, scored);

            if search.is_exhausted() {
                let plan = search.finish()?;
                crate::debug_ai!(
                    tick: tick,
                    "{} plans {} at {:.1} degrees, power {:.2}, expecting {} damage",
                    controlled.name,
                    plan.weapon.name(),
                    plan.firing_angle,
                    plan.firing_strength,
                    plan.expected_damage
                );
                self.plan = Some(plan);
                self.search = None;
            }
            return Ok(Some(orders));
        };

        orders.weapon = Some(plan.weapon);
        orders.facing = Some(plan.facing);

        let control = &controlled.control;
        orders.step = Some(if control.firing_angle < plan.firing_angle {
            AiStep::AimUp(plan.firing_angle)
        } else if control.firing_angle > plan.firing_angle {
            AiStep::AimDown(plan.firing_angle)
        } else if !control.preparing_attack {
            AiStep::StartAttack
        } else if control.firing_strength < plan.firing_strength {
            AiStep::Charge(plan.firing_strength)
        } else {
            self.reset();
            AiStep::Release
        });
        Ok(Some(orders))
    }
}
