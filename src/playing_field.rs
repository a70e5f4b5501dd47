//! One match: the terrain, every team and character, projectiles in flight, and the turn
//! machine that hands control from one character to the next.

use rand::prelude::*;

use crate::attack::AttackKind;
use crate::camera::Camera;
use crate::character::{Character, Launch};
use crate::clock::SimulationClock;
use crate::computer::AiStep;
use crate::config::{TIME_TO_ACT, TIME_TO_RETREAT, TIME_TO_WAIT_FOR_TURN};
use crate::error::SimError;
use crate::event_log::EventLog;
use crate::explosion::explosion;
use crate::game_state::{GameState, Phase};
use crate::input::InputFrame;
use crate::projectile::Projectile;
use crate::selector::AttackSelector;
use crate::team::{next_team, Team};
use crate::terrain::Terrain;
use crate::types::{CharacterId, Facing, Point, TeamId};
use crate::view::{CharacterView, FrameView, ProjectileView};
use crate::world_object::{UpdateOutcome, WorldContext, WorldObject};

pub const CHARACTER_NAMES: [&str; 9] = [
    "Joey", "Ronald", "Ricky", "John", "Tamara", "Anne", "Samantha", "Felicity", "Alex",
];

pub struct PlayingField {
    terrain: Terrain,
    pub characters: Vec<Character>, // Arena indexed by CharacterId; the dead stay in place
    pub teams: Vec<Team>,           // Indexed by TeamId, in turn order
    pub projectiles: Vec<Projectile>,
    pub game_state: GameState,
    pub clock: SimulationClock,
    pub log: EventLog,
    pub camera: Camera,
    pub selector: Option<AttackSelector>,
    last_controlled: Option<CharacterId>,
    rng: StdRng,
}

impl PlayingField {
    /// An empty match on `terrain`. A seed makes character facings reproducible.
    pub fn new(terrain: Terrain, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        PlayingField {
            terrain,
            characters: Vec::new(),
            teams: Vec::new(),
            projectiles: Vec::new(),
            game_state: GameState::new(),
            clock: SimulationClock::new(),
            log: EventLog::new(),
            camera: Camera::default(),
            selector: None,
            last_controlled: None,
            rng,
        }
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn add_team(&mut self, has_ai: bool) -> TeamId {
        let id = TeamId(self.teams.len());
        self.teams.push(Team::new(id, has_ai));
        log::info!("{} joins as a {} player", id, if has_ai { "computer" } else { "human" });
        id
    }

    /// Adds a character to `team` at `pos`, facing a random way.
    pub fn add_character(
        &mut self,
        team: TeamId,
        name: impl Into<String>,
        pos: Point,
    ) -> CharacterId {
        let id = CharacterId(self.characters.len());
        let facing = Facing::from_left(self.rng.gen_bool(0.5));
        self.characters.push(Character::new(id, name, team, pos, facing));
        if let Some(team) = self.teams.get_mut(team.0) {
            team.roster.push(id);
        }
        id
    }

    /// Adds `per_team` characters to every team, alternating between teams and spreading them
    /// evenly across the map, each standing on the ground of its column.
    pub fn populate(&mut self, per_team: usize) {
        let total = per_team * self.teams.len();
        let width = self.terrain.width() as f64;
        for i in 0..total {
            let team = TeamId(i % self.teams.len());
            let x = ((i as f64 + 0.5) * width / total as f64).floor();
            let y = self
                .terrain
                .surface_height(x as i32)
                .map_or(0.0, |surface| (surface - 1).max(0) as f64);
            let name = match i / CHARACTER_NAMES.len() {
                0 => CHARACTER_NAMES[i].to_string(),
                round => format!("{} {}", CHARACTER_NAMES[i % CHARACTER_NAMES.len()], round + 1),
            };
            self.add_character(team, name, Point::new(x, y));
        }
    }

    /// Gives the first team's first character control and starts the clock on its turn.
    pub fn start(&mut self) {
        if let Some(team) = next_team(&self.teams, &self.characters, None) {
            self.begin_turn(team);
        }
    }

    /// The character being controlled right now, if any.
    pub fn controlled(&self) -> Option<CharacterId> {
        self.characters.iter().find(|c| c.is_controlled()).map(|c| c.id)
    }

    /// The character controlled now or most recently.
    pub fn last_controlled(&self) -> Result<&Character, SimError> {
        self.last_controlled
            .and_then(|id| self.characters.get(id.0))
            .ok_or(SimError::NoCharacterControlled)
    }

    pub fn team_of(&self, id: CharacterId) -> Option<&Team> {
        self.characters.get(id.0).and_then(|c| self.teams.get(c.team.0))
    }

    pub fn alive_teams(&self) -> usize {
        self.teams.iter().filter(|t| t.is_alive(&self.characters)).count()
    }

    /// Nothing is moving and no projectile is live.
    pub fn settled(&self) -> bool {
        self.characters.iter().all(|c| c.is_in_steady_state())
            && self.projectiles.iter().all(|p| p.is_in_steady_state())
    }

    /// Whole seconds left to attack, shown only while attacking is allowed.
    pub fn time_left_on_clock(&self) -> Option<i64> {
        self.game_state.time_left_on_clock(&self.clock)
    }

    /// Average position of everything currently moving.
    pub fn moving_centre(&self) -> Option<Point> {
        let moving: Vec<Point> = self
            .characters
            .iter()
            .map(|c| c.kinematics())
            .chain(self.projectiles.iter().map(|p| p.kinematics()))
            .filter(|k| !k.vel.is_zero())
            .map(|k| k.pos)
            .collect();
        if moving.is_empty() {
            return None;
        }
        let sum = moving.iter().fold(Point::ZERO, |acc, &p| acc + p);
        Some(sum * (1.0 / moving.len() as f64))
    }

    /// Runs one tick: the player's input, the turn machine, the computer player, then every
    /// character and projectile.
    pub fn update(&mut self, input: &InputFrame) -> Result<(), SimError> {
        if let Some(at) = input.click {
            self.handle_click(at);
        }
        self.process_input(input);
        self.process_tick();
        self.run_computer()?;
        self.update_objects()?;

        if let Some(centre) = self.moving_centre() {
            self.camera.set_focus(centre);
        }
        self.camera.update(input.mouse, self.terrain.width() as f64, self.terrain.height() as f64);

        self.clock.tick();
        Ok(())
    }

    /// The controlled character, if its team is played by a human.
    fn human_controlled(&self) -> Option<CharacterId> {
        let id = self.controlled()?;
        let team = self.team_of(id)?;
        (!team.is_computer() && self.characters[id.0].is_alive()).then_some(id)
    }

    fn handle_click(&mut self, at: (f32, f32)) {
        let Some(id) = self.human_controlled() else {
            return;
        };
        match self.selector.take() {
            None => self.selector = Some(AttackSelector::new(self.characters[id.0].team)),
            Some(selector) => match selector.click(at) {
                Some(kind) => self.select_attack(selector.team, kind),
                None => self.selector = Some(selector),
            },
        }
    }

    pub fn select_attack(&mut self, team: TeamId, kind: AttackKind) {
        if let Some(team) = self.teams.get_mut(team.0) {
            crate::debug_turn!(tick: self.clock.now(), "{} selects {}", team, kind.name());
            team.active_attack = kind;
        }
    }

    fn process_input(&mut self, input: &InputFrame) {
        let Some(id) = self.human_controlled() else {
            return;
        };
        let phase = self.game_state.phase();
        let terrain = &self.terrain;
        let character = &mut self.characters[id.0];

        if input.attack_pressed {
            character.start_attack(terrain);
        }

        if input.walk_left {
            character.walk_left(terrain, phase);
        } else if input.walk_right {
            character.walk_right(terrain, phase);
        } else {
            character.stop_walking(terrain);
        }

        if input.jump {
            character.jump(terrain);
        }

        let launch = if input.attack_held {
            character.prepare_attack(phase, None)
        } else {
            character.release_attack(phase)
        };

        if input.aim_up {
            character.aim_up();
        } else if input.aim_down {
            character.aim_down();
        }

        if let Some(launch) = launch {
            self.launch(launch);
        }
    }

    /// Turns a released attack into a projectile of the launcher's team weapon and starts the
    /// retreat.
    fn launch(&mut self, launch: Launch) {
        let tick = self.clock.now();
        let kind = self
            .characters
            .get(launch.launcher.0)
            .and_then(|c| self.teams.get(c.team.0))
            .map_or(AttackKind::default(), |t| t.active_attack);
        crate::debug_combat!(
            tick: tick,
            "{} fired at ({:.2}, {:.2})",
            kind.name(),
            launch.velocity.x,
            launch.velocity.y
        );
        self.projectiles.push(kind.release(launch));
        self.game_state.transition(Phase::ControlledCanJustWalk, tick);
    }

    /// Advances the turn machine by elapsed time since the last phase change.
    fn process_tick(&mut self) {
        let tick = self.clock.now();
        let elapsed = self.game_state.elapsed(&self.clock);

        match self.game_state.phase() {
            Phase::ControlledCanAttack if elapsed > TIME_TO_ACT => {
                self.relinquish_control();
                self.game_state.transition(Phase::BetweenTurns, tick);
            }
            Phase::ControlledCanJustWalk if elapsed > TIME_TO_RETREAT => {
                self.relinquish_control();
                self.game_state.transition(Phase::WaitingForSettle, tick);
            }
            Phase::WaitingForSettle if self.settled() => {
                self.game_state.transition(Phase::BetweenTurns, tick);
            }
            Phase::BetweenTurns if elapsed > TIME_TO_WAIT_FOR_TURN => {
                let last = self
                    .last_controlled
                    .and_then(|id| self.characters.get(id.0))
                    .map(|c| c.team);
                match next_team(&self.teams, &self.characters, last) {
                    Some(team) if self.alive_teams() > 1 => self.begin_turn(team),
                    _ => {
                        self.game_state.transition(Phase::EndGame, tick);
                        self.announce_victor();
                    }
                }
            }
            _ => {}
        }
    }

    fn relinquish_control(&mut self) {
        if let Some(id) = self.controlled() {
            self.characters[id.0].relinquish_control();
        }
        self.selector = None;
    }

    fn begin_turn(&mut self, team: TeamId) {
        let tick = self.clock.now();
        let Some(team) = self.teams.get_mut(team.0) else {
            return;
        };
        let Some(id) = team.next_character(&self.characters) else {
            return;
        };
        if let Some(ai) = team.ai.as_mut() {
            ai.reset();
        }

        let character = &mut self.characters[id.0];
        character.take_control();
        crate::debug_turn!(tick: tick, "{} takes control for {}", character.name, team);
        self.camera.set_focus(character.kinematics.pos);
        self.last_controlled = Some(id);
        self.game_state.transition(Phase::ControlledCanAttack, tick);
    }

    fn announce_victor(&mut self) {
        let tick = self.clock.now();
        let message = match self.teams.iter().find(|t| t.is_alive(&self.characters)) {
            Some(team) => format!("{} is victorious!", team),
            None => "Oh the humanity!".to_string(),
        };
        self.log.push(tick, message);
    }

    /// Lets the computer steer its controlled character for this tick.
    fn run_computer(&mut self) -> Result<(), SimError> {
        let Some(id) = self.controlled() else {
            return Ok(());
        };
        let character = &self.characters[id.0];
        if !character.is_alive() {
            return Ok(());
        }
        let phase = self.game_state.phase();
        let tick = self.clock.now();

        let Some(team) = self.teams.get_mut(character.team.0) else {
            return Ok(());
        };
        let Some(ai) = team.ai.as_mut() else {
            return Ok(());
        };
        let orders = ai.run_ai(character, &self.characters, &self.terrain, phase, tick)?;
        let Some(orders) = orders else {
            return Ok(());
        };
        if let Some(weapon) = orders.weapon {
            team.active_attack = weapon;
        }

        let terrain = &self.terrain;
        let character = &mut self.characters[id.0];
        if let Some(facing) = orders.facing {
            character.facing = facing;
        }
        let launch = match orders.step {
            Some(AiStep::AimUp(cap)) => {
                character.aim_upwards(cap);
                None
            }
            Some(AiStep::AimDown(cap)) => {
                character.aim_downwards(cap);
                None
            }
            Some(AiStep::StartAttack) => {
                character.start_attack(terrain);
                None
            }
            Some(AiStep::Charge(target)) => character.prepare_attack(phase, Some(target)),
            Some(AiStep::Release) => character.release_attack(phase),
            None => None,
        };

        if let Some(launch) = launch {
            self.launch(launch);
        }
        Ok(())
    }

    fn update_objects(&mut self) -> Result<(), SimError> {
        let tick = self.clock.now();
        let mut ctx = WorldContext {
            terrain: &self.terrain,
            log: &mut self.log,
            tick,
        };
        for character in self.characters.iter_mut() {
            character.update(&mut ctx)?;
        }

        let mut i = 0;
        while i < self.projectiles.len() {
            let mut ctx = WorldContext {
                terrain: &self.terrain,
                log: &mut self.log,
                tick,
            };
            match self.projectiles[i].update(&mut ctx)? {
                UpdateOutcome::Continue => i += 1,
                UpdateOutcome::Exited => {
                    crate::debug_physics!(tick: tick, "Projectile left the map");
                    self.projectiles.swap_remove(i);
                }
                UpdateOutcome::Detonated { at, radius } => {
                    let projectile = self.projectiles.swap_remove(i);
                    explosion(
                        at,
                        projectile.sent_by(),
                        radius,
                        &mut self.terrain,
                        &mut self.characters,
                        &mut self.log,
                        tick,
                    );
                }
            }
        }
        Ok(())
    }

    /// Snapshot of everything a renderer needs for this frame.
    pub fn frame(&self, mouse: Option<(f32, f32)>) -> FrameView {
        let can_attack = self.game_state.can_attack();
        FrameView {
            camera: self.camera.offset(),
            characters: self
                .characters
                .iter()
                .filter(|c| c.visible())
                .map(|c| {
                    let colour = self.teams.get(c.team.0).map_or([0, 0, 0], Team::colour);
                    CharacterView::new(c, colour, can_attack)
                })
                .collect(),
            projectiles: self.projectiles.iter().map(ProjectileView::new).collect(),
            messages: self.log.recent().to_vec(),
            countdown: self.time_left_on_clock(),
            selector: self.selector.clone(),
            mouse,
            terrain_revision: self.terrain.revision(),
        }
    }
}
