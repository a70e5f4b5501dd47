//! Turn phases and the timestamp of the last phase change.

use crate::clock::SimulationClock;
use crate::config::TIME_TO_ACT;

/// The single active phase of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A character is controlled and may walk, jump, aim and attack.
    ControlledCanAttack,
    /// The controlled character has attacked and may only walk away.
    ControlledCanJustWalk,
    /// Nobody is controlled; waiting for every object to come to rest.
    WaitingForSettle,
    /// Short pause before the next character takes control.
    BetweenTurns,
    /// At most one team survives. Terminal.
    EndGame,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    phase: Phase,
    last_phase_change_tick: u64,
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            phase: Phase::ControlledCanAttack,
            last_phase_change_tick: 0,
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        GameState::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_phase_change_tick(&self) -> u64 {
        self.last_phase_change_tick
    }

    /// Moves to `phase` and timestamps the change. Once the match is over the phase stays
    /// `EndGame`.
    pub fn transition(&mut self, phase: Phase, tick: u64) {
        if self.phase == Phase::EndGame {
            return;
        }
        crate::debug_turn!(tick: tick, "{:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.last_phase_change_tick = tick;
    }

    pub fn can_attack(&self) -> bool {
        self.phase == Phase::ControlledCanAttack
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::EndGame
    }

    /// Seconds spent in the current phase.
    pub fn elapsed(&self, clock: &SimulationClock) -> f64 {
        clock.seconds_since(self.last_phase_change_tick)
    }

    /// Whole seconds left to attack, rounded up. Only meaningful while attacking is allowed.
    pub fn time_left_on_clock(&self, clock: &SimulationClock) -> Option<i64> {
        if !self.can_attack() {
            return None;
        }
        Some((TIME_TO_ACT - self.elapsed(clock)).ceil() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_ready_to_attack() {
        let state = GameState::new();
        assert_eq!(state.phase(), Phase::ControlledCanAttack);
        assert!(state.can_attack());
        assert_eq!(state.last_phase_change_tick(), 0);
    }

    #[test]
    fn test_end_game_is_terminal() {
        let mut state = GameState::new();
        state.transition(Phase::EndGame, 10);
        state.transition(Phase::ControlledCanAttack, 20);
        assert!(state.is_over());
        assert_eq!(state.last_phase_change_tick(), 10);
    }

    #[test]
    fn test_countdown_rounds_up() {
        let mut clock = SimulationClock::new();
        let mut state = GameState::new();
        assert_eq!(state.time_left_on_clock(&clock), Some(20));
        clock.tick();
        assert_eq!(state.time_left_on_clock(&clock), Some(20));
        for _ in 0..99 {
            clock.tick();
        }
        assert_eq!(state.time_left_on_clock(&clock), Some(19));

        state.transition(Phase::ControlledCanJustWalk, clock.now());
        assert_eq!(state.time_left_on_clock(&clock), None);
    }
}
