use std::fmt;

use crate::attack::AttackKind;
use crate::character::Character;
use crate::computer::Computer;
use crate::config::TEAM_COLOURS;
use crate::types::{CharacterId, TeamId};

/// Resumable position in a cyclic list; each call continues after the last pick and skips
/// ineligible entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundRobinCursor {
    last_index: Option<usize>,
}

impl RoundRobinCursor {
    pub fn new() -> Self {
        RoundRobinCursor::default()
    }

    pub fn next_index(
        &mut self,
        len: usize,
        mut eligible: impl FnMut(usize) -> bool,
    ) -> Option<usize> {
        let start = self.last_index.map_or(0, |i| i + 1);
        let found = (0..len).map(|offset| (start + offset) % len).find(|&i| eligible(i))?;
        self.last_index = Some(found);
        Some(found)
    }
}

#[derive(Debug, Clone)]
pub struct Team {
    pub id: TeamId,
    pub number: usize, // 1-based, picks the colour
    pub roster: Vec<CharacterId>,
    cursor: RoundRobinCursor,
    pub ai: Option<Computer>,
    pub active_attack: AttackKind,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team {}", self.number)
    }
}

impl Team {
    pub fn new(id: TeamId, has_ai: bool) -> Self {
        Team {
            id,
            number: id.0 + 1,
            roster: Vec::new(),
            cursor: RoundRobinCursor::new(),
            ai: has_ai.then(Computer::new),
            active_attack: AttackKind::default(),
        }
    }

    pub fn colour(&self) -> [u8; 3] {
        TEAM_COLOURS[(self.number - 1) % TEAM_COLOURS.len()]
    }

    pub fn is_computer(&self) -> bool {
        self.ai.is_some()
    }

    pub fn is_alive(&self, characters: &[Character]) -> bool {
        self.roster
            .iter()
            .any(|id| characters.get(id.0).is_some_and(Character::is_alive))
    }

    /// Next living roster member after the one picked last time, in insertion order.
    pub fn next_character(&mut self, characters: &[Character]) -> Option<CharacterId> {
        let roster = &self.roster;
        let index = self.cursor.next_index(roster.len(), |i| {
            characters.get(roster[i].0).is_some_and(Character::is_alive)
        })?;
        Some(self.roster[index])
    }
}

/// The team to play after `last`: the first team when nothing has played yet, otherwise the
/// next living team in insertion order. The last team stays in the rotation even if it has just
/// been wiped out so the cycle continues from its slot.
pub fn next_team(teams: &[Team], characters: &[Character], last: Option<TeamId>) -> Option<TeamId> {
    let live: Vec<TeamId> = teams
        .iter()
        .filter(|t| t.is_alive(characters) || Some(t.id) == last)
        .map(|t| t.id)
        .collect();

    let last = match last {
        Some(last) if live.len() > 1 => last,
        _ => return live.first().copied(),
    };
    let position = live.iter().position(|&id| id == last)?;
    Some(live[(position + 1) % live.len()])
}
