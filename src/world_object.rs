use crate::error::SimError;
use crate::event_log::EventLog;
use crate::kinematics::{BounceParameters, Kinematics};
use crate::terrain::Terrain;
use crate::types::Point;

// Everything an object needs from the world to advance one tick
pub struct WorldContext<'a> {
    pub terrain: &'a Terrain,
    pub log: &'a mut EventLog,
    pub tick: u64,
}

// What happened to an object during its update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateOutcome {
    Continue,
    /// Left the map through a side or the bottom; projectiles are removed without exploding.
    Exited,
    Detonated { at: Point, radius: f64 },
}

/// Shared contract of characters and projectiles.
pub trait WorldObject {
    fn kinematics(&self) -> &Kinematics;

    fn update(&mut self, ctx: &mut WorldContext<'_>) -> Result<UpdateOutcome, SimError>;

    /// Whether the object will stay still without outside provocation.
    fn is_in_steady_state(&self) -> bool {
        self.kinematics().is_at_rest()
    }

    fn bounce_parameters(&self) -> BounceParameters {
        BounceParameters::GENERIC
    }

    fn visible(&self) -> bool;

    fn position(&self) -> Point {
        self.kinematics().pos
    }
}
