pub mod assets;
pub mod attack;
pub mod camera;
pub mod character;
pub mod clock;
pub mod computer;
pub mod config;
pub mod error;
pub mod event_log;
pub mod explosion;
pub mod game;
pub mod game_state;
pub mod input;
pub mod kinematics;
pub mod logging;
pub mod playing_field;
pub mod projectile;
pub mod render;
pub mod selector;
pub mod team;
pub mod terrain;
pub mod types;
pub mod utils;
pub mod view;
pub mod world_object;

pub use error::SimError;
pub use playing_field::PlayingField;
