//! Configuration constants for the artillery game.

// Window and camera
pub const SCREEN_WIDTH: i32 = 1200;
pub const SCREEN_HEIGHT: i32 = 800;
pub const SCROLL_BORDER: f32 = 40.0; // Mouse distance from the screen edge that scrolls (px)
pub const MOUSE_CAMERA_SPEED: f64 = 5.0; // Maximum camera speed from mouse scrolling (px/tick)
pub const MOUSE_CAMERA_ACCELERATION: f64 = 0.2; // Mouse scroll acceleration (px/tick²)
pub const FOCUS_ACCELERATION: f64 = 0.1; // Camera acceleration while panning toward a focus
pub const FOCUS_APPROACH_RATE: f64 = 0.1; // Fraction of the remaining distance covered per tick
pub const FOCUS_SNAP_DISTANCE: f64 = 0.1; // Camera snaps onto its focus when this close

// Timing
pub const TICKS_PER_SECOND: u64 = 100;
pub const TIME_TO_ACT: f64 = 20.0; // Seconds a controlled character has to attack
pub const TIME_TO_RETREAT: f64 = 3.0; // Seconds of walking allowed after an attack
pub const TIME_TO_WAIT_FOR_TURN: f64 = 1.0; // Pause between turns in seconds
pub const MAX_FRAME_TIME: f32 = 0.25; // Longest frame the fixed-step loop catches up on

// Event log
pub const LOG_LENGTH: usize = 3; // Number of narrative messages visible at once

// Characters
pub const MAX_HEALTH: i32 = 100;
pub const DEFAULT_FIRING_ANGLE: f64 = 30.0; // Degrees above the horizontal
pub const MINIMUM_FIRING_ANGLE: f64 = -50.0;
pub const MAXIMUM_FIRING_ANGLE: f64 = 88.0;
pub const MAXIMUM_FIRING_POWER: f64 = 10.0;
pub const FIRING_STRENGTH_STEP: f64 = 0.12; // Charge gained per tick while preparing an attack
pub const AIM_STEP: f64 = 0.5; // Degrees per tick of aiming
pub const JUMP_SPEED: f64 = 2.5; // Upward velocity of a jump
pub const JUMP_WALK_SPEED: f64 = 1.0; // Horizontal velocity of a jump while walking
pub const FALL_DAMAGE_SPEED: f64 = 5.0; // Impact speed at which a character is hurt
pub const FALL_DAMAGE_FACTOR: f64 = 4.0; // Damage per unit of impact speed
pub const CHARACTER_FLAT_BOUNCE: (f64, f64) = (0.8, -0.4); // (vx, vy) factors on flat ground
pub const CHARACTER_SLOPE_BOUNCE: f64 = 0.6;

// Physics
pub const GRAVITY: f64 = 0.05; // Added to vertical velocity every tick
pub const MAX_COLLISION_ITERATIONS: usize = 100; // Bisection steps when locating a surface
pub const DEFAULT_HALTING_SPEED: f64 = 3.0;
pub const DEFAULT_BOUNCE_FACTOR: f64 = 0.5;
pub const MAX_PHANTOM_STEPS: u32 = 20_000; // Upper bound on a phantom flight

// Weapons
pub const ROCKET_BLAST_RADIUS: f64 = 60.0;
pub const GRENADE_BLAST_RADIUS: f64 = 40.0;
pub const GRENADE_FUSE_TICKS: i32 = 400;
pub const GRENADE_HALTING_SPEED: f64 = 1.0;
pub const GRENADE_BOUNCE_FACTOR: f64 = 0.9;
pub const KNOCKBACK_FACTOR: f64 = 0.1; // Velocity per point of blast damage
pub const KNOCKBACK_UPWARD_BIAS: f64 = 25.0; // Pixels added above the blast centre

// Computer players
pub const AI_GRID_STEPS: usize = 10; // Samples per axis of the trajectory grid
pub const AI_TICK_BUDGET_MICROS: u64 = 500_000 / TICKS_PER_SECOND; // Half a tick of wall-clock time
pub const AI_UNREACHABLE_DISTANCE: f64 = 100_000.0;

// Attack selector
pub const SELECTOR_BUTTON_SIZE: f32 = 80.0;

// Teams
pub const MAX_TEAMS: usize = 6;
pub const TEAM_COLOURS: [[u8; 3]; 6] = [
    [0, 0, 0],      // black
    [255, 0, 0],    // red
    [0, 0, 139],    // dark blue
    [0, 100, 0],    // dark green
    [255, 255, 0],  // yellow
    [165, 42, 42],  // brown
];
