//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Milliseconds per tick. Angular rates below are tuned in rad/ms.
pub const MS_PER_TICK: f32 = 1000.0 / TICK_RATE as f32;

// --- Play field ---

/// Default play-field width in pixels.
pub const DEFAULT_FIELD_WIDTH: f32 = 800.0;

/// Default play-field height in pixels.
pub const DEFAULT_FIELD_HEIGHT: f32 = 600.0;

/// An enemy whose bottom edge reaches `height - BOTTOM_MARGIN` has invaded.
pub const BOTTOM_MARGIN: f32 = 100.0;

/// Distance past the field edge at which an enemy is considered gone.
pub const OFFSCREEN_MARGIN: f32 = 50.0;

// --- Levels ---

/// Number of levels with explicit tuning. Higher levels reuse the last entry.
pub const MAX_TABLE_LEVEL: u32 = 20;

// --- Enemies ---

/// Default enemy hitbox when no sprite size is available.
pub const ENEMY_WIDTH: f32 = 35.0;
pub const ENEMY_HEIGHT: f32 = 25.0;

/// Descent per tick before level scaling (pixels).
pub const ENEMY_BASE_DESCENT: f32 = 0.5;

/// Frames the damage flash stays lit after a hit.
pub const DAMAGE_FLASH_TICKS: u32 = 10;

/// Per-tick chance that a TeleportDodge enemy jumps sideways.
pub const TELEPORT_CHANCE: f64 = 0.002;

/// RapidFire second trial, as a fraction of the base shoot chance.
pub const RAPID_FIRE_FACTOR: f64 = 0.8;

/// Level from which scouts zig-zag instead of bouncing.
pub const SCOUT_ZIGZAG_LEVEL: u32 = 3;

/// Level from which commanders weave instead of bouncing.
pub const COMMANDER_WEAVE_LEVEL: u32 = 5;

/// Scout zig-zag angular rate (radians per tick).
pub const SCOUT_ZIGZAG_RATE: f32 = 0.02 * MS_PER_TICK;

/// Commander weave angular rate (radians per tick).
pub const COMMANDER_WEAVE_RATE: f32 = 0.008 * MS_PER_TICK;

// --- Player ---

pub const PLAYER_WIDTH: f32 = 50.0;
pub const PLAYER_HEIGHT: f32 = 40.0;

/// Horizontal movement per move command (pixels).
pub const PLAYER_SPEED: f32 = 5.0;

/// Player ship top edge sits this far above the field bottom.
pub const PLAYER_BOTTOM_OFFSET: f32 = 50.0;

pub const PLAYER_LIVES: u32 = 3;

/// Minimum ticks between player shots (~150 ms).
pub const FIRE_COOLDOWN_TICKS: u32 = 9;

/// Ticks of invulnerability after the player is hit.
pub const INVULNERABILITY_TICKS: u32 = 60;

/// Ticks the player hit flash stays visible.
pub const HIT_FLASH_TICKS: u32 = 30;

// --- Bullets ---

pub const BULLET_WIDTH: f32 = 4.0;
pub const BULLET_HEIGHT: f32 = 12.0;

/// Bullet speed in pixels per tick before level scaling.
pub const BULLET_BASE_SPEED: f32 = 8.0;

/// Enemy bullet speed-up per level above 1.
pub const ENEMY_BULLET_SPEEDUP_PER_LEVEL: f32 = 0.1;

/// Bullets are discarded this far beyond the top or bottom edge.
pub const BULLET_OFFSCREEN_MARGIN: f32 = 10.0;

// --- Session flow ---

/// Ticks spent on the level-complete banner (3 s).
pub const LEVEL_COMPLETE_TICKS: u32 = 180;

/// Ticks spent in the transition before the next level starts (2 s).
pub const LEVEL_TRANSITION_TICKS: u32 = 120;

// --- Formations ---

/// Y coordinate of the first formation row.
pub const FORMATION_TOP: f32 = 50.0;

/// Horizontal margin kept clear on both sides of a formation.
pub const FORMATION_EDGE_MARGIN: f32 = 50.0;

/// Formations occupy at most this fraction of the field height.
pub const FORMATION_DEPTH_FRACTION: f32 = 0.5;

pub const LINE_BASE_COUNT: usize = 5;

pub const V_BASE_COUNT: usize = 8;
pub const V_STEP_X: f32 = 40.0;
pub const V_STEP_Y: f32 = 15.0;

pub const ARC_BASE_COUNT: usize = 12;
pub const ARC_RADIUS: f32 = 120.0;
pub const ARC_CENTER_Y: f32 = 80.0;
/// Vertical squash applied to the arc.
pub const ARC_FLATTEN: f32 = 0.3;

pub const TRIANGLE_BASE_ROWS: usize = 4;
pub const TRIANGLE_COL_SPACING: f32 = 40.0;
pub const TRIANGLE_ROW_SPACING: f32 = 30.0;

pub const DIAMOND_BASE_SIZE: usize = 3;
pub const DIAMOND_COL_SPACING: f32 = 40.0;
pub const DIAMOND_ROW_SPACING: f32 = 25.0;

pub const SPIRAL_BASE_COUNT: usize = 15;
pub const SPIRAL_CENTER_Y: f32 = 100.0;
/// Radians between consecutive spiral elements.
pub const SPIRAL_ANGLE_STEP: f32 = 0.5;
pub const SPIRAL_START_RADIUS: f32 = 20.0;
pub const SPIRAL_RADIUS_STEP: f32 = 3.0;
pub const SPIRAL_FLATTEN: f32 = 0.5;

pub const CROSS_BASE_ARM_LENGTH: usize = 4;
pub const CROSS_CENTER_Y: f32 = 100.0;
pub const CROSS_SPACING_X: f32 = 35.0;
pub const CROSS_SPACING_Y: f32 = 30.0;

pub const WAVE_BASE_LAYERS: usize = 2;
pub const WAVE_PER_LAYER: usize = 8;
pub const WAVE_TOP: f32 = 60.0;
pub const WAVE_LAYER_SPACING: f32 = 40.0;
pub const WAVE_AMPLITUDE: f32 = 20.0;
/// Sine phase advance per element within a layer (radians).
pub const WAVE_PHASE_STEP: f32 = 0.8;
