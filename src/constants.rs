/// Scene geometry and interaction tuning constants.
///
/// These express intended behavior (radii, easing factors, timing) and keep
/// magic numbers out of the code.
// Reference background space (the illustration's natural pixel size)
pub const BACKGROUND_WIDTH: f32 = 1920.0;
pub const BACKGROUND_HEIGHT: f32 = 1080.0;

// Proximity dot
pub const DOT_BASE_RADIUS: f32 = 14.0; // background px, scales with the scene
pub const DOT_PULSE_EXPANSION: f32 = 6.0; // extra radius at pulse peak
pub const DOT_PULSE_HZ: f32 = 1.2;
pub const ACTIVATION_TOLERANCE: f32 = 4.0; // slack added to the hit radius

// Hover affordance ("click to explore" ring)
pub const AFFORDANCE_POINTER_OFFSET: [f32; 2] = [18.0, -14.0]; // keep it clear of the cursor
pub const AFFORDANCE_RADIUS: f32 = 34.0;

// Label slide-in (background-space, shared target for every hotspot)
pub const LABEL_TARGET_X: f32 = 960.0;
pub const LABEL_TARGET_Y: f32 = 150.0;
pub const LABEL_EJECT_DISTANCE: f32 = 220.0; // start offset below the target
pub const LABEL_EASE: f32 = 0.09; // per-frame exponential approach
pub const LABEL_SETTLE_EPSILON: f32 = 0.5;
pub const MOBILE_LABEL_GAP: f32 = 26.0; // static label sits this far under the dot

// Stroke highlight ring around the hovered sprite
pub const STROKE_MARGIN: f32 = 10.0;

// Sprite idle animation
pub const SPRITE_BOB_AMPLITUDE: f32 = 6.0; // background px
pub const SPRITE_BOB_HZ: f32 = 0.35;
pub const SPRITE_HOVER_SPEEDUP: f32 = 2.5;

// Touch profile cutover
pub const SMALL_SCREEN_MAX_CSS_WIDTH: f64 = 820.0;

// Loading reveal (Monte-Carlo flashlight over the logo)
// Threshold and fallback are tuned values carried over as-is; corner cells are
// statistically hard to hit, so full coverage is never required.
pub const REVEAL_GRID: usize = 10;
pub const REVEAL_RETARGET_SECS: f64 = 0.7;
pub const REVEAL_RETARGET_JITTER_SECS: f64 = 0.25;
pub const REVEAL_CENTER_BIAS: f64 = 0.3; // share of retargets that snap to center
pub const REVEAL_EASE: f32 = 0.03;
pub const REVEAL_RADIUS: f32 = 70.0; // flashlight radius in overlay px
pub const REVEAL_COVERAGE_THRESHOLD: f32 = 0.95;
pub const REVEAL_FALLBACK_SECS: f64 = 15.0;

// Audio
pub const HOVER_CUE_BASE_HZ: f32 = 220.0;
pub const HOVER_CUE_GAIN: f32 = 0.12;
pub const HOVER_CUE_RAMP_SEC: f64 = 0.04;
