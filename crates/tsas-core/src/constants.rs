//! Simulation constants and tuning parameters.

/// Default simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

// --- Protected zone ---

/// Radius of the protected sphere. Distance at or below this is a breach.
pub const PROTECTED_RADIUS: f64 = 25.0;

/// Distance above which a threat is considered safe.
pub const SAFE_DISTANCE: f64 = 60.0;

/// Distance above which (and up to `SAFE_DISTANCE`) a threat raises a warning.
pub const WARNING_DISTANCE: f64 = 35.0;

// --- Feature vector ---

/// Number of scalars in a feature vector.
pub const FEATURE_COUNT: usize = 5;

/// Distance that maps to a normalized distance of 1.0.
pub const DISTANCE_NORMALIZER: f64 = 100.0;

/// Value emitted for the direction slot of every simulated feature vector.
pub const DIRECTION_FLAG: f32 = 1.0;

// --- Classifier ---

/// Number of severity classes (Low..Critical).
pub const SEVERITY_CLASSES: usize = 4;

/// Layer widths of the severity network, input first.
pub const NETWORK_LAYOUT: [usize; 4] = [FEATURE_COUNT, 16, 8, SEVERITY_CLASSES];

// --- Threat score ---

/// Per-class weights folded with the class probabilities into a threat score.
pub const THREAT_SCORE_CLASS_WEIGHTS: [f64; SEVERITY_CLASSES] = [0.2, 0.5, 0.8, 1.0];

/// Distance at which the threat score falls to zero.
pub const THREAT_SCORE_RANGE: f64 = 120.0;

/// Global threat score above which the zone is tinted red.
pub const ZONE_TINT_RED_SCORE: f64 = 70.0;

/// Global threat score above which the zone is tinted yellow.
pub const ZONE_TINT_YELLOW_SCORE: f64 = 40.0;

// --- Spawning ---

/// Ring radius for random intruder spawns; intruders beyond it are recycled.
pub const MAX_RANGE: f64 = 130.0;

/// Half-width of the uniform range for random intruder velocity components.
pub const INTRUDER_MAX_AXIS_SPEED: f64 = 0.3;

/// Number of threats in each scenario.
pub const SCENARIO_THREAT_COUNT: usize = 3;

// --- Tunables ---

/// Default hostile-intent prior for spawned threats.
pub const DEFAULT_INTENT: f64 = 0.5;

/// Default signal-strength prior for spawned threats.
pub const DEFAULT_SIGNAL: f64 = 0.8;

/// Lower bound of the speed scaling factor.
pub const SPEED_SCALE_MIN: f64 = 0.1;

/// Upper bound of the speed scaling factor.
pub const SPEED_SCALE_MAX: f64 = 2.0;
