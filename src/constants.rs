// src/constants.rs

// --- Smoothing (Savitzky-Golay) ---
pub const DEFAULT_SMOOTHING_WINDOW: usize = 21; // Samples, must be odd
pub const DEFAULT_SMOOTHING_ORDER: usize = 2; // Polynomial degree of the local fit

// --- Peak extraction ---
pub const DEFAULT_PEAK_MIN_HEIGHT_UA: f64 = 2.0; // Candidate peaks below this current are ignored

// --- Quality control ---
// A scan passes QC only if its anodic peak current exceeds this value.
// Exclusive boundary: exactly the threshold is a FAIL.
pub const DEFAULT_QC_PASS_THRESHOLD_UA: f64 = 9.0;

// --- Batch chemometrics ---
pub const DEFAULT_PCA_COMPONENTS: usize = 2;

// --- Synthetic scan generation ---
pub const SWEEP_POINTS_PER_RAMP: usize = 500;
pub const SWEEP_START_V: f64 = -0.5;
pub const SWEEP_END_V: f64 = 1.0;
pub const STANDARD_PEAK_POSITION_V: f64 = 0.40;
pub const CONTAMINATED_PEAK_POSITION_V: f64 = 0.48; // Shifted peak is the anomaly signature
pub const STANDARD_NOISE_SIGMA_UA: f64 = 0.1;
pub const CONTAMINATED_NOISE_SIGMA_UA: f64 = 0.25;
pub const PEAK_AMPLITUDE_MIN_UA: f64 = 9.0;
pub const PEAK_AMPLITUDE_MAX_UA: f64 = 11.0;
pub const PEAK_GAUSSIAN_VARIANCE: f64 = 0.05;
pub const REDUCTION_PEAK_OFFSET_V: f64 = 0.1; // Cathodic peak sits below the anodic one
pub const BACKGROUND_SLOPE_UA_PER_V: f64 = 0.5;
