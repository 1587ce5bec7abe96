//! Logarithmic score-to-level curve.
//!
//! Level `n` starts at score `2^n - 1`: 0, 1, 3, 7, 15, 31, ...

use tagscope_types::ExpertiseLevel;

/// Score at which `level` is reached.
pub fn level_threshold(level: u32) -> f64 {
    2f64.powi(level.min(i32::MAX as u32) as i32) - 1.0
}

/// Convert an accumulated score into a level and progress toward the next one.
///
/// Negative and NaN scores count as zero.
pub fn level_for(score: f64) -> ExpertiseLevel {
    let score = if score.is_nan() || score < 0.0 {
        0.0
    } else {
        score.min(f64::MAX)
    };

    let mut level = (score + 1.0).log2().floor() as u32;
    // log2 may land one off right at a power of two
    while level > 0 && level_threshold(level) > score {
        level -= 1;
    }
    while level_threshold(level + 1) <= score {
        level += 1;
    }

    let current = level_threshold(level);
    let next = level_threshold(level + 1);
    let progress = (score - current) / (next - current);

    ExpertiseLevel {
        level,
        progress: if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        },
        points_to_next: next,
    }
}
