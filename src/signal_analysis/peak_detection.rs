// src/signal_analysis/peak_detection.rs

use ndarray::Array1;

use crate::types::PeakResult;

/// Finds the dominant peak in a smoothed current trace.
///
/// A sample is a local maximum when it exceeds its left neighbor and is at
/// least as large as its right neighbor (leftmost point of a plateau).
/// Endpoints have only one neighbor and are never peaks. Candidates below
/// `min_height` are filtered out before dominance selection; among the
/// survivors the globally largest wins, with the earliest index breaking
/// exact ties.
///
/// Returns the `found = false` sentinel when no candidate exists. That is a
/// valid outcome (blank or dead electrode), not an error.
pub fn find_dominant_peak(
    potential_v: &Array1<f64>,
    smoothed_ua: &Array1<f64>,
    min_height: f64,
) -> PeakResult {
    debug_assert_eq!(potential_v.len(), smoothed_ua.len());

    let mut best: Option<(usize, f64)> = None;
    if smoothed_ua.len() > 2 {
        for i in 1..smoothed_ua.len() - 1 {
            let amp = smoothed_ua[i];
            let is_peak = amp > smoothed_ua[i - 1] && amp >= smoothed_ua[i + 1];
            if !is_peak || amp <= min_height {
                continue;
            }
            match best {
                // Strict comparison keeps the earliest index on ties.
                Some((_, best_amp)) if amp <= best_amp => {}
                _ => best = Some((i, amp)),
            }
        }
    }

    match best {
        Some((idx, amp)) => PeakResult::at(potential_v[idx], amp),
        None => PeakResult::none(),
    }
}
