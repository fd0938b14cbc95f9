//! Offline reduction of CCD images of the tethered bead.
//!
//! The experimental side of the setup tracks a micron-scale bead glued to
//! the free end of the strand: threshold the frame, find the bead centroid,
//! optionally reduce the diffraction pattern to a ring-averaged profile, and
//! estimate Brownian position fluctuations over a frame sequence.

use crate::stats;
use nalgebra::DMatrix;

/// Binary mask from a grayscale frame: 1 where the pixel is darker than
/// `cutoff`, 0 elsewhere. The bead shows up dark against the illuminated
/// background.
pub fn threshold(frame: &DMatrix<u8>, cutoff: u8) -> DMatrix<u8> {
    frame.map(|pixel| u8::from(pixel < cutoff))
}

/// Centroid of the set pixels of a binary mask, as (row, column) indices.
/// Returns `None` for an empty mask.
pub fn bead_center(mask: &DMatrix<u8>) -> Option<(usize, usize)> {
    let mut count = 0usize;
    let mut row_sum = 0usize;
    let mut col_sum = 0usize;
    for row in 0..mask.nrows() {
        for col in 0..mask.ncols() {
            if mask[(row, col)] == 1 {
                count += 1;
                row_sum += row;
                col_sum += col;
            }
        }
    }
    if count == 0 {
        return None;
    }
    Some((row_sum / count, col_sum / count))
}

/// Ring-averaged profile of a thresholded diffraction pattern.
///
/// The mask is cut into `n_rings` concentric annuli around the bead center;
/// each entry is the fraction of set pixels in that annulus. An empty mask
/// yields an all-zero profile.
pub fn ring_profile(mask: &DMatrix<u8>, n_rings: usize) -> Vec<f64> {
    let Some((center_row, center_col)) = bead_center(mask) else {
        return vec![0.0; n_rings];
    };

    let half_rows = (mask.nrows() / 2) as f64;
    let half_cols = (mask.ncols() / 2) as f64;
    let max_distance = (half_rows * half_rows + half_cols * half_cols).sqrt();

    let mut totals = vec![0usize; n_rings];
    let mut set = vec![0usize; n_rings];
    for row in 0..mask.nrows() {
        for col in 0..mask.ncols() {
            let dr = row as f64 - center_row as f64;
            let dc = col as f64 - center_col as f64;
            let distance = (dr * dr + dc * dc).sqrt();
            let ring = (distance / max_distance * n_rings as f64) as usize;
            if ring < n_rings {
                totals[ring] += 1;
                if mask[(row, col)] == 1 {
                    set[ring] += 1;
                }
            }
        }
    }

    totals
        .iter()
        .zip(&set)
        .map(|(&total, &white)| {
            if total > 0 {
                white as f64 / total as f64
            } else {
                0.0
            }
        })
        .collect()
}

/// Mean squared displacement of tracked bead positions about their
/// barycenter, in physical units (`pixel_size` is the edge length one pixel
/// images). This is the Brownian fluctuation statistic the force
/// calibration reads off.
pub fn mean_square_fluctuation(positions: &[(usize, usize)], pixel_size: f64) -> f64 {
    if positions.is_empty() {
        return 0.0;
    }
    let rows: Vec<f64> = positions.iter().map(|&(r, _)| r as f64).collect();
    let cols: Vec<f64> = positions.iter().map(|&(_, c)| c as f64).collect();
    let row_mean = stats::mean(&rows);
    let col_mean = stats::mean(&cols);
    let msd = positions
        .iter()
        .map(|&(r, c)| {
            let dr = r as f64 - row_mean;
            let dc = c as f64 - col_mean;
            dr * dr + dc * dc
        })
        .sum::<f64>()
        / positions.len() as f64;
    msd * pixel_size * pixel_size
}
