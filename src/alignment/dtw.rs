use ndarray::{Array2, ArrayView1};

use crate::error::RecognitionError;
use crate::types::{Alignment, FeatureSequence};

/// Predecessor recorded for each cell during the cost fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Diagonal predecessor `(i-1, j-1)`.
    Match,
    /// Upper predecessor `(i-1, j)`.
    Insert,
    /// Left predecessor `(i, j-1)`.
    Delete,
}

/// Dynamic time warping between two framed feature sequences.
///
/// Returns the length-normalized cumulative cost `Cost[n-1][m-1] / (n + m)`
/// and the optimal alignment path from `(0, 0)` to `(n-1, m-1)`.
///
/// Exactly equal predecessor costs resolve with precedence
/// diagonal > up > left. Downstream decisions depend on deterministic path
/// shape, so this ordering is a compatibility constant.
pub fn dtw<D>(
    x: &FeatureSequence,
    y: &FeatureSequence,
    distance: D,
) -> Result<Alignment, RecognitionError>
where
    D: Fn(ArrayView1<'_, f32>, ArrayView1<'_, f32>) -> f32,
{
    let n = x.len();
    let m = y.len();
    if n == 0 || m == 0 {
        return Err(RecognitionError::degenerate("aligning sequences"));
    }
    if x.coefficient_count() != y.coefficient_count() {
        return Err(RecognitionError::dimension_mismatch(
            x.coefficient_count(),
            y.coefficient_count(),
        ));
    }

    let mut dist = Array2::<f32>::zeros((n, m));
    for i in 0..n {
        for j in 0..m {
            dist[[i, j]] = distance(x.frame(i), y.frame(j));
        }
    }

    let mut cost = Array2::<f32>::zeros((n, m));
    let mut back = Array2::from_elem((n, m), Step::Match);
    cost[[0, 0]] = dist[[0, 0]];
    for i in 1..n {
        cost[[i, 0]] = dist[[i, 0]] + cost[[i - 1, 0]];
        back[[i, 0]] = Step::Insert;
    }
    for j in 1..m {
        cost[[0, j]] = dist[[0, j]] + cost[[0, j - 1]];
        back[[0, j]] = Step::Delete;
    }

    for i in 1..n {
        for j in 1..m {
            let mut best = cost[[i - 1, j - 1]];
            let mut step = Step::Match;
            let up = cost[[i - 1, j]];
            if up < best {
                best = up;
                step = Step::Insert;
            }
            let left = cost[[i, j - 1]];
            if left < best {
                best = left;
                step = Step::Delete;
            }
            cost[[i, j]] = dist[[i, j]] + best;
            back[[i, j]] = step;
        }
    }

    let mut i = n - 1;
    let mut j = m - 1;
    let mut path = vec![(i, j)];
    while i > 0 || j > 0 {
        match back[[i, j]] {
            Step::Match => {
                i -= 1;
                j -= 1;
            }
            Step::Insert => i -= 1,
            Step::Delete => j -= 1,
        }
        path.push((i, j));
    }
    path.reverse();

    Ok(Alignment {
        cost: cost[[n - 1, m - 1]] / (n + m) as f32,
        path,
    })
}

#[cfg(test)]
mod tests {
    use ndarray::{array, Array2};

    use crate::alignment::distance::cosine_distance;
    use crate::types::AlignmentPath;

    use super::*;

    fn seq(data: Array2<f32>) -> FeatureSequence {
        FeatureSequence::new(data).unwrap()
    }

    fn euclidean(a: ArrayView1<'_, f32>, b: ArrayView1<'_, f32>) -> f32 {
        a.iter()
            .zip(b.iter())
            .map(|(p, q)| (p - q) * (p - q))
            .sum::<f32>()
            .sqrt()
    }

    fn assert_monotone(path: &AlignmentPath, n: usize, m: usize) {
        assert_eq!(path.first(), Some(&(0, 0)));
        assert_eq!(path.last(), Some(&(n - 1, m - 1)));
        for pair in path.windows(2) {
            let (di, dj) = (pair[1].0 - pair[0].0, pair[1].1 - pair[0].1);
            assert!(
                (di, dj) == (0, 1) || (di, dj) == (1, 0) || (di, dj) == (1, 1),
                "non-unit step {:?} -> {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn single_frame_pair_halves_the_pointwise_distance() {
        let x = seq(array![[1.0f32], [0.0]]);
        let y = seq(array![[0.0f32], [1.0]]);
        let alignment = dtw(&x, &y, cosine_distance).unwrap();
        // d = 1.0 for orthogonal frames, normalized by n + m = 2
        assert!((alignment.cost - 0.5).abs() < 1e-6);
        assert_eq!(alignment.path, vec![(0, 0)]);
    }

    #[test]
    fn identical_sequences_align_along_the_diagonal_at_zero_cost() {
        let x = seq(array![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let alignment = dtw(&x, &x, euclidean).unwrap();
        assert!(alignment.cost.abs() < 1e-6);
        assert_eq!(alignment.path, vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn alignment_is_deterministic() {
        let x = seq(array![[0.3f32, 1.7, 0.2, 2.2], [1.1, 0.4, 0.9, 0.1]]);
        let y = seq(array![[1.0f32, 0.1, 2.0], [0.2, 1.3, 0.5]]);
        let first = dtw(&x, &y, euclidean).unwrap();
        let second = dtw(&x, &y, euclidean).unwrap();
        assert_eq!(first.cost.to_bits(), second.cost.to_bits());
        assert_eq!(first.path, second.path);
    }

    #[test]
    fn cost_is_symmetric_under_a_symmetric_distance() {
        let x = seq(array![[0.3f32, 1.7, 0.2, 2.2], [1.1, 0.4, 0.9, 0.1]]);
        let y = seq(array![[1.0f32, 0.1, 2.0], [0.2, 1.3, 0.5]]);
        let forward = dtw(&x, &y, euclidean).unwrap();
        let backward = dtw(&y, &x, euclidean).unwrap();
        assert!((forward.cost - backward.cost).abs() < 1e-6);
    }

    #[test]
    fn paths_are_monotone_with_unit_steps() {
        let x = seq(array![[0.0f32, 1.0, 0.0, 1.0, 2.0]]);
        let y = seq(array![[1.0f32, 0.0, 2.0]]);
        let alignment = dtw(&x, &y, euclidean).unwrap();
        assert_monotone(&alignment.path, 5, 3);
    }

    #[test]
    fn equal_costs_prefer_the_diagonal_predecessor() {
        // Constant distance everywhere: every predecessor ties at each cell,
        // so the traceback must ride the diagonal, then the boundary.
        let x = seq(array![[1.0f32, 1.0, 1.0]]);
        let y = seq(array![[2.0f32, 2.0, 2.0]]);
        let alignment = dtw(&x, &y, |_, _| 1.0).unwrap();
        assert_eq!(alignment.path, vec![(0, 0), (1, 1), (2, 2)]);
        // cumulative cost along the diagonal is 3, normalized by 6
        assert!((alignment.cost - 0.5).abs() < 1e-6);
    }

    #[test]
    fn degenerate_row_forces_deletions() {
        let x = seq(array![[1.0f32]]);
        let y = seq(array![[1.0f32, 2.0, 3.0]]);
        let alignment = dtw(&x, &y, euclidean).unwrap();
        assert_eq!(alignment.path, vec![(0, 0), (0, 1), (0, 2)]);
        // cumulative 0 + 1 + 2 = 3, normalized by 1 + 3
        assert!((alignment.cost - 0.75).abs() < 1e-6);
    }

    #[test]
    fn warping_absorbs_a_stretched_copy() {
        let x = seq(array![[1.0f32, 2.0, 3.0]]);
        let y = seq(array![[1.0f32, 1.0, 2.0, 2.0, 3.0]]);
        let alignment = dtw(&x, &y, euclidean).unwrap();
        assert!(alignment.cost.abs() < 1e-6);
        assert_monotone(&alignment.path, 3, 5);
    }

    #[test]
    fn mismatched_coefficient_counts_are_rejected() {
        let x = seq(array![[1.0f32], [2.0]]);
        let y = seq(array![[1.0f32]]);
        assert!(matches!(
            dtw(&x, &y, euclidean),
            Err(RecognitionError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }
}
