use ndarray::ArrayView1;

/// Cosine distance between two frames: `1 - cos(a, b)`, in `[0, 2]`.
///
/// A zero-norm frame (all-zero padding, for instance) has no direction;
/// its distance to anything is pinned at 1.0, the value for orthogonal
/// frames.
pub fn cosine_distance(a: ArrayView1<'_, f32>, b: ArrayView1<'_, f32>) -> f32 {
    let dot = a.dot(&b);
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn identical_frames_have_zero_distance() {
        let a = array![3.0f32, 4.0];
        let d = cosine_distance(a.view(), a.view());
        assert!(d.abs() < 1e-6);
    }

    #[test]
    fn orthogonal_frames_have_unit_distance() {
        let a = array![1.0f32, 0.0];
        let b = array![0.0f32, 1.0];
        assert!((cosine_distance(a.view(), b.view()) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn opposite_frames_have_distance_two() {
        let a = array![1.0f32, 2.0];
        let b = array![-1.0f32, -2.0];
        assert!((cosine_distance(a.view(), b.view()) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn distance_ignores_magnitude() {
        let a = array![1.0f32, 2.0, 3.0];
        let b = array![10.0f32, 20.0, 30.0];
        assert!(cosine_distance(a.view(), b.view()).abs() < 1e-6);
    }

    #[test]
    fn zero_norm_frame_is_pinned_at_one() {
        let a = array![0.0f32, 0.0];
        let b = array![1.0f32, 1.0];
        assert_eq!(cosine_distance(a.view(), b.view()), 1.0);
        assert_eq!(cosine_distance(a.view(), a.view()), 1.0);
    }
}
