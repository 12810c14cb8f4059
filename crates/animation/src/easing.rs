/// Cubic ease-in-out on `t` in [0, 1]. Zero slope at both ends.
pub fn cubic_in_out(t: f32) -> f32 {
    let k = t.clamp(0.0, 1.0) * 2.0;
    if k < 1.0 {
        0.5 * k * k * k
    } else {
        let k = k - 2.0;
        0.5 * (k * k * k + 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_and_midpoint() {
        assert_eq!(cubic_in_out(0.0), 0.0);
        assert_eq!(cubic_in_out(0.5), 0.5);
        assert_eq!(cubic_in_out(1.0), 1.0);
    }

    #[test]
    fn symmetric_about_midpoint() {
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            let mirrored = 1.0 - cubic_in_out(1.0 - t);
            assert!((cubic_in_out(t) - mirrored).abs() < 1e-6);
        }
    }

    #[test]
    fn flat_near_the_ends() {
        let h = 1e-3;
        let start_slope = (cubic_in_out(h) - cubic_in_out(0.0)) / h;
        let end_slope = (cubic_in_out(1.0) - cubic_in_out(1.0 - h)) / h;
        assert!(start_slope < 1e-4);
        assert!(end_slope < 1e-4);
        // Linear would have slope 1 everywhere; the middle is steeper.
        let mid_slope = (cubic_in_out(0.5 + h) - cubic_in_out(0.5 - h)) / (2.0 * h);
        assert!(mid_slope > 1.0);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(cubic_in_out(-1.0), 0.0);
        assert_eq!(cubic_in_out(2.0), 1.0);
    }
}
