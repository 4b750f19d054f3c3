/// Linearly remaps `value` from `[old_min, old_max]` onto `[new_min, new_max]`.
///
/// Values outside the source range extrapolate; nothing is clamped. The caller
/// must ensure `old_max != old_min`, otherwise the result is NaN or infinite.
pub fn number_in_range(old_min: f32, old_max: f32, new_min: f32, new_max: f32, value: f32) -> f32 {
    ((value - old_min) / (old_max - old_min)) * (new_max - new_min) + new_min
}

pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_midpoint() {
        assert_eq!(number_in_range(0.0, 100.0, 0.0, 1.0, 50.0), 0.5);
    }

    #[test]
    fn boundaries_map_exactly() {
        let ranges = [
            (0.0, 100.0, 0.0, 1.0),
            (-3.0, 5.0, 10.0, -10.0),
            (200.0, 100.0, -1.0, 1.0),
            (0.5, 0.75, 4.0, 4.5),
        ];

        for (old_min, old_max, new_min, new_max) in ranges {
            assert_eq!(number_in_range(old_min, old_max, new_min, new_max, old_min), new_min);
            assert_eq!(number_in_range(old_min, old_max, new_min, new_max, old_max), new_max);
        }
    }

    #[test]
    fn extrapolates_outside_the_source_range() {
        assert_eq!(number_in_range(0.0, 10.0, 0.0, 1.0, 20.0), 2.0);
        assert_eq!(number_in_range(0.0, 10.0, 0.0, 1.0, -10.0), -1.0);
    }

    #[test]
    fn zero_width_domain_is_not_finite() {
        assert!(!number_in_range(1.0, 1.0, 0.0, 1.0, 2.0).is_finite());
        assert!(number_in_range(1.0, 1.0, 0.0, 1.0, 1.0).is_nan());
    }

    #[test]
    fn converts_degrees() {
        assert_approx_eq!(degrees_to_radians(180.0), std::f32::consts::PI);
        assert_eq!(degrees_to_radians(0.0), 0.0);
    }
}
