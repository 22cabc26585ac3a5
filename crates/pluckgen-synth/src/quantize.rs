//! Float to signed 16-bit sample conversion.

/// Full-scale multiplier for a nominal [-1.0, 1.0] sample.
pub const FULL_SCALE: f64 = 32767.0;

/// Converts one sample to 16-bit PCM.
///
/// Scales by [`FULL_SCALE`], rounds half away from zero, then clamps to the
/// `i16` range so out-of-range input clips instead of wrapping. NaN maps to 0.
pub fn quantize(sample: f64) -> i16 {
    let scaled = (sample * FULL_SCALE).round();
    scaled.clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Quantizes a waveform, preserving order and length.
pub fn quantize_all(samples: &[f64]) -> Vec<i16> {
    samples.iter().map(|&s| quantize(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominal_values() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 32767);
        assert_eq!(quantize(-1.0), -32767);
        assert_eq!(quantize(0.5), 16384); // 16383.5 rounds away from zero
        assert_eq!(quantize(-0.5), -16384);
    }

    #[test]
    fn test_clips_instead_of_wrapping() {
        assert_eq!(quantize(2.0), 32767);
        assert_eq!(quantize(-2.0), -32768);
        assert_eq!(quantize(f64::MAX), 32767);
        assert_eq!(quantize(f64::MIN), -32768);
        assert_eq!(quantize(f64::INFINITY), 32767);
        assert_eq!(quantize(f64::NEG_INFINITY), -32768);
    }

    #[test]
    fn test_just_past_full_scale() {
        // -1.00002 * 32767 rounds to -32768, which is still representable.
        assert_eq!(quantize(-1.00002), -32768);
        assert_eq!(quantize(1.00002), 32767);
    }

    #[test]
    fn test_nan_is_silent() {
        assert_eq!(quantize(f64::NAN), 0);
    }

    #[test]
    fn test_quantize_all_preserves_order() {
        let samples = [0.0, 0.25, -0.25, 3.0, -3.0];
        assert_eq!(quantize_all(&samples), vec![0, 8192, -8192, 32767, -32768]);
        assert!(quantize_all(&[]).is_empty());
    }
}
