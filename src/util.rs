pub fn mean(data: &[u32]) -> Option<f64> {
    let sum = data.iter().map(|&ms| f64::from(ms)).sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

/// Population standard deviation of a set of millisecond results
pub fn std_dev(data: &[u32]) -> Option<f64> {
    match (mean(data), data.len()) {
        (Some(data_mean), count) if count > 0 => {
            let variance = data
                .iter()
                .map(|&value| {
                    let diff = data_mean - f64::from(value);

                    diff * diff
                })
                .sum::<f64>()
                / count as f64;

            Some(variance.sqrt())
        }
        _ => None,
    }
}

/// Round a non-negative float to the nearest whole millisecond
pub fn round_ms(value: f64) -> u32 {
    if value <= 0.0 {
        0
    } else if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value.round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[250, 300, 200]), Some(250.0));
        assert_eq!(mean(&[215, 231, 198, 240, 226]), Some(222.0));
    }

    #[test]
    fn test_mean_single_value() {
        assert_eq!(mean(&[42]), Some(42.0));
    }

    #[test]
    fn test_mean_empty_slice() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_mean_fractional() {
        assert_eq!(mean(&[200, 201]), Some(200.5));
    }

    #[test]
    fn test_std_dev() {
        assert_eq!(std_dev(&[2, 4, 4, 4, 5, 5, 7, 9]), Some(2.0));
    }

    #[test]
    fn test_std_dev_single_value() {
        assert_eq!(std_dev(&[310]), Some(0.0));
    }

    #[test]
    fn test_std_dev_empty_slice() {
        assert_eq!(std_dev(&[]), None);
    }

    #[test]
    fn test_std_dev_identical_values() {
        assert_eq!(std_dev(&[250, 250, 250, 250]), Some(0.0));
    }

    #[test]
    fn test_round_ms() {
        assert_eq!(round_ms(241.49), 241);
        assert_eq!(round_ms(241.5), 242);
        assert_eq!(round_ms(0.2), 0);
        assert_eq!(round_ms(-3.0), 0);
    }
}
