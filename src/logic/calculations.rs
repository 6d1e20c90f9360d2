/// Arithmetic mean. Zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Population variance (divides by n).
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Standard deviation over mean; zero when the mean is not positive.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let m = mean(values);
    if m > 0.0 {
        std_dev(values) / m
    } else {
        0.0
    }
}

/// Slope of the degree-1 least-squares fit of `values` against their index.
pub fn linear_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(values);

    let (num, den) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(num, den), (i, y)| {
            let dx = i as f64 - x_mean;
            (num + dx * (y - y_mean), den + dx * dx)
        });

    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Absolute z-score; zero when the spread is zero.
pub fn z_score(value: f64, mean: f64, std_dev: f64) -> f64 {
    if std_dev > 0.0 {
        ((value - mean) / std_dev).abs()
    } else {
        0.0
    }
}

/// Index of the first maximum.
pub fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, v)| match best {
            Some((_, b)) if *v <= b => best,
            _ => Some((i, *v)),
        })
        .map(|(i, _)| i)
}

/// Index of the first minimum.
pub fn argmin(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, v)| match best {
            Some((_, b)) if *v >= b => best,
            _ => Some((i, *v)),
        })
        .map(|(i, _)| i)
}

/// Round to a fixed number of decimal places for presentation.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_variance_known_values() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&values) - 5.0).abs() < 1e-9);
        assert!((variance(&values) - 4.0).abs() < 1e-9);
        assert!((std_dev(&values) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn empty_inputs_are_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(linear_slope(&[]), 0.0);
        assert_eq!(linear_slope(&[3.0]), 0.0);
        assert!(argmax(&[]).is_none());
    }

    #[test]
    fn slope_of_straight_line() {
        let values: Vec<f64> = (0..10).map(|i| 100.0 + 7.5 * i as f64).collect();
        assert!((linear_slope(&values) - 7.5).abs() < 1e-9);

        let falling: Vec<f64> = values.iter().rev().copied().collect();
        assert!((linear_slope(&falling) + 7.5).abs() < 1e-9);
    }

    #[test]
    fn coefficient_of_variation_guards_zero_mean() {
        assert_eq!(coefficient_of_variation(&[0.0, 0.0, 0.0]), 0.0);
        assert!((coefficient_of_variation(&[50.0, 150.0]) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn z_score_with_zero_spread() {
        assert_eq!(z_score(120.0, 100.0, 0.0), 0.0);
        assert!((z_score(70.0, 100.0, 10.0) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn arg_extrema_pick_first_occurrence() {
        let values = [3.0, 9.0, 1.0, 9.0, 1.0];
        assert_eq!(argmax(&values), Some(1));
        assert_eq!(argmin(&values), Some(2));
    }

    #[test]
    fn round_to_places() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(2.25, 1), 2.3);
        assert_eq!(round_to(-1.26, 1), -1.3);
    }
}
