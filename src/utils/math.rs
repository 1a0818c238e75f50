/// Probabilities are clamped to `[EPS, 1 - EPS]` before taking logarithms.
pub const PROBABILITY_EPS: f64 = 1e-15;

/// Numerically stable softmax; subtracts the maximum logit before `exp`.
///
/// NaN logits get probability zero. If any logit is `+inf` the mass is split
/// evenly among those logits, and if none is usable the result is uniform.
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits
        .iter()
        .copied()
        .filter(|z| !z.is_nan())
        .fold(f64::NEG_INFINITY, f64::max);
    if max == f64::INFINITY {
        let n = logits.iter().filter(|&&z| z == f64::INFINITY).count() as f64;
        return logits
            .iter()
            .map(|&z| if z == f64::INFINITY { 1.0 / n } else { 0.0 })
            .collect();
    }
    if max == f64::NEG_INFINITY {
        let n = logits.len() as f64;
        return logits.iter().map(|_| 1.0 / n).collect();
    }
    let exps: Vec<f64> = logits
        .iter()
        .map(|&z| if z.is_nan() { 0.0 } else { libm::exp(z - max) })
        .collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Index of the largest finite value; ties go to the lowest index.
#[inline]
pub fn argmax(v: &[f64]) -> Option<usize> {
    let mut best = None;
    let mut best_value = f64::NEG_INFINITY;
    for (i, &x) in v.iter().enumerate() {
        if !x.is_finite() {
            continue;
        }
        if best.is_none() || x > best_value {
            best = Some(i);
            best_value = x;
        }
    }
    best
}

#[inline]
pub fn clamped_ln(p: f64) -> f64 {
    libm::log(p.clamp(PROBABILITY_EPS, 1.0 - PROBABILITY_EPS))
}

/// Mean and population standard deviation of each column.
///
/// A column with zero spread gets a standard deviation of `1.0` so that it
/// can be divided by safely.
pub fn column_mean_std(rows: &[Vec<f64>], width: usize) -> (Vec<f64>, Vec<f64>) {
    let n = rows.len().max(1) as f64;
    let mut mean = vec![0.0; width];
    for row in rows {
        for (m, x) in mean.iter_mut().zip(row) {
            *m += x;
        }
    }
    mean.iter_mut().for_each(|m| *m /= n);

    let mut std = vec![0.0; width];
    for row in rows {
        for ((s, x), m) in std.iter_mut().zip(row).zip(&mean) {
            *s += (x - m) * (x - m);
        }
    }
    for s in std.iter_mut() {
        *s = libm::sqrt(*s / n);
        if *s <= f64::EPSILON {
            *s = 1.0;
        }
    }
    (mean, std)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn softmax_sums_to_one_and_orders() {
        let p = softmax(&[1.0, 2.0, 3.0]);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(p[2] > p[1] && p[1] > p[0]);
    }

    #[test]
    fn softmax_stays_finite_on_non_finite_logits() {
        let p = softmax(&[f64::INFINITY, 0.0, f64::INFINITY]);
        assert_eq!(p, vec![0.5, 0.0, 0.5]);

        let p = softmax(&[f64::NAN, 1.0, 1.0]);
        assert_eq!(p[0], 0.0);
        assert!((p[1] - 0.5).abs() < 1e-12);

        let p = softmax(&[f64::NAN, f64::NEG_INFINITY]);
        assert_eq!(p, vec![0.5, 0.5]);
        assert!(softmax(&[]).is_empty());
    }

    #[test]
    fn softmax_handles_large_logits() {
        let p = softmax(&[1000.0, 1000.0]);
        assert!((p[0] - 0.5).abs() < 1e-12);
        assert!(p.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn argmax_skips_non_finite() {
        assert_eq!(argmax(&[f64::NAN, 0.2, 0.7, 0.1]), Some(2));
        assert_eq!(argmax(&[0.5, 0.5]), Some(0));
        assert_eq!(argmax(&[f64::NAN]), None);
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn clamped_ln_is_finite_at_zero() {
        assert!(clamped_ln(0.0).is_finite());
        assert!(clamped_ln(1.0) < 0.0);
    }

    #[test]
    fn constant_column_gets_unit_scale() {
        let rows = vec![vec![1.0, 2.0], vec![1.0, 4.0]];
        let (mean, std) = column_mean_std(&rows, 2);
        assert_eq!(mean, vec![1.0, 3.0]);
        assert_eq!(std, vec![1.0, 1.0]);
    }
}
