/// Neutral-conductor current: elementwise sum of the three phase totals.
///
/// Callers pass the zero vector for a phase with no history. The result is
/// as long as the shortest input, which on a shared grid means all of them.
pub fn combine(total_a: &[f64], total_b: &[f64], total_c: &[f64]) -> Vec<f64> {
    total_a
        .iter()
        .zip(total_b)
        .zip(total_c)
        .map(|((a, b), c)| a + b + c)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gen::synthesize;
    use crate::grid::SamplingGrid;

    #[test]
    fn test_combine_sums_each_sample() {
        let a = [1.0, 2.0, 3.0];
        let b = [0.5, -2.0, 0.0];
        let c = [-1.0, 0.25, 4.0];
        assert_eq!(combine(&a, &b, &c), vec![0.5, 0.25, 7.0]);
    }

    #[test]
    fn test_zero_phases_contribute_nothing() {
        let grid = SamplingGrid::new();
        let a = synthesize(3, 0.4, 15.0, &grid);
        let neutral = combine(&a, &grid.zeros(), &grid.zeros());
        assert_eq!(neutral, a);
    }

    #[test]
    fn test_balanced_fundamentals_cancel() {
        let grid = SamplingGrid::new();
        let neutral = combine(
            &synthesize(1, 1.0, 0.0, &grid),
            &synthesize(1, 1.0, 120.0, &grid),
            &synthesize(1, 1.0, 240.0, &grid),
        );
        assert_eq!(neutral.len(), grid.len());
        assert!(neutral.iter().all(|v| v.abs() < 1e-9));
    }

    #[test]
    fn test_balanced_third_harmonics_add_up() {
        let grid = SamplingGrid::new();
        let neutral = combine(
            &synthesize(3, 1.0, 0.0, &grid),
            &synthesize(3, 1.0, 120.0, &grid),
            &synthesize(3, 1.0, 240.0, &grid),
        );
        let tripled = synthesize(3, 3.0, 0.0, &grid);
        for (n, t) in neutral.iter().zip(&tripled) {
            assert!((n - t).abs() < 1e-9);
        }
    }
}
