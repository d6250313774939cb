use ndarray::{ArrayBase, Data, Dimension};
use ndarray_stats::QuantileExt;

/// `(min, max)` ignoring NaN; `(NaN, NaN)` when every sample is NaN.
pub fn extent<S, D>(a: &ArrayBase<S, D>) -> (f64, f64)
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    (*a.min_skipnan(), *a.max_skipnan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, array};

    #[test]
    fn extent_of_plain_values() {
        let a = array![3., -1., 8., 2.];
        assert_eq!(extent(&a), (-1., 8.));
    }

    #[test]
    fn extent_all_nan() {
        let a = Array1::from_elem(3, f64::NAN);
        let (lo, hi) = extent(&a);
        assert!(lo.is_nan() && hi.is_nan());
    }

    #[test]
    fn extent_skips_nan() {
        let a = array![[f64::NAN, 2.], [-4., 7.]];
        assert_eq!(extent(&a), (-4., 7.));
    }
}
