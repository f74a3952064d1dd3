//! Chebyshev series evaluation for SPK Type 2 records.
//!
//! Each Type 2 record stores, per axis, coefficients of a Chebyshev
//! expansion over a normalised time `s` in `[-1, 1]`. Position is the
//! series value; velocity is its derivative scaled by the record radius.

/// Value of `sum(c_k * T_k(s))` by the Clenshaw recurrence.
pub fn clenshaw(coeffs: &[f64], s: f64) -> f64 {
    match coeffs {
        [] => 0.0,
        [c0] => *c0,
        [c0, rest @ ..] => {
            let two_s = 2.0 * s;
            let (mut b1, mut b2) = (0.0, 0.0);
            for &c in rest.iter().rev() {
                let b0 = two_s * b1 - b2 + c;
                b2 = b1;
                b1 = b0;
            }
            s * b1 - b2 + c0
        }
    }
}

/// Value and first derivative (with respect to `s`) of a Chebyshev series.
///
/// Runs the forward recurrences for `T_k` and `T_k'` together:
/// `T_k = 2s·T_{k-1} − T_{k-2}` and `T_k' = 2·T_{k-1} + 2s·T_{k-1}' − T_{k-2}'`.
pub fn value_and_derivative(coeffs: &[f64], s: f64) -> (f64, f64) {
    let Some((&c0, rest)) = coeffs.split_first() else {
        return (0.0, 0.0);
    };

    let two_s = 2.0 * s;
    let (mut t_prev, mut t_cur) = (1.0, s);
    let (mut d_prev, mut d_cur) = (0.0, 1.0);
    let mut value = c0;
    let mut derivative = 0.0;

    for (k, &c) in rest.iter().enumerate() {
        if k > 0 {
            let t_next = two_s * t_cur - t_prev;
            let d_next = 2.0 * t_cur + two_s * d_cur - d_prev;
            t_prev = t_cur;
            t_cur = t_next;
            d_prev = d_cur;
            d_cur = d_next;
        }
        value += c * t_cur;
        derivative += c * d_cur;
    }

    (value, derivative)
}
