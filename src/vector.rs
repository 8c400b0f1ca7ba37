//! TF-IDF vector math in SMART notation (`ltn`, `ltc`, `ltu`) and the
//! similarity functions built on top of it.
//!
//! All vectors here are plain `Vec<f64>`, aligned by the caller over some
//! fixed term ordering; this module does no term-to-index bookkeeping of
//! its own.

/// `1 + log10(tf)` per component, `0` where `tf == 0`.
pub fn tf_log(tf: &[f64]) -> Vec<f64> {
    tf.iter().map(|&t| if t > 0.0 { 1.0 + t.log10() } else { 0.0 }).collect()
}

/// `log10(N / df)` per component, `0` where `df == 0`.
pub fn idf(df: &[f64], n: f64) -> Vec<f64> {
    df.iter().map(|&d| if d > 0.0 { (n / d).log10() } else { 0.0 }).collect()
}

/// `tf_log(tf) .* idf(df, N)`, component-wise.
pub fn ltn(tf: &[f64], df: &[f64], n: f64) -> Vec<f64> {
    tf_log(tf).into_iter().zip(idf(df, n)).map(|(a, b)| a * b).collect()
}

pub fn magnitude(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Cosine-normalised `ltn`. Left unchanged (not divided) when its magnitude
/// is zero.
pub fn ltc(tf: &[f64], df: &[f64], n: f64) -> Vec<f64> {
    let v = ltn(tf, df, n);
    let mag = magnitude(&v);
    if mag == 0.0 {
        v
    } else {
        v.into_iter().map(|x| x / mag).collect()
    }
}

/// Pivoted-length normalisation, per the source's own formula:
///
/// `pivot = doc_len / avg_doc_len`
/// `pivot_norm = (1 - slope) * pivot + slope * ‖ltn‖`
///
/// This is *not* the textbook pivoted-cosine formula
/// `(1 - slope) + slope * pivot`; see the pinned test below, which locks in
/// the source's exact (non-textbook) computation.
pub fn ltu(tf: &[f64], df: &[f64], n: f64, doc_len: f64, avg_doc_len: f64, slope: f64) -> Vec<f64> {
    let v = ltn(tf, df, n);
    let pivot = if avg_doc_len == 0.0 { 0.0 } else { doc_len / avg_doc_len };
    let pivot_norm = (1.0 - slope) * pivot + slope * magnitude(&v);
    if pivot_norm == 0.0 {
        v.into_iter().map(|_| 0.0).collect()
    } else {
        v.into_iter().map(|x| x / pivot_norm).collect()
    }
}

/// Default document-side pivot slope for `ltu`, per the original source's
/// `ltu_ltc_search` call site.
pub const DEFAULT_LTU_SLOPE: f64 = 0.75;

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// `(a . b) / (‖a‖ * ‖b‖)`, or `0` when the denominator is `0`.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let denom = magnitude(a) * magnitude(b);
    cosine_with_norm(a, b, denom)
}

/// Dot product divided by a caller-supplied denominator, to avoid
/// recomputing magnitudes the caller already has. Returns `0` when `norm`
/// is `0`.
pub fn cosine_with_norm(a: &[f64], b: &[f64], norm: f64) -> f64 {
    if norm == 0.0 {
        0.0
    } else {
        dot(a, b) / norm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn tf_log_is_zero_for_absent_terms() {
        let out = tf_log(&[0.0, 1.0, 4.0]);
        assert_eq!(out[0], 0.0);
        assert!((out[1] - 1.0).abs() < EPS);
        assert!((out[2] - (1.0 + 4f64.log10())).abs() < EPS);
    }

    #[test]
    fn idf_is_zero_for_absent_terms() {
        let out = idf(&[0.0, 10.0], 10.0);
        assert_eq!(out[0], 0.0);
        assert!((out[1] - 0.0).abs() < EPS);
    }

    #[test]
    fn ltc_vector_has_unit_magnitude_or_zero() {
        let v = ltc(&[1.0, 2.0, 0.0], &[5.0, 2.0, 0.0], 10.0);
        let mag = magnitude(&v);
        assert!((mag - 1.0).abs() < EPS || mag.abs() < EPS);
    }

    #[test]
    fn ltc_of_all_zero_tf_is_left_unchanged_at_zero() {
        let v = ltc(&[0.0, 0.0], &[5.0, 2.0], 10.0);
        assert_eq!(v, vec![0.0, 0.0]);
    }

    #[test]
    fn ltu_matches_source_formula_not_textbook_variant() {
        let tf = [2.0, 1.0];
        let df = [4.0, 2.0];
        let n = 10.0;
        let doc_len = 6.0;
        let avg_doc_len = 4.0;
        let slope = 0.75;

        let ltn_v = ltn(&tf, &df, n);
        let pivot = doc_len / avg_doc_len;
        let expected_pivot_norm = (1.0 - slope) * pivot + slope * magnitude(&ltn_v);
        let expected: Vec<f64> = ltn_v.iter().map(|x| x / expected_pivot_norm).collect();

        // The textbook variant would instead use (1 - slope) + slope * pivot;
        // with pivot = 1.5 the two denominators differ, so this also proves
        // the two formulas are not interchangeable for this input.
        let textbook_pivot_norm = (1.0 - slope) + slope * pivot;
        assert!((expected_pivot_norm - textbook_pivot_norm).abs() > EPS);

        let actual = ltu(&tf, &df, n, doc_len, avg_doc_len, slope);
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-12);
        }
    }

    #[test]
    fn ltu_is_zero_when_pivot_norm_is_zero() {
        let v = ltu(&[0.0, 0.0], &[1.0, 1.0], 10.0, 0.0, 0.0, 0.75);
        assert_eq!(v, vec![0.0, 0.0]);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        assert!((cosine(&[1.0, 0.0], &[0.0, 1.0])).abs() < EPS);
    }

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        assert!((cosine(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]) - 1.0).abs() < EPS);
    }

    #[test]
    fn cosine_with_zero_norm_is_zero() {
        assert_eq!(cosine_with_norm(&[1.0], &[1.0], 0.0), 0.0);
    }

    #[test]
    fn dot_product_matches_manual_computation() {
        assert!((dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]) - 32.0).abs() < EPS);
    }
}
