//! Monomial feature expansion for the polynomial strategy.
//!
//! The expansion enumerates every monomial of total degree at most `degree`
//! over the forcing variables, constant term included, so the downstream
//! least-squares fit needs no separate intercept column.

/// Exponent vectors for all monomials of total degree `<= degree` over
/// `nvars` variables, ordered by total degree and then by variable index.
///
/// The first entry is always the constant term (all exponents zero). For one
/// variable and degree 3 the result is `1, x, x^2, x^3`.
pub(crate) fn monomial_exponents(nvars: usize, degree: usize) -> Vec<Vec<u32>> {
    let mut out = Vec::new();
    let mut current = vec![0u32; nvars];
    for total in 0..=degree {
        push_degree(total as u32, 0, nvars, &mut current, &mut out);
    }
    out
}

fn push_degree(
    remaining: u32,
    start: usize,
    nvars: usize,
    current: &mut [u32],
    out: &mut Vec<Vec<u32>>,
) {
    if remaining == 0 {
        out.push(current.to_vec());
        return;
    }
    if start == nvars {
        return;
    }
    if start == nvars - 1 {
        current[start] = remaining;
        out.push(current.to_vec());
        current[start] = 0;
        return;
    }
    for here in (0..=remaining).rev() {
        current[start] = here;
        push_degree(remaining - here, start + 1, nvars, current, out);
    }
    current[start] = 0;
}

/// Evaluates every monomial in `exponents` at the point `row`.
pub(crate) fn expand_row(row: &[f64], exponents: &[Vec<u32>]) -> Vec<f64> {
    exponents
        .iter()
        .map(|exps| {
            let mut term = 1.0;
            for (value, &exp) in row.iter().zip(exps) {
                term *= value.powi(exp as i32);
            }
            term
        })
        .collect()
}
