use crate::factorize::Factorization;

/// Zero every factor component at index >= k, in place.
///
/// `None` and any k >= r keep the full rank. Returns the rank in effect.
pub fn truncate(factors: &mut Factorization, k: Option<usize>) -> usize {
    let r = factors.rank();
    let k = match k {
        Some(k) if k < r => k,
        _ => return r,
    };
    let dropped = r - k;
    factors.u.columns_mut(k, dropped).fill(0.0);
    for i in k..r {
        factors.sigma[(i, i)] = 0.0;
    }
    factors.v.columns_mut(k, dropped).fill(0.0);
    tracing::debug!(k, r, "truncated factorization");
    k
}
