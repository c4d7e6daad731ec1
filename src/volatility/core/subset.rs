//! Subset masking for reduced-lag model-selection search.
//!
//! A subset mask is a boolean sequence over the **full** parameter layout of
//! `(family, p_max, q_max)` marking which coefficients stay free. Coefficients
//! outside the mask are implicitly fixed at zero by the optimizer. Inclusion
//! policy: the intercept is always free, and a reduced order `(p_sub, q_sub)`
//! keeps the *lowest-indexed* contiguous lags — persistence lags `1..p_sub`,
//! shock lags `1..q_sub`, never a sparse selection. Auxiliary segments (shift,
//! skew, asymmetry) are masked in lock-step with their paired shock lag.
//!
//! The inverse mapping [`subset_orders`] recovers `(p_sub, q_sub)` by counting
//! true entries per segment and round-trips exactly with [`subset_mask`].
//! Masks that violate the prefix policy or the lock-step rule are rejected as
//! configuration errors rather than silently reinterpreted.
use crate::volatility::{
    core::{
        family::VolFamily,
        layout::{ParamLayout, nparams},
    },
    errors::{ParamError, ParamResult},
};

/// Build the inclusion mask for a reduced order `(p_sub, q_sub)` over the
/// full layout of `(family, p_max, q_max)`.
///
/// # Preconditions
/// `p_sub <= p_max` and `q_sub <= q_max`. Violations are caller bugs and fail
/// loudly with [`ParamError::SubsetOrderOutOfRange`]; nothing is truncated.
///
/// # Returns
/// A mask of length `nparams(family, p_max, q_max)` with the intercept, the
/// first `p_sub` persistence slots, the first `q_sub` response slots, and the
/// first `q_sub` slots of every auxiliary segment set to `true`.
pub fn subset_mask(
    family: VolFamily, p_max: usize, q_max: usize, sub_orders: (usize, usize),
) -> ParamResult<Vec<bool>> {
    let (p_sub, q_sub) = sub_orders;
    if p_sub > p_max {
        return Err(ParamError::SubsetOrderOutOfRange {
            requested: p_sub,
            max: p_max,
            segment: "persistence",
        });
    }
    if q_sub > q_max {
        return Err(ParamError::SubsetOrderOutOfRange {
            requested: q_sub,
            max: q_max,
            segment: "response",
        });
    }

    let layout = ParamLayout::new(family, p_max, q_max);
    let mut mask = vec![false; layout.nparams()];
    mask[ParamLayout::INTERCEPT] = true;
    let persistence = layout.persistence();
    for j in 0..p_sub {
        mask[persistence.start + j] = true;
    }
    let response = layout.response();
    for i in 0..q_sub {
        mask[response.start + i] = true;
    }
    for k in 0..family.aux_segments() {
        let aux = layout.aux(k);
        for i in 0..q_sub {
            mask[aux.start + i] = true;
        }
    }
    Ok(mask)
}

/// Recover the reduced order `(p_sub, q_sub)` encoded by a subset mask.
///
/// Counts true entries in the persistence and response segments after
/// validating that the mask has the right length, includes the intercept,
/// keeps each segment as a contiguous lowest-lags prefix, and masks every
/// auxiliary segment in lock-step with the response segment.
///
/// Round-trip invariant: for all valid `(a, b)`,
/// `subset_orders(f, p, q, &subset_mask(f, p, q, (a, b))?) == (a, b)`.
///
/// # Errors
/// - [`ParamError::MaskLengthMismatch`] on a wrong-length mask.
/// - [`ParamError::MaskInconsistent`] if the intercept is excluded, a segment
///   is not a contiguous prefix, or an auxiliary segment disagrees with the
///   response segment.
pub fn subset_orders(
    family: VolFamily, p_max: usize, q_max: usize, mask: &[bool],
) -> ParamResult<(usize, usize)> {
    let expected = nparams(family, p_max, q_max);
    if mask.len() != expected {
        return Err(ParamError::MaskLengthMismatch { expected, actual: mask.len() });
    }
    if !mask[ParamLayout::INTERCEPT] {
        return Err(ParamError::MaskInconsistent {
            reason: "the intercept must always be included",
        });
    }

    let layout = ParamLayout::new(family, p_max, q_max);
    let p_sub = prefix_count(&mask[layout.persistence()])?;
    let q_sub = prefix_count(&mask[layout.response()])?;
    for k in 0..family.aux_segments() {
        let aux_count = prefix_count(&mask[layout.aux(k)])?;
        if aux_count != q_sub {
            return Err(ParamError::MaskInconsistent {
                reason: "auxiliary segments must be masked in lock-step with the response segment",
            });
        }
    }
    Ok((p_sub, q_sub))
}

/// Count the true prefix of a segment, rejecting non-contiguous selections.
fn prefix_count(segment: &[bool]) -> ParamResult<usize> {
    let count = segment.iter().take_while(|&&m| m).count();
    if segment[count..].iter().any(|&m| m) {
        return Err(ParamError::MaskInconsistent {
            reason: "included lags must be the lowest-indexed contiguous lags",
        });
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Mask construction for reduced orders, including aux lock-step masking.
    // - The mask/order round trip over the full valid grid.
    // - Loud rejection of out-of-range orders and inconsistent masks.
    //
    // They intentionally DO NOT cover:
    // - How the optimizer scatters masked parameter vectors (params module).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A reduced TGarch order masks the lowest lags of every segment together.
    //
    // Given
    // -----
    // - TGarch with p_max = 2, q_max = 3 and requested orders (1, 2).
    //
    // Expect
    // ------
    // - Layout [omega | beta1 beta2 | alpha1..3 | eta1..3 | lambda1..3]:
    //   intercept true, beta1 true, alpha/eta/lambda 1..2 true, rest false.
    fn subset_mask_keeps_lowest_lags_in_lock_step() {
        // Arrange & Act
        let mask = subset_mask(VolFamily::TGarch, 2, 3, (1, 2)).unwrap();

        // Assert
        let expected = vec![
            true, // omega
            true, false, // beta
            true, true, false, // alpha
            true, true, false, // eta
            true, true, false, // lambda
        ];
        assert_eq!(mask, expected);
    }

    #[test]
    // Purpose
    // -------
    // Round trip: subset_orders inverts subset_mask for every valid reduced
    // order pair of every family.
    //
    // Given
    // -----
    // - Families Garch, TGarch, EGarch; p_max = 3, q_max = 2; all (a, b) with
    //   a <= 3, b <= 2.
    //
    // Expect
    // ------
    // - `subset_orders(subset_mask((a, b))) == (a, b)` everywhere.
    fn mask_order_round_trip_holds_for_all_valid_orders() {
        // Arrange
        let families = [VolFamily::Garch, VolFamily::TGarch, VolFamily::EGarch];
        let (p_max, q_max) = (3, 2);

        // Act & Assert
        for &family in &families {
            for a in 0..=p_max {
                for b in 0..=q_max {
                    let mask = subset_mask(family, p_max, q_max, (a, b)).unwrap();
                    let recovered = subset_orders(family, p_max, q_max, &mask).unwrap();
                    assert_eq!(recovered, (a, b), "round trip failed for {family:?}({a}, {b})");
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Out-of-range reduced orders fail loudly instead of truncating.
    //
    // Given
    // -----
    // - Garch with p_max = 1, q_max = 1 and requests (2, 0) and (0, 3).
    //
    // Expect
    // ------
    // - `SubsetOrderOutOfRange` naming the offending segment.
    fn subset_mask_rejects_out_of_range_orders() {
        // Arrange & Act & Assert
        assert!(matches!(
            subset_mask(VolFamily::Garch, 1, 1, (2, 0)),
            Err(ParamError::SubsetOrderOutOfRange { requested: 2, max: 1, segment: "persistence" })
        ));
        assert!(matches!(
            subset_mask(VolFamily::Garch, 1, 1, (0, 3)),
            Err(ParamError::SubsetOrderOutOfRange { requested: 3, max: 1, segment: "response" })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Inconsistent masks are rejected by the inverse mapping.
    //
    // Given
    // -----
    // - Garch(2, 1): a mask excluding the intercept, one with a sparse
    //   persistence selection, and a TGarch mask whose skew segment disagrees
    //   with its response segment.
    //
    // Expect
    // ------
    // - `MaskInconsistent` for each case.
    fn subset_orders_rejects_inconsistent_masks() {
        // Arrange
        let no_intercept = vec![false, true, false, true];
        let sparse = vec![true, false, true, true];
        // TGarch(1, 1): [omega, beta1, alpha1, eta1, lambda1]
        let unpaired_aux = vec![true, true, true, true, false];

        // Act & Assert
        assert!(matches!(
            subset_orders(VolFamily::Garch, 2, 1, &no_intercept),
            Err(ParamError::MaskInconsistent { .. })
        ));
        assert!(matches!(
            subset_orders(VolFamily::Garch, 2, 1, &sparse),
            Err(ParamError::MaskInconsistent { .. })
        ));
        assert!(matches!(
            subset_orders(VolFamily::TGarch, 1, 1, &unpaired_aux),
            Err(ParamError::MaskInconsistent { .. })
        ));
    }
}
