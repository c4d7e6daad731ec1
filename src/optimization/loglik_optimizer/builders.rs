//! L-BFGS solver construction helpers.
//!
//! These builders hide Argmin's generic wiring and apply crate-level options
//! (tolerances, memory size) so higher-level code can request a configured
//! solver without touching Argmin-specific types. The initial parameter vector
//! and maximum iterations are runtime concerns left to the runner
//! (`run_lbfgs`).
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            DEFAULT_LBFGS_MEM, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente, MoreThuenteLS,
        },
    },
};

/// Construct L-BFGS with Hager–Zhang line search.
///
/// Consults `opts.lbfgs_mem` (defaulting to [`DEFAULT_LBFGS_MEM`]) and wires
/// the optional `tol_grad` / `tol_cost` stopping rules into the solver.
///
/// # Errors
/// Propagates `OptError` if Argmin rejects a tolerance setting.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with More–Thuente line search.
///
/// Consults `opts.lbfgs_mem` (defaulting to [`DEFAULT_LBFGS_MEM`]) and wires
/// the optional `tol_grad` / `tol_cost` stopping rules into the solver.
///
/// # Errors
/// Propagates `OptError` if Argmin rejects a tolerance setting.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply the optional tolerance settings from `opts` to a freshly built
/// L-BFGS solver.
///
/// Generic over the line-search type so both builders share the wiring.
fn configure_lbfgs<L>(
    mut lbfgs: LBFGS<L, super::types::Theta, super::types::Grad, super::types::Cost>,
    opts: &MLEOptions,
) -> OptResult<LBFGS<L, super::types::Theta, super::types::Grad, super::types::Cost>> {
    if let Some(tol_grad) = opts.tols.tol_grad {
        lbfgs = lbfgs.with_tolerance_grad(tol_grad)?;
    }
    if let Some(tol_cost) = opts.tols.tol_cost {
        lbfgs = lbfgs.with_tolerance_cost(tol_cost)?;
    }
    Ok(lbfgs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::traits::{LineSearcher, Tolerances};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - That both builders accept a default options bundle.
    //
    // They intentionally DO NOT cover:
    // - Full solver runs (exercised by the integration tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Both solver builders succeed for a validated options bundle.
    //
    // Given
    // -----
    // - Default tolerances with an explicit L-BFGS memory of 5.
    //
    // Expect
    // ------
    // - `build_optimizer_hager_zhang` and `build_optimizer_more_thuente`
    //   return `Ok`.
    fn builders_accept_validated_options() {
        // Arrange
        let tols = Tolerances::new(Some(1e-6), Some(1e-9), Some(100)).unwrap();
        let opts = MLEOptions::new(tols, LineSearcher::MoreThuente, false, Some(5)).unwrap();

        // Act & Assert
        assert!(build_optimizer_hager_zhang(&opts).is_ok());
        assert!(build_optimizer_more_thuente(&opts).is_ok());
    }
}
