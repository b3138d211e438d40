//! Column orthogonalization of derivative regressors
//!
//! Each column is replaced by its least-squares residual against all
//! preceding columns, so derivative regressors only explain variance the main
//! response cannot. Columns are not rescaled.

use nalgebra::DMatrix;

use crate::error::{RegressorError, RegressorResult};

/// Singular values below `PINV_RCOND * σ_max` are treated as zero.
const PINV_RCOND: f64 = 1e-15;

/// Orthogonalize every column of `design` against the columns before it.
///
/// Works in increasing column order, so column `i` is projected against the
/// already-orthogonalized columns `0..i`. A single-column matrix is left
/// untouched.
///
/// # Errors
///
/// [`RegressorError::Computation`] when the matrix holds non-finite values or
/// the SVD behind the pseudo-inverse fails.
pub fn orthogonalize(design: &mut DMatrix<f64>) -> RegressorResult<()> {
    if design.ncols() <= 1 {
        return Ok(());
    }
    if design.iter().any(|v| !v.is_finite()) {
        return Err(RegressorError::computation(
            "orthogonalize",
            "design matrix contains non-finite values",
        ));
    }

    for i in 1..design.ncols() {
        let basis = design.columns(0, i).into_owned();
        let svd = basis
            .clone()
            .try_svd(true, true, f64::EPSILON, 0)
            .ok_or_else(|| RegressorError::computation("orthogonalize", "SVD did not converge"))?;

        let cutoff = PINV_RCOND * svd.singular_values.max();
        let pinv = svd
            .pseudo_inverse(cutoff)
            .map_err(|reason| RegressorError::computation("orthogonalize", reason))?;

        let projection = &basis * (&pinv * design.column(i));
        let mut column = design.column_mut(i);
        column -= projection;
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
