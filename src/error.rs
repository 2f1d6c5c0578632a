use crate::Float;
use thiserror::Error;

/// Errors raised at kernel entry, before any row is touched.
///
/// Numerical problems (negative radicands, overflowing hyperbolic
/// functions) are not errors: they show up as non-finite values in the
/// output buffer and it is up to the caller to look for them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackingError {
    #[error("phase space must have 6 or 7 columns, got {0}")]
    ColumnCount(usize),

    #[error("buffer of length {len} cannot be split into rows of {cols} columns")]
    RaggedBuffer { len: usize, cols: usize },

    #[error(
        "input buffer is {input_rows}x{input_cols} but output buffer is {output_rows}x{output_cols}"
    )]
    ShapeMismatch {
        input_rows: usize,
        input_cols: usize,
        output_rows: usize,
        output_cols: usize,
    },

    #[error("{element} expects {expected} element parameters, got {found}")]
    ElementParameters {
        element: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{element} needs at least {expected} global parameters, got {found}")]
    GlobalParameters {
        element: &'static str,
        expected: usize,
        found: usize,
    },
}

pub(crate) fn expect_element_parameters(
    element: &'static str,
    parameters: &[Float],
    expected: usize,
) -> Result<(), TrackingError> {
    if parameters.len() != expected {
        return Err(TrackingError::ElementParameters {
            element,
            expected,
            found: parameters.len(),
        });
    }
    Ok(())
}

pub(crate) fn expect_global_parameters(
    element: &'static str,
    parameters: &[Float],
    expected: usize,
) -> Result<(), TrackingError> {
    if parameters.len() < expected {
        return Err(TrackingError::GlobalParameters {
            element,
            expected,
            found: parameters.len(),
        });
    }
    Ok(())
}
