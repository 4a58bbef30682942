use math::CompositeError;
use num_bigint::BigInt;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Failures surfaced by group algebras, the element wrapper and the group
/// facade.
#[derive(Debug, Error)]
pub enum Error {
    /// Parameters that do not describe a valid group: a composite order, a
    /// generator off the curve or of the wrong order.
    #[error("invalid group parameter: {0}")]
    InvalidParameter(String),

    /// A value outside the algebra's element set.
    #[error("{0} is not a group element")]
    InvalidElement(String),

    /// A byte buffer of the wrong shape for the expected element.
    #[error("invalid element encoding: {0}")]
    InvalidEncoding(String),

    /// A negative scalar, or one exceeding the declared factor length.
    #[error("scalar {scalar} out of range for {bit_length}-bit factors")]
    ScalarOutOfRange { scalar: BigInt, bit_length: usize },

    /// Operands belong to two different algebra instances.
    #[error("operands belong to different group algebras")]
    AlgebraMismatch,

    /// The algebra does not implement the requested operation.
    #[error("operation not supported by this algebra: {0}")]
    UnsupportedOperation(&'static str),
}

impl From<CompositeError> for Error {
    fn from(err: CompositeError) -> Self {
        Error::InvalidParameter(err.to_string())
    }
}
