//! Errors raised while decoding externally supplied buffers.
//!
//! Contract violations inside the crate (mismatched container shapes, row
//! indices outside the trace, transcript length drift) are not represented
//! here: they panic, since no caller can recover from them.

pub type Result<T> = core::result::Result<T, FlavorError>;

#[derive(thiserror::Error, Debug)]
pub enum FlavorError {
    #[error("field buffer exhausted: need {needed} elements at offset {offset}, buffer holds {available}")]
    BufferExhausted {
        needed: usize,
        offset: usize,
        available: usize,
    },

    #[error("trailing field elements: consumed {consumed} of {total}")]
    TrailingElements { consumed: usize, total: usize },

    #[error("invalid boolean encoding: {0}")]
    InvalidBool(u32),

    #[error("commitment limb out of range: {0}")]
    InvalidCommitmentLimb(u32),

    #[error("circuit size {0} is not a power of two")]
    InvalidCircuitSize(usize),

    #[error("proving key has no commitment key")]
    MissingCommitmentKey,

    #[error("bincode: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
