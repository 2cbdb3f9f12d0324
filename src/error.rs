/// Runtime failures of a [`FixedSizeFunction`](crate::FixedSizeFunction).
///
/// Storage overflow is not listed here: it is a build failure, never a runtime one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Error {
    /// The function was called while empty.
    #[error("called an empty fixed-size function")]
    InvalidInvocation,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
