//! A type-erased callable that keeps the callable in a fixed-size buffer inside itself
//! and never allocates.
//!
//! [`FixedSizeFunction<S, N>`](FixedSizeFunction) holds any `Clone` closure, function pointer or
//! function object matching the call signature `S`, provided it fits in `N` bytes.
//! Callables that don't fit are rejected when the program is built, there is no fallback to the heap.
//!
//! ```
//! use fixed_function::{Error, FixedSizeFunction, Null};
//!
//! type Function = FixedSizeFunction<dyn FnMut(i32) -> i32, 64>;
//!
//! fn double(x: i32) -> i32 {
//!     x * 2
//! }
//!
//! let mut f = Function::new(double);
//! assert_eq!(f.call(5), Ok(10));
//!
//! let offset = 7;
//! f.assign(move |x| x + offset);
//! assert_eq!(f.call(5), Ok(12));
//!
//! f.reset();
//! assert!(f == Null);
//! assert_eq!(f.call(5), Err(Error::InvalidInvocation));
//! ```
//!
//! The signature is spelled as a closure trait object: `dyn FnMut(..) -> R` functions are called
//! through `&mut self`, `dyn Fn(..) -> R` ones through `&self`. Adding `+ Send` to the signature
//! requires `Send` callables and makes the function itself `Send`.
//!
//! The crate is `no_std` with the default `std` feature disabled.
//! The `tracing` feature emits lifecycle events through the `tracing` crate.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(test, not(feature = "std")))]
extern crate std;

#[macro_use]
extern crate static_assertions;

/// Emits a `tracing` trace event if the `tracing` feature is enabled.
macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    };
}

/// Emits a `tracing` warning if the `tracing` feature is enabled.
macro_rules! warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::warn!($($arg)*);
    };
}

mod error;
mod function;
mod ops;
mod signature;
mod storage;

pub use {
    error::{Error, Result},
    function::{swap, FixedSizeFunction, Null},
    signature::Signature,
    storage::STORAGE_ALIGN,
};
