use crate::{error::Result, function::FixedSizeFunction};

mod sealed {
    pub trait Sealed {}
}

/// Call signature of a [`FixedSizeFunction`], spelled as a closure trait object type.
///
/// Implemented for `dyn FnMut(..) -> R` and `dyn Fn(..) -> R` with up to six arguments,
/// with and without `+ Send`, for any lifetime bound.
pub trait Signature: sealed::Sealed {
    /// Value returned by a call.
    type Output;

    /// Argument types, as a tuple.
    type Args;

    /// Number of arguments.
    const ARITY: usize;

    /// Type-erased entry point which calls the held callable in the storage.
    #[doc(hidden)]
    type Invoker: Copy;
}

macro_rules! impl_signature {
    (@fn_mut $arity:expr; [$($bound:tt)*]; $($arg:ident $val:ident),*) => {
        impl<'a, R, $($arg,)*> sealed::Sealed for dyn FnMut($($arg),*) -> R $($bound)* + 'a {}

        impl<'a, R, $($arg,)*> Signature for dyn FnMut($($arg),*) -> R $($bound)* + 'a {
            type Output = R;
            type Args = ($($arg,)*);
            const ARITY: usize = $arity;
            type Invoker = unsafe fn(*mut u8 $(, $arg)*) -> R;
        }

        impl<'a, R, $($arg,)* const N: usize> FixedSizeFunction<dyn FnMut($($arg),*) -> R $($bound)* + 'a, N> {
            /// Creates a function holding `f`.
            pub fn new<F>(f: F) -> Self
            where
                F: FnMut($($arg),*) -> R + Clone $($bound)* + 'a,
            {
                let mut result = Self::new_empty();
                result.assign(f);
                result
            }

            /// Replaces the held callable, if any, with `f`.
            pub fn assign<F>(&mut self, f: F)
            where
                F: FnMut($($arg),*) -> R + Clone $($bound)* + 'a,
            {
                unsafe fn invoke<F, R, $($arg,)*>(callable: *mut u8 $(, $val: $arg)*) -> R
                where
                    F: FnMut($($arg),*) -> R,
                {
                    // Safety: storage was initialized as `F` and is borrowed mutably by the caller.
                    let callable = unsafe { &mut *callable.cast::<F>() };
                    callable($($val),*)
                }

                let invoke: unsafe fn(*mut u8 $(, $arg)*) -> R = invoke::<F, R, $($arg,)*>;

                self.reset();

                // Safety: the function is empty and `invoke` is instantiated for `F`.
                unsafe { self.populate(f, invoke) }
            }

            /// Calls the held callable.
            ///
            /// Fails with [`Error::InvalidInvocation`](crate::Error::InvalidInvocation) if the function is empty.
            pub fn call(&mut self $(, $val: $arg)*) -> Result<R> {
                let invoke = self.invoker()?;

                // Safety: the invoker was bound together with the callable in the storage.
                Ok(unsafe { invoke(self.storage_mut_ptr() $(, $val)*) })
            }

            /// Calls the held callable with the arguments packed in a tuple.
            pub fn call_tuple(&mut self, ($($val,)*): ($($arg,)*)) -> Result<R> {
                self.call($($val),*)
            }
        }
    };

    (@fn $arity:expr; [$($bound:tt)*]; $($arg:ident $val:ident),*) => {
        impl<'a, R, $($arg,)*> sealed::Sealed for dyn Fn($($arg),*) -> R $($bound)* + 'a {}

        impl<'a, R, $($arg,)*> Signature for dyn Fn($($arg),*) -> R $($bound)* + 'a {
            type Output = R;
            type Args = ($($arg,)*);
            const ARITY: usize = $arity;
            type Invoker = unsafe fn(*const u8 $(, $arg)*) -> R;
        }

        impl<'a, R, $($arg,)* const N: usize> FixedSizeFunction<dyn Fn($($arg),*) -> R $($bound)* + 'a, N> {
            /// Creates a function holding `f`.
            pub fn new<F>(f: F) -> Self
            where
                F: Fn($($arg),*) -> R + Clone $($bound)* + 'a,
            {
                let mut result = Self::new_empty();
                result.assign(f);
                result
            }

            /// Replaces the held callable, if any, with `f`.
            pub fn assign<F>(&mut self, f: F)
            where
                F: Fn($($arg),*) -> R + Clone $($bound)* + 'a,
            {
                unsafe fn invoke<F, R, $($arg,)*>(callable: *const u8 $(, $val: $arg)*) -> R
                where
                    F: Fn($($arg),*) -> R,
                {
                    // Safety: storage was initialized as `F`.
                    let callable = unsafe { &*callable.cast::<F>() };
                    callable($($val),*)
                }

                let invoke: unsafe fn(*const u8 $(, $arg)*) -> R = invoke::<F, R, $($arg,)*>;

                self.reset();

                // Safety: the function is empty and `invoke` is instantiated for `F`.
                unsafe { self.populate(f, invoke) }
            }

            /// Calls the held callable.
            ///
            /// Fails with [`Error::InvalidInvocation`](crate::Error::InvalidInvocation) if the function is empty.
            pub fn call(&self $(, $val: $arg)*) -> Result<R> {
                let invoke = self.invoker()?;

                // Safety: the invoker was bound together with the callable in the storage.
                Ok(unsafe { invoke(self.storage_ptr() $(, $val)*) })
            }

            /// Calls the held callable with the arguments packed in a tuple.
            pub fn call_tuple(&self, ($($val,)*): ($($arg,)*)) -> Result<R> {
                self.call($($val),*)
            }
        }
    };

    ($arity:expr; $($arg:ident $val:ident),*) => {
        impl_signature!(@fn_mut $arity; []; $($arg $val),*);
        impl_signature!(@fn_mut $arity; [+ Send]; $($arg $val),*);
        impl_signature!(@fn $arity; []; $($arg $val),*);
        impl_signature!(@fn $arity; [+ Send]; $($arg $val),*);
    };
}

impl_signature!(0;);
impl_signature!(1; A0 a0);
impl_signature!(2; A0 a0, A1 a1);
impl_signature!(3; A0 a0, A1 a1, A2 a2);
impl_signature!(4; A0 a0, A1 a1, A2 a2, A3 a3);
impl_signature!(5; A0 a0, A1 a1, A2 a2, A3 a3, A4 a4);
impl_signature!(6; A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
