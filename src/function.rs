use {
    crate::{
        error::{Error, Result},
        ops::Ops,
        signature::Signature,
        storage::InlineStorage,
    },
    core::{fmt, marker::PhantomData, mem},
};

/// Stand-in for "no function".
///
/// Converts into an empty [`FixedSizeFunction`] and compares equal to every empty one.
///
/// ```
/// use fixed_function::{FixedSizeFunction, Null};
///
/// let f: FixedSizeFunction<dyn FnMut(u32) -> u32, 16> = Null.into();
///
/// assert!(f == Null);
/// assert!(Null == f);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Null;

/// Type-erased callable with `N` bytes of inline storage. Never allocates.
///
/// `S` is the call signature, spelled as a closure trait object:
/// `dyn FnMut(A, B) -> R` or `dyn Fn(A, B) -> R`, optionally `+ Send`, optionally `+ 'a`
/// to allow the callable to borrow for `'a`. Up to six arguments are supported.
///
/// Any `Clone` callable matching the signature may be stored, as long as it is not larger than `N` bytes
/// and not more aligned than [`STORAGE_ALIGN`](crate::STORAGE_ALIGN).
/// A callable that does not fit is rejected when the program is built:
///
/// ```compile_fail
/// use fixed_function::FixedSizeFunction;
///
/// type Small = FixedSizeFunction<dyn FnMut() -> usize, 8>;
///
/// let big = [0u8; 64];
/// let _f = Small::new(move || big.len());
/// ```
///
/// ```compile_fail
/// use fixed_function::FixedSizeFunction;
///
/// #[derive(Clone, Copy)]
/// #[repr(align(64))]
/// struct Wide(u8);
///
/// let wide = Wide(1);
/// let _f = FixedSizeFunction::<dyn Fn() -> u8, 256>::new(move || wide.clone().0);
/// ```
///
/// The stored callable is placed in the holder itself, together with a table of
/// four type-specific operations (call, destroy, copy, move) bound when it was placed.
/// Everything after that goes through the table.
///
/// # Example
///
/// ```
/// use fixed_function::{Error, FixedSizeFunction};
///
/// type Function = FixedSizeFunction<dyn FnMut(i32) -> i32, 32>;
///
/// let mut total = 0;
/// let mut f = Function::new(move |x| {
///     total += x;
///     total
/// });
///
/// assert_eq!(f.call(2), Ok(2));
/// assert_eq!(f.call(3), Ok(5));
///
/// // Copies are independent.
/// let mut g = f.clone();
/// assert_eq!(g.call(10), Ok(15));
/// assert_eq!(f.call(1), Ok(6));
///
/// // Moving out leaves the source empty.
/// let mut h = f.take();
/// assert_eq!(h.call(1), Ok(7));
/// assert_eq!(f.call(1), Err(Error::InvalidInvocation));
/// ```
pub struct FixedSizeFunction<S: ?Sized + Signature, const N: usize> {
    ops: Option<Ops<S::Invoker>>,
    storage: InlineStorage<N>,
    _signature: PhantomData<S>,
}

impl<S: ?Sized + Signature, const N: usize> FixedSizeFunction<S, N> {
    /// Number of bytes available to the held callable.
    pub const CAPACITY: usize = N;

    /// Creates an empty function. Calling it fails with [`Error::InvalidInvocation`].
    pub const fn new_empty() -> Self {
        FixedSizeFunction {
            ops: None,
            storage: InlineStorage::new(),
            _signature: PhantomData,
        }
    }

    /// Returns `true` if a callable of type `F` can be stored.
    pub const fn fits<F>() -> bool {
        InlineStorage::<N>::fits::<F>()
    }

    /// If the function holds a callable, returns `true`; otherwise returns `false`.
    pub fn is_some(&self) -> bool {
        self.ops.is_some()
    }

    /// Returns `true` if the function holds no callable.
    pub fn is_empty(&self) -> bool {
        !self.is_some()
    }

    /// Drops the held callable, if any. The function is empty afterwards.
    pub fn reset(&mut self) {
        if let Some(ops) = self.ops.take() {
            trace!(capacity = N, "resetting fixed-size function");

            // Safety: the table was bound to the type in the storage, and it's no longer recorded as live.
            unsafe { (ops.destroy)(self.storage.as_mut_ptr()) }
        }
    }

    /// Same as [`reset`](#method.reset).
    pub fn assign_null(&mut self) {
        self.reset();
    }

    /// Replaces the held callable with a copy of the one held by `src`, or empties the function if `src` is empty.
    pub fn assign_from(&mut self, src: &Self) {
        self.reset();
        self.copy_from(src);
    }

    /// Replaces the held callable with the one held by `src`, or empties the function if `src` is empty.
    ///
    /// `src` is always empty afterwards.
    pub fn move_from(&mut self, src: &mut Self) {
        self.reset();

        if let Some(ops) = src.ops.take() {
            trace!(capacity = N, "relocating fixed-size function");

            // Safety: `src` no longer treats its storage as live, `self` is empty.
            unsafe { (ops.relocate)(src.storage.as_mut_ptr(), self.storage.as_mut_ptr()) };

            self.ops = Some(ops);
        }
    }

    /// Moves the held callable out into a new function, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        let mut result = Self::new_empty();
        result.move_from(self);
        result
    }

    /// Exchanges the held callables, and their operation tables, of two functions.
    ///
    /// Either or both may be empty; the held types need not match.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ops, &mut other.ops);
        mem::swap(&mut self.storage, &mut other.storage);
    }

    /// Stores `f`, binding the operation table to `F`.
    ///
    /// # Safety
    ///
    /// The function must be empty.
    /// `call` must invoke the storage as `F`.
    pub(crate) unsafe fn populate<F: Clone>(&mut self, f: F, call: S::Invoker) {
        debug_assert!(self.is_empty());

        trace!(
            callable = core::any::type_name::<F>(),
            size = core::mem::size_of::<F>(),
            capacity = N,
            "populating fixed-size function"
        );

        // Safety: the function is empty. The capacity is checked at build time by `write`.
        unsafe { self.storage.write(f) };

        self.ops = Some(Ops::of::<F>(call));
    }

    /// Returns the invoker of the held callable, or fails if there is none.
    pub(crate) fn invoker(&self) -> Result<S::Invoker> {
        match &self.ops {
            Some(ops) => Ok(ops.call),
            None => {
                warn!(capacity = N, "called an empty fixed-size function");
                Err(Error::InvalidInvocation)
            }
        }
    }

    pub(crate) fn storage_ptr(&self) -> *const u8 {
        self.storage.as_ptr()
    }

    pub(crate) fn storage_mut_ptr(&mut self) -> *mut u8 {
        self.storage.as_mut_ptr()
    }

    fn copy_from(&mut self, src: &Self) {
        debug_assert!(self.is_empty());

        if let Some(ops) = src.ops {
            // Safety: the table was bound to the type in `src`, `self` is empty.
            // If the copy panics, `self` stays empty.
            unsafe { (ops.copy)(src.storage.as_ptr(), self.storage.as_mut_ptr()) };

            self.ops = Some(ops);
        }
    }
}

/// Exchanges the held callables of two functions.
pub fn swap<S: ?Sized + Signature, const N: usize>(
    lhs: &mut FixedSizeFunction<S, N>,
    rhs: &mut FixedSizeFunction<S, N>,
) {
    lhs.swap(rhs);
}

impl<S: ?Sized + Signature, const N: usize> Drop for FixedSizeFunction<S, N> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<S: ?Sized + Signature, const N: usize> Default for FixedSizeFunction<S, N> {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl<S: ?Sized + Signature, const N: usize> Clone for FixedSizeFunction<S, N> {
    fn clone(&self) -> Self {
        let mut result = Self::new_empty();
        result.copy_from(self);
        result
    }

    fn clone_from(&mut self, src: &Self) {
        self.assign_from(src);
    }
}

impl<S: ?Sized + Signature, const N: usize> From<Null> for FixedSizeFunction<S, N> {
    fn from(_: Null) -> Self {
        Self::new_empty()
    }
}

impl<S: ?Sized + Signature, const N: usize> PartialEq<Null> for FixedSizeFunction<S, N> {
    fn eq(&self, _: &Null) -> bool {
        self.is_empty()
    }
}

impl<S: ?Sized + Signature, const N: usize> PartialEq<FixedSizeFunction<S, N>> for Null {
    fn eq(&self, f: &FixedSizeFunction<S, N>) -> bool {
        f.is_empty()
    }
}

impl<S: ?Sized + Signature, const N: usize> fmt::Debug for FixedSizeFunction<S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedSizeFunction")
            .field("capacity", &N)
            .field("populated", &self.is_some())
            .finish()
    }
}
