use core::{
    cell::UnsafeCell,
    marker::PhantomData,
    mem::{align_of, size_of, MaybeUninit},
};

/// Alignment of the inline storage cell.
///
/// Held callables may not be more aligned than this.
pub const STORAGE_ALIGN: usize = 16;

/// Raw byte buffer the held callable lives in.
/// Uninterpreted by itself; only the operation table knows what occupies it.
///
/// The bytes sit in an `UnsafeCell`: a `Fn` callable with interior mutability
/// writes to them through a shared borrow of the holder.
#[repr(C, align(16))] // alignment value is in sync with `STORAGE_ALIGN`
pub(crate) struct InlineStorage<const N: usize> {
    bytes: UnsafeCell<MaybeUninit<[u8; N]>>,
}

const_assert_eq!(core::mem::align_of::<InlineStorage<0>>(), STORAGE_ALIGN);
const_assert_eq!(core::mem::size_of::<InlineStorage<1>>(), STORAGE_ALIGN);
assert_eq_size!(InlineStorage<64>, [u8; 64]);

impl<const N: usize> InlineStorage<N> {
    /// Storage with nothing in it.
    pub const fn new() -> Self {
        InlineStorage {
            bytes: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    /// Returns `true` if a value of type `T` fits in `N` bytes at `STORAGE_ALIGN`.
    pub const fn fits<T>() -> bool {
        size_of::<T>() <= N && align_of::<T>() <= STORAGE_ALIGN
    }

    /// Pointer valid for reads, and for writes the held value performs through shared references.
    pub fn as_ptr(&self) -> *const u8 {
        self.bytes.get().cast::<u8>().cast_const()
    }

    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.bytes.get_mut().as_mut_ptr().cast()
    }

    /// Moves `value` into the storage.
    ///
    /// Fails the build (not the program) if `T` does not fit.
    ///
    /// # Safety
    ///
    /// The storage must not hold a live value: whatever is there is overwritten without being dropped.
    pub unsafe fn write<T>(&mut self, value: T) {
        #[allow(clippy::let_unit_value)]
        let () = Capacity::<T, N>::CHECK;

        // Safety: size and alignment are checked above, the pointer is valid for `N` bytes.
        unsafe { self.as_mut_ptr().cast::<T>().write(value) }
    }
}

/// Compile-time capacity bound.
///
/// `CHECK` is evaluated once per instantiation, so a callable that overflows the storage
/// is rejected when the crate that places it is built.
struct Capacity<T, const N: usize>(PhantomData<T>);

impl<T, const N: usize> Capacity<T, N> {
    const CHECK: () = assert!(
        InlineStorage::<N>::fits::<T>(),
        "callable does not fit into the inline storage of the `FixedSizeFunction`"
    );
}
