use core::ptr;

/// Drops the held callable in place.
pub(crate) type DestroyFn = unsafe fn(*mut u8);

/// Clones the held callable from the first storage into the second (empty) storage.
pub(crate) type CopyFn = unsafe fn(*const u8, *mut u8);

/// Moves the held callable from the first storage into the second (empty) storage.
/// The first storage no longer holds a live value afterwards.
pub(crate) type RelocateFn = unsafe fn(*mut u8, *mut u8);

/// Operation table for a concrete callable type.
///
/// Bound once, at the point the callable is placed in a `FixedSizeFunction`,
/// and copied verbatim whenever the callable is copied or moved into another one.
/// `call` is the signature-specific invoker, see `Signature::Invoker`.
///
/// The holder keeps an `Option<Ops<_>>`, so all four entries are present or absent together.
#[derive(Clone, Copy)]
pub(crate) struct Ops<I> {
    pub call: I,
    pub destroy: DestroyFn,
    pub copy: CopyFn,
    pub relocate: RelocateFn,
}

impl<I> Ops<I> {
    /// Binds the table to the callable type `F`.
    pub fn of<F: Clone>(call: I) -> Self {
        Ops {
            call,
            destroy: destroy_impl::<F>,
            copy: copy_impl::<F>,
            relocate: relocate_impl::<F>,
        }
    }
}

unsafe fn destroy_impl<F>(callable: *mut u8) {
    // Safety: storage was initialized as `F`.
    unsafe { ptr::drop_in_place(callable.cast::<F>()) }
}

unsafe fn copy_impl<F: Clone>(src: *const u8, dst: *mut u8) {
    // Safety: `src` was initialized as `F`, `dst` is a properly aligned empty storage of the same capacity.
    unsafe {
        let copy = (*src.cast::<F>()).clone();
        dst.cast::<F>().write(copy);
    }
}

unsafe fn relocate_impl<F>(src: *mut u8, dst: *mut u8) {
    // Safety: `src` was initialized as `F` and is treated as empty by the caller from now on.
    unsafe { ptr::copy_nonoverlapping(src.cast::<F>(), dst.cast::<F>(), 1) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InlineStorage;
    use std::{cell::Cell, rc::Rc};

    #[derive(Clone)]
    struct Tracked(Rc<Cell<usize>>, u32);

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn table_entries() {
        let drops = Rc::new(Cell::new(0));
        let ops = Ops::of::<Tracked>(());

        let mut a = InlineStorage::<32>::new();
        let mut b = InlineStorage::<32>::new();
        let mut c = InlineStorage::<32>::new();

        unsafe {
            a.write(Tracked(drops.clone(), 3));

            (ops.copy)(a.as_ptr(), b.as_mut_ptr());
            assert_eq!((*b.as_ptr().cast::<Tracked>()).1, 3);
            assert_eq!(Rc::strong_count(&drops), 3);

            (ops.relocate)(a.as_mut_ptr(), c.as_mut_ptr());
            assert_eq!((*c.as_ptr().cast::<Tracked>()).1, 3);
            assert_eq!(Rc::strong_count(&drops), 3);
            assert_eq!(drops.get(), 0);

            (ops.destroy)(b.as_mut_ptr());
            (ops.destroy)(c.as_mut_ptr());
        }

        assert_eq!(drops.get(), 2);
        assert_eq!(Rc::strong_count(&drops), 1);
    }
}
