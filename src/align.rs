//! [`Alignment`]

use core::alloc::Layout;
use core::fmt::{self, Debug, Formatter};
use core::num::NonZeroUsize;



/// A valid [`Layout`] alignment (a nonzero power of 2)
///
/// Used by [`Meta::MAX_ALIGN`](crate::meta::Meta::MAX_ALIGN) to reject, at compile time, boxes whose payload an allocator could never align.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)] #[repr(transparent)] pub struct Alignment(NonZeroUsize);

impl Alignment {
    #[track_caller] pub(crate) const fn constant(align: usize) -> Self { match Self::new(align) { Some(a) => a, None => panic!("Alignment::constant(align): invalid constant") } }

    /// Returns [`None`] unless `align` is a valid power of 2 (which also implies nonzero)
    pub const fn new(align: usize) -> Option<Self> {
        match NonZeroUsize::new(align) {
            Some(nz) if align.is_power_of_two() => Some(Self(nz)),
            _                                   => None,
        }
    }

    /// Returns the [`Alignment`] of `T`.
    pub const fn of<T>() -> Self { Self::constant(core::mem::align_of::<T>()) }

    /// Returns the alignment as a [`usize`]
    pub const fn as_usize(self) -> usize { self.0.get() }

    /// Returns the alignment as a [`NonZeroUsize`]
    pub const fn as_nonzero(self) -> NonZeroUsize { self.0 }

    /// Minimum representable alignment (e.g. `1`)
    pub const MIN : Alignment = Alignment::constant(1);

    /// Maximum representable alignment (2 GiB on 32-bit, 8 EiB on 64-bit)
    pub const MAX : Alignment = Alignment::constant(usize::MAX/2+1);
}

impl From<Layout   > for Alignment      { fn from(layout: Layout  ) -> Self { Self::constant(layout.align()) } }
impl From<Alignment> for usize          { fn from(align: Alignment) -> Self { align.as_usize()   } }
impl From<Alignment> for NonZeroUsize   { fn from(align: Alignment) -> Self { align.as_nonzero() } }

impl Debug for Alignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut v = self.as_usize();
        for unit in ["B", "KiB", "MiB", "GiB", "TiB", "PiB"] {
            if v < 1024 { return write!(f, "{v} {unit}") }
            v >>= 10;
        }
        write!(f, "{v} EiB")
    }
}



#[test] fn new() {
    assert_eq!(Alignment::new(0), None);
    assert_eq!(Alignment::new(3), None);
    assert_eq!(Alignment::new(8).map(Alignment::as_usize), Some(8));
    assert_eq!(Alignment::of::<u64>().as_usize(), core::mem::align_of::<u64>());
    assert!(Alignment::MIN < Alignment::MAX);
}

#[test] fn debug() {
    use alloc::format;
    assert_eq!(format!("{:?}", Alignment::constant(16)),   "16 B");
    assert_eq!(format!("{:?}", Alignment::constant(4096)), "4 KiB");
}
