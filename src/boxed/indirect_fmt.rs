use crate::boxed::Indirect;
use crate::fat::Free;

use core::fmt::{self, Debug, Display, Pointer, Formatter};



/// Valueless boxes format as `Indirect { data: <valueless>, .. }` instead of panicking.
impl<T: Debug, A: Free + Debug> Debug for Indirect<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Indirect");
        match Self::is_valueless(self) {
            false   => s.field("data", &**self),
            true    => s.field("data", &format_args!("<valueless>")),
        };
        s.field("allocator", Self::allocator(self)).finish()
    }
}

impl<T: Display, A: Free> Display for Indirect<T, A> { #[track_caller] fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { T::fmt(self, f) } }

/// Formats the address of the owned storage, or a null pointer if valueless.
impl<T, A: Free> Pointer for Indirect<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let ptr : *const T = self.data().map_or(core::ptr::null(), |data| data.as_ptr());
        Pointer::fmt(&ptr, f)
    }
}



#[cfg(feature = "std")]
#[allow(deprecated)]
impl<T: std::error::Error, A: Free> std::error::Error for Indirect<T, A> where Self : Debug + Display {
    fn description(&self)   -> &str                                         { (**self).description() }
    fn cause(&self)         -> Option<&dyn std::error::Error>               { (**self).cause() }
    fn source(&self)        -> Option<&(dyn std::error::Error + 'static)>   { (**self).source() }
}



#[cfg(test)] mod tests {
    use crate::Indirect;
    use crate::allocator::alloc::Global;
    use alloc::format;

    #[test] fn debug() {
        let mut a : Indirect<i32, Global> = Indirect::new(5);
        assert_eq!(format!("{a:?}"), "Indirect { data: 5, allocator: Global }");
        let _b = Indirect::take(&mut a);
        assert_eq!(format!("{a:?}"), "Indirect { data: <valueless>, allocator: Global }");
    }

    #[test] fn display() {
        let a : Indirect<f32, Global> = Indirect::new(1.5);
        assert_eq!(format!("{a}"), "1.5");
    }

    #[test] fn pointer() {
        let mut a : Indirect<i32, Global> = Indirect::new(5);
        assert_eq!(format!("{a:p}"), format!("{:p}", &*a));
        let _b = Indirect::take(&mut a);
        assert_eq!(format!("{a:p}"), format!("{:p}", core::ptr::null::<i32>()));
    }
}
