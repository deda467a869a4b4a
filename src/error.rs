//! [`ConstructError`] (and any future error types)

use core::fmt::{self, Debug, Display, Formatter};



/// Building the value of an [`Indirect`](crate::Indirect) failed.
///
/// Either the allocator couldn't provide storage ([`Alloc`](Self::Alloc)), or storage was provided but the
/// constructor itself returned an error ([`Construct`](Self::Construct)).  In the latter case the storage has
/// already been freed by the time you see this error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)] pub enum ConstructError<AE, CE> {
    Alloc(AE),
    Construct(CE),
}

impl<AE, CE> ConstructError<AE, CE> {
    /// Returns <code>[Some]\(...\)</code> if this was an allocation failure.
    pub fn alloc(self) -> Option<AE> { match self { Self::Alloc(e) => Some(e), Self::Construct(_) => None } }

    /// Returns <code>[Some]\(...\)</code> if this was a constructor failure.
    pub fn construct(self) -> Option<CE> { match self { Self::Alloc(_) => None, Self::Construct(e) => Some(e) } }
}

impl<AE: Debug, CE: Display> Display for ConstructError<AE, CE> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alloc(e)      => write!(f, "unable to allocate storage for the value: {e:?}"),
            Self::Construct(e)  => write!(f, "constructing the value failed: {e}"),
        }
    }
}

#[cfg(feature = "std")] impl<AE: Debug, CE: std::error::Error + 'static> std::error::Error for ConstructError<AE, CE> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> { match self { Self::Alloc(_) => None, Self::Construct(e) => Some(e) } }
}



#[test] fn display() {
    use alloc::string::ToString;
    let e : ConstructError<(), &str> = ConstructError::Alloc(());
    assert_eq!(e.to_string(), "unable to allocate storage for the value: ()");
    assert_eq!(e.alloc(), Some(()));

    let e : ConstructError<(), &str> = ConstructError::Construct("negative size");
    assert_eq!(e.to_string(), "constructing the value failed: negative size");
    assert_eq!(e.construct(), Some("negative size"));
}
