#![allow(clippy::partialeq_ne_impl)] // unnecessary but why not

use crate::*;
use crate::boxed::Indirect;
use fat::Free;

use core::borrow::{Borrow, BorrowMut};
use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use core::ops::{Deref, DerefMut};



// (Auto)Derefs

impl<T, A: Free> Deref for Indirect<T, A> {
    type Target = T;
    #[track_caller] fn deref(&self) -> &T {
        let Some(data) = self.data() else { bug::valueless::deref() };
        // SAFETY: ✔️ a non-valueless `Indirect` always points at a valid `T` that we have exclusive access to
        unsafe { data.as_ref() }
    }
}

impl<T, A: Free> DerefMut for Indirect<T, A> {
    #[track_caller] fn deref_mut(&mut self) -> &mut T {
        let Some(mut data) = self.data() else { bug::valueless::deref() };
        // SAFETY: ✔️ a non-valueless `Indirect` always points at a valid `T` that we have exclusive access to
        unsafe { data.as_mut() }
    }
}

impl<T, A: Free> AsMut<T>       for Indirect<T, A> { #[track_caller] fn as_mut(&mut self)        -> &mut T   { self } }
impl<T, A: Free> AsRef<T>       for Indirect<T, A> { #[track_caller] fn as_ref(&self)            -> &T       { self } }
impl<T, A: Free> Borrow<T>      for Indirect<T, A> { #[track_caller] fn borrow(&self)            -> &T       { self } }
impl<T, A: Free> BorrowMut<T>   for Indirect<T, A> { #[track_caller] fn borrow_mut(&mut self)    -> &mut T   { self } }



// Comparisons: always by value, never by address

impl<T: Eq,  A: Free> Eq     for Indirect<T, A> {}
impl<T: Ord, A: Free> Ord    for Indirect<T, A> { fn cmp(&self, other: &Self) -> Ordering { T::cmp(self, other) } }

impl<T: PartialEq, A: Free> PartialEq  for Indirect<T, A> {
    fn eq(&self, other: &Self) -> bool { T::eq(self, other) }
    fn ne(&self, other: &Self) -> bool { T::ne(self, other) }
}

impl<T: PartialOrd, A: Free> PartialOrd for Indirect<T, A> {
    fn partial_cmp  (&self, other: &Self) -> Option<Ordering>   { T::partial_cmp   (self, other) }
    fn ge           (&self, other: &Self) -> bool               { T::ge            (self, other) }
    fn gt           (&self, other: &Self) -> bool               { T::gt            (self, other) }
    fn le           (&self, other: &Self) -> bool               { T::le            (self, other) }
    fn lt           (&self, other: &Self) -> bool               { T::lt            (self, other) }
}

/// Hashes exactly as the pointee does, so an [`Indirect`] and its `T` agree on hashes.
impl<T: Hash, A: Free> Hash for Indirect<T, A> {
    #[track_caller] fn hash<H: Hasher>(&self, state: &mut H) {
        let Some(data) = self.data() else { bug::valueless::hash() };
        // SAFETY: ✔️ a non-valueless `Indirect` always points at a valid `T`
        T::hash::<H>(unsafe { data.as_ref() }, state)
    }
}



#[cfg(test)] mod tests {
    use crate::Indirect;
    use crate::allocator::alloc::Global;
    use alloc::string::String;

    use std::collections::{BTreeSet, HashSet};
    use std::hash::{BuildHasher, RandomState};

    #[test] fn compare_by_value() {
        let a : Indirect<i32, Global> = Indirect::new(1);
        let b : Indirect<i32, Global> = Indirect::new(2);
        let c : Indirect<i32, Global> = Indirect::new(1);
        assert!(a == c && a != b);
        assert!(a < b && b > a && a <= c && a >= c);
        assert_eq!(a.cmp(&b), core::cmp::Ordering::Less);
        assert_eq!(Indirect::<f64, Global>::new(f64::NAN).partial_cmp(&Indirect::new(1.0)), None);
    }

    #[test] fn hash_matches_pointee() {
        let s = RandomState::new();
        let b : Indirect<String, Global> = Indirect::new(String::from("hash me"));
        assert_eq!(s.hash_one(&b), s.hash_one(String::from("hash me")));
        assert_eq!(s.hash_one(&b), s.hash_one(b.clone()));
    }

    #[test] fn collections() {
        let mut set = HashSet::new();
        set.insert(Indirect::<String, Global>::new(String::from("a")));
        set.insert(Indirect::<String, Global>::new(String::from("a")));
        set.insert(Indirect::<String, Global>::new(String::from("b")));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&String::from("b")));

        let sorted : BTreeSet<_> = [3, 1, 2].into_iter().map(Indirect::<i32, Global>::new).collect();
        assert!(sorted.iter().map(|b| **b).eq([1, 2, 3]));
    }

    #[test] #[should_panic = "dereferenced a valueless Indirect"] fn deref_valueless() {
        let mut a : Indirect<i32, Global> = Indirect::new(1);
        let _b = Indirect::take(&mut a);
        let _value : i32 = *a;
    }

    #[test] #[should_panic = "dereferenced a valueless Indirect"] fn compare_valueless() {
        let mut a : Indirect<i32, Global> = Indirect::new(1);
        let _b = Indirect::take(&mut a);
        let _ = a == Indirect::new(1);
    }

    #[test] #[should_panic = "hash a valueless Indirect"] fn hash_valueless() {
        let mut a : Indirect<i32, Global> = Indirect::new(1);
        let _b = Indirect::take(&mut a);
        let _ = RandomState::new().hash_one(&a);
    }
}
