//! Bindings live in one of four independent key spaces, defined by their [Lifetime] and by being
//! keyed either by type or by tag. A type-keyed binding never collides with a tag-keyed one, even
//! if both produce the same concrete type.
//!
//! * [Lifetime::Singleton] - a single instance, created at registration and owned by the
//!   [Injector](crate::injector::Injector) for its whole life.
//! * [Lifetime::Transient] - a factory invoked on each resolution. Created instances are owned by
//!   the caller.

use crate::component::InjectablePtr;
use crate::error::TypeKey;
use derivative::Derivative;
use derive_more::Display;
use fxhash::FxHashMap;
use std::any::Any;
use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::hash::Hash;

#[cfg(not(feature = "threadsafe"))]
pub(crate) type ErasedFactoryPtr = Box<dyn Fn(Box<dyn Any>) -> Option<InjectablePtr>>;
#[cfg(feature = "threadsafe")]
pub(crate) type ErasedFactoryPtr =
    Box<dyn Fn(Box<dyn Any>) -> Option<InjectablePtr> + Send + Sync>;

/// Lifetime policy of a binding.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display)]
pub enum Lifetime {
    #[display(fmt = "Singleton")]
    Singleton,
    #[display(fmt = "Transient")]
    Transient,
}

/// Identifies one of the key spaces of an [Injector](crate::injector::Injector).
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum KeySpaceKind {
    Singleton,
    TaggedSingleton,
    Transient,
    TaggedTransient,
}

impl KeySpaceKind {
    pub fn lifetime(&self) -> Lifetime {
        match self {
            Self::Singleton | Self::TaggedSingleton => Lifetime::Singleton,
            Self::Transient | Self::TaggedTransient => Lifetime::Transient,
        }
    }

    pub fn is_tagged(&self) -> bool {
        matches!(self, Self::TaggedSingleton | Self::TaggedTransient)
    }
}

/// Singleton instance along with the type it was registered for.
#[derive(Derivative)]
#[derivative(Debug)]
pub(crate) struct SingletonBinding {
    pub(crate) target: TypeKey,
    #[derivative(Debug = "ignore")]
    pub(crate) instance: InjectablePtr,
}

/// Transient factory along with the type it was registered for and the type of arguments it
/// accepts.
#[derive(Derivative)]
#[derivative(Debug)]
pub(crate) struct TransientBinding {
    pub(crate) target: TypeKey,
    pub(crate) arguments: TypeKey,
    #[derivative(Debug = "ignore")]
    pub(crate) factory: ErasedFactoryPtr,
}

/// Map of bindings, which rejects registering a key twice.
#[derive(Derivative)]
#[derivative(Debug(bound = "K: std::fmt::Debug, B: std::fmt::Debug"), Default(bound = ""))]
pub(crate) struct KeySpace<K, B> {
    bindings: FxHashMap<K, B>,
}

impl<K: Eq + Hash, B> KeySpace<K, B> {
    /// Stores the binding created by `create`, unless the key is already taken. `create` is not
    /// called in the latter case.
    pub(crate) fn try_register<F: FnOnce() -> B>(&mut self, key: K, create: F) -> bool {
        match self.bindings.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(create());
                true
            }
        }
    }

    #[inline]
    pub(crate) fn binding<Q: Eq + Hash + ?Sized>(&self, key: &Q) -> Option<&B>
    where
        K: Borrow<Q>,
    {
        self.bindings.get(key)
    }

    #[inline]
    pub(crate) fn contains<Q: Eq + Hash + ?Sized>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
    {
        self.bindings.contains_key(key)
    }

    #[inline]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, &B)> {
        self.bindings.iter()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.bindings.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::scope::{KeySpace, KeySpaceKind, Lifetime};

    #[test]
    fn should_reject_occupied_key_without_creating() {
        let mut space = KeySpace::<String, i8>::default();
        assert!(space.try_register("a".to_string(), || 1));
        assert!(!space.try_register("a".to_string(), || panic!("should not be called")));

        assert_eq!(space.binding("a"), Some(&1));
        assert_eq!(space.len(), 1);
    }

    #[test]
    fn should_keep_keys_independent() {
        let mut space = KeySpace::<String, i8>::default();
        assert!(space.try_register("a".to_string(), || 1));
        assert!(space.try_register("b".to_string(), || 2));

        assert_eq!(space.binding("a"), Some(&1));
        assert_eq!(space.binding("b"), Some(&2));
        assert!(!space.contains("c"));
    }

    #[test]
    fn should_map_kinds_to_lifetimes() {
        assert_eq!(KeySpaceKind::TaggedSingleton.lifetime(), Lifetime::Singleton);
        assert_eq!(KeySpaceKind::Transient.lifetime(), Lifetime::Transient);
        assert!(KeySpaceKind::TaggedTransient.is_tagged());
        assert!(!KeySpaceKind::Singleton.is_tagged());
    }
}
