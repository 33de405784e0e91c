//! Factories for [transient](crate::scope::Lifetime::Transient) bindings.
//!
//! A factory receives the arguments supplied at the resolution site and produces a new instance
//! on every call. The argument type is fixed at registration and must match the one used for
//! resolution. There is no overload selection between factories accepting different arguments;
//! a single key holds a single factory. Zero-argument factories accept `()`.
//!
//! Factories may keep state between calls (e.g. a counter), therefore resolution is not
//! guaranteed to be pure.

use crate::component::InjectablePtr;
#[cfg(test)]
use mockall::automock;

/// Creates instances of a transient binding from resolution-time arguments. Registered factories
/// additionally need to satisfy [ThreadSafety](crate::component::ThreadSafety).
#[cfg_attr(test, automock)]
pub trait TransientFactory<Args: 'static> {
    fn create(&self, args: Args) -> InjectablePtr;
}

impl<Args: 'static, F: Fn(Args) -> InjectablePtr> TransientFactory<Args> for F {
    #[inline]
    fn create(&self, args: Args) -> InjectablePtr {
        self(args)
    }
}
