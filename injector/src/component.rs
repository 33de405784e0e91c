//! Every type managed by an [Injector](crate::injector::Injector) needs to implement
//! [Injectable]. The trait makes it possible to hold heterogeneous instances behind a single
//! owning pointer and to safely view them later as the type requested at the resolution site.
//!
//! ## Deriving
//!
//! For convenience, the trait can be automatically derived if the `derive` feature is enabled.
//! Abstract capabilities are plain traits with [Injectable] as a supertrait. Each concrete type
//! lists the capabilities it can be resolved as:
//!
//! ```
//! use injector::Injectable;
//!
//! trait Greeter: injector::component::Injectable {
//!     fn greet(&self) -> String;
//! }
//!
//! #[derive(Injectable, Default)]
//! #[injectable(interfaces(Greeter))]
//! struct EnglishGreeter;
//!
//! impl Greeter for EnglishGreeter {
//!     fn greet(&self) -> String {
//!         "Hello".to_string()
//!     }
//! }
//! ```
//!
//! The above makes it possible to resolve both `EnglishGreeter` and `dyn Greeter` from instances
//! of `EnglishGreeter`. Only non-generic types can be derived.
//!
//! ## Checked downcasts
//!
//! Factories can produce any [Injectable], so the concrete type behind a binding is not known until
//! resolution. [cast_ref] and [cast_box] look up an [InterfaceCast] for the requested type in the
//! table exposed by the instance and apply it. The check is a [TypeId] comparison followed by an
//! [Any] downcast, so its cost does not depend on the instance.

use std::any::{Any, TypeId};

/// Bounds imposed on every instance and factory. With the `threadsafe` feature these are
/// `Send + Sync`, otherwise there are none.
#[cfg(feature = "threadsafe")]
pub trait ThreadSafety: Send + Sync {}

#[cfg(feature = "threadsafe")]
impl<T: Send + Sync + ?Sized> ThreadSafety for T {}

/// Bounds imposed on every instance and factory. With the `threadsafe` feature these are
/// `Send + Sync`, otherwise there are none.
#[cfg(not(feature = "threadsafe"))]
pub trait ThreadSafety {}

#[cfg(not(feature = "threadsafe"))]
impl<T: ?Sized> ThreadSafety for T {}

/// Owning pointer to a type-erased instance.
pub type InjectablePtr = Box<dyn Injectable>;

/// Capability marker for types which can be registered in and resolved from an
/// [Injector](crate::injector::Injector). Typically derived.
pub trait Injectable: Any + ThreadSafety {
    /// Returns this instance as [Any].
    fn as_any(&self) -> &dyn Any;

    /// Converts the owning pointer into [Any].
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Returns a type-erased [InterfaceCast] which can view this instance as the type identified
    /// by `interface`, if this type supports such view. Every type should at least support viewing
    /// as itself.
    fn interface_cast(&self, interface: TypeId) -> Option<&'static dyn Any>;
}

/// Conversion from a type-erased concrete instance to the `I` view. Instances are stored in
/// `static`s, which is why construction is `const`.
pub struct InterfaceCast<I: ?Sized + 'static> {
    view: fn(&dyn Any) -> Option<&I>,
    take: fn(Box<dyn Any>) -> Option<Box<I>>,
}

impl<I: ?Sized + 'static> InterfaceCast<I> {
    pub const fn new(
        view: fn(&dyn Any) -> Option<&I>,
        take: fn(Box<dyn Any>) -> Option<Box<I>>,
    ) -> Self {
        Self { view, take }
    }

    #[inline]
    pub fn view<'a>(&self, source: &'a dyn Any) -> Option<&'a I> {
        (self.view)(source)
    }

    #[inline]
    pub fn take(&self, source: Box<dyn Any>) -> Option<Box<I>> {
        (self.take)(source)
    }
}

#[inline]
fn find_cast<T: Injectable + ?Sized>(instance: &dyn Injectable) -> Option<&'static InterfaceCast<T>> {
    instance
        .interface_cast(TypeId::of::<T>())
        .and_then(|cast| cast.downcast_ref::<InterfaceCast<T>>())
}

/// Views given instance as `T`, if the concrete type supports it.
pub fn cast_ref<T: Injectable + ?Sized>(instance: &dyn Injectable) -> Option<&T> {
    find_cast::<T>(instance).and_then(|cast| cast.view(instance.as_any()))
}

/// Converts given instance into `T`, if the concrete type supports it. The instance is dropped
/// otherwise.
pub fn cast_box<T: Injectable + ?Sized>(instance: InjectablePtr) -> Option<Box<T>> {
    let cast = find_cast::<T>(instance.as_ref())?;
    cast.take(instance.into_any())
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::component::{cast_box, cast_ref, Injectable, InjectablePtr, InterfaceCast};
    use std::any::{Any, TypeId};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    pub trait Counter: Injectable {
        fn value(&self) -> i32;
    }

    pub trait Unrelated: Injectable {}

    #[derive(Default)]
    pub struct TestComponent {
        pub value: i32,
    }

    impl Counter for TestComponent {
        fn value(&self) -> i32 {
            self.value
        }
    }

    impl Injectable for TestComponent {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn into_any(self: Box<Self>) -> Box<dyn Any> {
            self
        }

        fn interface_cast(&self, interface: TypeId) -> Option<&'static dyn Any> {
            if interface == TypeId::of::<Self>() {
                fn view(source: &dyn Any) -> Option<&TestComponent> {
                    source.downcast_ref()
                }

                fn take(source: Box<dyn Any>) -> Option<Box<TestComponent>> {
                    source.downcast().ok()
                }

                static CAST: InterfaceCast<TestComponent> = InterfaceCast::new(view, take);
                return Some(&CAST);
            }

            if interface == TypeId::of::<dyn Counter>() {
                fn view(source: &dyn Any) -> Option<&(dyn Counter + 'static)> {
                    source
                        .downcast_ref::<TestComponent>()
                        .map(|instance| instance as &(dyn Counter + 'static))
                }

                fn take(source: Box<dyn Any>) -> Option<Box<dyn Counter>> {
                    source
                        .downcast::<TestComponent>()
                        .ok()
                        .map(|instance| instance as Box<dyn Counter>)
                }

                static CAST: InterfaceCast<dyn Counter> = InterfaceCast::new(view, take);
                return Some(&CAST);
            }

            None
        }
    }

    /// Records its own destruction.
    pub struct DropTracker {
        pub drops: Arc<AtomicUsize>,
    }

    impl Drop for DropTracker {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl Injectable for DropTracker {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn into_any(self: Box<Self>) -> Box<dyn Any> {
            self
        }

        fn interface_cast(&self, interface: TypeId) -> Option<&'static dyn Any> {
            if interface == TypeId::of::<Self>() {
                fn view(source: &dyn Any) -> Option<&DropTracker> {
                    source.downcast_ref()
                }

                fn take(source: Box<dyn Any>) -> Option<Box<DropTracker>> {
                    source.downcast().ok()
                }

                static CAST: InterfaceCast<DropTracker> = InterfaceCast::new(view, take);
                return Some(&CAST);
            }

            None
        }
    }

    #[test]
    fn should_view_as_self_and_interface() {
        let instance: InjectablePtr = Box::new(TestComponent { value: 5 });

        assert_eq!(cast_ref::<TestComponent>(instance.as_ref()).unwrap().value, 5);
        assert_eq!(cast_ref::<dyn Counter>(instance.as_ref()).unwrap().value(), 5);
        assert!(cast_ref::<dyn Unrelated>(instance.as_ref()).is_none());
        assert!(cast_ref::<DropTracker>(instance.as_ref()).is_none());
    }

    #[test]
    fn should_take_as_interface() {
        let instance: InjectablePtr = Box::new(TestComponent { value: 3 });
        assert_eq!(cast_box::<dyn Counter>(instance).unwrap().value(), 3);
    }

    #[test]
    fn should_drop_instance_on_failed_take() {
        let drops = Arc::new(AtomicUsize::new(0));
        let instance: InjectablePtr = Box::new(DropTracker {
            drops: drops.clone(),
        });

        assert!(cast_box::<TestComponent>(instance).is_none());
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }
}
