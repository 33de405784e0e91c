use crate::component::{cast_box, cast_ref, Injectable, InjectablePtr};
use crate::error::{BindingKey, InjectorError, TypeKey};
use crate::scope::Lifetime;
use std::any::Any;
use tracing::debug;

/// Type-erased arguments for a transient factory.
#[derive(Debug)]
pub struct TransientArgs {
    key: TypeKey,
    value: Box<dyn Any>,
}

impl TransientArgs {
    pub fn new<Args: 'static>(args: Args) -> Self {
        Self {
            key: TypeKey::of::<Args>(),
            value: Box::new(args),
        }
    }

    #[inline]
    pub fn key(&self) -> TypeKey {
        self.key
    }

    #[inline]
    pub fn into_value(self) -> Box<dyn Any> {
        self.value
    }
}

/// Generic provider for instances. Consumers should depend on this trait rather than on a
/// concrete [Injector](crate::injector::Injector).
pub trait InstanceProvider {
    /// Returns the singleton registered for given type.
    fn singleton_instance(&self, key: TypeKey) -> Result<&dyn Injectable, InjectorError>;

    /// Returns the singleton registered with given tag.
    fn tagged_singleton_instance(&self, tag: &str) -> Result<&dyn Injectable, InjectorError>;

    /// Creates a new instance using the transient factory registered for given type.
    fn transient_instance(
        &self,
        key: TypeKey,
        args: TransientArgs,
    ) -> Result<InjectablePtr, InjectorError>;

    /// Creates a new instance using the transient factory registered with given tag.
    fn tagged_transient_instance(
        &self,
        tag: &str,
        args: TransientArgs,
    ) -> Result<InjectablePtr, InjectorError>;
}

/// Helper trait for [InstanceProvider] providing strongly-typed access. Each resolved instance is
/// checked against the requested type `T`, which can be either a concrete type or a `dyn Trait`.
pub trait TypedInstanceProvider {
    /// Typesafe version of [InstanceProvider::singleton_instance].
    fn resolve_singleton<T: Injectable + ?Sized>(&self) -> Result<&T, InjectorError>;

    /// Typesafe version of [InstanceProvider::tagged_singleton_instance].
    fn resolve_tagged_singleton<T: Injectable + ?Sized>(
        &self,
        tag: &str,
    ) -> Result<&T, InjectorError>;

    /// Resolves a zero-argument transient registered for `T`.
    fn resolve_transient<T: Injectable + ?Sized>(&self) -> Result<Box<T>, InjectorError> {
        self.resolve_transient_with::<T, ()>(())
    }

    /// Resolves a zero-argument transient registered with given tag.
    fn resolve_tagged_transient<T: Injectable + ?Sized>(
        &self,
        tag: &str,
    ) -> Result<Box<T>, InjectorError> {
        self.resolve_tagged_transient_with::<T, ()>(tag, ())
    }

    /// Typesafe version of [InstanceProvider::transient_instance]. The arguments are passed
    /// verbatim to the factory.
    fn resolve_transient_with<T: Injectable + ?Sized, Args: 'static>(
        &self,
        args: Args,
    ) -> Result<Box<T>, InjectorError>;

    /// Typesafe version of [InstanceProvider::tagged_transient_instance].
    fn resolve_tagged_transient_with<T: Injectable + ?Sized, Args: 'static>(
        &self,
        tag: &str,
        args: Args,
    ) -> Result<Box<T>, InjectorError>;

    /// Tries to resolve a singleton like [TypedInstanceProvider::resolve_singleton] does, but
    /// returns `None` on missing binding.
    fn resolve_singleton_option<T: Injectable + ?Sized>(&self) -> Result<Option<&T>, InjectorError> {
        match self.resolve_singleton::<T>() {
            Ok(instance) => Ok(Some(instance)),
            Err(InjectorError::NotRegistered { .. }) => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Tries to resolve a tagged singleton like [TypedInstanceProvider::resolve_tagged_singleton]
    /// does, but returns `None` on missing binding.
    fn resolve_tagged_singleton_option<T: Injectable + ?Sized>(
        &self,
        tag: &str,
    ) -> Result<Option<&T>, InjectorError> {
        match self.resolve_tagged_singleton::<T>(tag) {
            Ok(instance) => Ok(Some(instance)),
            Err(InjectorError::NotRegistered { .. }) => Ok(None),
            Err(error) => Err(error),
        }
    }
}

fn view_as<T: Injectable + ?Sized>(
    instance: &dyn Injectable,
    key: BindingKey,
) -> Result<&T, InjectorError> {
    cast_ref::<T>(instance).ok_or_else(|| {
        let requested = TypeKey::of::<T>();
        debug!(%key, %requested, "Singleton type mismatch.");
        InjectorError::TypeMismatch {
            lifetime: Lifetime::Singleton,
            key,
            requested,
        }
    })
}

fn take_as<T: Injectable + ?Sized>(
    instance: InjectablePtr,
    key: BindingKey,
) -> Result<Box<T>, InjectorError> {
    cast_box::<T>(instance).ok_or_else(|| {
        let requested = TypeKey::of::<T>();
        debug!(%key, %requested, "Transient type mismatch.");
        InjectorError::TypeMismatch {
            lifetime: Lifetime::Transient,
            key,
            requested,
        }
    })
}

impl<IP: InstanceProvider + ?Sized> TypedInstanceProvider for IP {
    fn resolve_singleton<T: Injectable + ?Sized>(&self) -> Result<&T, InjectorError> {
        let key = TypeKey::of::<T>();
        self.singleton_instance(key)
            .and_then(|instance| view_as(instance, BindingKey::Type(key)))
    }

    fn resolve_tagged_singleton<T: Injectable + ?Sized>(
        &self,
        tag: &str,
    ) -> Result<&T, InjectorError> {
        self.tagged_singleton_instance(tag)
            .and_then(|instance| view_as(instance, BindingKey::Tag(tag.to_string())))
    }

    fn resolve_transient_with<T: Injectable + ?Sized, Args: 'static>(
        &self,
        args: Args,
    ) -> Result<Box<T>, InjectorError> {
        let key = TypeKey::of::<T>();
        self.transient_instance(key, TransientArgs::new(args))
            .and_then(|instance| take_as(instance, BindingKey::Type(key)))
    }

    fn resolve_tagged_transient_with<T: Injectable + ?Sized, Args: 'static>(
        &self,
        tag: &str,
        args: Args,
    ) -> Result<Box<T>, InjectorError> {
        self.tagged_transient_instance(tag, TransientArgs::new(args))
            .and_then(|instance| take_as(instance, BindingKey::Tag(tag.to_string())))
    }
}
