//! Core functionality for registering bindings and resolving instances.
//!
//! An [Injector] is an explicitly constructed value, usually created once at application start-up
//! and then passed by reference to consumers, preferably as `&dyn InstanceProvider`. Registration
//! requires exclusive access, while resolution works on shared references, so a fully configured
//! injector can be read concurrently when the `threadsafe` feature is enabled.
//!
//! ```
//! use injector::injector::Injector;
//! use injector::instance_provider::TypedInstanceProvider;
//! use injector::Injectable;
//!
//! #[derive(Injectable, Default)]
//! struct Settings {
//!     verbose: bool,
//! }
//!
//! let mut injector = Injector::new();
//! injector.register_singleton::<Settings>().unwrap();
//!
//! let settings = injector.resolve_singleton::<Settings>().unwrap();
//! assert!(!settings.verbose);
//! ```

use crate::component::{Injectable, InjectablePtr, ThreadSafety};
use crate::config::InjectorConfig;
use crate::error::{BindingKey, InjectorError, TypeKey};
use crate::factory::TransientFactory;
use crate::instance_provider::{InstanceProvider, TransientArgs};
use crate::scope::{
    ErasedFactoryPtr, KeySpace, KeySpaceKind, Lifetime, SingletonBinding, TransientBinding,
};
use config::ConfigError;
use itertools::Itertools;
use std::any::Any;
use tracing::{debug, trace, warn};

/// Builder for [Injector] with sensible defaults, for easy construction.
#[derive(Clone, Debug, Default)]
pub struct InjectorBuilder {
    config: InjectorConfig,
}

impl InjectorBuilder {
    /// Creates a new builder with a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new builder with configuration read from the environment. See
    /// [InjectorConfig::init_from_environment].
    pub fn from_environment() -> Result<Self, ConfigError> {
        InjectorConfig::init_from_environment().map(|config| Self { config })
    }

    /// Sets new [InjectorConfig].
    pub fn with_config(mut self, config: InjectorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_name<T: ToString>(mut self, name: T) -> Self {
        self.config = self.config.with_name(name);
        self
    }

    pub fn with_trace_resolutions(mut self, trace_resolutions: bool) -> Self {
        self.config = self.config.with_trace_resolutions(trace_resolutions);
        self
    }

    /// Builds resulting [Injector].
    pub fn build(self) -> Injector {
        Injector::with_config(self.config)
    }
}

/// Registry of singleton and transient bindings, keyed either by type or by tag. See the
/// [scope](crate::scope) module for the key spaces and lifetimes.
#[derive(Debug, Default)]
pub struct Injector {
    config: InjectorConfig,
    singletons: KeySpace<TypeKey, SingletonBinding>,
    tagged_singletons: KeySpace<String, SingletonBinding>,
    transients: KeySpace<TypeKey, TransientBinding>,
    tagged_transients: KeySpace<String, TransientBinding>,
}

fn erase_factory<Args, F>(factory: F) -> ErasedFactoryPtr
where
    Args: 'static,
    F: TransientFactory<Args> + ThreadSafety + 'static,
{
    Box::new(move |args: Box<dyn Any>| {
        args.downcast::<Args>()
            .ok()
            .map(|args| factory.create(*args))
    })
}

impl Injector {
    /// Creates an empty injector with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty injector with given configuration.
    pub fn with_config(config: InjectorConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    #[inline]
    pub fn config(&self) -> &InjectorConfig {
        &self.config
    }

    /// Default-constructs `T` and registers it as the singleton for `T`.
    pub fn register_singleton<T: Injectable + Default>(&mut self) -> Result<(), InjectorError> {
        self.register_singleton_factory::<T, _>(|| Box::<T>::default() as InjectablePtr)
    }

    /// Default-constructs `T` and registers it as the singleton with given tag.
    pub fn register_tagged_singleton<T: Injectable + Default>(
        &mut self,
        tag: &str,
    ) -> Result<(), InjectorError> {
        self.register_tagged_singleton_factory::<T, _>(tag, || Box::<T>::default() as InjectablePtr)
    }

    /// Registers the instance returned by `factory` as the singleton for `T`. The factory is called
    /// immediately, unless `T` is already registered. The instance doesn't need to be of type `T` -
    /// compatibility is checked on resolution.
    pub fn register_singleton_factory<T, F>(&mut self, factory: F) -> Result<(), InjectorError>
    where
        T: Injectable + ?Sized,
        F: FnOnce() -> InjectablePtr,
    {
        let target = TypeKey::of::<T>();
        if self
            .singletons
            .try_register(target, || SingletonBinding {
                target,
                instance: factory(),
            })
        {
            debug!(injector = %self.config.name, %target, "Registered singleton.");
            Ok(())
        } else {
            Err(self.already_registered(Lifetime::Singleton, BindingKey::Type(target)))
        }
    }

    /// Registers the instance returned by `factory` as the singleton with given tag. See
    /// [Injector::register_singleton_factory].
    pub fn register_tagged_singleton_factory<T, F>(
        &mut self,
        tag: &str,
        factory: F,
    ) -> Result<(), InjectorError>
    where
        T: Injectable + ?Sized,
        F: FnOnce() -> InjectablePtr,
    {
        let target = TypeKey::of::<T>();
        if self
            .tagged_singletons
            .try_register(tag.to_string(), || SingletonBinding {
                target,
                instance: factory(),
            })
        {
            debug!(injector = %self.config.name, tag, %target, "Registered tagged singleton.");
            Ok(())
        } else {
            Err(self.already_registered(Lifetime::Singleton, BindingKey::Tag(tag.to_string())))
        }
    }

    /// Registers a transient binding for `T`, which default-constructs `T` on each resolution.
    pub fn register_transient<T: Injectable + Default>(&mut self) -> Result<(), InjectorError> {
        self.register_transient_factory::<T, _>(|| Box::<T>::default() as InjectablePtr)
    }

    /// Registers a transient binding with given tag, which default-constructs `T` on each
    /// resolution.
    pub fn register_tagged_transient<T: Injectable + Default>(
        &mut self,
        tag: &str,
    ) -> Result<(), InjectorError> {
        self.register_tagged_transient_factory::<T, _>(tag, || Box::<T>::default() as InjectablePtr)
    }

    /// Registers a zero-argument transient factory for `T`. The factory is not called until
    /// resolution.
    pub fn register_transient_factory<T, F>(&mut self, factory: F) -> Result<(), InjectorError>
    where
        T: Injectable + ?Sized,
        F: Fn() -> InjectablePtr + ThreadSafety + 'static,
    {
        self.register_transient_factory_with::<T, (), _>(move |()| factory())
    }

    /// Registers a zero-argument transient factory with given tag.
    pub fn register_tagged_transient_factory<T, F>(
        &mut self,
        tag: &str,
        factory: F,
    ) -> Result<(), InjectorError>
    where
        T: Injectable + ?Sized,
        F: Fn() -> InjectablePtr + ThreadSafety + 'static,
    {
        self.register_tagged_transient_factory_with::<T, (), _>(tag, move |()| factory())
    }

    /// Registers a transient factory for `T` accepting `Args` at resolution time. Multiple
    /// arguments can be passed as a tuple.
    pub fn register_transient_factory_with<T, Args, F>(
        &mut self,
        factory: F,
    ) -> Result<(), InjectorError>
    where
        T: Injectable + ?Sized,
        Args: 'static,
        F: Fn(Args) -> InjectablePtr + ThreadSafety + 'static,
    {
        let target = TypeKey::of::<T>();
        let arguments = TypeKey::of::<Args>();
        if self
            .transients
            .try_register(target, || TransientBinding {
                target,
                arguments,
                factory: erase_factory(factory),
            })
        {
            debug!(injector = %self.config.name, %target, %arguments, "Registered transient.");
            Ok(())
        } else {
            Err(self.already_registered(Lifetime::Transient, BindingKey::Type(target)))
        }
    }

    /// Registers a transient factory with given tag accepting `Args` at resolution time.
    pub fn register_tagged_transient_factory_with<T, Args, F>(
        &mut self,
        tag: &str,
        factory: F,
    ) -> Result<(), InjectorError>
    where
        T: Injectable + ?Sized,
        Args: 'static,
        F: Fn(Args) -> InjectablePtr + ThreadSafety + 'static,
    {
        let target = TypeKey::of::<T>();
        let arguments = TypeKey::of::<Args>();
        if self
            .tagged_transients
            .try_register(tag.to_string(), || TransientBinding {
                target,
                arguments,
                factory: erase_factory(factory),
            })
        {
            debug!(injector = %self.config.name, tag, %target, %arguments, "Registered tagged transient.");
            Ok(())
        } else {
            Err(self.already_registered(Lifetime::Transient, BindingKey::Tag(tag.to_string())))
        }
    }

    /// Checks if a singleton is registered for `T`.
    pub fn contains_singleton<T: Injectable + ?Sized>(&self) -> bool {
        self.singletons.contains(&TypeKey::of::<T>())
    }

    /// Checks if a singleton is registered with given tag.
    pub fn contains_tagged_singleton(&self, tag: &str) -> bool {
        self.tagged_singletons.contains(tag)
    }

    /// Checks if a transient is registered for `T`.
    pub fn contains_transient<T: Injectable + ?Sized>(&self) -> bool {
        self.transients.contains(&TypeKey::of::<T>())
    }

    /// Checks if a transient is registered with given tag.
    pub fn contains_tagged_transient(&self, tag: &str) -> bool {
        self.tagged_transients.contains(tag)
    }

    /// Returns all keys registered in given key space, sorted.
    pub fn registered_keys(&self, kind: KeySpaceKind) -> Vec<BindingKey> {
        match kind {
            KeySpaceKind::Singleton => self
                .singletons
                .iter()
                .map(|(key, _)| BindingKey::Type(*key))
                .sorted()
                .collect(),
            KeySpaceKind::TaggedSingleton => self
                .tagged_singletons
                .iter()
                .map(|(tag, _)| BindingKey::Tag(tag.clone()))
                .sorted()
                .collect(),
            KeySpaceKind::Transient => self
                .transients
                .iter()
                .map(|(key, _)| BindingKey::Type(*key))
                .sorted()
                .collect(),
            KeySpaceKind::TaggedTransient => self
                .tagged_transients
                .iter()
                .map(|(tag, _)| BindingKey::Tag(tag.clone()))
                .sorted()
                .collect(),
        }
    }

    /// Returns the number of bindings in all key spaces.
    pub fn len(&self) -> usize {
        self.singletons.len()
            + self.tagged_singletons.len()
            + self.transients.len()
            + self.tagged_transients.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn already_registered(&self, lifetime: Lifetime, key: BindingKey) -> InjectorError {
        warn!(injector = %self.config.name, %key, "{} already registered.", lifetime);
        InjectorError::AlreadyRegistered { lifetime, key }
    }

    fn singleton<'a>(
        &self,
        binding: Option<&'a SingletonBinding>,
        key: impl FnOnce() -> BindingKey,
    ) -> Result<&'a dyn Injectable, InjectorError> {
        let binding = binding.ok_or_else(|| InjectorError::NotRegistered {
            lifetime: Lifetime::Singleton,
            key: key(),
        })?;

        if self.config.trace_resolutions {
            trace!(injector = %self.config.name, target = %binding.target, "Resolving singleton.");
        }

        Ok(binding.instance.as_ref())
    }

    fn transient(
        &self,
        binding: Option<&TransientBinding>,
        key: impl Fn() -> BindingKey,
        args: TransientArgs,
    ) -> Result<InjectablePtr, InjectorError> {
        let binding = binding.ok_or_else(|| InjectorError::NotRegistered {
            lifetime: Lifetime::Transient,
            key: key(),
        })?;

        if self.config.trace_resolutions {
            trace!(injector = %self.config.name, target = %binding.target, "Resolving transient.");
        }

        let provided = args.key();
        (binding.factory)(args.into_value()).ok_or_else(|| {
            let key = key();
            debug!(injector = %self.config.name, %key, expected = %binding.arguments, %provided, "Transient argument mismatch.");
            InjectorError::ArgumentMismatch {
                key,
                expected: binding.arguments,
                provided,
            }
        })
    }
}

impl InstanceProvider for Injector {
    fn singleton_instance(&self, key: TypeKey) -> Result<&dyn Injectable, InjectorError> {
        self.singleton(self.singletons.binding(&key), || BindingKey::Type(key))
    }

    fn tagged_singleton_instance(&self, tag: &str) -> Result<&dyn Injectable, InjectorError> {
        self.singleton(self.tagged_singletons.binding(tag), || {
            BindingKey::Tag(tag.to_string())
        })
    }

    fn transient_instance(
        &self,
        key: TypeKey,
        args: TransientArgs,
    ) -> Result<InjectablePtr, InjectorError> {
        self.transient(self.transients.binding(&key), || BindingKey::Type(key), args)
    }

    fn tagged_transient_instance(
        &self,
        tag: &str,
        args: TransientArgs,
    ) -> Result<InjectablePtr, InjectorError> {
        self.transient(
            self.tagged_transients.binding(tag),
            || BindingKey::Tag(tag.to_string()),
            args,
        )
    }
}
