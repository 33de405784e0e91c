//! A minimal inversion-of-control container. An [Injector](injector::Injector) binds abstract types
//! or string tags to construction strategies and hands out instances on demand:
//!
//! * singletons - a single instance created at registration and shared by all resolutions,
//! * transients - a new instance created on each resolution and owned by the caller.
//!
//! Bindings may produce any [Injectable](component::Injectable) - whether it can be viewed as the
//! type requested at the resolution site is checked when resolving.
//!
//! ```
//! use injector::injector::Injector;
//! use injector::instance_provider::TypedInstanceProvider;
//! use injector::Injectable;
//!
//! trait Greeter: injector::component::Injectable {
//!     fn greet(&self) -> String;
//! }
//!
//! #[derive(Injectable)]
//! #[injectable(interfaces(Greeter))]
//! struct PoliteGreeter {
//!     name: String,
//! }
//!
//! impl Greeter for PoliteGreeter {
//!     fn greet(&self) -> String {
//!         format!("Good day, {}!", self.name)
//!     }
//! }
//!
//! let mut injector = Injector::new();
//! injector
//!     .register_singleton_factory::<dyn Greeter, _>(|| {
//!         Box::new(PoliteGreeter {
//!             name: "reader".to_string(),
//!         })
//!     })
//!     .unwrap();
//!
//! let greeter = injector.resolve_singleton::<dyn Greeter>().unwrap();
//! assert_eq!(greeter.greet(), "Good day, reader!");
//! ```

pub mod component;
pub mod config;
mod error;
pub mod factory;
pub mod injector;
pub mod instance_provider;
pub mod scope;

pub use error::{BindingKey, InjectorError, TypeKey};

#[cfg(feature = "derive")]
pub use injector_derive::Injectable;
