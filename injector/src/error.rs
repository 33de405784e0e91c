use crate::scope::Lifetime;
use derive_more::Display;
use std::any::TypeId;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Identity of a type used as a binding key or as transient factory arguments. Equality and
/// hashing use only the [TypeId]; the name is kept for diagnostics.
#[derive(Copy, Clone, Debug, Display)]
#[display(fmt = "{}", name)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Returns the key of type `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for TypeKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(other.name)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Key of a single binding: either the abstract type it was registered for, or a tag.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display)]
pub enum BindingKey {
    #[display(fmt = "type {}", _0)]
    Type(TypeKey),
    #[display(fmt = "tag '{}'", _0)]
    Tag(String),
}

/// Errors reported by registration and resolution.
#[derive(Error, Clone, Eq, PartialEq, Hash, Debug)]
pub enum InjectorError {
    #[error("{lifetime} already registered for {key}")]
    AlreadyRegistered { lifetime: Lifetime, key: BindingKey },
    #[error("{lifetime} not registered for {key}")]
    NotRegistered { lifetime: Lifetime, key: BindingKey },
    #[error("{lifetime} registered for {key} cannot be resolved as {requested}")]
    TypeMismatch {
        lifetime: Lifetime,
        key: BindingKey,
        requested: TypeKey,
    },
    #[error("Transient factory registered for {key} expects arguments of type {expected}, but got: {provided}")]
    ArgumentMismatch {
        key: BindingKey,
        expected: TypeKey,
        provided: TypeKey,
    },
}

impl InjectorError {
    /// Returns the key of the binding this error refers to.
    pub fn key(&self) -> &BindingKey {
        match self {
            Self::AlreadyRegistered { key, .. }
            | Self::NotRegistered { key, .. }
            | Self::TypeMismatch { key, .. }
            | Self::ArgumentMismatch { key, .. } => key,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{BindingKey, InjectorError, TypeKey};
    use crate::scope::Lifetime;

    #[test]
    fn should_compare_type_keys_by_identity() {
        assert_eq!(TypeKey::of::<u8>(), TypeKey::of::<u8>());
        assert_ne!(TypeKey::of::<u8>(), TypeKey::of::<i8>());
        assert_eq!(TypeKey::of::<u8>().name(), "u8");
    }

    #[test]
    fn should_describe_errors() {
        let error = InjectorError::AlreadyRegistered {
            lifetime: Lifetime::Singleton,
            key: BindingKey::Tag("test".to_string()),
        };
        assert_eq!(error.to_string(), "Singleton already registered for tag 'test'");

        let error = InjectorError::TypeMismatch {
            lifetime: Lifetime::Transient,
            key: BindingKey::Type(TypeKey::of::<u8>()),
            requested: TypeKey::of::<i8>(),
        };
        assert_eq!(
            error.to_string(),
            "Transient registered for type u8 cannot be resolved as i8"
        );
        assert_eq!(error.key(), &BindingKey::Type(TypeKey::of::<u8>()));
    }
}
