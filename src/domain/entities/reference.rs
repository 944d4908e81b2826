//! References to platform entities.
//!
//! Call sites hand the resolver either a bare identifier or an object they
//! already hold. Both normalize to the identifier before any lookup.

use std::fmt;
use std::hash::Hash;

/// A numeric platform identifier.
pub trait Snowflake: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Returns the raw value.
    fn get(self) -> u64;

    /// Zero is never a valid snowflake.
    fn is_unset(self) -> bool {
        self.get() == 0
    }
}

/// An entity that carries its own identifier.
pub trait Identify {
    /// Identifier type used to look the entity up.
    type Id: Snowflake;

    /// Returns the entity's identifier.
    fn identify(&self) -> Self::Id;
}

/// Either an identifier or a live object of kind `T`.
#[derive(Debug)]
pub enum EntityRef<'a, T: Identify> {
    /// Bare identifier.
    Id(T::Id),
    /// Object already in hand.
    Object(&'a T),
}

impl<T: Identify> Clone for EntityRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Identify> Copy for EntityRef<'_, T> {}

impl<'a, T: Identify> EntityRef<'a, T> {
    /// Returns the referenced identifier.
    #[must_use]
    pub fn id(self) -> T::Id {
        match self {
            Self::Id(id) => id,
            Self::Object(object) => object.identify(),
        }
    }

    /// Returns the identifier, or `None` for an unset (zero) reference.
    #[must_use]
    pub fn normalize(self) -> Option<T::Id> {
        let id = self.id();
        (!id.is_unset()).then_some(id)
    }

    /// Returns the live object, if one was passed.
    #[must_use]
    pub const fn object(self) -> Option<&'a T> {
        match self {
            Self::Id(_) => None,
            Self::Object(object) => Some(object),
        }
    }
}

impl<'a, T: Identify> From<&'a T> for EntityRef<'a, T> {
    fn from(object: &'a T) -> Self {
        Self::Object(object)
    }
}

macro_rules! id_reference {
    ($($entity:ty => $id:ty),* $(,)?) => {
        $(
            impl From<$id> for EntityRef<'_, $entity> {
                fn from(id: $id) -> Self {
                    Self::Id(id)
                }
            }

            impl From<u64> for EntityRef<'_, $entity> {
                fn from(id: u64) -> Self {
                    Self::Id(<$id>::from(id))
                }
            }
        )*
    };
}

id_reference! {
    super::Guild => super::GuildId,
    super::User => super::UserId,
    super::Member => super::UserId,
    super::Role => super::RoleId,
    super::Channel => super::ChannelId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Guild, GuildId, Member, UserId};
    use crate::testing;

    #[test]
    fn test_id_reference_normalizes() {
        let reference: EntityRef<'_, Guild> = GuildId(42).into();
        assert_eq!(reference.normalize(), Some(GuildId(42)));
        assert!(reference.object().is_none());
    }

    #[test]
    fn test_zero_reference_is_unset() {
        let reference: EntityRef<'_, Guild> = 0_u64.into();
        assert_eq!(reference.normalize(), None);
    }

    #[test]
    fn test_object_reference_extracts_id() {
        let member = testing::member(1, 7, &[]);
        let reference = EntityRef::from(&member);

        assert_eq!(reference.normalize(), Some(UserId(7)));
        assert!(reference.object().is_some());
    }

    #[test]
    fn test_member_reference_from_user_id() {
        let reference: EntityRef<'_, Member> = UserId(3).into();
        assert_eq!(reference.id(), UserId(3));
    }
}
