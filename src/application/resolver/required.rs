//! Mandatory resolution combinator.

use crate::domain::entities::{Ban, Channel, CustomEmoji, Emoji, Guild, Member, Role, User};
use crate::domain::errors::{EntityKind, ResolveError, ResolveResult};

/// Values the resolver produces, tagged with the kind they report when
/// missing.
pub trait Resolvable {
    /// Kind named by the not-found error.
    const KIND: EntityKind;
}

impl Resolvable for Guild {
    const KIND: EntityKind = EntityKind::Guild;
}

impl Resolvable for User {
    const KIND: EntityKind = EntityKind::User;
}

impl Resolvable for Member {
    const KIND: EntityKind = EntityKind::Member;
}

impl Resolvable for Channel {
    const KIND: EntityKind = EntityKind::Channel;
}

impl Resolvable for Role {
    const KIND: EntityKind = EntityKind::Role;
}

impl Resolvable for Emoji {
    const KIND: EntityKind = EntityKind::Emoji;
}

impl Resolvable for CustomEmoji {
    const KIND: EntityKind = EntityKind::Emoji;
}

impl Resolvable for Ban {
    const KIND: EntityKind = EntityKind::Ban;
}

impl<T: Resolvable> Resolvable for Vec<T> {
    const KIND: EntityKind = T::KIND;
}

/// Turns an optional resolution into a mandatory one.
///
/// ```ignore
/// let guild = resolver.either()?.guild(guild_id).await.required()?;
/// ```
pub trait Required<T> {
    /// Converts absence into the not-found error for `T`'s kind.
    ///
    /// # Errors
    /// Returns the original error, or the kind's not-found error when absent.
    fn required(self) -> ResolveResult<T>;
}

impl<T: Resolvable> Required<T> for ResolveResult<Option<T>> {
    fn required(self) -> ResolveResult<T> {
        self?.ok_or(ResolveError::not_found(T::KIND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::TransportError;
    use crate::testing;

    #[test]
    fn test_present_value_passes_through() {
        let result: ResolveResult<Option<Guild>> = Ok(Some(testing::guild(1, 2)));

        assert_eq!(result.required().unwrap().id().as_u64(), 1);
    }

    #[test]
    fn test_absence_becomes_kind_error() {
        let result: ResolveResult<Option<Vec<Member>>> = Ok(None);

        assert_eq!(result.required(), Err(ResolveError::MemberNotFound));
    }

    #[test]
    fn test_transport_error_is_preserved() {
        let result: ResolveResult<Option<Role>> = Err(TransportError::Unauthorized.into());

        assert_eq!(
            result.required(),
            Err(ResolveError::Transport(TransportError::Unauthorized))
        );
    }
}
