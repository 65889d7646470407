//! Request context management for web handlers.
//!
//! A [`Ctx`] is the authenticated user attached to a request after the
//! resolver middleware has validated the bearer token and re-read the
//! account from the store.

use uuid::Uuid;

use crate::prelude::*;
use crate::user::UserApi;

pub mod resolver;

/// Request context containing the authenticated user.
#[derive(Clone, Debug)]
pub struct Ctx {
    /// The authenticated user.
    pub user: UserApi,
}

impl Ctx {
    /// Creates a new request context.
    pub fn new(user: UserApi) -> Self {
        Self { user }
    }

    /// Enforces the self-only rule for user mutations: the targeted record
    /// must belong to the caller.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use folio_web::ctx::Ctx;
    /// use folio_web::user::UserApi;
    /// use uuid::Uuid;
    ///
    /// let user = UserApi {
    ///     id: Uuid::new_v4(),
    ///     username: "alice".to_string(),
    ///     is_active: true,
    /// };
    /// let ctx = Ctx::new(user.clone());
    ///
    /// assert!(ctx.require_self(&user.id).is_ok());
    /// assert!(ctx.require_self(&Uuid::new_v4()).is_err());
    /// ```
    pub fn require_self(&self, target: &Uuid) -> Result<()> {
        if self.user.id != *target {
            return Err(Error::ApiForbidden);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Ctx {
        Ctx::new(UserApi {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            is_active: true,
        })
    }

    #[test]
    fn own_record_is_allowed() {
        let ctx = ctx();
        let target = ctx.user.id;
        assert!(ctx.require_self(&target).is_ok());
    }

    #[test]
    fn other_record_is_forbidden() {
        let ctx = ctx();
        assert!(matches!(
            ctx.require_self(&Uuid::new_v4()),
            Err(Error::ApiForbidden)
        ));
    }
}
