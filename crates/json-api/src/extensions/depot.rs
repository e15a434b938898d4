//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use storefront_app::auth::models::UserUuid;

const USER_UUID_KEY: &str = "storefront.user_uuid";
const IS_ADMIN_KEY: &str = "storefront.is_admin";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Store the authenticated user, done once by the auth middleware.
    fn insert_user_uuid(&mut self, user: UserUuid);

    /// The authenticated user, or 401 when the middleware never ran.
    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError>;

    /// Store the authenticated user's admin role, done once by the auth
    /// middleware.
    fn insert_is_admin(&mut self, is_admin: bool);

    /// Succeeds only for admin users; 403 otherwise.
    fn admin_or_403(&self) -> Result<(), StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_user_uuid(&mut self, user: UserUuid) {
        self.insert(USER_UUID_KEY, user);
    }

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError> {
        self.get::<UserUuid>(USER_UUID_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn insert_is_admin(&mut self, is_admin: bool) {
        self.insert(IS_ADMIN_KEY, is_admin);
    }

    fn admin_or_403(&self) -> Result<(), StatusError> {
        match self.get::<bool>(IS_ADMIN_KEY).copied() {
            Ok(true) => Ok(()),
            Ok(false) | Err(_) => {
                Err(StatusError::forbidden().brief("Admin privileges required"))
            }
        }
    }
}
