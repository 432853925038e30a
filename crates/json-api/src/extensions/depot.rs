//! Depot helper extensions.

use std::any::Any;

use readitagain_app::domain::members::records::MemberUuid;
use salvo::prelude::{Depot, StatusError};

const MEMBER_UUID_DEPOT_KEY: &str = "member_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the member the bearer token belongs to.
    fn insert_member_uuid(&mut self, member: MemberUuid);

    /// The authenticated member, or 401 when the auth middleware did not run.
    fn member_uuid_or_401(&self) -> Result<MemberUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_member_uuid(&mut self, member: MemberUuid) {
        self.insert(MEMBER_UUID_DEPOT_KEY, member);
    }

    fn member_uuid_or_401(&self) -> Result<MemberUuid, StatusError> {
        self.get::<MemberUuid>(MEMBER_UUID_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Not authenticated"))
    }
}
