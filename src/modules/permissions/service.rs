use tokio_util::sync::CancellationToken;
use tracing::instrument;
use ums_core::errors::ConsoleError;
use ums_models::roles::{Permission, PermissionGroup, group_permissions};

use crate::api::ApiClient;

#[derive(Clone, Debug)]
pub struct PermissionService {
    client: ApiClient,
}

impl PermissionService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, cancel))]
    pub async fn get_permissions(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Permission>, ConsoleError> {
        self.client.get("/permissions", cancel).await
    }

    /// The catalog grouped by category. Groups served without a category
    /// name are regrouped from the permission names.
    #[instrument(skip(self, cancel))]
    pub async fn get_grouped_permissions(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<PermissionGroup>, ConsoleError> {
        let groups: Vec<PermissionGroup> = self.client.get("/permissions/grouped", cancel).await?;

        if groups.iter().all(|g| !g.category.trim().is_empty()) {
            return Ok(groups);
        }
        Ok(group_permissions(
            groups.into_iter().flat_map(|g| g.permissions).collect(),
        ))
    }
}
