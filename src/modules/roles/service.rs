use tokio_util::sync::CancellationToken;
use tracing::instrument;
use ums_core::errors::ConsoleError;
use ums_core::serde::OneOrMany;
use ums_models::ids::{PermissionId, RoleId};
use ums_models::roles::{AssignPermissionsDto, Role, RoleUser};

use crate::api::ApiClient;
use crate::store::{Resource, ResourceService};

const PATH: &str = "/roles";

#[derive(Clone, Debug)]
pub struct RoleService {
    client: ApiClient,
}

impl RoleService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, cancel))]
    pub async fn get_roles(&self, cancel: &CancellationToken) -> Result<Vec<Role>, ConsoleError> {
        let roles: OneOrMany<Role> = self.client.get(PATH, cancel).await?;
        Ok(roles.into_vec())
    }

    #[instrument(skip(self, role, cancel), fields(name = %role.name))]
    pub async fn create_role(
        &self,
        role: &Role,
        cancel: &CancellationToken,
    ) -> Result<Role, ConsoleError> {
        self.client.post(PATH, role, cancel).await
    }

    #[instrument(skip(self, role, cancel), fields(name = %role.name))]
    pub async fn update_role(
        &self,
        id: RoleId,
        role: &Role,
        cancel: &CancellationToken,
    ) -> Result<Role, ConsoleError> {
        self.client
            .put(&format!("{}/{}", PATH, id), role, cancel)
            .await
    }

    #[instrument(skip(self, cancel))]
    pub async fn delete_role(
        &self,
        id: RoleId,
        cancel: &CancellationToken,
    ) -> Result<(), ConsoleError> {
        self.client
            .delete(&format!("{}/{}", PATH, id), cancel)
            .await
    }

    /// Replaces the permission set of an existing role.
    #[instrument(skip(self, permission_ids, cancel), fields(count = permission_ids.len()))]
    pub async fn assign_permissions(
        &self,
        id: RoleId,
        permission_ids: Vec<PermissionId>,
        cancel: &CancellationToken,
    ) -> Result<Role, ConsoleError> {
        let dto = AssignPermissionsDto { permission_ids };
        self.client
            .put(&format!("{}/{}/permissions", PATH, id), &dto, cancel)
            .await
    }
}

impl Resource for Role {
    type Id = RoleId;

    fn id(&self) -> Option<RoleId> {
        self.id
    }
}

impl ResourceService for RoleService {
    type Item = Role;
    type Dto = Role;
    const ENTITY: &'static str = "role";

    async fn list(&self, cancel: &CancellationToken) -> Result<Vec<Role>, ConsoleError> {
        self.get_roles(cancel).await
    }

    async fn create(&self, role: &Role, cancel: &CancellationToken) -> Result<Role, ConsoleError> {
        self.create_role(role, cancel).await
    }

    async fn update(
        &self,
        id: RoleId,
        role: &Role,
        cancel: &CancellationToken,
    ) -> Result<Role, ConsoleError> {
        self.update_role(id, role, cancel).await
    }

    async fn delete(&self, id: RoleId, cancel: &CancellationToken) -> Result<(), ConsoleError> {
        self.delete_role(id, cancel).await
    }

    fn draft(id: Option<RoleId>, role: &Role) -> Role {
        Role {
            id,
            // Passwords never stay in local state.
            users: role
                .users
                .iter()
                .map(|u| RoleUser {
                    password: None,
                    ..u.clone()
                })
                .collect(),
            ..role.clone()
        }
    }
}
