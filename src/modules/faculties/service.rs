use tokio_util::sync::CancellationToken;
use tracing::instrument;
use ums_core::errors::ConsoleError;
use ums_core::serde::OneOrMany;
use ums_models::faculties::{Faculty, FacultyDto};
use ums_models::ids::FacultyId;
use validator::Validate;

use crate::api::ApiClient;
use crate::store::{Resource, ResourceService};

const PATH: &str = "/faculties";

#[derive(Clone, Debug)]
pub struct FacultyService {
    client: ApiClient,
}

impl FacultyService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, cancel))]
    pub async fn get_faculties(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Faculty>, ConsoleError> {
        let faculties: OneOrMany<Faculty> = self.client.get(PATH, cancel).await?;
        Ok(faculties.into_vec())
    }

    #[instrument(skip(self, cancel))]
    pub async fn create_faculty(
        &self,
        dto: &FacultyDto,
        cancel: &CancellationToken,
    ) -> Result<Faculty, ConsoleError> {
        dto.validate()?;
        self.client.post(PATH, dto, cancel).await
    }

    #[instrument(skip(self, cancel))]
    pub async fn update_faculty(
        &self,
        id: FacultyId,
        dto: &FacultyDto,
        cancel: &CancellationToken,
    ) -> Result<Faculty, ConsoleError> {
        dto.validate()?;
        self.client
            .put(&format!("{}/{}", PATH, id), dto, cancel)
            .await
    }

    #[instrument(skip(self, cancel))]
    pub async fn delete_faculty(
        &self,
        id: FacultyId,
        cancel: &CancellationToken,
    ) -> Result<(), ConsoleError> {
        self.client
            .delete(&format!("{}/{}", PATH, id), cancel)
            .await
    }
}

impl Resource for Faculty {
    type Id = FacultyId;

    fn id(&self) -> Option<FacultyId> {
        self.id
    }
}

impl ResourceService for FacultyService {
    type Item = Faculty;
    type Dto = FacultyDto;
    const ENTITY: &'static str = "faculty";

    async fn list(&self, cancel: &CancellationToken) -> Result<Vec<Faculty>, ConsoleError> {
        self.get_faculties(cancel).await
    }

    async fn create(
        &self,
        dto: &FacultyDto,
        cancel: &CancellationToken,
    ) -> Result<Faculty, ConsoleError> {
        self.create_faculty(dto, cancel).await
    }

    async fn update(
        &self,
        id: FacultyId,
        dto: &FacultyDto,
        cancel: &CancellationToken,
    ) -> Result<Faculty, ConsoleError> {
        self.update_faculty(id, dto, cancel).await
    }

    async fn delete(&self, id: FacultyId, cancel: &CancellationToken) -> Result<(), ConsoleError> {
        self.delete_faculty(id, cancel).await
    }

    fn draft(id: Option<FacultyId>, dto: &FacultyDto) -> Faculty {
        Faculty::from_dto(id, dto)
    }
}
