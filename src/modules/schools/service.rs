use tokio_util::sync::CancellationToken;
use tracing::instrument;
use ums_core::errors::ConsoleError;
use ums_core::serde::OneOrMany;
use ums_models::ids::{FacultyId, SchoolId};
use ums_models::schools::{School, SchoolDto};
use validator::Validate;

use crate::api::ApiClient;
use crate::store::{Resource, ResourceService};

const PATH: &str = "/schools";

#[derive(Clone, Debug)]
pub struct SchoolService {
    client: ApiClient,
}

impl SchoolService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, cancel))]
    pub async fn get_schools(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<School>, ConsoleError> {
        let schools: OneOrMany<School> = self.client.get(PATH, cancel).await?;
        Ok(schools.into_vec())
    }

    /// Schools whose parent is `faculty_id`.
    #[instrument(skip(self, cancel))]
    pub async fn get_schools_for_faculty(
        &self,
        faculty_id: FacultyId,
        cancel: &CancellationToken,
    ) -> Result<Vec<School>, ConsoleError> {
        let schools: OneOrMany<School> = self
            .client
            .get(&format!("{}?facultyId={}", PATH, faculty_id), cancel)
            .await?;
        Ok(schools.into_vec())
    }

    #[instrument(skip(self, cancel))]
    pub async fn create_school(
        &self,
        dto: &SchoolDto,
        cancel: &CancellationToken,
    ) -> Result<School, ConsoleError> {
        dto.validate()?;
        self.client.post(PATH, dto, cancel).await
    }

    #[instrument(skip(self, cancel))]
    pub async fn update_school(
        &self,
        id: SchoolId,
        dto: &SchoolDto,
        cancel: &CancellationToken,
    ) -> Result<School, ConsoleError> {
        dto.validate()?;
        self.client
            .put(&format!("{}/{}", PATH, id), dto, cancel)
            .await
    }

    #[instrument(skip(self, cancel))]
    pub async fn delete_school(
        &self,
        id: SchoolId,
        cancel: &CancellationToken,
    ) -> Result<(), ConsoleError> {
        self.client
            .delete(&format!("{}/{}", PATH, id), cancel)
            .await
    }
}

impl Resource for School {
    type Id = SchoolId;

    fn id(&self) -> Option<SchoolId> {
        self.id
    }
}

impl ResourceService for SchoolService {
    type Item = School;
    type Dto = SchoolDto;
    const ENTITY: &'static str = "school";

    async fn list(&self, cancel: &CancellationToken) -> Result<Vec<School>, ConsoleError> {
        self.get_schools(cancel).await
    }

    async fn create(
        &self,
        dto: &SchoolDto,
        cancel: &CancellationToken,
    ) -> Result<School, ConsoleError> {
        self.create_school(dto, cancel).await
    }

    async fn update(
        &self,
        id: SchoolId,
        dto: &SchoolDto,
        cancel: &CancellationToken,
    ) -> Result<School, ConsoleError> {
        self.update_school(id, dto, cancel).await
    }

    async fn delete(&self, id: SchoolId, cancel: &CancellationToken) -> Result<(), ConsoleError> {
        self.delete_school(id, cancel).await
    }

    fn draft(id: Option<SchoolId>, dto: &SchoolDto) -> School {
        School::from_dto(id, dto)
    }
}
