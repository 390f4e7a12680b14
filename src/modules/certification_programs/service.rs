use tokio_util::sync::CancellationToken;
use tracing::instrument;
use ums_core::errors::ConsoleError;
use ums_core::serde::OneOrMany;
use ums_models::certification_programs::{CertificationProgram, CertificationProgramDto};
use ums_models::ids::ProgramId;
use validator::Validate;

use crate::api::ApiClient;
use crate::store::{Resource, ResourceService};

const PATH: &str = "/certification-programs";

#[derive(Clone, Debug)]
pub struct CertificationProgramService {
    client: ApiClient,
}

impl CertificationProgramService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, cancel))]
    pub async fn get_programs(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<CertificationProgram>, ConsoleError> {
        let programs: OneOrMany<CertificationProgram> = self.client.get(PATH, cancel).await?;
        Ok(programs.into_vec())
    }

    #[instrument(skip(self, cancel))]
    pub async fn create_program(
        &self,
        dto: &CertificationProgramDto,
        cancel: &CancellationToken,
    ) -> Result<CertificationProgram, ConsoleError> {
        dto.validate()?;
        self.client.post(PATH, dto, cancel).await
    }

    #[instrument(skip(self, cancel))]
    pub async fn update_program(
        &self,
        id: ProgramId,
        dto: &CertificationProgramDto,
        cancel: &CancellationToken,
    ) -> Result<CertificationProgram, ConsoleError> {
        dto.validate()?;
        self.client
            .put(&format!("{}/{}", PATH, id), dto, cancel)
            .await
    }

    #[instrument(skip(self, cancel))]
    pub async fn delete_program(
        &self,
        id: ProgramId,
        cancel: &CancellationToken,
    ) -> Result<(), ConsoleError> {
        self.client
            .delete(&format!("{}/{}", PATH, id), cancel)
            .await
    }
}

impl Resource for CertificationProgram {
    type Id = ProgramId;

    fn id(&self) -> Option<ProgramId> {
        self.id
    }
}

impl ResourceService for CertificationProgramService {
    type Item = CertificationProgram;
    type Dto = CertificationProgramDto;
    const ENTITY: &'static str = "certification program";

    async fn list(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<CertificationProgram>, ConsoleError> {
        self.get_programs(cancel).await
    }

    async fn create(
        &self,
        dto: &CertificationProgramDto,
        cancel: &CancellationToken,
    ) -> Result<CertificationProgram, ConsoleError> {
        self.create_program(dto, cancel).await
    }

    async fn update(
        &self,
        id: ProgramId,
        dto: &CertificationProgramDto,
        cancel: &CancellationToken,
    ) -> Result<CertificationProgram, ConsoleError> {
        self.update_program(id, dto, cancel).await
    }

    async fn delete(
        &self,
        id: ProgramId,
        cancel: &CancellationToken,
    ) -> Result<(), ConsoleError> {
        self.delete_program(id, cancel).await
    }

    fn draft(id: Option<ProgramId>, dto: &CertificationProgramDto) -> CertificationProgram {
        CertificationProgram::from_dto(id, dto)
    }
}
