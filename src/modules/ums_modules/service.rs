use tokio_util::sync::CancellationToken;
use tracing::instrument;
use ums_core::errors::ConsoleError;
use ums_models::modules::EnabledModules;

use crate::api::ApiClient;

const PATH: &str = "/ums/modules";

#[derive(Clone, Debug)]
pub struct ModuleService {
    client: ApiClient,
}

impl ModuleService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, cancel))]
    pub async fn get_modules(
        &self,
        cancel: &CancellationToken,
    ) -> Result<EnabledModules, ConsoleError> {
        self.client.get(PATH, cancel).await
    }

    #[instrument(skip(self, cancel))]
    pub async fn update_modules(
        &self,
        modules: &EnabledModules,
        cancel: &CancellationToken,
    ) -> Result<EnabledModules, ConsoleError> {
        self.client.put(PATH, modules, cancel).await
    }
}
