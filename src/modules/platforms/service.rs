use tokio_util::sync::CancellationToken;
use tracing::instrument;
use ums_core::errors::ConsoleError;
use ums_models::platforms::Platforms;

use crate::api::ApiClient;

const PATH: &str = "/ums/platforms";

#[derive(Clone, Debug)]
pub struct PlatformService {
    client: ApiClient,
}

impl PlatformService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, cancel))]
    pub async fn get_platforms(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Platforms, ConsoleError> {
        self.client.get(PATH, cancel).await
    }

    #[instrument(skip(self, cancel))]
    pub async fn update_platforms(
        &self,
        platforms: &Platforms,
        cancel: &CancellationToken,
    ) -> Result<Platforms, ConsoleError> {
        self.client.put(PATH, platforms, cancel).await
    }
}
