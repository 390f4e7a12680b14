use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};
use ums_core::errors::ConsoleError;
use ums_models::ums::{UmsIntro, UmsSettings};
use validator::Validate;

use crate::api::ApiClient;

const PATH: &str = "/ums";
const SETTINGS_PATH: &str = "/ums/settings";

/// Tenant-level endpoints: summary, aggregate settings and deletion.
#[derive(Clone, Debug)]
pub struct UmsService {
    client: ApiClient,
}

impl UmsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, cancel))]
    pub async fn get_intro(&self, cancel: &CancellationToken) -> Result<UmsIntro, ConsoleError> {
        self.client.get(PATH, cancel).await
    }

    #[instrument(skip(self, cancel))]
    pub async fn get_settings(
        &self,
        cancel: &CancellationToken,
    ) -> Result<UmsSettings, ConsoleError> {
        self.client.get(SETTINGS_PATH, cancel).await
    }

    #[instrument(skip(self, settings, cancel))]
    pub async fn update_settings(
        &self,
        settings: &UmsSettings,
        cancel: &CancellationToken,
    ) -> Result<UmsSettings, ConsoleError> {
        settings.validate()?;
        self.client.put(SETTINGS_PATH, settings, cancel).await
    }

    /// Deletes the whole tenant. Irreversible.
    #[instrument(skip(self, cancel))]
    pub async fn delete_ums(&self, cancel: &CancellationToken) -> Result<(), ConsoleError> {
        self.client.delete(PATH, cancel).await?;
        info!("Tenant deleted");
        Ok(())
    }
}
