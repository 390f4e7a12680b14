//! In-memory stand-in for the UMS backend, used by the integration tests.
//!
//! [`MockBackend::start`] binds an axum app to an ephemeral local port. The
//! app serves every endpoint the console calls, mixing enveloped and bare
//! responses like the real backend does. Tests can inspect per-route hit
//! counts, force the next call to a route to fail and add latency.

mod router;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use ums_models::certification_programs::CertificationProgram;
use ums_models::faculties::Faculty;
use ums_models::modules::EnabledModules;
use ums_models::platforms::Platforms;
use ums_models::roles::{Permission, Role};
use ums_models::schools::School;
use ums_models::ums::{UmsIntro, UmsSettings};

/// Everything the mock backend stores for one tenant.
#[derive(Debug, Clone, Default)]
pub struct MockData {
    /// `None` once the tenant has been deleted.
    pub intro: Option<UmsIntro>,
    pub settings: UmsSettings,
    pub modules: EnabledModules,
    pub platforms: Platforms,
    pub faculties: Vec<Faculty>,
    pub schools: Vec<School>,
    pub programs: Vec<CertificationProgram>,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Default)]
struct Inner {
    data: MockData,
    /// `"METHOD /path"` keys, path relative to `/api`.
    failures: Vec<String>,
    hits: HashMap<String, usize>,
    latency: Option<Duration>,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct MockState {
    inner: Arc<Mutex<Inner>>,
}

impl MockState {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn route_key(method: &str, path: &str) -> String {
    format!("{} {}", method.to_ascii_uppercase(), path)
}

/// The mock app without a listener, for driving it with `tower::ServiceExt`.
pub fn app(data: MockData) -> axum::Router {
    let state = MockState::default();
    state.lock().data = data;
    router::init_router(state)
}

pub struct MockBackend {
    state: MockState,
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start(data: MockData) -> std::io::Result<Self> {
        let state = MockState::default();
        state.lock().data = data;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = router::init_router(state.clone());
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Mock backend stopped");
            }
        });

        Ok(Self {
            state,
            addr,
            handle,
        })
    }

    /// Base URL to hand to the API client, including the `/api` prefix.
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// The next `method path` request fails with a 500.
    pub fn fail_next(&self, method: &str, path: &str) {
        self.state.lock().failures.push(route_key(method, path));
    }

    /// Number of requests served for `method path`, failed ones included.
    pub fn hits(&self, method: &str, path: &str) -> usize {
        self.state
            .lock()
            .hits
            .get(&route_key(method, path))
            .copied()
            .unwrap_or(0)
    }

    pub fn set_latency(&self, latency: Option<Duration>) {
        self.state.lock().latency = latency;
    }

    /// Snapshot of the stored data.
    pub fn data(&self) -> MockData {
        self.state.lock().data.clone()
    }

    /// Edits the stored data behind the console's back.
    pub fn with_data<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut MockData) -> R,
    {
        f(&mut self.state.lock().data)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
