use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use ums_core::envelope::Envelope;
use ums_models::certification_programs::CertificationProgram;
use ums_models::faculties::Faculty;
use ums_models::ids::{FacultyId, RoleId};
use ums_models::modules::EnabledModules;
use ums_models::platforms::Platforms;
use ums_models::roles::{AssignPermissionsDto, Role, group_permissions};
use ums_models::schools::School;
use ums_models::ums::{UmsIntro, UmsSettings};
use uuid::Uuid;

use super::{MockData, MockState, route_key};

pub(super) fn init_router(state: MockState) -> Router {
    let api = Router::new()
        .route("/ums", get(get_intro).delete(delete_ums))
        .route("/ums/settings", get(get_settings).put(update_settings))
        .route("/ums/modules", get(get_modules).put(update_modules))
        .route("/ums/platforms", get(get_platforms).put(update_platforms))
        .route("/faculties", get(list_units::<Faculty>).post(create_unit::<Faculty>))
        .route(
            "/faculties/{id}",
            put(update_unit::<Faculty>).delete(delete_unit::<Faculty>),
        )
        .route("/schools", get(list_schools).post(create_unit::<School>))
        .route(
            "/schools/{id}",
            put(update_unit::<School>).delete(delete_unit::<School>),
        )
        .route(
            "/certification-programs",
            get(list_units::<CertificationProgram>).post(create_unit::<CertificationProgram>),
        )
        .route(
            "/certification-programs/{id}",
            put(update_unit::<CertificationProgram>).delete(delete_unit::<CertificationProgram>),
        )
        .route("/roles", get(list_roles).post(create_role))
        .route("/roles/{id}", put(update_role).delete(delete_role))
        .route("/roles/{id}/permissions", put(assign_permissions))
        .route("/permissions", get(list_permissions))
        .route("/permissions/grouped", get(list_grouped_permissions));

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Counts the hit, applies latency and injected failures.
async fn record(State(state): State<MockState>, req: Request, next: Next) -> Response {
    let path = req.uri().path();
    let key = route_key(req.method().as_str(), path.strip_prefix("/api").unwrap_or(path));

    let (fail, latency) = {
        let mut inner = state.lock();
        *inner.hits.entry(key.clone()).or_default() += 1;
        let position = inner.failures.iter().position(|k| *k == key);
        if let Some(index) = position {
            inner.failures.remove(index);
        }
        (position.is_some(), inner.latency)
    };

    if let Some(latency) = latency {
        tokio::time::sleep(latency).await;
    }
    if fail {
        return MockError::new(StatusCode::INTERNAL_SERVER_ERROR, "Injected failure").into_response();
    }
    next.run(req).await
}

struct MockError {
    status: StatusCode,
    message: String,
}

impl MockError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn not_found(label: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("{label} not found"))
    }
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        (self.status, Json(Envelope::<()>::failure(self.message))).into_response()
    }
}

/// How a route shapes its successful payload.
#[derive(Clone, Copy)]
enum Style {
    Enveloped,
    Raw,
    /// Bare, and a one-element list is sent as a single object.
    Flexible,
}

fn respond_list<T: Serialize>(style: Style, items: Vec<T>) -> Response {
    match style {
        Style::Enveloped => Json(Envelope::ok(items)).into_response(),
        Style::Flexible if items.len() == 1 => Json(&items[0]).into_response(),
        Style::Raw | Style::Flexible => Json(items).into_response(),
    }
}

fn respond_one<T: Serialize>(style: Style, item: T) -> Response {
    match style {
        Style::Enveloped => Json(Envelope::ok(item)).into_response(),
        Style::Raw | Style::Flexible => Json(item).into_response(),
    }
}

/// An academic unit collection with server-enforced unique codes.
trait Unit: Clone + Serialize + DeserializeOwned + Send + 'static {
    const LABEL: &'static str;
    const STYLE: Style;

    fn key(&self) -> Option<Uuid>;
    fn assign(&mut self, id: Uuid);
    fn name(&self) -> &str;
    fn code(&self) -> &str;
    fn collection(data: &mut MockData) -> &mut Vec<Self>;
}

impl Unit for Faculty {
    const LABEL: &'static str = "Faculty";
    const STYLE: Style = Style::Enveloped;

    fn key(&self) -> Option<Uuid> {
        self.id.map(Into::into)
    }
    fn assign(&mut self, id: Uuid) {
        self.id = Some(id.into());
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn code(&self) -> &str {
        &self.code
    }
    fn collection(data: &mut MockData) -> &mut Vec<Self> {
        &mut data.faculties
    }
}

impl Unit for School {
    const LABEL: &'static str = "School";
    const STYLE: Style = Style::Flexible;

    fn key(&self) -> Option<Uuid> {
        self.id.map(Into::into)
    }
    fn assign(&mut self, id: Uuid) {
        self.id = Some(id.into());
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn code(&self) -> &str {
        &self.code
    }
    fn collection(data: &mut MockData) -> &mut Vec<Self> {
        &mut data.schools
    }
}

impl Unit for CertificationProgram {
    const LABEL: &'static str = "Certification program";
    const STYLE: Style = Style::Raw;

    fn key(&self) -> Option<Uuid> {
        self.id.map(Into::into)
    }
    fn assign(&mut self, id: Uuid) {
        self.id = Some(id.into());
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn code(&self) -> &str {
        &self.code
    }
    fn collection(data: &mut MockData) -> &mut Vec<Self> {
        &mut data.programs
    }
}

fn check_unit<U: Unit>(items: &[U], unit: &U, except: Option<Uuid>) -> Result<(), MockError> {
    if unit.name().trim().is_empty() {
        return Err(MockError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Name is required",
        ));
    }
    let taken = items
        .iter()
        .filter(|other| except.is_none() || other.key() != except)
        .any(|other| other.code().eq_ignore_ascii_case(unit.code()));
    if taken {
        return Err(MockError::new(
            StatusCode::CONFLICT,
            format!("{} with code {} already exists", U::LABEL, unit.code()),
        ));
    }
    Ok(())
}

async fn list_units<U: Unit>(State(state): State<MockState>) -> Response {
    let items = U::collection(&mut state.lock().data).clone();
    respond_list(U::STYLE, items)
}

async fn create_unit<U: Unit>(
    State(state): State<MockState>,
    Json(mut unit): Json<U>,
) -> Result<Response, MockError> {
    let mut inner = state.lock();
    let items = U::collection(&mut inner.data);
    check_unit(items, &unit, None)?;
    unit.assign(Uuid::new_v4());
    items.push(unit.clone());
    Ok((StatusCode::CREATED, respond_one(U::STYLE, unit)).into_response())
}

async fn update_unit<U: Unit>(
    State(state): State<MockState>,
    Path(id): Path<Uuid>,
    Json(mut unit): Json<U>,
) -> Result<Response, MockError> {
    let mut inner = state.lock();
    let items = U::collection(&mut inner.data);
    let index = items
        .iter()
        .position(|u| u.key() == Some(id))
        .ok_or_else(|| MockError::not_found(U::LABEL))?;
    check_unit(items, &unit, Some(id))?;
    unit.assign(id);
    items[index] = unit.clone();
    Ok(respond_one(U::STYLE, unit))
}

async fn delete_unit<U: Unit>(
    State(state): State<MockState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, MockError> {
    let mut inner = state.lock();
    let items = U::collection(&mut inner.data);
    let index = items
        .iter()
        .position(|u| u.key() == Some(id))
        .ok_or_else(|| MockError::not_found(U::LABEL))?;
    items.remove(index);
    Ok(StatusCode::NO_CONTENT)
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchoolFilter {
    faculty_id: Option<FacultyId>,
}

async fn list_schools(
    State(state): State<MockState>,
    Query(filter): Query<SchoolFilter>,
) -> Response {
    let schools: Vec<School> = state
        .lock()
        .data
        .schools
        .iter()
        .filter(|s| filter.faculty_id.is_none() || s.faculty_id == filter.faculty_id)
        .cloned()
        .collect();
    respond_list(School::STYLE, schools)
}

fn strip_passwords(role: &mut Role) {
    for user in &mut role.users {
        user.password = None;
    }
}

fn check_role(roles: &[Role], role: &Role, except: Option<RoleId>) -> Result<(), MockError> {
    if role.name.trim().is_empty() {
        return Err(MockError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Role name is required",
        ));
    }
    let lowered = role.name.trim().to_lowercase();
    let taken = roles
        .iter()
        .filter(|other| except.is_none() || other.id != except)
        .any(|other| other.name.trim().to_lowercase() == lowered);
    if taken {
        return Err(MockError::new(
            StatusCode::CONFLICT,
            "A role with this name already exists",
        ));
    }
    Ok(())
}

async fn list_roles(State(state): State<MockState>) -> Response {
    let roles = state.lock().data.roles.clone();
    respond_list(Style::Enveloped, roles)
}

async fn create_role(
    State(state): State<MockState>,
    Json(mut role): Json<Role>,
) -> Result<Response, MockError> {
    let mut inner = state.lock();
    check_role(&inner.data.roles, &role, None)?;
    role.id = Some(RoleId::new());
    strip_passwords(&mut role);
    inner.data.roles.push(role.clone());
    Ok((StatusCode::CREATED, Json(Envelope::ok(role))).into_response())
}

async fn update_role(
    State(state): State<MockState>,
    Path(id): Path<RoleId>,
    Json(mut role): Json<Role>,
) -> Result<Response, MockError> {
    let mut inner = state.lock();
    let roles = &mut inner.data.roles;
    let index = roles
        .iter()
        .position(|r| r.id == Some(id))
        .ok_or_else(|| MockError::not_found("Role"))?;
    check_role(roles, &role, Some(id))?;
    role.id = Some(id);
    strip_passwords(&mut role);
    roles[index] = role.clone();
    Ok(Json(Envelope::ok(role)).into_response())
}

async fn delete_role(
    State(state): State<MockState>,
    Path(id): Path<RoleId>,
) -> Result<StatusCode, MockError> {
    let mut inner = state.lock();
    let roles = &mut inner.data.roles;
    let index = roles
        .iter()
        .position(|r| r.id == Some(id))
        .ok_or_else(|| MockError::not_found("Role"))?;
    roles.remove(index);
    Ok(StatusCode::NO_CONTENT)
}

async fn assign_permissions(
    State(state): State<MockState>,
    Path(id): Path<RoleId>,
    Json(dto): Json<AssignPermissionsDto>,
) -> Result<Response, MockError> {
    let mut inner = state.lock();
    let known: Vec<_> = inner.data.permissions.iter().map(|p| p.id).collect();
    if let Some(unknown) = dto.permission_ids.iter().find(|p| !known.contains(p)) {
        return Err(MockError::new(
            StatusCode::BAD_REQUEST,
            format!("Unknown permission {unknown}"),
        ));
    }
    let role = inner
        .data
        .roles
        .iter_mut()
        .find(|r| r.id == Some(id))
        .ok_or_else(|| MockError::not_found("Role"))?;
    role.permissions = dto.permission_ids;
    Ok(Json(Envelope::ok(role.clone())).into_response())
}

async fn list_permissions(State(state): State<MockState>) -> Response {
    let permissions = state.lock().data.permissions.clone();
    respond_list(Style::Raw, permissions)
}

async fn list_grouped_permissions(State(state): State<MockState>) -> Response {
    let groups = group_permissions(state.lock().data.permissions.clone());
    respond_list(Style::Enveloped, groups)
}

fn intro_of(data: &MockData) -> Result<UmsIntro, MockError> {
    data.intro.clone().ok_or_else(|| MockError::not_found("UMS"))
}

async fn get_intro(State(state): State<MockState>) -> Result<Response, MockError> {
    let intro = intro_of(&state.lock().data)?;
    Ok(Json(Envelope::ok(intro)).into_response())
}

async fn delete_ums(State(state): State<MockState>) -> Result<Response, MockError> {
    let mut inner = state.lock();
    intro_of(&inner.data)?;
    inner.data = MockData::default();
    let body = Envelope::<()> {
        success: true,
        data: None,
        message: Some("UMS deleted".to_string()),
    };
    Ok(Json(body).into_response())
}

async fn get_settings(State(state): State<MockState>) -> Result<Json<UmsSettings>, MockError> {
    let inner = state.lock();
    intro_of(&inner.data)?;
    Ok(Json(inner.data.settings.clone()))
}

async fn update_settings(
    State(state): State<MockState>,
    Json(settings): Json<UmsSettings>,
) -> Result<Json<UmsSettings>, MockError> {
    let mut inner = state.lock();
    if settings.general.name.trim().is_empty() {
        return Err(MockError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Institution name is required",
        ));
    }
    let data = &mut inner.data;
    if let Some(intro) = data.intro.as_mut() {
        intro.name = settings.general.name.clone();
    }
    data.settings = settings.clone();
    Ok(Json(settings))
}

async fn get_modules(State(state): State<MockState>) -> Response {
    let modules = state.lock().data.modules.clone();
    respond_one(Style::Enveloped, modules)
}

async fn update_modules(
    State(state): State<MockState>,
    Json(modules): Json<EnabledModules>,
) -> Response {
    let mut inner = state.lock();
    let data = &mut inner.data;
    if let Some(intro) = data.intro.as_mut() {
        intro.module_count = modules.modules.len() as u32;
    }
    data.modules = modules.clone();
    respond_one(Style::Enveloped, modules)
}

async fn get_platforms(State(state): State<MockState>) -> Json<Platforms> {
    Json(state.lock().data.platforms.clone())
}

async fn update_platforms(
    State(state): State<MockState>,
    Json(platforms): Json<Platforms>,
) -> Json<Platforms> {
    let mut inner = state.lock();
    let data = &mut inner.data;
    if let Some(intro) = data.intro.as_mut() {
        intro.teacher_app = platforms.teacher_app;
        intro.student_app = platforms.student_app;
    }
    data.platforms = platforms.clone();
    Json(platforms)
}
