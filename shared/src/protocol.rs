use crate::error::{SchemaError, SchemaResult};
use crate::query::SearchRequest;
use crate::{FilterOption, Project, ProjectArea, TokenPair};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Encoded request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    /// Serialized JSON, sent as `application/json`.
    Json(String),
    /// Text fields sent as `multipart/form-data`.
    Multipart(Vec<(String, String)>),
}

fn json_body<T: Serialize + ?Sized>(value: &T) -> SchemaResult<RequestBody> {
    Ok(RequestBody::Json(serde_json::to_string(value)?))
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The `result` type carried by the response envelope.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path (may embed ids or a query string).
    fn path(&self) -> String;
    /// The encoded request body.
    fn body(&self) -> SchemaResult<RequestBody> {
        Ok(RequestBody::Empty)
    }
}

/// Result type for endpoints whose payload is ignored.
pub type Ack = IgnoredAny;

// =========================================================
// Response Envelope
// =========================================================

fn default_success() -> bool {
    true
}

/// `{ success, result, message }` wrapper used by every backend response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub result: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T: DeserializeOwned> ApiEnvelope<T> {
    pub fn into_result(self) -> SchemaResult<T> {
        if !self.success {
            return Err(SchemaError::Rejected(self.message));
        }
        match self.result {
            Some(result) => Ok(result),
            // acknowledgement types (Ack, Option<_>) decode from null
            None => serde_json::from_value(serde_json::Value::Null)
                .map_err(|_| SchemaError::MissingResult),
        }
    }
}

/// Decode a response body into the envelope's `result`.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> SchemaResult<T> {
    if body.trim().is_empty() {
        return ApiEnvelope::<T> {
            success: true,
            result: None,
            message: None,
        }
        .into_result();
    }
    serde_json::from_str::<ApiEnvelope<T>>(body)?.into_result()
}

/// Paged list result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total_count: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

impl ApiRequest for SignInRequest {
    type Response = TokenPair;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/v1/Auth/sign-in".to_string()
    }

    fn body(&self) -> SchemaResult<RequestBody> {
        json_body(self)
    }
}

// =========================================================
// Projects
// =========================================================

/// Search projects
#[derive(Debug, Clone, PartialEq)]
pub struct SearchProjects(pub SearchRequest);

impl ApiRequest for SearchProjects {
    type Response = Page<Project>;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/v1/Project/search".to_string()
    }

    fn body(&self) -> SchemaResult<RequestBody> {
        json_body(&self.0)
    }
}

/// Validated multipart fields of the project form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFields(pub Vec<(String, String)>);

impl ProjectFields {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Create a project (multipart)
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProject(pub ProjectFields);

impl ApiRequest for CreateProject {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/v2/Project".to_string()
    }

    fn body(&self) -> SchemaResult<RequestBody> {
        Ok(RequestBody::Multipart(self.0.0.clone()))
    }
}

/// Update a project (multipart)
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProject {
    pub id: String,
    pub fields: ProjectFields,
}

impl ApiRequest for UpdateProject {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/api/v2/Project/{}", self.id)
    }

    fn body(&self) -> SchemaResult<RequestBody> {
        Ok(RequestBody::Multipart(self.fields.0.clone()))
    }
}

/// Delete projects; the backend takes a JSON array of ids.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteProjects {
    pub ids: Vec<String>,
}

impl ApiRequest for DeleteProjects {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/v1/Project/delete".to_string()
    }

    fn body(&self) -> SchemaResult<RequestBody> {
        json_body(&self.ids)
    }
}

// =========================================================
// Project Areas
// =========================================================

/// Search the areas of one project
#[derive(Debug, Clone, PartialEq)]
pub struct SearchAreas {
    pub project_id: String,
    pub request: SearchRequest,
}

impl ApiRequest for SearchAreas {
    type Response = Page<ProjectArea>;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/api/v1/ProjectArea/search?id={}", self.project_id)
    }

    fn body(&self) -> SchemaResult<RequestBody> {
        json_body(&self.request)
    }
}

/// Area create / update body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaPayload {
    pub type_of_work: String,
    #[serde(rename = "type")]
    pub kind: i32,
    pub project_id: String,
}

impl ApiRequest for AreaPayload {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/v2/ProjectArea".to_string()
    }

    fn body(&self) -> SchemaResult<RequestBody> {
        json_body(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateArea {
    pub id: String,
    pub payload: AreaPayload,
}

impl ApiRequest for UpdateArea {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/api/v2/ProjectArea/update/{}", self.id)
    }

    fn body(&self) -> SchemaResult<RequestBody> {
        json_body(&self.payload)
    }
}

/// Delete an area; the body is the id as a raw JSON string.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteArea {
    pub id: String,
}

impl ApiRequest for DeleteArea {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/v1/ProjectArea/delete".to_string()
    }

    fn body(&self) -> SchemaResult<RequestBody> {
        json_body(&self.id)
    }
}

/// List the work-type (construction setting) options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListWorkTypes;

impl ApiRequest for ListWorkTypes {
    type Response = Page<FilterOption>;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/v1/admin/settings/filter".to_string()
    }

    fn body(&self) -> SchemaResult<RequestBody> {
        Ok(RequestBody::Json("{}".to_string()))
    }
}

// =========================================================
// Area Settings
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AreaSetting {
    /// JSON-encoded setting document
    #[serde(default)]
    pub setting: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetAreaSetting {
    pub area_id: String,
}

impl ApiRequest for GetAreaSetting {
    type Response = Option<AreaSetting>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/v1/ProjectArea/setting_jmm/{}", self.area_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAreaSetting {
    pub project_area_id: String,
    pub json: String,
}

impl ApiRequest for SaveAreaSetting {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/v1/ProjectArea/setting_jmm".to_string()
    }

    fn body(&self) -> SchemaResult<RequestBody> {
        json_body(self)
    }
}
