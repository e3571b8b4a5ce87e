//! Users REST service.
//!
//! [`ApiClient`] builds requests for the `/users` collection (and generic
//! routes on the authenticated endpoint), passes each through the
//! [`RequestInterceptor`] and remembers which operation it belongs to. When
//! the host reports a result, [`ApiClient::complete`] decodes it into an
//! [`ApiOutcome`].
//!
//! Two endpoints exist:
//!
//! - the mock endpoint (`mock_api_url`), unauthenticated, serving `/users`
//! - the authenticated endpoint (`api_url`), which needs a bearer token from
//!   the [`TokenStore`]
//!
//! With `use_auth` enabled the users operations target the authenticated
//! endpoint as well.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::rc::Rc;

use crate::domain::error::{Result, RosterError};
use crate::domain::{Employee, EmployeeDraft, EmployeeId};
use crate::http::interceptor::{RequestInterceptor, DEFAULT_CLIENT_ID};
use crate::http::request::{HttpMethod, HttpRequest, HttpResponse, RequestId};
use crate::infrastructure::Clock;
use crate::storage::TokenStore;

/// Default unauthenticated endpoint.
pub const DEFAULT_MOCK_API_URL: &str = "http://localhost:3000";

/// Endpoint settings for [`ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub mock_api_url: String,
    pub api_url: Option<String>,
    pub use_auth: bool,
    pub client_id: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            mock_api_url: DEFAULT_MOCK_API_URL.to_string(),
            api_url: None,
            use_auth: false,
            client_id: DEFAULT_CLIENT_ID.to_string(),
        }
    }
}

/// What a dispatched request was for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOperation {
    ListUsers,
    GetUser(EmployeeId),
    AddUser,
    UpdateUser(EmployeeId),
    DeleteUser(EmployeeId),
    Raw { route: String },
}

impl ApiOperation {
    /// `(verb, entity)` used in failure notifications.
    #[must_use]
    pub const fn describe(&self) -> (&'static str, &'static str) {
        match self {
            Self::ListUsers => ("load", "employees"),
            Self::GetUser(_) => ("load", "employee"),
            Self::AddUser => ("add", "employee"),
            Self::UpdateUser(_) => ("update", "employee"),
            Self::DeleteUser(_) => ("delete", "employee"),
            Self::Raw { .. } => ("call", "endpoint"),
        }
    }
}

/// Decoded result of a successful operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    UsersLoaded(Vec<Employee>),
    UserFetched(Employee),
    UserAdded(Employee),
    UserUpdated(Employee),
    UserDeleted(EmployeeId),
    Raw(Value),
}

/// A settled request paired with the operation that issued it.
#[derive(Debug)]
pub struct Completion {
    pub request_id: RequestId,
    pub operation: ApiOperation,
    pub result: Result<ApiOutcome>,
}

pub struct ApiClient {
    interceptor: RequestInterceptor,
    tokens: Box<dyn TokenStore>,
    config: ApiConfig,
    operations: HashMap<RequestId, ApiOperation>,
}

impl ApiClient {
    #[must_use]
    pub fn new(config: ApiConfig, tokens: Box<dyn TokenStore>, clock: Rc<dyn Clock>) -> Self {
        Self {
            interceptor: RequestInterceptor::new(config.client_id.clone(), clock),
            tokens,
            config,
            operations: HashMap::new(),
        }
    }

    /// `GET /users`.
    ///
    /// # Errors
    ///
    /// Fails before dispatch when authentication is required but unavailable.
    pub fn get_users(&mut self) -> Result<HttpRequest> {
        let request = self.users_request(HttpMethod::Get, None)?;
        Ok(self.dispatch(request, ApiOperation::ListUsers))
    }

    /// `GET /users/{id}`.
    ///
    /// # Errors
    ///
    /// Fails before dispatch when authentication is required but unavailable.
    pub fn get_user_by_id(&mut self, id: EmployeeId) -> Result<HttpRequest> {
        let request = self.users_request(HttpMethod::Get, Some(id))?;
        Ok(self.dispatch(request, ApiOperation::GetUser(id)))
    }

    /// `POST /users` with the draft as body.
    ///
    /// # Errors
    ///
    /// Fails before dispatch when authentication is required but unavailable
    /// or the draft cannot be encoded.
    pub fn add_user(&mut self, draft: &EmployeeDraft) -> Result<HttpRequest> {
        let request = self.users_request(HttpMethod::Post, None)?.with_json(draft)?;
        Ok(self.dispatch(request, ApiOperation::AddUser))
    }

    /// `PUT /users/{id}` with the draft as body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::add_user`].
    pub fn update_user(&mut self, id: EmployeeId, draft: &EmployeeDraft) -> Result<HttpRequest> {
        let request = self.users_request(HttpMethod::Put, Some(id))?.with_json(draft)?;
        Ok(self.dispatch(request, ApiOperation::UpdateUser(id)))
    }

    /// `DELETE /users/{id}`.
    ///
    /// # Errors
    ///
    /// Fails before dispatch when authentication is required but unavailable.
    pub fn delete_user(&mut self, id: EmployeeId) -> Result<HttpRequest> {
        let request = self.users_request(HttpMethod::Delete, Some(id))?;
        Ok(self.dispatch(request, ApiOperation::DeleteUser(id)))
    }

    /// `GET <api_url>/<route>`.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Config`] when no `api_url` is configured and
    /// [`RosterError::MissingToken`] when `is_auth` is set without a token.
    pub fn get_call(&mut self, route: &str, is_auth: bool) -> Result<HttpRequest> {
        let request = self.raw_request(HttpMethod::Get, route, is_auth)?;
        Ok(self.dispatch(request, ApiOperation::Raw { route: route.to_string() }))
    }

    /// `POST <api_url>/<route>` with `payload` as JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get_call`], plus encoding failures.
    pub fn post_call<T: Serialize>(&mut self, payload: &T, route: &str, is_auth: bool) -> Result<HttpRequest> {
        let request = self.raw_request(HttpMethod::Post, route, is_auth)?.with_json(payload)?;
        Ok(self.dispatch(request, ApiOperation::Raw { route: route.to_string() }))
    }

    /// Resolves a host response.
    ///
    /// Returns `None` when the response does not belong to a request issued by
    /// this client. A `401` clears the stored token.
    pub fn complete(&mut self, response: HttpResponse) -> Option<Completion> {
        let (request_id, settled) = self.interceptor.settle(response)?;
        let operation = self.operations.remove(&request_id)?;
        let _span = tracing::debug_span!("api_complete", request_id = %request_id, ?operation).entered();

        let result = match settled {
            Ok(response) => decode(&operation, &response),
            Err(error) => {
                if error.status == 401 {
                    tracing::info!("unauthorized response, clearing stored token");
                    if let Err(e) = self.tokens.clear() {
                        tracing::error!(error = %e, "failed to clear token");
                    }
                }
                Err(RosterError::Api(error))
            }
        };

        Some(Completion {
            request_id,
            operation,
            result,
        })
    }

    /// Stores a bearer token for the authenticated endpoint.
    ///
    /// # Errors
    ///
    /// Returns the token store's error if persisting fails.
    pub fn set_token(&mut self, token: &str) -> Result<()> {
        self.tokens.save(token)
    }

    /// Whether a bearer token is currently stored.
    #[must_use]
    pub fn has_token(&self) -> bool {
        matches!(self.tokens.load(), Ok(Some(_)))
    }

    #[must_use]
    pub const fn interceptor(&self) -> &RequestInterceptor {
        &self.interceptor
    }

    pub fn interceptor_mut(&mut self) -> &mut RequestInterceptor {
        &mut self.interceptor
    }

    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn dispatch(&mut self, request: HttpRequest, operation: ApiOperation) -> HttpRequest {
        let request = self.interceptor.intercept(request);
        if let Some(id) = request.request_id() {
            self.operations.insert(id, operation);
        }
        request
    }

    fn users_request(&self, method: HttpMethod, id: Option<EmployeeId>) -> Result<HttpRequest> {
        let route = id.map_or_else(|| "users".to_string(), |id| format!("users/{id}"));
        if self.config.use_auth {
            let base = self.auth_base()?;
            self.authorize(HttpRequest::new(method, join_url(base, &route)))
        } else {
            Ok(HttpRequest::new(method, join_url(&self.config.mock_api_url, &route)))
        }
    }

    fn raw_request(&self, method: HttpMethod, route: &str, is_auth: bool) -> Result<HttpRequest> {
        let request = HttpRequest::new(method, join_url(self.auth_base()?, route));
        if is_auth {
            self.authorize(request)
        } else {
            Ok(request)
        }
    }

    fn auth_base(&self) -> Result<&str> {
        self.config
            .api_url
            .as_deref()
            .ok_or_else(|| RosterError::Config("api_url is not configured".to_string()))
    }

    fn authorize(&self, request: HttpRequest) -> Result<HttpRequest> {
        let token = self.tokens.load()?.ok_or(RosterError::MissingToken)?;
        Ok(request.with_header("Authorization", format!("Bearer {token}")))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("interceptor", &self.interceptor)
            .field("config", &self.config)
            .field("operations", &self.operations)
            .finish_non_exhaustive()
    }
}

fn decode(operation: &ApiOperation, response: &HttpResponse) -> Result<ApiOutcome> {
    Ok(match operation {
        ApiOperation::ListUsers => ApiOutcome::UsersLoaded(response.json()?),
        ApiOperation::GetUser(_) => ApiOutcome::UserFetched(response.json()?),
        ApiOperation::AddUser => ApiOutcome::UserAdded(response.json()?),
        ApiOperation::UpdateUser(_) => ApiOutcome::UserUpdated(response.json()?),
        ApiOperation::DeleteUser(id) => ApiOutcome::UserDeleted(*id),
        ApiOperation::Raw { .. } => {
            if response.body.iter().all(u8::is_ascii_whitespace) {
                ApiOutcome::Raw(Value::Null)
            } else {
                ApiOutcome::Raw(response.json()?)
            }
        }
    })
}

/// Joins a base url and a route with exactly one slash between them.
#[must_use]
pub fn join_url(base: &str, route: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), route.trim_start_matches('/'))
}
