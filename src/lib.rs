//! Zroster: a Zellij plugin for browsing and managing an employee directory.
//!
//! Zroster talks to a users REST service and provides:
//! - A sortable, filterable, paginated employee table
//! - Add, edit and delete through modal forms with field validation
//! - A loading tracker that counts in-flight requests and drives a spinner
//! - A request interceptor that stamps headers and turns failures into
//!   readable messages
//! - Toast notifications that dismiss themselves

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, forms, input modes               │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ HTTP Layer    │   │ Table / Notify│
//! │ (ui/)         │   │ (http/)       │   │ (table/,      │
//! │ - Rendering   │   │ - Interceptor │   │  notify/)     │
//! │ - Theming     │   │ - API client  │   │ - Sort/filter │
//! │ - Components  │   │ - Error table │   │ - Toasts      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Loading tracker (loading/), token store (storage/) │
//! │  Domain types and errors (domain/)                  │
//! │  Sandbox paths and clock (infrastructure/)          │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a rotating OTLP file    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zroster.wasm" {
//!         mock_api_url "http://localhost:3000"
//!         api_url "https://api.example.com/api"
//!         use_auth "false"
//!         page_size "10"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Flow
//!
//! 1. `load` parses the configuration, installs tracing, builds the state and
//!    asks for `WebAccess`.
//! 2. Once permission is granted the employee list is requested.
//! 3. Every request passes the interceptor, which counts it as in flight.
//!    The response event settles it and the application applies the result
//!    or raises an error notification.
//! 4. `render` computes a view model and draws it.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use zroster::infrastructure::{Clock, SystemClock};
//! use zroster::storage::MemoryTokenStore;
//! use zroster::{handle_event, initialize_with, Action, Config, Event};
//!
//! let config = Config::default();
//! let clock: Rc<dyn Clock> = Rc::new(SystemClock);
//! let mut state = initialize_with(&config, Box::new(MemoryTokenStore::default()), clock);
//!
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! assert!(matches!(actions[0], Action::Dispatch(_)));
//! assert!(state.is_loading());
//! # Ok::<(), zroster::RosterError>(())
//! ```

pub mod app;
pub mod domain;
pub mod http;
pub mod infrastructure;
pub mod loading;
pub mod notify;
pub mod storage;
pub mod table;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use domain::{Employee, EmployeeId, EmployeeStatus, Result, RosterError};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::rc::Rc;

use http::api::{ApiConfig, DEFAULT_MOCK_API_URL};
use http::interceptor::DEFAULT_CLIENT_ID;
use http::ApiClient;
use infrastructure::{expand_tilde, get_data_dir, Clock, SystemClock};
use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
use table::DEFAULT_PAGE_SIZE;

/// File holding the persisted bearer token, inside the data directory.
pub const TOKEN_FILE_NAME: &str = "token.json";

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Every key is optional:
///
/// ```kdl
/// plugin location="file:/path/to/zroster.wasm" {
///     api_url "https://api.example.com/api"
///     mock_api_url "http://localhost:3000"
///     use_auth "true"
///     auth_token "eyJhbGciOi..."
///     client_id "zroster"
///     page_size "25"
///     theme "catppuccin-latte"
///     theme_file "~/.config/zroster/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the authenticated users service.
    pub api_url: Option<String>,

    /// Base URL of the unauthenticated mock service. Default:
    /// `http://localhost:3000`
    pub mock_api_url: String,

    /// Send user requests to `api_url` with a bearer token instead of the mock
    /// service. Default: `false`
    pub use_auth: bool,

    /// Token written to the token store on startup.
    pub auth_token: Option<String>,

    /// Value of the `X-Requested-With` header.
    pub client_id: String,

    /// Initial rows per page. Default: 10
    pub page_size: usize,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` resolves inside `/host`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            mock_api_url: DEFAULT_MOCK_API_URL.to_string(),
            use_auth: false,
            auth_token: None,
            client_id: DEFAULT_CLIENT_ID.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Blank values count as unset. Values that fail to parse fall back to
    /// their defaults.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use zroster::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("use_auth".to_string(), "true".to_string());
    /// map.insert("page_size".to_string(), "25".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert!(config.use_auth);
    /// assert_eq!(config.page_size, 25);
    /// assert_eq!(config.mock_api_url, "http://localhost:3000");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let defaults = Self::default();

        let use_auth = value("use_auth")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "true" | "yes" | "1" | "on"))
            .unwrap_or(defaults.use_auth);

        let page_size = value("page_size")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&size| size > 0)
            .unwrap_or(defaults.page_size);

        Self {
            api_url: value("api_url"),
            mock_api_url: value("mock_api_url").unwrap_or(defaults.mock_api_url),
            use_auth,
            auth_token: value("auth_token"),
            client_id: value("client_id").unwrap_or(defaults.client_id),
            page_size,
            theme_name: value("theme"),
            theme_file: value("theme_file").map(|path| expand_tilde(&path)),
            trace_level: value("trace_level"),
        }
    }

    /// Endpoint settings for the API client.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            mock_api_url: self.mock_api_url.clone(),
            api_url: self.api_url.clone(),
            use_auth: self.use_auth,
            client_id: self.client_id.clone(),
        }
    }

    /// Resolves the configured theme, falling back to the default on error.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Initializes the plugin state from configuration.
///
/// The token is persisted in `<data dir>/token.json`. When that file cannot
/// be opened the token lives in memory for this session only.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    let tokens: Box<dyn TokenStore> = match FileTokenStore::new(get_data_dir().join(TOKEN_FILE_NAME)) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "token file unavailable, keeping token in memory");
            Box::new(MemoryTokenStore::default())
        }
    };

    initialize_with(config, tokens, Rc::new(SystemClock))
}

/// Initializes the plugin state with an explicit token store and clock.
#[must_use]
pub fn initialize_with(config: &Config, tokens: Box<dyn TokenStore>, clock: Rc<dyn Clock>) -> AppState {
    let _span = tracing::debug_span!("initialize", use_auth = config.use_auth, page_size = config.page_size).entered();

    let mut api = ApiClient::new(config.api_config(), tokens, Rc::clone(&clock));
    if let Some(token) = &config.auth_token {
        if let Err(e) = api.set_token(token) {
            tracing::warn!(error = %e, "failed to store configured auth token");
        }
    }

    tracing::debug!(has_token = api.has_token(), "api client ready");
    AppState::new(api, config.theme(), clock, config.page_size)
}
