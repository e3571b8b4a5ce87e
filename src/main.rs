//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the zroster library and the Zellij plugin
//! system. It translates host events into library events, feeds them to
//! [`handle_event`] and performs the returned actions through the host API.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: `Key`, `WebRequestResult`, `Timer`, `PermissionRequestResult`
//! 3. **Permissions**: Once `WebAccess` is granted the employee list loads
//! 4. **Update**: Map events, delegate to the library, execute actions
//! 5. **Render**: Call the library render function
//!
//! # Event Mapping
//!
//! - `Key` → mode-dependent library event (see below)
//! - `WebRequestResult` → `Event::HttpCompleted`
//! - `Timer` → `Event::Tick`
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+x`: Stop loading
//!
//! Table (normal mode and search results):
//! - `j`/`Down`/`Ctrl+n`, `k`/`Up`/`Ctrl+p`: Move selection
//! - `l`/`Right`/`PageDown`, `h`/`Left`/`PageUp`: Next/previous page
//! - `g`/`Home`, `G`/`End`: First/last page
//! - `+`: Cycle page size
//! - `1`-`9`: Sort by column
//! - `/`: Search (or edit the query from the results)
//! - `a`: Add, `e`/`Enter`: Edit, `d`/`Delete`: Delete
//! - `r`: Reload, `x`: Dismiss notification, `q`: Close plugin
//! - `Esc`: Clear filter (normal) or leave search
//!
//! Search input:
//! - Characters edit the query, `Enter` moves to the results, `Esc` leaves
//!
//! Form:
//! - `Tab`/`Down` and `Shift+Tab`/`Up`: Change field
//! - `Left`/`Right`: Cycle choices, `Enter`: Save, `Esc`: Cancel
//!
//! Delete confirmation:
//! - `Enter`/`y`: Delete, `Esc`/`n`: Cancel

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use zroster::http::{HttpMethod, HttpResponse};
use zroster::table::Column;
use zroster::{handle_event, Action, Config, Event, InputMode, SearchFocus};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: zroster::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: zroster::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds the state, requests permissions and
    /// subscribes to events. The first fetch waits for the permission result.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zroster::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            use_auth = config.use_auth,
            mock_api_url = %config.mock_api_url,
            page_size = config.page_size,
            "parsed configuration"
        );
        self.app = zroster::initialize(&config);

        request_permission(&[PermissionType::WebAccess, PermissionType::ReadApplicationState]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles a host event and returns whether to re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, headers, body, context) => {
                tracing::debug!(status, body_len = body.len(), "web request result");
                Event::HttpCompleted(HttpResponse {
                    status,
                    headers,
                    body,
                    context,
                })
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::Tick,
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Event::PermissionsResult {
                granted: matches!(status, PermissionStatus::Granted),
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        zroster::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps a key press to an application event for the current input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        let ctrl = key.has_modifiers(&[KeyModifier::Ctrl]);
        if ctrl && key.bare_key == BareKey::Char('x') {
            return Some(Event::ForceStopLoading);
        }

        match &self.app.input_mode {
            InputMode::Form(_) => Self::map_form_key(key),
            InputMode::ConfirmDelete(_) => match key.bare_key {
                BareKey::Enter | BareKey::Char('y' | 'Y') => Some(Event::Submit),
                BareKey::Esc | BareKey::Char('n' | 'N') => Some(Event::Cancel),
                _ => None,
            },
            InputMode::Search(SearchFocus::Typing) => match key.bare_key {
                BareKey::Esc => Some(Event::ExitSearch),
                BareKey::Enter => Some(Event::FocusResults),
                BareKey::Down if !ctrl => Some(Event::FocusResults),
                BareKey::Backspace => Some(Event::Backspace),
                BareKey::Char(c) if !ctrl => Some(Event::Char(c)),
                _ => None,
            },
            InputMode::Search(SearchFocus::Navigating) => match key.bare_key {
                BareKey::Esc => Some(Event::ExitSearch),
                BareKey::Char('/') => Some(Event::FocusSearchBar),
                _ => Self::map_table_key(key),
            },
            InputMode::Normal => match key.bare_key {
                BareKey::Esc => Some(Event::ClearFilter),
                BareKey::Char('/') => Some(Event::SearchMode),
                _ => Self::map_table_key(key),
            },
        }
    }

    /// Keys shared by normal mode and search results.
    fn map_table_key(key: &KeyWithModifier) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::MoveDown),
                BareKey::Char('p') => Some(Event::MoveUp),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::MoveDown,
            BareKey::Up | BareKey::Char('k') => Event::MoveUp,
            BareKey::Right | BareKey::PageDown | BareKey::Char('l') => Event::NextPage,
            BareKey::Left | BareKey::PageUp | BareKey::Char('h') => Event::PreviousPage,
            BareKey::Home | BareKey::Char('g') => Event::FirstPage,
            BareKey::End | BareKey::Char('G') => Event::LastPage,
            BareKey::Char('+') => Event::CyclePageSize,
            BareKey::Char(c @ '1'..='9') => Event::SortBy(Column::from_digit(c.to_digit(10)?)?),
            BareKey::Char('a') => Event::OpenAddForm,
            BareKey::Enter | BareKey::Char('e') => Event::EditSelected,
            BareKey::Delete | BareKey::Char('d') => Event::DeleteSelected,
            BareKey::Char('r') => Event::Reload,
            BareKey::Char('x') => Event::DismissNotification,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    fn map_form_key(key: &KeyWithModifier) -> Option<Event> {
        let shift = key.has_modifiers(&[KeyModifier::Shift]);
        Some(match key.bare_key {
            BareKey::Tab if shift => Event::PreviousField,
            BareKey::Tab | BareKey::Down => Event::NextField,
            BareKey::Up => Event::PreviousField,
            BareKey::Left => Event::CycleChoice { forward: false },
            BareKey::Right => Event::CycleChoice { forward: true },
            BareKey::Enter => Event::Submit,
            BareKey::Esc => Event::Cancel,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) if !key.has_modifiers(&[KeyModifier::Ctrl]) => Event::Char(c),
            _ => return None,
        })
    }

    /// Performs an action through the Zellij host API.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Dispatch(request) => {
                tracing::debug!(method = %request.method, url = %request.url, "dispatching web request");
                let verb = match request.method {
                    HttpMethod::Get => HttpVerb::Get,
                    HttpMethod::Post => HttpVerb::Post,
                    HttpMethod::Put => HttpVerb::Put,
                    HttpMethod::Delete => HttpVerb::Delete,
                };
                web_request(
                    &request.url,
                    verb,
                    request.headers.clone(),
                    request.body.clone(),
                    request.context.clone(),
                );
            }
            Action::ScheduleTimer { seconds } => {
                set_timeout(*seconds);
            }
        }
    }
}
