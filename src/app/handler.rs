//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place state changes. It pattern-matches the
//! event, mutates [`AppState`] and returns a render flag plus the actions the
//! plugin shim must execute (dispatch a request, arm a timer, close the pane).
//!
//! # Event Types
//!
//! - **Navigation**: `MoveDown`, `MoveUp`, paging, `SortBy`, `CyclePageSize`
//! - **Search**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`
//! - **Text input**: `Char`, `Backspace` (search query or focused form field)
//! - **Commands**: `OpenAddForm`, `EditSelected`, `DeleteSelected`, `Reload`
//! - **Modals**: `NextField`, `PreviousField`, `CycleChoice`, `Submit`, `Cancel`
//! - **System**: `HttpCompleted`, `Tick`, `PermissionsResult`

use chrono::Duration;

use crate::app::form::{EmployeeForm, FormMode};
use crate::app::modes::{InputMode, PendingDelete, SearchFocus};
use crate::app::state::SPINNER_INTERVAL_MS;
use crate::app::{Action, AppState};
use crate::domain::error::{Result, RosterError};
use crate::domain::EmployeeId;
use crate::http::{ApiClient, ApiOperation, ApiOutcome, Completion, HttpRequest, HttpResponse};
use crate::notify::NotificationId;
use crate::table::Column;

/// Slack allowed when deciding whether a timer tick belongs to the spinner.
const SPINNER_SLACK_MS: i64 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    MoveDown,
    MoveUp,
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    CyclePageSize,
    SortBy(Column),

    /// Enters search mode with an empty query.
    SearchMode,
    FocusSearchBar,
    FocusResults,
    /// Leaves search mode and clears the query.
    ExitSearch,
    /// Clears the filter without changing mode.
    ClearFilter,
    Char(char),
    Backspace,

    OpenAddForm,
    /// Fetches the selected row and opens the edit form with the result.
    EditSelected,
    /// Asks for confirmation before deleting the selected row.
    DeleteSelected,
    NextField,
    PreviousField,
    CycleChoice { forward: bool },
    Submit,
    Cancel,

    Reload,
    /// Resets the loading state, detaching requests in flight.
    ForceStopLoading,
    DismissNotification,
    CloseFocus,

    /// A host timer fired.
    Tick,
    PermissionsResult { granted: bool },
    HttpCompleted(HttpResponse),
}

/// Processes an event and returns `(should_render, actions)`.
///
/// # Errors
///
/// Request construction failures (missing token, unconfigured endpoint,
/// encoding) are reported to the user as notifications and do not surface
/// here. Errors returned are internal failures only.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::MoveDown => {
            state.table.move_down();
            Ok((true, vec![]))
        }
        Event::MoveUp => {
            state.table.move_up();
            Ok((true, vec![]))
        }
        Event::NextPage => {
            state.table.next_page();
            Ok((true, vec![]))
        }
        Event::PreviousPage => {
            state.table.previous_page();
            Ok((true, vec![]))
        }
        Event::FirstPage => {
            state.table.first_page();
            Ok((true, vec![]))
        }
        Event::LastPage => {
            state.table.last_page();
            Ok((true, vec![]))
        }
        Event::CyclePageSize => {
            state.table.cycle_page_size();
            tracing::debug!(page_size = state.table.page_size(), "page size changed");
            Ok((true, vec![]))
        }
        Event::SortBy(column) => {
            state.table.toggle_sort(*column);
            Ok((true, vec![]))
        }
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_query.clear();
            state.apply_search_filter();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.search_query.trim().is_empty() {
                state.input_mode = InputMode::Normal;
                state.search_query.clear();
                state.apply_search_filter();
            } else {
                state.input_mode = InputMode::Search(SearchFocus::Navigating);
            }
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.search_query, "exiting search mode");
            state.input_mode = InputMode::Normal;
            state.search_query.clear();
            state.apply_search_filter();
            Ok((true, vec![]))
        }
        Event::ClearFilter => {
            if state.search_query.is_empty() && state.table.filter().is_empty() {
                return Ok((false, vec![]));
            }
            state.search_query.clear();
            state.apply_search_filter();
            Ok((true, vec![]))
        }
        Event::Char(c) => match &mut state.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                state.search_query.push(*c);
                tracing::trace!(query = %state.search_query, char = %c, "search query updated");
                state.apply_search_filter();
                Ok((true, vec![]))
            }
            InputMode::Form(form) if !form.submitting => {
                form.input_char(*c);
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },
        Event::Backspace => match &mut state.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                state.search_query.pop();
                state.apply_search_filter();
                Ok((true, vec![]))
            }
            InputMode::Form(form) if !form.submitting => {
                form.backspace();
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },
        Event::OpenAddForm => {
            let today = state.clock.now().date_naive();
            state.input_mode = InputMode::Form(Box::new(EmployeeForm::new_add(today)));
            Ok((true, vec![]))
        }
        Event::EditSelected => {
            let Some(id) = state.selected_employee().map(|e| e.id) else {
                tracing::debug!("no employee selected to edit");
                return Ok((false, vec![]));
            };
            tracing::debug!(employee_id = %id, "fetching employee for edit");
            let actions = request(state, ("load", "employee"), |api| api.get_user_by_id(id));
            Ok((true, actions))
        }
        Event::DeleteSelected => {
            let Some(employee) = state.selected_employee() else {
                tracing::debug!("no employee selected to delete");
                return Ok((false, vec![]));
            };
            state.input_mode = InputMode::ConfirmDelete(PendingDelete {
                id: employee.id,
                name: employee.full_name(),
            });
            Ok((true, vec![]))
        }
        Event::NextField | Event::PreviousField => {
            let InputMode::Form(form) = &mut state.input_mode else {
                return Ok((false, vec![]));
            };
            if matches!(event, Event::NextField) {
                form.focus_next();
            } else {
                form.focus_previous();
            }
            Ok((true, vec![]))
        }
        Event::CycleChoice { forward } => {
            let InputMode::Form(form) = &mut state.input_mode else {
                return Ok((false, vec![]));
            };
            if form.submitting {
                return Ok((false, vec![]));
            }
            form.cycle_choice(*forward);
            Ok((true, vec![]))
        }
        Event::Submit => handle_submit(state),
        Event::Cancel => {
            if !state.input_mode.is_modal() {
                return Ok((false, vec![]));
            }
            tracing::debug!("modal dismissed");
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::Reload => {
            tracing::debug!("reloading employees");
            let actions = request(state, ("load", "employees"), ApiClient::get_users);
            Ok((true, actions))
        }
        Event::ForceStopLoading => {
            if !state.is_loading() {
                return Ok((false, vec![]));
            }
            state.api.interceptor_mut().force_clear();
            if let InputMode::Form(form) = &mut state.input_mode {
                form.submitting = false;
            }
            let id = state.notifications.warning("Loading stopped");
            Ok((true, toast_timer(state, id)))
        }
        Event::DismissNotification => Ok((state.notifications.dismiss_active(), vec![])),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Tick => Ok(handle_tick(state)),
        Event::PermissionsResult { granted } => {
            state.permissions_granted = *granted;
            if !*granted {
                tracing::warn!("web access permission denied");
                let id = state
                    .notifications
                    .error("Web access permission is required to load employees");
                return Ok((true, toast_timer(state, id)));
            }
            if state.has_loaded {
                return Ok((false, vec![]));
            }
            let actions = request(state, ("load", "employees"), ApiClient::get_users);
            Ok((true, actions))
        }
        Event::HttpCompleted(response) => {
            let Some(completion) = state.api.complete(response.clone()) else {
                return Ok((false, vec![]));
            };
            Ok(handle_completion(state, completion))
        }
    }
}

fn handle_submit(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    match &mut state.input_mode {
        InputMode::Form(form) => {
            if form.submitting {
                return Ok((false, vec![]));
            }
            let draft = match form.validate() {
                Ok(draft) => draft,
                Err(RosterError::Validation(message)) => {
                    tracing::debug!(%message, "form submission rejected");
                    return Ok((true, vec![]));
                }
                Err(e) => return Err(e),
            };
            form.submitting = true;
            let mode = form.mode;

            tracing::info!(?mode, "submitting employee form");
            let actions = match mode {
                FormMode::Add => request(state, ("add", "employee"), |api| api.add_user(&draft)),
                FormMode::Edit(id) => request(state, ("update", "employee"), |api| api.update_user(id, &draft)),
            };
            if actions.iter().all(|a| !matches!(a, Action::Dispatch(_))) {
                set_submitting(state, false);
            }
            Ok((true, actions))
        }
        InputMode::ConfirmDelete(pending) => {
            let id = pending.id;
            tracing::info!(employee_id = %id, "delete confirmed");
            state.input_mode = InputMode::Normal;
            let actions = request(state, ("delete", "employee"), |api| api.delete_user(id));
            Ok((true, actions))
        }
        InputMode::Search(SearchFocus::Typing) => handle_event(state, &Event::FocusResults),
        InputMode::Normal | InputMode::Search(SearchFocus::Navigating) => handle_event(state, &Event::EditSelected),
    }
}

/// Builds a request through the API client and wraps it in a dispatch action.
///
/// Construction failures become an error notification instead.
fn request<F>(state: &mut AppState, (verb, entity): (&str, &str), build: F) -> Vec<Action>
where
    F: FnOnce(&mut ApiClient) -> Result<HttpRequest>,
{
    match build(&mut state.api) {
        Ok(request) => {
            let mut actions = vec![Action::Dispatch(request)];
            actions.extend(arm_spinner(state));
            actions
        }
        Err(e) => {
            tracing::warn!(error = %e, verb, entity, "request not dispatched");
            let id = state.notifications.operation_failed(verb, entity, &e.to_string());
            toast_timer(state, id)
        }
    }
}

fn handle_completion(state: &mut AppState, completion: Completion) -> (bool, Vec<Action>) {
    let Completion {
        request_id,
        operation,
        result,
    } = completion;
    let _span = tracing::debug_span!("handle_completion", request_id = %request_id, ?operation).entered();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => return handle_failure(state, &operation, &e),
    };

    let notification = match outcome {
        ApiOutcome::UsersLoaded(rows) => {
            tracing::info!(count = rows.len(), "employees loaded");
            state.table.set_rows(rows);
            state.has_loaded = true;
            state.last_error = None;
            None
        }
        ApiOutcome::UserFetched(employee) => {
            let id = employee.id;
            let form = EmployeeForm::for_employee(&employee);
            state.table.update_by_id(id, employee);
            if state.input_mode.is_modal() {
                tracing::debug!(employee_id = %id, "edit fetch completed behind a modal");
            } else {
                state.input_mode = InputMode::Form(Box::new(form));
            }
            None
        }
        ApiOutcome::UserAdded(employee) => {
            close_form_if(state, FormMode::Add);
            state.table.insert(employee);
            Some(state.notifications.entity_created("employee"))
        }
        ApiOutcome::UserUpdated(employee) => {
            let id = if let ApiOperation::UpdateUser(id) = operation {
                id
            } else {
                employee.id
            };
            close_form_if(state, FormMode::Edit(id));
            if state.table.update_by_id(id, employee).is_none() {
                tracing::debug!(employee_id = %id, "updated employee no longer in table");
            }
            Some(state.notifications.entity_updated("employee"))
        }
        ApiOutcome::UserDeleted(id) => {
            remove_row(state, id);
            Some(state.notifications.entity_deleted("employee"))
        }
        ApiOutcome::Raw(value) => {
            tracing::debug!(%value, "raw call completed");
            None
        }
    };

    let actions = notification.map_or_else(Vec::new, |id| toast_timer(state, id));
    (true, actions)
}

fn handle_failure(state: &mut AppState, operation: &ApiOperation, error: &RosterError) -> (bool, Vec<Action>) {
    let (verb, entity) = operation.describe();
    let reason = error.to_string();
    tracing::warn!(?operation, error = %reason, "operation failed");

    match operation {
        ApiOperation::ListUsers => state.last_error = Some(reason.clone()),
        ApiOperation::AddUser | ApiOperation::UpdateUser(_) => set_submitting(state, false),
        ApiOperation::GetUser(_) | ApiOperation::DeleteUser(_) | ApiOperation::Raw { .. } => {}
    }

    let id = state.notifications.operation_failed(verb, entity, &reason);
    (true, toast_timer(state, id))
}

fn handle_tick(state: &mut AppState) -> (bool, Vec<Action>) {
    let now = state.clock.now();
    let expired = state.notifications.expire(now);

    let Some(due) = state.spinner_due else {
        return (expired > 0, vec![]);
    };
    if now + Duration::milliseconds(SPINNER_SLACK_MS) < due {
        return (expired > 0, vec![]);
    }

    state.spinner_due = None;
    if state.is_loading() {
        state.spinner_frame = state.spinner_frame.wrapping_add(1);
    }
    (true, arm_spinner(state).into_iter().collect())
}

/// Schedules the next animation frame unless one is already pending.
///
/// Frames run while a request is in flight (spinner) or a notification is
/// visible (countdown gauge).
fn arm_spinner(state: &mut AppState) -> Option<Action> {
    let animating = state.is_loading() || state.notifications.active().is_some();
    if state.spinner_due.is_some() || !animating {
        return None;
    }
    state.spinner_due = Some(state.clock.now() + Duration::milliseconds(SPINNER_INTERVAL_MS));
    #[allow(clippy::cast_precision_loss)]
    let seconds = SPINNER_INTERVAL_MS as f64 / 1000.0;
    Some(Action::ScheduleTimer { seconds })
}

/// Timer that fires when notification `id` is due to expire, plus the
/// gauge frame timer.
fn toast_timer(state: &mut AppState, id: NotificationId) -> Vec<Action> {
    let mut actions: Vec<Action> = state
        .notifications
        .active()
        .filter(|n| n.id == id)
        .map(|n| {
            #[allow(clippy::cast_precision_loss)]
            let seconds = n.duration.num_milliseconds() as f64 / 1000.0;
            Action::ScheduleTimer { seconds }
        })
        .into_iter()
        .collect();
    actions.extend(arm_spinner(state));
    actions
}

fn close_form_if(state: &mut AppState, mode: FormMode) {
    if matches!(&state.input_mode, InputMode::Form(form) if form.mode == mode) {
        state.input_mode = InputMode::Normal;
    }
}

fn set_submitting(state: &mut AppState, submitting: bool) {
    if let InputMode::Form(form) = &mut state.input_mode {
        form.submitting = submitting;
    }
}

fn remove_row(state: &mut AppState, id: EmployeeId) {
    if state.table.delete_by_id(id).is_none() {
        tracing::debug!(employee_id = %id, "deleted employee was not in table");
    }
    if matches!(&state.input_mode, InputMode::ConfirmDelete(pending) if pending.id == id) {
        state.input_mode = InputMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::api::ApiConfig;
    use crate::infrastructure::{Clock, ManualClock};
    use crate::storage::MemoryTokenStore;
    use crate::ui::Theme;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    const USERS: &str = r#"[
        {"id":1,"firstName":"John","lastName":"Doe","email":"john.doe@example.com","phone":"+15550100",
         "position":"Software Engineer","department":"Engineering","salary":85000,"joinDate":"2023-01-15","status":"Active"},
        {"id":2,"firstName":"Jane","lastName":"Smith","email":"jane.smith@example.com","phone":"+15550101",
         "position":"Product Manager","department":"Product","salary":95000,"joinDate":"2022-03-01","status":"On Leave"}
    ]"#;

    fn state() -> (AppState, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::default());
        let shared: Rc<dyn Clock> = clock.clone();
        let api = ApiClient::new(ApiConfig::default(), Box::new(MemoryTokenStore::default()), Rc::clone(&shared));
        (AppState::new(api, Theme::default(), shared, 10), clock)
    }

    fn dispatched(actions: &[Action]) -> HttpRequest {
        actions
            .iter()
            .find_map(|a| match a {
                Action::Dispatch(request) => Some(request.clone()),
                _ => None,
            })
            .expect("expected a dispatch action")
    }

    fn reply(request: &HttpRequest, status: u16, body: &str) -> Event {
        Event::HttpCompleted(HttpResponse {
            status,
            headers: BTreeMap::new(),
            body: body.as_bytes().to_vec(),
            context: request.context.clone(),
        })
    }

    fn loaded() -> (AppState, Rc<ManualClock>) {
        let (mut state, clock) = state();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        let request = dispatched(&actions);
        handle_event(&mut state, &reply(&request, 200, USERS)).unwrap();
        (state, clock)
    }

    #[test]
    fn permission_grant_loads_employees_with_spinner() {
        let (mut state, _) = state();
        let (render, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();

        assert!(render);
        assert!(state.is_loading());
        assert!(actions.contains(&Action::ScheduleTimer { seconds: 0.12 }));

        let request = dispatched(&actions);
        handle_event(&mut state, &reply(&request, 200, USERS)).unwrap();
        assert!(!state.is_loading());
        assert!(state.has_loaded);
        assert_eq!(state.table.rows().len(), 2);
    }

    #[test]
    fn spinner_advances_only_while_loading() {
        let (mut state, clock) = state();
        let (_, actions) = handle_event(&mut state, &Event::Reload).unwrap();
        let request = dispatched(&actions);

        clock.advance(Duration::milliseconds(120));
        let (render, actions) = handle_event(&mut state, &Event::Tick).unwrap();
        assert!(render);
        assert_eq!(state.spinner_frame, 1);
        assert_eq!(actions.len(), 1);

        handle_event(&mut state, &reply(&request, 200, "[]")).unwrap();
        clock.advance(Duration::milliseconds(120));
        let (_, actions) = handle_event(&mut state, &Event::Tick).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.spinner_due, None);
    }

    #[test]
    fn failed_load_shows_error_and_keeps_counter_balanced() {
        let (mut state, _) = state();
        let (_, actions) = handle_event(&mut state, &Event::Reload).unwrap();
        let request = dispatched(&actions);

        let (_, actions) = handle_event(&mut state, &reply(&request, 0, "")).unwrap();
        assert!(!state.is_loading());
        assert!(actions.contains(&Action::ScheduleTimer { seconds: 6.0 }));
        let toast = state.notifications.active().unwrap();
        assert_eq!(
            toast.message,
            "Failed to load employees: Unable to connect to the server. Please check your internet connection."
        );
        assert!(state.last_error.is_some());
    }

    #[test]
    fn delete_requires_confirmation_and_server_ack() {
        let (mut state, _) = loaded();

        handle_event(&mut state, &Event::DeleteSelected).unwrap();
        assert!(matches!(state.input_mode, InputMode::ConfirmDelete(ref p) if p.name == "John Doe"));

        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.table.rows().len(), 2, "row stays until the server confirms");

        let request = dispatched(&actions);
        handle_event(&mut state, &reply(&request, 200, "{}")).unwrap();
        assert!(state.table.find(EmployeeId(1)).is_none());
        assert_eq!(state.notifications.active().unwrap().message, "Employee deleted successfully");
    }

    #[test]
    fn cancel_closes_confirmation_without_request() {
        let (mut state, _) = loaded();
        handle_event(&mut state, &Event::DeleteSelected).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Cancel).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(!state.is_loading());
    }

    #[test]
    fn invalid_form_does_not_dispatch() {
        let (mut state, _) = loaded();
        handle_event(&mut state, &Event::OpenAddForm).unwrap();

        let (render, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        let InputMode::Form(form) = &state.input_mode else {
            panic!("form should stay open");
        };
        assert!(!form.submitting);
        assert!(form.error(crate::app::form::Field::FirstName).is_some());
    }

    #[test]
    fn edit_fetches_then_updates_in_place() {
        let (mut state, _) = loaded();
        let (_, actions) = handle_event(&mut state, &Event::EditSelected).unwrap();
        let fetch = dispatched(&actions);
        assert!(fetch.url.ends_with("/users/1"));

        let fresh = r#"{"id":1,"firstName":"Johnny","lastName":"Doe","email":"john.doe@example.com",
            "phone":"+15550100","position":"Software Engineer","department":"Engineering",
            "salary":85000,"joinDate":"2023-01-15","status":"Active"}"#;
        handle_event(&mut state, &reply(&fetch, 200, fresh)).unwrap();
        assert!(matches!(&state.input_mode, InputMode::Form(form) if form.mode == FormMode::Edit(EmployeeId(1))));

        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let put = dispatched(&actions);
        assert_eq!(put.method, crate::http::HttpMethod::Put);

        let updated = fresh.replace("85000", "90000");
        handle_event(&mut state, &reply(&put, 200, &updated)).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.table.find(EmployeeId(1)).unwrap().salary, 90_000.0);
        assert_eq!(state.notifications.active().unwrap().message, "Employee updated successfully");
    }

    #[test]
    fn failed_update_keeps_form_open() {
        let (mut state, _) = loaded();
        let employee = state.table.find(EmployeeId(2)).unwrap().clone();
        state.input_mode = InputMode::Form(Box::new(EmployeeForm::for_employee(&employee)));

        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let put = dispatched(&actions);
        handle_event(&mut state, &reply(&put, 409, r#"{"message":"Email already taken"}"#)).unwrap();

        let InputMode::Form(form) = &state.input_mode else {
            panic!("form should stay open");
        };
        assert!(!form.submitting);
        assert_eq!(
            state.notifications.active().unwrap().message,
            "Failed to update employee: Email already taken"
        );
    }

    #[test]
    fn force_stop_clears_overlay() {
        let (mut state, _) = state();
        let (_, actions) = handle_event(&mut state, &Event::Reload).unwrap();
        let stale = dispatched(&actions);

        handle_event(&mut state, &Event::ForceStopLoading).unwrap();
        assert!(!state.is_loading());
        assert_eq!(state.loading_since.get(), None);

        handle_event(&mut state, &reply(&stale, 200, USERS)).unwrap();
        assert!(!state.is_loading());
        assert_eq!(state.table.rows().len(), 2);
    }

    #[test]
    fn toast_expires_on_tick() {
        let (mut state, clock) = loaded();
        state.notifications.info("hello");

        clock.advance(Duration::milliseconds(4000));
        let (render, _) = handle_event(&mut state, &Event::Tick).unwrap();
        assert!(render);
        assert!(state.notifications.active().is_none());
    }

    #[test]
    fn search_filters_and_escape_clears() {
        let (mut state, _) = loaded();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        for c in "smith".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        assert_eq!(state.table.filtered_len(), 1);

        handle_event(&mut state, &Event::ExitSearch).unwrap();
        assert_eq!(state.table.filtered_len(), 2);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn tick_while_loading_schedules_next_frame() {
        let (mut state, clock) = state();
        handle_event(&mut state, &Event::Reload).unwrap();

        clock.advance(Duration::milliseconds(120));
        let (render, actions) = handle_event(&mut state, &Event::Tick).unwrap();
        assert!(render);
        assert_eq!(actions, vec![Action::ScheduleTimer { seconds: 0.12 }]);
        assert!(state.spinner_due.is_some());
    }

    #[test]
    fn visible_toast_keeps_gauge_ticking() {
        let (mut state, clock) = state();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: false }).unwrap();
        assert!(!state.is_loading());
        assert_eq!(
            actions,
            vec![Action::ScheduleTimer { seconds: 6.0 }, Action::ScheduleTimer { seconds: 0.12 }]
        );

        clock.advance(Duration::milliseconds(1000));
        let (render, actions) = handle_event(&mut state, &Event::Tick).unwrap();
        assert!(render);
        assert_eq!(actions, vec![Action::ScheduleTimer { seconds: 0.12 }]);
        assert_eq!(state.spinner_frame, 0);

        clock.advance(Duration::milliseconds(5000));
        let (render, actions) = handle_event(&mut state, &Event::Tick).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert!(state.notifications.active().is_none());
        assert_eq!(state.spinner_due, None);
    }

    #[test]
    fn edit_saves_record_with_unlisted_position() {
        let (mut state, _) = loaded();
        let (_, actions) = handle_event(&mut state, &Event::EditSelected).unwrap();
        let fetch = dispatched(&actions);

        let fresh = r#"{"id":1,"firstName":"John","lastName":"Doe","email":"john.doe@example.com",
            "phone":"+15550100","position":"Staff Engineer","department":"Platform",
            "salary":85000,"joinDate":"2023-01-15","status":"Active"}"#;
        handle_event(&mut state, &reply(&fetch, 200, fresh)).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let put = dispatched(&actions);
        let body: serde_json::Value = serde_json::from_slice(&put.body).unwrap();
        assert_eq!(body["position"], "Staff Engineer");
        assert_eq!(body["department"], "Platform");
    }
}
