//! End-to-end flows through `handle_event` with canned HTTP responses.

use std::collections::BTreeMap;
use std::rc::Rc;

use chrono::Duration;
use zroster::http::{HttpMethod, HttpRequest, HttpResponse};
use zroster::infrastructure::{Clock, ManualClock};
use zroster::notify::Severity;
use zroster::storage::MemoryTokenStore;
use zroster::{handle_event, initialize_with, Action, AppState, Config, EmployeeId, Event, InputMode};

const USERS: &str = r#"[
    {"id":1,"firstName":"John","lastName":"Doe","email":"john.doe@example.com","phone":"+15550100",
     "position":"Software Engineer","department":"Engineering","salary":85000,"joinDate":"2023-01-15","status":"Active"},
    {"id":2,"firstName":"Maria","lastName":"Garcia","email":"maria.garcia@example.com","phone":"+15550101",
     "position":"Product Manager","department":"Product","salary":95000,"joinDate":"2022-03-01","status":"On Leave"}
]"#;

const JANE: &str = r#"{"id":3,"firstName":"Jane","lastName":"Smith","email":"jane.smith@example.com","phone":"+15550199",
    "position":"Software Engineer","department":"Engineering","salary":92000,"joinDate":"2024-02-01","status":"Active"}"#;

fn boot(config: &Config) -> (AppState, Rc<ManualClock>) {
    let clock = Rc::new(ManualClock::default());
    let shared: Rc<dyn Clock> = clock.clone();
    (initialize_with(config, Box::new(MemoryTokenStore::default()), shared), clock)
}

fn send(state: &mut AppState, event: Event) -> Vec<Action> {
    handle_event(state, &event).unwrap().1
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

fn reply(state: &mut AppState, request: &HttpRequest, status: u16, body: &str) -> Vec<Action> {
    send(
        state,
        Event::HttpCompleted(HttpResponse {
            status,
            headers: BTreeMap::new(),
            body: body.as_bytes().to_vec(),
            context: request.context.clone(),
        }),
    )
}

fn loaded() -> (AppState, Rc<ManualClock>) {
    let (mut state, clock) = boot(&Config::default());
    let actions = send(&mut state, Event::PermissionsResult { granted: true });
    let request = dispatched(&actions);
    assert_eq!(request.url, "http://localhost:3000/users");
    reply(&mut state, &request, 200, USERS);
    (state, clock)
}

fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        send(state, Event::Char(c));
    }
}

#[test]
fn search_filters_and_highlights() {
    let (mut state, _) = loaded();

    send(&mut state, Event::SearchMode);
    type_text(&mut state, "doe");

    assert_eq!(state.table.filtered_len(), 1);
    let vm = state.compute_viewmodel(30, 200);
    assert_eq!(vm.rows.len(), 1);
    let name = vm.rows[0].cells.iter().find(|c| c.text == "John Doe").unwrap();
    assert_eq!(name.highlight_ranges, vec![(5, 8)]);

    send(&mut state, Event::ExitSearch);
    assert_eq!(state.table.filtered_len(), 2);
    assert_eq!(state.input_mode, InputMode::Normal);
}

#[test]
fn add_then_delete_employee() {
    let (mut state, _) = loaded();

    send(&mut state, Event::OpenAddForm);
    type_text(&mut state, "Jane");
    send(&mut state, Event::NextField);
    type_text(&mut state, "Smith");
    send(&mut state, Event::NextField);
    type_text(&mut state, "jane.smith@example.com");
    send(&mut state, Event::NextField);
    type_text(&mut state, "+15550199");
    send(&mut state, Event::NextField);
    send(&mut state, Event::CycleChoice { forward: true });
    send(&mut state, Event::NextField);
    send(&mut state, Event::CycleChoice { forward: true });
    send(&mut state, Event::NextField);
    type_text(&mut state, "92000");

    let actions = send(&mut state, Event::Submit);
    let request = dispatched(&actions);
    assert_eq!(request.method, HttpMethod::Post);
    let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body["firstName"], "Jane");
    assert_eq!(body["department"], "Engineering");
    assert_eq!(state.table.rows().len(), 2, "rows change only after the server confirms");

    reply(&mut state, &request, 201, JANE);
    assert_eq!(state.input_mode, InputMode::Normal);
    assert_eq!(state.table.rows()[0].full_name(), "Jane Smith");
    let toast = state.notifications.active().unwrap();
    assert_eq!(toast.severity, Severity::Success);
    assert_eq!(toast.message, "Employee created successfully");

    send(&mut state, Event::DeleteSelected);
    assert!(matches!(state.input_mode, InputMode::ConfirmDelete(_)));
    let actions = send(&mut state, Event::Submit);
    let request = dispatched(&actions);
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(request.url, "http://localhost:3000/users/3");

    reply(&mut state, &request, 200, "{}");
    assert!(state.table.find(EmployeeId(3)).is_none());
    assert_eq!(state.table.rows().len(), 2);
    assert!(!state.is_loading());
}

#[test]
fn invalid_form_is_not_submitted() {
    let (mut state, _) = loaded();

    send(&mut state, Event::OpenAddForm);
    type_text(&mut state, "J");
    let actions = send(&mut state, Event::Submit);

    assert!(actions.is_empty());
    assert!(!state.is_loading());
    let InputMode::Form(form) = &state.input_mode else {
        panic!("form should stay open");
    };
    assert!(form.error(zroster::app::Field::FirstName).is_some());
    assert!(form.error(zroster::app::Field::Email).is_some());
}

#[test]
fn concurrent_requests_and_force_stop() {
    let (mut state, _) = loaded();

    let first = dispatched(&send(&mut state, Event::Reload));
    let second = dispatched(&send(&mut state, Event::Reload));
    assert_eq!(state.api.interceptor().loading().in_flight(), 2);

    reply(&mut state, &first, 200, USERS);
    assert!(state.is_loading());

    send(&mut state, Event::ForceStopLoading);
    assert!(!state.is_loading());

    reply(&mut state, &second, 200, USERS);
    assert!(!state.is_loading());
    assert_eq!(state.api.interceptor().loading().in_flight(), 0);
}

#[test]
fn server_error_becomes_notification() {
    let (mut state, clock) = boot(&Config::default());
    let request = dispatched(&send(&mut state, Event::PermissionsResult { granted: true }));

    let actions = reply(&mut state, &request, 500, r#"{"message":"boom"}"#);
    assert!(!state.is_loading());
    let toast = state.notifications.active().unwrap();
    assert_eq!(toast.severity, Severity::Error);
    assert!(toast.message.starts_with("Failed to load employees"));
    assert!(actions.iter().any(|a| matches!(a, Action::ScheduleTimer { .. })));

    let vm = state.compute_viewmodel(30, 120);
    assert_eq!(vm.empty_state.unwrap().message, "Unable to load employees");

    clock.advance(Duration::seconds(7));
    send(&mut state, Event::Tick);
    assert!(state.notifications.active().is_none());
}

#[test]
fn unauthorized_clears_token() {
    let config = Config {
        api_url: Some("https://api.example.com/api".to_string()),
        use_auth: true,
        auth_token: Some("t0k3n".to_string()),
        ..Config::default()
    };
    let (mut state, _) = boot(&config);
    assert!(state.api.has_token());

    let request = dispatched(&send(&mut state, Event::Reload));
    assert_eq!(request.headers["Authorization"], "Bearer t0k3n");

    reply(&mut state, &request, 401, "{}");
    assert!(!state.api.has_token());

    let actions = send(&mut state, Event::Reload);
    assert!(actions.iter().all(|a| !matches!(a, Action::Dispatch(_))));
    assert!(!state.is_loading());
}

#[test]
fn render_draws_every_layer() {
    let (mut state, _) = loaded();
    send(&mut state, Event::Reload);
    send(&mut state, Event::OpenAddForm);

    let vm = state.compute_viewmodel(30, 120);
    assert!(vm.loading.is_some());
    assert!(vm.modal.is_some());

    zroster::ui::render(&state, 30, 120);
    zroster::ui::render(&state, 8, 30);
}
