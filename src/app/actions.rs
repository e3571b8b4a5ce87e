//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) never talks to the host. It
//! returns actions and the plugin shim executes them in order.

use crate::http::HttpRequest;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends a request through `web_request`. The interceptor has already
    /// stamped it, so the shim must dispatch it exactly as given.
    Dispatch(HttpRequest),

    /// Arms a host timer; its expiry arrives as a tick event.
    ScheduleTimer { seconds: f64 },
}
