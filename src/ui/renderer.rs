//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute a [`UIViewModel`] from [`AppState`], then
//! hand it to the components. The base layout is drawn first and overlays
//! (loading, toast, modal) are painted on top of it.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout for a pane of `rows` x `cols` cells.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols).entered();
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Draws `vm`; overlay order is loading, then modal, then toast on top.
fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    components::render_main(vm, theme, cols, rows);

    if let Some(loading) = &vm.loading {
        components::render_loading(loading, theme, cols, rows, vm.modal.is_none());
    }

    if let Some(modal) = &vm.modal {
        components::render_modal(modal, theme, cols, rows);
    }

    if let Some(toast) = &vm.toast {
        components::render_toast(toast, theme, cols);
    }
}
