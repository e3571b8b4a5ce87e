//! User interface rendering layer with component-based architecture.
//!
//! The UI follows a declarative model:
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, boxes, padding)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::{Theme, DEFAULT_THEME};
pub use viewmodel::{
    ColumnHeader, ConfirmInfo, DisplayCell, DisplayRow, EmptyState, FooterInfo, FormFieldInfo, FormInfo, HeaderInfo,
    LoadingInfo, ModalInfo, PaginationInfo, SearchBarInfo, ToastInfo, UIViewModel,
};
