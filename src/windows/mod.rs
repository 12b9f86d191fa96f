//! Windows, their buffers, and the workspace that ties them to the layout.
//!
//! - `window`: Window ids and the Empty/Explorer/Viewer buffers
//! - `resources`: Pool of binary payloads held by viewers
//! - `registry`: Window storage, id allocation, buffer replacement
//! - `focus`: Focused window tracking
//! - `workspace`: Split tree, registry and focus kept consistent
//! - `lifecycle`: Explorer/viewer transitions and worker response handling

pub mod focus;
pub mod lifecycle;
pub mod registry;
pub mod resources;
pub mod window;
pub mod workspace;

pub use focus::FocusController;
pub use lifecycle::{Effect, HEX_ROW_BYTES};
pub use registry::WindowRegistry;
pub use resources::{BinaryResource, ResourceId, ResourcePool};
pub use window::{
    Buffer, BufferKind, ExplorerBuffer, ViewerBuffer, Window, WindowId, ZOOM_MAX, ZOOM_MIN,
};
pub use workspace::{Workspace, WorkspaceSettings};
