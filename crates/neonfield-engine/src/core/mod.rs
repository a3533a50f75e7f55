//! Core engine-facing contracts.
//!
//! The stable interface between the runtime (platform loop) and the
//! application: a per-frame callback, a resize callback, and the context
//! handed to the frame callback.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
