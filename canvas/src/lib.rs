//! Client interaction engine for the shared magnet board.
//!
//! This crate is host-agnostic: it compiles to WebAssembly for the browser
//! and natively for tests. It owns the client side of the session: turning
//! raw pointer, touch and wheel events into protocol messages, maintaining
//! camera state for pan/zoom, throttling cursor traffic, and mirroring the
//! server's board state for the renderer. The host is responsible only for
//! wiring DOM events in, carrying out the returned [`engine::Action`]s, and
//! drawing from [`doc::BoardView`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EngineCore`] and the actions it emits |
//! | [`doc`] | Mirrored words and sessions, patched by server messages |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Pointer targets and the gesture state machine |
//! | [`throttle`] | Time-based cursor send throttle |
//! | [`consts`] | Shared numeric constants (canvas size, zoom limits, etc.) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod input;
pub mod throttle;
