//! Domain services used by the websocket route.
//!
//! ARCHITECTURE
//! ============
//! `board` and `session` own the two halves of shared state; `hub` composes
//! them into the one place where mutation happens, so route handlers stay
//! focused on transport and protocol translation.

pub mod board;
pub mod hub;
pub mod session;
