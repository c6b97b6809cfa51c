//! Turn a short mood or theme prompt into a structured screenplay scene.
//!
//! Data flows `mood -> generation::SceneGenerator -> script::normalize ->
//! script::Script -> render / export`, orchestrated by `session::Session`.

pub mod cli;
pub mod export;
pub mod generation;
pub mod render;
pub mod script;
pub mod session;
pub mod trace;
