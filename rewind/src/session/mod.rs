//! Replay session internals: the state machine, its control broadcast and the
//! publishing task.
pub mod control;
pub mod frame;
pub mod publisher;
pub mod state;
