//! Infrastructure layer - Port implementations
//!
//! This module contains concrete implementations of the sorting ports
//! using the camera, the servo and the network stack of the board.

pub(crate) mod config;
pub mod drivers;
pub mod services;
pub mod tasks;
pub mod types;
