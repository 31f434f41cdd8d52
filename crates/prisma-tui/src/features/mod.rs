//! UI slices. Each owns its render code and, where it has any, its state
//! and key handling.

pub mod chat;
pub mod controls;
pub mod input;
pub mod logs;
pub mod map;
