//! Model invoker port for Parley.

pub mod provider;
