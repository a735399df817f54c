//! Logging and trace export setup shared by the Parley binaries.

pub mod tracing_setup;
