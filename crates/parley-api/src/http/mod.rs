//! HTTP layer for Parley: the browser widget at `/` and the JSON API at
//! `/api/v1/` with an envelope response format.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
