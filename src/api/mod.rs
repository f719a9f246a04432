//! API module for the keep-alive HTTP endpoint
//!
//! Hosting platforms ping this to keep the process awake.

pub mod http;
