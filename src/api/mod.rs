//! Client layer for the Headscale machine registry.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Decoding the machine list ([`MachineList`], [`MachineRecord`])
//! - Fetching machines for a namespace ([`MachineSource`], [`HeadscaleApi`])

mod client;
mod error;
mod http;
mod machine;
mod source;

#[cfg(test)]
mod client_tests;

pub use client::ReqwestClient;
pub use error::{FetchError, HttpError};
pub use self::http::{HttpClient, HttpRequest, HttpResponse};
pub use machine::{MachineList, MachineRecord, Namespace, PreAuthKey};
pub use source::{HeadscaleApi, MACHINES_PATH, MachineSource};
