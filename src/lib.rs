//! headscale2hosts: Headscale machines to hosts file
//!
//! A library for polling the machine list of a Headscale namespace and
//! rendering it as a hosts file.

pub mod api;
pub mod config;
pub mod hosts;
pub mod poller;
pub mod time;
