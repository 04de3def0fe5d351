//! JIRA API client and types.
//!
//! This module provides the interface for communicating with the JIRA REST
//! API; it is the only part of the tool that speaks JIRA's network protocol.

mod auth;
mod client;
pub mod error;
mod types;

pub use client::JiraClient;
pub use error::JiraError;
pub use types::Issue;
