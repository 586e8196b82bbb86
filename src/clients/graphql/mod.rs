//! GraphQL client for the monday.com API.
//!
//! # Overview
//!
//! - [`MondayClient`]: Sends [`GraphqlRequest`](crate::clients::GraphqlRequest)s
//!   with retries and hands out the service facades
//!
//! # Response Structure
//!
//! monday.com answers every call with HTTP 200 or an error status and a body
//! holding `data`, `errors`, or both. Only a 2xx body with non-null `data`
//! and no `errors` counts as success; see
//! [`classify`](crate::clients::classify) for the rest.

mod client;

pub use client::{MondayClient, SDK_VERSION};
