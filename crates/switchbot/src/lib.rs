//! The `switchbot` library crate provides a client for the `SwitchBot`
//! cloud API, which exposes home-automation device control and status
//! over `HTTPS`.
//!
//! Every call to the API must be authenticated with a shared-secret
//! `HMAC` scheme: the client derives a fresh nonce, timestamp, and
//! `HMAC-SHA256` signature from a long-lived token/secret pair and
//! attaches them as headers to the outgoing request. Each endpoint
//! replies with a common JSON envelope wrapping an endpoint-specific
//! payload.
//!
//! Core functionalities of this crate include:
//!
//! - Computing per-request credential header sets from the vendor
//!   account token and secret key
//! - Constructing and sending signed `REST` requests to a configurable
//!   base endpoint, one attempt per call
//! - Decoding the envelope responses of the device listing and device
//!   status endpoints
//!
//! A single [`client::Client`] instance owns its credentials and `HTTP`
//! transport and can be shared across asynchronous tasks: every call
//! signs itself with fresh values and no mutable state is shared
//! between concurrent calls.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Request signing: credentials, nonce sources, and credential header
/// sets.
pub mod auth;
/// A client for executing signed calls against the `SwitchBot` cloud
/// API.
pub mod client;
/// Device listing and device status endpoints with their payloads.
pub mod devices;
/// Error management.
pub mod error;
/// Envelope decoding and response body handling.
pub mod response;

#[cfg(test)]
mod tests;
