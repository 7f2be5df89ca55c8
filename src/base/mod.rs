//! Base types, errors, and settings.
//!
//! - [`CodecError`](error::CodecError): error type shared by every module
//! - [`CookieSettings`](config::CookieSettings): settings supplied by the host framework

pub mod config;
pub mod error;

#[cfg(test)]
mod tests;
