//! A small client for the GoPOS point-of-sale API.
//!
//! Authenticate with [`oauth::authenticate`], then hand the access token to
//! [`api::fetch_orders`] to save a page of orders as raw JSON.

pub mod api;
pub mod oauth;
