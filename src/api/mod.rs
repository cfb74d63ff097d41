mod client;
mod orders;

pub use client::{ApiClient, ApiError, DEFAULT_API_BASE};
pub use orders::{fetch_orders, OrdersQuery};
