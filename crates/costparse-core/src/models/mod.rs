//! Data models for cost records, the customer registry and configuration.

pub mod config;
pub mod cost_item;
pub mod customer;
