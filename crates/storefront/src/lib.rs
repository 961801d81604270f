//! StyleHub Storefront core library.
//!
//! This crate implements the two engines behind the StyleHub storefront UI:
//!
//! - [`services::catalog::CatalogService`] - loads the product catalog and
//!   derives a filtered, sorted product list from user-entered criteria
//! - [`services::cart::CartService`] - keeps a per-user cart quantity index
//!   consistent with the remote cart rows through read-modify-write
//!   operations and full refetches
//!
//! Everything presentational (routing, session lifecycle, rendering, toast
//! display) lives outside this crate and talks to it through the capability
//! traits in [`store`] and [`notify`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod logging;
pub mod notify;
pub mod services;
pub mod store;
