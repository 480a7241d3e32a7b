//! Locale preference management for the blog: a durable store for the
//! active locale, the switch menu that drives it, route-encoded locale
//! helpers, and locale-based selection of localized content.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
