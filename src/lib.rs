//! kfetch - exclusive-access system information reporting service.
//!
//! This library provides the core functionality behind the `kfetch` binary:
//! - `collector` - reads raw host metrics from `/proc` and `/sys`
//! - `provider` - the `SystemInfoProvider` abstraction and per-read snapshots
//! - `report` - field mask decoding and logo-aligned report rendering
//! - `service` - the open/write/read/close session state machine

pub mod collector;
pub mod provider;
pub mod report;
pub mod service;
