//! Infrastructure adapters. Implement ports.
//!
//! Analytics API, report files, terminal UI. Map errors to DomainError.

pub mod api;
pub mod report;
pub mod ui;
