//! Risk decision engine for third-party, compliance and appetite governance.
//!
//! Every assessment is a pure function of an input record, an immutable policy or
//! scoring model, and an explicit evaluation date. The [`workflows`] tree holds the
//! engines; [`config`], [`telemetry`] and [`error`] carry the service plumbing.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
