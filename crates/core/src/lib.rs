//! Domain logic for the Slurm REST bridge.
//!
//! Everything in this crate is HTTP-free: subprocess execution, job ID
//! validation, and the per-tool Slurm invocations live here so they can be
//! exercised without an axum server. The `api` crate owns routing, body
//! decoding, and the response envelope mapping.

pub mod command;
pub mod error;
pub mod job;
pub mod slurm;
