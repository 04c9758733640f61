//! Seqera Core
//!
//! Shared types for the Seqera Platform client and CLI.
//!
//! This crate contains:
//! - Domain types: entities as the Platform API returns them (Pipeline, Workflow, Workspace, etc.)
//! - DTOs: request bodies and response envelopes for each API endpoint

pub mod domain;
pub mod dto;
