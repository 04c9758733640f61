//! Core domain types
//!
//! Entities mirroring the JSON shapes of the Seqera Platform API. They carry no
//! client-side lifecycle: identity and consistency belong to the server.

pub mod action;
pub mod compute_env;
pub mod credentials;
pub mod data_link;
pub mod dataset;
pub mod label;
pub mod organization;
pub mod pipeline;
pub mod secret;
pub mod team;
pub mod user;
pub mod workflow;
pub mod workspace;
