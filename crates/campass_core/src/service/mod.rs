//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the create/list/update/delete
//!   lifecycle shared by every record kind.
//! - Keep HTTP/transport layers decoupled from storage details.

pub mod record_service;
