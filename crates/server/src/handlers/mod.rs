//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the
//! `workflow-importer-server`, split by functionality: `general` for the
//! root/health endpoints, `extract` for the two extraction endpoints.

pub mod extract;
pub mod general;

pub use extract::*;
pub use general::*;

// Shared items used by the handler modules.
use super::{errors::AppError, state::AppState, types::ExtractResponse};
