//! Core library for the lead relay.
//!
//! Contains the Lead Submission model and its validation rules, the mapping
//! into the payload an external provider expects, the [`provider::LeadProvider`]
//! interface with its forms-relay and email implementations, the HTTP client
//! for the relay endpoint, and the contact form state machine. This crate
//! knows nothing about HTTP servers or terminals.

pub mod error;
pub mod form;
pub mod lead;
pub mod payload;
pub mod provider;
pub mod relay_client;

pub use error::{FieldErrors, ProviderError};
pub use lead::{Field, LeadSubmission, ProjectType, PropertyType};
pub use provider::{Credential, Delivery, LeadProvider, SecretKey};
