//! Interaction Module
//!
//! Validates `end_session` requests and serves the login, consent and error
//! pages with the context they need: the pending authorization request, the
//! stored error message, and a place to record the consent decision.
//!
//! The host supplies token, redirect URI and authorize request validators
//! plus message stores; [`module::Interaction`] wires them into the
//! `EndSessionClient` and `UserInteractionClient` SDK traits.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

pub use config::InteractionConfig;
pub use module::{Collaborators, Interaction};
