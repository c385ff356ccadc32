//! ScamBait - Agentic Honey-Pot for Scam Detection
//!
//! This crate implements an HTTP service that classifies inbound messages as
//! scam attempts, engages confirmed scammers with a persona-driven reply, and
//! extracts structured fraud indicators from the conversation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
