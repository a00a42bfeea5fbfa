//! Termref - Term of Reference generator for public contracting.
//!
//! Assembles a Termo de Referência under Lei nº 14.133/2021 from a contract
//! request and converts it to Markdown and DOCX artifacts.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
