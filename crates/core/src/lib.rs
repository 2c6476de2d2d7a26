//! Core library for domain-checker
//!
//! This crate implements the **Functional Core** of the domain-checker application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The project uses a two-crate architecture:
//!
//! - **`domain_checker_core`** (this crate): Pure transformation functions with zero I/O
//! - **`domain-checker`**: HTTP server, provider client and CLI (the Imperative Shell)
//!
//! Everything here is deterministic: the same provider record and view mode always
//! produce the same display record, so every function can be tested with plain
//! fixture data.
//!
//! # Module Organization
//!
//! - [`format`]: Field formatters for dates, domain ages and hostnames
//! - [`whois`]: The loosely-typed WHOIS provider record and its parser
//! - [`display`]: View modes, the ordered display record and the response shaper
//! - [`lookup`]: Validation of inbound lookup parameters
//! - [`error`]: The lookup error taxonomy and its HTTP mapping
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use domain_checker_core::display::{shape_record, ViewMode};
//! use domain_checker_core::whois::parse_whois_response;
//!
//! let record = parse_whois_response(r#"{"WhoisRecord": {"domainName": "example.com"}}"#)?;
//! let display = shape_record(&record, ViewMode::Domain);
//!
//! assert_eq!(display.labels().next(), Some("Domain Name"));
//! ```

pub mod display;
pub mod error;
pub mod format;
pub mod lookup;
pub mod whois;
