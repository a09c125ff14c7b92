//! Rate-gated client for the CRPT product-marking registry
//!
//! This crate provides [`RegistryClient`], an async client for the registry's
//! create-document endpoint. Every submission passes through a shared
//! [`markgate::RateGate`] first, so a process never exceeds its configured
//! calls-per-window quota no matter how many tasks submit concurrently.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use markgate_client::{Description, Document, RegistryClient};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> markgate_client::Result<()> {
//! let client = RegistryClient::builder()
//!     .token("...bearer token...")
//!     .window(Duration::from_secs(60))
//!     .limit(100)
//!     .build()?;
//!
//! let document = Document {
//!     description: Some(Description {
//!         participant_inn: "1234567890".into(),
//!     }),
//!     doc_id: "doc-1".into(),
//!     ..Document::default()
//! };
//!
//! let receipt = client.create_document(&document, "milk", "signature").await?;
//! println!("registry responded with {}", receipt.status);
//! # Ok(())
//! # }
//! ```
//!
//! ## Scope
//!
//! The client does not retry failed submissions, interpret registry error
//! bodies, or validate document content. Any HTTP response comes back as a
//! [`SubmissionReceipt`]; only transport failures are errors.

pub mod client;
pub mod document;
pub mod error;
pub mod payload;
pub mod token;

pub use client::{RegistryClient, RegistryClientBuilder, SubmissionReceipt};
pub use document::{Description, Document, Product};
pub use error::{ClientError, Result};
pub use payload::SubmissionPayload;
pub use token::generate_token;
