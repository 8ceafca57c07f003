// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for notegram integration tests.
//!
//! Provides scripted stand-ins for the network and the vault so delivery
//! can be tested deterministically without external services.
//!
//! # Components
//!
//! - [`MockTransport`] - Scripted Bot API responses with request capture
//! - [`MockVault`] - In-memory [`DocumentSource`](notegram_core::traits::DocumentSource)
//! - [`fixtures`] - Builders for targets, attachments and media items

pub mod fixtures;
pub mod mock_transport;
pub mod mock_vault;

pub use mock_transport::MockTransport;
pub use mock_vault::MockVault;
