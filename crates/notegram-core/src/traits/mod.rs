// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits at the edges of the delivery core.
//!
//! Both traits use `#[async_trait]` so implementations can be boxed and
//! swapped for mocks in tests.

pub mod document;
pub mod transport;

pub use document::DocumentSource;
pub use transport::{ApiRequest, ApiResponse, FormPart, RequestBody, Transport};
