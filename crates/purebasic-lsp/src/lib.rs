// PureBasic Language Server
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! PureBasic Language Server Protocol (LSP) Implementation
//!
//! This crate provides the settings layer of the PureBasic language server:
//! it negotiates optional features with the client and resolves the
//! effective settings for every open document.
//!
//! # Features
//!
//! - **Capability Detection**: Records whether the client supports
//!   `workspace/configuration`, workspace folders and related diagnostic
//!   information
//! - **Pull Configuration**: Per-document settings requested from the client,
//!   cached with single-flight deduplication
//! - **Push Configuration**: Global settings replaced on every
//!   `workspace/didChangeConfiguration` for clients without pull support
//! - **Invalidation**: Per-document eviction on close, full invalidation on
//!   configuration change
//!
//! # Usage
//!
//! ## Running the Server
//!
//! ```bash
//! # Run the language server (stdio transport)
//! purebasic-lsp
//!
//! # With debug logging
//! RUST_LOG=debug purebasic-lsp
//! ```
//!
//! ## Programmatic Usage
//!
//! ```no_run
//! use purebasic_lsp::PureBasicLanguageServer;
//! use tower_lsp::{LspService, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let stdin = tokio::io::stdin();
//!     let stdout = tokio::io::stdout();
//!
//!     let (service, socket) = LspService::new(PureBasicLanguageServer::new);
//!
//!     Server::new(stdin, stdout, socket).serve(service).await;
//! }
//! ```
//!
//! ## Resolving Settings
//!
//! ```no_run
//! use purebasic_lsp::PureBasicLanguageServer;
//! use tower_lsp::lsp_types::Url;
//!
//! async fn problem_limit(server: &PureBasicLanguageServer, uri: &Url) -> u32 {
//!     server
//!         .settings()
//!         .get_settings(uri)
//!         .await
//!         .map(|settings| settings.max_number_of_problems())
//!         .unwrap_or(purebasic_lsp::constants::DEFAULT_MAX_NUMBER_OF_PROBLEMS)
//! }
//! ```
//!
//! # Architecture
//!
//! - `backend`: LSP server implementation routing protocol events
//! - [`resolver`]: Settings resolution facade (one per session)
//! - [`cache`]: Single-flight per-document settings cache
//! - [`capabilities`]: Client capability detection
//! - [`provider`]: Configuration provider seam and `workspace/configuration` client
//! - [`settings`]: Settings schema and defaults

mod backend;
pub mod cache;
pub mod capabilities;
pub mod constants;
pub mod error;
pub mod provider;
pub mod resolver;
pub mod settings;


pub use backend::PureBasicLanguageServer;
pub use cache::{CacheStatistics, DocumentSettingsCache, EntryState};
pub use capabilities::{CapabilityRegistry, ClientCapabilityFlags};
pub use error::{SettingsError, SettingsResult};
pub use provider::{ClientConfigurationProvider, ConfigurationProvider};
pub use resolver::SettingsResolver;
pub use settings::{DiagnosticsSettings, DocumentSettings};

/// LSP server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
