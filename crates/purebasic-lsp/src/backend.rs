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

//! LSP backend implementation.
//!
//! The backend routes the protocol events that affect settings into the
//! [`SettingsResolver`]:
//!
//! 1. **initialize**: records client capabilities and advertises the server's.
//! 2. **initialized**: registers for configuration change notifications when
//!    the client supports pull configuration.
//! 3. **didChangeConfiguration**: updates the global settings or invalidates
//!    the per-document cache.
//! 4. **didOpen / didClose**: warms and evicts per-document settings.

use crate::constants::{DID_CHANGE_CONFIGURATION_METHOD, DID_CHANGE_CONFIGURATION_REGISTRATION_ID};
use crate::provider::{ClientConfigurationProvider, ConfigurationProvider};
use crate::resolver::SettingsResolver;
use std::sync::Arc;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{debug, info, warn};

/// PureBasic Language Server backend.
///
/// Settings state lives in a shared [`SettingsResolver`] so that other
/// components (e.g. a diagnostics engine) can resolve settings for the same
/// session through [`PureBasicLanguageServer::settings`].
pub struct PureBasicLanguageServer {
    /// LSP client connection.
    client: Client,
    /// Settings resolution context for this session.
    settings: Arc<SettingsResolver>,
}

impl PureBasicLanguageServer {
    /// Create a new language server pulling configuration from the client.
    pub fn new(client: Client) -> Self {
        let provider = Arc::new(ClientConfigurationProvider::new(client.clone()));
        Self::with_provider(client, provider)
    }

    /// Create a new language server with a custom configuration provider.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use purebasic_lsp::{ClientConfigurationProvider, PureBasicLanguageServer};
    /// use std::sync::Arc;
    /// use tower_lsp::Client;
    ///
    /// fn create_server(client: Client) -> PureBasicLanguageServer {
    ///     let provider = Arc::new(ClientConfigurationProvider::new(client.clone()));
    ///     PureBasicLanguageServer::with_provider(client, provider)
    /// }
    /// ```
    pub fn with_provider(client: Client, provider: Arc<dyn ConfigurationProvider>) -> Self {
        Self {
            client,
            settings: Arc::new(SettingsResolver::new(provider)),
        }
    }

    /// Shared settings resolver for this session.
    pub fn settings(&self) -> Arc<SettingsResolver> {
        Arc::clone(&self.settings)
    }

    async fn register_configuration_changes(&self) {
        let registration = Registration {
            id: DID_CHANGE_CONFIGURATION_REGISTRATION_ID.to_string(),
            method: DID_CHANGE_CONFIGURATION_METHOD.to_string(),
            register_options: None,
        };

        match self.client.register_capability(vec![registration]).await {
            Ok(()) => debug!("Registered for {}", DID_CHANGE_CONFIGURATION_METHOD),
            Err(err) => warn!(
                "Failed to register for {}: {} (configuration changes may be missed)",
                DID_CHANGE_CONFIGURATION_METHOD, err
            ),
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for PureBasicLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("PureBasic Language Server initializing");

        self.settings.initialize(&params.capabilities);

        let workspace = self
            .settings
            .supports_workspace_folders()
            .then(|| WorkspaceServerCapabilities {
                workspace_folders: Some(WorkspaceFoldersServerCapabilities {
                    supported: Some(true),
                    change_notifications: None,
                }),
                file_operations: None,
            });

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        ..Default::default()
                    },
                )),
                workspace,
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "purebasic-lsp".to_string(),
                version: Some(crate::VERSION.to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        info!("PureBasic Language Server initialized");

        if self.settings.supports_pull_configuration() {
            self.register_configuration_changes().await;
        }
    }

    async fn shutdown(&self) -> Result<()> {
        info!("PureBasic Language Server shutting down");
        Ok(())
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        debug!("Configuration change notification received");
        self.settings.on_configuration_changed(&params.settings);
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = &params.text_document.uri;
        info!("Document opened: {}", uri);

        match self.settings.get_settings(uri).await {
            Ok(settings) => debug!(
                "Settings for {}: maxNumberOfProblems = {}",
                uri,
                settings.max_number_of_problems()
            ),
            Err(err) => warn!("Could not resolve settings for {}: {}", uri, err),
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        debug!("Document closed: {}", params.text_document.uri);
        self.settings.on_document_closed(&params.text_document.uri);
    }
}
