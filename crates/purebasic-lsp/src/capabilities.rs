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

//! Client capability detection.
//!
//! The registry records which optional protocol features the connected client
//! advertised in its `initialize` request. Detection walks the nested
//! capability tree with `Option` chains: a missing intermediate object and an
//! explicit `false` both read as "unsupported".

use parking_lot::RwLock;
use tower_lsp::lsp_types::ClientCapabilities;
use tracing::info;

/// Optional client features relevant to settings resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientCapabilityFlags {
    /// `workspace.configuration`: the client answers `workspace/configuration`.
    pub supports_pull_configuration: bool,
    /// `workspace.workspaceFolders`: the client supports workspace folders.
    pub supports_workspace_folders: bool,
    /// `textDocument.publishDiagnostics.relatedInformation`.
    pub supports_diagnostic_related_info: bool,
}

impl ClientCapabilityFlags {
    /// Derive the flags from a client capability tree.
    pub fn from_client_capabilities(capabilities: &ClientCapabilities) -> Self {
        let workspace = capabilities.workspace.as_ref();

        Self {
            supports_pull_configuration: workspace
                .and_then(|ws| ws.configuration)
                .unwrap_or(false),
            supports_workspace_folders: workspace
                .and_then(|ws| ws.workspace_folders)
                .unwrap_or(false),
            supports_diagnostic_related_info: capabilities
                .text_document
                .as_ref()
                .and_then(|td| td.publish_diagnostics.as_ref())
                .and_then(|pd| pd.related_information)
                .unwrap_or(false),
        }
    }
}

#[derive(Default)]
struct RegistryState {
    flags: ClientCapabilityFlags,
    client_capabilities: Option<ClientCapabilities>,
}

/// Record of the capabilities advertised by the connected client.
///
/// All flags read `false` until [`CapabilityRegistry::initialize`] runs.
/// Re-initialization is allowed and the last call wins.
#[derive(Default)]
pub struct CapabilityRegistry {
    state: RwLock<RegistryState>,
}

impl CapabilityRegistry {
    /// Create an empty registry (all flags unsupported).
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the client's capabilities from the `initialize` handshake.
    pub fn initialize(&self, capabilities: &ClientCapabilities) {
        let flags = ClientCapabilityFlags::from_client_capabilities(capabilities);
        info!(
            "Client capabilities: pull configuration={}, workspace folders={}, diagnostic related info={}",
            flags.supports_pull_configuration,
            flags.supports_workspace_folders,
            flags.supports_diagnostic_related_info
        );

        let mut state = self.state.write();
        state.flags = flags;
        state.client_capabilities = Some(capabilities.clone());
    }

    /// Snapshot of all three flags.
    pub fn flags(&self) -> ClientCapabilityFlags {
        self.state.read().flags
    }

    pub fn supports_pull_configuration(&self) -> bool {
        self.flags().supports_pull_configuration
    }

    pub fn supports_workspace_folders(&self) -> bool {
        self.flags().supports_workspace_folders
    }

    pub fn supports_diagnostic_related_info(&self) -> bool {
        self.flags().supports_diagnostic_related_info
    }

    /// The raw capability tree from the last `initialize`, if any.
    pub fn client_capabilities(&self) -> Option<ClientCapabilities> {
        self.state.read().client_capabilities.clone()
    }
}
