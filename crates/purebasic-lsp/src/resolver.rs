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

//! Settings resolution facade.
//!
//! [`SettingsResolver`] is the per-session context that answers "which
//! settings apply to this document". It owns the capability registry, the
//! global fallback settings and the per-document cache.
//!
//! Two modes, chosen by the client's `workspace.configuration` capability:
//!
//! - **Push** (unsupported): every document uses one global settings value,
//!   replaced wholesale by each `workspace/didChangeConfiguration`.
//! - **Pull** (supported): settings are requested per document through the
//!   [`ConfigurationProvider`] and cached until the document closes or any
//!   configuration change arrives.

use crate::cache::{CacheStatistics, DocumentSettingsCache};
use crate::capabilities::{CapabilityRegistry, ClientCapabilityFlags};
use crate::constants::SETTINGS_SECTION;
use crate::error::SettingsResult;
use crate::provider::ConfigurationProvider;
use crate::settings::DocumentSettings;
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use tower_lsp::lsp_types::{ClientCapabilities, Url};
use tracing::{debug, info, warn};

/// Per-session settings context.
///
/// Construct one per server instance; it is dropped with the session.
///
/// # Example
///
/// ```no_run
/// use purebasic_lsp::{ClientConfigurationProvider, SettingsResolver};
/// use std::sync::Arc;
/// use tower_lsp::Client;
///
/// fn create_resolver(client: Client) -> SettingsResolver {
///     SettingsResolver::new(Arc::new(ClientConfigurationProvider::new(client)))
/// }
/// ```
pub struct SettingsResolver {
    capabilities: CapabilityRegistry,
    /// Settings used by every document when pull configuration is unsupported.
    global_settings: RwLock<Arc<DocumentSettings>>,
    document_settings: DocumentSettingsCache,
}

impl SettingsResolver {
    pub fn new(provider: Arc<dyn ConfigurationProvider>) -> Self {
        Self {
            capabilities: CapabilityRegistry::new(),
            global_settings: RwLock::new(Arc::new(DocumentSettings::default())),
            document_settings: DocumentSettingsCache::new(provider),
        }
    }

    /// Record the client's capabilities from the `initialize` handshake.
    ///
    /// Cached document settings are dropped: while in push mode nothing
    /// invalidates them, so entries kept across a re-initialization could
    /// be stale by the time pull mode is back.
    pub fn initialize(&self, capabilities: &ClientCapabilities) {
        self.capabilities.initialize(capabilities);
        self.document_settings.clear();
    }

    /// Handle a `workspace/didChangeConfiguration` payload.
    ///
    /// In push mode the `purebasicLanguage` section replaces the global
    /// settings (a missing or malformed section resets them to the default).
    /// In pull mode every cached document entry is dropped.
    pub fn on_configuration_changed(&self, settings: &Value) {
        if self.capabilities.supports_pull_configuration() {
            info!("Configuration changed, invalidating all cached document settings");
            self.document_settings.clear();
            return;
        }

        let section = settings.get(SETTINGS_SECTION).unwrap_or(&Value::Null);
        let updated = match DocumentSettings::from_section(section) {
            Ok(updated) => updated,
            Err(err) => {
                warn!(
                    "Ignoring malformed '{}' settings ({}), using defaults",
                    SETTINGS_SECTION, err
                );
                DocumentSettings::default()
            }
        };

        info!(
            "Global settings updated (maxNumberOfProblems: {})",
            updated.max_number_of_problems()
        );
        *self.global_settings.write() = Arc::new(updated);
    }

    /// Resolve the settings for a document.
    ///
    /// # Error Handling
    ///
    /// Only a failed provider fetch (pull mode) produces an error. Callers
    /// typically fall back to [`DocumentSettings::default`].
    pub async fn get_settings(&self, uri: &Url) -> SettingsResult<Arc<DocumentSettings>> {
        if !self.capabilities.supports_pull_configuration() {
            return Ok(self.global_settings());
        }
        self.document_settings.get(uri).await
    }

    /// Handle `textDocument/didClose`: drop the document's cached settings.
    pub fn on_document_closed(&self, uri: &Url) {
        if self.document_settings.remove(uri) {
            debug!("Dropped cached settings for closed document {}", uri);
        }
    }

    /// Current global fallback settings.
    pub fn global_settings(&self) -> Arc<DocumentSettings> {
        self.global_settings.read().clone()
    }

    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    pub fn flags(&self) -> ClientCapabilityFlags {
        self.capabilities.flags()
    }

    pub fn supports_pull_configuration(&self) -> bool {
        self.capabilities.supports_pull_configuration()
    }

    pub fn supports_workspace_folders(&self) -> bool {
        self.capabilities.supports_workspace_folders()
    }

    pub fn supports_diagnostic_related_info(&self) -> bool {
        self.capabilities.supports_diagnostic_related_info()
    }

    pub fn document_settings(&self) -> &DocumentSettingsCache {
        &self.document_settings
    }

    /// Get current per-document cache statistics.
    pub fn cache_statistics(&self) -> CacheStatistics {
        self.document_settings.statistics()
    }
}
