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

//! Configuration provider seam.
//!
//! The resolver never talks to the client directly; it asks a
//! [`ConfigurationProvider`] for the settings of one scope. The production
//! provider forwards to `workspace/configuration`; tests substitute their own.

use crate::error::{SettingsError, SettingsResult};
use crate::settings::DocumentSettings;
use async_trait::async_trait;
use tower_lsp::lsp_types::{ConfigurationItem, Url};
use tower_lsp::Client;
use tracing::debug;

/// Source of scoped configuration held by the client.
#[async_trait]
pub trait ConfigurationProvider: Send + Sync {
    /// Fetch the settings stored under `section` for `scope`.
    async fn fetch(&self, scope: &Url, section: &str) -> SettingsResult<DocumentSettings>;
}

/// Provider backed by the client's `workspace/configuration` request.
pub struct ClientConfigurationProvider {
    client: Client,
}

impl ClientConfigurationProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ConfigurationProvider for ClientConfigurationProvider {
    async fn fetch(&self, scope: &Url, section: &str) -> SettingsResult<DocumentSettings> {
        debug!("Requesting configuration section '{}' for {}", section, scope);

        let items = vec![ConfigurationItem {
            scope_uri: Some(scope.clone()),
            section: Some(section.to_string()),
        }];
        let values = self.client.configuration(items).await?;

        let value = values.first().ok_or(SettingsError::EmptyResponse)?;
        DocumentSettings::from_section(value)
    }
}
