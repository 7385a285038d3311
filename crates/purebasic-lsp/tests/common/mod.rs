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

//! Shared helpers for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use purebasic_lsp::{ConfigurationProvider, DocumentSettings, SettingsError, SettingsResult};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Semaphore;
use tower_lsp::lsp_types::{
    ClientCapabilities, PublishDiagnosticsClientCapabilities, TextDocumentClientCapabilities,
    Url, WorkspaceClientCapabilities,
};

/// Mock configuration provider recording every fetch.
///
/// Each fetch returns `maxNumberOfProblems = base + call number`. A gated
/// provider holds every fetch until [`MockProvider::release`] is called.
pub struct MockProvider {
    base: u32,
    calls: AtomicUsize,
    fail: AtomicBool,
    gate: Option<Semaphore>,
    requests: Mutex<Vec<(Url, String)>>,
}

impl MockProvider {
    pub fn new(base: u32) -> Self {
        Self {
            base,
            calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
            gate: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn gated(base: u32) -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new(base)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(Url, String)> {
        self.requests.lock().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Let `fetches` gated fetches complete.
    pub fn release(&self, fetches: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(fetches);
        }
    }
}

#[async_trait]
impl ConfigurationProvider for MockProvider {
    async fn fetch(&self, scope: &Url, section: &str) -> SettingsResult<DocumentSettings> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().push((scope.clone(), section.to_string()));

        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|e| SettingsError::Request(e.to_string()))?
                .forget();
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(SettingsError::Request("mock provider failure".to_string()));
        }

        let mut settings = DocumentSettings::default();
        settings.diagnostics.max_number_of_problems = self.base + call as u32;
        Ok(settings)
    }
}

/// Client capabilities with each flag set explicitly.
pub fn capabilities(configuration: bool, folders: bool, related: bool) -> ClientCapabilities {
    ClientCapabilities {
        workspace: Some(WorkspaceClientCapabilities {
            configuration: Some(configuration),
            workspace_folders: Some(folders),
            ..Default::default()
        }),
        text_document: Some(TextDocumentClientCapabilities {
            publish_diagnostics: Some(PublishDiagnosticsClientCapabilities {
                related_information: Some(related),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Capabilities of a client that answers `workspace/configuration`.
pub fn pull_capabilities() -> ClientCapabilities {
    capabilities(true, false, false)
}

pub fn doc_uri(name: &str) -> Url {
    Url::parse(&format!("file:///workspace/{}.pb", name)).unwrap()
}

/// Poll `condition` until it holds, failing the test after five seconds.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..5000 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    panic!("timed out waiting for condition");
}
