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

//! Demonstration of settings resolution in the PureBasic LSP.
//!
//! This example shows:
//! - Push mode: global settings replaced by configuration changes
//! - Pull mode: per-document fetches with caching
//! - Invalidation on document close and configuration change

use async_trait::async_trait;
use purebasic_lsp::{
    ConfigurationProvider, DocumentSettings, SettingsResolver, SettingsResult,
};
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tower_lsp::lsp_types::*;

/// Provider that hands out a different problem limit on every request.
struct DemoProvider {
    requests: AtomicU32,
}

#[async_trait]
impl ConfigurationProvider for DemoProvider {
    async fn fetch(&self, scope: &Url, section: &str) -> SettingsResult<DocumentSettings> {
        let n = self.requests.fetch_add(1, Ordering::SeqCst) + 1;
        println!("  -> workspace/configuration #{} ({} @ {})", n, section, scope);
        let mut settings = DocumentSettings::default();
        settings.diagnostics.max_number_of_problems = n * 100;
        Ok(settings)
    }
}

#[tokio::main]
async fn main() {
    println!("PureBasic LSP Settings Demonstration");
    println!("====================================\n");

    let provider = Arc::new(DemoProvider {
        requests: AtomicU32::new(0),
    });
    let doc = Url::parse("file:///demo/main.pb").unwrap();
    let other = Url::parse("file:///demo/include.pbi").unwrap();

    // Push mode
    println!("Client without workspace/configuration:");
    let resolver = SettingsResolver::new(provider.clone());
    resolver.initialize(&ClientCapabilities::default());
    let settings = resolver.get_settings(&doc).await.unwrap();
    println!("  maxNumberOfProblems = {}", settings.max_number_of_problems());

    resolver.on_configuration_changed(&json!({
        "purebasicLanguage": { "diagnostics": { "maxNumberOfProblems": 50 } }
    }));
    let settings = resolver.get_settings(&doc).await.unwrap();
    println!(
        "  after didChangeConfiguration: maxNumberOfProblems = {}\n",
        settings.max_number_of_problems()
    );

    // Pull mode
    println!("Client with workspace/configuration:");
    let resolver = SettingsResolver::new(provider.clone());
    resolver.initialize(&ClientCapabilities {
        workspace: Some(WorkspaceClientCapabilities {
            configuration: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    });

    for uri in [&doc, &doc, &other] {
        let settings = resolver.get_settings(uri).await.unwrap();
        println!("  {} -> {}", uri, settings.max_number_of_problems());
    }

    println!("\nClosing {}", other);
    resolver.on_document_closed(&other);
    let settings = resolver.get_settings(&other).await.unwrap();
    println!("  {} -> {}", other, settings.max_number_of_problems());

    println!("\nConfiguration changed");
    resolver.on_configuration_changed(&json!({}));
    let settings = resolver.get_settings(&doc).await.unwrap();
    println!("  {} -> {}", doc, settings.max_number_of_problems());

    let stats = resolver.cache_statistics();
    println!("\nCache Statistics:");
    println!("  Hits:          {}", stats.hits);
    println!("  Misses:        {}", stats.misses);
    println!("  Invalidations: {}", stats.invalidations);
    println!("  Size:          {}", stats.current_size);
}
