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

//! Property-based tests for capability detection.
//!
//! # Property Categories
//!
//! 1. **Independence**: each flag depends only on its own capability path
//! 2. **Missing Paths**: an absent intermediate object always reads as false
//! 3. **Mode Selection**: the flags decide whether the provider is consulted

mod common;

use common::MockProvider;
use proptest::prelude::*;
use purebasic_lsp::{ClientCapabilityFlags, ConfigurationProvider, SettingsResolver};
use std::sync::Arc;
use tower_lsp::lsp_types::*;

/// Optional boolean leaf, including the "field absent" case.
fn leaf() -> impl Strategy<Value = Option<bool>> {
    prop_oneof![Just(None), Just(Some(false)), Just(Some(true))]
}

fn build(
    workspace: Option<(Option<bool>, Option<bool>)>,
    diagnostics: Option<Option<Option<bool>>>,
) -> ClientCapabilities {
    ClientCapabilities {
        workspace: workspace.map(|(configuration, workspace_folders)| WorkspaceClientCapabilities {
            configuration,
            workspace_folders,
            ..Default::default()
        }),
        text_document: diagnostics.map(|publish| TextDocumentClientCapabilities {
            publish_diagnostics: publish.map(|related_information| {
                PublishDiagnosticsClientCapabilities {
                    related_information,
                    ..Default::default()
                }
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

// Property: every combination of the three flags is detected exactly.
proptest! {
    #[test]
    fn prop_flags_are_independent(configuration: bool, folders: bool, related: bool) {
        let caps = build(
            Some((Some(configuration), Some(folders))),
            Some(Some(Some(related))),
        );
        let flags = ClientCapabilityFlags::from_client_capabilities(&caps);

        prop_assert_eq!(flags.supports_pull_configuration, configuration);
        prop_assert_eq!(flags.supports_workspace_folders, folders);
        prop_assert_eq!(flags.supports_diagnostic_related_info, related);
    }

    #[test]
    fn prop_flag_true_iff_leaf_true(
        workspace in prop::option::of((leaf(), leaf())),
        diagnostics in prop::option::of(prop::option::of(leaf())),
    ) {
        let caps = build(workspace, diagnostics);
        let flags = ClientCapabilityFlags::from_client_capabilities(&caps);

        let expect_config = workspace.and_then(|(c, _)| c) == Some(true);
        let expect_folders = workspace.and_then(|(_, f)| f) == Some(true);
        let expect_related = diagnostics.flatten().flatten() == Some(true);

        prop_assert_eq!(flags.supports_pull_configuration, expect_config);
        prop_assert_eq!(flags.supports_workspace_folders, expect_folders);
        prop_assert_eq!(flags.supports_diagnostic_related_info, expect_related);
    }

    #[test]
    fn prop_missing_paths_are_false(configuration: bool, folders: bool, related: bool) {
        // Leaves set but parents missing: the leaf values are unreachable
        let no_workspace = build(None, Some(Some(Some(related))));
        let flags = ClientCapabilityFlags::from_client_capabilities(&no_workspace);
        prop_assert!(!flags.supports_pull_configuration);
        prop_assert!(!flags.supports_workspace_folders);

        let no_publish = build(Some((Some(configuration), Some(folders))), Some(None));
        let flags = ClientCapabilityFlags::from_client_capabilities(&no_publish);
        prop_assert!(!flags.supports_diagnostic_related_info);

        let nothing = build(None, None);
        prop_assert_eq!(
            ClientCapabilityFlags::from_client_capabilities(&nothing),
            ClientCapabilityFlags::default()
        );
    }
}

// Property: the provider is consulted only when pull configuration is supported.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_provider_used_only_in_pull_mode(configuration: bool, folders: bool, related: bool) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let provider = Arc::new(MockProvider::new(0));
        let resolver =
            SettingsResolver::new(Arc::clone(&provider) as Arc<dyn ConfigurationProvider>);
        resolver.initialize(&common::capabilities(configuration, folders, related));

        let uri = common::doc_uri("prop");
        runtime.block_on(async {
            resolver.get_settings(&uri).await.unwrap();
            resolver.get_settings(&uri).await.unwrap();
        });

        prop_assert_eq!(provider.calls(), usize::from(configuration));
    }
}
