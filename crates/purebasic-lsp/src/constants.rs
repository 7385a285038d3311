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

//! LSP constants and protocol contract values.
//!
//! This module centralizes the well-known names and defaults shared by the
//! settings resolver and the server binding.
//!
//! # Organization
//!
//! Constants are organized by category:
//! - **Configuration Contract**: Section key and default values
//! - **LSP Protocol**: Method names and registration identifiers

// ============================================================================
// Configuration Contract
// ============================================================================

/// Configuration section holding all PureBasic settings.
///
/// **Rationale**: Editors namespace extension settings under a single key
/// (`"purebasicLanguage.diagnostics.maxNumberOfProblems"` in VS Code). The
/// server reads this section from `workspace/didChangeConfiguration` payloads
/// and requests it, scoped per document, via `workspace/configuration`.
///
/// Changing this value breaks every existing client configuration.
pub const SETTINGS_SECTION: &str = "purebasicLanguage";

/// Default upper bound on reported problems per document (1000).
///
/// **Rationale**: Large enough that real files never hit it, small enough to
/// keep a pathological file from flooding the editor's problem panel.
pub const DEFAULT_MAX_NUMBER_OF_PROBLEMS: u32 = 1000;

// ============================================================================
// LSP Protocol Constants
// ============================================================================

/// Notification method for configuration changes.
///
/// Used when dynamically registering for change notifications after the
/// client has confirmed `workspace.configuration` support.
pub const DID_CHANGE_CONFIGURATION_METHOD: &str = "workspace/didChangeConfiguration";

/// Registration id for the dynamic `workspace/didChangeConfiguration` registration.
///
/// **Usage**: Passed to `client/registerCapability` so the registration can
/// be identified (and unregistered) later.
pub const DID_CHANGE_CONFIGURATION_REGISTRATION_ID: &str = "purebasic-lsp/didChangeConfiguration";
