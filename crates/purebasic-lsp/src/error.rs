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

//! Error types for settings resolution.

use thiserror::Error;

/// Settings resolution error type.
///
/// The error is `Clone` because a single failed fetch is delivered to every
/// caller that joined it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The `workspace/configuration` request failed.
    #[error("Configuration request failed: {0}")]
    Request(String),

    /// The client answered with no configuration items.
    #[error("Configuration response contained no items")]
    EmptyResponse,

    /// The configuration section did not match the settings schema.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// The background fetch task ended without publishing an outcome.
    #[error("Configuration fetch ended without a result")]
    FetchAborted,
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

impl From<tower_lsp::jsonrpc::Error> for SettingsError {
    fn from(err: tower_lsp::jsonrpc::Error) -> Self {
        Self::Request(err.to_string())
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidSettings(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SettingsError::Request("connection closed".to_string());
        assert_eq!(err.to_string(), "Configuration request failed: connection closed");

        assert_eq!(
            SettingsError::EmptyResponse.to_string(),
            "Configuration response contained no items"
        );
        assert_eq!(
            SettingsError::FetchAborted.to_string(),
            "Configuration fetch ended without a result"
        );
    }

    #[test]
    fn test_from_jsonrpc_error() {
        let rpc = tower_lsp::jsonrpc::Error::internal_error();
        let err: SettingsError = rpc.into();
        assert!(matches!(err, SettingsError::Request(_)));
    }

    #[test]
    fn test_from_serde_error() {
        let parse = serde_json::from_str::<u32>("\"not a number\"").unwrap_err();
        let err: SettingsError = parse.into();
        assert!(matches!(err, SettingsError::InvalidSettings(_)));
    }
}
