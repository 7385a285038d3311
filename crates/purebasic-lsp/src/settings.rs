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

//! Settings schema and defaults.
//!
//! The schema mirrors the `purebasicLanguage` configuration section clients
//! send, using camelCase field names on the wire:
//!
//! ```json
//! { "diagnostics": { "maxNumberOfProblems": 1000 } }
//! ```
//!
//! Fields missing from a section are filled from [`DocumentSettings::default`].

use crate::constants::DEFAULT_MAX_NUMBER_OF_PROBLEMS;
use crate::error::SettingsResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Effective settings for one document.
///
/// Values are shared as `Arc<DocumentSettings>` once resolved and are never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentSettings {
    /// Diagnostics settings.
    pub diagnostics: DiagnosticsSettings,
}

/// Diagnostics section of [`DocumentSettings`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagnosticsSettings {
    /// Maximum number of problems reported for a single document.
    pub max_number_of_problems: u32,
}

impl Default for DiagnosticsSettings {
    fn default() -> Self {
        Self {
            max_number_of_problems: DEFAULT_MAX_NUMBER_OF_PROBLEMS,
        }
    }
}

impl DocumentSettings {
    /// Convert one configuration section value into settings.
    ///
    /// - `null` (section absent): the default settings
    /// - object: parsed, missing fields taken from the default
    /// - anything else: [`SettingsError::InvalidSettings`](crate::SettingsError::InvalidSettings)
    pub fn from_section(value: &Value) -> SettingsResult<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Maximum number of problems to report for a document.
    pub fn max_number_of_problems(&self) -> u32 {
        self.diagnostics.max_number_of_problems
    }
}
