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

//! PureBasic Language Server binary.
//!
//! Provides PureBasic settings resolution through the Language Server Protocol.
//!
//! # Usage
//!
//! ```bash
//! # Run the language server (stdio transport)
//! purebasic-lsp
//!
//! # With debug logging
//! RUST_LOG=debug purebasic-lsp
//! ```
//!
//! # Features
//!
//! - **Settings resolution**: per-document `purebasicLanguage` settings,
//!   pulled from the editor with `workspace/configuration` when it supports
//!   that, otherwise taken from `workspace/didChangeConfiguration` pushes
//! - **Capability detection**: configuration pull, workspace folders and
//!   related diagnostic information
//!
//! # Editor Integration
//!
//! The server handles `.pb` (source) and `.pbi` (include) files. Settings
//! live in the `purebasicLanguage` section.
//!
//! ## VS Code
//!
//! Add to `settings.json`:
//! ```json
//! {
//!   "purebasicLanguage.diagnostics.maxNumberOfProblems": 500
//! }
//! ```
//!
//! ## Neovim (nvim-lspconfig)
//!
//! ```lua
//! vim.filetype.add({ extension = { pb = 'purebasic', pbi = 'purebasic' } })
//!
//! require('lspconfig.configs').purebasic = {
//!   default_config = {
//!     cmd = { 'purebasic-lsp' },
//!     filetypes = { 'purebasic' },
//!     root_dir = function() return vim.fn.getcwd() end,
//!     settings = {
//!       purebasicLanguage = {
//!         diagnostics = { maxNumberOfProblems = 500 },
//!       },
//!     },
//!   },
//! }
//! require('lspconfig').purebasic.setup({})
//! ```

use purebasic_lsp::PureBasicLanguageServer;
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging to stderr (stdout carries the protocol)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("purebasic_lsp=info".parse().expect("valid log directive"))
                .add_directive("tower_lsp=info".parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting PureBasic Language Server v{}", purebasic_lsp::VERSION);

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(PureBasicLanguageServer::new);

    Server::new(stdin, stdout, socket).serve(service).await;
}
