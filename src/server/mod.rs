use std::sync::Arc;

use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::config::ClassRefConfig;
use crate::handler::{CompletionHandler, DefinitionHandler};
use crate::index::{ContentChange, Index};
use crate::model::Span;

pub struct Backend {
    client: Client,
    index: Arc<Index>,
    root_uri: RwLock<Option<Url>>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            index: Arc::new(Index::new()),
            root_uri: RwLock::new(None),
        }
    }

    async fn load_config(&self) {
        let root_uri = self.root_uri.read().await.clone();
        let Some(path) = root_uri.and_then(|uri| uri.to_file_path().ok()) else {
            return;
        };

        let config = ClassRefConfig::load_from_dir(&path);
        self.client
            .log_message(
                MessageType::INFO,
                format!(
                    "Markup extensions: {:?}, stylesheet extensions: {:?}",
                    config.markup_extensions, config.stylesheet_extensions
                ),
            )
            .await;
        if !config.exclude.is_empty() {
            self.client
                .log_message(
                    MessageType::INFO,
                    format!("Exclude patterns: {:?}", config.exclude),
                )
                .await;
        }
        self.index.set_config(config);
    }
}

fn to_content_change(event: TextDocumentContentChangeEvent) -> ContentChange {
    match event.range {
        Some(range) => ContentChange::Incremental {
            span: Span::from_lsp_range(&range),
            text: event.text,
        },
        None => ContentChange::Full(event.text),
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let root = params
            .root_uri
            .or_else(|| {
                params
                    .workspace_folders
                    .as_ref()?
                    .first()
                    .map(|f| f.uri.clone())
            });

        *self.root_uri.write().await = root;

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "scss-class-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::INCREMENTAL),
                        save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                            include_text: Some(true),
                        })),
                        ..Default::default()
                    },
                )),
                definition_provider: Some(OneOf::Left(true)),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec![".".to_string()]),
                    resolve_provider: Some(true),
                    ..Default::default()
                }),
                ..Default::default()
            },
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "SCSS class language server initialized")
            .await;
        self.load_config().await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let Ok(path) = uri.to_file_path() else {
            tracing::debug!("did_open: not a file uri {}", uri);
            return;
        };
        self.index.open_document(path, params.text_document.text);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let Ok(path) = uri.to_file_path() else {
            return;
        };
        let changes: Vec<ContentChange> = params
            .content_changes
            .into_iter()
            .map(to_content_change)
            .collect();
        self.index.change_document(&path, &changes);
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let Some(text) = params.text else {
            return;
        };
        if let Ok(path) = params.text_document.uri.to_file_path() {
            self.index.save_document(path, text);
        }
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let handler = DefinitionHandler::new(Arc::clone(&self.index));
        Ok(handler.goto_definition(params))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let handler = CompletionHandler::new(Arc::clone(&self.index));
        Ok(handler.completion(params))
    }

    async fn completion_resolve(&self, item: CompletionItem) -> Result<CompletionItem> {
        let handler = CompletionHandler::new(Arc::clone(&self.index));
        Ok(handler.resolve(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_content_change() {
        let full = TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "abc".to_string(),
        };
        assert_eq!(to_content_change(full), ContentChange::Full("abc".to_string()));

        let incremental = TextDocumentContentChangeEvent {
            range: Some(Range {
                start: Position { line: 1, character: 2 },
                end: Position { line: 1, character: 4 },
            }),
            range_length: None,
            text: "x".to_string(),
        };
        assert_eq!(
            to_content_change(incremental),
            ContentChange::Incremental {
                span: Span::new(1, 2, 1, 4),
                text: "x".to_string(),
            }
        );
    }
}
