//! Completion item shapes handed to the embedding editor.

use serde::Serialize;

/// What a suggestion denotes, mapped by the editor onto its own icon
/// set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionKind {
    /// A dispatchable command name.
    Command,
    /// An argument-specific identifier (named address, module name...).
    Field,
    /// A `$variable`.
    Variable,
    /// An `@helper`.
    Property,
}

/// One suggestion. `sort_text` buckets items so argument-specific ones
/// rank above variables, which rank above helpers; editors sort
/// lexicographically by it before the label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    pub label: String,
    pub insert_text: String,
    pub kind: CompletionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_text: Option<String>,
}

impl CompletionItem {
    pub fn new(label: impl Into<String>, kind: CompletionKind) -> Self {
        let label = label.into();
        CompletionItem {
            insert_text: label.clone(),
            label,
            kind,
            sort_text: None,
        }
    }

    pub fn with_insert_text(mut self, insert_text: impl Into<String>) -> Self {
        self.insert_text = insert_text.into();
        self
    }

    pub fn with_sort_text(mut self, sort_text: impl Into<String>) -> Self {
        self.sort_text = Some(sort_text.into());
        self
    }
}
