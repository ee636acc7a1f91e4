//! Canned chat responses.
//!
//! Keyword rules are plain data here; their precedence is decided by the responder in
//! `healthai-core`.

use crate::{CatalogueError, CatalogueResult};
use serde::{Deserialize, Serialize};

/// Placeholder replaced by the detected symptom labels in the symptom-mention template.
pub const SYMPTOMS_PLACEHOLDER: &str = "{symptoms}";

// ============================================================================
// Public domain-level types
// ============================================================================

/// A response triggered when the message contains any of the keywords.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeywordResponse {
    /// Lowercase keywords.
    pub keywords: Vec<String>,
    pub response: String,
}

/// The full set of canned chat responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatResponses {
    pub fever: KeywordResponse,
    /// Template containing [`SYMPTOMS_PLACEHOLDER`].
    pub symptom_mention: String,
    pub greeting: KeywordResponse,
    pub help: KeywordResponse,
    pub thanks: KeywordResponse,
    pub default: String,
}

impl ChatResponses {
    /// Fill the symptom-mention template with the given labels joined by ", ".
    pub fn symptom_mention<S: AsRef<str>>(&self, symptoms: &[S]) -> String {
        let joined = symptoms
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(", ");
        self.symptom_mention.replace(SYMPTOMS_PLACEHOLDER, &joined)
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct ChatWire {
    pub fever: KeywordResponseWire,
    pub symptom_mention: String,
    pub greeting: KeywordResponseWire,
    pub help: KeywordResponseWire,
    pub thanks: KeywordResponseWire,
    pub default: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct KeywordResponseWire {
    pub keywords: Vec<String>,
    pub response: String,
}

// ============================================================================
// Translation helpers
// ============================================================================

pub(crate) fn chat_from_wire(wire: ChatWire) -> CatalogueResult<ChatResponses> {
    if !wire.symptom_mention.contains(SYMPTOMS_PLACEHOLDER) {
        return Err(CatalogueError::InvalidInput(format!(
            "chat.symptom_mention must contain {SYMPTOMS_PLACEHOLDER}"
        )));
    }

    Ok(ChatResponses {
        fever: keyword_response("fever", wire.fever)?,
        symptom_mention: wire.symptom_mention,
        greeting: keyword_response("greeting", wire.greeting)?,
        help: keyword_response("help", wire.help)?,
        thanks: keyword_response("thanks", wire.thanks)?,
        default: wire.default,
    })
}

pub(crate) fn chat_to_wire(chat: &ChatResponses) -> ChatWire {
    let to_wire = |k: &KeywordResponse| KeywordResponseWire {
        keywords: k.keywords.clone(),
        response: k.response.clone(),
    };
    ChatWire {
        fever: to_wire(&chat.fever),
        symptom_mention: chat.symptom_mention.clone(),
        greeting: to_wire(&chat.greeting),
        help: to_wire(&chat.help),
        thanks: to_wire(&chat.thanks),
        default: chat.default.clone(),
    }
}

fn keyword_response(rule: &str, wire: KeywordResponseWire) -> CatalogueResult<KeywordResponse> {
    let keywords: Vec<String> = wire
        .keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    if keywords.is_empty() {
        return Err(CatalogueError::InvalidInput(format!(
            "chat.{rule} needs at least one keyword"
        )));
    }

    Ok(KeywordResponse {
        keywords,
        response: wire.response,
    })
}
