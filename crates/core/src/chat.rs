//! Canned chat responder and transcript.
//!
//! Rules are checked in order against the lowercased message and the first hit wins:
//! fever keyword, any vocabulary symptom, greeting, help, thanks, then the default reply.

use crate::detection::{contains_any_keyword, detect_symptoms, DetectionMode};
use crate::{HealthError, HealthResult};
use catalogue::Catalogue;
use chrono::{DateTime, Local};
use healthai_types::Symptom;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Fever,
    SymptomMention,
    Greeting,
    Help,
    Thanks,
    Default,
}

impl ReplyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReplyKind::Fever => "fever",
            ReplyKind::SymptomMention => "symptom_mention",
            ReplyKind::Greeting => "greeting",
            ReplyKind::Help => "help",
            ReplyKind::Thanks => "thanks",
            ReplyKind::Default => "default",
        }
    }
}

/// The responder's answer to one message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub kind: ReplyKind,
    pub text: String,
    /// Symptoms detected in the message; only filled for [`ReplyKind::SymptomMention`].
    pub symptoms: Vec<Symptom>,
}

/// Produce the canned reply for a message.
///
/// # Errors
///
/// Returns [`HealthError::EmptyMessage`] for a blank message. Callers ignore such
/// messages rather than showing an error.
pub fn respond(message: &str, catalogue: &Catalogue, mode: DetectionMode) -> HealthResult<ChatReply> {
    let message = message.trim();
    if message.is_empty() {
        return Err(HealthError::EmptyMessage);
    }

    let lowered = message.to_lowercase();
    let responses = catalogue.chat();

    let reply = |kind: ReplyKind, text: &str| ChatReply {
        kind,
        text: text.to_string(),
        symptoms: Vec::new(),
    };

    if contains_any_keyword(&lowered, &responses.fever.keywords, mode) {
        return Ok(reply(ReplyKind::Fever, &responses.fever.response));
    }

    let found = detect_symptoms(&lowered, catalogue.vocabulary(), mode);
    if !found.is_empty() {
        return Ok(ChatReply {
            kind: ReplyKind::SymptomMention,
            text: responses.symptom_mention(&found),
            symptoms: found.into_iter().cloned().collect(),
        });
    }

    let rules = [
        (ReplyKind::Greeting, &responses.greeting),
        (ReplyKind::Help, &responses.help),
        (ReplyKind::Thanks, &responses.thanks),
    ];
    for (kind, rule) in rules {
        if contains_any_keyword(&lowered, &rule.keywords, mode) {
            return Ok(reply(kind, &rule.response));
        }
    }

    Ok(reply(ReplyKind::Default, &responses.default))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub sent_at: DateTime<Local>,
}

impl ChatMessage {
    /// Local time as `HH:MM`.
    pub fn time_label(&self) -> String {
        self.sent_at.format("%H:%M").to_string()
    }
}

/// Messages exchanged in one session, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push(&mut self, sender: Sender, text: impl Into<String>, sent_at: DateTime<Local>) {
        self.messages.push(ChatMessage {
            sender,
            text: text.into(),
            sent_at,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reply(message: &str) -> ChatReply {
        let catalogue = Catalogue::embedded().unwrap();
        respond(message, &catalogue, DetectionMode::Substring).expect("non-empty message")
    }

    #[test]
    fn fever_takes_precedence_over_other_symptoms() {
        let r = reply("I have a Fever and a cough");
        assert_eq!(r.kind, ReplyKind::Fever);
        assert!(r.text.contains("100.4"));
    }

    #[test]
    fn mentions_detected_symptoms() {
        let r = reply("My cough and nausea are bad");
        assert_eq!(r.kind, ReplyKind::SymptomMention);
        assert!(r.text.contains("I noticed you mentioned cough, nausea."));
        assert_eq!(r.symptoms.len(), 2);
    }

    #[test]
    fn symptoms_take_precedence_over_greetings() {
        assert_eq!(reply("hello, I get dizziness").kind, ReplyKind::SymptomMention);
    }

    #[test]
    fn greeting_help_thanks_and_default() {
        assert_eq!(reply("Hello there").kind, ReplyKind::Greeting);
        assert_eq!(reply("can you help me").kind, ReplyKind::Help);
        assert_eq!(reply("thanks a lot").kind, ReplyKind::Thanks);
        assert_eq!(reply("what is the weather").kind, ReplyKind::Default);
    }

    #[test]
    fn greeting_keyword_matches_inside_words_in_substring_mode() {
        let catalogue = Catalogue::embedded().unwrap();
        let substring = respond("is this normal", &catalogue, DetectionMode::Substring).unwrap();
        assert_eq!(substring.kind, ReplyKind::Greeting);

        let word = respond("is this normal", &catalogue, DetectionMode::Word).unwrap();
        assert_eq!(word.kind, ReplyKind::Default);
    }

    #[test]
    fn blank_message_is_rejected() {
        let catalogue = Catalogue::embedded().unwrap();
        let err = respond("   ", &catalogue, DetectionMode::Substring).unwrap_err();
        assert!(matches!(err, HealthError::EmptyMessage));
    }

    #[test]
    fn transcript_records_messages_in_order() {
        let at = Local.with_ymd_and_hms(2025, 9, 20, 9, 5, 0).unwrap();
        let mut transcript = ChatTranscript::default();
        transcript.push(Sender::User, "hi", at);
        transcript.push(Sender::Assistant, "Hello!", at);

        assert_eq!(transcript.messages().len(), 2);
        assert_eq!(transcript.messages()[0].sender, Sender::User);
        assert_eq!(transcript.messages()[1].time_label(), "09:05");
    }
}
