//! Transcript normalization.
//!
//! The voice platform exposes call transcripts in several shapes depending on
//! which artifact field the record carries. Normalization reduces all of them
//! to a single newline-joined string holding only the two dialogue roles.

use serde::Deserialize;

/// Placeholder used when a call record carries no transcript field at all.
pub const TRANSCRIPT_UNAVAILABLE: &str = "Transcript not available yet.";

/// Raw transcript as delivered by the platform: a delimited string, an array
/// of lines, or an array of role-tagged message objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTranscript {
    Text(String),
    Lines(Vec<String>),
    Messages(Vec<TranscriptMessage>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Normalizes a raw transcript to dialogue-only text.
///
/// Blank entries are removed, the first raw entry is dropped unconditionally
/// (it is the fixed greeting artifact, never candidate speech), and only
/// lines attributable to the two dialogue roles survive, in original order.
pub fn normalize(raw: &RawTranscript) -> String {
    let lines: Vec<String> = match raw {
        RawTranscript::Text(text) => text
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect(),
        RawTranscript::Lines(lines) => lines
            .iter()
            .filter(|line| !line.trim().is_empty())
            .cloned()
            .collect(),
        RawTranscript::Messages(messages) => messages
            .iter()
            .filter_map(|msg| msg.text.as_deref())
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
            .collect(),
    };

    lines
        .into_iter()
        .skip(1)
        .filter(|line| is_dialogue_line(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A line belongs to the dialogue when it is tagged with one of the two
/// conversational role markers.
fn is_dialogue_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("USER:") || trimmed.starts_with("AI:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimited_text_drops_first_entry_and_keeps_roles() {
        let raw = RawTranscript::Text(
            "AI: Hi\nUSER: Hello there\nSYSTEM: joined\nAI: Good to talk".to_string(),
        );
        assert_eq!(normalize(&raw), "USER: Hello there\nAI: Good to talk");
    }

    #[test]
    fn array_of_strings_drops_first_entry() {
        let raw = RawTranscript::Lines(vec![
            "AI: Hi".to_string(),
            "USER: I applied last week".to_string(),
            "AI: Great".to_string(),
        ]);
        assert_eq!(normalize(&raw), "USER: I applied last week\nAI: Great");
    }

    #[test]
    fn role_tagged_messages_preserve_order() {
        let raw = RawTranscript::Messages(vec![
            TranscriptMessage {
                role: Some("assistant".to_string()),
                text: Some("AI: Hi".to_string()),
            },
            TranscriptMessage {
                role: Some("user".to_string()),
                text: Some("USER: Hello".to_string()),
            },
            TranscriptMessage {
                role: None,
                text: None,
            },
            TranscriptMessage {
                role: Some("assistant".to_string()),
                text: Some("AI: Thanks for your time".to_string()),
            },
        ]);
        assert_eq!(normalize(&raw), "USER: Hello\nAI: Thanks for your time");
    }

    #[test]
    fn blank_lines_are_removed_before_the_first_entry_is_dropped() {
        let raw = RawTranscript::Text("\n\nAI: Hi\nUSER: Hello".to_string());
        assert_eq!(normalize(&raw), "USER: Hello");
    }

    #[test]
    fn non_dialogue_lines_are_filtered() {
        let raw = RawTranscript::Text(
            "AI: Hi\n[recording started]\nUSER: Hello\nnote to self".to_string(),
        );
        assert_eq!(normalize(&raw), "USER: Hello");
    }

    #[test]
    fn untagged_deserialization_picks_the_right_shape() {
        let text: RawTranscript = serde_json::from_str("\"AI: Hi\\nUSER: Yo\"").unwrap();
        assert!(matches!(text, RawTranscript::Text(_)));

        let lines: RawTranscript = serde_json::from_str("[\"AI: Hi\", \"USER: Yo\"]").unwrap();
        assert!(matches!(lines, RawTranscript::Lines(_)));

        let messages: RawTranscript =
            serde_json::from_str("[{\"role\": \"user\", \"text\": \"USER: Yo\"}]").unwrap();
        assert!(matches!(messages, RawTranscript::Messages(_)));
    }
}
