//! Recipient resolution for chat messages.
//!
//! Sending tools accept either a free-text `recipients` string of
//! comma-separated names or a pre-resolved `mentions` JSON array. The
//! free-text path resolves names against the chat's current participant
//! list; resolution is all-or-nothing, so either every requested name
//! maps to a participant or nothing is sent.

use crate::client::types::{Mention, Participant};
use anyhow::{anyhow, bail, Result};
use std::collections::HashMap;

/// Whether a send operation may go out with no mentions at all.
///
/// `Required` rejects a call that names nobody and points the caller at
/// the participant listing. `Optional` treats an absent recipient list
/// as a broadcast with an empty mention array. The two variants also
/// phrase unmatched-name errors differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionPolicy {
    Required,
    Optional,
}

/// Outcome of inspecting the caller's recipient arguments before any
/// network traffic. `Ready` means no participant fetch is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MentionPlan {
    Ready(Vec<Mention>),
    Lookup(Vec<String>),
}

/// Case-insensitive name lookup over one snapshot of a chat's
/// participants. Each participant is indexed under every candidate name
/// it carries; when two participants share a candidate name the later
/// one silently wins.
#[derive(Debug)]
pub struct NameIndex {
    by_name: HashMap<String, Mention>,
    order: Vec<String>,
}

impl NameIndex {
    pub fn build(participants: &[Participant]) -> Self {
        let mut by_name: HashMap<String, Mention> = HashMap::new();
        let mut order: Vec<String> = Vec::new();
        for participant in participants {
            let mention = Mention {
                id: participant.id.clone(),
                name: participant.display_name(),
            };
            for candidate in participant.index_names() {
                let key = candidate.to_lowercase();
                if !by_name.contains_key(&key) {
                    order.push(key.clone());
                }
                by_name.insert(key, mention.clone());
            }
        }
        Self { by_name, order }
    }

    /// Resolves every requested name or fails without returning a
    /// partial list. The mention `name` is the participant's display
    /// name at resolution time, not the caller's spelling.
    pub fn resolve_all(&self, names: &[String], policy: MentionPolicy) -> Result<Vec<Mention>> {
        let mut resolved = Vec::with_capacity(names.len());
        let mut unmatched: Vec<String> = Vec::new();
        for name in names {
            match self.by_name.get(&name.to_lowercase()) {
                Some(mention) => resolved.push(mention.clone()),
                None => unmatched.push(name.clone()),
            }
        }
        if !unmatched.is_empty() {
            let unmatched = unmatched.join(", ");
            let available = self.available();
            return Err(match policy {
                MentionPolicy::Required => anyhow!(
                    "Could not find participants: {}. Available participants: {}",
                    unmatched,
                    available
                ),
                MentionPolicy::Optional => {
                    anyhow!("Not found: {}. Available: {}", unmatched, available)
                }
            });
        }
        Ok(resolved)
    }

    /// All indexed names, lower-cased, in the order they were first
    /// inserted. Used for the hint in unmatched-name errors.
    pub fn available(&self) -> String {
        self.order.join(", ")
    }
}

/// Splits a comma-separated recipient string into trimmed, non-empty
/// names, preserving the caller's order and casing.
pub fn split_recipients(recipients: &str) -> Result<Vec<String>> {
    let names: Vec<String> = recipients
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        bail!("recipients cannot be empty");
    }
    Ok(names)
}

/// Parses a pre-resolved mentions JSON array. Each entry must carry
/// both `id` and `name`; extra keys are ignored.
pub fn parse_mentions(raw: &str) -> Result<Vec<Mention>> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| anyhow!("Invalid JSON for mentions: {}", e))?;
    serde_json::from_value(value).map_err(|e| anyhow!("Missing required field in mentions: {}", e))
}

/// Decides how to obtain the mention list from the caller's arguments.
///
/// Pre-resolved `mentions` win over `recipients` when both are given;
/// the dropped argument is logged rather than silently discarded. When
/// neither is given the policy decides between a broadcast and an error
/// telling the caller how to address someone.
pub fn plan_mentions(
    chat_id: &str,
    recipients: Option<&str>,
    mentions: Option<&str>,
    policy: MentionPolicy,
) -> Result<MentionPlan> {
    match (mentions, recipients) {
        (Some(raw), ignored) => {
            if let Some(recipients) = ignored {
                tracing::warn!(
                    "[Mentions] Both recipients and mentions provided; using mentions and ignoring recipients='{}'",
                    recipients
                );
            }
            Ok(MentionPlan::Ready(parse_mentions(raw)?))
        }
        (None, Some(raw)) => Ok(MentionPlan::Lookup(split_recipients(raw)?)),
        (None, None) => match policy {
            MentionPolicy::Required => Err(anyhow!(
                "Missing recipients or mentions. To send a message, specify who to tag. \
                 Use recipients='name1,name2' (names) or \
                 mentions='[{{\"id\":\"uuid\",\"name\":\"display_name\"}}]' (IDs). \
                 Call listAgentChatParticipants(chatId='{}') to see available participants.",
                chat_id
            )),
            MentionPolicy::Optional => Ok(MentionPlan::Ready(Vec::new())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::types::ParticipantType;

    fn agent(id: &str, name: &str) -> Participant {
        Participant {
            id: id.to_string(),
            participant_type: ParticipantType::Agent,
            role: None,
            status: None,
            agent_name: Some(name.to_string()),
            first_name: None,
            last_name: None,
            username: None,
        }
    }

    fn user(id: &str, first: &str, last: &str, username: &str) -> Participant {
        Participant {
            id: id.to_string(),
            participant_type: ParticipantType::User,
            role: None,
            status: None,
            agent_name: None,
            first_name: if first.is_empty() { None } else { Some(first.to_string()) },
            last_name: if last.is_empty() { None } else { Some(last.to_string()) },
            username: if username.is_empty() { None } else { Some(username.to_string()) },
        }
    }

    #[test]
    fn test_resolution_is_case_insensitive() {
        let index = NameIndex::build(&[agent("a1", "Weather Agent")]);
        let resolved = index
            .resolve_all(&["WEATHER AGENT".to_string()], MentionPolicy::Required)
            .unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "a1");
        assert_eq!(resolved[0].name, "Weather Agent");
    }

    #[test]
    fn test_unmatched_name_fails_without_partial_result() {
        let index = NameIndex::build(&[agent("a1", "Alice"), agent("a2", "Bob")]);
        let err = index
            .resolve_all(
                &["Alice".to_string(), "Carol".to_string()],
                MentionPolicy::Required,
            )
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Could not find participants: Carol"));
        assert!(message.contains("Available participants: alice, bob"));
    }

    #[test]
    fn test_unmatched_name_user_variant_wording() {
        let index = NameIndex::build(&[agent("a1", "Alice")]);
        let err = index
            .resolve_all(&["Carol".to_string()], MentionPolicy::Optional)
            .unwrap_err();
        assert_eq!(err.to_string(), "Not found: Carol. Available: alice");
    }

    #[test]
    fn test_request_order_is_preserved() {
        let index = NameIndex::build(&[agent("a1", "Agent One"), agent("a2", "Agent Two")]);
        let resolved = index
            .resolve_all(
                &["Agent Two".to_string(), "Agent One".to_string()],
                MentionPolicy::Required,
            )
            .unwrap();
        let ids: Vec<&str> = resolved.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a2", "a1"]);
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let index = NameIndex::build(&[user("P-42", "", "", "")]);
        let resolved = index
            .resolve_all(&["p-42".to_string()], MentionPolicy::Required)
            .unwrap();
        assert_eq!(resolved[0].id, "P-42");
        assert_eq!(resolved[0].name, "P-42");
    }

    #[test]
    fn test_participant_is_indexed_under_every_candidate_name() {
        let index = NameIndex::build(&[user("u1", "Ada", "Lovelace", "ada_l")]);
        for name in ["Ada Lovelace", "ada", "ADA_L"] {
            let resolved = index
                .resolve_all(&[name.to_string()], MentionPolicy::Required)
                .unwrap();
            assert_eq!(resolved[0].id, "u1");
            assert_eq!(resolved[0].name, "Ada Lovelace");
        }
    }

    #[test]
    fn test_colliding_name_last_participant_wins() {
        let index = NameIndex::build(&[agent("a1", "Alice"), agent("a2", "Alice")]);
        let resolved = index
            .resolve_all(&["alice".to_string()], MentionPolicy::Required)
            .unwrap();
        assert_eq!(resolved[0].id, "a2");
        assert_eq!(index.available(), "alice");
    }

    #[test]
    fn test_split_recipients_trims_and_drops_empties() {
        let names = split_recipients(" Alice , Bob ,, ").unwrap();
        assert_eq!(names, vec!["Alice".to_string(), "Bob".to_string()]);
    }

    #[test]
    fn test_empty_recipients_is_rejected() {
        for raw in ["", "   ", ",,,", " , , "] {
            let err = split_recipients(raw).unwrap_err();
            assert_eq!(err.to_string(), "recipients cannot be empty");
        }
    }

    #[test]
    fn test_parse_mentions_round_trip() {
        let mentions = parse_mentions(r#"[{"id":"u1","name":"Alice"}]"#).unwrap();
        assert_eq!(
            mentions,
            vec![Mention {
                id: "u1".to_string(),
                name: "Alice".to_string()
            }]
        );
    }

    #[test]
    fn test_parse_mentions_rejects_malformed_json() {
        let err = parse_mentions("not json").unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON for mentions:"));
    }

    #[test]
    fn test_parse_mentions_rejects_missing_fields() {
        let err = parse_mentions(r#"[{"id":"u1"}]"#).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Missing required field in mentions:"));
        assert!(message.contains("name"));
    }

    #[test]
    fn test_plan_prefers_mentions_over_recipients() {
        let plan = plan_mentions(
            "chat-1",
            Some("Alice,Bob"),
            Some(r#"[{"id":"u9","name":"Zed"}]"#),
            MentionPolicy::Required,
        )
        .unwrap();
        match plan {
            MentionPlan::Ready(mentions) => {
                assert_eq!(mentions.len(), 1);
                assert_eq!(mentions[0].id, "u9");
            }
            MentionPlan::Lookup(_) => panic!("mentions should bypass the lookup path"),
        }
    }

    #[test]
    fn test_plan_with_recipients_requires_lookup() {
        let plan = plan_mentions("chat-1", Some("Alice, Bob"), None, MentionPolicy::Required)
            .unwrap();
        assert_eq!(
            plan,
            MentionPlan::Lookup(vec!["Alice".to_string(), "Bob".to_string()])
        );
    }

    #[test]
    fn test_plan_with_neither_required_names_the_listing_tool() {
        let err = plan_mentions("chat-7", None, None, MentionPolicy::Required).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Missing recipients or mentions."));
        assert!(message.contains("listAgentChatParticipants(chatId='chat-7')"));
    }

    #[test]
    fn test_plan_with_neither_optional_broadcasts() {
        let plan = plan_mentions("chat-7", None, None, MentionPolicy::Optional).unwrap();
        assert_eq!(plan, MentionPlan::Ready(Vec::new()));
    }

    #[test]
    fn test_empty_mentions_array_is_allowed_even_when_required() {
        let plan = plan_mentions("chat-1", None, Some("[]"), MentionPolicy::Required).unwrap();
        assert_eq!(plan, MentionPlan::Ready(Vec::new()));
    }
}
