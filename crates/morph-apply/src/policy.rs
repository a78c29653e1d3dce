//! Mutation policy
//!
//! Per container kind: which mutation kinds are legal, how keys address
//! elements, and the briefing handed to the edit proposer.

use morph_mutation::{ContainerKind, MutationKey, MutationKind, SchemaVariant};
use serde_json::Value as JsonValue;

/// How keys address elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// String property names
    Named,
    /// 0-based integer positions
    Indexed,
}

/// Rules for one container kind
///
/// Pure function of [`ContainerKind`]; no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationPolicy {
    kind: ContainerKind,
    allowed: &'static [MutationKind],
    addressing: Addressing,
    set_inserts: bool,
}

impl MutationPolicy {
    pub const MAPPING: Self = Self {
        kind: ContainerKind::Mapping,
        allowed: &MutationKind::ALL,
        addressing: Addressing::Named,
        set_inserts: true,
    };

    pub const SET: Self = Self {
        kind: ContainerKind::Set,
        allowed: &MutationKind::ALL,
        addressing: Addressing::Indexed,
        set_inserts: false,
    };

    pub const SEQUENCE: Self = Self {
        kind: ContainerKind::Sequence,
        allowed: &MutationKind::ALL,
        addressing: Addressing::Indexed,
        set_inserts: false,
    };

    pub const RECORD: Self = Self {
        kind: ContainerKind::Record,
        allowed: &[MutationKind::Set],
        addressing: Addressing::Named,
        set_inserts: false,
    };

    /// Policy for a container kind
    #[inline]
    #[must_use]
    pub fn for_kind(kind: ContainerKind) -> Self {
        match kind {
            ContainerKind::Mapping => Self::MAPPING,
            ContainerKind::Set => Self::SET,
            ContainerKind::Sequence => Self::SEQUENCE,
            ContainerKind::Record => Self::RECORD,
        }
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Permitted mutation kinds
    #[inline]
    #[must_use]
    pub fn allowed(&self) -> &'static [MutationKind] {
        self.allowed
    }

    #[inline]
    #[must_use]
    pub fn allows(&self, kind: MutationKind) -> bool {
        self.allowed.contains(&kind)
    }

    #[inline]
    #[must_use]
    pub fn addressing(&self) -> Addressing {
        self.addressing
    }

    /// Whether `set` on an absent key inserts instead of failing
    #[inline]
    #[must_use]
    pub fn set_inserts(&self) -> bool {
        self.set_inserts
    }

    /// Reply schema the proposer must follow
    #[inline]
    #[must_use]
    pub fn schema_variant(&self) -> SchemaVariant {
        self.kind.schema_variant()
    }

    /// Check that a key uses this policy's addressing style
    #[inline]
    #[must_use]
    pub fn accepts_key(&self, key: &MutationKey) -> bool {
        match self.addressing {
            Addressing::Named => !key.is_index(),
            Addressing::Indexed => key.is_index(),
        }
    }

    /// Briefing text describing these rules
    #[must_use]
    pub fn briefing(&self) -> String {
        Briefing::new(*self).render()
    }
}

/// Builder for the proposer briefing
///
/// Caller-supplied context goes first, then the policy rules, then the
/// optional record schema.
#[derive(Debug, Clone)]
pub struct Briefing<'a> {
    policy: MutationPolicy,
    extra: Option<&'a str>,
    record_schema: Option<&'a JsonValue>,
}

impl<'a> Briefing<'a> {
    #[inline]
    #[must_use]
    pub fn new(policy: MutationPolicy) -> Self {
        Self {
            policy,
            extra: None,
            record_schema: None,
        }
    }

    /// Prepend caller context
    #[inline]
    #[must_use]
    pub fn with_extra(mut self, extra: Option<&'a str>) -> Self {
        self.extra = extra.filter(|text| !text.trim().is_empty());
        self
    }

    /// Append the record's JSON schema
    #[inline]
    #[must_use]
    pub fn with_record_schema(mut self, schema: Option<&'a JsonValue>) -> Self {
        self.record_schema = schema;
        self
    }

    /// Render the briefing
    #[must_use]
    pub fn render(&self) -> String {
        let label = self.policy.kind.label();
        let mut lines = vec![
            format!(
                "You are an expert {label} mutator. Your goal is to mutate the user's {label} \
                 according to the user's message."
            ),
            format!(
                "You will be given the user's {label}. Output the mutations needed to update it."
            ),
            "Touch each element at most once. Never delete an element and add it back; \
             use 'set' instead."
                .to_string(),
            "Mutations must match the given schema.".to_string(),
        ];

        lines.push(match self.policy.allowed {
            [MutationKind::Set] => "Only 'set' mutations are allowed.".to_string(),
            allowed => format!(
                "Allowed mutations: {}.",
                allowed
                    .iter()
                    .map(|kind| format!("'{kind}'"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        });

        lines.push(match self.policy.addressing {
            Addressing::Named => format!(
                "Keys must be string property names of the {label}; integer keys are not allowed."
            ),
            Addressing::Indexed => format!(
                "Keys must be integer positions (0-indexed) of elements in the {label}; \
                 string keys are not allowed."
            ),
        });

        if self.policy.allows(MutationKind::Add) {
            lines.push("An 'add' mutation appends a new element; its key is ignored.".to_string());
        }
        if !self.policy.set_inserts {
            lines.push("A 'set' key must refer to an element that already exists.".to_string());
        }

        let mut text = lines.join("\n");
        if let Some(extra) = self.extra {
            text = format!("{extra}\n\n{text}");
        }
        if let Some(schema) = self.record_schema {
            text = format!("{text}\n\nUser's record schema:\n{schema}");
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn policy_table() {
        assert!(MutationPolicy::MAPPING.allows(MutationKind::Add));
        assert!(MutationPolicy::SET.allows(MutationKind::Delete));
        assert!(MutationPolicy::SEQUENCE.allows(MutationKind::Set));
        assert!(MutationPolicy::RECORD.allows(MutationKind::Set));
        assert!(!MutationPolicy::RECORD.allows(MutationKind::Add));
        assert!(!MutationPolicy::RECORD.allows(MutationKind::Delete));
    }

    #[test]
    fn for_kind_matches_constants() {
        for kind in [
            ContainerKind::Mapping,
            ContainerKind::Set,
            ContainerKind::Sequence,
            ContainerKind::Record,
        ] {
            assert_eq!(MutationPolicy::for_kind(kind).kind(), kind);
        }
    }

    #[test]
    fn key_styles() {
        assert!(MutationPolicy::RECORD.accepts_key(&"name".into()));
        assert!(!MutationPolicy::RECORD.accepts_key(&MutationKey::Index(0)));
        assert!(MutationPolicy::SET.accepts_key(&MutationKey::Index(0)));
        assert!(!MutationPolicy::SEQUENCE.accepts_key(&"0".into()));
    }

    #[test]
    fn only_mappings_insert_on_set() {
        assert!(MutationPolicy::MAPPING.set_inserts());
        assert!(!MutationPolicy::SET.set_inserts());
        assert!(!MutationPolicy::SEQUENCE.set_inserts());
        assert!(!MutationPolicy::RECORD.set_inserts());
    }

    #[test]
    fn record_briefing_restricts_to_set_and_named_keys() {
        let text = MutationPolicy::RECORD.briefing();
        assert!(text.contains("Only 'set' mutations are allowed."));
        assert!(text.contains("integer keys are not allowed"));
        assert!(!text.contains("'add' mutation appends"));
    }

    #[test]
    fn sequence_briefing_describes_positions_and_add() {
        let text = MutationPolicy::SEQUENCE.briefing();
        assert!(text.contains("expert sequence mutator"));
        assert!(text.contains("0-indexed"));
        assert!(text.contains("string keys are not allowed"));
        assert!(text.contains("'add' mutation appends a new element"));
        assert!(text.contains("Allowed mutations: 'add', 'set', 'delete'."));
    }

    #[test]
    fn briefing_carries_once_only_and_no_delete_readd_rules() {
        let text = MutationPolicy::MAPPING.briefing();
        assert!(text.contains("at most once"));
        assert!(text.contains("use 'set' instead"));
        assert!(text.contains("match the given schema"));
    }

    #[test]
    fn extra_context_goes_first_and_schema_last() {
        let schema = json!({"type": "object"});
        let text = Briefing::new(MutationPolicy::RECORD)
            .with_extra(Some("Facts about the user."))
            .with_record_schema(Some(&schema))
            .render();
        assert!(text.starts_with("Facts about the user.\n\nYou are an expert record mutator."));
        assert!(text.ends_with("User's record schema:\n{\"type\":\"object\"}"));
    }

    #[test]
    fn blank_extra_is_ignored() {
        let text = Briefing::new(MutationPolicy::SET).with_extra(Some("  ")).render();
        assert!(text.starts_with("You are an expert set mutator."));
    }
}
