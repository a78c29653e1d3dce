//! Testing utilities for morph workspace
//!
//! Shared test helpers, fixtures, and a scripted edit proposer.

#![allow(missing_docs)]

use std::collections::VecDeque;

use async_trait::async_trait;
use morph_container::{Mapping, Sequence, ValueSet};
use morph_core::{EditProposer, ProposalError, ProposalRequest};
use morph_mutation::Mutation;
use parking_lot::Mutex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Edit proposer that replays scripted replies in order
///
/// Every request is recorded. Running out of replies is a
/// [`ProposalError::Unavailable`].
#[derive(Debug, Default)]
pub struct ScriptedProposer {
    replies: Mutex<VecDeque<Result<Vec<Mutation>, ProposalError>>>,
    requests: Mutex<Vec<ProposalRequest>>,
}

impl ScriptedProposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Proposer with a single successful reply
    pub fn replying(mutations: Vec<Mutation>) -> Self {
        Self::new().then_reply(mutations)
    }

    /// Proposer that fails once with `error`
    pub fn failing(error: ProposalError) -> Self {
        Self::new().then_fail(error)
    }

    pub fn then_reply(self, mutations: Vec<Mutation>) -> Self {
        self.replies.lock().push_back(Ok(mutations));
        self
    }

    pub fn then_fail(self, error: ProposalError) -> Self {
        self.replies.lock().push_back(Err(error));
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ProposalRequest> {
        self.requests.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn last_request(&self) -> Option<ProposalRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl EditProposer for ScriptedProposer {
    async fn propose(&self, request: ProposalRequest) -> Result<Vec<Mutation>, ProposalError> {
        self.requests.lock().push(request);
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ProposalError::Unavailable("script exhausted".to_string())))
    }
}

/// Record fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Person {
    pub name: String,
    pub age: u32,
    pub color: String,
    pub is_student: bool,
}

pub fn john() -> Person {
    Person {
        name: "John".to_string(),
        age: 25,
        color: "blue".to_string(),
        is_student: true,
    }
}

/// `{"a": 1, "b": 2}`
pub fn sample_mapping() -> Mapping {
    [("a".to_string(), json!(1)), ("b".to_string(), json!(2))]
        .into_iter()
        .collect()
}

/// `[10, 20, 30]`
pub fn sample_sequence() -> Sequence {
    vec![json!(10), json!(20), json!(30)]
}

pub fn value_set(items: &[Value]) -> ValueSet {
    items.iter().cloned().collect()
}

/// Install a test subscriber honoring `RUST_LOG`; repeated calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
