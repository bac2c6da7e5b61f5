use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::gateway::{Action, Gateway, Outcome, Payload};

/// Gateway for tests. Replays queued outcomes per action and records
/// every request it receives.
///
/// An action with nothing queued answers with a transport failure.
#[derive(Default)]
pub struct ScriptedGateway {
    responses: Mutex<HashMap<Action, VecDeque<Outcome>>>,
    requests: Mutex<Vec<(Action, Payload)>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `outcome` as the next answer for `action`.
    pub fn respond(&self, action: Action, outcome: Outcome) {
        self.responses
            .lock()
            .unwrap()
            .entry(action)
            .or_default()
            .push_back(outcome);
    }

    pub fn requests(&self) -> Vec<(Action, Payload)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Gateway for ScriptedGateway {
    async fn submit(&self, action: Action, payload: &Payload) -> Outcome {
        self.requests.lock().unwrap().push((action, payload.clone()));
        self.responses
            .lock()
            .unwrap()
            .get_mut(&action)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Outcome::transport_failure("no scripted response"))
    }
}
