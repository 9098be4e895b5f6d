//! Serves recorded interactions back in call order.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Replays a cassette with one queue per `port::method` pair, so calls on
/// different methods do not need to interleave exactly as recorded.
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Indexes a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Takes the next recorded interaction for `port::method`.
    ///
    /// # Panics
    ///
    /// Panics when the cassette holds no (more) interactions for the pair; a
    /// replayed run that diverges from its recording is a test failure.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let known: Vec<String> = self
            .queues
            .keys()
            .map(|(p, m)| format!("{p}::{m}"))
            .collect();
        let Some(queue) = self.queues.get_mut(&(port.to_string(), method.to_string())) else {
            panic!(
                "Cassette exhausted: no interactions recorded for {port}::{method}. \
                 Recorded pairs: [{}]",
                known.join(", ")
            );
        };
        queue.pop_front().unwrap_or_else(|| {
            panic!("Cassette exhausted: every {port}::{method} interaction was already served")
        })
    }

    /// Number of interactions not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }
}
