//! Owns the per-run predictor state: step functions, counts, and the derived index.

use tracing::instrument;

use crate::error::TraceError;

use super::format;
use super::step::{step_functions, StepFunction};
use super::{History, COUNT_THRESHOLD, NUM_HISTORIES, NUM_OPCODES};

/// Accumulates trace statistics and renders the resulting predictor table.
///
/// Replaces the original generator's file-scope `step_functions`/`counts` statics with an
/// owned value so a process can build more than one predictor without restarting, and so
/// tests don't share mutable global state.
pub struct PredictorBuilder {
    steps: [StepFunction; NUM_OPCODES],
    counts: Vec<[u64; NUM_OPCODES]>,
}

impl Default for PredictorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictorBuilder {
    /// A fresh builder: step functions derived, all counts zero.
    pub fn new() -> Self {
        Self {
            steps: step_functions(),
            counts: vec![[0u64; NUM_OPCODES]; NUM_HISTORIES],
        }
    }

    /// Fold `trace` into the count table, starting from history zero.
    ///
    /// Rejects any byte `>= NUM_OPCODES` as a corrupt trace; the counts accumulated from
    /// bytes read before the offending one are left in place, matching the original's
    /// `assert`-and-abort behavior (the whole run is fatal either way).
    #[instrument(level = "debug", skip(self, trace), fields(len = trace.len()))]
    pub fn read_trace(&mut self, trace: &[u8]) -> Result<(), TraceError> {
        tracing::info!(trace_len = trace.len(), "counting pass starting");
        let mut history: History = 0;
        for &opcode in trace {
            if opcode as usize >= NUM_OPCODES {
                return Err(TraceError::InvalidOpcode { opcode });
            }
            self.counts[history as usize][opcode as usize] += 1;
            history = self.steps[opcode as usize].apply(history);
        }
        tracing::info!(trace_len = trace.len(), "counting pass complete");
        Ok(())
    }

    /// Compute the dense common-history index: `Some(id)` for histories whose total
    /// successor count meets [`COUNT_THRESHOLD`], `None` otherwise. Ids are assigned
    /// ascending in `history` order.
    pub fn index_histories(&self) -> Vec<i64> {
        tracing::info!("indexing pass starting");
        let mut index = vec![-1i64; NUM_HISTORIES];
        let mut next_common_id: i64 = 0;
        for (history, row) in self.counts.iter().enumerate() {
            let total: u64 = row.iter().sum();
            if total >= COUNT_THRESHOLD {
                index[history] = next_common_id;
                next_common_id += 1;
            }
        }
        tracing::info!(common_histories = next_common_id, "indexing pass complete");
        index
    }

    /// Number of common histories, per the current counts.
    pub fn num_common_histories(&self) -> usize {
        self.index_histories().into_iter().filter(|&id| id != -1).count()
    }

    /// Render the accumulated statistics as the legacy predictor-file text.
    #[instrument(level = "debug", skip(self))]
    pub fn build(&self) -> String {
        tracing::info!("emission pass starting");
        let index = self.index_histories();
        let common_histories = index.iter().filter(|&&id| id != -1).count();
        let rendered = format::emit(&self.steps, &self.counts, &index);
        tracing::info!(common_histories, "emission pass complete");
        rendered
    }
}
