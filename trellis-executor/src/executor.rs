//! Concurrent DAG execution.
//!
//! One task per node, launched as its data precedences resolve. The
//! coordinator loop is the single writer of run state: it decides gating
//! and skip propagation, pulls inputs, spawns computes onto the pool, and
//! records completions. Independent nodes run concurrently up to the
//! configured limit; the first failure wins and in-flight tasks are drained
//! before the run returns.

use crate::schedule::Schedule;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use trellis_core::error::{Result, TrellisError};
use trellis_core::graph::{ExecutionState, Graph};
use trellis_core::node::ComputeContext;
use trellis_core::types::NodeId;
use trellis_core::value::Value;

/// Configuration for the executor.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum concurrent node computations per run.
    ///
    /// Higher values increase throughput on wide graphs; 1 gives sequential
    /// execution for debugging.
    pub max_concurrent_nodes: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_nodes: 16,
        }
    }
}

impl ExecutorConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads `TRELLIS_MAX_CONCURRENT_NODES`; anything unset or unparsable
    /// falls back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        let max_concurrent_nodes = std::env::var("TRELLIS_MAX_CONCURRENT_NODES")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(16);
        Self {
            max_concurrent_nodes,
        }
    }

    /// Same as `from_env()`; always returns a valid configuration.
    #[must_use]
    pub fn from_env_or_default() -> Self {
        Self::from_env()
    }

    /// Set the maximum concurrent node computations (at least 1).
    #[must_use]
    pub fn with_max_concurrent_nodes(mut self, max: usize) -> Self {
        self.max_concurrent_nodes = max.max(1);
        self
    }
}

/// Outcome of examining one ready node.
enum Launch {
    /// A compute task was spawned.
    Spawned,
    /// The node finished synchronously (skipped); dependents may release.
    Finished,
}

type ComputeOutcome = (NodeId, std::result::Result<Vec<Value>, String>);

/// The execution engine: runs a graph to completion with parallel fan-out.
#[derive(Debug, Default)]
pub struct Executor {
    config: ExecutorConfig,
}

impl Executor {
    /// Create an executor with the given configuration.
    #[must_use]
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// Execute `graph` to completion.
    ///
    /// Resets all per-run state, analyzes the schedule (aborting on a
    /// cycle), then drives the ready frontier until every node is finished
    /// or the first failure is recorded. On failure the error is returned
    /// and pins whose producers did not complete read as not computed.
    pub async fn execute(&self, graph: &mut Graph) -> Result<()> {
        graph.reset_run_state();
        let schedule = Schedule::analyze(graph)?;
        graph.set_control_edges(schedule.control_edges.clone());

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edges().len(),
            max_concurrent = self.config.max_concurrent_nodes,
            "starting graph run"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_nodes.max(1)));
        let mut tasks: JoinSet<ComputeOutcome> = JoinSet::new();
        let mut remaining: HashMap<NodeId, usize> = schedule.indegree.clone();
        let mut ready: VecDeque<NodeId> = schedule.roots().into();
        let mut in_flight = 0usize;
        let mut first_error: Option<TrellisError> = None;

        loop {
            // Launch everything currently ready, unless a failure already won.
            while first_error.is_none() {
                let Some(id) = ready.pop_front() else { break };
                match self.launch(graph, id, &schedule, &semaphore, &mut tasks) {
                    Ok(Launch::Spawned) => in_flight += 1,
                    Ok(Launch::Finished) => {
                        release_dependents(id, &schedule, &mut remaining, &mut ready);
                    }
                    Err(e) => first_error = Some(e),
                }
            }

            if in_flight == 0 {
                break;
            }
            let Some(joined) = tasks.join_next().await else {
                break;
            };
            in_flight -= 1;

            match joined {
                Ok((id, Ok(outputs))) => {
                    if first_error.is_none() {
                        if let Some(node) = graph.node_mut(id) {
                            node.output_values = outputs;
                            node.state = ExecutionState::Completed;
                        }
                        tracing::debug!(node = %id, "node completed");
                        release_dependents(id, &schedule, &mut remaining, &mut ready);
                    }
                }
                Ok((id, Err(reason))) => {
                    if first_error.is_none() {
                        let type_name = graph
                            .node(id)
                            .map(|n| n.signature().name.clone())
                            .unwrap_or_default();
                        tracing::warn!(node = %id, %reason, "node compute failed");
                        first_error = Some(TrellisError::Compute { type_name, reason });
                    }
                }
                Err(join_error) => {
                    if first_error.is_none() {
                        tracing::warn!(
                            panicked = join_error.is_panic(),
                            "node task did not complete"
                        );
                        first_error = Some(TrellisError::ComputePanic);
                    }
                }
            }
        }

        // Drain to quiescence so no task outlives the run.
        while tasks.join_next().await.is_some() {}

        match first_error {
            Some(error) => Err(error),
            None => {
                tracing::debug!("graph run complete");
                Ok(())
            }
        }
    }

    /// Examine one ready node: gate it, pull its inputs, and either mark it
    /// skipped or spawn its compute task.
    fn launch(
        &self,
        graph: &mut Graph,
        id: NodeId,
        schedule: &Schedule,
        semaphore: &Arc<Semaphore>,
        tasks: &mut JoinSet<ComputeOutcome>,
    ) -> Result<Launch> {
        let bindings = schedule.input_map.get(&id);

        // Gating: the first slot bound to a conditional source decides.
        if let Some(bindings) = bindings {
            let gate = bindings
                .iter()
                .flatten()
                .find(|b| graph.node(b.source).is_some_and(|n| n.is_conditional()));
            if let Some(gate) = gate {
                let required = gate.output == 0;
                let then_value = graph
                    .node(gate.source)
                    .and_then(|n| n.output_values.first())
                    .and_then(Value::as_bool);
                // A branch node without outputs never ran; its targets skip.
                let active = then_value.is_some_and(|v| v == required);
                if !active {
                    mark_skipped(graph, id, "inactive branch");
                    return Ok(Launch::Finished);
                }
            }
        }

        // Pull inputs. Unbound and control-only slots keep their seeds.
        let mut inputs = graph
            .node(id)
            .ok_or(TrellisError::UnknownNode { node_id: id })?
            .input_values
            .clone();
        if let Some(bindings) = bindings {
            for (slot, binding) in bindings.iter().enumerate() {
                let Some(binding) = binding else { continue };
                if binding.control_only {
                    continue;
                }
                let Some(source) = graph.node(binding.source) else {
                    continue;
                };
                if source.state == ExecutionState::Skipped {
                    mark_skipped(graph, id, "upstream skipped");
                    return Ok(Launch::Finished);
                }
                match source.output_values.get(binding.output) {
                    Some(value) => inputs[slot] = value.clone(),
                    None => {
                        return Err(TrellisError::DanglingEdge {
                            node_id: id,
                            input: slot,
                            from_node: binding.source,
                            from_out: binding.output,
                        });
                    }
                }
            }
        }

        let node = graph
            .node_mut(id)
            .ok_or(TrellisError::UnknownNode { node_id: id })?;
        node.input_values = inputs.clone();
        node.state = ExecutionState::Active;

        let node_type = node.node_type().clone();
        let params = node.params.clone();
        let semaphore = Arc::clone(semaphore);
        tasks.spawn(async move {
            let _permit = semaphore
                .acquire()
                .await
                .expect("semaphore should not be closed");
            let ctx = ComputeContext {
                inputs: &inputs,
                params: &params,
            };
            (id, node_type.compute(&ctx))
        });
        Ok(Launch::Spawned)
    }
}

fn mark_skipped(graph: &mut Graph, id: NodeId, why: &str) {
    if let Some(node) = graph.node_mut(id) {
        node.state = ExecutionState::Skipped;
    }
    tracing::debug!(node = %id, why, "node skipped");
}

/// A finished node (completed or skipped) releases one precedence per
/// outgoing edge; targets reaching zero join the ready frontier.
fn release_dependents(
    id: NodeId,
    schedule: &Schedule,
    remaining: &mut HashMap<NodeId, usize>,
    ready: &mut VecDeque<NodeId>,
) {
    if let Some(targets) = schedule.fanout.get(&id) {
        for target in targets {
            if let Some(degree) = remaining.get_mut(target) {
                if *degree > 0 {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push_back(*target);
                    }
                }
            }
        }
    }
}
