//! Dependency graph over the output registry.
//!
//! Built once from the static dependency tables in [`crate::outputs`], the
//! graph provides two things the engine needs: a topological evaluation
//! order for recompute passes, and the downstream closure of an input or
//! output for stale marking.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{EngineError, EngineResult};
use crate::inputs::InputId;
use crate::outputs::{Dep, OutputId};

/// Static dependency graph of all derived outputs.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Outputs that read each input directly.
    input_readers: HashMap<InputId, Vec<OutputId>>,
    /// Outputs that read each output directly.
    output_readers: HashMap<OutputId, Vec<OutputId>>,
    /// Topological evaluation order over all outputs.
    order: Vec<OutputId>,
}

impl DependencyGraph {
    /// Build the graph from the declared dependency tables.
    ///
    /// Returns an error if the tables contain a cycle; with static tables
    /// this means a programming mistake in the registry.
    pub fn build() -> EngineResult<Self> {
        let mut input_readers: HashMap<InputId, Vec<OutputId>> = HashMap::new();
        let mut output_readers: HashMap<OutputId, Vec<OutputId>> = HashMap::new();
        let mut in_degree: HashMap<OutputId, usize> = HashMap::new();

        for id in OutputId::ALL {
            in_degree.insert(id, 0);
        }

        for id in OutputId::ALL {
            for dep in id.deps() {
                match dep {
                    Dep::In(input) => {
                        input_readers.entry(*input).or_default().push(id);
                    }
                    Dep::Out(upstream) => {
                        output_readers.entry(*upstream).or_default().push(id);
                        *in_degree
                            .get_mut(&id)
                            .ok_or(EngineError::Graph {
                                what: "output missing from registry".to_string(),
                            })? += 1;
                    }
                }
            }
        }

        // Kahn's algorithm. Seeding from OutputId::ALL keeps the order
        // deterministic across runs.
        let mut queue: VecDeque<OutputId> = OutputId::ALL
            .iter()
            .copied()
            .filter(|id| in_degree[id] == 0)
            .collect();

        let mut order = Vec::with_capacity(OutputId::ALL.len());

        while let Some(id) = queue.pop_front() {
            order.push(id);

            if let Some(readers) = output_readers.get(&id) {
                for reader in readers.clone() {
                    let deg = in_degree.get_mut(&reader).ok_or(EngineError::Graph {
                        what: "reader missing from registry".to_string(),
                    })?;
                    *deg -= 1;
                    if *deg == 0 {
                        queue.push_back(reader);
                    }
                }
            }
        }

        if order.len() != OutputId::ALL.len() {
            return Err(EngineError::Graph {
                what: "dependency tables contain a cycle".to_string(),
            });
        }

        Ok(Self {
            input_readers,
            output_readers,
            order,
        })
    }

    /// Topological evaluation order over all outputs.
    pub fn order(&self) -> &[OutputId] {
        &self.order
    }

    /// Every output downstream of `input`, directly or transitively,
    /// returned in evaluation order.
    pub fn downstream_of_input(&self, input: InputId) -> Vec<OutputId> {
        let seeds = self
            .input_readers
            .get(&input)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        self.closure(seeds)
    }

    fn closure(&self, seeds: &[OutputId]) -> Vec<OutputId> {
        let mut reached: HashSet<OutputId> = HashSet::new();
        let mut queue: VecDeque<OutputId> = seeds.iter().copied().collect();

        while let Some(id) = queue.pop_front() {
            if !reached.insert(id) {
                continue;
            }
            if let Some(readers) = self.output_readers.get(&id) {
                queue.extend(readers.iter().copied());
            }
        }

        self.order
            .iter()
            .copied()
            .filter(|id| reached.contains(id))
            .collect()
    }
}
