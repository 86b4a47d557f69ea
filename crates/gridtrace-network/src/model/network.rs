//! Terminal graph backed by a petgraph `StableGraph`.

use petgraph::stable_graph::StableGraph;
use petgraph::visit::EdgeRef;
use petgraph::Undirected;

use gridtrace_core::types::collections::{FxHashMap, TerminalVec};
use gridtrace_core::NetworkError;

use super::equipment::{Equipment, EquipmentDef, EquipmentId, Terminal, TerminalId};
use crate::step::NetworkTraceStep;

/// How two terminals are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connection {
    /// Both terminals belong to the same equipment.
    Internal,
    /// The terminals share a connectivity node.
    External,
}

/// A network of equipment whose terminals form an undirected graph.
///
/// Every pair of terminals on one equipment is joined by an `Internal` edge;
/// every pair of terminals on one connectivity node by an `External` edge.
#[derive(Debug, Default)]
pub struct NetworkModel {
    graph: StableGraph<Terminal, Connection, Undirected>,
    equipment: Vec<Equipment>,
    /// mRID -> equipment.
    index: FxHashMap<String, EquipmentId>,
    /// Connectivity node id -> terminals on it.
    nodes: FxHashMap<String, TerminalVec<TerminalId>>,
}

impl NetworkModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The terminal graph. Edges only change through `add_equipment` and
    /// `connect`.
    pub fn graph(&self) -> &StableGraph<Terminal, Connection, Undirected> {
        &self.graph
    }

    /// Add an equipment and its terminals. Terminals start unconnected.
    pub fn add_equipment(&mut self, def: EquipmentDef) -> Result<EquipmentId, NetworkError> {
        if self.index.contains_key(&def.mrid) {
            return Err(NetworkError::DuplicateEquipment { mrid: def.mrid });
        }

        let id = EquipmentId(self.equipment.len() as u32);
        let mut terminals = TerminalVec::new();
        for (position, phases) in def.terminal_phases.into_iter().enumerate() {
            let terminal = self.graph.add_node(Terminal {
                equipment: id,
                sequence_number: position + 1,
                phases,
                connectivity_node: None,
            });
            for &other in &terminals {
                self.graph.add_edge(other, terminal, Connection::Internal);
            }
            terminals.push(terminal);
        }

        self.index.insert(def.mrid.clone(), id);
        self.equipment.push(Equipment {
            id,
            mrid: def.mrid,
            name: def.name,
            kind: def.kind,
            nominal_voltage: def.nominal_voltage,
            terminals,
        });
        Ok(id)
    }

    /// Attach terminal `sequence_number` of `mrid` to connectivity node `node_id`.
    pub fn connect(
        &mut self,
        node_id: &str,
        mrid: &str,
        sequence_number: usize,
    ) -> Result<TerminalId, NetworkError> {
        let terminal = self.terminal(mrid, sequence_number)?;
        if let Some(node) = &self.graph[terminal].connectivity_node {
            return Err(NetworkError::AlreadyConnected {
                mrid: mrid.to_string(),
                sequence_number,
                node: node.clone(),
            });
        }

        let peers = self.nodes.entry(node_id.to_string()).or_default();
        for &peer in peers.iter() {
            self.graph.add_edge(peer, terminal, Connection::External);
        }
        peers.push(terminal);
        self.graph[terminal].connectivity_node = Some(node_id.to_string());
        Ok(terminal)
    }

    /// Join two terminals through a connectivity node named after the first.
    /// Nothing changes if either terminal cannot be joined.
    pub fn connect_terminals(
        &mut self,
        (from_mrid, from_seq): (&str, usize),
        (to_mrid, to_seq): (&str, usize),
    ) -> Result<(), NetworkError> {
        let from = self.terminal(from_mrid, from_seq)?;
        let to = self.terminal(to_mrid, to_seq)?;
        if let Some(node) = &self.graph[to].connectivity_node {
            return Err(NetworkError::AlreadyConnected {
                mrid: to_mrid.to_string(),
                sequence_number: to_seq,
                node: node.clone(),
            });
        }
        let node_id = match &self.graph[from].connectivity_node {
            Some(node) => node.clone(),
            None => {
                let node = format!("{from_mrid}-cn{from_seq}");
                self.connect(&node, from_mrid, from_seq)?;
                node
            }
        };
        self.connect(&node_id, to_mrid, to_seq)?;
        Ok(())
    }

    pub fn equipment(&self, mrid: &str) -> Result<&Equipment, NetworkError> {
        self.index
            .get(mrid)
            .and_then(|id| self.equipment.get(id.index()))
            .ok_or_else(|| NetworkError::UnknownEquipment {
                mrid: mrid.to_string(),
            })
    }

    pub fn equipment_at(&self, id: EquipmentId) -> Option<&Equipment> {
        self.equipment.get(id.index())
    }

    pub fn all_equipment(&self) -> impl Iterator<Item = &Equipment> {
        self.equipment.iter()
    }

    pub fn equipment_count(&self) -> usize {
        self.equipment.len()
    }

    pub fn terminal_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Terminal `sequence_number` (1-based) of equipment `mrid`.
    pub fn terminal(&self, mrid: &str, sequence_number: usize) -> Result<TerminalId, NetworkError> {
        self.equipment(mrid)?
            .terminal(sequence_number)
            .ok_or_else(|| NetworkError::UnknownTerminal {
                mrid: mrid.to_string(),
                sequence_number,
            })
    }

    pub fn terminal_at(&self, id: TerminalId) -> Option<&Terminal> {
        self.graph.node_weight(id)
    }

    /// The equipment owning terminal `id`.
    pub fn owner(&self, id: TerminalId) -> Option<&Equipment> {
        self.terminal_at(id)
            .and_then(|terminal| self.equipment_at(terminal.equipment))
    }

    /// `mrid-T<n>` label of a terminal.
    pub fn terminal_label(&self, id: TerminalId) -> Option<String> {
        let terminal = self.terminal_at(id)?;
        let equipment = self.equipment_at(terminal.equipment)?;
        Some(format!("{}-T{}", equipment.mrid, terminal.sequence_number))
    }

    /// Other terminals of the same equipment, in ascending index order.
    pub fn internal_neighbours(&self, id: TerminalId) -> TerminalVec<TerminalId> {
        self.neighbours(id, Connection::Internal)
    }

    /// Terminals sharing a connectivity node with `id`, in ascending index order.
    pub fn external_neighbours(&self, id: TerminalId) -> TerminalVec<TerminalId> {
        self.neighbours(id, Connection::External)
    }

    fn neighbours(&self, id: TerminalId, connection: Connection) -> TerminalVec<TerminalId> {
        let mut found: TerminalVec<TerminalId> = self
            .graph
            .edges(id)
            .filter(|edge| *edge.weight() == connection)
            .map(|edge| {
                if edge.source() == id {
                    edge.target()
                } else {
                    edge.source()
                }
            })
            .collect();
        found.sort_unstable();
        found
    }

    /// Steps that follow `step`: internal hops after an external one, and
    /// external hops after an internal one.
    pub fn next_steps(&self, step: &NetworkTraceStep) -> TerminalVec<NetworkTraceStep> {
        let from = step.to_terminal;
        let candidates = if step.traced_internally {
            self.external_neighbours(from)
        } else {
            self.internal_neighbours(from)
        };

        candidates
            .into_iter()
            .filter_map(|to| {
                let to_equipment = self.terminal_at(to)?.equipment;
                Some(NetworkTraceStep {
                    from_terminal: from,
                    to_terminal: to,
                    from_equipment: step.to_equipment,
                    to_equipment,
                    traced_internally: !step.traced_internally,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EquipmentKind, SinglePhaseKind};

    const ABC: &[SinglePhaseKind] = &[SinglePhaseKind::A, SinglePhaseKind::B, SinglePhaseKind::C];

    fn model() -> NetworkModel {
        let mut model = NetworkModel::new();
        model
            .add_equipment(EquipmentDef::new("c1", EquipmentKind::Conductor).terminals(2, ABC))
            .unwrap();
        model
            .add_equipment(EquipmentDef::new("j1", EquipmentKind::Junction).terminals(3, ABC))
            .unwrap();
        model.connect_terminals(("c1", 2), ("j1", 1)).unwrap();
        model
    }

    #[test]
    fn test_internal_and_external_edges() {
        let model = model();
        let j1 = model.terminal("j1", 1).unwrap();
        assert_eq!(model.internal_neighbours(j1).len(), 2);
        assert_eq!(
            model.external_neighbours(j1).as_slice(),
            &[model.terminal("c1", 2).unwrap()]
        );
    }

    #[test]
    fn test_duplicate_and_unknown_lookups() {
        let mut model = model();
        let err = model
            .add_equipment(EquipmentDef::new("c1", EquipmentKind::Conductor))
            .unwrap_err();
        assert!(matches!(err, NetworkError::DuplicateEquipment { .. }));
        assert!(matches!(
            model.terminal("c1", 3),
            Err(NetworkError::UnknownTerminal { sequence_number: 3, .. })
        ));
        assert!(matches!(
            model.equipment("missing"),
            Err(NetworkError::UnknownEquipment { .. })
        ));
    }

    #[test]
    fn test_terminal_joins_one_node_only() {
        let mut model = model();
        let err = model.connect("elsewhere", "j1", 1).unwrap_err();
        assert!(matches!(err, NetworkError::AlreadyConnected { .. }));
    }

    #[test]
    fn test_failed_connect_terminals_leaves_model_unchanged() {
        let mut model = model();
        model
            .add_equipment(EquipmentDef::new("c2", EquipmentKind::Conductor).terminals(2, ABC))
            .unwrap();
        let edges = model.graph().edge_count();

        let err = model.connect_terminals(("c2", 1), ("j1", 1)).unwrap_err();
        assert!(matches!(err, NetworkError::AlreadyConnected { sequence_number: 1, .. }));
        let c2 = model.terminal("c2", 1).unwrap();
        assert_eq!(model.terminal_at(c2).unwrap().connectivity_node, None);
        assert!(model.external_neighbours(c2).is_empty());
        assert_eq!(model.graph().edge_count(), edges);

        model.connect_terminals(("c2", 1), ("j1", 2)).unwrap();
        assert_eq!(
            model.external_neighbours(c2).as_slice(),
            &[model.terminal("j1", 2).unwrap()]
        );
    }

    #[test]
    fn test_next_steps_alternate_hop_kind() {
        let model = model();
        let c1 = model.equipment("c1").unwrap().id;
        let start = NetworkTraceStep::start_at(model.terminal("c1", 2).unwrap(), c1);

        let external = model.next_steps(&start);
        assert_eq!(external.len(), 1);
        assert!(!external[0].traced_internally);
        assert_eq!(model.terminal_label(external[0].to_terminal).as_deref(), Some("j1-T1"));

        let internal = model.next_steps(&external[0]);
        assert_eq!(internal.len(), 2);
        assert!(internal.iter().all(|step| step.traced_internally));
    }
}
