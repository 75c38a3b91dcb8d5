use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;

use crate::core::event_data::Activity;

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialOrd, Ord)]
/// Place ID
///
/// Places carry no identity besides their position: the distinguished source and sink places,
/// and the inner places numbered in the order in which they were added.
pub enum PlaceID {
    /// The unique source place (start of the workflow net)
    Source,
    /// Inner place at the given position
    Inner(usize),
    /// The unique sink place (end of the workflow net)
    Sink,
}

impl Display for PlaceID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaceID::Source => write!(f, "source"),
            PlaceID::Inner(i) => write!(f, "p{i}"),
            PlaceID::Sink => write!(f, "sink"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(tag = "type", content = "nodes")]
/// Arc in a [`WorkflowNet`]
///
/// Connecting a place and a transition (i.e., an [`Activity`]), or the other way around
pub enum Arc {
    /// From Place to Transition
    PlaceTransition(PlaceID, Activity),
    /// From Transition to Place
    TransitionPlace(Activity, PlaceID),
}

impl Arc {
    /// Create new from place to transition
    pub fn place_to_transition<A: Into<Activity>>(from: PlaceID, to: A) -> Arc {
        Arc::PlaceTransition(from, to.into())
    }
    /// Create new from transition to place
    pub fn transition_to_place<A: Into<Activity>>(from: A, to: PlaceID) -> Arc {
        Arc::TransitionPlace(from.into(), to)
    }
    /// The place this arc starts or ends in
    pub fn place(&self) -> PlaceID {
        match self {
            Arc::PlaceTransition(p, _) | Arc::TransitionPlace(_, p) => *p,
        }
    }
    /// The transition this arc starts or ends in
    pub fn transition(&self) -> &Activity {
        match self {
            Arc::PlaceTransition(_, t) | Arc::TransitionPlace(t, _) => t,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Node of the graph view of a [`WorkflowNet`] (see [`WorkflowNet::to_graph`])
pub enum WorkflowNetNode {
    /// A place
    Place(PlaceID),
    /// A transition, labeled with its activity
    Transition(Activity),
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
///
/// A workflow net: activities (transitions), places and the flow relation ([`Arc`]s) connecting them
///
/// A net always contains the [`PlaceID::Source`] and [`PlaceID::Sink`] place.
/// No soundness is implied: the net is a syntactic structure.
pub struct WorkflowNet {
    /// Activity universe (transitions)
    pub activities: BTreeSet<Activity>,
    /// Places: source place first, sink place last
    pub places: Vec<PlaceID>,
    /// Flow relation
    pub arcs: Vec<Arc>,
}

impl Default for WorkflowNet {
    fn default() -> Self {
        Self::new(BTreeSet::new())
    }
}

impl WorkflowNet {
    /// Create new [`WorkflowNet`] over the given activities, with only the source and sink place
    pub fn new(activities: BTreeSet<Activity>) -> Self {
        Self {
            activities,
            places: vec![PlaceID::Source, PlaceID::Sink],
            arcs: Vec::new(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Add a new inner place (positioned before the sink place)
    pub fn add_place(&mut self) -> PlaceID {
        let place_id = PlaceID::Inner(self.inner_places().count());
        let sink_pos = self.places.len().saturating_sub(1);
        self.places.insert(sink_pos, place_id);
        place_id
    }

    /// Add an arc
    pub fn add_arc(&mut self, arc: Arc) {
        self.arcs.push(arc);
    }

    /// Checks if the activity is a transition of this net
    pub fn contains_activity<S: AsRef<str>>(&self, activity: S) -> bool {
        self.activities.contains(activity.as_ref())
    }

    /// Iterate over all inner places (i.e., all places except source and sink)
    pub fn inner_places(&self) -> impl Iterator<Item = PlaceID> + '_ {
        self.places
            .iter()
            .copied()
            .filter(|p| matches!(p, PlaceID::Inner(_)))
    }

    /// Get the preset of a place (transitions with an arc into it)
    pub fn preset_of_place(&self, p: PlaceID) -> Vec<&Activity> {
        self.arcs
            .iter()
            .filter_map(|arc| match arc {
                Arc::TransitionPlace(from, to) if *to == p => Some(from),
                _ => None,
            })
            .collect()
    }

    /// Get the postset of a place (transitions with an arc from it)
    pub fn postset_of_place(&self, p: PlaceID) -> Vec<&Activity> {
        self.arcs
            .iter()
            .filter_map(|arc| match arc {
                Arc::PlaceTransition(from, to) if *from == p => Some(to),
                _ => None,
            })
            .collect()
    }

    /// Get the preset of a transition (places with an arc into it)
    pub fn preset_of_transition<S: AsRef<str>>(&self, t: S) -> Vec<PlaceID> {
        self.arcs
            .iter()
            .filter_map(|arc| match arc {
                Arc::PlaceTransition(from, to) if to == t.as_ref() => Some(*from),
                _ => None,
            })
            .collect()
    }

    /// Get the postset of a transition (places with an arc from it)
    pub fn postset_of_transition<S: AsRef<str>>(&self, t: S) -> Vec<PlaceID> {
        self.arcs
            .iter()
            .filter_map(|arc| match arc {
                Arc::TransitionPlace(from, to) if from == t.as_ref() => Some(*to),
                _ => None,
            })
            .collect()
    }

    /// Graph view of this net (e.g., for rendering)
    ///
    /// Every place and every activity becomes one node, every arc one edge.
    pub fn to_graph(&self) -> DiGraph<WorkflowNetNode, ()> {
        let mut graph = DiGraph::new();
        let mut place_nodes: HashMap<PlaceID, NodeIndex> = self
            .places
            .iter()
            .map(|p| (*p, graph.add_node(WorkflowNetNode::Place(*p))))
            .collect();
        let mut transition_nodes: HashMap<&Activity, NodeIndex> = self
            .activities
            .iter()
            .map(|act| (act, graph.add_node(WorkflowNetNode::Transition(act.clone()))))
            .collect();
        for arc in &self.arcs {
            let p = *place_nodes
                .entry(arc.place())
                .or_insert_with(|| graph.add_node(WorkflowNetNode::Place(arc.place())));
            let t = *transition_nodes.entry(arc.transition()).or_insert_with(|| {
                graph.add_node(WorkflowNetNode::Transition(arc.transition().clone()))
            });
            match arc {
                Arc::PlaceTransition(_, _) => graph.add_edge(p, t, ()),
                Arc::TransitionPlace(_, _) => graph.add_edge(t, p, ()),
            };
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_net() -> WorkflowNet {
        let mut net = WorkflowNet::new(["a", "b"].into_iter().map(String::from).collect());
        let p = net.add_place();
        net.add_arc(Arc::place_to_transition(PlaceID::Source, "a"));
        net.add_arc(Arc::transition_to_place("a", p));
        net.add_arc(Arc::place_to_transition(p, "b"));
        net.add_arc(Arc::transition_to_place("b", PlaceID::Sink));
        net
    }

    #[test]
    fn workflow_nets() {
        let net = small_net();
        assert_eq!(
            net.places,
            vec![PlaceID::Source, PlaceID::Inner(0), PlaceID::Sink]
        );
        assert_eq!(net.preset_of_place(PlaceID::Inner(0)), vec!["a"]);
        assert_eq!(net.postset_of_place(PlaceID::Inner(0)), vec!["b"]);
        assert_eq!(net.preset_of_transition("a"), vec![PlaceID::Source]);
        assert_eq!(net.postset_of_transition("b"), vec![PlaceID::Sink]);
        assert!(net.postset_of_place(PlaceID::Sink).is_empty());
        assert!(net.contains_activity("a"));
        assert!(!net.contains_activity("c"));
    }

    #[test]
    fn place_ids_keep_position() {
        let mut net = WorkflowNet::default();
        let p0 = net.add_place();
        let p1 = net.add_place();
        assert_eq!(p0, PlaceID::Inner(0));
        assert_eq!(p1, PlaceID::Inner(1));
        assert_eq!(net.places.first(), Some(&PlaceID::Source));
        assert_eq!(net.places.last(), Some(&PlaceID::Sink));
        assert_eq!(net.inner_places().count(), 2);
        assert_eq!(p1.to_string(), "p1");
    }

    #[test]
    fn graph_view() {
        let net = small_net();
        let graph = net.to_graph();
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn deserialize_workflow_net() {
        let net = small_net();
        let json = net.to_json().unwrap();
        let back: WorkflowNet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, net);
    }
}
