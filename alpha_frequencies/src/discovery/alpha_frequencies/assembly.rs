use std::collections::BTreeSet;

use crate::core::{
    event_data::Activity,
    process_models::workflow_net::{Arc, PlaceID, WorkflowNet},
};

use super::{
    boundary::BoundaryActivities,
    error::{BoundaryRole, DiscoveryError},
    expansion::Grouping,
};

/// Assemble a [`WorkflowNet`] from groupings
///
/// Every grouping yields one place (in the order of `groupings`) with arcs from all its source activities
/// and arcs to all its target activities.
/// The source place is connected to the initial activity and the final activity to the sink place.
///
/// Fails with [`DiscoveryError::BoundaryActivityNotFound`] if a boundary activity is not part of `activities`.
pub fn assemble_workflow_net(
    groupings: &[Grouping],
    activities: &BTreeSet<Activity>,
    boundary: &BoundaryActivities,
) -> Result<WorkflowNet, DiscoveryError> {
    for (role, activity) in [
        (BoundaryRole::Initial, &boundary.initial),
        (BoundaryRole::Final, &boundary.final_activity),
    ] {
        if !activities.contains(activity) {
            return Err(DiscoveryError::BoundaryActivityNotFound {
                role,
                activity: activity.clone(),
            });
        }
    }

    let mut net = WorkflowNet::new(activities.clone());
    net.add_arc(Arc::place_to_transition(
        PlaceID::Source,
        boundary.initial.clone(),
    ));
    for grouping in groupings {
        let place_id = net.add_place();
        grouping.sources.iter().for_each(|in_act| {
            net.add_arc(Arc::transition_to_place(in_act.clone(), place_id));
        });
        grouping.targets.iter().for_each(|out_act| {
            net.add_arc(Arc::place_to_transition(place_id, out_act.clone()));
        });
    }
    net.add_arc(Arc::transition_to_place(
        boundary.final_activity.clone(),
        PlaceID::Sink,
    ));
    Ok(net)
}
