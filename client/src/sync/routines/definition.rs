use std::time::Instant;

use log::trace;

use flotilla_shared::{Envelope, MessageData, VesselProtoMsgData};

use crate::{
    sync::{context::SyncContext, error::RoutineError, routine::Routine},
    world::Host,
};

/// Broadcasts the definitions of vessels the local player has authority over
#[derive(Default)]
pub struct DefinitionBroadcastRoutine;

impl DefinitionBroadcastRoutine {
    pub const NAME: &'static str = "SendVesselDefinitions";

    pub fn new() -> Self {
        Self
    }
}

impl Routine for DefinitionBroadcastRoutine {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run(
        &mut self,
        context: &SyncContext,
        host: &mut Host<'_>,
        _now: Instant,
    ) -> Result<(), RoutineError> {
        if !super::is_fully_ready(host.view, host.authority) {
            return Ok(());
        }

        let mut vessel_ids: Vec<_> = host.view.active_vessel_id().into_iter().collect();
        for vessel_id in host.view.secondary_vessel_ids() {
            if !vessel_ids.contains(&vessel_id) {
                vessel_ids.push(vessel_id);
            }
        }

        for vessel_id in vessel_ids {
            if !host.authority.has_authority(vessel_id) || context.removal.is_scheduled(vessel_id) {
                continue;
            }
            let proto = match host.view.snapshot(vessel_id) {
                Some(proto) => proto,
                None => continue,
            };

            trace!("Queueing definition of vessel {}", vessel_id);
            let envelope = Envelope::new(MessageData::VesselProto(VesselProtoMsgData::new(proto)));
            context
                .queue
                .try_enqueue(envelope)
                .map_err(|err| RoutineError::Failed {
                    routine: Self::NAME,
                    reason: err.to_string(),
                })?;
        }

        Ok(())
    }
}
