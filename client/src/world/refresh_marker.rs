use parking_lot::Mutex;

use flotilla_shared::VesselId;

/// Names the single vessel whose live object is being merged right now.
/// Callbacks fired by the host during a merge use it to tell remote-driven
/// changes apart from local ones.
#[derive(Default)]
pub struct RefreshMarker {
    current: Mutex<Option<VesselId>>,
}

impl RefreshMarker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the marker for `vessel_id`. `None` if another vessel holds it.
    pub fn try_acquire(&self, vessel_id: VesselId) -> Option<RefreshGuard<'_>> {
        let mut current = self.current.lock();
        if current.is_some() {
            return None;
        }
        *current = Some(vessel_id);
        Some(RefreshGuard { marker: self })
    }

    pub fn current(&self) -> Option<VesselId> {
        *self.current.lock()
    }
}

/// Clears the marker when dropped
pub struct RefreshGuard<'m> {
    marker: &'m RefreshMarker,
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        *self.marker.current.lock() = None;
    }
}
