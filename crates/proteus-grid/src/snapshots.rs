use chrono::{DateTime, Utc};

/// Two grid snapshots (G0, the older; G1, the newer) and the `phase_time` at which G1
/// becomes fully authoritative, matching the G0/G1/phase_time triple every refreshable
/// grid in the original library carries.
#[derive(Debug, Clone)]
pub struct Snapshots<T> {
    pub g0: T,
    pub g1: T,
    pub phase_time: DateTime<Utc>,
}

impl<T> Snapshots<T> {
    pub fn new(g0: T, g1: T, phase_time: DateTime<Utc>) -> Self {
        Snapshots { g0, g1, phase_time }
    }

    /// Rotates G1 into G0 and installs `new_g1` as the new leading snapshot, the way a
    /// refresh cycle replaces its oldest grid once new data has landed.
    pub fn rotate(&mut self, new_g1: T, new_phase_time: DateTime<Utc>) {
        let old_g1 = std::mem::replace(&mut self.g1, new_g1);
        self.g0 = old_g1;
        self.phase_time = new_phase_time;
    }
}
