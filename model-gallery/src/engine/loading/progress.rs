use bevy::prelude::*;

/// Global model load counters shared by every card's loading overlay.
/// A load is settled once it has either finished or failed.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelLoadProgress {
    requested: u32,
    settled: u32,
}

impl ModelLoadProgress {
    pub fn request(&mut self) {
        self.requested += 1;
    }

    pub fn settle(&mut self) {
        self.settled = (self.settled + 1).min(self.requested);
    }

    /// A card unmounted while its load was still in flight.
    pub fn abandon(&mut self) {
        self.settle();
    }

    pub fn requested(&self) -> u32 {
        self.requested
    }

    pub fn settled(&self) -> u32 {
        self.settled
    }

    /// Settled loads as a percentage rounded to the nearest whole number;
    /// 100 when nothing was requested.
    pub fn percent(&self) -> u32 {
        if self.requested == 0 {
            return 100;
        }
        (self.settled * 100 + self.requested / 2) / self.requested
    }
}
