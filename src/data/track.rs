use serde::{Deserialize, Serialize};

/// Which of the two rails an item travels on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rail {
    Left,
    Right,
}

impl Rail {
    pub const ALL: [Rail; 2] = [Rail::Left, Rail::Right];
}

/// One image slot on one rail
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackItem {
    pub rail: Rail,
    pub slot: usize,
    /// slot / N, fixed at creation
    pub phase_offset: f64,
}

impl TrackItem {
    pub fn new(rail: Rail, slot: usize, slots_per_rail: usize) -> Self {
        Self {
            rail,
            slot,
            phase_offset: slot as f64 / slots_per_rail.max(1) as f64,
        }
    }
}

/// Build every item for both rails, left rail first.
///
/// An item's index in the returned list is its mesh id on the renderer surface.
pub fn build_track_items(slots_per_rail: usize) -> Vec<TrackItem> {
    Rail::ALL
        .iter()
        .flat_map(|&rail| (0..slots_per_rail).map(move |slot| TrackItem::new(rail, slot, slots_per_rail)))
        .collect()
}
