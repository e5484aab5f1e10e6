use bevy::prelude::*;
use constants::viewport::SCENE_SLOT_SPACING;

/// Allocator for world-space scene slots. Each mounted card owns one slot;
/// released slots are reused lowest-first.
#[derive(Resource, Default, Debug)]
pub struct SceneSlots {
    next: u32,
    free: Vec<u32>,
}

impl SceneSlots {
    pub fn acquire(&mut self) -> u32 {
        if let Some(index) = self.free.iter().enumerate().min_by_key(|(_, s)| **s).map(|(i, _)| i) {
            return self.free.swap_remove(index);
        }
        let slot = self.next;
        self.next += 1;
        slot
    }

    pub fn release(&mut self, slot: u32) {
        if slot < self.next && !self.free.contains(&slot) {
            self.free.push(slot);
        }
    }

    pub fn in_use(&self) -> usize {
        self.next as usize - self.free.len()
    }
}

/// Centre of a slot's scene in world space.
pub fn slot_origin(slot: u32) -> Vec3 {
    Vec3::new(slot as f32 * SCENE_SLOT_SPACING, 0.0, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::{lighting::LIGHT_RANGE, orbit::CAMERA_FAR};

    #[test]
    fn test_slots_are_unique_while_held() {
        let mut slots = SceneSlots::default();
        let a = slots.acquire();
        let b = slots.acquire();
        let c = slots.acquire();
        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(slots.in_use(), 3);
    }

    #[test]
    fn test_released_slots_are_reused_lowest_first() {
        let mut slots = SceneSlots::default();
        for _ in 0..4 {
            slots.acquire();
        }
        slots.release(2);
        slots.release(0);
        slots.release(0);
        assert_eq!(slots.in_use(), 2);
        assert_eq!(slots.acquire(), 0);
        assert_eq!(slots.acquire(), 2);
        assert_eq!(slots.acquire(), 4);
    }

    #[test]
    fn test_neighbouring_slots_are_out_of_reach() {
        let gap = slot_origin(1).distance(slot_origin(0));
        assert!(CAMERA_FAR * 2.0 < gap);
        assert!(LIGHT_RANGE * 2.0 < gap);
    }
}
