//! Orbs and the field that owns them
//!
//! Orbs are plain records: spawned above the top edge, flying in a straight
//! line at a speed fixed at spawn time until they touch the avatar or wander
//! far enough off screen to be discarded.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::color::Color;
use crate::{distance, velocity_toward};

/// A moving orb
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orb {
    pub id: u32,
    pub pos: Vec2,
    /// Per-tick displacement, fixed at spawn
    pub vel: Vec2,
    pub color: Color,
}

impl Orb {
    /// Create an orb at `pos` aimed at `target` with the given speed
    pub fn new(id: u32, pos: Vec2, target: Vec2, color: Color, speed: f32) -> Self {
        Self {
            id,
            pos,
            vel: velocity_toward(pos, target, speed),
            color,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Advance one tick
    pub fn step(&mut self) {
        self.pos += self.vel;
    }
}

/// How an orb left the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrbFate {
    /// Touched the avatar; its color goes to match resolution
    Collided,
    /// Flew past the cleanup bound
    Expired,
}

/// An orb removed during `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrbExit {
    pub id: u32,
    pub color: Color,
    pub fate: OrbFate,
}

/// Bounds used to classify orbs after they move
#[derive(Debug, Clone, Copy)]
pub struct FieldBounds {
    /// Avatar anchor
    pub anchor: Vec2,
    /// Contact distance from the anchor
    pub collision_radius: f32,
    /// Distance from the anchor beyond which an orb is discarded
    pub expiry_distance: f32,
}

/// All in-flight orbs plus the spawn timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbField {
    /// Live orbs, in spawn (and id) order
    orbs: Vec<Orb>,
    /// Elapsed-time stamp of the most recent spawn
    last_spawn_ms: Option<f32>,
    next_id: u32,
}

impl Default for OrbField {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbField {
    pub fn new() -> Self {
        Self {
            orbs: Vec::new(),
            last_spawn_ms: None,
            next_id: 1,
        }
    }

    pub fn orbs(&self) -> &[Orb] {
        &self.orbs
    }

    pub fn len(&self) -> usize {
        self.orbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbs.is_empty()
    }

    /// Whether enough time has passed since the last spawn
    ///
    /// The very first check of a run is always due.
    pub fn spawn_due(&self, now_ms: f32, interval_ms: f32) -> bool {
        match self.last_spawn_ms {
            None => true,
            Some(last) => now_ms - last >= interval_ms,
        }
    }

    /// Add an orb and restart the spawn timer
    pub fn spawn(
        &mut self,
        now_ms: f32,
        pos: Vec2,
        target: Vec2,
        color: Color,
        speed: f32,
    ) -> &Orb {
        let id = self.next_id;
        self.next_id += 1;
        self.last_spawn_ms = Some(now_ms);
        self.orbs.push(Orb::new(id, pos, target, color, speed));
        &self.orbs[self.orbs.len() - 1]
    }

    /// Move every orb one tick and remove the ones that collided or expired
    ///
    /// All orbs are moved and classified before any is removed. Exits are
    /// reported in spawn order.
    pub fn advance(&mut self, bounds: &FieldBounds) -> Vec<OrbExit> {
        let mut exits = Vec::new();
        for orb in &mut self.orbs {
            orb.step();
            let dist = distance(orb.pos, bounds.anchor);
            let fate = if dist <= bounds.collision_radius {
                Some(OrbFate::Collided)
            } else if dist > bounds.expiry_distance {
                Some(OrbFate::Expired)
            } else {
                None
            };
            if let Some(fate) = fate {
                exits.push(OrbExit {
                    id: orb.id,
                    color: orb.color,
                    fate,
                });
            }
        }

        if !exits.is_empty() {
            self.orbs.retain(|orb| !exits.iter().any(|e| e.id == orb.id));
        }
        exits
    }

    /// Drop all orbs and reset the spawn timer
    pub fn clear(&mut self) {
        self.orbs.clear();
        self.last_spawn_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> FieldBounds {
        FieldBounds {
            anchor: Vec2::new(512.0, 476.0),
            collision_radius: 45.0,
            expiry_distance: 1024.0 + 576.0 + 200.0,
        }
    }

    #[test]
    fn test_velocity_points_at_target() {
        let orb = Orb::new(1, Vec2::new(0.0, 0.0), Vec2::new(30.0, 40.0), Color::Red, 10.0);
        assert!((orb.vel - Vec2::new(6.0, 8.0)).length() < 1e-5);
        assert!((orb.speed() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_orb_at_target_has_no_velocity() {
        let p = Vec2::new(5.0, 5.0);
        let orb = Orb::new(1, p, p, Color::Blue, 10.0);
        assert_eq!(orb.vel, Vec2::ZERO);
    }

    #[test]
    fn test_first_spawn_is_due_immediately() {
        let field = OrbField::new();
        assert!(field.spawn_due(0.0, 4500.0));
    }

    #[test]
    fn test_spawn_timer() {
        let mut field = OrbField::new();
        let b = bounds();
        field.spawn(100.0, Vec2::new(300.0, -100.0), b.anchor, Color::Red, 5.0);
        assert!(!field.spawn_due(4599.0, 4500.0));
        assert!(field.spawn_due(4600.0, 4500.0));
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let mut field = OrbField::new();
        let b = bounds();
        let a = field.spawn(0.0, Vec2::new(100.0, -100.0), b.anchor, Color::Red, 5.0).id;
        let c = field.spawn(1.0, Vec2::new(200.0, -100.0), b.anchor, Color::Blue, 5.0).id;
        assert!(c > a);
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_orb_travels_then_collides() {
        let mut field = OrbField::new();
        let b = bounds();
        field.spawn(0.0, Vec2::new(512.0, -100.0), b.anchor, Color::Yellow, 25.0);

        let mut ticks = 0;
        let exits = loop {
            ticks += 1;
            let exits = field.advance(&b);
            if !exits.is_empty() {
                break exits;
            }
            assert!(ticks < 100, "orb never arrived");
        };

        // 576 px to cover, contact at 45 px: 531 / 25 rounds up to 22 ticks
        assert_eq!(ticks, 22);
        assert_eq!(exits.len(), 1);
        assert_eq!(exits[0].fate, OrbFate::Collided);
        assert_eq!(exits[0].color, Color::Yellow);
        assert!(field.is_empty());
    }

    #[test]
    fn test_speed_is_fixed_for_lifetime() {
        let mut field = OrbField::new();
        let b = bounds();
        field.spawn(0.0, Vec2::new(100.0, -100.0), b.anchor, Color::Red, 7.0);
        let vel = field.orbs()[0].vel;
        for _ in 0..5 {
            field.advance(&b);
        }
        assert_eq!(field.orbs()[0].vel, vel);
    }

    #[test]
    fn test_far_orb_expires() {
        let mut field = OrbField::new();
        let b = bounds();
        // Aimed away from the avatar
        field.spawn(0.0, Vec2::new(512.0, -1330.0), Vec2::new(512.0, -5000.0), Color::Green, 10.0);
        let exits = field.advance(&b);
        assert_eq!(exits.len(), 1);
        assert_eq!(exits[0].fate, OrbFate::Expired);
        assert!(field.is_empty());
    }

    #[test]
    fn test_simultaneous_exits_all_reported() {
        let mut field = OrbField::new();
        let b = bounds();
        field.spawn(0.0, b.anchor + Vec2::new(0.0, -50.0), b.anchor, Color::Red, 10.0);
        field.spawn(0.0, Vec2::new(100.0, -100.0), b.anchor, Color::Blue, 5.0);
        field.spawn(0.0, b.anchor + Vec2::new(50.0, 0.0), b.anchor, Color::Green, 10.0);

        let exits = field.advance(&b);
        let ids: Vec<u32> = exits.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(field.len(), 1);
        assert_eq!(field.orbs()[0].color, Color::Blue);
    }

    #[test]
    fn test_clear_resets_timer() {
        let mut field = OrbField::new();
        let b = bounds();
        field.spawn(10.0, Vec2::new(100.0, -100.0), b.anchor, Color::Red, 5.0);
        field.clear();
        assert!(field.is_empty());
        assert!(field.spawn_due(11.0, 4500.0));
    }
}
