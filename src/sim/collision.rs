//! Default overlap test between the player and enemies
//!
//! The simulation itself only reacts to reported hits. Hosts without their
//! own physics can use these helpers to produce those reports.

use glam::Vec2;

use super::enemy::EnemyAgent;

/// Result of an overlap check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the circles overlap
    pub hit: bool,
    /// Normal from the enemy toward the player
    pub normal: Vec2,
    /// Overlap depth
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Circle vs circle overlap
pub fn circle_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> CollisionResult {
    let delta = a_pos - b_pos;
    let dist = delta.length();
    let reach = a_radius + b_radius;

    if dist >= reach {
        return CollisionResult::miss();
    }

    CollisionResult {
        hit: true,
        // Coincident centres: push straight up
        normal: if dist > f32::EPSILON { delta / dist } else { Vec2::Y },
        penetration: reach - dist,
    }
}

/// Ids of every live enemy touching the player, in iteration order
pub fn player_hits<'a>(
    player_pos: Vec2,
    player_radius: f32,
    enemies: impl IntoIterator<Item = &'a EnemyAgent>,
) -> Vec<u32> {
    enemies
        .into_iter()
        .filter(|enemy| enemy.is_alive())
        .filter(|enemy| circle_overlap(player_pos, player_radius, enemy.pos, enemy.spec.radius).hit)
        .map(|enemy| enemy.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::EnemySpec;
    use std::rc::Rc;

    #[test]
    fn test_circle_overlap_hit() {
        let result = circle_overlap(Vec2::new(0.0, 0.0), 1.0, Vec2::new(1.5, 0.0), 1.0);
        assert!(result.hit);
        assert!((result.penetration - 0.5).abs() < 1e-6);
        assert!((result.normal - Vec2::new(-1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_circle_overlap_miss() {
        let result = circle_overlap(Vec2::ZERO, 0.5, Vec2::new(1.0, 0.0), 0.5);
        assert!(!result.hit);
    }

    #[test]
    fn test_coincident_centres() {
        let result = circle_overlap(Vec2::ONE, 0.5, Vec2::ONE, 0.5);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::Y);
    }

    #[test]
    fn test_player_hits_skips_dead_and_distant() {
        let spec = Rc::new(EnemySpec::new("slime"));
        let near = EnemyAgent::new(1, Rc::clone(&spec), Vec2::new(0.3, 0.0));
        let far = EnemyAgent::new(2, Rc::clone(&spec), Vec2::new(10.0, 0.0));
        let mut dead = EnemyAgent::new(3, Rc::clone(&spec), Vec2::ZERO);
        dead.on_player_collision();

        let hits = player_hits(Vec2::ZERO, 0.5, [&near, &far, &dead]);
        assert_eq!(hits, vec![1]);
    }
}
