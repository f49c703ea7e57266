//! Axis-aligned bounding box collision
//!
//! Every entity collides as a rectangle. Only the player is tested against
//! enemies; enemies pass through each other.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Enemy, Player};

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            width: size.x,
            height: size.y,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// True when the interiors of two rectangles intersect. Touching edges do
/// not count.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Whether any active enemy overlaps the player. Which enemy was hit does
/// not matter, so the scan stops at the first overlap.
pub fn player_hit(player: &Player, enemies: &[Enemy]) -> bool {
    let player_rect = player.rect();
    enemies
        .iter()
        .filter(|e| e.active)
        .any(|e| overlaps(&player_rect, &e.rect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::MovePattern;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, width: f32, height: f32) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn test_overlap_and_miss() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(overlaps(&a, &rect(5.0, 5.0, 10.0, 10.0)));
        assert!(overlaps(&a, &rect(2.0, 2.0, 2.0, 2.0))); // contained
        assert!(!overlaps(&a, &rect(20.0, 0.0, 10.0, 10.0)));
        assert!(!overlaps(&a, &rect(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &rect(10.0, 0.0, 10.0, 10.0)));
        assert!(!overlaps(&a, &rect(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_player_hit_ignores_inactive_enemies() {
        let player = Player::spawn(&Tuning::default());
        let mut enemy = Enemy::new(player.pos.x, 40.0, 3.0, MovePattern::Straight);
        enemy.pos = player.pos;

        assert!(player_hit(&player, std::slice::from_ref(&enemy)));
        enemy.active = false;
        assert!(!player_hit(&player, &[enemy]));
    }

    #[test]
    fn test_player_hit_order_independent() {
        let player = Player::spawn(&Tuning::default());
        let mut hit = Enemy::new(0.0, 40.0, 3.0, MovePattern::Circle);
        hit.pos = player.pos + Vec2::splat(5.0);
        let miss = Enemy::new(0.0, 40.0, 3.0, MovePattern::Zigzag);

        let forward = [hit.clone(), miss.clone(), hit.clone()];
        let reverse = [hit.clone(), miss, hit];
        assert!(player_hit(&player, &forward));
        assert!(player_hit(&player, &reverse));
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| rect(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_rect_overlaps_itself_when_non_empty(
            a in arb_rect().prop_filter("non-degenerate", |r| r.width >= 1.0 && r.height >= 1.0)
        ) {
            prop_assert!(overlaps(&a, &a));
        }
    }
}
