//! Control-gesture overrides applied after subgroup resolution.
//!
//! Checked in order SPACE → CONFIRM → DELETE; each check sees the output of
//! the previous one, so a CONFIRM pose that also passes the DELETE geometry
//! comes out as DELETE.

use serde::{Deserialize, Serialize};

use super::Resolution;
use crate::landmarks::{
    Finger, LandmarkSet, FINGERTIPS, FINGER_PIPS, INDEX_MCP, THUMB_TIP, WRIST,
};
use crate::symbol::SymbolToken;

/// Which resolved symbols the DELETE override may replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteGate {
    /// Only CONFIRM and the letters B C H F X.
    #[default]
    Restricted,
    /// Every resolved symbol, including blanks and other controls.
    Always,
}

impl DeleteGate {
    fn admits(self, token: SymbolToken) -> bool {
        match self {
            DeleteGate::Always => true,
            DeleteGate::Restricted => matches!(
                token,
                SymbolToken::Confirm
                    | SymbolToken::Letter('B' | 'C' | 'H' | 'F' | 'X')
            ),
        }
    }
}

pub fn apply(resolution: Resolution, p: &LandmarkSet, gate: DeleteGate) -> SymbolToken {
    let mut token = match resolution {
        Resolution::Letter(c) => SymbolToken::Letter(c),
        Resolution::Unresolved => SymbolToken::Blank,
    };

    let space_candidate = matches!(resolution, Resolution::Unresolved)
        || matches!(token, SymbolToken::Letter('E' | 'S' | 'X' | 'Y' | 'B'));
    if space_candidate && space_pose(p) {
        token = SymbolToken::Space;
    }

    if matches!(token, SymbolToken::Letter('E' | 'Y' | 'B')) && confirm_pose(p) {
        token = SymbolToken::Confirm;
    }

    if gate.admits(token) && delete_pose(p) {
        token = SymbolToken::Delete;
    }

    token
}

/// Index and pinky raised, middle and ring curled.
fn space_pose(p: &LandmarkSet) -> bool {
    p.finger_pattern([true, false, false, true])
}

/// Flat hand with the thumb tucked across the palm.
fn confirm_pose(p: &LandmarkSet) -> bool {
    p.x(THUMB_TIP) < p.x(INDEX_MCP) && Finger::ALL.iter().all(|&f| p.extended(f))
}

/// Hand turned over: fingertips past the wrist, thumb tip above every
/// fingertip and finger joint.
fn delete_pose(p: &LandmarkSet) -> bool {
    p.right_of_all(WRIST, &FINGERTIPS)
        && p.above_all(THUMB_TIP, &FINGERTIPS)
        && p.above_all(THUMB_TIP, &FINGER_PIPS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{
        Point, INDEX_PIP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP,
        RING_PIP, RING_TIP,
    };

    fn hand(up: [bool; 4]) -> LandmarkSet {
        let mut set = LandmarkSet::new([Point::new(200.0, 300.0); LANDMARK_COUNT]);
        let joints = [
            (INDEX_PIP, INDEX_TIP, 170.0),
            (MIDDLE_PIP, MIDDLE_TIP, 190.0),
            (RING_PIP, RING_TIP, 210.0),
            (PINKY_PIP, PINKY_TIP, 230.0),
        ];
        for ((pip, tip, x), raised) in joints.into_iter().zip(up) {
            set = set.with_point(pip, Point::new(x, 180.0));
            let tip_y = if raised { 120.0 } else { 230.0 };
            set = set.with_point(tip, Point::new(x, tip_y));
        }
        set.with_point(INDEX_MCP, Point::new(170.0, 220.0))
            .with_point(THUMB_TIP, Point::new(185.0, 260.0))
    }

    #[test]
    fn horn_shape_turns_listed_letters_into_space() {
        let horns = hand([true, false, false, true]);
        assert_eq!(
            apply(Resolution::Letter('Y'), &horns, DeleteGate::Restricted),
            SymbolToken::Space
        );
        assert_eq!(
            apply(Resolution::Unresolved, &horns, DeleteGate::Restricted),
            SymbolToken::Space
        );
        // 'A' is not a space candidate.
        assert_eq!(
            apply(Resolution::Letter('A'), &horns, DeleteGate::Restricted),
            SymbolToken::Letter('A')
        );
    }

    #[test]
    fn tucked_thumb_flat_hand_is_confirm() {
        let flat = hand([true, true, true, true]).with_point(THUMB_TIP, Point::new(160.0, 260.0));
        assert_eq!(
            apply(Resolution::Letter('B'), &flat, DeleteGate::Restricted),
            SymbolToken::Confirm
        );
        let thumb_out = flat.with_point(THUMB_TIP, Point::new(185.0, 260.0));
        assert_eq!(
            apply(Resolution::Letter('B'), &thumb_out, DeleteGate::Restricted),
            SymbolToken::Letter('B')
        );
    }

    fn turned_over() -> LandmarkSet {
        hand([true, true, true, true])
            .with_point(WRIST, Point::new(300.0, 350.0))
            .with_point(THUMB_TIP, Point::new(185.0, 90.0))
    }

    #[test]
    fn restricted_gate_only_rewrites_listed_symbols() {
        let pose = turned_over();
        assert_eq!(
            apply(Resolution::Letter('B'), &pose, DeleteGate::Restricted),
            SymbolToken::Delete
        );
        assert_eq!(
            apply(Resolution::Letter('L'), &pose, DeleteGate::Restricted),
            SymbolToken::Letter('L')
        );
    }

    #[test]
    fn always_gate_rewrites_anything() {
        let pose = turned_over();
        assert_eq!(
            apply(Resolution::Letter('L'), &pose, DeleteGate::Always),
            SymbolToken::Delete
        );
        assert_eq!(
            apply(Resolution::Unresolved, &pose, DeleteGate::Always),
            SymbolToken::Delete
        );
    }

    #[test]
    fn delete_gate_serializes_lowercase() {
        let json = serde_json::to_string(&DeleteGate::Always).expect("serialize gate");
        assert_eq!(json, r#""always""#);
    }
}
