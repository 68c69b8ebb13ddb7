//! Settled coarse group → concrete letter.
//!
//! Inside a group the tests run top to bottom and a later match overwrites an
//! earlier one, so e.g. a hand that passes both the `T` and `N` tests is `N`.

use crate::landmarks::{
    LandmarkSet, INDEX_MCP, INDEX_PIP, INDEX_TIP, MIDDLE_MCP, MIDDLE_PIP, MIDDLE_TIP,
    PINKY_PIP, PINKY_TIP, RING_PIP, RING_TIP, THUMB_TIP,
};
use crate::thresholds::{C_OPENING, G_SPREAD, V_SPREAD_GAIN, Y_SPREAD};

/// Outcome of subgroup resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Letter(char),
    /// Group 1 with a finger pattern none of its letters claim.
    Unresolved,
}

pub fn resolve(group: usize, p: &LandmarkSet) -> Resolution {
    match group {
        0 => Resolution::Letter(fist_letter(p)),
        1 => open_hand_letter(p).map_or(Resolution::Unresolved, Resolution::Letter),
        2 => Resolution::Letter(if p.distance(MIDDLE_TIP, THUMB_TIP) > C_OPENING {
            'C'
        } else {
            'O'
        }),
        3 => Resolution::Letter(if p.distance(INDEX_TIP, MIDDLE_TIP) > G_SPREAD {
            'G'
        } else {
            'H'
        }),
        4 => Resolution::Letter('L'),
        5 => Resolution::Letter(pqz_letter(p)),
        6 => Resolution::Letter('X'),
        7 => Resolution::Letter(if p.distance(INDEX_TIP, THUMB_TIP) > Y_SPREAD {
            'Y'
        } else {
            'J'
        }),
        _ => Resolution::Unresolved,
    }
}

/// A E M N S T: where the thumb tip sits against the curled fingers.
fn fist_letter(p: &LandmarkSet) -> char {
    let thumb_x = p.x(THUMB_TIP);
    let thumb_y = p.y(THUMB_TIP);
    let mut letter = 'S';

    if p.left_of_all(THUMB_TIP, &[INDEX_PIP, MIDDLE_PIP, RING_PIP, PINKY_PIP]) {
        letter = 'A';
    }
    if thumb_x > p.x(INDEX_PIP)
        && p.left_of_all(THUMB_TIP, &[MIDDLE_PIP, RING_PIP, PINKY_PIP])
        && p.above_all(THUMB_TIP, &[RING_PIP, PINKY_PIP])
    {
        letter = 'T';
    }
    if p.below_all(THUMB_TIP, &[INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP]) {
        letter = 'E';
    }
    if p.right_of_all(THUMB_TIP, &[INDEX_PIP, MIDDLE_PIP, RING_PIP]) && thumb_y < p.y(PINKY_PIP) {
        letter = 'M';
    }
    if p.right_of_all(THUMB_TIP, &[INDEX_PIP, MIDDLE_PIP])
        && thumb_y < p.y(PINKY_PIP)
        && thumb_y < p.y(RING_PIP)
    {
        letter = 'N';
    }
    letter
}

/// P Q Z: thumb across the fingers picks Z/Q by index height, otherwise P.
fn pqz_letter(p: &LandmarkSet) -> char {
    if p.right_of_all(THUMB_TIP, &[MIDDLE_TIP, RING_TIP, PINKY_TIP]) {
        if p.y(INDEX_TIP) < p.y(INDEX_MCP) {
            'Z'
        } else {
            'Q'
        }
    } else {
        'P'
    }
}

/// B D F I W K U V R by raised-finger pattern.
fn open_hand_letter(p: &LandmarkSet) -> Option<char> {
    let mut letter = None;
    let two_up = p.finger_pattern([true, true, false, false]);

    if p.finger_pattern([true, true, true, true]) {
        letter = Some('B');
    }
    if p.finger_pattern([true, false, false, false]) {
        letter = Some('D');
    }
    if p.finger_pattern([false, true, true, true]) {
        letter = Some('F');
    }
    if p.finger_pattern([false, false, false, true]) {
        letter = Some('I');
    }
    if p.finger_pattern([true, true, true, false]) {
        letter = Some('W');
    }
    if two_up && p.y(THUMB_TIP) < p.y(MIDDLE_MCP) {
        letter = Some('K');
    }

    let spread_gain = p.distance(INDEX_TIP, MIDDLE_TIP) - p.distance(INDEX_PIP, MIDDLE_PIP);
    if spread_gain < V_SPREAD_GAIN && two_up {
        letter = Some('U');
    }
    if spread_gain >= V_SPREAD_GAIN && two_up && p.y(THUMB_TIP) > p.y(MIDDLE_MCP) {
        letter = Some('V');
    }
    if p.x(INDEX_TIP) > p.x(MIDDLE_TIP) && two_up {
        letter = Some('R');
    }
    letter
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{Point, LANDMARK_COUNT};

    fn base() -> LandmarkSet {
        LandmarkSet::new([Point::new(200.0, 200.0); LANDMARK_COUNT])
    }

    fn two_fingers_up() -> LandmarkSet {
        base()
            .with_point(INDEX_PIP, Point::new(180.0, 180.0))
            .with_point(INDEX_TIP, Point::new(180.0, 120.0))
            .with_point(MIDDLE_PIP, Point::new(200.0, 180.0))
            .with_point(MIDDLE_TIP, Point::new(200.0, 120.0))
            .with_point(RING_PIP, Point::new(220.0, 190.0))
            .with_point(RING_TIP, Point::new(220.0, 230.0))
            .with_point(PINKY_PIP, Point::new(240.0, 200.0))
            .with_point(PINKY_TIP, Point::new(240.0, 235.0))
            .with_point(MIDDLE_MCP, Point::new(200.0, 220.0))
            .with_point(THUMB_TIP, Point::new(210.0, 250.0))
    }

    #[test]
    fn co_split_on_thumb_opening() {
        let open = base()
            .with_point(MIDDLE_TIP, Point::new(250.0, 200.0))
            .with_point(THUMB_TIP, Point::new(200.0, 200.0));
        assert_eq!(resolve(2, &open), Resolution::Letter('C'));
        let closed = open.with_point(THUMB_TIP, Point::new(210.0, 200.0));
        assert_eq!(resolve(2, &closed), Resolution::Letter('O'));
    }

    #[test]
    fn gh_split_is_strictly_greater() {
        let hand = base()
            .with_point(INDEX_TIP, Point::new(100.0, 100.0))
            .with_point(MIDDLE_TIP, Point::new(172.0, 100.0));
        // Exactly 72 apart: not wider than the G spread.
        assert_eq!(resolve(3, &hand), Resolution::Letter('H'));
        let wider = hand.with_point(MIDDLE_TIP, Point::new(173.0, 100.0));
        assert_eq!(resolve(3, &wider), Resolution::Letter('G'));
    }

    #[test]
    fn fixed_groups() {
        assert_eq!(resolve(4, &base()), Resolution::Letter('L'));
        assert_eq!(resolve(6, &base()), Resolution::Letter('X'));
    }

    #[test]
    fn pqz_tree() {
        let across = base()
            .with_point(THUMB_TIP, Point::new(260.0, 200.0))
            .with_point(INDEX_TIP, Point::new(200.0, 150.0))
            .with_point(INDEX_MCP, Point::new(200.0, 190.0));
        assert_eq!(resolve(5, &across), Resolution::Letter('Z'));
        let dropped = across.clone().with_point(INDEX_TIP, Point::new(200.0, 240.0));
        assert_eq!(resolve(5, &dropped), Resolution::Letter('Q'));
        let thumb_out = across.with_point(THUMB_TIP, Point::new(100.0, 200.0));
        assert_eq!(resolve(5, &thumb_out), Resolution::Letter('P'));
    }

    #[test]
    fn fist_defaults_to_s_and_thumb_left_is_a() {
        // Uniform points: no strict comparison holds.
        assert_eq!(resolve(0, &base()), Resolution::Letter('S'));
        let a = base().with_point(THUMB_TIP, Point::new(150.0, 200.0));
        assert_eq!(resolve(0, &a), Resolution::Letter('A'));
    }

    #[test]
    fn thumb_below_all_tips_is_e() {
        let e = base().with_point(THUMB_TIP, Point::new(200.0, 260.0));
        assert_eq!(resolve(0, &e), Resolution::Letter('E'));
    }

    #[test]
    fn parallel_fingers_are_u_spread_fingers_are_v() {
        let u = two_fingers_up();
        assert_eq!(resolve(1, &u), Resolution::Letter('U'));
        let v = u.with_point(MIDDLE_TIP, Point::new(230.0, 120.0));
        assert_eq!(resolve(1, &v), Resolution::Letter('V'));
    }

    #[test]
    fn crossed_fingers_are_r() {
        let r = two_fingers_up().with_point(INDEX_TIP, Point::new(205.0, 120.0));
        assert_eq!(resolve(1, &r), Resolution::Letter('R'));
    }

    #[test]
    fn open_hand_without_pattern_is_unresolved() {
        assert_eq!(resolve(1, &base()), Resolution::Unresolved);
    }
}
