//! The ordered group cascade.
//!
//! Group numbering follows the classifier: 0 = A E M N S T, 1 = B D F I K R
//! U V W, 2 = C O, 3 = G H, 4 = L, 5 = P Q Z, 6 = X, 7 = J Y.
//!
//! Rule names mirror the confusion each one settles, written
//! `target-vs-source`. Order matters; see the module docs of
//! [`disambiguate`](super).

use super::Rule;
use crate::landmarks::{
    Finger, LandmarkSet, FINGERTIPS, INDEX_MCP, INDEX_TIP, MIDDLE_DIP, MIDDLE_PIP,
    MIDDLE_TIP, PINKY_PIP, PINKY_TIP, RING_PIP, RING_TIP, THUMB_CMC, THUMB_IP, THUMB_MCP,
    THUMB_TIP, WRIST,
};
use crate::thresholds::{
    INDEX_RING_TIPS_CLOSED, INDEX_RING_TIPS_SPREAD, THUMB_BASE_ABOVE_RING_TIP,
    THUMB_CLEAR_OF_MIDDLE, THUMB_CLEAR_OF_MIDDLE_FAR, THUMB_KNUCKLE_GAP, THUMB_NEAR_MIDDLE,
    THUMB_TIP_BELOW_TIPS_SLACK, THUMB_TUCKED_TO_MIDDLE, WRIST_TIP_MARGIN,
};

pub static CASCADE: &[Rule] = &[
    Rule {
        name: "fist-vs-any",
        pairs: &[
            (5, 2), (5, 3), (3, 5), (3, 6), (3, 0), (3, 2), (6, 4), (6, 1), (6, 2), (6, 6),
            (6, 7), (6, 0), (6, 5), (4, 1), (1, 0), (1, 1), (6, 3), (1, 6), (5, 6), (5, 1),
            (4, 5), (1, 4), (1, 5), (2, 0), (2, 6), (4, 6), (1, 0), (5, 7), (1, 6), (6, 1),
            (7, 6), (2, 5), (7, 1), (5, 4), (7, 0), (7, 5), (7, 2),
        ],
        predicate: all_folded,
        target: 0,
    },
    Rule {
        name: "fist-vs-o",
        pairs: &[(2, 2), (2, 1)],
        predicate: thumb_tip_right_of_index_knuckle,
        target: 0,
    },
    Rule {
        name: "co-vs-fist",
        pairs: &[(0, 0), (0, 6), (0, 2), (0, 5), (0, 1), (0, 7), (5, 2), (7, 6), (7, 1)],
        predicate: tips_left_of_wrist_thumb_tucked,
        target: 2,
    },
    Rule {
        name: "co-vs-x",
        pairs: &[(6, 0), (6, 6), (6, 2)],
        predicate: index_ring_tips_closed,
        target: 2,
    },
    Rule {
        name: "gh-vs-bdfikruvw",
        pairs: &[(1, 4), (1, 5), (1, 6), (1, 3), (1, 0)],
        predicate: index_pointing_away_from_wrist,
        target: 3,
    },
    Rule {
        name: "gh-vs-l",
        pairs: &[(4, 6), (4, 1), (4, 5), (4, 3), (4, 7)],
        predicate: thumb_tip_right_of_wrist,
        target: 3,
    },
    Rule {
        name: "gh-vs-pqz",
        pairs: &[(5, 3), (5, 0), (5, 7), (5, 4), (5, 2), (5, 1), (5, 5)],
        predicate: thumb_base_above_ring_tip,
        target: 3,
    },
    Rule {
        name: "l-vs-x",
        pairs: &[(6, 4), (6, 1), (6, 2)],
        predicate: thumb_far_from_middle,
        target: 4,
    },
    Rule {
        name: "l-vs-d",
        pairs: &[(1, 4), (1, 6), (1, 1)],
        predicate: index_only_thumb_clear,
        target: 4,
    },
    Rule {
        name: "l-vs-gh",
        pairs: &[(3, 6), (3, 4)],
        predicate: thumb_tip_left_of_wrist,
        target: 4,
    },
    Rule {
        name: "l-vs-co",
        pairs: &[(2, 2), (2, 5), (2, 4)],
        predicate: thumb_base_left_of_middle_tip,
        target: 4,
    },
    Rule {
        name: "pqz-vs-gh",
        pairs: &[(3, 6), (3, 5), (3, 4)],
        predicate: index_only_thumb_low,
        target: 5,
    },
    Rule {
        name: "pq-vs-gh",
        pairs: &[(3, 2), (3, 1), (3, 6)],
        predicate: thumb_tip_near_fingertip_line,
        target: 5,
    },
    Rule {
        name: "pqz-vs-l",
        pairs: &[(4, 4), (4, 5), (4, 2), (7, 5), (7, 6), (7, 0)],
        predicate: thumb_tip_right_of_wrist,
        target: 5,
    },
    Rule {
        name: "pqz-vs-fist",
        pairs: &[(0, 2), (0, 6), (0, 1), (0, 5), (0, 0), (0, 7), (0, 4), (0, 3), (2, 7)],
        predicate: tips_right_of_wrist,
        target: 5,
    },
    Rule {
        name: "jy-vs-pqz",
        pairs: &[(5, 7), (5, 2), (5, 6)],
        predicate: thumb_ip_left_of_wrist,
        target: 7,
    },
    Rule {
        name: "jy-vs-l",
        pairs: &[(4, 6), (4, 2), (4, 4), (4, 1), (4, 5), (4, 7)],
        predicate: index_folded,
        target: 7,
    },
    Rule {
        name: "jy-vs-x",
        pairs: &[(6, 7), (0, 7), (0, 1), (0, 0), (6, 4), (6, 6), (6, 5), (6, 1)],
        predicate: pinky_extended,
        target: 7,
    },
    Rule {
        name: "x-vs-fist",
        pairs: &[(0, 4), (0, 2), (0, 3), (0, 1), (0, 6)],
        predicate: index_knuckle_right_of_ring_tip,
        target: 6,
    },
    Rule {
        name: "x-vs-jy",
        pairs: &[(7, 2)],
        predicate: pinky_folded_index_tip_high,
        target: 6,
    },
    Rule {
        name: "x-vs-co",
        pairs: &[(2, 1), (2, 2), (2, 6), (2, 7), (2, 0)],
        predicate: index_ring_tips_spread,
        target: 6,
    },
    Rule {
        name: "x-vs-l",
        pairs: &[(4, 6), (4, 2), (4, 1), (4, 4)],
        predicate: thumb_near_middle,
        target: 6,
    },
    Rule {
        name: "x-vs-d",
        pairs: &[(1, 4), (1, 6), (1, 0), (1, 2)],
        predicate: thumb_well_left_of_index_knuckle,
        target: 6,
    },
    Rule {
        name: "b-vs-pqz",
        pairs: &[
            (5, 0), (5, 1), (5, 4), (5, 5), (5, 6), (6, 1), (7, 6), (0, 2), (7, 1), (7, 4),
            (6, 6), (7, 2), (5, 0), (6, 3), (6, 4), (7, 5), (7, 2),
        ],
        predicate: all_extended,
        target: 1,
    },
    Rule {
        name: "f-vs-pqz",
        pairs: &[
            (6, 1), (6, 0), (0, 3), (6, 4), (2, 2), (0, 6), (6, 2), (7, 6), (4, 6), (4, 1),
            (4, 2), (0, 2), (7, 1), (7, 4), (6, 6), (7, 2), (7, 5), (7, 2),
        ],
        predicate: index_folded_rest_extended,
        target: 1,
    },
    Rule {
        name: "f-vs-xl",
        pairs: &[(6, 1), (6, 0), (4, 2), (4, 1), (4, 6), (4, 4)],
        predicate: middle_ring_pinky_extended,
        target: 1,
    },
    Rule {
        name: "d-vs-pqz",
        pairs: &[(5, 0), (3, 4), (3, 0), (3, 1), (3, 5), (5, 5), (5, 4), (5, 1), (7, 6)],
        predicate: index_only_thumb_across_below_ring,
        target: 1,
    },
    Rule {
        name: "d-vs-l",
        pairs: &[(4, 1), (4, 2), (4, 4)],
        predicate: index_only_thumb_tucked,
        target: 1,
    },
    Rule {
        name: "d-vs-gh",
        pairs: &[(3, 4), (3, 0), (3, 1), (3, 5), (3, 6)],
        predicate: index_only_thumb_across_below_ring,
        target: 1,
    },
    Rule {
        name: "d-vs-x",
        pairs: &[(6, 6), (6, 4), (6, 1), (6, 2)],
        predicate: thumb_near_index_knuckle,
        target: 1,
    },
    Rule {
        name: "i-vs-pqz",
        pairs: &[
            (5, 4), (5, 5), (5, 1), (0, 3), (0, 7), (5, 0), (0, 2), (6, 2), (7, 5), (7, 1),
            (7, 6), (7, 7),
        ],
        predicate: pinky_only,
        target: 1,
    },
    Rule {
        name: "jy-vs-bfdi",
        pairs: &[(1, 5), (1, 7), (1, 1), (1, 6), (1, 3), (1, 0)],
        predicate: pinky_only_thumb_near_knuckle,
        target: 7,
    },
    Rule {
        name: "uvr-vs-any",
        pairs: &[(5, 5), (5, 0), (5, 4), (5, 1), (4, 6), (4, 1), (7, 6), (3, 0), (3, 5)],
        predicate: two_fingers_thumb_below_ring,
        target: 1,
    },
    Rule {
        name: "w-vs-any",
        pairs: &[(3, 5), (3, 0), (3, 6), (5, 1), (4, 1), (2, 0), (5, 0), (5, 5)],
        predicate: tips_straddle_wrist_thumb_tucked,
        target: 1,
    },
    Rule {
        name: "w-vs-pqz",
        pairs: &[(5, 0), (5, 5), (0, 1)],
        predicate: three_fingers_extended,
        target: 1,
    },
];

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

fn all_folded(p: &LandmarkSet) -> bool {
    p.finger_pattern([false, false, false, false])
}

fn all_extended(p: &LandmarkSet) -> bool {
    p.finger_pattern([true, true, true, true])
}

fn index_only(p: &LandmarkSet) -> bool {
    p.finger_pattern([true, false, false, false])
}

fn pinky_only(p: &LandmarkSet) -> bool {
    p.finger_pattern([false, false, false, true])
}

fn index_folded_rest_extended(p: &LandmarkSet) -> bool {
    p.finger_pattern([false, true, true, true])
}

fn index_folded(p: &LandmarkSet) -> bool {
    p.folded(Finger::Index)
}

fn pinky_extended(p: &LandmarkSet) -> bool {
    p.extended(Finger::Pinky)
}

fn middle_ring_pinky_extended(p: &LandmarkSet) -> bool {
    p.extended(Finger::Middle) && p.extended(Finger::Ring) && p.extended(Finger::Pinky)
}

fn three_fingers_extended(p: &LandmarkSet) -> bool {
    p.extended(Finger::Index) && p.extended(Finger::Middle) && p.extended(Finger::Ring)
}

fn thumb_tip_right_of_index_knuckle(p: &LandmarkSet) -> bool {
    p.x(INDEX_MCP) < p.x(THUMB_TIP)
}

fn tips_left_of_wrist_thumb_tucked(p: &LandmarkSet) -> bool {
    p.right_of_all(WRIST, &FINGERTIPS) && p.x(INDEX_MCP) > p.x(THUMB_TIP)
}

fn tips_right_of_wrist(p: &LandmarkSet) -> bool {
    p.left_of_all(WRIST, &FINGERTIPS)
}

fn index_ring_tips_closed(p: &LandmarkSet) -> bool {
    p.distance(INDEX_TIP, RING_TIP) < INDEX_RING_TIPS_CLOSED
}

fn index_ring_tips_spread(p: &LandmarkSet) -> bool {
    p.distance(INDEX_TIP, RING_TIP) > INDEX_RING_TIPS_SPREAD
}

fn index_pointing_away_from_wrist(p: &LandmarkSet) -> bool {
    p.extended(Finger::Index)
        && p.folded(Finger::Ring)
        && p.folded(Finger::Pinky)
        && p.left_of_all(WRIST, &FINGERTIPS)
}

fn thumb_tip_right_of_wrist(p: &LandmarkSet) -> bool {
    p.x(THUMB_TIP) > p.x(WRIST)
}

fn thumb_tip_left_of_wrist(p: &LandmarkSet) -> bool {
    p.x(THUMB_TIP) < p.x(WRIST)
}

fn thumb_base_above_ring_tip(p: &LandmarkSet) -> bool {
    p.y(THUMB_MCP) + THUMB_BASE_ABOVE_RING_TIP < p.y(RING_TIP)
}

fn thumb_far_from_middle(p: &LandmarkSet) -> bool {
    p.distance(THUMB_TIP, MIDDLE_DIP) > THUMB_CLEAR_OF_MIDDLE_FAR
}

fn thumb_near_middle(p: &LandmarkSet) -> bool {
    p.distance(THUMB_TIP, MIDDLE_DIP) < THUMB_NEAR_MIDDLE
}

fn index_only_thumb_clear(p: &LandmarkSet) -> bool {
    p.distance(THUMB_TIP, MIDDLE_DIP) > THUMB_CLEAR_OF_MIDDLE && index_only(p)
}

fn index_only_thumb_tucked(p: &LandmarkSet) -> bool {
    p.distance(THUMB_TIP, MIDDLE_DIP) < THUMB_TUCKED_TO_MIDDLE && index_only(p)
}

fn thumb_base_left_of_middle_tip(p: &LandmarkSet) -> bool {
    p.x(THUMB_CMC) < p.x(MIDDLE_TIP)
}

fn index_only_thumb_low(p: &LandmarkSet) -> bool {
    index_only(p) && p.y(THUMB_TIP) > p.y(MIDDLE_PIP)
}

fn thumb_tip_near_fingertip_line(p: &LandmarkSet) -> bool {
    let thumb = p.y(THUMB_TIP) + THUMB_TIP_BELOW_TIPS_SLACK;
    FINGERTIPS.iter().all(|&tip| thumb > p.y(tip))
}

fn thumb_ip_left_of_wrist(p: &LandmarkSet) -> bool {
    p.x(THUMB_IP) < p.x(WRIST)
}

fn index_knuckle_right_of_ring_tip(p: &LandmarkSet) -> bool {
    p.x(INDEX_MCP) > p.x(RING_TIP)
}

fn pinky_folded_index_tip_high(p: &LandmarkSet) -> bool {
    p.y(PINKY_PIP) < p.y(PINKY_TIP) && p.y(INDEX_TIP) < p.y(MIDDLE_PIP)
}

fn thumb_well_left_of_index_knuckle(p: &LandmarkSet) -> bool {
    p.x(INDEX_MCP) - p.x(THUMB_TIP) - THUMB_KNUCKLE_GAP > 0.0
}

fn thumb_near_index_knuckle(p: &LandmarkSet) -> bool {
    p.x(INDEX_MCP) - p.x(THUMB_TIP) - THUMB_KNUCKLE_GAP < 0.0
}

fn index_only_thumb_across_below_ring(p: &LandmarkSet) -> bool {
    index_only(p) && p.x(THUMB_MCP) < p.x(WRIST) && p.y(THUMB_TIP) > p.y(RING_PIP)
}

fn pinky_only_thumb_near_knuckle(p: &LandmarkSet) -> bool {
    p.x(THUMB_TIP) < p.x(INDEX_MCP) + THUMB_KNUCKLE_GAP && pinky_only(p)
}

fn two_fingers_thumb_below_ring(p: &LandmarkSet) -> bool {
    p.finger_pattern([true, true, false, false]) && p.y(THUMB_TIP) > p.y(RING_PIP)
}

fn tips_straddle_wrist_thumb_tucked(p: &LandmarkSet) -> bool {
    let wrist = p.x(WRIST);
    let all_clear_right = FINGERTIPS
        .iter()
        .all(|&tip| wrist + WRIST_TIP_MARGIN < p.x(tip));
    !all_clear_right
        && !p.right_of_all(WRIST, &FINGERTIPS)
        && p.distance(THUMB_TIP, MIDDLE_DIP) < THUMB_TUCKED_TO_MIDDLE
}
