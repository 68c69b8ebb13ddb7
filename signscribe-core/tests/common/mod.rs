//! Hand-built landmark poses shared by the integration tests.

#![allow(dead_code)]

/// Closed fist, thumb resting left of the curled fingers: resolves to 'A'
/// from group pair (0, 3).
pub fn fist_a() -> Vec<[f32; 2]> {
    vec![
        [200.0, 350.0],
        [170.0, 320.0],
        [150.0, 290.0],
        [145.0, 265.0],
        [150.0, 220.0],
        [170.0, 200.0],
        [170.0, 180.0],
        [170.0, 210.0],
        [170.0, 230.0],
        [190.0, 195.0],
        [190.0, 175.0],
        [190.0, 205.0],
        [190.0, 228.0],
        [210.0, 200.0],
        [210.0, 182.0],
        [210.0, 210.0],
        [210.0, 232.0],
        [230.0, 210.0],
        [230.0, 195.0],
        [230.0, 215.0],
        [230.0, 236.0],
    ]
}

/// Flat hand, all four fingers raised, thumb beside the index: 'B' from
/// group pair (1, 4).
pub fn flat_b() -> Vec<[f32; 2]> {
    vec![
        [200.0, 350.0],
        [175.0, 330.0],
        [160.0, 305.0],
        [160.0, 280.0],
        [185.0, 260.0],
        [170.0, 220.0],
        [170.0, 180.0],
        [170.0, 150.0],
        [170.0, 120.0],
        [190.0, 215.0],
        [190.0, 175.0],
        [190.0, 145.0],
        [190.0, 110.0],
        [210.0, 220.0],
        [210.0, 182.0],
        [210.0, 152.0],
        [210.0, 125.0],
        [230.0, 230.0],
        [230.0, 200.0],
        [230.0, 178.0],
        [230.0, 160.0],
    ]
}

/// Flat hand with the thumb tip tucked left of the index knuckle.
pub fn confirm_pose() -> Vec<[f32; 2]> {
    let mut pts = flat_b();
    pts[4] = [165.0, 260.0];
    pts
}

/// Flat hand turned over: wrist to the right of every fingertip, thumb tip
/// above the whole hand.
pub fn delete_pose() -> Vec<[f32; 2]> {
    let mut pts = flat_b();
    pts[0] = [300.0, 350.0];
    pts[4] = [185.0, 90.0];
    pts
}

pub fn fist_scores(conf: f32) -> Vec<f32> {
    vec![conf, 0.0, 0.0, 1.0 - conf, 0.0, 0.0, 0.0, 0.0]
}

pub fn open_scores(conf: f32) -> Vec<f32> {
    vec![0.0, conf, 0.0, 0.0, 1.0 - conf, 0.0, 0.0, 0.0]
}
