//! Hand landmark layout (MediaPipe Hands - 21 points) and sample parsing

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_MCP: usize = 2;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_TIP: usize = 20;

/// (tip, base knuckle) per finger, thumb first
pub const FINGERS: [(usize, usize); 5] = [
    (THUMB_TIP, THUMB_MCP),
    (INDEX_TIP, INDEX_MCP),
    (MIDDLE_TIP, MIDDLE_MCP),
    (RING_TIP, RING_MCP),
    (PINKY_TIP, PINKY_MCP),
];

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single normalized keypoint: x/y in 0-1 image space, z relative depth
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandLandmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl HandLandmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// One detected hand for one camera frame
#[derive(Clone, Debug, PartialEq)]
pub struct HandSample {
    pub landmarks: [HandLandmark; LANDMARK_COUNT],
    /// Detector's per-hand score
    pub confidence: f32,
}

impl HandSample {
    pub fn new(landmarks: [HandLandmark; LANDMARK_COUNT], confidence: f32) -> Self {
        Self { landmarks, confidence }
    }

    /// Parse the first hand out of a flat `[x, y, z, x, y, z, ...]` buffer.
    /// Fewer than 21 complete points (or any non-finite value) is no hand.
    pub fn from_flat(data: &[f32], confidence: f32) -> Option<Self> {
        if data.len() < LANDMARK_COUNT * 3 {
            if !data.is_empty() {
                log::warn!(
                    "partial hand sample: {} values (expected {})",
                    data.len(),
                    LANDMARK_COUNT * 3
                );
            }
            return None;
        }

        let mut landmarks = [HandLandmark::default(); LANDMARK_COUNT];
        for (i, point) in data.chunks_exact(3).take(LANDMARK_COUNT).enumerate() {
            if point.iter().any(|v| !v.is_finite()) {
                log::warn!("non-finite coordinate in hand landmark {}", i);
                return None;
            }
            landmarks[i] = HandLandmark::new(point[0], point[1], point[2]);
        }

        let confidence = if confidence.is_finite() { confidence.clamp(0.0, 1.0) } else { 0.0 };
        Some(Self::new(landmarks, confidence))
    }
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// Image-plane distance between two landmarks
pub fn distance_2d(a: HandLandmark, b: HandLandmark) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Mean of wrist, index knuckle and pinky knuckle
pub fn palm_center(landmarks: &[HandLandmark; LANDMARK_COUNT]) -> (f32, f32) {
    let points = [landmarks[WRIST], landmarks[INDEX_MCP], landmarks[PINKY_MCP]];
    let x = points.iter().map(|p| p.x).sum::<f32>() / 3.0;
    let y = points.iter().map(|p| p.y).sum::<f32>() / 3.0;
    (x, y)
}
