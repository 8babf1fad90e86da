/// All game entity types — pure data, no logic.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Facing {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    /// Score reached the win threshold. Terminal.
    Won,
    /// Score fell to the lose threshold. Terminal.
    Lost,
}

/// Axis-aligned bounding box, top-left anchored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Trex {
    /// Top-left corner of the bounding box.
    pub x: f32,
    pub y: f32,
    /// Signed horizontal velocity in pixels per tick.
    pub vx: f32,
    pub facing: Facing,
    pub is_jumping: bool,
    /// Remaining per-tick vertical displacement while a jump is active.
    pub jump_impulse: i32,
    /// Bounding-box scale factors. Start at 1.0 and drift with collision
    /// side effects (meteor squash, meals).
    pub scale_x: f32,
    pub scale_y: f32,
}

// ── Static scenery ────────────────────────────────────────────────────────────

/// A platform the trex can land on. Placed once at world creation,
/// never destroyed.
#[derive(Clone, Copy, Debug)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

// ── Falling entities ──────────────────────────────────────────────────────────

/// One falling object. Which `World` collection it lives in decides whether
/// it is a meteor, a piece of meat, or a raptor — and therefore its
/// bounding-box size and what reaching the trex does.
#[derive(Clone, Copy, Debug)]
pub struct Faller {
    pub x: f32,
    pub y: f32,
    /// Fall speed in pixels per tick, fixed at spawn time.
    pub speed: f32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state for one play session.  Cloneable so pure update
/// functions can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct World {
    pub trex: Trex,
    pub platforms: Vec<Platform>,
    pub meteors: Vec<Faller>,
    /// Falling meat. Eating one is worth +3.
    pub food: Vec<Faller>,
    /// Falling raptors. Rare; eating one is worth +100.
    pub raptors: Vec<Faller>,
    pub score: i32,
    pub status: GameStatus,
    /// HUD line: the running score while playing, a fixed banner once over.
    pub status_text: String,
    pub frame: u64,
    /// Logical arena dimensions in pixels.
    pub width: f32,
    pub height: f32,
}
