/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `World` (and, where randomness is involved, an RNG handle) and returns a
/// brand-new `World`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::entities::{Facing, Faller, GameStatus, Platform, Rect, Trex, World};

// ── Tuning constants ─────────────────────────────────────────────────────────

/// Horizontal speed in pixels per tick.
pub const TREX_SPEED: f32 = 5.0;
/// Per-tick displacement budget loaded when a jump starts.
pub const JUMP_IMPULSE: i32 = 15;
/// Descent per tick while airborne outside a jump.
pub const GRAVITY_STEP: f32 = 10.0;
/// The trex rests at this fraction of the arena height.
pub const REST_FACTOR: f32 = 0.93;
/// Landing parks the trex this many trex-heights above the platform top.
pub const PLATFORM_SNAP: f32 = 0.7;

pub const WIN_SCORE: i32 = 30;
pub const LOSE_SCORE: i32 = -30;
const MEAT_SCORE: i32 = 3;
const METEOR_SCORE: i32 = -1;
const RAPTOR_SCORE: i32 = 100;

/// Unscaled trex bounding box — a 32-px sprite drawn at 2×.
pub const TREX_W: f32 = 64.0;
pub const TREX_H: f32 = 64.0;
pub const METEOR_W: f32 = 32.0;
pub const METEOR_H: f32 = 32.0;
pub const MEAT_W: f32 = 32.0;
pub const MEAT_H: f32 = 32.0;
pub const RAPTOR_W: f32 = 48.0;
pub const RAPTOR_H: f32 = 48.0;
const PLATFORM_W: f32 = 100.0;
const PLATFORM_H: f32 = 20.0;

/// Meteors spawned per successful coin flip on a key event.
const METEOR_BATCH: usize = 3;
/// One raptor per this many key events, on average.
const RAPTOR_ODDS: u32 = 20;
/// Every this many frames the first meteor is returned to the top edge.
const RECYCLE_FRAMES: u64 = 60;

/// Meteor contact squashes the trex box wider and flatter.  Applied on every
/// overlapping tick; never clamped.
const SQUASH_X: f32 = 1.1;
const SQUASH_Y: f32 = 0.9;
/// Meals grow the box on both axes.
const MEAT_GROWTH: f32 = 0.1;
const RAPTOR_GROWTH: f32 = 0.25;

const WIN_TEXT: &str = "YOU WIN!";
const LOSE_TEXT: &str = "GAME OVER! :P";

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Four-way axis-aligned overlap test.
fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

fn trex_rect(t: &Trex) -> Rect {
    Rect {
        x: t.x,
        y: t.y,
        w: TREX_W * t.scale_x,
        h: TREX_H * t.scale_y,
    }
}

fn platform_rect(p: &Platform) -> Rect {
    Rect { x: p.x, y: p.y, w: p.width, h: p.height }
}

fn faller_rect(f: &Faller, w: f32, h: f32) -> Rect {
    Rect { x: f.x, y: f.y, w, h }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial world for the given arena dimensions.
pub fn init_world(width: f32, height: f32, rng: &mut impl Rng) -> World {
    World {
        trex: Trex {
            x: width / 2.0,
            y: height * REST_FACTOR,
            vx: TREX_SPEED,
            facing: Facing::Right,
            is_jumping: false,
            jump_impulse: 0,
            scale_x: 1.0,
            scale_y: 1.0,
        },
        platforms: create_platforms(width, height, rng),
        meteors: create_meteor_shower(width, rng),
        food: Vec::new(),
        raptors: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        status_text: "Score: 0".to_string(),
        frame: 0,
        width,
        height,
    }
}

/// Ten platforms, each placed at random tenths of the arena dimensions.
fn create_platforms(width: f32, height: f32, rng: &mut impl Rng) -> Vec<Platform> {
    (0..10)
        .map(|_| Platform {
            x: width * rng.gen_range(1..=10) as f32 * 0.1,
            y: height * rng.gen_range(1..=10) as f32 * 0.1,
            width: PLATFORM_W,
            height: PLATFORM_H,
        })
        .collect()
}

/// The opening shower: ten meteors just above the top edge.  Alternate
/// slots draw from a faster speed range.
fn create_meteor_shower(width: f32, rng: &mut impl Rng) -> Vec<Faller> {
    (0..10)
        .map(|i| {
            let speed = if i % 2 == 0 {
                rng.gen_range(5..=15)
            } else {
                rng.gen_range(10..=20)
            };
            Faller {
                x: rng.gen_range(0.0..(width - METEOR_W)),
                y: -1.0,
                speed: speed as f32,
            }
        })
        .collect()
}

// ── Spawning ─────────────────────────────────────────────────────────────────

pub fn spawn_meteor(width: f32, rng: &mut impl Rng) -> Faller {
    Faller {
        x: rng.gen_range(0.0..(width - METEOR_W)),
        y: -10.0,
        speed: rng.gen_range(5..=20) as f32,
    }
}

pub fn spawn_meat(width: f32, rng: &mut impl Rng) -> Faller {
    Faller {
        x: rng.gen_range(0.0..(width - MEAT_W)),
        y: -10.0,
        speed: rng.gen_range(4..=10) as f32,
    }
}

pub fn spawn_raptor(width: f32, rng: &mut impl Rng) -> Faller {
    Faller {
        x: rng.gen_range(0.0..(width - RAPTOR_W)),
        y: -10.0,
        speed: rng.gen_range(6..=12) as f32,
    }
}

/// The shared probabilistic spawn pass, run once per key event: a coin flip
/// for a batch of meteors, an independent coin flip for one piece of meat,
/// and a rare raptor.
pub fn maybe_spawn_fallers(state: &World, rng: &mut impl Rng) -> World {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let mut next = state.clone();
    if rng.gen_range(0..2) == 0 {
        for _ in 0..METEOR_BATCH {
            next.meteors.push(spawn_meteor(state.width, rng));
        }
    }
    if rng.gen_range(0..2) == 0 {
        next.food.push(spawn_meat(state.width, rng));
    }
    if rng.gen_range(0..RAPTOR_ODDS) == 0 {
        next.raptors.push(spawn_raptor(state.width, rng));
    }
    next
}

// ── Input-driven state transitions (pure) ────────────────────────────────────

pub fn head_left(state: &World) -> World {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    World {
        trex: Trex {
            vx: -TREX_SPEED,
            facing: Facing::Left,
            ..state.trex.clone()
        },
        ..state.clone()
    }
}

pub fn head_right(state: &World) -> World {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    World {
        trex: Trex {
            vx: TREX_SPEED,
            facing: Facing::Right,
            ..state.trex.clone()
        },
        ..state.clone()
    }
}

/// Start a jump unless one is already underway.
pub fn start_jump(state: &World) -> World {
    if state.status != GameStatus::Playing || state.trex.is_jumping {
        return state.clone();
    }
    World {
        trex: Trex {
            is_jumping: true,
            jump_impulse: JUMP_IMPULSE,
            ..state.trex.clone()
        },
        ..state.clone()
    }
}

// ── Per-frame tick (pure) ────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Once the game is over the trex is frozen and the score can no longer
/// change; fallers already in the air keep advancing until they expire.
pub fn tick(state: &World) -> World {
    let frame = state.frame + 1;
    let playing = state.status == GameStatus::Playing;
    let mut trex = state.trex.clone();
    let mut score = state.score;

    if playing {
        // ── 1. Horizontal movement ───────────────────────────────────────────
        trex.x += trex.vx;

        // ── 2. Jump arc, then gravity toward the resting height ──────────────
        if trex.is_jumping {
            trex.y -= trex.jump_impulse as f32;
            trex.jump_impulse -= 1;
            if trex.jump_impulse < 0 {
                trex.is_jumping = false;
            }
        } else if trex.y < state.height * REST_FACTOR {
            trex.y += GRAVITY_STEP;
        }

        // ── 3. Rest on the first overlapping platform ────────────────────────
        for platform in &state.platforms {
            if overlaps(&trex_rect(&trex), &platform_rect(platform)) {
                if !trex.is_jumping {
                    trex.y = platform.y - PLATFORM_SNAP * TREX_H * trex.scale_y;
                }
                break;
            }
        }
    }

    // ── 4. Advance fallers, drop the spent ones ──────────────────────────────
    let mut meteors = state.meteors.clone();
    if frame % RECYCLE_FRAMES == 0 {
        if let Some(first) = meteors.first_mut() {
            first.y = -10.0;
        }
    }
    let meteors: Vec<Faller> = meteors
        .iter()
        .filter_map(|m| {
            let moved = Faller { y: m.y + m.speed, ..*m };
            if moved.y > state.height {
                None
            } else {
                Some(moved)
            }
        })
        .collect();

    // Meteor contact: −1 and a squash on every overlapping tick; the meteor
    // itself keeps falling.
    if playing {
        for meteor in &meteors {
            if overlaps(&trex_rect(&trex), &faller_rect(meteor, METEOR_W, METEOR_H)) {
                score += METEOR_SCORE;
                trex.scale_x *= SQUASH_X;
                trex.scale_y *= SQUASH_Y;
            }
        }
    }

    // Meat and raptors are consumed on contact.
    let mut food: Vec<Faller> = Vec::with_capacity(state.food.len());
    for item in &state.food {
        let moved = Faller { y: item.y + item.speed, ..*item };
        if moved.y > state.height {
            continue;
        }
        if playing && overlaps(&trex_rect(&trex), &faller_rect(&moved, MEAT_W, MEAT_H)) {
            score += MEAT_SCORE;
            trex.scale_x += MEAT_GROWTH;
            trex.scale_y += MEAT_GROWTH;
        } else {
            food.push(moved);
        }
    }

    let mut raptors: Vec<Faller> = Vec::with_capacity(state.raptors.len());
    for raptor in &state.raptors {
        let moved = Faller { y: raptor.y + raptor.speed, ..*raptor };
        if moved.y > state.height {
            continue;
        }
        if playing && overlaps(&trex_rect(&trex), &faller_rect(&moved, RAPTOR_W, RAPTOR_H)) {
            score += RAPTOR_SCORE;
            trex.scale_x += RAPTOR_GROWTH;
            trex.scale_y += RAPTOR_GROWTH;
        } else {
            raptors.push(moved);
        }
    }

    if playing {
        // ── 5. Wall bounce ───────────────────────────────────────────────────
        if trex.x > state.width {
            trex.vx = -TREX_SPEED;
            trex.facing = Facing::Left;
        } else if trex.x < 0.0 {
            trex.vx = TREX_SPEED;
            trex.facing = Facing::Right;
        }
        if trex.y < 0.0 {
            trex.y = 0.0;
            trex.is_jumping = false;
        }
    }

    // ── 6. Win/lose thresholds — terminal once crossed ───────────────────────
    let status = if !playing {
        state.status.clone()
    } else if score >= WIN_SCORE {
        GameStatus::Won
    } else if score <= LOSE_SCORE {
        GameStatus::Lost
    } else {
        GameStatus::Playing
    };
    if status != GameStatus::Playing {
        trex.vx = 0.0;
        trex.is_jumping = false;
        trex.jump_impulse = 0;
    }

    // ── 7. Status line ───────────────────────────────────────────────────────
    let status_text = match status {
        GameStatus::Playing => format!("Score: {}", score),
        GameStatus::Won => WIN_TEXT.to_string(),
        GameStatus::Lost => LOSE_TEXT.to_string(),
    };

    World {
        trex,
        meteors,
        food,
        raptors,
        score,
        status,
        status_text,
        frame,
        ..state.clone()
    }
}
