use rand::Rng;

use crate::input::Input;

pub const FIELD_WIDTH: f64 = 480.0;
pub const FIELD_HEIGHT: f64 = 640.0;
pub const PLAYER_SIZE: f64 = 40.0;
pub const PLAYER_START_X: f64 = 64.0;
pub const PLAYER_START_Y: f64 = FIELD_HEIGHT / 2.0 - PLAYER_SIZE / 2.0;
pub const PLAYER_SPEED: f64 = 6.0;
pub const GRAVITY: f64 = 0.8;
pub const JUMP_VELOCITY: f64 = -12.0;
// A held jump key only fires again once the climb has slowed past this.
pub const JUMP_RETRIGGER_VELOCITY: f64 = -6.0;
pub const PIPE_WIDTH: f64 = 70.0;
pub const PIPE_SPEED: f64 = 2.6;
pub const PIPE_INTERVAL_MS: f64 = 1800.0;
pub const GAP_HEIGHT: f64 = 150.0;
pub const GAP_MARGIN: f64 = 60.0;

// Touching edges count as overlapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.left > other.right
            || self.right < other.left
            || self.top > other.bottom
            || self.bottom < other.top)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub vy: f64,
}

impl Player {
    pub fn spawn() -> Self {
        Self {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            vy: 0.0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            left: self.x,
            right: self.x + PLAYER_SIZE,
            top: self.y,
            bottom: self.y + PLAYER_SIZE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pipe {
    pub x: f64,
    pub gap_y: f64,
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: f64, gap_y: f64) -> Self {
        Self {
            x,
            gap_y,
            passed: false,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + PIPE_WIDTH
    }

    pub fn top_bounds(&self) -> Rect {
        Rect {
            left: self.x,
            right: self.right(),
            top: 0.0,
            bottom: self.gap_y,
        }
    }

    pub fn bottom_bounds(&self) -> Rect {
        Rect {
            left: self.x,
            right: self.right(),
            top: self.gap_y + GAP_HEIGHT,
            bottom: FIELD_HEIGHT,
        }
    }

    pub fn is_offscreen(&self) -> bool {
        self.right() <= 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    GameOver,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    pub player: Player,
    pub pipes: Vec<Pipe>,
    pub phase: Phase,
    pub score: u32,
    pub last_spawn: f64,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            player: Player::spawn(),
            pipes: Vec::new(),
            phase: Phase::Idle,
            score: 0,
            last_spawn: 0.0,
        }
    }

    pub fn running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    // No-op while a run is in progress.
    pub fn start(&mut self, now: f64) -> bool {
        if self.running() {
            return false;
        }

        self.player = Player::spawn();
        self.pipes.clear();
        self.score = 0;
        self.phase = Phase::Running;
        self.last_spawn = now;
        true
    }

    // `now` is the frame timestamp in milliseconds.
    pub fn step<R: Rng>(mut self, input: &Input, now: f64, rng: &mut R) -> Self {
        if !self.running() {
            return self;
        }

        self.spawn_if_due(now, rng);
        self.advance_pipes();
        self.move_player(input);
        self.score_and_collide();
        self
    }

    fn spawn_if_due<R: Rng>(&mut self, now: f64, rng: &mut R) {
        if now - self.last_spawn > PIPE_INTERVAL_MS {
            self.last_spawn = now;
            self.pipes.push(Pipe::new(FIELD_WIDTH, gap_offset(rng)));
        }
    }

    fn advance_pipes(&mut self) {
        for pipe in &mut self.pipes {
            pipe.x -= PIPE_SPEED;
        }
        self.pipes.retain(|pipe| !pipe.is_offscreen());
    }

    fn move_player(&mut self, input: &Input) {
        let player = &mut self.player;

        let vx = input.horizontal() * PLAYER_SPEED;
        player.x = (player.x + vx).clamp(0.0, FIELD_WIDTH - PLAYER_SIZE);

        if input.jump_held() && player.vy > JUMP_RETRIGGER_VELOCITY {
            player.vy = JUMP_VELOCITY;
        }
        player.vy += GRAVITY;
        player.y = (player.y + player.vy).clamp(0.0, FIELD_HEIGHT - PLAYER_SIZE);
    }

    fn score_and_collide(&mut self) {
        let bird = self.player.bounds();
        let mut hit = false;

        for pipe in &mut self.pipes {
            if !pipe.passed && pipe.right() < self.player.x {
                pipe.passed = true;
                self.score += 1;
            }

            if bird.overlaps(&pipe.top_bounds()) || bird.overlaps(&pipe.bottom_bounds()) {
                hit = true;
            }
        }

        if hit {
            self.phase = Phase::GameOver;
        }
    }
}

/// Random top edge of a new gap, keeping `GAP_MARGIN` clear above and below.
pub fn gap_offset<R: Rng>(rng: &mut R) -> f64 {
    rng.gen_range(GAP_MARGIN..FIELD_HEIGHT - GAP_HEIGHT - GAP_MARGIN)
}
