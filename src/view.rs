use crate::game::{FIELD_HEIGHT, GAP_HEIGHT, Game, PIPE_WIDTH, PLAYER_SIZE, Phase};

/// Absolute CSS box inside the field, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipePlacement {
    pub top: Placement,
    pub bottom: Placement,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    None,
    StartPrompt,
    GameOver { score: u32 },
}

/// Everything the stage needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub player: Placement,
    pub pipes: Vec<PipePlacement>,
    pub score: u32,
    pub overlay: Overlay,
}

pub const START_PROMPT: &str = "Press Space or \u{2191} to Start";
pub const GAME_OVER_TITLE: &str = "Game Over";
pub const RESTART_LABEL: &str = "Restart";

pub fn layout(game: &Game) -> Frame {
    let player = Placement {
        left: game.player.x,
        top: game.player.y,
        width: PLAYER_SIZE,
        height: PLAYER_SIZE,
    };

    let pipes = game
        .pipes
        .iter()
        .map(|pipe| {
            let bottom_top = pipe.gap_y + GAP_HEIGHT;
            PipePlacement {
                top: Placement {
                    left: pipe.x,
                    top: 0.0,
                    width: PIPE_WIDTH,
                    height: pipe.gap_y,
                },
                bottom: Placement {
                    left: pipe.x,
                    top: bottom_top,
                    width: PIPE_WIDTH,
                    height: FIELD_HEIGHT - bottom_top,
                },
            }
        })
        .collect();

    let overlay = match game.phase {
        Phase::Running => Overlay::None,
        Phase::Idle => Overlay::StartPrompt,
        Phase::GameOver => Overlay::GameOver { score: game.score },
    };

    Frame {
        player,
        pipes,
        score: game.score,
        overlay,
    }
}

pub fn score_label(score: u32) -> String {
    format!("Score: {}", score)
}

pub fn final_score_label(score: u32) -> String {
    format!("Your Score: {}", score)
}
