use crate::game::{Game, Phase};

pub fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Running => "running",
        Phase::GameOver => "game_over",
    }
}

/// Text for the on-page diagnostics panel.
pub fn lines(game: &Game, frame_delta_ms: Option<f64>, last_event: &str) -> Vec<String> {
    let frame_line = match frame_delta_ms {
        Some(delta) if delta > 0.0 => {
            format!("frame: {:.1} ms ({:.0} fps)", delta, 1000.0 / delta)
        }
        _ => "frame: (pending)".to_string(),
    };

    vec![
        format!("status: {}", phase_name(game.phase)),
        format!("score: {}", game.score),
        format!("pipes: {}", game.pipes.len()),
        format!(
            "player: {:.1},{:.1} vy {:.2}",
            game.player.x, game.player.y, game.player.vy
        ),
        frame_line,
        format!("last_event: {}", last_event),
    ]
}
