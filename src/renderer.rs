use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::entities::{GameState, HumanKind, Outcome, PowerUpKind};
use crate::world::{GameWorld, Status};

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub world: &'a GameWorld,
    pub area: Rect,
    pub frame_count: u64,
    pub fps: u32,
}

/// Handles all rendering responsibilities for the game
#[derive(Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::Title => self.render_title(frame, view),
            GameState::HowToPlay => self.render_how_to_play(frame, view),
            GameState::About => self.render_about(frame, view),
            GameState::Playing => self.render_game(frame, view),
            GameState::Paused => self.render_paused(frame, view),
            GameState::GameOver(outcome) => self.render_game_over(frame, view, outcome),
        }
    }

    fn render_title(&self, frame: &mut Frame, view: &RenderView) {
        let pulse = if (view.frame_count / 30).is_multiple_of(2) {
            Color::LightRed
        } else {
            Color::Red
        };

        let text = vec![
            Line::from(""),
            Line::from(""),
            Line::from("♥  C U P I D ' S   A R R O W  ♥")
                .centered()
                .bold()
                .fg(pulse),
            Line::from(""),
            Line::from("Make the humans fall in love before the clock runs out.")
                .centered()
                .white(),
            Line::from(""),
            Line::from(""),
            Line::from("[Enter] New game").centered().yellow().bold(),
            Line::from("[H] How to play").centered().cyan(),
            Line::from("[A] About").centered().magenta(),
            Line::from("[Q] Quit").centered().dark_gray(),
        ];

        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red)),
                )
                .alignment(Alignment::Center),
            view.area,
        );
    }

    fn render_how_to_play(&self, frame: &mut Frame, view: &RenderView) {
        let config = view.world.config();
        let heading = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled("HOW TO PLAY", heading)).centered(),
            Line::from(""),
            Line::from("Move Cupid with WASD or the arrow keys, shoot arrows with Space."),
            Line::from(format!(
                "Each arrow carries Cupid's strength. Survive {} seconds to win;",
                config.round_secs
            )),
            Line::from("bumping into a human costs Cupid that human's strength."),
            Line::from(format!(
                "At {}s a boss appears and calls in lackeys until it falls in love.",
                config.boss_at_secs
            )),
            Line::from(""),
            Line::from(Span::styled("POWER-UPS", heading)).centered(),
            Line::from(""),
        ];

        for kind in PowerUpKind::ALL {
            let effect = match kind {
                PowerUpKind::Heart => "doubles Cupid's strength".to_string(),
                PowerUpKind::Wings => format!("immortality for {}s", config.wings_secs),
                PowerUpKind::Dolphin => format!("faster movement for {}s", config.dolphin_secs),
                PowerUpKind::Autopilot => {
                    format!("automatic fire for {}s", config.autopilot_secs)
                }
                PowerUpKind::Snowflake => {
                    format!("freezes humans and clock for {}s", config.snowflake_secs)
                }
            };
            text.push(Line::from(vec![
                Span::styled(
                    format!("[{}] {:<10}", kind.get_char(), kind.get_name()),
                    Style::default()
                        .fg(kind_color(kind))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(effect),
            ]));
        }

        text.push(Line::from(""));
        text.push(Line::from("[B] Back   [Q] Quit").centered().dark_gray());

        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                )
                .alignment(Alignment::Center),
            view.area,
        );
    }

    fn render_about(&self, frame: &mut Frame, view: &RenderView) {
        let heading = Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled("ABOUT", heading)).centered(),
            Line::from(""),
            Line::from("A terminal remake of \"Stup!d Cup¡d\", a mini-project game"),
            Line::from("by Rhys Allen Abejay for CMSC 22."),
            Line::from(""),
            Line::from(Span::styled("CREDITS", heading)).centered(),
            Line::from(""),
            Line::from("Game design and characters: Rhys Allen Abejay"),
            Line::from("Terminal UI: ratatui and crossterm"),
            Line::from("Sound: rodio"),
            Line::from(""),
            Line::from("[B] Back   [Q] Quit").centered().dark_gray(),
        ];

        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::LightRed)),
                )
                .alignment(Alignment::Center),
            view.area,
        );
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let world = view.world;
        let field = world.field();
        let status = world.status();

        // Bordered field, centered horizontally below the status bar
        let full_width = field.width + 2;
        let full_height = field.height + 2;
        let field_rect = Rect {
            x: area.x + area.width.saturating_sub(full_width) / 2,
            y: area.y + 1,
            width: full_width,
            height: full_height,
        }
        .intersection(area);

        let border_color = if status.frozen {
            Color::Cyan
        } else if status.frenzy {
            Color::Magenta
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(field_rect);
        frame.render_widget(block, field_rect);

        let buffer = frame.buffer_mut();

        // Drifting background hearts
        let shift = (view.frame_count / 6) % 23;
        for y in 0..inner.height {
            for x in 0..inner.width {
                if (x as u64 + y as u64 * 7 + 23 - shift).is_multiple_of(23) {
                    put(buffer, inner, x, y, "·", Style::default().fg(Color::DarkGray));
                }
            }
        }

        for power_up in &world.power_ups {
            put(
                buffer,
                inner,
                power_up.x,
                power_up.y,
                &power_up.get_sprite(),
                Style::default()
                    .fg(kind_color(power_up.kind))
                    .add_modifier(Modifier::BOLD),
            );
        }

        for human in &world.humans {
            let color = if human.is_flashing() {
                Color::White
            } else {
                match human.kind {
                    HumanKind::Normal => Color::LightMagenta,
                    HumanKind::Lackey => Color::LightBlue,
                    HumanKind::Boss => Color::Red,
                }
            };
            let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
            for (i, line) in human.get_sprite_lines().iter().enumerate() {
                put(buffer, inner, human.x, human.y + i as u16, line, style);
            }
            if human.y > 0 {
                put(
                    buffer,
                    inner,
                    human.x,
                    human.y - 1,
                    &human.health.to_string(),
                    Style::default().fg(Color::White),
                );
            }
        }

        for arrow in &world.arrows {
            put(
                buffer,
                inner,
                arrow.x,
                arrow.y,
                arrow.get_sprite(),
                Style::default().fg(Color::Yellow),
            );
        }

        let cupid = &world.cupid;
        if cupid.is_alive() {
            let color = if cupid.is_flashing() {
                Color::White
            } else if cupid.immortal {
                Color::LightYellow
            } else {
                Color::LightRed
            };
            let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
            for (i, line) in cupid.get_sprite_lines().iter().enumerate() {
                put(buffer, inner, cupid.x, cupid.y + i as u16, line, style);
            }
            if cupid.y > 0 {
                put(
                    buffer,
                    inner,
                    cupid.x,
                    cupid.y - 1,
                    &cupid.strength.to_string(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                );
            }
        }

        let paused = view.game_state == GameState::Paused;
        let status_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(status_line(&status, paused, view.fps)),
            status_area,
        );

        let controls = Line::from(vec![Span::styled(
            "[WASD/Arrows: Move] [Space: Shoot] [P: Pause] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_y = field_rect.bottom();
        if controls_y < area.bottom() {
            let controls_area = Rect {
                x: area.x + 1,
                y: controls_y,
                width: area.width.saturating_sub(2),
                height: 1,
            };
            frame.render_widget(Paragraph::new(controls).centered(), controls_area);
        }
    }

    /// Renders the pause screen with overlay
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);

        let area = view.area;
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
            Line::from("Press M for the main menu").centered().white(),
        ];

        let pause_area = Rect {
            x: area.x + area.width.saturating_sub(32) / 2,
            y: area.y + area.height.saturating_sub(7) / 2,
            width: 32,
            height: 7,
        }
        .intersection(area);

        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    /// Renders the game over screen
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView, outcome: Outcome) {
        let status = view.world.status();
        let (banner, verdict, color) = match outcome {
            Outcome::Won => (
                "║      YOU WIN!             ║",
                "Love is in the air.",
                Color::LightRed,
            ),
            Outcome::Lost => (
                "║      GAME OVER!           ║",
                "Cupid has lost all of his strength.",
                Color::Red,
            ),
        };

        let collected: u32 = status.collected.iter().map(|(_, count)| count).sum();
        let mut text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().fg(color),
            Line::from(banner).centered().fg(color).bold(),
            Line::from("╚═══════════════════════════╝").centered().fg(color),
            Line::from(""),
            Line::from(verdict).centered().white(),
            Line::from(""),
            Line::from(format!("Humans in love: {}", status.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!("Time: {}", format_time(status.elapsed_secs)))
                .centered()
                .cyan()
                .bold(),
            Line::from(format!("Power-ups collected: {collected}"))
                .centered()
                .magenta(),
        ];
        if collected > 0 {
            text.push(collected_line(&status).centered());
        }
        text.extend([
            Line::from(""),
            Line::from("Press R to play again").centered().white(),
            Line::from("Press M for the main menu").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ]);

        frame.render_widget(
            Paragraph::new(text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            view.area,
        );
    }
}

/// Writes `text` at field coordinates, clipped to the visible field.
fn put(buffer: &mut Buffer, inner: Rect, x: u16, y: u16, text: &str, style: Style) {
    if x >= inner.width || y >= inner.height {
        return;
    }
    let max_width = (inner.width - x) as usize;
    buffer.set_stringn(inner.x + x, inner.y + y, text, max_width, style);
}

fn kind_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::Heart => Color::Red,
        PowerUpKind::Wings => Color::Yellow,
        PowerUpKind::Dolphin => Color::Blue,
        PowerUpKind::Autopilot => Color::Green,
        PowerUpKind::Snowflake => Color::Cyan,
    }
}

fn format_time(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn status_line(status: &Status, paused: bool, fps: u32) -> Line<'static> {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();

    if paused {
        spans.push(Span::styled(
            "Paused ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }
    if status.frenzy {
        spans.push(Span::styled(
            "Frenzy ",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ));
    }

    // Active effects in colour with seconds left, inactive ones dimmed
    for (kind, remaining) in &status.effects {
        let span = match remaining {
            Some(secs) => Span::styled(
                format!("{}{}s ", kind.get_char(), secs),
                Style::default()
                    .fg(kind_color(*kind))
                    .add_modifier(Modifier::BOLD),
            ),
            None => Span::styled(format!("{} ", kind.get_char()), label),
        };
        spans.push(span);
    }

    spans.push(Span::styled(" Time: ", label));
    let time_style = if status.frozen {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        value
    };
    let frozen_mark = if status.frozen { "❄" } else { "" };
    spans.push(Span::styled(
        format!(
            "{}{} / {}",
            frozen_mark,
            format_time(status.elapsed_secs),
            format_time(status.round_secs)
        ),
        time_style,
    ));

    spans.push(Span::styled("  Score: ", label));
    spans.push(Span::styled(
        status.score.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ));

    spans.push(Span::styled("  Strength: ", label));
    let strength_style = if status.immortal {
        Style::default()
            .fg(Color::LightYellow)
            .add_modifier(Modifier::BOLD)
    } else if status.strength > 50 {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    };
    let immortal_mark = if status.immortal { " (immortal)" } else { "" };
    spans.push(Span::styled(
        format!("{}{}", status.strength, immortal_mark),
        strength_style,
    ));

    spans.push(Span::styled("  ", label));
    spans.extend(collected_line(status).spans);

    spans.push(Span::styled(format!("  FPS: {fps}"), label));

    Line::from(spans)
}

/// One glyph per collected power-up, grouped by kind.
fn collected_line(status: &Status) -> Line<'static> {
    let spans: Vec<Span> = status
        .collected
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(kind, count)| {
            Span::styled(
                kind.get_char().to_string().repeat(*count as usize),
                Style::default().fg(kind_color(*kind)),
            )
        })
        .collect();
    Line::from(spans)
}
