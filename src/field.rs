use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Rectangle},
        Widget,
    },
};

use crate::{
    config::LineupConfig,
    layout::{markings::Marking, orchestrator::LayoutEntry, CanvasSize, LineupLayout},
    model::{FieldCoordinate, LineupData},
};

/// Gap between a player circle and its name label, in canvas pixels.
const LABEL_GAP: f64 = 12.0;
const SUBSTITUTE_RADIUS: f64 = 15.0;

pub fn parse_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color::Rgb(r, g, b)
    } else {
        Color::White
    }
}

/// Maps a terminal cell inside `area` to field space, undoing the y-flip
/// and the left substitutes panel shift. `None` outside the area.
pub fn cell_to_field(area: Rect, canvas: CanvasSize, column: u16, row: u16) -> Option<FieldCoordinate> {
    if area.width == 0
        || area.height == 0
        || column < area.left()
        || column >= area.right()
        || row < area.top()
        || row >= area.bottom()
    {
        return None;
    }
    let fx = (f64::from(column - area.left()) + 0.5) / f64::from(area.width);
    let fy = (f64::from(row - area.top()) + 0.5) / f64::from(area.height);
    Some(FieldCoordinate::new(
        fx * canvas.width - canvas.origin_x,
        fy * canvas.height,
    ))
}

pub struct FieldDisplay<'a> {
    layout: &'a LineupLayout,
    config: &'a LineupConfig,
    home_color: Color,
    away_color: Color,
}

impl<'a> FieldDisplay<'a> {
    /// Sheet colours from the lineup win over the configured team colours.
    pub fn new(layout: &'a LineupLayout, config: &'a LineupConfig, lineup: &LineupData) -> Self {
        let home = lineup.home_team.color.as_deref().unwrap_or(&config.home_team_color);
        let away = lineup.away_team.color.as_deref().unwrap_or(&config.away_team_color);
        Self {
            layout,
            config,
            home_color: parse_color(home),
            away_color: parse_color(away),
        }
    }

    fn team_color(&self, is_home_team: bool) -> Color {
        if is_home_team {
            self.home_color
        } else {
            self.away_color
        }
    }

    // canvas space is y-up and starts at the panel edge
    fn project(&self, c: FieldCoordinate) -> (f64, f64) {
        let canvas = self.layout.canvas;
        (c.x + canvas.origin_x, canvas.height - c.y)
    }

    fn paint_markings(&self, ctx: &mut Context, color: Color) {
        for marking in &self.layout.markings {
            match *marking {
                Marking::Rect { x, y, width, height } => {
                    // bottom-left corner once flipped
                    let (left, bottom) = self.project(FieldCoordinate::new(x, y + height));
                    ctx.draw(&Rectangle {
                        x: left,
                        y: bottom,
                        width,
                        height,
                        color,
                    });
                }
                Marking::Line { from, to } => {
                    let (x1, y1) = self.project(from);
                    let (x2, y2) = self.project(to);
                    ctx.draw(&CanvasLine::new(x1, y1, x2, y2, color));
                }
                Marking::Circle { center, radius } => {
                    let (x, y) = self.project(center);
                    ctx.draw(&Circle { x, y, radius, color });
                }
            }
        }
    }

    fn paint_player(&self, ctx: &mut Context, entry: &LayoutEntry, char_width: f64) {
        let color = self.team_color(entry.is_home_team);
        let radius = self.config.player_circle_size;
        let (x, y) = self.project(entry.coordinate);
        ctx.draw(&Circle { x, y, radius, color });

        if self.config.show_jersey_numbers {
            if let Some(number) = entry.assignment.player.jersey_number {
                let text = number.to_string();
                let left = x - text.len() as f64 * char_width / 2.0;
                ctx.print(left, y, Span::styled(text, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)));
            }
        }

        if self.config.show_player_names {
            let name = entry.assignment.player.name.clone();
            let label_y = if entry.place_label_above {
                y + radius + LABEL_GAP
            } else {
                y - radius - LABEL_GAP
            };
            let left = x - name.chars().count() as f64 * char_width / 2.0;
            ctx.print(left, label_y, Span::styled(name, Style::default().fg(Color::White)));
        }
    }
}

impl Widget for FieldDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 5 {
            return;
        }

        let canvas = self.layout.canvas;
        let line_color = parse_color(&self.config.line_color);
        let char_width = canvas.width / f64::from(area.width);

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(parse_color(&self.config.field_color))
            .x_bounds([0.0, canvas.width])
            .y_bounds([0.0, canvas.height])
            .paint(|ctx| {
                self.paint_markings(ctx, line_color);
                ctx.layer();

                for label in &self.layout.team_labels {
                    let (x, y) = self.project(label.position);
                    let left = x - label.name.chars().count() as f64 * char_width / 2.0;
                    let style = Style::default()
                        .fg(self.team_color(label.is_home_team))
                        .add_modifier(Modifier::BOLD);
                    ctx.print(left, y, Span::styled(label.name.clone(), style));
                }

                for entry in &self.layout.players {
                    self.paint_player(ctx, entry, char_width);
                }

                // substitutes always carry their label below
                for slot in &self.layout.substitutes {
                    let color = self.team_color(slot.is_home_team);
                    let (x, y) = self.project(slot.coordinate);
                    ctx.draw(&Circle {
                        x,
                        y,
                        radius: SUBSTITUTE_RADIUS,
                        color,
                    });
                    if self.config.show_jersey_numbers {
                        if let Some(number) = slot.assignment.player.jersey_number {
                            ctx.print(x - char_width / 2.0, y, Span::styled(number.to_string(), Style::default().fg(color)));
                        }
                    }
                    if self.config.show_player_names {
                        ctx.print(
                            x - SUBSTITUTE_RADIUS,
                            y - SUBSTITUTE_RADIUS - LABEL_GAP,
                            Span::raw(slot.assignment.player.name.clone()),
                        );
                    }
                }

                if let Some(ball) = self.layout.ball {
                    let (x, y) = self.project(ball);
                    ctx.draw(&Circle {
                        x,
                        y,
                        radius: self.config.ball.size,
                        color: Color::White,
                    });
                }
            })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;
    use crate::model::{Player, PlayerAssignment, PositionCategory, Team, TeamSheet};

    fn assert_close(c: FieldCoordinate, x: f64, y: f64) {
        assert!((c.x - x).abs() < 1e-6 && (c.y - y).abs() < 1e-6, "got ({}, {})", c.x, c.y);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("FF5722"), Color::Rgb(255, 87, 34));
        assert_eq!(parse_color("#2196F3"), Color::Rgb(33, 150, 243));
        assert_eq!(parse_color("red"), Color::White);
    }

    #[test]
    fn test_cell_to_field_covers_canvas() {
        let area = Rect::new(10, 5, 80, 30);
        let canvas = CanvasSize {
            width: 800.0,
            height: 600.0,
            origin_x: 0.0,
        };
        let top_left = cell_to_field(area, canvas, 10, 5).unwrap();
        assert_close(top_left, 5.0, 10.0);

        let bottom_right = cell_to_field(area, canvas, 89, 34).unwrap();
        assert_close(bottom_right, 795.0, 590.0);

        assert!(cell_to_field(area, canvas, 9, 5).is_none());
        assert!(cell_to_field(area, canvas, 90, 5).is_none());
    }

    #[test]
    fn test_cell_to_field_left_panel_shift() {
        let area = Rect::new(0, 0, 98, 60);
        let canvas = CanvasSize {
            width: 980.0,
            height: 600.0,
            origin_x: 180.0,
        };
        // first column sits inside the substitutes panel
        assert_close(cell_to_field(area, canvas, 0, 0).unwrap(), -175.0, 5.0);
        assert_close(cell_to_field(area, canvas, 18, 0).unwrap(), 5.0, 5.0);
    }

    #[test]
    fn test_render_does_not_panic() {
        let keeper = PlayerAssignment::new(
            Player {
                id: 1,
                name: "Keeper".into(),
                jersey_number: Some(1),
            },
            Team::Home,
            PositionCategory::Goalkeeper,
        );
        let lineup = LineupData {
            match_id: None,
            home_team: TeamSheet {
                name: "Home".into(),
                color: Some("000000".into()),
                players: vec![keeper],
            },
            away_team: TeamSheet::default(),
        };
        let mut config = LineupConfig::default();
        config.ball.enabled = true;
        config.substitutes.enabled = true;
        let layout = compute_layout(&lineup, &config, None, None).unwrap();

        let area = Rect::new(0, 0, 100, 40);
        let mut buf = Buffer::empty(area);
        let display = FieldDisplay::new(&layout, &config, &lineup);
        assert_eq!(display.home_color, Color::Rgb(0, 0, 0));
        assert_eq!(display.away_color, parse_color(&config.away_team_color));
        display.render(area, &mut buf);

        let rendered: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        assert!(rendered.contains("Keeper"));
    }
}
