use emberpane_protocol::{RenderCommand, ThemeToken};
use ratatui::{
    layout::Rect,
    style::Color,
};

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::FlameHot => Color::Red,
        ThemeToken::FlameWarm => Color::Yellow,
        ThemeToken::FlameCold => Color::Blue,
        ThemeToken::FlameNeutral => Color::Gray,
        ThemeToken::PaneBackground => Color::Black,
        ThemeToken::PaneBorder => Color::DarkGray,
        ThemeToken::PaneHeaderBackground => Color::DarkGray,
        ThemeToken::PaneHeaderText => Color::White,
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextSecondary => Color::Gray,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::SelectionHighlight => Color::Green,
        ThemeToken::HoverHighlight => Color::LightYellow,
        ThemeToken::Background => Color::Black,
        ThemeToken::Surface => Color::Black,
        ThemeToken::Border => Color::DarkGray,
        ThemeToken::TimelineBackground => Color::Black,
        ThemeToken::TimelineDensity => Color::Blue,
        ThemeToken::TimelineViewport => Color::DarkGray,
        ThemeToken::TimelineHandle => Color::LightBlue,
    }
}

/// Rasterize a command stream into terminal cells. One logical pixel maps
/// to one cell; sub-cell rects still paint a single cell so dense regions
/// stay visible.
pub fn draw_commands(frame: &mut ratatui::Frame<'_>, area: Rect, commands: &[RenderCommand]) {
    let buf = frame.buffer_mut();

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect, color, label, ..
            } => {
                if rect.x + rect.w < 0.0 || rect.y + rect.h < 0.0 {
                    continue;
                }
                let col = rect.x.max(0.0) as u16;
                let row = rect.y.max(0.0) as u16;
                let width = (rect.w.ceil() as u16).max(1);
                if col >= area.width || row >= area.height {
                    continue;
                }
                let width = width.min(area.width - col);

                let fg = theme_to_color(*color);
                let label_str = label.as_ref().map(|l| l.as_str()).unwrap_or("");
                let display: String = if (width as usize) >= label_str.len() + 2 {
                    format!(" {label_str:<w$}", w = (width as usize).saturating_sub(2))
                } else {
                    "█".repeat(width as usize)
                };

                for (i, ch) in display.chars().take(width as usize).enumerate() {
                    let x = area.x + col + i as u16;
                    let y = area.y + row;
                    if x < area.x + area.width && y < area.y + area.height {
                        buf[(x, y)].set_char(ch).set_fg(fg).set_bg(Color::Black);
                    }
                }
            }

            RenderCommand::DrawLine { from, to, color, .. } => {
                // Only vertical lines appear in the streams we rasterize
                // (timeline viewport handles).
                if (from.x - to.x).abs() > 0.5 {
                    continue;
                }
                let col = from.x.max(0.0) as u16;
                if col >= area.width {
                    continue;
                }
                let fg = theme_to_color(*color);
                let top = from.y.min(to.y).max(0.0) as u16;
                let bottom = (from.y.max(to.y) as u16).min(area.height);
                for row in top..bottom {
                    buf[(area.x + col, area.y + row)]
                        .set_char('│')
                        .set_fg(fg);
                }
            }

            RenderCommand::DrawText { .. }
            | RenderCommand::SetClip { .. }
            | RenderCommand::ClearClip
            | RenderCommand::BeginGroup { .. }
            | RenderCommand::EndGroup => {}
        }
    }
}
