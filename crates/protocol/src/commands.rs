use serde::{Deserialize, Serialize};

use crate::label::Label;
use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// Renderer backends emit a `Vec<RenderCommand>` per paint pass; frontends
/// consume the list sequentially. Each command carries all the data it needs,
/// so a command stream can be rendered, serialized, or diffed in isolation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally with a text label and the logical
    /// frame identifier for hit-testing / selection.
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
        label: Option<Label>,
        frame_id: Option<u64>,
    },

    /// Draw a text string at a position.
    DrawText {
        position: Point,
        text: Label,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Restrict subsequent drawing to a rectangular region.
    SetClip { rect: Rect },

    /// Remove the active clip region.
    ClearClip,

    /// Begin a logical group (e.g. a pane). Frontends may use this for
    /// batching or layer separation.
    BeginGroup { id: Label, label: Option<Label> },

    /// End the current group.
    EndGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_rect_survives_serde() {
        let cmd = RenderCommand::DrawRect {
            rect: Rect::new(10.0, 1.0, 40.0, 1.0),
            color: ThemeToken::FlameHot,
            border_color: Some(ThemeToken::Border),
            label: Some("child".into()),
            frame_id: Some(1),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: RenderCommand = serde_json::from_str(&json).unwrap();
        match back {
            RenderCommand::DrawRect {
                rect,
                label,
                frame_id,
                ..
            } => {
                assert_eq!(rect, Rect::new(10.0, 1.0, 40.0, 1.0));
                assert_eq!(label.unwrap(), "child");
                assert_eq!(frame_id, Some(1));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
