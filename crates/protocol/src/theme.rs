use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the frontend's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    FlameHot,
    FlameWarm,
    FlameCold,
    FlameNeutral,

    PaneBackground,
    PaneBorder,
    PaneHeaderBackground,
    PaneHeaderText,

    TextPrimary,
    TextSecondary,
    TextMuted,

    SelectionHighlight,
    HoverHighlight,

    Background,
    Surface,
    Border,

    // Timeline pane
    TimelineBackground,
    TimelineDensity,
    TimelineViewport,
    TimelineHandle,
}
