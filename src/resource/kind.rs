/// Kind tag shared by resources and the tracks built from them.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Decoded video source.
    Video,
    /// Audio-only source; renders nothing.
    Audio,
    /// Static picture.
    Picture,
    /// Animated sticker overlay.
    Sticker,
    /// Text overlay.
    Text,
    /// Colour/look filter.
    Filter,
    /// Visual effect.
    Effect,
    /// Transition between states of the frame.
    Transition,
}

impl ResourceKind {
    /// Every kind, in declaration order.
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Video,
        ResourceKind::Audio,
        ResourceKind::Picture,
        ResourceKind::Sticker,
        ResourceKind::Text,
        ResourceKind::Filter,
        ResourceKind::Effect,
        ResourceKind::Transition,
    ];

    /// Sticker and text are drawn as scene overlays, never through the buffer chain.
    pub fn is_overlay(self) -> bool {
        matches!(self, Self::Sticker | Self::Text)
    }

    /// Whether attachments of this kind take part in the buffer-chained composite.
    pub fn is_chainable(self) -> bool {
        !self.is_overlay()
    }

    /// Default timeline duration (`mm:ss`) for newly created resources of this kind.
    pub fn default_duration(self) -> &'static str {
        match self {
            Self::Filter | Self::Effect => "00:03",
            Self::Text => "03:03",
            Self::Transition => "00:01",
            Self::Video | Self::Audio | Self::Picture | Self::Sticker => "00:00",
        }
    }

    /// Stable snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Picture => "picture",
            Self::Sticker => "sticker",
            Self::Text => "text",
            Self::Filter => "filter",
            Self::Effect => "effect",
            Self::Transition => "transition",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resource/kind.rs"]
mod tests;
