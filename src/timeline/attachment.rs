use crate::foundation::core::{FrameIndex, FrameSpan};
use crate::foundation::error::{FrameStackError, FrameStackResult};
use crate::resource::model::Resource;
use crate::timeline::track::Track;

/// One timeline-anchored track instance with a closed active span.
#[derive(Clone, Debug)]
pub struct Attachment {
    /// First active frame (inclusive).
    pub start_frame: u64,
    /// Last active frame (inclusive).
    pub end_frame: u64,
    /// Behaviour applied while active.
    pub track: Track,
}

impl Attachment {
    /// Create an attachment active over `[start_frame, end_frame]`.
    pub fn new(start_frame: u64, end_frame: u64, track: Track) -> Self {
        Self {
            start_frame,
            end_frame,
            track,
        }
    }

    /// Active span.
    pub fn span(&self) -> FrameSpan {
        FrameSpan::new(self.start_frame, self.end_frame)
    }

    /// Whether this attachment takes part in the buffer chain at `frame`.
    ///
    /// Overlay kinds never do; everything else does when `frame` lies inside the closed span.
    /// Inverted spans are silently inert.
    pub fn is_active(&self, frame: FrameIndex) -> bool {
        self.track.kind().is_chainable() && self.span().contains(frame)
    }
}

/// Attachments active at `frame`, preserving input order.
pub fn active_attachments(
    attachments: &[Attachment],
    frame: FrameIndex,
) -> impl Iterator<Item = &Attachment> {
    attachments.iter().filter(move |a| a.is_active(frame))
}

/// Serialized attachment: a resource anchored to a closed frame span.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentSpec {
    /// First active frame (inclusive).
    pub start_frame: u64,
    /// Last active frame (inclusive).
    pub end_frame: u64,
    /// Resource providing the track.
    pub resource: Resource,
}

impl AttachmentSpec {
    /// Build the runtime attachment.
    pub fn to_attachment(&self) -> FrameStackResult<Attachment> {
        Ok(Attachment::new(
            self.start_frame,
            self.end_frame,
            self.resource.to_track()?,
        ))
    }

    /// Parse a JSON array of specs, filling each resource's default duration like
    /// [`Resource::from_json_str`].
    pub fn list_from_json_str(s: &str) -> FrameStackResult<Vec<Self>> {
        let mut specs: Vec<Self> =
            serde_json::from_str(s).map_err(|e| FrameStackError::serde(e.to_string()))?;
        for spec in &mut specs {
            spec.resource.fill_defaults();
        }
        Ok(specs)
    }
}

/// Parse a JSON array of [`AttachmentSpec`] into attachments, keeping order.
pub fn attachments_from_json_str(s: &str) -> FrameStackResult<Vec<Attachment>> {
    AttachmentSpec::list_from_json_str(s)?
        .iter()
        .map(AttachmentSpec::to_attachment)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/attachment.rs"]
mod tests;
