use crate::effects::fx::parse_fx;
use crate::effects::transitions::parse_transition;
use crate::foundation::error::{FrameStackError, FrameStackResult};
use crate::resource::kind::ResourceKind;
use crate::timeline::track::Track;

/// Effect descriptor carried by filter, effect and transition resources.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FxSpec {
    /// Routine name, e.g. `"sepia"`, `"blur"`, `"wipe"`.
    pub kind: String,
    /// Routine parameters.
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Library entry describing an asset or attachment the editor can place on the timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Stable identifier.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Kind tag.
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    /// Source URL (media for audio/video, animated preview otherwise).
    pub src: String,
    /// Static thumbnail URL.
    #[serde(default)]
    pub thumbnail: String,
    /// Timeline duration as `mm:ss`.
    #[serde(default)]
    pub duration: String,
    /// Routine descriptor for filter, effect and transition resources.
    #[serde(default)]
    pub fx: Option<FxSpec>,
    /// Album title (audio resources).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    /// Artist or author (audio resources).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Ready to use (downloaded).
    #[serde(default)]
    pub usable: bool,
    /// Show the add affordance.
    #[serde(default)]
    pub show_add: bool,
    /// Marked for collection.
    #[serde(default)]
    pub checked: bool,
    /// Starred.
    #[serde(default)]
    pub favorite: bool,
    /// Backed by a local file.
    #[serde(default)]
    pub referenced: bool,
    /// Currently selected.
    #[serde(default)]
    pub active: bool,
    /// Source unavailable.
    #[serde(default)]
    pub offline: bool,
}

impl Resource {
    /// Create a resource with the kind's default duration and all flags cleared.
    pub fn new(kind: ResourceKind, name: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            kind,
            src: src.into(),
            thumbnail: String::new(),
            duration: kind.default_duration().to_owned(),
            fx: None,
            album: None,
            author: None,
            usable: false,
            show_add: false,
            checked: false,
            favorite: false,
            referenced: false,
            active: false,
            offline: false,
        }
    }

    /// Attach a routine descriptor.
    pub fn with_fx(mut self, kind: impl Into<String>, params: serde_json::Value) -> Self {
        self.fx = Some(FxSpec {
            kind: kind.into(),
            params,
        });
        self
    }

    /// Parse a resource from JSON, filling in the kind's default duration when absent.
    pub fn from_json_str(s: &str) -> FrameStackResult<Self> {
        let mut res: Resource =
            serde_json::from_str(s).map_err(|e| FrameStackError::serde(e.to_string()))?;
        res.fill_defaults();
        Ok(res)
    }

    /// Replace a blank duration with the kind's default.
    pub(crate) fn fill_defaults(&mut self) {
        if self.duration.trim().is_empty() {
            self.duration = self.kind.default_duration().to_owned();
        }
    }

    /// Duration in whole seconds parsed from `mm:ss`.
    pub fn duration_secs(&self) -> FrameStackResult<u64> {
        let (m, s) = self.duration.split_once(':').ok_or_else(|| {
            FrameStackError::validation(format!("duration '{}' must be mm:ss", self.duration))
        })?;
        let parse = |v: &str| -> FrameStackResult<u64> {
            v.trim().parse::<u64>().map_err(|_| {
                FrameStackError::validation(format!("duration '{}' must be mm:ss", self.duration))
            })
        };
        let (m, s) = (parse(m)?, parse(s)?);
        if s >= 60 {
            return Err(FrameStackError::validation(format!(
                "duration '{}' has seconds >= 60",
                self.duration
            )));
        }
        Ok(m * 60 + s)
    }

    /// Build the track for this resource.
    ///
    /// Video and picture resources both become [`Track::Video`]. Filter, effect and transition
    /// resources require an [`FxSpec`].
    pub fn to_track(&self) -> FrameStackResult<Track> {
        match self.kind {
            ResourceKind::Video | ResourceKind::Picture => Ok(Track::Video),
            ResourceKind::Audio => Ok(Track::Audio),
            ResourceKind::Sticker => Ok(Track::Sticker),
            ResourceKind::Text => Ok(Track::Text),
            ResourceKind::Filter => Ok(Track::Filter(self.parse_fx_spec()?)),
            ResourceKind::Effect => Ok(Track::Effect(self.parse_fx_spec()?)),
            ResourceKind::Transition => {
                let spec = self.fx_spec()?;
                Ok(Track::Transition(parse_transition(&spec.kind, &spec.params)?))
            }
        }
    }

    fn fx_spec(&self) -> FrameStackResult<&FxSpec> {
        self.fx.as_ref().ok_or_else(|| {
            FrameStackError::validation(format!(
                "{} resource '{}' has no fx descriptor",
                self.kind, self.name
            ))
        })
    }

    fn parse_fx_spec(&self) -> FrameStackResult<crate::effects::fx::Fx> {
        let spec = self.fx_spec()?;
        parse_fx(&spec.kind, &spec.params)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resource/model.rs"]
mod tests;
