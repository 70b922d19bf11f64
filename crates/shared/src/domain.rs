use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of one mounted view instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewId(pub Uuid);

impl ViewId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleDirection {
    Increase,
    Decrease,
}

/// Document font scale in percent.
///
/// Always a multiple of [`FontScale::STEP`] inside `MIN..=MAX`; stepping past a
/// bound saturates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct FontScale(u16);

impl FontScale {
    pub const MIN: u16 = 80;
    pub const MAX: u16 = 150;
    pub const STEP: u16 = 10;
    pub const DEFAULT: FontScale = FontScale(100);

    /// Returns `None` for values outside the domain or off the step grid.
    pub fn new(percent: u16) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&percent) && percent % Self::STEP == 0 {
            Some(Self(percent))
        } else {
            None
        }
    }

    pub fn percent(self) -> u16 {
        self.0
    }

    pub fn step(self, direction: ScaleDirection) -> Self {
        let next = match direction {
            ScaleDirection::Increase => self.0.saturating_add(Self::STEP).min(Self::MAX),
            ScaleDirection::Decrease => self.0.saturating_sub(Self::STEP).max(Self::MIN),
        };
        Self(next)
    }

    pub fn can_increase(self) -> bool {
        self.0 < Self::MAX
    }

    pub fn can_decrease(self) -> bool {
        self.0 > Self::MIN
    }

    /// Position of the scale inside its domain, 0.0 at `MIN` and 1.0 at `MAX`.
    pub fn fill_ratio(self) -> f32 {
        f32::from(self.0 - Self::MIN) / f32::from(Self::MAX - Self::MIN)
    }
}

impl Default for FontScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FontScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u16> for FontScale {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("font scale {value}% is outside 80..=150 step 10"))
    }
}

impl From<FontScale> for u16 {
    fn from(value: FontScale) -> Self {
        value.0
    }
}

/// Document-level presentation markers that styling rules key off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    HighContrast,
    DyslexiaFont,
}

impl Marker {
    pub const ALL: [Marker; 2] = [Marker::HighContrast, Marker::DyslexiaFont];

    pub fn class_name(self) -> &'static str {
        match self {
            Self::HighContrast => "high-contrast",
            Self::DyslexiaFont => "dyslexia-font",
        }
    }
}

/// Shared presentation preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PresentationToggles {
    pub font_scale: FontScale,
    pub high_contrast: bool,
    pub dyslexia_font: bool,
}

impl PresentationToggles {
    pub fn marker(&self, marker: Marker) -> bool {
        match marker {
            Marker::HighContrast => self.high_contrast,
            Marker::DyslexiaFont => self.dyslexia_font,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Home,
    SignUp,
    Dashboard,
    Classroom,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::SignUp => "/signup",
            Self::Dashboard => "/dashboard",
            Self::Classroom => "/classroom",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonMode {
    #[default]
    Text,
    Simple,
    Audio,
    #[serde(rename = "3d")]
    ThreeD,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Happy,
    #[default]
    Neutral,
    Confused,
}
