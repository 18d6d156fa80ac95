use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Fresh id of the form `<prefix>-<uuid v4>`.
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, uuid::Uuid::new_v4()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(EntryId, "entry");
id_newtype!(TierId, "tier");

/// Wire name of the unassigned pool in gesture payloads.
pub const UNASSIGNED_CONTAINER: &str = "unassigned";

/// A place an entry can live: the unassigned pool or exactly one tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContainerId {
    Unassigned,
    Tier(TierId),
}

impl ContainerId {
    pub fn tier(id: impl Into<String>) -> Self {
        Self::Tier(TierId::new(id))
    }

    pub fn is_unassigned(&self) -> bool {
        matches!(self, Self::Unassigned)
    }

    pub fn as_tier(&self) -> Option<&TierId> {
        match self {
            Self::Tier(id) => Some(id),
            Self::Unassigned => None,
        }
    }
}

impl From<String> for ContainerId {
    fn from(value: String) -> Self {
        if value == UNASSIGNED_CONTAINER {
            Self::Unassigned
        } else {
            Self::Tier(TierId(value))
        }
    }
}

impl From<&str> for ContainerId {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ContainerId> for String {
    fn from(value: ContainerId) -> Self {
        match value {
            ContainerId::Unassigned => UNASSIGNED_CONTAINER.to_string(),
            ContainerId::Tier(id) => id.0,
        }
    }
}

impl From<TierId> for ContainerId {
    fn from(value: TierId) -> Self {
        Self::Tier(value)
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unassigned => f.write_str(UNASSIGNED_CONTAINER),
            Self::Tier(id) => f.write_str(id.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    /// Opaque image reference, usually a `data:` URL.
    pub cover: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
}

impl Entry {
    pub fn new(id: EntryId, title: impl Into<String>, cover: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            cover: cover.into(),
            rating: None,
        }
    }

    pub fn with_rating(mut self, rating: i64) -> Self {
        self.rating = Some(rating);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub id: TierId,
    pub name: String,
    pub color: String,
    pub items: Vec<Entry>,
}

impl Tier {
    pub fn new(id: TierId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// On-screen bounding box of a rendered entry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.left + self.width / 2.0,
            y: self.top + self.height / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    RowMajor,
    ColumnMajor,
}

/// Returns true for `#RGB` and `#RRGGBB` hex colors.
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}
