//! Asset kinds and their provider profiles
//!
//! A [`KindProfile`] tells an adapter which upstream category to hit, which
//! filters to apply and how to rewrite the term. The generic table below is the
//! one used by providers without native 3D or animation categories.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Kind of asset a caller is searching for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Icon,
    #[serde(rename = "3d")]
    ThreeD,
    Illustration,
    Animation,
    Photo,
    Vector,
}

/// Upstream category an adapter searches in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// The provider's own icon catalogue
    Icon,
    /// The provider's generic resource catalogue, narrowed by filters
    Resource,
    /// A category the provider exposes natively under this name
    Native(&'static str),
}

/// Content-type filter values understood by resource catalogues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Vector,
    Photo,
}

impl ContentType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vector => "vector",
            Self::Photo => "photo",
        }
    }
}

/// How a kind maps onto a provider's catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindProfile {
    pub category: Category,
    pub content_type: Option<ContentType>,
    pub style: Option<&'static str>,
    /// Restrict results to the free tier
    pub free_only: bool,
    /// Keywords appended to the caller's term
    pub term_suffix: Option<&'static str>,
    /// Set when the kind is approximated by a broader query
    pub note: Option<&'static str>,
}

const ANIMATION_NOTE: &str = "Animated assets are not a native category upstream; \
showing motion-style vector results instead.";

impl KindProfile {
    const fn resource(content_type: ContentType) -> Self {
        Self {
            category: Category::Resource,
            content_type: Some(content_type),
            style: None,
            free_only: true,
            term_suffix: None,
            note: None,
        }
    }

    /// Profile for a category the provider serves directly
    pub const fn native(name: &'static str) -> Self {
        Self {
            category: Category::Native(name),
            content_type: None,
            style: None,
            free_only: true,
            term_suffix: None,
            note: None,
        }
    }

    /// Apply the term augmentation
    pub fn augment_term(&self, term: &str) -> String {
        match self.term_suffix {
            Some(suffix) => format!("{term} {suffix}"),
            None => term.to_string(),
        }
    }
}

impl AssetKind {
    pub const ALL: [Self; 6] = [
        Self::Icon,
        Self::ThreeD,
        Self::Illustration,
        Self::Animation,
        Self::Photo,
        Self::Vector,
    ];

    /// Generic mapping for providers with only icon and resource catalogues
    pub const fn profile(self) -> KindProfile {
        match self {
            Self::Icon => KindProfile {
                category: Category::Icon,
                content_type: None,
                style: None,
                free_only: true,
                term_suffix: None,
                note: None,
            },
            Self::ThreeD => KindProfile {
                style: Some("3d"),
                term_suffix: Some("3d"),
                ..KindProfile::resource(ContentType::Vector)
            },
            Self::Illustration | Self::Vector => KindProfile::resource(ContentType::Vector),
            Self::Animation => KindProfile {
                term_suffix: Some("animation motion"),
                note: Some(ANIMATION_NOTE),
                ..KindProfile::resource(ContentType::Vector)
            },
            Self::Photo => KindProfile::resource(ContentType::Photo),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Icon => "icon",
            Self::ThreeD => "3d",
            Self::Illustration => "illustration",
            Self::Animation => "animation",
            Self::Photo => "photo",
            Self::Vector => "vector",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an `asset` parameter names no known kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAssetKind(pub String);

impl fmt::Display for UnknownAssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = AssetKind::ALL.iter().map(|k| k.as_str()).collect();
        write!(
            f,
            "Unknown asset type '{}'; expected one of {}",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for UnknownAssetKind {}

impl FromStr for AssetKind {
    type Err = UnknownAssetKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "icon" | "icons" => Ok(Self::Icon),
            "3d" | "3d-icon" | "3d-icons" | "3d_icon" => Ok(Self::ThreeD),
            "illustration" | "illustrations" => Ok(Self::Illustration),
            "animation" | "animations" | "lottie" => Ok(Self::Animation),
            "photo" | "photos" => Ok(Self::Photo),
            "vector" | "vectors" => Ok(Self::Vector),
            _ => Err(UnknownAssetKind(s.to_string())),
        }
    }
}
