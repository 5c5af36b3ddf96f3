// Wrapper types making it harder to accidentaly use the wrong underlying type.

use std::{
    borrow::Cow,
    fmt::{self, Display},
    str::FromStr,
};

use heck::ToTitleCase;
use thiserror::Error;
use uuid::Uuid;

use crate::math::{BoundingBox, Vector3};

// A block position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPos(pub Vector3<i32>);

impl BlockPos {
    /// Creates a block position from its coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    /// The unit cube occupied by this block.
    #[must_use]
    pub fn bounds(self) -> BoundingBox {
        BoundingBox::of_block(self.0)
    }
}

impl Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

// The identity of a loaded world. Worlds are compared by id, never by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorldId(pub Uuid);

impl WorldId {
    /// Creates a fresh random world id.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Reasons an identifier string can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The string was not of the form `namespace:path`.
    #[error("Invalid identifier: {0}")]
    Malformed(String),
    /// The namespace contained a forbidden character.
    #[error("Invalid namespace: {0}")]
    Namespace(String),
    /// The path contained a forbidden character.
    #[error("Invalid path: {0}")]
    Path(String),
}

/// A namespaced id such as `minecraft:barrel`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// The namespace, `minecraft` for vanilla content.
    pub namespace: Cow<'static, str>,
    /// The path inside the namespace.
    pub path: Cow<'static, str>,
}

impl Identifier {
    /// The namespace used by vanilla content.
    pub const VANILLA_NAMESPACE: &'static str = "minecraft";

    /// Creates a vanilla identifier from an owned path.
    #[must_use]
    pub fn vanilla(path: String) -> Self {
        Identifier {
            namespace: Cow::Borrowed(Self::VANILLA_NAMESPACE),
            path: Cow::Owned(path),
        }
    }

    /// Creates a vanilla identifier from a static path.
    #[must_use]
    pub const fn vanilla_static(path: &'static str) -> Self {
        Identifier {
            namespace: Cow::Borrowed(Self::VANILLA_NAMESPACE),
            path: Cow::Borrowed(path),
        }
    }

    /// Builds a readable name from the path, e.g. `oak_log` becomes `Oak Log`.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.path.replace('_', " ").to_title_case()
    }

    #[must_use]
    pub fn valid_namespace_char(namespace_char: char) -> bool {
        namespace_char == '_'
            || namespace_char == '-'
            || namespace_char.is_ascii_lowercase()
            || namespace_char.is_ascii_digit()
            || namespace_char == '.'
    }

    #[must_use]
    pub fn valid_path_char(path_char: char) -> bool {
        path_char == '_'
            || path_char == '-'
            || path_char.is_ascii_lowercase()
            || path_char.is_ascii_digit()
            || path_char == '/'
            || path_char == '.'
    }

    #[must_use]
    pub fn validate_namespace(namespace: &str) -> bool {
        namespace.chars().all(Self::valid_namespace_char)
    }

    #[must_use]
    pub fn validate_path(path: &str) -> bool {
        path.chars().all(Self::valid_path_char)
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    // Bare paths resolve into the vanilla namespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, path) = match s.split_once(':') {
            Some((namespace, path)) => (namespace, path),
            None => (Self::VANILLA_NAMESPACE, s),
        };

        if path.is_empty() || path.contains(':') {
            return Err(IdentifierError::Malformed(s.to_string()));
        }
        if !Identifier::validate_namespace(namespace) {
            return Err(IdentifierError::Namespace(namespace.to_string()));
        }
        if !Identifier::validate_path(path) {
            return Err(IdentifierError::Path(path.to_string()));
        }

        Ok(Identifier {
            namespace: Cow::Owned(namespace.to_string()),
            path: Cow::Owned(path.to_string()),
        })
    }
}
