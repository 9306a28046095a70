//! The addon manifest: what the addon is and what it can serve.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{is_blank, is_false, is_zero};
use crate::error::ValidationError;

/// Describes the capabilities of the addon. Served at `/manifest.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,

    pub resources: Resources,
    /// Media kinds the addon handles, e.g. `movie`, `series`, `channel`, `tv`.
    pub types: Vec<String>,
    pub catalogs: Vec<Catalog>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub id_prefixes: Vec<String>,
    /// URL.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub background: Option<String>,
    /// URL.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "BehaviorHints::is_empty")]
    pub behavior_hints: BehaviorHints,
}

impl Manifest {
    /// Checks the invariants the platform relies on: at least one resource,
    /// at least one type, and no catalog declared twice.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.resources.is_empty() {
            return Err(ValidationError::NoResources);
        }
        if self.types.is_empty() {
            return Err(ValidationError::NoTypes);
        }

        let mut seen = HashSet::new();
        for catalog in &self.catalogs {
            if !seen.insert((catalog.kind.as_str(), catalog.id.as_str())) {
                return Err(ValidationError::DuplicateCatalog {
                    kind: catalog.kind.clone(),
                    id: catalog.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Whether the manifest declares `resource` in either representation.
    pub fn declares(&self, resource: ResourceName) -> bool {
        match &self.resources {
            Resources::Names(names) => names.contains(&resource),
            Resources::Descriptors(descriptors) => descriptors.iter().any(|d| d.name == resource),
        }
    }
}

// ── Resources ─────────────────────────────────────────────────────────────────

/// The two ways a manifest may list its resources. Only one can be used.
///
/// Serialized as the bare `resources` array: strings for [`Names`], objects
/// for [`Descriptors`].
///
/// [`Names`]: Resources::Names
/// [`Descriptors`]: Resources::Descriptors
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resources {
    /// Legacy short form: `["catalog", "stream"]`. Applies to every type in
    /// the manifest.
    Names(Vec<ResourceName>),
    Descriptors(Vec<ResourceDescriptor>),
}

impl Resources {
    pub fn len(&self) -> usize {
        match self {
            Self::Names(names) => names.len(),
            Self::Descriptors(descriptors) => descriptors.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The protocol's reserved resource names.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceName {
    Catalog,
    Meta,
    Stream,
    Subtitles,
    AddonCatalog,
}

impl ResourceName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Catalog      => "catalog",
            Self::Meta         => "meta",
            Self::Stream       => "stream",
            Self::Subtitles    => "subtitles",
            Self::AddonCatalog => "addon_catalog",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub name: ResourceName,
    pub types: Vec<String>,

    /// Only ids starting with one of these are sent to the addon.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub id_prefixes: Vec<String>,
}

// ── Behavior hints ────────────────────────────────────────────────────────────

/// Opt-in addon behavior. Every flag defaults to `false`, a `false` flag is
/// never written, and a manifest with no flag set has no `behaviorHints` key.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorHints {
    #[serde(default, skip_serializing_if = "is_false")]
    pub adult: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub p2p: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub configurable: bool,
    /// The platform hides its "Install" button when this is set. Addons with
    /// per-user configuration usually set it on `/manifest.json` only.
    #[serde(default, skip_serializing_if = "is_false")]
    pub configuration_required: bool,
}

impl BehaviorHints {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ── Catalogs ──────────────────────────────────────────────────────────────────

/// One browsable catalog. `(type, id)` is unique within a manifest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<ExtraProp>,
}

/// A filter or paging parameter a catalog accepts (`genre`, `skip`,
/// `search`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraProp {
    pub name: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub options_limit: u32,
}
