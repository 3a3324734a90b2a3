//! Trip document model: the parsed form of a `trip.yaml` file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};

use super::{GeoPoint, PlanItem};
use crate::error::{Result, WaymarkError};

/// A complete trip with its ordered sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TripDocument {
    /// Folder name of the trip; assigned by the loader, not read from YAML
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Trip title
    #[serde(default)]
    pub title: String,

    /// Free-text introduction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Initial map center
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_map_center: Option<GeoPoint>,

    /// Initial map zoom level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_zoom: Option<u8>,

    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A top-level unit of trip content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    /// Unique within the trip
    #[serde(deserialize_with = "id_string")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Image filenames, relative to the trip's `images/` folder
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<Subsection>,
}

/// A unit of content nested in a [`Section`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subsection {
    /// Unique within the parent section
    #[serde(deserialize_with = "id_string")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

/// One entry of the trip index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TripSummary {
    /// Folder name of the trip
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub title: String,
}

/// A trip as shown in listings, with the state of its saved plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripListing {
    pub id: String,
    pub title: String,
    /// Items in the saved plan; zero when nothing is saved
    pub planned_items: usize,
    /// When the saved plan last changed
    pub updated_at: Option<Timestamp>,
}

/// Accepts ids written as YAML numbers (`id: 3`) as well as strings.
fn id_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Int(number) => number.to_string(),
    })
}

impl Section {
    /// Title, falling back to the id for untitled sections.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.id
        } else {
            &self.title
        }
    }

    /// Finds a subsection of this section by id.
    pub fn subsection(&self, id: &str) -> Option<&Subsection> {
        self.subsections.iter().find(|sub| sub.id == id)
    }
}

impl Subsection {
    /// Title, falling back to the id for untitled subsections.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

impl TripDocument {
    /// Title, falling back to the folder name.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.id
        } else {
            &self.title
        }
    }

    /// Finds a section by id.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    /// Finds a subsection by parent section id and subsection id.
    pub fn subsection(&self, parent_id: &str, id: &str) -> Option<&Subsection> {
        self.section(parent_id)?.subsection(id)
    }

    /// Whether a referenced plan item points at existing content.
    ///
    /// Custom items reference nothing and are always considered present.
    pub fn contains(&self, item: &PlanItem) -> bool {
        match item {
            PlanItem::Section { id, .. } => self.section(id).is_some(),
            PlanItem::Subsection { id, parent_id, .. } => {
                self.subsection(parent_id, id).is_some()
            }
            PlanItem::Custom { .. } => true,
        }
    }

    /// Title to show for a plan item.
    ///
    /// Referenced items take the live title from this document so edits to
    /// the trip file show up in existing plans. Dangling references produce a
    /// placeholder instead of an error.
    pub fn resolve_display_title(&self, item: &PlanItem) -> String {
        match item {
            PlanItem::Section { id, .. } => self
                .section(id)
                .map(|section| section.display_title().to_string())
                .unwrap_or_else(|| format!("<missing section '{id}'>")),
            PlanItem::Subsection { id, parent_id, .. } => self
                .subsection(parent_id, id)
                .map(|sub| sub.display_title().to_string())
                .unwrap_or_else(|| format!("<missing subsection '{parent_id}/{id}'>")),
            PlanItem::Custom { description, .. } => description.clone(),
        }
    }

    /// Description, location and first image of the content an item points
    /// at, or `None` for custom and dangling items.
    pub fn item_details(&self, item: &PlanItem) -> Option<ItemDetails<'_>> {
        match item {
            PlanItem::Section { id, .. } => self.section(id).map(|section| ItemDetails {
                description: section.description.as_deref(),
                location: section.location,
                image: section.images.first().map(String::as_str),
            }),
            PlanItem::Subsection { id, parent_id, .. } => {
                self.subsection(parent_id, id).map(|sub| ItemDetails {
                    description: sub.description.as_deref(),
                    location: sub.location,
                    image: sub.images.first().map(String::as_str),
                })
            }
            PlanItem::Custom { .. } => None,
        }
    }

    /// Resolves image filenames to paths under `<trips_root>/<id>/images/`.
    pub fn image_paths<'a>(
        &'a self,
        trips_root: &'a Path,
        images: &'a [String],
    ) -> impl Iterator<Item = PathBuf> + 'a {
        images
            .iter()
            .map(move |image| trips_root.join(&self.id).join("images").join(image))
    }

    /// Checks id uniqueness: section ids across the trip, subsection ids
    /// within their parent.
    pub fn validate(&self) -> Result<()> {
        let mut section_ids = HashSet::new();
        for section in &self.sections {
            if section.id.trim().is_empty() {
                return Err(WaymarkError::invalid_input("sections.id")
                    .with_reason(format!("section '{}' has an empty id", section.title)));
            }
            if !section_ids.insert(section.id.as_str()) {
                return Err(WaymarkError::invalid_input("sections.id")
                    .with_reason(format!("duplicate section id '{}'", section.id)));
            }

            let mut subsection_ids = HashSet::new();
            for sub in &section.subsections {
                if sub.id.trim().is_empty() {
                    return Err(WaymarkError::invalid_input("subsections.id").with_reason(
                        format!("subsection '{}' in '{}' has an empty id", sub.title, section.id),
                    ));
                }
                if !subsection_ids.insert(sub.id.as_str()) {
                    return Err(WaymarkError::invalid_input("subsections.id").with_reason(
                        format!("duplicate subsection id '{}' in '{}'", sub.id, section.id),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Content details looked up for a plan item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemDetails<'a> {
    pub description: Option<&'a str>,
    pub location: Option<GeoPoint>,
    pub image: Option<&'a str>,
}
