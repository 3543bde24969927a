//! In-memory page model
//!
//! The synchronizer never renders anything; it attaches to a page that has
//! already been rendered. A page is a list of standalone elements (found by
//! id) and a list of containers (found by class), each holding named form
//! fields. Pages can be loaded from a TOML description:
//!
//! ```toml
//! [[standalone]]
//! id = "workout-date"
//! element = "input"
//! value = "2024-05-06"
//!
//! [[containers]]
//! class = "exercise-info"
//! heading = "Bench Press"
//!
//! [[containers.fields]]
//! element = "input"
//! name = "weight_used"
//! value = "135"
//! ```

use crate::group::ElementKind;
use parking_lot::RwLock;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while loading a page description
#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to read page file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid page description: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0} element is missing its `{1}` attribute")]
    MissingAttribute(ElementKind, &'static str),
}

/// One form element
///
/// `value` is what the UI currently shows. `default_value` is the value the
/// element was rendered with and never changes.
#[derive(Debug)]
pub struct Field {
    id: Option<String>,
    name: Option<String>,
    element: ElementKind,
    value: RwLock<String>,
    default_value: String,
}

impl Field {
    /// Create a field rendered with `value`
    pub fn new(element: ElementKind, name: Option<&str>, id: Option<&str>, value: &str) -> Self {
        Self {
            id: id.map(str::to_string),
            name: name.map(str::to_string),
            element,
            value: RwLock::new(value.to_string()),
            default_value: value.to_string(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn element(&self) -> ElementKind {
        self.element
    }

    /// Current displayed value
    pub fn value(&self) -> String {
        self.value.read().clone()
    }

    /// Change the displayed value
    pub fn set_value(&self, value: &str) {
        *self.value.write() = value.to_string();
    }

    /// Value at page-load time
    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    /// Restore the page-load value
    pub fn reset(&self) {
        self.set_value(&self.default_value);
    }
}

/// A rendered group container
#[derive(Debug)]
pub struct Container {
    class: String,
    heading: Option<String>,
    fields: Vec<Arc<Field>>,
}

impl Container {
    pub fn new(class: &str, heading: Option<&str>, fields: Vec<Field>) -> Self {
        Self {
            class: class.to_string(),
            heading: heading.map(str::to_string),
            fields: fields.into_iter().map(Arc::new).collect(),
        }
    }

    /// Raw heading text, untrimmed
    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref()
    }

    /// First field matching `element[name="..."]`
    pub fn find(&self, element: ElementKind, name: &str) -> Option<Arc<Field>> {
        self.fields
            .iter()
            .find(|f| f.element == element && f.name() == Some(name))
            .cloned()
    }

    /// First field with the given name, whatever its element kind
    pub fn find_named(&self, name: &str) -> Option<Arc<Field>> {
        self.fields.iter().find(|f| f.name() == Some(name)).cloned()
    }

    pub fn fields(&self) -> &[Arc<Field>] {
        &self.fields
    }
}

/// A rendered page
#[derive(Debug, Default)]
pub struct Page {
    standalone: Vec<Arc<Field>>,
    containers: Vec<Container>,
}

impl Page {
    pub fn new(standalone: Vec<Field>, containers: Vec<Container>) -> Self {
        Self {
            standalone: standalone.into_iter().map(Arc::new).collect(),
            containers,
        }
    }

    /// Load a page description from a TOML file
    pub fn load(path: &Path) -> Result<Self, PageError> {
        let text = std::fs::read_to_string(path).map_err(|source| PageError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse a page description
    pub fn from_toml_str(text: &str) -> Result<Self, PageError> {
        let file: PageFile = toml::from_str(text)?;

        let mut standalone = Vec::with_capacity(file.standalone.len());
        for entry in file.standalone {
            if entry.id.is_none() {
                return Err(PageError::MissingAttribute(entry.element, "id"));
            }
            standalone.push(entry.into_field());
        }

        let mut containers = Vec::with_capacity(file.containers.len());
        for entry in file.containers {
            let mut fields = Vec::with_capacity(entry.fields.len());
            for field in entry.fields {
                if field.name.is_none() {
                    return Err(PageError::MissingAttribute(field.element, "name"));
                }
                fields.push(field.into_field());
            }
            containers.push(Container::new(&entry.class, entry.heading.as_deref(), fields));
        }

        Ok(Self::new(standalone, containers))
    }

    /// `document.getElementById`
    pub fn element_by_id(&self, id: &str) -> Option<Arc<Field>> {
        self.standalone
            .iter()
            .find(|f| f.id() == Some(id))
            .cloned()
    }

    /// Containers carrying `class`, with their page index
    pub fn containers_by_class<'a>(
        &'a self,
        class: &'a str,
    ) -> impl Iterator<Item = (usize, &'a Container)> + 'a {
        self.containers
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.class == class)
    }
}

#[derive(Debug, Deserialize)]
struct PageFile {
    #[serde(default)]
    standalone: Vec<FieldEntry>,
    #[serde(default)]
    containers: Vec<ContainerEntry>,
}

#[derive(Debug, Deserialize)]
struct ContainerEntry {
    class: String,
    #[serde(default)]
    heading: Option<String>,
    #[serde(default)]
    fields: Vec<FieldEntry>,
}

#[derive(Debug, Deserialize)]
struct FieldEntry {
    element: ElementKind,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    value: String,
}

impl FieldEntry {
    fn into_field(self) -> Field {
        Field::new(
            self.element,
            self.name.as_deref(),
            self.id.as_deref(),
            &self.value,
        )
    }
}
