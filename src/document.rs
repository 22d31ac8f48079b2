//! # Descriptor Document Model
//!
//! [`ConfigDocument`] owns a parsed `tiapp.xml` tree and exposes typed
//! accessors for the parts of the descriptor that tooling edits:
//!
//! - **Scalar fields** such as `<id>` or `<sdk-version>` (see [`Field`]).
//! - **Deployment targets**: `<deployment-targets>` holding one
//!   `<target device="...">true|false</target>` per platform.
//! - **Properties**: `<property name="..." type="...">value</property>`
//!   elements directly under the root, read back as [`PropertyValue`].
//! - **Modules and plugins**: `<modules>` / `<plugins>` groups of [`Item`]
//!   entries keyed by id and, for modules, platform.
//!
//! The whole file is loaded into memory, mutated in place, and written back
//! only when [`ConfigDocument::write`] is called. Elements the accessors do
//! not know about are carried through untouched.
//!
//! ## Example
//!
//! ```
//! use tiapp_xml::{ConfigDocument, Field, PropertyType, PropertyValue};
//!
//! let mut doc: ConfigDocument = r#"<?xml version="1.0" encoding="UTF-8"?>
//! <ti:app xmlns:ti="http://ti.appcelerator.org">
//!   <id>com.example.app</id>
//! </ti:app>"#
//!     .parse()
//!     .unwrap();
//!
//! assert_eq!(doc.get(Field::Id).as_deref(), Some("com.example.app"));
//!
//! doc.set_property("count", 5, Some(PropertyType::Int)).unwrap();
//! assert_eq!(doc.property("count"), Some(PropertyValue::Int(5)));
//!
//! doc.set_module("ti.map", Some("5.0.0"), Some("android")).unwrap();
//! assert_eq!(doc.modules().len(), 1);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;
use serde::Serialize;
use xot::{NameId, Node, Xot};

use crate::error::{Error, Result};
use crate::fields::Field;
use crate::xml;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Deployment target flags keyed by device name.
pub type DeploymentTargets = BTreeMap<String, bool>;

/// Declared type of a `<property>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    #[default]
    String,
    Bool,
    Int,
    Double,
}

impl PropertyType {
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Bool => "bool",
            PropertyType::Int => "int",
            PropertyType::Double => "double",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "string" => Ok(PropertyType::String),
            "bool" => Ok(PropertyType::Bool),
            "int" => Ok(PropertyType::Int),
            "double" => Ok(PropertyType::Double),
            other => Err(Error::argument(format!(
                "unknown property type '{}' (expected string, bool, int or double)",
                other
            ))),
        }
    }
}

/// A property value converted according to its declared type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    String(String),
    Bool(bool),
    Int(i64),
    Double(f64),
}

impl PropertyValue {
    /// Convert stored text according to `ty`.
    ///
    /// Numeric text must parse as a whole (after trimming); anything else,
    /// including a number followed by junk such as `5abc`, is returned
    /// unchanged as a string. There is no leading-number parse, so `5abc` does
    /// not read as `5`.
    pub fn from_text(text: &str, ty: PropertyType) -> Self {
        match ty {
            PropertyType::String => PropertyValue::String(text.to_string()),
            PropertyType::Bool => PropertyValue::Bool(text == "true"),
            PropertyType::Int => text
                .trim()
                .parse()
                .map(PropertyValue::Int)
                .unwrap_or_else(|_| PropertyValue::String(text.to_string())),
            PropertyType::Double => text
                .trim()
                .parse()
                .map(PropertyValue::Double)
                .unwrap_or_else(|_| PropertyValue::String(text.to_string())),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => f.write_str(s),
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Int(n) => write!(f, "{}", n),
            PropertyValue::Double(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(value.into())
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Double(value)
    }
}

/// A missing value is stored as the empty string.
impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value
            .map(Into::into)
            .unwrap_or_else(|| PropertyValue::String(String::new()))
    }
}

/// A `<property>` element as read from the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: PropertyType,
    pub value: PropertyValue,
}

/// A `<module>` or `<plugin>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

/// Optional qualifiers for [`ConfigDocument::set_module_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleOptions {
    pub version: Option<String>,
    pub platform: Option<String>,
}

/// The repeatable entry groups of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Module,
    Plugin,
}

impl ItemKind {
    /// Element name of one entry.
    pub fn element(self) -> &'static str {
        match self {
            ItemKind::Module => "module",
            ItemKind::Plugin => "plugin",
        }
    }

    /// Element name of the group container.
    pub fn container(self) -> &'static str {
        match self {
            ItemKind::Module => "modules",
            ItemKind::Plugin => "plugins",
        }
    }
}

/// An in-memory `tiapp.xml` document.
pub struct ConfigDocument {
    xot: Xot,
    doc: Node,
    root: Node,
    path: Option<PathBuf>,
    /// Elements whose text is written back as CDATA.
    cdata: Vec<NameId>,
}

impl ConfigDocument {
    /// Load and parse the descriptor at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::NotFound {
                path: path.to_path_buf(),
            },
            _ => Error::Io(e),
        })?;
        debug!("Loaded {} ({} bytes)", path.display(), content.len());
        Self::from_source(&content, Some(path.to_path_buf()))
    }

    /// Parse a descriptor from a string. The result has no associated path.
    pub fn parse(content: &str) -> Result<Self> {
        Self::from_source(content, None)
    }

    fn from_source(content: &str, path: Option<PathBuf>) -> Result<Self> {
        let mut xot = Xot::new();
        let doc = xot.parse(content).map_err(|e| Error::Parse {
            message: e.to_string(),
            path: path.clone(),
        })?;
        let root = xot.document_element(doc).map_err(Error::xml)?;
        xml::strip_whitespace(&mut xot, doc)?;
        let cdata = xml::cdata_elements(&xot, doc, content);
        Ok(Self {
            xot,
            doc,
            root,
            path,
            cdata,
        })
    }

    /// The path the document was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // ------------------------------------------------------------------
    // Scalar fields
    // ------------------------------------------------------------------

    /// Text of a top-level field, or `None` if the element is absent.
    pub fn get(&self, field: Field) -> Option<String> {
        xml::last_child(&self.xot, self.root, field.name()).map(|node| xml::text(&self.xot, node))
    }

    /// Replace the text of a top-level field, creating the element if needed.
    pub fn set(&mut self, field: Field, value: &str) -> Result<()> {
        let node = xml::ensure_child(&mut self.xot, self.root, field.name())?;
        xml::set_text(&mut self.xot, node, value)?;
        debug!("Set <{}> to {:?}", field, value);
        Ok(())
    }

    /// [`get`](Self::get) by element name or camel-cased alias.
    pub fn get_by_name(&self, name: &str) -> Result<Option<String>> {
        Ok(self.get(name.parse()?))
    }

    /// [`set`](Self::set) by element name or camel-cased alias.
    pub fn set_by_name(&mut self, name: &str, value: &str) -> Result<()> {
        self.set(name.parse()?, value)
    }

    // ------------------------------------------------------------------
    // Deployment targets
    // ------------------------------------------------------------------

    fn targets_container(&self) -> Option<Node> {
        xml::last_child(&self.xot, self.root, "deployment-targets")
    }

    /// Whether `platform` is enabled; `None` if it is not listed.
    pub fn deployment_target(&self, platform: &str) -> Option<bool> {
        let container = self.targets_container()?;
        xml::child_with_attribute(&self.xot, container, "target", "device", platform)
            .map(|target| xml::text(&self.xot, target) == "true")
    }

    /// All deployment targets, or `None` if there is no
    /// `<deployment-targets>` element.
    pub fn deployment_targets(&self) -> Option<DeploymentTargets> {
        let container = self.targets_container()?;
        let targets = xml::children_named(&self.xot, container, "target")
            .into_iter()
            .map(|target| {
                let device = xml::attribute(&self.xot, target, "device").unwrap_or_default();
                (device, xml::text(&self.xot, target) == "true")
            })
            .collect();
        Some(targets)
    }

    /// Enable or disable a single platform. An empty platform is ignored.
    pub fn set_deployment_target(&mut self, platform: &str, enabled: bool) -> Result<()> {
        if platform.is_empty() {
            return Ok(());
        }
        let container = xml::ensure_child(&mut self.xot, self.root, "deployment-targets")?;
        match xml::child_with_attribute(&self.xot, container, "target", "device", platform) {
            Some(target) => xml::set_text(&mut self.xot, target, bool_text(enabled))?,
            None => self.append_target(container, platform, enabled)?,
        }
        debug!("Set deployment target {} to {}", platform, enabled);
        Ok(())
    }

    /// Replace every deployment target with the given set, in order.
    pub fn set_deployment_targets<I, K>(&mut self, targets: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, bool)>,
        K: AsRef<str>,
    {
        let container = xml::ensure_child(&mut self.xot, self.root, "deployment-targets")?;
        xml::remove_children(&mut self.xot, container)?;
        for (platform, enabled) in targets {
            self.append_target(container, platform.as_ref(), enabled)?;
        }
        Ok(())
    }

    fn append_target(&mut self, container: Node, platform: &str, enabled: bool) -> Result<()> {
        let target = xml::append_element(&mut self.xot, container, "target")?;
        xml::set_attribute(&mut self.xot, target, "device", platform);
        xml::set_text(&mut self.xot, target, bool_text(enabled))
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    fn property_node(&self, name: &str) -> Option<Node> {
        xml::child_with_attribute(&self.xot, self.root, "property", "name", name)
    }

    fn property_type(&self, node: Node) -> PropertyType {
        xml::attribute(&self.xot, node, "type")
            .and_then(|ty| ty.parse().ok())
            .unwrap_or_default()
    }

    /// The value of property `name`, converted to its declared type.
    pub fn property(&self, name: &str) -> Option<PropertyValue> {
        let node = self.property_node(name)?;
        let text = xml::text(&self.xot, node);
        Some(PropertyValue::from_text(&text, self.property_type(node)))
    }

    /// Every property in document order.
    pub fn properties(&self) -> Vec<Property> {
        xml::children_named(&self.xot, self.root, "property")
            .into_iter()
            .map(|node| {
                let ty = self.property_type(node);
                Property {
                    name: xml::attribute(&self.xot, node, "name").unwrap_or_default(),
                    ty,
                    value: PropertyValue::from_text(&xml::text(&self.xot, node), ty),
                }
            })
            .collect()
    }

    /// Create or update property `name`.
    ///
    /// The `type` attribute is only written when `ty` is given; an existing
    /// property keeps its declared type otherwise.
    pub fn set_property<V: Into<PropertyValue>>(
        &mut self,
        name: &str,
        value: V,
        ty: Option<PropertyType>,
    ) -> Result<()> {
        if name.is_empty() {
            return Err(Error::argument("property name must be defined"));
        }
        let value = value.into().to_string();

        let node = match self.property_node(name) {
            Some(node) => node,
            None => {
                let node = xml::append_element(&mut self.xot, self.root, "property")?;
                xml::set_attribute(&mut self.xot, node, "name", name);
                node
            }
        };
        if let Some(ty) = ty {
            xml::set_attribute(&mut self.xot, node, "type", ty.as_str());
        }
        xml::set_text(&mut self.xot, node, &value)?;
        debug!("Set property {} to {:?}", name, value);
        Ok(())
    }

    /// Delete property `name` if it exists.
    pub fn remove_property(&mut self, name: &str) -> Result<()> {
        if let Some(node) = self.property_node(name) {
            self.xot.remove(node).map_err(Error::xml)?;
            debug!("Removed property {}", name);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Modules and plugins
    // ------------------------------------------------------------------

    /// Entries of a group in document order. Empty if the group is absent.
    pub fn items(&self, kind: ItemKind) -> Vec<Item> {
        let Some(group) = xml::last_child(&self.xot, self.root, kind.container()) else {
            return Vec::new();
        };
        xml::children_named(&self.xot, group, kind.element())
            .into_iter()
            .map(|node| Item {
                id: xml::text(&self.xot, node),
                version: xml::attribute(&self.xot, node, "version"),
                platform: xml::attribute(&self.xot, node, "platform"),
            })
            .collect()
    }

    pub fn modules(&self) -> Vec<Item> {
        self.items(ItemKind::Module)
    }

    pub fn plugins(&self) -> Vec<Item> {
        self.items(ItemKind::Plugin)
    }

    /// Add a module or update the version of every entry with the same
    /// `(id, platform)`. Without a version, the `version` attribute is removed.
    pub fn set_module(
        &mut self,
        id: &str,
        version: Option<&str>,
        platform: Option<&str>,
    ) -> Result<()> {
        self.set_item(ItemKind::Module, id, version, platform)
    }

    /// [`set_module`](Self::set_module) with named qualifiers.
    pub fn set_module_with(&mut self, id: &str, options: &ModuleOptions) -> Result<()> {
        self.set_module(id, options.version.as_deref(), options.platform.as_deref())
    }

    /// Remove every module entry matching `(id, platform)`.
    ///
    /// Without a platform only entries that have no `platform` attribute are
    /// removed; platform-specific entries for the same id stay.
    pub fn remove_module(&mut self, id: &str, platform: Option<&str>) -> Result<()> {
        self.remove_item(ItemKind::Module, id, platform)
    }

    pub fn set_plugin(&mut self, id: &str, version: Option<&str>) -> Result<()> {
        self.set_item(ItemKind::Plugin, id, version, None)
    }

    pub fn remove_plugin(&mut self, id: &str) -> Result<()> {
        self.remove_item(ItemKind::Plugin, id, None)
    }

    fn matching_items(&self, group: Node, kind: ItemKind, id: &str, platform: Option<&str>) -> Vec<Node> {
        xml::children_named(&self.xot, group, kind.element())
            .into_iter()
            .filter(|&node| {
                xml::text(&self.xot, node) == id
                    && xml::attribute(&self.xot, node, "platform").as_deref() == platform
            })
            .collect()
    }

    fn set_item(
        &mut self,
        kind: ItemKind,
        id: &str,
        version: Option<&str>,
        platform: Option<&str>,
    ) -> Result<()> {
        if id.is_empty() {
            return Ok(());
        }
        let version = version.filter(|v| !v.is_empty());
        let platform = platform.filter(|p| !p.is_empty());

        let group = xml::ensure_child(&mut self.xot, self.root, kind.container())?;
        let existing = self.matching_items(group, kind, id, platform);

        for &node in &existing {
            match version {
                Some(version) => xml::set_attribute(&mut self.xot, node, "version", version),
                None => xml::remove_attribute(&mut self.xot, node, "version"),
            }
        }

        if existing.is_empty() {
            let node = xml::append_element(&mut self.xot, group, kind.element())?;
            if let Some(platform) = platform {
                xml::set_attribute(&mut self.xot, node, "platform", platform);
            }
            if let Some(version) = version {
                xml::set_attribute(&mut self.xot, node, "version", version);
            }
            xml::set_text(&mut self.xot, node, id)?;
            debug!("Added {} {} ({:?}, {:?})", kind.element(), id, platform, version);
        } else {
            debug!("Updated {} {} ({:?}) to version {:?}", kind.element(), id, platform, version);
        }
        Ok(())
    }

    fn remove_item(&mut self, kind: ItemKind, id: &str, platform: Option<&str>) -> Result<()> {
        if id.is_empty() {
            return Ok(());
        }
        let platform = platform.filter(|p| !p.is_empty());
        let Some(group) = xml::last_child(&self.xot, self.root, kind.container()) else {
            return Ok(());
        };
        for node in self.matching_items(group, kind, id, platform) {
            self.xot.remove(node).map_err(Error::xml)?;
            debug!("Removed {} {} ({:?})", kind.element(), id, platform);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Pretty-printed XML for the current tree, with an XML declaration.
    pub fn serialize(&self) -> Result<String> {
        let body = xml::to_pretty_string(&self.xot, self.doc, &self.cdata)?;
        let body = body.trim();
        let mut out = String::with_capacity(XML_DECLARATION.len() + body.len() + 2);
        if !body.starts_with("<?xml") {
            out.push_str(XML_DECLARATION);
            out.push('\n');
        }
        out.push_str(body);
        out.push('\n');
        Ok(out)
    }

    /// Write the document to `path`, or back to the file it was loaded from.
    ///
    /// The content is fully serialized before the file is touched.
    pub fn write(&self, path: Option<&Path>) -> Result<()> {
        let target = path
            .or(self.path.as_deref())
            .ok_or_else(|| Error::argument("no output path given and document has no source file"))?;
        let content = self.serialize()?;
        fs::write(target, content)?;
        debug!("Wrote {}", target.display());
        Ok(())
    }
}

impl FromStr for ConfigDocument {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let content = self.serialize().map_err(|_| fmt::Error)?;
        f.write_str(&content)
    }
}

impl fmt::Debug for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigDocument")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

fn bool_text(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
