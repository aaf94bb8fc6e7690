//! Data types exchanged with the directory service.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Directory identifier of a user (its login name).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Directory-assigned numeric identifier of a group.
///
/// This is the directory's own key, not the POSIX `gidnumber`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub i64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value type of a schema attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeType {
    String,
    Integer,
    JpegPhoto,
    DateTime,
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeType::String => "string",
            AttributeType::Integer => "integer",
            AttributeType::JpegPhoto => "jpeg_photo",
            AttributeType::DateTime => "date_time",
        };
        f.write_str(name)
    }
}

/// A typed attribute value stored on a user or group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum AttributeValue {
    String(String),
    Integer(i64),
    JpegPhoto(Vec<u8>),
    /// RFC 3339 timestamp, kept as text.
    DateTime(String),
}

impl AttributeValue {
    /// The integer payload, if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn attribute_type(&self) -> AttributeType {
        match self {
            AttributeValue::String(_) => AttributeType::String,
            AttributeValue::Integer(_) => AttributeType::Integer,
            AttributeValue::JpegPhoto(_) => AttributeType::JpegPhoto,
            AttributeValue::DateTime(_) => AttributeType::DateTime,
        }
    }
}

/// Attribute name to value mapping of a single identity.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// Read an integer attribute. Missing and non-integer values both yield `None`.
pub fn integer_attribute(attributes: &Attributes, name: &str) -> Option<i64> {
    attributes.get(name).and_then(AttributeValue::as_integer)
}

/// A user as listed by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub attributes: Attributes,
}

impl User {
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        integer_attribute(&self.attributes, name)
    }
}

/// A group as listed by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub display_name: String,
    #[serde(default)]
    pub attributes: Attributes,
}

impl Group {
    pub fn integer(&self, name: &str) -> Option<i64> {
        integer_attribute(&self.attributes, name)
    }
}

/// Which identity schema an attribute belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeScope {
    User,
    Group,
}

impl fmt::Display for AttributeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeScope::User => f.write_str("user"),
            AttributeScope::Group => f.write_str("group"),
        }
    }
}

/// Schema descriptor of one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSchema {
    pub attribute_type: AttributeType,
    pub is_list: bool,
    pub is_visible: bool,
    pub is_editable: bool,
}

/// Snapshot of the user and group attribute schemas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub user_attributes: BTreeMap<String, AttributeSchema>,
    #[serde(default)]
    pub group_attributes: BTreeMap<String, AttributeSchema>,
}

impl Schema {
    /// Attributes of the given scope.
    pub fn attributes(&self, scope: AttributeScope) -> &BTreeMap<String, AttributeSchema> {
        match scope {
            AttributeScope::User => &self.user_attributes,
            AttributeScope::Group => &self.group_attributes,
        }
    }
}

/// Filter for [`Directory::list_groups`](super::Directory::list_groups).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupFilter {
    All,
    /// Exact match on the group's display name.
    DisplayName(String),
}

impl GroupFilter {
    pub fn matches(&self, group: &Group) -> bool {
        match self {
            GroupFilter::All => true,
            GroupFilter::DisplayName(name) => group.display_name == *name,
        }
    }
}
