//! In-memory directory implementation
//!
//! Holds users, groups and the attribute schema behind a single `RwLock` and
//! validates updates against the schema the way a real directory service
//! does. The whole state can be saved to and loaded from a JSON file.

use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::errors::DirectoryError;
use super::types::{
    AttributeSchema, AttributeScope, Attributes, Group, GroupFilter, GroupId, Schema, User,
    UserId,
};
use super::{Directory, DirectoryResult};

/// The current persistence file format version.
const PERSISTENCE_VERSION: u8 = 0;

fn is_v0(v: &u8) -> bool {
    *v == 0
}

fn validate_persistence_version<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let version = u8::deserialize(deserializer)?;
    if version != PERSISTENCE_VERSION {
        return Err(serde::de::Error::custom(format!(
            "unsupported persistence version {version}; only version {PERSISTENCE_VERSION} is supported"
        )));
    }
    Ok(version)
}

fn first_group_id() -> i64 {
    1
}

/// Everything the directory stores. Also the on-disk format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DirectoryState {
    #[serde(
        rename = "_v",
        default,
        skip_serializing_if = "is_v0",
        deserialize_with = "validate_persistence_version"
    )]
    version: u8,
    /// Users in creation order
    #[serde(default)]
    users: Vec<User>,
    /// Groups in creation order, which is also ascending id order
    #[serde(default)]
    groups: Vec<Group>,
    #[serde(default)]
    schema: Schema,
    #[serde(default = "first_group_id")]
    next_group_id: i64,
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self {
            version: PERSISTENCE_VERSION,
            users: Vec::new(),
            groups: Vec::new(),
            schema: Schema::default(),
            next_group_id: first_group_id(),
        }
    }
}

impl DirectoryState {
    /// Moves the group id counter past every stored group id.
    ///
    /// A loaded file may carry a stale or hand-edited counter.
    fn repair_next_group_id(&mut self) {
        let floor = self
            .groups
            .iter()
            .map(|group| group.id.0.saturating_add(1))
            .max()
            .unwrap_or_else(first_group_id);
        self.next_group_id = self.next_group_id.max(floor).max(first_group_id());
    }

    fn validate(&self, scope: AttributeScope, attributes: &Attributes) -> DirectoryResult<()> {
        let declared = self.schema.attributes(scope);
        for (name, value) in attributes {
            let Some(schema) = declared.get(name) else {
                return Err(DirectoryError::UnknownAttribute {
                    scope,
                    name: name.clone(),
                });
            };
            if schema.attribute_type != value.attribute_type() {
                return Err(DirectoryError::AttributeTypeMismatch {
                    name: name.clone(),
                    expected: schema.attribute_type,
                    actual: value.attribute_type(),
                });
            }
        }
        Ok(())
    }

    fn declare(
        &mut self,
        scope: AttributeScope,
        name: &str,
        schema: AttributeSchema,
    ) -> DirectoryResult<()> {
        let declared = match scope {
            AttributeScope::User => &mut self.schema.user_attributes,
            AttributeScope::Group => &mut self.schema.group_attributes,
        };
        if declared.contains_key(name) {
            return Err(DirectoryError::AttributeAlreadyExists {
                scope,
                name: name.to_string(),
            });
        }
        declared.insert(name.to_string(), schema);
        Ok(())
    }
}

/// A directory service kept entirely in memory.
///
/// Group ids are assigned sequentially starting at 1. Group display names are
/// unique, and updates are rejected unless every attribute is declared in the
/// schema with a matching type.
#[derive(Debug, Default)]
pub struct InMemory {
    state: RwLock<DirectoryState>,
}

impl InMemory {
    /// Creates a new, empty directory with an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, DirectoryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DirectoryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a user, as the host would when an account is created.
    ///
    /// The attributes are validated against the user schema.
    pub fn add_user(&self, id: impl Into<UserId>, attributes: Attributes) -> DirectoryResult<()> {
        let id = id.into();
        let mut state = self.write();
        if state.users.iter().any(|user| user.id == id) {
            return Err(DirectoryError::UserAlreadyExists { id });
        }
        state.validate(AttributeScope::User, &attributes)?;
        state.users.push(User { id, attributes });
        Ok(())
    }

    /// Returns a copy of one user.
    pub fn user(&self, id: &UserId) -> DirectoryResult<User> {
        self.read()
            .users
            .iter()
            .find(|user| user.id == *id)
            .cloned()
            .ok_or_else(|| DirectoryError::UserNotFound { id: id.clone() })
    }

    /// Returns a copy of one group.
    pub fn group(&self, id: GroupId) -> DirectoryResult<Group> {
        self.read()
            .groups
            .iter()
            .find(|group| group.id == id)
            .cloned()
            .ok_or(DirectoryError::GroupNotFound { id })
    }

    /// Number of users.
    pub fn user_count(&self) -> usize {
        self.read().users.len()
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.read().groups.len()
    }

    /// Saves the entire directory state to a file as JSON.
    ///
    /// # Arguments
    /// * `path` - The path to the file where the state should be saved.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> DirectoryResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|source| DirectoryError::Serialization { source })?;
        std::fs::write(path, json).map_err(|source| DirectoryError::FileIo { source })
    }

    /// Loads the directory state from a JSON file.
    ///
    /// If the file does not exist, a new, empty directory is returned.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DirectoryResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                serde_json::from_str(&json).map_err(|source| DirectoryError::Serialization { source })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(source) => Err(DirectoryError::FileIo { source }),
        }
    }
}

impl Serialize for InMemory {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.read().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for InMemory {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut state = DirectoryState::deserialize(deserializer)?;
        state.repair_next_group_id();
        Ok(InMemory {
            state: RwLock::new(state),
        })
    }
}

impl Directory for InMemory {
    fn list_users(&self) -> DirectoryResult<Vec<User>> {
        Ok(self.read().users.clone())
    }

    fn list_groups(&self, filter: &GroupFilter) -> DirectoryResult<Vec<Group>> {
        Ok(self
            .read()
            .groups
            .iter()
            .filter(|group| filter.matches(group))
            .cloned()
            .collect())
    }

    fn create_group(&self, display_name: &str, attributes: Attributes) -> DirectoryResult<GroupId> {
        let mut state = self.write();
        if state
            .groups
            .iter()
            .any(|group| group.display_name == display_name)
        {
            return Err(DirectoryError::GroupAlreadyExists {
                display_name: display_name.to_string(),
            });
        }
        state.validate(AttributeScope::Group, &attributes)?;

        let id = GroupId(state.next_group_id);
        state.next_group_id = id
            .0
            .checked_add(1)
            .ok_or(DirectoryError::GroupIdsExhausted { next: id.0 })?;
        state.groups.push(Group {
            id,
            display_name: display_name.to_string(),
            attributes,
        });
        Ok(id)
    }

    fn update_user(&self, id: &UserId, attributes: Attributes) -> DirectoryResult<()> {
        let mut state = self.write();
        state.validate(AttributeScope::User, &attributes)?;
        let user = state
            .users
            .iter_mut()
            .find(|user| user.id == *id)
            .ok_or_else(|| DirectoryError::UserNotFound { id: id.clone() })?;
        user.attributes.extend(attributes);
        Ok(())
    }

    fn update_group(&self, id: GroupId, attributes: Attributes) -> DirectoryResult<()> {
        let mut state = self.write();
        state.validate(AttributeScope::Group, &attributes)?;
        let group = state
            .groups
            .iter_mut()
            .find(|group| group.id == id)
            .ok_or(DirectoryError::GroupNotFound { id })?;
        group.attributes.extend(attributes);
        Ok(())
    }

    fn get_schema(&self) -> DirectoryResult<Schema> {
        Ok(self.read().schema.clone())
    }

    fn add_user_attribute(&self, name: &str, schema: AttributeSchema) -> DirectoryResult<()> {
        self.write().declare(AttributeScope::User, name, schema)
    }

    fn add_group_attribute(&self, name: &str, schema: AttributeSchema) -> DirectoryResult<()> {
        self.write().declare(AttributeScope::Group, name, schema)
    }
}
