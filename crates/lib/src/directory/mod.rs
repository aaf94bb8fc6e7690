//! Directory service interface consumed by the reconciliation logic.
//!
//! The `Directory` trait is the management API of the host identity store:
//! listing users and groups, patching their attributes, creating groups and
//! extending the attribute schema. The reconciliation passes only ever talk to
//! the host through this trait, so they stay independent of the transport the
//! host uses.
//!
//! [`InMemory`] is a complete in-process implementation with JSON file
//! persistence, used by the `posixid` binary and by the test suites.

mod errors;
mod in_memory;
mod types;

pub use errors::DirectoryError;
pub use in_memory::InMemory;
pub use types::{
    AttributeSchema, AttributeScope, AttributeType, AttributeValue, Attributes, Group,
    GroupFilter, GroupId, Schema, User, UserId, integer_attribute,
};

/// Result type of directory operations.
pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;

/// Management API of the host directory service.
///
/// Every call is a synchronous round trip. Implementations must be `Send` and
/// `Sync`; the reconciliation passes never cache what they read, so each call
/// must reflect the directory's current state.
pub trait Directory: Send + Sync {
    /// Lists every user together with its attributes.
    ///
    /// The order of the returned list is the order in which missing user ids
    /// are allocated.
    fn list_users(&self) -> DirectoryResult<Vec<User>>;

    /// Lists the groups matching `filter`, together with their attributes.
    fn list_groups(&self, filter: &GroupFilter) -> DirectoryResult<Vec<Group>>;

    /// Creates a group and returns its directory-assigned id.
    ///
    /// # Arguments
    /// * `display_name` - Name of the new group
    /// * `attributes` - Initial attribute values, possibly empty
    fn create_group(&self, display_name: &str, attributes: Attributes) -> DirectoryResult<GroupId>;

    /// Inserts or overwrites the given attributes on a user.
    ///
    /// Attributes not named in `attributes` are left untouched.
    fn update_user(&self, id: &UserId, attributes: Attributes) -> DirectoryResult<()>;

    /// Inserts or overwrites the given attributes on a group.
    fn update_group(&self, id: GroupId, attributes: Attributes) -> DirectoryResult<()>;

    /// Returns a snapshot of the user and group attribute schemas.
    fn get_schema(&self) -> DirectoryResult<Schema>;

    /// Declares a new user attribute.
    fn add_user_attribute(&self, name: &str, schema: AttributeSchema) -> DirectoryResult<()>;

    /// Declares a new group attribute.
    fn add_group_attribute(&self, name: &str, schema: AttributeSchema) -> DirectoryResult<()>;

    /// Declares a new attribute in the schema of `scope`.
    fn add_attribute(
        &self,
        scope: AttributeScope,
        name: &str,
        schema: AttributeSchema,
    ) -> DirectoryResult<()> {
        match scope {
            AttributeScope::User => self.add_user_attribute(name, schema),
            AttributeScope::Group => self.add_group_attribute(name, schema),
        }
    }
}
