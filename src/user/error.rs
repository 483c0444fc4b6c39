use thiserror::Error;

/// Boxed source error kept for logging.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures of the user store operations.
///
/// The display string of each kind is the message returned to API clients;
/// the underlying store error, when there is one, is only available through
/// [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum UserError {
    /// Reading a single item failed.
    #[error("failed to fetch record")]
    FetchRecord(#[source] BoxError),
    /// A single item could not be decoded into a user.
    #[error("failed to unmarshal record")]
    UnmarshalRecord(#[source] BoxError),
    /// Scanning the table failed.
    #[error("failed to fetch records")]
    FetchRecords(#[source] BoxError),
    /// A scanned item could not be decoded into a user.
    #[error("failed to unmarshal records")]
    UnmarshalRecords(#[source] BoxError),
    /// The user could not be encoded into an item.
    #[error("could not marshal item")]
    MarshalItem(#[source] BoxError),
    /// Writing a new user failed.
    #[error("could not put item")]
    PutItem(#[source] BoxError),
    /// A user with the same email already exists.
    #[error("user already exists")]
    AlreadyExists,
    /// Applying a patch failed.
    #[error("failed to update item")]
    UpdateItem(#[source] BoxError),
    /// No user has the given email.
    #[error("user not found")]
    NotFound,
    /// Deleting a user failed.
    #[error("failed to delete item")]
    DeleteItem(#[source] BoxError),
    /// A patch value is neither a string, an integer nor a boolean.
    #[error("unsupported attribute value type")]
    UnsupportedType {
        /// The attribute carrying the unsupported value.
        key: String,
    },
    /// A patch without any attribute.
    #[error("no attributes to update")]
    EmptyPatch,
    /// A patch that tries to change the partition key.
    #[error("email cannot be updated")]
    KeyUpdate,
    /// A patch attribute with an empty name.
    #[error("attribute name cannot be empty")]
    EmptyAttributeName,
}

impl UserError {
    /// Whether the error was caused by the caller's input rather than the store.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedType { .. }
                | Self::EmptyPatch
                | Self::KeyUpdate
                | Self::EmptyAttributeName
        )
    }
}
