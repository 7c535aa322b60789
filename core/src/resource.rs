//! The `Resource` abstraction the client and store are generic over.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Any record type with a stable unique string identifier, manipulated via
/// create/read/update/delete.
///
/// The associated payload types pin down, per concrete resource, exactly the
/// fields its server accepts: `Create` for the POST body (the server assigns
/// the id) and `Update` for the PUT body (typically all-optional fields, with
/// absent fields left unchanged server-side). This keeps write payloads
/// checked at compile time while the machinery above stays shape-agnostic.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + 'static {
    /// Fields accepted when creating a new record of this type.
    type Create: Serialize;

    /// Fields accepted when updating an existing record of this type.
    type Update: Serialize;

    /// The stable unique identifier of this record.
    fn id(&self) -> &str;
}
