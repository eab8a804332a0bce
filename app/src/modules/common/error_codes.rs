/// static error code for when a entity could not be created or updated
/// with a given email because its already in use by another entity
pub static EMAIL_IN_USE: &str = "EMAIL_IN_USE";

/// a request to a endpoint was not authorized because it did not contain
/// a bearer token in the Authorization request header
pub static NO_BEARER_TOKEN: &str = "NO_BEARER_TOKEN";

/// a request to a endpoint was not authorized because the bearer
/// token is expired or malformed
pub static INVALID_TOKEN: &str = "INVALID_TOKEN";

/// a booking status change was refused because the lifecycle does
/// not allow going from the current status to the requested one
pub static INVALID_STATUS_TRANSITION: &str = "INVALID_STATUS_TRANSITION";
