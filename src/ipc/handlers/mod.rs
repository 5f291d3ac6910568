pub mod exchange;
pub mod core;
pub mod students;

use crate::ipc::error::err;
use crate::ipc::types::Request;
use serde::de::DeserializeOwned;

/// Decodes `params` into a request struct. Absent params decode as the default.
pub(crate) fn parse_params<T>(req: &Request) -> Result<T, serde_json::Value>
where
    T: DeserializeOwned + Default,
{
    if req.params.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(req.params.clone())
        .map_err(|e| err(&req.id, "bad_params", e.to_string(), None))
}
