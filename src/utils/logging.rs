use serde::Serialize;
use tracing::debug;

/// Log `value` as pretty JSON at debug level; serialization is skipped when
/// debug logging is off.
pub(crate) fn debug_payload<T>(what: &'static str, value: &T)
where
    T: Serialize,
{
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    match serde_json::to_string_pretty(value) {
        Ok(pretty_json) => debug!(payload = %pretty_json, "{what}"),
        Err(error) => debug!(%error, "{what}: payload not serializable"),
    }
}
