use rewind_core::{ReplayError, ReplayEvent};

/// Render `event` as one server-sent-events frame: `data: <json>\n\n`.
///
/// # Errors
/// Returns `StreamFault` if the event cannot be serialized.
///
/// ```
/// use rewind::{ReplayEvent, sse_frame};
///
/// let frame = sse_frame(&ReplayEvent::finished()).unwrap();
/// assert_eq!(frame, "data: {\"type\":\"finished\",\"message\":\"Replay completed\"}\n\n");
/// ```
pub fn sse_frame(event: &ReplayEvent) -> Result<String, ReplayError> {
    let json = serde_json::to_string(event).map_err(|e| ReplayError::fault(e.to_string()))?;
    Ok(format!("data: {json}\n\n"))
}
