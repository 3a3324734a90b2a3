//! Error handling utilities for the MCP server

use rmcp::ErrorData;
use waymark_core::WaymarkError;

/// Converts a planner error into an MCP error.
///
/// Mistakes in the tool arguments become `invalid_params` so the client can
/// correct the call; everything else is reported as an internal error.
pub fn to_mcp_error(message: &str, error: &WaymarkError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        WaymarkError::Validation { .. }
        | WaymarkError::InvalidInput { .. }
        | WaymarkError::DuplicateItem { .. }
        | WaymarkError::DayOutOfRange { .. }
        | WaymarkError::DanglingReference { .. }
        | WaymarkError::TripNotFound { .. } => ErrorData::invalid_params(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}
