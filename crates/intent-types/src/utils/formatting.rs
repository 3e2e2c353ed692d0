//! Log formatting helpers.

/// Shortens a hex identifier to `0x` plus eight digits for log output.
///
/// Identifiers of ten characters or fewer are returned unchanged.
pub fn truncate_id(id: &str) -> String {
	match id.get(..10) {
		Some(head) if id.len() > 10 => format!("{head}.."),
		_ => id.to_string(),
	}
}
