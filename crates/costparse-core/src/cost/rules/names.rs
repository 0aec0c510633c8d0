//! Name normalization for customer matching.

use super::patterns::NON_ALPHANUMERIC;

/// Reduce a name to a lowercase alphanumeric matching key.
///
/// Keys are only compared, never displayed.
pub fn normalize_name(value: &str) -> String {
    NON_ALPHANUMERIC
        .replace_all(&value.to_lowercase(), "")
        .into_owned()
}
