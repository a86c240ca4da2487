//! Content-addressed cart line identity

use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

/// Generate a content-addressed instance_id for a cart line
///
/// The instance_id is a hash of the line's variant identity:
/// - item_id
/// - selected size name (or its absence)
/// - the *set* of selected add-on names (order and duplicates ignored)
///
/// Two additions with the same instance_id are merged into one line.
/// Prices are deliberately not part of the key.
pub fn generate_instance_id<'a>(
    item_id: &str,
    size_name: Option<&str>,
    addon_names: impl IntoIterator<Item = &'a str>,
) -> String {
    let mut hasher = Sha256::new();

    // Length-prefixed fields so ("ab", "c") never collides with ("a", "bc")
    let mut update_field = |bytes: &[u8]| {
        hasher.update((bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
    };

    update_field(item_id.as_bytes());

    match size_name {
        Some(name) => {
            update_field(b"S");
            update_field(name.as_bytes());
        }
        None => update_field(b"-"),
    }

    let addons: BTreeSet<&str> = addon_names.into_iter().collect();
    for name in addons {
        update_field(b"A");
        update_field(name.as_bytes());
    }

    let result = hasher.finalize();
    hex::encode(&result[..16])
}
