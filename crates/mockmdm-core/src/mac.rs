//! Hardware address normalization.

/// Characters dropped from a hardware address before keying.
const SEPARATORS: &[char] = &[':', '-', '.'];

/// Canonicalize a hardware address: separators and whitespace removed, lower-cased.
///
/// `AA:BB:CC:DD:EE:FF`, `aa-bb-cc-dd-ee-ff` and `aabb.ccdd.eeff` all map to
/// `aabbccddeeff`. Nothing else is validated; whatever remains is the key.
pub fn normalize_mac(raw: &str) -> String {
    raw.chars()
        .filter(|c| !SEPARATORS.contains(c) && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
