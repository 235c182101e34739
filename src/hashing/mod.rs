use blake3::Hasher;

/// Computes a 64-bit hash of `data`: the first 8 bytes of its BLAKE3 digest.
///
/// Used for cache keys only. A collision costs a wrong cache hit for one
/// (user, recipe) pair; with 64 bits that needs billions of live entries to matter.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    truncate(blake3::hash(data))
}

/// Cache key for an ingredient classification.
///
/// Covers the user, the recipe and both ingredient sets. The sets are sorted first, so
/// the key does not depend on the order items were listed in.
pub fn hash_match_key<S: AsRef<str>>(
    user_id: u64,
    recipe_id: u64,
    recipe_tokens: &[S],
    owned_items: &[S],
) -> u64 {
    let mut hasher = Hasher::new();
    hasher.update(&user_id.to_le_bytes());
    hasher.update(&recipe_id.to_le_bytes());
    update_sorted(&mut hasher, recipe_tokens);
    hasher.update(b"|");
    update_sorted(&mut hasher, owned_items);
    truncate(hasher.finalize())
}

/// Cache key for recipes generated from a user's owned items (order-independent).
pub fn hash_generation_key<S: AsRef<str>>(user_id: u64, owned_items: &[S]) -> u64 {
    let mut hasher = Hasher::new();
    hasher.update(&user_id.to_le_bytes());
    update_sorted(&mut hasher, owned_items);
    truncate(hasher.finalize())
}

fn update_sorted<S: AsRef<str>>(hasher: &mut Hasher, items: &[S]) {
    let mut sorted: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();
    sorted.dedup();
    for item in sorted {
        // Length prefix keeps ["ab", "c"] and ["a", "bc"] apart.
        hasher.update(&(item.len() as u64).to_le_bytes());
        hasher.update(item.as_bytes());
    }
}

#[inline]
fn truncate(hash: blake3::Hash) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}
