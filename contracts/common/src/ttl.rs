use soroban_sdk::{Env, IntoVal, Val};

// ── TTL policy ───────────────────────────────────────────────────────────────

/// Ledgers remaining below which an entry's lifetime gets bumped.
pub const TTL_THRESHOLD: u32 = 5_184_000;
/// Ledgers an entry is extended to once bumped.
pub const TTL_EXTEND_TO: u32 = 10_368_000;

/// Extends the TTL of the contract instance (and every instance key).
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the TTL of a single persistent entry.
///
/// Callers must only pass keys that are known to exist.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
