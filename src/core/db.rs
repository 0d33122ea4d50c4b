use spin_sdk::key_value::Store;
use crate::models::models::Database;

/// Single key holding the whole document. Everything except session tokens
/// lives under it.
pub const DB_KEY: &str = "db";

/// Explicit store handle: the full document resident in memory plus the
/// key-value store it round-trips through. Mutating handlers follow one
/// sequence: open, mutate `data`, flush, respond. A failed flush drops the
/// in-memory mutation with the request, so it never leaks into later
/// requests.
pub struct Db {
    store: Store,
    pub data: Database,
}

impl Db {
    pub fn open() -> anyhow::Result<Db> {
        let store = Store::open_default()
            .map_err(|e| anyhow::anyhow!("failed to open key-value store: {e}"))?;
        let data = store.get_json::<Database>(DB_KEY)?.unwrap_or_default();
        Ok(Db { store, data })
    }

    /// Rewrite the entire document. Call after every mutation; there are no
    /// partial or incremental writes.
    pub fn flush(&self) -> anyhow::Result<()> {
        self.store.set_json(DB_KEY, &self.data)?;
        Ok(())
    }
}
