use ledger::{LedgerService, QueryService, SqliteStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<LedgerService<SqliteStore>>,
    pub queries: Arc<QueryService<SqliteStore>>,
}

impl AppState {
    pub fn new(store: SqliteStore) -> Self {
        Self {
            ledger: Arc::new(LedgerService::new(store.clone())),
            queries: Arc::new(QueryService::new(store)),
        }
    }
}
