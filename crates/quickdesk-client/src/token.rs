//! Where the client keeps its bearer token between calls.

use std::fmt::Debug;

use parking_lot::RwLock;

/// Persists the bearer token. Without a token requests are sent
/// anonymously.
pub trait TokenStore: Send + Sync + Debug {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: Option<String>);
}

/// Process-local token storage.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }
}
