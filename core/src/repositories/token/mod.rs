pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

pub use r#trait::TokenRepository;

#[cfg(any(test, feature = "mocks"))]
pub mod memory;
#[cfg(any(test, feature = "mocks"))]
pub use memory::InMemoryTokenRepository;
