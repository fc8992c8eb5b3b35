// Application layer - Use case interactors

pub mod container;
pub mod extract_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use extract_interactor::{ExtractInteractor, MediaLayout};
