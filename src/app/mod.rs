// Application layer - Use case interactors

pub mod container;
pub mod inspect_interactor;
pub mod split_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use inspect_interactor::InspectInteractor;
pub use split_interactor::SplitInteractor;
