pub mod normalize;
pub mod translate;

pub use normalize::normalize;
pub use translate::translate_to_portuguese;
