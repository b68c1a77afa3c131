pub mod distance;
pub mod dtw;

pub use distance::cosine_distance;
pub use dtw::dtw;
