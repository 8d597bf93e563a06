pub mod hit;
pub mod paint;
pub mod route;

pub use hit::{Hit, HitRegion, classify, hit_test, stroke_region};
