pub mod types;

pub use types::{ClientSize, ScreenPoint, ScreenRect, SurfaceId};
