pub mod controller;
pub mod drag;
pub mod region;
pub mod selection;
pub mod transform;

pub use controller::{Description, MapController, RegionCard};
pub use drag::{DragState, TouchPoint};
pub use region::{Region, RegionCategory, RegionRegistry, RegistryError};
pub use selection::{Highlight, Selection};
pub use transform::{MapConfig, MapTransform};
