pub mod vehicle;

pub use vehicle::{Vehicle, VehiclePatch};
