//! Layout model: towns, industries, yards, cars, trains and cargo.

pub mod app_state;
pub mod entities;
pub mod layout;
pub mod reports;

pub use app_state::AppState;
pub use entities::{
    CarId, CarType, CarTypeId, Cargo, CargoId, CargoRate, FreightCar, Location, LocationId,
    LocationKind, ScheduledTrain, Town, TownId, TrainId,
};
pub use layout::{Layout, LayoutError};
