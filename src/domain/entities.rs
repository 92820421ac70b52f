use serde::{Deserialize, Serialize};

use super::layout::Layout;

pub type TownId = u32;
pub type LocationId = u32;
pub type CarTypeId = u32;
pub type CarId = u32;
pub type TrainId = u32;
pub type CargoId = u32;

/// A town on (or off) the modeled layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Town {
    pub id: TownId,
    pub name: String,
    /// Offline towns stand for places beyond the layout (staging, the
    /// "rest of the world"). Every location inside one is offline.
    #[serde(default)]
    pub is_offline: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    #[default]
    Industry,
    Yard,
}

/// An industry or yard where cars can be spotted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub town: TownId,
    #[serde(default)]
    pub kind: LocationKind,
    #[serde(default)]
    pub division: String,
}

impl Location {
    pub fn is_yard(&self) -> bool {
        self.kind == LocationKind::Yard
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarType {
    pub id: CarTypeId,
    /// Short code such as `XM` or `FM`.
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreightCar {
    pub id: CarId,
    pub reporting_marks: String,
    pub car_type: CarTypeId,
    pub current_location: LocationId,
    #[serde(default)]
    pub cargo: Option<CargoId>,
    #[serde(default)]
    pub is_loaded: bool,
    /// Train the car is reserved on or currently travelling in.
    #[serde(default)]
    pub current_train: Option<TrainId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTrain {
    pub id: TrainId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Ordered stops, first to last.
    #[serde(default)]
    pub stops: Vec<LocationId>,
    #[serde(default)]
    pub min_cars: u32,
    #[serde(default)]
    pub max_cars: u32,
}

/// How a cargo's stored `priority` should be read.
///
/// The stored number has historically meant either a fixed weekly car
/// count or a relative random-chance weight. Callers pick explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CargoRate {
    /// Exactly `priority` cars appear every operating week.
    #[default]
    FixedPerWeek,
    /// `priority` is a relative weight for random car orders.
    RandomWeight,
}

impl CargoRate {
    pub fn label(&self) -> &'static str {
        match self {
            CargoRate::FixedPerWeek => "fixed",
            CargoRate::RandomWeight => "random",
        }
    }
}

/// Demand for car movement between two locations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cargo {
    pub id: CargoId,
    pub description: String,
    #[serde(default)]
    pub car_type: Option<CarTypeId>,
    pub source: LocationId,
    pub destination: LocationId,
    pub priority: u32,
    #[serde(default)]
    pub rate: CargoRate,
}

impl Cargo {
    pub fn cars_per_week(&self) -> u32 {
        self.priority
    }

    pub fn set_cars_per_week(&mut self, value: u32) {
        self.priority = value;
    }

    /// Mirrors the `name` every other entity exposes to templates.
    pub fn name(&self) -> &str {
        &self.description
    }

    pub fn is_fixed_rate(&self) -> bool {
        self.rate == CargoRate::FixedPerWeek
    }

    /// An unresolvable source is not offline; `Layout::validate_cargo`
    /// reports it instead.
    pub fn is_source_offline(&self, layout: &Layout) -> bool {
        layout.is_offline(self.source)
    }

    pub fn is_destination_offline(&self, layout: &Layout) -> bool {
        layout.is_offline(self.destination)
    }
}
