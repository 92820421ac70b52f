//! The layout repository: every entity lives in one of its lookup tables
//! and entities refer to each other by id only.

use std::{
    collections::BTreeMap,
    fs, io,
    path::Path,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::{
    CarId, CarType, CarTypeId, Cargo, CargoId, FreightCar, Location, LocationId, ScheduledTrain,
    Town, TownId, TrainId,
};

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("unknown town {0}")]
    UnknownTown(TownId),
    #[error("unknown location {0}")]
    UnknownLocation(LocationId),
    #[error("unknown car type {0}")]
    UnknownCarType(CarTypeId),
    #[error("unknown cargo {0}")]
    UnknownCargo(CargoId),
    #[error("unknown train {0}")]
    UnknownTrain(TrainId),
    #[error("{context}: {source}")]
    Reference {
        context: String,
        #[source]
        source: Box<LayoutError>,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl LayoutError {
    fn within(self, context: impl Into<String>) -> Self {
        LayoutError::Reference {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
    #[serde(default)]
    towns: BTreeMap<TownId, Town>,
    #[serde(default)]
    locations: BTreeMap<LocationId, Location>,
    #[serde(default)]
    car_types: BTreeMap<CarTypeId, CarType>,
    #[serde(default)]
    cars: BTreeMap<CarId, FreightCar>,
    #[serde(default)]
    trains: BTreeMap<TrainId, ScheduledTrain>,
    #[serde(default)]
    cargos: BTreeMap<CargoId, Cargo>,
}

impl Layout {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let data = fs::read_to_string(path)?;
        let layout = Self::from_json_str(&data)?;
        tracing::info!(
            "[layout] Loaded \"{}\" from {} ({} cars, {} trains)",
            layout.name,
            path.display(),
            layout.cars.len(),
            layout.trains.len()
        );
        Ok(layout)
    }

    pub fn save(&self, path: &Path) -> Result<(), LayoutError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Inserts
    // ------------------------------------------------------------------

    pub fn add_town(&mut self, town: Town) {
        self.towns.insert(town.id, town);
    }

    pub fn add_location(&mut self, location: Location) {
        self.locations.insert(location.id, location);
    }

    pub fn add_car_type(&mut self, car_type: CarType) {
        self.car_types.insert(car_type.id, car_type);
    }

    pub fn add_car(&mut self, car: FreightCar) {
        self.cars.insert(car.id, car);
    }

    pub fn add_train(&mut self, train: ScheduledTrain) {
        self.trains.insert(train.id, train);
    }

    pub fn add_cargo(&mut self, cargo: Cargo) {
        self.cargos.insert(cargo.id, cargo);
    }

    pub fn cargo_mut(&mut self, id: CargoId) -> Option<&mut Cargo> {
        self.cargos.get_mut(&id)
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    pub fn town(&self, id: TownId) -> Option<&Town> {
        self.towns.get(&id)
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(&id)
    }

    pub fn car_type(&self, id: CarTypeId) -> Option<&CarType> {
        self.car_types.get(&id)
    }

    pub fn car(&self, id: CarId) -> Option<&FreightCar> {
        self.cars.get(&id)
    }

    pub fn train(&self, id: TrainId) -> Option<&ScheduledTrain> {
        self.trains.get(&id)
    }

    pub fn cargo(&self, id: CargoId) -> Option<&Cargo> {
        self.cargos.get(&id)
    }

    pub fn cars(&self) -> impl Iterator<Item = &FreightCar> {
        self.cars.values()
    }

    pub fn trains(&self) -> impl Iterator<Item = &ScheduledTrain> {
        self.trains.values()
    }

    pub fn cargos(&self) -> impl Iterator<Item = &Cargo> {
        self.cargos.values()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Industries ordered by town name, then industry name.
    pub fn industries(&self) -> Vec<&Location> {
        self.sorted_locations(|location| !location.is_yard())
    }

    /// Yards ordered by town name, then yard name.
    pub fn yards(&self) -> Vec<&Location> {
        self.sorted_locations(Location::is_yard)
    }

    fn sorted_locations(&self, keep: impl Fn(&Location) -> bool) -> Vec<&Location> {
        let mut locations = self
            .locations
            .values()
            .filter(|location| keep(location))
            .collect::<Vec<_>>();
        locations.sort_by(|a, b| {
            self.town_name(a.town)
                .cmp(self.town_name(b.town))
                .then_with(|| a.name.cmp(&b.name))
        });
        locations
    }

    /// Cars spotted at a location, by reporting marks.
    pub fn cars_at(&self, location: LocationId) -> Vec<&FreightCar> {
        let mut cars = self
            .cars
            .values()
            .filter(|car| car.current_location == location)
            .collect::<Vec<_>>();
        cars.sort_by(|a, b| a.reporting_marks.cmp(&b.reporting_marks));
        cars
    }

    /// Cars assigned to a train, by reporting marks.
    pub fn cars_in_train(&self, train: TrainId) -> Vec<&FreightCar> {
        let mut cars = self
            .cars
            .values()
            .filter(|car| car.current_train == Some(train))
            .collect::<Vec<_>>();
        cars.sort_by(|a, b| a.reporting_marks.cmp(&b.reporting_marks));
        cars
    }

    /// Unknown locations are treated as online.
    pub fn is_offline(&self, location: LocationId) -> bool {
        self.location(location)
            .and_then(|loc| self.town(loc.town))
            .map(|town| town.is_offline)
            .unwrap_or(false)
    }

    pub fn town_name(&self, id: TownId) -> &str {
        self.town(id).map(|town| town.name.as_str()).unwrap_or("")
    }

    pub fn location_name(&self, id: LocationId) -> &str {
        self.location(id)
            .map(|location| location.name.as_str())
            .unwrap_or("Unknown")
    }

    /// "Town / Location", or just the location name when the town is unknown.
    pub fn location_label(&self, id: LocationId) -> String {
        match self.location(id) {
            Some(location) => match self.town(location.town) {
                Some(town) => format!("{} / {}", town.name, location.name),
                None => location.name.clone(),
            },
            None => "Unknown".to_string(),
        }
    }

    pub fn car_type_name(&self, id: CarTypeId) -> &str {
        self.car_type(id).map(|kind| kind.name.as_str()).unwrap_or("")
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    pub fn validate_cargo(&self, cargo: &Cargo) -> Result<(), LayoutError> {
        let context = || format!("cargo \"{}\"", cargo.description);
        self.require_location(cargo.source)
            .map_err(|err| err.within(context()))?;
        self.require_location(cargo.destination)
            .map_err(|err| err.within(context()))?;
        if let Some(kind) = cargo.car_type {
            if self.car_type(kind).is_none() {
                return Err(LayoutError::UnknownCarType(kind).within(context()));
            }
        }
        Ok(())
    }

    /// Cargos whose endpoints resolve and can therefore generate car orders.
    pub fn orderable_cargos(&self) -> Vec<&Cargo> {
        self.cargos
            .values()
            .filter(|cargo| self.validate_cargo(cargo).is_ok())
            .collect()
    }

    /// Every dangling reference in the layout.
    pub fn validate(&self) -> Vec<LayoutError> {
        let mut problems = Vec::new();

        for location in self.locations.values() {
            if self.town(location.town).is_none() {
                problems.push(
                    LayoutError::UnknownTown(location.town)
                        .within(format!("location \"{}\"", location.name)),
                );
            }
        }

        for car in self.cars.values() {
            let context = || format!("car {}", car.reporting_marks);
            if self.car_type(car.car_type).is_none() {
                problems.push(LayoutError::UnknownCarType(car.car_type).within(context()));
            }
            if let Err(err) = self.require_location(car.current_location) {
                problems.push(err.within(context()));
            }
            if let Some(cargo) = car.cargo.filter(|id| self.cargo(*id).is_none()) {
                problems.push(LayoutError::UnknownCargo(cargo).within(context()));
            }
            if let Some(train) = car.current_train.filter(|id| self.train(*id).is_none()) {
                problems.push(LayoutError::UnknownTrain(train).within(context()));
            }
        }

        for train in self.trains.values() {
            for stop in &train.stops {
                if let Err(err) = self.require_location(*stop) {
                    problems.push(err.within(format!("train {}", train.name)));
                }
            }
        }

        for cargo in self.cargos.values() {
            if let Err(err) = self.validate_cargo(cargo) {
                problems.push(err);
            }
        }

        problems
    }

    fn require_location(&self, id: LocationId) -> Result<&Location, LayoutError> {
        self.location(id).ok_or(LayoutError::UnknownLocation(id))
    }
}
