//! Template-facing views of a layout. Everything here is plain data that
//! serializes straight into a render context.

use serde::Serialize;

use super::entities::{Cargo, FreightCar, Location, ScheduledTrain};
use super::layout::Layout;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CarRow {
    pub reporting_marks: String,
    pub car_type: String,
    pub location: String,
    pub town: String,
    pub is_loaded: bool,
    pub cargo: String,
    pub source: String,
    pub destination: String,
    pub train: String,
}

impl CarRow {
    pub fn from_car(layout: &Layout, car: &FreightCar) -> Self {
        let cargo = car.cargo.and_then(|id| layout.cargo(id));
        let town = layout
            .location(car.current_location)
            .map(|location| layout.town_name(location.town).to_string())
            .unwrap_or_default();
        Self {
            reporting_marks: car.reporting_marks.clone(),
            car_type: layout.car_type_name(car.car_type).to_string(),
            location: layout.location_name(car.current_location).to_string(),
            town,
            is_loaded: car.is_loaded,
            cargo: cargo.map(|c| c.description.clone()).unwrap_or_default(),
            source: cargo
                .map(|c| layout.location_label(c.source))
                .unwrap_or_default(),
            destination: cargo
                .map(|c| layout.location_label(c.destination))
                .unwrap_or_default(),
            train: car
                .current_train
                .and_then(|id| layout.train(id))
                .map(|train| train.name.clone())
                .unwrap_or_default(),
        }
    }
}

/// A location together with the cars spotted there.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LocationReport {
    pub name: String,
    pub town: String,
    pub division: String,
    pub is_offline: bool,
    pub cars: Vec<CarRow>,
}

impl LocationReport {
    fn build(layout: &Layout, location: &Location) -> Self {
        Self {
            name: location.name.clone(),
            town: layout.town_name(location.town).to_string(),
            division: location.division.clone(),
            is_offline: layout.is_offline(location.id),
            cars: layout
                .cars_at(location.id)
                .into_iter()
                .map(|car| CarRow::from_car(layout, car))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CargoRow {
    pub name: String,
    pub car_type: String,
    pub source: String,
    pub destination: String,
    pub cars_per_week: u32,
    /// `fixed` or `random`, see `CargoRate`.
    pub rate: &'static str,
    pub is_source_offline: bool,
    pub is_destination_offline: bool,
}

impl CargoRow {
    pub fn from_cargo(layout: &Layout, cargo: &Cargo) -> Self {
        Self {
            name: cargo.name().to_string(),
            car_type: cargo
                .car_type
                .map(|id| layout.car_type_name(id).to_string())
                .unwrap_or_default(),
            source: layout.location_label(cargo.source),
            destination: layout.location_label(cargo.destination),
            cars_per_week: cargo.cars_per_week(),
            rate: cargo.rate.label(),
            is_source_offline: cargo.is_source_offline(layout),
            is_destination_offline: cargo.is_destination_offline(layout),
        }
    }
}

/// Incoming and outgoing cargo for one industry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IndustryCargo {
    pub name: String,
    pub town: String,
    pub incoming: Vec<CargoRow>,
    pub outgoing: Vec<CargoRow>,
    pub cars_in_per_week: u32,
    pub cars_out_per_week: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrainSummary {
    pub name: String,
    pub description: String,
    pub stops: Vec<String>,
    pub car_count: usize,
    pub min_cars: u32,
    pub max_cars: u32,
}

impl TrainSummary {
    fn build(layout: &Layout, train: &ScheduledTrain) -> Self {
        Self {
            name: train.name.clone(),
            description: train.description.clone(),
            stops: stop_names(layout, train),
            car_count: layout.cars_in_train(train.id).len(),
            min_cars: train.min_cars,
            max_cars: train.max_cars,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReservedCars {
    pub train: String,
    pub cars: Vec<CarRow>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CarReport {
    pub layout_name: String,
    pub cars: Vec<CarRow>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IndustryReport {
    pub layout_name: String,
    pub industries: Vec<LocationReport>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct YardReport {
    pub layout_name: String,
    pub yards: Vec<LocationReport>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CargoReport {
    pub layout_name: String,
    pub industries: Vec<IndustryCargo>,
    pub total_cars_per_week: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReservedCarReport {
    pub layout_name: String,
    pub trains: Vec<ReservedCars>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutPage {
    pub layout_name: String,
    pub trains: Vec<TrainSummary>,
    pub industry_count: usize,
    pub yard_count: usize,
    pub car_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutEntry {
    pub name: String,
    pub train_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutsPage {
    pub layouts: Vec<LayoutEntry>,
}

/// One car's work on a switchlist.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SwitchlistRow {
    pub reporting_marks: String,
    pub car_type: String,
    pub is_loaded: bool,
    pub cargo: String,
    pub pick_up: String,
    pub pick_up_town: String,
    pub drop_off: String,
    pub drop_off_town: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Switchlist {
    pub layout_name: String,
    pub train_name: String,
    pub train_description: String,
    pub stops: Vec<String>,
    pub cars: Vec<SwitchlistRow>,
}

pub fn car_report(layout: &Layout) -> CarReport {
    let mut cars = layout
        .cars()
        .map(|car| CarRow::from_car(layout, car))
        .collect::<Vec<_>>();
    cars.sort_by(|a, b| a.reporting_marks.cmp(&b.reporting_marks));
    CarReport {
        layout_name: layout.name.clone(),
        cars,
    }
}

pub fn industry_report(layout: &Layout) -> IndustryReport {
    IndustryReport {
        layout_name: layout.name.clone(),
        industries: layout
            .industries()
            .into_iter()
            .map(|location| LocationReport::build(layout, location))
            .collect(),
    }
}

pub fn yard_report(layout: &Layout) -> YardReport {
    YardReport {
        layout_name: layout.name.clone(),
        yards: layout
            .yards()
            .into_iter()
            .map(|location| LocationReport::build(layout, location))
            .collect(),
    }
}

/// Per-industry cargo summary. Industries without any cargo are skipped.
pub fn cargo_report(layout: &Layout) -> CargoReport {
    let mut industries = Vec::new();
    for location in layout.industries() {
        let incoming = layout
            .cargos()
            .filter(|cargo| cargo.destination == location.id)
            .map(|cargo| CargoRow::from_cargo(layout, cargo))
            .collect::<Vec<_>>();
        let outgoing = layout
            .cargos()
            .filter(|cargo| cargo.source == location.id)
            .map(|cargo| CargoRow::from_cargo(layout, cargo))
            .collect::<Vec<_>>();
        if incoming.is_empty() && outgoing.is_empty() {
            continue;
        }
        industries.push(IndustryCargo {
            name: location.name.clone(),
            town: layout.town_name(location.town).to_string(),
            cars_in_per_week: total_per_week(incoming.iter().map(|row| row.cars_per_week)),
            cars_out_per_week: total_per_week(outgoing.iter().map(|row| row.cars_per_week)),
            incoming,
            outgoing,
        });
    }

    CargoReport {
        layout_name: layout.name.clone(),
        industries,
        total_cars_per_week: total_per_week(layout.cargos().map(Cargo::cars_per_week)),
    }
}

/// Sum that pins at `u32::MAX` instead of wrapping.
fn total_per_week(rates: impl Iterator<Item = u32>) -> u32 {
    rates.fold(0, u32::saturating_add)
}

/// Trains with at least one car reserved on them.
pub fn reserved_car_report(layout: &Layout) -> ReservedCarReport {
    let trains = layout
        .trains()
        .filter_map(|train| {
            let cars = layout.cars_in_train(train.id);
            if cars.is_empty() {
                return None;
            }
            Some(ReservedCars {
                train: train.name.clone(),
                cars: cars
                    .into_iter()
                    .map(|car| CarRow::from_car(layout, car))
                    .collect(),
            })
        })
        .collect();
    ReservedCarReport {
        layout_name: layout.name.clone(),
        trains,
    }
}

pub fn layout_page(layout: &Layout) -> LayoutPage {
    LayoutPage {
        layout_name: layout.name.clone(),
        trains: layout
            .trains()
            .map(|train| TrainSummary::build(layout, train))
            .collect(),
        industry_count: layout.industries().len(),
        yard_count: layout.yards().len(),
        car_count: layout.cars().count(),
    }
}

pub fn layouts_page(layouts: &[Layout]) -> LayoutsPage {
    LayoutsPage {
        layouts: layouts
            .iter()
            .map(|layout| LayoutEntry {
                name: layout.name.clone(),
                train_count: layout.trains().count(),
            })
            .collect(),
    }
}

/// Work for a train: every car in it, where it is now and where it goes.
/// Empty cars without a cargo are dropped at the train's last stop.
pub fn switchlist(layout: &Layout, train: &ScheduledTrain) -> Switchlist {
    let final_stop = train.stops.last().copied();
    let cars = layout
        .cars_in_train(train.id)
        .into_iter()
        .map(|car| {
            let cargo = car.cargo.and_then(|id| layout.cargo(id));
            let drop_off = match cargo {
                Some(cargo) if car.is_loaded => Some(cargo.destination),
                Some(cargo) => Some(cargo.source),
                None => final_stop,
            };
            let town_of = |id| {
                layout
                    .location(id)
                    .map(|location: &Location| layout.town_name(location.town).to_string())
                    .unwrap_or_default()
            };
            SwitchlistRow {
                reporting_marks: car.reporting_marks.clone(),
                car_type: layout.car_type_name(car.car_type).to_string(),
                is_loaded: car.is_loaded,
                cargo: cargo.map(|c| c.description.clone()).unwrap_or_default(),
                pick_up: layout.location_name(car.current_location).to_string(),
                pick_up_town: town_of(car.current_location),
                drop_off: drop_off
                    .map(|id| layout.location_name(id).to_string())
                    .unwrap_or_default(),
                drop_off_town: drop_off.map(town_of).unwrap_or_default(),
            }
        })
        .collect();

    Switchlist {
        layout_name: layout.name.clone(),
        train_name: train.name.clone(),
        train_description: train.description.clone(),
        stops: stop_names(layout, train),
        cars,
    }
}

fn stop_names(layout: &Layout, train: &ScheduledTrain) -> Vec<String> {
    train
        .stops
        .iter()
        .map(|stop| layout.location_label(*stop))
        .collect()
}
