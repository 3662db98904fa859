pub mod aggregation;
pub mod current;
pub mod forecast;
pub mod locations;
pub mod open_meteo;
