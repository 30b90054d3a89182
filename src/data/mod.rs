//! Data module - CSV loading, cleaning and the typed registration table

#[cfg(test)]
pub(crate) mod fixtures;
mod loader;
mod processor;
mod table;

pub use loader::{DataError, DataLoader};
pub use processor::DataProcessor;
pub use table::{
    RegistrationRecord, RegistrationTable, ACTIVE_REGISTRATION, DISTRICT, DIVISION,
    FEMALE_PERCENTAGE, GENDER_RATIO,
};
