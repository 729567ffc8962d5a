pub mod coalesce;
pub mod labels;
pub mod layout;
