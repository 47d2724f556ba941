pub mod address_formatter;
pub mod group_normalizer;
pub mod registry_merger;
pub mod roster_converter;
pub mod visibility;
