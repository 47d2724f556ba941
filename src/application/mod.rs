pub mod use_cases;

pub use use_cases::address_formatter::AddressFormatter;
pub use use_cases::registry_merger::RegistryMerger;
pub use use_cases::roster_converter::RosterConverter;
