pub mod enrich_use_case;
pub mod import_use_case;
pub mod ports;
