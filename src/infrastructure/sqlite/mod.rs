pub mod migrations;
pub mod situation_store;
