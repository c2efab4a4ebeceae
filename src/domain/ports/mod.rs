pub mod embedding_port;
pub mod situation_store;
