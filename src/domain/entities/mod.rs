pub mod memory_record;
