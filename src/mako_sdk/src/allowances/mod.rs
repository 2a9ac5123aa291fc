pub mod allowance_map;
