pub mod clash;
pub mod clash_output;
