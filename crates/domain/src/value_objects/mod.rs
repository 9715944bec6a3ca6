pub mod percentage;
pub mod price;
pub mod simulation_result;
