pub mod day_1;
pub mod day_2;
pub mod day_3;
pub mod day_4;
pub mod day_11;
pub mod day_12;
pub mod day_21;
