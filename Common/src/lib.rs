#![allow(non_snake_case)]

pub mod dashboard;
pub mod utils;
