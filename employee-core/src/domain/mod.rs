pub mod employee;
pub mod value_objects;

pub use employee::{age_on, Employee, EmployeeRecord};
pub use value_objects::*;
