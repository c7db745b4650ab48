pub mod communication;
pub mod customer;
pub mod enquiry;
pub mod quotation;
pub mod task;
