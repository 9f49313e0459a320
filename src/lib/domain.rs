//! Domain types and the ports the infrastructure implements

pub mod communication;
