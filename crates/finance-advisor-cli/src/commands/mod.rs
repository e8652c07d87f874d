pub mod advisor;
pub mod planning;
