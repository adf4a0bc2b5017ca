pub mod articles;
pub mod audit;
pub mod checklists;
pub mod evaluations;
pub mod events;
pub mod users;
