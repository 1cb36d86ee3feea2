pub mod board;
pub mod hierarchy;
pub mod layout;
pub mod ordinal;
pub mod search;
