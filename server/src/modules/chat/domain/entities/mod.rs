// Chat Domain - Entities

mod exchange;

pub use exchange::*;
