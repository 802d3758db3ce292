// Chat Domain - Value Objects
// 值对象：通过值比较，不可变

mod exchange_id;
mod language_code;

pub use exchange_id::*;
pub use language_code::*;
