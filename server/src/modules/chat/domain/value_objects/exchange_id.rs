use serde::{Deserialize, Serialize};
use std::fmt;

/// 对话记录唯一标识符
///
/// 值对象：由存储层单调分配（SQLite rowid），不可变
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeId(i64);

impl ExchangeId {
    /// 从存储层分配的行号创建
    pub fn new(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_id_ordering() {
        let first = ExchangeId::new(1);
        let second = ExchangeId::new(2);
        assert!(first < second);
        assert_eq!(second.to_string(), "2");
    }
}
