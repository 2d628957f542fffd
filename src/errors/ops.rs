use std::fmt::{self, Display};

/// 比较运算符（用于配置错误的提示）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    GreaterThan,
    LessOrEqual,
}
impl Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator_name = match self {
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::LessOrEqual => "≤",
        };
        write!(f, "{}", operator_name)
    }
}
