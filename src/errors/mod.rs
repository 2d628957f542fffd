use thiserror::Error;
mod ops;
pub use self::ops::*;

/// 张量（缓冲区+形状）层面的错误
#[derive(Error, Debug, PartialEq)]
pub enum TensorError {
    #[error("数据长度为{got}，而形状{shape:?}需要{expected}个元素")]
    LengthMismatch {
        shape: Vec<usize>,
        expected: usize,
        got: usize,
    },
    #[error("形状不兼容，无法将形状{from:?}重塑为{to:?}")]
    IncompatibleShape { from: Vec<usize>, to: Vec<usize> },
    #[error("张量维数不符：期望{expected}维，实际为{got}维")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("随机区间[{min}, {max}]无效：两端须为有限值且min≤max")]
    InvalidRange { min: f32, max: f32 },
}

/// 网络层与流水线层面的错误
#[derive(Error, Debug, PartialEq)]
pub enum NnError {
    /// 层的形状参数非法，或相邻层的形状无法衔接
    #[error("层配置无效：{0}")]
    Configuration(String),
    /// 流水线层数已达上限
    #[error("模型最多容纳{capacity}层，无法再添加")]
    Capacity { capacity: usize },
    /// 前向传播的输入形状与层/模型声明的形状不一致
    #[error("输入形状不匹配：期望{expected:?}，实际为{got:?}")]
    ShapeMismatch { expected: Vec<usize>, got: Vec<usize> },
    #[error(transparent)]
    Tensor(#[from] TensorError),
}

impl NnError {
    /// 构造形如“`kernel_size`须≤4”的配置错误
    pub fn comparison(value_name: &str, operator: ComparisonOperator, threshold: usize) -> Self {
        Self::Configuration(format!("{value_name}须{operator}{threshold}"))
    }
}
