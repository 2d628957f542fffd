/*
 * @Author       : 老董
 * @Date         : 2026-10-12
 * @Description  : Layer 模块 - 四种层（卷积、最大池化、展平、全连接）
 *
 * 每种层是“数据 + 无状态前向计算”，通过 enum_dispatch 统一为 `Layer` 枚举，
 * 由 `Sequential` 按插入顺序逐层分派。
 */

mod conv2d;
mod dense;
mod flatten;
mod max_pool2d;

pub use conv2d::Conv2d;
pub use dense::Dense;
pub use flatten::Flatten;
pub use max_pool2d::MaxPool2d;

use crate::errors::NnError;
use crate::nn::config::LayerConfig;
use crate::nn::LayerShape;
use crate::tensor::Tensor;
use enum_dispatch::enum_dispatch;
use std::fmt;

/// 层的种类标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Conv2d,
    MaxPool2d,
    Flatten,
    Dense,
}

impl LayerKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Conv2d => "Conv2d",
            Self::MaxPool2d => "MaxPool2d",
            Self::Flatten => "Flatten",
            Self::Dense => "Dense",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[enum_dispatch]
pub trait TraitLayer {
    fn kind(&self) -> LayerKind;

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// 该层自身声明的输入形状。池化层和展平层不声明，跟随上游
    fn declared_input_shape(&self) -> Option<LayerShape>;

    /// 根据输入形状推导输出形状；输入形状不被本层接受时返回错误。
    /// 模型组装时用它逐层校验，保证前向传播中不会出现越界访问
    fn output_shape(&self, input_shape: &LayerShape) -> Result<LayerShape, NnError>;

    /// 前向传播：只读本层参数，返回新分配的输出张量
    fn forward(&self, input: &Tensor) -> Result<Tensor, NnError>;

    /// 可学习参数（权重+偏置）的数量
    fn param_count(&self) -> usize {
        0
    }

    /// 导出该层的结构描述（不含参数值）
    fn describe(&self) -> LayerConfig;
}

/// 流水线中的一层
#[enum_dispatch(TraitLayer)]
#[derive(Debug, Clone)]
pub enum Layer {
    Conv2d(Conv2d),
    MaxPool2d(MaxPool2d),
    Flatten(Flatten),
    Dense(Dense),
}
