/*
 * @Author       : 老董
 * @Date         : 2026-10-12
 * @Description  : 参数初始化策略。随机源一律由调用方传入，库内不持有任何全局随机状态
 */

use crate::errors::TensorError;
use crate::tensor::Tensor;
use rand::Rng;

/// 卷积核权重的缩放系数：U[-1, 1] * 0.1
pub const CONV_WEIGHT_SCALE: f32 = 0.1;

/// 参数初始化策略
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Init {
    /// 常数初始化
    Constant(f32),
    /// 全零（偏置默认使用）
    Zeros,
    /// U[-1, 1] 再乘以`scale`
    Uniform { scale: f32 },
    /// He 风格：U[-1, 1] * sqrt(2 / fan_in)，`fan_in`取形状首维
    He,
}

impl Init {
    /// 生成初始化后的 Tensor（使用指定的 RNG）。
    /// 确定性策略（`Constant`/`Zeros`）不会从`rng`中取值；
    /// `Uniform`的`scale`非有限值时返回`TensorError::InvalidRange`。
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        shape: &[usize],
        rng: &mut R,
    ) -> Result<Tensor, TensorError> {
        match *self {
            Self::Constant(v) => Ok(Tensor::full(v, shape)),
            Self::Zeros => Ok(Tensor::zeros(shape)),
            Self::Uniform { scale } => {
                let scale = scale.abs();
                Tensor::uniform_with_rng(-scale, scale, shape, rng)
            }
            Self::He => {
                let fan_in = shape.first().copied().unwrap_or(1).max(1);
                let scale = (2.0 / fan_in as f32).sqrt();
                Tensor::uniform_with_rng(-scale, scale, shape, rng)
            }
        }
    }
}
