/*
 * @Author       : 老董
 * @Date         : 2026-10-12
 * @Description  : 推理用张量：以ndarray动态维数组为底层存储，行优先、通道维变化最快，
 *                 即 index = (row * width + col) * channels + channel
 */

use ndarray::{Array, IxDyn};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::errors::TensorError;

mod index;
mod property;
mod shape;

#[cfg(test)]
mod tests;

/// 定义张量的结构体。可以是向量（[n]，供全连接层使用）或三维特征图（[h, w, c]）。
/// 注：张量形状和数据长度在构造时即被校验，之后不会出现两者不一致的情况。
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    data: Array<f32, IxDyn>,
}

impl Tensor {
    /// 由切片创建张量，`data`的长度必须等于`shape`中所有元素的乘积，否则返回错误。
    /// 形状为`[]`时视为标量，需恰好1个元素。
    pub fn new(data: &[f32], shape: &[usize]) -> Result<Self, TensorError> {
        Self::from_vec(data.to_vec(), shape)
    }

    /// 同`new`，但直接接管`data`的所有权，避免一次拷贝
    pub fn from_vec(data: Vec<f32>, shape: &[usize]) -> Result<Self, TensorError> {
        let expected = shape.iter().product::<usize>();
        if data.len() != expected {
            return Err(TensorError::LengthMismatch {
                shape: shape.to_vec(),
                expected,
                got: data.len(),
            });
        }
        let data = Array::from_shape_vec(IxDyn(shape), data).map_err(|_| {
            TensorError::IncompatibleShape {
                from: vec![expected],
                to: shape.to_vec(),
            }
        })?;
        Ok(Self { data })
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            data: Array::zeros(IxDyn(shape)),
        }
    }

    /// 创建所有元素均为`value`的张量
    pub fn full(value: f32, shape: &[usize]) -> Self {
        Self {
            data: Array::from_elem(IxDyn(shape), value),
        }
    }

    /// 创建一个随机张量，其值在[min, max]的闭区间内均匀分布。
    /// 随机源由调用方提供（测试中一般用`StdRng::seed_from_u64`以保证可复现）。
    /// `min`/`max`须为有限值且`min`≤`max`，否则返回`TensorError::InvalidRange`。
    pub fn uniform_with_rng<R: Rng + ?Sized>(
        min: f32,
        max: f32,
        shape: &[usize],
        rng: &mut R,
    ) -> Result<Self, TensorError> {
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(TensorError::InvalidRange { min, max });
        }
        let dist = Uniform::from(min..=max);
        Ok(Self {
            data: Array::from_shape_fn(IxDyn(shape), |_| dist.sample(&mut *rng)),
        })
    }
}
