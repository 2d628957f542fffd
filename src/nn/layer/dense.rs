/*
 * @Author       : 老董
 * @Date         : 2026-10-12
 * @Description  : Dense (全连接) 层，激活函数固定为 sigmoid
 *
 * 计算：out[u] = sigmoid(b[u] + Σ_j x[j] * W[j, u])
 * 权重布局：[input_dim, units]，按输入下标行优先
 */

use super::{LayerKind, TraitLayer};
use crate::errors::{ComparisonOperator, NnError};
use crate::nn::activation::sigmoid;
use crate::nn::config::LayerConfig;
use crate::nn::init::Init;
use crate::nn::LayerShape;
use crate::tensor::Tensor;
use ndarray::{Ix1, Ix2};
use rand::Rng;
use rayon::prelude::*;
use tracing::instrument;

/// Dense (全连接) 层
#[derive(Debug, Clone)]
pub struct Dense {
    /// 权重 [input_dim, units]
    weights: Tensor,
    /// 偏置 [units]
    biases: Tensor,
    units: usize,
    input_dim: usize,
}

impl Dense {
    /// 创建新的 Dense 层：权重取 U[-1, 1] * sqrt(2 / input_dim)，偏置全零
    pub fn new<R: Rng + ?Sized>(units: usize, input_dim: usize, rng: &mut R) -> Result<Self, NnError> {
        check_config(units, input_dim)?;
        let weights = Init::He.generate_with_rng(&[input_dim, units], rng)?;
        let biases = Init::Zeros.generate_with_rng(&[units], rng)?;
        Ok(Self {
            weights,
            biases,
            units,
            input_dim,
        })
    }

    /// 用给定的参数创建 Dense 层。`weights`须为 [input_dim, units]，`biases`须为 [units]
    pub fn from_parameters(weights: Tensor, biases: Tensor) -> Result<Self, NnError> {
        let &[input_dim, units] = weights.shape() else {
            return Err(NnError::Configuration(format!(
                "全连接层权重必须是 2D [input_dim, units]，得到 {:?}",
                weights.shape()
            )));
        };
        check_config(units, input_dim)?;
        if biases.shape() != [units] {
            return Err(NnError::ShapeMismatch {
                expected: vec![units],
                got: biases.shape().to_vec(),
            });
        }
        Ok(Self {
            weights,
            biases,
            units,
            input_dim,
        })
    }

    pub fn weights(&self) -> &Tensor {
        &self.weights
    }

    pub fn biases(&self) -> &Tensor {
        &self.biases
    }

    pub const fn units(&self) -> usize {
        self.units
    }

    pub const fn input_dim(&self) -> usize {
        self.input_dim
    }
}

fn check_config(units: usize, input_dim: usize) -> Result<(), NnError> {
    if units == 0 {
        return Err(NnError::comparison("units", ComparisonOperator::GreaterThan, 0));
    }
    if input_dim == 0 {
        return Err(NnError::comparison(
            "input_dim",
            ComparisonOperator::GreaterThan,
            0,
        ));
    }
    Ok(())
}

impl TraitLayer for Dense {
    fn kind(&self) -> LayerKind {
        LayerKind::Dense
    }

    fn declared_input_shape(&self) -> Option<LayerShape> {
        Some(LayerShape::flat(self.input_dim))
    }

    fn output_shape(&self, input_shape: &LayerShape) -> Result<LayerShape, NnError> {
        match *input_shape {
            LayerShape::Flat { len } if len == self.input_dim => Ok(LayerShape::flat(self.units)),
            LayerShape::Flat { len } => Err(NnError::Configuration(format!(
                "Dense 的 input_dim 为 {}，但上游输出长度为 {len}",
                self.input_dim
            ))),
            LayerShape::Spatial { .. } => Err(NnError::Configuration(format!(
                "Dense 需要一维输入，但上游输出为 {input_shape}，请先添加 Flatten 层"
            ))),
        }
    }

    #[instrument(skip_all, fields(units = self.units, input_dim = self.input_dim))]
    fn forward(&self, input: &Tensor) -> Result<Tensor, NnError> {
        if input.shape() != [self.input_dim] {
            return Err(NnError::ShapeMismatch {
                expected: vec![self.input_dim],
                got: input.shape().to_vec(),
            });
        }

        let x = input.view_as::<Ix1>()?;
        let w = self.weights.view_as::<Ix2>()?;
        let b = self.biases.view_as::<Ix1>()?;

        let data: Vec<f32> = (0..self.units)
            .into_par_iter()
            .map(|u| {
                let mut sum = b[u];
                for j in 0..self.input_dim {
                    sum += x[j] * w[[j, u]];
                }
                sigmoid(sum)
            })
            .collect();

        Ok(Tensor::from_vec(data, &[self.units])?)
    }

    fn param_count(&self) -> usize {
        self.weights.size() + self.biases.size()
    }

    fn describe(&self) -> LayerConfig {
        LayerConfig::Dense {
            units: self.units,
            input_dim: self.input_dim,
        }
    }
}
