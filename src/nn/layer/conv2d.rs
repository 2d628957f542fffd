/*
 * @Author       : 老董
 * @Date         : 2026-10-12
 * @Description  : Conv2d (2D 卷积) 层 - valid 卷积（无填充），步长 1
 *
 * 输入/输出形状（通道在最后）：
 * - 输入：[H, W, C_in]
 * - 输出：[H', W', filters]
 *
 * 输出尺寸计算：
 * H' = H - k + 1
 * W' = W - k + 1
 *
 * 计算：out[i, j, f] = b[f] + Σ_{ki, kj, c} x[i+ki, j+kj, c] * K[f, ki, kj, c]，卷积后不接激活
 */

use super::{LayerKind, TraitLayer};
use crate::errors::{ComparisonOperator, NnError};
use crate::nn::config::LayerConfig;
use crate::nn::init::{CONV_WEIGHT_SCALE, Init};
use crate::nn::LayerShape;
use crate::tensor::Tensor;
use ndarray::{Ix1, Ix3, Ix4};
use rand::Rng;
use rayon::prelude::*;
use tracing::instrument;

/// Conv2d (2D 卷积) 层
///
/// # 使用示例
/// ```ignore
/// let mut rng = StdRng::seed_from_u64(42);
/// let conv = Conv2d::new(32, 2, 3, 256, 256, &mut rng)?;
/// let y = conv.forward(&x)?; // x: [256, 256, 3] -> y: [255, 255, 32]
/// ```
#[derive(Debug, Clone)]
pub struct Conv2d {
    /// 卷积核参数 [filters, kernel_size, kernel_size, input_channels]
    weights: Tensor,
    /// 偏置参数 [filters]
    biases: Tensor,
    filters: usize,
    kernel_size: usize,
    input_channels: usize,
    input_height: usize,
    input_width: usize,
}

impl Conv2d {
    /// 创建新的 Conv2d 层：权重取 U[-1, 1] * 0.1，偏置全零
    ///
    /// # 参数
    /// - `filters`: 输出通道数（卷积核个数）
    /// - `kernel_size`: 方形卷积核边长
    /// - `input_channels`/`input_height`/`input_width`: 输入特征图形状
    /// - `rng`: 随机源
    pub fn new<R: Rng + ?Sized>(
        filters: usize,
        kernel_size: usize,
        input_channels: usize,
        input_height: usize,
        input_width: usize,
        rng: &mut R,
    ) -> Result<Self, NnError> {
        check_config(filters, kernel_size, input_channels, input_height, input_width)?;

        let weights = Init::Uniform {
            scale: CONV_WEIGHT_SCALE,
        }
        .generate_with_rng(&[filters, kernel_size, kernel_size, input_channels], rng)?;
        let biases = Init::Zeros.generate_with_rng(&[filters], rng)?;

        Ok(Self {
            weights,
            biases,
            filters,
            kernel_size,
            input_channels,
            input_height,
            input_width,
        })
    }

    /// 用给定的参数创建 Conv2d 层。
    /// `weights`须为 [filters, k, k, C_in]，`biases`须为 [filters]
    pub fn from_parameters(
        weights: Tensor,
        biases: Tensor,
        input_height: usize,
        input_width: usize,
    ) -> Result<Self, NnError> {
        let &[filters, kernel_h, kernel_w, input_channels] = weights.shape() else {
            return Err(NnError::Configuration(format!(
                "卷积核必须是 4D [filters, k, k, C_in]，得到 {:?}",
                weights.shape()
            )));
        };
        if kernel_h != kernel_w {
            return Err(NnError::Configuration(format!(
                "卷积核必须是方形的，得到 {kernel_h}x{kernel_w}"
            )));
        }
        check_config(filters, kernel_h, input_channels, input_height, input_width)?;
        if biases.shape() != [filters] {
            return Err(NnError::ShapeMismatch {
                expected: vec![filters],
                got: biases.shape().to_vec(),
            });
        }

        Ok(Self {
            weights,
            biases,
            filters,
            kernel_size: kernel_h,
            input_channels,
            input_height,
            input_width,
        })
    }

    pub fn weights(&self) -> &Tensor {
        &self.weights
    }

    pub fn biases(&self) -> &Tensor {
        &self.biases
    }

    pub const fn filters(&self) -> usize {
        self.filters
    }

    pub const fn kernel_size(&self) -> usize {
        self.kernel_size
    }

    pub const fn input_shape(&self) -> LayerShape {
        LayerShape::spatial(self.input_height, self.input_width, self.input_channels)
    }

    /// (H', W')
    pub const fn output_size(&self) -> (usize, usize) {
        (
            self.input_height - self.kernel_size + 1,
            self.input_width - self.kernel_size + 1,
        )
    }
}

fn check_config(
    filters: usize,
    kernel_size: usize,
    input_channels: usize,
    input_height: usize,
    input_width: usize,
) -> Result<(), NnError> {
    for (name, value) in [
        ("filters", filters),
        ("kernel_size", kernel_size),
        ("input_channels", input_channels),
        ("input_height", input_height),
        ("input_width", input_width),
    ] {
        if value == 0 {
            return Err(NnError::comparison(name, ComparisonOperator::GreaterThan, 0));
        }
    }
    // 输出尺寸 H - k + 1 必须为正
    if kernel_size > input_height {
        return Err(NnError::comparison(
            "kernel_size",
            ComparisonOperator::LessOrEqual,
            input_height,
        ));
    }
    if kernel_size > input_width {
        return Err(NnError::comparison(
            "kernel_size",
            ComparisonOperator::LessOrEqual,
            input_width,
        ));
    }
    Ok(())
}

impl TraitLayer for Conv2d {
    fn kind(&self) -> LayerKind {
        LayerKind::Conv2d
    }

    fn declared_input_shape(&self) -> Option<LayerShape> {
        Some(self.input_shape())
    }

    fn output_shape(&self, input_shape: &LayerShape) -> Result<LayerShape, NnError> {
        if *input_shape != self.input_shape() {
            return Err(NnError::Configuration(format!(
                "Conv2d 期望输入 {}，但上游输出为 {input_shape}",
                self.input_shape()
            )));
        }
        let (out_h, out_w) = self.output_size();
        Ok(LayerShape::spatial(out_h, out_w, self.filters))
    }

    /// 按输出行并行（Rayon），各行内部的累加顺序与串行实现一致，故结果逐位相同
    #[instrument(skip_all, fields(filters = self.filters, kernel = self.kernel_size))]
    fn forward(&self, input: &Tensor) -> Result<Tensor, NnError> {
        let expected = self.input_shape().dims();
        if input.shape() != expected.as_slice() {
            return Err(NnError::ShapeMismatch {
                expected,
                got: input.shape().to_vec(),
            });
        }

        let x = input.view_as::<Ix3>()?;
        let kernel = self.weights.view_as::<Ix4>()?;
        let bias = self.biases.view_as::<Ix1>()?;
        let (out_h, out_w) = self.output_size();
        let (k, in_c, filters) = (self.kernel_size, self.input_channels, self.filters);

        let rows: Vec<Vec<f32>> = (0..out_h)
            .into_par_iter()
            .map(|i| {
                let mut row = vec![0.0f32; out_w * filters];
                for j in 0..out_w {
                    for f in 0..filters {
                        let mut sum = bias[f];
                        for ki in 0..k {
                            for kj in 0..k {
                                for c in 0..in_c {
                                    sum += x[[i + ki, j + kj, c]] * kernel[[f, ki, kj, c]];
                                }
                            }
                        }
                        row[j * filters + f] = sum;
                    }
                }
                row
            })
            .collect();

        let data: Vec<f32> = rows.into_iter().flatten().collect();
        Ok(Tensor::from_vec(data, &[out_h, out_w, filters])?)
    }

    fn param_count(&self) -> usize {
        self.weights.size() + self.biases.size()
    }

    fn describe(&self) -> LayerConfig {
        LayerConfig::Conv2d {
            filters: self.filters,
            kernel_size: self.kernel_size,
            input_channels: self.input_channels,
            input_height: self.input_height,
            input_width: self.input_width,
        }
    }
}
