/*
 * @Author       : 老董
 * @Date         : 2026-10-12
 * @Description  : MaxPool2d (2D 最大池化) 层
 *
 * 窗口不重叠（步长 = pool_size），无可学习参数。
 * - 输入格式：[H, W, C]
 * - 输出格式：[H / p, W / p, C]（向下取整）
 *
 * 底部/右侧除不尽的行列直接丢弃，不参与任何窗口。
 */

use super::{LayerKind, TraitLayer};
use crate::errors::{ComparisonOperator, NnError};
use crate::nn::config::LayerConfig;
use crate::nn::LayerShape;
use crate::tensor::Tensor;
use ndarray::Ix3;
use rayon::prelude::*;
use tracing::instrument;

/// 2D 最大池化层
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxPool2d {
    pool_size: usize,
}

impl MaxPool2d {
    pub fn new(pool_size: usize) -> Result<Self, NnError> {
        if pool_size == 0 {
            return Err(NnError::comparison(
                "pool_size",
                ComparisonOperator::GreaterThan,
                0,
            ));
        }
        Ok(Self { pool_size })
    }

    pub const fn pool_size(&self) -> usize {
        self.pool_size
    }

    fn pooled_size(&self, height: usize, width: usize) -> Result<(usize, usize), NnError> {
        let (out_h, out_w) = (height / self.pool_size, width / self.pool_size);
        if out_h == 0 || out_w == 0 {
            return Err(NnError::Configuration(format!(
                "池化窗口 {p}x{p} 大于输入 {height}x{width}",
                p = self.pool_size
            )));
        }
        Ok((out_h, out_w))
    }
}

impl TraitLayer for MaxPool2d {
    fn kind(&self) -> LayerKind {
        LayerKind::MaxPool2d
    }

    fn declared_input_shape(&self) -> Option<LayerShape> {
        None
    }

    fn output_shape(&self, input_shape: &LayerShape) -> Result<LayerShape, NnError> {
        let LayerShape::Spatial {
            height,
            width,
            channels,
        } = *input_shape
        else {
            return Err(NnError::Configuration(format!(
                "MaxPool2d 需要三维特征图输入，但上游输出为 {input_shape}"
            )));
        };
        let (out_h, out_w) = self.pooled_size(height, width)?;
        Ok(LayerShape::spatial(out_h, out_w, channels))
    }

    #[instrument(skip_all, fields(pool_size = self.pool_size))]
    fn forward(&self, input: &Tensor) -> Result<Tensor, NnError> {
        let x = input.view_as::<Ix3>()?;
        let (height, width, channels) = x.dim();
        let (out_h, out_w) = self.pooled_size(height, width)?;
        let p = self.pool_size;

        let rows: Vec<Vec<f32>> = (0..out_h)
            .into_par_iter()
            .map(|i| {
                let mut row = vec![0.0f32; out_w * channels];
                for c in 0..channels {
                    for j in 0..out_w {
                        let mut max_val = f32::NEG_INFINITY;
                        for pi in 0..p {
                            for pj in 0..p {
                                max_val = max_val.max(x[[i * p + pi, j * p + pj, c]]);
                            }
                        }
                        row[j * channels + c] = max_val;
                    }
                }
                row
            })
            .collect();

        let data: Vec<f32> = rows.into_iter().flatten().collect();
        Ok(Tensor::from_vec(data, &[out_h, out_w, channels])?)
    }

    fn describe(&self) -> LayerConfig {
        LayerConfig::MaxPool2d {
            pool_size: self.pool_size,
        }
    }
}
