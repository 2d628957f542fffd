/*
 * @Author       : 老董
 * @Date         : 2026-10-12
 * @Description  : Flatten 层 - 将 [H, W, C] 特征图按行优先（通道最快）顺序展平为 [H*W*C] 向量，
 *                 常用于卷积部分与全连接层之间的衔接
 */

use super::{LayerKind, TraitLayer};
use crate::errors::NnError;
use crate::nn::config::LayerConfig;
use crate::nn::LayerShape;
use crate::tensor::Tensor;

/// Flatten 层 - 无参数，显式地改变形状（而非空操作），元素个数保持不变
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flatten;

impl Flatten {
    pub const fn new() -> Self {
        Self
    }
}

impl TraitLayer for Flatten {
    fn kind(&self) -> LayerKind {
        LayerKind::Flatten
    }

    fn declared_input_shape(&self) -> Option<LayerShape> {
        None
    }

    fn output_shape(&self, input_shape: &LayerShape) -> Result<LayerShape, NnError> {
        Ok(LayerShape::flat(input_shape.size()))
    }

    fn forward(&self, input: &Tensor) -> Result<Tensor, NnError> {
        Ok(input.flatten()?)
    }

    fn describe(&self) -> LayerConfig {
        LayerConfig::Flatten
    }
}
