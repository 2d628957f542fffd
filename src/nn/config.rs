/*
 * @Author       : 老董
 * @Date         : 2026-10-14
 * @Description  : 模型结构描述（只含结构，不含参数值），可与 JSON 互转，
 *                 并可配合调用方提供的随机源构建出 `Sequential`
 */

use crate::errors::NnError;
use crate::nn::layer::{Conv2d, Dense, Flatten, Layer, MaxPool2d};
use crate::nn::sequential::{DEFAULT_LEARNING_RATE, MAX_LAYERS};
use crate::nn::{LayerShape, Sequential};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 模型的可序列化描述
///
/// ```json
/// {
///   "input_shape": { "spatial": { "height": 3, "width": 3, "channels": 1 } },
///   "layers": [
///     { "type": "Conv2d", "filters": 1, "kernel_size": 2,
///       "input_channels": 1, "input_height": 3, "input_width": 3 },
///     { "type": "Flatten" },
///     { "type": "Dense", "units": 1, "input_dim": 4 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// 模型输入形状；首层为 Conv2d/Dense 时可省略
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_shape: Option<LayerShape>,
    /// 最大层数
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// 仅作记录，推理不使用
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f32,
    /// 按执行顺序排列的层
    pub layers: Vec<LayerConfig>,
}

/// 单层描述（包含类型特定参数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LayerConfig {
    Conv2d {
        filters: usize,
        kernel_size: usize,
        input_channels: usize,
        input_height: usize,
        input_width: usize,
    },
    MaxPool2d {
        pool_size: usize,
    },
    Flatten,
    Dense {
        units: usize,
        input_dim: usize,
    },
}

const fn default_capacity() -> usize {
    MAX_LAYERS
}

const fn default_learning_rate() -> f32 {
    DEFAULT_LEARNING_RATE
}

impl LayerConfig {
    /// 按描述创建层，参数随机初始化
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Layer, NnError> {
        let layer: Layer = match *self {
            Self::Conv2d {
                filters,
                kernel_size,
                input_channels,
                input_height,
                input_width,
            } => Conv2d::new(
                filters,
                kernel_size,
                input_channels,
                input_height,
                input_width,
                rng,
            )?
            .into(),
            Self::MaxPool2d { pool_size } => MaxPool2d::new(pool_size)?.into(),
            Self::Flatten => Flatten::new().into(),
            Self::Dense { units, input_dim } => Dense::new(units, input_dim, rng)?.into(),
        };
        Ok(layer)
    }
}

impl ModelConfig {
    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 按描述依次创建各层并组装为模型，形状校验规则同`Sequential::add_layer`
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Sequential, NnError> {
        let mut model = match self.input_shape {
            Some(shape) => {
                shape.validate()?;
                Sequential::with_input_shape(shape)
            }
            None => Sequential::new(),
        }
        .with_max_layers(self.capacity)
        .with_learning_rate(self.learning_rate);

        for layer in &self.layers {
            model.add_layer(layer.build(rng)?)?;
        }
        Ok(model)
    }
}
