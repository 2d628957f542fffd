/*
 * @Author       : 老董
 * @Date         : 2026-10-13
 * @Description  : Sequential 模型：按插入顺序串联各层，前一层的输出即下一层的输入
 *
 * ```text
 * Input → Layer[0] → Layer[1] → ... → Layer[N-1] → Output
 * ```
 *
 * 形状在 `add_layer` 时逐层推导并校验，因此一旦组装成功，
 * 前向传播中只可能因“输入张量与模型声明不符”而失败。
 */

use crate::errors::NnError;
use crate::nn::config::ModelConfig;
use crate::nn::layer::{Layer, TraitLayer};
use crate::nn::LayerShape;
use crate::tensor::Tensor;
use tracing::{debug, instrument, trace};

/// 默认最大层数
pub const MAX_LAYERS: usize = 10;
/// 默认学习率（推理不使用）
pub const DEFAULT_LEARNING_RATE: f32 = 0.01;

/// 顺序模型
#[derive(Debug, Clone)]
pub struct Sequential {
    layers: Vec<Layer>,
    max_layers: usize,
    learning_rate: f32,
    /// 模型输入形状：显式声明，或取自首层声明的输入形状
    input_shape: Option<LayerShape>,
    /// 末层输出形状（无层时为 None）
    output_shape: Option<LayerShape>,
}

impl Default for Sequential {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequential {
    /// 创建空模型，输入形状由首层决定（首层须为 Conv2d 或 Dense）
    pub fn new() -> Self {
        Self {
            layers: Vec::with_capacity(MAX_LAYERS),
            max_layers: MAX_LAYERS,
            learning_rate: DEFAULT_LEARNING_RATE,
            input_shape: None,
            output_shape: None,
        }
    }

    /// 创建空模型并声明输入形状，此时首层可以是任意种类
    pub fn with_input_shape(input_shape: LayerShape) -> Self {
        Self {
            input_shape: Some(input_shape),
            ..Self::new()
        }
    }

    /// 设置最大层数，不会低于已有层数
    pub fn with_max_layers(mut self, max_layers: usize) -> Self {
        self.max_layers = max_layers.max(self.layers.len());
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// 在末尾追加一层。
    ///
    /// 失败时模型保持不变：
    /// - 层数已满 → `NnError::Capacity`
    /// - 上游形状含为0的维度 → `NnError::Configuration`
    /// - 该层不接受上游的输出形状（如 Dense 的 `input_dim` 与展平后的长度不符）→ `NnError::Configuration`
    pub fn add_layer(&mut self, layer: impl Into<Layer>) -> Result<(), NnError> {
        let layer = layer.into();
        if self.layers.len() >= self.max_layers {
            return Err(NnError::Capacity {
                capacity: self.max_layers,
            });
        }

        let upstream = match self.output_shape.or(self.input_shape) {
            Some(shape) => shape,
            None => layer.declared_input_shape().ok_or_else(|| {
                NnError::Configuration(format!(
                    "首层 {} 未声明输入形状，请用 Sequential::with_input_shape 创建模型",
                    layer.name()
                ))
            })?,
        };
        upstream.validate()?;
        let output_shape = layer.output_shape(&upstream)?;

        debug!(
            layer = layer.name(),
            index = self.layers.len(),
            input = %upstream,
            output = %output_shape,
            "添加层"
        );
        if self.input_shape.is_none() {
            self.input_shape = Some(upstream);
        }
        self.output_shape = Some(output_shape);
        self.layers.push(layer);
        Ok(())
    }

    /// 前向传播：依次执行各层，返回末层输出。
    /// `input`的形状必须与模型输入形状完全一致；无任何层时原样返回输入。
    /// 声明的输入形状含为0的维度时返回`NnError::Configuration`
    #[instrument(skip_all, fields(layers = self.layers.len()))]
    pub fn forward_pass(&self, input: &Tensor) -> Result<Tensor, NnError> {
        if let Some(input_shape) = self.input_shape {
            input_shape.validate()?;
            let expected = input_shape.dims();
            if input.shape() != expected.as_slice() {
                return Err(NnError::ShapeMismatch {
                    expected,
                    got: input.shape().to_vec(),
                });
            }
        }

        let mut layers = self.layers.iter().enumerate();
        let Some((_, first)) = layers.next() else {
            return Ok(input.clone());
        };
        let mut current = first.forward(input)?;
        trace!(index = 0, layer = first.name(), shape = ?current.shape());
        for (index, layer) in layers {
            current = layer.forward(&current)?;
            trace!(index, layer = layer.name(), shape = ?current.shape());
        }
        Ok(current)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// 最大层数
    pub const fn capacity(&self) -> usize {
        self.max_layers
    }

    pub const fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    pub const fn input_shape(&self) -> Option<LayerShape> {
        self.input_shape
    }

    /// 末层输出形状；无层时等于输入形状
    pub fn output_shape(&self) -> Option<LayerShape> {
        self.output_shape.or(self.input_shape)
    }

    /// 全部层的可学习参数总数
    pub fn param_count(&self) -> usize {
        self.layers.iter().map(TraitLayer::param_count).sum()
    }

    /// 导出模型结构描述
    pub fn describe(&self) -> ModelConfig {
        ModelConfig {
            input_shape: self.input_shape,
            capacity: self.max_layers,
            learning_rate: self.learning_rate,
            layers: self.layers.iter().map(TraitLayer::describe).collect(),
        }
    }
}
