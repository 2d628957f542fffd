/*
 * @Author       : 老董
 * @Date         : 2026-10-12
 * @Description  : 负责神经网络（neural network）的构建与前向推理
 */

pub mod activation;
mod config;
mod init;
pub mod layer;
mod sequential;
mod shape;

pub use activation::sigmoid;
pub use config::{LayerConfig, ModelConfig};
pub use init::{CONV_WEIGHT_SCALE, Init};
pub use layer::{Conv2d, Dense, Flatten, Layer, LayerKind, MaxPool2d, TraitLayer};
pub use sequential::{DEFAULT_LEARNING_RATE, MAX_LAYERS, Sequential};
pub use shape::LayerShape;

#[cfg(test)]
mod tests;
