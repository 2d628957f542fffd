//! # seq_cnn
//!
//! 一个只做前向推理的小型卷积神经网络引擎：
//! Conv2d、MaxPool2d、Flatten、Dense 四种层按顺序组成 `Sequential` 模型，
//! 对固定形状的输入张量执行一次前向传播。
//!
//! ```ignore
//! use rand::{SeedableRng, rngs::StdRng};
//! use seq_cnn::nn::{Conv2d, Dense, Flatten, MaxPool2d, Sequential};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut model = Sequential::new();
//! model.add_layer(Conv2d::new(8, 3, 1, 28, 28, &mut rng)?)?; // [26, 26, 8]
//! model.add_layer(MaxPool2d::new(2)?)?;                      // [13, 13, 8]
//! model.add_layer(Flatten::new())?;                          // [1352]
//! model.add_layer(Dense::new(10, 13 * 13 * 8, &mut rng)?)?;  // [10]
//! let output = model.forward_pass(&image)?;
//! ```

pub mod errors;
pub mod nn;
pub mod tensor;
