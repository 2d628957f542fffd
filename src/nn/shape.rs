/*
 * @Author       : 老董
 * @Date         : 2026-10-12
 * @Description  : 层间流动的张量形状。张量本身只存数据，形状的语义（特征图还是向量）由这里描述，
 *                 模型组装时据此逐层推导并校验形状
 */

use crate::errors::NnError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 层的输入/输出形状
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerShape {
    /// 三维特征图 [height, width, channels]
    Spatial {
        height: usize,
        width: usize,
        channels: usize,
    },
    /// 一维向量 [len]
    Flat { len: usize },
}

impl LayerShape {
    pub const fn spatial(height: usize, width: usize, channels: usize) -> Self {
        Self::Spatial {
            height,
            width,
            channels,
        }
    }

    pub const fn flat(len: usize) -> Self {
        Self::Flat { len }
    }

    /// 元素总数
    pub const fn size(&self) -> usize {
        match *self {
            Self::Spatial {
                height,
                width,
                channels,
            } => height * width * channels,
            Self::Flat { len } => len,
        }
    }

    /// 任一维为0的形状不能作为层的输入：下游只会得到空缓冲区
    pub fn validate(&self) -> Result<(), NnError> {
        if self.size() == 0 {
            return Err(NnError::Configuration(format!("形状 {self} 含有为0的维度")));
        }
        Ok(())
    }

    /// 对应的张量形状
    pub fn dims(&self) -> Vec<usize> {
        match *self {
            Self::Spatial {
                height,
                width,
                channels,
            } => vec![height, width, channels],
            Self::Flat { len } => vec![len],
        }
    }
}

impl fmt::Display for LayerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spatial {
                height,
                width,
                channels,
            } => write!(f, "({height}×{width}×{channels})"),
            Self::Flat { len } => write!(f, "({len})"),
        }
    }
}
