use super::Tensor;
use crate::errors::TensorError;
use ndarray::IxDyn;

impl Tensor {
    /// 若为向量，`shape`为[n]；若为特征图，`shape`为[h, w, c]
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// 重塑为新形状，元素总数必须保持不变，元素的线性顺序不变
    pub fn reshape(&self, shape: &[usize]) -> Result<Self, TensorError> {
        let new_total_elements: usize = shape.iter().product();
        if self.size() != new_total_elements {
            return Err(TensorError::IncompatibleShape {
                from: self.shape().to_vec(),
                to: shape.to_vec(),
            });
        }
        let data = self
            .data
            .as_standard_layout()
            .into_owned()
            .into_shape(IxDyn(shape))
            .map_err(|_| TensorError::IncompatibleShape {
                from: self.shape().to_vec(),
                to: shape.to_vec(),
            })?;
        Ok(Self { data })
    }

    /// 展平为一维向量：[h, w, c] → [h*w*c]
    pub fn flatten(&self) -> Result<Self, TensorError> {
        self.reshape(&[self.size()])
    }
}
