use std::ops::Index;

use crate::tensor::Tensor;

// 引用式索引：`t[[row, col, channel]]`，索引越界或维数不符时panic（同ndarray）
impl<const N: usize> Index<[usize; N]> for Tensor {
    type Output = f32;

    fn index(&self, index: [usize; N]) -> &Self::Output {
        &self.data[&index[..]]
    }
}
