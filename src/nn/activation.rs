/// sigmoid 的输入截断阈值
pub const SIGMOID_CLAMP: f32 = 500.0;

/// 计算 sigmoid(x) = 1 / (1 + e^(-x))，x 先被截断到 [-500, 500]
#[inline]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x.clamp(-SIGMOID_CLAMP, SIGMOID_CLAMP)).exp())
}
