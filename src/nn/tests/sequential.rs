/*
 * @Author       : 老董
 * @Date         : 2026-10-13
 * @Description  : Sequential 模型单元测试：组装时的容量/形状校验与前向传播
 */

use crate::errors::NnError;
use crate::nn::{
    Conv2d, DEFAULT_LEARNING_RATE, Dense, Flatten, Layer, LayerKind, LayerShape, MAX_LAYERS,
    MaxPool2d, Sequential, TraitLayer,
};
use crate::tensor::Tensor;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn window_sum_conv() -> Result<Conv2d, NnError> {
    Conv2d::from_parameters(Tensor::full(1.0, &[1, 2, 2, 1]), Tensor::zeros(&[1]), 3, 3)
}

#[test]
fn test_sequential_defaults() {
    let model = Sequential::new();
    assert!(model.is_empty());
    assert_eq!(model.len(), 0);
    assert_eq!(model.capacity(), MAX_LAYERS);
    assert_eq!(model.learning_rate(), DEFAULT_LEARNING_RATE);
    assert_eq!(model.input_shape(), None);
    assert_eq!(model.output_shape(), None);
    assert_eq!(model.param_count(), 0);
}

#[test]
fn test_sequential_single_conv_end_to_end() -> Result<(), NnError> {
    let mut model = Sequential::new();
    model.add_layer(window_sum_conv()?)?;

    #[rustfmt::skip]
    let x = Tensor::new(&[
        1.0, 2.0, 3.0,
        4.0, 5.0, 6.0,
        7.0, 8.0, 9.0,
    ], &[3, 3, 1])?;

    let output = model.forward_pass(&x)?;
    assert_eq!(output.shape(), &[2, 2, 1]);
    assert_eq!(output.to_vec(), vec![12.0, 16.0, 24.0, 28.0]);
    assert_eq!(model.input_shape(), Some(LayerShape::spatial(3, 3, 1)));
    assert_eq!(model.output_shape(), Some(LayerShape::spatial(2, 2, 1)));
    Ok(())
}

#[test]
fn test_sequential_capacity() -> Result<(), NnError> {
    let mut model = Sequential::with_input_shape(LayerShape::spatial(4, 4, 1)).with_max_layers(3);
    for _ in 0..3 {
        model.add_layer(Flatten::new())?;
    }
    assert_eq!(model.len(), 3);

    let err = model.add_layer(Flatten::new()).unwrap_err();
    assert_eq!(err, NnError::Capacity { capacity: 3 });
    assert_eq!(model.len(), 3);
    Ok(())
}

#[test]
fn test_sequential_max_layers_not_below_len() -> Result<(), NnError> {
    let mut model = Sequential::with_input_shape(LayerShape::flat(4));
    model.add_layer(Flatten::new())?;
    model.add_layer(Flatten::new())?;

    // 已有2层时把上限设为1，上限按已有层数计
    let mut model = model.with_max_layers(1);
    assert_eq!(model.capacity(), 2);
    assert!(model.len() <= model.capacity());
    assert_eq!(
        model.add_layer(Flatten::new()).unwrap_err(),
        NnError::Capacity { capacity: 2 }
    );
    assert_eq!(model.len(), 2);
    Ok(())
}

#[test]
fn test_sequential_rejects_zero_dim_input_shape() {
    for shape in [
        LayerShape::spatial(0, 5, 1),
        LayerShape::spatial(5, 0, 1),
        LayerShape::spatial(5, 5, 0),
        LayerShape::flat(0),
    ] {
        let mut model = Sequential::with_input_shape(shape);
        let err = model.add_layer(Flatten::new()).unwrap_err();
        assert!(matches!(err, NnError::Configuration(_)));
        assert!(model.is_empty());
        assert_eq!(model.output_shape(), Some(shape));
    }

    // 空缓冲区不会被当作合法输出
    let mut model = Sequential::with_input_shape(LayerShape::spatial(0, 5, 1));
    assert!(model.add_layer(Flatten::new()).is_err());
    let err = model.forward_pass(&Tensor::zeros(&[0, 5, 1])).unwrap_err();
    assert!(matches!(err, NnError::Configuration(_)));
}

#[test]
fn test_sequential_default_capacity() -> Result<(), NnError> {
    let mut model = Sequential::with_input_shape(LayerShape::flat(4));
    for _ in 0..MAX_LAYERS {
        model.add_layer(Flatten::new())?;
    }
    assert!(matches!(
        model.add_layer(Flatten::new()),
        Err(NnError::Capacity { capacity: MAX_LAYERS })
    ));
    assert_eq!(model.len(), MAX_LAYERS);
    Ok(())
}

#[test]
fn test_sequential_first_layer_without_input_shape() -> Result<(), NnError> {
    let mut model = Sequential::new();
    let err = model.add_layer(MaxPool2d::new(2)?).unwrap_err();
    assert!(matches!(err, NnError::Configuration(_)));
    assert!(model.is_empty());

    let err = model.add_layer(Flatten::new()).unwrap_err();
    assert!(matches!(err, NnError::Configuration(_)));

    // 声明输入形状后即可
    let mut model = Sequential::with_input_shape(LayerShape::spatial(4, 4, 2));
    model.add_layer(MaxPool2d::new(2)?)?;
    assert_eq!(model.output_shape(), Some(LayerShape::spatial(2, 2, 2)));
    Ok(())
}

#[test]
fn test_sequential_rejects_declared_shape_conflict() -> Result<(), NnError> {
    let mut model = Sequential::with_input_shape(LayerShape::spatial(4, 4, 1));
    let err = model.add_layer(window_sum_conv()?).unwrap_err();
    assert!(matches!(err, NnError::Configuration(_)));
    assert!(model.is_empty());
    Ok(())
}

#[test]
fn test_sequential_rejects_dense_input_dim_mismatch() -> Result<(), NnError> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut model = Sequential::new();
    model.add_layer(Conv2d::new(4, 3, 3, 16, 16, &mut rng)?)?; // [14, 14, 4]
    model.add_layer(MaxPool2d::new(2)?)?; // [7, 7, 4]
    model.add_layer(Flatten::new())?; // [196]

    // 按池化前的尺寸配置 input_dim → 组装时即被拒绝
    let err = model
        .add_layer(Dense::new(8, 16 * 16 * 4, &mut rng)?)
        .unwrap_err();
    assert!(matches!(err, NnError::Configuration(_)));
    assert_eq!(model.len(), 3);
    assert_eq!(model.output_shape(), Some(LayerShape::flat(196)));

    model.add_layer(Dense::new(8, 7 * 7 * 4, &mut rng)?)?;
    assert_eq!(model.output_shape(), Some(LayerShape::flat(8)));
    Ok(())
}

#[test]
fn test_sequential_rejects_dense_without_flatten() -> Result<(), NnError> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut model = Sequential::new();
    model.add_layer(window_sum_conv()?)?; // [2, 2, 1]
    let err = model.add_layer(Dense::new(1, 4, &mut rng)?).unwrap_err();
    assert!(matches!(err, NnError::Configuration(_)));
    Ok(())
}

#[test]
fn test_sequential_forward_input_mismatch() -> Result<(), NnError> {
    let mut model = Sequential::new();
    model.add_layer(window_sum_conv()?)?;

    let err = model.forward_pass(&Tensor::zeros(&[3, 3, 2])).unwrap_err();
    assert_eq!(
        err,
        NnError::ShapeMismatch {
            expected: vec![3, 3, 1],
            got: vec![3, 3, 2],
        }
    );
    let err = model.forward_pass(&Tensor::zeros(&[9])).unwrap_err();
    assert!(matches!(err, NnError::ShapeMismatch { .. }));
    Ok(())
}

#[test]
fn test_sequential_empty_model_passthrough() -> Result<(), NnError> {
    let x = Tensor::new(&[1.0, 2.0, 3.0], &[3])?;

    let output = Sequential::new().forward_pass(&x)?;
    assert_eq!(output, x);

    let model = Sequential::with_input_shape(LayerShape::flat(3));
    assert_eq!(model.forward_pass(&x)?, x);
    assert!(model.forward_pass(&Tensor::zeros(&[4])).is_err());
    Ok(())
}

#[test]
fn test_sequential_full_pipeline() -> Result<(), NnError> {
    let mut rng = StdRng::seed_from_u64(2026);
    let mut model = Sequential::new();
    model.add_layer(Conv2d::new(4, 3, 3, 12, 12, &mut rng)?)?; // [10, 10, 4]
    model.add_layer(MaxPool2d::new(2)?)?; // [5, 5, 4]
    model.add_layer(Conv2d::new(6, 2, 4, 5, 5, &mut rng)?)?; // [4, 4, 6]
    model.add_layer(MaxPool2d::new(2)?)?; // [2, 2, 6]
    model.add_layer(Flatten::new())?; // [24]
    model.add_layer(Dense::new(5, 24, &mut rng)?)?;
    model.add_layer(Dense::new(1, 5, &mut rng)?)?;

    let kinds: Vec<LayerKind> = model.layers().iter().map(Layer::kind).collect();
    assert_eq!(
        kinds,
        vec![
            LayerKind::Conv2d,
            LayerKind::MaxPool2d,
            LayerKind::Conv2d,
            LayerKind::MaxPool2d,
            LayerKind::Flatten,
            LayerKind::Dense,
            LayerKind::Dense,
        ]
    );
    assert_eq!(
        model.param_count(),
        (4 * 3 * 3 * 3 + 4) + (6 * 2 * 2 * 4 + 6) + (24 * 5 + 5) + (5 + 1)
    );

    let x = Tensor::uniform_with_rng(-1.0, 1.0, &[12, 12, 3], &mut rng)?;
    let first = model.forward_pass(&x)?;
    let second = model.forward_pass(&x)?;

    assert_eq!(first.shape(), &[1]);
    assert!(first[[0]] > 0.0 && first[[0]] < 1.0);
    // 两次前向传播结果逐位相同
    assert_eq!(first.to_vec(), second.to_vec());
    Ok(())
}
