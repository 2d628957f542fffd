use crate::tensor::Tensor;

#[test]
fn test_index_hwc_layout() {
    // [h=2, w=3, c=2]，通道维变化最快
    let data: Vec<f32> = (0..12).map(|x| x as f32).collect();
    let tensor = Tensor::from_vec(data, &[2, 3, 2]).unwrap();

    for row in 0..2 {
        for col in 0..3 {
            for ch in 0..2 {
                let linear = (row * 3 + col) * 2 + ch;
                assert_eq!(tensor[[row, col, ch]], linear as f32);
            }
        }
    }
}

#[test]
#[should_panic]
fn test_index_out_of_bounds() {
    let tensor = Tensor::zeros(&[2, 2, 1]);
    let _ = tensor[[2, 0, 0]];
}
