use blml::eval::{EvalInputs, load_eval_inputs, save_eval_inputs};
use blml::{
    EvalError, TopKGroupAccuracy, accuracy_curve, group_slices, intersect_sorted,
    split_n_by_ratios,
};
use rstest::rstest;

#[rstest]
#[case(100, vec![1, 1], vec![0..50, 50..100])]
#[case(300, vec![1, 2], vec![0..100, 100..300])]
#[case(10, vec![1, 100], vec![0..1, 1..10])]
#[case(4, vec![1, 1, 1, 1], vec![0..1, 1..2, 2..3, 3..4])]
fn ratio_examples(
    #[case] n: usize,
    #[case] ratios: Vec<u64>,
    #[case] expected: Vec<std::ops::Range<usize>>,
) {
    assert_eq!(split_n_by_ratios(n, &ratios).unwrap(), expected);
}

#[test]
fn split_groups_then_score() {
    let group_ids = [0, 0, 0, 0, 1, 1, 1, 1, 1, 2, 2];
    let y_true = [0, 1, 0, 0, 1, 0, 0, 0, 0, 0, 1];
    let y_pred = [0, 1, 2, 3, 4, 4, 4, 4, 4, 1, 0];

    let groups = group_slices(group_ids);
    assert_eq!(groups, vec![0..4, 4..9, 9..11]);

    let acc = TopKGroupAccuracy::new(3, groups.clone()).unwrap();
    assert_eq!(acc.count(&y_true, &y_pred), (2, 3));
    assert_eq!(acc.accuracy(&y_true, &y_pred), Ok(2.0 / 3.0));

    let scaled: Vec<f64> = y_pred.iter().map(|&x| f64::from(x) / 10.0).collect();
    assert_eq!(acc.count(&y_true, &scaled), (2, 3));

    let curve = accuracy_curve(&groups, 3, &y_true, &y_pred).unwrap();
    assert_eq!(curve[2].accuracy, Some(2.0 / 3.0));
}

#[test]
fn empty_groups_have_no_ratio() {
    let acc = TopKGroupAccuracy::new(1, group_slices(Vec::<i64>::new())).unwrap();
    let none: [f64; 0] = [];
    assert_eq!(acc.count(&none, &none), (0, 0));
    assert_eq!(acc.accuracy(&none, &none), Err(EvalError::NoGroups));
}

#[test]
fn intersect_training_folds() {
    // ids kept by three independent filters over the same dataset
    let filters: Vec<Vec<u32>> = vec![
        (0..1000).filter(|x| x % 2 == 0).collect(),
        (0..1000).filter(|x| x % 3 == 0).collect(),
        (0..1000).filter(|x| x % 5 == 0).collect(),
    ];
    let common: Vec<u32> = intersect_sorted(&filters).copied().collect();
    let expected: Vec<u32> = (0..1000).filter(|x| x % 30 == 0).collect();
    assert_eq!(common, expected);

    let none: Vec<Vec<u32>> = Vec::new();
    assert_eq!(intersect_sorted(&none).count(), 0);
}

#[test]
fn split_then_score_each_part_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("eval.npz");

    let group_ids: Vec<i64> = (0..40).map(|i| i / 4).collect();
    let y_true: Vec<f64> = (0..40).map(|i| if i % 4 == 1 { 1.0 } else { 0.0 }).collect();
    let y_pred: Vec<f64> = (0..40).map(|i| f64::from((i * 7) % 4)).collect();
    let inputs = EvalInputs { group_ids, y_true, y_pred };
    save_eval_inputs(&path, &inputs).unwrap();
    let loaded = load_eval_inputs(&path).unwrap();

    let groups = loaded.groups();
    assert_eq!(groups.len(), 10);

    // every group splits the same way, so train and valid both score the full set
    let parts = split_n_by_ratios(groups.len(), &[4, 1]).unwrap();
    assert_eq!(parts, vec![0..8, 8..10]);
    for part in parts {
        let acc = TopKGroupAccuracy::new(2, groups[part.clone()].to_vec()).unwrap();
        let (hits, total) = acc.count(&loaded.y_true, &loaded.y_pred);
        assert_eq!(total, part.len());
        assert_eq!(hits, total);
    }
}
