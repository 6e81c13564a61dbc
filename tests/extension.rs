//! Tests for the opt-in `.with_filter()` slice extension.

mod common;

use common::{below_max, counters, counting, is_positive};
use with_filter::ext::WithFilterExt;
use with_filter::with_filter;

#[test]
fn method_matches_factory() {
    let items = vec![5_i64, -3, 0, 12, i64::MAX, 7];

    let via_method = items
        .with_filter(is_positive)
        .with_filter(below_max)
        .map(|x| x * 2);
    let via_factory = with_filter(&items, is_positive)
        .with_filter(below_max)
        .map(|x| x * 2);

    assert_eq!(via_method, via_factory);
    assert_eq!(via_method, vec![10, 24, 14]);
}

#[test]
fn works_on_arrays_slices_and_vecs() {
    let array = [1_i64, 2, 3, 4];
    let slice: &[i64] = array.as_slice();
    let vec = array.to_vec();

    assert_eq!(array.with_filter(|x| x % 2 == 0).cloned(), vec![2, 4]);
    assert_eq!(slice.with_filter(|x| x % 2 == 0).cloned(), vec![2, 4]);
    assert_eq!(vec.with_filter(|x| x % 2 == 0).cloned(), vec![2, 4]);
}

#[test]
fn method_is_lazy() {
    let items = vec![1_i64, 2, 3];
    let (p1, p2, _) = counters();

    let view = items
        .with_filter(counting(&p1, true))
        .with_filter(counting(&p2, false));
    assert_eq!((p1.get(), p2.get()), (0, 0));

    assert_eq!(view.count(), 0);
    assert_eq!((p1.get(), p2.get()), (3, 3));
}

mod imported_twice {
    use super::common::is_positive;
    use with_filter::ext::WithFilterExt;
    #[allow(unused_imports)]
    use with_filter::prelude::*;

    #[test]
    fn importing_twice_is_harmless() {
        let items = vec![-1_i64, 1, 2];
        assert_eq!(
            WithFilterExt::with_filter(items.as_slice(), is_positive).count(),
            items.with_filter(is_positive).count()
        );
    }
}
